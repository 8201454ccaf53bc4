//! Generation of within- and between-group replicate combinations.
//!
//! Automatic combinations pool the labels `A1..An, B1..Bm` and take every
//! subset of `max(n, m, 2)` labels in lexicographic order. Subsets drawn from
//! a single group estimate the within-group variation, subsets mixing both
//! groups the between-group variation. With `batches` enabled, subsets
//! holding two replicates of the same batch (equal replicate numbers) are
//! skipped.

use itertools::Itertools;
use log::debug;

use crate::data_structs::{
    Combination,
    CombinationSet,
    Group,
    ReactivityTable,
    ReplicateLabel,
};
use crate::error::{
    DStructError,
    Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Combinations {
    pub within:  CombinationSet,
    pub between: CombinationSet,
}

/// Builds the combinations used for `table`.
///
/// User supplied sets are validated against the table and used as they are;
/// whichever set is missing is generated automatically.
pub fn get_combs(
    table: &ReactivityTable,
    batches: bool,
    within: Option<&CombinationSet>,
    between: Option<&CombinationSet>,
) -> Result<Combinations> {
    let reps_a = table.reps(Group::A);
    let reps_b = table.reps(Group::B);
    let (auto_within, auto_between) = match (within, between) {
        (Some(_), Some(_)) => (Vec::new(), Vec::new()),
        _ => generate(reps_a, reps_b, batches),
    };

    let within = match within {
        Some(set) => {
            set.validate(table)?;
            set.clone()
        },
        None => within_set(auto_within, reps_a, reps_b)?,
    };
    let between = match between {
        Some(set) => {
            set.validate(table)?;
            set.clone()
        },
        None => between_set(auto_between, reps_a, reps_b, batches)?,
    };

    debug!("Within-group combinations: {}", within);
    debug!("Between-group combinations: {}", between);
    Ok(Combinations { within, between })
}

/// Generates combinations for `reps_a` and `reps_b` replicates.
///
/// Fails with [`DStructError::InsufficientData`] when no within-group or no
/// between-group combination can be formed, e.g. with a single replicate in
/// each group.
pub fn auto_combs(
    reps_a: usize,
    reps_b: usize,
    batches: bool,
) -> Result<Combinations> {
    let (within, between) = generate(reps_a, reps_b, batches);
    Ok(Combinations {
        within:  within_set(within, reps_a, reps_b)?,
        between: between_set(between, reps_a, reps_b, batches)?,
    })
}

fn arity(
    reps_a: usize,
    reps_b: usize,
) -> usize {
    reps_a.max(reps_b).max(2)
}

fn generate(
    reps_a: usize,
    reps_b: usize,
    batches: bool,
) -> (Vec<Combination>, Vec<Combination>) {
    if reps_a == 0 || reps_b == 0 {
        return (Vec::new(), Vec::new());
    }
    let pooled = (1..=reps_a)
        .map(|i| ReplicateLabel::new(Group::A, i))
        .chain((1..=reps_b).map(|i| ReplicateLabel::new(Group::B, i)))
        .collect_vec();

    pooled
        .into_iter()
        .combinations(arity(reps_a, reps_b))
        .map(Combination::new)
        .filter(|c| !(batches && c.shares_batch()))
        .partition(Combination::is_within)
}

fn within_set(
    combs: Vec<Combination>,
    reps_a: usize,
    reps_b: usize,
) -> Result<CombinationSet> {
    if combs.is_empty() {
        return Err(DStructError::InsufficientData(format!(
            "no within-group combination of {} replicates for {} A and {} B replicates",
            arity(reps_a, reps_b),
            reps_a,
            reps_b
        )));
    }
    CombinationSet::try_new(combs)
}

fn between_set(
    combs: Vec<Combination>,
    reps_a: usize,
    reps_b: usize,
    batches: bool,
) -> Result<CombinationSet> {
    if combs.is_empty() {
        return Err(DStructError::InsufficientData(format!(
            "no between-group combination of {} replicates for {} A and {} B \
             replicates (batches: {})",
            arity(reps_a, reps_b),
            reps_a,
            reps_b,
            batches
        )));
    }
    CombinationSet::try_new(combs)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn as_strings(set: &CombinationSet) -> Vec<String> {
        set.iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_two_by_one() {
        let combs = auto_combs(2, 1, false).unwrap();
        assert_eq!(as_strings(&combs.within), vec!["A1,A2"]);
        assert_eq!(as_strings(&combs.between), vec!["A1,B1", "A2,B1"]);
    }

    #[test]
    fn test_two_by_one_batches() {
        let combs = auto_combs(2, 1, true).unwrap();
        assert_eq!(as_strings(&combs.within), vec!["A1,A2"]);
        assert_eq!(as_strings(&combs.between), vec!["A2,B1"]);
    }

    #[test]
    fn test_two_by_two_pairs() {
        let combs = auto_combs(2, 2, false).unwrap();
        assert_eq!(as_strings(&combs.within), vec!["A1,A2", "B1,B2"]);
        assert_eq!(
            as_strings(&combs.between),
            vec!["A1,B1", "A1,B2", "A2,B1", "A2,B2"]
        );
    }

    #[test]
    fn test_three_by_two() {
        let combs = auto_combs(3, 2, false).unwrap();
        assert_eq!(as_strings(&combs.within), vec!["A1,A2,A3"]);
        // 10 triples of five labels, less the single within triple
        assert_eq!(combs.between.len(), 9);
        assert_eq!(as_strings(&combs.between)[0], "A1,A2,B1");
        assert_eq!(as_strings(&combs.between)[8], "A3,B1,B2");
    }

    #[test]
    fn test_three_by_two_batches() {
        let combs = auto_combs(3, 2, true).unwrap();
        assert_eq!(as_strings(&combs.within), vec!["A1,A2,A3"]);
        assert_eq!(
            as_strings(&combs.between),
            vec!["A1,A3,B2", "A2,A3,B1", "A3,B1,B2"]
        );
    }

    #[test]
    fn test_symmetric_counts() {
        let combs = auto_combs(3, 3, false).unwrap();
        assert_eq!(combs.within.len(), 2);
        assert_eq!(combs.between.len(), 18);
        assert_eq!(combs.between.arity(), 3);

        let combs = auto_combs(3, 3, true).unwrap();
        assert_eq!(combs.within.len(), 2);
        assert_eq!(combs.between.len(), 6);
        assert!(combs.between.iter().all(|c| !c.shares_batch()));
    }

    #[rstest]
    #[case(1, 1, false)]
    #[case(1, 1, true)]
    #[case(0, 3, false)]
    fn test_insufficient(
        #[case] reps_a: usize,
        #[case] reps_b: usize,
        #[case] batches: bool,
    ) {
        assert!(matches!(
            auto_combs(reps_a, reps_b, batches),
            Err(DStructError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_user_sets_take_precedence() {
        let table = ReactivityTable::try_from_named(
            &["A1", "A2", "A3", "B1", "B2"],
            vec![vec![Some(1.0)]; 5],
        )
        .unwrap();
        let within = CombinationSet::try_new(vec!["A1,A2,A3".parse().unwrap()]).unwrap();
        let between = CombinationSet::try_new(vec!["A3,B1,B2".parse().unwrap()]).unwrap();

        let combs = get_combs(&table, true, Some(&within), Some(&between)).unwrap();
        assert_eq!(combs.within, within);
        assert_eq!(combs.between, between);

        let combs = get_combs(&table, false, None, Some(&between)).unwrap();
        assert_eq!(as_strings(&combs.within), vec!["A1,A2,A3"]);
        assert_eq!(combs.between, between);

        let bad = CombinationSet::try_new(vec!["A4,B1,B2".parse().unwrap()]).unwrap();
        assert!(matches!(
            get_combs(&table, false, Some(&bad), None),
            Err(DStructError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_user_sets_skip_generation_errors() {
        let table =
            ReactivityTable::try_from_named(&["A1", "B1"], vec![vec![Some(1.0)]; 2]).unwrap();
        let within = CombinationSet::try_new(vec!["A1".parse().unwrap()]).unwrap();
        let between = CombinationSet::try_new(vec!["A1,B1".parse().unwrap()]).unwrap();
        assert!(get_combs(&table, true, Some(&within), Some(&between)).is_ok());
        assert!(matches!(
            get_combs(&table, true, None, Some(&between)),
            Err(DStructError::InsufficientData(_))
        ));
    }
}
