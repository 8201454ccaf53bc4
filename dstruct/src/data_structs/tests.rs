use rstest::{
    fixture,
    rstest,
};

use super::typedef::PosType;
use super::*;
use crate::error::DStructError;

#[fixture]
fn table() -> ReactivityTable {
    ReactivityTable::try_from_named(
        &["A1", "B1", "A2"],
        vec![
            vec![Some(0.1), Some(0.2), None, Some(0.4)],
            vec![Some(1.0), Some(-0.5), Some(0.3), Some(0.4)],
            vec![None, None, Some(f64::NAN), Some(0.2)],
        ],
    )
    .unwrap()
}

// --- ReplicateLabel ---

#[rstest]
#[case("A1", Group::A, 1)]
#[case("B12", Group::B, 12)]
#[case(" A3 ", Group::A, 3)]
fn test_label_parse(
    #[case] raw: &str,
    #[case] group: Group,
    #[case] number: usize,
) {
    let label: ReplicateLabel = raw.parse().unwrap();
    assert_eq!(label.group(), group);
    assert_eq!(label.number(), number);
    assert_eq!(label.to_string(), raw.trim());
}

#[rstest]
#[case("C1")]
#[case("A")]
#[case("A0")]
#[case("Ax")]
#[case("")]
fn test_label_parse_invalid(#[case] raw: &str) {
    assert!(matches!(
        raw.parse::<ReplicateLabel>(),
        Err(DStructError::SchemaViolation(_))
    ));
}

// --- ReactivityTable ---

#[rstest]
fn test_table_shape(table: ReactivityTable) {
    assert_eq!(table.len(), 4);
    assert_eq!(table.reps(Group::A), 2);
    assert_eq!(table.reps(Group::B), 1);
    assert_eq!(table.first_position(), 1);
    assert_eq!(table.last_position(), 4);
    assert_eq!(table.full_region(), Some(Region::new(1, 4)));
}

#[rstest]
fn test_table_masks_nan_and_clamps_negative(table: ReactivityTable) {
    let b1 = table.column(&"B1".parse().unwrap()).unwrap();
    assert_eq!(b1[1], Some(0.0));
    let a2 = table.column(&"A2".parse().unwrap()).unwrap();
    assert_eq!(a2[2], None);
}

#[rstest]
fn test_table_row_access(table: ReactivityTable) {
    let labels = vec!["A1".parse().unwrap(), "A2".parse().unwrap()];
    let row = table.row_values(3, &labels).collect::<Vec<_>>();
    assert_eq!(row, vec![Some(0.4), Some(0.2)]);
    assert_eq!(table.row_mean(2), Some(0.3));
    let empty = ReactivityTable::try_from_named(&["A1", "B1"], vec![vec![None], vec![None]])
        .unwrap();
    assert_eq!(empty.row_mean(0), None);
}

#[rstest]
#[case(&["A1", "A1", "B1"])]
#[case(&["A1", "A3", "B1"])]
#[case(&["A1", "A2", "A3"])]
#[case(&["B1", "B2", "B3"])]
fn test_table_invalid_schema(#[case] names: &[&str]) {
    let columns = vec![vec![Some(1.0)]; names.len()];
    assert!(matches!(
        ReactivityTable::try_from_named(names, columns),
        Err(DStructError::SchemaViolation(_))
    ));
}

#[test]
fn test_table_ragged_and_infinite() {
    let ragged = ReactivityTable::try_from_named(
        &["A1", "B1"],
        vec![vec![Some(1.0), Some(2.0)], vec![Some(1.0)]],
    );
    assert!(matches!(ragged, Err(DStructError::SchemaViolation(_))));

    let inf = ReactivityTable::try_from_named(
        &["A1", "B1"],
        vec![vec![Some(f64::INFINITY)], vec![Some(1.0)]],
    );
    assert!(matches!(inf, Err(DStructError::SchemaViolation(_))));
}

#[rstest]
fn test_table_slice_keeps_coordinates(table: ReactivityTable) {
    let table = table.with_first_position(101);
    let region = Region::new(102, 103);
    assert_eq!(table.region_rows(&region).unwrap(), 1..3);

    let sliced = table.slice(&region).unwrap();
    assert_eq!(sliced.len(), 2);
    assert_eq!(sliced.first_position(), 102);
    assert_eq!(sliced.last_position(), 103);
    assert_eq!(
        sliced.column(&"A1".parse().unwrap()).unwrap(),
        &[Some(0.2), None]
    );

    assert!(table.region_rows(&Region::new(100, 102)).is_err());
    assert!(table.region_rows(&Region::new(104, 105)).is_err());
}

#[rstest]
fn test_table_last_position_at_limit(table: ReactivityTable) {
    let table = table.with_first_position(PosType::MAX - 3);
    assert_eq!(table.last_position(), PosType::MAX);
    assert_eq!(table.full_region(), Some(Region::new(PosType::MAX - 3, PosType::MAX)));
}

#[rstest]
#[should_panic(expected = "last position exceeds")]
fn test_table_last_position_overflow(table: ReactivityTable) {
    let _ = table.with_first_position(PosType::MAX - 2);
}

// --- Region ---

#[test]
fn test_region() {
    let region = Region::new(5, 9);
    assert_eq!(region.length(), 5);
    assert!(region.contains(5) && region.contains(9) && !region.contains(10));
    assert_eq!(region.shift(10), Region::new(15, 19));
    assert_eq!(region.to_string(), "5-9");
    assert!(Region::try_new(6, 5).is_err());
    assert!(Region::try_new(0, 5).is_err());
}

// --- Combination ---

#[test]
fn test_combination_kinds() {
    let within: Combination = "A1,A2,A3".parse().unwrap();
    assert!(within.is_within());
    assert!(!within.shares_batch());

    let between: Combination = "A3 B1 B2".parse().unwrap();
    assert!(!between.is_within());
    assert!(!between.shares_batch());
    assert_eq!(between.arity(), 3);
    assert_eq!(between.to_string(), "A3,B1,B2");

    let same_batch: Combination = "A2,B2".parse().unwrap();
    assert!(same_batch.shares_batch());
}

#[rstest]
fn test_combination_set(table: ReactivityTable) {
    assert!(CombinationSet::try_new(vec![]).is_err());
    assert!(CombinationSet::try_new(vec![
        "A1,A2".parse().unwrap(),
        "A1,B1,A2".parse().unwrap(),
    ])
    .is_err());
    assert!(CombinationSet::try_new(vec!["A1,A1".parse().unwrap()]).is_err());

    let set = CombinationSet::try_new(vec![
        "A1,B1".parse().unwrap(),
        "A2,B1".parse().unwrap(),
    ])
    .unwrap();
    assert_eq!(set.arity(), 2);
    assert!(set.validate(&table).is_ok());

    let missing = CombinationSet::try_new(vec!["A1,B2".parse().unwrap()]).unwrap();
    assert!(matches!(
        missing.validate(&table),
        Err(DStructError::SchemaViolation(_))
    ));
}

#[test]
fn test_combination_set_serde() {
    let set = CombinationSet::try_new(vec!["A3,B1,B2".parse().unwrap()]).unwrap();
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, r#"[["A3","B1","B2"]]"#);
    let back: CombinationSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, set);
    assert!(serde_json::from_str::<CombinationSet>("[]").is_err());
}
