use std::fmt::{
    Display,
    Formatter,
};
use std::str::FromStr;

use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};

use super::table::{
    ReactivityTable,
    ReplicateLabel,
};
use crate::error::{
    DStructError,
    Result,
};
use crate::schema_bail;

/// Replicates drawn together for one dissimilarity computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Combination(Vec<ReplicateLabel>);

impl Combination {
    pub fn new(labels: Vec<ReplicateLabel>) -> Self { Self(labels) }

    pub fn labels(&self) -> &[ReplicateLabel] { &self.0 }

    pub fn arity(&self) -> usize { self.0.len() }

    /// All labels belong to the same group.
    pub fn is_within(&self) -> bool {
        self.0
            .iter()
            .map(ReplicateLabel::group)
            .all_equal()
    }

    /// Two labels share a replicate number, i.e. a batch.
    pub fn shares_batch(&self) -> bool {
        !self
            .0
            .iter()
            .map(ReplicateLabel::number)
            .all_unique()
    }
}

impl Display for Combination {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

impl FromStr for Combination {
    type Err = DStructError;

    /// Parses comma, tab or whitespace separated labels, e.g. `A1,A2,B1`.
    fn from_str(s: &str) -> Result<Self> {
        let labels = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(ReplicateLabel::from_str)
            .collect::<Result<Vec<_>>>()?;
        if labels.is_empty() {
            schema_bail!("empty combination")
        }
        Ok(Self(labels))
    }
}

/// Non-empty collection of combinations sharing one slot arity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Combination>", into = "Vec<Combination>")]
pub struct CombinationSet {
    combs: Vec<Combination>,
}

impl CombinationSet {
    pub fn try_new(combs: Vec<Combination>) -> Result<Self> {
        if combs.is_empty() {
            schema_bail!("combination set is empty")
        }
        if !combs.iter().map(Combination::arity).all_equal() {
            schema_bail!(
                "combinations of one set must have the same number of labels: {}",
                combs.iter().join(" | ")
            )
        }
        if let Some(c) = combs.iter().find(|c| !c.labels().iter().all_unique()) {
            schema_bail!("combination {} repeats a replicate", c)
        }
        Ok(Self { combs })
    }

    pub fn arity(&self) -> usize { self.combs[0].arity() }

    pub fn len(&self) -> usize { self.combs.len() }

    pub fn is_empty(&self) -> bool { self.combs.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Combination> { self.combs.iter() }

    /// Checks that every label refers to a replicate present in `table`.
    pub fn validate(
        &self,
        table: &ReactivityTable,
    ) -> Result<()> {
        for comb in self.combs.iter() {
            if let Some(label) = comb
                .labels()
                .iter()
                .find(|l| !table.has_label(l))
            {
                schema_bail!(
                    "combination {} refers to missing replicate {}",
                    comb,
                    label
                )
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Combination>> for CombinationSet {
    type Error = DStructError;

    fn try_from(value: Vec<Combination>) -> Result<Self> { Self::try_new(value) }
}

impl From<CombinationSet> for Vec<Combination> {
    fn from(value: CombinationSet) -> Self { value.combs }
}

impl<'a> IntoIterator for &'a CombinationSet {
    type IntoIter = std::slice::Iter<'a, Combination>;
    type Item = &'a Combination;

    fn into_iter(self) -> Self::IntoIter { self.combs.iter() }
}

impl Display for CombinationSet {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "[{}]", self.combs.iter().join(" | "))
    }
}
