use std::collections::HashMap;
use std::fmt::{
    Display,
    Formatter,
};
use std::ops::Range;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

use super::region::Region;
use super::typedef::{
    MaskedSeq,
    PosType,
    ScoreType,
};
use crate::error::{
    DStructError,
    Result,
};
use crate::schema_bail;

/// Experimental condition a replicate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
}

impl Group {
    pub fn as_char(&self) -> char {
        match self {
            Group::A => 'A',
            Group::B => 'B',
        }
    }
}

/// Typed replicate column label, e.g. `A1` or `B2`.
///
/// The replicate number doubles as the batch identity: `A2` and `B2` are
/// assumed to have been processed in the same batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReplicateLabel {
    group:  Group,
    number: usize,
}

impl ReplicateLabel {
    pub fn new(
        group: Group,
        number: usize,
    ) -> Self {
        debug_assert!(number > 0, "replicate numbers start at 1");
        Self { group, number }
    }

    pub fn group(&self) -> Group { self.group }

    pub fn number(&self) -> usize { self.number }
}

impl Display for ReplicateLabel {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}{}", self.group.as_char(), self.number)
    }
}

impl FromStr for ReplicateLabel {
    type Err = DStructError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let group = match chars.next() {
            Some('A') => Group::A,
            Some('B') => Group::B,
            _ => schema_bail!("invalid replicate label '{}': must start with A or B", s),
        };
        let number = chars
            .as_str()
            .parse::<usize>()
            .map_err(|_| {
                DStructError::SchemaViolation(format!(
                    "invalid replicate label '{}': expected <Group><ReplicateNumber>",
                    s
                ))
            })?;
        if number == 0 {
            schema_bail!("invalid replicate label '{}': replicate numbers start at 1", s)
        }
        Ok(Self::new(group, number))
    }
}

impl Serialize for ReplicateLabel {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReplicateLabel {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Per-nucleotide reactivities of every replicate of one transcript (or of
/// one user-defined region).
///
/// Rows are nucleotides at consecutive positions starting from
/// [`first_position`](Self::first_position) (1 by default). Columns are
/// replicates, addressed through a label → column index map which is
/// validated once, at construction.
#[derive(Debug, Clone)]
pub struct ReactivityTable {
    labels:         Vec<ReplicateLabel>,
    index:          HashMap<ReplicateLabel, usize>,
    columns:        Vec<MaskedSeq>,
    reps_a:         usize,
    reps_b:         usize,
    n_rows:         usize,
    first_position: PosType,
}

impl ReactivityTable {
    /// Builds a table from typed labels and the matching columns.
    ///
    /// Unavailable values are `None` (NaN is treated the same way). Negative
    /// reactivities are clamped to 0. Infinite values, duplicate labels,
    /// replicate numbering with gaps, a missing group or ragged columns are
    /// rejected with [`DStructError::SchemaViolation`].
    pub fn try_new(
        labels: Vec<ReplicateLabel>,
        columns: Vec<MaskedSeq>,
    ) -> Result<Self> {
        if labels.len() != columns.len() {
            schema_bail!(
                "{} labels supplied for {} columns",
                labels.len(),
                columns.len()
            )
        }
        if let Some(dup) = labels.iter().duplicates().next() {
            schema_bail!("duplicate replicate column {}", dup)
        }

        let reps_a = Self::validate_group(&labels, Group::A)?;
        let reps_b = Self::validate_group(&labels, Group::B)?;

        let n_rows = columns.first().map(Vec::len).unwrap_or(0);
        if let Some((label, col)) = labels
            .iter()
            .zip(columns.iter())
            .find(|(_, c)| c.len() != n_rows)
        {
            schema_bail!(
                "column {} has {} rows, expected {}",
                label,
                col.len(),
                n_rows
            )
        }

        let mut n_clamped = 0usize;
        let columns = labels
            .iter()
            .zip(columns)
            .map(|(label, col)| {
                col.into_iter()
                    .enumerate()
                    .map(|(row, value)| {
                        match value {
                            Some(v) if v.is_nan() => Ok(None),
                            Some(v) if v.is_infinite() => {
                                Err(DStructError::SchemaViolation(format!(
                                    "non-finite reactivity in column {} at row {}",
                                    label,
                                    row + 1
                                )))
                            },
                            Some(v) if v < 0.0 => {
                                n_clamped += 1;
                                Ok(Some(0.0))
                            },
                            other => Ok(other),
                        }
                    })
                    .collect::<Result<MaskedSeq>>()
            })
            .collect::<Result<Vec<_>>>()?;
        if n_clamped > 0 {
            debug!("Clamped {} negative reactivities to 0", n_clamped);
        }

        let index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (*l, i))
            .collect();

        Ok(Self {
            labels,
            index,
            columns,
            reps_a,
            reps_b,
            n_rows,
            first_position: 1,
        })
    }

    /// Same as [`try_new`](Self::try_new), parsing the column names first.
    pub fn try_from_named<S: AsRef<str>>(
        names: &[S],
        columns: Vec<MaskedSeq>,
    ) -> Result<Self> {
        let labels = names
            .iter()
            .map(|n| n.as_ref().parse::<ReplicateLabel>())
            .collect::<Result<Vec<_>>>()?;
        Self::try_new(labels, columns)
    }

    fn validate_group(
        labels: &[ReplicateLabel],
        group: Group,
    ) -> Result<usize> {
        let numbers = labels
            .iter()
            .filter(|l| l.group == group)
            .map(|l| l.number)
            .sorted()
            .collect_vec();
        if numbers.is_empty() {
            schema_bail!("no replicate columns for group {}", group.as_char())
        }
        if numbers
            .iter()
            .enumerate()
            .any(|(i, n)| *n != i + 1)
        {
            schema_bail!(
                "replicates of group {} must be numbered 1..={} without gaps, got {:?}",
                group.as_char(),
                numbers.len(),
                numbers
            )
        }
        Ok(numbers.len())
    }

    /// Sets the coordinate of the first row.
    pub fn with_first_position(
        mut self,
        first_position: PosType,
    ) -> Self {
        assert!(first_position > 0, "positions are 1-based");
        assert!(
            first_position as u64 + self.n_rows as u64 - 1 <= PosType::MAX as u64,
            "last position exceeds {}",
            PosType::MAX
        );
        self.first_position = first_position;
        self
    }

    pub fn len(&self) -> usize { self.n_rows }

    pub fn is_empty(&self) -> bool { self.n_rows == 0 }

    pub fn labels(&self) -> &[ReplicateLabel] { &self.labels }

    pub fn reps(
        &self,
        group: Group,
    ) -> usize {
        match group {
            Group::A => self.reps_a,
            Group::B => self.reps_b,
        }
    }

    pub fn has_label(
        &self,
        label: &ReplicateLabel,
    ) -> bool {
        self.index.contains_key(label)
    }

    pub fn column(
        &self,
        label: &ReplicateLabel,
    ) -> Option<&[Option<ScoreType>]> {
        self.index
            .get(label)
            .map(|&i| self.columns[i].as_slice())
    }

    pub fn first_position(&self) -> PosType { self.first_position }

    pub fn last_position(&self) -> PosType {
        self.first_position + self.n_rows as PosType - 1
    }

    /// Region spanning every row, `None` for an empty table.
    pub fn full_region(&self) -> Option<Region> {
        (!self.is_empty())
            .then(|| Region::new(self.first_position, self.last_position()))
    }

    /// Row indices covered by `region`.
    pub fn region_rows(
        &self,
        region: &Region,
    ) -> Result<Range<usize>> {
        let inside = self
            .full_region()
            .is_some_and(|full| full.contains(region.start()) && full.contains(region.end()));
        if !inside {
            schema_bail!(
                "region {} is outside of the table range {}-{}",
                region,
                self.first_position,
                self.first_position as i64 + self.n_rows as i64 - 1
            )
        }
        let start = (region.start() - self.first_position) as usize;
        let end = (region.end() - self.first_position) as usize + 1;
        Ok(start..end)
    }

    /// Copy of the rows covered by `region`, keeping their coordinates.
    pub fn slice(
        &self,
        region: &Region,
    ) -> Result<ReactivityTable> {
        let rows = self.region_rows(region)?;
        Ok(Self {
            labels:         self.labels.clone(),
            index:          self.index.clone(),
            columns:        self
                .columns
                .iter()
                .map(|c| c[rows.clone()].to_vec())
                .collect(),
            reps_a:         self.reps_a,
            reps_b:         self.reps_b,
            n_rows:         rows.len(),
            first_position: region.start(),
        })
    }

    /// Values of the given replicates at one row, in label order.
    pub fn row_values<'a>(
        &'a self,
        row: usize,
        labels: &'a [ReplicateLabel],
    ) -> impl Iterator<Item = Option<ScoreType>> + 'a {
        labels
            .iter()
            .map(move |l| self.column(l).and_then(|c| c[row]))
    }

    /// Mean of the available reactivities of all replicates at one row.
    pub fn row_mean(
        &self,
        row: usize,
    ) -> Option<ScoreType> {
        let (sum, n) = self
            .columns
            .iter()
            .filter_map(|c| c[row])
            .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        (n > 0).then(|| sum / n as ScoreType)
    }
}
