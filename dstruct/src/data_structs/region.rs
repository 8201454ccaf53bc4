use std::fmt::{
    Display,
    Formatter,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::typedef::PosType;
use crate::error::Result;
use crate::schema_bail;

/// Closed interval of nucleotide positions, `start <= end`, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Region {
    start: PosType,
    end:   PosType,
}

impl Region {
    /// # Panics
    ///
    /// If `start > end` or `start == 0`.
    pub fn new(
        start: PosType,
        end: PosType,
    ) -> Self {
        assert!(start > 0, "positions are 1-based");
        assert!(start <= end, "region start {} > end {}", start, end);
        Self { start, end }
    }

    pub fn try_new(
        start: PosType,
        end: PosType,
    ) -> Result<Self> {
        if start == 0 {
            schema_bail!("region start must be >= 1")
        }
        if start > end {
            schema_bail!("region start {} is greater than end {}", start, end)
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> PosType { self.start }

    pub fn end(&self) -> PosType { self.end }

    /// Number of nucleotides covered.
    pub fn length(&self) -> usize { (self.end - self.start) as usize + 1 }

    pub fn contains(
        &self,
        pos: PosType,
    ) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Moves the region by `offset` positions.
    pub fn shift(
        &self,
        offset: PosType,
    ) -> Self {
        Self {
            start: self.start + offset,
            end:   self.end + offset,
        }
    }
}

impl Display for Region {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
