use std::fmt::{
    Display,
    Formatter,
};

use itertools::Itertools;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::Region;

/// Why a region did not receive a p-value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotTestedReason {
    /// Mean within-group d-score exceeds the quality threshold.
    QualityGate,
    /// Median of `between - within` is below the evidence threshold.
    EvidenceGate,
    /// Reactivities are too low to carry signal.
    SignalStrength,
    /// Fewer paired nucleotides than the minimum region length.
    TooFewNucleotides,
    /// The rank test cannot be computed on the remaining data.
    TestUndefined,
    /// The unit failed before testing (batch mode only).
    Failed(String),
}

impl Display for NotTestedReason {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            NotTestedReason::QualityGate => write!(f, "quality"),
            NotTestedReason::EvidenceGate => write!(f, "evidence"),
            NotTestedReason::SignalStrength => write!(f, "signal_strength"),
            NotTestedReason::TooFewNucleotides => write!(f, "too_few_nucleotides"),
            NotTestedReason::TestUndefined => write!(f, "test_undefined"),
            NotTestedReason::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TestOutcome {
    Tested { p_value: f64 },
    NotTested(NotTestedReason),
}

/// Outcome of the significance test of one region, with its effect size
/// (median of `between - within`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub outcome:     TestOutcome,
    pub effect_size: Option<f64>,
}

impl TestResult {
    pub fn tested(
        p_value: f64,
        effect_size: Option<f64>,
    ) -> Self {
        Self {
            outcome: TestOutcome::Tested { p_value },
            effect_size,
        }
    }

    pub fn not_tested(
        reason: NotTestedReason,
        effect_size: Option<f64>,
    ) -> Self {
        Self {
            outcome: TestOutcome::NotTested(reason),
            effect_size,
        }
    }

    pub fn p_value(&self) -> Option<f64> {
        match self.outcome {
            TestOutcome::Tested { p_value } => Some(p_value),
            TestOutcome::NotTested(_) => None,
        }
    }

    pub fn is_tested(&self) -> bool { matches!(self.outcome, TestOutcome::Tested { .. }) }

    pub fn reason(&self) -> Option<&NotTestedReason> {
        match &self.outcome {
            TestOutcome::Tested { .. } => None,
            TestOutcome::NotTested(reason) => Some(reason),
        }
    }
}

/// Tested unit of a transcript: a single region, or every discovered region
/// pooled together when regions are tested collectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTest {
    pub regions: Vec<Region>,
    pub result:  TestResult,
}

impl RegionTest {
    pub fn starts(&self) -> String {
        self.regions
            .iter()
            .map(Region::start)
            .join(",")
    }

    pub fn ends(&self) -> String {
        self.regions
            .iter()
            .map(Region::end)
            .join(",")
    }
}

/// Within- and between-group d-scores of one transcript, aligned to its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DScores {
    pub within:  Vec<Option<f64>>,
    pub between: Vec<Option<f64>>,
}

impl DScores {
    pub fn len(&self) -> usize { self.within.len() }

    pub fn is_empty(&self) -> bool { self.within.is_empty() }

    /// `between - within` where both are available.
    pub fn differences(&self) -> Vec<Option<f64>> {
        self.within
            .iter()
            .zip(self.between.iter())
            .map(|(w, b)| w.zip(*b).map(|(w, b)| b - w))
            .collect()
    }
}
