//! Significance testing of a single region (or of pooled regions).

use itertools::Itertools;
use log::debug;

use super::types::{
    NotTestedReason,
    TestResult,
};
use crate::utils::{
    mean,
    median,
    wilcoxon_signed_rank,
    Alternative,
};

/// Thresholds applied before the rank test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gates {
    /// Maximum mean within-group d-score.
    pub quality:         f64,
    /// Minimum median of `between - within`.
    pub evidence:        f64,
    /// Minimum of the highest per-nucleotide mean reactivity, if checked.
    pub signal_strength: Option<f64>,
    /// Minimum number of nucleotides with both d-scores, if checked.
    pub min_nucs:        Option<usize>,
}

/// Tests whether `within < between` over the positions of one region.
///
/// `within` and `between` are the d-scores restricted to the region;
/// `signal` is the highest mean reactivity over its nucleotides, used only
/// when [`Gates::signal_strength`] is set.
///
/// Gate failures and degenerate data yield a "not tested" result. The effect
/// size, the median of `between - within` over positions where both scores
/// are available, is reported whenever at least one such position exists.
pub fn test_region(
    within: &[Option<f64>],
    between: &[Option<f64>],
    gates: &Gates,
    signal: Option<f64>,
) -> TestResult {
    if within.len() != between.len() {
        debug!(
            "Region d-scores differ in length: {} vs {}",
            within.len(),
            between.len()
        );
        return TestResult::not_tested(NotTestedReason::TestUndefined, None);
    }

    let (paired_within, paired_between): (Vec<f64>, Vec<f64>) = within
        .iter()
        .zip(between.iter())
        .filter_map(|(w, b)| w.zip(*b))
        .unzip();
    let differences = paired_within
        .iter()
        .zip(paired_between.iter())
        .map(|(w, b)| b - w)
        .collect_vec();
    let effect_size = median(&differences);

    if let Some(threshold) = gates.signal_strength {
        if signal.map_or(true, |s| s < threshold) {
            return TestResult::not_tested(NotTestedReason::SignalStrength, effect_size);
        }
    }
    if let Some(min_nucs) = gates.min_nucs {
        if paired_within.len() < min_nucs {
            return TestResult::not_tested(NotTestedReason::TooFewNucleotides, effect_size);
        }
    }

    let within_available = within.iter().flatten().copied().collect_vec();
    match mean(&within_available) {
        None => return TestResult::not_tested(NotTestedReason::TestUndefined, effect_size),
        Some(m) if m > gates.quality => {
            return TestResult::not_tested(NotTestedReason::QualityGate, effect_size)
        },
        Some(_) => {},
    }

    match effect_size {
        None => return TestResult::not_tested(NotTestedReason::TestUndefined, None),
        Some(e) if e < gates.evidence => {
            return TestResult::not_tested(NotTestedReason::EvidenceGate, effect_size)
        },
        Some(_) => {},
    }

    match wilcoxon_signed_rank(&paired_within, &paired_between, Alternative::Less) {
        Some(test) => TestResult::tested(test.p_value, effect_size),
        None => TestResult::not_tested(NotTestedReason::TestUndefined, effect_size),
    }
}
