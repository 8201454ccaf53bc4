use std::cmp::Ordering;

use adjustp::Procedure;
use itertools::Itertools;
use log::*;
use statrs::distribution::{
    ContinuousCDF,
    Normal,
};
use statrs::statistics::Statistics;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    }
    else {
        Some(values.iter().mean())
    }
}

/// Sample standard deviation (divisor `k - 1`), defined as 0 for a single
/// value and `None` for an empty slice.
pub fn sample_sd(values: &[f64]) -> Option<f64> {
    match values.len() {
        0 => None,
        1 => Some(0.0),
        _ => Some(values.iter().std_dev()),
    }
}

/// Median, averaging the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = values
        .iter()
        .copied()
        .sorted_by(|a, b| a.total_cmp(b))
        .collect_vec();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
    else {
        Some(sorted[mid])
    }
}

/// Alternative hypothesis for `x - y` in the paired signed-rank test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alternative {
    /// `x` tends to be smaller than `y`.
    Less,
    /// `x` tends to be greater than `y`.
    Greater,
    TwoSided,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignedRankTest {
    /// Sum of the ranks of positive differences (V).
    pub statistic: f64,
    pub p_value:   f64,
    /// Number of non-zero differences used.
    pub n:         usize,
    /// Whether the exact null distribution was used.
    pub exact:     bool,
}

/// Paired Wilcoxon signed-rank test of `x - y`.
///
/// Zero differences are dropped. When fewer than 50 differences remain and
/// there are neither zeros nor tied absolute differences the exact null
/// distribution is used, otherwise the normal approximation with tie and
/// continuity correction.
///
/// Returns `None` when the test is undefined: unequal lengths, non-finite
/// input, or no non-zero difference.
pub fn wilcoxon_signed_rank(
    x: &[f64],
    y: &[f64],
    alternative: Alternative,
) -> Option<SignedRankTest> {
    if x.len() != y.len() {
        warn!(
            "Signed-rank test: x length ({}) doesn't match y length ({})",
            x.len(),
            y.len()
        );
        return None;
    }
    let diffs = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| a - b)
        .collect_vec();
    if diffs.iter().any(|d| !d.is_finite()) {
        warn!("Signed-rank test: non-finite differences");
        return None;
    }

    let has_zeroes = diffs.iter().any(|d| *d == 0.0);
    let diffs = diffs
        .into_iter()
        .filter(|d| *d != 0.0)
        .collect_vec();
    let n = diffs.len();
    if n == 0 {
        debug!("Signed-rank test: all differences are zero");
        return None;
    }

    let (ranks, tie_groups) = rank_abs(&diffs);
    let statistic: f64 = diffs
        .iter()
        .zip(ranks.iter())
        .filter(|(d, _)| **d > 0.0)
        .map(|(_, r)| r)
        .sum();
    let has_ties = !tie_groups.is_empty();

    let n_f = n as f64;
    let exact = n < 50 && !has_ties && !has_zeroes;
    let p_value = if exact {
        let counts = signrank_counts(n);
        match alternative {
            Alternative::Less => psignrank_lower(&counts, statistic),
            Alternative::Greater => psignrank_upper(&counts, statistic - 1.0),
            Alternative::TwoSided => {
                let p = if statistic > n_f * (n_f + 1.0) / 4.0 {
                    psignrank_upper(&counts, statistic - 1.0)
                }
                else {
                    psignrank_lower(&counts, statistic)
                };
                (2.0 * p).min(1.0)
            },
        }
    }
    else {
        let tie_sum = tie_groups
            .iter()
            .map(|&t| (t * t * t - t) as f64)
            .sum::<f64>();
        let sigma = (n_f * (n_f + 1.0) * (2.0 * n_f + 1.0) / 24.0 - tie_sum / 48.0).sqrt();
        if sigma <= 0.0 || !sigma.is_finite() {
            warn!("Signed-rank test: variance is zero");
            return None;
        }
        let z = statistic - n_f * (n_f + 1.0) / 4.0;
        let correction = match alternative {
            Alternative::Less => -0.5,
            Alternative::Greater => 0.5,
            Alternative::TwoSided if z == 0.0 => 0.0,
            Alternative::TwoSided => z.signum() * 0.5,
        };
        let z = (z - correction) / sigma;
        let normal = Normal::new(0.0, 1.0).unwrap();
        match alternative {
            Alternative::Less => normal.cdf(z),
            Alternative::Greater => normal.sf(z),
            Alternative::TwoSided => (2.0 * normal.cdf(z).min(normal.sf(z))).min(1.0),
        }
    };

    debug!(
        "Signed-rank test: n={}, V={}, exact={}, p={:.6e}",
        n, statistic, exact, p_value
    );
    Some(SignedRankTest {
        statistic,
        p_value: p_value.clamp(0.0, 1.0),
        n,
        exact,
    })
}

/// Average ranks of absolute values (1-based) and the sizes of tie groups.
fn rank_abs(values: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let order = (0..values.len())
        .sorted_by(|&a, &b| {
            values[a]
                .abs()
                .partial_cmp(&values[b].abs())
                .unwrap_or(Ordering::Equal)
        })
        .collect_vec();

    let mut ranks = vec![0.0; values.len()];
    let mut tie_groups = Vec::new();
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]].abs() == values[order[start]].abs() {
            end += 1;
        }
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        for &idx in order[start..end].iter() {
            ranks[idx] = avg_rank;
        }
        if end - start > 1 {
            tie_groups.push(end - start);
        }
        start = end;
    }
    (ranks, tie_groups)
}

/// Number of subsets of `1..=n` for every possible rank sum.
fn signrank_counts(n: usize) -> Vec<f64> {
    let max_sum = n * (n + 1) / 2;
    let mut counts = vec![0.0; max_sum + 1];
    counts[0] = 1.0;
    for k in 1..=n {
        for s in (k..=k * (k + 1) / 2).rev() {
            counts[s] += counts[s - k];
        }
    }
    counts
}

/// P(V <= q) under the null.
fn psignrank_lower(
    counts: &[f64],
    q: f64,
) -> f64 {
    let q = (q + 1e-7).floor();
    if q < 0.0 {
        return 0.0;
    }
    let total: f64 = counts.iter().sum();
    let upto = (q as usize).min(counts.len() - 1);
    counts[..=upto].iter().sum::<f64>() / total
}

/// P(V > q) under the null.
fn psignrank_upper(
    counts: &[f64],
    q: f64,
) -> f64 {
    let q = (q + 1e-7).floor();
    let total: f64 = counts.iter().sum();
    let from = if q < 0.0 { 0 } else { q as usize + 1 };
    if from >= counts.len() {
        return 0.0;
    }
    counts[from..].iter().sum::<f64>() / total
}

/// Adjusts the available p-values with `procedure`, leaving `None` entries
/// untouched. Order and length are preserved.
pub fn adjust_masked(
    p_values: &[Option<f64>],
    procedure: Procedure,
) -> Vec<Option<f64>> {
    let present = p_values
        .iter()
        .flatten()
        .copied()
        .collect_vec();
    if present.is_empty() {
        return vec![None; p_values.len()];
    }
    let mut adjusted = adjustp::adjust(&present, procedure).into_iter();
    p_values
        .iter()
        .map(|p| p.and_then(|_| adjusted.next()))
        .collect()
}

/// Benjamini-Hochberg FDR over the available p-values.
pub fn fdr_bh(p_values: &[Option<f64>]) -> Vec<Option<f64>> {
    adjust_masked(p_values, Procedure::BenjaminiHochberg)
}
