//! Per-nucleotide dissimilarity ("d-score") and its aggregation over
//! replicate combinations.

use std::f64::consts::PI;

use itertools::Itertools;

use crate::data_structs::typedef::MaskedSeq;
use crate::data_structs::{
    Combination,
    CombinationSet,
    ReactivityTable,
};
use crate::utils::{
    mean,
    sample_sd,
};

/// d-score of one nucleotide: `(2/π)·atan(|sd / mean|)` over the available
/// replicate values.
///
/// Unavailable when no value is available or the mean is exactly 0.
pub fn calc_dis<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>, {
    let values = values.into_iter().flatten().collect_vec();
    let mean = mean(&values)?;
    if mean == 0.0 {
        return None;
    }
    let sd = sample_sd(&values)?;
    Some(2.0 / PI * (sd / mean).abs().atan())
}

/// d-scores of every row of `table` over the replicates of `comb`.
pub fn row_dscores(
    table: &ReactivityTable,
    comb: &Combination,
) -> MaskedSeq {
    (0..table.len())
        .map(|row| calc_dis(table.row_values(row, comb.labels())))
        .collect()
}

/// Per-row mean of the d-scores of every combination in `combs`, ignoring
/// unavailable scores.
pub fn d_combs(
    table: &ReactivityTable,
    combs: &CombinationSet,
) -> MaskedSeq {
    let per_comb = combs
        .iter()
        .map(|comb| row_dscores(table, comb))
        .collect_vec();

    (0..table.len())
        .map(|row| {
            let available = per_comb
                .iter()
                .filter_map(|scores| scores[row])
                .collect_vec();
            mean(&available)
        })
        .collect()
}
