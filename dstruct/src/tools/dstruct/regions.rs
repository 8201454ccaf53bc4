//! De novo discovery of candidate regions from within- and between-group
//! d-scores.

use itertools::Itertools;

use crate::data_structs::typedef::PosType;
use crate::data_structs::Region;
use crate::error::Result;
use crate::schema_bail;

/// Groups sorted positions into runs. Consecutive positions belong to the
/// same run when they are at most `gap` apart.
pub fn get_contig_regions(
    positions: &[PosType],
    gap: usize,
) -> Vec<Region> {
    debug_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    let mut regions = Vec::new();
    let mut iter = positions.iter().copied();
    let Some(first) = iter.next() else {
        return regions;
    };

    let (mut start, mut end) = (first, first);
    for pos in iter {
        if (pos - end) as usize <= gap {
            end = pos;
        }
        else {
            regions.push(Region::new(start, end));
            start = pos;
            end = pos;
        }
    }
    regions.push(Region::new(start, end));
    regions
}

/// Finds regions where the between-group d-score exceeds the within-group
/// d-score.
///
/// A position is flagged when both scores are available and
/// `between - within > 0`; unavailable positions are never flagged. Flagged
/// positions are grouped with [`get_contig_regions`] (`gap = 1` requires
/// strict contiguity) and runs shorter than `min_length` are discarded.
///
/// Positions in the returned regions are 1-based indices into the input
/// sequences. The result is sorted and non-overlapping; it is empty, not an
/// error, when nothing is flagged.
pub fn get_regions(
    within: &[Option<f64>],
    between: &[Option<f64>],
    min_length: usize,
    gap: usize,
) -> Result<Vec<Region>> {
    if within.len() != between.len() {
        schema_bail!(
            "within ({}) and between ({}) d-scores differ in length",
            within.len(),
            between.len()
        )
    }
    let flagged = within
        .iter()
        .zip(between.iter())
        .enumerate()
        .filter_map(|(i, (w, b))| {
            match (w, b) {
                (Some(w), Some(b)) if b - w > 0.0 => Some(i as PosType + 1),
                _ => None,
            }
        })
        .collect_vec();

    Ok(get_contig_regions(&flagged, gap.max(1))
        .into_iter()
        .filter(|r| r.length() >= min_length)
        .collect())
}
