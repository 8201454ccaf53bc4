use serde::{
    Deserialize,
    Serialize,
};

use super::testing::Gates;
use crate::data_structs::CombinationSet;
use crate::with_field_fn;

/// Quality threshold: a fixed value, or derived from the replicate counts
/// with [`default_quality`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Quality {
    #[default]
    Auto,
    Fixed(f64),
}

impl Quality {
    pub fn resolve(
        &self,
        reps_a: usize,
        reps_b: usize,
    ) -> f64 {
        match self {
            Quality::Auto => default_quality(reps_a, reps_b),
            Quality::Fixed(q) => *q,
        }
    }
}

/// Default quality threshold: 0.5 when both groups have at least two
/// replicates, 0.2 otherwise.
pub fn default_quality(
    reps_a: usize,
    reps_b: usize,
) -> f64 {
    if reps_a >= 2 && reps_b >= 2 {
        0.5
    }
    else {
        0.2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DStructConfig {
    /// Replicates sharing a number were processed in the same batch.
    pub batches:         bool,
    /// Minimum length of a de novo region.
    pub min_length:      usize,
    /// Maximum distance between flagged nucleotides of one region.
    pub gap:             usize,
    pub quality:         Quality,
    pub evidence:        f64,
    /// Minimum highest mean reactivity of a tested region, unchecked if `None`.
    pub signal_strength: Option<f64>,
    /// Require at least `min_length` nucleotides with both d-scores.
    pub check_nucs:      bool,
    /// Test de novo regions one by one instead of pooling them.
    pub ind_regions:     bool,
    pub within_combs:    Option<CombinationSet>,
    pub between_combs:   Option<CombinationSet>,
}

impl DStructConfig {
    with_field_fn!(batches, bool);
    with_field_fn!(min_length, usize);
    with_field_fn!(gap, usize);
    with_field_fn!(quality, Quality);
    with_field_fn!(evidence, f64);
    with_field_fn!(signal_strength, Option<f64>);
    with_field_fn!(check_nucs, bool);
    with_field_fn!(ind_regions, bool);
    with_field_fn!(within_combs, Option<CombinationSet>);
    with_field_fn!(between_combs, Option<CombinationSet>);

    /// Gates for a transcript with the given replicate counts.
    pub fn gates(
        &self,
        reps_a: usize,
        reps_b: usize,
    ) -> Gates {
        Gates {
            quality:         self.quality.resolve(reps_a, reps_b),
            evidence:        self.evidence,
            signal_strength: self.signal_strength,
            min_nucs:        self.check_nucs.then_some(self.min_length),
        }
    }
}

impl Default for DStructConfig {
    fn default() -> Self {
        Self {
            batches:         false,
            min_length:      11,
            gap:             1,
            quality:         Quality::Auto,
            evidence:        0.0,
            signal_strength: None,
            check_nucs:      false,
            ind_regions:     true,
            within_combs:    None,
            between_combs:   None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quality() {
        assert_eq!(default_quality(2, 2), 0.5);
        assert_eq!(default_quality(5, 3), 0.5);
        assert_eq!(default_quality(2, 1), 0.2);
        assert_eq!(default_quality(1, 4), 0.2);
        assert_eq!(Quality::Fixed(0.3).resolve(1, 1), 0.3);
    }

    #[test]
    fn test_builder() {
        let config = DStructConfig::default()
            .with_min_length(21)
            .with_check_nucs(true)
            .with_quality(Quality::Fixed(0.4));
        let gates = config.gates(3, 2);
        assert_eq!(gates.quality, 0.4);
        assert_eq!(gates.min_nucs, Some(21));
        assert_eq!(gates.evidence, 0.0);
        assert_eq!(DStructConfig::default().gates(3, 1).quality, 0.2);
        assert_eq!(DStructConfig::default().gates(3, 1).min_nucs, None);
    }
}
