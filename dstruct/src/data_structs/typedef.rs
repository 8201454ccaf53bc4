//! Type aliases for the values passed between the analysis stages.

/// 1-based nucleotide coordinate.
pub type PosType = u32;
/// Reactivity or d-score value.
pub type ScoreType = f64;
/// One value per nucleotide, `None` where the value is unavailable.
pub type MaskedSeq = Vec<Option<ScoreType>>;
