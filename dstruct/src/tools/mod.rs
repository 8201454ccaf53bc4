//! Analysis tools.
//!
//! - [`dstruct`]: differential analysis of structure probing reactivities,
//!   from d-score computation to region discovery, significance testing and
//!   batch runs with FDR correction.
pub mod dstruct;
