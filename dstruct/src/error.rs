//! Error types shared by the library.
//!
//! Gate failures during significance testing are *not* errors; they are
//! reported as [`NotTestedReason`](crate::tools::dstruct::NotTestedReason)
//! values. [`DStructError`] covers conditions which prevent a unit of work
//! from producing any result at all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DStructError {
    /// No valid within- or between-group combination could be formed.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Malformed reactivity table, combination or region.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, DStructError>;

#[macro_export]
macro_rules! schema_bail {
    ($($arg:tt)*) => {
        return Err($crate::error::DStructError::SchemaViolation(format!($($arg)*)))
    };
}
