//! Reading reactivity tables, regions and combinations, and writing result
//! reports.
//!
//! Reactivity tables are delimited text files with one column per replicate
//! (`A1`, `A2`, ..., `B1`, ...) and one row per nucleotide. A single file may
//! hold several transcripts when an id column is given; rows of each
//! transcript must then be contiguous in position.

mod table;
pub use table::*;

#[cfg(feature = "tools")]
mod report;
#[cfg(feature = "tools")]
pub use report::*;
