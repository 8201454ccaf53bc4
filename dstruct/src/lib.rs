//! # dstruct
//!
//! `dstruct` detects differentially reactive regions (DRRs) between two
//! groups of RNA structure probing replicates, such as SHAPE or DMS
//! reactivity profiles of a transcript under two conditions.
//!
//! For every nucleotide the variation between replicates is summarised with
//! a *d-score*, `(2/π)·atan(sd/mean)`, computed over combinations of
//! replicates. Combinations drawn from a single group estimate the natural
//! (within-group) variation; combinations mixing both groups estimate the
//! between-group variation. Regions where the between-group d-score
//! consistently exceeds the within-group one are tested with a one-sided
//! Wilcoxon signed-rank test.
//!
//! ## Key Features
//!
//! * **Typed reactivity tables**: [`ReactivityTable`] validates replicate
//!   labels (`A1`, `A2`, ..., `B1`, ...) and stores unavailable values as
//!   `None`.
//! * **Automatic combinations**: within- and between-group combinations are
//!   derived from the replicate counts, optionally respecting batches, or
//!   supplied by the user as a [`CombinationSet`].
//! * **De novo and guided discovery**: scan a whole transcript for candidate
//!   regions, or test user-defined regions directly.
//! * **Parallel batch runs**: many transcripts or regions are processed on a
//!   shared Rayon pool with Benjamini-Hochberg FDR over all tested regions.
//! * **Polars based I/O**: tab-separated tables, optionally holding several
//!   transcripts in long format.
//!
//! Number of threads to be used can be configured with setting
//! `DSTRUCT_NUM_THREADS` environment variable.
//!
//! ## Structure
//!
//! * [`data_structs`]: tables, replicate labels, combinations and regions.
//! * [`io`]: reading tables, regions and combination files; writing reports.
//! * [`tools`]: the d-score pipeline and the batch runner (feature `tools`,
//!   enabled by default).
//! * [`utils`]: statistics helpers, the shared thread pool and macros.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use dstruct::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = read_table(Path::new("transcript.tsv"), &TableReadOptions::default())?;
//!     let config = DStructConfig::default().with_batches(true).with_min_length(21);
//!
//!     let analysis = DStruct::try_new(&table, &config)?;
//!     for test in analysis.de_novo()? {
//!         println!(
//!             "{}-{}\t{:?}\t{:?}",
//!             test.starts(),
//!             test.ends(),
//!             test.result.p_value(),
//!             test.result.effect_size
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Many transcripts at once:
//!
//! ```no_run
//! use std::path::Path;
//! use dstruct::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = TableReadOptions::default()
//!         .with_id_column(Some("transcript".into()))
//!         .with_position_column(Some("position".into()));
//!     let units = read_tables(Path::new("all.tsv"), &options)?
//!         .into_iter()
//!         .map(|(id, table)| table.map(|t| Unit::new(id, t)))
//!         .collect::<Result<Vec<_>, _>>()?;
//!
//!     let records = dstructome(&units, &DStructConfig::default(), DiscoveryMode::DeNovo);
//!     write_records(std::io::stdout(), &records)?;
//!     Ok(())
//! }
//! ```

#[ctor::ctor]
fn init() {
    if let Ok(n) = std::env::var("DSTRUCT_NUM_THREADS") {
        std::env::set_var("POLARS_MAX_THREADS", n)
    }
}

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod utils;

#[cfg(feature = "tools")]
pub mod tools;

#[allow(unused_imports)]
use prelude::*;
