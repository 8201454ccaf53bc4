//! Detection of differentially reactive regions between two groups of
//! structure probing replicates.
//!
//! The analysis of one transcript runs in these steps:
//!
//! 1. [`get_combs`] builds the within- and between-group replicate
//!    combinations (or validates user supplied ones).
//! 2. [`d_combs`] averages per-nucleotide d-scores ([`calc_dis`]) over each
//!    set of combinations.
//! 3. [`get_regions`] finds runs of nucleotides where the between-group
//!    d-score exceeds the within-group one (de novo mode only).
//! 4. [`test_region`] applies the quality and evidence gates and a one-sided
//!    Wilcoxon signed-rank test.
//!
//! [`DStruct`] ties these together for one transcript, [`dstructome`] runs
//! many transcripts or regions in parallel and adds Benjamini-Hochberg FDR.
mod batch;
mod combs;
mod config;
mod dscore;
mod pipeline;
mod regions;
mod testing;
mod types;

pub use batch::{
    dstructome,
    dstructome_with,
    run_unit,
    DStructRecord,
    DiscoveryMode,
    Unit,
};
pub use combs::{
    auto_combs,
    get_combs,
    Combinations,
};
pub use config::{
    default_quality,
    DStructConfig,
    Quality,
};
pub use dscore::{
    calc_dis,
    d_combs,
    row_dscores,
};
pub use pipeline::DStruct;
pub use regions::{
    get_contig_regions,
    get_regions,
};
pub use testing::{
    test_region,
    Gates,
};
pub use types::{
    DScores,
    NotTestedReason,
    RegionTest,
    TestOutcome,
    TestResult,
};
