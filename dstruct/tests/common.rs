#![allow(dead_code)]

use std::path::PathBuf;

use dstruct::prelude::*;

pub const DENOVO_REGIONS: [(u32, u32); 2] = [(11, 35), (61, 90)];
pub const DENOVO_EFFECTS: [f64; 2] = [0.20456582378231347, 0.19979595450149473];
/// Effect sizes with within `[A1,A2,A3]` and between `[A3,B1,B2]` only.
pub const USER_COMBS_EFFECTS: [f64; 2] = [0.15843829984081562, 0.15659791631826578];

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Three replicates of A, two of B, 120 nucleotides, two differential regions
/// and one run too short to be reported.
pub fn denovo_table() -> ReactivityTable {
    read_table(&data_path("denovo.tsv"), &TableReadOptions::default()).unwrap()
}

/// Two replicates of A, one of B, every nucleotide more variable between
/// groups.
pub fn guided_table() -> ReactivityTable {
    read_table(&data_path("guided.tsv"), &TableReadOptions::default()).unwrap()
}

pub fn long_options() -> TableReadOptions {
    TableReadOptions::default()
        .with_id_column(Some("transcript".into()))
        .with_position_column(Some("position".into()))
}

pub fn batch_config() -> DStructConfig {
    DStructConfig::default()
        .with_batches(true)
        .with_min_length(21)
}
