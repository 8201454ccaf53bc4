use std::borrow::Cow;

use itertools::Itertools;
use log::{
    debug,
    info,
    warn,
};
use rayon::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

use super::config::DStructConfig;
use super::pipeline::DStruct;
use super::types::{
    NotTestedReason,
    RegionTest,
    TestResult,
};
use crate::data_structs::{
    ReactivityTable,
    Region,
};
use crate::error::Result;
use crate::utils::{
    fdr_bh,
    n_threads,
    THREAD_POOL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscoveryMode {
    /// Scan every unit for regions, then test them.
    DeNovo,
    /// Test every unit as a user-defined region.
    Guided,
}

/// Independent piece of work for the batch runner: one transcript, or one
/// user-defined region.
#[derive(Debug, Clone)]
pub struct Unit {
    pub id:     String,
    pub table:  ReactivityTable,
    /// Restricts the analysis to this part of `table`.
    pub region: Option<Region>,
}

impl Unit {
    pub fn new(
        id: impl Into<String>,
        table: ReactivityTable,
    ) -> Self {
        Self {
            id: id.into(),
            table,
            region: None,
        }
    }

    pub fn with_region(
        mut self,
        region: Region,
    ) -> Self {
        self.region = Some(region);
        self
    }
}

/// One output row of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DStructRecord {
    pub id:      String,
    /// Empty for units which failed before any region was formed.
    pub regions: Vec<Region>,
    pub result:  TestResult,
    /// Benjamini-Hochberg adjusted p-value, `None` when not tested.
    pub fdr:     Option<f64>,
}

impl DStructRecord {
    fn new(
        id: &str,
        test: RegionTest,
    ) -> Self {
        Self {
            id:      id.to_string(),
            regions: test.regions,
            result:  test.result,
            fdr:     None,
        }
    }

    fn failed(
        id: &str,
        message: String,
    ) -> Self {
        Self {
            id:      id.to_string(),
            regions: Vec::new(),
            result:  TestResult::not_tested(NotTestedReason::Failed(message), None),
            fdr:     None,
        }
    }
}

/// Runs the pipeline for a single unit.
pub fn run_unit(
    unit: &Unit,
    config: &DStructConfig,
    mode: DiscoveryMode,
) -> Result<Vec<RegionTest>> {
    match mode {
        DiscoveryMode::DeNovo => {
            let table = match unit.region.as_ref() {
                Some(region) => Cow::Owned(unit.table.slice(region)?),
                None => Cow::Borrowed(&unit.table),
            };
            DStruct::try_new(&table, config)?.de_novo()
        },
        DiscoveryMode::Guided => {
            let test = DStruct::try_new(&unit.table, config)?.guided(unit.region.as_ref())?;
            Ok(vec![test])
        },
    }
}

/// Runs [`run_unit`] over all `units` in parallel and applies
/// Benjamini-Hochberg correction over every tested region.
///
/// Records keep the input order of the units. A unit which fails produces a
/// single record without regions and does not affect the other units.
pub fn dstructome(
    units: &[Unit],
    config: &DStructConfig,
    mode: DiscoveryMode,
) -> Vec<DStructRecord> {
    dstructome_with(units, config, mode, |_| {})
}

/// Same as [`dstructome`], calling `on_done` after each unit finishes.
pub fn dstructome_with<F>(
    units: &[Unit],
    config: &DStructConfig,
    mode: DiscoveryMode,
    on_done: F,
) -> Vec<DStructRecord>
where
    F: Fn(&Unit) + Sync, {
    info!(
        "Running {:?} analysis of {} units on {} threads",
        mode,
        units.len(),
        n_threads()
    );

    let per_unit: Vec<Vec<DStructRecord>> = THREAD_POOL.install(|| {
        units
            .par_iter()
            .map(|unit| {
                let records = match run_unit(unit, config, mode) {
                    Ok(tests) => {
                        debug!("{}: {} regions tested", unit.id, tests.len());
                        tests
                            .into_iter()
                            .map(|t| DStructRecord::new(&unit.id, t))
                            .collect_vec()
                    },
                    Err(e) => {
                        warn!("{}: {}", unit.id, e);
                        vec![DStructRecord::failed(&unit.id, e.to_string())]
                    },
                };
                on_done(unit);
                records
            })
            .collect()
    });

    let mut records = per_unit
        .into_iter()
        .flatten()
        .collect_vec();
    let fdr = fdr_bh(
        &records
            .iter()
            .map(|r| r.result.p_value())
            .collect_vec(),
    );
    records
        .iter_mut()
        .zip(fdr)
        .for_each(|(record, fdr)| record.fdr = fdr);

    info!(
        "{} records, {} tested",
        records.len(),
        records
            .iter()
            .filter(|r| r.result.is_tested())
            .count()
    );
    records
}
