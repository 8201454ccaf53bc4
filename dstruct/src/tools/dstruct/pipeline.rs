use std::ops::Range;

use itertools::Itertools;
use log::debug;

use super::combs::{
    get_combs,
    Combinations,
};
use super::config::DStructConfig;
use super::dscore::d_combs;
use super::regions::get_regions;
use super::testing::{
    test_region,
    Gates,
};
use super::types::{
    DScores,
    RegionTest,
    TestResult,
};
use crate::data_structs::{
    Group,
    ReactivityTable,
    Region,
};
use crate::error::Result;
use crate::schema_bail;

/// Differential analysis of one transcript.
///
/// Construction resolves the combinations and thresholds and computes the
/// within- and between-group d-scores once; [`de_novo`](Self::de_novo) and
/// [`guided`](Self::guided) reuse them.
#[derive(Debug)]
pub struct DStruct<'a> {
    table:   &'a ReactivityTable,
    config:  &'a DStructConfig,
    combs:   Combinations,
    gates:   Gates,
    dscores: DScores,
}

impl<'a> DStruct<'a> {
    pub fn try_new(
        table: &'a ReactivityTable,
        config: &'a DStructConfig,
    ) -> Result<Self> {
        let combs = get_combs(
            table,
            config.batches,
            config.within_combs.as_ref(),
            config.between_combs.as_ref(),
        )?;
        let gates = config.gates(table.reps(Group::A), table.reps(Group::B));
        let dscores = DScores {
            within:  d_combs(table, &combs.within),
            between: d_combs(table, &combs.between),
        };
        debug!(
            "Computed d-scores for {} nucleotides ({} within, {} between combinations)",
            table.len(),
            combs.within.len(),
            combs.between.len()
        );

        Ok(Self {
            table,
            config,
            combs,
            gates,
            dscores,
        })
    }

    pub fn dscores(&self) -> &DScores { &self.dscores }

    pub fn combinations(&self) -> &Combinations { &self.combs }

    pub fn gates(&self) -> &Gates { &self.gates }

    /// Candidate regions in table coordinates.
    pub fn regions(&self) -> Result<Vec<Region>> {
        let offset = self.table.first_position() - 1;
        Ok(get_regions(
            &self.dscores.within,
            &self.dscores.between,
            self.config.min_length,
            self.config.gap,
        )?
        .into_iter()
        .map(|r| r.shift(offset))
        .collect())
    }

    /// Discovers regions and tests them, individually or pooled depending on
    /// [`DStructConfig::ind_regions`]. No regions yield an empty vector.
    pub fn de_novo(&self) -> Result<Vec<RegionTest>> {
        let regions = self.regions()?;
        debug!("Discovered {} candidate regions", regions.len());
        if regions.is_empty() {
            return Ok(Vec::new());
        }

        if self.config.ind_regions {
            regions
                .into_iter()
                .map(|region| {
                    let rows = self.table.region_rows(&region)?;
                    Ok(RegionTest {
                        regions: vec![region],
                        result:  self.test_rows(&[rows]),
                    })
                })
                .collect()
        }
        else {
            let rows = regions
                .iter()
                .map(|r| self.table.region_rows(r))
                .collect::<Result<Vec<_>>>()?;
            Ok(vec![RegionTest {
                result: self.test_rows(&rows),
                regions,
            }])
        }
    }

    /// Tests a user-defined region, or the whole table when `region` is
    /// `None`.
    pub fn guided(
        &self,
        region: Option<&Region>,
    ) -> Result<RegionTest> {
        let region = match region.copied().or_else(|| self.table.full_region()) {
            Some(region) => region,
            None => schema_bail!("cannot test an empty table"),
        };
        let rows = self.table.region_rows(&region)?;
        Ok(RegionTest {
            regions: vec![region],
            result:  self.test_rows(&[rows]),
        })
    }

    fn test_rows(
        &self,
        rows: &[Range<usize>],
    ) -> TestResult {
        let rows = rows
            .iter()
            .flat_map(|r| r.clone())
            .collect_vec();
        let within = rows
            .iter()
            .map(|&i| self.dscores.within[i])
            .collect_vec();
        let between = rows
            .iter()
            .map(|&i| self.dscores.between[i])
            .collect_vec();
        let signal = self.gates.signal_strength.and_then(|_| {
            rows.iter()
                .filter_map(|&i| self.table.row_mean(i))
                .max_by(|a, b| a.total_cmp(b))
        });
        test_region(&within, &between, &self.gates, signal)
    }
}
