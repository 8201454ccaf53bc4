use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use clap::Args;
use dstruct::prelude::*;
use log::warn;

use crate::analysis::AnalysisArgs;
use crate::strings::guided as strings;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct GuidedArgs {
    #[clap(flatten)]
    common:  AnalysisArgs,
    #[arg(short = 'r', long, help = strings::REGIONS)]
    regions: Option<PathBuf>,
}

impl GuidedArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let config = self.common.config()?;
        let units = self.common.read_units()?;
        let units = match self.regions.as_ref() {
            Some(path) => {
                let separator = self.common.read_options()?.separator;
                let regions = read_regions(File::open(path)?, separator)?;
                assign_regions(units, regions)
            },
            None => units,
        };
        self.common
            .run(utils, config, units, DiscoveryMode::Guided)
    }
}

/// One unit per region, in the order of the regions file. Regions of unknown
/// transcripts are skipped.
fn assign_regions(
    units: Vec<Unit>,
    regions: Vec<(String, Region)>,
) -> Vec<Unit> {
    let by_id: HashMap<&str, &Unit> = units
        .iter()
        .map(|u| (u.id.as_str(), u))
        .collect();
    regions
        .into_iter()
        .filter_map(|(id, region)| {
            match by_id.get(id.as_str()) {
                Some(unit) => Some((*unit).clone().with_region(region)),
                None => {
                    warn!("No reactivity data for region {} of {}", region, id);
                    None
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_regions() {
        let table = ReactivityTable::try_from_named(
            &["A1", "A2", "B1"],
            vec![vec![Some(1.0); 10], vec![Some(1.0); 10], vec![Some(1.0); 10]],
        )
        .unwrap();
        let units = vec![Unit::new("tx1", table)];
        let regions = vec![
            ("tx1".to_string(), Region::new(2, 5)),
            ("missing".to_string(), Region::new(1, 3)),
            ("tx1".to_string(), Region::new(6, 10)),
        ];
        let assigned = assign_regions(units, regions);
        assert_eq!(assigned.len(), 2);
        assert_eq!(assigned[0].region, Some(Region::new(2, 5)));
        assert_eq!(assigned[1].region, Some(Region::new(6, 10)));
    }
}
