use clap::Args;
use dstruct::prelude::DiscoveryMode;

use crate::analysis::AnalysisArgs;
use crate::strings::denovo as strings;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct DenovoArgs {
    #[clap(flatten)]
    common: AnalysisArgs,
    #[arg(short = 'g', long, default_value_t = 1, help_heading = "ANALYSIS ARGS", help = strings::GAP)]
    gap:    usize,
    #[arg(long, default_value_t = false, help_heading = "ANALYSIS ARGS", help = strings::POOLED)]
    pooled: bool,
}

impl DenovoArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let config = self
            .common
            .config()?
            .with_gap(self.gap)
            .with_ind_regions(!self.pooled);
        let units = self.common.read_units()?;
        self.common
            .run(utils, config, units, DiscoveryMode::DeNovo)
    }
}
