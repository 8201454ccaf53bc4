use std::fs::File;
use std::io::BufWriter;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::anyhow;
use clap::{
    Args,
    ValueEnum,
};
use console::style;
use dstruct::prelude::*;
use dstruct::utils::adjust_masked;
use indicatif::ProgressBar;
use itertools::Itertools;
use log::{
    info,
    warn,
};

use crate::strings::{
    analysis as astrings,
    io as iostrings,
};
use crate::utils::{
    expand_wildcards,
    init_pbar,
    UtilsArgs,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum PadjMethod {
    Bonf,
    BH,
    BY,
    None,
}

impl PadjMethod {
    fn adjust(
        &self,
        p_values: &[Option<f64>],
    ) -> Vec<Option<f64>> {
        let procedure = match self {
            PadjMethod::BH => adjustp::Procedure::BenjaminiHochberg,
            PadjMethod::Bonf => adjustp::Procedure::Bonferroni,
            PadjMethod::BY => adjustp::Procedure::BenjaminiYekutieli,
            PadjMethod::None => return p_values.to_vec(),
        };
        adjust_masked(p_values, procedure)
    }
}

/// Arguments shared by the de novo and guided commands.
#[derive(Args, Debug, Clone)]
pub(crate) struct AnalysisArgs {
    #[arg(short = 'i', long, num_args = 1.., required = true, help = iostrings::INPUT)]
    input:           Vec<String>,
    #[arg(short = 'o', long, required = true, help = iostrings::OUTPUT)]
    output:          PathBuf,
    #[arg(long = "sep", default_value_t = '\t', help = iostrings::SEPARATOR)]
    separator:       char,
    #[arg(long, help = iostrings::ID_COLUMN)]
    id_column:       Option<String>,
    #[arg(long, help = iostrings::POSITION_COLUMN)]
    position_column: Option<String>,
    #[arg(long, default_value_t = false, help = iostrings::DSCORES)]
    dscores:         bool,

    #[arg(short = 'b', long, default_value_t = false, help_heading = "ANALYSIS ARGS", help = astrings::BATCHES)]
    batches:         bool,
    #[arg(short = 'l', long, default_value_t = 11, help_heading = "ANALYSIS ARGS", help = astrings::MIN_LENGTH)]
    pub min_length:  usize,
    #[arg(short = 'q', long, help_heading = "ANALYSIS ARGS", help = astrings::QUALITY)]
    quality:         Option<f64>,
    #[arg(short = 'e', long, default_value_t = 0.0, help_heading = "ANALYSIS ARGS", help = astrings::EVIDENCE)]
    evidence:        f64,
    #[arg(long, help_heading = "ANALYSIS ARGS", help = astrings::SIGNAL_STRENGTH)]
    signal_strength: Option<f64>,
    #[arg(long, default_value_t = false, help_heading = "ANALYSIS ARGS", help = astrings::CHECK_NUCS)]
    check_nucs:      bool,
    #[arg(long, help_heading = "ANALYSIS ARGS", help = astrings::WITHIN)]
    within:          Option<PathBuf>,
    #[arg(long, help_heading = "ANALYSIS ARGS", help = astrings::BETWEEN)]
    between:         Option<PathBuf>,
    #[arg(long = "pmethod", value_enum, default_value_t = PadjMethod::BH, help_heading = "ANALYSIS ARGS", help = astrings::PMETHOD)]
    pmethod:         PadjMethod,
}

impl AnalysisArgs {
    fn separator(&self) -> anyhow::Result<u8> {
        u8::try_from(self.separator)
            .map_err(|_| anyhow!("Separator must be a single byte character"))
    }

    pub fn read_options(&self) -> anyhow::Result<TableReadOptions> {
        Ok(TableReadOptions::default()
            .with_separator(self.separator()?)
            .with_id_column(self.id_column.clone())
            .with_position_column(self.position_column.clone()))
    }

    /// Configuration for the library, without mode-specific settings.
    pub fn config(&self) -> anyhow::Result<DStructConfig> {
        let separator = self.separator()?;
        let read_combs = |path: &Option<PathBuf>| -> anyhow::Result<Option<CombinationSet>> {
            path.as_ref()
                .map(|p| {
                    read_combinations_file(p, separator).map_err(|e| {
                        anyhow!("Failed to read combinations from {}: {}", p.display(), e)
                    })
                })
                .transpose()
        };

        Ok(DStructConfig::default()
            .with_batches(self.batches)
            .with_min_length(self.min_length)
            .with_quality(self.quality.map_or(Quality::Auto, Quality::Fixed))
            .with_evidence(self.evidence)
            .with_signal_strength(self.signal_strength)
            .with_check_nucs(self.check_nucs)
            .with_within_combs(read_combs(&self.within)?)
            .with_between_combs(read_combs(&self.between)?))
    }

    /// Reads every input table. Transcripts which cannot be parsed are
    /// reported and skipped.
    pub fn read_units(&self) -> anyhow::Result<Vec<Unit>> {
        let paths = expand_wildcards(&self.input);
        if paths.is_empty() {
            return Err(anyhow!("No input files"));
        }
        for path in paths.iter() {
            if !path.is_file() {
                return Err(anyhow!(
                    "Path {} is not a file.",
                    style(path.display()).red()
                ));
            }
        }

        let options = self.read_options()?;
        let mut units = Vec::new();
        for path in paths.iter() {
            for (id, table) in read_tables(path, &options)? {
                match table {
                    Ok(table) => units.push(Unit::new(id, table)),
                    Err(e) => {
                        warn!("Skipping {} from {}: {}", id, path.display(), e)
                    },
                }
            }
        }
        if let Some(dup) = units.iter().map(|u| &u.id).duplicates().next() {
            return Err(anyhow!("Transcript id {} occurs more than once", dup));
        }
        info!("Read {} transcripts from {} files", units.len(), paths.len());
        Ok(units)
    }

    fn output_path(
        &self,
        suffix: &str,
    ) -> anyhow::Result<PathBuf> {
        let prefix = self
            .output
            .to_str()
            .ok_or_else(|| anyhow!("Output path is not valid UTF-8"))?;
        Ok(PathBuf::from(format!("{}.{}", prefix, suffix)))
    }

    /// Runs the batch, adjusts p-values and writes every output file.
    pub fn run(
        &self,
        utils: &UtilsArgs,
        config: DStructConfig,
        units: Vec<Unit>,
        mode: DiscoveryMode,
    ) -> anyhow::Result<()> {
        if self.output.is_dir() {
            return Err(anyhow!(
                "Output path {} is a directory.",
                style(self.output.display()).red()
            ));
        }
        write_config(&self.output_path("config.json")?, &config)?;

        let progress_bar = if utils.progress {
            init_pbar(units.len())?
        }
        else {
            ProgressBar::hidden()
        };
        let mut records = dstructome_with(&units, &config, mode, |unit| {
            progress_bar.set_message(format!("{}", style(&unit.id).blue()));
            progress_bar.inc(1);
        });
        progress_bar.finish();

        if !matches!(self.pmethod, PadjMethod::BH) {
            let p_values = records
                .iter()
                .map(|r| r.result.p_value())
                .collect_vec();
            records
                .iter_mut()
                .zip(self.pmethod.adjust(&p_values))
                .for_each(|(record, fdr)| record.fdr = fdr);
        }

        let report_path = self.output_path("tsv")?;
        write_records(BufWriter::new(File::create(&report_path)?), &records)?;

        if self.dscores {
            self.write_dscores(&units, &config)?;
        }

        let n_tested = records
            .iter()
            .filter(|r| r.result.is_tested())
            .count();
        let n_failed = records
            .iter()
            .filter(|r| matches!(r.result.reason(), Some(NotTestedReason::Failed(_))))
            .count();
        println!(
            "{}",
            style(format!(
                "Tested {} of {} regions. Results written to {}.",
                n_tested,
                records.len() - n_failed,
                report_path.display()
            ))
            .green()
            .bold()
        );
        if n_failed > 0 {
            println!(
                "{}",
                style(format!("{} units failed, see the log for details.", n_failed)).red()
            );
        }
        Ok(())
    }

    fn write_dscores(
        &self,
        units: &[Unit],
        config: &DStructConfig,
    ) -> anyhow::Result<()> {
        let path = self.output_path("dscores.tsv")?;
        let mut writer = dscore_writer(BufWriter::new(File::create(&path)?));
        for unit in units.iter().unique_by(|u| &u.id) {
            match DStruct::try_new(&unit.table, config) {
                Ok(analysis) => {
                    write_dscores(
                        &mut writer,
                        &unit.id,
                        unit.table.first_position(),
                        analysis.dscores(),
                    )?
                },
                Err(e) => warn!("No d-scores for {}: {}", unit.id, e),
            }
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_config(
    path: &Path,
    config: &DStructConfig,
) -> anyhow::Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
