use std::path::PathBuf;

use clap::Args;
use glob::glob;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::LevelFilter;

use crate::strings::utils as strings;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(short = 't', long, help_heading = "UTILS", help = strings::THREADS)]
    pub threads:  Option<usize>,
    #[arg(short = 'v', long, default_value_t = false, help_heading = "UTILS", help = strings::VERBOSE)]
    pub verbose:  bool,
    #[arg(long, default_value_t = false, help_heading = "UTILS", help = strings::PROGRESS)]
    pub progress: bool,
}

impl UtilsArgs {
    /// Configures logging and the thread pools. Must run before any
    /// analysis touches the shared pool.
    pub fn setup(&self) -> anyhow::Result<()> {
        let level = if self.verbose {
            LevelFilter::Debug
        }
        else {
            LevelFilter::Info
        };
        pretty_env_logger::formatted_builder()
            .filter_level(level)
            .parse_default_env()
            .try_init()?;

        if let Some(n) = self.threads {
            std::env::set_var("DSTRUCT_NUM_THREADS", n.to_string());
            std::env::set_var("POLARS_MAX_THREADS", n.to_string());
        }
        Ok(())
    }
}

pub(crate) fn init_pbar(total: usize) -> anyhow::Result<ProgressBar> {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}, ETA: {eta}] [{bar:40.cyan/blue}] {pos:>5.green}/{len:5} {msg}")?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Processing...");
    Ok(progress_bar)
}

pub(crate) fn expand_wildcards(paths: &[String]) -> Vec<PathBuf> {
    let mut expanded_paths = Vec::new();

    for path in paths {
        if path.contains('*') || path.contains('?') {
            match glob(path) {
                Ok(matches) => expanded_paths.extend(matches.filter_map(Result::ok)),
                Err(e) => log::error!("Error processing wildcard '{}': {}", path, e),
            }
        }
        else {
            expanded_paths.push(PathBuf::from(path));
        }
    }

    expanded_paths
}
