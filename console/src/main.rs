mod analysis;
mod denovo;
mod guided;
mod strings;
mod utils;

use clap::{
    Parser,
    Subcommand,
};
use denovo::DenovoArgs;
use guided::GuidedArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Discover differentially reactive regions along whole transcripts.
    #[command(name = "denovo")]
    Denovo {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  DenovoArgs,
    },

    /// Test user-defined regions, or whole transcripts.
    #[command(name = "guided")]
    Guided {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  GuidedArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Denovo { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Guided { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
