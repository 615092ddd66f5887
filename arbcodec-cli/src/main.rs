mod convert_io;
mod flutter_config;
mod options;
mod poe;
mod poeditor;
mod seed;

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert POEditor JSON to Flutter ARB.
    Convert {
        #[command(subcommand)]
        command: ConvertCommands,
    },

    /// Export POEditor terms and convert them to ARB files. Must be run
    /// from the Flutter project root directory or its subdirectory.
    Poe(PoeArgs),

    /// Seed POEditor with data from ARB files. To be used only on empty
    /// projects.
    Seed(PoeArgs),
}

#[derive(Subcommand, Debug)]
enum ConvertCommands {
    /// Convert from stdin to stdout.
    Io(ConvertIoArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ConvertIoArgs {
    /// Language of the input
    #[arg(short, long)]
    pub lang: String,

    /// POEditor term prefix
    #[arg(long, default_value = "")]
    pub term_prefix: String,

    /// Do not generate the output as a template ARB
    #[arg(long)]
    pub no_template: bool,
}

#[derive(ClapArgs, Debug)]
pub struct PoeArgs {
    /// POEditor project ID
    #[arg(short = 'p', long)]
    pub project_id: Option<String>,

    /// POEditor API token
    #[arg(short = 't', long, env = "POEDITOR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// POEditor term prefix
    #[arg(long)]
    pub term_prefix: Option<String>,

    /// Output directory [default: the project's arb-dir]
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// ARB file name prefix [default: app_]
    #[arg(long)]
    pub arb_prefix: Option<String>,

    /// Override downloaded languages
    #[arg(long, value_delimiter = ',')]
    pub langs: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Commands::Convert {
            command: ConvertCommands::Io(args),
        } => convert_io::run(&args),
        Commands::Poe(args) => poe::run(&args),
        Commands::Seed(args) => seed::run(&args),
    }
}
