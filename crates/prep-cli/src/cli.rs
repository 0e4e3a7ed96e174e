use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "trajprep - Prepares a molecular-dynamics run-input file from a trajectory by sequencing external conversion, visualization and preprocessing tools.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full preparation sequence: index list, trajectory stripping,
    /// structure generation, topology generation and run-input preprocessing.
    Prepare(PrepareArgs),
}

/// Arguments for the `prepare` subcommand.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Path to the workflow configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Override the full-atom input trajectory from the config file.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Override the stripped trajectory output path from the config file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override the last zero-indexed atom retained when stripping.
    #[arg(short = 'n', long, value_name = "INT")]
    pub last_atom: Option<usize>,

    /// Print each step's command line without executing anything.
    #[arg(long)]
    pub show_commands: bool,
}
