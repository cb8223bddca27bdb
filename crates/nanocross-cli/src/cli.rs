use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "nanocross - build crossed armchair nanotube systems for LAMMPS separation sweeps and tabulate their forces and torques.",
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

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the two tubes and write one LAMMPS run directory per separation.
    Generate(GenerateArgs),
    /// Collect fix and dump outputs from run directories into a force/torque table.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Polar angle of the second tube's axis, in degrees.
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub theta: Option<f64>,

    /// Azimuthal angle of the second tube's axis, in degrees.
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub phi: Option<f64>,

    /// Directory that receives the run directories.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    // --- Tube Overrides ---
    /// Atoms per ring (n + 1 for an (n,n) tube).
    #[arg(long, value_name = "INT")]
    pub ring_atom_count: Option<usize>,

    /// Target tube length in angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub length: Option<f64>,

    /// Carbon-carbon bond length in angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub bond_length: Option<f64>,

    // --- Sweep Overrides ---
    /// Number of separations in the sweep.
    #[arg(short, long, value_name = "INT")]
    pub num_steps: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S sweep.separation-end=25
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the run directories.
    #[arg(short = 'd', long = "runs-dir", value_name = "DIR")]
    pub runs_dir: Option<PathBuf>,

    /// Path of the results table to write.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
