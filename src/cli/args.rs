use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "puritycheck")]
#[command(about = "Checks pure and readonly function contracts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every function of a module description
    Check {
        /// Module description (JSON) produced by the front end
        module: PathBuf,

        /// Configuration file (defaults to the nearest .puritycheck.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Turn the checker off regardless of configuration
        #[arg(long)]
        disable: bool,

        /// Comma-separated functions to trust as pure
        #[arg(long = "pure-function-names", env = "PURITYCHECK_PURE_FUNCTION_NAMES")]
        pure_function_names: Option<String>,

        /// Classify functions on a single thread
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Number of worker threads (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0")]
        jobs: usize,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Print the built-in classification rules
    Explain {
        /// Configuration file whose trusted names to include
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
        }
    }
}

impl Commands {
    /// Flags of `check` that override file configuration
    pub fn overrides(&self) -> ConfigOverrides {
        match self {
            Commands::Check {
                disable,
                pure_function_names,
                no_parallel,
                ..
            } => ConfigOverrides {
                disable: *disable,
                pure_function_names: pure_function_names.clone(),
                no_parallel: *no_parallel,
            },
            Commands::Explain { .. } => ConfigOverrides::default(),
        }
    }
}
