use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gamma exposure profiles from broker options-chain workbooks.
#[derive(Parser)]
#[command(name = "gex-engine", version, about)]
pub struct Cli {
    /// Path to the YAML config (default: $GEX_CONFIG, then gex.yaml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Workbook to read, overriding input.path
    #[arg(long, short = 'i', global = true)]
    pub input: Option<PathBuf>,

    /// Directory for all artifacts, overriding output.directory
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the months available in the workbook
    Months,

    /// Extract one month's Calls/Puts rows to data.csv
    Extract {
        /// Month as a 1-based index or exact label (prompts when omitted)
        #[arg(long, short = 'm')]
        month: Option<String>,
    },

    /// Compute GEX from data.csv and write the table, profile and chart
    Compute,

    /// Extract then compute
    Run {
        /// Month as a 1-based index or exact label (prompts when omitted)
        #[arg(long, short = 'm')]
        month: Option<String>,
    },
}
