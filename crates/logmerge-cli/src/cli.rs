use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Format, RunMode};

#[derive(Parser, Debug)]
#[command(
    name = "logmerge",
    about = "Merge independently ordered log sources into one chronological stream",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug events (progress, source exhaustion) to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print run statistics to stderr when the merge finishes
    #[arg(long, global = true)]
    pub stats: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate synthetic sources and merge them
    Run(RunArgs),
    /// Merge JSON-lines log files
    Merge(MergeArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// TOML file with run settings; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub mode: Option<RunMode>,
    /// Number of sources to generate
    #[arg(short = 'n', long)]
    pub sources: Option<usize>,
    /// Entries per generated source
    #[arg(short, long)]
    pub entries: Option<usize>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Lower bound of the simulated pull delay in async mode
    #[arg(long)]
    pub min_delay_ms: Option<u64>,
    /// Upper bound of the simulated pull delay in async mode
    #[arg(long)]
    pub max_delay_ms: Option<u64>,
    #[arg(long, value_enum)]
    pub format: Option<Format>,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Files holding one JSON log entry per line, each in date order.
    /// Entries that go backwards are merged as read and counted by --stats
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    #[arg(long, value_enum, default_value = "sync")]
    pub mode: RunMode,
    #[arg(long, value_enum, default_value = "text")]
    pub format: Format,
}
