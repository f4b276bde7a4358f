use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rsm",
    about = "Resource State Merger — reconcile redundant agent views of one resource",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge agent documents, in order, into one resource
    Merge(MergeArgs),
    /// Compare the versions of two @odata.type identifiers
    Compare(CompareArgs),
    /// Show the parts of an @odata.type identifier
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// JSON documents, highest priority first
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Write the merged document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,
    /// Exit with status 2 if any @odata.type degraded to #UNKNOWN
    #[arg(long)]
    pub strict: bool,
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompareArgs {
    pub left: String,
    pub right: String,
}

#[derive(Args)]
pub struct InspectArgs {
    pub identifier: String,
}
