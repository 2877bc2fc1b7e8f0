use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::rating::types::{BucketWeights, Confidence};

#[derive(Parser, Debug)]
#[command(
    name = "review-ranking",
    author,
    version,
    about = "Rate products and rank reviews by helpfulness"
)]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Rank reviews by the Wilson lower bound of their helpful votes
    Rank {
        /// Review export (CSV)
        input: PathBuf,
        /// Number of reviews to show (defaults to 20)
        #[arg(short, long)]
        top: Option<usize>,
        /// Wilson interval confidence level (defaults to 0.95)
        #[arg(short, long)]
        confidence: Option<Confidence>,
        /// Recency bucket weights, most recent first (defaults to 40,30,20,10)
        #[arg(short, long)]
        weights: Option<BucketWeights>,
        /// Decimal places in tables (defaults to 5)
        #[arg(long)]
        precision: Option<usize>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Also write the full ranking as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Time-weighted average rating of the product
    Rating {
        /// Review export (CSV)
        input: PathBuf,
        /// Recency bucket weights, most recent first (defaults to 40,30,20,10)
        #[arg(short, long)]
        weights: Option<BucketWeights>,
        /// Decimal places in tables (defaults to 5)
        #[arg(long)]
        precision: Option<usize>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print shape, types, missing values and quantiles of the export
    Inspect {
        /// Review export (CSV)
        input: PathBuf,
        /// Rows to show from the start and end of the file
        #[arg(long, default_value_t = 5)]
        head: usize,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}
