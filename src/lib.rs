pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod report;
pub mod services;

use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::{Cli, OutputFormat};

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::rating::types::{BucketWeights, Confidence};
use crate::services::inspection;
use crate::services::ranking::RankingService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub struct RankArgs<'a> {
    pub input: &'a Path,
    pub top: Option<usize>,
    pub confidence: Option<Confidence>,
    pub weights: Option<BucketWeights>,
    pub precision: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<&'a Path>,
}

pub fn handle_rank(args: RankArgs<'_>) -> Result<()> {
    let config = AppConfig::new()
        .with_weights(args.weights)
        .with_confidence(args.confidence)
        .with_top(args.top)
        .with_precision(args.precision);
    let service = RankingService::new(config);
    let batch = service.rank_file(args.input)?;

    if let Some(path) = args.output {
        report::write_json(path, &batch)?;
    }

    match args.format {
        OutputFormat::Table => print!(
            "{}",
            report::render_ranking(&batch, &service.config().display)
        ),
        OutputFormat::Json => println!("{}", report::to_json(&batch)?),
    }
    Ok(())
}

pub fn handle_rating(
    input: &Path,
    weights: Option<BucketWeights>,
    precision: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let config = AppConfig::new()
        .with_weights(weights)
        .with_precision(precision);
    let service = RankingService::new(config);
    let summary = service.rate_file(input)?;

    match format {
        OutputFormat::Table => print!(
            "{}",
            report::render_summary(&summary, &service.config().display)
        ),
        OutputFormat::Json => println!("{}", report::to_json(&summary)?),
    }
    Ok(())
}

pub fn handle_inspect(input: &Path, head: usize, format: OutputFormat) -> Result<()> {
    let config = AppConfig::new();
    let profile = inspection::profile(input, head)?;

    match format {
        OutputFormat::Table => {
            print!("{}", report::render_profile(&profile, &config.display))
        }
        OutputFormat::Json => println!("{}", report::to_json(&profile)?),
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
