use anyhow::Result;

use review_ranking::RankArgs;
use review_ranking::cli::Command;
use review_ranking::{handle_completions, handle_inspect, handle_rank, handle_rating, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Rank {
            input,
            top,
            confidence,
            weights,
            precision,
            format,
            output,
        } => handle_rank(RankArgs {
            input,
            top: *top,
            confidence: *confidence,
            weights: *weights,
            precision: *precision,
            format: *format,
            output: output.as_deref(),
        }),
        Command::Rating {
            input,
            weights,
            precision,
            format,
        } => handle_rating(input, *weights, *precision, *format),
        Command::Inspect {
            input,
            head,
            format,
        } => handle_inspect(input, *head, *format),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
