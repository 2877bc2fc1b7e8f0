mod table;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

pub use table::{render_profile, render_ranking, render_summary};

pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize report")
}

/// Write a report as pretty JSON
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = to_json(data)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    info!("Saved report to: {}", path.display());
    Ok(())
}
