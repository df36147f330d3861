//! Cycle report file output.

use std::path::Path;

use anyhow::{Context, Result};
use wellwork_types::CycleReport;

/// Overwrite `path` with the report as pretty JSON.
pub async fn write_report(path: &Path, report: &CycleReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write report to {}", path.display()))
}
