use std::fs;
use std::io;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use dgslice_core::config::CalibrationConfig;
use dgslice_core::services::{run_calibrations, CalibrationReport, ResultSink};
use dgslice_core::source::FileSource;
use serde::{Deserialize, Serialize};

use crate::commands::{resolve_config, BarPlotSink, StrategyArg, SvgSink, TableSink};

/// Output switches for `calibrate`.
#[derive(Debug, Clone, Default)]
pub struct CalibrateOutputs {
    /// Print the JSON envelope instead of tables.
    pub json: bool,
    /// Add a text bar chart after each table.
    pub plot: bool,
    /// Persist SVG plots at this path.
    pub svg: Option<String>,
    /// Write the JSON envelope to this file.
    pub out: Option<String>,
}

/// Everything needed to reproduce or audit a calibration run.
#[derive(Debug, Serialize, Deserialize)]
pub struct CalibrationEnvelope {
    pub graph: String,
    pub graph_sha256: String,
    pub generated_at: String,
    pub tool_version: String,
    pub config: CalibrationConfig,
    pub reports: Vec<CalibrationReport>,
}

/// Calibrate the pruning threshold for each criterion and render the results.
pub fn calibrate_command(
    graph_path: &str,
    criteria: &[String],
    config_path: Option<&str>,
    strategy: Option<StrategyArg>,
    outputs: &CalibrateOutputs,
) -> Result<()> {
    if criteria.is_empty() {
        return Err(anyhow!("At least one --criterion is required"));
    }
    let config = resolve_config(config_path, strategy)?;

    let source = FileSource::new(graph_path);
    let reports = run_calibrations(&source, criteria, &config)
        .with_context(|| format!("Calibration failed for graph {graph_path}"))?;

    let envelope = CalibrationEnvelope {
        graph: graph_path.to_string(),
        graph_sha256: crate::sha256_file(Path::new(graph_path))?,
        generated_at: Utc::now().to_rfc3339(),
        tool_version: dgslice_core::version().to_string(),
        config,
        reports,
    };

    if outputs.json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        let stdout = io::stdout();
        let mut table = TableSink::new(stdout.lock());
        emit_all(&mut table, &envelope.reports)?;
        drop(table);
        if outputs.plot {
            let mut plot = BarPlotSink::new(stdout.lock());
            emit_all(&mut plot, &envelope.reports)?;
        }
    }

    if let Some(svg) = &outputs.svg {
        let mut sink = SvgSink::new(svg, envelope.reports.len() > 1);
        emit_all(&mut sink, &envelope.reports)?;
        for path in sink.written() {
            eprintln!("Wrote plot: {}", path.display());
        }
    }

    if let Some(out) = &outputs.out {
        let out_path = Path::new(out);
        if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report dir {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&envelope)
            .context("Failed to serialize calibration report")?;
        fs::write(out_path, body)
            .with_context(|| format!("Failed to write report at {}", out_path.display()))?;
        eprintln!("Wrote report: {}", out_path.display());
    }

    Ok(())
}

/// Feed every report to a sink, in order.
pub fn emit_all(sink: &mut dyn ResultSink, reports: &[CalibrationReport]) -> Result<()> {
    for report in reports {
        sink.emit(report)?;
    }
    Ok(())
}
