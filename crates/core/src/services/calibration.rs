use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::analysis::{find_knee, CalibrationCurve, Calibrator, GridError, Knee, SliceEngine};
use crate::config::CalibrationConfig;
use crate::model::{DependencyGraph, NodeId, WeightError, WeightTable};
use crate::source::{GraphError, GraphSource};

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Invalid weight table: {0}")]
    Weights(#[from] WeightError),
    #[error("Invalid threshold grid: {0}")]
    Grid(#[from] GridError),
}

/// Everything a result sink needs: the curve, the baseline and the knee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub criterion: NodeId,
    /// Size of the τ = 0 slice, floored to 1.
    pub full_size: usize,
    pub curve: CalibrationCurve,
    /// `None` only when the curve is empty.
    pub knee: Option<Knee>,
}

impl CalibrationReport {
    /// Recommended threshold (0.0 when no knee exists).
    pub fn tau_opt(&self) -> f64 {
        self.knee.map(|k| k.threshold).unwrap_or(0.0)
    }
}

/// Consumer of calibration results (tables, plots, files).
pub trait ResultSink {
    fn emit(&mut self, report: &CalibrationReport) -> anyhow::Result<()>;
}

/// Calibrate one criterion against an already loaded graph.
pub fn calibrate_criterion(
    graph: &DependencyGraph,
    criterion: &str,
    config: &CalibrationConfig,
) -> Result<CalibrationReport, CalibrationError> {
    let weights = WeightTable::try_from(&config.weights)?;
    config.grid.validate()?;

    let engine = SliceEngine::new(&weights).with_strategy(config.strategy);
    let (curve, full_size) =
        Calibrator::new(engine).with_grid(config.grid).calibrate(graph, criterion);
    let knee = find_knee(&curve);

    if let Some(k) = knee {
        info!(criterion, tau_opt = k.threshold, index = k.index, "knee detected");
    }

    Ok(CalibrationReport { criterion: criterion.to_string(), full_size, curve, knee })
}

/// Load the graph from `source` and calibrate a single criterion.
pub fn run_calibration(
    source: &dyn GraphSource,
    criterion: &str,
    config: &CalibrationConfig,
) -> Result<CalibrationReport, CalibrationError> {
    let graph = source.load()?;
    calibrate_criterion(&graph, criterion, config)
}

/// Load the graph once and calibrate every criterion in order.
pub fn run_calibrations<S: AsRef<str>>(
    source: &dyn GraphSource,
    criteria: &[S],
    config: &CalibrationConfig,
) -> Result<Vec<CalibrationReport>, CalibrationError> {
    let graph = source.load()?;
    info!(
        source = %source.describe(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        criteria = criteria.len(),
        "calibrating"
    );
    criteria.iter().map(|c| calibrate_criterion(&graph, c.as_ref(), config)).collect()
}
