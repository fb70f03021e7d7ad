use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::slice::SliceEngine;
use crate::model::DependencyGraph;

/// Upper bound on grid points; each point costs one full slice.
pub const MAX_GRID_POINTS: usize = 10_000;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("Threshold grid needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("Threshold grid allows at most {max} points, got {points}")]
    TooManyPoints { points: usize, max: usize },
    #[error("Threshold grid bounds must satisfy 0 <= start < end <= 1, got [{start}, {end}]")]
    InvalidBounds { start: f64, end: f64 },
}

/// Evenly spaced thresholds over `[start, end]`, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdGrid {
    #[serde(default)]
    pub start: f64,
    #[serde(default = "default_end")]
    pub end: f64,
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_end() -> f64 {
    1.0
}

fn default_points() -> usize {
    21
}

impl Default for ThresholdGrid {
    /// 21 points from 0.0 to 1.0 in steps of 0.05.
    fn default() -> Self {
        Self { start: 0.0, end: default_end(), points: default_points() }
    }
}

impl ThresholdGrid {
    pub fn new(start: f64, end: f64, points: usize) -> Result<Self, GridError> {
        let grid = Self { start, end, points };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.points < 2 {
            return Err(GridError::TooFewPoints(self.points));
        }
        if self.points > MAX_GRID_POINTS {
            return Err(GridError::TooManyPoints { points: self.points, max: MAX_GRID_POINTS });
        }
        if !(self.start >= 0.0 && self.start < self.end && self.end <= 1.0) {
            return Err(GridError::InvalidBounds { start: self.start, end: self.end });
        }
        Ok(())
    }

    pub fn step(&self) -> f64 {
        (self.end - self.start) / (self.points - 1) as f64
    }

    /// Grid values in ascending order. The last value is pinned to `end`.
    pub fn values(&self) -> Vec<f64> {
        let step = self.step();
        (0..self.points)
            .map(|i| if i + 1 == self.points { self.end } else { self.start + i as f64 * step })
            .collect()
    }
}

/// One point of the calibration curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSample {
    pub threshold: f64,
    pub size: usize,
    /// Percentage reduction relative to the unthresholded slice.
    pub compression: f64,
}

/// Samples ordered by ascending threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCurve {
    pub samples: Vec<CalibrationSample>,
}

impl CalibrationCurve {
    pub fn new(samples: Vec<CalibrationSample>) -> Self {
        Self { samples }
    }

    /// Build a curve from raw `(threshold, size)` pairs against a baseline size.
    pub fn from_sizes(points: impl IntoIterator<Item = (f64, usize)>, full_size: usize) -> Self {
        let samples = points
            .into_iter()
            .map(|(threshold, size)| CalibrationSample {
                threshold,
                size,
                compression: compression(size, full_size),
            })
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.threshold).collect()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.size).collect()
    }
}

/// `(1 - size / full_size) * 100`, with `full_size` floored to 1.
pub fn compression(size: usize, full_size: usize) -> f64 {
    let full = full_size.max(1) as f64;
    (1.0 - size as f64 / full) * 100.0
}

/// Sweeps the threshold grid and records slice size per point.
#[derive(Debug, Clone, Copy)]
pub struct Calibrator<'w> {
    engine: SliceEngine<'w>,
    grid: ThresholdGrid,
}

impl<'w> Calibrator<'w> {
    pub fn new(engine: SliceEngine<'w>) -> Self {
        Self { engine, grid: ThresholdGrid::default() }
    }

    pub fn with_grid(mut self, grid: ThresholdGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Returns the curve and the baseline size (the τ = 0 slice size, at least 1).
    pub fn calibrate(&self, graph: &DependencyGraph, criterion: &str) -> (CalibrationCurve, usize) {
        let full_size = self.engine.slice(graph, criterion, 0.0).len().max(1);

        let curve = CalibrationCurve::from_sizes(
            self.grid
                .values()
                .into_iter()
                .map(|tau| (tau, self.engine.slice(graph, criterion, tau).len())),
            full_size,
        );

        info!(criterion, full_size, points = curve.len(), "calibration sweep finished");
        (curve, full_size)
    }
}
