//! Slicing and threshold-calibration logic.
//!
//! - `slice`: best-path relevance propagation from a criterion node
//! - `calibrate`: threshold sweep recording slice size and compression
//! - `knee`: knee-point selection on the resulting curve
//!
//! Nothing here performs IO or keeps state between calls.

mod calibrate;
mod knee;
mod slice;

pub use calibrate::{
    compression, CalibrationCurve, CalibrationSample, Calibrator, GridError, MAX_GRID_POINTS,
    ThresholdGrid,
};
pub use knee::{find_knee, find_knee_threshold, Knee};
pub use slice::{validate_threshold, PropagationStrategy, Slice, SliceEngine, SliceError};
