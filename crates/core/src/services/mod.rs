pub mod calibration;

pub use calibration::{
    calibrate_criterion, run_calibration, run_calibrations, CalibrationError, CalibrationReport,
    ResultSink,
};
