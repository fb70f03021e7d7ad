use serde::{Deserialize, Serialize};

use super::calibrate::CalibrationCurve;

/// Point of maximum deviation from the chord joining the curve's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knee {
    /// Index into the curve's samples.
    pub index: usize,
    pub threshold: f64,
    /// Perpendicular distance on the normalized axes.
    pub distance: f64,
}

/// Locate the knee of a (threshold, size) curve.
///
/// Both axes are min-max normalized to [0, 1] before measuring distances, so
/// the result does not depend on curve scale. A flat curve falls back to the
/// smallest threshold; curves with fewer than three samples return the first
/// one. `None` only for an empty curve.
pub fn find_knee(curve: &CalibrationCurve) -> Option<Knee> {
    let samples = &curve.samples;
    let first = samples.first()?;

    let (y_min, y_max) = min_max(samples.iter().map(|s| s.size as f64));
    if y_max - y_min == 0.0 {
        let (index, lowest) = samples
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.threshold.total_cmp(&b.1.threshold))?;
        return Some(Knee { index, threshold: lowest.threshold, distance: 0.0 });
    }
    if samples.len() < 3 {
        return Some(Knee { index: 0, threshold: first.threshold, distance: 0.0 });
    }

    let (x_min, x_max) = min_max(samples.iter().map(|s| s.threshold));
    let x_range = x_max - x_min;
    if x_range == 0.0 {
        return Some(Knee { index: 0, threshold: first.threshold, distance: 0.0 });
    }
    let y_range = y_max - y_min;
    let norm = |i: usize| {
        let s = &samples[i];
        ((s.threshold - x_min) / x_range, (s.size as f64 - y_min) / y_range)
    };

    let p1 = norm(0);
    let p2 = norm(samples.len() - 1);
    let (dx, dy) = (p2.0 - p1.0, p2.1 - p1.1);
    let chord = dx.hypot(dy);
    if chord == 0.0 {
        return Some(Knee { index: 0, threshold: first.threshold, distance: 0.0 });
    }

    let mut knee = Knee { index: 0, threshold: first.threshold, distance: 0.0 };
    for (i, sample) in samples.iter().enumerate() {
        let p3 = norm(i);
        let cross = dx * (p1.1 - p3.1) - dy * (p1.0 - p3.0);
        let distance = cross.abs() / chord;
        if distance > knee.distance {
            knee = Knee { index: i, threshold: sample.threshold, distance };
        }
    }
    Some(knee)
}

/// Recommended threshold, or 0.0 for an empty curve.
pub fn find_knee_threshold(curve: &CalibrationCurve) -> f64 {
    find_knee(curve).map(|k| k.threshold).unwrap_or(0.0)
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
