use dgslice_core::analysis::{find_knee, find_knee_threshold, CalibrationCurve, ThresholdGrid};

fn curve_from(sizes: &[usize]) -> CalibrationCurve {
    let grid = ThresholdGrid::new(0.0, 1.0, sizes.len()).unwrap();
    let full = sizes.iter().copied().max().unwrap_or(1);
    CalibrationCurve::from_sizes(grid.values().into_iter().zip(sizes.iter().copied()), full)
}

#[test]
fn sharp_corner_is_selected() {
    // Steep drop to the corner at tau = 0.2, then a gentle linear tail.
    let mut sizes = vec![100, 83, 66, 49, 32];
    sizes.extend((1..=16).map(|i| 32 - 2 * i));
    assert_eq!(sizes.len(), 21);
    assert_eq!(sizes[20], 0);

    let knee = find_knee(&curve_from(&sizes)).expect("knee");
    assert_eq!(knee.index, 4);
    assert!((knee.threshold - 0.2).abs() < 1e-12);
    // |x + y - 1| / sqrt(2) at (0.2, 0.32)
    assert!((knee.distance - 0.48 / 2f64.sqrt()).abs() < 1e-9);
}

#[test]
fn convex_exponential_decay_knee_is_near_analytic_maximum() {
    // y = exp(-10x): on normalized axes the chord distance peaks where
    // dy/dx equals the chord slope, x* = ln(10 / (1 - e^-10)) / 10 ~ 0.23.
    let grid = ThresholdGrid::default();
    let sizes: Vec<usize> =
        grid.values().iter().map(|x| (1000.0 * (-10.0 * x).exp()).round() as usize).collect();
    let curve = CalibrationCurve::from_sizes(grid.values().into_iter().zip(sizes), 1000);

    let analytic = (10.0 / (1.0 - (-10.0f64).exp())).ln() / 10.0;
    let tau = find_knee_threshold(&curve);
    assert!((tau - analytic).abs() <= 0.025 + 1e-9, "tau {tau} vs analytic {analytic}");
    assert!((tau - 0.25).abs() < 1e-12);
}

#[test]
fn flat_curve_falls_back_to_minimum_threshold() {
    let knee = find_knee(&curve_from(&[7; 21])).expect("knee");
    assert_eq!(knee.threshold, 0.0);
    assert_eq!(knee.index, 0);
    assert!(!knee.distance.is_nan());

    let zeros = curve_from(&[0; 21]);
    assert_eq!(find_knee_threshold(&zeros), 0.0);
}

#[test]
fn flat_curve_with_unordered_thresholds_picks_the_smallest() {
    let curve = CalibrationCurve::from_sizes([(0.4, 3), (0.1, 3), (0.7, 3)], 3);
    let knee = find_knee(&curve).unwrap();
    assert_eq!(knee.index, 1);
    assert_eq!(knee.threshold, 0.1);
}

#[test]
fn straight_line_selects_first_sample() {
    let curve = CalibrationCurve::from_sizes(
        [(0.0, 4), (0.25, 3), (0.5, 2), (0.75, 1), (1.0, 0)],
        4,
    );
    let knee = find_knee(&curve).unwrap();
    assert_eq!(knee.index, 0);
    assert_eq!(knee.threshold, 0.0);
}

#[test]
fn ties_resolve_to_first_maximum() {
    // Two symmetric corners at equal distance from the chord.
    let curve = CalibrationCurve::from_sizes(
        [(0.0, 4), (0.25, 2), (0.5, 2), (0.75, 2), (1.0, 0)],
        4,
    );
    let knee = find_knee(&curve).unwrap();
    assert_eq!(knee.index, 1);
}

#[test]
fn short_and_empty_curves_are_defined() {
    assert!(find_knee(&CalibrationCurve::default()).is_none());
    assert_eq!(find_knee_threshold(&CalibrationCurve::default()), 0.0);

    let two = CalibrationCurve::from_sizes([(0.0, 5), (1.0, 0)], 5);
    assert_eq!(find_knee_threshold(&two), 0.0);
}
