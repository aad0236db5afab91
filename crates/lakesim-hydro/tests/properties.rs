//! Cross-module properties of the basin model.

use approx::assert_relative_eq;
use lakesim_hydro::{concentration, Calibration, HydraulicModel, YearElevationSolver};

#[test]
fn test_reference_elevation_scenario() {
    let model = HydraulicModel::default();
    let solver = YearElevationSolver::default();

    assert_eq!(model.volume_at(4304.0), 0.0);

    // Every year whose implied area is ≤ 1 m² lands on the reference
    for year in [1800.0, 1900.0, 1940.0, 1949.5] {
        assert!(solver.area_from_year(year) <= 1.0);
        assert_eq!(solver.elevation_from_year(year), 4304.0);
    }
}

#[test]
fn test_concentration_scenario() {
    assert_eq!(concentration(1_000_000.0, 1000.0), 1000.0);
}

#[test]
fn test_area_clamp_far_outside_domain() {
    let model = HydraulicModel::default();
    let mut x = -1e5;
    while x <= 1e5 {
        assert!(model.area_at(x) >= 0.0);
        x += 97.3;
    }
}

#[test]
fn test_volume_additivity() {
    let model = HydraulicModel::default();
    let a = model.volume_between(4304.0, 4315.0);
    let b = model.volume_between(4315.0, 4330.0);
    let whole = model.volume_between(4304.0, 4330.0);
    assert_relative_eq!(a + b, whole, max_relative = 1e-6);
}

#[test]
fn test_concentration_falls_as_lake_rises() {
    let model = HydraulicModel::default();
    let samples = model.sample_range(4305.0, 4340.0, 35, 5_000.0);
    for pair in samples.windows(2) {
        assert!(pair[1].volume_m3 > pair[0].volume_m3);
        assert!(pair[1].concentration_mg_l < pair[0].concentration_mg_l);
    }
}

#[test]
fn test_custom_calibration_is_independent() {
    // A linear basin: area = 1e6 * (x - 100) m², years map 1:1 to km²
    let calibration = Calibration {
        area_coefficients: [-1e8, 1e6, 0.0, 0.0, 0.0],
        year_slope: 1.0,
        year_intercept: -2000.0,
        domain_low: 100.0,
        domain_high: 200.0,
    };
    calibration.validate().expect("valid calibration");
    let model = HydraulicModel::new(calibration);
    let solver = YearElevationSolver::new(calibration);

    // 2050 → 50 km² → elevation 150
    assert_relative_eq!(solver.elevation_from_year(2050.0), 150.0, epsilon = 1e-6);
    // Volume of a triangle: 0.5 * 50 m * 50e6 m²
    assert_relative_eq!(model.volume_at(150.0), 1.25e9, max_relative = 1e-9);
    assert_eq!(model.sample(150.0, 0.0).estimated_year, Some(2050));
}
