//! Formula Library Validation
//!
//! Checks the scale-up relationships against the worked examples on the
//! process sheet, then sweeps seeded random inputs to confirm the
//! proportionality properties hold across the operating range.
//!
//! # Test Categories
//! 1. Worked sheet examples
//! 2. Air volume convention (canonical vs legacy inverse)
//! 3. Division-by-zero and domain errors
//! 4. Proportionality sweeps
//!
//! Run tests with: `cargo test --test scaleup_properties`

use approx::assert_relative_eq;
use granulation_scaleup_core::formulas::{
    air_volume_scaleup_by_area, atomizing_air_pressure_scaleup,
    atomizing_air_pressure_scaleup_droplet, atomizing_air_volume_scaleup, bottom_screen_area,
    bottom_screen_area_from_diameter, pressure_to_cfm, spray_rate_scaleup,
};
use granulation_scaleup_core::{ScaleUpError, Unit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SWEEP_SAMPLES: usize = 500;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5CA1_E0F)
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 1: WORKED SHEET EXAMPLES
// ═══════════════════════════════════════════════════════════════════════════════

/// SR1 = 50 g/min, AV1 = 100 CFM, AV2 = 400 CFM
#[test]
fn test_spray_rate_sheet_example() {
    let sr2 = spray_rate_scaleup(50.0, 100.0, 400.0).unwrap();
    assert_eq!(sr2, 200.0);
    assert_eq!(Unit::GramsPerMinute.format(sr2), "200.00");
}

/// AAV1 = 10 CFM, SR1 = 50 g/min, SR2 = 200 g/min
#[test]
fn test_atomizing_air_volume_sheet_example() {
    let aav2 = atomizing_air_volume_scaleup(10.0, 50.0, 200.0).unwrap();
    assert_eq!(aav2, 40.0);
    assert_eq!(Unit::Cfm.format(aav2), "40.00");
}

/// Lab diameter 0.5 m, pilot diameter 1.0 m
#[test]
fn test_bottom_screen_sheet_example() {
    let a1 = bottom_screen_area_from_diameter(0.5).unwrap();
    let a2 = bottom_screen_area_from_diameter(1.0).unwrap();
    assert_eq!(Unit::SquareMeters.format(a1), "0.1963");
    assert_eq!(Unit::SquareMeters.format(a2), "0.7854");
}

/// Orifice estimate at the sheet defaults: 2 bar through 0.01 m²
#[test]
fn test_pressure_to_cfm_sheet_example() {
    let cfm = pressure_to_cfm(2.0, 0.01).unwrap();
    // v = sqrt(2 * 200000 / 1.2) = 577.35 m/s; Q = 0.8 * v * 0.01 m³/s
    assert_relative_eq!(cfm, 0.8 * 577.350_269_189_625_8 * 0.01 * 2118.88, max_relative = 1e-12);
    assert_eq!(Unit::Cfm.format(cfm), "9786.69");
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 2: AIR VOLUME CONVENTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Volume grows with screen area: AV2 = AV1 × A2 / A1
#[test]
fn test_air_volume_canonical_larger_area_scales_up() {
    let a1 = bottom_screen_area_from_diameter(0.5).unwrap();
    let a2 = bottom_screen_area_from_diameter(1.0).unwrap();
    let av2 = air_volume_scaleup_by_area(100.0, a1, a2).unwrap();
    assert_relative_eq!(av2, 400.0, max_relative = 1e-12);
    assert_eq!(Unit::Cfm.format(av2), "400.00");
}

/// Older reports used AV2 = AV1 × A1 / A2
#[test]
#[allow(deprecated)]
fn test_air_volume_legacy_inverse_reproduces_old_reports() {
    use granulation_scaleup_core::formulas::air_volume_scaleup_by_area_inverse;

    let a1 = bottom_screen_area_from_diameter(0.5).unwrap();
    let a2 = bottom_screen_area_from_diameter(1.0).unwrap();
    let av2 = air_volume_scaleup_by_area_inverse(100.0, a1, a2).unwrap();
    assert_relative_eq!(av2, 25.0, max_relative = 1e-12);
    assert_eq!(Unit::Cfm.format(av2), "25.00");
}

/// Chaining through the rounded display values drifts; full precision does not
#[test]
fn test_air_volume_rounded_areas_drift() {
    let rounded = air_volume_scaleup_by_area(100.0, 0.1963, 0.7854).unwrap();
    assert_eq!(Unit::Cfm.format(rounded), "400.10");
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 3: ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_zero_denominators_are_division_errors() {
    let cases: [(&str, Result<f64, ScaleUpError>); 6] = [
        ("AV1", spray_rate_scaleup(50.0, 0.0, 400.0)),
        ("SR1", atomizing_air_volume_scaleup(10.0, 0.0, 200.0)),
        ("SR2", atomizing_air_pressure_scaleup(2.0, 50.0, 0.0)),
        ("SR1", atomizing_air_pressure_scaleup_droplet(2.0, 0.0, 200.0, 10.0, 40.0)),
        ("AAV2", atomizing_air_pressure_scaleup_droplet(2.0, 50.0, 200.0, 10.0, 0.0)),
        ("A1", air_volume_scaleup_by_area(100.0, 0.0, 0.7854)),
    ];
    for (denominator, result) in cases {
        let err = result.unwrap_err();
        assert!(err.is_division_by_zero(), "{denominator}: {err}");
        assert_eq!(err.parameter(), denominator);
    }
}

#[test]
fn test_zero_numerator_is_zero_not_error() {
    assert_eq!(spray_rate_scaleup(50.0, 100.0, 0.0).unwrap(), 0.0);
    assert_eq!(atomizing_air_volume_scaleup(0.0, 50.0, 200.0).unwrap(), 0.0);
}

#[test]
fn test_non_positive_screen_dimensions_rejected() {
    for value in [0.0, -0.5, f64::NAN, f64::INFINITY] {
        assert!(bottom_screen_area(value).is_err(), "radius {value}");
        assert!(bottom_screen_area_from_diameter(value).is_err(), "diameter {value}");
    }
}

#[test]
fn test_negative_and_non_finite_inputs_rejected() {
    let err = spray_rate_scaleup(-1.0, 100.0, 400.0).unwrap_err();
    assert!(!err.is_division_by_zero());
    assert!(spray_rate_scaleup(f64::NAN, 100.0, 400.0).is_err());
    assert!(pressure_to_cfm(-0.1, 0.01).is_err());
}

/// Finite inputs whose result overflows are errors, never `Ok(inf)`
#[test]
fn test_overflowing_results_rejected() {
    let cases: [(&str, Result<f64, ScaleUpError>); 4] = [
        ("SR2", spray_rate_scaleup(1e200, 1e-200, 1e200)),
        ("flow", pressure_to_cfm(1e307, 1.0)),
        ("AAV2", atomizing_air_volume_scaleup(1e200, 1e-200, 1e200)),
        ("AV2", air_volume_scaleup_by_area(1e200, 1e-200, 1e200)),
    ];
    for (result_name, result) in cases {
        let err = result.unwrap_err();
        assert!(!err.is_division_by_zero(), "{result_name}: {err}");
        assert_eq!(err.parameter(), result_name);
        assert!(matches!(err, ScaleUpError::InvalidDomain { value, .. } if value.is_infinite()));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECTION 4: PROPORTIONALITY SWEEPS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_spray_rate_matches_definition_and_is_linear() {
    let mut rng = rng();
    for _ in 0..SWEEP_SAMPLES {
        let sr1 = rng.random_range(0.1..500.0);
        let av1 = rng.random_range(1.0..5000.0);
        let av2 = rng.random_range(0.0..20000.0);

        let sr2 = spray_rate_scaleup(sr1, av1, av2).unwrap();
        assert_relative_eq!(sr2, sr1 * av2 / av1, max_relative = 1e-12);

        let doubled = spray_rate_scaleup(sr1, av1, 2.0 * av2).unwrap();
        assert_relative_eq!(doubled, 2.0 * sr2, max_relative = 1e-12);
    }
}

#[test]
fn test_radius_and_diameter_forms_agree() {
    let mut rng = rng();
    for _ in 0..SWEEP_SAMPLES {
        let radius = rng.random_range(0.01..5.0);
        let from_radius = bottom_screen_area(radius).unwrap();
        let from_diameter = bottom_screen_area_from_diameter(2.0 * radius).unwrap();
        assert_eq!(from_radius.to_bits(), from_diameter.to_bits(), "radius {radius}");
    }
}

#[test]
fn test_formulas_are_idempotent() {
    let mut rng = rng();
    for _ in 0..SWEEP_SAMPLES {
        let a = rng.random_range(0.1..1000.0);
        let b = rng.random_range(0.1..1000.0);
        let c = rng.random_range(0.1..1000.0);

        let first = spray_rate_scaleup(a, b, c).unwrap();
        let second = spray_rate_scaleup(a, b, c).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());

        let first = pressure_to_cfm(a / 100.0, b / 1000.0).unwrap();
        let second = pressure_to_cfm(a / 100.0, b / 1000.0).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

/// P × SR is conserved by the simple pressure rule
#[test]
fn test_simple_pressure_conserves_pressure_spray_product() {
    let mut rng = rng();
    for _ in 0..SWEEP_SAMPLES {
        let p1 = rng.random_range(0.5..6.0);
        let sr1 = rng.random_range(1.0..500.0);
        let sr2 = rng.random_range(1.0..2000.0);
        let p2 = atomizing_air_pressure_scaleup(p1, sr1, sr2).unwrap();
        assert_relative_eq!(p2 * sr2, p1 * sr1, max_relative = 1e-12);
    }
}

/// Scaling AAV with SR (the atomizing volume rule) leaves droplet pressure unchanged
#[test]
fn test_droplet_pressure_invariant_under_matched_volume_scaling() {
    let mut rng = rng();
    for _ in 0..SWEEP_SAMPLES {
        let aap1 = rng.random_range(0.5..6.0);
        let sr1 = rng.random_range(1.0..500.0);
        let sr2 = rng.random_range(1.0..2000.0);
        let aav1 = rng.random_range(1.0..100.0);
        let aav2 = atomizing_air_volume_scaleup(aav1, sr1, sr2).unwrap();

        let aap2 = atomizing_air_pressure_scaleup_droplet(aap1, sr1, sr2, aav1, aav2).unwrap();
        assert_relative_eq!(aap2, aap1, max_relative = 1e-10);
    }
}

/// Scaling up and back down returns the lab value
#[test]
fn test_air_volume_round_trip() {
    let mut rng = rng();
    for _ in 0..SWEEP_SAMPLES {
        let av1 = rng.random_range(10.0..5000.0);
        let a1 = rng.random_range(0.01..3.0);
        let a2 = rng.random_range(0.01..3.0);
        let av2 = air_volume_scaleup_by_area(av1, a1, a2).unwrap();
        let back = air_volume_scaleup_by_area(av2, a2, a1).unwrap();
        assert_relative_eq!(back, av1, max_relative = 1e-12);
    }
}
