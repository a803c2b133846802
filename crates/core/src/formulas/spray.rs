//! Spray rate and atomizing air scale-up
//!
//! Spray rate follows process air volume (constant drying capacity per unit
//! air). Atomizing air follows spray rate so the air-to-liquid ratio at the
//! nozzle, and with it the droplet size, stays the same.

use super::{denominator, finite_result, non_negative};
use crate::core_types::ScaleUpError;

/// Pilot spray rate from the air volume ratio
///
/// # Formula
/// ```text
/// SR2 = SR1 × AV2 / AV1
/// ```
///
/// # Arguments
/// * `sr1` - Lab spray rate (g/min)
/// * `av1` - Lab air volume (CFM), non-zero
/// * `av2` - Pilot air volume (CFM)
///
/// # Errors
/// - [`ScaleUpError::DivisionByZero`] when `av1` is zero
/// - [`ScaleUpError::InvalidDomain`] for negative or non-finite inputs, or a
///   result that overflows
///
/// # Example
/// ```
/// use granulation_scaleup_core::formulas::spray_rate_scaleup;
///
/// assert_eq!(spray_rate_scaleup(50.0, 100.0, 400.0).unwrap(), 200.0);
/// ```
pub fn spray_rate_scaleup(sr1: f64, av1: f64, av2: f64) -> Result<f64, ScaleUpError> {
    let sr1 = non_negative("SR1", sr1)?;
    let av2 = non_negative("AV2", av2)?;
    let av1 = denominator("spray rate scale-up", "AV1", av1)?;
    finite_result("SR2", sr1 * av2 / av1)
}

/// Pilot atomizing air volume from the spray rate ratio
///
/// # Formula
/// ```text
/// AAV2 = AAV1 × SR2 / SR1
/// ```
///
/// # Errors
/// - [`ScaleUpError::DivisionByZero`] when `sr1` is zero
/// - [`ScaleUpError::InvalidDomain`] for negative or non-finite inputs, or a
///   result that overflows
pub fn atomizing_air_volume_scaleup(aav1: f64, sr1: f64, sr2: f64) -> Result<f64, ScaleUpError> {
    let aav1 = non_negative("AAV1", aav1)?;
    let sr2 = non_negative("SR2", sr2)?;
    let sr1 = denominator("atomizing air volume scale-up", "SR1", sr1)?;
    finite_result("AAV2", aav1 * sr2 / sr1)
}

/// Pilot atomizing air pressure, simple spray rate ratio
///
/// # Formula
/// ```text
/// P2 = P1 × SR1 / SR2
/// ```
///
/// # Errors
/// - [`ScaleUpError::DivisionByZero`] when `sr2` is zero
/// - [`ScaleUpError::InvalidDomain`] for negative or non-finite inputs, or a
///   result that overflows
pub fn atomizing_air_pressure_scaleup(p1: f64, sr1: f64, sr2: f64) -> Result<f64, ScaleUpError> {
    let p1 = non_negative("P1", p1)?;
    let sr1 = non_negative("SR1", sr1)?;
    let sr2 = denominator("atomizing air pressure scale-up", "SR2", sr2)?;
    finite_result("P2", p1 * sr1 / sr2)
}

/// Pilot atomizing air pressure that preserves droplet size
///
/// # Formula
/// ```text
/// AAP2 = AAP1 × (SR2 / SR1) × (AAV1 / AAV2)
/// ```
///
/// Where:
/// - **AAP** = Atomizing air pressure (bar)
/// - **SR** = Spray rate (g/min)
/// - **AAV** = Atomizing air volume (CFM)
///
/// # Errors
/// - [`ScaleUpError::DivisionByZero`] when `sr1` or `aav2` is zero
/// - [`ScaleUpError::InvalidDomain`] for negative or non-finite inputs, or a
///   result that overflows
pub fn atomizing_air_pressure_scaleup_droplet(
    aap1: f64,
    sr1: f64,
    sr2: f64,
    aav1: f64,
    aav2: f64,
) -> Result<f64, ScaleUpError> {
    const OPERATION: &str = "droplet-size atomizing air pressure scale-up";
    let aap1 = non_negative("AAP1", aap1)?;
    let sr2 = non_negative("SR2", sr2)?;
    let aav1 = non_negative("AAV1", aav1)?;
    let sr1 = denominator(OPERATION, "SR1", sr1)?;
    let aav2 = denominator(OPERATION, "AAV2", aav2)?;
    finite_result("AAP2", aap1 * (sr2 / sr1) * (aav1 / aav2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spray_rate_scaleup_basic() {
        assert_eq!(spray_rate_scaleup(50.0, 100.0, 400.0).unwrap(), 200.0);
    }

    #[test]
    fn test_spray_rate_zero_pilot_air_volume() {
        assert_eq!(spray_rate_scaleup(50.0, 100.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_spray_rate_zero_lab_air_volume() {
        let err = spray_rate_scaleup(50.0, 0.0, 400.0).unwrap_err();
        assert!(err.is_division_by_zero());
        assert_eq!(err.parameter(), "AV1");
    }

    #[test]
    fn test_atomizing_air_volume_scaleup() {
        assert_eq!(atomizing_air_volume_scaleup(10.0, 50.0, 200.0).unwrap(), 40.0);
        assert!(atomizing_air_volume_scaleup(10.0, 0.0, 200.0)
            .unwrap_err()
            .is_division_by_zero());
    }

    #[test]
    fn test_atomizing_air_pressure_simple() {
        let p2 = atomizing_air_pressure_scaleup(2.0, 50.0, 200.0).unwrap();
        assert!((p2 - 0.5).abs() < 1e-12);
        let err = atomizing_air_pressure_scaleup(2.0, 50.0, 0.0).unwrap_err();
        assert_eq!(err.parameter(), "SR2");
    }

    #[test]
    fn test_atomizing_air_pressure_droplet_constant_ratio() {
        // Atomizing air scaled with spray rate: pressure stays put
        let p2 = atomizing_air_pressure_scaleup_droplet(2.0, 50.0, 200.0, 10.0, 40.0).unwrap();
        assert!((p2 - 2.0).abs() < 1e-12);

        // Same atomizing air for 4x the liquid: 4x the pressure
        let p2 = atomizing_air_pressure_scaleup_droplet(2.0, 50.0, 200.0, 10.0, 10.0).unwrap();
        assert!((p2 - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_atomizing_air_pressure_droplet_zero_denominators() {
        let err = atomizing_air_pressure_scaleup_droplet(2.0, 0.0, 200.0, 10.0, 40.0).unwrap_err();
        assert_eq!(err.parameter(), "SR1");
        let err = atomizing_air_pressure_scaleup_droplet(2.0, 50.0, 200.0, 10.0, 0.0).unwrap_err();
        assert_eq!(err.parameter(), "AAV2");
    }

    #[test]
    fn test_negative_spray_rate_is_domain_error() {
        let err = spray_rate_scaleup(-1.0, 100.0, 400.0).unwrap_err();
        assert!(!err.is_division_by_zero());
        assert_eq!(err.parameter(), "SR1");
    }

    #[test]
    fn test_overflowing_result_is_domain_error() {
        let err = spray_rate_scaleup(1e200, 1e-200, 1e200).unwrap_err();
        assert!(!err.is_division_by_zero());
        assert_eq!(err.parameter(), "SR2");

        let err = atomizing_air_pressure_scaleup_droplet(1e300, 1e-10, 1e300, 1.0, 1.0).unwrap_err();
        assert_eq!(err.parameter(), "AAP2");
    }
}
