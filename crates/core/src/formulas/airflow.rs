//! Process air: flow from supply pressure, and air volume scale-up by
//! bottom screen area
//!
//! # References
//! - Orifice flow: `Q = C_d × A × √(2ΔP/ρ)` (Bernoulli with discharge coefficient)
//! - Parikh, D.M. (2005). "Handbook of Pharmaceutical Granulation Technology", 2nd ed.,
//!   Ch. 8, fluid-bed scale-up: air volume kept proportional to the bed cross-section
//!   so fluidization velocity is constant between scales.

use super::constants::{
    CFM_PER_CUBIC_METER_PER_SECOND, DEFAULT_AIR_DENSITY, DEFAULT_DISCHARGE_COEFFICIENT,
    PASCALS_PER_BAR,
};
use super::{denominator, finite_result, non_negative, positive};
use crate::core_types::ScaleUpError;

/// Estimate volumetric air flow (CFM) through an orifice from gauge pressure
///
/// Uses the default discharge coefficient (0.8) and air density (1.2 kg/m³).
/// See [`pressure_to_cfm_with`].
///
/// # Errors
/// Returns [`ScaleUpError::InvalidDomain`] for a negative pressure, a
/// non-positive area, or a flow too large to represent.
///
/// # Example
/// ```
/// use granulation_scaleup_core::formulas::pressure_to_cfm;
///
/// let flow = pressure_to_cfm(2.0, 0.01).unwrap();
/// assert!((flow - 9786.7).abs() < 0.5);
/// ```
pub fn pressure_to_cfm(pressure_bar: f64, area_m2: f64) -> Result<f64, ScaleUpError> {
    pressure_to_cfm_with(
        pressure_bar,
        area_m2,
        DEFAULT_DISCHARGE_COEFFICIENT,
        DEFAULT_AIR_DENSITY,
    )
}

/// Estimate volumetric air flow (CFM) with explicit coefficient and density
///
/// # Formula
/// ```text
/// v    = C × √(2 × P × 10⁵ / ρ)      (m/s)
/// flow = v × A × 2118.88             (CFM)
/// ```
///
/// # Arguments
/// * `pressure_bar` - Gauge pressure (bar), ≥ 0
/// * `area_m2` - Cross-sectional area (m²), > 0
/// * `discharge_coefficient` - Orifice discharge coefficient, > 0
/// * `air_density` - Air density (kg/m³), > 0
///
/// # Errors
/// Returns [`ScaleUpError::InvalidDomain`] when any argument is outside the
/// ranges above or the flow overflows.
pub fn pressure_to_cfm_with(
    pressure_bar: f64,
    area_m2: f64,
    discharge_coefficient: f64,
    air_density: f64,
) -> Result<f64, ScaleUpError> {
    let pressure = non_negative("pressure", pressure_bar)?;
    let area = positive("area", area_m2)?;
    let coefficient = positive("discharge coefficient", discharge_coefficient)?;
    let density = positive("air density", air_density)?;

    let delta_p = pressure * PASCALS_PER_BAR;
    let velocity = coefficient * (2.0 * delta_p / density).sqrt();
    finite_result("flow", velocity * area * CFM_PER_CUBIC_METER_PER_SECOND)
}

/// Scale air volume with bottom screen area
///
/// # Formula
/// ```text
/// AV2 = AV1 × A2 / A1
/// ```
///
/// A larger pilot screen needs proportionally more air to keep the same
/// superficial velocity through the bed.
///
/// # Errors
/// - [`ScaleUpError::DivisionByZero`] when `a1` is zero
/// - [`ScaleUpError::InvalidDomain`] for negative or non-finite inputs, or a
///   result that overflows
///
/// # Example
/// ```
/// use granulation_scaleup_core::formulas::air_volume_scaleup_by_area;
///
/// let av2 = air_volume_scaleup_by_area(100.0, 0.1963, 0.7852).unwrap();
/// assert!((av2 - 400.0).abs() < 1e-9);
/// ```
pub fn air_volume_scaleup_by_area(av1: f64, a1: f64, a2: f64) -> Result<f64, ScaleUpError> {
    let av1 = non_negative("AV1", av1)?;
    let a2 = non_negative("A2", a2)?;
    let a1 = denominator("air volume scale-up", "A1", a1)?;
    finite_result("AV2", av1 * a2 / a1)
}

/// Inverse-area air volume scaling found in older scale-up sheets
///
/// # Formula
/// ```text
/// AV2 = AV1 × A1 / A2
/// ```
///
/// This gives a *smaller* pilot volume for a larger pilot screen. It is kept
/// only to reproduce figures from reports produced with that convention.
///
/// # Errors
/// - [`ScaleUpError::DivisionByZero`] when `a2` is zero
/// - [`ScaleUpError::InvalidDomain`] for negative or non-finite inputs, or a
///   result that overflows
#[deprecated(note = "air volume grows with screen area; use `air_volume_scaleup_by_area`")]
pub fn air_volume_scaleup_by_area_inverse(
    av1: f64,
    a1: f64,
    a2: f64,
) -> Result<f64, ScaleUpError> {
    let av1 = non_negative("AV1", av1)?;
    let a1 = non_negative("A1", a1)?;
    let a2 = denominator("air volume scale-up (inverse)", "A2", a2)?;
    finite_result("AV2", av1 * a1 / a2)
}
