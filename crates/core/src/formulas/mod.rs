//! Scale-up formula library
//!
//! Pure functions mapping lab-scale process parameters to pilot-scale ones.
//! Each relationship is a single textbook proportionality; none of them round
//! their output, so results can be chained into later formulas without
//! compounding rounding error.
//!
//! Organized by concern:
//! - [`airflow`] - Pressure to flow estimate, air volume scale-up by screen area
//! - [`spray`] - Spray rate and atomizing air (volume, pressure) scale-up
//! - [`geometry`] - Bottom screen area from radius or diameter
//! - [`registry`] - Formula identifiers and display metadata
//! - [`constants`] - Conversion factors and default coefficients

pub mod airflow;
pub mod constants;
pub mod geometry;
pub mod registry;
pub mod spray;

#[allow(deprecated)]
pub use airflow::{
    air_volume_scaleup_by_area, air_volume_scaleup_by_area_inverse, pressure_to_cfm,
    pressure_to_cfm_with,
};
pub use geometry::{bottom_screen_area, bottom_screen_area_from_diameter};
pub use registry::{Formula, FormulaMetadata};
pub use spray::{
    atomizing_air_pressure_scaleup, atomizing_air_pressure_scaleup_droplet,
    atomizing_air_volume_scaleup, spray_rate_scaleup,
};

use crate::core_types::ScaleUpError;

/// Accept any finite value that is zero or greater
pub(crate) fn non_negative(parameter: &'static str, value: f64) -> Result<f64, ScaleUpError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ScaleUpError::InvalidDomain {
            parameter,
            value,
            constraint: "must be finite and non-negative",
        })
    }
}

/// Accept any finite value strictly greater than zero
pub(crate) fn positive(parameter: &'static str, value: f64) -> Result<f64, ScaleUpError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ScaleUpError::InvalidDomain {
            parameter,
            value,
            constraint: "must be finite and positive",
        })
    }
}

/// Validate a denominator: a negative value is a domain error, zero is a
/// division-by-zero error
pub(crate) fn denominator(
    operation: &'static str,
    parameter: &'static str,
    value: f64,
) -> Result<f64, ScaleUpError> {
    let value = non_negative(parameter, value)?;
    if value == 0.0 {
        return Err(ScaleUpError::DivisionByZero {
            operation,
            denominator: parameter,
        });
    }
    Ok(value)
}

/// Reject an overflowed result; finite inputs can still produce `inf`
pub(crate) fn finite_result(result: &'static str, value: f64) -> Result<f64, ScaleUpError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScaleUpError::InvalidDomain {
            parameter: result,
            value,
            constraint: "result is not finite",
        })
    }
}
