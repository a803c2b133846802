//! Bottom screen geometry

use std::f64::consts::PI;

use super::{finite_result, positive};
use crate::core_types::ScaleUpError;

/// Bottom screen area from its radius
///
/// # Formula
/// ```text
/// A = π × r²
/// ```
///
/// # Errors
/// Returns [`ScaleUpError::InvalidDomain`] unless `radius_m` is finite and positive
/// and the area is representable.
pub fn bottom_screen_area(radius_m: f64) -> Result<f64, ScaleUpError> {
    let radius = positive("radius", radius_m)?;
    finite_result("area", PI * radius * radius)
}

/// Bottom screen area from its diameter
///
/// # Formula
/// ```text
/// A = π × (d / 2)²
/// ```
///
/// # Errors
/// Returns [`ScaleUpError::InvalidDomain`] unless `diameter_m` is finite and positive
/// and the area is representable.
///
/// # Example
/// ```
/// use granulation_scaleup_core::formulas::bottom_screen_area_from_diameter;
///
/// let area = bottom_screen_area_from_diameter(1.0).unwrap();
/// assert!((area - 0.7854).abs() < 1e-4);
/// ```
pub fn bottom_screen_area_from_diameter(diameter_m: f64) -> Result<f64, ScaleUpError> {
    let diameter = positive("diameter", diameter_m)?;
    let radius = diameter / 2.0;
    finite_result("area", PI * radius * radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_and_pilot_screen_areas() {
        let lab = bottom_screen_area_from_diameter(0.5).unwrap();
        let pilot = bottom_screen_area_from_diameter(1.0).unwrap();
        assert!((lab - 0.1963).abs() < 5e-5);
        assert!((pilot - 0.7854).abs() < 5e-5);
        assert!((pilot / lab - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_radius_form() {
        assert!((bottom_screen_area(1.0).unwrap() - PI).abs() < 1e-15);
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        assert_eq!(bottom_screen_area(0.0).unwrap_err().parameter(), "radius");
        assert_eq!(bottom_screen_area(-0.5).unwrap_err().parameter(), "radius");
        assert_eq!(
            bottom_screen_area_from_diameter(0.0).unwrap_err().parameter(),
            "diameter"
        );
        assert!(bottom_screen_area_from_diameter(f64::NAN).is_err());
    }

    #[test]
    fn test_huge_radius_overflows_to_error() {
        assert_eq!(bottom_screen_area(1e200).unwrap_err().parameter(), "area");
    }
}
