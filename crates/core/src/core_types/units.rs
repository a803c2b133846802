//! Units of measure used on the process sheets
//!
//! Quantities travel through the formulas as plain `f64` at full precision.
//! The unit only matters at the presentation boundary: it supplies the
//! symbol printed next to a label and the number of decimals a value is
//! rounded to when shown.
//!
//! # Usage
//! ```
//! use granulation_scaleup_core::core_types::units::Unit;
//!
//! assert_eq!(Unit::Cfm.symbol(), "CFM");
//! assert_eq!(Unit::SquareMeters.display_decimals(), 4);
//! assert_eq!(Unit::Cfm.format(39.99999), "40.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit attached to a reported quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Cubic feet per minute (air flow)
    Cfm,
    /// Grams per minute (spray rate)
    GramsPerMinute,
    /// Gauge pressure in bar
    Bar,
    /// Length in metres (screen radius/diameter)
    Meters,
    /// Area in square metres (bottom screen, orifice cross-section)
    SquareMeters,
    /// Density in kg/m³ (air)
    KilogramsPerCubicMeter,
    /// Ratios and coefficients
    Dimensionless,
}

impl Unit {
    /// Symbol printed after a label, e.g. `"g/min"`
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Cfm => "CFM",
            Unit::GramsPerMinute => "g/min",
            Unit::Bar => "bar",
            Unit::Meters => "m",
            Unit::SquareMeters => "m²",
            Unit::KilogramsPerCubicMeter => "kg/m³",
            Unit::Dimensionless => "-",
        }
    }

    /// Decimals shown for this unit
    ///
    /// Areas keep 4 decimals (0.1963 m²), everything else 2.
    pub fn display_decimals(self) -> usize {
        match self {
            Unit::SquareMeters => 4,
            _ => 2,
        }
    }

    /// Format a value with this unit's display precision (no symbol)
    pub fn format(self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.display_decimals())
    }

    /// Build a label in the `"Name (unit)"` style used on the sheets
    pub fn label(self, name: &str) -> String {
        match self {
            Unit::Dimensionless => name.to_string(),
            _ => format!("{name} ({})", self.symbol()),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
