//! Formula registry
//!
//! Names every relationship in the formula library together with the text
//! shown in the report's equation appendix. Expressions stick to characters
//! the report fonts can encode (Latin-1), so `sqrt` and `rho` are spelled out.
//!
//! ```
//! use granulation_scaleup_core::formulas::Formula;
//!
//! let meta = Formula::SprayRate.metadata();
//! assert_eq!(meta.expression, "SR2 = SR1 × AV2 / AV1");
//! ```

use serde::{Deserialize, Serialize};

/// Broad grouping of a formula by what it sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormulaCategory {
    /// Process and supply air
    Airflow,
    /// Spray liquid and atomizing air
    Spray,
    /// Equipment dimensions
    Geometry,
}

/// Identifier for each scale-up relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// Orifice flow estimate from gauge pressure
    PressureToFlow,
    /// `SR2 = SR1 × AV2 / AV1`
    SprayRate,
    /// `AAV2 = AAV1 × SR2 / SR1`
    AtomizingAirVolume,
    /// `P2 = P1 × SR1 / SR2`
    AtomizingAirPressure,
    /// `AAP2 = AAP1 × (SR2/SR1) × (AAV1/AAV2)`
    AtomizingAirPressureDroplet,
    /// `AV2 = AV1 × A2 / A1`
    AirVolumeByArea,
    /// `AV2 = AV1 × A1 / A2`, older sheets only
    AirVolumeByAreaInverse,
    /// `A = π r²`
    BottomScreenAreaFromRadius,
    /// `A = π (d/2)²`
    BottomScreenAreaFromDiameter,
}

/// Display metadata for a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaMetadata {
    /// Short name
    pub name: &'static str,
    /// Plain-text expression
    pub expression: &'static str,
    /// Symbol and meaning of each variable
    pub variables: &'static [(&'static str, &'static str)],
    /// What the formula sizes
    pub category: FormulaCategory,
}

impl Formula {
    /// Every formula, in library order
    pub const ALL: [Formula; 9] = [
        Formula::PressureToFlow,
        Formula::SprayRate,
        Formula::AtomizingAirVolume,
        Formula::AtomizingAirPressure,
        Formula::AtomizingAirPressureDroplet,
        Formula::AirVolumeByArea,
        Formula::AirVolumeByAreaInverse,
        Formula::BottomScreenAreaFromRadius,
        Formula::BottomScreenAreaFromDiameter,
    ];

    /// Metadata for this formula
    pub fn metadata(self) -> FormulaMetadata {
        match self {
            Formula::PressureToFlow => FormulaMetadata {
                name: "Pressure to Flow",
                expression: "Q = C × sqrt(2 × P × 10^5 / rho) × A × 2118.88",
                variables: &[
                    ("Q", "air flow (CFM)"),
                    ("C", "discharge coefficient"),
                    ("P", "gauge pressure (bar)"),
                    ("rho", "air density (kg/m³)"),
                    ("A", "cross-sectional area (m²)"),
                ],
                category: FormulaCategory::Airflow,
            },
            Formula::SprayRate => FormulaMetadata {
                name: "Spray Rate Scale-Up",
                expression: "SR2 = SR1 × AV2 / AV1",
                variables: &[
                    ("SR", "spray rate (g/min)"),
                    ("AV", "process air volume (CFM)"),
                ],
                category: FormulaCategory::Spray,
            },
            Formula::AtomizingAirVolume => FormulaMetadata {
                name: "Atomizing Air Volume Scale-Up",
                expression: "AAV2 = AAV1 × SR2 / SR1",
                variables: &[
                    ("AAV", "atomizing air volume (CFM)"),
                    ("SR", "spray rate (g/min)"),
                ],
                category: FormulaCategory::Spray,
            },
            Formula::AtomizingAirPressure => FormulaMetadata {
                name: "Atomizing Air Pressure Scale-Up",
                expression: "P2 = P1 × SR1 / SR2",
                variables: &[
                    ("P", "atomizing air pressure (bar)"),
                    ("SR", "spray rate (g/min)"),
                ],
                category: FormulaCategory::Spray,
            },
            Formula::AtomizingAirPressureDroplet => FormulaMetadata {
                name: "Atomizing Air Pressure Scale-Up (droplet size)",
                expression: "AAP2 = AAP1 × (SR2 / SR1) × (AAV1 / AAV2)",
                variables: &[
                    ("AAP", "atomizing air pressure (bar)"),
                    ("SR", "spray rate (g/min)"),
                    ("AAV", "atomizing air volume (CFM)"),
                ],
                category: FormulaCategory::Spray,
            },
            Formula::AirVolumeByArea => FormulaMetadata {
                name: "Air Volume Scale-Up",
                expression: "AV2 = AV1 × A2 / A1",
                variables: &[
                    ("AV", "process air volume (CFM)"),
                    ("A", "bottom screen area (m²)"),
                ],
                category: FormulaCategory::Airflow,
            },
            Formula::AirVolumeByAreaInverse => FormulaMetadata {
                name: "Air Volume Scale-Up (legacy inverse)",
                expression: "AV2 = AV1 × A1 / A2",
                variables: &[
                    ("AV", "process air volume (CFM)"),
                    ("A", "bottom screen area (m²)"),
                ],
                category: FormulaCategory::Airflow,
            },
            Formula::BottomScreenAreaFromRadius => FormulaMetadata {
                name: "Bottom Screen Area (radius)",
                expression: "A = pi × r²",
                variables: &[("A", "area (m²)"), ("r", "radius (m)")],
                category: FormulaCategory::Geometry,
            },
            Formula::BottomScreenAreaFromDiameter => FormulaMetadata {
                name: "Bottom Screen Area (diameter)",
                expression: "A = pi × (d / 2)²",
                variables: &[("A", "area (m²)"), ("d", "diameter (m)")],
                category: FormulaCategory::Geometry,
            },
        }
    }

    /// Variable legend as one line, e.g. `"SR: spray rate (g/min); AV: ..."`
    pub fn legend(self) -> String {
        self.metadata()
            .variables
            .iter()
            .map(|(symbol, meaning)| format!("{symbol}: {meaning}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
