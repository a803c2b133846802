//! Calculation steps
//!
//! One input struct per section of the scale-up sheet. A step validates and
//! evaluates its formula through [`ScaleUpStep::compute`], then
//! [`ScaleUpStep::summarize`] records inputs and outputs under the labels
//! used on the sheet. Defaults are the values the sheet opens with.
//!
//! ```
//! use granulation_scaleup_core::steps::{ScaleUpStep, SprayRateInput};
//!
//! let result = SprayRateInput::default().calculate().unwrap();
//! assert_eq!(result.number("Calculated Pilot Spray Rate SR2 (g/min)"), Some(200.0));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::{ScaleUpError, ScaleUpResult, Unit};
use crate::formulas::{
    self, constants::DEFAULT_AIR_DENSITY, constants::DEFAULT_DISCHARGE_COEFFICIENT, Formula,
};

/// Section titles, as they appear in the result book and the report
pub mod sections {
    /// Orifice flow estimate
    pub const PRESSURE_TO_CFM: &str = "Pressure to CFM";
    /// Spray rate scale-up
    pub const SPRAY_RATE: &str = "Spray Rate Scale-Up";
    /// Atomizing air volume scale-up
    pub const ATOMIZING_AIR_VOLUME: &str = "Atomizing Air Volume Scale-Up";
    /// Atomizing air pressure scale-up
    pub const ATOMIZING_AIR_PRESSURE: &str = "Atomizing Air Pressure Scale-Up";
    /// Bottom screen areas
    pub const BOTTOM_SCREEN_AREA: &str = "Bottom Screen Area";
    /// Air volume scale-up by screen area
    pub const AIR_VOLUME: &str = "Air Volume Scale-Up";

    /// All sections in sheet order
    pub const ALL: [&str; 6] = [
        PRESSURE_TO_CFM,
        SPRAY_RATE,
        ATOMIZING_AIR_VOLUME,
        ATOMIZING_AIR_PRESSURE,
        BOTTOM_SCREEN_AREA,
        AIR_VOLUME,
    ];
}

/// A single scale-up calculation
pub trait ScaleUpStep {
    /// Full-precision output handed to later steps
    type Output;

    /// Section title the result is stored under
    fn section(&self) -> &'static str;

    /// Formulas this step evaluates
    fn formulas(&self) -> Vec<Formula>;

    /// Evaluate the formula(s)
    ///
    /// # Errors
    /// Propagates the [`ScaleUpError`] from the formula library.
    fn compute(&self) -> Result<Self::Output, ScaleUpError>;

    /// Record inputs and outputs as a labeled result
    fn summarize(&self, output: &Self::Output) -> ScaleUpResult;

    /// Compute, then summarize with the formulas recorded
    ///
    /// Returns the raw output alongside the labeled result so it can feed a
    /// later step at full precision.
    ///
    /// # Errors
    /// Propagates the [`ScaleUpError`] from [`ScaleUpStep::compute`].
    fn evaluate(&self) -> Result<(Self::Output, ScaleUpResult), ScaleUpError> {
        let output = self.compute()?;
        let result = self
            .formulas()
            .into_iter()
            .fold(self.summarize(&output), ScaleUpResult::with_formula);
        debug!(section = self.section(), entries = result.entries().len(), "Calculated step");
        Ok((output, result))
    }

    /// Labeled result only
    ///
    /// # Errors
    /// Propagates the [`ScaleUpError`] from [`ScaleUpStep::compute`].
    fn calculate(&self) -> Result<ScaleUpResult, ScaleUpError> {
        self.evaluate().map(|(_, result)| result)
    }
}

// ============================================================================
// PRESSURE TO CFM
// ============================================================================

/// Orifice flow estimate inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureToFlowInput {
    /// Gauge pressure (bar)
    pub pressure_bar: f64,
    /// Cross-sectional area (m²)
    pub area_m2: f64,
    /// Discharge coefficient
    pub discharge_coefficient: f64,
    /// Air density (kg/m³)
    pub air_density: f64,
}

impl Default for PressureToFlowInput {
    fn default() -> Self {
        Self {
            pressure_bar: 2.0,
            area_m2: 0.01,
            discharge_coefficient: DEFAULT_DISCHARGE_COEFFICIENT,
            air_density: DEFAULT_AIR_DENSITY,
        }
    }
}

impl ScaleUpStep for PressureToFlowInput {
    type Output = f64;

    fn section(&self) -> &'static str {
        sections::PRESSURE_TO_CFM
    }

    fn formulas(&self) -> Vec<Formula> {
        vec![Formula::PressureToFlow]
    }

    fn compute(&self) -> Result<f64, ScaleUpError> {
        formulas::pressure_to_cfm_with(
            self.pressure_bar,
            self.area_m2,
            self.discharge_coefficient,
            self.air_density,
        )
    }

    fn summarize(&self, flow: &f64) -> ScaleUpResult {
        ScaleUpResult::new(self.section())
            .with_number("Input Pressure", Unit::Bar, self.pressure_bar)
            .with_number("Cross-sectional Area", Unit::SquareMeters, self.area_m2)
            .with_number("Discharge Coefficient", Unit::Dimensionless, self.discharge_coefficient)
            .with_number("Air Density", Unit::KilogramsPerCubicMeter, self.air_density)
            .with_number("Estimated Air Flow", Unit::Cfm, *flow)
    }
}

// ============================================================================
// SPRAY RATE
// ============================================================================

/// Spray rate scale-up inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprayRateInput {
    /// SR1 (g/min)
    pub lab_spray_rate: f64,
    /// AV1 (CFM)
    pub lab_air_volume: f64,
    /// AV2 (CFM)
    pub pilot_air_volume: f64,
}

impl Default for SprayRateInput {
    fn default() -> Self {
        Self {
            lab_spray_rate: 50.0,
            lab_air_volume: 100.0,
            pilot_air_volume: 400.0,
        }
    }
}

impl ScaleUpStep for SprayRateInput {
    type Output = f64;

    fn section(&self) -> &'static str {
        sections::SPRAY_RATE
    }

    fn formulas(&self) -> Vec<Formula> {
        vec![Formula::SprayRate]
    }

    fn compute(&self) -> Result<f64, ScaleUpError> {
        formulas::spray_rate_scaleup(
            self.lab_spray_rate,
            self.lab_air_volume,
            self.pilot_air_volume,
        )
    }

    fn summarize(&self, sr2: &f64) -> ScaleUpResult {
        ScaleUpResult::new(self.section())
            .with_number("Lab Spray Rate SR1", Unit::GramsPerMinute, self.lab_spray_rate)
            .with_number("Lab Air Volume AV1", Unit::Cfm, self.lab_air_volume)
            .with_number("Pilot Air Volume AV2", Unit::Cfm, self.pilot_air_volume)
            .with_number("Calculated Pilot Spray Rate SR2", Unit::GramsPerMinute, *sr2)
    }
}

// ============================================================================
// ATOMIZING AIR VOLUME
// ============================================================================

/// Atomizing air volume scale-up inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomizingAirVolumeInput {
    /// AAV1 (CFM)
    pub lab_atomizing_air_volume: f64,
    /// SR1 (g/min)
    pub lab_spray_rate: f64,
    /// SR2 (g/min)
    pub pilot_spray_rate: f64,
}

impl Default for AtomizingAirVolumeInput {
    fn default() -> Self {
        Self {
            lab_atomizing_air_volume: 10.0,
            lab_spray_rate: 50.0,
            pilot_spray_rate: 200.0,
        }
    }
}

impl ScaleUpStep for AtomizingAirVolumeInput {
    type Output = f64;

    fn section(&self) -> &'static str {
        sections::ATOMIZING_AIR_VOLUME
    }

    fn formulas(&self) -> Vec<Formula> {
        vec![Formula::AtomizingAirVolume]
    }

    fn compute(&self) -> Result<f64, ScaleUpError> {
        formulas::atomizing_air_volume_scaleup(
            self.lab_atomizing_air_volume,
            self.lab_spray_rate,
            self.pilot_spray_rate,
        )
    }

    fn summarize(&self, aav2: &f64) -> ScaleUpResult {
        ScaleUpResult::new(self.section())
            .with_number("Lab Atomizing Air Volume AAV1", Unit::Cfm, self.lab_atomizing_air_volume)
            .with_number("Lab Spray Rate SR1", Unit::GramsPerMinute, self.lab_spray_rate)
            .with_number("Pilot Spray Rate SR2", Unit::GramsPerMinute, self.pilot_spray_rate)
            .with_number("Calculated Pilot Atomizing Air Volume AAV2", Unit::Cfm, *aav2)
    }
}

// ============================================================================
// ATOMIZING AIR PRESSURE
// ============================================================================

/// How atomizing air pressure is carried to the pilot scale
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureScaling {
    /// `P2 = P1 × SR1 / SR2`
    #[default]
    Simple,
    /// `AAP2 = AAP1 × (SR2/SR1) × (AAV1/AAV2)`
    DropletSize {
        /// AAV1 (CFM)
        lab_atomizing_air_volume: f64,
        /// AAV2 (CFM)
        pilot_atomizing_air_volume: f64,
    },
}

/// Atomizing air pressure scale-up inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomizingAirPressureInput {
    /// P1 / AAP1 (bar)
    pub lab_pressure: f64,
    /// SR1 (g/min)
    pub lab_spray_rate: f64,
    /// SR2 (g/min)
    pub pilot_spray_rate: f64,
    /// Scaling rule
    pub scaling: PressureScaling,
}

impl Default for AtomizingAirPressureInput {
    fn default() -> Self {
        Self {
            lab_pressure: 2.0,
            lab_spray_rate: 50.0,
            pilot_spray_rate: 200.0,
            scaling: PressureScaling::Simple,
        }
    }
}

impl ScaleUpStep for AtomizingAirPressureInput {
    type Output = f64;

    fn section(&self) -> &'static str {
        sections::ATOMIZING_AIR_PRESSURE
    }

    fn formulas(&self) -> Vec<Formula> {
        match self.scaling {
            PressureScaling::Simple => vec![Formula::AtomizingAirPressure],
            PressureScaling::DropletSize { .. } => vec![Formula::AtomizingAirPressureDroplet],
        }
    }

    fn compute(&self) -> Result<f64, ScaleUpError> {
        match self.scaling {
            PressureScaling::Simple => formulas::atomizing_air_pressure_scaleup(
                self.lab_pressure,
                self.lab_spray_rate,
                self.pilot_spray_rate,
            ),
            PressureScaling::DropletSize {
                lab_atomizing_air_volume,
                pilot_atomizing_air_volume,
            } => formulas::atomizing_air_pressure_scaleup_droplet(
                self.lab_pressure,
                self.lab_spray_rate,
                self.pilot_spray_rate,
                lab_atomizing_air_volume,
                pilot_atomizing_air_volume,
            ),
        }
    }

    fn summarize(&self, p2: &f64) -> ScaleUpResult {
        match self.scaling {
            PressureScaling::Simple => ScaleUpResult::new(self.section())
                .with_number("Lab Atomizing Air Pressure P1", Unit::Bar, self.lab_pressure)
                .with_number("Lab Spray Rate SR1", Unit::GramsPerMinute, self.lab_spray_rate)
                .with_number("Pilot Spray Rate SR2", Unit::GramsPerMinute, self.pilot_spray_rate)
                .with_number("Calculated Pilot Atomizing Air Pressure P2", Unit::Bar, *p2),
            PressureScaling::DropletSize {
                lab_atomizing_air_volume,
                pilot_atomizing_air_volume,
            } => ScaleUpResult::new(self.section())
                .with_number("Lab Atomizing Air Pressure AAP1", Unit::Bar, self.lab_pressure)
                .with_number("Lab Spray Rate SR1", Unit::GramsPerMinute, self.lab_spray_rate)
                .with_number("Pilot Spray Rate SR2", Unit::GramsPerMinute, self.pilot_spray_rate)
                .with_number("Lab Atomizing Air Volume AAV1", Unit::Cfm, lab_atomizing_air_volume)
                .with_number(
                    "Pilot Atomizing Air Volume AAV2",
                    Unit::Cfm,
                    pilot_atomizing_air_volume,
                )
                .with_number("Calculated Pilot Atomizing Air Pressure AAP2", Unit::Bar, *p2),
        }
    }
}

// ============================================================================
// BOTTOM SCREEN AREA
// ============================================================================

/// Which screen dimension the inputs give
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenDimension {
    /// Inputs are diameters (m)
    #[default]
    Diameter,
    /// Inputs are radii (m)
    Radius,
}

impl ScreenDimension {
    fn area(self, value: f64) -> Result<f64, ScaleUpError> {
        match self {
            ScreenDimension::Diameter => formulas::bottom_screen_area_from_diameter(value),
            ScreenDimension::Radius => formulas::bottom_screen_area(value),
        }
    }

    fn word(self) -> &'static str {
        match self {
            ScreenDimension::Diameter => "Diameter",
            ScreenDimension::Radius => "Radius",
        }
    }
}

/// Lab and pilot bottom screen dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BottomScreenInput {
    /// Whether `lab`/`pilot` are diameters or radii
    pub dimension: ScreenDimension,
    /// Lab screen dimension (m)
    pub lab: f64,
    /// Pilot screen dimension (m)
    pub pilot: f64,
}

impl Default for BottomScreenInput {
    fn default() -> Self {
        Self {
            dimension: ScreenDimension::Diameter,
            lab: 0.5,
            pilot: 1.0,
        }
    }
}

/// Full-precision screen areas (m²)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BottomScreenAreas {
    /// A1
    pub lab: f64,
    /// A2
    pub pilot: f64,
}

impl ScaleUpStep for BottomScreenInput {
    type Output = BottomScreenAreas;

    fn section(&self) -> &'static str {
        sections::BOTTOM_SCREEN_AREA
    }

    fn formulas(&self) -> Vec<Formula> {
        match self.dimension {
            ScreenDimension::Diameter => vec![Formula::BottomScreenAreaFromDiameter],
            ScreenDimension::Radius => vec![Formula::BottomScreenAreaFromRadius],
        }
    }

    fn compute(&self) -> Result<BottomScreenAreas, ScaleUpError> {
        Ok(BottomScreenAreas {
            lab: self.dimension.area(self.lab)?,
            pilot: self.dimension.area(self.pilot)?,
        })
    }

    fn summarize(&self, areas: &BottomScreenAreas) -> ScaleUpResult {
        let word = self.dimension.word();
        ScaleUpResult::new(self.section())
            .with_number(&format!("Lab Bottom Screen {word}"), Unit::Meters, self.lab)
            .with_number("Lab Bottom Screen Area", Unit::SquareMeters, areas.lab)
            .with_number(&format!("Pilot Bottom Screen {word}"), Unit::Meters, self.pilot)
            .with_number("Pilot Bottom Screen Area", Unit::SquareMeters, areas.pilot)
    }
}

// ============================================================================
// AIR VOLUME
// ============================================================================

/// Direction of air volume scaling with screen area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaScaling {
    /// `AV2 = AV1 × A2 / A1`
    #[default]
    Proportional,
    /// `AV2 = AV1 × A1 / A2`, reproduces older reports
    LegacyInverse,
}

impl AreaScaling {
    fn formula(self) -> Formula {
        match self {
            AreaScaling::Proportional => Formula::AirVolumeByArea,
            AreaScaling::LegacyInverse => Formula::AirVolumeByAreaInverse,
        }
    }
}

/// Air volume scale-up inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirVolumeInput {
    /// AV1 (CFM)
    pub lab_air_volume: f64,
    /// A1 (m²)
    pub lab_area: f64,
    /// A2 (m²)
    pub pilot_area: f64,
    /// Scaling direction
    pub scaling: AreaScaling,
}

impl Default for AirVolumeInput {
    fn default() -> Self {
        Self {
            lab_air_volume: 100.0,
            lab_area: 0.1963,
            pilot_area: 0.7854,
            scaling: AreaScaling::Proportional,
        }
    }
}

impl ScaleUpStep for AirVolumeInput {
    type Output = f64;

    fn section(&self) -> &'static str {
        sections::AIR_VOLUME
    }

    fn formulas(&self) -> Vec<Formula> {
        vec![self.scaling.formula()]
    }

    fn compute(&self) -> Result<f64, ScaleUpError> {
        match self.scaling {
            AreaScaling::Proportional => formulas::air_volume_scaleup_by_area(
                self.lab_air_volume,
                self.lab_area,
                self.pilot_area,
            ),
            #[allow(deprecated)]
            AreaScaling::LegacyInverse => formulas::air_volume_scaleup_by_area_inverse(
                self.lab_air_volume,
                self.lab_area,
                self.pilot_area,
            ),
        }
    }

    fn summarize(&self, av2: &f64) -> ScaleUpResult {
        ScaleUpResult::new(self.section())
            .with_number("Lab Air Volume AV1", Unit::Cfm, self.lab_air_volume)
            .with_number("Lab Bottom Screen Area A1", Unit::SquareMeters, self.lab_area)
            .with_number("Pilot Bottom Screen Area A2", Unit::SquareMeters, self.pilot_area)
            .with_number("Calculated Pilot Air Volume AV2", Unit::Cfm, *av2)
            .with_text("Scaling Convention", self.scaling.formula().metadata().expression)
    }
}
