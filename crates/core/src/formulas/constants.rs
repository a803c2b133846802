//! Physical constants and conversion factors used by the airflow formulas

/// Pascals in one bar of gauge pressure
pub const PASCALS_PER_BAR: f64 = 100_000.0;

/// Cubic feet per minute in one cubic metre per second
pub const CFM_PER_CUBIC_METER_PER_SECOND: f64 = 2118.88;

/// Orifice discharge coefficient used when none is supplied
pub const DEFAULT_DISCHARGE_COEFFICIENT: f64 = 0.8;

/// Air density at room conditions (kg/m³)
pub const DEFAULT_AIR_DENSITY: f64 = 1.2;
