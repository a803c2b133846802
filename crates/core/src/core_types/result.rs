//! Labeled results produced by one scale-up calculation

use serde::{Deserialize, Serialize};
use std::fmt;

use super::units::Unit;
use crate::formulas::registry::Formula;

/// Value stored against a label
///
/// Numbers keep full precision; rounding happens only in `Display`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResultValue {
    /// Physical quantity
    Number {
        /// Unrounded value
        value: f64,
        /// Unit, which also fixes the display precision
        unit: Unit,
    },
    /// Free text (e.g. the scaling convention in use)
    Text(String),
}

impl ResultValue {
    /// Full-precision number, if this is a quantity
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResultValue::Number { value, .. } => Some(*value),
            ResultValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Number { value, unit } => f.write_str(&unit.format(*value)),
            ResultValue::Text(text) => f.write_str(text),
        }
    }
}

/// One `label: value` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Human-readable label including the unit, e.g. `"Lab Air Volume AV1 (CFM)"`
    pub label: String,
    /// Stored value
    pub value: ResultValue,
}

/// Inputs and outputs of a single calculation, addressed by section title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleUpResult {
    section: String,
    entries: Vec<ResultEntry>,
    formulas: Vec<Formula>,
}

impl ScaleUpResult {
    /// Create an empty result for a section
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            entries: Vec::new(),
            formulas: Vec::new(),
        }
    }

    /// Append a quantity; the label gets the unit suffix
    pub fn with_number(mut self, name: &str, unit: Unit, value: f64) -> Self {
        self.entries.push(ResultEntry {
            label: unit.label(name),
            value: ResultValue::Number { value, unit },
        });
        self
    }

    /// Append a text row
    pub fn with_text(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.push(ResultEntry {
            label: label.into(),
            value: ResultValue::Text(text.into()),
        });
        self
    }

    /// Record a formula that contributed to this result
    pub fn with_formula(mut self, formula: Formula) -> Self {
        if !self.formulas.contains(&formula) {
            self.formulas.push(formula);
        }
        self
    }

    /// Section title
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Rows in insertion order
    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    /// Formulas used, in the order they were recorded
    pub fn formulas(&self) -> &[Formula] {
        &self.formulas
    }

    /// Look up a row by its full label
    pub fn get(&self, label: &str) -> Option<&ResultValue> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| &entry.value)
    }

    /// Full-precision number stored under `label`
    pub fn number(&self, label: &str) -> Option<f64> {
        self.get(label).and_then(ResultValue::as_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_insertion_order() {
        let result = ScaleUpResult::new("Spray Rate Scale-Up")
            .with_number("Lab Spray Rate SR1", Unit::GramsPerMinute, 50.0)
            .with_number("Lab Air Volume AV1", Unit::Cfm, 100.0)
            .with_text("Note", "checked");

        let labels: Vec<&str> = result.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Lab Spray Rate SR1 (g/min)", "Lab Air Volume AV1 (CFM)", "Note"]
        );
    }

    #[test]
    fn test_number_lookup_is_unrounded() {
        let area = std::f64::consts::PI * 0.25 * 0.25;
        let result = ScaleUpResult::new("Bottom Screen Area").with_number(
            "Lab Bottom Screen Area",
            Unit::SquareMeters,
            area,
        );

        assert_eq!(result.number("Lab Bottom Screen Area (m²)"), Some(area));
        assert_eq!(
            result.get("Lab Bottom Screen Area (m²)").map(ToString::to_string),
            Some("0.1963".to_string())
        );
        assert_eq!(result.number("missing"), None);
    }

    #[test]
    fn test_formulas_are_deduplicated() {
        let result = ScaleUpResult::new("Bottom Screen Area")
            .with_formula(Formula::BottomScreenAreaFromDiameter)
            .with_formula(Formula::BottomScreenAreaFromDiameter);
        assert_eq!(result.formulas(), &[Formula::BottomScreenAreaFromDiameter]);
    }
}
