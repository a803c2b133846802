//! Result book: the caller-held collection of computed sections
//!
//! Sections keep the order in which they were first computed. Recomputing a
//! section replaces its contents without moving it, so a report reflects the
//! order the operator worked through the sheet.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core_types::ScaleUpResult;
use crate::formulas::Formula;
use crate::report::ReportSection;

/// Ordered map from section title to the latest result for that section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ScaleUpResult>", into = "Vec<ScaleUpResult>")]
pub struct ResultBook {
    results: Vec<ScaleUpResult>,
    index: FxHashMap<String, usize>,
}

impl ResultBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result, replacing any previous result for the same section in place
    ///
    /// Returns the replaced result, if any.
    pub fn insert(&mut self, result: ScaleUpResult) -> Option<ScaleUpResult> {
        if let Some(&slot) = self.index.get(result.section()) {
            return Some(std::mem::replace(&mut self.results[slot], result));
        }
        self.index
            .insert(result.section().to_string(), self.results.len());
        self.results.push(result);
        None
    }

    /// Remove a section, keeping the order of the others
    pub fn remove(&mut self, section: &str) -> Option<ScaleUpResult> {
        let slot = self.index.remove(section)?;
        let removed = self.results.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        Some(removed)
    }

    /// Latest result for a section
    pub fn get(&self, section: &str) -> Option<&ScaleUpResult> {
        self.index.get(section).map(|&slot| &self.results[slot])
    }

    /// Full-precision number stored under `label` in `section`
    ///
    /// This is how a caller pre-fills a later input with an earlier output.
    pub fn value(&self, section: &str, label: &str) -> Option<f64> {
        self.get(section).and_then(|result| result.number(label))
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when nothing has been computed yet
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Sections in book order
    pub fn iter(&self) -> impl Iterator<Item = &ScaleUpResult> {
        self.results.iter()
    }

    /// Results whose section is named in `sections`, in book order
    ///
    /// Unknown names are ignored.
    pub fn select<S: AsRef<str>>(&self, sections: &[S]) -> Vec<&ScaleUpResult> {
        self.results
            .iter()
            .filter(|result| sections.iter().any(|name| name.as_ref() == result.section()))
            .collect()
    }

    /// Report sections for every stored result, with presentation rounding applied
    pub fn report_sections(&self) -> Vec<ReportSection> {
        self.results.iter().map(ReportSection::from).collect()
    }

    /// Formulas used across all sections, first use first, without repeats
    pub fn formulas_used(&self) -> Vec<Formula> {
        let mut used: Vec<Formula> = Vec::new();
        for formula in self.results.iter().flat_map(ScaleUpResult::formulas) {
            if !used.contains(formula) {
                used.push(*formula);
            }
        }
        used
    }

    /// Drop every section
    pub fn clear(&mut self) {
        self.results.clear();
        self.index.clear();
    }
}

impl From<Vec<ScaleUpResult>> for ResultBook {
    fn from(results: Vec<ScaleUpResult>) -> Self {
        results.into_iter().collect()
    }
}

impl From<ResultBook> for Vec<ScaleUpResult> {
    fn from(book: ResultBook) -> Self {
        book.results
    }
}

impl FromIterator<ScaleUpResult> for ResultBook {
    fn from_iter<I: IntoIterator<Item = ScaleUpResult>>(iter: I) -> Self {
        let mut book = ResultBook::new();
        for result in iter {
            book.insert(result);
        }
        book
    }
}

impl<'a> IntoIterator for &'a ResultBook {
    type Item = &'a ScaleUpResult;
    type IntoIter = std::slice::Iter<'a, ScaleUpResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Unit;

    fn result(section: &str, value: f64) -> ScaleUpResult {
        ScaleUpResult::new(section).with_number("Value", Unit::Cfm, value)
    }

    fn titles(book: &ResultBook) -> Vec<&str> {
        book.iter().map(ScaleUpResult::section).collect()
    }

    #[test]
    fn test_insert_appends_in_order() {
        let mut book = ResultBook::new();
        assert!(book.is_empty());
        book.insert(result("B", 1.0));
        book.insert(result("A", 2.0));
        assert_eq!(titles(&book), vec!["B", "A"]);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_recompute_replaces_in_place() {
        let mut book = ResultBook::new();
        book.insert(result("First", 1.0));
        book.insert(result("Second", 2.0));

        let previous = book.insert(result("First", 10.0));

        assert_eq!(previous.and_then(|r| r.number("Value (CFM)")), Some(1.0));
        assert_eq!(titles(&book), vec!["First", "Second"]);
        assert_eq!(book.value("First", "Value (CFM)"), Some(10.0));
    }

    #[test]
    fn test_remove_keeps_remaining_order_and_index() {
        let mut book: ResultBook = vec![result("A", 1.0), result("B", 2.0), result("C", 3.0)]
            .into_iter()
            .collect();

        assert!(book.remove("A").is_some());
        assert!(book.remove("A").is_none());
        assert_eq!(titles(&book), vec!["B", "C"]);
        assert_eq!(book.value("C", "Value (CFM)"), Some(3.0));

        book.insert(result("C", 30.0));
        assert_eq!(titles(&book), vec!["B", "C"]);
        assert_eq!(book.value("C", "Value (CFM)"), Some(30.0));
    }

    #[test]
    fn test_select_keeps_book_order_and_ignores_unknown() {
        let book: ResultBook = vec![result("A", 1.0), result("B", 2.0), result("C", 3.0)]
            .into_iter()
            .collect();

        let picked: Vec<&str> = book
            .select(&["C", "missing", "A"])
            .into_iter()
            .map(ScaleUpResult::section)
            .collect();
        assert_eq!(picked, vec!["A", "C"]);
    }

    #[test]
    fn test_formulas_used_deduplicates() {
        let book: ResultBook = vec![
            result("A", 1.0).with_formula(Formula::SprayRate),
            result("B", 2.0)
                .with_formula(Formula::AtomizingAirVolume)
                .with_formula(Formula::SprayRate),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            book.formulas_used(),
            vec![Formula::SprayRate, Formula::AtomizingAirVolume]
        );
    }

    #[test]
    fn test_json_roundtrip_rebuilds_index() {
        let book: ResultBook = vec![result("A", 1.0), result("B", 2.0)].into_iter().collect();
        let json = serde_json::to_string(&book).unwrap();
        let restored: ResultBook = serde_json::from_str(&json).unwrap();
        assert_eq!(titles(&restored), vec!["A", "B"]);
        assert_eq!(restored.value("B", "Value (CFM)"), Some(2.0));
    }

    #[test]
    fn test_clear() {
        let mut book: ResultBook = vec![result("A", 1.0)].into_iter().collect();
        book.clear();
        assert!(book.is_empty());
        assert!(book.get("A").is_none());
    }
}
