//! Report assembly and rendering
//!
//! A [`Report`] is an immutable, ordered list of [`ReportSection`]s under a
//! title. Sections are plain `label: value` rows whose values have already
//! been rounded for display. Turning a report into bytes is the job of a
//! [`DocumentRenderer`]:
//!
//! - [`PdfRenderer`] - paginated PDF document
//! - [`TextRenderer`] - plain text, as printed on the console
//! - [`JsonRenderer`] - pretty-printed JSON
//!
//! Which results end up in the report is the caller's decision; filter the
//! sections before calling [`Report::assemble`].

mod metrics;
pub mod pdf;
pub mod text;

pub use pdf::{PageLayout, PageSize, PdfRenderer};
pub use text::TextRenderer;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core_types::ScaleUpResult;
use crate::formulas::Formula;

/// Title of the optional equation appendix
pub const EQUATIONS_SECTION: &str = "Equations Used";

/// One `label: value` row of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Row label
    pub label: String,
    /// Display value
    pub value: String,
}

/// A titled group of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section heading
    pub title: String,
    /// Rows in display order
    pub entries: Vec<ReportEntry>,
}

impl ReportSection {
    /// Create an empty section
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Append a row
    pub fn with_entry(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(ReportEntry {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Appendix listing each formula with its variable legend
    ///
    /// Returns `None` when no formulas were used.
    pub fn equations(formulas: &[Formula]) -> Option<Self> {
        if formulas.is_empty() {
            return None;
        }
        let section = formulas
            .iter()
            .fold(ReportSection::new(EQUATIONS_SECTION), |section, formula| {
                let meta = formula.metadata();
                section.with_entry(
                    meta.name,
                    format!("{}  ({})", meta.expression, formula.legend()),
                )
            });
        Some(section)
    }
}

impl From<&ScaleUpResult> for ReportSection {
    fn from(result: &ScaleUpResult) -> Self {
        result
            .entries()
            .iter()
            .fold(ReportSection::new(result.section()), |section, entry| {
                section.with_entry(entry.label.clone(), entry.value.to_string())
            })
    }
}

/// Errors from report assembly or rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// No sections were supplied; the caller should tell the user to compute something first
    NothingToReport,
    /// The renderer failed to produce output
    Render(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::NothingToReport => write!(
                f,
                "No calculation results found. Please calculate parameters first."
            ),
            ReportError::Render(msg) => write!(f, "Failed to render report: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Assembled report, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    title: String,
    subtitle: Option<String>,
    sections: Vec<ReportSection>,
}

impl Report {
    /// Assemble a report from sections, keeping their order
    ///
    /// # Errors
    /// Returns [`ReportError::NothingToReport`] when `sections` is empty.
    pub fn assemble(
        title: impl Into<String>,
        sections: impl IntoIterator<Item = ReportSection>,
    ) -> Result<Self, ReportError> {
        let sections: Vec<ReportSection> = sections.into_iter().collect();
        if sections.is_empty() {
            warn!("Report requested with no computed sections");
            return Err(ReportError::NothingToReport);
        }
        debug!(sections = sections.len(), "Assembled report");
        Ok(Self {
            title: title.into(),
            subtitle: None,
            sections,
        })
    }

    /// Attach a subtitle line (e.g. a generation timestamp)
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Report title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Subtitle, if any
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Sections in output order
    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }
}

/// Turns a report into a byte buffer in some document format
pub trait DocumentRenderer {
    /// MIME type of the output
    fn media_type(&self) -> &'static str;

    /// Conventional file extension, without the dot
    fn file_extension(&self) -> &'static str;

    /// Render the report
    ///
    /// # Errors
    /// Returns [`ReportError::Render`] if the document cannot be produced.
    fn render(&self, report: &Report) -> Result<Vec<u8>, ReportError>;
}

/// Pretty-printed JSON output
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn media_type(&self) -> &'static str {
        "application/json"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>, ReportError> {
        serde_json::to_vec_pretty(report).map_err(|e| ReportError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Unit;

    fn section(title: &str) -> ReportSection {
        ReportSection::new(title).with_entry("Value", "1.00")
    }

    #[test]
    fn test_empty_report_signals_nothing_to_report() {
        let result = Report::assemble("Title", Vec::new());
        assert_eq!(result, Err(ReportError::NothingToReport));
    }

    #[test]
    fn test_sections_keep_order() {
        let report =
            Report::assemble("Title", vec![section("B"), section("A"), section("C")]).unwrap();
        let titles: Vec<&str> = report.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_section_from_result_rounds_for_display() {
        let result = ScaleUpResult::new("Bottom Screen Area")
            .with_number("Lab Bottom Screen Area", Unit::SquareMeters, 0.19634954084936207)
            .with_number("Pilot Air Volume AV2", Unit::Cfm, 399.99999);
        let section = ReportSection::from(&result);
        assert_eq!(section.title, "Bottom Screen Area");
        assert_eq!(section.entries[0].label, "Lab Bottom Screen Area (m²)");
        assert_eq!(section.entries[0].value, "0.1963");
        assert_eq!(section.entries[1].value, "400.00");
    }

    #[test]
    fn test_equations_section() {
        assert!(ReportSection::equations(&[]).is_none());
        let appendix = ReportSection::equations(&[Formula::SprayRate]).unwrap();
        assert_eq!(appendix.title, EQUATIONS_SECTION);
        assert_eq!(appendix.entries[0].label, "Spray Rate Scale-Up");
        assert!(appendix.entries[0].value.starts_with("SR2 = SR1 × AV2 / AV1"));
    }

    #[test]
    fn test_json_renderer_preserves_order() {
        let report = Report::assemble("Title", vec![section("Second"), section("First")])
            .unwrap()
            .with_subtitle("today");
        let bytes = JsonRenderer.render(&report).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let second = text.find("Second").unwrap();
        let first = text.find("First").unwrap();
        assert!(second < first);

        let restored: Report = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, report);
    }

    #[test]
    fn test_error_messages() {
        assert!(ReportError::NothingToReport
            .to_string()
            .contains("Please calculate parameters first"));
        assert_eq!(
            ReportError::Render("boom".into()).to_string(),
            "Failed to render report: boom"
        );
    }
}
