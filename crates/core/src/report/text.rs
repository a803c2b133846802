//! Plain-text rendering

use std::fmt::Write as _;

use super::{DocumentRenderer, Report, ReportError};

/// Renders a report as underlined plain text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    /// Render to a `String`
    pub fn render_string(&self, report: &Report) -> String {
        let mut out = String::new();
        underline(&mut out, report.title(), '=');
        if let Some(subtitle) = report.subtitle() {
            let _ = writeln!(out, "{subtitle}");
        }
        for section in report.sections() {
            out.push('\n');
            underline(&mut out, &section.title, '-');
            for entry in &section.entries {
                let _ = writeln!(out, "{}: {}", entry.label, entry.value);
            }
        }
        out
    }
}

fn underline(out: &mut String, text: &str, mark: char) {
    let _ = writeln!(out, "{text}");
    let _ = writeln!(out, "{}", mark.to_string().repeat(text.chars().count()));
}

impl DocumentRenderer for TextRenderer {
    fn media_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>, ReportError> {
        Ok(self.render_string(report).into_bytes())
    }
}
