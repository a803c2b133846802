//! PDF rendering
//!
//! Lays the report out top to bottom on fixed-size pages using the standard
//! Helvetica faces, so no font data is embedded. Text is encoded as
//! `WinAnsi` (Latin-1 for the characters used on the sheets, including `²`,
//! `³` and `×`); anything outside that set prints as `?`.
//!
//! Layout:
//! - title (bold), optional subtitle, horizontal rule
//! - per section: heading (bold) followed by one `label: value` line per row
//! - long lines wrap on word boundaries, measured with the Helvetica glyph
//!   widths of their face; a heading never ends a page
//! - page footer `Page n of m`
//!
//! Output is uncompressed and carries no timestamps, so identical reports
//! render to identical bytes.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::metrics::text_width;
use super::{DocumentRenderer, Report, ReportError};

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

/// Paper size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageSize {
    /// 210 × 297 mm
    #[default]
    A4,
    /// 8.5 × 11 in
    Letter,
}

impl PageSize {
    /// Width and height in points
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

/// Page geometry and type sizes, all in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Paper size
    pub page_size: PageSize,
    /// Margin on all four sides
    pub margin: f32,
    /// Report title size
    pub title_size: f32,
    /// Section heading size
    pub heading_size: f32,
    /// Body text size
    pub body_size: f32,
    /// Baseline-to-baseline distance as a multiple of the font size
    pub line_spacing: f32,
    /// Extra space before each section heading
    pub section_gap: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 56.0,
            title_size: 18.0,
            heading_size: 13.0,
            body_size: 10.5,
            line_spacing: 1.4,
            section_gap: 12.0,
        }
    }
}

impl PageLayout {
    /// Check that the layout leaves room for text
    ///
    /// # Errors
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let (width, height) = self.page_size.dimensions();
        if self.margin.is_nan() || self.margin <= 0.0 || self.margin * 2.0 >= width.min(height) {
            return Err(format!("margin {} does not fit the page", self.margin));
        }
        if self.line_spacing.is_nan() || self.line_spacing < 1.0 {
            return Err(format!("line_spacing must be at least 1.0, got {}", self.line_spacing));
        }
        if self.section_gap.is_nan() || self.section_gap < 0.0 {
            return Err(format!("section_gap must be non-negative, got {}", self.section_gap));
        }
        let usable = height - 2.0 * self.margin;
        for (name, size) in [
            ("title_size", self.title_size),
            ("heading_size", self.heading_size),
            ("body_size", self.body_size),
        ] {
            if size.is_nan() || size <= 0.0 || size * self.line_spacing >= usable / 4.0 {
                return Err(format!("{name} {size} does not fit the page"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Title,
    Subtitle,
    Heading,
    Body,
}

#[derive(Debug, Clone, PartialEq)]
enum PageItem {
    Text { style: Style, text: String, y: f32 },
    Rule { y: f32 },
}

/// Renders reports as PDF documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer {
    layout: PageLayout,
}

impl PdfRenderer {
    /// Renderer with the given layout
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    /// Layout in use
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Number of pages the report will occupy
    pub fn page_count(&self, report: &Report) -> usize {
        self.paginate(report).len()
    }

    fn size(&self, style: Style) -> f32 {
        match style {
            Style::Title => self.layout.title_size,
            Style::Heading => self.layout.heading_size,
            Style::Subtitle | Style::Body => self.layout.body_size,
        }
    }

    fn is_bold(style: Style) -> bool {
        matches!(style, Style::Title | Style::Heading)
    }

    fn font(style: Style) -> Name<'static> {
        if Self::is_bold(style) {
            BOLD_FONT
        } else {
            REGULAR_FONT
        }
    }

    fn advance(&self, style: Style) -> f32 {
        self.size(style) * self.layout.line_spacing
    }

    /// Flatten the report into styled lines, wrapped to the text width
    fn lines(&self, report: &Report) -> Vec<(Style, String)> {
        let (width, _) = self.layout.page_size.dimensions();
        let column = width - 2.0 * self.layout.margin;

        let mut lines = Vec::new();
        let mut push = |style: Style, text: &str| {
            let (bold, size) = (Self::is_bold(style), self.size(style));
            for line in wrap(text, column, |s| text_width(s, bold, size)) {
                lines.push((style, line));
            }
        };

        push(Style::Title, report.title());
        if let Some(subtitle) = report.subtitle() {
            push(Style::Subtitle, subtitle);
        }
        for section in report.sections() {
            push(Style::Heading, &section.title);
            for entry in &section.entries {
                push(Style::Body, &format!("{}: {}", entry.label, entry.value));
            }
        }
        lines
    }

    /// Assign lines to pages and baselines
    fn paginate(&self, report: &Report) -> Vec<Vec<PageItem>> {
        let (_, height) = self.layout.page_size.dimensions();
        let top = height - self.layout.margin;
        let bottom = self.layout.margin;

        let lines = self.lines(report);
        let mut pages: Vec<Vec<PageItem>> = Vec::new();
        let mut page: Vec<PageItem> = Vec::new();
        let mut cursor = top;
        let mut title_done = false;

        for (i, (style, text)) in lines.iter().enumerate() {
            let gap = if *style == Style::Heading && !page.is_empty() {
                self.layout.section_gap
            } else {
                0.0
            };
            let mut needed = gap + self.advance(*style);
            // Keep a heading together with its first row
            if *style == Style::Heading {
                if let Some((next_style, _)) = lines.get(i + 1) {
                    needed += self.advance(*next_style);
                }
            }

            let gap = if cursor - needed < bottom && !page.is_empty() {
                pages.push(std::mem::take(&mut page));
                cursor = top;
                0.0
            } else {
                gap
            };

            if !title_done && !matches!(style, Style::Title | Style::Subtitle) {
                // Rule separates the title block from the first section
                cursor -= self.layout.section_gap / 2.0;
                page.push(PageItem::Rule { y: cursor });
                cursor -= self.layout.section_gap / 2.0;
                title_done = true;
            }

            cursor -= gap + self.advance(*style);
            page.push(PageItem::Text {
                style: *style,
                text: text.clone(),
                y: cursor,
            });
        }
        if !page.is_empty() {
            pages.push(page);
        }
        pages
    }

    fn page_content(&self, items: &[PageItem], number: usize, total: usize) -> Vec<u8> {
        let (width, _) = self.layout.page_size.dimensions();
        let left = self.layout.margin;
        let mut content = Content::new();

        for item in items {
            match item {
                PageItem::Text { style, text, y } => {
                    content.begin_text();
                    content.set_font(Self::font(*style), self.size(*style));
                    content.next_line(left, *y);
                    content.show(Str(&win_ansi(text)));
                    content.end_text();
                }
                PageItem::Rule { y } => {
                    content.set_line_width(0.75);
                    content.move_to(left, *y);
                    content.line_to(width - left, *y);
                    content.stroke();
                }
            }
        }

        let footer_size = self.layout.body_size * 0.8;
        let footer = format!("Page {number} of {total}");
        let footer_width = text_width(&footer, false, footer_size);
        content.begin_text();
        content.set_font(REGULAR_FONT, footer_size);
        content.next_line((width - footer_width) / 2.0, self.layout.margin / 2.0);
        content.show(Str(&win_ansi(&footer)));
        content.end_text();

        content.finish()
    }
}

impl DocumentRenderer for PdfRenderer {
    fn media_type(&self) -> &'static str {
        "application/pdf"
    }

    fn file_extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, report: &Report) -> Result<Vec<u8>, ReportError> {
        self.layout.validate().map_err(ReportError::Render)?;

        let pages = self.paginate(report);
        let total = pages.len();
        let page_count = i32::try_from(total)
            .map_err(|_| ReportError::Render(format!("too many pages: {total}")))?;

        let mut refs = RefAllocator::default();
        let catalog_id = refs.next();
        let tree_id = refs.next();
        let regular_id = refs.next();
        let bold_id = refs.next();
        let info_id = refs.next();
        let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (refs.next(), refs.next())).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(page_count);
        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.document_info(info_id)
            .title(TextStr(report.title()))
            .producer(TextStr(concat!("granulation-scaleup ", env!("CARGO_PKG_VERSION"))));

        let (width, height) = self.layout.page_size.dimensions();
        for (number, (items, (page_id, content_id))) in pages.iter().zip(&page_ids).enumerate() {
            {
                let mut page = pdf.page(*page_id);
                page.media_box(Rect::new(0.0, 0.0, width, height));
                page.parent(tree_id);
                page.contents(*content_id);
                page.resources()
                    .fonts()
                    .pair(REGULAR_FONT, regular_id)
                    .pair(BOLD_FONT, bold_id);
            }

            let content = self.page_content(items, number + 1, total);
            pdf.stream(*content_id, &content);
        }

        let bytes = pdf.finish();
        debug!(pages = total, bytes = bytes.len(), "Rendered PDF report");
        Ok(bytes)
    }
}

/// Hands out consecutive object ids starting at 1
#[derive(Debug, Default)]
struct RefAllocator(i32);

impl RefAllocator {
    fn next(&mut self) -> Ref {
        self.0 += 1;
        Ref::new(self.0)
    }
}

/// Encode text for the `WinAnsi` standard fonts
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => match c {
                '€' => 0x80,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                _ => b'?',
            },
        })
        .collect()
}

/// Greedy word wrap to `max_width` as reported by `measure`; words wider
/// than a line are split between characters
fn wrap(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().nth(1).is_some() && measure(&word) > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            // Longest prefix that fits, at least one character
            let split = word
                .char_indices()
                .skip(1)
                .map(|(i, _)| i)
                .take_while(|&end| measure(&word[..end]) <= max_width)
                .last()
                .unwrap_or_else(|| word.chars().next().map_or(0, char::len_utf8));
            let rest = word.split_off(split);
            lines.push(word);
            word = rest;
        }

        let candidate = if current.is_empty() {
            word.clone()
        } else {
            format!("{current} {word}")
        };
        if measure(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
