//! Helvetica advance widths
//!
//! Taken from the standard Type 1 AFM files for the two faces the PDF
//! renderer uses. Units are 1/1000 em.

/// Printable ASCII `0x20..=0x7E` in `WinAnsi` code order
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

/// Anything without an entry is measured as wide as the widest glyphs
const FALLBACK_WIDTH: u16 = 1000;

/// Advance width of one character in 1/1000 em
pub(super) fn glyph_width(c: char, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    match c {
        ' '..='~' => table[c as usize - 0x20],
        '¹' | '²' | '³' => 333,
        '°' => 400,
        '×' => 584,
        'µ' if bold => 611,
        'µ' => 556,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` set at `size` points
pub(super) fn text_width(text: &str, bold: bool, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c, bold))).sum();
    units as f32 * size / 1000.0
}
