//! The booklet's body font: the PDF standard font Helvetica.
//!
//! Standard fonts are not embedded, so the advance widths from the Helvetica
//! AFM are kept here to measure text exactly. Text is written in
//! WinAnsiEncoding, which covers the German letters and quotes the stories use.
//! Anything outside it is replaced with `?` both when encoding and measuring,
//! so measurement always matches what ends up on the page.

use crate::units::Pt;

/// PostScript name of the font, as written into the PDF.
pub const BASE_FONT: &[u8] = b"Helvetica";

/// Resource name the font is registered under on every page.
pub const RESOURCE_NAME: &[u8] = b"F1";

const REPLACEMENT: u8 = b'?';

/// Advance widths (1/1000 em) for WinAnsi codes 0x20..=0x7E.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Advance widths (1/1000 em) for WinAnsi codes 0x80..=0x9F; 0 marks unused codes.
const WINANSI_HIGH_WIDTHS: [u16; 32] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 0x80
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667, // 0x90
];

/// Advance widths (1/1000 em) for WinAnsi codes 0xA0..=0xFF (Latin-1).
const LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

/// Map a character to its WinAnsiEncoding byte.
fn winansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => {
            let byte = match c {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '†' => 0x86,
                '‡' => 0x87,
                'ˆ' => 0x88,
                '‰' => 0x89,
                'Š' => 0x8A,
                '‹' => 0x8B,
                'Œ' => 0x8C,
                'Ž' => 0x8E,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '˜' => 0x98,
                '™' => 0x99,
                'š' => 0x9A,
                '›' => 0x9B,
                'œ' => 0x9C,
                'ž' => 0x9E,
                'Ÿ' => 0x9F,
                _ => return None,
            };
            Some(byte)
        }
    }
}

/// Encode text for a `Tj` operator in WinAnsiEncoding.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| winansi_byte(c).unwrap_or(REPLACEMENT))
        .collect()
}

fn glyph_width(byte: u8) -> u16 {
    match byte {
        0x20..=0x7E => ASCII_WIDTHS[(byte - 0x20) as usize],
        0x80..=0x9F => WINANSI_HIGH_WIDTHS[(byte - 0x80) as usize],
        0xA0..=0xFF => LATIN1_WIDTHS[(byte - 0xA0) as usize],
        _ => 0,
    }
}

/// Exact rendered width of `text` set in Helvetica at `size`.
pub fn width_of_text(text: &str, size: Pt) -> Pt {
    let units: u32 = encode(text)
        .into_iter()
        .map(|byte| glyph_width(byte) as u32)
        .sum();
    Pt(units as f32 * size.0 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_measure_ascii() {
        // H e l l o = 722 + 556 + 222 + 222 + 556
        let width = width_of_text("Hello", Pt(10.0));
        assert!((width.0 - 22.78).abs() < 1e-4);
        assert_eq!(width_of_text("", Pt(12.0)), Pt(0.0));
    }

    #[test]
    fn can_encode_german_text() {
        assert_eq!(encode("Bär"), vec![b'B', 0xE4, b'r']);
        assert_eq!(encode("„Hallo“"), vec![0x84, b'H', b'a', b'l', b'l', b'o', 0x93]);
        assert_eq!(encode("ß"), vec![0xDF]);
    }

    #[test]
    fn unknown_characters_measure_as_replacement() {
        assert_eq!(encode("🦊"), vec![b'?']);
        assert_eq!(width_of_text("🦊", Pt(12.0)), width_of_text("?", Pt(12.0)));
    }

    #[test]
    fn umlauts_have_base_letter_widths() {
        let size = Pt(12.0);
        assert_eq!(width_of_text("ä", size), width_of_text("a", size));
        assert_eq!(width_of_text("Ö", size), width_of_text("O", size));
        assert_eq!(width_of_text("ü", size), width_of_text("u", size));
    }
}
