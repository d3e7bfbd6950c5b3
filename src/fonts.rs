use crate::canvas::FontStyle;

pub(crate) struct FontEntry {
    pub(crate) pdf_name: &'static str,
    pub(crate) base_font: &'static str,
    pub(crate) widths_1000: Vec<f32>,
}

impl FontEntry {
    fn new(style: FontStyle) -> Self {
        match style {
            FontStyle::Regular => FontEntry {
                pdf_name: "F1",
                base_font: "Helvetica",
                widths_1000: helvetica_widths(),
            },
            FontStyle::Bold => FontEntry {
                pdf_name: "F2",
                base_font: "Helvetica-Bold",
                widths_1000: helvetica_bold_widths(),
            },
            FontStyle::Mono => FontEntry {
                pdf_name: "F3",
                base_font: "Courier",
                widths_1000: vec![600.0; 224],
            },
        }
    }

    /// Width of a single character in 1000-units, measured as the WinAnsi byte
    /// it will be encoded to.
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch).unwrap_or(b'?');
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    /// Width in points.
    pub(crate) fn word_width(&self, word: &str, font_size: f32) -> f32 {
        word.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(&self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }
}

/// The three standard Type1 faces every report uses.
pub(crate) struct FontSet {
    regular: FontEntry,
    bold: FontEntry,
    mono: FontEntry,
}

impl FontSet {
    pub(crate) fn standard() -> Self {
        FontSet {
            regular: FontEntry::new(FontStyle::Regular),
            bold: FontEntry::new(FontStyle::Bold),
            mono: FontEntry::new(FontStyle::Mono),
        }
    }

    pub(crate) fn get(&self, style: FontStyle) -> &FontEntry {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Mono => &self.mono,
        }
    }

    pub(crate) fn all(&self) -> [&FontEntry; 3] {
        [&self.regular, &self.bold, &self.mono]
    }
}

/// Map a single Unicode char to its WinAnsi (Windows-1252) byte.
fn char_to_winansi(c: char) -> Option<u8> {
    match c as u32 {
        0x0020..=0x007E => Some(c as u8),
        0x00A0..=0x00FF => Some(c as u8),
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95), // bullet
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

/// Convert a UTF-8 string to WinAnsi bytes for PDF Str encoding. Characters
/// the base fonts cannot show become `?`.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    let mut replaced = 0usize;
    let bytes = s
        .chars()
        .filter(|&c| c != '\t' && c != '\r' && c != '\n')
        .map(|c| {
            char_to_winansi(c).unwrap_or_else(|| {
                replaced += 1;
                b'?'
            })
        })
        .collect();
    if replaced > 0 {
        log::warn!("{replaced} character(s) not encodable in WinAnsi replaced with '?'");
    }
    bytes
}

/// Helvetica AFM widths for printable ASCII; Latin-1 and the 0x80 block fall
/// back to an average glyph width.
fn helvetica_widths() -> Vec<f32> {
    const ASCII: [f32; 95] = [
        278.0, 278.0, 355.0, 556.0, 556.0, 889.0, 667.0, 191.0, 333.0, 333.0, // sp ! " # $ % & ' ( )
        389.0, 584.0, 278.0, 333.0, 278.0, 278.0, 556.0, 556.0, 556.0, 556.0, // * + , - . / 0-3
        556.0, 556.0, 556.0, 556.0, 556.0, 556.0, 278.0, 278.0, 584.0, 584.0, // 4-9 : ; < =
        584.0, 556.0, 1015.0, 667.0, 667.0, 722.0, 722.0, 667.0, 611.0, 778.0, // > ? @ A-G
        722.0, 278.0, 500.0, 667.0, 556.0, 833.0, 722.0, 778.0, 667.0, 778.0, // H-Q
        722.0, 667.0, 611.0, 722.0, 667.0, 944.0, 667.0, 667.0, 611.0, 278.0, // R-Z [
        278.0, 278.0, 469.0, 556.0, 333.0, 556.0, 556.0, 500.0, 556.0, 556.0, // \ ] ^ _ ` a-e
        278.0, 556.0, 556.0, 222.0, 222.0, 500.0, 222.0, 833.0, 556.0, 556.0, // f-o
        556.0, 556.0, 333.0, 500.0, 278.0, 556.0, 500.0, 722.0, 500.0, 500.0, // p-y
        500.0, 334.0, 260.0, 334.0, 584.0, // z { | } ~
    ];
    extend_to_winansi(&ASCII, 556.0)
}

fn helvetica_bold_widths() -> Vec<f32> {
    const ASCII: [f32; 95] = [
        278.0, 333.0, 474.0, 556.0, 556.0, 889.0, 722.0, 238.0, 333.0, 333.0, // sp ! " # $ % & ' ( )
        389.0, 584.0, 278.0, 333.0, 278.0, 278.0, 556.0, 556.0, 556.0, 556.0, // * + , - . / 0-3
        556.0, 556.0, 556.0, 556.0, 556.0, 556.0, 333.0, 333.0, 584.0, 584.0, // 4-9 : ; < =
        584.0, 611.0, 975.0, 722.0, 722.0, 722.0, 722.0, 667.0, 611.0, 778.0, // > ? @ A-G
        722.0, 278.0, 556.0, 722.0, 611.0, 833.0, 722.0, 778.0, 667.0, 778.0, // H-Q
        722.0, 667.0, 611.0, 722.0, 667.0, 944.0, 667.0, 667.0, 611.0, 333.0, // R-Z [
        278.0, 333.0, 584.0, 556.0, 333.0, 556.0, 611.0, 556.0, 611.0, 556.0, // \ ] ^ _ ` a-e
        333.0, 611.0, 611.0, 278.0, 278.0, 556.0, 278.0, 889.0, 611.0, 611.0, // f-o
        611.0, 611.0, 389.0, 556.0, 333.0, 611.0, 556.0, 778.0, 556.0, 556.0, // p-y
        500.0, 389.0, 280.0, 389.0, 584.0, // z { | } ~
    ];
    extend_to_winansi(&ASCII, 611.0)
}

/// Widths indexed by WinAnsi byte - 32, covering 32..=255.
fn extend_to_winansi(ascii: &[f32; 95], fallback: f32) -> Vec<f32> {
    (32u8..=255u8)
        .map(|b| match b {
            32..=126 => ascii[(b - 32) as usize],
            160 => ascii[0], // nbsp
            _ => fallback,
        })
        .collect()
}
