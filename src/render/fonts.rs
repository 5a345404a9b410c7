//! Standard-14 core fonts: family mapping, advance widths and WinAnsi encoding.
//!
//! The PDF backend draws with these fonts without embedding them, and the text layout shared by
//! all backends measures with their widths so that line breaks agree between formats.

/// Core font family a CSS family list resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoreFamily {
    /// Helvetica (Arial is metric-compatible).
    Helvetica,
    /// Times-Roman.
    Times,
    /// Courier (monospaced, 600 units per glyph).
    Courier,
}

/// A concrete core font face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoreFont {
    /// `Helvetica`
    Helvetica,
    /// `Helvetica-Bold`
    HelveticaBold,
    /// `Times-Roman`
    TimesRoman,
    /// `Times-Bold`
    TimesBold,
    /// `Courier`
    Courier,
    /// `Courier-Bold`
    CourierBold,
}

const FAMILY_TABLE: &[(&str, CoreFamily)] = &[
    ("arial", CoreFamily::Helvetica),
    ("helvetica", CoreFamily::Helvetica),
    ("helvetica neue", CoreFamily::Helvetica),
    ("inter", CoreFamily::Helvetica),
    ("roboto", CoreFamily::Helvetica),
    ("open sans", CoreFamily::Helvetica),
    ("verdana", CoreFamily::Helvetica),
    ("sans-serif", CoreFamily::Helvetica),
    ("system-ui", CoreFamily::Helvetica),
    ("times new roman", CoreFamily::Times),
    ("times", CoreFamily::Times),
    ("georgia", CoreFamily::Times),
    ("garamond", CoreFamily::Times),
    ("serif", CoreFamily::Times),
    ("courier new", CoreFamily::Courier),
    ("courier", CoreFamily::Courier),
    ("consolas", CoreFamily::Courier),
    ("menlo", CoreFamily::Courier),
    ("monaco", CoreFamily::Courier),
    ("monospace", CoreFamily::Courier),
];

/// Map a CSS `font-family` list to a core family.
///
/// Entries are tried in order (case-insensitive, quotes stripped); the first mapped one wins.
/// Unmapped lists resolve to Helvetica.
pub fn resolve_family(css_family: &str) -> CoreFamily {
    css_family
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .find_map(|name| {
            FAMILY_TABLE
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, fam)| *fam)
        })
        .unwrap_or(CoreFamily::Helvetica)
}

/// Resolve a CSS family list plus boldness to a core font face.
pub fn resolve_core_font(css_family: &str, bold: bool) -> CoreFont {
    match (resolve_family(css_family), bold) {
        (CoreFamily::Helvetica, false) => CoreFont::Helvetica,
        (CoreFamily::Helvetica, true) => CoreFont::HelveticaBold,
        (CoreFamily::Times, false) => CoreFont::TimesRoman,
        (CoreFamily::Times, true) => CoreFont::TimesBold,
        (CoreFamily::Courier, false) => CoreFont::Courier,
        (CoreFamily::Courier, true) => CoreFont::CourierBold,
    }
}

impl CoreFont {
    /// PostScript name used as the PDF `/BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }

    /// Advance width of `ch` in 1/1000 em.
    pub fn advance(self, ch: char) -> u16 {
        let (table, fallback) = match self {
            Self::Helvetica => (Some(&HELVETICA), 556),
            Self::HelveticaBold => (Some(&HELVETICA_BOLD), 556),
            Self::TimesRoman => (Some(&TIMES_ROMAN), 500),
            Self::TimesBold => (Some(&TIMES_BOLD), 500),
            Self::Courier | Self::CourierBold => (None, 600),
        };
        let code = ch as u32;
        match table {
            Some(t) if (32..=126).contains(&code) => t[(code - 32) as usize],
            _ => fallback,
        }
    }

    /// Width of `text` set at `font_size`.
    pub fn measure(self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(self.advance(if c == '\t' { ' ' } else { c })))
            .sum();
        f64::from(units) * font_size / 1000.0
    }
}

/// Encode `text` for a core font using WinAnsiEncoding. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        '\t' => b' ',
        ' '..='~' => ch as u8,
        '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => b'?',
    }
}

// Advance widths for U+0020..=U+007E from the Adobe core font AFM files.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

#[cfg(test)]
#[path = "../../tests/unit/render/fonts.rs"]
mod tests;
