use crate::{
    render::fonts::{CoreFont, resolve_core_font},
    scene::model::{TextAlign, TextElement},
};

/// Distance between consecutive baselines, as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// One laid-out line of a text element.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    /// Line content.
    pub text: String,
    /// Measured width with the element's core font.
    pub width: f64,
    /// Left edge of the line after alignment.
    pub left: f64,
    /// Baseline y, top-left canvas coordinates.
    pub baseline: f64,
}

/// Backend-independent layout of a [`TextElement`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayout {
    /// Core font used for measuring (and drawing, in PDF).
    pub font: CoreFont,
    /// Anchor x after the `offsetX` centering correction.
    pub anchor_x: f64,
    /// Lines in drawing order.
    pub lines: Vec<TextLine>,
}

/// Lay out a text element.
///
/// - `\n` always starts a new line.
/// - With a positive `width`, every line is greedily word-wrapped to it; a word wider than the
///   box is split between characters.
/// - Line `i` has its baseline at `y + font_size + i * font_size * LINE_HEIGHT_FACTOR`.
/// - `left`/`center`/`right` place each line relative to [`TextElement::anchor_x`].
pub fn layout_text(el: &TextElement) -> TextLayout {
    let font = resolve_core_font(el.font_family(), el.is_bold());
    let size = el.font_size;
    let anchor_x = el.anchor_x();
    let measure = |s: &str| font.measure(s, size);

    let raw_lines: Vec<String> = match el.width.filter(|w| *w > 0.0) {
        Some(max) => el
            .content
            .split('\n')
            .flat_map(|line| wrap_line(line, max, &measure))
            .collect(),
        None => el.content.split('\n').map(str::to_string).collect(),
    };

    let advance = size * LINE_HEIGHT_FACTOR;
    let lines = raw_lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let text = text.trim_end_matches('\r').to_string();
            let width = measure(&text);
            let left = match el.align() {
                TextAlign::Left => anchor_x,
                TextAlign::Center => anchor_x - width / 2.0,
                TextAlign::Right => anchor_x - width,
            };
            TextLine {
                text,
                width,
                left,
                baseline: el.y + size + (i as f64) * advance,
            }
        })
        .collect();

    TextLayout {
        font,
        anchor_x,
        lines,
    }
}

fn wrap_line(line: &str, max: f64, measure: &impl Fn(&str) -> f64) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure(&candidate) <= max {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if measure(word) <= max {
            current = word.to_string();
            continue;
        }

        let mut pieces = split_word(word, max, measure);
        current = pieces.pop().unwrap_or_default();
        out.extend(pieces);
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Break a single over-wide word into chunks that fit, at least one char per chunk.
fn split_word(word: &str, max: f64, measure: &impl Fn(&str) -> f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut chunk = String::new();
    for ch in word.chars() {
        chunk.push(ch);
        if measure(&chunk) > max && chunk.chars().count() > 1 {
            chunk.pop();
            pieces.push(std::mem::take(&mut chunk));
            chunk.push(ch);
        }
    }
    if !chunk.is_empty() {
        pieces.push(chunk);
    }
    pieces
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
