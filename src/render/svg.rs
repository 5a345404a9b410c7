use crate::{
    render::text::layout_text,
    scene::model::{
        CircleElement, ImageElement, RectElement, SceneDocument, SceneElement, TextAlign,
        TextElement,
    },
};

/// Serialize a scene to a standalone SVG document.
///
/// Colors and image references are written as given; resolving them is left to whatever consumes
/// the SVG. All attribute values and text content are XML-escaped.
pub fn build_svg(scene: &SceneDocument) -> String {
    let w = fmt_num(scene.width);
    let h = fmt_num(scene.height);

    let mut out = String::with_capacity(160 + scene.elements.len() * 128);
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    ));
    for el in &scene.elements {
        match el {
            SceneElement::Rect(r) => push_rect(&mut out, r),
            SceneElement::Circle(c) => push_circle(&mut out, c),
            SceneElement::Text(t) => push_text(&mut out, t),
            SceneElement::Image(i) => push_image(&mut out, i),
            SceneElement::Unknown => {}
        }
    }
    out.push_str("</svg>");
    out
}

fn push_rect(out: &mut String, r: &RectElement) {
    out.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" rx="{}" opacity="{}"/>"#,
        fmt_num(r.x),
        fmt_num(r.y),
        fmt_num(r.width),
        fmt_num(r.height),
        escape_xml(&r.fill),
        fmt_num(r.corner_radius()),
        fmt_num(r.opacity()),
    ));
}

fn push_circle(out: &mut String, c: &CircleElement) {
    let (cx, cy) = c.center();
    out.push_str(&format!(
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}" opacity="{}"/>"#,
        fmt_num(cx),
        fmt_num(cy),
        fmt_num(c.radius),
        escape_xml(&c.fill),
        fmt_num(c.opacity()),
    ));
}

fn push_text(out: &mut String, t: &TextElement) {
    let layout = layout_text(t);
    let anchor = match t.align() {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    };
    let x = fmt_num(layout.anchor_x);
    let first_baseline = layout
        .lines
        .first()
        .map(|l| l.baseline)
        .unwrap_or(t.y + t.font_size);

    out.push_str(&format!(
        r#"<text x="{x}" y="{}" font-size="{}" font-weight="{}" font-family="{}" fill="{}" text-anchor="{anchor}">"#,
        fmt_num(first_baseline),
        fmt_num(t.font_size),
        escape_xml(t.font_weight()),
        escape_xml(t.font_family()),
        escape_xml(&t.fill),
    ));
    match layout.lines.as_slice() {
        [single] => out.push_str(&escape_xml(&single.text)),
        lines => {
            for line in lines {
                out.push_str(&format!(
                    r#"<tspan x="{x}" y="{}">{}</tspan>"#,
                    fmt_num(line.baseline),
                    escape_xml(&line.text),
                ));
            }
        }
    }
    out.push_str("</text>");
}

fn push_image(out: &mut String, i: &ImageElement) {
    out.push_str(&format!(
        r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none" href="{}"/>"#,
        fmt_num(i.x),
        fmt_num(i.y),
        fmt_num(i.width),
        fmt_num(i.height),
        escape_xml(&i.src),
    ));
}

/// Format a coordinate with at most three decimals and no trailing zeros.
pub(crate) fn fmt_num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        "0".to_string()
    } else {
        format!("{r}")
    }
}

/// Escape the five XML special characters.
///
/// Characters XML 1.0 does not allow in a document (C0 controls other than tab, newline and
/// carriage return, plus U+FFFE and U+FFFF) are dropped.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c < ' ' || c == '\u{fffe}' || c == '\u{ffff}' => {}
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
