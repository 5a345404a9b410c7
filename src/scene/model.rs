use serde::Deserialize;

use crate::foundation::error::{SceneError, SceneResult};

/// Font family used when a text element does not name one.
pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";

/// Font weight used when a text element does not name one.
pub const DEFAULT_FONT_WEIGHT: &str = "normal";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A fixed-size canvas plus an ordered list of drawable elements.
///
/// A scene document is pure data: it is built elsewhere (templates, generation, the editor),
/// handed to one of the render entry points and never mutated by them.
///
/// `elements` is the paint order: later elements are drawn over earlier ones. Elements may
/// overlap or extend past the canvas; no backend clips them.
pub struct SceneDocument {
    /// Canvas width in render units (PDF points, SVG user units, PNG pixels at scale 1).
    pub width: f64,
    /// Canvas height in render units.
    pub height: f64,
    /// Drawable elements in paint order.
    #[serde(default)]
    pub elements: Vec<SceneElement>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// One drawable primitive. All variants are positioned by their top-left `x`,`y`.
pub enum SceneElement {
    /// Filled, optionally rounded rectangle.
    Rect(RectElement),
    /// Filled circle; `x`,`y` is the top-left of its bounding box.
    Circle(CircleElement),
    /// A run of text.
    Text(TextElement),
    /// A raster or vector image referenced by URL or data URI.
    Image(ImageElement),
    /// Any element `type` this crate does not know. Every backend skips it.
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Filled rectangle.
pub struct RectElement {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// CSS color string (`#rrggbb` expected).
    pub fill: String,
    /// Corner radius, `0` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    /// Opacity in `[0, 1]`, `1` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Filled circle.
pub struct CircleElement {
    /// Left edge of the bounding box.
    pub x: f64,
    /// Top edge of the bounding box.
    pub y: f64,
    /// Radius.
    pub radius: f64,
    /// CSS color string (`#rrggbb` expected).
    pub fill: String,
    /// Opacity in `[0, 1]`, `1` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Horizontal alignment of a text run relative to its anchor.
pub enum TextAlign {
    /// Text starts at the anchor.
    #[default]
    Left,
    /// Text is centered on the anchor.
    Center,
    /// Text ends at the anchor.
    Right,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A text run.
pub struct TextElement {
    /// Anchor x before alignment.
    pub x: f64,
    /// Top of the first line.
    pub y: f64,
    /// Text to draw. `\n` starts a new line.
    pub content: String,
    /// Font size in render units.
    pub font_size: f64,
    /// CSS font weight (`normal`, `bold`, `600`, ...).
    #[serde(
        default,
        deserialize_with = "de_font_weight",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_weight: Option<String>,
    /// CSS font family list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// CSS color string (`#rrggbb` expected).
    pub fill: String,
    /// Alignment around the anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    /// Caller-measured text width; centered text is shifted left by half of it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    /// Wrap width. Lines are broken so that none exceeds it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// An image stretched into its box.
pub struct ImageElement {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// `http(s)` URL or `data:` URI.
    pub src: String,
}

fn de_font_weight<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Name(String),
        Number(f64),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.map(|r| match r {
        Repr::Name(s) => s,
        Repr::Number(n) => format!("{n}"),
    }))
}

fn clamp_opacity(opacity: Option<f64>) -> f64 {
    opacity.unwrap_or(1.0).clamp(0.0, 1.0)
}

impl RectElement {
    /// Opacity clamped to `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        clamp_opacity(self.opacity)
    }

    /// Corner radius, never negative.
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius.unwrap_or(0.0).max(0.0)
    }
}

impl CircleElement {
    /// Opacity clamped to `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        clamp_opacity(self.opacity)
    }

    /// Circle center: the bounding-box origin shifted by the radius.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.radius, self.y + self.radius)
    }
}

impl TextElement {
    /// Alignment, `left` when absent.
    pub fn align(&self) -> TextAlign {
        self.align.unwrap_or_default()
    }

    /// Font weight, [`DEFAULT_FONT_WEIGHT`] when absent.
    pub fn font_weight(&self) -> &str {
        self.font_weight.as_deref().unwrap_or(DEFAULT_FONT_WEIGHT)
    }

    /// Font family list, [`DEFAULT_FONT_FAMILY`] when absent.
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    /// Whether the weight selects a bold face (`bold`, `bolder` or numeric `>= 600`).
    pub fn is_bold(&self) -> bool {
        let w = self.font_weight().trim();
        if w.eq_ignore_ascii_case("bold") || w.eq_ignore_ascii_case("bolder") {
            return true;
        }
        w.parse::<f64>().map(|n| n >= 600.0).unwrap_or(false)
    }

    /// Horizontal anchor after the `offsetX` centering correction.
    ///
    /// Only centered text with an `offset_x` is shifted (left by half of it).
    pub fn anchor_x(&self) -> f64 {
        match (self.align(), self.offset_x) {
            (TextAlign::Center, Some(offset)) => self.x - offset / 2.0,
            _ => self.x,
        }
    }
}

impl SceneElement {
    /// Lowercase element type tag, as written in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rect(_) => "rect",
            Self::Circle(_) => "circle",
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Unknown => "unknown",
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Self::Rect(r) => {
                finite(&[("x", r.x), ("y", r.y)])?;
                non_negative(&[("width", r.width), ("height", r.height)])?;
                finite_opt(&[("cornerRadius", r.corner_radius), ("opacity", r.opacity)])
            }
            Self::Circle(c) => {
                finite(&[("x", c.x), ("y", c.y)])?;
                non_negative(&[("radius", c.radius)])?;
                finite_opt(&[("opacity", c.opacity)])
            }
            Self::Text(t) => {
                finite(&[("x", t.x), ("y", t.y)])?;
                non_negative(&[("fontSize", t.font_size)])?;
                if let Some(w) = t.width {
                    non_negative(&[("width", w)])?;
                }
                finite_opt(&[("offsetX", t.offset_x)])
            }
            Self::Image(i) => {
                finite(&[("x", i.x), ("y", i.y)])?;
                non_negative(&[("width", i.width), ("height", i.height)])
            }
            Self::Unknown => Ok(()),
        }
    }
}

fn finite(fields: &[(&str, f64)]) -> Result<(), String> {
    for (name, v) in fields {
        if !v.is_finite() {
            return Err(format!("{name} must be finite"));
        }
    }
    Ok(())
}

fn finite_opt(fields: &[(&str, Option<f64>)]) -> Result<(), String> {
    for (name, v) in fields {
        if let Some(v) = v
            && !v.is_finite()
        {
            return Err(format!("{name} must be finite"));
        }
    }
    Ok(())
}

fn non_negative(fields: &[(&str, f64)]) -> Result<(), String> {
    for (name, v) in fields {
        if !v.is_finite() || *v < 0.0 {
            return Err(format!("{name} must be finite and >= 0"));
        }
    }
    Ok(())
}

impl SceneDocument {
    /// Empty scene of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Append an element on top of the current ones.
    pub fn push(&mut self, element: SceneElement) -> &mut Self {
        self.elements.push(element);
        self
    }

    /// Reject documents no backend can render meaningfully.
    ///
    /// Canvas dimensions must be finite and positive; element geometry must be finite with
    /// non-negative sizes. Colors and image sources are not checked here.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(SceneError::validation("canvas width/height must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SceneError::validation("canvas width/height must be > 0"));
        }
        for (idx, el) in self.elements.iter().enumerate() {
            el.validate().map_err(|msg| {
                SceneError::validation(format!("element {idx} ({}): {msg}", el.kind()))
            })?;
        }
        Ok(())
    }

    /// Parse a scene document from JSON.
    pub fn from_json(s: &str) -> SceneResult<Self> {
        serde_json::from_str(s).map_err(|e| SceneError::serde(format!("parse scene JSON: {e}")))
    }

    /// Serialize the scene document to pretty JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SceneError::serde(format!("serialize scene JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
