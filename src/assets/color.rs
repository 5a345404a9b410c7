/// An opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Black, the fallback for anything that does not parse.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels normalized to `[0, 1]`.
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

/// Resolve a `#rrggbb` / `rrggbb` color string into RGB components.
///
/// Never fails: anything other than exactly six hex digits (after an optional `#` and
/// surrounding whitespace) resolves to [`Rgb8::BLACK`].
pub fn resolve_color(s: &str) -> Rgb8 {
    parse_hex6(s).unwrap_or(Rgb8::BLACK)
}

fn parse_hex6(s: &str) -> Option<Rgb8> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&s[range], 16).ok();
    Some(Rgb8::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
