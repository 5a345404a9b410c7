use base64::Engine as _;

use crate::render::renderer::DEFAULT_PNG_SCALE;

/// Output encodings a scene can be exported to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// SVG markup.
    Svg,
    /// PNG bitmap.
    Png,
    /// Single-page PDF.
    Pdf,
}

impl ExportFormat {
    /// MIME type of the encoded output.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
            Self::Pdf => "application/pdf",
        }
    }

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }

    /// Format for a file extension (case-insensitive), if known.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Format-specific knobs for [`crate::Renderer::export`]. Only PNG reads them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportOptions {
    /// PNG scale factor.
    pub scale: f64,
    /// Transparent PNG background.
    pub transparent: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_PNG_SCALE,
            transparent: false,
        }
    }
}

/// Rendered output together with its format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    /// Encoding of `bytes`.
    pub format: ExportFormat,
    /// Encoded document.
    pub bytes: Vec<u8>,
}

impl Export {
    /// Standard base64 of the bytes.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// `data:` URI suitable for inline transport.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.content_type(),
            self.to_base64()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
