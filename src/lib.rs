//! Scenekit renders declarative scene documents to SVG, PNG and PDF.
//!
//! A [`SceneDocument`] is a canvas size plus an ordered list of elements (rectangles, circles,
//! text and images). The same document is projected onto three encodings:
//!
//! 1. **SVG**: [`render_to_svg`] writes markup directly, one node per element.
//! 2. **PNG**: [`render_to_png`] rasterizes that SVG with `resvg`, fitting the canvas into
//!    `round(width * scale) x round(height * scale)` pixels. Rasterization failures never reach
//!    the caller: the backend logs them and returns a blank canvas of the right size.
//! 3. **PDF**: [`render_to_pdf`] writes a single page with vector shapes, standard-14 fonts and
//!    embedded images.
//!
//! Element order is paint order in every backend. Colors are `#rrggbb` strings; anything else
//! paints black (see [`resolve_color`]). Text line breaking and placement are shared by all
//! backends (see [`layout_text`]).
//!
//! The free functions build a fresh [`Renderer`] from the environment on each call. Hold on to a
//! [`Renderer`] to reuse its font database and HTTP agent.
//!
//! # Design constraints
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical input yields identical SVG and PDF bytes.
//! - **No global state**: configuration is passed in or read from the environment per renderer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod render;
mod scene;

pub use assets::color::{Rgb8, resolve_color};
pub use assets::decode::{DecodedImage, decode_image};
pub use assets::fetch::{ImageFetcher, SourceKind, fetch_image_source, source_kind};
pub use foundation::config::{
    DEFAULT_FETCH_MAX_BYTES, DEFAULT_FETCH_TIMEOUT, FetchConfig, RendererConfig,
};
pub use foundation::error::{FetchError, SceneError, SceneResult};
pub use render::export::{Export, ExportFormat, ExportOptions};
pub use render::fonts::{CoreFamily, CoreFont, encode_win_ansi, resolve_core_font};
pub use render::png::MAX_RASTER_DIM;
pub use render::renderer::{
    DEFAULT_PNG_SCALE, PngOptions, Renderer, THUMBNAIL_SCALE, render_to_pdf, render_to_png,
    render_to_svg,
};
pub use render::svg::escape_xml;
pub use render::text::{LINE_HEIGHT_FACTOR, TextLayout, TextLine, layout_text};
pub use scene::model::{
    CircleElement, DEFAULT_FONT_FAMILY, DEFAULT_FONT_WEIGHT, ImageElement, RectElement,
    SceneDocument, SceneElement, TextAlign, TextElement,
};
