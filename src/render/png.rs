use std::{io::Cursor, path::Path, sync::Arc};

use anyhow::Context;
use resvg::tiny_skia;

use crate::{
    assets::{
        decode::{demultiply_rgba8_in_place, sniff_usvg_image, sniffing_data_resolver},
        fetch::{ImageFetcher, SourceKind, source_kind},
    },
    foundation::{
        config::RendererConfig,
        error::{SceneError, SceneResult},
    },
};

/// Largest bitmap side the PNG backend will allocate.
pub const MAX_RASTER_DIM: u32 = 16384;

/// Target bitmap size for a canvas at `scale`: `round(w * scale) x round(h * scale)`, at least 1.
pub fn target_size(width: f64, height: f64, scale: f64) -> SceneResult<(u32, u32)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(SceneError::validation(format!(
            "png scale must be finite and > 0, got {scale}"
        )));
    }
    let w = (width * scale).round().max(1.0);
    let h = (height * scale).round().max(1.0);
    let max = f64::from(MAX_RASTER_DIM);
    if w > max || h > max {
        return Err(SceneError::validation(format!(
            "png target {w}x{h} exceeds the {MAX_RASTER_DIM}px limit"
        )));
    }
    Ok((w as u32, h as u32))
}

/// Rasterize SVG markup into a `width x height` PNG.
///
/// The SVG canvas is fitted into the bitmap without distortion and centered. Any failure is
/// logged and replaced by a blank bitmap of the same size, so this only errors when even the
/// blank bitmap cannot be produced.
pub(crate) fn rasterize_to_png(
    svg: &str,
    (width, height): (u32, u32),
    transparent: bool,
    opts: &usvg::Options<'_>,
) -> SceneResult<Vec<u8>> {
    let pixmap = match rasterize(svg, (width, height), transparent, opts) {
        Ok(pixmap) => pixmap,
        Err(err) => {
            tracing::warn!(error = %err, width, height, "svg rasterization failed, emitting blank canvas");
            blank_pixmap((width, height), transparent)?
        }
    };
    encode_png(pixmap)
}

fn rasterize(
    svg: &str,
    target: (u32, u32),
    transparent: bool,
    opts: &usvg::Options<'_>,
) -> SceneResult<tiny_skia::Pixmap> {
    let tree = usvg::Tree::from_str(svg, opts).context("parse scene svg")?;
    let mut pixmap = blank_pixmap(target, transparent)?;

    let size = tree.size();
    let (tw, th) = (target.0 as f32, target.1 as f32);
    let scale = (tw / size.width()).min(th / size.height());
    let dx = (tw - size.width() * scale) / 2.0;
    let dy = (th - size.height() * scale) / 2.0;
    let transform = tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, dx, dy);

    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

fn blank_pixmap((width, height): (u32, u32), transparent: bool) -> SceneResult<tiny_skia::Pixmap> {
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SceneError::render(format!("failed to allocate {width}x{height} pixmap")))?;
    if !transparent {
        pixmap.fill(tiny_skia::Color::WHITE);
    }
    Ok(pixmap)
}

fn encode_png(pixmap: tiny_skia::Pixmap) -> SceneResult<Vec<u8>> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut data = pixmap.take();
    demultiply_rgba8_in_place(&mut data);
    let img = image::RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| SceneError::render("pixmap buffer size mismatch"))?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Build the rasterizer options: shared font database, font fallback and image resolution.
pub(crate) fn raster_options(
    fontdb: Arc<usvg::fontdb::Database>,
    fetcher: ImageFetcher,
) -> usvg::Options<'static> {
    usvg::Options {
        fontdb,
        font_resolver: make_font_resolver(),
        image_href_resolver: usvg::ImageHrefResolver {
            resolve_data: sniffing_data_resolver(),
            resolve_string: Box::new(move |href: &str, opts: &usvg::Options<'_>| {
                resolve_remote_href(&fetcher, href, opts)
            }),
        },
        ..Default::default()
    }
}

fn resolve_remote_href(
    fetcher: &ImageFetcher,
    href: &str,
    opts: &usvg::Options<'_>,
) -> Option<usvg::ImageKind> {
    if source_kind(href) != SourceKind::Remote {
        tracing::warn!(href = %truncate(href), "refusing non-http image reference");
        return None;
    }
    let bytes = match fetcher.fetch(href) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "image fetch failed, element not painted");
            return None;
        }
    };
    let kind = sniff_usvg_image(bytes, opts);
    if kind.is_none() {
        tracing::warn!(href = %truncate(href), "unsupported image format, element not painted");
    }
    kind
}

fn truncate(s: &str) -> String {
    s.chars().take(64).collect()
}

/// Font database seeded from system fonts (if enabled) and the configured font directories.
pub(crate) fn build_fontdb(config: &RendererConfig) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    if config.load_system_fonts {
        db.load_system_fonts();
    }
    for dir in &config.font_dirs {
        load_fonts_from_dir(&mut db, dir);
    }
    tracing::debug!(faces = db.len(), "font database ready");
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_font = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
            .unwrap_or(false);
        if is_font && let Err(err) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %err, "skipping unreadable font");
        }
    }
}

// Requested families first, then generic families, then whatever face exists.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::fontdb::{Family, Query, Stretch, Style, Weight};

    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families: Vec<Family<'_>> = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => Family::Serif,
                    usvg::FontFamily::SansSerif => Family::SansSerif,
                    usvg::FontFamily::Cursive => Family::Cursive,
                    usvg::FontFamily::Fantasy => Family::Fantasy,
                    usvg::FontFamily::Monospace => Family::Monospace,
                    usvg::FontFamily::Named(s) => Family::Name(s),
                })
                .collect();
            families.extend([Family::SansSerif, Family::Serif, Family::Monospace]);

            let style = match font.style() {
                usvg::FontStyle::Normal => Style::Normal,
                usvg::FontStyle::Italic => Style::Italic,
                usvg::FontStyle::Oblique => Style::Oblique,
            };

            let query = Query {
                families: &families,
                weight: Weight(font.weight()),
                stretch: Stretch::Normal,
                style,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/png.rs"]
mod tests;
