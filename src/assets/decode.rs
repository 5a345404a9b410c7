use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{SceneError, SceneResult};

/// A decoded image split into what a PDF image XObject needs.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGB8, tightly packed.
    pub rgb8: Vec<u8>,
    /// Row-major 8-bit alpha, present only when some pixel is not fully opaque.
    pub alpha8: Option<Vec<u8>>,
}

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP, ... or SVG) into straight RGB + alpha.
///
/// SVG sources are rasterized at `svg_size`, the pixel size they will be displayed at.
pub fn decode_image(bytes: &[u8], svg_size: (u32, u32)) -> SceneResult<DecodedImage> {
    let rgba = match image::load_from_memory(bytes) {
        Ok(img) => img.to_rgba8(),
        Err(raster_err) => {
            if !looks_like_svg(bytes) {
                return Err(SceneError::Other(
                    anyhow::Error::new(raster_err).context("decode image from memory"),
                ));
            }
            rasterize_svg_image(bytes, svg_size)?
        }
    };

    let (width, height) = rgba.dimensions();
    let pixels = rgba.into_raw();
    let mut rgb8 = Vec::with_capacity(pixels.len() / 4 * 3);
    let mut alpha8 = Vec::with_capacity(pixels.len() / 4);
    for px in pixels.chunks_exact(4) {
        rgb8.extend_from_slice(&px[..3]);
        alpha8.push(px[3]);
    }
    let alpha8 = alpha8.iter().any(|&a| a != 255).then_some(alpha8);

    Ok(DecodedImage {
        width,
        height,
        rgb8,
        alpha8,
    })
}

/// Map raw bytes to the image kind the SVG rasterizer understands.
///
/// Returns `None` for formats resvg cannot draw.
pub fn sniff_usvg_image(bytes: Vec<u8>, opts: &usvg::Options<'_>) -> Option<usvg::ImageKind> {
    match image::guess_format(&bytes) {
        Ok(image::ImageFormat::Png) => Some(usvg::ImageKind::PNG(Arc::new(bytes))),
        Ok(image::ImageFormat::Jpeg) => Some(usvg::ImageKind::JPEG(Arc::new(bytes))),
        Ok(image::ImageFormat::Gif) => Some(usvg::ImageKind::GIF(Arc::new(bytes))),
        Ok(image::ImageFormat::WebP) => Some(usvg::ImageKind::WEBP(Arc::new(bytes))),
        Ok(_) => None,
        Err(_) if looks_like_svg(&bytes) => usvg::Tree::from_data(&bytes, opts)
            .ok()
            .map(usvg::ImageKind::SVG),
        Err(_) => None,
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with('<') && head.contains("<svg")
}

/// Data URI resolver that picks the format from the bytes rather than the declared MIME type.
pub(crate) fn sniffing_data_resolver<'a>() -> usvg::ImageHrefDataResolverFn<'a> {
    Box::new(|_mime: &str, data: Arc<Vec<u8>>, opts: &usvg::Options<'_>| {
        sniff_usvg_image(Arc::unwrap_or_clone(data), opts)
    })
}

/// Parser options for SVG image sources: embedded data URIs only, no file or network access.
fn image_source_options() -> usvg::Options<'static> {
    usvg::Options {
        image_href_resolver: usvg::ImageHrefResolver {
            resolve_data: sniffing_data_resolver(),
            resolve_string: Box::new(|href: &str, _: &usvg::Options<'_>| {
                let href: String = href.chars().take(64).collect();
                tracing::warn!(%href, "refusing external reference inside svg image source");
                None
            }),
        },
        ..Default::default()
    }
}

fn rasterize_svg_image(bytes: &[u8], (width, height): (u32, u32)) -> SceneResult<image::RgbaImage> {
    let opts = image_source_options();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg image source")?;

    let (width, height) = (width.max(1), height.max(1));
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SceneError::render("failed to allocate svg image pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut data = pixmap.take();
    demultiply_rgba8_in_place(&mut data);
    image::RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| SceneError::render("svg image buffer size mismatch"))
}

/// Convert premultiplied RGBA8 (as produced by tiny-skia) back to straight alpha.
pub(crate) fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
