use std::sync::{Arc, OnceLock};

use crate::{
    assets::fetch::ImageFetcher,
    foundation::{config::RendererConfig, error::SceneResult},
    render::{
        export::{Export, ExportFormat, ExportOptions},
        pdf::build_pdf,
        png::{build_fontdb, raster_options, rasterize_to_png, target_size},
        svg::build_svg,
    },
    scene::model::SceneDocument,
};

/// Default PNG scale factor (2x, for high-DPI output).
pub const DEFAULT_PNG_SCALE: f64 = 2.0;

/// Scale used by [`Renderer::thumbnail`].
pub const THUMBNAIL_SCALE: f64 = 0.25;

/// Options for PNG rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PngOptions {
    /// Leave the background fully transparent instead of opaque white.
    pub transparent: bool,
}

/// Renders scene documents to SVG, PNG and PDF.
///
/// A renderer owns the image fetcher and the rasterizer font database built from
/// [`RendererConfig`]. Fonts are loaded on the first PNG render and reused afterwards; the SVG
/// and PDF backends never touch them. A renderer can be shared across threads.
#[derive(Clone)]
pub struct Renderer {
    config: RendererConfig,
    fetcher: ImageFetcher,
    fontdb: OnceLock<Arc<usvg::fontdb::Database>>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("font_faces", &self.fontdb.get().map(|db| db.len()))
            .finish()
    }
}

impl Renderer {
    /// Build a renderer. Font loading is deferred to the first PNG render.
    pub fn new(config: RendererConfig) -> Self {
        let fetcher = ImageFetcher::new(&config.fetch);
        Self {
            config,
            fetcher,
            fontdb: OnceLock::new(),
        }
    }

    /// Renderer configured from `SCENEKIT_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(RendererConfig::from_env())
    }

    /// Configuration this renderer was built with.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        self.fontdb
            .get_or_init(|| build_fontdb(&self.config))
            .clone()
    }

    /// Render to SVG markup.
    #[tracing::instrument(skip(self, scene), fields(elements = scene.elements.len()))]
    pub fn render_svg(&self, scene: &SceneDocument) -> SceneResult<String> {
        scene.validate()?;
        Ok(build_svg(scene))
    }

    /// Render to PNG bytes of exactly `round(width * scale) x round(height * scale)` pixels.
    ///
    /// Returns [`SceneError::Validation`](crate::SceneError::Validation) when the scene is
    /// invalid, when `scale` is not finite and positive, or when either bitmap side would exceed
    /// [`MAX_RASTER_DIM`](crate::MAX_RASTER_DIM) pixels. Every other failure is logged and yields
    /// a blank canvas of the requested size.
    #[tracing::instrument(skip(self, scene), fields(elements = scene.elements.len()))]
    pub fn render_png(
        &self,
        scene: &SceneDocument,
        scale: f64,
        opts: &PngOptions,
    ) -> SceneResult<Vec<u8>> {
        scene.validate()?;
        let target = target_size(scene.width, scene.height, scale)?;
        let svg = build_svg(scene);
        let raster_opts = raster_options(self.fontdb(), self.fetcher.clone());
        let png = rasterize_to_png(&svg, target, opts.transparent, &raster_opts)?;
        tracing::debug!(width = target.0, height = target.1, bytes = png.len(), "png rendered");
        Ok(png)
    }

    /// Render to a single-page PDF.
    #[tracing::instrument(skip(self, scene), fields(elements = scene.elements.len()))]
    pub fn render_pdf(&self, scene: &SceneDocument) -> SceneResult<Vec<u8>> {
        scene.validate()?;
        build_pdf(scene, &self.fetcher)
    }

    /// Render to any format, wrapped for transport.
    pub fn export(
        &self,
        scene: &SceneDocument,
        format: ExportFormat,
        opts: &ExportOptions,
    ) -> SceneResult<Export> {
        let bytes = match format {
            ExportFormat::Svg => self.render_svg(scene)?.into_bytes(),
            ExportFormat::Png => self.render_png(
                scene,
                opts.scale,
                &PngOptions {
                    transparent: opts.transparent,
                },
            )?,
            ExportFormat::Pdf => self.render_pdf(scene)?,
        };
        Ok(Export { format, bytes })
    }

    /// Small opaque PNG preview at [`THUMBNAIL_SCALE`].
    pub fn thumbnail(&self, scene: &SceneDocument) -> SceneResult<Vec<u8>> {
        self.render_png(scene, THUMBNAIL_SCALE, &PngOptions::default())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

/// Render a scene to SVG markup using environment configuration.
pub fn render_to_svg(scene: &SceneDocument) -> SceneResult<String> {
    Renderer::from_env().render_svg(scene)
}

/// Render a scene to PNG bytes using environment configuration.
///
/// See [`Renderer::render_png`]; [`DEFAULT_PNG_SCALE`] is the conventional `scale`.
///
/// # Errors
///
/// [`SceneError::Validation`](crate::SceneError::Validation) for an invalid scene, a `scale`
/// that is not finite and positive, or a target bitmap wider or taller than
/// [`MAX_RASTER_DIM`](crate::MAX_RASTER_DIM) pixels. At the default scale, canvases larger than
/// 8192 units on a side are rejected rather than rasterized.
pub fn render_to_png(scene: &SceneDocument, scale: f64, opts: &PngOptions) -> SceneResult<Vec<u8>> {
    Renderer::from_env().render_png(scene, scale, opts)
}

/// Render a scene to PDF bytes using environment configuration.
pub fn render_to_pdf(scene: &SceneDocument) -> SceneResult<Vec<u8>> {
    Renderer::from_env().render_pdf(scene)
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
