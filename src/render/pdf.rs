use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use rayon::prelude::*;

use crate::{
    assets::{
        color::resolve_color,
        decode::{DecodedImage, decode_image},
        fetch::ImageFetcher,
    },
    foundation::error::SceneResult,
    render::{
        fonts::{CoreFont, encode_win_ansi},
        png::MAX_RASTER_DIM,
        text::layout_text,
    },
    scene::model::{
        CircleElement, ImageElement, RectElement, SceneDocument, SceneElement, TextElement,
    },
};

// Control point distance for a quarter circle drawn with one cubic.
const KAPPA: f32 = 0.552_284_8;

// Flate level for image data.
const IMAGE_COMPRESSION: u8 = 6;

/// Render a scene to a single-page PDF.
///
/// The page is exactly `width x height` points. Scene coordinates are top-left based and flipped
/// onto PDF's bottom-left space. Text uses the standard-14 fonts; images are fetched up front in
/// parallel and drawn in element order. An image that cannot be fetched or decoded is skipped.
pub fn build_pdf(scene: &SceneDocument, fetcher: &ImageFetcher) -> SceneResult<Vec<u8>> {
    let images = prefetch_images(scene, fetcher);

    let mut refs = RefAlloc::default();
    let catalog_id = refs.bump();
    let page_tree_id = refs.bump();
    let page_id = refs.bump();
    let content_id = refs.bump();
    let info_id = refs.bump();

    let page_h = scene.height as f32;
    let mut res = PageResources::default();
    let mut content = Content::new();
    for (el, image) in scene.elements.iter().zip(&images) {
        match el {
            SceneElement::Rect(r) => draw_rect(&mut content, &mut res, &mut refs, r, page_h),
            SceneElement::Circle(c) => draw_circle(&mut content, &mut res, &mut refs, c, page_h),
            SceneElement::Text(t) => draw_text(&mut content, &mut res, &mut refs, t, page_h),
            SceneElement::Image(i) => {
                if let Some(decoded) = image {
                    draw_image(&mut content, &mut res, &mut refs, i, decoded, page_h);
                }
            }
            SceneElement::Unknown => {}
        }
    }
    let content = content.finish();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);
    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, scene.width as f32, page_h));
        page.parent(page_tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        if !res.fonts.is_empty() {
            let mut fonts = resources.fonts();
            for (i, (_, id)) in res.fonts.iter().enumerate() {
                fonts.pair(Name(font_name(i).as_bytes()), *id);
            }
        }
        if !res.states.is_empty() {
            let mut states = resources.ext_g_states();
            for (i, (_, id)) in res.states.iter().enumerate() {
                states.pair(Name(state_name(i).as_bytes()), *id);
            }
        }
        if !res.images.is_empty() {
            let mut objects = resources.x_objects();
            for (i, placed) in res.images.iter().enumerate() {
                objects.pair(Name(image_name(i).as_bytes()), placed.id);
            }
        }
    }
    pdf.stream(content_id, &content);

    for (font, id) in &res.fonts {
        pdf.type1_font(*id)
            .base_font(Name(font.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
    for (key, id) in &res.states {
        let alpha = *key as f32 / 1000.0;
        pdf.ext_graphics(*id)
            .non_stroking_alpha(alpha)
            .stroking_alpha(alpha);
    }
    for placed in &res.images {
        write_image(&mut pdf, placed);
    }
    pdf.document_info(info_id).producer(TextStr("scenekit"));

    let bytes = pdf.finish();
    tracing::debug!(
        elements = scene.elements.len(),
        images = res.images.len(),
        bytes = bytes.len(),
        "pdf rendered"
    );
    Ok(bytes)
}

/// Fetch and decode every image element, keyed by element position.
fn prefetch_images(scene: &SceneDocument, fetcher: &ImageFetcher) -> Vec<Option<DecodedImage>> {
    scene
        .elements
        .par_iter()
        .enumerate()
        .map(|(idx, el)| match el {
            SceneElement::Image(img) => load_image(fetcher, idx, img),
            _ => None,
        })
        .collect()
}

fn load_image(fetcher: &ImageFetcher, idx: usize, img: &ImageElement) -> Option<DecodedImage> {
    let bytes = match fetcher.fetch(&img.src) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(element = idx, error = %err, "image fetch failed, element skipped");
            return None;
        }
    };
    // Vector sources are rasterized at twice the box size.
    let svg_px = |v: f64| ((v * 2.0).ceil() as u32).clamp(1, MAX_RASTER_DIM);
    match decode_image(&bytes, (svg_px(img.width), svg_px(img.height))) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::warn!(element = idx, error = %err, "image decode failed, element skipped");
            None
        }
    }
}

#[derive(Default)]
struct RefAlloc {
    last: i32,
}

impl RefAlloc {
    fn bump(&mut self) -> Ref {
        self.last += 1;
        Ref::new(self.last)
    }
}

struct PlacedImage<'a> {
    image: &'a DecodedImage,
    id: Ref,
    mask_id: Option<Ref>,
}

/// Page resources collected while the content stream is written.
#[derive(Default)]
struct PageResources<'a> {
    fonts: Vec<(CoreFont, Ref)>,
    // Opacity in thousandths.
    states: Vec<(u32, Ref)>,
    images: Vec<PlacedImage<'a>>,
}

impl<'a> PageResources<'a> {
    fn font(&mut self, font: CoreFont, refs: &mut RefAlloc) -> String {
        let idx = match self.fonts.iter().position(|(f, _)| *f == font) {
            Some(idx) => idx,
            None => {
                self.fonts.push((font, refs.bump()));
                self.fonts.len() - 1
            }
        };
        font_name(idx)
    }

    fn opacity(&mut self, opacity: f64, refs: &mut RefAlloc) -> Option<String> {
        let key = (opacity.clamp(0.0, 1.0) * 1000.0).round() as u32;
        if key >= 1000 {
            return None;
        }
        let idx = match self.states.iter().position(|(k, _)| *k == key) {
            Some(idx) => idx,
            None => {
                self.states.push((key, refs.bump()));
                self.states.len() - 1
            }
        };
        Some(state_name(idx))
    }

    fn image(&mut self, image: &'a DecodedImage, refs: &mut RefAlloc) -> String {
        let id = refs.bump();
        let mask_id = image.alpha8.as_ref().map(|_| refs.bump());
        self.images.push(PlacedImage { image, id, mask_id });
        image_name(self.images.len() - 1)
    }
}

fn font_name(idx: usize) -> String {
    format!("F{}", idx + 1)
}

fn state_name(idx: usize) -> String {
    format!("GS{}", idx + 1)
}

fn image_name(idx: usize) -> String {
    format!("Im{}", idx + 1)
}

fn begin_paint(content: &mut Content, state: Option<String>, fill: &str) {
    content.save_state();
    if let Some(state) = state {
        content.set_parameters(Name(state.as_bytes()));
    }
    let [r, g, b] = resolve_color(fill).to_unit();
    content.set_fill_rgb(r, g, b);
}

fn draw_rect(
    content: &mut Content,
    res: &mut PageResources<'_>,
    refs: &mut RefAlloc,
    r: &RectElement,
    page_h: f32,
) {
    let state = res.opacity(r.opacity(), refs);
    begin_paint(content, state, &r.fill);

    let (x, w, h) = (r.x as f32, r.width as f32, r.height as f32);
    let y = page_h - r.y as f32 - h;
    let radius = (r.corner_radius() as f32).min(w / 2.0).min(h / 2.0);
    if radius > 0.0 {
        rounded_rect_path(content, x, y, w, h, radius);
    } else {
        content.rect(x, y, w, h);
    }
    content.fill_nonzero();
    content.restore_state();
}

// (x, y) is the bottom-left corner in PDF space.
fn rounded_rect_path(content: &mut Content, x: f32, y: f32, w: f32, h: f32, r: f32) {
    let k = r * KAPPA;
    let (x1, y1) = (x + w, y + h);
    content.move_to(x + r, y);
    content.line_to(x1 - r, y);
    content.cubic_to(x1 - r + k, y, x1, y + r - k, x1, y + r);
    content.line_to(x1, y1 - r);
    content.cubic_to(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
    content.line_to(x + r, y1);
    content.cubic_to(x + r - k, y1, x, y1 - r + k, x, y1 - r);
    content.line_to(x, y + r);
    content.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    content.close_path();
}

fn draw_circle(
    content: &mut Content,
    res: &mut PageResources<'_>,
    refs: &mut RefAlloc,
    c: &CircleElement,
    page_h: f32,
) {
    let state = res.opacity(c.opacity(), refs);
    begin_paint(content, state, &c.fill);

    let (cx, cy) = c.center();
    let (cx, cy, r) = (cx as f32, page_h - cy as f32, c.radius as f32);
    let k = r * KAPPA;
    content.move_to(cx + r, cy);
    content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
    content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
    content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
    content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
    content.close_path();
    content.fill_nonzero();
    content.restore_state();
}

fn draw_text(
    content: &mut Content,
    res: &mut PageResources<'_>,
    refs: &mut RefAlloc,
    t: &TextElement,
    page_h: f32,
) {
    let layout = layout_text(t);
    if layout.lines.iter().all(|l| l.text.is_empty()) {
        return;
    }
    let font = res.font(layout.font, refs);
    begin_paint(content, None, &t.fill);
    for line in layout.lines.iter().filter(|l| !l.text.is_empty()) {
        let encoded = encode_win_ansi(&line.text);
        content.begin_text();
        content.set_font(Name(font.as_bytes()), t.font_size as f32);
        content.next_line(line.left as f32, page_h - line.baseline as f32);
        content.show(Str(&encoded));
        content.end_text();
    }
    content.restore_state();
}

fn draw_image<'a>(
    content: &mut Content,
    res: &mut PageResources<'a>,
    refs: &mut RefAlloc,
    i: &ImageElement,
    decoded: &'a DecodedImage,
    page_h: f32,
) {
    let (w, h) = (i.width as f32, i.height as f32);
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let name = res.image(decoded, refs);
    content.save_state();
    content.transform([w, 0.0, 0.0, h, i.x as f32, page_h - i.y as f32 - h]);
    content.x_object(Name(name.as_bytes()));
    content.restore_state();
}

fn write_image(pdf: &mut Pdf, placed: &PlacedImage<'_>) {
    let img = placed.image;
    let (width, height) = (img.width as i32, img.height as i32);

    let rgb = miniz_oxide::deflate::compress_to_vec_zlib(&img.rgb8, IMAGE_COMPRESSION);
    let mut xobject = pdf.image_xobject(placed.id, &rgb);
    xobject.filter(Filter::FlateDecode);
    xobject.width(width);
    xobject.height(height);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    if let Some(mask_id) = placed.mask_id {
        xobject.s_mask(mask_id);
    }
    xobject.finish();

    if let (Some(mask_id), Some(alpha)) = (placed.mask_id, img.alpha8.as_ref()) {
        let alpha = miniz_oxide::deflate::compress_to_vec_zlib(alpha, IMAGE_COMPRESSION);
        let mut mask = pdf.image_xobject(mask_id, &alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(width);
        mask.height(height);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask.finish();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pdf.rs"]
mod tests;
