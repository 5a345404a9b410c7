use super::*;
use crate::{
    foundation::error::SceneError,
    scene::model::{RectElement, SceneElement, TextElement},
};

fn renderer() -> Renderer {
    Renderer::new(RendererConfig {
        load_system_fonts: false,
        ..RendererConfig::default()
    })
}

fn red_scene() -> SceneDocument {
    let mut scene = SceneDocument::new(40.0, 20.0);
    scene.push(SceneElement::Rect(RectElement {
        x: 0.0,
        y: 0.0,
        width: 40.0,
        height: 20.0,
        fill: "#ff0000".to_string(),
        corner_radius: None,
        opacity: None,
    }));
    scene
}

#[test]
fn every_backend_validates_first() {
    let r = renderer();
    let bad = SceneDocument::new(0.0, 10.0);
    assert!(matches!(r.render_svg(&bad), Err(SceneError::Validation(_))));
    assert!(matches!(
        r.render_png(&bad, 1.0, &PngOptions::default()),
        Err(SceneError::Validation(_))
    ));
    assert!(matches!(r.render_pdf(&bad), Err(SceneError::Validation(_))));
}

#[test]
fn png_has_scaled_dimensions_and_content() {
    let png = renderer()
        .render_png(&red_scene(), DEFAULT_PNG_SCALE, &PngOptions::default())
        .unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (80, 40));
    assert_eq!(img.get_pixel(40, 20).0, [255, 0, 0, 255]);
}

#[test]
fn control_characters_in_text_do_not_blank_the_png() {
    let mut scene = red_scene();
    scene.push(SceneElement::Text(TextElement {
        x: 20.0,
        y: 4.0,
        content: "Brand\u{b}Name".to_string(),
        font_size: 10.0,
        font_weight: None,
        font_family: None,
        fill: "#ffffff".to_string(),
        align: None,
        offset_x: None,
        width: None,
    }));
    let png = renderer()
        .render_png(&scene, 1.0, &PngOptions::default())
        .unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(2, 2).0, [255, 0, 0, 255]);
}

#[test]
fn png_rejects_invalid_scale() {
    assert!(matches!(
        renderer().render_png(&red_scene(), 0.0, &PngOptions::default()),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn thumbnail_is_quarter_scale_on_white() {
    let png = renderer().thumbnail(&SceneDocument::new(400.0, 200.0)).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (100, 50));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn export_wraps_each_format() {
    let r = renderer();
    let scene = red_scene();

    let svg = r
        .export(&scene, ExportFormat::Svg, &ExportOptions::default())
        .unwrap();
    assert!(svg.bytes.starts_with(b"<svg"));
    assert!(svg.to_data_uri().starts_with("data:image/svg+xml;base64,"));

    let png = r
        .export(
            &scene,
            ExportFormat::Png,
            &ExportOptions {
                scale: 1.0,
                transparent: true,
            },
        )
        .unwrap();
    assert_eq!(
        image::load_from_memory(&png.bytes).unwrap().to_rgba8().dimensions(),
        (40, 20)
    );

    let pdf = r
        .export(&scene, ExportFormat::Pdf, &ExportOptions::default())
        .unwrap();
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    assert_eq!(pdf.format.content_type(), "application/pdf");
}

#[test]
fn fonts_load_only_for_png() {
    let r = renderer();
    r.render_svg(&red_scene()).unwrap();
    r.render_pdf(&red_scene()).unwrap();
    assert!(r.fontdb.get().is_none());
    assert!(format!("{r:?}").contains("font_faces: None"));

    r.render_png(&red_scene(), 1.0, &PngOptions::default())
        .unwrap();
    assert!(r.fontdb.get().is_some());
}

#[test]
fn renderer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Renderer>();
}
