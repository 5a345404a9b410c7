use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn opaque_png_has_no_alpha_plane() {
    let img = image::RgbaImage::from_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
    let decoded = decode_image(&png_bytes(img), (1, 1)).unwrap();
    assert_eq!((decoded.width, decoded.height), (2, 1));
    assert_eq!(decoded.rgb8, vec![10, 20, 30, 10, 20, 30]);
    assert!(decoded.alpha8.is_none());
}

#[test]
fn translucent_png_keeps_alpha_plane() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let decoded = decode_image(&png_bytes(img), (1, 1)).unwrap();
    assert_eq!(decoded.rgb8, vec![100, 50, 200]);
    assert_eq!(decoded.alpha8, Some(vec![128]));
}

#[test]
fn svg_source_is_rasterized_at_requested_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
        <rect width="4" height="4" fill="#00ff00"/></svg>"##;
    let decoded = decode_image(svg, (8, 6)).unwrap();
    assert_eq!((decoded.width, decoded.height), (8, 6));
    assert_eq!(&decoded.rgb8[..3], &[0, 255, 0]);
}

#[test]
fn svg_source_cannot_pull_in_local_files() {
    let path = std::env::temp_dir().join(format!("scenekit-local-{}.png", std::process::id()));
    std::fs::write(
        &path,
        png_bytes(image::RgbaImage::from_pixel(3, 3, image::Rgba([1, 2, 3, 255]))),
    )
    .unwrap();
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
        <rect width="4" height="4" fill="#00ff00"/>
        <image href="{}" width="4" height="4"/></svg>"##,
        path.display()
    );
    let decoded = decode_image(svg.as_bytes(), (8, 8));
    std::fs::remove_file(&path).unwrap();

    let decoded = decoded.unwrap();
    let center = (4 * 8 + 4) * 3;
    assert_eq!(&decoded.rgb8[center..center + 3], &[0, 255, 0]);
}

#[test]
fn svg_source_keeps_embedded_data_uris() {
    use base64::Engine as _;
    let red = png_bytes(image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255])));
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
        <image href="data:application/octet-stream;base64,{}" width="4" height="4" preserveAspectRatio="none"/></svg>"##,
        base64::engine::general_purpose::STANDARD.encode(red)
    );
    let decoded = decode_image(svg.as_bytes(), (8, 8)).unwrap();
    let center = (4 * 8 + 4) * 3;
    assert_eq!(&decoded.rgb8[center..center + 3], &[255, 0, 0]);
}

#[test]
fn garbage_is_an_error() {
    assert!(decode_image(b"definitely not an image", (4, 4)).is_err());
    assert!(decode_image(b"<svg", (4, 4)).is_err());
}

#[test]
fn sniffs_raster_formats_for_rasterizer() {
    let opts = usvg::Options::default();
    let png = png_bytes(image::RgbaImage::new(1, 1));
    assert!(matches!(
        sniff_usvg_image(png, &opts),
        Some(usvg::ImageKind::PNG(_))
    ));
    assert!(sniff_usvg_image(b"plain text".to_vec(), &opts).is_none());
}

#[test]
fn demultiply_restores_straight_alpha() {
    let mut px = vec![64, 32, 0, 128, 9, 9, 9, 0, 1, 2, 3, 255];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[128, 64, 0, 128]);
    assert_eq!(&px[4..8], &[9, 9, 9, 0]);
    assert_eq!(&px[8..], &[1, 2, 3, 255]);
}
