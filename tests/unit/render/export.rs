use super::*;

#[test]
fn formats_know_their_mime_and_extension() {
    assert_eq!(ExportFormat::Svg.content_type(), "image/svg+xml");
    assert_eq!(ExportFormat::Png.content_type(), "image/png");
    assert_eq!(ExportFormat::Pdf.extension(), "pdf");
    assert_eq!(ExportFormat::from_extension("PNG"), Some(ExportFormat::Png));
    assert_eq!(ExportFormat::from_extension("jpg"), None);
}

#[test]
fn default_options_match_png_defaults() {
    let opts = ExportOptions::default();
    assert_eq!(opts.scale, 2.0);
    assert!(!opts.transparent);
}

#[test]
fn data_uri_carries_mime_and_base64() {
    let export = Export {
        format: ExportFormat::Svg,
        bytes: b"<svg/>".to_vec(),
    };
    assert_eq!(export.to_base64(), "PHN2Zy8+");
    assert_eq!(export.to_data_uri(), "data:image/svg+xml;base64,PHN2Zy8+");
}
