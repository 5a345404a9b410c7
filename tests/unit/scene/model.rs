use super::*;

fn example_scene() -> SceneDocument {
    SceneDocument::from_json(
        r##"{
            "width": 200, "height": 100,
            "elements": [
                {"type": "rect", "x": 0, "y": 0, "width": 200, "height": 100, "fill": "#ff0000"},
                {"type": "text", "x": 10, "y": 10, "content": "Hi", "fontSize": 20, "fill": "#ffffff"}
            ]
        }"##,
    )
    .unwrap()
}

#[test]
fn json_roundtrip_keeps_paint_order() {
    let scene = example_scene();
    assert_eq!(scene.elements.len(), 2);
    assert_eq!(scene.elements[0].kind(), "rect");
    assert_eq!(scene.elements[1].kind(), "text");

    let s = scene.to_json().unwrap();
    assert!(s.contains("\"type\": \"rect\""));
    let de = SceneDocument::from_json(&s).unwrap();
    assert_eq!(de, scene);
}

#[test]
fn unknown_element_types_deserialize_to_unknown() {
    let scene = SceneDocument::from_json(
        r##"{"width": 10, "height": 10, "elements": [
            {"type": "star", "x": 1, "points": 5},
            {"type": "circle", "x": 0, "y": 0, "radius": 2, "fill": "#000000"}
        ]}"##,
    )
    .unwrap();
    assert_eq!(scene.elements[0], SceneElement::Unknown);
    assert_eq!(scene.elements[1].kind(), "circle");
    scene.validate().unwrap();
}

#[test]
fn missing_elements_defaults_to_empty() {
    let scene = SceneDocument::from_json(r#"{"width": 3, "height": 4}"#).unwrap();
    assert!(scene.elements.is_empty());
    scene.validate().unwrap();
}

#[test]
fn font_weight_accepts_number_or_string() {
    let scene = SceneDocument::from_json(
        r##"{"width": 10, "height": 10, "elements": [
            {"type": "text", "x": 0, "y": 0, "content": "a", "fontSize": 12, "fill": "#000", "fontWeight": 700},
            {"type": "text", "x": 0, "y": 0, "content": "b", "fontSize": 12, "fill": "#000", "fontWeight": "bold"},
            {"type": "text", "x": 0, "y": 0, "content": "c", "fontSize": 12, "fill": "#000"}
        ]}"##,
    )
    .unwrap();

    let texts: Vec<&TextElement> = scene
        .elements
        .iter()
        .filter_map(|e| match e {
            SceneElement::Text(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(texts[0].font_weight(), "700");
    assert!(texts[0].is_bold());
    assert!(texts[1].is_bold());
    assert!(!texts[2].is_bold());
    assert_eq!(texts[2].font_weight(), DEFAULT_FONT_WEIGHT);
    assert_eq!(texts[2].font_family(), DEFAULT_FONT_FAMILY);
}

#[test]
fn circle_center_is_bounding_box_origin_plus_radius() {
    let c = CircleElement {
        x: 10.0,
        y: 20.0,
        radius: 5.0,
        fill: "#000000".to_string(),
        opacity: Some(3.0),
    };
    assert_eq!(c.center(), (15.0, 25.0));
    assert_eq!(c.opacity(), 1.0);
}

#[test]
fn anchor_shift_applies_only_to_centered_text() {
    let mut t = TextElement {
        x: 100.0,
        y: 0.0,
        content: "x".to_string(),
        font_size: 10.0,
        font_weight: None,
        font_family: None,
        fill: "#000000".to_string(),
        align: Some(TextAlign::Center),
        offset_x: Some(40.0),
        width: None,
    };
    assert_eq!(t.anchor_x(), 80.0);

    t.align = Some(TextAlign::Right);
    assert_eq!(t.anchor_x(), 100.0);

    t.align = Some(TextAlign::Center);
    t.offset_x = None;
    assert_eq!(t.anchor_x(), 100.0);
}

#[test]
fn validate_rejects_bad_dimensions() {
    for (w, h) in [(0.0, 10.0), (10.0, 0.0), (-1.0, 10.0), (f64::NAN, 1.0)] {
        let err = SceneDocument::new(w, h).validate().unwrap_err();
        assert!(matches!(err, SceneError::Validation(_)), "{w}x{h}");
    }
}

#[test]
fn validate_names_the_offending_element() {
    let mut scene = example_scene();
    scene.push(SceneElement::Circle(CircleElement {
        x: 0.0,
        y: 0.0,
        radius: -2.0,
        fill: "#000000".to_string(),
        opacity: None,
    }));
    let msg = scene.validate().unwrap_err().to_string();
    assert!(msg.contains("element 2 (circle)"), "{msg}");
    assert!(msg.contains("radius"), "{msg}");
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneDocument::from_json("{\"width\": 1").unwrap_err();
    assert!(matches!(err, SceneError::Serde(_)));
}
