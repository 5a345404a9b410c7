use super::*;

#[test]
fn parses_with_and_without_hash() {
    assert_eq!(resolve_color("#ff0000"), Rgb8::new(255, 0, 0));
    assert_eq!(resolve_color("00FF80"), Rgb8::new(0, 255, 128));
    assert_eq!(resolve_color("  #0a0B0c "), Rgb8::new(10, 11, 12));
}

#[test]
fn malformed_input_falls_back_to_black() {
    for bad in [
        "not-a-color",
        "",
        "#",
        "#fff",
        "#ff00000",
        "#gg0000",
        "red",
        "rgb(1,2,3)",
        "#ff00é",
    ] {
        assert_eq!(resolve_color(bad), Rgb8::BLACK, "{bad:?}");
    }
}

#[test]
fn unit_channels_are_normalized() {
    assert_eq!(Rgb8::new(255, 0, 255).to_unit(), [1.0, 0.0, 1.0]);
    assert_eq!(Rgb8::BLACK.to_unit(), [0.0, 0.0, 0.0]);
}
