use super::*;

fn courier(content: &str, width: Option<f64>, align: TextAlign) -> TextElement {
    TextElement {
        x: 100.0,
        y: 10.0,
        content: content.to_string(),
        font_size: 10.0,
        font_weight: None,
        font_family: Some("Courier New".to_string()),
        fill: "#000000".to_string(),
        align: Some(align),
        offset_x: None,
        width,
    }
}

fn texts(layout: &TextLayout) -> Vec<&str> {
    layout.lines.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn single_line_without_width_is_untouched() {
    let layout = layout_text(&courier("Hello  world", None, TextAlign::Left));
    assert_eq!(layout.font, CoreFont::Courier);
    assert_eq!(texts(&layout), vec!["Hello  world"]);
    assert_eq!(layout.lines[0].baseline, 20.0);
    assert_eq!(layout.lines[0].left, 100.0);
    assert_eq!(layout.lines[0].width, 72.0);
}

#[test]
fn wraps_greedily_at_word_boundaries() {
    // Courier at 10: 6 units per char.
    let layout = layout_text(&courier("aaa bbb ccc", Some(45.0), TextAlign::Left));
    assert_eq!(texts(&layout), vec!["aaa bbb", "ccc"]);
    assert_eq!(layout.lines[1].baseline, 20.0 + 12.0);
}

#[test]
fn over_wide_words_are_split_between_characters() {
    let layout = layout_text(&courier("abcdefgh", Some(20.0), TextAlign::Left));
    assert_eq!(texts(&layout), vec!["abc", "def", "gh"]);
}

#[test]
fn narrow_box_still_places_one_char_per_line() {
    let layout = layout_text(&courier("ab", Some(1.0), TextAlign::Left));
    assert_eq!(texts(&layout), vec!["a", "b"]);
}

#[test]
fn hard_breaks_are_kept_with_and_without_width() {
    let layout = layout_text(&courier("one\ntwo", None, TextAlign::Left));
    assert_eq!(texts(&layout), vec!["one", "two"]);

    let layout = layout_text(&courier("one\n\ntwo", Some(100.0), TextAlign::Left));
    assert_eq!(texts(&layout), vec!["one", "", "two"]);
}

#[test]
fn empty_content_yields_one_empty_line() {
    let layout = layout_text(&courier("", Some(50.0), TextAlign::Left));
    assert_eq!(texts(&layout), vec![""]);
}

#[test]
fn alignment_positions_lines_around_anchor() {
    let center = layout_text(&courier("abcd", None, TextAlign::Center));
    assert_eq!(center.lines[0].left, 100.0 - 12.0);

    let right = layout_text(&courier("abcd", None, TextAlign::Right));
    assert_eq!(right.lines[0].left, 100.0 - 24.0);
}

#[test]
fn centered_offset_shifts_anchor_before_alignment() {
    let mut el = courier("abcd", None, TextAlign::Center);
    el.offset_x = Some(50.0);
    let layout = layout_text(&el);
    assert_eq!(layout.anchor_x, 75.0);
    assert_eq!(layout.lines[0].left, 75.0 - 12.0);
}

#[test]
fn non_positive_width_disables_wrapping() {
    let layout = layout_text(&courier("aaa bbb", Some(0.0), TextAlign::Left));
    assert_eq!(texts(&layout), vec!["aaa bbb"]);
}
