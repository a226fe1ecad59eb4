use std::io::Cursor;

use super::*;

#[test]
fn defaults_match_the_editor_start_state() {
    let c = MemeConfig::default();
    assert!(c.has_no_captions());
    assert_eq!(c.font_size, 40.0);
    assert_eq!(c.text_color, Rgba8::WHITE);
    assert_eq!(c.stroke_color, Rgba8::BLACK);
    c.validate().unwrap();
}

#[test]
fn parses_camel_case_json_with_defaults() {
    let json = r##"{ "topText": "WHEN YOU", "bottomText": "SHIP ON FRIDAY", "textColor": "#FFFF00" }"##;
    let c = MemeConfig::from_reader(Cursor::new(json)).unwrap();
    assert_eq!(c.top_text, "WHEN YOU");
    assert_eq!(c.bottom_text, "SHIP ON FRIDAY");
    assert_eq!(c.font_size, 40.0);
    assert_eq!(c.text_color, Rgba8::opaque(255, 255, 0));
    assert_eq!(c.stroke_color, Rgba8::BLACK);
}

#[test]
fn json_round_trips_through_hex_colors() {
    let c = MemeConfig::default()
        .with_captions("a", "b")
        .with_text_color(Rgba8::opaque(255, 0, 0));
    let json = c.to_json().unwrap();
    assert!(json.contains("\"textColor\": \"#FF0000\""));
    let back = MemeConfig::from_reader(Cursor::new(json)).unwrap();
    assert_eq!(back, c);
}

#[test]
fn font_size_outside_range_is_rejected() {
    for bad in [19.9, 100.5, -4.0, f32::NAN] {
        let err = MemeConfig::default().with_font_size(bad).validate().unwrap_err();
        assert!(matches!(err, MemeError::Validation(_)), "{bad}");
    }
    MemeConfig::default().with_font_size(20.0).validate().unwrap();
    MemeConfig::default().with_font_size(100.0).validate().unwrap();

    let json = r#"{ "fontSize": 400 }"#;
    assert!(MemeConfig::from_reader(Cursor::new(json)).is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = MemeConfig::from_reader(Cursor::new("{ nope")).unwrap_err();
    assert!(matches!(err, MemeError::Serde(_)));
}

#[test]
fn with_methods_leave_the_original_untouched() {
    let base = MemeConfig::default();
    let edited = base.clone().with_top_text("TOP");
    assert!(base.top_text.is_empty());
    assert_eq!(edited.top_text, "TOP");
}
