use super::*;
use crate::foundation::core::Rgba8;

fn image() -> ImageReference {
    ImageReference::Url("https://picsum.photos/800/600".to_owned())
}

#[test]
fn image_without_topic_describes_the_image() {
    let img = image();
    let req = select_request("", Some(&img)).unwrap();
    assert_eq!(req, CaptionRequest::Image(&img));
    assert_eq!(req.count(), 4);
}

#[test]
fn topic_wins_over_image() {
    let img = image();
    let req = select_request("mondays", Some(&img)).unwrap();
    assert_eq!(req, CaptionRequest::Topic("mondays"));
    assert_eq!(req.count(), 5);
}

#[test]
fn topic_alone_is_enough() {
    assert_eq!(
        select_request("  cats  ", None),
        Some(CaptionRequest::Topic("cats"))
    );
}

#[test]
fn blank_topic_without_image_requests_nothing() {
    assert_eq!(select_request("", None), None);
    assert_eq!(select_request("   ", None), None);
}

#[test]
fn first_suggestion_replaces_both_captions_only() {
    let config = MemeConfig::default()
        .with_captions("old top", "old bottom")
        .with_font_size(64.0)
        .with_text_color(Rgba8::opaque(255, 0, 0));
    let suggestions = vec![
        CaptionSuggestion::new("new top", "new bottom"),
        CaptionSuggestion::new("ignored", "ignored"),
    ];

    let next = apply_first_suggestion(&config, &suggestions).unwrap();
    assert_eq!(next.top_text, "new top");
    assert_eq!(next.bottom_text, "new bottom");
    assert_eq!(next.font_size, 64.0);
    assert_eq!(next.text_color, Rgba8::opaque(255, 0, 0));
    assert_eq!(config.top_text, "old top");
}

#[test]
fn empty_suggestions_change_nothing() {
    assert_eq!(apply_first_suggestion(&MemeConfig::default(), &[]), None);
}

#[test]
fn suggestions_deserialize_from_backend_json() {
    let got: Vec<CaptionSuggestion> =
        serde_json::from_str(r#"[{"top":"ONE","bottom":"TWO"},{"top":"","bottom":"x"}]"#).unwrap();
    assert_eq!(got[0], CaptionSuggestion::new("ONE", "TWO"));
    assert_eq!(got.len(), 2);
}
