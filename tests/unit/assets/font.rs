use super::*;
use crate::test_support::test_face;

#[test]
fn garbage_bytes_are_rejected() {
    let err = DisplayFace::from_bytes(vec![0u8; 64]).unwrap_err();
    assert!(matches!(err, MemeError::Validation(_)));
}

#[test]
fn missing_font_file_is_an_error() {
    assert!(DisplayFace::from_path("/no/such/font.ttf").is_err());
}

#[test]
fn advance_grows_with_text_and_size_if_font_present() {
    let Some(face) = test_face() else {
        return;
    };
    let mut shaper = TextShaper::new(&face).unwrap();

    assert_eq!(shaper.advance("", 40.0), 0.0);
    let short = shaper.advance("WHEN", 40.0);
    let long = shaper.advance("WHEN YOU", 40.0);
    let big = shaper.advance("WHEN", 80.0);
    assert!(short > 0.0);
    assert!(long > short);
    assert!((big - 2.0 * short).abs() < 2.0);

    // Trailing whitespace counts toward the measured width.
    assert!(shaper.advance("WHEN ", 40.0) > short);
}

#[test]
fn single_line_layout_has_one_line_if_font_present() {
    let Some(face) = test_face() else {
        return;
    };
    let mut shaper = TextShaper::new(&face).unwrap();
    let layout = shaper.layout_line("SHIP ON FRIDAY ", 40.0);
    assert_eq!(layout.lines().count(), 1);
}

const REGULAR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

#[test]
fn regular_weight_face_is_refused_if_present() {
    let Some(bytes) = REGULAR_CANDIDATES.iter().find_map(|p| std::fs::read(p).ok()) else {
        return;
    };
    let err = DisplayFace::from_bytes(bytes).unwrap_err();
    assert!(matches!(err, MemeError::Validation(_)));
    assert!(err.to_string().contains("bold"), "{err}");
}

#[test]
fn bold_face_reports_its_weight_if_present() {
    let Some(face) = test_face() else {
        return;
    };
    assert!(face.weight() >= MIN_DISPLAY_WEIGHT);
}
