use super::*;

#[test]
fn classifies_references() {
    assert_eq!(
        "https://example.com/cat.png".parse::<ImageReference>().unwrap(),
        ImageReference::Url("https://example.com/cat.png".to_string())
    );
    assert_eq!(
        "HTTP://example.com/a.jpg".parse::<ImageReference>().unwrap(),
        ImageReference::Url("HTTP://example.com/a.jpg".to_string())
    );
    assert_eq!(
        "pics/cat.png".parse::<ImageReference>().unwrap(),
        ImageReference::File(PathBuf::from("pics/cat.png"))
    );
    assert!("   ".parse::<ImageReference>().is_err());
}

#[test]
fn parses_data_url() {
    let r: ImageReference = "data:image/jpeg;base64,AAEC".parse().unwrap();
    let ImageReference::Embedded(e) = r else {
        panic!("expected embedded reference");
    };
    assert_eq!(e.mime, "image/jpeg");
    assert_eq!(e.data_base64, "AAEC");
    assert_eq!(e.decode_bytes().unwrap(), vec![0u8, 1, 2]);
    assert_eq!(e.to_data_url(), "data:image/jpeg;base64,AAEC");
}

#[test]
fn data_url_without_mime_defaults_to_png() {
    let e = EmbeddedImage::parse_data_url("data:;base64,AAEC").unwrap();
    assert_eq!(e.mime, DEFAULT_IMAGE_MIME);
}

#[test]
fn malformed_data_urls_are_decode_errors() {
    assert!(matches!(
        EmbeddedImage::parse_data_url("data:image/png,AAEC").unwrap_err(),
        MemeError::Decode(_)
    ));
    assert!(matches!(
        EmbeddedImage::parse_data_url("data:image/png;base64").unwrap_err(),
        MemeError::Decode(_)
    ));
    let bad = EmbeddedImage {
        mime: "image/png".to_string(),
        data_base64: "!!!".to_string(),
    };
    assert!(matches!(bad.decode_bytes().unwrap_err(), MemeError::Decode(_)));
}

#[test]
fn from_bytes_round_trips_through_data_url() {
    let e = EmbeddedImage::from_bytes("image/png", &[9, 8, 7]);
    let back = EmbeddedImage::parse_data_url(&e.to_data_url()).unwrap();
    assert_eq!(back.decode_bytes().unwrap(), vec![9, 8, 7]);
}

#[test]
fn display_elides_payload() {
    let r = ImageReference::Embedded(EmbeddedImage::from_bytes("image/png", &[0u8; 30]));
    assert_eq!(r.to_string(), "data:image/png;base64,<40 chars>");
}
