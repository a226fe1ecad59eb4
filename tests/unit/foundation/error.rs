use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MemeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(MemeError::decode("x").to_string().contains("decode error:"));
    assert!(
        MemeError::generation("x")
            .to_string()
            .contains("generation error:")
    );
    assert!(
        MemeError::empty_result("x")
            .to_string()
            .contains("empty result:")
    );
    assert!(MemeError::render("x").to_string().contains("render error:"));
    assert!(
        MemeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MemeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_empty_result_is_soft() {
    assert!(MemeError::empty_result("none").is_empty_result());
    assert!(!MemeError::generation("down").is_empty_result());
}
