use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AdframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        AdframeError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        AdframeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        AdframeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AdframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
