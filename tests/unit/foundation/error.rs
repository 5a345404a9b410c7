use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SceneError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SceneError::render("x").to_string().contains("render error:"));
    assert!(
        SceneError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SceneError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn fetch_status_carries_code() {
    let err = FetchError::Status {
        url: "https://cdn.example.com/logo.png".to_string(),
        status: 404,
    };
    assert!(err.to_string().contains("404"));

    let wrapped = SceneError::from(err);
    match wrapped {
        SceneError::Fetch(FetchError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("unexpected error: {other:?}"),
    }
}
