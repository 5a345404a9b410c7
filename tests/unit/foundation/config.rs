use super::*;

#[test]
fn defaults_are_bounded() {
    let cfg = RendererConfig::default();
    assert_eq!(cfg.fetch.timeout, DEFAULT_FETCH_TIMEOUT);
    assert_eq!(cfg.fetch.max_bytes, DEFAULT_FETCH_MAX_BYTES);
    assert!(cfg.fetch.user_agent.starts_with("scenekit/"));
    assert!(cfg.font_dirs.is_empty());
    assert!(cfg.load_system_fonts);
}

#[test]
fn positive_u64_rejects_garbage_and_zero() {
    assert_eq!(parse_positive_u64("abc"), None);
    assert_eq!(parse_positive_u64("0"), None);
    assert_eq!(parse_positive_u64("-5"), None);
    assert_eq!(parse_positive_u64(" 250 "), Some(250));
}

#[test]
fn missing_env_key_keeps_default() {
    assert_eq!(env_u64("SCENEKIT_TEST_KEY_THAT_IS_NEVER_SET"), None);
}
