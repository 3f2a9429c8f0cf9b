use moodscribe::infrastructure::observability::{
    REQUEST_ID_HEADER, RequestId, TracingConfig, sanitize_prompt,
};

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_unchanged() {
    let prompt = "Felt calm after a walk by the lake";
    assert_eq!(sanitize_prompt(prompt), prompt);
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_with_length() {
    let prompt = "a".repeat(150);
    let result = sanitize_prompt(&prompt);
    assert!(result.contains("... (150 chars total)"));
    assert!(result.starts_with(&"a".repeat(100)));
}

#[test]
fn given_long_multibyte_prompt_when_sanitizing_then_cuts_on_char_boundary() {
    let prompt = "é".repeat(120);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"é".repeat(100)));
    assert!(result.contains("(120 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_prompt("Authorization: Bearer sk-abc123xyz");
    assert!(result.contains("Bearer [REDACTED]"));
    assert!(!result.contains("sk-abc123xyz"));
}

#[test]
fn given_repeated_secrets_when_sanitizing_then_redacts_each() {
    let result = sanitize_prompt("token=one and later token=two");
    assert!(!result.contains("one"));
    assert!(!result.contains("two"));
    assert_eq!(result.matches("[REDACTED]").count(), 2);
}

#[test]
fn given_password_when_sanitizing_then_redacts_password() {
    let result = sanitize_prompt("Login with password=hunter2");
    assert!(result.contains("password=[REDACTED]"));
    assert!(!result.contains("hunter2"));
}

#[test]
fn given_whitespace_padded_prompt_when_sanitizing_then_trims() {
    assert_eq!(sanitize_prompt("  Hello world  "), "Hello world");
}

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[test]
fn given_request_id_when_cloned_then_equals_original() {
    let original = RequestId("abc".to_string());
    let cloned = original.clone();
    assert_eq!(original.0, cloned.0);
}

#[test]
fn given_log_level_when_building_tracing_config_then_scopes_filter_to_crate() {
    let config = TracingConfig::new("prod", "debug", true);
    assert_eq!(config.environment, "prod");
    assert!(config.json_format);
    assert!(config.default_filter.contains("moodscribe=debug"));
}
