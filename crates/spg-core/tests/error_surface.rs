use spg_core::errors::{ErrorInfo, SpgError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("axis", "x")
        .with_context("reason", "example")
}

#[test]
fn configuration_error_surface() {
    let err = SpgError::Configuration(sample_info("overlapping-axes", "axis declared twice"));
    assert_eq!(err.info().code, "overlapping-axes");
    assert!(err.info().context.contains_key("axis"));
    assert!(err.is_configuration());
    assert!(!err.is_exhausted());
}

#[test]
fn exhausted_error_surface() {
    let err = SpgError::IterationExhausted(sample_info("exhausted", "no more points"));
    assert_eq!(err.info().code, "exhausted");
    assert!(err.is_exhausted());
}

#[test]
fn serde_error_surface() {
    let err = SpgError::Serde(sample_info("yaml_deserialize", "bad document"));
    assert_eq!(err.info().code, "yaml_deserialize");
    assert!(!err.is_configuration());
}

#[test]
fn display_includes_context_and_hint() {
    let err = SpgError::Configuration(
        ErrorInfo::new("bad-count", "num_points must be positive")
            .with_context("num_points", "0")
            .with_hint("use at least one point"),
    );
    let rendered = err.to_string();
    assert_eq!(
        rendered,
        "configuration error: num_points must be positive (code: bad-count) | context: [num_points=0] | hint: use at least one point"
    );
}

#[test]
fn errors_round_trip_json() {
    let err = SpgError::config("unknown-axis", "excluder names an unknown axis");
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Configuration\""));
    let decoded: SpgError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
