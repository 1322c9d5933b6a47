use spg_core::errors::{ErrorInfo, SpgError};

fn invalid(code: &str, message: String) -> SpgError {
    SpgError::Configuration(ErrorInfo::new(code, message))
}

pub(crate) fn require_axes(kind: &str, axes: &[String]) -> Result<(), SpgError> {
    if axes.is_empty() {
        return Err(invalid("no-axes", format!("{kind} generator needs at least one axis")));
    }
    for (idx, axis) in axes.iter().enumerate() {
        if axis.trim().is_empty() {
            return Err(SpgError::Configuration(
                ErrorInfo::new("empty-axis-name", format!("{kind} generator has a blank axis name"))
                    .with_context("position", idx.to_string()),
            ));
        }
        if axes[..idx].contains(axis) {
            return Err(SpgError::Configuration(
                ErrorInfo::new("duplicate-axis", format!("{kind} generator repeats an axis"))
                    .with_context("axis", axis.clone()),
            ));
        }
    }
    Ok(())
}

pub(crate) fn require_len(kind: &str, field: &str, expected: usize, actual: usize) -> Result<(), SpgError> {
    if expected == actual {
        return Ok(());
    }
    Err(SpgError::Configuration(
        ErrorInfo::new(
            "length-mismatch",
            format!("{kind} generator: `{field}` must have one entry per axis"),
        )
        .with_context("expected", expected.to_string())
        .with_context("actual", actual.to_string()),
    ))
}

pub(crate) fn require_count(kind: &str, field: &str, value: usize) -> Result<(), SpgError> {
    if value > 0 {
        return Ok(());
    }
    Err(SpgError::Configuration(
        ErrorInfo::new("non-positive-count", format!("{kind} generator: `{field}` must be positive"))
            .with_context(field, value.to_string()),
    ))
}

pub(crate) fn require_finite(kind: &str, field: &str, values: &[f64]) -> Result<(), SpgError> {
    match values.iter().find(|value| !value.is_finite()) {
        None => Ok(()),
        Some(value) => Err(SpgError::Configuration(
            ErrorInfo::new("non-finite", format!("{kind} generator: `{field}` must be finite"))
                .with_context(field, value.to_string()),
        )),
    }
}

pub(crate) fn require_positive(kind: &str, field: &str, value: f64) -> Result<(), SpgError> {
    require_finite(kind, field, &[value])?;
    if value > 0.0 {
        return Ok(());
    }
    Err(SpgError::Configuration(
        ErrorInfo::new("non-positive", format!("{kind} generator: `{field}` must be positive"))
            .with_context(field, value.to_string()),
    ))
}
