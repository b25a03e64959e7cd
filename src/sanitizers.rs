//! Built-in sanitization functions, for use with
//! [`Sanitize::new`](crate::Sanitize::new) and
//! [`GuardBuilder::sanitize`](crate::GuardBuilder::sanitize).

use regex::Regex;
use serde::Serialize;

use crate::error::{snapshot, GuardError};

/// Removes leading and trailing whitespace.
pub fn strip(value: String) -> String {
    let stripped = value.trim();
    if stripped.len() == value.len() {
        value
    } else {
        stripped.to_string()
    }
}

pub fn to_lower_case(value: String) -> String {
    value.to_lowercase()
}

pub fn to_upper_case(value: String) -> String {
    value.to_uppercase()
}

/// Prepends `prefix` unless the value already starts with it.
pub fn prefix(
    prefix: impl Into<String>,
) -> impl Fn(String) -> String + Clone + Send + Sync + 'static {
    let prefix = prefix.into();
    move |value| {
        if value.starts_with(&prefix) {
            value
        } else {
            format!("{prefix}{value}")
        }
    }
}

/// Appends `suffix` unless the value already ends with it.
pub fn suffix(
    suffix: impl Into<String>,
) -> impl Fn(String) -> String + Clone + Send + Sync + 'static {
    let suffix = suffix.into();
    move |value| {
        if value.ends_with(&suffix) {
            value
        } else {
            format!("{value}{suffix}")
        }
    }
}

/// Replaces every occurrence of `target` with `replacement`.
pub fn replace(
    target: impl Into<String>,
    replacement: impl Into<String>,
) -> impl Fn(String) -> String + Clone + Send + Sync + 'static {
    let target = target.into();
    let replacement = replacement.into();
    move |value| value.replace(&target, &replacement)
}

fn compile(pattern: &str) -> Result<Regex, GuardError> {
    Regex::new(pattern).map_err(|error| GuardError::InvalidPattern {
        pattern: pattern.to_string(),
        message: error.to_string(),
    })
}

/// Replaces every match of `pattern` with `replacement`.
///
/// `replacement` may refer to capture groups as `$1` or `${name}`.
///
/// # Errors
///
/// Returns [`GuardError::InvalidPattern`] if `pattern` is not a valid regex.
pub fn replace_all(
    pattern: &str,
    replacement: impl Into<String>,
) -> Result<impl Fn(String) -> String + Clone + Send + Sync + 'static, GuardError> {
    let regex = compile(pattern)?;
    let replacement = replacement.into();
    Ok(move |value: String| regex.replace_all(&value, replacement.as_str()).into_owned())
}

/// Replaces the first match of `pattern` with `replacement`.
///
/// # Errors
///
/// Returns [`GuardError::InvalidPattern`] if `pattern` is not a valid regex.
pub fn replace_first(
    pattern: &str,
    replacement: impl Into<String>,
) -> Result<impl Fn(String) -> String + Clone + Send + Sync + 'static, GuardError> {
    let regex = compile(pattern)?;
    let replacement = replacement.into();
    Ok(move |value: String| regex.replace(&value, replacement.as_str()).into_owned())
}

/// Brings numbers into `[min, max]`.
///
/// # Errors
///
/// Returns [`GuardError::InvalidRange`] if `min` is greater than `max`.
pub fn clamp<N>(
    min: N,
    max: N,
) -> Result<impl Fn(N) -> N + Clone + Send + Sync + 'static, GuardError>
where
    N: PartialOrd + Serialize + Clone + Send + Sync + 'static,
{
    if min > max {
        return Err(GuardError::InvalidRange {
            min: snapshot(&min),
            max: snapshot(&max),
        });
    }

    Ok(move |value: N| {
        if value < min {
            min.clone()
        } else if value > max {
            max.clone()
        } else {
            value
        }
    })
}

/// Raises numbers below `min` to `min`.
pub fn clamp_min<N>(min: N) -> impl Fn(N) -> N + Clone + Send + Sync + 'static
where
    N: PartialOrd + Clone + Send + Sync + 'static,
{
    move |value| if value < min { min.clone() } else { value }
}

/// Lowers numbers above `max` to `max`.
pub fn clamp_max<N>(max: N) -> impl Fn(N) -> N + Clone + Send + Sync + 'static
where
    N: PartialOrd + Clone + Send + Sync + 'static,
{
    move |value| if value > max { max.clone() } else { value }
}
