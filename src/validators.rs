//! Built-in validation functions.
//!
//! Each item is a function, or returns a closure, with the signature
//! `Fn(&T) -> Option<ValidationError>` expected by
//! [`Validate::new`](crate::Validate::new) and
//! [`GuardBuilder::validate`](crate::GuardBuilder::validate).
//!
//! # Example
//!
//! ```rust
//! use inputguard::{validators, Guard, Validate};
//!
//! let short = Validate::new(validators::max_length::<String>(3));
//! assert!(short.process("abc".to_string()).is_success());
//! assert_eq!(
//!     short.process("abcd".to_string()).failure_ref().unwrap().message(),
//!     "Invalid value: must be 3 chars max, but is 4"
//! );
//! ```

use regex::Regex;
use serde::Serialize;

use crate::error::{snapshot, GuardError, ValidationError};
use crate::guard::Nullable;

/// Rejects absent values with [`ValidationError::ObjectIsNull`].
pub fn not_null<T: Nullable>(value: &T) -> Option<ValidationError> {
    value.is_absent().then_some(ValidationError::ObjectIsNull)
}

/// Rejects empty strings.
pub fn not_empty<S: AsRef<str>>(value: &S) -> Option<ValidationError> {
    value.as_ref().is_empty().then_some(ValidationError::StringIsEmpty)
}

/// Rejects strings longer than `max_length` characters.
pub fn max_length<S>(
    max_length: usize,
) -> impl Fn(&S) -> Option<ValidationError> + Clone + Send + Sync + 'static
where
    S: AsRef<str> + 'static,
{
    move |value| {
        let current_length = value.as_ref().chars().count();
        (current_length > max_length).then_some(ValidationError::StringIsTooLong {
            current_length,
            max_length,
        })
    }
}

/// Rejects strings that do not parse as a 32-bit signed integer.
pub fn parseable_to_integer<S: AsRef<str>>(value: &S) -> Option<ValidationError> {
    value
        .as_ref()
        .parse::<i32>()
        .err()
        .map(|_| ValidationError::StringMustBeParseableToInteger)
}

/// Rejects strings that are not entirely matched by `pattern`.
///
/// # Errors
///
/// Returns [`GuardError::InvalidPattern`] if `pattern` is not a valid regex.
pub fn matches_pattern<S>(
    pattern: &str,
) -> Result<impl Fn(&S) -> Option<ValidationError> + Clone + Send + Sync + 'static, GuardError>
where
    S: AsRef<str> + 'static,
{
    let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|error| GuardError::InvalidPattern {
        pattern: pattern.to_string(),
        message: error.to_string(),
    })?;
    let pattern = pattern.to_string();

    Ok(move |value: &S| {
        (!regex.is_match(value.as_ref())).then(|| ValidationError::StringMustMatchPattern {
            pattern: pattern.clone(),
        })
    })
}

/// Rejects values different from `expected`.
pub fn equal_to<T>(
    expected: T,
) -> impl Fn(&T) -> Option<ValidationError> + Clone + Send + Sync + 'static
where
    T: PartialEq + Serialize + Clone + Send + Sync + 'static,
{
    let error = ValidationError::ObjectMustBeEqualTo {
        expected: snapshot(&expected),
    };
    move |value| (*value != expected).then(|| error.clone())
}

macro_rules! comparison_validator {
    (
        $(#[$doc:meta])*
        $name:ident, $variant:ident, |$value:ident, $reference:ident| $accept:expr
    ) => {
        $(#[$doc])*
        pub fn $name<N>(
            $reference: N,
        ) -> impl Fn(&N) -> Option<ValidationError> + Clone + Send + Sync + 'static
        where
            N: PartialOrd + Serialize + Clone + Send + Sync + 'static,
        {
            move |$value| {
                let $reference = &$reference;
                (!($accept)).then(|| ValidationError::$variant {
                    value: snapshot($value),
                    reference: snapshot($reference),
                })
            }
        }
    };
}

comparison_validator!(
    /// Rejects numbers lower than or equal to `reference`.
    greater_than, NumberMustBeGreaterThan, |value, reference| value > reference
);
comparison_validator!(
    /// Rejects numbers lower than `reference`.
    greater_or_equal_to, NumberMustBeGreaterOrEqualTo, |value, reference| value >= reference
);
comparison_validator!(
    /// Rejects numbers greater than or equal to `reference`.
    lower_than, NumberMustBeLowerThan, |value, reference| value < reference
);
comparison_validator!(
    /// Rejects numbers greater than `reference`.
    lower_or_equal_to, NumberMustBeLowerOrEqualTo, |value, reference| value <= reference
);

/// Rejects numbers outside `[min, max]`.
///
/// # Errors
///
/// Returns [`GuardError::InvalidRange`] if `min` is greater than `max`.
pub fn between<N>(
    min: N,
    max: N,
) -> Result<impl Fn(&N) -> Option<ValidationError> + Clone + Send + Sync + 'static, GuardError>
where
    N: PartialOrd + Serialize + Clone + Send + Sync + 'static,
{
    if min > max {
        return Err(GuardError::InvalidRange {
            min: snapshot(&min),
            max: snapshot(&max),
        });
    }

    Ok(move |value: &N| {
        (*value < min || *value > max).then(|| ValidationError::NumberMustBeBetween {
            value: snapshot(value),
            min: snapshot(&min),
            max: snapshot(&max),
        })
    })
}

/// Rejects empty collections.
pub fn collection_not_empty<C>(value: &C) -> Option<ValidationError>
where
    for<'a> &'a C: IntoIterator,
{
    value.into_iter().next().is_none().then_some(ValidationError::CollectionIsEmpty)
}
