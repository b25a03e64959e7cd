//! Reasons a validation stage can reject a value.
//!
//! [`ValidationError`] is closed over the built-in kinds, with one open
//! extension point: [`ValidationError::Custom`] holds any type implementing
//! [`CustomValidationError`].

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A user-defined validation error kind.
///
/// # Example
///
/// ```rust
/// use inputguard::{CustomValidationError, ValidationError};
///
/// #[derive(Debug)]
/// struct NotAnEmail;
///
/// impl CustomValidationError for NotAnEmail {
///     fn code(&self) -> &str {
///         "not_an_email"
///     }
///
///     fn constraint_message(&self) -> String {
///         "must be an email address".to_string()
///     }
/// }
///
/// let error = ValidationError::custom(NotAnEmail);
/// assert_eq!(error.constraint_message(), "must be an email address");
/// assert_eq!(error.code(), "not_an_email");
/// ```
pub trait CustomValidationError: fmt::Debug + Send + Sync {
    /// Machine-readable error code.
    fn code(&self) -> &str;

    /// Human-readable description of the violated constraint.
    fn constraint_message(&self) -> String;
}

/// The reason a value was rejected by a validation stage.
///
/// The `Display` implementation renders the constraint message, e.g.
/// `must not be empty`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("must not be null")]
    ObjectIsNull,

    #[error("is not an instance of {expected}, but is {}", describe_current(.current))]
    ObjectMustBeInstanceOf {
        current: Option<String>,
        expected: String,
    },

    #[error("is not equals to {expected}")]
    ObjectMustBeEqualTo { expected: Value },

    #[error("must not be empty")]
    StringIsEmpty,

    #[error("must be {max_length} chars max, but is {current_length}")]
    StringIsTooLong {
        current_length: usize,
        max_length: usize,
    },

    #[error("is not parseable to Integer")]
    StringMustBeParseableToInteger,

    #[error("must match pattern {pattern}")]
    StringMustMatchPattern { pattern: String },

    #[error("must be > {reference}")]
    NumberMustBeGreaterThan { value: Value, reference: Value },

    #[error("must be >= {reference}")]
    NumberMustBeGreaterOrEqualTo { value: Value, reference: Value },

    #[error("must be < {reference}")]
    NumberMustBeLowerThan { value: Value, reference: Value },

    #[error("must be <= {reference}")]
    NumberMustBeLowerOrEqualTo { value: Value, reference: Value },

    #[error("must be between {min} and {max}")]
    NumberMustBeBetween { value: Value, min: Value, max: Value },

    #[error("is empty")]
    CollectionIsEmpty,

    /// A free-form message, used by predicate-based validation.
    #[error("{message}")]
    Generic { message: String },

    #[error("{}", .0.constraint_message())]
    Custom(Arc<dyn CustomValidationError>),
}

fn describe_current(current: &Option<String>) -> String {
    match current {
        Some(name) => format!("instance of {}", name),
        None => "null".to_string(),
    }
}

impl ValidationError {
    /// Creates a generic error carrying `message` as its constraint.
    pub fn generic(message: impl Into<String>) -> Self {
        ValidationError::Generic {
            message: message.into(),
        }
    }

    /// Wraps a user-defined error kind.
    pub fn custom(error: impl CustomValidationError + 'static) -> Self {
        ValidationError::Custom(Arc::new(error))
    }

    /// Returns the human-readable constraint, e.g. `must not be empty`.
    pub fn constraint_message(&self) -> String {
        self.to_string()
    }

    /// Returns the machine-readable error code.
    pub fn code(&self) -> &str {
        match self {
            ValidationError::ObjectIsNull => "object_is_null",
            ValidationError::ObjectMustBeInstanceOf { .. } => "object_must_be_instance_of",
            ValidationError::ObjectMustBeEqualTo { .. } => "object_must_be_equal_to",
            ValidationError::StringIsEmpty => "string_is_empty",
            ValidationError::StringIsTooLong { .. } => "string_is_too_long",
            ValidationError::StringMustBeParseableToInteger => {
                "string_must_be_parseable_to_integer"
            }
            ValidationError::StringMustMatchPattern { .. } => "string_must_match_pattern",
            ValidationError::NumberMustBeGreaterThan { .. } => "number_must_be_greater_than",
            ValidationError::NumberMustBeGreaterOrEqualTo { .. } => {
                "number_must_be_greater_or_equal_to"
            }
            ValidationError::NumberMustBeLowerThan { .. } => "number_must_be_lower_than",
            ValidationError::NumberMustBeLowerOrEqualTo { .. } => {
                "number_must_be_lower_or_equal_to"
            }
            ValidationError::NumberMustBeBetween { .. } => "number_must_be_between",
            ValidationError::CollectionIsEmpty => "collection_is_empty",
            ValidationError::Generic { .. } => "generic",
            ValidationError::Custom(custom) => custom.code(),
        }
    }
}

// Custom kinds are compared by code and rendered constraint.
impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        use ValidationError::*;

        match (self, other) {
            (ObjectIsNull, ObjectIsNull)
            | (StringIsEmpty, StringIsEmpty)
            | (StringMustBeParseableToInteger, StringMustBeParseableToInteger)
            | (CollectionIsEmpty, CollectionIsEmpty) => true,
            (
                ObjectMustBeInstanceOf { current: c1, expected: e1 },
                ObjectMustBeInstanceOf { current: c2, expected: e2 },
            ) => c1 == c2 && e1 == e2,
            (ObjectMustBeEqualTo { expected: e1 }, ObjectMustBeEqualTo { expected: e2 }) => {
                e1 == e2
            }
            (
                StringIsTooLong { current_length: c1, max_length: m1 },
                StringIsTooLong { current_length: c2, max_length: m2 },
            ) => c1 == c2 && m1 == m2,
            (StringMustMatchPattern { pattern: p1 }, StringMustMatchPattern { pattern: p2 }) => {
                p1 == p2
            }
            (
                NumberMustBeGreaterThan { value: v1, reference: r1 },
                NumberMustBeGreaterThan { value: v2, reference: r2 },
            )
            | (
                NumberMustBeGreaterOrEqualTo { value: v1, reference: r1 },
                NumberMustBeGreaterOrEqualTo { value: v2, reference: r2 },
            )
            | (
                NumberMustBeLowerThan { value: v1, reference: r1 },
                NumberMustBeLowerThan { value: v2, reference: r2 },
            )
            | (
                NumberMustBeLowerOrEqualTo { value: v1, reference: r1 },
                NumberMustBeLowerOrEqualTo { value: v2, reference: r2 },
            ) => v1 == v2 && r1 == r2,
            (
                NumberMustBeBetween { value: v1, min: a1, max: b1 },
                NumberMustBeBetween { value: v2, min: a2, max: b2 },
            ) => v1 == v2 && a1 == a2 && b1 == b2,
            (Generic { message: m1 }, Generic { message: m2 }) => m1 == m2,
            (Custom(c1), Custom(c2)) => {
                c1.code() == c2.code() && c1.constraint_message() == c2.constraint_message()
            }
            _ => false,
        }
    }
}
