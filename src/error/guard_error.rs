//! Error types returned outside the failure channel.

use serde_json::Value;

use crate::error::failure::{GuardFailure, MappingCause};

/// A misconfigured guard or path, as opposed to bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    /// An index path was requested for a negative position.
    #[error("index path cannot be negative: {0}")]
    NegativeIndex(i64),

    /// A `UseDefault` null strategy was configured with an absent default.
    #[error("default value cannot be absent")]
    AbsentDefault,

    /// A range was configured with its minimum above its maximum.
    #[error("min value {min} is greater than max value {max}")]
    InvalidRange { min: Value, max: Value },

    /// A pattern failed to compile.
    #[error("invalid pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// The error returned by [`GuardResult::get_or_throw`](crate::GuardResult::get_or_throw).
///
/// Its message is the failure's rendered [`message`](GuardFailure::message).
/// For mapping failures, [`source`](std::error::Error::source) is the error
/// returned by the mapping function.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{failure}")]
pub struct GuardFailureError {
    failure: GuardFailure,
    #[source]
    cause: Option<MappingCause>,
}

impl GuardFailureError {
    /// Wraps a failure.
    pub fn new(failure: GuardFailure) -> Self {
        let cause = match &failure {
            GuardFailure::Mapping(mapping) => Some(mapping.cause.clone()),
            _ => None,
        };
        Self { failure, cause }
    }

    /// Returns the wrapped failure.
    pub fn failure(&self) -> &GuardFailure {
        &self.failure
    }

    /// Unwraps the failure.
    pub fn into_failure(self) -> GuardFailure {
        self.failure
    }
}

impl From<GuardFailure> for GuardFailureError {
    fn from(failure: GuardFailure) -> Self {
        Self::new(failure)
    }
}
