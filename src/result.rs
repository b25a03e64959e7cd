//! The outcome of processing a value through a guard.

use stillwater::Validation;

use crate::error::{GuardFailure, GuardFailureError};
use crate::path::Path;

/// Either the processed value or the reason processing failed.
///
/// # Example
///
/// ```rust
/// use inputguard::GuardResult;
///
/// let result: GuardResult<i32> = GuardResult::success(42);
/// assert!(result.is_success());
/// assert_eq!(result.get(), 42);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GuardResult<T> {
    Success(T),
    Failure(GuardFailure),
}

impl<T> GuardResult<T> {
    /// Creates a successful result.
    pub fn success(value: T) -> Self {
        GuardResult::Success(value)
    }

    /// Creates a failed result.
    pub fn failure(failure: impl Into<GuardFailure>) -> Self {
        GuardResult::Failure(failure.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GuardResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns the processed value.
    ///
    /// # Panics
    ///
    /// Panics if this result is a failure. Check with
    /// [`is_success`](Self::is_success) first, or use
    /// [`get_or_throw`](Self::get_or_throw).
    pub fn get(self) -> T {
        match self {
            GuardResult::Success(value) => value,
            GuardResult::Failure(failure) => panic!(
                "cannot get the value of a failed result, check is_success() first: {}",
                failure
            ),
        }
    }

    /// Returns the processed value, or the failure wrapped in an error.
    pub fn get_or_throw(self) -> Result<T, GuardFailureError> {
        self.into_result().map_err(GuardFailureError::new)
    }

    /// Returns a reference to the processed value, if successful.
    pub fn value(&self) -> Option<&T> {
        match self {
            GuardResult::Success(value) => Some(value),
            GuardResult::Failure(_) => None,
        }
    }

    /// Returns a reference to the failure, if failed.
    pub fn failure_ref(&self) -> Option<&GuardFailure> {
        match self {
            GuardResult::Success(_) => None,
            GuardResult::Failure(failure) => Some(failure),
        }
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<T, GuardFailure> {
        match self {
            GuardResult::Success(value) => Ok(value),
            GuardResult::Failure(failure) => Err(failure),
        }
    }

    /// Transforms the successful value.
    pub fn map<U, F>(self, f: F) -> GuardResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            GuardResult::Success(value) => GuardResult::Success(f(value)),
            GuardResult::Failure(failure) => GuardResult::Failure(failure),
        }
    }

    /// Places a failure under `path`. Successes are returned unchanged.
    pub fn at_path(self, path: &Path) -> Self {
        match self {
            GuardResult::Success(value) => GuardResult::Success(value),
            GuardResult::Failure(failure) => GuardResult::Failure(failure.at_path(path)),
        }
    }

    /// Converts into a `stillwater` validation.
    pub fn into_validation(self) -> Validation<T, GuardFailure> {
        match self {
            GuardResult::Success(value) => Validation::Success(value),
            GuardResult::Failure(failure) => Validation::Failure(failure),
        }
    }
}

impl<T> From<Result<T, GuardFailure>> for GuardResult<T> {
    fn from(result: Result<T, GuardFailure>) -> Self {
        match result {
            Ok(value) => GuardResult::Success(value),
            Err(failure) => GuardResult::Failure(failure),
        }
    }
}

impl<T> From<Validation<T, GuardFailure>> for GuardResult<T> {
    fn from(validation: Validation<T, GuardFailure>) -> Self {
        match validation {
            Validation::Success(value) => GuardResult::Success(value),
            Validation::Failure(failure) => GuardResult::Failure(failure),
        }
    }
}

impl<T> From<GuardResult<T>> for Validation<T, GuardFailure> {
    fn from(result: GuardResult<T>) -> Self {
        result.into_validation()
    }
}
