//! Validation guards.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{snapshot, ValidationError, ValidationFailure};
use crate::guard::Guard;
use crate::result::GuardResult;

/// Type alias for the check stored in a [`Validate`] guard.
pub type ValidateFn<T> = Arc<dyn Fn(&T) -> Option<ValidationError> + Send + Sync>;

/// A guard that accepts the value unchanged or rejects it.
///
/// The function returns `None` for a valid value, or the
/// [`ValidationError`] describing the violated constraint. A panic inside the
/// function is not converted into a failure.
///
/// # Example
///
/// ```rust
/// use inputguard::{Guard, Validate, ValidationError};
///
/// let positive =
///     Validate::new(|n: &i32| (*n <= 0).then(|| ValidationError::generic("must be positive")));
///
/// assert!(positive.process(3).is_success());
/// assert_eq!(
///     positive.process(-3).failure_ref().unwrap().message(),
///     "Invalid value: must be positive"
/// );
/// ```
pub struct Validate<T> {
    function: ValidateFn<T>,
}

impl<T> Validate<T> {
    /// Creates a validation guard from `function`.
    ///
    /// The guard only processes inputs implementing [`Serialize`]: a rejected
    /// value is kept in its failure as a `serde_json::Value` snapshot, not as
    /// the value itself. To check other types, project them to a
    /// serializable value with a [`guard_fn`](crate::guard_fn) first.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&T) -> Option<ValidationError> + Send + Sync + 'static,
    {
        Self {
            function: Arc::new(function),
        }
    }

    /// Creates a guard rejecting values for which `predicate` is false with a
    /// generic error carrying `message`.
    pub fn predicate<P>(predicate: P, message: impl Into<String>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let message = message.into();
        Self::new(move |value| {
            (!predicate(value)).then(|| ValidationError::generic(message.clone()))
        })
    }
}

impl<T> Clone for Validate<T> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
        }
    }
}

impl<T> fmt::Debug for Validate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validate").finish_non_exhaustive()
    }
}

impl<T: Serialize> Guard for Validate<T> {
    type Input = T;
    type Output = T;

    fn process(&self, input: T) -> GuardResult<T> {
        match (self.function)(&input) {
            None => GuardResult::success(input),
            Some(error) => GuardResult::failure(ValidationFailure::new(snapshot(&input), error)),
        }
    }
}

then_by_chaining! {
    impl<T> for Validate<T>;
}
