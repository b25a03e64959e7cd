//! Mapping guards.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{snapshot, MappingCause, MappingFailure};
use crate::guard::Guard;
use crate::result::GuardResult;

/// Type alias for the conversion stored in a [`Map`] guard.
pub type MapFn<I, O> = Arc<dyn Fn(&I) -> Result<O, MappingCause> + Send + Sync>;

/// A guard converting a value into another type.
///
/// An `Err` returned by the conversion becomes a
/// [`MappingFailure`] carrying the input value and the error as its cause.
/// Panics are not caught.
///
/// # Example
///
/// ```rust
/// use inputguard::{Guard, Map};
///
/// let parse = Map::new(|s: &String| s.parse::<i32>());
///
/// assert_eq!(parse.process("42".to_string()).get(), 42);
///
/// let result = parse.process("forty-two".to_string());
/// let failure = result.failure_ref().unwrap().as_mapping().unwrap();
/// assert_eq!(failure.cause.to_string(), "invalid digit found in string");
/// ```
pub struct Map<I, O> {
    function: MapFn<I, O>,
}

impl<I, O> Map<I, O> {
    /// Creates a mapping guard from a fallible conversion.
    ///
    /// Any error convertible into `Box<dyn Error + Send + Sync>` is accepted,
    /// including plain `String` messages.
    ///
    /// The guard only processes inputs implementing [`Serialize`]: the input
    /// of a failed conversion is kept in its failure as a `serde_json::Value`
    /// snapshot, not as the value itself.
    pub fn new<F, E>(function: F) -> Self
    where
        F: Fn(&I) -> Result<O, E> + Send + Sync + 'static,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self {
            function: Arc::new(move |input: &I| {
                function(input).map_err(|error| {
                    let error: Box<dyn Error + Send + Sync> = error.into();
                    MappingCause::from(error)
                })
            }),
        }
    }

    /// Creates a mapping guard from a conversion that cannot fail.
    pub fn infallible<F>(function: F) -> Self
    where
        F: Fn(&I) -> O + Send + Sync + 'static,
    {
        Self {
            function: Arc::new(move |input: &I| Ok::<_, MappingCause>(function(input))),
        }
    }
}

impl<I, O> Clone for Map<I, O> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
        }
    }
}

impl<I, O> fmt::Debug for Map<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").finish_non_exhaustive()
    }
}

impl<I: Serialize, O> Guard for Map<I, O> {
    type Input = I;
    type Output = O;

    fn process(&self, input: I) -> GuardResult<O> {
        match (self.function)(&input) {
            Ok(output) => GuardResult::success(output),
            Err(cause) => {
                tracing::debug!(error = %cause, "mapping failed");
                GuardResult::failure(MappingFailure::new(snapshot(&input), cause))
            }
        }
    }
}

then_by_chaining! {
    impl<I, O> for Map<I, O>;
}
