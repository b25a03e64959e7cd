//! Sanitization guards.

use std::fmt;
use std::sync::Arc;

use crate::guard::Guard;
use crate::result::GuardResult;

/// Type alias for the transformation stored in a [`Sanitize`] guard.
pub type SanitizeFn<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// A guard that transforms the value and always succeeds.
///
/// The function is expected to be total: a panic inside it is not converted
/// into a failure and propagates to the caller.
///
/// # Example
///
/// ```rust
/// use inputguard::{Guard, Sanitize};
///
/// let strip = Sanitize::new(|s: String| s.trim().to_string());
/// assert_eq!(strip.process("  text ".to_string()).get(), "text");
/// ```
pub struct Sanitize<T> {
    function: SanitizeFn<T>,
}

impl<T> Sanitize<T> {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self {
            function: Arc::new(function),
        }
    }
}

impl<T> Clone for Sanitize<T> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
        }
    }
}

impl<T> fmt::Debug for Sanitize<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sanitize").finish_non_exhaustive()
    }
}

impl<T> Guard for Sanitize<T> {
    type Input = T;
    type Output = T;

    fn process(&self, input: T) -> GuardResult<T> {
        GuardResult::success((self.function)(input))
    }
}

then_by_chaining! {
    impl<T> for Sanitize<T>;
}
