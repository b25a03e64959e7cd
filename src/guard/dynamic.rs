//! Type-erased and closure-backed guards.

use std::fmt;
use std::sync::Arc;

use crate::guard::Guard;
use crate::result::GuardResult;

/// A guard whose concrete type has been erased.
///
/// Useful to store guards of different shapes behind one type, or to keep
/// composed types short. Cloning is cheap.
pub struct BoxedGuard<I, O> {
    inner: Arc<dyn Guard<Input = I, Output = O> + Send + Sync>,
}

impl<I, O> BoxedGuard<I, O> {
    pub fn new<G>(guard: G) -> Self
    where
        G: Guard<Input = I, Output = O> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(guard),
        }
    }
}

impl<I, O> Clone for BoxedGuard<I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I, O> fmt::Debug for BoxedGuard<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedGuard").finish_non_exhaustive()
    }
}

impl<I, O> Guard for BoxedGuard<I, O> {
    type Input = I;
    type Output = O;

    fn process(&self, input: I) -> GuardResult<O> {
        self.inner.process(input)
    }
}

/// A guard backed by a closure returning a [`GuardResult`].
pub struct FnGuard<I, O> {
    function: Arc<dyn Fn(I) -> GuardResult<O> + Send + Sync>,
}

/// Creates a guard from a closure.
///
/// # Example
///
/// ```rust
/// use inputguard::{guard_fn, Guard, GuardResult, ValidationError, ValidationFailure};
/// use serde_json::json;
///
/// let even = guard_fn(|n: i64| {
///     if n % 2 == 0 {
///         GuardResult::success(n / 2)
///     } else {
///         let error = ValidationError::generic("must be even");
///         GuardResult::failure(ValidationFailure::new(json!(n), error))
///     }
/// });
///
/// assert_eq!(even.process(8).get(), 4);
/// assert!(even.process(3).is_failure());
/// ```
pub fn guard_fn<I, O, F>(function: F) -> FnGuard<I, O>
where
    F: Fn(I) -> GuardResult<O> + Send + Sync + 'static,
{
    FnGuard {
        function: Arc::new(function),
    }
}

impl<I, O> Clone for FnGuard<I, O> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
        }
    }
}

impl<I, O> fmt::Debug for FnGuard<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGuard").finish_non_exhaustive()
    }
}

impl<I, O> Guard for FnGuard<I, O> {
    type Input = I;
    type Output = O;

    fn process(&self, input: I) -> GuardResult<O> {
        (self.function)(input)
    }
}

then_by_chaining! {
    impl<I, O> for BoxedGuard<I, O>;
    impl<I, O> for FnGuard<I, O>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::{Sanitize, Then};

    #[test]
    fn test_boxed_guard_delegates() {
        let guard: BoxedGuard<String, String> = Sanitize::new(|s: String| s.to_uppercase()).boxed();
        assert_eq!(guard.process("abc".to_string()).get(), "ABC");
    }

    #[test]
    fn test_boxed_guards_share_one_type() {
        let guards: Vec<BoxedGuard<i32, i32>> = vec![
            Sanitize::new(|n: i32| n + 1).boxed(),
            Sanitize::new(|n: i32| n * 2).and_then(Sanitize::new(|n: i32| n - 1)).boxed(),
        ];

        let outputs: Vec<i32> = guards.iter().map(|g| g.process(5).get()).collect();
        assert_eq!(outputs, vec![6, 9]);
    }

    #[test]
    fn test_fn_guard_chains() {
        let guard = guard_fn(|s: String| GuardResult::success(s.len()))
            .and_then(Sanitize::new(|n: usize| n * 2));
        assert_eq!(guard.process("abc".to_string()).get(), 6);
    }
}
