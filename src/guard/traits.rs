//! Traits for guard processing and composition.
//!
//! [`Guard`] is the processing contract. [`Then`] is sequential
//! composition; every guard type implements it with its own rule:
//! - [`NoOp`](super::NoOp) returns the appended guard itself
//! - [`Chain`](super::Chain) pushes the appended guard into its second stage
//! - [`NullStrategyGuard`](super::NullStrategyGuard) pushes it into its
//!   downstream guard, unless it is another null-strategy guard
//! - every other guard wraps itself and the appended guard in a
//!   [`Chain`](super::Chain)

use crate::guard::BoxedGuard;
use crate::path::Path;
use crate::result::GuardResult;

/// A processing stage from an input value to a [`GuardResult`].
///
/// Guards hold no mutable state. They are built once and may be invoked any
/// number of times, from any number of threads.
///
/// # Example
///
/// ```rust
/// use inputguard::prelude::*;
/// use inputguard::validators;
///
/// let guard = Sanitize::new(|s: String| s.trim().to_string())
///     .and_then(Validate::new(validators::not_empty));
///
/// assert_eq!(guard.process("  hi ".to_string()).get(), "hi");
///
/// let result = guard.process_property("   ".to_string(), "name");
/// assert_eq!(
///     result.failure_ref().unwrap().message(),
///     "Invalid name: must not be empty"
/// );
/// ```
pub trait Guard {
    /// The type of value this guard accepts.
    type Input;

    /// The type of value this guard produces on success.
    type Output;

    /// Processes a value.
    fn process(&self, input: Self::Input) -> GuardResult<Self::Output>;

    /// Processes a value, placing any failure under the property `property`.
    fn process_property(&self, input: Self::Input, property: &str) -> GuardResult<Self::Output> {
        self.process(input).at_path(&Path::property(property))
    }

    /// Returns a guard running `before` first, then this guard.
    fn compose<B>(self, before: B) -> B::Composed
    where
        Self: Sized,
        B: Guard<Output = Self::Input> + Then<Self>,
    {
        before.and_then(self)
    }

    /// Erases the concrete type of this guard.
    fn boxed(self) -> BoxedGuard<Self::Input, Self::Output>
    where
        Self: Sized + Send + Sync + 'static,
    {
        BoxedGuard::new(self)
    }
}

/// Sequential composition of guards.
///
/// `a.and_then(b)` runs `a`, and only if it succeeds feeds its output into
/// `b`. On failure `b` is never invoked and the failure is returned unchanged.
pub trait Then<Next>: Guard + Sized
where
    Next: Guard<Input = Self::Output>,
{
    /// The guard produced by the composition.
    type Composed: Guard<Input = Self::Input, Output = Next::Output>;

    /// Appends `next` after this guard.
    fn and_then(self, next: Next) -> Self::Composed;
}
