//! Guards and their composition.
//!
//! This module provides the [`Guard`] trait, its [`Then`] composition, and
//! the primitive guards:
//! - [`NoOp`]: returns its input unchanged
//! - [`Sanitize`]: transforms the value, cannot fail
//! - [`Validate`]: accepts the value or rejects it with a
//!   [`ValidationError`](crate::ValidationError)
//! - [`Map`]: converts the value to a new type, turning errors into failures
//! - [`Chain`]: runs two guards in sequence
//! - [`NullStrategyGuard`]: decides how absent values reach the next guard
//! - [`IterationGuard`]: processes every element of a collection
//! - [`BoxedGuard`] and [`FnGuard`]: type-erased and closure-backed guards

/// Implements [`Then`] by wrapping `self` and the appended guard in a [`Chain`].
macro_rules! then_by_chaining {
    ($(impl<$($param:ident),*> for $ty:ty;)+) => {$(
        impl<$($param,)* Next> $crate::guard::Then<Next> for $ty
        where
            $ty: $crate::guard::Guard,
            Next: $crate::guard::Guard<Input = <$ty as $crate::guard::Guard>::Output>,
        {
            type Composed = $crate::guard::Chain<$ty, Next>;

            fn and_then(self, next: Next) -> Self::Composed {
                $crate::guard::Chain::new(self, next)
            }
        }
    )+};
}

mod chain;
mod dynamic;
mod iteration;
mod map;
mod noop;
mod null_strategy;
mod sanitize;
mod traits;
mod validate;

pub use chain::{chain, Chain};
pub use dynamic::{guard_fn, BoxedGuard, FnGuard};
pub use iteration::{ElementOrder, FilterFn, IterationGuard};
pub use map::{Map, MapFn};
pub use noop::{noop, NoOp};
pub use null_strategy::{
    FollowsNullStrategy, MaySkip, NeverSkip, NullStrategy, NullStrategyGuard, Nullable,
    PresentValue, SkipOutput,
};
pub use sanitize::{Sanitize, SanitizeFn};
pub use traits::{Guard, Then};
pub use validate::{Validate, ValidateFn};
