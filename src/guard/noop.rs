//! The identity guard.

use std::fmt;
use std::marker::PhantomData;

use crate::guard::{Guard, Then};
use crate::result::GuardResult;

/// A guard that returns its input unchanged, as a success.
///
/// `NoOp` is the identity of composition: `noop().and_then(g)` returns `g`
/// itself.
pub struct NoOp<T>(PhantomData<fn(T) -> T>);

impl<T> NoOp<T> {
    pub fn new() -> Self {
        NoOp(PhantomData)
    }
}

/// Creates a [`NoOp`] guard.
pub fn noop<T>() -> NoOp<T> {
    NoOp::new()
}

impl<T> Default for NoOp<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for NoOp<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NoOp<T> {}

impl<T> fmt::Debug for NoOp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NoOp")
    }
}

impl<T> Guard for NoOp<T> {
    type Input = T;
    type Output = T;

    fn process(&self, input: T) -> GuardResult<T> {
        GuardResult::success(input)
    }
}

impl<T, Next> Then<Next> for NoOp<T>
where
    Next: Guard<Input = T>,
{
    type Composed = Next;

    fn and_then(self, next: Next) -> Next {
        next
    }
}
