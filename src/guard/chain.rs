//! Sequential composition of two guards.

use crate::guard::{Guard, Then};
use crate::result::GuardResult;

/// Runs `first`, then feeds its output to `second`.
///
/// If `first` fails, `second` is never invoked and the failure is returned
/// unchanged. Appending to a chain appends to its second stage, so chains are
/// always right-nested: `(a >> b) >> c` has the shape of `a >> (b >> c)`.
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }
}

/// Creates a [`Chain`] running `first` then `second`.
///
/// Unlike [`Then::and_then`], this always builds a chain, whatever the types
/// of the two guards.
pub fn chain<A, B>(first: A, second: B) -> Chain<A, B>
where
    A: Guard,
    B: Guard<Input = A::Output>,
{
    Chain::new(first, second)
}

impl<A, B> Guard for Chain<A, B>
where
    A: Guard,
    B: Guard<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn process(&self, input: A::Input) -> GuardResult<B::Output> {
        match self.first.process(input) {
            GuardResult::Success(value) => self.second.process(value),
            GuardResult::Failure(failure) => GuardResult::Failure(failure),
        }
    }
}

impl<A, B, Next> Then<Next> for Chain<A, B>
where
    A: Guard,
    B: Guard<Input = A::Output> + Then<Next>,
    Next: Guard<Input = B::Output>,
{
    type Composed = Chain<A, B::Composed>;

    fn and_then(self, next: Next) -> Self::Composed {
        Chain::new(self.first, self.second.and_then(next))
    }
}
