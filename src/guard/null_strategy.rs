//! Absent-value handling.
//!
//! A [`NullStrategyGuard`] sits in front of a downstream guard and decides
//! what happens when the input is absent (see [`Nullable`]). Present values
//! always flow through to the downstream guard.
//!
//! Appending a guard to a null-strategy guard appends it to the downstream
//! guard, so the strategy governs everything declared after it. Appending
//! another null-strategy guard chains the two instead: the second strategy
//! then governs what follows it.
//!
//! Only [`NullStrategy::SkipProcess`] needs an absent output value. The skip
//! marker of the strategy type records whether it can occur, so `Fail`,
//! `Process` and `UseDefault` can guard a stage mapping to any type.

use std::fmt;

use serde_json::Value;

use crate::error::{GuardError, ValidationError, ValidationFailure};
use crate::guard::{
    BoxedGuard, Chain, FnGuard, Guard, IterationGuard, Map, NoOp, Sanitize, Then, Validate,
};
use crate::result::GuardResult;

/// Values that can be absent.
pub trait Nullable: Sized {
    /// Returns `true` if this value is the absent value.
    fn is_absent(&self) -> bool;

    /// The absent value of this type.
    fn absent() -> Self;
}

impl<T> Nullable for Option<T> {
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn absent() -> Self {
        None
    }
}

impl Nullable for Value {
    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn absent() -> Self {
        Value::Null
    }
}

/// A default value statically known to be present.
///
/// Only [`NullStrategy::use_default`] creates one, after checking the value.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentValue<T>(T);

impl<T> PresentValue<T> {
    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Skip marker of strategies that may skip the downstream guard.
///
/// A skipped guard yields the absent value of its output, so the output must
/// be [`Nullable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaySkip;

/// Skip marker of strategies that never skip the downstream guard.
///
/// It has no values, so a `NullStrategy<T, NeverSkip>` cannot be
/// `SkipProcess` and puts no requirement on the guarded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeverSkip {}

/// Produces the output of a skipped guard.
pub trait SkipOutput<O> {
    fn skipped(&self) -> O;
}

impl<O: Nullable> SkipOutput<O> for MaySkip {
    fn skipped(&self) -> O {
        O::absent()
    }
}

impl<O> SkipOutput<O> for NeverSkip {
    fn skipped(&self) -> O {
        match *self {}
    }
}

/// What to do with an absent input.
///
/// `S` is the skip marker. [`skip_process`](NullStrategy::skip_process)
/// builds a [`MaySkip`] strategy, the other constructors build [`NeverSkip`]
/// strategies, which can guard stages with any output type. A `NeverSkip`
/// strategy converts into a `MaySkip` one with `into()`.
#[derive(Debug, Clone, PartialEq)]
pub enum NullStrategy<T, S = MaySkip> {
    /// Pass the absent value to the downstream guard.
    Process,
    /// Succeed with the absent value without invoking the downstream guard.
    SkipProcess(S),
    /// Fail with [`ValidationError::ObjectIsNull`].
    Fail,
    /// Replace the absent value with a default, then invoke the downstream
    /// guard.
    UseDefault(PresentValue<T>),
}

impl<T> NullStrategy<T, MaySkip> {
    pub fn skip_process() -> Self {
        NullStrategy::SkipProcess(MaySkip)
    }
}

impl<T> NullStrategy<T, NeverSkip> {
    pub fn process() -> Self {
        NullStrategy::Process
    }

    pub fn fail() -> Self {
        NullStrategy::Fail
    }
}

impl<T: Nullable> NullStrategy<T, NeverSkip> {
    /// Creates a strategy replacing absent values with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::AbsentDefault`] if `value` is itself absent.
    pub fn use_default(value: T) -> Result<Self, GuardError> {
        if value.is_absent() {
            return Err(GuardError::AbsentDefault);
        }
        Ok(NullStrategy::UseDefault(PresentValue(value)))
    }
}

impl<T> From<NullStrategy<T, NeverSkip>> for NullStrategy<T, MaySkip> {
    fn from(strategy: NullStrategy<T, NeverSkip>) -> Self {
        match strategy {
            NullStrategy::Process => NullStrategy::Process,
            NullStrategy::SkipProcess(never) => match never {},
            NullStrategy::Fail => NullStrategy::Fail,
            NullStrategy::UseDefault(default) => NullStrategy::UseDefault(default),
        }
    }
}

/// A guard applying a [`NullStrategy`] before its downstream guard.
///
/// # Example
///
/// ```rust
/// use inputguard::prelude::*;
///
/// let upper = NullStrategyGuard::new(
///     NullStrategy::use_default(Some("n/a".to_string())).unwrap(),
///     Sanitize::new(|s: Option<String>| s.map(|s| s.to_uppercase())),
/// );
///
/// assert_eq!(upper.process(None).get(), Some("N/A".to_string()));
/// assert_eq!(upper.process(Some("x".to_string())).get(), Some("X".to_string()));
///
/// // Strategies that never skip can guard stages with non-nullable output.
/// let parse = NullStrategyGuard::new(
///     NullStrategy::fail(),
///     Map::new(|s: &Option<String>| s.as_deref().unwrap_or_default().parse::<i32>()),
/// );
///
/// assert_eq!(parse.process(Some("12".to_string())).get(), 12);
/// assert!(parse.process(None).is_failure());
/// ```
pub struct NullStrategyGuard<G: Guard, S = MaySkip> {
    strategy: NullStrategy<G::Input, S>,
    downstream: G,
}

impl<G: Guard, S> NullStrategyGuard<G, S> {
    pub fn new(strategy: NullStrategy<G::Input, S>, downstream: G) -> Self {
        Self { strategy, downstream }
    }

    pub fn strategy(&self) -> &NullStrategy<G::Input, S> {
        &self.strategy
    }

    pub fn downstream(&self) -> &G {
        &self.downstream
    }

    /// Splits this guard into its strategy and downstream guard.
    pub fn into_parts(self) -> (NullStrategy<G::Input, S>, G) {
        (self.strategy, self.downstream)
    }
}

impl<G, S> Clone for NullStrategyGuard<G, S>
where
    G: Guard + Clone,
    G::Input: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy.clone(),
            downstream: self.downstream.clone(),
        }
    }
}

impl<G, S> fmt::Debug for NullStrategyGuard<G, S>
where
    G: Guard + fmt::Debug,
    G::Input: fmt::Debug,
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullStrategyGuard")
            .field("strategy", &self.strategy)
            .field("downstream", &self.downstream)
            .finish()
    }
}

impl<G, S> Guard for NullStrategyGuard<G, S>
where
    G: Guard,
    G::Input: Nullable + Clone,
    S: SkipOutput<G::Output>,
{
    type Input = G::Input;
    type Output = G::Output;

    fn process(&self, input: G::Input) -> GuardResult<G::Output> {
        if !input.is_absent() {
            return self.downstream.process(input);
        }

        match &self.strategy {
            NullStrategy::Process => self.downstream.process(input),
            NullStrategy::SkipProcess(skip) => {
                tracing::trace!("absent input, skipping downstream guard");
                GuardResult::success(skip.skipped())
            }
            NullStrategy::Fail => {
                tracing::trace!("absent input rejected");
                GuardResult::failure(ValidationFailure::new(
                    Value::Null,
                    ValidationError::ObjectIsNull,
                ))
            }
            NullStrategy::UseDefault(default) => {
                tracing::trace!("absent input replaced by default");
                self.downstream.process(default.get().clone())
            }
        }
    }
}

/// Guards that can be appended to a [`NullStrategyGuard<G, S>`].
///
/// This is the composition rule of [`NullStrategyGuard`]: most guards are
/// pushed into the downstream guard, while another null-strategy guard is
/// chained after it.
///
/// Every guard type of this crate implements it. A guard type defined
/// elsewhere can be appended once erased with [`Guard::boxed`], or by
/// implementing this trait: split `previous` with
/// [`NullStrategyGuard::into_parts`] and return
/// `NullStrategyGuard::new(strategy, downstream.and_then(self))`.
pub trait FollowsNullStrategy<G: Guard, S>: Guard<Input = G::Output> + Sized {
    /// The guard produced by the composition.
    type Composed: Guard<Input = G::Input, Output = Self::Output>;

    /// Appends this guard after `previous`.
    fn follow(self, previous: NullStrategyGuard<G, S>) -> Self::Composed;
}

impl<G, S, Next> Then<Next> for NullStrategyGuard<G, S>
where
    G: Guard,
    G::Input: Nullable + Clone,
    S: SkipOutput<G::Output>,
    Next: FollowsNullStrategy<G, S>,
{
    type Composed = Next::Composed;

    fn and_then(self, next: Next) -> Self::Composed {
        next.follow(self)
    }
}

impl<G, S, H, R> FollowsNullStrategy<G, S> for NullStrategyGuard<H, R>
where
    G: Guard,
    G::Input: Nullable + Clone,
    S: SkipOutput<G::Output>,
    H: Guard<Input = G::Output>,
    H::Input: Nullable + Clone,
    R: SkipOutput<H::Output>,
{
    type Composed = Chain<NullStrategyGuard<G, S>, NullStrategyGuard<H, R>>;

    fn follow(self, previous: NullStrategyGuard<G, S>) -> Self::Composed {
        Chain::new(previous, self)
    }
}

macro_rules! follows_by_push_down {
    ($(impl<$($param:ident),*> for $ty:ty;)+) => {$(
        impl<G, S, $($param),*> FollowsNullStrategy<G, S> for $ty
        where
            G: Then<$ty>,
            <G as Guard>::Input: Nullable + Clone,
            $ty: Guard<Input = <G as Guard>::Output>,
            S: SkipOutput<<$ty as Guard>::Output>,
        {
            type Composed = NullStrategyGuard<<G as Then<$ty>>::Composed, S>;

            fn follow(self, previous: NullStrategyGuard<G, S>) -> Self::Composed {
                NullStrategyGuard {
                    strategy: previous.strategy,
                    downstream: previous.downstream.and_then(self),
                }
            }
        }
    )+};
}

follows_by_push_down! {
    impl<T> for NoOp<T>;
    impl<T> for Sanitize<T>;
    impl<T> for Validate<T>;
    impl<I, O> for Map<I, O>;
    impl<A, B> for Chain<A, B>;
    impl<C, T, E, K> for IterationGuard<C, T, E, K>;
    impl<I, O> for BoxedGuard<I, O>;
    impl<I, O> for FnGuard<I, O>;
}
