//! Fluent construction of guard pipelines.
//!
//! A [`GuardBuilder`] starts from a [`NoOp`] and appends one guard per
//! method call with [`Then::and_then`], in declaration order. Every
//! composition rule of [`Then`] applies: in particular, steps declared after
//! [`if_null`](GuardBuilder::if_null) are governed by its null strategy.
//!
//! # Example
//!
//! ```rust
//! use inputguard::{builder, sanitizers, validators, Guard, NullStrategy};
//!
//! let guard = builder::<Option<String>>()
//!     .if_null(NullStrategy::fail())
//!     .sanitize_present(sanitizers::strip)
//!     .validate_present(validators::not_empty)
//!     .build();
//!
//! assert_eq!(guard.process(Some(" a ".to_string())).get(), Some("a".to_string()));
//! assert!(guard.process(Some("  ".to_string())).is_failure());
//! assert!(guard.process(None).is_failure());
//! ```

use std::error::Error;
use std::hash::Hash;

use serde::Serialize;

use crate::collector::{Collector, ToIndexSet, ToSharedSlice};
use crate::error::ValidationError;
use crate::guard::{
    Guard, IterationGuard, Map, NoOp, NullStrategy, NullStrategyGuard, Nullable, Sanitize,
    SkipOutput, Then, Validate,
};

/// A pipeline under construction. See the [module documentation](self).
#[derive(Debug, Clone)]
pub struct GuardBuilder<G> {
    guard: G,
}

/// Starts a pipeline over values of type `T`.
pub fn builder<T>() -> GuardBuilder<NoOp<T>> {
    GuardBuilder::new()
}

impl<T> GuardBuilder<NoOp<T>> {
    pub fn new() -> Self {
        Self { guard: NoOp::new() }
    }
}

impl<T> Default for GuardBuilder<NoOp<T>> {
    fn default() -> Self {
        Self::new()
    }
}

/// The guard built by appending `N` to `G`.
type Appended<G, N> = GuardBuilder<<G as Then<N>>::Composed>;

/// The iteration guard appended by the `process_*` methods.
type Each<G, T, E, K> = IterationGuard<<G as Guard>::Output, T, E, K>;

impl<G: Guard> GuardBuilder<G> {
    /// Appends an arbitrary guard.
    ///
    /// After [`if_null`](Self::if_null), `next` must implement
    /// [`FollowsNullStrategy`](crate::FollowsNullStrategy). Every guard of
    /// this crate does; wrap a guard type of your own with
    /// [`Guard::boxed`] first.
    pub fn apply<N>(self, next: N) -> Appended<G, N>
    where
        G: Then<N>,
        N: Guard<Input = <G as Guard>::Output>,
    {
        GuardBuilder {
            guard: self.guard.and_then(next),
        }
    }

    /// Appends a [`Sanitize`] guard.
    pub fn sanitize<F>(self, function: F) -> Appended<G, Sanitize<<G as Guard>::Output>>
    where
        G: Then<Sanitize<<G as Guard>::Output>>,
        F: Fn(<G as Guard>::Output) -> <G as Guard>::Output + Send + Sync + 'static,
    {
        self.apply(Sanitize::new(function))
    }

    /// Appends a [`Validate`] guard.
    pub fn validate<F>(self, function: F) -> Appended<G, Validate<<G as Guard>::Output>>
    where
        G: Then<Validate<<G as Guard>::Output>>,
        <G as Guard>::Output: Serialize,
        F: Fn(&<G as Guard>::Output) -> Option<ValidationError> + Send + Sync + 'static,
    {
        self.apply(Validate::new(function))
    }

    /// Appends a [`Validate`] guard failing with a generic error carrying
    /// `message` when `predicate` is false.
    pub fn validate_that<P>(
        self,
        predicate: P,
        message: impl Into<String>,
    ) -> Appended<G, Validate<<G as Guard>::Output>>
    where
        G: Then<Validate<<G as Guard>::Output>>,
        <G as Guard>::Output: Serialize,
        P: Fn(&<G as Guard>::Output) -> bool + Send + Sync + 'static,
    {
        self.apply(Validate::predicate(predicate, message))
    }

    /// Appends a [`Map`] guard.
    pub fn map<O, F, E>(self, function: F) -> Appended<G, Map<<G as Guard>::Output, O>>
    where
        G: Then<Map<<G as Guard>::Output, O>>,
        <G as Guard>::Output: Serialize,
        F: Fn(&<G as Guard>::Output) -> Result<O, E> + Send + Sync + 'static,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.apply(Map::new(function))
    }

    /// Appends a null strategy governing every step declared after it.
    ///
    /// A [`skip_process`](NullStrategy::skip_process) strategy requires every
    /// following step to keep a [`Nullable`] output. The other strategies
    /// may be followed by steps of any output type.
    pub fn if_null<S>(
        self,
        strategy: NullStrategy<<G as Guard>::Output, S>,
    ) -> Appended<G, NullStrategyGuard<NoOp<<G as Guard>::Output>, S>>
    where
        G: Then<NullStrategyGuard<NoOp<<G as Guard>::Output>, S>>,
        <G as Guard>::Output: Nullable + Clone,
        S: SkipOutput<<G as Guard>::Output>,
    {
        self.apply(NullStrategyGuard::new(strategy, NoOp::new()))
    }

    /// Appends an [`IterationGuard`] over a sequenced collection.
    pub fn process_each<T, E, K>(
        self,
        element_guard: E,
        collector: K,
    ) -> Appended<G, Each<G, T, E, K>>
    where
        G: Then<Each<G, T, E, K>>,
        <G as Guard>::Output: Serialize,
        for<'a> &'a <G as Guard>::Output: IntoIterator<Item = &'a T>,
        T: Clone,
        E: Guard<Input = T>,
        K: Collector<E::Output>,
    {
        self.apply(IterationGuard::sequenced(element_guard, collector))
    }

    /// Appends an [`IterationGuard`] over an unordered collection.
    pub fn process_each_unordered<T, E, K>(
        self,
        element_guard: E,
        collector: K,
    ) -> Appended<G, Each<G, T, E, K>>
    where
        G: Then<Each<G, T, E, K>>,
        <G as Guard>::Output: Serialize,
        for<'a> &'a <G as Guard>::Output: IntoIterator<Item = &'a T>,
        T: Clone,
        E: Guard<Input = T>,
        K: Collector<E::Output>,
    {
        self.apply(IterationGuard::unordered(element_guard, collector))
    }

    /// Appends an [`IterationGuard`] over a sequenced collection, processing
    /// only the elements accepted by `filter`.
    pub fn filter_and_process_each<T, F, E, K>(
        self,
        filter: F,
        element_guard: E,
        collector: K,
    ) -> Appended<G, Each<G, T, E, K>>
    where
        G: Then<Each<G, T, E, K>>,
        <G as Guard>::Output: Serialize,
        for<'a> &'a <G as Guard>::Output: IntoIterator<Item = &'a T>,
        T: Clone,
        F: Fn(&T) -> bool + Send + Sync + 'static,
        E: Guard<Input = T>,
        K: Collector<E::Output>,
    {
        self.apply(IterationGuard::sequenced(element_guard, collector).filter(filter))
    }

    /// Processes each element of a list, collecting into an `Arc<[_]>`.
    pub fn process_list<T, E>(self, element_guard: E) -> Appended<G, Each<G, T, E, ToSharedSlice>>
    where
        G: Then<Each<G, T, E, ToSharedSlice>>,
        <G as Guard>::Output: Serialize,
        for<'a> &'a <G as Guard>::Output: IntoIterator<Item = &'a T>,
        T: Clone,
        E: Guard<Input = T>,
    {
        self.process_each(element_guard, ToSharedSlice)
    }

    /// Processes each element of a set, collecting into an
    /// [`IndexSet`](indexmap::IndexSet).
    pub fn process_set<T, E>(self, element_guard: E) -> Appended<G, Each<G, T, E, ToIndexSet>>
    where
        G: Then<Each<G, T, E, ToIndexSet>>,
        <G as Guard>::Output: Serialize,
        for<'a> &'a <G as Guard>::Output: IntoIterator<Item = &'a T>,
        T: Clone,
        E: Guard<Input = T>,
        E::Output: Hash + Eq,
    {
        self.process_each_unordered(element_guard, ToIndexSet)
    }

    /// Returns the built guard.
    pub fn build(self) -> G {
        self.guard
    }
}

impl<G, T> GuardBuilder<G>
where
    G: Guard<Output = Option<T>>,
    T: 'static,
{
    /// Appends a [`Sanitize`] guard applied to present values only.
    pub fn sanitize_present<F>(self, function: F) -> Appended<G, Sanitize<Option<T>>>
    where
        G: Then<Sanitize<Option<T>>>,
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.apply(Sanitize::new(move |value: Option<T>| value.map(&function)))
    }

    /// Appends a [`Validate`] guard applied to present values only.
    pub fn validate_present<F>(self, function: F) -> Appended<G, Validate<Option<T>>>
    where
        G: Then<Validate<Option<T>>>,
        T: Serialize,
        F: Fn(&T) -> Option<ValidationError> + Send + Sync + 'static,
    {
        self.apply(Validate::new(move |value: &Option<T>| {
            value.as_ref().and_then(&function)
        }))
    }
}
