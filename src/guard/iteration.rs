//! Guards over collections.
//!
//! An [`IterationGuard`] runs an element guard on every element accepted by
//! its filter. Every element is processed, even after a failure, so that all
//! failures are reported at once:
//! - sequenced collections tag each failure with the element's index
//! - unordered collections tag each failure with an element path
//!
//! If no element fails, the outputs are handed to a [`Collector`] in
//! iteration order.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use stillwater::prelude::*;

use crate::collector::Collector;
use crate::error::{snapshot, GuardFailure, MultiFailure};
use crate::guard::Guard;
use crate::path::Path;
use crate::result::GuardResult;

/// Type alias for the element filter of an [`IterationGuard`].
pub type FilterFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// How element failures are located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementOrder {
    /// Elements have stable positions: failures are tagged `[index]`.
    Sequenced,
    /// Elements have no positions: failures are tagged `[?]`.
    Unordered,
}

/// A guard processing each element of a collection `C` of `T`.
///
/// `C` must implement `Serialize`: a failure keeps a `serde_json::Value`
/// snapshot of the whole collection.
///
/// # Example
///
/// ```rust
/// use inputguard::{collector, validators, Guard, IterationGuard, Validate};
///
/// let guard = IterationGuard::<Vec<String>, _, _, _>::sequenced(
///     Validate::new(validators::not_empty::<String>),
///     collector::to_vec(),
/// );
///
/// let result = guard.process(vec!["".into(), "abc".into(), "".into()]);
/// let failure = result.failure_ref().unwrap().as_multi().unwrap();
///
/// let paths: Vec<String> = failure.iter().map(|f| f.path().to_string()).collect();
/// assert_eq!(paths, vec!["index [0]", "index [2]"]);
/// ```
pub struct IterationGuard<C, T, E, K> {
    filter: FilterFn<T>,
    element_guard: E,
    collector: K,
    order: ElementOrder,
    _collection: PhantomData<fn(C)>,
}

impl<C, T, E, K> IterationGuard<C, T, E, K>
where
    E: Guard<Input = T>,
    K: Collector<E::Output>,
{
    pub fn new(order: ElementOrder, element_guard: E, collector: K) -> Self {
        Self {
            filter: Arc::new(|_: &T| true),
            element_guard,
            collector,
            order,
            _collection: PhantomData,
        }
    }

    /// Creates a guard over a collection with stable element positions.
    pub fn sequenced(element_guard: E, collector: K) -> Self {
        Self::new(ElementOrder::Sequenced, element_guard, collector)
    }

    /// Creates a guard over a collection without element positions.
    pub fn unordered(element_guard: E, collector: K) -> Self {
        Self::new(ElementOrder::Unordered, element_guard, collector)
    }

    /// Only processes elements for which `filter` returns `true`.
    ///
    /// Rejected elements are dropped from the output. They keep their
    /// position, so indexes in failure paths refer to the unfiltered
    /// collection.
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.filter = Arc::new(filter);
        self
    }

    pub fn order(&self) -> ElementOrder {
        self.order
    }

    pub fn element_guard(&self) -> &E {
        &self.element_guard
    }

    fn element_path(&self, index: usize) -> Path {
        match self.order {
            ElementOrder::Sequenced => Path::index(index),
            ElementOrder::Unordered => Path::element(),
        }
    }

    fn assemble(
        &self,
        input: &C,
        outputs: Vec<E::Output>,
        failures: Vec<GuardFailure>,
    ) -> GuardResult<K::Output>
    where
        C: Serialize,
    {
        match NonEmptyVec::from_vec(failures) {
            Some(failures) => {
                tracing::debug!(failures = failures.len(), "collection has invalid elements");
                GuardResult::failure(MultiFailure::new(snapshot(input), failures))
            }
            None => {
                tracing::trace!(elements = outputs.len(), "collection processed");
                GuardResult::success(self.collector.collect(outputs))
            }
        }
    }
}

impl<C, T, E, K> IterationGuard<C, T, E, K>
where
    C: Serialize + Sync,
    for<'a> &'a C: IntoIterator<Item = &'a T>,
    T: Clone + Sync,
    E: Guard<Input = T> + Sync,
    E::Output: Send,
    K: Collector<E::Output>,
{
    /// Processes the elements in parallel.
    ///
    /// The result is identical to [`Guard::process`]: failures and outputs
    /// keep their iteration order.
    pub fn process_parallel(&self, input: C) -> GuardResult<K::Output> {
        let elements: Vec<(usize, &T)> = (&input)
            .into_iter()
            .enumerate()
            .filter(|(_, element)| (self.filter)(*element))
            .collect();

        let element_guard = &self.element_guard;
        let results: Vec<(usize, GuardResult<E::Output>)> = elements
            .into_par_iter()
            .map(|(index, element)| (index, element_guard.process(element.clone())))
            .collect();

        let mut outputs = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (index, result) in results {
            match result {
                GuardResult::Success(output) => outputs.push(output),
                GuardResult::Failure(failure) => {
                    failures.push(failure.at_path(&self.element_path(index)))
                }
            }
        }

        self.assemble(&input, outputs, failures)
    }
}

impl<C, T, E, K> Clone for IterationGuard<C, T, E, K>
where
    E: Clone,
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            filter: Arc::clone(&self.filter),
            element_guard: self.element_guard.clone(),
            collector: self.collector.clone(),
            order: self.order,
            _collection: PhantomData,
        }
    }
}

impl<C, T, E: fmt::Debug, K> fmt::Debug for IterationGuard<C, T, E, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterationGuard")
            .field("order", &self.order)
            .field("element_guard", &self.element_guard)
            .finish_non_exhaustive()
    }
}

impl<C, T, E, K> Guard for IterationGuard<C, T, E, K>
where
    C: Serialize,
    for<'a> &'a C: IntoIterator<Item = &'a T>,
    T: Clone,
    E: Guard<Input = T>,
    K: Collector<E::Output>,
{
    type Input = C;
    type Output = K::Output;

    fn process(&self, input: C) -> GuardResult<K::Output> {
        let mut outputs = Vec::new();
        let mut failures = Vec::new();

        for (index, element) in (&input).into_iter().enumerate() {
            if !(self.filter)(element) {
                continue;
            }
            match self.element_guard.process(element.clone()) {
                GuardResult::Success(output) => outputs.push(output),
                GuardResult::Failure(failure) => {
                    failures.push(failure.at_path(&self.element_path(index)))
                }
            }
        }

        self.assemble(&input, outputs, failures)
    }
}

then_by_chaining! {
    impl<C, T, E, K> for IterationGuard<C, T, E, K>;
}
