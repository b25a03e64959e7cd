//! Collection-building policies for iteration guards.
//!
//! An [`IterationGuard`](crate::IterationGuard) hands the outputs of its
//! element guard to a [`Collector`], in iteration order, once every element
//! succeeded. Closures `Fn(Vec<T>) -> C` are collectors too.
//!
//! # Example
//!
//! ```rust
//! use inputguard::collector::{self, Collector};
//!
//! assert_eq!(collector::to_vec().collect(vec![1, 2]), vec![1, 2]);
//!
//! let total = |values: Vec<i32>| values.into_iter().sum::<i32>();
//! assert_eq!(total.collect(vec![1, 2, 3]), 6);
//! ```

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexSet;

/// Builds the output collection of an iteration guard.
pub trait Collector<T> {
    /// The collection produced.
    type Output;

    /// Builds the collection from the processed elements, in iteration order.
    fn collect(&self, elements: Vec<T>) -> Self::Output;
}

impl<T, C, F> Collector<T> for F
where
    F: Fn(Vec<T>) -> C,
{
    type Output = C;

    fn collect(&self, elements: Vec<T>) -> C {
        self(elements)
    }
}

/// Collects into a `Vec`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToVec;

impl<T> Collector<T> for ToVec {
    type Output = Vec<T>;

    fn collect(&self, elements: Vec<T>) -> Vec<T> {
        elements
    }
}

/// Collects into an immutable, cheaply cloneable `Arc<[T]>`.
///
/// This is the default list policy of the builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToSharedSlice;

impl<T> Collector<T> for ToSharedSlice {
    type Output = Arc<[T]>;

    fn collect(&self, elements: Vec<T>) -> Arc<[T]> {
        Arc::from(elements)
    }
}

/// Collects into an insertion-ordered [`IndexSet`].
///
/// Elements mapped to equal outputs are merged, keeping the first position.
/// This is the default set policy of the builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToIndexSet;

impl<T: Hash + Eq> Collector<T> for ToIndexSet {
    type Output = IndexSet<T>;

    fn collect(&self, elements: Vec<T>) -> IndexSet<T> {
        elements.into_iter().collect()
    }
}

/// Collects into any `C: FromIterator<T>`.
pub struct FromIter<C>(PhantomData<fn() -> C>);

impl<C> Clone for FromIter<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for FromIter<C> {}

impl<C> Default for FromIter<C> {
    fn default() -> Self {
        FromIter(PhantomData)
    }
}

impl<C> fmt::Debug for FromIter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FromIter<{}>", std::any::type_name::<C>())
    }
}

impl<T, C: FromIterator<T>> Collector<T> for FromIter<C> {
    type Output = C;

    fn collect(&self, elements: Vec<T>) -> C {
        elements.into_iter().collect()
    }
}

pub fn to_vec() -> ToVec {
    ToVec
}

pub fn to_shared_slice() -> ToSharedSlice {
    ToSharedSlice
}

pub fn to_index_set() -> ToIndexSet {
    ToIndexSet
}

/// Collects into `C`, e.g. `from_iter::<BTreeSet<_>>()`.
pub fn from_iter<C>() -> FromIter<C> {
    FromIter::default()
}
