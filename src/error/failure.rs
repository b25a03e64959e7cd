//! Failure types produced by guards.
//!
//! A [`GuardFailure`] is one of three closed kinds:
//! - [`ValidationFailure`]: a validation stage rejected the value
//! - [`MappingFailure`]: a mapping stage returned an error
//! - [`MultiFailure`]: several failures gathered while iterating a collection
//!
//! Every failure carries a snapshot of the offending value and the [`Path`]
//! where it occurred. Paths start at the root and are re-scoped by enclosing
//! guards through [`GuardFailure::at_path`].

use std::fmt::{self, Display};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use stillwater::prelude::*;

use crate::error::{GuardFailureError, ValidationError};
use crate::path::Path;

/// The error returned by a mapping function.
pub type MappingCause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Captures `value` for inclusion in a failure.
///
/// Values that cannot be represented as JSON are captured as `null`.
pub(crate) fn snapshot<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|error| {
        tracing::warn!(%error, "offending value cannot be captured, recording null");
        Value::Null
    })
}

/// A validation stage rejected the value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    /// The rejected value.
    pub value: Value,
    /// Where the rejected value sits.
    pub path: Path,
    /// Why it was rejected.
    pub error: ValidationError,
}

impl ValidationFailure {
    /// Creates a failure at the root path.
    pub fn new(value: Value, error: ValidationError) -> Self {
        Self {
            value,
            path: Path::root(),
            error,
        }
    }

    /// Returns e.g. `Invalid name: must not be empty`.
    pub fn message(&self) -> String {
        format!("Invalid {}: {}", self.path, self.error.constraint_message())
    }

    /// Returns a copy of this failure placed under `outer`.
    pub fn at_path(&self, outer: &Path) -> Self {
        Self {
            value: self.value.clone(),
            path: self.path.at_path(outer),
            error: self.error.clone(),
        }
    }
}

/// A mapping stage returned an error.
#[derive(Debug, Clone)]
pub struct MappingFailure {
    /// The input of the mapping stage.
    pub value: Value,
    /// Where the input sits.
    pub path: Path,
    /// The error returned by the mapping function.
    pub cause: MappingCause,
}

impl MappingFailure {
    /// Creates a failure at the root path.
    pub fn new(value: Value, cause: MappingCause) -> Self {
        Self {
            value,
            path: Path::root(),
            cause,
        }
    }

    /// Creates a failure at the root path from a concrete error.
    pub fn from_error<E>(value: Value, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(value, Arc::new(error))
    }

    /// Returns e.g. `Mapping failed for age`.
    pub fn message(&self) -> String {
        format!("Mapping failed for {}", self.path)
    }

    /// Returns a copy of this failure placed under `outer`.
    pub fn at_path(&self, outer: &Path) -> Self {
        Self {
            value: self.value.clone(),
            path: self.path.at_path(outer),
            cause: Arc::clone(&self.cause),
        }
    }
}

// Causes are compared by their rendered message.
impl PartialEq for MappingFailure {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.path == other.path
            && self.cause.to_string() == other.cause.to_string()
    }
}

/// Several failures gathered while processing one value.
///
/// The contained failures keep their own paths, relative to the same root as
/// this failure's path.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiFailure {
    /// The value being processed (e.g. the whole collection).
    pub value: Value,
    /// Where the value sits.
    pub path: Path,
    /// The gathered failures, in encounter order.
    pub failures: NonEmptyVec<GuardFailure>,
}

impl MultiFailure {
    /// Creates a failure at the root path.
    pub fn new(value: Value, failures: NonEmptyVec<GuardFailure>) -> Self {
        Self {
            value,
            path: Path::root(),
            failures,
        }
    }

    /// Creates a failure at the root path, or None if `failures` is empty.
    pub fn from_vec(value: Value, failures: Vec<GuardFailure>) -> Option<Self> {
        NonEmptyVec::from_vec(failures).map(|failures| Self::new(value, failures))
    }

    /// Returns the number of gathered failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Always false: a multi-failure holds at least one failure.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the gathered failures.
    pub fn iter(&self) -> impl Iterator<Item = &GuardFailure> {
        self.failures.iter()
    }

    /// Returns the gathered failures located at `path`.
    pub fn failures_at(&self, path: &Path) -> Vec<&GuardFailure> {
        self.failures.iter().filter(|f| f.path() == path).collect()
    }

    /// Returns the header line followed by every gathered message, indented.
    pub fn message(&self) -> String {
        let mut message = format!("Multiple failures while processing {}:\n", self.path);
        for failure in self.failures.iter() {
            for line in format!("- {}", failure.message()).lines() {
                message.push_str("  ");
                message.push_str(line);
                message.push('\n');
            }
        }
        message
    }

    /// Returns a copy of this failure, and of every gathered failure, placed
    /// under `outer`.
    pub fn at_path(&self, outer: &Path) -> Self {
        let head = NonEmptyVec::singleton(self.failures.head().at_path(outer));
        let failures = self
            .failures
            .iter()
            .skip(1)
            .fold(head, |acc, failure| {
                acc.combine(NonEmptyVec::singleton(failure.at_path(outer)))
            });

        Self {
            value: self.value.clone(),
            path: self.path.at_path(outer),
            failures,
        }
    }
}

/// The failure of a guard.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardFailure {
    Validation(ValidationFailure),
    Mapping(MappingFailure),
    Multi(Box<MultiFailure>),
}

impl GuardFailure {
    /// Returns the offending value.
    pub fn value(&self) -> &Value {
        match self {
            GuardFailure::Validation(f) => &f.value,
            GuardFailure::Mapping(f) => &f.value,
            GuardFailure::Multi(f) => &f.value,
        }
    }

    /// Returns where the failure occurred.
    pub fn path(&self) -> &Path {
        match self {
            GuardFailure::Validation(f) => &f.path,
            GuardFailure::Mapping(f) => &f.path,
            GuardFailure::Multi(f) => &f.path,
        }
    }

    /// Returns the human-readable description of this failure.
    pub fn message(&self) -> String {
        match self {
            GuardFailure::Validation(f) => f.message(),
            GuardFailure::Mapping(f) => f.message(),
            GuardFailure::Multi(f) => f.message(),
        }
    }

    /// Returns a copy of this failure placed under `outer`.
    pub fn at_path(&self, outer: &Path) -> Self {
        match self {
            GuardFailure::Validation(f) => GuardFailure::Validation(f.at_path(outer)),
            GuardFailure::Mapping(f) => GuardFailure::Mapping(f.at_path(outer)),
            GuardFailure::Multi(f) => GuardFailure::Multi(Box::new(f.at_path(outer))),
        }
    }

    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            GuardFailure::Validation(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&MappingFailure> {
        match self {
            GuardFailure::Mapping(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_multi(&self) -> Option<&MultiFailure> {
        match self {
            GuardFailure::Multi(f) => Some(f),
            _ => None,
        }
    }

    /// Converts this failure into an error value.
    pub fn into_error(self) -> GuardFailureError {
        GuardFailureError::new(self)
    }
}

impl Display for GuardFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<ValidationFailure> for GuardFailure {
    fn from(failure: ValidationFailure) -> Self {
        GuardFailure::Validation(failure)
    }
}

impl From<MappingFailure> for GuardFailure {
    fn from(failure: MappingFailure) -> Self {
        GuardFailure::Mapping(failure)
    }
}

impl From<MultiFailure> for GuardFailure {
    fn from(failure: MultiFailure) -> Self {
        GuardFailure::Multi(Box::new(failure))
    }
}

// Failures cross thread boundaries when guards are shared.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<GuardFailure>();
    assert_sync::<GuardFailure>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_string_at(index: usize) -> GuardFailure {
        ValidationFailure::new(json!(""), ValidationError::StringIsEmpty)
            .at_path(&Path::index(index))
            .into()
    }

    #[test]
    fn test_validation_failure_message() {
        let failure = ValidationFailure::new(json!(""), ValidationError::StringIsEmpty);
        assert_eq!(failure.message(), "Invalid value: must not be empty");

        let failure = failure.at_path(&Path::property("name"));
        assert_eq!(failure.message(), "Invalid name: must not be empty");
    }

    #[test]
    fn test_mapping_failure_message_and_cause() {
        let error = "abc".parse::<i32>().unwrap_err();
        let failure = MappingFailure::from_error(json!("abc"), error.clone());

        assert_eq!(failure.message(), "Mapping failed for value");
        assert_eq!(failure.cause.to_string(), error.to_string());
        assert_eq!(
            failure.at_path(&Path::property("age")).message(),
            "Mapping failed for age"
        );
    }

    #[test]
    fn test_mapping_failure_equality() {
        let a = MappingFailure::from_error(json!("x"), "x".parse::<i32>().unwrap_err());
        let b = MappingFailure::from_error(json!("x"), "y".parse::<i32>().unwrap_err());
        let c = MappingFailure::from_error(json!("x"), "".parse::<i32>().unwrap_err());

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_multi_failure_from_empty_vec() {
        assert!(MultiFailure::from_vec(json!([]), Vec::new()).is_none());
    }

    #[test]
    fn test_multi_failure_message() {
        let multi =
            MultiFailure::from_vec(json!(["", ""]), vec![empty_string_at(0), empty_string_at(1)])
                .unwrap();

        assert_eq!(multi.len(), 2);
        assert_eq!(
            multi.message(),
            concat!(
                "Multiple failures while processing value:\n",
                "  - Invalid index [0]: must not be empty\n",
                "  - Invalid index [1]: must not be empty\n",
            )
        );
    }

    #[test]
    fn test_nested_multi_failure_message_is_indented() {
        let inner = MultiFailure::from_vec(json!([""]), vec![empty_string_at(0)]).unwrap();
        let inner: GuardFailure = GuardFailure::from(inner).at_path(&Path::index(1));
        let outer = MultiFailure::from_vec(json!([[""]]), vec![inner]).unwrap();

        assert_eq!(
            outer.message(),
            concat!(
                "Multiple failures while processing value:\n",
                "  - Multiple failures while processing index [1]:\n",
                "    - Invalid index [1][0]: must not be empty\n",
            )
        );
    }

    #[test]
    fn test_multi_failure_at_path_rescopes_children() {
        let multi =
            MultiFailure::from_vec(json!(["", ""]), vec![empty_string_at(0), empty_string_at(1)])
                .unwrap();
        let scoped = multi.at_path(&Path::property("myList"));

        assert_eq!(scoped.path.format(), "myList");
        let paths: Vec<String> = scoped.iter().map(|f| f.path().format()).collect();
        assert_eq!(paths, vec!["myList[0]", "myList[1]"]);
        assert_eq!(scoped.failures_at(&Path::index(1).at_property("myList")).len(), 1);
    }

    #[test]
    fn test_guard_failure_accessors() {
        let failure: GuardFailure =
            ValidationFailure::new(json!(null), ValidationError::ObjectIsNull).into();

        assert_eq!(failure.value(), &json!(null));
        assert!(failure.path().is_root());
        assert!(failure.as_validation().is_some());
        assert!(failure.as_mapping().is_none());
        assert!(failure.as_multi().is_none());
        assert_eq!(failure.to_string(), "Invalid value: must not be null");
    }

    #[test]
    fn test_snapshot_of_unserializable_value_is_null() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        assert_eq!(snapshot(&map), Value::Null);
        assert_eq!(snapshot(&vec!["a", "b"]), json!(["a", "b"]));
    }
}
