//! # Inputguard
//!
//! Composable guards that sanitize, validate and map input values, reporting
//! every problem with the location of the offending value.
//!
//! ## Overview
//!
//! A guard is a processing stage from an input value to a [`GuardResult`]:
//! either a success carrying the output, or a [`GuardFailure`]. Guards are
//! immutable and composed with [`Then::and_then`] into pipelines. A failing
//! stage stops its pipeline, except inside an [`IterationGuard`], which
//! processes every element of a collection and gathers all element failures
//! into one [`MultiFailure`].
//!
//! Every failure carries a snapshot of the offending value and a [`Path`]
//! such as `users[2].email`, built from the inside out as results leave
//! nested guards.
//!
//! ## Core Types
//!
//! - [`Guard`] and [`Then`]: processing and composition
//! - [`Sanitize`], [`Validate`], [`Map`]: the primitive stages
//! - [`NullStrategyGuard`]: decides what happens to absent values
//! - [`IterationGuard`]: processes collections element by element
//! - [`GuardBuilder`]: fluent construction of pipelines
//! - [`GuardResult`], [`GuardFailure`], [`ValidationError`]: outcomes
//!
//! ## Example
//!
//! ```rust
//! use inputguard::prelude::*;
//! use inputguard::{sanitizers, validators};
//!
//! let email = builder::<Option<String>>()
//!     .if_null(NullStrategy::fail())
//!     .sanitize_present(sanitizers::strip)
//!     .sanitize_present(sanitizers::to_lower_case)
//!     .validate_present(validators::matches_pattern::<String>(r"[^@]+@[^@]+").unwrap())
//!     .build();
//!
//! let result = email.process_property(Some(" Me@Example.org ".to_string()), "email");
//! assert_eq!(result.get(), Some("me@example.org".to_string()));
//!
//! let result = email.process_property(None, "email");
//! assert_eq!(result.failure_ref().unwrap().message(), "Invalid email: must not be null");
//! ```

pub mod builder;
pub mod collector;
pub mod error;
pub mod guard;
pub mod path;
pub mod result;
pub mod sanitizers;
pub mod validators;

pub use builder::{builder, GuardBuilder};
pub use collector::Collector;
pub use error::{
    CustomValidationError, GuardError, GuardFailure, GuardFailureError, MappingCause,
    MappingFailure, MultiFailure, ValidationError, ValidationFailure,
};
pub use guard::{
    chain, guard_fn, noop, BoxedGuard, Chain, ElementOrder, FnGuard, FollowsNullStrategy, Guard,
    IterationGuard, Map, MaySkip, NeverSkip, NoOp, NullStrategy, NullStrategyGuard, Nullable,
    PresentValue, Sanitize, SkipOutput, Then, Validate,
};
pub use path::Path;
pub use result::GuardResult;

/// The types needed to build and run guards.
pub mod prelude {
    pub use crate::builder::{builder, GuardBuilder};
    pub use crate::guard::{
        BoxedGuard, Guard, IterationGuard, Map, NoOp, NullStrategy, NullStrategyGuard, Sanitize,
        Then, Validate,
    };
    pub use crate::path::Path;
    pub use crate::result::GuardResult;
}
