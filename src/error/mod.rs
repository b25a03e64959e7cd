//! Failure and error types.
//!
//! Failures ([`GuardFailure`]) describe bad input and travel in the result
//! channel. Errors ([`GuardError`]) describe misconfigured guards and are
//! returned by checked constructors.

mod failure;
mod guard_error;
mod validation_error;

pub(crate) use failure::snapshot;
pub use failure::{GuardFailure, MappingCause, MappingFailure, MultiFailure, ValidationFailure};
pub use guard_error::{GuardError, GuardFailureError};
pub use validation_error::{CustomValidationError, ValidationError};
