// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the cadence call-coalescing library
//!
//! Every wrapper in `cadence` reports failures through [`CadenceError`]:
//! construction-time validation failures, cancelled deferred results, and
//! failures raised by the wrapped target itself.
//!
//! # Examples
//!
//! ```
//! use cadence_error::{CadenceError, Result};
//!
//! fn validate(ms: f64) -> Result<()> {
//!     if ms.is_finite() && ms >= 0.0 {
//!         Ok(())
//!     } else {
//!         Err(CadenceError::invalid_duration(format!("{ms} is not a usable duration")))
//!     }
//! }
//!
//! assert!(validate(-1.0).is_err());
//! ```

use std::sync::Arc;

/// Root error type for all cadence operations
///
/// The error is cheap to clone: a single target failure is shared by every
/// deferred result that was coalesced into the same invocation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CadenceError {
    /// A wrapper was constructed with a duration the scheduler cannot use
    ///
    /// Raised synchronously by the constructor, never from a scheduled call.
    #[error("Invalid duration: {reason}")]
    InvalidDuration {
        /// Why the duration was rejected
        reason: String,
    },

    /// The pending invocation was cancelled before it fired
    ///
    /// Deferred results handed out by `debounce_async` settle with this error
    /// when their window is cancelled or the wrapper is dropped.
    #[error("Pending invocation was cancelled")]
    Cancelled,

    /// User-provided target panicked
    ///
    /// Panics raised by a timer-driven invocation are caught at the task
    /// boundary and converted to this variant.
    #[error("Target panicked: {context}")]
    CallbackPanic {
        /// The panic payload, when it was a string
        context: String,
    },

    /// Error returned by the wrapped target
    #[error("User error: {0}")]
    UserError(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl CadenceError {
    /// Create an invalid duration error with the given reason
    pub fn invalid_duration(reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            reason: reason.into(),
        }
    }

    /// Create a callback panic error with the given context
    pub fn callback_panic(context: impl Into<String>) -> Self {
        Self::CallbackPanic {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }

    /// Returns `true` if this error reports a cancelled invocation
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if the error originated in the wrapped target
    ///
    /// Target failures are never retried; they are delivered once to whoever
    /// observes the coalesced call.
    #[must_use]
    pub const fn is_target_failure(&self) -> bool {
        matches!(self, Self::UserError(_) | Self::CallbackPanic { .. })
    }
}

/// Specialized Result type for cadence operations
///
/// # Examples
///
/// ```
/// use cadence_error::Result;
///
/// fn build() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Extension trait for converting errors into `CadenceError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoCadenceError {
    /// Convert this error into a `CadenceError`
    fn into_cadence_error(self) -> CadenceError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoCadenceError for E {
    fn into_cadence_error(self) -> CadenceError {
        CadenceError::user_error(self)
    }
}
