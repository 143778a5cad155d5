// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Validated wrapper durations.
//!
//! Every constructor accepts `impl IntoWindow`, so durations coming from
//! untyped sources (floating-point milliseconds) are checked once, at
//! construction time, instead of misbehaving inside the scheduler.

use cadence_error::{CadenceError, Result};
use core::time::Duration;

/// A duration that has been accepted by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Window(Duration);

impl Window {
    /// The validated duration.
    #[must_use]
    pub const fn duration(self) -> Duration {
        self.0
    }
}

impl From<Window> for Duration {
    fn from(window: Window) -> Self {
        window.0
    }
}

/// Conversion into a validated [`Window`].
///
/// Implemented for [`Duration`], `u64` milliseconds and `f64` milliseconds.
///
/// # Example
///
/// ```
/// use cadence::{IntoWindow, Window};
/// use std::time::Duration;
///
/// assert_eq!(250_u64.into_window().unwrap().duration(), Duration::from_millis(250));
/// assert!((-1.0_f64).into_window().is_err());
/// assert!(f64::NAN.into_window().is_err());
/// ```
pub trait IntoWindow {
    /// Validate and convert.
    ///
    /// # Errors
    ///
    /// Returns [`CadenceError::InvalidDuration`] for negative, non-finite or
    /// overflowing values.
    fn into_window(self) -> Result<Window>;
}

impl IntoWindow for Window {
    fn into_window(self) -> Result<Window> {
        Ok(self)
    }
}

impl IntoWindow for Duration {
    fn into_window(self) -> Result<Window> {
        Ok(Window(self))
    }
}

impl IntoWindow for u64 {
    fn into_window(self) -> Result<Window> {
        Ok(Window(Duration::from_millis(self)))
    }
}

impl IntoWindow for f64 {
    fn into_window(self) -> Result<Window> {
        if self.is_nan() {
            return Err(CadenceError::invalid_duration("NaN milliseconds"));
        }
        if self.is_infinite() {
            return Err(CadenceError::invalid_duration(format!(
                "{self} milliseconds is not finite"
            )));
        }
        if self < 0.0 {
            return Err(CadenceError::invalid_duration(format!(
                "{self} milliseconds is negative"
            )));
        }

        // Rounded to whole nanoseconds so that 1.5 means exactly 1500us
        let nanos = (self * 1_000_000.0).round();
        if nanos >= u64::MAX as f64 {
            return Err(CadenceError::invalid_duration(format!(
                "{self} milliseconds overflows the timer"
            )));
        }
        Ok(Window(Duration::from_nanos(nanos as u64)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_milliseconds_are_kept() {
        let window = 1.5_f64.into_window().unwrap();
        assert_eq!(window.duration(), Duration::from_micros(1500));
    }

    #[test]
    fn zero_is_a_valid_window() {
        assert_eq!(0.0_f64.into_window().unwrap().duration(), Duration::ZERO);
        assert_eq!(0_u64.into_window().unwrap().duration(), Duration::ZERO);
    }

    #[test]
    fn rejects_unusable_values() {
        for ms in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, f64::MAX] {
            let err = ms.into_window().unwrap_err();
            assert!(matches!(err, CadenceError::InvalidDuration { .. }), "{ms}: {err}");
        }
    }
}
