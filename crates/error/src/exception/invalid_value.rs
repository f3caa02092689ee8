//! Failures for values that differ from what they are supposed to be.

use num_traits::Float;
use thiserror::Error;

use crate::{
    context::ErrorContext,
    exception::{ExceptionKind, ExceptionRecord, Numeric},
    format::format_message,
};

/// A value that is not equal to its expected `truth`, optionally to within a
/// `tolerance`.
///
/// The message is formatted at construction as one of:
///
/// ```text
/// InvalidValueFailure: VALUE != TRUTH. CUSTOM_MESSAGE FUNC (FILE:LINE)
/// InvalidValueFailure: VALUE != TRUTH ± TOLERANCE. CUSTOM_MESSAGE FUNC (FILE:LINE)
/// ```
///
/// depending on whether a tolerance was provided.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct InvalidValueFailure<T: Numeric> {
    context:   ErrorContext,
    value:     T,
    truth:     T,
    tolerance: Option<T>,
    message:   String,
}

impl<T: Numeric> InvalidValueFailure<T> {
    /// Constructs a failure for `value` not being exactly `truth`, detected in
    /// `context`.
    #[must_use]
    pub fn new(context: ErrorContext, value: T, truth: T) -> Self {
        let message = format_message(
            ExceptionKind::InvalidValue,
            &context,
            Some(format_args!("{value:?} != {truth:?}.")),
        );
        Self {
            context,
            value,
            truth,
            tolerance: None,
            message,
        }
    }

    /// Gets the invalid value.
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    /// Gets the value that [`Self::value`] was supposed to be.
    #[must_use]
    pub fn truth(&self) -> T {
        self.truth
    }

    /// Gets the maximum acceptable error in `|value - truth|`, if the failure
    /// was constructed with one.
    #[must_use]
    pub fn tolerance(&self) -> Option<T> {
        self.tolerance
    }
}

impl<T: Numeric + Float> InvalidValueFailure<T> {
    /// Constructs a failure for `value` not being within `tolerance` of
    /// `truth`, detected in `context`.
    ///
    /// A tolerance is only meaningful for floating-point values, so this
    /// constructor does not exist for other value types.
    ///
    /// ```
    /// use ol_errors::exception::{ExceptionRecord, InvalidValueFailure};
    ///
    /// let failure =
    ///     InvalidValueFailure::<f64>::with_tolerance(ol_errors::context!(), 1.0, 2.0, 0.01);
    /// assert!(failure.message().contains("± 0.01"));
    /// ```
    ///
    /// ```compile_fail
    /// use ol_errors::exception::InvalidValueFailure;
    ///
    /// let failure = InvalidValueFailure::<i32>::with_tolerance(ol_errors::context!(), 1, 2, 0);
    /// ```
    #[must_use]
    pub fn with_tolerance(context: ErrorContext, value: T, truth: T, tolerance: T) -> Self {
        let message = format_message(
            ExceptionKind::InvalidValue,
            &context,
            Some(format_args!("{value:?} != {truth:?} ± {tolerance:?}.")),
        );
        Self {
            context,
            value,
            truth,
            tolerance: Some(tolerance),
            message,
        }
    }
}

impl<T: Numeric> ExceptionRecord for InvalidValueFailure<T> {
    fn kind(&self) -> ExceptionKind {
        ExceptionKind::InvalidValue
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn context(&self) -> &ErrorContext {
        &self.context
    }
}

#[cfg(test)]
mod test {
    use crate::{
        context::ErrorContext,
        exception::{ExceptionRecord, InvalidValueFailure},
    };

    #[test]
    fn exact_mismatch_for_integers() {
        let failure = InvalidValueFailure::<i32>::new(ErrorContext::empty(), 3, 4);

        assert_eq!(failure.value(), 3);
        assert_eq!(failure.truth(), 4);
        assert_eq!(failure.tolerance(), None);
        assert_eq!(failure.message(), "InvalidValueFailure: 3 != 4.");
    }

    #[test]
    fn tolerance_is_reported() {
        let failure = InvalidValueFailure::<f64>::with_tolerance(
            crate::context!("Gradient check failed."),
            1.0,
            2.0,
            0.01,
        );

        assert_eq!(failure.tolerance(), Some(0.01));
        assert_eq!(failure.kind_name(), "InvalidValueFailure");
        assert!(failure
            .message()
            .starts_with("InvalidValueFailure: 1.0 != 2.0 ± 0.01. Gradient check failed. "));
    }

    #[test]
    fn single_precision_supports_tolerance() {
        let failure =
            InvalidValueFailure::<f32>::with_tolerance(ErrorContext::empty(), 0.5, 0.25, 0.125);

        assert_eq!(failure.message(), "InvalidValueFailure: 0.5 != 0.25 ± 0.125.");
    }
}
