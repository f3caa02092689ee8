//! Failures for values that fall outside of their permitted range.
//!
//! There is a single record type, [`BoundsFailure`], for the two-sided and the
//! one-sided cases. The one-sided cases are constructor presets that pin the
//! unused bound to the extreme of the value type:
//!
//! - [`LowerBoundFailure`] reports `value < min` and sets `max` to the largest
//!   representable value.
//! - [`UpperBoundFailure`] reports `value > max` and sets `min` to the lowest
//!   representable value (the most negative one for floating-point types).
//!
//! As the presets produce a [`BoundsFailure`], code that catches a
//! [`BoundsFailure<T>`] also catches the one-sided failures for the same `T`.
//! They can be told apart through [`ExceptionRecord::kind`].

use std::marker::PhantomData;

use num_traits::Bounded;
use thiserror::Error;

use crate::{
    context::ErrorContext,
    exception::{ExceptionKind, ExceptionRecord, Numeric},
    format::format_message,
};

/// A value that is not in the range `[min, max]`.
///
/// The message is formatted at construction as:
///
/// ```text
/// KIND: VALUE is not in range [MIN, MAX]. CUSTOM_MESSAGE FUNC (FILE:LINE)
/// ```
///
/// where `KIND` is the name of the two-sided or one-sided kind the record was
/// constructed as.
///
/// No check is made that `min <= max`, or that `value` actually lies outside of
/// the range.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct BoundsFailure<T: Numeric> {
    context: ErrorContext,
    kind:    ExceptionKind,
    value:   T,
    min:     T,
    max:     T,
    message: String,
}

impl<T: Numeric> BoundsFailure<T> {
    /// Constructs a failure for `value` lying outside of `[min, max]`, detected
    /// in `context`.
    #[must_use]
    pub fn new(context: ErrorContext, value: T, min: T, max: T) -> Self {
        Self::of_kind(ExceptionKind::Bounds, context, value, min, max)
    }

    fn of_kind(kind: ExceptionKind, context: ErrorContext, value: T, min: T, max: T) -> Self {
        let message = format_message(
            kind,
            &context,
            Some(format_args!("{value:?} is not in range [{min:?}, {max:?}].")),
        );
        Self {
            context,
            kind,
            value,
            min,
            max,
            message,
        }
    }

    /// Gets the value that violated its bounds.
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    /// Gets the minimum bound for the value.
    #[must_use]
    pub fn min(&self) -> T {
        self.min
    }

    /// Gets the maximum bound for the value.
    #[must_use]
    pub fn max(&self) -> T {
        self.max
    }
}

impl<T: Numeric> ExceptionRecord for BoundsFailure<T> {
    fn kind(&self) -> ExceptionKind {
        self.kind
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn context(&self) -> &ErrorContext {
        &self.context
    }
}

/// The constructor preset for a value that is below its minimum.
///
/// This type is never instantiated; [`LowerBoundFailure::new`] produces a
/// [`BoundsFailure`] whose kind is [`ExceptionKind::LowerBound`].
#[derive(Debug)]
pub struct LowerBoundFailure<T>(PhantomData<fn() -> T>);

impl<T: Numeric + Bounded> LowerBoundFailure<T> {
    /// Constructs a failure for `value` lying below `min`, detected in
    /// `context`.
    ///
    /// The maximum bound is set to the largest value representable by `T`.
    #[must_use]
    #[allow(clippy::new_ret_no_self)] // The one-sided kinds are presets, not types
    pub fn new(context: ErrorContext, value: T, min: T) -> BoundsFailure<T> {
        BoundsFailure::of_kind(
            ExceptionKind::LowerBound,
            context,
            value,
            min,
            T::max_value(),
        )
    }
}

/// The constructor preset for a value that is above its maximum.
///
/// This type is never instantiated; [`UpperBoundFailure::new`] produces a
/// [`BoundsFailure`] whose kind is [`ExceptionKind::UpperBound`].
#[derive(Debug)]
pub struct UpperBoundFailure<T>(PhantomData<fn() -> T>);

impl<T: Numeric + Bounded> UpperBoundFailure<T> {
    /// Constructs a failure for `value` lying above `max`, detected in
    /// `context`.
    ///
    /// The minimum bound is set to the lowest value representable by `T`.
    #[must_use]
    #[allow(clippy::new_ret_no_self)] // The one-sided kinds are presets, not types
    pub fn new(context: ErrorContext, value: T, max: T) -> BoundsFailure<T> {
        BoundsFailure::of_kind(
            ExceptionKind::UpperBound,
            context,
            value,
            T::min_value(),
            max,
        )
    }
}
