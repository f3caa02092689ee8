//! The closed taxonomy of failures that the numerics can report.
//!
//! Every failure kind is its own type, so that a caller can catch exactly the
//! kinds it knows how to react to, and they all share the [`ExceptionRecord`]
//! capability so that generic code can report any of them. The taxonomy is:
//!
//! | Kind                  | Type                      | Payload                     |
//! | --------------------- | ------------------------- | --------------------------- |
//! | `RuntimeFailure`      | [`RuntimeFailure`]        | none beyond the context     |
//! | `BoundsFailure`       | [`BoundsFailure<T>`]      | value, min and max          |
//! | `LowerBoundFailure`   | [`LowerBoundFailure<T>`]  | bounds with `max = T::MAX`  |
//! | `UpperBoundFailure`   | [`UpperBoundFailure<T>`]  | bounds with `min = T::MIN`  |
//! | `InvalidValueFailure` | [`InvalidValueFailure<T>`]| value, truth and tolerance  |
//! | `SingularMatrixFailure` | [`SingularMatrixFailure`] | a row-major copy of the matrix |
//!
//! # Record Lifetime
//!
//! Records own everything they report. The message is formatted once, when the
//! record is constructed, and any payload that was borrowed at construction is
//! copied. A record therefore stays valid after the data that caused it is
//! gone, and reading its message never allocates.
//!
//! Records only _report_. They do not check that the reported condition is
//! actually a failure; that decision belongs to the detecting code.

pub mod bounds;
pub mod invalid_value;
pub mod runtime;
pub mod singular_matrix;

use std::fmt::Debug;

pub use bounds::{BoundsFailure, LowerBoundFailure, UpperBoundFailure};
pub use invalid_value::InvalidValueFailure;
pub use runtime::RuntimeFailure;
pub use singular_matrix::SingularMatrixFailure;

use crate::context::ErrorContext;

/// The discriminant for the failure kinds in the taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    /// A general failure that fits none of the other kinds.
    Runtime,

    /// A value outside of a two-sided range.
    Bounds,

    /// A value below a minimum.
    LowerBound,

    /// A value above a maximum.
    UpperBound,

    /// A value that differs from its expected value.
    InvalidValue,

    /// A matrix that could not be factored because it is singular.
    SingularMatrix,
}

impl ExceptionKind {
    /// Gets the stable name of the kind, which also prefixes every message of
    /// that kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Runtime => "RuntimeFailure",
            Self::Bounds => "BoundsFailure",
            Self::LowerBound => "LowerBoundFailure",
            Self::UpperBound => "UpperBoundFailure",
            Self::InvalidValue => "InvalidValueFailure",
            Self::SingularMatrix => "SingularMatrixFailure",
        }
    }
}

/// The operations that every failure record provides.
///
/// All of them are plain accessors: they are constant time and never
/// allocate.
///
/// # Self Bounds
///
/// - [`std::error::Error`] so that records interoperate with any other error
///   handling. The [`std::fmt::Display`] output is [`Self::message`].
/// - [`Send`] and `'static` so that a record can be used as an unwinding
///   payload by the [`crate::dispatch`] machinery.
pub trait ExceptionRecord
where
    Self: std::error::Error + Send + 'static,
{
    /// Gets the kind of this failure.
    fn kind(&self) -> ExceptionKind;

    /// Gets the stable name of this failure's kind.
    fn kind_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Gets the diagnostic message that was formatted at construction.
    fn message(&self) -> &str;

    /// Gets the call-site context the failure was detected in.
    fn context(&self) -> &ErrorContext;
}

/// The numeric types that can be carried as payload values.
///
/// This is implemented for every primitive integer and floating-point type.
pub trait Numeric
where
    Self: num_traits::Num + Copy + Debug + PartialOrd + Send + 'static,
{
}

impl<T> Numeric for T where T: num_traits::Num + Copy + Debug + PartialOrd + Send + 'static {}
