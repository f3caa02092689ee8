//! The failure reporting layer for the optimal learning numerics.
//!
//! Numerical routines such as matrix factorizations, optimizers and
//! Gaussian-process regression detect failures, but they do not decide how a
//! failure leaves the routine. Instead they describe it with one of the records
//! in the closed [`exception`] taxonomy, and hand it to the
//! [`dispatch`](dispatch::dispatch) function. That function is the single point
//! at which a failure leaves normal control flow.
//!
//! # Process Overview
//!
//! 1. The detecting code captures its call site as an
//!    [`ErrorContext`](context::ErrorContext), usually via [`context!`].
//! 2. It constructs a record, which formats its diagnostic message exactly
//!    once. Reading the message afterwards is a plain accessor.
//! 3. It dispatches the record, which never returns.
//!
//! The [`raise!`] macro performs all three steps at once, and is how failures
//! should be reported in almost every case:
//!
//! ```
//! use ol_errors::exception::{BoundsFailure, ExceptionRecord};
//!
//! fn check_dimension(dim: i32) {
//!     if !(1..=128).contains(&dim) {
//!         ol_errors::raise!(BoundsFailure<i32>, "Invalid dimension.", dim, 1, 128);
//!     }
//! }
//!
//! # #[cfg(not(feature = "exceptions-disabled"))]
//! # {
//! let failure = ol_errors::dispatch::catch_exception::<BoundsFailure<i32>, _, _>(|| {
//!     check_dimension(0);
//! })
//! .unwrap_err();
//!
//! assert!(failure.message().starts_with("BoundsFailure: 0 is not in range [1, 128]."));
//! # }
//! ```
//!
//! # Build Configuration
//!
//! Whether dispatching unwinds or calls an integrator-provided terminal
//! handler is decided by the `exceptions-enabled` (default) and
//! `exceptions-disabled` Cargo features. See the [`mod@dispatch`] module for
//! details.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

pub mod context;
pub mod dispatch;
pub mod exception;
mod format;

pub use context::{ErrorContext, SourceLocation};
pub use dispatch::dispatch;
pub use exception::{ExceptionKind, ExceptionRecord};
