//! The single point through which every detected failure leaves normal control
//! flow.
//!
//! Code in the numerics never unwinds or aborts directly. It instead hands a
//! failure record to [`dispatch`], most often through the
//! [`raise!`](crate::raise!) macro, and what happens next is fixed for the
//! whole build by a Cargo feature:
//!
//! - **`exceptions-enabled`** (the default): the record becomes the payload of
//!   a native unwind. Callers further up the stack can catch it by type with
//!   [`catch_exception`] or [`std::panic::catch_unwind`], and an uncaught
//!   record ends the thread through the usual panic path.
//! - **`exceptions-disabled`**: the record is passed by reference to a
//!   [`TerminalHandler`] that the integrator installs at startup with
//!   [`set_terminal_handler`]. The handler must never return, which its `!`
//!   return type enforces. If a failure is dispatched before any handler has
//!   been installed, the process is aborted.
//!
//! Enabling `exceptions-disabled` takes precedence over `exceptions-enabled`.
//! This is a build-time choice and never a runtime branch.
//!
//! Whichever mode is active, [`dispatch`] never returns to its caller.

use std::any::Any;

use thiserror::Error;

use crate::exception::{
    BoundsFailure,
    ExceptionRecord,
    InvalidValueFailure,
    Numeric,
    RuntimeFailure,
    SingularMatrixFailure,
};

#[cfg(not(any(feature = "exceptions-enabled", feature = "exceptions-disabled")))]
compile_error!("One of the `exceptions-enabled` or `exceptions-disabled` features must be enabled.");

/// The result type for configuring the dispatcher.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors in the configuration of the dispatcher itself.
///
/// These are never failure records; they describe misuse of this module by the
/// integrator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Emitted when an attempt is made to install a terminal handler when one
    /// is already installed for this process.
    #[error("A terminal handler has already been installed for this process")]
    TerminalHandlerAlreadySet,
}

/// Raises the provided `record`, never returning control to the caller.
///
/// See the [module documentation](self) for what raising means in each build
/// configuration.
#[cold]
#[track_caller]
pub fn dispatch<E: ExceptionRecord>(record: E) -> ! {
    tracing::debug!(
        kind = record.kind_name(),
        failure = record.message(),
        "Dispatching failure"
    );
    raise_record(record)
}

#[cfg(not(feature = "exceptions-disabled"))]
#[track_caller]
fn raise_record<E: ExceptionRecord>(record: E) -> ! {
    std::panic::panic_any(record)
}

#[cfg(feature = "exceptions-disabled")]
fn raise_record<E: ExceptionRecord>(record: E) -> ! {
    match terminal::TERMINAL_HANDLER.get() {
        Some(handler) => handler(&record),
        None => {
            tracing::error!(
                kind = record.kind_name(),
                failure = record.message(),
                "Failure dispatched with no terminal handler installed, aborting"
            );
            std::process::abort()
        }
    }
}

/// Constructs a failure record for the current call site and dispatches it.
///
/// The first argument is the record type, the second the custom message, and
/// any further arguments are passed unchanged to the type's `new` constructor
/// after the [`context!`](crate::context!) for the invocation site.
///
/// ```
/// use ol_errors::exception::BoundsFailure;
///
/// fn set_length_scale(length_scale: f64) {
///     if length_scale <= 0.0 {
///         ol_errors::raise!(BoundsFailure<f64>, "Invalid length scale.", length_scale, 0.0, f64::MAX);
///     }
/// }
///
/// set_length_scale(0.5);
/// ```
#[macro_export]
macro_rules! raise {
    ($kind:ty, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::dispatch::dispatch(<$kind>::new($crate::context!($message) $(, $arg)*))
    };
}

/// Attempts to view an unwinding `payload` as one of the failure records.
///
/// The records with generic payloads are recognised for the primitive value
/// types `i32`, `i64`, `u32`, `u64`, `usize`, `f32` and `f64`.
#[must_use]
pub fn record_from_panic(payload: &(dyn Any + Send)) -> Option<&dyn ExceptionRecord> {
    as_record::<RuntimeFailure>(payload)
        .or_else(|| as_record::<SingularMatrixFailure>(payload))
        .or_else(|| as_numeric_record::<f64>(payload))
        .or_else(|| as_numeric_record::<i32>(payload))
        .or_else(|| as_numeric_record::<f32>(payload))
        .or_else(|| as_numeric_record::<i64>(payload))
        .or_else(|| as_numeric_record::<u32>(payload))
        .or_else(|| as_numeric_record::<u64>(payload))
        .or_else(|| as_numeric_record::<usize>(payload))
}

fn as_record<E: ExceptionRecord>(payload: &(dyn Any + Send)) -> Option<&dyn ExceptionRecord> {
    payload
        .downcast_ref::<E>()
        .map(|record| record as &dyn ExceptionRecord)
}

fn as_numeric_record<T: Numeric>(payload: &(dyn Any + Send)) -> Option<&dyn ExceptionRecord> {
    as_record::<BoundsFailure<T>>(payload).or_else(|| as_record::<InvalidValueFailure<T>>(payload))
}

#[cfg(not(feature = "exceptions-disabled"))]
pub use native::{catch_exception, install_panic_hook};

#[cfg(not(feature = "exceptions-disabled"))]
mod native {
    use std::panic::{self, UnwindSafe};

    use crate::{dispatch::record_from_panic, exception::ExceptionRecord};

    /// Runs `f`, catching any failure record of type `E` that is dispatched
    /// while it runs.
    ///
    /// Unwinds carrying any other payload, including records of other types,
    /// continue unwinding untouched.
    ///
    /// # Errors
    ///
    /// - `E` if a record of that type was dispatched from within `f`.
    pub fn catch_exception<E, F, R>(f: F) -> std::result::Result<R, E>
    where
        E: ExceptionRecord,
        F: FnOnce() -> R + UnwindSafe,
    {
        match panic::catch_unwind(f) {
            Ok(value) => Ok(value),
            Err(payload) => match payload.downcast::<E>() {
                Ok(record) => Err(*record),
                Err(payload) => panic::resume_unwind(payload),
            },
        }
    }

    /// Installs a panic hook that logs any uncaught failure record, with its
    /// kind and message, before deferring to the previously installed hook.
    pub fn install_panic_hook() {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if let Some(record) = record_from_panic(info.payload()) {
                tracing::error!(
                    kind = record.kind_name(),
                    failure = record.message(),
                    "Unhandled failure"
                );
            }
            previous(info);
        }));
    }
}

#[cfg(feature = "exceptions-disabled")]
pub use terminal::{abort_on_failure, set_terminal_handler, terminal_handler, TerminalHandler};

#[cfg(feature = "exceptions-disabled")]
mod terminal {
    use std::sync::OnceLock;

    use crate::{
        dispatch::{Error, Result},
        exception::ExceptionRecord,
    };

    /// A function that takes over from the dispatcher when exceptions are
    /// disabled.
    ///
    /// It receives the dispatched record and must end the thread or process,
    /// or otherwise never hand control back.
    pub type TerminalHandler = fn(&dyn ExceptionRecord) -> !;

    pub(super) static TERMINAL_HANDLER: OnceLock<TerminalHandler> = OnceLock::new();

    /// Installs `handler` as the terminal handler for this process.
    ///
    /// This should be done once, at startup, before any failure can be
    /// dispatched.
    ///
    /// # Errors
    ///
    /// - [`Error::TerminalHandlerAlreadySet`] if a handler is already
    ///   installed.
    pub fn set_terminal_handler(handler: TerminalHandler) -> Result<()> {
        TERMINAL_HANDLER
            .set(handler)
            .map_err(|_| Error::TerminalHandlerAlreadySet)
    }

    /// Gets the installed terminal handler, if any.
    #[must_use]
    pub fn terminal_handler() -> Option<TerminalHandler> {
        TERMINAL_HANDLER.get().copied()
    }

    /// A terminal handler that logs the record and aborts the process.
    pub fn abort_on_failure(record: &dyn ExceptionRecord) -> ! {
        tracing::error!(
            kind = record.kind_name(),
            failure = record.message(),
            "Aborting on failure"
        );
        std::process::abort()
    }
}

#[cfg(all(test, not(feature = "exceptions-disabled")))]
mod test {
    use std::panic;

    use crate::{
        context::ErrorContext,
        dispatch::{catch_exception, dispatch, record_from_panic},
        exception::{
            BoundsFailure,
            ExceptionKind,
            ExceptionRecord,
            InvalidValueFailure,
            LowerBoundFailure,
            RuntimeFailure,
        },
    };

    #[test]
    fn dispatched_record_is_the_unwind_payload() {
        let payload = panic::catch_unwind(|| {
            dispatch(RuntimeFailure::new(ErrorContext::empty().with_message("boom")))
        })
        .expect_err("dispatch never returns");

        let record = payload
            .downcast_ref::<RuntimeFailure>()
            .expect("payload is the record");
        assert_eq!(record.message(), "RuntimeFailure: boom");
    }

    #[test]
    fn raise_captures_the_detecting_site() {
        let line = line!() + 2;
        let result = catch_exception::<BoundsFailure<i32>, _, _>(|| {
            crate::raise!(BoundsFailure<i32>, "Index out of range.", 5, 0, 10)
        });

        let record = result.expect_err("raise never returns");
        let location = record.context().location().expect("raise records a location");
        assert_eq!(location.line, line);
        assert_eq!(record.value(), 5);
        assert!(record
            .context()
            .operation()
            .is_some_and(|op| op.ends_with("raise_captures_the_detecting_site")));
        assert!(record
            .message()
            .starts_with("BoundsFailure: 5 is not in range [0, 10]. Index out of range. "));
    }

    #[test]
    fn presets_are_caught_as_bounds_failures() {
        let record = catch_exception::<BoundsFailure<i32>, _, _>(|| {
            crate::raise!(LowerBoundFailure<i32>, "", -1, 0)
        })
        .expect_err("raise never returns");

        assert_eq!(record.kind(), ExceptionKind::LowerBound);
        assert_eq!(record.max(), i32::MAX);
    }

    #[test]
    fn other_payloads_keep_unwinding() {
        let payload = panic::catch_unwind(|| {
            let _ = catch_exception::<RuntimeFailure, _, _>(|| {
                crate::raise!(InvalidValueFailure<i32>, "", 1, 2)
            });
        })
        .expect_err("the inner catch does not match");

        assert!(payload.is::<InvalidValueFailure<i32>>());
    }

    #[test]
    fn catch_passes_values_through() {
        let result = catch_exception::<RuntimeFailure, _, _>(|| 7);

        assert!(matches!(result, Ok(7)));
    }

    #[test]
    fn recognises_records_in_payloads() {
        let payload = panic::catch_unwind(|| {
            crate::raise!(BoundsFailure<f64>, "Too wide.", 2.0, 0.0, 1.0)
        })
        .expect_err("raise never returns");

        let record = record_from_panic(payload.as_ref()).expect("bounds records are recognised");
        assert_eq!(record.kind_name(), "BoundsFailure");

        let other: Box<dyn std::any::Any + Send> = Box::new("not a record");
        assert!(record_from_panic(other.as_ref()).is_none());
    }
}
