//! Building of the one diagnostic string that every failure record carries.
//!
//! All failure messages share a single layout:
//!
//! ```text
//! KIND: DETAIL CUSTOM_MESSAGE FUNC (FILE:LINE)
//! ```
//!
//! where `DETAIL` is the kind-specific description of the payload. Any part
//! that is absent (or empty) is left out along with its separating space; a
//! missing part is never an error.
//!
//! # Formatting Failures
//!
//! A failure while building the message cannot itself be reported as a failure
//! record, as doing so would recurse through the reporting machinery. Running
//! out of memory already aborts through the global allocation error handler,
//! and a payload formatter that returns [`fmt::Error`] aborts the process here.

use std::fmt::{self, Write};

use crate::{context::ErrorContext, exception::ExceptionKind};

/// Formats the message for a failure of the given `kind`, detected in
/// `context`, with the kind-specific `detail` text.
///
/// The message is produced exactly once per record, at construction.
pub(crate) fn format_message(
    kind: ExceptionKind,
    context: &ErrorContext,
    detail: Option<fmt::Arguments<'_>>,
) -> String {
    let mut message = String::new();
    if write_message(&mut message, kind.name(), context, detail).is_err() {
        tracing::error!(
            kind = kind.name(),
            "Formatting of a failure message failed, aborting"
        );
        std::process::abort();
    }
    message
}

/// Writes the message layout described in the [module docs](self) into `out`.
fn write_message(
    out: &mut impl Write,
    kind_name: &str,
    context: &ErrorContext,
    detail: Option<fmt::Arguments<'_>>,
) -> fmt::Result {
    write!(out, "{kind_name}:")?;

    if let Some(detail) = detail {
        write!(out, " {detail}")?;
    }
    if let Some(custom_message) = non_empty(context.custom_message()) {
        write!(out, " {custom_message}")?;
    }
    if let Some(operation) = non_empty(context.operation()) {
        write!(out, " {operation}")?;
    }
    if let Some(location) = context.location() {
        write!(out, " ({location})")?;
    }

    Ok(())
}

fn non_empty(part: Option<&str>) -> Option<&str> {
    part.filter(|p| !p.is_empty())
}

#[cfg(test)]
mod test {
    use std::fmt;

    use crate::{
        context::{ErrorContext, SourceLocation},
        exception::ExceptionKind,
        format::{format_message, write_message},
    };

    fn full_context() -> ErrorContext {
        ErrorContext::new(SourceLocation::new("gpp_math.rs", 42, 9), "ComputeVariance")
            .with_message("Variance was negative.")
    }

    #[test]
    fn lays_out_every_part_in_order() {
        let message = format_message(
            ExceptionKind::Bounds,
            &full_context(),
            Some(format_args!("{} is not in range [{}, {}].", 5, 0, 10)),
        );

        assert_eq!(
            message,
            "BoundsFailure: 5 is not in range [0, 10]. Variance was negative. ComputeVariance \
             (gpp_math.rs:42)"
        );
    }

    #[test]
    fn omits_absent_parts() {
        let message = format_message(ExceptionKind::Runtime, &ErrorContext::empty(), None);

        assert_eq!(message, "RuntimeFailure:");
    }

    #[test]
    fn treats_empty_strings_as_absent() {
        let ctx = ErrorContext::empty().with_operation("").with_message("");
        let message = format_message(ExceptionKind::Runtime, &ctx, None);

        assert_eq!(message, "RuntimeFailure:");
    }

    #[test]
    fn keeps_location_without_operation() {
        let ctx = ErrorContext::empty()
            .with_location(SourceLocation::new("a.rs", 3, 1))
            .with_message("oops");
        let message = format_message(ExceptionKind::Runtime, &ctx, None);

        assert_eq!(message, "RuntimeFailure: oops (a.rs:3)");
    }

    #[test]
    fn reports_payload_formatting_errors() {
        struct Broken;

        impl fmt::Display for Broken {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let mut out = String::new();
        let result = write_message(
            &mut out,
            "RuntimeFailure",
            &ErrorContext::empty(),
            Some(format_args!("{}", Broken)),
        );

        assert!(result.is_err());
    }
}
