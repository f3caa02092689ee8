//! The catch-all failure kind.

use thiserror::Error;

use crate::{
    context::ErrorContext,
    exception::{ExceptionKind, ExceptionRecord},
    format::format_message,
};

/// A general runtime failure that does not fit any other kind.
///
/// The message is formatted at construction as:
///
/// ```text
/// RuntimeFailure: CUSTOM_MESSAGE FUNC (FILE:LINE)
/// ```
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct RuntimeFailure {
    context: ErrorContext,
    message: String,
}

impl RuntimeFailure {
    /// Constructs a runtime failure detected in `context`.
    #[must_use]
    pub fn new(context: ErrorContext) -> Self {
        let message = format_message(ExceptionKind::Runtime, &context, None);
        Self { context, message }
    }
}

impl ExceptionRecord for RuntimeFailure {
    fn kind(&self) -> ExceptionKind {
        ExceptionKind::Runtime
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
        exception::{ExceptionRecord, RuntimeFailure},
    };

    #[test]
    fn message_carries_note_and_site() {
        let failure = RuntimeFailure::new(crate::context!("Unable to allocate workspace."));

        assert_eq!(failure.kind_name(), "RuntimeFailure");
        assert!(failure.message().starts_with("RuntimeFailure: Unable to allocate workspace. "));
        assert!(failure.message().contains("message_carries_note_and_site"));
        assert!(failure.message().contains("runtime.rs:"));
        assert_eq!(failure.to_string(), failure.message());
    }

    #[test]
    fn message_is_formatted_once() {
        let failure = RuntimeFailure::new(ErrorContext::empty());

        let first = failure.message();
        let second = failure.message();
        assert_eq!(first, "RuntimeFailure:");
        assert_eq!(first.as_ptr(), second.as_ptr());
    }
}
