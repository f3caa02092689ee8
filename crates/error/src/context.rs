//! Capture of the call-site identity that is attached to every failure.
//!
//! An [`ErrorContext`] records _where_ a failure was detected: the source
//! location, the name of the enclosing operation, and an optional free-text
//! note from the detecting code. It is plain data and performs no validation;
//! any of the three parts may be absent, and the message formatter simply
//! leaves absent parts out.
//!
//! Detecting code should almost never build a context by hand. The
//! [`context!`](crate::context!) macro captures the exact invocation site, and
//! [`raise!`](crate::raise!) uses it on your behalf.

use std::{borrow::Cow, fmt, panic::Location};

/// A position in the source code of the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// The path of the source file, as reported by the compiler.
    pub file: &'static str,

    /// The one-based line number in `file`.
    pub line: u32,

    /// The one-based column number in `line`.
    pub column: u32,
}

impl SourceLocation {
    /// Constructs a new source location from its parts.
    #[must_use]
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }

    /// Gets the location of the caller of this function, following the
    /// [`track_caller`](https://doc.rust-lang.org/reference/attributes/codegen.html#the-track_caller-attribute)
    /// chain.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&Location<'static>> for SourceLocation {
    fn from(value: &Location<'static>) -> Self {
        Self::new(value.file(), value.line(), value.column())
    }
}

/// Renders as `FILE:LINE`, the form used in failure messages.
impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// The identity of the call site that detected a failure.
///
/// Contexts are immutable once built. The builder-style methods consume `self`
/// and are designed to be chained in the "fluent" API style.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    location:       Option<SourceLocation>,
    operation:      Option<Cow<'static, str>>,
    custom_message: Option<Cow<'static, str>>,
}

impl ErrorContext {
    /// Constructs a context for the provided `location` inside the operation
    /// named `operation`.
    #[must_use]
    pub fn new(location: SourceLocation, operation: impl Into<Cow<'static, str>>) -> Self {
        Self {
            location:       Some(location),
            operation:      Some(operation.into()),
            custom_message: None,
        }
    }

    /// Constructs a context with no information in it at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Constructs a context for the location of the caller.
    ///
    /// Rust has no intrinsic for the name of the calling function, so the
    /// operation is left unset. Prefer [`context!`](crate::context!) where
    /// possible.
    #[must_use]
    #[track_caller]
    pub fn here() -> Self {
        Self {
            location: Some(SourceLocation::caller()),
            ..Self::default()
        }
    }

    /// Sets the source location of the context.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets the name of the operation in which the failure was detected.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<Cow<'static, str>>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attaches a free-text note from the detecting code.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    /// Gets the source location, if one was captured.
    #[must_use]
    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Gets the enclosing operation name, if one was captured.
    #[must_use]
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// Gets the custom message, if one was attached.
    #[must_use]
    pub fn custom_message(&self) -> Option<&str> {
        self.custom_message.as_deref()
    }
}

/// Strips the helper suffix from the type name produced by
/// [`operation_name!`](crate::operation_name!), along with any closure
/// segments, leaving the path of the enclosing function.
#[doc(hidden)]
#[must_use]
pub fn trim_operation_name(raw: &'static str) -> &'static str {
    let mut name = raw.strip_suffix("::__ol_operation_marker").unwrap_or(raw);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

/// Expands to the fully-qualified path of the enclosing function as a
/// `&'static str`.
///
/// ```
/// fn invert() -> &'static str {
///     ol_errors::operation_name!()
/// }
///
/// assert!(invert().ends_with("invert"));
/// ```
#[macro_export]
macro_rules! operation_name {
    () => {{
        fn __ol_operation_marker() {}
        fn __ol_type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::context::trim_operation_name(__ol_type_name_of(__ol_operation_marker))
    }};
}

/// Expands to an [`ErrorContext`] describing the exact invocation site: file,
/// line and column, plus the enclosing function.
///
/// An optional argument is attached as the custom message.
///
/// ```
/// let ctx = ol_errors::context!("Cholesky factorization failed.");
///
/// assert_eq!(ctx.custom_message(), Some("Cholesky factorization failed."));
/// assert!(ctx.location().is_some());
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::context::ErrorContext::new(
            $crate::context::SourceLocation::new(
                ::std::file!(),
                ::std::line!(),
                ::std::column!(),
            ),
            $crate::operation_name!(),
        )
    };
    ($message:expr $(,)?) => {
        $crate::context!().with_message($message)
    };
}

#[cfg(test)]
mod test {
    use crate::context::{trim_operation_name, ErrorContext, SourceLocation};

    #[test]
    fn macro_captures_the_invocation_site() {
        let line = line!() + 1;
        let ctx = crate::context!();

        let location = ctx.location().expect("location is always captured");
        assert_eq!(location.line, line);
        assert!(location.file.ends_with("context.rs"));
        assert!(ctx.custom_message().is_none());
    }

    #[test]
    fn operation_names_the_enclosing_function() {
        let ctx = crate::context!("note");

        assert_eq!(
            ctx.operation(),
            Some("ol_errors::context::test::operation_names_the_enclosing_function")
        );
        assert_eq!(ctx.custom_message(), Some("note"));
    }

    #[test]
    fn operation_skips_closures() {
        let name = (|| crate::operation_name!())();

        assert!(name.ends_with("operation_skips_closures"));
    }

    #[test]
    fn trims_only_known_suffixes() {
        assert_eq!(
            trim_operation_name("a::b::{{closure}}::{{closure}}::__ol_operation_marker"),
            "a::b"
        );
        assert_eq!(trim_operation_name("a::b"), "a::b");
    }

    #[test]
    fn here_has_no_operation() {
        let ctx = ErrorContext::here();

        assert!(ctx.location().is_some());
        assert!(ctx.operation().is_none());
    }

    #[test]
    fn builder_sets_every_part() {
        let ctx = ErrorContext::empty()
            .with_location(SourceLocation::new("gpp_math.rs", 12, 5))
            .with_operation("ComputeGradients")
            .with_message(String::from("bad"));

        assert_eq!(ctx.location().map(ToString::to_string).as_deref(), Some("gpp_math.rs:12"));
        assert_eq!(ctx.operation(), Some("ComputeGradients"));
        assert_eq!(ctx.custom_message(), Some("bad"));
    }
}
