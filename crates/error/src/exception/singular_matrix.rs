//! Failures for matrices that cannot be factored.

use thiserror::Error;

use crate::{
    context::ErrorContext,
    exception::{ExceptionKind, ExceptionRecord},
    format::format_message,
};

/// A matrix `A ∈ R^{m x n}` that is singular.
///
/// The record owns a row-major copy of the matrix, so it can be inspected after
/// the buffer it was constructed from has been reused or dropped. The entries
/// are not part of the message, which is formatted at construction as:
///
/// ```text
/// SingularMatrixFailure: ROWS x COLS matrix is singular. CUSTOM_MESSAGE FUNC (FILE:LINE)
/// ```
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct SingularMatrixFailure {
    context:  ErrorContext,
    num_rows: usize,
    num_cols: usize,
    matrix:   Vec<f64>,
    message:  String,
}

impl SingularMatrixFailure {
    /// Constructs a failure for the `num_rows` by `num_cols` row-major `matrix`
    /// being singular, detected in `context`.
    ///
    /// The first `num_rows * num_cols` entries of `matrix` are copied into the
    /// record.
    ///
    /// # Panics
    ///
    /// If `matrix` holds fewer than `num_rows * num_cols` entries. This is a
    /// mistake in the calling code rather than a numerical failure, and is
    /// hence not reported as a record.
    #[must_use]
    #[track_caller]
    pub fn new(context: ErrorContext, matrix: &[f64], num_rows: usize, num_cols: usize) -> Self {
        let size = num_rows.checked_mul(num_cols);
        assert!(
            size.is_some_and(|size| size <= matrix.len()),
            "SingularMatrixFailure: a {num_rows} x {num_cols} matrix does not fit in a buffer of \
             {} entries",
            matrix.len()
        );
        let matrix = matrix[..num_rows * num_cols].to_vec();

        let message = format_message(
            ExceptionKind::SingularMatrix,
            &context,
            Some(format_args!("{num_rows} x {num_cols} matrix is singular.")),
        );
        Self {
            context,
            num_rows,
            num_cols,
            matrix,
            message,
        }
    }

    /// Gets the number of rows in the matrix.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Gets the number of columns in the matrix.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Gets the entries of the matrix in row-major order.
    #[must_use]
    pub fn matrix(&self) -> &[f64] {
        &self.matrix
    }

    /// Gets the entry at `row` and `col`, or [`None`] if the position is
    /// outside of the matrix.
    #[must_use]
    pub fn entry(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.num_rows && col < self.num_cols {
            self.matrix.get(row * self.num_cols + col).copied()
        } else {
            None
        }
    }
}

impl ExceptionRecord for SingularMatrixFailure {
    fn kind(&self) -> ExceptionKind {
        ExceptionKind::SingularMatrix
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn context(&self) -> &ErrorContext {
        &self.context
    }
}
