//! Error types for the tsvar-linalg crate.

/// Error type for all fallible matrix operations in the tsvar-linalg crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinalgError {
    /// Returned when a linear system or inverse has no unique solution.
    #[error("matrix is singular")]
    Singular,

    /// Returned when a Cholesky factorisation is requested for a matrix
    /// that is not positive definite.
    #[error("matrix is not positive definite")]
    NotPositiveDefinite,

    /// Returned when a square matrix is required.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns supplied.
        cols: usize,
    },

    /// Returned when operand dimensions do not line up.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length or row count.
        expected: usize,
        /// Actual length or row count.
        got: usize,
    },

    /// Returned when an SVD-based routine reports a failure.
    ///
    /// Carries the decomposition's message as a `String` so the error stays
    /// `Clone`.
    #[error("decomposition failed: {0}")]
    Decomposition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_singular() {
        assert_eq!(LinalgError::Singular.to_string(), "matrix is singular");
    }

    #[test]
    fn error_not_positive_definite() {
        assert_eq!(
            LinalgError::NotPositiveDefinite.to_string(),
            "matrix is not positive definite"
        );
    }

    #[test]
    fn error_not_square() {
        let err = LinalgError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(err.to_string(), "matrix is not square: 2x3");
    }

    #[test]
    fn error_dimension_mismatch() {
        let err = LinalgError::DimensionMismatch {
            expected: 4,
            got: 3,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 4, got 3");
    }

    #[test]
    fn error_decomposition() {
        let err = LinalgError::Decomposition("svd".to_string());
        assert_eq!(err.to_string(), "decomposition failed: svd");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<LinalgError>();
    }
}
