//! Error types for the tsvar-var crate.

use tsvar_linalg::LinalgError;

/// Error type for all fallible operations in the tsvar-var crate.
///
/// Every failure is a deterministic function of the inputs (data, lag
/// order, requested criterion or test), so none of these are retryable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VarError {
    /// Returned when the input data has no rows or no columns.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when the input data contains NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when names, dates, or parameter blocks do not match the
    /// data dimensions.
    #[error("shape mismatch for {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        /// What was being checked.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Length supplied.
        got: usize,
    },

    /// Returned when the lag order is not smaller than the number of
    /// observations.
    #[error("invalid lag order {p} for {nobs} observations")]
    InvalidLagOrder {
        /// Requested lag order.
        p: usize,
        /// Number of observations available.
        nobs: usize,
    },

    /// Returned when the sample is too short to leave positive residual
    /// degrees of freedom.
    #[error("insufficient degrees of freedom: {nobs} sample observations for {df_model} regressors")]
    InsufficientDegreesOfFreedom {
        /// Observations left after dropping the presample.
        nobs: usize,
        /// Regressors per equation.
        df_model: usize,
    },

    /// Returned when fewer than `p` rows of history are passed to a forecast.
    #[error("forecast needs {needed} rows of history, got {got}")]
    InsufficientHistory {
        /// Rows required (the lag order).
        needed: usize,
        /// Rows supplied.
        got: usize,
    },

    /// Returned when a required linear solve has no unique solution.
    #[error("singular system in {context}")]
    SingularSystem {
        /// Computation that needed the solve.
        context: &'static str,
    },

    /// Returned when a covariance matrix must be factorised but is not
    /// positive definite.
    #[error("covariance matrix is not positive definite ({context})")]
    DegenerateCovariance {
        /// Computation that needed the factorisation.
        context: &'static str,
    },

    /// Returned when an information criterion name is not recognised.
    #[error("unknown information criterion '{0}', expected one of aic, bic, hq, sic, fpe")]
    UnknownCriterion(String),

    /// Returned when a causality test kind is not recognised.
    #[error("unknown test kind '{0}', expected 'f' or 'wald'")]
    UnknownTestKind(String),

    /// Returned when a variable name or index does not exist in the model.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// Returned when a significance level lies outside (0, 1).
    #[error("significance level must be in (0, 1), got {0}")]
    InvalidSignificance(f64),

    /// Returned when a causality test has nothing to restrict.
    #[error("no coefficients to restrict: zero lags or no causing variables")]
    EmptyRestriction,

    /// Returned when a sampling distribution cannot be evaluated.
    #[error("distribution evaluation failed: {0}")]
    Distribution(String),

    /// Any other linear-algebra failure (shape errors, SVD failures).
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

impl VarError {
    /// Maps a [`LinalgError`] into the matching engine error, tagging
    /// singular and indefinite failures with `context`.
    ///
    /// Intended for `map_err`:
    ///
    /// ```ignore
    /// solve(&a, &b).map_err(VarError::linalg("process mean"))?;
    /// ```
    pub(crate) fn linalg(context: &'static str) -> impl FnOnce(LinalgError) -> VarError {
        move |err| match err {
            LinalgError::Singular => VarError::SingularSystem { context },
            LinalgError::NotPositiveDefinite => VarError::DegenerateCovariance { context },
            other => VarError::Linalg(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_data() {
        assert_eq!(VarError::EmptyData.to_string(), "input data is empty");
    }

    #[test]
    fn error_shape_mismatch() {
        let err = VarError::ShapeMismatch {
            what: "names",
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "shape mismatch for names: expected 3, got 2");
    }

    #[test]
    fn error_invalid_lag_order() {
        let err = VarError::InvalidLagOrder { p: 10, nobs: 10 };
        assert_eq!(err.to_string(), "invalid lag order 10 for 10 observations");
    }

    #[test]
    fn error_insufficient_df() {
        let err = VarError::InsufficientDegreesOfFreedom {
            nobs: 4,
            df_model: 5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient degrees of freedom: 4 sample observations for 5 regressors"
        );
    }

    #[test]
    fn error_singular_system() {
        let err = VarError::SingularSystem {
            context: "process mean",
        };
        assert_eq!(err.to_string(), "singular system in process mean");
    }

    #[test]
    fn error_degenerate_covariance() {
        let err = VarError::DegenerateCovariance {
            context: "orthogonalisation",
        };
        assert_eq!(
            err.to_string(),
            "covariance matrix is not positive definite (orthogonalisation)"
        );
    }

    #[test]
    fn error_unknown_criterion() {
        let err = VarError::UnknownCriterion("aicc".to_string());
        assert_eq!(
            err.to_string(),
            "unknown information criterion 'aicc', expected one of aic, bic, hq, sic, fpe"
        );
    }

    #[test]
    fn error_unknown_test_kind() {
        let err = VarError::UnknownTestKind("lm".to_string());
        assert_eq!(err.to_string(), "unknown test kind 'lm', expected 'f' or 'wald'");
    }

    #[test]
    fn linalg_mapping() {
        let map = VarError::linalg("acf");
        assert_eq!(
            map(LinalgError::Singular),
            VarError::SingularSystem { context: "acf" }
        );
        let map = VarError::linalg("chol");
        assert_eq!(
            map(LinalgError::NotPositiveDefinite),
            VarError::DegenerateCovariance { context: "chol" }
        );
        let map = VarError::linalg("shape");
        assert!(matches!(
            map(LinalgError::NotSquare { rows: 1, cols: 2 }),
            VarError::Linalg(LinalgError::NotSquare { .. })
        ));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<VarError>();
    }
}
