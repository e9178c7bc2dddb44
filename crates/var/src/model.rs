//! VAR model over observed data (unfitted).

use tracing::info;

use crate::criteria::Criterion;
use crate::data::TimeSeries;
use crate::error::VarError;
use crate::results::VarResults;
use crate::selection::{LagOrderSelection, select_order};

/// An unfitted VAR over a [`TimeSeries`].
///
/// Entry point of the estimation workflow:
///
/// ```mermaid
/// graph LR
///     A["VarModel::new(series)"] -->|".fit(p)?"| B["VarResults"]
///     A -->|".select_order(maxlags)?"| C["LagOrderSelection"]
///     A -->|".fit_with_ic(maxlags, ic)?"| B
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VarModel {
    series: TimeSeries,
}

impl VarModel {
    /// Wraps observed data.
    ///
    /// # Example
    ///
    /// ```
    /// use ndarray::array;
    /// use tsvar_var::{TimeSeries, VarModel};
    ///
    /// let series = TimeSeries::new(array![[1.0, 2.0], [2.0, 1.0], [3.0, 0.5]]).unwrap();
    /// let model = VarModel::new(series);
    /// assert_eq!(model.series().neqs(), 2);
    /// ```
    pub fn new(series: TimeSeries) -> Self {
        Self { series }
    }

    /// The observed data.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Fits a VAR(p) with intercept by least squares.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::InvalidLagOrder`] | `p >= nobs` |
    /// | [`VarError::InsufficientDegreesOfFreedom`] | `nobs - p <= kp + 1` |
    pub fn fit(&self, p: usize) -> Result<VarResults, VarError> {
        VarResults::fit(&self.series, p)
    }

    /// Evaluates every information criterion for lags `0..=maxlags`.
    ///
    /// `maxlags` defaults to `round(12 · (nobs / 100)^¼)`, capped at the
    /// largest lag the sample can estimate
    /// ([`max_feasible_lag`](crate::max_feasible_lag)).
    ///
    /// # Errors
    ///
    /// The first failing candidate fit, in lag order.
    pub fn select_order(&self, maxlags: Option<usize>) -> Result<LagOrderSelection, VarError> {
        select_order(&self.series, maxlags)
    }

    /// Selects the lag with `criterion`, then fits it.
    pub fn fit_with_ic(
        &self,
        maxlags: Option<usize>,
        criterion: Criterion,
    ) -> Result<VarResults, VarError> {
        let selection = self.select_order(maxlags)?;
        let p = selection.selected(criterion);
        info!(p, %criterion, "using selected lag order");
        self.fit(p)
    }
}
