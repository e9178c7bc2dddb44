//! Information-criterion lag-order selection.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::criteria::{Criterion, InfoCriteria};
use crate::data::TimeSeries;
use crate::error::VarError;
use crate::results::VarResults;

/// Default upper bound on the lag order: `round(12 · (nobs / 100)^¼)`.
pub fn default_maxlags(nobs: usize) -> usize {
    (12.0 * (nobs as f64 / 100.0).powf(0.25)).round() as usize
}

/// Largest `p` with `nobs - p > k p + 1`, the last lag an OLS fit can
/// estimate with positive residual degrees of freedom.
pub fn max_feasible_lag(nobs: usize, neqs: usize) -> usize {
    nobs.saturating_sub(2) / (neqs + 1)
}

/// Criteria of every candidate lag `0..=maxlags` and the minimiser of each.
#[derive(Clone, Debug, PartialEq)]
pub struct LagOrderSelection {
    maxlags: usize,
    table: Vec<InfoCriteria>,
    selected: BTreeMap<Criterion, usize>,
}

impl LagOrderSelection {
    /// Largest lag considered.
    pub fn maxlags(&self) -> usize {
        self.maxlags
    }

    /// Criteria indexed by lag order.
    pub fn table(&self) -> &[InfoCriteria] {
        &self.table
    }

    /// Lag chosen by `criterion`.
    pub fn selected(&self, criterion: Criterion) -> usize {
        self.selected[&criterion]
    }

    /// All choices, keyed by criterion.
    pub fn selections(&self) -> &BTreeMap<Criterion, usize> {
        &self.selected
    }
}

/// Index of the first minimum; NaN entries never win.
fn argmin(values: impl IntoIterator<Item = f64>) -> usize {
    let mut best = (0, f64::INFINITY);
    for (i, v) in values.into_iter().enumerate() {
        if v < best.1 {
            best = (i, v);
        }
    }
    best.0
}

/// Fits lags `0..=maxlags` (in parallel) and picks the minimiser of each
/// criterion; ties go to the smaller lag.
///
/// # Errors
///
/// The first candidate fit or criterion failure, in lag order. A default
/// bound is capped at [`max_feasible_lag`]; an explicit one is not.
#[tracing::instrument(skip(series), fields(nobs = series.nobs()))]
pub(crate) fn select_order(
    series: &TimeSeries,
    maxlags: Option<usize>,
) -> Result<LagOrderSelection, VarError> {
    let maxlags = match maxlags {
        Some(m) => m,
        None => {
            let default = default_maxlags(series.nobs());
            let feasible = max_feasible_lag(series.nobs(), series.neqs());
            if default > feasible {
                warn!(default, feasible, "default maxlags exceeds the sample, capping");
            }
            default.min(feasible)
        }
    };

    let table = (0..=maxlags)
        .into_par_iter()
        .map(|p| {
            let fit = VarResults::fit(series, p)?;
            let ic = *fit.info_criteria()?;
            debug!(p, aic = ic.aic, bic = ic.bic, hq = ic.hq, fpe = ic.fpe, "candidate lag");
            Ok(ic)
        })
        .collect::<Result<Vec<_>, VarError>>()?;

    let selected: BTreeMap<Criterion, usize> = Criterion::ALL
        .iter()
        .map(|&c| (c, argmin(table.iter().map(|ic| ic.get(c)))))
        .collect();
    info!(
        maxlags,
        aic = selected[&Criterion::Aic],
        bic = selected[&Criterion::Bic],
        hq = selected[&Criterion::Hq],
        fpe = selected[&Criterion::Fpe],
        "selected lag orders"
    );

    Ok(LagOrderSelection {
        maxlags,
        table,
        selected,
    })
}
