//! # tsvar-var
//!
//! Vector autoregression: population processes, least-squares estimation,
//! lag-order selection, Granger causality, impulse responses and
//! forecast-error variance decomposition.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeries::new(data)?"] --> B["VarModel::new(series)"]
//!     B -->|".fit(p)?"| C["VarResults"]
//!     B -->|".select_order(maxlags)?"| D["LagOrderSelection"]
//!     B -->|".fit_with_ic(maxlags, ic)?"| C
//!     E["KnownProcess::new(A, c, Σ)?"] --> F["VarProcess"]
//!     C --> F
//!     F --> G[".forecast / .mse / .acf / .irf / .fevd / .simulate"]
//!     C --> H[".test_causality(eq, vars, kind, α)?"]
//! ```
//!
//! ## Two Usage Paths
//!
//! **Known parameters**:
//! ```ignore
//! let proc = KnownProcess::new(coefs, intercept, sigma_u)?;
//! let y = proc.simulate(500, &mut rng)?;
//! ```
//!
//! **Estimation** (fixed or selected order):
//! ```ignore
//! let model = VarModel::new(TimeSeries::new(y)?);
//! let fit = model.fit_with_ic(Some(8), Criterion::Bic)?;
//! let test = fit.test_causality(&"y1".into(), &["y2".into()], CausalityKind::F, 0.05)?;
//! ```
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | A_i | [`VarProcess::coefs()`] | lag-`i` coefficient matrix, shape `(p, k, k)` |
//! | c | [`VarProcess::intercept()`] | intercept |
//! | Σ_u | [`VarProcess::sigma_u()`] | innovation covariance |
//! | Φ_h | [`VarProcess::ma_rep()`] | moving-average (impulse-response) matrices |
//! | Γ(h) | [`VarProcess::acf()`] | autocovariance at lag `h` |
//! | B | [`VarResults::params()`] | stacked regression coefficients `[c, A₁ … A_p]ᵀ` |
//! | Z | [`VarResults::design()`] | regression design |

mod causality;
mod criteria;
mod data;
mod error;
mod fevd;
mod irf;
mod model;
mod process;
mod results;
mod selection;
mod simulate;

pub use causality::{CausalityKind, CausalityTest, Conclusion, TestDf};
pub use criteria::{Criterion, InfoCriteria};
pub use data::{TimeSeries, VariableRef, VariableSummary};
pub use error::VarError;
pub use fevd::Fevd;
pub use irf::IrAnalysis;
pub use model::VarModel;
pub use process::{
    ForecastInterval, KnownProcess, VarProcess, acf_to_acorr, char_mat, forecast, forecast_cov,
    is_stable, ma_rep, var_acf,
};
pub use results::{VarResults, design_matrix};
pub use selection::{LagOrderSelection, default_maxlags, max_feasible_lag};
pub use simulate::simulate_var;
