//! Least-squares VAR(p) estimates and their inference.

use std::f64::consts::PI;
use std::sync::OnceLock;

use chrono::NaiveDate;
use ndarray::{Array1, Array2, Array3, Axis, s};
use tracing::{debug, warn};
use tsvar_linalg::{
    chain_dot, condition_number, det, duplication_matrix, inv, kron, lstsq, matrix_power, pinv,
    trace,
};

use crate::causality::{CausalityKind, CausalityTest};
use crate::criteria::InfoCriteria;
use crate::data::{TimeSeries, VariableRef};
use crate::error::VarError;
use crate::process::{ForecastInterval, VarProcess, forecast_cov};

/// A VAR(p) fitted by equation-wise OLS, produced by
/// [`VarModel::fit()`](crate::VarModel::fit).
///
/// The regression is `Y = Z B + U` with `Y` the `T × k` sample
/// (`y_p … y_{n-1}`), `Z` the `T × (kp + 1)` design whose row `t` is
/// `[1, y_{t-1}, …, y_{t-p}]`, and `B = [c, A₁, …, A_p]ᵀ`.
///
/// Inference quantities are computed on first access and cached for the
/// lifetime of the value; the cache is safe to share across threads.
///
/// ```mermaid
/// graph LR
///     A["VarModel::fit(p)?"] --> B["VarResults"]
///     B --> C[".params() / .coefs() / .sigma_u()"]
///     B --> D[".stderr()? / .tvalues()? / .pvalues()?"]
///     B --> E[".info_criteria()?"]
///     B --> F[".test_causality(..)?"]
///     B --> G[".irf(n, P)? / .fevd(n, P)?"]
///     B --> H[".forecast_interval_from_sample(h, α)?"]
/// ```
#[derive(Debug)]
pub struct VarResults {
    series: TimeSeries,
    p: usize,
    z: Array2<f64>,
    params: Array2<f64>,
    coefs: Array3<f64>,
    intercept: Array1<f64>,
    resid: Array2<f64>,
    sigma_u: Array2<f64>,

    zz: OnceLock<Array2<f64>>,
    zz_inv: OnceLock<Result<Array2<f64>, VarError>>,
    cov_beta: OnceLock<Result<Array2<f64>, VarError>>,
    stderr: OnceLock<Result<Array2<f64>, VarError>>,
    tvalues: OnceLock<Result<Array2<f64>, VarError>>,
    pvalues: OnceLock<Result<Array2<f64>, VarError>>,
    info_criteria: OnceLock<Result<InfoCriteria, VarError>>,
    chol_sigma_u: OnceLock<Result<Array2<f64>, VarError>>,
}

/// `ZᵀZ` above this condition number goes through the pseudo-inverse.
const MAX_ZZ_CONDITION: f64 = 1e12;

fn cached<T>(
    cell: &OnceLock<Result<T, VarError>>,
    init: impl FnOnce() -> Result<T, VarError>,
) -> Result<&T, VarError> {
    cell.get_or_init(init).as_ref().map_err(Clone::clone)
}

/// The `(nobs - p) × (kp + 1)` regression design `[1, y_{t-1}, …, y_{t-p}]`.
pub fn design_matrix(y: &Array2<f64>, p: usize) -> Array2<f64> {
    let (nobs, k) = y.dim();
    let rows = nobs.saturating_sub(p);
    let mut z = Array2::zeros((rows, k * p + 1));
    z.column_mut(0).fill(1.0);
    for r in 0..rows {
        let t = r + p;
        for lag in 1..=p {
            let start = 1 + (lag - 1) * k;
            z.slice_mut(s![r, start..start + k]).assign(&y.row(t - lag));
        }
    }
    z
}

impl VarResults {
    #[tracing::instrument(name = "var_fit", skip(series), fields(nobs = series.nobs(), neqs = series.neqs()))]
    pub(crate) fn fit(series: &TimeSeries, p: usize) -> Result<Self, VarError> {
        let nobs = series.nobs();
        let k = series.neqs();
        if p >= nobs {
            return Err(VarError::InvalidLagOrder { p, nobs });
        }
        let sample = nobs - p;
        let df_model = k * p + 1;
        if sample <= df_model {
            return Err(VarError::InsufficientDegreesOfFreedom {
                nobs: sample,
                df_model,
            });
        }

        let y = series.data();
        let z = design_matrix(y, p);
        let y_sample = y.slice(s![p.., ..]).to_owned();
        let params = lstsq(&z, &y_sample).map_err(VarError::linalg("least squares"))?;

        let intercept = params.row(0).to_owned();
        let coefs = Array3::from_shape_fn((p, k, k), |(lag, i, j)| params[[1 + lag * k + j, i]]);

        let resid = &y_sample - &z.dot(&params);
        let df_resid = (sample - df_model) as f64;
        let sigma_u = resid.t().dot(&resid) / df_resid;

        debug!(p, sample, df_model, "fitted VAR by least squares");

        Ok(Self {
            series: series.clone(),
            p,
            z,
            params,
            coefs,
            intercept,
            resid,
            sigma_u,
            zz: OnceLock::new(),
            zz_inv: OnceLock::new(),
            cov_beta: OnceLock::new(),
            stderr: OnceLock::new(),
            tvalues: OnceLock::new(),
            pvalues: OnceLock::new(),
            info_criteria: OnceLock::new(),
            chol_sigma_u: OnceLock::new(),
        })
    }

    /// The data the model was fitted to.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Full observation matrix, `nobs × k`.
    pub fn y(&self) -> &Array2<f64> {
        self.series.data()
    }

    /// Row dates of the fitted data, if attached.
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.series.dates()
    }

    /// Total number of observations, presample included.
    pub fn nobs(&self) -> usize {
        self.series.nobs()
    }

    /// Effective sample size `T = nobs - p`.
    pub fn sample_size(&self) -> usize {
        self.nobs() - self.p
    }

    /// Regressors per equation, `kp + 1`.
    pub fn df_model(&self) -> usize {
        self.neqs() * self.p + 1
    }

    /// Residual degrees of freedom, `T - kp - 1`.
    pub fn df_resid(&self) -> usize {
        self.sample_size() - self.df_model()
    }

    /// Design matrix `Z`.
    pub fn design(&self) -> &Array2<f64> {
        &self.z
    }

    /// Stacked coefficients `B = [c, A₁, …, A_p]ᵀ`, `(kp + 1) × k`.
    pub fn params(&self) -> &Array2<f64> {
        &self.params
    }

    /// Residuals `Y - Z B`, `T × k`.
    pub fn resid(&self) -> &Array2<f64> {
        &self.resid
    }

    /// In-sample fitted values `Z B`, `T × k`.
    pub fn fitted(&self) -> Array2<f64> {
        self.z.dot(&self.params)
    }

    /// Maximum-likelihood innovation covariance `Σ_u · df_resid / T`.
    pub fn sigma_u_mle(&self) -> Array2<f64> {
        &self.sigma_u * (self.df_resid() as f64 / self.sample_size() as f64)
    }

    /// `ZᵀZ`.
    pub fn zz(&self) -> &Array2<f64> {
        self.zz.get_or_init(|| self.z.t().dot(&self.z))
    }

    /// `(ZᵀZ)⁻¹`, falling back to the pseudo-inverse when `ZᵀZ` is singular
    /// or too ill-conditioned for a plain inverse to be trusted.
    pub fn zz_inv(&self) -> Result<&Array2<f64>, VarError> {
        cached(&self.zz_inv, || {
            let zz = self.zz();
            let cond = condition_number(zz).map_err(VarError::linalg("design cross-product"))?;
            let direct = if cond <= MAX_ZZ_CONDITION {
                inv(zz).map_err(|err| err.to_string())
            } else {
                Err(format!("condition number {cond:e}"))
            };
            match direct {
                Ok(m) => Ok(m),
                Err(reason) => {
                    warn!(%reason, "Z'Z is singular, using the pseudo-inverse");
                    pinv(zz).map_err(VarError::linalg("design cross-product"))
                }
            }
        })
    }

    /// Covariance of `vec(Bᵀ)`: `(ZᵀZ)⁻¹ ⊗ Σ_u`.
    pub fn cov_beta(&self) -> Result<&Array2<f64>, VarError> {
        cached(&self.cov_beta, || Ok(kron(self.zz_inv()?, &self.sigma_u)))
    }

    /// [`cov_beta`](Self::cov_beta) without the intercept rows and columns.
    pub fn cov_alpha(&self) -> Result<Array2<f64>, VarError> {
        let k = self.neqs();
        Ok(self.cov_beta()?.slice(s![k.., k..]).to_owned())
    }

    /// Covariance of `vech(Σ_u)`: `2 D⁺ (Σ_u ⊗ Σ_u) D⁺ᵀ`.
    pub fn cov_sigma(&self) -> Result<Array2<f64>, VarError> {
        let d_inv = pinv(&duplication_matrix(self.neqs()))?;
        let sig_x_sig = kron(&self.sigma_u, &self.sigma_u);
        Ok(chain_dot(&[&d_inv, &sig_x_sig, &d_inv.t().to_owned()]) * 2.0)
    }

    /// Standard errors of [`params`](Self::params), same shape.
    pub fn stderr(&self) -> Result<&Array2<f64>, VarError> {
        cached(&self.stderr, || {
            let diag = self.cov_beta()?.diag().to_owned();
            let k = self.neqs();
            Ok(Array2::from_shape_fn((self.df_model(), k), |(r, c)| {
                diag[r * k + c].sqrt()
            }))
        })
    }

    /// t-statistics `params / stderr`.
    pub fn tvalues(&self) -> Result<&Array2<f64>, VarError> {
        cached(&self.tvalues, || Ok(&self.params / self.stderr()?))
    }

    /// Two-sided p-values of the t-statistics against Student-t(df_resid).
    pub fn pvalues(&self) -> Result<&Array2<f64>, VarError> {
        cached(&self.pvalues, || {
            let df = self.df_resid() as f64;
            let tvalues = self.tvalues()?;
            let mut pvalues = Array2::zeros(tvalues.raw_dim());
            for (pv, &t) in pvalues.iter_mut().zip(tvalues) {
                *pv = tsvar_stats::t_two_sided_pvalue(t, df)
                    .ok_or_else(|| VarError::Distribution(format!("Student-t with {df} df")))?;
            }
            Ok(pvalues)
        })
    }

    /// `ln det Σ̃_u`. A singular (or rounding-negative) determinant gives
    /// `-inf`, which then ranks first in order selection.
    pub fn log_det_sigma_u_mle(&self) -> Result<f64, VarError> {
        let d = det(&self.sigma_u_mle()).map_err(VarError::linalg("ML innovation covariance"))?;
        Ok(if d > 0.0 { d.ln() } else { f64::NEG_INFINITY })
    }

    /// Gaussian log-likelihood at the ML covariance:
    /// `-T/2 (k ln 2π + ln|Σ̃_u| + k)`.
    pub fn log_likelihood(&self) -> Result<f64, VarError> {
        let t = self.sample_size() as f64;
        let k = self.neqs() as f64;
        let ld = self.log_det_sigma_u_mle()?;
        Ok(-t / 2.0 * (k * (2.0 * PI).ln() + ld + k))
    }

    /// Information criteria computed on the effective sample.
    pub fn info_criteria(&self) -> Result<&InfoCriteria, VarError> {
        cached(&self.info_criteria, || {
            let ld = self.log_det_sigma_u_mle()?;
            Ok(InfoCriteria::compute(
                ld,
                self.sample_size(),
                self.neqs(),
                self.p,
            ))
        })
    }

    /// Akaike information criterion.
    pub fn aic(&self) -> Result<f64, VarError> {
        Ok(self.info_criteria()?.aic)
    }

    /// Bayesian information criterion.
    pub fn bic(&self) -> Result<f64, VarError> {
        Ok(self.info_criteria()?.bic)
    }

    /// Hannan-Quinn information criterion.
    pub fn hqic(&self) -> Result<f64, VarError> {
        Ok(self.info_criteria()?.hq)
    }

    /// Schwarz criterion, equal to [`bic`](Self::bic).
    pub fn sic(&self) -> Result<f64, VarError> {
        Ok(self.info_criteria()?.sic())
    }

    /// Final prediction error.
    pub fn fpe(&self) -> Result<f64, VarError> {
        Ok(self.info_criteria()?.fpe)
    }

    /// Asymptotic covariance of the sample mean, `A⁻¹ Σ_u A⁻ᵀ` with
    /// `A = I - Σ A_i`.
    pub fn var_ybar(&self) -> Result<Array2<f64>, VarError> {
        let a_inv = self.long_run_effects()?;
        Ok(chain_dot(&[&a_inv, &self.sigma_u, &a_inv.t().to_owned()]))
    }

    /// Process mean divided by its standard error from [`var_ybar`](Self::var_ybar).
    pub fn mean_tvalues(&self) -> Result<Array1<f64>, VarError> {
        let se = self.var_ybar()?.diag().mapv(f64::sqrt);
        Ok(self.mean()? / &se)
    }

    /// Forecasts `steps` periods past the end of the sample with bands that
    /// include parameter uncertainty.
    pub fn forecast_interval_from_sample(
        &self,
        steps: usize,
        alpha: f64,
    ) -> Result<ForecastInterval, VarError> {
        let y = self.y();
        let history = y.slice(s![y.nrows() - self.p.., ..]);
        self.forecast_interval(history, steps, alpha)
    }

    /// Granger-causality test of `variables` on `equation`.
    ///
    /// The null hypothesis is that every lag coefficient linking a
    /// variable in `variables` to `equation` is zero.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::EmptyRestriction`] | `p == 0` or `variables` is empty |
    /// | [`VarError::InvalidSignificance`] | `signif` outside (0, 1) |
    /// | [`VarError::UnknownVariable`] | a name or index does not resolve |
    /// | [`VarError::SingularSystem`] | the restricted covariance is singular |
    pub fn test_causality(
        &self,
        equation: &VariableRef,
        variables: &[VariableRef],
        kind: CausalityKind,
        signif: f64,
    ) -> Result<CausalityTest, VarError> {
        crate::causality::test_causality(self, equation, variables, kind, signif)
    }

    /// `B` of the stacked regression `Z_{t+1} = B Z_t`, `(kp+1) × (kp+1)`.
    fn forc_cov_bmat(&self) -> Array2<f64> {
        let k = self.neqs();
        let m = self.df_model();
        let mut b = Array2::zeros((m, m));
        b[[0, 0]] = 1.0;
        if self.p == 0 {
            return b;
        }
        b.slice_mut(s![1..=k, ..]).assign(&self.params.t());
        for r in 0..k * (self.p - 1) {
            b[[1 + k + r, 1 + r]] = 1.0;
        }
        b
    }

    /// Parameter-uncertainty term `Ω(1) … Ω(steps)` of the forecast MSE.
    fn omega_forc_cov(&self, steps: usize) -> Result<Array3<f64>, VarError> {
        let k = self.neqs();
        let g = self.zz();
        let g_inv = self.zz_inv()?;
        let b = self.forc_cov_bmat();

        let b_pows = (0..steps)
            .map(|n| matrix_power(&b, n))
            .collect::<Result<Vec<_>, _>>()
            .map_err(VarError::linalg("forecast B matrix"))?;

        let phis = self.ma_rep(steps);
        let sig_u = &self.sigma_u;
        let mut omegas = Array3::zeros((steps, k, k));

        for h in 1..=steps {
            if h == 1 {
                omegas
                    .index_axis_mut(Axis(0), 0)
                    .assign(&(sig_u * self.df_model() as f64));
                continue;
            }
            let mut om = Array2::<f64>::zeros((k, k));
            for i in 0..h {
                let b_i = &b_pows[h - 1 - i];
                let left = b_i.t().dot(g_inv);
                let phi_i_sig = phis.index_axis(Axis(0), i).dot(sig_u);
                for j in 0..h {
                    let b_j = &b_pows[h - 1 - j];
                    let mult = trace(&chain_dot(&[&left, b_j, g]));
                    om += &(phi_i_sig.dot(&phis.index_axis(Axis(0), j).t()) * mult);
                }
            }
            omegas.index_axis_mut(Axis(0), h - 1).assign(&om);
        }

        Ok(omegas)
    }
}

impl VarProcess for VarResults {
    fn coefs(&self) -> &Array3<f64> {
        &self.coefs
    }

    fn intercept(&self) -> &Array1<f64> {
        &self.intercept
    }

    fn sigma_u(&self) -> &Array2<f64> {
        &self.sigma_u
    }

    fn names(&self) -> &[String] {
        self.series.names()
    }

    fn lag_order(&self) -> usize {
        self.p
    }

    fn chol_sigma_u(&self) -> Result<Array2<f64>, VarError> {
        cached(&self.chol_sigma_u, || {
            tsvar_linalg::cholesky(&self.sigma_u).map_err(VarError::linalg("innovation covariance"))
        })
        .cloned()
    }

    /// `mse(h) + Ω(h) / T`: the known-parameter MSE plus the
    /// estimation-uncertainty correction.
    fn forecast_cov(&self, steps: usize) -> Result<Array3<f64>, VarError> {
        let mse = forecast_cov(&self.ma_rep(steps), &self.sigma_u, steps);
        let omegas = self.omega_forc_cov(steps)?;
        Ok(mse + omegas / self.sample_size() as f64)
    }
}
