//! Population VAR(p) processes.
//!
//! ```text
//! y_t = c + A₁ y_{t-1} + … + A_p y_{t-p} + u_t,     u_t ~ (0, Σ_u)
//! ```
//!
//! The free functions operate on a coefficient stack shaped `(p, k, k)`
//! and are shared by [`KnownProcess`] and [`VarResults`](crate::VarResults)
//! through the [`VarProcess`] trait.

use ndarray::{Array1, Array2, Array3, ArrayView2, Axis, s};
use rand::Rng;
use tsvar_linalg::{
    cholesky, companion_eigenvalue_moduli, companion_matrix, inv, kron, solve_vec, unvec, vec,
};

use crate::data::{VariableRef, default_names, resolve_index};
use crate::error::VarError;
use crate::fevd::Fevd;
use crate::irf::IrAnalysis;
use crate::simulate::simulate_var;

/// Moving-average coefficients `Φ_0 … Φ_maxn`, shaped `(maxn + 1, k, k)`.
///
/// `Φ_0 = I` and `Φ_i = Σ_{j=1}^{min(i,p)} Φ_{i-j} A_j`.
pub fn ma_rep(coefs: &Array3<f64>, maxn: usize) -> Array3<f64> {
    let (p, k, _) = coefs.dim();
    let mut phis = Array3::zeros((maxn + 1, k, k));
    phis.index_axis_mut(Axis(0), 0).assign(&Array2::eye(k));

    for i in 1..=maxn {
        let mut phi = Array2::zeros((k, k));
        for j in 1..=i.min(p) {
            phi += &phis
                .index_axis(Axis(0), i - j)
                .dot(&coefs.index_axis(Axis(0), j - 1));
        }
        phis.index_axis_mut(Axis(0), i).assign(&phi);
    }

    phis
}

/// `true` when every companion eigenvalue has modulus at most one.
///
/// A process with no lags is trivially stable.
pub fn is_stable(coefs: &Array3<f64>) -> bool {
    companion_eigenvalue_moduli(coefs)
        .iter()
        .all(|&m| m <= 1.0)
}

/// `I - Σ A_i`.
pub fn char_mat(coefs: &Array3<f64>) -> Array2<f64> {
    let k = coefs.dim().1;
    Array2::eye(k) - coefs.sum_axis(Axis(0))
}

/// Autocovariances `Γ(0) … Γ(nlags)`, shaped `(nlags + 1, k, k)`.
///
/// The first `p` lags come from the stacked Yule-Walker system
/// `vec(Γ) = (I - A⊗A)⁻¹ vec(Σ)` on the companion form; later lags follow
/// `Γ(h) = Σ_j A_j Γ(h - j)`. `nlags` defaults to `p`.
///
/// # Errors
///
/// [`VarError::SingularSystem`] when `I - A⊗A` is singular, which happens
/// for processes with a unit root.
pub fn var_acf(
    coefs: &Array3<f64>,
    sigma_u: &Array2<f64>,
    nlags: Option<usize>,
) -> Result<Array3<f64>, VarError> {
    let (p, k, _) = coefs.dim();
    let nlags = nlags.unwrap_or(p);
    let mut acf = Array3::zeros((nlags + 1, k, k));

    if p == 0 {
        acf.index_axis_mut(Axis(0), 0).assign(sigma_u);
        return Ok(acf);
    }

    let stacked = acf_stack(coefs, sigma_u)?;
    for h in 0..=nlags.min(p - 1) {
        acf.index_axis_mut(Axis(0), h)
            .assign(&stacked.slice(s![0..k, h * k..(h + 1) * k]));
    }

    for h in p..=nlags {
        let mut gamma = Array2::zeros((k, k));
        for j in 0..p {
            gamma += &coefs
                .index_axis(Axis(0), j)
                .dot(&acf.index_axis(Axis(0), h - j - 1));
        }
        acf.index_axis_mut(Axis(0), h).assign(&gamma);
    }

    Ok(acf)
}

/// Covariance of the stacked state `[y_t, …, y_{t-p+1}]`, `kp × kp`.
fn acf_stack(coefs: &Array3<f64>, sigma_u: &Array2<f64>) -> Result<Array2<f64>, VarError> {
    let (p, k, _) = coefs.dim();
    let kp = k * p;
    let a = companion_matrix(coefs);

    let mut sigma = Array2::zeros((kp, kp));
    sigma.slice_mut(s![0..k, 0..k]).assign(sigma_u);

    let lhs = Array2::eye(kp * kp) - kron(&a, &a);
    let solved = solve_vec(&lhs, &vec(&sigma)).map_err(VarError::linalg("autocovariance"))?;
    Ok(unvec(&solved)?)
}

/// Autocorrelations from autocovariances: `Γ(h)_ij / sqrt(Γ(0)_ii Γ(0)_jj)`.
pub fn acf_to_acorr(acf: &Array3<f64>) -> Array3<f64> {
    let sd: Array1<f64> = acf
        .index_axis(Axis(0), 0)
        .diag()
        .mapv(f64::sqrt);
    let scale = outer(&sd, &sd);
    let mut acorr = acf.clone();
    for mut lag in acorr.axis_iter_mut(Axis(0)) {
        lag /= &scale;
    }
    acorr
}

fn outer(a: &Array1<f64>, b: &Array1<f64>) -> Array2<f64> {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| a[i] * b[j])
}

/// Plug-in point forecasts for `steps` periods, shaped `(steps, k)`.
///
/// Only the last `p` rows of `history` are used.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`VarError::InsufficientHistory`] | `history` has fewer than `p` rows |
/// | [`VarError::ShapeMismatch`] | `history` does not have `k` columns |
pub fn forecast(
    history: ArrayView2<'_, f64>,
    coefs: &Array3<f64>,
    intercept: &Array1<f64>,
    steps: usize,
) -> Result<Array2<f64>, VarError> {
    let (p, k, _) = coefs.dim();
    let n = history.nrows();
    if n < p {
        return Err(VarError::InsufficientHistory { needed: p, got: n });
    }
    if history.ncols() != k {
        return Err(VarError::ShapeMismatch {
            what: "forecast history columns",
            expected: k,
            got: history.ncols(),
        });
    }

    let mut forcs = Array2::zeros((steps, k));
    for h in 1..=steps {
        let mut f = intercept.clone();
        for i in 1..=p {
            // Step h needs y_{T+h-i}: from history while h <= i, else an earlier forecast.
            let prior = if h <= i {
                history.row(n + h - i - 1)
            } else {
                forcs.row(h - i - 1)
            };
            f += &coefs.index_axis(Axis(0), i - 1).dot(&prior);
        }
        forcs.row_mut(h - 1).assign(&f);
    }

    Ok(forcs)
}

/// Forecast-error covariances `Σ(1) … Σ(steps)` from MA coefficients:
/// `Σ(h) = Σ_{i<h} Φ_i Σ_u Φ_iᵀ`.
pub fn forecast_cov(ma_coefs: &Array3<f64>, sigma_u: &Array2<f64>, steps: usize) -> Array3<f64> {
    let k = sigma_u.nrows();
    let mut covs = Array3::zeros((steps, k, k));
    let mut prior = Array2::<f64>::zeros((k, k));
    for h in 0..steps {
        let phi = ma_coefs.index_axis(Axis(0), h);
        prior = prior + phi.dot(sigma_u).dot(&phi.t());
        covs.index_axis_mut(Axis(0), h).assign(&prior);
    }
    covs
}

/// Point forecasts with symmetric normal bands.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastInterval {
    /// Point forecasts, `(steps, k)`.
    pub point: Array2<f64>,
    /// Lower band, `(steps, k)`.
    pub lower: Array2<f64>,
    /// Upper band, `(steps, k)`.
    pub upper: Array2<f64>,
}

pub(crate) fn check_alpha(alpha: f64) -> Result<(), VarError> {
    if alpha.is_finite() && alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(VarError::InvalidSignificance(alpha))
    }
}

/// Common surface of population and estimated VAR processes.
///
/// Implementors supply the parameters; everything else is derived. The
/// estimator overrides [`VarProcess::forecast_cov`] to add parameter
/// uncertainty.
pub trait VarProcess {
    /// Lag coefficients, `(p, k, k)`.
    fn coefs(&self) -> &Array3<f64>;

    /// Intercept, length `k`.
    fn intercept(&self) -> &Array1<f64>;

    /// Innovation covariance, `k × k`.
    fn sigma_u(&self) -> &Array2<f64>;

    /// Variable names, length `k`.
    fn names(&self) -> &[String];

    /// Lag order `p`.
    fn lag_order(&self) -> usize {
        self.coefs().dim().0
    }

    /// Number of equations `k`.
    fn neqs(&self) -> usize {
        self.coefs().dim().1
    }

    /// Resolves a variable name or index to a column index.
    fn eq_index(&self, var: &VariableRef) -> Result<usize, VarError> {
        resolve_index(self.names(), var)
    }

    /// `true` when all companion eigenvalues lie in the closed unit disk.
    fn is_stable(&self) -> bool {
        is_stable(self.coefs())
    }

    /// Companion eigenvalue moduli.
    fn eigenvalue_moduli(&self) -> Vec<f64> {
        companion_eigenvalue_moduli(self.coefs())
    }

    /// Stationary mean `μ` solving `(I - Σ A_i) μ = c`.
    ///
    /// # Errors
    ///
    /// [`VarError::SingularSystem`] for unit-root processes.
    fn mean(&self) -> Result<Array1<f64>, VarError> {
        solve_vec(&char_mat(self.coefs()), self.intercept())
            .map_err(VarError::linalg("process mean"))
    }

    /// Total long-run response `(I - Σ A_i)⁻¹`.
    fn long_run_effects(&self) -> Result<Array2<f64>, VarError> {
        inv(&char_mat(self.coefs())).map_err(VarError::linalg("long-run effects"))
    }

    /// Lower Cholesky factor of Σ_u.
    fn chol_sigma_u(&self) -> Result<Array2<f64>, VarError> {
        cholesky(self.sigma_u()).map_err(VarError::linalg("innovation covariance"))
    }

    /// Moving-average coefficients `Φ_0 … Φ_maxn`.
    fn ma_rep(&self, maxn: usize) -> Array3<f64> {
        ma_rep(self.coefs(), maxn)
    }

    /// Orthogonalised MA coefficients `Φ_i P`; `P` defaults to `chol(Σ_u)`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::ShapeMismatch`] | `p_mat` is not `k × k` |
    /// | [`VarError::DegenerateCovariance`] | default `P` requested and Σ_u is not positive definite |
    fn orth_ma_rep(
        &self,
        maxn: usize,
        p_mat: Option<&Array2<f64>>,
    ) -> Result<Array3<f64>, VarError> {
        let p_mat = match p_mat {
            Some(m) => {
                check_square(m, self.neqs(), "orthogonalisation matrix")?;
                m.clone()
            }
            None => self.chol_sigma_u()?,
        };
        let mut orth = self.ma_rep(maxn);
        for mut phi in orth.axis_iter_mut(Axis(0)) {
            let rotated = phi.dot(&p_mat);
            phi.assign(&rotated);
        }
        Ok(orth)
    }

    /// Autocovariances `Γ(0) … Γ(nlags)`; see [`var_acf`].
    fn acf(&self, nlags: Option<usize>) -> Result<Array3<f64>, VarError> {
        var_acf(self.coefs(), self.sigma_u(), nlags)
    }

    /// Autocorrelations `R(0) … R(nlags)`.
    fn acorr(&self, nlags: Option<usize>) -> Result<Array3<f64>, VarError> {
        Ok(acf_to_acorr(&self.acf(nlags)?))
    }

    /// Point forecasts from the last `p` rows of `history`; see [`forecast`].
    fn forecast(
        &self,
        history: ArrayView2<'_, f64>,
        steps: usize,
    ) -> Result<Array2<f64>, VarError> {
        forecast(history, self.coefs(), self.intercept(), steps)
    }

    /// Forecast-error covariances assuming known parameters.
    fn mse(&self, steps: usize) -> Array3<f64> {
        forecast_cov(&self.ma_rep(steps), self.sigma_u(), steps)
    }

    /// Forecast-error covariances used for interval forecasts.
    fn forecast_cov(&self, steps: usize) -> Result<Array3<f64>, VarError> {
        Ok(self.mse(steps))
    }

    /// Point forecasts with `1 - alpha` normal bands,
    /// `point ± Φ⁻¹(1 - α/2) · sqrt(diag Σ(h))`.
    ///
    /// # Errors
    ///
    /// [`VarError::InvalidSignificance`] unless `0 < alpha < 1`, plus the
    /// errors of [`VarProcess::forecast`].
    fn forecast_interval(
        &self,
        history: ArrayView2<'_, f64>,
        steps: usize,
        alpha: f64,
    ) -> Result<ForecastInterval, VarError> {
        check_alpha(alpha)?;
        let point = self.forecast(history, steps)?;
        let q = tsvar_stats::norm_signif_level(alpha)
            .ok_or_else(|| VarError::Distribution(format!("normal quantile at alpha={alpha}")))?;
        let covs = self.forecast_cov(steps)?;

        let k = self.neqs();
        let half_width = Array2::from_shape_fn((steps, k), |(h, i)| q * covs[[h, i, i]].sqrt());
        Ok(ForecastInterval {
            lower: &point - &half_width,
            upper: &point + &half_width,
            point,
        })
    }

    /// Simulates `steps` rows; the first `p` rows are zero presample values.
    fn simulate<R: Rng + ?Sized>(
        &self,
        steps: usize,
        rng: &mut R,
    ) -> Result<Array2<f64>, VarError>
    where
        Self: Sized,
    {
        simulate_var(self.coefs(), self.intercept(), self.sigma_u(), steps, rng)
    }

    /// Impulse-response analysis over `periods` steps.
    fn irf(&self, periods: usize, p_mat: Option<&Array2<f64>>) -> Result<IrAnalysis, VarError>
    where
        Self: Sized,
    {
        IrAnalysis::new(self, periods, p_mat)
    }

    /// Forecast-error variance decomposition over `periods` steps.
    fn fevd(&self, periods: usize, p_mat: Option<&Array2<f64>>) -> Result<Fevd, VarError>
    where
        Self: Sized,
    {
        Fevd::new(self, periods, p_mat)
    }
}

pub(crate) fn check_square(m: &Array2<f64>, k: usize, what: &'static str) -> Result<(), VarError> {
    if m.nrows() != k {
        return Err(VarError::ShapeMismatch {
            what,
            expected: k,
            got: m.nrows(),
        });
    }
    if m.ncols() != k {
        return Err(VarError::ShapeMismatch {
            what,
            expected: k,
            got: m.ncols(),
        });
    }
    Ok(())
}

/// A VAR(p) process with fully specified parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct KnownProcess {
    coefs: Array3<f64>,
    intercept: Array1<f64>,
    sigma_u: Array2<f64>,
    names: Vec<String>,
}

impl KnownProcess {
    /// Builds a process from coefficients `(p, k, k)`, an intercept of
    /// length `k` and a `k × k` innovation covariance.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::EmptyData`] | `k == 0` |
    /// | [`VarError::NonFiniteData`] | a parameter is NaN or infinite |
    /// | [`VarError::ShapeMismatch`] | blocks disagree on `k` |
    pub fn new(
        coefs: Array3<f64>,
        intercept: Array1<f64>,
        sigma_u: Array2<f64>,
    ) -> Result<Self, VarError> {
        let (_, k, k2) = coefs.dim();
        if k == 0 {
            return Err(VarError::EmptyData);
        }
        if k2 != k {
            return Err(VarError::ShapeMismatch {
                what: "coefficient blocks",
                expected: k,
                got: k2,
            });
        }
        if intercept.len() != k {
            return Err(VarError::ShapeMismatch {
                what: "intercept",
                expected: k,
                got: intercept.len(),
            });
        }
        check_square(&sigma_u, k, "innovation covariance")?;
        let finite = coefs
            .iter()
            .chain(&intercept)
            .chain(&sigma_u)
            .all(|v| v.is_finite());
        if !finite {
            return Err(VarError::NonFiniteData);
        }

        Ok(Self {
            coefs,
            intercept,
            sigma_u,
            names: default_names(k),
        })
    }

    /// Replaces the default `y1 … yk` names.
    ///
    /// # Errors
    ///
    /// [`VarError::ShapeMismatch`] if the count differs from `k`.
    pub fn with_names<I, S>(mut self, names: I) -> Result<Self, VarError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.neqs() {
            return Err(VarError::ShapeMismatch {
                what: "variable names",
                expected: self.neqs(),
                got: names.len(),
            });
        }
        self.names = names;
        Ok(self)
    }
}

impl VarProcess for KnownProcess {
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
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn var1() -> KnownProcess {
        KnownProcess::new(
            array![[[0.5, 0.0], [0.0, 0.5]]],
            array![0.0, 0.0],
            Array2::eye(2),
        )
        .unwrap()
    }

    fn var2() -> KnownProcess {
        KnownProcess::new(
            array![[[0.5, 0.1], [0.4, 0.5]], [[0.0, 0.0], [0.25, 0.0]]],
            array![0.02, 0.03],
            array![[0.01, 0.002], [0.002, 0.02]],
        )
        .unwrap()
    }

    #[test]
    fn ma_rep_starts_at_identity() {
        let phis = var2().ma_rep(5);
        assert_eq!(phis.dim(), (6, 2, 2));
        assert_eq!(phis.index_axis(Axis(0), 0), Array2::<f64>::eye(2));
    }

    #[test]
    fn ma_rep_first_lag_is_a1() {
        let proc = var2();
        let phis = proc.ma_rep(2);
        assert_abs_diff_eq!(
            phis.index_axis(Axis(0), 1),
            proc.coefs().index_axis(Axis(0), 0),
            epsilon = 1e-14
        );
        // Φ_2 = Φ_1 A_1 + A_2
        let a1 = proc.coefs().index_axis(Axis(0), 0);
        let a2 = proc.coefs().index_axis(Axis(0), 1);
        let expected = a1.dot(&a1) + a2;
        assert_abs_diff_eq!(phis.index_axis(Axis(0), 2), expected, epsilon = 1e-14);
    }

    #[test]
    fn var1_ma_rep_is_power() {
        let phis = var1().ma_rep(3);
        assert_abs_diff_eq!(phis[[3, 0, 0]], 0.125, epsilon = 1e-14);
        assert_abs_diff_eq!(phis[[3, 0, 1]], 0.0, epsilon = 1e-14);
    }

    #[test]
    fn stability() {
        assert!(var1().is_stable());
        assert!(var2().is_stable());
        let rw = KnownProcess::new(array![[[1.0]]], array![0.0], array![[1.0]]).unwrap();
        assert!(rw.is_stable());
        let explosive = KnownProcess::new(array![[[1.1]]], array![0.0], array![[1.0]]).unwrap();
        assert!(!explosive.is_stable());
    }

    #[test]
    fn zero_lag_process_is_stable() {
        let white = KnownProcess::new(Array3::zeros((0, 2, 2)), array![1.0, 2.0], Array2::eye(2)).unwrap();
        assert!(white.is_stable());
        assert_eq!(white.lag_order(), 0);
        assert_eq!(white.neqs(), 2);
        assert_abs_diff_eq!(white.mean().unwrap(), array![1.0, 2.0], epsilon = 1e-14);
    }

    #[test]
    fn stable_var1_mean_zero() {
        assert_abs_diff_eq!(var1().mean().unwrap(), array![0.0, 0.0], epsilon = 1e-14);
    }

    #[test]
    fn mean_with_intercept() {
        let proc = KnownProcess::new(array![[[0.5]]], array![1.0], array![[1.0]]).unwrap();
        assert_abs_diff_eq!(proc.mean().unwrap()[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn random_walk_mean_singular() {
        let rw = KnownProcess::new(array![[[1.0]]], array![0.0], array![[1.0]]).unwrap();
        assert!(matches!(rw.mean().unwrap_err(), VarError::SingularSystem { .. }));
    }

    #[test]
    fn ar1_acf_closed_form() {
        let proc = KnownProcess::new(array![[[0.5]]], array![0.0], array![[1.0]]).unwrap();
        let acf = proc.acf(Some(3)).unwrap();
        assert_eq!(acf.dim(), (4, 1, 1));
        assert_abs_diff_eq!(acf[[0, 0, 0]], 4.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(acf[[1, 0, 0]], 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(acf[[3, 0, 0]], 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn acf_defaults_to_p_lags() {
        let acf = var2().acf(None).unwrap();
        assert_eq!(acf.dim(), (3, 2, 2));
    }

    #[test]
    fn acf_satisfies_yule_walker() {
        // Γ(1) = A₁ Γ(0) + A₂ Γ(-1), with Γ(-1) = Γ(1)ᵀ.
        let proc = var2();
        let acf = proc.acf(Some(2)).unwrap();
        let a1 = proc.coefs().index_axis(Axis(0), 0);
        let a2 = proc.coefs().index_axis(Axis(0), 1);
        let g0 = acf.index_axis(Axis(0), 0);
        let g1 = acf.index_axis(Axis(0), 1);
        let rhs = a1.dot(&g0) + a2.dot(&g1.t());
        assert_abs_diff_eq!(g1, rhs, epsilon = 1e-12);
        // Γ(0) is symmetric.
        assert_abs_diff_eq!(g0, g0.t(), epsilon = 1e-12);
    }

    #[test]
    fn acf_zero_lags_is_sigma() {
        let white = KnownProcess::new(Array3::zeros((0, 2, 2)), array![0.0, 0.0], array![[2.0, 0.5], [0.5, 1.0]])
            .unwrap();
        let acf = white.acf(Some(2)).unwrap();
        assert_abs_diff_eq!(acf.index_axis(Axis(0), 0), white.sigma_u().view(), epsilon = 1e-14);
        assert_abs_diff_eq!(acf.index_axis(Axis(0), 2), Array2::<f64>::zeros((2, 2)), epsilon = 1e-14);
    }

    #[test]
    fn acorr_unit_diagonal_at_lag_zero() {
        let acorr = var2().acorr(Some(4)).unwrap();
        assert_abs_diff_eq!(acorr[[0, 0, 0]], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(acorr[[0, 1, 1]], 1.0, epsilon = 1e-12);
        assert!(acorr.iter().all(|v| v.abs() <= 1.0 + 1e-12));
    }

    #[test]
    fn random_walk_acf_singular() {
        let rw = KnownProcess::new(array![[[1.0]]], array![0.0], array![[1.0]]).unwrap();
        assert!(matches!(rw.acf(None).unwrap_err(), VarError::SingularSystem { .. }));
    }

    #[test]
    fn forecast_var1() {
        let proc = KnownProcess::new(array![[[0.5]]], array![1.0], array![[1.0]]).unwrap();
        let hist = array![[0.0], [4.0]];
        let f = proc.forecast(hist.view(), 2).unwrap();
        assert_abs_diff_eq!(f[[0, 0]], 3.0, epsilon = 1e-14);
        assert_abs_diff_eq!(f[[1, 0]], 2.5, epsilon = 1e-14);
    }

    #[test]
    fn forecast_var2_uses_history_then_forecasts() {
        let proc = KnownProcess::new(array![[[0.5]], [[0.25]]], array![0.0], array![[1.0]]).unwrap();
        let hist = array![[2.0], [4.0]];
        let f = proc.forecast(hist.view(), 3).unwrap();
        // 0.5·4 + 0.25·2 = 2.5; 0.5·2.5 + 0.25·4 = 2.25; 0.5·2.25 + 0.25·2.5 = 1.75
        assert_abs_diff_eq!(f.column(0).to_owned(), array![2.5, 2.25, 1.75], epsilon = 1e-14);
    }

    #[test]
    fn forecast_converges_to_mean() {
        let proc = KnownProcess::new(array![[[0.5]]], array![1.0], array![[1.0]]).unwrap();
        let f = proc.forecast(array![[10.0]].view(), 200).unwrap();
        assert_abs_diff_eq!(f[[199, 0]], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn forecast_needs_p_rows() {
        let err = var2().forecast(array![[1.0, 2.0]].view(), 3).unwrap_err();
        assert_eq!(err, VarError::InsufficientHistory { needed: 2, got: 1 });
    }

    #[test]
    fn forecast_column_mismatch() {
        let err = var1().forecast(array![[1.0, 2.0, 3.0]].view(), 3).unwrap_err();
        assert!(matches!(err, VarError::ShapeMismatch { expected: 2, got: 3, .. }));
    }

    #[test]
    fn mse_first_step_is_sigma() {
        let proc = var2();
        let mse = proc.mse(4);
        assert_eq!(mse.dim(), (4, 2, 2));
        assert_abs_diff_eq!(mse.index_axis(Axis(0), 0), proc.sigma_u().view(), epsilon = 1e-14);
    }

    #[test]
    fn mse_is_non_decreasing() {
        let mse = var2().mse(10);
        for h in 1..10 {
            for i in 0..2 {
                assert!(mse[[h, i, i]] >= mse[[h - 1, i, i]]);
            }
        }
    }

    #[test]
    fn mse_converges_to_acf0() {
        let proc = KnownProcess::new(array![[[0.5]]], array![0.0], array![[1.0]]).unwrap();
        let mse = proc.mse(100);
        assert_abs_diff_eq!(mse[[99, 0, 0]], 4.0 / 3.0, epsilon = 1e-10);
    }

    #[test]
    fn forecast_interval_brackets_point() {
        let proc = var2();
        let hist = array![[0.1, 0.2], [0.3, 0.1]];
        let fi = proc.forecast_interval(hist.view(), 5, 0.05).unwrap();
        assert_eq!(fi.point.dim(), (5, 2));
        for ((lo, pt), hi) in fi.lower.iter().zip(&fi.point).zip(&fi.upper) {
            assert!(lo < pt && pt < hi);
        }
        let width = fi.upper[[0, 0]] - fi.point[[0, 0]];
        assert_abs_diff_eq!(width, 1.959964 * 0.1, epsilon = 1e-4);
    }

    #[test]
    fn forecast_interval_rejects_bad_alpha() {
        let hist = array![[0.1, 0.2], [0.3, 0.1]];
        for alpha in [0.0, 1.0, -0.1, f64::NAN] {
            let err = var2().forecast_interval(hist.view(), 2, alpha).unwrap_err();
            assert!(matches!(err, VarError::InvalidSignificance(_)));
        }
    }

    #[test]
    fn orth_ma_rep_uses_cholesky() {
        let proc = KnownProcess::new(array![[[0.5]]], array![0.0], array![[4.0]]).unwrap();
        let orth = proc.orth_ma_rep(1, None).unwrap();
        assert_abs_diff_eq!(orth[[0, 0, 0]], 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(orth[[1, 0, 0]], 1.0, epsilon = 1e-14);
    }

    #[test]
    fn orth_ma_rep_rejects_bad_p() {
        let err = var2().orth_ma_rep(2, Some(&Array2::eye(3))).unwrap_err();
        assert!(matches!(err, VarError::ShapeMismatch { .. }));
    }

    #[test]
    fn known_process_validates_shapes() {
        let err = KnownProcess::new(array![[[0.5, 0.0]]], array![0.0], array![[1.0]]).unwrap_err();
        assert!(matches!(err, VarError::ShapeMismatch { .. }));
        let err = KnownProcess::new(array![[[0.5]]], array![0.0, 1.0], array![[1.0]]).unwrap_err();
        assert!(matches!(err, VarError::ShapeMismatch { what: "intercept", .. }));
        let err = KnownProcess::new(array![[[0.5]]], array![0.0], Array2::eye(2)).unwrap_err();
        assert!(matches!(err, VarError::ShapeMismatch { .. }));
        let err = KnownProcess::new(array![[[f64::NAN]]], array![0.0], array![[1.0]]).unwrap_err();
        assert_eq!(err, VarError::NonFiniteData);
    }

    #[test]
    fn names_lookup() {
        let proc = var2().with_names(["gdp", "cpi"]).unwrap();
        assert_eq!(proc.eq_index(&"cpi".into()).unwrap(), 1);
        assert!(proc.with_names(["a"]).is_err());
    }

    #[test]
    fn long_run_effects_inverts_char_mat() {
        let proc = var2();
        let lr = proc.long_run_effects().unwrap();
        let prod = char_mat(proc.coefs()).dot(&lr);
        assert_abs_diff_eq!(prod, Array2::<f64>::eye(2), epsilon = 1e-12);
    }
}
