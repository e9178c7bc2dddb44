//! Impulse-response analysis.

use ndarray::{Array2, Array3, Axis};

use crate::error::VarError;
use crate::process::{VarProcess, check_square};

/// Impulse responses of a VAR process over `periods` steps.
///
/// Every cube is shaped `(periods + 1, k, k)`; entry `[h, i, j]` is the
/// response of variable `i` at horizon `h` to a unit shock in `j`.
#[derive(Clone, Debug, PartialEq)]
pub struct IrAnalysis {
    periods: usize,
    p_mat: Array2<f64>,
    irfs: Array3<f64>,
    orth_irfs: Array3<f64>,
    cum_effects: Array3<f64>,
    orth_cum_effects: Array3<f64>,
    lr_effects: Option<Array2<f64>>,
    orth_lr_effects: Option<Array2<f64>>,
}

fn cumsum(cube: &Array3<f64>) -> Array3<f64> {
    let mut out = cube.clone();
    out.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);
    out
}

impl IrAnalysis {
    /// Computes responses for `model`, orthogonalising with `p_mat`
    /// (default: lower Cholesky factor of Σ_u).
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::ShapeMismatch`] | `p_mat` is not `k × k` |
    /// | [`VarError::DegenerateCovariance`] | default `P` and Σ_u not positive definite |
    pub fn new<V: VarProcess + ?Sized>(
        model: &V,
        periods: usize,
        p_mat: Option<&Array2<f64>>,
    ) -> Result<Self, VarError> {
        let p_mat = match p_mat {
            Some(m) => {
                check_square(m, model.neqs(), "orthogonalisation matrix")?;
                m.clone()
            }
            None => model.chol_sigma_u()?,
        };

        let irfs = model.ma_rep(periods);
        let orth_irfs = model.orth_ma_rep(periods, Some(&p_mat))?;
        let cum_effects = cumsum(&irfs);
        let orth_cum_effects = cumsum(&orth_irfs);

        // Undefined for unit-root processes; the finite-horizon cubes still are.
        let lr_effects = model.long_run_effects().ok();
        let orth_lr_effects = lr_effects.as_ref().map(|lr| lr.dot(&p_mat));

        Ok(Self {
            periods,
            p_mat,
            irfs,
            orth_irfs,
            cum_effects,
            orth_cum_effects,
            lr_effects,
            orth_lr_effects,
        })
    }

    /// Number of horizons after impact.
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Orthogonalisation matrix `P` with `Σ_u = P Pᵀ`.
    pub fn p_mat(&self) -> &Array2<f64> {
        &self.p_mat
    }

    /// MA coefficients `Φ_h`.
    pub fn irfs(&self) -> &Array3<f64> {
        &self.irfs
    }

    /// Orthogonalised responses `Φ_h P`.
    pub fn orth_irfs(&self) -> &Array3<f64> {
        &self.orth_irfs
    }

    /// Cumulative responses `Σ_{i≤h} Φ_i`.
    pub fn cum_effects(&self) -> &Array3<f64> {
        &self.cum_effects
    }

    /// Cumulative orthogonalised responses.
    pub fn orth_cum_effects(&self) -> &Array3<f64> {
        &self.orth_cum_effects
    }

    /// Total long-run response `(I - Σ A_i)⁻¹`; `None` for a unit root.
    pub fn lr_effects(&self) -> Option<&Array2<f64>> {
        self.lr_effects.as_ref()
    }

    /// Orthogonalised long-run response `(I - Σ A_i)⁻¹ P`.
    pub fn orth_lr_effects(&self) -> Option<&Array2<f64>> {
        self.orth_lr_effects.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use crate::process::KnownProcess;

    fn ar1() -> KnownProcess {
        KnownProcess::new(array![[[0.5]]], array![0.0], array![[4.0]]).unwrap()
    }

    #[test]
    fn shapes() {
        let proc = KnownProcess::new(
            array![[[0.5, 0.1], [0.2, 0.3]]],
            array![0.0, 0.0],
            array![[1.0, 0.3], [0.3, 1.0]],
        )
        .unwrap();
        let irf = proc.irf(10, None).unwrap();
        assert_eq!(irf.periods(), 10);
        assert_eq!(irf.irfs().dim(), (11, 2, 2));
        assert_eq!(irf.orth_irfs().dim(), (11, 2, 2));
        assert_eq!(irf.cum_effects().dim(), (11, 2, 2));
    }

    #[test]
    fn impact_response_is_cholesky_factor() {
        let proc = KnownProcess::new(
            array![[[0.5, 0.1], [0.2, 0.3]]],
            array![0.0, 0.0],
            array![[1.0, 0.3], [0.3, 1.0]],
        )
        .unwrap();
        let irf = proc.irf(3, None).unwrap();
        let p = irf.p_mat();
        assert_abs_diff_eq!(irf.orth_irfs().index_axis(Axis(0), 0), p.view(), epsilon = 1e-14);
        assert_abs_diff_eq!(p.dot(&p.t()), proc.sigma_u().clone(), epsilon = 1e-12);
        assert_eq!(p[[0, 1]], 0.0);
    }

    #[test]
    fn ar1_responses_decay_geometrically() {
        let irf = ar1().irf(4, None).unwrap();
        for h in 0..=4 {
            assert_abs_diff_eq!(irf.irfs()[[h, 0, 0]], 0.5f64.powi(h as i32), epsilon = 1e-14);
            let orth = irf.orth_irfs()[[h, 0, 0]];
            assert_abs_diff_eq!(orth, 2.0 * 0.5f64.powi(h as i32), epsilon = 1e-14);
        }
    }

    #[test]
    fn cumulative_effects_approach_long_run() {
        let irf = ar1().irf(60, None).unwrap();
        let lr = irf.lr_effects().unwrap();
        assert_abs_diff_eq!(lr[[0, 0]], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(irf.cum_effects()[[60, 0, 0]], lr[[0, 0]], epsilon = 1e-12);
        assert_abs_diff_eq!(irf.orth_lr_effects().unwrap()[[0, 0]], 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(irf.orth_cum_effects()[[60, 0, 0]], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn unit_root_has_no_long_run_effects() {
        let rw = KnownProcess::new(array![[[1.0]]], array![0.0], array![[1.0]]).unwrap();
        let irf = rw.irf(5, None).unwrap();
        assert!(irf.lr_effects().is_none());
        assert_abs_diff_eq!(irf.cum_effects()[[5, 0, 0]], 6.0, epsilon = 1e-14);
    }

    #[test]
    fn custom_p_matrix() {
        let p = array![[1.0]];
        let irf = ar1().irf(2, Some(&p)).unwrap();
        assert_abs_diff_eq!(irf.orth_irfs()[[1, 0, 0]], 0.5, epsilon = 1e-14);
        let err = ar1().irf(2, Some(&Array2::eye(2))).unwrap_err();
        assert!(matches!(err, VarError::ShapeMismatch { .. }));
    }

    #[test]
    fn degenerate_covariance() {
        let proc = KnownProcess::new(array![[[0.5]]], array![0.0], array![[-1.0]]).unwrap();
        let err = proc.irf(2, None).unwrap_err();
        assert!(matches!(err, VarError::DegenerateCovariance { .. }));
    }
}
