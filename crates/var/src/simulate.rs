//! Gaussian simulation of a VAR(p) process.

use ndarray::{Array1, Array2, Array3, Axis};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use tsvar_linalg::cholesky;

use crate::error::VarError;

/// Draws `steps` rows from `y_t = c + Σ A_j y_{t-j} + L z_t` with
/// `z_t ~ N(0, I)` and `L = chol(Σ_u)`.
///
/// The first `p` rows are the zero presample and are returned as-is; callers
/// wanting draws near the stationary distribution should discard a burn-in.
///
/// # Errors
///
/// [`VarError::DegenerateCovariance`] if `sigma_u` is not positive definite.
pub fn simulate_var<R: Rng + ?Sized>(
    coefs: &Array3<f64>,
    intercept: &Array1<f64>,
    sigma_u: &Array2<f64>,
    steps: usize,
    rng: &mut R,
) -> Result<Array2<f64>, VarError> {
    let (p, k, _) = coefs.dim();
    let chol = cholesky(sigma_u).map_err(VarError::linalg("simulation innovations"))?;
    let mut result = Array2::zeros((steps, k));

    for t in p..steps {
        let z: Array1<f64> = (0..k).map(|_| StandardNormal.sample(rng)).collect();
        let mut y = intercept + &chol.dot(&z);
        for j in 0..p {
            y += &coefs.index_axis(Axis(0), j).dot(&result.row(t - j - 1));
        }
        result.row_mut(t).assign(&y);
    }

    Ok(result)
}
