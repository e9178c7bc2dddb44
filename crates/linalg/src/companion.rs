//! VAR(1) companion form of a VAR(p) coefficient stack.
//!
//! ```text
//!     ┌ A₁  A₂  …  A_{p-1}  A_p ┐
//!     │ I   0   …  0        0   │
//! A = │ 0   I   …  0        0   │      (kp × kp)
//!     │ ⋮           ⋱        ⋮   │
//!     └ 0   0   …  I        0   ┘
//! ```

use ndarray::{Array2, Array3};

use crate::decomp::moduli_of_square;

/// Builds the `kp × kp` companion matrix from coefficients shaped `(p, k, k)`.
///
/// Returns the empty `0 × 0` matrix when `p == 0`.
pub fn companion_matrix(coefs: &Array3<f64>) -> Array2<f64> {
    let (p, k, _) = coefs.dim();
    let kp = k * p;
    let mut a = Array2::zeros((kp, kp));

    for lag in 0..p {
        for i in 0..k {
            for j in 0..k {
                a[[i, lag * k + j]] = coefs[[lag, i, j]];
            }
        }
    }
    for r in k..kp {
        a[[r, r - k]] = 1.0;
    }

    a
}

/// Eigenvalue moduli of the companion matrix of `coefs`.
///
/// The process is stable when every modulus is at most one. Empty for
/// `p == 0`.
pub fn companion_eigenvalue_moduli(coefs: &Array3<f64>) -> Vec<f64> {
    moduli_of_square(&companion_matrix(coefs))
}
