//! # tsvar-linalg
//!
//! Dense matrix primitives used by the VAR engine.
//!
//! | Function | Meaning |
//! |----------|---------|
//! | [`vec()`] / [`unvec()`] | column-stacking operator and its inverse |
//! | [`vech()`] | stack the lower triangle of a square matrix |
//! | [`duplication_matrix()`] | `D_n` with `vec(A) = D_n vech(A)` |
//! | [`kron()`] | Kronecker product |
//! | [`chain_dot()`], [`trace()`] | matrix chains and their traces |
//! | [`companion_matrix()`] | VAR(1) form of a VAR(p) coefficient stack |
//! | [`companion_eigenvalue_moduli()`] | spectrum of the companion form |
//! | [`solve()`], [`inv()`], [`pinv()`], [`lstsq()`] | linear systems |
//! | [`cholesky()`], [`log_det_pd()`] | positive-definite factorisation |
//! | [`det()`], [`condition_number()`] | determinant and 2-norm conditioning |
//! | [`eigvals_modulus()`] | spectral moduli of a general square matrix |
//!
//! Matrices are `ndarray::Array2<f64>`; decompositions run on
//! `nalgebra::DMatrix` behind the scenes.

mod companion;
mod decomp;
mod error;
mod ops;

pub use companion::{companion_eigenvalue_moduli, companion_matrix};
pub use decomp::{
    cholesky, condition_number, det, eigvals_modulus, inv, log_det_pd, lstsq, pinv, solve,
    solve_vec,
};
pub use error::LinalgError;
pub use ops::{chain_dot, duplication_matrix, kron, matrix_power, trace, unvec, vec, vech};
