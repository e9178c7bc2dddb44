//! Dense decompositions over `ndarray` matrices.
//!
//! The `ndarray` operands are copied into `nalgebra::DMatrix` for the
//! factorisations (LU, Cholesky, SVD, Schur) and copied back afterwards.
//! Every routine returns a [`LinalgError`] instead of panicking on
//! singular or indefinite input.

use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

use crate::error::LinalgError;
use crate::ops::square_dim;

/// Copies an `ndarray` matrix into a column-major `DMatrix`.
pub(crate) fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Copies a `DMatrix` back into an `ndarray` matrix.
pub(crate) fn to_array(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

fn all_finite(m: &DMatrix<f64>) -> bool {
    m.iter().all(|v| v.is_finite())
}

/// Singular-value cutoff matching the LAPACK / NumPy default:
/// `eps · max(rows, cols) · σ_max`.
fn svd_tolerance(m: &DMatrix<f64>, sigma_max: f64) -> f64 {
    f64::EPSILON * m.nrows().max(m.ncols()) as f64 * sigma_max
}

/// Solves `a · x = b` for a square `a` via LU with partial pivoting.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`LinalgError::NotSquare`] | `a` is not square |
/// | [`LinalgError::DimensionMismatch`] | `b.nrows() != a.nrows()` |
/// | [`LinalgError::Singular`] | `a` has no inverse |
pub fn solve(a: &Array2<f64>, b: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
    let n = square_dim(a)?;
    if b.nrows() != n {
        return Err(LinalgError::DimensionMismatch {
            expected: n,
            got: b.nrows(),
        });
    }
    let lu = to_dmatrix(a).lu();
    if !lu.is_invertible() {
        return Err(LinalgError::Singular);
    }
    let x = lu.solve(&to_dmatrix(b)).ok_or(LinalgError::Singular)?;
    if !all_finite(&x) {
        return Err(LinalgError::Singular);
    }
    Ok(to_array(&x))
}

/// Vector right-hand-side variant of [`solve`].
pub fn solve_vec(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, LinalgError> {
    let rhs = b.view().insert_axis(ndarray::Axis(1)).to_owned();
    let x = solve(a, &rhs)?;
    Ok(x.column(0).to_owned())
}

/// Inverse of a square matrix.
///
/// # Errors
///
/// [`LinalgError::NotSquare`] or [`LinalgError::Singular`].
pub fn inv(a: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
    square_dim(a)?;
    let inverse = to_dmatrix(a)
        .try_inverse()
        .ok_or(LinalgError::Singular)?;
    if !all_finite(&inverse) {
        return Err(LinalgError::Singular);
    }
    Ok(to_array(&inverse))
}

/// Moore-Penrose pseudo-inverse via SVD.
///
/// # Errors
///
/// [`LinalgError::Decomposition`] if the SVD cannot be formed.
pub fn pinv(a: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
    let m = to_dmatrix(a);
    if m.is_empty() {
        return Ok(Array2::zeros((a.ncols(), a.nrows())));
    }
    let svd = m.clone().svd(true, true);
    let tol = svd_tolerance(&m, svd.singular_values.max());
    let pinv = svd
        .pseudo_inverse(tol)
        .map_err(|e| LinalgError::Decomposition(e.to_string()))?;
    Ok(to_array(&pinv))
}

/// Least-squares solution of `a · x ≈ b` via SVD.
///
/// Handles rank-deficient `a` by truncating small singular values, so the
/// minimum-norm solution is returned in that case.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`LinalgError::DimensionMismatch`] | `b.nrows() != a.nrows()` |
/// | [`LinalgError::Decomposition`] | the SVD solve failed |
pub fn lstsq(a: &Array2<f64>, b: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
    if b.nrows() != a.nrows() {
        return Err(LinalgError::DimensionMismatch {
            expected: a.nrows(),
            got: b.nrows(),
        });
    }
    let m = to_dmatrix(a);
    let svd = m.clone().svd(true, true);
    let tol = svd_tolerance(&m, svd.singular_values.max());
    let x = svd
        .solve(&to_dmatrix(b), tol)
        .map_err(|e| LinalgError::Decomposition(e.to_string()))?;
    Ok(to_array(&x))
}

/// 2-norm condition number `σ_max / σ_min`; infinite when `a` is singular
/// and 1 for an empty matrix.
///
/// # Errors
///
/// [`LinalgError::NotSquare`] if `a` is not square.
pub fn condition_number(a: &Array2<f64>) -> Result<f64, LinalgError> {
    square_dim(a)?;
    if a.is_empty() {
        return Ok(1.0);
    }
    let sv = to_dmatrix(a).singular_values();
    let (lo, hi) = (sv.min(), sv.max());
    if lo <= 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(hi / lo)
}

/// Lower-triangular Cholesky factor `L` with `a = L · Lᵀ`.
///
/// # Errors
///
/// [`LinalgError::NotSquare`] or [`LinalgError::NotPositiveDefinite`].
pub fn cholesky(a: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
    square_dim(a)?;
    let chol = to_dmatrix(a)
        .cholesky()
        .ok_or(LinalgError::NotPositiveDefinite)?;
    Ok(to_array(&chol.l()))
}

/// Determinant of a square matrix.
pub fn det(a: &Array2<f64>) -> Result<f64, LinalgError> {
    square_dim(a)?;
    Ok(to_dmatrix(a).determinant())
}

/// Log-determinant of a positive-definite matrix, `2 Σ ln Lᵢᵢ`.
///
/// # Errors
///
/// [`LinalgError::NotSquare`] or [`LinalgError::NotPositiveDefinite`].
pub fn log_det_pd(a: &Array2<f64>) -> Result<f64, LinalgError> {
    let l = cholesky(a)?;
    Ok(2.0 * l.diag().iter().map(|d| d.ln()).sum::<f64>())
}

/// Moduli of the (possibly complex) eigenvalues of a general square matrix.
///
/// Computed from the real Schur form; the order of the returned values is
/// not specified.
pub fn eigvals_modulus(a: &Array2<f64>) -> Result<Vec<f64>, LinalgError> {
    square_dim(a)?;
    Ok(moduli_of_square(a))
}

/// Spectral moduli of a matrix already known to be square.
pub(crate) fn moduli_of_square(a: &Array2<f64>) -> Vec<f64> {
    if a.is_empty() {
        return Vec::new();
    }
    let eigs = to_dmatrix(a).complex_eigenvalues();
    eigs.iter().map(|z| z.norm()).collect()
}
