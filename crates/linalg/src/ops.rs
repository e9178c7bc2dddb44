//! Vectorisation operators, Kronecker products and matrix chains.
//!
//! `vec` follows the usual column-stacking convention, so for any
//! conformable `A`, `B`, `C`:
//!
//! ```text
//! vec(A B C) = (Cᵀ ⊗ A) vec(B)
//! ```

use ndarray::{Array1, Array2};

use crate::error::LinalgError;

/// Stacks the columns of `a` into a single vector (column-major order).
pub fn vec(a: &Array2<f64>) -> Array1<f64> {
    a.t().iter().copied().collect()
}

/// Inverse of [`vec`] for square matrices.
///
/// # Errors
///
/// [`LinalgError::DimensionMismatch`] if `v.len()` is not a perfect square.
pub fn unvec(v: &Array1<f64>) -> Result<Array2<f64>, LinalgError> {
    let n = (v.len() as f64).sqrt().round() as usize;
    if n * n != v.len() {
        return Err(LinalgError::DimensionMismatch {
            expected: n * n,
            got: v.len(),
        });
    }
    Ok(Array2::from_shape_fn((n, n), |(i, j)| v[j * n + i]))
}

/// Stacks the lower-triangular part of a square matrix column by column.
///
/// # Errors
///
/// [`LinalgError::NotSquare`] if `a` is not square.
pub fn vech(a: &Array2<f64>) -> Result<Array1<f64>, LinalgError> {
    let n = square_dim(a)?;
    let mut out = Vec::with_capacity(n * (n + 1) / 2);
    for j in 0..n {
        for i in j..n {
            out.push(a[[i, j]]);
        }
    }
    Ok(Array1::from(out))
}

/// Duplication matrix `D_n` with `vec(A) = D_n · vech(A)` for symmetric `A`.
///
/// Shape `n² × n(n+1)/2`, entries in `{0, 1}`.
pub fn duplication_matrix(n: usize) -> Array2<f64> {
    let mut d = Array2::zeros((n * n, n * (n + 1) / 2));
    let mut col = 0;
    for j in 0..n {
        for i in j..n {
            d[[j * n + i, col]] = 1.0;
            d[[i * n + j, col]] = 1.0;
            col += 1;
        }
    }
    d
}

/// Kronecker product `a ⊗ b`.
pub fn kron(a: &Array2<f64>, b: &Array2<f64>) -> Array2<f64> {
    let (br, bc) = b.dim();
    Array2::from_shape_fn((a.nrows() * br, a.ncols() * bc), |(i, j)| {
        a[[i / br, j / bc]] * b[[i % br, j % bc]]
    })
}

/// Sum of the main diagonal.
pub fn trace(a: &Array2<f64>) -> f64 {
    a.diag().sum()
}

/// Left-to-right product of a chain of matrices.
///
/// # Panics
///
/// Panics if `mats` is empty or the shapes are not conformable.
pub fn chain_dot(mats: &[&Array2<f64>]) -> Array2<f64> {
    let (first, rest) = mats
        .split_first()
        .expect("chain_dot: at least one matrix required");
    rest.iter().fold((*first).clone(), |acc, m| acc.dot(*m))
}

/// Integer power of a square matrix by repeated squaring. `a⁰ = I`.
///
/// # Errors
///
/// [`LinalgError::NotSquare`] if `a` is not square.
pub fn matrix_power(a: &Array2<f64>, n: usize) -> Result<Array2<f64>, LinalgError> {
    let dim = square_dim(a)?;
    let mut result = Array2::eye(dim);
    let mut base = a.clone();
    let mut e = n;
    while e > 0 {
        if e & 1 == 1 {
            result = result.dot(&base);
        }
        e >>= 1;
        if e > 0 {
            base = base.dot(&base);
        }
    }
    Ok(result)
}

/// Returns `n` for an `n × n` matrix.
pub(crate) fn square_dim(a: &Array2<f64>) -> Result<usize, LinalgError> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    Ok(rows)
}
