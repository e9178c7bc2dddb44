//! Algebraic identities across the public tsvar-linalg surface.

use approx::assert_abs_diff_eq;
use ndarray::{Array2, array};
use tsvar_linalg::{
    chain_dot, cholesky, companion_matrix, duplication_matrix, eigvals_modulus, inv, kron,
    matrix_power, pinv, solve, unvec, vec, vech,
};

#[test]
fn yule_walker_ar1_closed_form() {
    // vec(Γ) = (I - A⊗A)⁻¹ vec(Σ) with A = [[0.5]], Σ = [[1]] gives 4/3.
    let a = array![[0.5]];
    let lhs = Array2::eye(1) - kron(&a, &a);
    let rhs = vec(&array![[1.0]]).insert_axis(ndarray::Axis(1));
    let x = solve(&lhs, &rhs).unwrap();
    let gamma = unvec(&x.column(0).to_owned()).unwrap();
    assert_abs_diff_eq!(gamma[[0, 0]], 4.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn companion_power_propagates_lags() {
    // For VAR(1) the companion matrix is A itself, so Aⁿ is the n-step response.
    let coefs = array![[[0.5, 0.1], [0.0, 0.4]]];
    let a = companion_matrix(&coefs);
    let a3 = matrix_power(&a, 3).unwrap();
    let expected = chain_dot(&[&a, &a, &a]);
    assert_abs_diff_eq!(a3, expected, epsilon = 1e-14);
}

#[test]
fn companion_eigenvalues_inside_unit_circle() {
    let coefs = array![[[0.5, 0.0], [0.0, 0.5]]];
    let moduli = eigvals_modulus(&companion_matrix(&coefs)).unwrap();
    assert!(moduli.iter().all(|m| (m - 0.5).abs() < 1e-12));
}

#[test]
fn random_walk_has_unit_root() {
    let coefs = array![[[1.0]]];
    let moduli = eigvals_modulus(&companion_matrix(&coefs)).unwrap();
    assert_abs_diff_eq!(moduli[0], 1.0, epsilon = 1e-12);
}

#[test]
fn duplication_pinv_recovers_vech() {
    let s = array![[2.0, 0.3], [0.3, 1.0]];
    let d = duplication_matrix(2);
    let dp = pinv(&d).unwrap();
    assert_abs_diff_eq!(dp.dot(&vec(&s)), vech(&s).unwrap(), epsilon = 1e-12);
}

#[test]
fn kron_inverse_is_inverse_kron() {
    let a = array![[2.0, 0.5], [0.5, 1.0]];
    let b = array![[1.0, 0.2], [0.2, 3.0]];
    let lhs = inv(&kron(&a, &b)).unwrap();
    let rhs = kron(&inv(&a).unwrap(), &inv(&b).unwrap());
    assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-12);
}

#[test]
fn cholesky_of_kron_is_kron_of_cholesky() {
    let a = array![[4.0, 1.0], [1.0, 2.0]];
    let b = array![[1.0, 0.0], [0.0, 9.0]];
    let lhs = cholesky(&kron(&a, &b)).unwrap();
    let rhs = kron(&cholesky(&a).unwrap(), &cholesky(&b).unwrap());
    assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-12);
}
