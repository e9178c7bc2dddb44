//! Consistency between tail probabilities and critical values.

use approx::assert_abs_diff_eq;
use tsvar_stats::{chi2_ppf, chi2_sf, f_ppf, f_sf, norm_signif_level};

#[test]
fn chi2_ppf_sf_are_inverse() {
    for &df in &[1.0, 3.0, 8.0, 20.0] {
        for &p in &[0.9, 0.95, 0.99] {
            let crit = chi2_ppf(p, df).unwrap();
            assert_abs_diff_eq!(chi2_sf(crit, df).unwrap(), 1.0 - p, epsilon = 1e-3);
        }
    }
}

#[test]
fn f_ppf_sf_are_inverse() {
    for &(d1, d2) in &[(1.0, 30.0), (4.0, 80.0), (6.0, 200.0)] {
        let crit = f_ppf(0.95, d1, d2).unwrap();
        assert_abs_diff_eq!(f_sf(crit, d1, d2).unwrap(), 0.05, epsilon = 1e-3);
    }
}

#[test]
fn normal_level_shrinks_with_alpha() {
    let wide = norm_signif_level(0.01).unwrap();
    let narrow = norm_signif_level(0.10).unwrap();
    assert!(wide > narrow);
    assert_abs_diff_eq!(narrow, 1.644854, epsilon = 1e-5);
}
