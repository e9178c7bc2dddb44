//! Tail probabilities and critical values backed by `statrs`.
//!
//! Each helper returns `None` when the distribution cannot be constructed
//! (non-positive degrees of freedom) or when a probability argument lies
//! outside its open interval.

use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

fn open_unit(p: f64) -> bool {
    p.is_finite() && p > 0.0 && p < 1.0
}

/// Two-sided standard-normal critical value `Φ⁻¹(1 − alpha/2)`.
///
/// `norm_signif_level(0.05)` is roughly 1.96.
pub fn norm_signif_level(alpha: f64) -> Option<f64> {
    if !open_unit(alpha) {
        return None;
    }
    let normal = Normal::new(0.0, 1.0).ok()?;
    Some(normal.inverse_cdf(1.0 - alpha / 2.0))
}

/// Two-sided p-value `2 · P(T > |t|)` for a Student-t with `df` degrees of freedom.
pub fn t_two_sided_pvalue(t: f64, df: f64) -> Option<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some(2.0 * dist.sf(t.abs()))
}

/// Upper tail `P(X > x)` of a chi-square with `df` degrees of freedom.
pub fn chi2_sf(x: f64, df: f64) -> Option<f64> {
    let dist = ChiSquared::new(df).ok()?;
    Some(dist.sf(x))
}

/// Quantile of a chi-square with `df` degrees of freedom.
pub fn chi2_ppf(p: f64, df: f64) -> Option<f64> {
    if !open_unit(p) {
        return None;
    }
    let dist = ChiSquared::new(df).ok()?;
    Some(dist.inverse_cdf(p))
}

/// Upper tail `P(X > x)` of an F distribution with `(df1, df2)` degrees of freedom.
pub fn f_sf(x: f64, df1: f64, df2: f64) -> Option<f64> {
    let dist = FisherSnedecor::new(df1, df2).ok()?;
    Some(dist.sf(x))
}

/// Quantile of an F distribution with `(df1, df2)` degrees of freedom.
pub fn f_ppf(p: f64, df1: f64, df2: f64) -> Option<f64> {
    if !open_unit(p) {
        return None;
    }
    let dist = FisherSnedecor::new(df1, df2).ok()?;
    Some(dist.inverse_cdf(p))
}
