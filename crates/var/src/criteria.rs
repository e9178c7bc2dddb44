//! Information criteria for VAR lag-order comparison.

use std::fmt;
use std::str::FromStr;

use crate::error::VarError;

/// An information criterion. Lower values indicate a better trade-off
/// between fit and complexity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criterion {
    /// Akaike.
    Aic,
    /// Schwarz / Bayesian.
    Bic,
    /// Hannan-Quinn.
    Hq,
    /// Alias of [`Criterion::Bic`].
    Sic,
    /// Final prediction error.
    Fpe,
}

impl Criterion {
    /// All criteria, in reporting order.
    pub const ALL: [Criterion; 5] = [
        Criterion::Aic,
        Criterion::Bic,
        Criterion::Hq,
        Criterion::Sic,
        Criterion::Fpe,
    ];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Aic => "aic",
            Criterion::Bic => "bic",
            Criterion::Hq => "hq",
            Criterion::Sic => "sic",
            Criterion::Fpe => "fpe",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = VarError;

    /// Case-insensitive; accepts `hqic` for Hannan-Quinn.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aic" => Ok(Criterion::Aic),
            "bic" => Ok(Criterion::Bic),
            "hq" | "hqic" => Ok(Criterion::Hq),
            "sic" => Ok(Criterion::Sic),
            "fpe" => Ok(Criterion::Fpe),
            _ => Err(VarError::UnknownCriterion(s.to_string())),
        }
    }
}

/// Information criteria of one fitted model.
///
/// With `T` sample observations, `k` equations, `p` lags and
/// `ld = ln det Σ̃_u` (the ML innovation covariance):
///
/// | Field | Formula |
/// |-------|---------|
/// | `aic` | `ld + 2 (p k² + k) / T` |
/// | `bic` | `ld + ln(T) / T · p (p k² + k)` |
/// | `hq`  | `ld + 2 ln(ln T) / T · p (p k² + k)` |
/// | `fpe` | `((T + kp + 1) / (T - kp - 1))^k · ld` |
///
/// The `bic` and `hq` penalties carry an extra factor `p`, and `fpe` scales
/// `ld` rather than `det Σ̃_u`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InfoCriteria {
    /// Akaike information criterion.
    pub aic: f64,
    /// Bayesian information criterion.
    pub bic: f64,
    /// Hannan-Quinn information criterion.
    pub hq: f64,
    /// Final prediction error.
    pub fpe: f64,
}

impl InfoCriteria {
    /// Evaluates the criteria from `ld = ln det Σ̃_u`.
    pub(crate) fn compute(ld: f64, nobs: usize, neqs: usize, lags: usize) -> Self {
        let t = nobs as f64;
        let k = neqs as f64;
        let p = lags as f64;
        let df_model = k * p + 1.0;
        let df_resid = t - df_model;
        let free_params = p * k * k + k;

        Self {
            aic: ld + 2.0 * free_params / t,
            bic: ld + t.ln() / t * (p * free_params),
            hq: ld + 2.0 * t.ln().ln() * p * free_params / t,
            fpe: ((t + df_model) / df_resid).powf(k) * ld,
        }
    }

    /// Schwarz criterion; identical to [`InfoCriteria::bic`](Self::bic).
    pub fn sic(&self) -> f64 {
        self.bic
    }

    /// Value of `criterion`.
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Aic => self.aic,
            Criterion::Bic | Criterion::Sic => self.bic,
            Criterion::Hq => self.hq,
            Criterion::Fpe => self.fpe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parse_names() {
        assert_eq!("aic".parse::<Criterion>().unwrap(), Criterion::Aic);
        assert_eq!("BIC".parse::<Criterion>().unwrap(), Criterion::Bic);
        assert_eq!("hqic".parse::<Criterion>().unwrap(), Criterion::Hq);
        assert_eq!("Hq".parse::<Criterion>().unwrap(), Criterion::Hq);
        assert_eq!("sic".parse::<Criterion>().unwrap(), Criterion::Sic);
        assert_eq!("fpe".parse::<Criterion>().unwrap(), Criterion::Fpe);
    }

    #[test]
    fn parse_unknown() {
        let err = "aicc".parse::<Criterion>().unwrap_err();
        assert_eq!(err, VarError::UnknownCriterion("aicc".to_string()));
    }

    #[test]
    fn display_round_trips() {
        for c in Criterion::ALL {
            assert_eq!(c.to_string().parse::<Criterion>().unwrap(), c);
        }
    }

    #[test]
    fn formulas() {
        // T = 100, k = 2, p = 1: free params = 6, df_model = 3.
        let ic = InfoCriteria::compute(-1.0, 100, 2, 1);
        assert_abs_diff_eq!(ic.aic, -1.0 + 0.12, epsilon = 1e-12);
        assert_abs_diff_eq!(ic.bic, -1.0 + 100f64.ln() / 100.0 * 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ic.hq, -1.0 + 2.0 * 100f64.ln().ln() * 6.0 / 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ic.fpe, (103.0f64 / 97.0).powi(2) * -1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_lags_penalise_only_aic() {
        let ic = InfoCriteria::compute(0.5, 50, 3, 0);
        assert_abs_diff_eq!(ic.aic, 0.5 + 2.0 * 3.0 / 50.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ic.bic, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ic.hq, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn sic_is_bic() {
        let ic = InfoCriteria::compute(0.2, 80, 2, 2);
        assert_eq!(ic.sic(), ic.bic);
        assert_eq!(ic.get(Criterion::Sic), ic.get(Criterion::Bic));
    }
}
