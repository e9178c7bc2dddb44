//! Granger-causality Wald and F tests on a fitted VAR.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use tsvar_linalg::{chain_dot, inv, vec};

use crate::data::VariableRef;
use crate::error::VarError;
use crate::process::{VarProcess, check_alpha};
use crate::results::VarResults;

/// Sampling distribution used for the causality statistic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CausalityKind {
    /// `λ / N` against `F(N, df_resid)`.
    F,
    /// `λ` against `χ²(N)`.
    Wald,
}

impl CausalityKind {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CausalityKind::F => "f",
            CausalityKind::Wald => "wald",
        }
    }
}

impl fmt::Display for CausalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CausalityKind {
    type Err = VarError;

    /// Case-insensitive `"f"` or `"wald"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f" => Ok(CausalityKind::F),
            "wald" => Ok(CausalityKind::Wald),
            _ => Err(VarError::UnknownTestKind(s.to_string())),
        }
    }
}

/// Degrees of freedom of the reference distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestDf {
    /// `χ²(n)`.
    ChiSquare(usize),
    /// `F(numerator, denominator)`.
    F(usize, usize),
}

/// Outcome of comparing the statistic to its critical value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conclusion {
    /// Statistic at or above the critical value.
    Reject,
    /// Statistic below the critical value.
    FailToReject,
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conclusion::Reject => f.write_str("reject"),
            Conclusion::FailToReject => f.write_str("fail to reject"),
        }
    }
}

/// Result of a Granger-causality test.
#[derive(Clone, Debug, PartialEq)]
pub struct CausalityTest {
    /// Distribution family.
    pub kind: CausalityKind,
    /// Test statistic.
    pub test_stat: f64,
    /// Critical value at `signif`.
    pub crit_value: f64,
    /// Upper-tail probability of `test_stat`.
    pub pvalue: f64,
    /// Reference degrees of freedom.
    pub df: TestDf,
    /// Decision at `signif`.
    pub conclusion: Conclusion,
    /// Significance level.
    pub signif: f64,
}

/// Restriction matrix `C` selecting, for every lag, the coefficient of
/// each variable in `vinds` on equation `eq` within `vec(Bᵀ)`.
fn restriction_matrix(k: usize, p: usize, eq: usize, vinds: &[usize]) -> Array2<f64> {
    let n = vinds.len() * p;
    let mut c = Array2::zeros((n, k * k * p + k));
    let offsets = (0..p).flat_map(|j| vinds.iter().map(move |&v| k + k * k * j + k * v + eq));
    for (row, offset) in offsets.enumerate() {
        c[[row, offset]] = 1.0;
    }
    c
}

pub(crate) fn test_causality(
    model: &VarResults,
    equation: &VariableRef,
    variables: &[VariableRef],
    kind: CausalityKind,
    signif: f64,
) -> Result<CausalityTest, VarError> {
    check_alpha(signif)?;
    let (k, p) = (model.neqs(), model.lag_order());
    if p == 0 || variables.is_empty() {
        return Err(VarError::EmptyRestriction);
    }

    let eq = model.eq_index(equation)?;
    let vinds = variables
        .iter()
        .map(|v| model.eq_index(v))
        .collect::<Result<Vec<_>, _>>()?;
    let n = vinds.len() * p;

    let c = restriction_matrix(k, p, eq, &vinds);
    let cb = c.dot(&vec(&model.params().t().to_owned()));
    let middle = inv(&chain_dot(&[&c, model.cov_beta()?, &c.t().to_owned()]))
        .map_err(VarError::linalg("causality restriction covariance"))?;
    let lam_wald = cb.dot(&middle.dot(&cb));

    let dist_err = |what: &str| VarError::Distribution(format!("{what} for {kind} test"));
    let (test_stat, df, pvalue, crit_value) = match kind {
        CausalityKind::Wald => {
            let nf = n as f64;
            (
                lam_wald,
                TestDf::ChiSquare(n),
                tsvar_stats::chi2_sf(lam_wald, nf).ok_or_else(|| dist_err("p-value"))?,
                tsvar_stats::chi2_ppf(1.0 - signif, nf)
                    .ok_or_else(|| dist_err("critical value"))?,
            )
        }
        CausalityKind::F => {
            let stat = lam_wald / n as f64;
            let (d1, d2) = (n as f64, model.df_resid() as f64);
            (
                stat,
                TestDf::F(n, model.df_resid()),
                tsvar_stats::f_sf(stat, d1, d2).ok_or_else(|| dist_err("p-value"))?,
                tsvar_stats::f_ppf(1.0 - signif, d1, d2)
                    .ok_or_else(|| dist_err("critical value"))?,
            )
        }
    };

    let conclusion = if test_stat < crit_value {
        Conclusion::FailToReject
    } else {
        Conclusion::Reject
    };

    Ok(CausalityTest {
        kind,
        test_stat,
        crit_value,
        pvalue,
        df,
        conclusion,
        signif,
    })
}
