//! Serialisable JSON report types. Arrays become nested vectors.

use std::collections::BTreeMap;

use ndarray::{Array1, Array3, ArrayView2, Axis};
use serde::Serialize;

use tsvar_var::{
    CausalityTest, Fevd, ForecastInterval, InfoCriteria, IrAnalysis, LagOrderSelection, TestDf,
    VarError, VarProcess, VarResults, VariableSummary,
};

pub type Matrix = Vec<Vec<f64>>;
pub type Cube = Vec<Vec<Vec<f64>>>;

pub fn vector(a: &Array1<f64>) -> Vec<f64> {
    a.to_vec()
}

pub fn matrix(a: ArrayView2<'_, f64>) -> Matrix {
    a.rows().into_iter().map(|r| r.to_vec()).collect()
}

pub fn cube(a: &Array3<f64>) -> Cube {
    a.axis_iter(Axis(0)).map(matrix).collect()
}

/// Output of `tsvar run`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub process: ProcessReport,
    pub sample: SampleReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionReport>,
    pub estimate: EstimateReport,
    pub forecast: ForecastReport,
    pub irf: IrfReport,
    pub fevd: FevdReport,
    pub causality: Vec<CausalityReport>,
}

/// Population properties of a process.
#[derive(Debug, Serialize)]
pub struct ProcessReport {
    pub names: Vec<String>,
    pub lag_order: usize,
    pub stable: bool,
    pub eigenvalue_moduli: Vec<f64>,
    /// `None` when `I - ΣA_i` is singular.
    pub mean: Option<Vec<f64>>,
    pub acf: Option<Cube>,
    pub acorr: Option<Cube>,
    pub ma_rep: Cube,
    pub mse: Cube,
}

impl ProcessReport {
    pub fn new<V: VarProcess + ?Sized>(
        model: &V,
        acf_lags: Option<usize>,
        horizon: usize,
    ) -> Self {
        Self {
            names: model.names().to_vec(),
            lag_order: model.lag_order(),
            stable: model.is_stable(),
            eigenvalue_moduli: model.eigenvalue_moduli(),
            mean: model.mean().ok().map(|m| vector(&m)),
            acf: model.acf(acf_lags).ok().map(|a| cube(&a)),
            acorr: model.acorr(acf_lags).ok().map(|a| cube(&a)),
            ma_rep: cube(&model.ma_rep(horizon)),
            mse: cube(&model.mse(horizon)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SampleReport {
    pub nobs: usize,
    pub burn_in: usize,
    pub seed: Option<u64>,
    pub summary: Vec<SummaryRow>,
}

#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub mean: f64,
    pub sd: f64,
    pub min: f64,
    pub max: f64,
}

impl From<VariableSummary> for SummaryRow {
    fn from(s: VariableSummary) -> Self {
        Self {
            name: s.name,
            mean: s.mean,
            sd: s.sd,
            min: s.min,
            max: s.max,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CriteriaRow {
    pub aic: f64,
    pub bic: f64,
    pub hqic: f64,
    pub fpe: f64,
}

impl From<&InfoCriteria> for CriteriaRow {
    fn from(ic: &InfoCriteria) -> Self {
        Self {
            aic: ic.aic,
            bic: ic.bic,
            hqic: ic.hq,
            fpe: ic.fpe,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SelectionReport {
    pub maxlags: usize,
    pub criterion: String,
    /// Indexed by lag order.
    pub table: Vec<CriteriaRow>,
    pub selected: BTreeMap<String, usize>,
}

impl SelectionReport {
    pub fn new(selection: &LagOrderSelection, criterion: impl ToString) -> Self {
        Self {
            maxlags: selection.maxlags(),
            criterion: criterion.to_string(),
            table: selection.table().iter().map(CriteriaRow::from).collect(),
            selected: selection
                .selections()
                .iter()
                .map(|(c, &p)| (c.to_string(), p))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EstimateReport {
    pub lag_order: usize,
    pub sample_size: usize,
    pub df_resid: usize,
    pub stable: bool,
    pub intercept: Vec<f64>,
    pub coefs: Cube,
    pub sigma_u: Matrix,
    /// Rows follow the design `[1, y_{t-1}, …, y_{t-p}]`, columns equations.
    pub params: Matrix,
    pub stderr: Matrix,
    pub tvalues: Matrix,
    pub pvalues: Matrix,
    pub log_likelihood: f64,
    pub info_criteria: CriteriaRow,
}

impl EstimateReport {
    pub fn new(fit: &VarResults) -> Result<Self, VarError> {
        Ok(Self {
            lag_order: fit.lag_order(),
            sample_size: fit.sample_size(),
            df_resid: fit.df_resid(),
            stable: fit.is_stable(),
            intercept: vector(fit.intercept()),
            coefs: cube(fit.coefs()),
            sigma_u: matrix(fit.sigma_u().view()),
            params: matrix(fit.params().view()),
            stderr: matrix(fit.stderr()?.view()),
            tvalues: matrix(fit.tvalues()?.view()),
            pvalues: matrix(fit.pvalues()?.view()),
            log_likelihood: fit.log_likelihood()?,
            info_criteria: CriteriaRow::from(fit.info_criteria()?),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ForecastReport {
    pub steps: usize,
    pub alpha: f64,
    pub point: Matrix,
    pub lower: Matrix,
    pub upper: Matrix,
}

impl ForecastReport {
    pub fn new(interval: &ForecastInterval, alpha: f64) -> Self {
        Self {
            steps: interval.point.nrows(),
            alpha,
            point: matrix(interval.point.view()),
            lower: matrix(interval.lower.view()),
            upper: matrix(interval.upper.view()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IrfReport {
    pub periods: usize,
    pub irfs: Cube,
    pub orth_irfs: Cube,
    pub cum_effects: Cube,
    pub lr_effects: Option<Matrix>,
}

impl From<&IrAnalysis> for IrfReport {
    fn from(irf: &IrAnalysis) -> Self {
        Self {
            periods: irf.periods(),
            irfs: cube(irf.irfs()),
            orth_irfs: cube(irf.orth_irfs()),
            cum_effects: cube(irf.cum_effects()),
            lr_effects: irf.lr_effects().map(|m| matrix(m.view())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FevdReport {
    pub periods: usize,
    /// Keyed by equation name; each entry is `[horizon][shock]`.
    pub decomposition: BTreeMap<String, Matrix>,
}

impl From<&Fevd> for FevdReport {
    fn from(fevd: &Fevd) -> Self {
        Self {
            periods: fevd.periods(),
            decomposition: fevd
                .names()
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), matrix(fevd.equation(i))))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CausalityReport {
    pub equation: String,
    pub variables: Vec<String>,
    pub kind: String,
    pub test_stat: f64,
    pub crit_value: f64,
    pub pvalue: f64,
    pub df: Vec<usize>,
    pub signif: f64,
    pub conclusion: String,
}

impl CausalityReport {
    pub fn new(equation: String, variables: Vec<String>, test: &CausalityTest) -> Self {
        let df = match test.df {
            TestDf::ChiSquare(n) => vec![n],
            TestDf::F(n, d) => vec![n, d],
        };
        Self {
            equation,
            variables,
            kind: test.kind.to_string(),
            test_stat: test.test_stat,
            crit_value: test.crit_value,
            pvalue: test.pvalue,
            df,
            signif: test.signif,
            conclusion: test.conclusion.to_string(),
        }
    }
}
