//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};
use ndarray::{Array1, Array2, Array3, Axis};

use tsvar_var::{CausalityKind, Criterion, KnownProcess, VariableRef};

use crate::config::{CausalityToml, FitToml, ProcessToml, VariableToml};

/// How the lag order of the fitted model is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitPlan {
    /// Fit exactly this many lags.
    Fixed(usize),
    /// Minimise `criterion` over `0..=maxlags` (default bound when `None`).
    Select {
        maxlags: Option<usize>,
        criterion: Criterion,
    },
}

/// A causality test with parsed variable references.
#[derive(Debug, Clone, PartialEq)]
pub struct CausalityRequest {
    pub equation: VariableRef,
    pub variables: Vec<VariableRef>,
    pub kind: CausalityKind,
    pub signif: f64,
}

/// Converts nested rows into a dense matrix, rejecting ragged input.
pub fn matrix_from_rows(rows: &[Vec<f64>], what: &str) -> Result<Array2<f64>> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        bail!(
            "{what}: row {i} has {} entries, expected {ncols}",
            row.len()
        );
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((nrows, ncols), flat).with_context(|| format!("{what}: bad shape"))
}

/// Stacks `[lag][row][col]` coefficients into a `(p, k, k)` cube.
///
/// `k` comes from `sigma_u` so that an empty lag list still yields a
/// well-shaped VAR(0).
pub fn coefs_from_nested(coefs: &[Vec<Vec<f64>>], k: usize) -> Result<Array3<f64>> {
    let mut cube = Array3::zeros((coefs.len(), k, k));
    for (lag, block) in coefs.iter().enumerate() {
        let m = matrix_from_rows(block, &format!("process.coefs[{lag}]"))?;
        if m.dim() != (k, k) {
            bail!(
                "process.coefs[{lag}] is {}x{}, expected {k}x{k}",
                m.nrows(),
                m.ncols()
            );
        }
        cube.index_axis_mut(Axis(0), lag).assign(&m);
    }
    Ok(cube)
}

/// Builds a [`KnownProcess`] from the `[process]` table.
pub fn build_process(process: &ProcessToml) -> Result<KnownProcess> {
    let sigma_u = matrix_from_rows(&process.sigma_u, "process.sigma_u")?;
    let k = sigma_u.nrows();
    let coefs = coefs_from_nested(&process.coefs, k)?;
    let intercept = match &process.intercept {
        Some(c) => Array1::from_vec(c.clone()),
        None => Array1::zeros(k),
    };

    let proc = KnownProcess::new(coefs, intercept, sigma_u).context("invalid [process]")?;
    match &process.names {
        Some(names) => proc
            .with_names(names.iter().cloned())
            .context("invalid process.names"),
        None => Ok(proc),
    }
}

/// Parses an information-criterion name.
pub fn parse_criterion(s: &str) -> Result<Criterion> {
    s.parse::<Criterion>()
        .with_context(|| format!("invalid fit.ic: {s:?}"))
}

/// Resolves the `[fit]` table into a [`FitPlan`].
///
/// `lags` is exclusive with `maxlags`/`ic`.
pub fn build_fit_plan(fit: &FitToml) -> Result<FitPlan> {
    match (fit.lags, fit.maxlags, fit.ic.as_deref()) {
        (Some(p), None, None) => Ok(FitPlan::Fixed(p)),
        (Some(_), _, _) => bail!("fit.lags cannot be combined with fit.maxlags or fit.ic"),
        (None, maxlags, ic) => Ok(FitPlan::Select {
            maxlags,
            criterion: parse_criterion(ic.unwrap_or("aic"))?,
        }),
    }
}

/// Converts a config variable into a [`VariableRef`].
pub fn variable_ref(v: &VariableToml) -> VariableRef {
    match v {
        VariableToml::Index(i) => VariableRef::Index(*i),
        VariableToml::Name(n) => VariableRef::Name(n.clone()),
    }
}

/// Converts one `[[causality]]` entry.
pub fn build_causality_request(c: &CausalityToml) -> Result<CausalityRequest> {
    let kind = c
        .kind
        .parse::<CausalityKind>()
        .with_context(|| format!("invalid causality.kind: {:?}", c.kind))?;
    if c.variables.is_empty() {
        bail!("causality.variables must name at least one variable");
    }
    Ok(CausalityRequest {
        equation: variable_ref(&c.equation),
        variables: c.variables.iter().map(variable_ref).collect(),
        kind,
        signif: c.signif,
    })
}
