use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level run description.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TsvarConfig {
    /// JSON report path; stdout when unset.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Known process to simulate and describe.
    pub process: ProcessToml,

    /// Simulation settings.
    #[serde(default)]
    pub simulate: SimulateToml,

    /// Estimation settings.
    #[serde(default)]
    pub fit: FitToml,

    /// Forecast and impulse-response settings.
    #[serde(default)]
    pub analysis: AnalysisToml,

    /// Granger-causality tests run on the fitted model.
    #[serde(default)]
    pub causality: Vec<CausalityToml>,
}

/// Reads and parses a TOML run description.
pub fn load(path: &Path) -> Result<TsvarConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Process parameters. `coefs` is indexed `[lag][row][col]`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessToml {
    pub coefs: Vec<Vec<Vec<f64>>>,
    pub sigma_u: Vec<Vec<f64>>,
    /// Defaults to zeros.
    #[serde(default)]
    pub intercept: Option<Vec<f64>>,
    #[serde(default)]
    pub names: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulateToml {
    #[serde(default = "default_nobs")]
    pub nobs: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Leading rows discarded to forget the zero presample.
    #[serde(default = "default_burn_in")]
    pub burn_in: usize,
}

impl Default for SimulateToml {
    fn default() -> Self {
        Self {
            nobs: default_nobs(),
            seed: None,
            burn_in: default_burn_in(),
        }
    }
}

fn default_nobs() -> usize {
    500
}
fn default_burn_in() -> usize {
    100
}

/// Either a fixed `lags` or selection by `ic` (default `aic`) over `0..=maxlags`.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FitToml {
    #[serde(default)]
    pub lags: Option<usize>,
    #[serde(default)]
    pub maxlags: Option<usize>,
    #[serde(default)]
    pub ic: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisToml {
    #[serde(default = "default_forecast_steps")]
    pub forecast_steps: usize,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_irf_periods")]
    pub irf_periods: usize,
    /// Autocovariance lags in the process report; defaults to the lag order.
    #[serde(default)]
    pub acf_lags: Option<usize>,
}

impl Default for AnalysisToml {
    fn default() -> Self {
        Self {
            forecast_steps: default_forecast_steps(),
            alpha: default_alpha(),
            irf_periods: default_irf_periods(),
            acf_lags: None,
        }
    }
}

fn default_forecast_steps() -> usize {
    5
}
fn default_alpha() -> f64 {
    0.05
}
fn default_irf_periods() -> usize {
    10
}

/// A variable by zero-based index or by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VariableToml {
    Index(usize),
    Name(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CausalityToml {
    pub equation: VariableToml,
    pub variables: Vec<VariableToml>,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_alpha")]
    pub signif: f64,
}

fn default_kind() -> String {
    "f".to_string()
}
