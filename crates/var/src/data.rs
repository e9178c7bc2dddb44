//! Multivariate time series container and variable lookup.

use std::fmt;

use chrono::NaiveDate;
use ndarray::{Array2, ArrayView1, Axis};
use tsvar_stats::Moments;

use crate::error::VarError;

/// A `nobs × neqs` panel of observations, one column per variable.
///
/// Rows are time-ordered. Variable names default to `y1 … yk`; dates are
/// optional and only carried along for reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    data: Array2<f64>,
    names: Vec<String>,
    dates: Option<Vec<NaiveDate>>,
}

impl TimeSeries {
    /// Wraps a `nobs × neqs` matrix.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::EmptyData`] | no rows or no columns |
    /// | [`VarError::NonFiniteData`] | any element is NaN or infinite |
    pub fn new(data: Array2<f64>) -> Result<Self, VarError> {
        if data.is_empty() {
            return Err(VarError::EmptyData);
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(VarError::NonFiniteData);
        }
        let names = default_names(data.ncols());
        Ok(Self {
            data,
            names,
            dates: None,
        })
    }

    /// Replaces the default variable names.
    ///
    /// # Errors
    ///
    /// [`VarError::ShapeMismatch`] if the number of names differs from the
    /// number of columns.
    pub fn with_names<I, S>(mut self, names: I) -> Result<Self, VarError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.neqs() {
            return Err(VarError::ShapeMismatch {
                what: "variable names",
                expected: self.neqs(),
                got: names.len(),
            });
        }
        self.names = names;
        Ok(self)
    }

    /// Attaches one date per row.
    ///
    /// # Errors
    ///
    /// [`VarError::ShapeMismatch`] if the number of dates differs from the
    /// number of rows.
    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> Result<Self, VarError> {
        if dates.len() != self.nobs() {
            return Err(VarError::ShapeMismatch {
                what: "dates",
                expected: self.nobs(),
                got: dates.len(),
            });
        }
        self.dates = Some(dates);
        Ok(self)
    }

    /// Number of observations (rows).
    pub fn nobs(&self) -> usize {
        self.data.nrows()
    }

    /// Number of variables (columns).
    pub fn neqs(&self) -> usize {
        self.data.ncols()
    }

    /// The observation matrix.
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Variable names, in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Row dates, if attached.
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }

    /// Column `var` of the panel.
    ///
    /// # Errors
    ///
    /// [`VarError::UnknownVariable`] if `var` does not resolve.
    pub fn column(&self, var: &VariableRef) -> Result<ArrayView1<'_, f64>, VarError> {
        let idx = resolve_index(&self.names, var)?;
        Ok(self.data.column(idx))
    }

    /// Per-variable sample summary.
    pub fn describe(&self) -> Vec<VariableSummary> {
        self.data
            .axis_iter(Axis(1))
            .zip(&self.names)
            .map(|(col, name)| {
                let m: Moments = col.iter().copied().collect();
                VariableSummary {
                    name: name.clone(),
                    mean: m.mean(),
                    sd: m.sd(),
                    min: m.min(),
                    max: m.max(),
                }
            })
            .collect()
    }
}

/// Summary statistics of one column of a [`TimeSeries`].
#[derive(Clone, Debug, PartialEq)]
pub struct VariableSummary {
    /// Variable name.
    pub name: String,
    /// Sample mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub sd: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
}

/// A variable addressed by column index or by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VariableRef {
    /// Zero-based column index.
    Index(usize),
    /// Variable name.
    Name(String),
}

impl From<usize> for VariableRef {
    fn from(idx: usize) -> Self {
        VariableRef::Index(idx)
    }
}

impl From<&str> for VariableRef {
    fn from(name: &str) -> Self {
        VariableRef::Name(name.to_string())
    }
}

impl From<String> for VariableRef {
    fn from(name: String) -> Self {
        VariableRef::Name(name)
    }
}

impl fmt::Display for VariableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableRef::Index(i) => write!(f, "#{i}"),
            VariableRef::Name(n) => f.write_str(n),
        }
    }
}

/// `y1 … yk`.
pub(crate) fn default_names(k: usize) -> Vec<String> {
    (1..=k).map(|i| format!("y{i}")).collect()
}

/// Resolves a [`VariableRef`] against a list of names.
pub(crate) fn resolve_index(names: &[String], var: &VariableRef) -> Result<usize, VarError> {
    match var {
        VariableRef::Index(i) if *i < names.len() => Ok(*i),
        VariableRef::Name(n) => names
            .iter()
            .position(|candidate| candidate == n)
            .ok_or_else(|| VarError::UnknownVariable(n.clone())),
        other => Err(VarError::UnknownVariable(other.to_string())),
    }
}
