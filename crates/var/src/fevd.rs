//! Forecast-error variance decomposition.

use ndarray::{Array2, Array3, ArrayView2, Axis, s};

use crate::error::VarError;
use crate::irf::IrAnalysis;
use crate::process::VarProcess;

/// Share of each variable's `h`-step forecast-error variance attributable
/// to each orthogonalised shock.
///
/// [`decomp`](Self::decomp) is shaped `(k, periods, k)`: equation, horizon,
/// shock. For every equation and horizon the shares sum to one when
/// `P Pᵀ = Σ_u`.
#[derive(Clone, Debug, PartialEq)]
pub struct Fevd {
    periods: usize,
    names: Vec<String>,
    decomp: Array3<f64>,
}

impl Fevd {
    /// Decomposes the forecast-error variance of `model` over `periods`
    /// horizons.
    ///
    /// # Errors
    ///
    /// Those of [`IrAnalysis::new`].
    pub fn new<V: VarProcess + ?Sized>(
        model: &V,
        periods: usize,
        p_mat: Option<&Array2<f64>>,
    ) -> Result<Self, VarError> {
        let k = model.neqs();
        let irf = IrAnalysis::new(model, periods, p_mat)?;
        let mse = model.mse(periods);

        // Cumulative squared orthogonalised responses, horizon × equation × shock.
        let mut cum = irf
            .orth_irfs()
            .slice(s![..periods, .., ..])
            .mapv(|v| v * v);
        cum.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);

        let decomp = Array3::from_shape_fn((k, periods, k), |(eq, h, shock)| {
            cum[[h, eq, shock]] / mse[[h, eq, eq]]
        });

        Ok(Self {
            periods,
            names: model.names().to_vec(),
            decomp,
        })
    }

    /// Number of horizons.
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Variable names, in equation order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The `(equation, horizon, shock)` cube.
    pub fn decomp(&self) -> &Array3<f64> {
        &self.decomp
    }

    /// `periods × k` shares for one equation.
    pub fn equation(&self, eq: usize) -> ArrayView2<'_, f64> {
        self.decomp.index_axis(Axis(0), eq)
    }
}
