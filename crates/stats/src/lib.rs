//! Statistical helper functions for the tsvar workspace.
//!
//! Streaming sample moments live at the crate root; tail probabilities and
//! critical values of the sampling distributions used in VAR inference live
//! in [`distributions`] and are re-exported here.

pub mod distributions;

pub use distributions::{
    chi2_ppf, chi2_sf, f_ppf, f_sf, norm_signif_level, t_two_sided_pvalue,
};

/// Single-pass count, mean, variance and range (Welford update).
///
/// ```
/// use tsvar_stats::Moments;
///
/// let m: Moments = [3.0, 7.0].into_iter().collect();
/// assert_eq!(m.mean(), 5.0);
/// assert_eq!(m.variance(), 8.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Moments {
    count: usize,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for Moments {
    fn default() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Moments {
    /// Adds one observation.
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// 0.0 when empty.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance with N-1 denominator; 0.0 below two observations.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        self.m2 / (self.count - 1) as f64
    }

    pub fn sd(&self) -> f64 {
        self.variance().sqrt()
    }

    /// `+inf` when empty.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// `-inf` when empty.
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Extend<f64> for Moments {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

impl FromIterator<f64> for Moments {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut m = Self::default();
        m.extend(iter);
        m
    }
}

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    data.iter().copied().collect::<Moments>().mean()
}

/// Sample variance with N-1 denominator. Returns 0.0 below two elements.
pub fn variance(data: &[f64]) -> f64 {
    data.iter().copied().collect::<Moments>().variance()
}

/// Sample standard deviation with N-1 denominator.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}
