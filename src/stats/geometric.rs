use rand::Rng;

use crate::special::{xlog1py, xlogx};

use super::fit::sample_mean_std;
use super::quantile::{ppf_bounds_disc, refine_lattice};
use super::{checked_params, Distribution, Kind, StatsError, EPS};

const NAMES: &[&str] = &["p"];
const SUPPORT: &[(f64, f64)] = &[(EPS, 1.0)];

/// Geometric distribution: number of Bernoulli(p) trials up to and
/// including the first success.
///
/// P(X = k) = (1 − p)^{k−1} p for k = 1, 2, …
///
/// # Example
///
/// ```
/// use distfit::stats::{Distribution, Geometric};
///
/// let g = Geometric::new(0.75).unwrap();
/// assert!((g.mean() - 1.0 / 0.75).abs() < 1e-15);
/// assert!((g.pdf(1.0) - 0.75).abs() < 1e-15);
/// assert_eq!(g.ppf(0.5), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometric {
    params: [Option<f64>; 1],
}

impl Geometric {
    /// Create a frozen geometric with success probability `0 < p ≤ 1`.
    pub fn new(p: f64) -> Result<Self, StatsError> {
        Ok(Self {
            params: checked_params([p], SUPPORT)?,
        })
    }

    /// Create an unparametrized geometric, ready for fitting.
    pub fn unset() -> Self {
        Self::default()
    }
}

impl Distribution for Geometric {
    fn name(&self) -> &'static str {
        "Geometric"
    }

    fn kind(&self) -> Kind {
        Kind::Discrete
    }

    fn param_names(&self) -> &'static [&'static str] {
        NAMES
    }

    fn params_support(&self) -> &'static [(f64, f64)] {
        SUPPORT
    }

    fn raw_params(&self) -> &[Option<f64>] {
        &self.params
    }

    fn raw_params_mut(&mut self) -> &mut [Option<f64>] {
        &mut self.params
    }

    fn support(&self) -> (f64, f64) {
        (1.0, f64::INFINITY)
    }

    fn logpdf(&self, x: f64) -> f64 {
        let Some([p]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x.is_nan() {
            return x;
        }
        if !self.params_feasible() || x < 1.0 || x.fract() != 0.0 {
            return f64::NEG_INFINITY;
        }
        xlog1py(x - 1.0, -p) + p.ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        let Some([p]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x.is_nan() {
            return x;
        }
        if x < 1.0 {
            return 0.0;
        }
        -(x.floor() * (-p).ln_1p()).exp_m1()
    }

    fn sf(&self, x: f64) -> f64 {
        let Some([p]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x < 1.0 {
            return 1.0;
        }
        (x.floor() * (-p).ln_1p()).exp()
    }

    fn ppf(&self, q: f64) -> f64 {
        let Some([p]) = self.frozen_params() else {
            return f64::NAN;
        };
        let guess = ppf_bounds_disc((-q).ln_1p() / (-p).ln_1p(), q, 1.0, f64::INFINITY);
        refine_lattice(self, guess, q)
    }

    fn mean(&self) -> f64 {
        self.frozen_params().map_or(f64::NAN, |[p]| 1.0 / p)
    }

    fn var(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[p]| (1.0 - p) / (p * p))
    }

    fn mode(&self) -> Result<f64, StatsError> {
        Ok(if self.is_frozen() { 1.0 } else { f64::NAN })
    }

    fn skewness(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[p]| (2.0 - p) / (1.0 - p).sqrt())
    }

    fn kurtosis(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[p]| 6.0 + p * p / (1.0 - p))
    }

    fn entropy(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[p]| (xlog1py(p - 1.0, -p) - xlogx(p)) / p)
    }

    fn rvs<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<f64> {
        let Some([p]) = self.frozen_params() else {
            return vec![f64::NAN; size];
        };
        match rand_distr::Geometric::new(p) {
            // Counts failures before the first success
            Ok(geo) => (0..size).map(|_| rng.sample::<u64, _>(&geo) as f64 + 1.0).collect(),
            Err(_) => vec![f64::NAN; size],
        }
    }

    fn moment_params(&self, mean: f64, _sigma: f64) -> Option<Vec<f64>> {
        Some(vec![1.0 / mean])
    }

    fn fit_mle(&mut self, sample: &[f64]) -> Result<(), StatsError> {
        let (mean, _) = sample_mean_std(sample).ok_or(StatsError::EmptySample)?;
        let p = if mean > 0.0 { 1.0 / mean } else { 1.0 };
        self.update(&[p])?;
        log::debug!("{}: MLE (closed form) -> p = {}", self.name(), p);
        Ok(())
    }
}
