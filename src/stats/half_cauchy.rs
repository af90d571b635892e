use core::f64::consts::{FRAC_2_PI, PI};

use super::quantile::ppf_bounds_cont;
use super::{checked_params, Distribution, Kind, StatsError, EPS};

const NAMES: &[&str] = &["beta"];
const SUPPORT: &[(f64, f64)] = &[(EPS, f64::INFINITY)];

/// Half-Cauchy distribution with scale β, supported on `[0, ∞)`.
///
/// f(x) = 2 / (π β (1 + (x/β)²)). Mean and variance are infinite; skewness
/// and kurtosis are undefined (NaN).
///
/// # Example
///
/// ```
/// use distfit::stats::{Distribution, HalfCauchy};
///
/// let h = HalfCauchy::new(2.0).unwrap();
/// assert!((h.median() - 2.0).abs() < 1e-12);
/// assert!(h.mean().is_infinite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfCauchy {
    params: [Option<f64>; 1],
}

impl HalfCauchy {
    /// Create a frozen half-Cauchy with scale `beta > 0`.
    pub fn new(beta: f64) -> Result<Self, StatsError> {
        Ok(Self {
            params: checked_params([beta], SUPPORT)?,
        })
    }

    /// Create an unparametrized half-Cauchy, ready for fitting.
    pub fn unset() -> Self {
        Self::default()
    }
}

impl Distribution for HalfCauchy {
    fn name(&self) -> &'static str {
        "HalfCauchy"
    }

    fn kind(&self) -> Kind {
        Kind::Continuous
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
        (0.0, f64::INFINITY)
    }

    fn logpdf(&self, x: f64) -> f64 {
        let Some([beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        if !self.params_feasible() || x < 0.0 {
            return f64::NEG_INFINITY;
        }
        core::f64::consts::LN_2 - (PI * beta).ln() - (x / beta).powi(2).ln_1p()
    }

    fn cdf(&self, x: f64) -> f64 {
        let Some([beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x < 0.0 {
            return 0.0;
        }
        FRAC_2_PI * (x / beta).atan()
    }

    fn sf(&self, x: f64) -> f64 {
        let Some([beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x <= 0.0 {
            return 1.0;
        }
        FRAC_2_PI * (beta / x).atan()
    }

    fn ppf(&self, q: f64) -> f64 {
        let Some([beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        ppf_bounds_cont(beta * (0.5 * PI * q).tan(), q, 0.0, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        if self.is_frozen() {
            f64::INFINITY
        } else {
            f64::NAN
        }
    }

    fn var(&self) -> f64 {
        self.mean()
    }

    fn median(&self) -> f64 {
        self.frozen_params().map_or(f64::NAN, |[beta]| beta)
    }

    fn mode(&self) -> Result<f64, StatsError> {
        Ok(if self.is_frozen() { 0.0 } else { f64::NAN })
    }

    fn skewness(&self) -> f64 {
        f64::NAN
    }

    fn kurtosis(&self) -> f64 {
        f64::NAN
    }

    fn entropy(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[beta]| (2.0 * PI * beta).ln())
    }

    fn moment_params(&self, _mean: f64, sigma: f64) -> Option<Vec<f64>> {
        Some(vec![sigma])
    }

    /// Seeds at the sample median, which equals β.
    fn mle_seed(&mut self, sample: &[f64]) -> Result<(), StatsError> {
        if sample.is_empty() {
            return Err(StatsError::EmptySample);
        }
        let mut sorted = sample.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            0.5 * (sorted[mid - 1] + sorted[mid])
        } else {
            sorted[mid]
        };
        self.update(&[median.abs().max(EPS)])
    }
}
