use core::f64::consts::PI;

use super::quantile::ppf_bounds_cont;
use super::{checked_params, Distribution, Kind, StatsError, EPS};

const NAMES: &[&str] = &["mu", "s"];
const SUPPORT: &[(f64, f64)] = &[(f64::NEG_INFINITY, f64::INFINITY), (EPS, f64::INFINITY)];

/// Logistic distribution with location μ and scale s.
///
/// f(x) = e^{−z} / (s (1 + e^{−z})²), z = (x − μ)/s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Logistic {
    params: [Option<f64>; 2],
}

impl Logistic {
    /// Create a frozen logistic with location `mu` and scale `s > 0`.
    pub fn new(mu: f64, s: f64) -> Result<Self, StatsError> {
        Ok(Self {
            params: checked_params([mu, s], SUPPORT)?,
        })
    }

    /// Create an unparametrized logistic, ready for fitting.
    pub fn unset() -> Self {
        Self::default()
    }
}

impl Distribution for Logistic {
    fn name(&self) -> &'static str {
        "Logistic"
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
        (f64::NEG_INFINITY, f64::INFINITY)
    }

    fn logpdf(&self, x: f64) -> f64 {
        let Some([mu, s]) = self.frozen_params() else {
            return f64::NAN;
        };
        if !self.params_feasible() {
            return f64::NEG_INFINITY;
        }
        // Symmetric form: stays finite for large |z|
        let z = ((x - mu) / s).abs();
        -s.ln() - z - 2.0 * (-z).exp().ln_1p()
    }

    fn cdf(&self, x: f64) -> f64 {
        let Some([mu, s]) = self.frozen_params() else {
            return f64::NAN;
        };
        1.0 / (1.0 + (-(x - mu) / s).exp())
    }

    fn sf(&self, x: f64) -> f64 {
        let Some([mu, s]) = self.frozen_params() else {
            return f64::NAN;
        };
        1.0 / (1.0 + ((x - mu) / s).exp())
    }

    fn ppf(&self, q: f64) -> f64 {
        let Some([mu, s]) = self.frozen_params() else {
            return f64::NAN;
        };
        ppf_bounds_cont(mu + s * (q / (1.0 - q)).ln(), q, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.frozen_params().map_or(f64::NAN, |[mu, _]| mu)
    }

    fn var(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[_, s]| s * s * PI * PI / 3.0)
    }

    fn median(&self) -> f64 {
        self.mean()
    }

    fn mode(&self) -> Result<f64, StatsError> {
        Ok(self.mean())
    }

    fn skewness(&self) -> f64 {
        if self.is_frozen() {
            0.0
        } else {
            f64::NAN
        }
    }

    fn kurtosis(&self) -> f64 {
        if self.is_frozen() {
            1.2
        } else {
            f64::NAN
        }
    }

    fn entropy(&self) -> f64 {
        self.frozen_params().map_or(f64::NAN, |[_, s]| s.ln() + 2.0)
    }

    fn moment_params(&self, mean: f64, sigma: f64) -> Option<Vec<f64>> {
        Some(vec![mean, sigma * 3.0_f64.sqrt() / PI])
    }
}
