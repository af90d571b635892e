use crate::special::{EULER_GAMMA, ZETA_3};

use super::quantile::ppf_bounds_cont;
use super::{checked_params, Distribution, Kind, StatsError, EPS};

const NAMES: &[&str] = &["mu", "beta"];
const SUPPORT: &[(f64, f64)] = &[(f64::NEG_INFINITY, f64::INFINITY), (EPS, f64::INFINITY)];

/// Gumbel (maximum extreme value) distribution with location μ and scale β.
///
/// f(x) = (1/β) exp(−(z + e^{−z})), z = (x − μ)/β.
///
/// # Example
///
/// ```
/// use distfit::stats::{Distribution, Gumbel};
///
/// let g = Gumbel::new(1.0, 2.0).unwrap();
/// assert!((g.mode().unwrap() - 1.0).abs() < 1e-15);
/// assert!((g.ppf(g.cdf(3.0)) - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gumbel {
    params: [Option<f64>; 2],
}

impl Gumbel {
    /// Create a frozen Gumbel with location `mu` and scale `beta > 0`.
    pub fn new(mu: f64, beta: f64) -> Result<Self, StatsError> {
        Ok(Self {
            params: checked_params([mu, beta], SUPPORT)?,
        })
    }

    /// Create an unparametrized Gumbel, ready for fitting.
    pub fn unset() -> Self {
        Self::default()
    }
}

impl Distribution for Gumbel {
    fn name(&self) -> &'static str {
        "Gumbel"
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
        let Some([mu, beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        if !self.params_feasible() {
            return f64::NEG_INFINITY;
        }
        if !x.is_finite() {
            return if x.is_nan() { x } else { f64::NEG_INFINITY };
        }
        let z = (x - mu) / beta;
        -(z + (-z).exp()) - beta.ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        let Some([mu, beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        (-(-(x - mu) / beta).exp()).exp()
    }

    fn sf(&self, x: f64) -> f64 {
        let Some([mu, beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        -(-(-(x - mu) / beta).exp()).exp_m1()
    }

    fn ppf(&self, q: f64) -> f64 {
        let Some([mu, beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        ppf_bounds_cont(mu - beta * (-q.ln()).ln(), q, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn mean(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[mu, beta]| mu + beta * EULER_GAMMA)
    }

    fn var(&self) -> f64 {
        self.frozen_params().map_or(f64::NAN, |[_, beta]| {
            core::f64::consts::PI.powi(2) / 6.0 * beta * beta
        })
    }

    fn median(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[mu, beta]| mu - beta * core::f64::consts::LN_2.ln())
    }

    fn mode(&self) -> Result<f64, StatsError> {
        Ok(self.frozen_params().map_or(f64::NAN, |[mu, _]| mu))
    }

    fn skewness(&self) -> f64 {
        if !self.is_frozen() {
            return f64::NAN;
        }
        12.0 * 6.0_f64.sqrt() * ZETA_3 / core::f64::consts::PI.powi(3)
    }

    fn kurtosis(&self) -> f64 {
        if !self.is_frozen() {
            return f64::NAN;
        }
        2.4
    }

    fn entropy(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[_, beta]| beta.ln() + EULER_GAMMA + 1.0)
    }

    fn moment_params(&self, mean: f64, sigma: f64) -> Option<Vec<f64>> {
        let beta = sigma * 6.0_f64.sqrt() / core::f64::consts::PI;
        Some(vec![mean - beta * EULER_GAMMA, beta])
    }
}
