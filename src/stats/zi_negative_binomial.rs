use rand::Rng;

use crate::special::{betainc, lgamma, xlogy};

use super::{checked_params, mode, Distribution, Kind, StatsError, EPS};

const NAMES: &[&str] = &["psi", "mu", "alpha"];
const SUPPORT: &[(f64, f64)] = &[(EPS, 1.0 - EPS), (EPS, f64::INFINITY), (EPS, f64::INFINITY)];

/// Zero-inflated negative binomial distribution.
///
/// With probability `1 − ψ` the draw is a structural zero; otherwise it
/// comes from a negative binomial with mean μ and dispersion α:
///
/// - P(X = 0) = (1 − ψ) + ψ (α/(μ + α))^α
/// - P(X = x) = ψ Γ(x + α)/(x! Γ(α)) (α/(μ + α))^α (μ/(μ + α))^x for x ≥ 1
///
/// The equivalent `(ψ, p, n)` parametrization, with p = α/(μ + α) and
/// n = α, is available through [`ZeroInflatedNegativeBinomial::from_p_n`]
/// and [`ZeroInflatedNegativeBinomial::p_n`].
///
/// # Example
///
/// ```
/// use distfit::stats::{Distribution, ZeroInflatedNegativeBinomial};
///
/// let z = ZeroInflatedNegativeBinomial::new(0.7, 5.0, 2.0).unwrap();
/// assert!((z.mean() - 3.5).abs() < 1e-12);
/// let (p, n) = z.p_n().unwrap();
/// assert!((p - 2.0 / 7.0).abs() < 1e-15 && n == 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZeroInflatedNegativeBinomial {
    params: [Option<f64>; 3],
}

impl ZeroInflatedNegativeBinomial {
    /// Create a frozen distribution from `0 < psi < 1`, mean `mu > 0` and
    /// dispersion `alpha > 0`.
    pub fn new(psi: f64, mu: f64, alpha: f64) -> Result<Self, StatsError> {
        Ok(Self {
            params: checked_params([psi, mu, alpha], SUPPORT)?,
        })
    }

    /// Create a frozen distribution from `psi`, success probability
    /// `0 < p < 1` and number of successes `n > 0`.
    pub fn from_p_n(psi: f64, p: f64, n: f64) -> Result<Self, StatsError> {
        if !(p > 0.0 && p < 1.0) {
            return Err(StatsError::InvalidParameter);
        }
        Self::new(psi, n * (1.0 - p) / p, n)
    }

    /// Create an unparametrized distribution, ready for fitting.
    pub fn unset() -> Self {
        Self::default()
    }

    /// The `(p, n)` form of the negative binomial component.
    pub fn p_n(&self) -> Option<(f64, f64)> {
        let [_, mu, alpha] = self.frozen_params()?;
        Some((alpha / (mu + alpha), alpha))
    }
}

impl Distribution for ZeroInflatedNegativeBinomial {
    fn name(&self) -> &'static str {
        "ZeroInflatedNegativeBinomial"
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
        (0.0, f64::INFINITY)
    }

    fn logpdf(&self, x: f64) -> f64 {
        let Some([psi, mu, alpha]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x.is_nan() {
            return x;
        }
        if !self.params_feasible() || x < 0.0 || x.fract() != 0.0 || x.is_infinite() {
            return f64::NEG_INFINITY;
        }
        let p = alpha / (mu + alpha);
        if x == 0.0 {
            return ((1.0 - psi) + psi * p.powf(alpha)).ln();
        }
        psi.ln() + lgamma(x + alpha) - lgamma(alpha) - lgamma(x + 1.0)
            + xlogy(alpha, p)
            + xlogy(x, 1.0 - p)
    }

    fn cdf(&self, x: f64) -> f64 {
        let Some([psi, mu, alpha]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x.is_nan() {
            return x;
        }
        if x < 0.0 {
            return 0.0;
        }
        if x.is_infinite() {
            return 1.0;
        }
        let p = alpha / (mu + alpha);
        match betainc(alpha, x.floor() + 1.0, p) {
            Ok(nb) => ((1.0 - psi) + psi * nb).clamp(0.0, 1.0),
            Err(_) => f64::NAN,
        }
    }

    fn mean(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[psi, mu, _]| psi * mu)
    }

    fn var(&self) -> f64 {
        self.frozen_params().map_or(f64::NAN, |[psi, mu, alpha]| {
            psi * (mu * mu / alpha + mu + mu * mu) - (psi * mu).powi(2)
        })
    }

    fn mode(&self) -> Result<f64, StatsError> {
        mode::find_mode(self)
    }

    fn rvs<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<f64> {
        let Some([psi, mu, alpha]) = self.frozen_params() else {
            return vec![f64::NAN; size];
        };
        if !self.params_feasible() {
            return vec![f64::NAN; size];
        }
        let Ok(rate) = rand_distr::Gamma::new(alpha, mu / alpha) else {
            return vec![f64::NAN; size];
        };
        (0..size)
            .map(|_| {
                if !rng.random_bool(psi) {
                    return 0.0;
                }
                let lambda: f64 = rng.sample(&rate);
                if !(lambda > 0.0) {
                    return 0.0;
                }
                rand_distr::Poisson::new(lambda).map_or(f64::NAN, |pois| rng.sample(pois))
            })
            .collect()
    }

    fn moment_seed(&self, mean: f64, _sigma: f64) -> Vec<f64> {
        let psi = 0.9;
        vec![psi, (mean / psi).max(EPS), 1.0]
    }
}
