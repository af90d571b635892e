use crate::special::{gamma_inc_upper, lgamma};

use super::quantile::{ppf_bounds_disc, refine_lattice};
use super::{checked_params, mode, Distribution, Kind, StatsError, EPS};

const NAMES: &[&str] = &["q", "beta"];
const SUPPORT: &[(f64, f64)] = &[(EPS, 1.0 - EPS), (EPS, f64::INFINITY)];

/// Terms summed one by one before the rest of a series is integrated.
const SERIES_TERMS: u32 = 20_000;

/// Discrete Weibull distribution (Nakagawa–Osaki type I).
///
/// P(X = x) = q^{x^β} − q^{(x+1)^β} for x = 0, 1, 2, …
///
/// Mean and variance are survival-function series, E[X] = Σ_{k≥1} q^{k^β},
/// with the far tail integrated in closed form. Skewness, kurtosis, entropy
/// and the mode are computed numerically.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteWeibull {
    params: [Option<f64>; 2],
}

impl DiscreteWeibull {
    /// Create a frozen discrete Weibull with `0 < q < 1` and shape `beta > 0`.
    pub fn new(q: f64, beta: f64) -> Result<Self, StatsError> {
        Ok(Self {
            params: checked_params([q, beta], SUPPORT)?,
        })
    }

    /// Create an unparametrized discrete Weibull, ready for fitting.
    pub fn unset() -> Self {
        Self::default()
    }
}

impl Distribution for DiscreteWeibull {
    fn name(&self) -> &'static str {
        "DiscreteWeibull"
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
        let Some([q, beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x.is_nan() {
            return x;
        }
        if !self.params_feasible() || x < 0.0 || x.fract() != 0.0 {
            return f64::NEG_INFINITY;
        }
        // ln(q^a − q^b) = a ln q + ln(1 − q^{b−a})
        let ln_q = q.ln();
        let a = x.powf(beta);
        let b = (x + 1.0).powf(beta);
        a * ln_q + (-((b - a) * ln_q).exp_m1()).ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        let Some([q, beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x.is_nan() {
            return x;
        }
        if x < 0.0 {
            return 0.0;
        }
        -((x.floor() + 1.0).powf(beta) * q.ln()).exp_m1()
    }

    fn sf(&self, x: f64) -> f64 {
        let Some([q, beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x < 0.0 {
            return 1.0;
        }
        ((x.floor() + 1.0).powf(beta) * q.ln()).exp()
    }

    fn ppf(&self, p: f64) -> f64 {
        let Some([q, beta]) = self.frozen_params() else {
            return f64::NAN;
        };
        let x = ((-p).ln_1p() / q.ln()).powf(1.0 / beta) - 1.0;
        refine_lattice(self, ppf_bounds_disc(x, p, 0.0, f64::INFINITY), p)
    }

    fn mean(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[q, beta]| sf_series(q, beta)[0])
    }

    fn var(&self) -> f64 {
        self.frozen_params().map_or(f64::NAN, |[q, beta]| {
            // E[X²] = Σ_{k≥1} (2k − 1) q^{k^β}
            let [s0, s1] = sf_series(q, beta);
            2.0 * s1 - s0 - s0 * s0
        })
    }

    fn mode(&self) -> Result<f64, StatsError> {
        mode::find_mode(self)
    }

    fn moment_seed(&self, mean: f64, _sigma: f64) -> Vec<f64> {
        let m = mean.max(EPS);
        vec![m / (1.0 + m), 1.0]
    }
}

/// `[Σ q^{k^β}, Σ k·q^{k^β}]` over k ≥ 1.
///
/// Terms are added until they stop contributing. Past [`SERIES_TERMS`] the
/// remainder is replaced by ∫_{K+1/2}^∞ t^j e^{−λt^β} dt with λ = −ln q,
/// which is Γ(s)·Q(s, λ(K+1/2)^β) / (β λ^s) for s = (j + 1)/β.
fn sf_series(q: f64, beta: f64) -> [f64; 2] {
    let lambda = -q.ln();
    let mut sums = [0.0; 2];
    let mut k = 1;
    loop {
        let kf = f64::from(k);
        let term = (-lambda * kf.powf(beta)).exp();
        sums[0] += term;
        sums[1] += kf * term;
        // k·term rises then falls, and cannot drop below ε·sum while rising
        if kf * term <= f64::EPSILON * sums[1] {
            return sums;
        }
        if k >= SERIES_TERMS {
            break;
        }
        k += 1;
    }

    let x = lambda * (f64::from(k) + 0.5).powf(beta);
    for (j, sum) in sums.iter_mut().enumerate() {
        let s = (j as f64 + 1.0) / beta;
        *sum += gamma_inc_upper(s, x).map_or(f64::NAN, |upper| {
            (lgamma(s) + upper.ln() - beta.ln() - s * lambda.ln()).exp()
        });
    }
    sums
}
