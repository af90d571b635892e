use rand::Rng;

use crate::optim::NelderMeadSettings;
use crate::special::lbeta;

use super::fit::{check_target, fit_mle_profiled, fit_moments_profiled_with, fit_moments_with};
use super::{checked_params, mode, Distribution, Kind, StatsError, EPS};

const NAMES: &[&str] = &["alpha", "beta", "n"];
const SUPPORT: &[(f64, f64)] = &[(EPS, f64::INFINITY), (EPS, f64::INFINITY), (1.0, f64::INFINITY)];
const N: usize = 2;

/// Cap on the number of `n` candidates profiled by moment matching.
const MAX_PROFILE: f64 = 500.0;

/// Beta-binomial distribution: Binomial(n, p) with p ~ Beta(α, β).
///
/// P(X = x) = C(n, x) B(x + α, n − x + β) / B(α, β) for x = 0, …, n.
///
/// The number of trials `n` is an integer parameter; the MLE profiles it
/// over a range of candidates.
///
/// # Example
///
/// ```
/// use distfit::stats::{BetaBinomial, Distribution};
///
/// let bb = BetaBinomial::new(2.0, 5.0, 10.0).unwrap();
/// assert_eq!(bb.support(), (0.0, 10.0));
/// let total: f64 = (0..=10).map(|x| bb.pdf(x as f64)).sum();
/// assert!((total - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetaBinomial {
    params: [Option<f64>; 3],
}

impl BetaBinomial {
    /// Create a frozen beta-binomial with shapes `alpha, beta > 0` and an
    /// integer number of trials `n ≥ 1`.
    pub fn new(alpha: f64, beta: f64, n: f64) -> Result<Self, StatsError> {
        if n.fract() != 0.0 {
            return Err(StatsError::InvalidParameter);
        }
        Ok(Self {
            params: checked_params([alpha, beta, n], SUPPORT)?,
        })
    }

    /// Create an unparametrized beta-binomial, ready for fitting.
    pub fn unset() -> Self {
        Self::default()
    }
}

impl Distribution for BetaBinomial {
    fn name(&self) -> &'static str {
        "BetaBinomial"
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

    fn integer_param(&self) -> Option<usize> {
        Some(N)
    }

    fn support(&self) -> (f64, f64) {
        (0.0, self.params[N].unwrap_or(f64::NAN))
    }

    fn logpdf(&self, x: f64) -> f64 {
        let Some([alpha, beta, n]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x.is_nan() {
            return x;
        }
        if !self.params_feasible() || x < 0.0 || x > n || x.fract() != 0.0 {
            return f64::NEG_INFINITY;
        }
        let ln_choose = -(n + 1.0).ln() - lbeta(n - x + 1.0, x + 1.0);
        ln_choose + lbeta(x + alpha, n - x + beta) - lbeta(alpha, beta)
    }

    fn cdf(&self, x: f64) -> f64 {
        let Some([_, _, n]) = self.frozen_params() else {
            return f64::NAN;
        };
        if x.is_nan() {
            return x;
        }
        if x < 0.0 {
            return 0.0;
        }
        if x >= n {
            return 1.0;
        }
        let top = x.floor() as u64;
        (0..=top)
            .map(|k| self.pdf(k as f64))
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }

    fn mean(&self) -> f64 {
        self.frozen_params()
            .map_or(f64::NAN, |[a, b, n]| n * a / (a + b))
    }

    fn var(&self) -> f64 {
        self.frozen_params().map_or(f64::NAN, |[a, b, n]| {
            n * a * b * (a + b + n) / ((a + b).powi(2) * (a + b + 1.0))
        })
    }

    fn mode(&self) -> Result<f64, StatsError> {
        let Some([a, b, n]) = self.frozen_params() else {
            return Ok(f64::NAN);
        };
        if a > 1.0 && b > 1.0 {
            Ok(((n + 1.0) * (a - 1.0) / (a + b - 2.0)).floor().clamp(0.0, n))
        } else {
            mode::find_mode(self)
        }
    }

    fn skewness(&self) -> f64 {
        self.frozen_params().map_or(f64::NAN, |[a, b, n]| {
            (a + b + 2.0 * n) * (b - a) / (a + b + 2.0)
                * ((1.0 + a + b) / (n * a * b * (a + b + n))).sqrt()
        })
    }

    fn kurtosis(&self) -> f64 {
        self.frozen_params().map_or(f64::NAN, |[a, b, n]| {
            let s = a + b;
            let p = a * b;
            let left = s * s * (1.0 + s) / (n * p * (s + 2.0) * (s + 3.0) * (s + n));
            let right = s * (s - 1.0 + 6.0 * n) + 3.0 * p * (n - 2.0) + 6.0 * n * n
                - 3.0 * p * n * (6.0 - n) / s
                - 18.0 * p * n * n / (s * s);
            left * right - 3.0
        })
    }

    fn rvs<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<f64> {
        let Some([a, b, n]) = self.frozen_params() else {
            return vec![f64::NAN; size];
        };
        let Ok(beta) = rand_distr::Beta::new(a, b) else {
            return vec![f64::NAN; size];
        };
        (0..size)
            .map(|_| {
                let p: f64 = rng.sample(&beta);
                match rand_distr::Binomial::new(n as u64, p) {
                    Ok(binom) => rng.sample::<u64, _>(binom) as f64,
                    Err(_) => f64::NAN,
                }
            })
            .collect()
    }

    /// Closed form given `n`. A free `n` starts at `ceil(mean + 3σ)` and is
    /// moved into the range where the target is reachable,
    /// `mean + σ²/mean < n < mean²/(mean − σ²)`.
    fn moment_params(&self, mean: f64, sigma: f64) -> Option<Vec<f64>> {
        let n = match self.params[N] {
            Some(n) if !self.is_frozen() => n,
            _ => reachable_n(mean, sigma)?,
        };
        closed_moments(mean, sigma, n)
    }

    /// Without a closed-form solution a free `n` is profiled over
    /// `ceil(mean) ..= ceil(mean + 3σ)` (at least ten candidates).
    fn fit_moments(&mut self, mean: f64, sigma: f64) -> Result<(), StatsError> {
        check_target(mean, sigma)?;
        let settings = NelderMeadSettings::default();
        let free = self.free_params();
        let closed = free.len() == NAMES.len() && self.moment_params(mean, sigma).is_some();
        if !free.contains(&N) || closed {
            return fit_moments_with(self, mean, sigma, &settings);
        }
        let lo = mean.ceil().max(1.0);
        let hi = (mean + 3.0 * sigma).ceil().clamp(lo + 10.0, lo + MAX_PROFILE);
        let candidates = (0..=(hi - lo) as u64).map(|k| lo + k as f64);
        fit_moments_profiled_with(self, mean, sigma, N, candidates, &settings)
    }

    /// Profiles `n` over `max(x) ..= max(x) + max(10, max(x))` unless it is fixed.
    fn fit_mle(&mut self, sample: &[f64]) -> Result<(), StatsError> {
        if sample.is_empty() {
            return Err(StatsError::EmptySample);
        }
        if !self.free_params().contains(&N) {
            return super::fit::fit_mle(self, sample);
        }
        let max_x = sample
            .iter()
            .copied()
            .filter(|x| x.is_finite())
            .fold(0.0_f64, f64::max)
            .ceil()
            .max(1.0);
        let span = max_x.max(10.0) as u64;
        let candidates = (0..=span).map(|k| max_x + k as f64);
        fit_mle_profiled(self, sample, N, candidates)
    }
}

/// (alpha, beta, n) with the given mean and standard deviation for a fixed
/// `n`, when one exists.
fn closed_moments(mean: f64, sigma: f64, n: f64) -> Option<Vec<f64>> {
    let p = mean / n;
    if !(p > 0.0 && p < 1.0) {
        return None;
    }
    let ratio = sigma * sigma / (n * p * (1.0 - p));
    if !(ratio > 1.0 && ratio < n) {
        return None;
    }
    let s = (n - ratio) / (ratio - 1.0);
    Some(vec![p * s, (1.0 - p) * s, n])
}

/// An integer `n` for which [`closed_moments`] succeeds, preferring
/// `ceil(mean + 3σ)`.
fn reachable_n(mean: f64, sigma: f64) -> Option<f64> {
    if !(mean > 0.0) {
        return None;
    }
    let var = sigma * sigma;
    let lo = (mean + var / mean).floor() + 1.0;
    let hi = if var < mean {
        (mean * mean / (mean - var)).ceil() - 1.0
    } else {
        f64::INFINITY
    };
    let n = (mean + 3.0 * sigma).ceil().max(1.0).min(hi).max(lo);
    // Rounding at either end of the range is settled by the closed form itself
    [n, n - 1.0, n + 1.0]
        .into_iter()
        .filter(|&n| n >= 1.0)
        .find(|&n| closed_moments(mean, sigma, n).is_some())
}
