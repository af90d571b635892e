//! Probability distributions with numeric quantile inversion, moment
//! matching and maximum-likelihood fitting.
//!
//! Every family implements the [`Distribution`] trait. A distribution starts
//! unparametrized (every parameter `None`), and becomes *frozen* once all of
//! its parameters are set, either at construction, through [`Distribution::update`]
//! or by one of the fitters. An unfrozen distribution evaluates every numeric
//! method to NaN.
//!
//! # Discrete families
//!
//! | Distribution | Parameters | Support |
//! |---|---|---|
//! | [`BetaBinomial`] | alpha, beta, n | {0, …, n} |
//! | [`Geometric`] | p | {1, 2, …} |
//! | [`DiscreteWeibull`] | q, beta | {0, 1, …} |
//! | [`ZeroInflatedNegativeBinomial`] | psi, mu, alpha | {0, 1, …} |
//!
//! # Continuous families
//!
//! | Distribution | Parameters | Support |
//! |---|---|---|
//! | [`Gumbel`] | mu, beta | (−∞, ∞) |
//! | [`HalfCauchy`] | beta | [0, ∞) |
//! | [`Logistic`] | mu, s | (−∞, ∞) |
//!
//! # Numeric engines
//!
//! | Module | Purpose |
//! |---|---|
//! | [`quantile`] | generic inverse-CDF for continuous and discrete families |
//! | [`fit`] | moment matching, maximum likelihood, model ranking |
//! | [`mode`] | numeric mode for families without a closed form |
//! | [`moments`] | grid-based mean, variance, skewness, kurtosis, entropy |
//! | [`elicit`] | fitting to elicited quartiles |
//!
//! # Example
//!
//! ```
//! use distfit::stats::{Distribution, Gumbel};
//!
//! let g = Gumbel::new(0.0, 1.0).unwrap();
//! assert!((g.cdf(0.0) - (-1.0_f64).exp()).abs() < 1e-15);
//!
//! let mut fitted = Gumbel::unset();
//! fitted.fit_moments(g.mean(), g.std()).unwrap();
//! assert!((fitted.params().unwrap()[1] - 1.0).abs() < 1e-12);
//! ```

mod any;
mod beta_binomial;
mod discrete_weibull;
pub mod elicit;
pub mod fit;
mod geometric;
mod gumbel;
mod half_cauchy;
mod logistic;
pub mod mode;
pub mod moments;
pub mod quantile;
mod zi_negative_binomial;


pub use any::AnyDistribution;
pub use beta_binomial::BetaBinomial;
pub use discrete_weibull::DiscreteWeibull;
pub use elicit::{quartile, QuartileFit};
pub use fit::mle;
pub use geometric::Geometric;
pub use gumbel::Gumbel;
pub use half_cauchy::HalfCauchy;
pub use logistic::Logistic;
pub use zi_negative_binomial::ZeroInflatedNegativeBinomial;

use rand::distr::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::optim::OptimError;

/// Smallest value of an open-at-zero parameter interval.
pub const EPS: f64 = f64::EPSILON;

/// Errors from distribution construction and fitting.
///
/// Evaluation (`pdf`, `cdf`, `ppf`, moments) never returns these: out of
/// range inputs produce the usual sentinels (0, 1, `-inf`, NaN) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A parameter is out of its valid range, or the wrong number was given.
    #[error("distribution parameter out of valid range")]
    InvalidParameter,
    /// No parameter with the requested name.
    #[error("no parameter with that name")]
    UnknownParameter,
    /// The operation needs every parameter set.
    #[error("distribution parameters are not all set")]
    NotFrozen,
    /// The family has no closed form or numeric fallback for this quantity.
    #[error("{0} is not implemented for this distribution")]
    NotImplemented(&'static str),
    /// A fitter was handed an empty sample.
    #[error("sample is empty")]
    EmptySample,
    /// Target statistics must be finite, with a positive spread.
    #[error("target statistics must be finite with positive spread")]
    InvalidTarget,
    /// Quartiles must be strictly increasing.
    #[error("quartiles must satisfy q1 < q2 < q3")]
    QuartileOrder,
    /// Every parameter is fixed, so there is nothing to fit.
    #[error("all parameters are fixed")]
    AllFixed,
    /// A target value lies outside the distribution support.
    #[error("value lies outside the distribution support")]
    OutOfSupport,
    /// The underlying optimizer rejected its inputs.
    #[error(transparent)]
    Optim(#[from] OptimError),
}

/// Whether a family lives on the integer lattice or the real line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// Probability mass on integers; `logpdf` is the log pmf.
    Discrete,
    /// Probability density on an interval of the real line.
    Continuous,
}

impl Kind {
    pub fn is_discrete(self) -> bool {
        self == Kind::Discrete
    }
}

/// Capability contract shared by every distribution family.
///
/// Families supply metadata, `logpdf`, `cdf`, `mean` and `var`; everything
/// else has a generic implementation that families override when a closed
/// form exists. `logpdf` is the computational primitive and `pdf` is always
/// derived from it.
pub trait Distribution {
    /// Family name, e.g. `"Gumbel"`.
    fn name(&self) -> &'static str;

    fn kind(&self) -> Kind;

    /// Ordered parameter identifiers.
    fn param_names(&self) -> &'static [&'static str];

    /// Closed interval each parameter is clamped to, in `param_names` order.
    fn params_support(&self) -> &'static [(f64, f64)];

    /// Parameter storage; `None` until set.
    fn raw_params(&self) -> &[Option<f64>];

    fn raw_params_mut(&mut self) -> &mut [Option<f64>];

    /// Interval on which the density is non-zero. Depends on the parameters
    /// for some families.
    fn support(&self) -> (f64, f64);

    /// Log density (log mass for discrete families); `-inf` outside the support.
    fn logpdf(&self, x: f64) -> f64;

    /// Cumulative probability P(X ≤ x), 0 below and 1 above the support.
    fn cdf(&self, x: f64) -> f64;

    fn mean(&self) -> f64;

    fn var(&self) -> f64;

    /// Index of a parameter restricted to integers, if any.
    fn integer_param(&self) -> Option<usize> {
        None
    }

    /// Current parameters, or `None` while any is unset.
    fn params(&self) -> Option<Vec<f64>> {
        self.raw_params().iter().copied().collect()
    }

    fn is_frozen(&self) -> bool {
        self.raw_params().iter().all(Option::is_some)
    }

    /// Current parameters as a fixed-size array, or `None` while any is unset.
    fn frozen_params<const N: usize>(&self) -> Option<[f64; N]> {
        let raw = self.raw_params();
        if raw.len() != N {
            return None;
        }
        let mut out = [0.0; N];
        for (o, p) in out.iter_mut().zip(raw) {
            *o = (*p)?;
        }
        Some(out)
    }

    /// True when every set parameter lies inside its `params_support` interval.
    fn params_feasible(&self) -> bool {
        self.raw_params()
            .iter()
            .zip(self.params_support())
            .all(|(p, &(lo, hi))| p.map_or(true, |v| v >= lo && v <= hi))
    }

    /// Overwrite all parameters and freeze.
    ///
    /// Values are clamped into `params_support`; an integer parameter is
    /// rounded.
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidParameter`] if the count is wrong or any value is NaN.
    fn update(&mut self, params: &[f64]) -> Result<(), StatsError> {
        if params.len() != self.param_names().len() || params.iter().any(|p| p.is_nan()) {
            return Err(StatsError::InvalidParameter);
        }
        let support = self.params_support();
        let integer = self.integer_param();
        for (i, (slot, &v)) in self.raw_params_mut().iter_mut().zip(params).enumerate() {
            let (lo, hi) = support[i];
            let mut v = v.clamp(lo, hi);
            if integer == Some(i) {
                v = v.round().clamp(lo.ceil(), hi);
            }
            *slot = Some(v);
        }
        Ok(())
    }

    /// Set one named parameter. On an unfrozen distribution the fitters hold
    /// it constant.
    ///
    /// # Errors
    ///
    /// [`StatsError::UnknownParameter`] for an unknown name,
    /// [`StatsError::InvalidParameter`] for a value outside `params_support`.
    fn fix(&mut self, name: &str, value: f64) -> Result<(), StatsError> {
        let idx = self
            .param_names()
            .iter()
            .position(|&n| n == name)
            .ok_or(StatsError::UnknownParameter)?;
        let (lo, hi) = self.params_support()[idx];
        if !(value >= lo && value <= hi) {
            return Err(StatsError::InvalidParameter);
        }
        if self.integer_param() == Some(idx) && value.fract() != 0.0 {
            return Err(StatsError::InvalidParameter);
        }
        self.raw_params_mut()[idx] = Some(value);
        Ok(())
    }

    /// Indices the fitters may change: every parameter of a frozen
    /// distribution, otherwise the unset ones.
    fn free_params(&self) -> Vec<usize> {
        let frozen = self.is_frozen();
        self.raw_params()
            .iter()
            .enumerate()
            .filter(|(_, p)| frozen || p.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    fn pdf(&self, x: f64) -> f64 {
        self.logpdf(x).exp()
    }

    fn logcdf(&self, x: f64) -> f64 {
        self.cdf(x).ln()
    }

    /// Survival function 1 − cdf(x).
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    fn logsf(&self, x: f64) -> f64 {
        self.sf(x).ln()
    }

    /// Quantile function, the generalized inverse of `cdf`.
    ///
    /// NaN for `q` outside `[0, 1]`; `ppf(0)` and `ppf(1)` are the support
    /// bounds. The default inverts `cdf` numerically.
    fn ppf(&self, q: f64) -> f64 {
        match self.kind() {
            Kind::Continuous => quantile::invert_continuous(self, q),
            Kind::Discrete => quantile::invert_discrete(self, q),
        }
    }

    /// Inverse survival function, `ppf(1 − q)`.
    fn isf(&self, q: f64) -> f64 {
        self.ppf(1.0 - q)
    }

    fn pdf_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.pdf(x)).collect()
    }

    fn cdf_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.cdf(x)).collect()
    }

    fn ppf_many(&self, qs: &[f64]) -> Vec<f64> {
        qs.iter().map(|&q| self.ppf(q)).collect()
    }

    fn std(&self) -> f64 {
        self.var().sqrt()
    }

    fn median(&self) -> f64 {
        self.ppf(0.5)
    }

    /// Most probable value.
    ///
    /// # Errors
    ///
    /// [`StatsError::NotImplemented`] for families without a closed form or
    /// numeric mode.
    fn mode(&self) -> Result<f64, StatsError> {
        Err(StatsError::NotImplemented("mode"))
    }

    /// Standardized third moment; numeric unless overridden.
    fn skewness(&self) -> f64 {
        moments::num_skewness(self)
    }

    /// Excess kurtosis; numeric unless overridden.
    fn kurtosis(&self) -> f64 {
        moments::num_kurtosis(self)
    }

    /// Differential (or Shannon, for discrete families) entropy in nats.
    fn entropy(&self) -> f64 {
        moments::num_entropy(self)
    }

    /// Negative log-likelihood of `sample`, the objective MLE minimizes.
    fn neg_logpdf(&self, sample: &[f64]) -> f64 {
        -sample.iter().map(|&x| self.logpdf(x)).sum::<f64>()
    }

    /// Draw `size` samples. Inverse-transform sampling unless overridden.
    fn rvs<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<f64> {
        (0..size)
            .map(|_| {
                let u: f64 = rng.sample(Open01);
                self.ppf(u)
            })
            .collect()
    }

    /// Draw `size` samples; reproducible when `seed` is given.
    fn rvs_seeded(&self, size: usize, seed: Option<u64>) -> Vec<f64> {
        match seed {
            Some(seed) => self.rvs(size, &mut StdRng::seed_from_u64(seed)),
            None => self.rvs(size, &mut rand::rng()),
        }
    }

    /// Closed-form parameters with the given mean and standard deviation,
    /// honouring any parameter already fixed. `None` when the family has no
    /// such inversion or the target is outside its reach.
    fn moment_params(&self, _mean: f64, _sigma: f64) -> Option<Vec<f64>> {
        None
    }

    /// Starting point for numeric moment matching.
    fn moment_seed(&self, mean: f64, _sigma: f64) -> Vec<f64> {
        self.params_support()
            .iter()
            .map(|&(lo, hi)| match (lo.is_finite(), hi.is_finite()) {
                (true, true) => 0.5 * (lo + hi),
                (true, false) => lo.max(1.0),
                (false, true) => hi.min(-1.0),
                (false, false) => mean,
            })
            .collect()
    }

    /// Move the parameters to a starting point for MLE.
    ///
    /// The default moment-matches the sample mean and (population)
    /// standard deviation.
    fn mle_seed(&mut self, sample: &[f64]) -> Result<(), StatsError> {
        let (mean, std) = fit::sample_mean_std(sample).ok_or(StatsError::EmptySample)?;
        let sigma = if std > 0.0 { std } else { 1e-3 * (1.0 + mean.abs()) };
        self.fit_moments(mean, sigma)
    }

    /// Fit to a target mean and standard deviation.
    ///
    /// An unreachable target is not an error: the result sits on the
    /// boundary of the feasible region nearest to it.
    fn fit_moments(&mut self, mean: f64, sigma: f64) -> Result<(), StatsError> {
        fit::fit_moments(self, mean, sigma)
    }

    /// Maximum-likelihood fit to `sample`.
    fn fit_mle(&mut self, sample: &[f64]) -> Result<(), StatsError> {
        fit::fit_mle(self, sample)
    }
}

/// Writes `params` into storage verbatim: no clamping, no rounding.
pub(crate) fn set_raw<D: Distribution + ?Sized>(dist: &mut D, params: &[f64]) {
    for (slot, &v) in dist.raw_params_mut().iter_mut().zip(params) {
        *slot = Some(v);
    }
}

/// Validate constructor arguments against `support` and wrap them as set
/// parameters.
pub(crate) fn checked_params<const N: usize>(
    values: [f64; N],
    support: &[(f64, f64)],
) -> Result<[Option<f64>; N], StatsError> {
    let mut out = [None; N];
    for ((slot, &v), &(lo, hi)) in out.iter_mut().zip(&values).zip(support) {
        if !(v >= lo && v <= hi) {
            return Err(StatsError::InvalidParameter);
        }
        *slot = Some(v);
    }
    Ok(out)
}
