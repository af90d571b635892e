//! # distfit
//!
//! Probability distributions with analytic and numeric evaluation of
//! density, cumulative probability, quantiles, moments and entropy, plus
//! fitting of parameters to samples (maximum likelihood), to target
//! moments, or to elicited quartiles.
//!
//! ## Quick start
//!
//! ```
//! use distfit::stats::{Distribution, Gumbel};
//!
//! // Draw from a known Gumbel, then recover it by maximum likelihood
//! let truth = Gumbel::new(2.0, 0.5).unwrap();
//! let sample = truth.rvs_seeded(5_000, Some(42));
//!
//! let mut fitted = Gumbel::unset();
//! fitted.fit_mle(&sample).unwrap();
//! let [mu, beta] = fitted.frozen_params().unwrap();
//! assert!((mu - 2.0).abs() < 0.1);
//! assert!((beta - 0.5).abs() < 0.1);
//! ```
//!
//! ## Modules
//!
//! - [`stats`] — The [`stats::Distribution`] trait and seven families
//!   (beta-binomial, geometric, discrete Weibull, zero-inflated negative
//!   binomial, Gumbel, half-Cauchy, logistic). Generic quantile inversion,
//!   numeric mode and moments for families without closed forms, moment
//!   matching, MLE with integer-parameter profiling, model ranking and
//!   quartile elicitation. [`stats::AnyDistribution`] wraps the closed family
//!   set behind one type.
//!
//! - [`optim`] — Numeric engines: Brent and bisection root finding
//!   ([`optim::brent`], [`optim::bisect`]), Brent's bounded scalar minimizer
//!   ([`optim::minimize_bounded`]) and a boxed Nelder–Mead
//!   ([`optim::nelder_mead`]).
//!
//! - [`special`] — Gamma, log-gamma, beta, log-beta, regularized incomplete
//!   beta and gamma, and the `x·ln y` family that stays finite at zero.
//!
//! - [`traits`] — [`FloatScalar`], the real-float element trait behind the
//!   generic special-function and optimizer kernels.
//!
//! ## Conventions
//!
//! Evaluation never fails: outside the support `pdf` is 0 and `logpdf` is
//! `-inf`, `cdf` clamps to 0 or 1, and `ppf` returns NaN for probabilities
//! outside `[0, 1]`. An unfrozen distribution (some parameter unset)
//! evaluates to NaN. Fitting reports caller errors (empty sample, invalid
//! target) through [`stats::StatsError`]; optimizer non-convergence is
//! logged through the [`log`] facade, never raised.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no      | `Serialize`/`Deserialize` for every family and [`stats::AnyDistribution`] |

pub mod optim;
pub mod special;
pub mod stats;
pub mod traits;

pub use traits::FloatScalar;
