//! Optimization: bracketed root finding, bounded scalar minimization and
//! boxed derivative-free minimization.
//!
//! These are the numeric engines behind quantile inversion, the mode finder
//! and every fitter in [`crate::stats`]. All routines are generic over
//! [`FloatScalar`] and never panic on non-finite objective values.
//!
//! # Root finding
//!
//! - [`brent`] — Brent's method (bisection + secant + inverse quadratic interpolation)
//! - [`bisect`] — plain bisection, for objectives too flat or stepped for interpolation
//!
//! # Bounded scalar minimization
//!
//! - [`minimize_bounded`] — Brent's golden-section / parabolic minimizer on `[a, b]`
//!
//! # Boxed minimization
//!
//! - [`nelder_mead`] — Nelder–Mead simplex with per-coordinate bounds

mod bounded;
mod nelder_mead;
mod root;

#[cfg(test)]
mod tests;

pub use bounded::{minimize_bounded, BoundedSettings};
pub use nelder_mead::{nelder_mead, NelderMeadSettings};
pub use root::{bisect, brent, RootSettings};

use thiserror::Error;

use crate::traits::FloatScalar;

/// Errors from optimization algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptimError {
    /// Maximum number of iterations exceeded.
    #[error("maximum iterations exceeded")]
    MaxIterations,
    /// Bracket endpoints do not have opposite signs.
    #[error("bracket endpoints must have opposite signs")]
    BracketInvalid,
    /// Interval bounds are not finite or not ordered `a < b`.
    #[error("interval must satisfy a < b with finite endpoints")]
    InvalidInterval,
    /// A computed value was NaN or infinity.
    #[error("computed value is NaN or infinity")]
    NotFinite,
    /// The initial guess has no coordinates, or bounds do not match it.
    #[error("initial guess is empty or does not match the bounds")]
    EmptyInput,
}

/// Result of a scalar root-finding algorithm.
#[derive(Debug, Clone, Copy)]
pub struct RootResult<T> {
    /// Approximate root.
    pub x: T,
    /// Function value at the root: `f(x)`.
    pub fx: T,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of function evaluations.
    pub evals: usize,
}

/// Result of a bounded scalar minimization.
#[derive(Debug, Clone, Copy)]
pub struct ScalarMinimum<T> {
    /// Approximate minimizer inside the interval.
    pub x: T,
    /// Function value at the minimizer: `f(x)`.
    pub fx: T,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of function evaluations.
    pub evals: usize,
    /// Whether the tolerance was met before the iteration cap.
    pub converged: bool,
}

/// Result of a boxed multivariate minimization.
///
/// The best point found is always returned; `converged` reports whether the
/// simplex collapsed within tolerance before `max_iter`.
#[derive(Debug, Clone)]
pub struct MinimizeResult<T: FloatScalar> {
    /// Approximate minimizer.
    pub x: Vec<T>,
    /// Function value at the minimizer: `f(x)`.
    pub fx: T,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Number of function evaluations.
    pub evals: usize,
    /// Whether the tolerance was met before the iteration cap.
    pub converged: bool,
}
