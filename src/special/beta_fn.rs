//! Beta function and log-beta via lgamma.

use super::gamma_fn::lgamma;
use crate::FloatScalar;

/// Beta function B(a, b) = Γ(a)·Γ(b) / Γ(a+b), computed as `exp(lbeta(a, b))`.
///
/// # Example
///
/// ```
/// use distfit::special::beta;
///
/// assert!((beta(2.0_f64, 3.0) - 1.0 / 12.0).abs() < 1e-14);
/// ```
pub fn beta<T: FloatScalar>(a: T, b: T) -> T {
    lbeta(a, b).exp()
}

/// Natural logarithm of the beta function, ln B(a, b).
///
/// # Example
///
/// ```
/// use distfit::special::lbeta;
///
/// assert!(lbeta(1.0_f64, 1.0).abs() < 1e-14);
/// ```
pub fn lbeta<T: FloatScalar>(a: T, b: T) -> T {
    lgamma(a) + lgamma(b) - lgamma(a + b)
}
