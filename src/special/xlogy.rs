//! Products with a logarithm that are taken as zero when the leading factor
//! vanishes, so entropy and likelihood terms stay finite at support edges.

use crate::FloatScalar;

/// x·ln(x), with 0·ln 0 = 0. NaN for negative x.
///
/// # Example
///
/// ```
/// use distfit::special::xlogx;
///
/// assert_eq!(xlogx(0.0_f64), 0.0);
/// assert!((xlogx(2.0_f64) - 2.0 * 2.0_f64.ln()).abs() < 1e-15);
/// ```
pub fn xlogx<T: FloatScalar>(x: T) -> T {
    if x == T::zero() {
        T::zero()
    } else {
        x * x.ln()
    }
}

/// x·ln(y), with the product taken as 0 when x = 0 and y is not NaN.
///
/// # Example
///
/// ```
/// use distfit::special::xlogy;
///
/// assert_eq!(xlogy(0.0_f64, 0.0), 0.0);
/// assert!(xlogy(1.0_f64, 0.0).is_infinite());
/// ```
pub fn xlogy<T: FloatScalar>(x: T, y: T) -> T {
    if x == T::zero() && !y.is_nan() {
        T::zero()
    } else {
        x * y.ln()
    }
}

/// x·ln(1+y), with the product taken as 0 when x = 0 and y is not NaN.
///
/// # Example
///
/// ```
/// use distfit::special::xlog1py;
///
/// assert_eq!(xlog1py(0.0_f64, -1.0), 0.0);
/// assert!((xlog1py(3.0_f64, 1e-20) - 3e-20).abs() < 1e-30);
/// ```
pub fn xlog1py<T: FloatScalar>(x: T, y: T) -> T {
    if x == T::zero() && !y.is_nan() {
        T::zero()
    } else {
        x * y.ln_1p()
    }
}
