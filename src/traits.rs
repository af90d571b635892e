use core::fmt::Debug;
use num_traits::Float;

/// Trait for real floating-point elements used by the special-function and
/// optimization kernels.
///
/// Implemented for `f32` and `f64`. Distributions themselves work in `f64`.
pub trait FloatScalar: Float + Debug {
    /// Convert an `f64` constant into `Self` (rounding for `f32`).
    fn lit(v: f64) -> Self;

    /// Convert a count or index into `Self`.
    #[inline]
    fn from_usize(n: usize) -> Self {
        Self::lit(n as f64)
    }
}

impl FloatScalar for f64 {
    #[inline]
    fn lit(v: f64) -> f64 {
        v
    }
}

impl FloatScalar for f32 {
    #[inline]
    fn lit(v: f64) -> f32 {
        v as f32
    }
}
