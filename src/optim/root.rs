use crate::traits::FloatScalar;

use super::{OptimError, RootResult};

/// Settings for scalar root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct RootSettings<T> {
    /// Convergence tolerance on the bracket width `|b - a|`.
    pub x_tol: T,
    /// Convergence tolerance on the function value `|f(x)|`.
    pub f_tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
}

impl Default for RootSettings<f64> {
    fn default() -> Self {
        Self {
            x_tol: 1e-12,
            f_tol: 1e-12,
            max_iter: 100,
        }
    }
}

impl Default for RootSettings<f32> {
    fn default() -> Self {
        Self {
            x_tol: 1e-6,
            f_tol: 1e-6,
            max_iter: 100,
        }
    }
}

/// Brent's method for bracketed root finding.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// superlinear convergence while guaranteeing the bracket shrinks every step.
///
/// # Arguments
///
/// * `f` — function whose root is sought
/// * `a`, `b` — bracket endpoints; must satisfy `f(a) * f(b) < 0`
/// * `settings` — convergence tolerances and iteration limit
///
/// # Errors
///
/// Returns [`OptimError::BracketInvalid`] if `f(a)` and `f(b)` have the same sign,
/// [`OptimError::NotFinite`] if either endpoint evaluates to NaN, and
/// [`OptimError::MaxIterations`] if convergence is not achieved.
///
/// # Example
///
/// ```
/// use distfit::optim::{brent, RootSettings};
///
/// // Find √2 as root of x² - 2
/// let r = brent(|x| x * x - 2.0, 0.0, 2.0, &RootSettings::default()).unwrap();
/// assert!((r.x - core::f64::consts::SQRT_2).abs() < 1e-12);
/// ```
pub fn brent<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    a: T,
    b: T,
    settings: &RootSettings<T>,
) -> Result<RootResult<T>, OptimError> {
    let mut a = a;
    let mut b = b;
    let mut fa = f(a);
    let mut fb = f(b);
    let mut evals = 2usize;

    if fa.is_nan() || fb.is_nan() {
        return Err(OptimError::NotFinite);
    }
    if fa == T::zero() {
        return Ok(RootResult { x: a, fx: fa, iterations: 0, evals });
    }
    if fb == T::zero() {
        return Ok(RootResult { x: b, fx: fb, iterations: 0, evals });
    }
    if (fa > T::zero()) == (fb > T::zero()) {
        return Err(OptimError::BracketInvalid);
    }

    // Ensure |f(a)| >= |f(b)| so b is the best approximation
    if fa.abs() < fb.abs() {
        core::mem::swap(&mut a, &mut b);
        core::mem::swap(&mut fa, &mut fb);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut mflag = true;

    for iter in 0..settings.max_iter {
        // Convergence checks
        if fb.abs() < settings.f_tol || (b - a).abs() < settings.x_tol {
            return Ok(RootResult {
                x: b,
                fx: fb,
                iterations: iter,
                evals,
            });
        }

        let mut s;

        if fa != fc && fb != fc {
            // Inverse quadratic interpolation
            s = a * fb * fc / ((fa - fb) * (fa - fc))
                + b * fa * fc / ((fb - fa) * (fb - fc))
                + c * fa * fb / ((fc - fa) * (fc - fb));
        } else {
            // Secant method
            s = b - fb * (b - a) / (fb - fa);
        }

        // Conditions for rejecting interpolation and using bisection instead
        let three_quarter = (T::lit(3.0) * a + b) / T::lit(4.0);
        let cond1 = if three_quarter < b {
            s < three_quarter || s > b
        } else {
            s > three_quarter || s < b
        };
        let cond2 = mflag && (s - b).abs() >= (b - c).abs() / T::lit(2.0);
        let cond3 = !mflag && (s - b).abs() >= (c - d).abs() / T::lit(2.0);
        let cond4 = mflag && (b - c).abs() < settings.x_tol;
        let cond5 = !mflag && (c - d).abs() < settings.x_tol;

        if cond1 || cond2 || cond3 || cond4 || cond5 {
            // Bisection
            s = (a + b) / T::lit(2.0);
            mflag = true;
        } else {
            mflag = false;
        }

        let fs = f(s);
        evals += 1;
        if fs.is_nan() {
            return Err(OptimError::NotFinite);
        }

        d = c;
        c = b;
        fc = fb;

        if (fa > T::zero()) != (fs > T::zero()) {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }

        // Keep |f(a)| >= |f(b)|
        if fa.abs() < fb.abs() {
            core::mem::swap(&mut a, &mut b);
            core::mem::swap(&mut fa, &mut fb);
        }
    }

    Err(OptimError::MaxIterations)
}

/// Bisection on a sign-changing bracket.
///
/// Slower than [`brent`] but immune to flat or stepped functions, where
/// interpolation steps are useless. Stops when the bracket is narrower than
/// `x_tol` (relative to the endpoint magnitude) or `|f| < f_tol`.
///
/// # Errors
///
/// Returns [`OptimError::InvalidInterval`] unless `a < b`,
/// [`OptimError::BracketInvalid`] if `f(a)` and `f(b)` have the same sign and
/// [`OptimError::MaxIterations`] if the bracket never shrinks below tolerance.
///
/// # Example
///
/// ```
/// use distfit::optim::{bisect, RootSettings};
///
/// let r = bisect(|x: f64| x.powi(3) - 8.0, 0.0, 5.0, &RootSettings::default()).unwrap();
/// assert!((r.x - 2.0).abs() < 1e-10);
/// ```
pub fn bisect<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    a: T,
    b: T,
    settings: &RootSettings<T>,
) -> Result<RootResult<T>, OptimError> {
    if !(a < b) {
        return Err(OptimError::InvalidInterval);
    }
    let mut lo = a;
    let mut hi = b;
    let flo = f(lo);
    let fhi = f(hi);
    let mut evals = 2usize;

    if flo.is_nan() || fhi.is_nan() {
        return Err(OptimError::NotFinite);
    }
    if flo == T::zero() {
        return Ok(RootResult { x: lo, fx: flo, iterations: 0, evals });
    }
    if fhi == T::zero() {
        return Ok(RootResult { x: hi, fx: fhi, iterations: 0, evals });
    }
    let lo_positive = flo > T::zero();
    if lo_positive == (fhi > T::zero()) {
        return Err(OptimError::BracketInvalid);
    }

    let half = T::lit(0.5);
    for iter in 0..settings.max_iter {
        let mid = lo + (hi - lo) * half;
        let fmid = f(mid);
        evals += 1;

        let width = hi - lo;
        let scale = T::one().max(mid.abs());
        if fmid.abs() < settings.f_tol || width < settings.x_tol * scale {
            return Ok(RootResult {
                x: mid,
                fx: fmid,
                iterations: iter + 1,
                evals,
            });
        }

        if (fmid > T::zero()) == lo_positive {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Err(OptimError::MaxIterations)
}
