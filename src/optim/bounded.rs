use crate::traits::FloatScalar;

use super::{OptimError, ScalarMinimum};

/// Settings for [`minimize_bounded`].
#[derive(Debug, Clone, Copy)]
pub struct BoundedSettings<T> {
    /// Absolute tolerance on the minimizer location.
    pub x_tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
}

impl Default for BoundedSettings<f64> {
    fn default() -> Self {
        Self {
            x_tol: 1e-8,
            max_iter: 500,
        }
    }
}

impl Default for BoundedSettings<f32> {
    fn default() -> Self {
        Self {
            x_tol: 1e-5,
            max_iter: 500,
        }
    }
}

/// Brent's bounded scalar minimizer.
///
/// Golden-section search accelerated by parabolic interpolation, restricted
/// to the closed interval `[a, b]`. The objective is never evaluated outside
/// the interval. Hitting `max_iter` is not an error: the best point is
/// returned with `converged == false`.
///
/// # Errors
///
/// Returns [`OptimError::InvalidInterval`] unless `a < b` and both are finite.
///
/// # Example
///
/// ```
/// use distfit::optim::{minimize_bounded, BoundedSettings};
///
/// let r = minimize_bounded(|x: f64| (x - 1.5).powi(2), 0.0, 4.0, &BoundedSettings::default())
///     .unwrap();
/// assert!((r.x - 1.5).abs() < 1e-6);
/// assert!(r.converged);
/// ```
pub fn minimize_bounded<T: FloatScalar>(
    mut f: impl FnMut(T) -> T,
    a: T,
    b: T,
    settings: &BoundedSettings<T>,
) -> Result<ScalarMinimum<T>, OptimError> {
    if !(a < b) || !a.is_finite() || !b.is_finite() {
        return Err(OptimError::InvalidInterval);
    }

    let zero = T::zero();
    let half = T::lit(0.5);
    let two = T::lit(2.0);
    let three = T::lit(3.0);
    let sqrt_eps = T::epsilon().sqrt();
    let golden_ratio = half * (three - T::lit(5.0).sqrt());

    // NaN compares false everywhere below; treat it as an uphill value
    let mut eval = |x: T| {
        let v = f(x);
        if v.is_nan() {
            T::infinity()
        } else {
            v
        }
    };

    let mut lo = a;
    let mut hi = b;
    let mut x = lo + golden_ratio * (hi - lo);
    let mut w = x;
    let mut v = x;
    let mut fx = eval(x);
    let mut fw = fx;
    let mut fv = fx;
    let mut evals = 1usize;

    let mut d = zero;
    let mut e = zero;

    let mut xm = half * (lo + hi);
    let mut tol1 = sqrt_eps * x.abs() + settings.x_tol / three;
    let mut tol2 = two * tol1;

    let mut iterations = 0usize;
    while (x - xm).abs() > tol2 - half * (hi - lo) {
        if iterations >= settings.max_iter {
            return Ok(ScalarMinimum {
                x,
                fx,
                iterations,
                evals,
                converged: false,
            });
        }
        iterations += 1;

        let mut take_golden = true;
        if e.abs() > tol1 {
            // Trial parabola through x, w, v
            let mut r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = two * (q - r);
            if q > zero {
                p = -p;
            }
            q = q.abs();
            r = e;
            e = d;

            if p.abs() < (half * q * r).abs() && p > q * (lo - x) && p < q * (hi - x) {
                d = p / q;
                let u = x + d;
                take_golden = false;
                if (u - lo) < tol2 || (hi - u) < tol2 {
                    d = if xm >= x { tol1 } else { -tol1 };
                }
            }
        }

        if take_golden {
            e = if x >= xm { lo - x } else { hi - x };
            d = golden_ratio * e;
        }

        let step = if d.abs() >= tol1 {
            d
        } else if d >= zero {
            tol1
        } else {
            -tol1
        };
        let u = x + step;
        let fu = eval(u);
        evals += 1;

        if fu <= fx {
            if u >= x {
                lo = x;
            } else {
                hi = x;
            }
            v = w;
            fv = fw;
            w = x;
            fw = fx;
            x = u;
            fx = fu;
        } else {
            if u < x {
                lo = u;
            } else {
                hi = u;
            }
            if fu <= fw || w == x {
                v = w;
                fv = fw;
                w = u;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }

        xm = half * (lo + hi);
        tol1 = sqrt_eps * x.abs() + settings.x_tol / three;
        tol2 = two * tol1;
    }

    Ok(ScalarMinimum {
        x,
        fx,
        iterations,
        evals,
        converged: true,
    })
}
