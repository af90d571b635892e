//! Generic quantile inversion.
//!
//! Families without a closed-form inverse cdf fall back to these routines:
//!
//! - [`invert_continuous`] brackets the target geometrically when the support
//!   is unbounded, then solves `cdf(x) = q` with Brent's method (bisection if
//!   Brent gives up).
//! - [`invert_discrete`] bisects the integer lattice for the smallest `x`
//!   with `cdf(x) ≥ q`.
//!
//! Families with an approximate closed form use [`ppf_bounds_cont`],
//! [`ppf_bounds_disc`] and [`refine_lattice`] to apply the boundary policy
//! and correct the candidate onto the lattice.

use crate::optim::{bisect, brent, RootSettings};

use super::Distribution;

/// Settings for the generic inverters.
#[derive(Debug, Clone, Copy)]
pub struct InverterSettings {
    /// Root-finding tolerances for the continuous inverter.
    pub root: RootSettings<f64>,
    /// Maximum number of bracket doublings toward an infinite bound.
    pub max_expansions: usize,
    /// Maximum number of unit steps taken by [`refine_lattice`].
    pub max_lattice_steps: usize,
}

impl Default for InverterSettings {
    fn default() -> Self {
        Self {
            root: RootSettings {
                x_tol: 1e-12,
                f_tol: 1e-14,
                max_iter: 200,
            },
            max_expansions: 1024,
            max_lattice_steps: 1000,
        }
    }
}

/// Boundary policy for a continuous closed-form quantile `x` at level `q`.
///
/// NaN for `q` outside `[0, 1]`, `lower` at 0, `upper` at 1, otherwise `x`.
pub fn ppf_bounds_cont(x: f64, q: f64, lower: f64, upper: f64) -> f64 {
    if q.is_nan() || !(0.0..=1.0).contains(&q) {
        f64::NAN
    } else if q == 0.0 {
        lower
    } else if q == 1.0 {
        upper
    } else {
        x
    }
}

/// Boundary policy for a discrete closed-form quantile: as
/// [`ppf_bounds_cont`], with interior values rounded up to the lattice and
/// clamped into the support.
pub fn ppf_bounds_disc(x: f64, q: f64, lower: f64, upper: f64) -> f64 {
    if q.is_nan() || !(0.0..=1.0).contains(&q) {
        f64::NAN
    } else if q == 0.0 {
        lower
    } else if q == 1.0 {
        upper
    } else {
        x.ceil().clamp(lower, upper)
    }
}

/// Move a lattice candidate `x` to the smallest integer with `cdf(x) ≥ q`.
///
/// Steps down while `cdf(x − 1) ≥ q` and up while `cdf(x) < q`. Falls back to
/// [`invert_discrete`] if `x` is NaN or the walk exceeds its step budget.
pub fn refine_lattice<D: Distribution + ?Sized>(dist: &D, x: f64, q: f64) -> f64 {
    if !(q > 0.0 && q < 1.0) {
        return x;
    }
    let settings = InverterSettings::default();
    let (lower, upper) = dist.support();
    if x.is_nan() {
        return invert_discrete(dist, q);
    }
    let mut x = x.clamp(lower, upper);
    let mut steps = 0usize;
    while x > lower && dist.cdf(x - 1.0) >= q {
        x -= 1.0;
        steps += 1;
        if steps > settings.max_lattice_steps {
            return invert_discrete(dist, q);
        }
    }
    while x < upper && dist.cdf(x) < q {
        x += 1.0;
        steps += 1;
        if steps > settings.max_lattice_steps {
            return invert_discrete(dist, q);
        }
    }
    x
}

/// Solve `cdf(x) = q` for a continuous distribution.
pub fn invert_continuous<D: Distribution + ?Sized>(dist: &D, q: f64) -> f64 {
    invert_continuous_with(dist, q, &InverterSettings::default())
}

/// [`invert_continuous`] with explicit settings.
pub fn invert_continuous_with<D: Distribution + ?Sized>(
    dist: &D,
    q: f64,
    settings: &InverterSettings,
) -> f64 {
    if !dist.is_frozen() {
        return f64::NAN;
    }
    let (lower, upper) = dist.support();
    let x = ppf_bounds_cont(f64::NAN, q, lower, upper);
    if !(q > 0.0 && q < 1.0) {
        return x;
    }

    let Some((a, b)) = bracket(dist, q, lower, upper, settings) else {
        return f64::NAN;
    };

    let target = |x: f64| dist.cdf(x) - q;
    match brent(target, a, b, &settings.root) {
        Ok(r) => r.x,
        Err(_) => {
            let rel = RootSettings {
                x_tol: f64::EPSILON,
                f_tol: 0.0,
                max_iter: 2 * settings.root.max_iter,
            };
            bisect(target, a, b, &rel).map_or(f64::NAN, |r| r.x)
        }
    }
}

/// Replace infinite bounds by finite points whose cdf straddles `q`.
fn bracket<D: Distribution + ?Sized>(
    dist: &D,
    q: f64,
    lower: f64,
    upper: f64,
    settings: &InverterSettings,
) -> Option<(f64, f64)> {
    let center = if lower.is_finite() {
        lower
    } else if upper.is_finite() {
        upper
    } else {
        0.0
    };

    let mut a = lower;
    if !a.is_finite() {
        let mut width = 1.0;
        a = center - width;
        let mut n = 0;
        while dist.cdf(a) > q {
            n += 1;
            if n > settings.max_expansions {
                return None;
            }
            width *= 2.0;
            a = center - width;
        }
    }

    let mut b = upper;
    if !b.is_finite() {
        let base = a.max(center);
        let mut width = 1.0;
        b = base + width;
        let mut n = 0;
        while dist.cdf(b) < q {
            n += 1;
            if n > settings.max_expansions {
                return None;
            }
            width *= 2.0;
            b = base + width;
        }
    }

    (a < b).then_some((a, b))
}

/// Smallest support integer `x` with `cdf(x) ≥ q`.
pub fn invert_discrete<D: Distribution + ?Sized>(dist: &D, q: f64) -> f64 {
    invert_discrete_with(dist, q, &InverterSettings::default())
}

/// [`invert_discrete`] with explicit settings.
pub fn invert_discrete_with<D: Distribution + ?Sized>(
    dist: &D,
    q: f64,
    settings: &InverterSettings,
) -> f64 {
    if !dist.is_frozen() {
        return f64::NAN;
    }
    let (lower, upper) = dist.support();
    let x = ppf_bounds_disc(f64::NAN, q, lower, upper);
    if !(q > 0.0 && q < 1.0) {
        return x;
    }

    // cdf(lo) < q <= cdf(hi) holds throughout
    let mut lo = lower - 1.0;
    let mut hi = if upper.is_finite() {
        upper
    } else {
        let mut width = 1.0;
        let mut n = 0;
        while dist.cdf(lower + width) < q {
            lo = lower + width;
            n += 1;
            if n > settings.max_expansions {
                return upper;
            }
            width *= 2.0;
        }
        lower + width
    };

    if dist.cdf(hi) < q {
        return upper;
    }

    while hi - lo > 1.0 {
        let mid = (0.5 * (lo + hi)).floor();
        if dist.cdf(mid) >= q {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}
