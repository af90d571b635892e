//! Numeric mode finder.
//!
//! Maximizes `logpdf` with Brent's bounded minimizer over a high-mass window
//! `[ppf(w), ppf(1 − w)]` clipped to the support. Discrete families are
//! relaxed to a piecewise-linear log mass first; the continuous optimum is
//! then resolved on the lattice by climbing to the better neighbour.

use crate::optim::{minimize_bounded, BoundedSettings};

use super::{Distribution, Kind, StatsError};

/// Probability mass left out on each side of the search window.
const WINDOW_TAIL: f64 = 1e-4;

/// Mode of `dist`, dispatched on its [`Kind`]. NaN while unfrozen.
///
/// # Errors
///
/// Propagates [`StatsError::Optim`] if the search window is degenerate.
pub fn find_mode<D: Distribution + ?Sized>(dist: &D) -> Result<f64, StatsError> {
    if !dist.is_frozen() {
        return Ok(f64::NAN);
    }
    Ok(match dist.kind() {
        Kind::Continuous => continuous_mode(dist)?,
        Kind::Discrete => discrete_mode(dist)?,
    })
}

fn window<D: Distribution + ?Sized>(dist: &D) -> (f64, f64) {
    let (lower, upper) = dist.support();
    (
        dist.ppf(WINDOW_TAIL).max(lower),
        dist.ppf(1.0 - WINDOW_TAIL).min(upper),
    )
}

fn continuous_mode<D: Distribution + ?Sized>(dist: &D) -> Result<f64, StatsError> {
    let (lo, hi) = window(dist);
    if !(lo < hi) {
        return Ok(lo);
    }
    let r = minimize_bounded(|x| -dist.logpdf(x), lo, hi, &BoundedSettings::default())?;
    if !r.converged {
        log::warn!("{}: mode search stopped after {} iterations", dist.name(), r.iterations);
    }

    // A density peaking at a finite support edge (e.g. x = 0) is never
    // bracketed in the interior.
    let (lower, _) = dist.support();
    if lower.is_finite() && dist.logpdf(lower) >= -r.fx {
        return Ok(lower);
    }
    Ok(r.x)
}

fn discrete_mode<D: Distribution + ?Sized>(dist: &D) -> Result<f64, StatsError> {
    let (lower, upper) = dist.support();
    let (lo, hi) = window(dist);
    let (lo, hi) = (lo.floor().max(lower), hi.ceil().min(upper));
    if !(lo < hi) {
        return Ok(lo);
    }

    // Linear interpolation between neighbouring lattice points
    let relaxed = |x: f64| {
        let k = x.floor();
        let t = x - k;
        let a = dist.logpdf(k);
        if t == 0.0 {
            return -a;
        }
        let b = dist.logpdf(k + 1.0);
        if !a.is_finite() || !b.is_finite() {
            return -a.max(b);
        }
        -((1.0 - t) * a + t * b)
    };
    let r = minimize_bounded(relaxed, lo, hi, &BoundedSettings::default())?;

    let mut best = r.x.round().clamp(lo, hi);
    let mut best_lp = dist.logpdf(best);
    for candidate in [r.x.floor(), r.x.ceil(), lo] {
        let lp = dist.logpdf(candidate);
        if lp > best_lp || (lp == best_lp && candidate < best) {
            best = candidate;
            best_lp = lp;
        }
    }

    // Climb to a local maximum on the lattice
    loop {
        let left = dist.logpdf(best - 1.0);
        let right = dist.logpdf(best + 1.0);
        if best > lower && left >= best_lp && left >= right {
            best -= 1.0;
            best_lp = left;
        } else if best < upper && right > best_lp {
            best += 1.0;
            best_lp = right;
        } else {
            break;
        }
    }
    Ok(best)
}
