//! Fitting to elicited quartiles.

use crate::optim::NelderMeadSettings;

use super::fit::{minimize_free, FreeSet};
use super::{Distribution, StatsError};

/// Cumulative probabilities the three quartiles are matched to.
const TARGETS: [f64; 3] = [0.25, 0.5, 0.75];

/// Relative error in the inter-quartile mass above which a fit is reported.
const WARN_THRESHOLD: f64 = 0.01;

/// Outcome of [`quartile`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuartileFit {
    /// `|cdf(q3) − cdf(q1) − 0.5| / 0.5`.
    pub relative_error: f64,
    /// `cdf` at the three quartiles after fitting.
    pub masses: [f64; 3],
}

/// Fit `dist` so that its quartiles are `q1`, `q2` and `q3`.
///
/// Seeds by moment matching `mean = q2`, `sigma = (q3 − q1) / 1.35`, then
/// minimizes `Σ (cdf(qᵢ) − tᵢ)²` for `t = (0.25, 0.5, 0.75)` over the free
/// parameters. A poor match is not an error; it shows up in
/// [`QuartileFit::relative_error`] and is logged as a warning.
///
/// # Errors
///
/// [`StatsError::QuartileOrder`] unless `q1 < q2 < q3`,
/// [`StatsError::OutOfSupport`] if `q1` or `q3` lies outside the support,
/// [`StatsError::AllFixed`] if the distribution is frozen. Start from an
/// unset distribution and use [`Distribution::fix`] for values to hold.
///
/// # Example
///
/// ```
/// use distfit::stats::{quartile, Distribution, Logistic};
///
/// let mut dist = Logistic::unset();
/// let fit = quartile(&mut dist, -1.0, 0.0, 1.0).unwrap();
/// assert!(fit.relative_error < 1e-6);
/// assert!(dist.mean().abs() < 1e-6);
/// ```
pub fn quartile<D: Distribution + ?Sized>(
    dist: &mut D,
    q1: f64,
    q2: f64,
    q3: f64,
) -> Result<QuartileFit, StatsError> {
    if !(q1 < q2 && q2 < q3) {
        return Err(StatsError::QuartileOrder);
    }
    if dist.is_frozen() {
        return Err(StatsError::AllFixed);
    }
    let (lower, upper) = dist.support();
    if q1 < lower || q3 > upper {
        return Err(StatsError::OutOfSupport);
    }
    let mut free = FreeSet::of(dist);
    dist.fit_moments(q2, (q3 - q1) / 1.35)?;

    // An integer parameter keeps its moment-matched value
    if let Some(i) = dist.integer_param() {
        if free.free.len() > 1 && free.free.contains(&i) {
            free.free.retain(|&j| j != i);
            free.fixed[i] = dist.raw_params()[i];
        }
    }

    let start = dist.params().ok_or(StatsError::NotFrozen)?;
    let qs = [q1, q2, q3];
    let result = minimize_free(dist, &free, &start, &NelderMeadSettings::default(), |d| {
        qs.iter()
            .zip(TARGETS)
            .map(|(&q, t)| (d.cdf(q) - t).powi(2))
            .sum()
    })?;

    let masses = qs.map(|q| dist.cdf(q));
    let relative_error = ((masses[2] - masses[0]) - 0.5).abs() / 0.5;
    if relative_error > WARN_THRESHOLD {
        log::warn!(
            "{}: quartile fit misses the inter-quartile mass by {:.1}% (masses {:?})",
            dist.name(),
            100.0 * relative_error,
            masses
        );
    }
    log::debug!(
        "{}: quartile fit -> {:?} (objective {:.3e})",
        dist.name(),
        dist.params(),
        result.fx
    );
    Ok(QuartileFit {
        relative_error,
        masses,
    })
}
