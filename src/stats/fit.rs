//! Moment matching, maximum likelihood and model ranking.
//!
//! Every fitter honours parameters fixed on an unfrozen distribution (see
//! [`Distribution::fix`]) and optimizes only the remaining ones with the
//! boxed Nelder–Mead in [`crate::optim`], using `params_support` as the box.
//! Objective values that are NaN or infinite are treated as `+inf`, so trial
//! points in infeasible regions are rejected by value.
//!
//! Optimizer non-convergence is not an error: the best point found is kept,
//! and a warning is logged.

use crate::optim::{nelder_mead, MinimizeResult, NelderMeadSettings};

use super::{set_raw, AnyDistribution, Distribution, StatsError};

/// Population mean and standard deviation, or `None` for an empty sample.
pub fn sample_mean_std(sample: &[f64]) -> Option<(f64, f64)> {
    if sample.is_empty() {
        return None;
    }
    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let var = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    Some((mean, var.sqrt()))
}

/// Distinct values of `sample` with their multiplicities, in ascending order.
pub fn tally(sample: &[f64]) -> Vec<(f64, f64)> {
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut out: Vec<(f64, f64)> = Vec::new();
    for x in sorted {
        match out.last_mut() {
            Some((v, count)) if *v == x => *count += 1.0,
            _ => out.push((x, 1.0)),
        }
    }
    out
}

/// −Σ count·logpdf(value) over a tallied sample.
pub fn weighted_neg_logpdf<D: Distribution + ?Sized>(dist: &D, tallied: &[(f64, f64)]) -> f64 {
    -tallied
        .iter()
        .map(|&(x, count)| count * dist.logpdf(x))
        .sum::<f64>()
}

/// Snapshot of which parameters a fit may move, and the values of the rest.
#[derive(Debug, Clone)]
pub(crate) struct FreeSet {
    pub free: Vec<usize>,
    pub fixed: Vec<Option<f64>>,
}

impl FreeSet {
    pub fn of<D: Distribution + ?Sized>(dist: &D) -> Self {
        let free = dist.free_params();
        let fixed = dist
            .raw_params()
            .iter()
            .enumerate()
            .map(|(i, p)| if free.contains(&i) { None } else { *p })
            .collect();
        Self { free, fixed }
    }

    /// Overlay the fixed values onto a full parameter vector.
    pub fn apply(&self, params: &mut [f64]) {
        for (p, f) in params.iter_mut().zip(&self.fixed) {
            if let Some(v) = f {
                *p = *v;
            }
        }
    }

    /// True when `params` agrees with every fixed value.
    pub fn respects(&self, params: &[f64]) -> bool {
        params
            .iter()
            .zip(&self.fixed)
            .all(|(p, f)| f.map_or(true, |v| *p == v))
    }
}

/// Minimize `objective` over the free parameters, starting from `start`.
///
/// The distribution holds the best point on return (clamped and frozen via
/// [`Distribution::update`]).
pub(crate) fn minimize_free<D: Distribution + ?Sized>(
    dist: &mut D,
    free: &FreeSet,
    start: &[f64],
    settings: &NelderMeadSettings<f64>,
    mut objective: impl FnMut(&D) -> f64,
) -> Result<MinimizeResult<f64>, StatsError> {
    if free.free.is_empty() {
        return Err(StatsError::AllFixed);
    }
    let support = dist.params_support();
    let bounds: Vec<(f64, f64)> = free.free.iter().map(|&i| support[i]).collect();
    let x0: Vec<f64> = free
        .free
        .iter()
        .zip(&bounds)
        .map(|(&i, &(lo, hi))| start[i].clamp(lo, hi))
        .collect();

    let mut params = start.to_vec();
    free.apply(&mut params);

    let result = nelder_mead(
        |x: &[f64]| {
            for (&i, &v) in free.free.iter().zip(x) {
                params[i] = v;
            }
            set_raw(&mut *dist, &params);
            let value = objective(&*dist);
            if value.is_finite() {
                value
            } else {
                f64::INFINITY
            }
        },
        &x0,
        &bounds,
        settings,
    )?;

    for (&i, &v) in free.free.iter().zip(&result.x) {
        params[i] = v;
    }
    dist.update(&params)?;

    if !result.converged {
        log::warn!(
            "{}: optimizer stopped at the iteration cap ({}) with objective {}",
            dist.name(),
            result.iterations,
            result.fx
        );
    }
    Ok(result)
}

pub(crate) fn check_target(mean: f64, sigma: f64) -> Result<(), StatsError> {
    if mean.is_finite() && sigma.is_finite() && sigma > 0.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidTarget)
    }
}

/// Fit `dist` to a target mean and standard deviation.
///
/// Uses the family's closed form when one exists and agrees with the fixed
/// parameters; otherwise minimizes `(mean − m)² + (std − σ)²` numerically.
///
/// # Errors
///
/// [`StatsError::InvalidTarget`] unless `mean` is finite and `sigma` is
/// finite and positive; [`StatsError::AllFixed`] if nothing is free.
pub fn fit_moments<D: Distribution + ?Sized>(
    dist: &mut D,
    mean: f64,
    sigma: f64,
) -> Result<(), StatsError> {
    fit_moments_with(dist, mean, sigma, &NelderMeadSettings::default())
}

/// [`fit_moments`] with explicit optimizer settings.
pub fn fit_moments_with<D: Distribution + ?Sized>(
    dist: &mut D,
    mean: f64,
    sigma: f64,
    settings: &NelderMeadSettings<f64>,
) -> Result<(), StatsError> {
    check_target(mean, sigma)?;
    let free = FreeSet::of(dist);
    if free.free.is_empty() {
        return Err(StatsError::AllFixed);
    }

    let closed = dist.moment_params(mean, sigma);
    if let Some(params) = &closed {
        if free.respects(params) && params.iter().all(|p| p.is_finite()) {
            dist.update(params)?;
            log::debug!("{}: moment match (closed form) -> {:?}", dist.name(), dist.params());
            return Ok(());
        }
    }

    let mut start = closed.unwrap_or_else(|| dist.moment_seed(mean, sigma));
    free.apply(&mut start);
    let result = minimize_free(dist, &free, &start, settings, |d| {
        (d.mean() - mean).powi(2) + (d.std() - sigma).powi(2)
    })?;
    log::debug!(
        "{}: moment match -> {:?} (residual {:.3e}, converged {})",
        dist.name(),
        dist.params(),
        result.fx,
        result.converged
    );
    Ok(())
}

/// Maximum-likelihood fit of `dist` to `sample`.
///
/// Seeds with [`Distribution::mle_seed`], then minimizes the negative
/// log-likelihood over the free parameters. Off-support observations make
/// the objective infinite rather than failing.
///
/// # Errors
///
/// [`StatsError::EmptySample`] for an empty sample, [`StatsError::AllFixed`]
/// if nothing is free.
pub fn fit_mle<D: Distribution + ?Sized>(dist: &mut D, sample: &[f64]) -> Result<(), StatsError> {
    fit_mle_with(dist, sample, &NelderMeadSettings::default())
}

/// [`fit_mle`] with explicit optimizer settings.
pub fn fit_mle_with<D: Distribution + ?Sized>(
    dist: &mut D,
    sample: &[f64],
    settings: &NelderMeadSettings<f64>,
) -> Result<(), StatsError> {
    if sample.is_empty() {
        return Err(StatsError::EmptySample);
    }
    let free = FreeSet::of(dist);
    if free.free.is_empty() {
        return Err(StatsError::AllFixed);
    }
    let tallied = tally(sample);
    let nll = optimize_ml(dist, &free, sample, &tallied, settings)?;
    log::debug!("{}: MLE -> {:?} (nll {:.6})", dist.name(), dist.params(), nll);
    Ok(())
}

/// Seed, restore fixed values, and minimize the likelihood. Returns the
/// final negative log-likelihood.
pub(crate) fn optimize_ml<D: Distribution + ?Sized>(
    dist: &mut D,
    free: &FreeSet,
    sample: &[f64],
    tallied: &[(f64, f64)],
    settings: &NelderMeadSettings<f64>,
) -> Result<f64, StatsError> {
    if dist.mle_seed(sample).is_err() {
        // Seeding is best effort; fall back to the generic starting point
        let (mean, std) = sample_mean_std(sample).ok_or(StatsError::EmptySample)?;
        let mut seed = dist.moment_seed(mean, std);
        free.apply(&mut seed);
        dist.update(&seed)?;
    }

    let mut start = dist.params().ok_or(StatsError::NotFrozen)?;
    free.apply(&mut start);
    let result = minimize_free(dist, free, &start, settings, |d| {
        weighted_neg_logpdf(d, tallied)
    })?;
    Ok(result.fx)
}

/// MLE with one integer parameter profiled over `candidates`.
///
/// For each candidate the integer parameter is held fixed and the remaining
/// free parameters are fitted by [`fit_mle`]; the candidate with the lowest
/// negative log-likelihood wins.
pub fn fit_mle_profiled<D: Distribution + ?Sized>(
    dist: &mut D,
    sample: &[f64],
    index: usize,
    candidates: impl IntoIterator<Item = f64>,
) -> Result<(), StatsError> {
    fit_mle_profiled_with(dist, sample, index, candidates, &NelderMeadSettings::default())
}

/// [`fit_mle_profiled`] with explicit optimizer settings.
pub fn fit_mle_profiled_with<D: Distribution + ?Sized>(
    dist: &mut D,
    sample: &[f64],
    index: usize,
    candidates: impl IntoIterator<Item = f64>,
    settings: &NelderMeadSettings<f64>,
) -> Result<(), StatsError> {
    if sample.is_empty() {
        return Err(StatsError::EmptySample);
    }
    let tallied = tally(sample);
    let base = FreeSet::of(dist);
    let mut free = base.clone();
    free.free.retain(|&i| i != index);

    let mut best: Option<(f64, Vec<f64>)> = None;
    for candidate in candidates {
        free.fixed[index] = Some(candidate);
        reset_to(dist, &base, index, candidate);

        let nll = if free.free.is_empty() {
            let params = dist.params().ok_or(StatsError::NotFrozen)?;
            dist.update(&params)?;
            weighted_neg_logpdf(dist, &tallied)
        } else {
            optimize_ml(dist, &free, sample, &tallied, settings)?
        };
        log::trace!("{}: profile candidate {} -> nll {:.6}", dist.name(), candidate, nll);

        if best.as_ref().map_or(true, |(b, _)| nll < *b) {
            if let Some(params) = dist.params() {
                best = Some((nll, params));
            }
        }
    }

    let (nll, params) = best.ok_or(StatsError::EmptySample)?;
    dist.update(&params)?;
    log::debug!("{}: profiled MLE -> {:?} (nll {:.6})", dist.name(), params, nll);
    Ok(())
}

/// Moment matching with one integer parameter profiled over `candidates`.
///
/// For each candidate the integer parameter is held fixed and the remaining
/// free parameters are matched by [`fit_moments_with`]; the candidate with
/// the smallest residual `(mean − m)² + (std − σ)²` wins. An unreachable
/// target still yields the closest candidate.
///
/// # Errors
///
/// [`StatsError::InvalidTarget`] as for [`fit_moments`];
/// [`StatsError::EmptySample`] if `candidates` is empty.
pub fn fit_moments_profiled_with<D: Distribution + ?Sized>(
    dist: &mut D,
    mean: f64,
    sigma: f64,
    index: usize,
    candidates: impl IntoIterator<Item = f64>,
    settings: &NelderMeadSettings<f64>,
) -> Result<(), StatsError> {
    check_target(mean, sigma)?;
    let base = FreeSet::of(dist);
    let others_free = base.free.iter().any(|&i| i != index);

    let mut best: Option<(f64, Vec<f64>)> = None;
    for candidate in candidates {
        reset_to(dist, &base, index, candidate);
        if others_free {
            fit_moments_with(dist, mean, sigma, settings)?;
        } else {
            let params = dist.params().ok_or(StatsError::NotFrozen)?;
            dist.update(&params)?;
        }
        let residual = (dist.mean() - mean).powi(2) + (dist.std() - sigma).powi(2);
        log::trace!(
            "{}: profile candidate {} -> residual {:.3e}",
            dist.name(),
            candidate,
            residual
        );

        if best.as_ref().map_or(true, |(b, _)| residual < *b || b.is_nan()) {
            if let Some(params) = dist.params() {
                best = Some((residual, params));
            }
        }
    }

    let (residual, params) = best.ok_or(StatsError::EmptySample)?;
    dist.update(&params)?;
    log::debug!(
        "{}: profiled moment match -> {:?} (residual {:.3e})",
        dist.name(),
        params,
        residual
    );
    Ok(())
}

/// Restore the caller's fixed values and pin `index` to `candidate`.
fn reset_to<D: Distribution + ?Sized>(
    dist: &mut D,
    base: &FreeSet,
    index: usize,
    candidate: f64,
) {
    for (slot, v) in dist.raw_params_mut().iter_mut().zip(&base.fixed) {
        *slot = *v;
    }
    dist.raw_params_mut()[index] = Some(candidate);
}

/// Fit every candidate by MLE and rank them by
/// `neg_logpdf + k/2 · ln(n)` (k parameters, n observations), best first.
///
/// A candidate that cannot be fitted ranks last.
///
/// # Example
///
/// ```
/// use distfit::stats::{mle, AnyDistribution, Distribution, Gumbel, HalfCauchy, Logistic};
///
/// let sample = Gumbel::new(3.0, 1.0).unwrap().rvs_seeded(2_000, Some(7));
/// let mut candidates = [
///     AnyDistribution::from(Logistic::unset()),
///     AnyDistribution::from(Gumbel::unset()),
///     AnyDistribution::from(HalfCauchy::unset()),
/// ];
/// let ranking = mle(&mut candidates, &sample).unwrap();
/// assert_eq!(candidates[ranking[0]].name(), "Gumbel");
/// ```
///
/// # Errors
///
/// [`StatsError::EmptySample`] for an empty sample.
pub fn mle(dists: &mut [AnyDistribution], sample: &[f64]) -> Result<Vec<usize>, StatsError> {
    if sample.is_empty() {
        return Err(StatsError::EmptySample);
    }
    let ln_n = (sample.len() as f64).ln();
    let scores: Vec<f64> = dists
        .iter_mut()
        .map(|dist| match dist.fit_mle(sample) {
            Ok(()) => {
                let k = dist.param_names().len() as f64;
                let score = dist.neg_logpdf(sample) + 0.5 * k * ln_n;
                log::debug!("{}: ranking score {:.6}", dist.name(), score);
                if score.is_nan() {
                    f64::INFINITY
                } else {
                    score
                }
            }
            Err(e) => {
                log::warn!("{}: MLE failed ({e}), ranked last", dist.name());
                f64::INFINITY
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..dists.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
    Ok(order)
}
