//! Numeric moments over a truncated support grid.
//!
//! The grid spans `[ppf(tail), ppf(1 − tail)]` intersected with the support:
//! every integer for discrete families, evenly spaced points for continuous
//! ones. Moments are weighted sums over the grid (trapezoid weights for
//! continuous families), normalized by the total captured mass.
//!
//! Accuracy depends on the truncation and resolution in [`GridSettings`];
//! heavy-tailed families need a smaller `tail` or a wider grid, passed
//! through the `*_with` variants. A discrete lattice cut short by
//! `max_points` is logged as a warning.

use crate::special::xlogx;

use super::{Distribution, Kind};

/// Grid truncation and resolution.
#[derive(Debug, Clone, Copy)]
pub struct GridSettings {
    /// Probability mass left out in each tail.
    pub tail: f64,
    /// Maximum number of grid points.
    pub max_points: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            tail: 1e-10,
            max_points: 20_000,
        }
    }
}

/// Grid points with their quadrature weights (pmf, or pdf × trapezoid width).
#[derive(Debug, Clone, Default)]
pub struct SupportGrid {
    pub x: Vec<f64>,
    pub w: Vec<f64>,
}

impl SupportGrid {
    /// Total captured probability mass.
    pub fn mass(&self) -> f64 {
        self.w.iter().sum()
    }

    /// Σ w·g(x) / Σ w, or NaN on an empty grid.
    pub fn expect(&self, g: impl Fn(f64) -> f64) -> f64 {
        let mass = self.mass();
        if !(mass > 0.0) {
            return f64::NAN;
        }
        self.x.iter().zip(&self.w).map(|(&x, &w)| w * g(x)).sum::<f64>() / mass
    }
}

/// Build the quadrature grid for `dist`.
pub fn support_grid<D: Distribution + ?Sized>(dist: &D, settings: &GridSettings) -> SupportGrid {
    if !dist.is_frozen() || settings.max_points < 2 {
        return SupportGrid::default();
    }
    let (lower, upper) = dist.support();
    let lo = dist.ppf(settings.tail).max(lower);
    let hi = dist.ppf(1.0 - settings.tail).min(upper);
    if !lo.is_finite() || !hi.is_finite() || hi < lo {
        return SupportGrid::default();
    }

    match dist.kind() {
        Kind::Discrete => {
            let lo = lo.floor();
            let span = (hi.ceil() - lo) as usize + 1;
            if span > settings.max_points {
                log::warn!(
                    "{}: support grid truncated to {} of {} lattice points",
                    dist.name(),
                    settings.max_points,
                    span
                );
            }
            let x: Vec<f64> = (0..span.min(settings.max_points))
                .map(|k| lo + k as f64)
                .collect();
            let w = x.iter().map(|&x| dist.pdf(x)).collect();
            SupportGrid { x, w }
        }
        Kind::Continuous => {
            let n = settings.max_points;
            let dx = (hi - lo) / (n - 1) as f64;
            if !(dx > 0.0) {
                return SupportGrid::default();
            }
            let x: Vec<f64> = (0..n).map(|k| lo + k as f64 * dx).collect();
            let w = x
                .iter()
                .enumerate()
                .map(|(k, &x)| {
                    let edge = if k == 0 || k == n - 1 { 0.5 } else { 1.0 };
                    let p = dist.pdf(x);
                    if p.is_finite() {
                        edge * p * dx
                    } else {
                        0.0
                    }
                })
                .collect();
            SupportGrid { x, w }
        }
    }
}

pub fn num_mean<D: Distribution + ?Sized>(dist: &D) -> f64 {
    num_mean_with(dist, &GridSettings::default())
}

pub fn num_mean_with<D: Distribution + ?Sized>(dist: &D, settings: &GridSettings) -> f64 {
    support_grid(dist, settings).expect(|x| x)
}

pub fn num_var<D: Distribution + ?Sized>(dist: &D) -> f64 {
    num_var_with(dist, &GridSettings::default())
}

pub fn num_var_with<D: Distribution + ?Sized>(dist: &D, settings: &GridSettings) -> f64 {
    let grid = support_grid(dist, settings);
    let m = grid.expect(|x| x);
    grid.expect(|x| (x - m).powi(2))
}

/// Σ pdf·((x − mean)/std)³ using the family's own mean and std.
pub fn num_skewness<D: Distribution + ?Sized>(dist: &D) -> f64 {
    num_skewness_with(dist, &GridSettings::default())
}

pub fn num_skewness_with<D: Distribution + ?Sized>(dist: &D, settings: &GridSettings) -> f64 {
    standardized_moment(dist, 3, settings)
}

/// Σ pdf·((x − mean)/std)⁴ − 3 using the family's own mean and std.
pub fn num_kurtosis<D: Distribution + ?Sized>(dist: &D) -> f64 {
    num_kurtosis_with(dist, &GridSettings::default())
}

pub fn num_kurtosis_with<D: Distribution + ?Sized>(dist: &D, settings: &GridSettings) -> f64 {
    standardized_moment(dist, 4, settings) - 3.0
}

fn standardized_moment<D: Distribution + ?Sized>(
    dist: &D,
    k: i32,
    settings: &GridSettings,
) -> f64 {
    let (mean, std) = (dist.mean(), dist.std());
    if !mean.is_finite() || !(std > 0.0) || !std.is_finite() {
        return f64::NAN;
    }
    support_grid(dist, settings).expect(|x| ((x - mean) / std).powi(k))
}

/// Shannon entropy (discrete) or differential entropy (continuous), in nats.
pub fn num_entropy<D: Distribution + ?Sized>(dist: &D) -> f64 {
    num_entropy_with(dist, &GridSettings::default())
}

pub fn num_entropy_with<D: Distribution + ?Sized>(dist: &D, settings: &GridSettings) -> f64 {
    let grid = support_grid(dist, settings);
    if grid.x.is_empty() {
        return f64::NAN;
    }
    match dist.kind() {
        Kind::Discrete => -grid.w.iter().map(|&p| xlogx(p)).sum::<f64>(),
        Kind::Continuous => {
            // w = pdf·dx·edge, so −Σ w·ln pdf is the trapezoid rule for −∫ p ln p
            -grid
                .x
                .iter()
                .zip(&grid.w)
                .filter(|(_, &w)| w > 0.0)
                .map(|(&x, &w)| w * dist.logpdf(x))
                .sum::<f64>()
        }
    }
}
