use rand::Rng;

use super::{
    BetaBinomial, DiscreteWeibull, Distribution, Geometric, Gumbel, HalfCauchy, Kind, Logistic,
    StatsError, ZeroInflatedNegativeBinomial,
};

/// Any family in the crate, behind the uniform [`Distribution`] interface.
///
/// Used wherever a heterogeneous set of candidates is handled together, as in
/// [`crate::stats::mle`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnyDistribution {
    BetaBinomial(BetaBinomial),
    Geometric(Geometric),
    DiscreteWeibull(DiscreteWeibull),
    ZeroInflatedNegativeBinomial(ZeroInflatedNegativeBinomial),
    Gumbel(Gumbel),
    HalfCauchy(HalfCauchy),
    Logistic(Logistic),
}

macro_rules! dispatch {
    ($self:expr, $d:ident => $body:expr) => {
        match $self {
            AnyDistribution::BetaBinomial($d) => $body,
            AnyDistribution::Geometric($d) => $body,
            AnyDistribution::DiscreteWeibull($d) => $body,
            AnyDistribution::ZeroInflatedNegativeBinomial($d) => $body,
            AnyDistribution::Gumbel($d) => $body,
            AnyDistribution::HalfCauchy($d) => $body,
            AnyDistribution::Logistic($d) => $body,
        }
    };
}

macro_rules! impl_from {
    ($($family:ident),*) => {
        $(
            impl From<$family> for AnyDistribution {
                fn from(d: $family) -> Self {
                    AnyDistribution::$family(d)
                }
            }
        )*
    };
}

impl_from!(
    BetaBinomial,
    Geometric,
    DiscreteWeibull,
    ZeroInflatedNegativeBinomial,
    Gumbel,
    HalfCauchy,
    Logistic
);

impl Distribution for AnyDistribution {
    fn name(&self) -> &'static str {
        dispatch!(self, d => d.name())
    }

    fn kind(&self) -> Kind {
        dispatch!(self, d => d.kind())
    }

    fn param_names(&self) -> &'static [&'static str] {
        dispatch!(self, d => d.param_names())
    }

    fn params_support(&self) -> &'static [(f64, f64)] {
        dispatch!(self, d => d.params_support())
    }

    fn raw_params(&self) -> &[Option<f64>] {
        dispatch!(self, d => d.raw_params())
    }

    fn raw_params_mut(&mut self) -> &mut [Option<f64>] {
        dispatch!(self, d => d.raw_params_mut())
    }

    fn support(&self) -> (f64, f64) {
        dispatch!(self, d => d.support())
    }

    fn logpdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.logpdf(x))
    }

    fn cdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.cdf(x))
    }

    fn mean(&self) -> f64 {
        dispatch!(self, d => d.mean())
    }

    fn var(&self) -> f64 {
        dispatch!(self, d => d.var())
    }

    fn integer_param(&self) -> Option<usize> {
        dispatch!(self, d => d.integer_param())
    }

    fn sf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.sf(x))
    }

    fn ppf(&self, q: f64) -> f64 {
        dispatch!(self, d => d.ppf(q))
    }

    fn median(&self) -> f64 {
        dispatch!(self, d => d.median())
    }

    fn mode(&self) -> Result<f64, StatsError> {
        dispatch!(self, d => d.mode())
    }

    fn skewness(&self) -> f64 {
        dispatch!(self, d => d.skewness())
    }

    fn kurtosis(&self) -> f64 {
        dispatch!(self, d => d.kurtosis())
    }

    fn entropy(&self) -> f64 {
        dispatch!(self, d => d.entropy())
    }

    fn rvs<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<f64> {
        dispatch!(self, d => d.rvs(size, rng))
    }

    fn moment_params(&self, mean: f64, sigma: f64) -> Option<Vec<f64>> {
        dispatch!(self, d => d.moment_params(mean, sigma))
    }

    fn moment_seed(&self, mean: f64, sigma: f64) -> Vec<f64> {
        dispatch!(self, d => d.moment_seed(mean, sigma))
    }

    fn mle_seed(&mut self, sample: &[f64]) -> Result<(), StatsError> {
        dispatch!(self, d => d.mle_seed(sample))
    }

    fn fit_moments(&mut self, mean: f64, sigma: f64) -> Result<(), StatsError> {
        dispatch!(self, d => d.fit_moments(mean, sigma))
    }

    fn fit_mle(&mut self, sample: &[f64]) -> Result<(), StatsError> {
        dispatch!(self, d => d.fit_mle(sample))
    }
}
