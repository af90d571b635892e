use criterion::{criterion_group, criterion_main, Criterion};
use distfit::stats::quantile::{invert_continuous, invert_discrete};
use distfit::stats::{
    mle, quartile, AnyDistribution, BetaBinomial, DiscreteWeibull, Distribution, Geometric,
    Gumbel, HalfCauchy, Logistic, ZeroInflatedNegativeBinomial,
};

// ---------------------------------------------------------------------------
// Quantiles: closed form vs generic inversion
// ---------------------------------------------------------------------------

fn ppf_continuous(c: &mut Criterion) {
    let mut g = c.benchmark_group("ppf_gumbel");
    let d = Gumbel::new(0.5, 2.0).unwrap();

    g.bench_function("closed", |b| {
        b.iter(|| d.ppf(std::hint::black_box(0.37)))
    });

    g.bench_function("brent", |b| {
        b.iter(|| invert_continuous(&d, std::hint::black_box(0.37)))
    });

    g.finish();
}

fn ppf_discrete(c: &mut Criterion) {
    let mut g = c.benchmark_group("ppf_discrete");
    let geo = Geometric::new(0.05).unwrap();
    let bb = BetaBinomial::new(2.0, 5.0, 200.0).unwrap();
    let zinb = ZeroInflatedNegativeBinomial::new(0.7, 8.0, 4.0).unwrap();

    g.bench_function("geometric_closed", |b| {
        b.iter(|| geo.ppf(std::hint::black_box(0.9)))
    });

    g.bench_function("geometric_bisect", |b| {
        b.iter(|| invert_discrete(&geo, std::hint::black_box(0.9)))
    });

    g.bench_function("beta_binomial", |b| {
        b.iter(|| bb.ppf(std::hint::black_box(0.9)))
    });

    g.bench_function("zinb", |b| {
        b.iter(|| zinb.ppf(std::hint::black_box(0.9)))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Numeric moments
// ---------------------------------------------------------------------------

fn numeric_moments(c: &mut Criterion) {
    let mut g = c.benchmark_group("numeric_moments");
    let dw = DiscreteWeibull::new(0.9, 1.3).unwrap();
    let logistic = Logistic::new(0.0, 1.0).unwrap();

    g.bench_function("discrete_weibull_var", |b| {
        b.iter(|| std::hint::black_box(&dw).var())
    });

    g.bench_function("logistic_num_entropy", |b| {
        b.iter(|| distfit::stats::moments::num_entropy(std::hint::black_box(&logistic)))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Fitting
// ---------------------------------------------------------------------------

fn fit_mle(c: &mut Criterion) {
    let mut g = c.benchmark_group("fit_mle");
    g.sample_size(20);

    let gumbel_sample = Gumbel::new(2.0, 0.5).unwrap().rvs_seeded(2_000, Some(1));
    g.bench_function("gumbel", |b| {
        b.iter(|| {
            let mut d = Gumbel::unset();
            d.fit_mle(std::hint::black_box(&gumbel_sample)).unwrap();
            d
        })
    });

    let bb_sample = BetaBinomial::new(2.0, 5.0, 10.0).unwrap().rvs_seeded(2_000, Some(2));
    g.bench_function("beta_binomial_profiled", |b| {
        b.iter(|| {
            let mut d = BetaBinomial::unset();
            d.fit_mle(std::hint::black_box(&bb_sample)).unwrap();
            d
        })
    });

    g.bench_function("rank_three", |b| {
        b.iter(|| {
            let mut candidates = [
                AnyDistribution::from(Logistic::unset()),
                AnyDistribution::from(Gumbel::unset()),
                AnyDistribution::from(HalfCauchy::unset()),
            ];
            mle(&mut candidates, std::hint::black_box(&gumbel_sample)).unwrap()
        })
    });

    g.finish();
}

fn fit_targets(c: &mut Criterion) {
    let mut g = c.benchmark_group("fit_targets");

    g.bench_function("moments_discrete_weibull", |b| {
        b.iter(|| {
            let mut d = DiscreteWeibull::unset();
            d.fit_moments(std::hint::black_box(3.0), 2.0).unwrap();
            d
        })
    });

    g.bench_function("quartile_gumbel", |b| {
        b.iter(|| {
            let mut d = Gumbel::unset();
            quartile(&mut d, -1.0, std::hint::black_box(0.0), 1.5).unwrap()
        })
    });

    g.finish();
}

// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    ppf_continuous,
    ppf_discrete,
    numeric_moments,
    fit_mle,
    fit_targets,
);
criterion_main!(benches);
