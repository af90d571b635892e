use super::*;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff {})",
        msg,
        a,
        b,
        (a - b).abs()
    );
}

// ═══════════════════════════════════════════════════════════════════
// Root finding
// ═══════════════════════════════════════════════════════════════════

#[test]
fn brent_sqrt2() {
    let r = brent(|x| x * x - 2.0, 0.0, 2.0, &RootSettings::default()).unwrap();
    assert_near(r.x, core::f64::consts::SQRT_2, 1e-12, "brent √2");
    assert_near(r.fx, 0.0, 1e-11, "brent f(√2)");
}

#[test]
fn brent_cubic() {
    // f(x) = x^3 - x - 2, root near 1.5214
    let r = brent(|x: f64| x * x * x - x - 2.0, 1.0, 2.0, &RootSettings::default()).unwrap();
    assert!(r.fx.abs() < 1e-10, "brent cubic");
}

#[test]
fn brent_invalid_bracket() {
    let r = brent(|x| x * x + 1.0, 0.0, 2.0, &RootSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::BracketInvalid);
}

#[test]
fn brent_root_at_endpoint() {
    let r = brent(|x: f64| x - 1.0, 1.0, 3.0, &RootSettings::default()).unwrap();
    assert_eq!(r.x, 1.0);
    assert_eq!(r.iterations, 0);
}

#[test]
fn brent_nan_endpoint() {
    let r = brent(|x: f64| x.ln(), -1.0, 3.0, &RootSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::NotFinite);
}

#[test]
fn brent_f32() {
    let settings = RootSettings::<f32>::default();
    let r = brent(|x: f32| x * x - 2.0, 0.0f32, 2.0f32, &settings).unwrap();
    assert!((r.x - core::f32::consts::SQRT_2).abs() < 1e-5, "brent f32");
}

#[test]
fn bisect_cube_root() {
    let r = bisect(|x: f64| x.powi(3) - 8.0, 0.0, 5.0, &RootSettings::default()).unwrap();
    assert_near(r.x, 2.0, 1e-10, "bisect ∛8");
}

#[test]
fn bisect_step_function() {
    // Discontinuous: sign flips at 0.3 with no zero crossing
    let step = |x: f64| if x < 0.3 { -1.0 } else { 1.0 };
    let r = bisect(step, 0.0, 1.0, &RootSettings::default()).unwrap();
    assert_near(r.x, 0.3, 1e-10, "bisect step");
}

#[test]
fn bisect_invalid_interval() {
    let r = bisect(|x: f64| x, 1.0, -1.0, &RootSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::InvalidInterval);
}

#[test]
fn bisect_same_sign() {
    let r = bisect(|x: f64| x * x + 1.0, -1.0, 1.0, &RootSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::BracketInvalid);
}

// ═══════════════════════════════════════════════════════════════════
// Bounded scalar minimization
// ═══════════════════════════════════════════════════════════════════

#[test]
fn bounded_parabola() {
    let r = minimize_bounded(|x: f64| (x - 1.5).powi(2) + 3.0, 0.0, 4.0, &BoundedSettings::default())
        .unwrap();
    assert!(r.converged);
    assert_near(r.x, 1.5, 1e-6, "bounded parabola argmin");
    assert_near(r.fx, 3.0, 1e-10, "bounded parabola min");
}

#[test]
fn bounded_minimum_on_edge() {
    // Monotone decreasing: the minimizer sits on the right bound
    let r = minimize_bounded(|x: f64| -x, 0.0, 2.0, &BoundedSettings::default()).unwrap();
    assert!(r.x <= 2.0);
    assert_near(r.x, 2.0, 1e-6, "bounded edge");
}

#[test]
fn bounded_cosine() {
    let r = minimize_bounded(|x: f64| x.cos(), 2.0, 4.0, &BoundedSettings::default()).unwrap();
    assert_near(r.x, core::f64::consts::PI, 1e-6, "bounded cos");
}

#[test]
fn bounded_nan_is_uphill() {
    // NaN left of 1.0 must not attract the search
    let f = |x: f64| if x < 1.0 { f64::NAN } else { (x - 2.0).powi(2) };
    let r = minimize_bounded(f, 0.0, 5.0, &BoundedSettings::default()).unwrap();
    assert_near(r.x, 2.0, 1e-5, "bounded nan");
}

#[test]
fn bounded_invalid_interval() {
    let r = minimize_bounded(|x: f64| x, 1.0, 1.0, &BoundedSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::InvalidInterval);
    let r = minimize_bounded(|x: f64| x, 0.0, f64::INFINITY, &BoundedSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::InvalidInterval);
}

#[test]
fn bounded_iteration_cap() {
    let settings = BoundedSettings {
        x_tol: 1e-12,
        max_iter: 2,
    };
    let r = minimize_bounded(|x: f64| (x - 0.1234).powi(2), -10.0, 10.0, &settings).unwrap();
    assert!(!r.converged);
    assert_eq!(r.iterations, 2);
}

// ═══════════════════════════════════════════════════════════════════
// Nelder–Mead
// ═══════════════════════════════════════════════════════════════════

const FREE: (f64, f64) = (f64::NEG_INFINITY, f64::INFINITY);

#[test]
fn nelder_mead_quadratic() {
    let f = |x: &[f64]| (x[0] - 3.0).powi(2) + 2.0 * (x[1] + 1.0).powi(2) + 0.5;
    let r = nelder_mead(f, &[0.0, 0.0], &[FREE, FREE], &NelderMeadSettings::default()).unwrap();
    assert!(r.converged);
    assert_near(r.x[0], 3.0, 1e-5, "nm x0");
    assert_near(r.x[1], -1.0, 1e-5, "nm x1");
    assert_near(r.fx, 0.5, 1e-9, "nm fx");
}

#[test]
fn nelder_mead_rosenbrock() {
    let rosen = |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
    let settings = NelderMeadSettings {
        max_iter: 5000,
        ..Default::default()
    };
    let r = nelder_mead(rosen, &[-1.2, 1.0], &[FREE, FREE], &settings).unwrap();
    assert_near(r.x[0], 1.0, 1e-3, "rosenbrock x0");
    assert_near(r.x[1], 1.0, 1e-3, "rosenbrock x1");
}

#[test]
fn nelder_mead_respects_box() {
    let mut outside = false;
    let f = |x: &[f64]| {
        if x[0] < 1.0 || x[0] > 2.0 {
            outside = true;
        }
        (x[0] + 5.0).powi(2)
    };
    let r = nelder_mead(f, &[1.5], &[(1.0, 2.0)], &NelderMeadSettings::default()).unwrap();
    assert!(!outside, "objective evaluated outside the box");
    assert_near(r.x[0], 1.0, 1e-8, "nm lower bound");
}

#[test]
fn nelder_mead_start_on_bound() {
    // Start pinned at the upper bound; the first simplex step must go inward
    let f = |x: &[f64]| (x[0] - 0.2).powi(2);
    let r = nelder_mead(f, &[1.0], &[(0.0, 1.0)], &NelderMeadSettings::default()).unwrap();
    assert_near(r.x[0], 0.2, 1e-5, "nm from bound");
}

#[test]
fn nelder_mead_infinite_penalty() {
    // Objective is +inf (or NaN) on part of the domain
    let f = |x: &[f64]| {
        if x[0] <= 0.0 {
            f64::NAN
        } else {
            x[0] - x[0].ln()
        }
    };
    let r = nelder_mead(f, &[3.0], &[FREE], &NelderMeadSettings::default()).unwrap();
    assert_near(r.x[0], 1.0, 1e-4, "nm penalty");
}

#[test]
fn nelder_mead_iteration_cap() {
    let f = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
    let settings = NelderMeadSettings {
        max_iter: 3,
        ..Default::default()
    };
    let r = nelder_mead(f, &[5.0, 5.0, 5.0], &[FREE; 3], &settings).unwrap();
    assert!(!r.converged);
    assert_eq!(r.iterations, 3);
}

#[test]
fn nelder_mead_input_errors() {
    let f = |x: &[f64]| x[0];
    let s = NelderMeadSettings::default();
    assert_eq!(nelder_mead(f, &[], &[], &s).unwrap_err(), OptimError::EmptyInput);
    assert_eq!(nelder_mead(f, &[1.0], &[], &s).unwrap_err(), OptimError::EmptyInput);
    assert_eq!(
        nelder_mead(f, &[1.0], &[(2.0, 1.0)], &s).unwrap_err(),
        OptimError::InvalidInterval
    );
}

#[test]
fn nelder_mead_f32() {
    let f = |x: &[f32]| (x[0] - 1.0) * (x[0] - 1.0) + (x[1] - 2.0) * (x[1] - 2.0);
    let bounds = [(f32::NEG_INFINITY, f32::INFINITY); 2];
    let r = nelder_mead(f, &[0.0f32, 0.0], &bounds, &NelderMeadSettings::default()).unwrap();
    assert!((r.x[0] - 1.0).abs() < 1e-3);
    assert!((r.x[1] - 2.0).abs() < 1e-3);
}
