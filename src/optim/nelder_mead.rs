use core::cmp::Ordering;

use crate::traits::FloatScalar;

use super::{MinimizeResult, OptimError};

/// Settings for [`nelder_mead`].
#[derive(Debug, Clone, Copy)]
pub struct NelderMeadSettings<T> {
    /// Relative tolerance on the simplex diameter, per coordinate.
    pub x_tol: T,
    /// Relative tolerance on the spread of objective values across the simplex.
    pub f_tol: T,
    /// Maximum number of iterations.
    pub max_iter: usize,
}

impl Default for NelderMeadSettings<f64> {
    fn default() -> Self {
        Self {
            x_tol: 1e-8,
            f_tol: 1e-10,
            max_iter: 2000,
        }
    }
}

impl Default for NelderMeadSettings<f32> {
    fn default() -> Self {
        Self {
            x_tol: 1e-5,
            f_tol: 1e-6,
            max_iter: 2000,
        }
    }
}

// Standard coefficients: reflection, expansion, contraction, shrink.
const RHO: f64 = 1.0;
const CHI: f64 = 2.0;
const PSI: f64 = 0.5;
const SIGMA: f64 = 0.5;

// Initial simplex offsets for nonzero and zero coordinates.
const NONZERO_DELTA: f64 = 0.05;
const ZERO_DELTA: f64 = 0.00025;

/// Nelder–Mead simplex minimization inside a box.
///
/// Every trial point is clipped coordinate-wise into `bounds` before the
/// objective sees it, so the objective is only ever evaluated at feasible
/// points. Use `(-inf, inf)` for an unbounded coordinate. NaN objective
/// values rank as `+inf`, which lets callers reject infeasible regions by
/// value instead of by error.
///
/// Reaching `max_iter` is not an error: the best vertex is returned with
/// `converged == false`.
///
/// # Errors
///
/// Returns [`OptimError::EmptyInput`] if `x0` is empty or `bounds.len() != x0.len()`,
/// and [`OptimError::InvalidInterval`] if any bound has `low > high`.
///
/// # Example
///
/// ```
/// use distfit::optim::{nelder_mead, NelderMeadSettings};
///
/// // Unconstrained minimum at (2, -1); the box holds the second coordinate in [0, 1]
/// let f = |x: &[f64]| (x[0] - 2.0).powi(2) + (x[1] + 1.0).powi(2);
/// let bounds = [(f64::NEG_INFINITY, f64::INFINITY), (0.0, 1.0)];
/// let r = nelder_mead(f, &[0.5, 0.5], &bounds, &NelderMeadSettings::default()).unwrap();
/// assert!((r.x[0] - 2.0).abs() < 1e-4);
/// assert!(r.x[1].abs() < 1e-4);
/// ```
pub fn nelder_mead<T: FloatScalar>(
    mut f: impl FnMut(&[T]) -> T,
    x0: &[T],
    bounds: &[(T, T)],
    settings: &NelderMeadSettings<T>,
) -> Result<MinimizeResult<T>, OptimError> {
    let n = x0.len();
    if n == 0 || bounds.len() != n {
        return Err(OptimError::EmptyInput);
    }
    if bounds.iter().any(|&(lo, hi)| !(lo <= hi)) {
        return Err(OptimError::InvalidInterval);
    }

    let mut eval = |x: &[T]| {
        let v = f(x);
        if v.is_nan() {
            T::infinity()
        } else {
            v
        }
    };

    let start = clip(x0.to_vec(), bounds);
    let mut vertices = initial_simplex(&start, bounds);
    let mut values: Vec<T> = vertices.iter().map(|v| eval(v)).collect();
    let mut evals = n + 1;

    let rho = T::lit(RHO);
    let chi = T::lit(CHI);
    let psi = T::lit(PSI);
    let sigma = T::lit(SIGMA);

    let mut iterations = 0usize;
    let mut converged = false;

    while iterations < settings.max_iter {
        sort_simplex(&mut vertices, &mut values);

        if simplex_collapsed(&vertices, &values, settings) {
            converged = true;
            break;
        }
        iterations += 1;

        let centroid = centroid(&vertices[..n]);
        let worst = &vertices[n];

        let reflected = clip(affine(&centroid, worst, rho), bounds);
        let f_reflected = eval(&reflected);
        evals += 1;

        if f_reflected < values[0] {
            let expanded = clip(affine(&centroid, worst, rho * chi), bounds);
            let f_expanded = eval(&expanded);
            evals += 1;
            if f_expanded < f_reflected {
                vertices[n] = expanded;
                values[n] = f_expanded;
            } else {
                vertices[n] = reflected;
                values[n] = f_reflected;
            }
            continue;
        }

        if f_reflected < values[n - 1] {
            vertices[n] = reflected;
            values[n] = f_reflected;
            continue;
        }

        let accepted = if f_reflected < values[n] {
            let outside = clip(affine(&centroid, worst, psi * rho), bounds);
            let f_outside = eval(&outside);
            evals += 1;
            (f_outside <= f_reflected).then_some((outside, f_outside))
        } else {
            let inside = clip(affine(&centroid, worst, -psi), bounds);
            let f_inside = eval(&inside);
            evals += 1;
            (f_inside < values[n]).then_some((inside, f_inside))
        };

        match accepted {
            Some((x, fx)) => {
                vertices[n] = x;
                values[n] = fx;
            }
            None => {
                let (best, rest) = vertices.split_at_mut(1);
                for (vertex, value) in rest.iter_mut().zip(values[1..].iter_mut()) {
                    for (vi, &bi) in vertex.iter_mut().zip(best[0].iter()) {
                        *vi = bi + sigma * (*vi - bi);
                    }
                    *value = eval(vertex);
                }
                evals += n;
            }
        }
    }

    sort_simplex(&mut vertices, &mut values);
    let fx = values[0];
    let x = vertices.swap_remove(0);
    Ok(MinimizeResult {
        x,
        fx,
        iterations,
        evals,
        converged,
    })
}

fn clip<T: FloatScalar>(mut x: Vec<T>, bounds: &[(T, T)]) -> Vec<T> {
    for (xi, &(lo, hi)) in x.iter_mut().zip(bounds) {
        *xi = xi.max(lo).min(hi);
    }
    x
}

/// `c + t·(c − w)`: reflection, expansion and contraction are all points on this line.
fn affine<T: FloatScalar>(c: &[T], w: &[T], t: T) -> Vec<T> {
    c.iter().zip(w).map(|(&ci, &wi)| ci + t * (ci - wi)).collect()
}

fn centroid<T: FloatScalar>(vertices: &[Vec<T>]) -> Vec<T> {
    let m = T::from_usize(vertices.len());
    let mut c = vec![T::zero(); vertices[0].len()];
    for v in vertices {
        for (ci, &vi) in c.iter_mut().zip(v) {
            *ci = *ci + vi;
        }
    }
    c.iter_mut().for_each(|ci| *ci = *ci / m);
    c
}

fn initial_simplex<T: FloatScalar>(x0: &[T], bounds: &[(T, T)]) -> Vec<Vec<T>> {
    let mut vertices = Vec::with_capacity(x0.len() + 1);
    vertices.push(x0.to_vec());
    for k in 0..x0.len() {
        let mut y = x0.to_vec();
        let (lo, hi) = bounds[k];
        let step = if y[k] != T::zero() {
            T::lit(NONZERO_DELTA) * y[k]
        } else {
            T::lit(ZERO_DELTA)
        };
        let up = (y[k] + step).max(lo).min(hi);
        // Step the other way when the box pins the coordinate
        y[k] = if up != y[k] {
            up
        } else {
            (y[k] - step).max(lo).min(hi)
        };
        vertices.push(y);
    }
    vertices
}

fn sort_simplex<T: FloatScalar>(vertices: &mut Vec<Vec<T>>, values: &mut Vec<T>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(Ordering::Equal));
    *vertices = order.iter().map(|&i| vertices[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

fn simplex_collapsed<T: FloatScalar>(
    vertices: &[Vec<T>],
    values: &[T],
    settings: &NelderMeadSettings<T>,
) -> bool {
    let best = &vertices[0];
    let f_best = values[0];
    let f_scale = T::one() + f_best.abs();
    let f_spread = values[1..]
        .iter()
        .all(|&v| (v - f_best).abs() <= settings.f_tol * f_scale);
    if !f_spread {
        return false;
    }
    vertices[1..].iter().all(|v| {
        v.iter()
            .zip(best)
            .all(|(&vi, &bi)| (vi - bi).abs() <= settings.x_tol * (T::one() + bi.abs()))
    })
}
