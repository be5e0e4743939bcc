use log::warn;

use crate::models::series::{SeriesPoint, SmoothingMethod};

/// Maximum UI-facing smoothing strength. Larger values are clamped.
pub const MAX_STRENGTH: u8 = 10;

/// B-spline degree for the default method. Degree 1 yields a piecewise
/// linear curve through the subsampled control points.
const SPLINE_DEGREE: usize = 1;

/// Nudge applied to a parameter of exactly 1.0 so evaluation stays inside
/// the half-open basis-function domain.
const KNOT_DOMAIN_NUDGE: f64 = 1e-10;

/// Reference window range fed into `effective_strength` for the adaptive
/// rolling average.
const BASE_SMOOTHING_RANGE: f64 = 10.0;

/// Samples within this distance of a series boundary have contributions
/// from the first/last reading linearly dampened.
const EDGE_DAMPEN_RANGE: usize = 3;

/// Smooths cumulative daily income series for display.
///
/// Three interchangeable algorithms: a clamped B-spline over a subsampled
/// control-point set (default), a plain weighted rolling average, and an
/// adaptive rolling average whose window shrinks near the series
/// boundary. All three preserve the first and last value of the input and
/// return a series of identical length and day keys.
pub struct SmoothingService;

impl SmoothingService {
    pub fn new() -> Self {
        Self
    }

    /// Smooth a series at the given strength (0–10, clamped).
    ///
    /// Strength 0, or a series of fewer than 3 points, comes back
    /// unchanged. Never fails: data-quality problems degrade to
    /// pass-through so a chart refresh cannot crash the UI.
    #[must_use]
    pub fn smooth(
        &self,
        points: &[SeriesPoint],
        strength: u8,
        method: SmoothingMethod,
    ) -> Vec<SeriesPoint> {
        let strength = strength.min(MAX_STRENGTH);
        if strength == 0 || points.len() < 3 {
            return points.to_vec();
        }

        let x: Vec<f64> = (0..points.len()).map(|i| i as f64).collect();
        let y: Vec<f64> = points.iter().map(|p| p.value).collect();
        let smoothed = dispatch(&x, &y, strength, method);

        points
            .iter()
            .zip(smoothed)
            .map(|(p, value)| SeriesPoint { value, ..p.clone() })
            .collect()
    }

    /// Smooth parallel x/y arrays directly (chart builders that keep
    /// coordinates separate use this entry point).
    ///
    /// A length mismatch is a reported error that degrades to returning
    /// the y-values unchanged rather than panicking.
    #[must_use]
    pub fn smooth_xy(
        &self,
        x: &[f64],
        y: &[f64],
        strength: u8,
        method: SmoothingMethod,
    ) -> Vec<f64> {
        if x.len() != y.len() {
            warn!(
                "smoothing skipped: x/y length mismatch ({} vs {})",
                x.len(),
                y.len()
            );
            return y.to_vec();
        }
        let strength = strength.min(MAX_STRENGTH);
        if strength == 0 || y.len() < 3 {
            return y.to_vec();
        }
        dispatch(x, y, strength, method)
    }
}

impl Default for SmoothingService {
    fn default() -> Self {
        Self::new()
    }
}

fn dispatch(x: &[f64], y: &[f64], strength: u8, method: SmoothingMethod) -> Vec<f64> {
    match method {
        SmoothingMethod::BSpline => bspline_smooth(x, y, strength),
        SmoothingMethod::RollingAverage => rolling_average(y, strength),
        SmoothingMethod::ImprovedRollingAverage => {
            let effective = effective_strength(strength, y.len(), BASE_SMOOTHING_RANGE);
            adaptive_rolling_average(y, effective)
        }
    }
}

// ── Strength scaling ────────────────────────────────────────────────

/// Rescale the UI-facing strength for the adaptive rolling average.
///
/// Smaller datasets get proportionally more aggressive smoothing: a
/// 90-day partial year at the same UI strength smooths roughly four
/// times harder than a full 365-day year. Kept as a standalone pure
/// function so the scaling law is testable apart from the windowing math.
#[must_use]
pub fn effective_strength(strength: u8, dataset_size: usize, base_range: f64) -> f64 {
    if dataset_size == 0 {
        return 0.0;
    }
    (f64::from(strength) / 100.0) * base_range * (365.0 / dataset_size as f64)
}

/// Number of B-spline control points used for a series of `len` points at
/// the given strength.
///
/// Shrinks linearly with strength: strength 0 keeps every point
/// (effectively no smoothing), strength 10 drops to the minimum.
#[must_use]
pub fn control_point_count(len: usize, strength: u8) -> usize {
    let min_points = (SPLINE_DEGREE + 4).max(len / 15);
    let max_points = len;
    if min_points >= max_points {
        return max_points;
    }
    let span = (max_points - min_points) as f64;
    let reduction = ((f64::from(strength) / f64::from(MAX_STRENGTH)) * span).floor() as usize;
    min_points.max(max_points - reduction)
}

// ── B-spline (default method) ───────────────────────────────────────

/// Evaluate a clamped B-spline over a subsampled control-point set at
/// every original x position, normalized into [0, 1].
///
/// Output length always equals input length, and the clamped knot vector
/// makes the curve touch the first and last control points — which are
/// the first and last input values — exactly.
fn bspline_smooth(x: &[f64], y: &[f64], strength: u8) -> Vec<f64> {
    let n = y.len();
    let count = control_point_count(n, strength);
    if count >= n {
        return y.to_vec();
    }

    // Uniform index subsampling, not value-based decimation.
    let step = (n - 1) as f64 / (count - 1) as f64;
    let ctrl_y: Vec<f64> = (0..count)
        .map(|i| {
            let idx = ((i as f64 * step).round() as usize).min(n - 1);
            y[idx]
        })
        .collect();

    let knots = clamped_knot_vector(count, SPLINE_DEGREE);
    let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !x_max.is_finite() || x_max <= 0.0 {
        return y.to_vec();
    }

    let mut basis = vec![0.0; knots.len() - 1];
    x.iter()
        .map(|&xi| {
            let mut t = xi / x_max;
            if t >= 1.0 {
                t = 1.0 - KNOT_DOMAIN_NUDGE;
            }
            evaluate_basis(t, SPLINE_DEGREE, &knots, &mut basis);
            ctrl_y
                .iter()
                .enumerate()
                .map(|(j, &cy)| basis[j] * cy)
                .sum()
        })
        .collect()
}

/// Clamped knot vector: first and last knot repeated `degree + 1` times,
/// interior knots spaced uniformly in [0, 1].
fn clamped_knot_vector(count: usize, degree: usize) -> Vec<f64> {
    let len = count + degree + 1;
    let interior_spans = (count - degree) as f64;
    (0..len)
        .map(|i| {
            if i <= degree {
                0.0
            } else if i >= count {
                1.0
            } else {
                (i - degree) as f64 / interior_spans
            }
        })
        .collect()
}

/// Cox–de Boor basis functions at parameter `t`, filled into `basis`.
///
/// Evaluated bottom-up over one triangular table rather than with the
/// textbook recursion, so no subproblem is computed twice and call depth
/// does not grow with the degree. Degree-0 bases are indicators over the
/// half-open span `[knot[i], knot[i+1])`; higher degrees blend the two
/// lower bases, with zero-width spans contributing nothing instead of
/// dividing by zero.
fn evaluate_basis(t: f64, degree: usize, knots: &[f64], basis: &mut [f64]) {
    let spans = knots.len() - 1;
    for i in 0..spans {
        basis[i] = if t >= knots[i] && t < knots[i + 1] {
            1.0
        } else {
            0.0
        };
    }
    for d in 1..=degree {
        for i in 0..spans - d {
            let left_width = knots[i + d] - knots[i];
            let right_width = knots[i + d + 1] - knots[i + 1];
            let left = if left_width > f64::EPSILON {
                (t - knots[i]) / left_width * basis[i]
            } else {
                0.0
            };
            let right = if right_width > f64::EPSILON {
                (knots[i + d + 1] - t) / right_width * basis[i + 1]
            } else {
                0.0
            };
            basis[i] = left + right;
        }
    }
}

// ── Rolling average (plain) ─────────────────────────────────────────

/// Symmetric weighted rolling average. Endpoints are copied verbatim;
/// inside the window, series endpoints weigh 2× and the window's own
/// edge samples 1.5×.
fn rolling_average(y: &[f64], strength: u8) -> Vec<f64> {
    let n = y.len();
    let window = ((f64::from(strength) / f64::from(MAX_STRENGTH)) * (n as f64 / 2.0)).floor()
        as usize;
    let window = window.max(1);

    let mut out = y.to_vec();
    for i in 1..n - 1 {
        let lo = i.saturating_sub(window);
        let hi = (i + window).min(n - 1);
        let mut weighted = 0.0;
        let mut total = 0.0;
        for (j, &value) in y.iter().enumerate().take(hi + 1).skip(lo) {
            let weight = if j == 0 || j == n - 1 {
                2.0
            } else if j == lo || j == hi {
                1.5
            } else {
                1.0
            };
            weighted += value * weight;
            total += weight;
        }
        out[i] = weighted / total;
    }
    out
}

// ── Adaptive rolling average (improved method) ──────────────────────

/// Rolling average with a per-point window and Gaussian weights.
///
/// The window tapers toward the series boundary so smoothing never pulls
/// interior values toward the fixed endpoints, and contributions from the
/// first/last reading are linearly dampened for the few samples adjacent
/// to a boundary to avoid a discontinuous jump. Endpoints are copied
/// verbatim. `effective` is the pre-scaled strength from
/// `effective_strength`, not the raw UI value.
fn adaptive_rolling_average(y: &[f64], effective: f64) -> Vec<f64> {
    let n = y.len();
    let base_half = (effective.round() as usize).clamp(1, n / 2);

    let mut out = y.to_vec();
    for i in 1..n - 1 {
        let edge_distance = i.min(n - 1 - i);
        let taper = (edge_distance as f64 / (n as f64 / 4.0)).min(1.0);
        let half = ((base_half as f64 * taper).round() as usize).max(1);
        let sigma = half as f64 * 10.0;

        let lo = i.saturating_sub(half);
        let hi = (i + half).min(n - 1);
        let mut weighted = 0.0;
        let mut total = 0.0;
        for (j, &value) in y.iter().enumerate().take(hi + 1).skip(lo) {
            let delta = j as i64 - i as i64;
            let offset = delta as f64;
            let mut weight = (-(offset * offset) / (2.0 * sigma * sigma)).exp();
            // The sample itself and its immediate neighbours dominate.
            if delta == 0 {
                weight *= 2.0;
            } else if delta.abs() == 1 {
                weight *= 1.5;
            }
            if j == 0 && i < EDGE_DAMPEN_RANGE {
                weight *= i as f64 / EDGE_DAMPEN_RANGE as f64;
            }
            if j == n - 1 && n - 1 - i < EDGE_DAMPEN_RANGE {
                weight *= (n - 1 - i) as f64 / EDGE_DAMPEN_RANGE as f64;
            }
            weighted += value * weight;
            total += weight;
        }
        if total > f64::EPSILON {
            out[i] = weighted / total;
        }
    }
    out
}
