use std::cmp::Ordering;

use crate::models::series::{full_year_days, SeriesPoint};
use crate::models::stats::{CenterStatistic, CombinedStats, Dispersion};

/// Aligns several years' series onto a common calendar-day axis and
/// computes per-day combined statistics across them.
pub struct StatsService;

impl StatsService {
    pub fn new() -> Self {
        Self
    }

    /// Combine multiple years into per-day center and dispersion bands.
    ///
    /// The day axis is either the full 365-day non-leap calendar or a
    /// caller-supplied subset (quarter/month views). Days a year does not
    /// cover are filled by interpolating that year's own nearest known
    /// values — never another year's. The output covers every day on the
    /// axis regardless of how sparse any single year is.
    ///
    /// An empty year list yields empty `CombinedStats`, not an error. A
    /// single year yields a degenerate band with σ = 0.
    #[must_use]
    pub fn combine(
        &self,
        year_series: &[&[SeriesPoint]],
        allowed_days: Option<&[String]>,
        center: CenterStatistic,
        dispersion: Dispersion,
    ) -> CombinedStats {
        if year_series.is_empty() {
            return CombinedStats::default();
        }

        let days: Vec<String> = match allowed_days {
            Some(subset) => subset.to_vec(),
            None => full_year_days(),
        };

        let mut center_vals = Vec::with_capacity(days.len());
        let mut upper_bound = Vec::with_capacity(days.len());
        let mut lower_bound = Vec::with_capacity(days.len());
        let z = dispersion.z();

        for day in &days {
            let values: Vec<f64> = year_series
                .iter()
                .filter_map(|series| value_on_day(series, day))
                .collect();
            if values.is_empty() {
                center_vals.push(0.0);
                upper_bound.push(0.0);
                lower_bound.push(0.0);
                continue;
            }

            let mean = values.iter().sum::<f64>() / values.len() as f64;
            // Population variance (denominator N, not N−1).
            let variance = values
                .iter()
                .map(|v| (v - mean) * (v - mean))
                .sum::<f64>()
                / values.len() as f64;
            let sigma = variance.sqrt();

            center_vals.push(match center {
                CenterStatistic::Mean => mean,
                CenterStatistic::Median => median(&values),
            });
            // The band is always anchored on the mean, even in median
            // mode — kept for chart compatibility.
            upper_bound.push(mean + z * sigma);
            lower_bound.push((mean - z * sigma).max(0.0));
        }

        CombinedStats {
            days,
            center: center_vals,
            upper_bound,
            lower_bound,
        }
    }
}

impl Default for StatsService {
    fn default() -> Self {
        Self::new()
    }
}

/// One year's value on `day` (`MM-DD`): the observed reading if present,
/// otherwise filled from the year's own nearest surrounding known values.
///
/// Surrounding readings are combined with an equal-weight average (same
/// value passes through unchanged); a day past the last known reading
/// extrapolates flat from it, and a day before the first known reading
/// takes the first reading. Returns `None` only for an empty series.
///
/// Zero-padded `MM-DD` keys sort in calendar order, so plain string
/// comparison locates the neighbours.
fn value_on_day(series: &[SeriesPoint], day: &str) -> Option<f64> {
    let mut before: Option<f64> = None;
    for point in series {
        match point.display_key.as_str().cmp(day) {
            Ordering::Equal => return Some(point.value),
            Ordering::Less => before = Some(point.value),
            Ordering::Greater => {
                let after = point.value;
                return Some(match before {
                    Some(b) if (b - after).abs() < f64::EPSILON => b,
                    Some(b) => (b + after) / 2.0,
                    None => after,
                });
            }
        }
    }
    before
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
