use crate::models::period::{month_label, quarter_of_month, Granularity, PeriodTotal};
use crate::models::series::SeriesPoint;

/// Converts cumulative daily series into discrete period totals.
///
/// Cumulative series are non-decreasing by construction, so the maximum
/// value observed inside a bucket is the bucket's closing reading; each
/// bucket's income is that maximum minus the maximum of all earlier
/// buckets. Input that switches provenance mid-stream (actual history
/// followed by a projected tail) needs no special casing.
pub struct RollupService;

impl RollupService {
    pub fn new() -> Self {
        Self
    }

    /// Roll a cumulative series up into per-period incremental totals.
    ///
    /// Every bucket of the granularity is emitted, in chronological
    /// order; buckets with no observed days contribute zero. The totals
    /// always sum to the year's final cumulative value.
    #[must_use]
    pub fn rollup(&self, points: &[SeriesPoint], granularity: Granularity) -> Vec<PeriodTotal> {
        if points.is_empty() {
            return Vec::new();
        }

        // Maximum cumulative value observed per bucket.
        let mut bucket_max: Vec<Option<f64>> = vec![None; granularity.bucket_count()];
        for point in points {
            let Some(month) = point.month() else {
                continue;
            };
            let idx = match granularity {
                Granularity::Year => 0,
                Granularity::Quarter => (quarter_of_month(month) - 1) as usize,
                Granularity::Month => (month - 1) as usize,
            };
            let slot = &mut bucket_max[idx];
            *slot = Some(slot.map_or(point.value, |m| m.max(point.value)));
        }

        let year_label = points[0]
            .year()
            .map_or_else(|| "Year".to_string(), |y| y.to_string());

        let mut running_prior_max = 0.0;
        let mut totals = Vec::with_capacity(bucket_max.len());
        for (idx, max) in bucket_max.iter().enumerate() {
            let period_label = match granularity {
                Granularity::Year => year_label.clone(),
                Granularity::Quarter => format!("Q{}", idx + 1),
                Granularity::Month => month_label(idx as u32 + 1).to_string(),
            };
            match max {
                Some(max) => {
                    totals.push(PeriodTotal {
                        period_label,
                        income: max - running_prior_max,
                    });
                    running_prior_max = running_prior_max.max(*max);
                }
                // No observed days: the bucket inherits the prior running
                // total, contributing nothing.
                None => totals.push(PeriodTotal {
                    period_label,
                    income: 0.0,
                }),
            }
        }
        totals
    }
}

impl Default for RollupService {
    fn default() -> Self {
        Self::new()
    }
}
