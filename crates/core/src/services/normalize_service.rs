use crate::models::stats::CombinedStats;

/// Rescales absolute dollar values to percentages of a reference total.
/// Applied at the very end of the pipeline, just before chart handoff.
pub struct NormalizeService;

impl NormalizeService {
    pub fn new() -> Self {
        Self
    }

    /// Map each value to `value / denominator * 100`.
    ///
    /// A zero or negative denominator means percentage mode is not
    /// applicable; the input comes back unchanged rather than as NaN or
    /// infinity.
    #[must_use]
    pub fn normalize(&self, values: &[f64], denominator: f64) -> Vec<f64> {
        if denominator <= 0.0 {
            return values.to_vec();
        }
        values.iter().map(|v| v / denominator * 100.0).collect()
    }

    /// Normalize a combined-statistics band.
    ///
    /// Center and both bounds share the one denominator, so
    /// `center ± band` remains a valid proportion after scaling.
    #[must_use]
    pub fn normalize_stats(&self, stats: &CombinedStats, denominator: f64) -> CombinedStats {
        CombinedStats {
            days: stats.days.clone(),
            center: self.normalize(&stats.center, denominator),
            upper_bound: self.normalize(&stats.upper_bound, denominator),
            lower_bound: self.normalize(&stats.lower_bound, denominator),
        }
    }
}

impl Default for NormalizeService {
    fn default() -> Self {
        Self::new()
    }
}
