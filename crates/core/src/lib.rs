pub mod errors;
pub mod models;
pub mod services;

use std::collections::BTreeMap;

use models::period::{Granularity, PeriodTotal};
use models::series::{sort_chronological, SeriesPoint, SmoothingMethod};
use models::stats::{CenterStatistic, CombinedStats, Dispersion};
use services::{
    normalize_service::NormalizeService, rollup_service::RollupService,
    smoothing_service::SmoothingService, stats_service::StatsService,
};

use errors::CoreError;

/// Main entry point for the practice income dashboard core.
///
/// Holds the historical dataset (one cumulative daily series per year)
/// and the services that transform it into chart-ready data. The core
/// computes all the numbers — the frontend only renders. No transform
/// ever mutates the loaded dataset.
#[must_use]
pub struct IncomeDashboard {
    years: BTreeMap<i32, Vec<SeriesPoint>>,
    smoothing_service: SmoothingService,
    rollup_service: RollupService,
    stats_service: StatsService,
    normalize_service: NormalizeService,
}

impl std::fmt::Debug for IncomeDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncomeDashboard")
            .field("years", &self.years.keys().collect::<Vec<_>>())
            .field(
                "total_points",
                &self.years.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

impl IncomeDashboard {
    /// Create a dashboard with no data loaded.
    pub fn create_new() -> Self {
        Self {
            years: BTreeMap::new(),
            smoothing_service: SmoothingService::new(),
            rollup_service: RollupService::new(),
            stats_service: StatsService::new(),
            normalize_service: NormalizeService::new(),
        }
    }

    // ── Dataset Management ──────────────────────────────────────────

    /// Load one year's cumulative daily series, replacing any previous
    /// data for that year.
    ///
    /// The series is sorted chronologically and a leap-day entry is
    /// folded into Feb 28 so every year aligns on the same 365-day axis.
    /// An empty series is rejected.
    pub fn load_year(&mut self, year: i32, mut points: Vec<SeriesPoint>) -> Result<(), CoreError> {
        if points.is_empty() {
            return Err(CoreError::ValidationError(format!(
                "Cannot load year {year}: series is empty"
            )));
        }
        sort_chronological(&mut points);
        fold_leap_day(&mut points);
        self.years.insert(year, points);
        Ok(())
    }

    /// Remove a year's data. Returns `true` if it was present.
    pub fn remove_year(&mut self, year: i32) -> bool {
        self.years.remove(&year).is_some()
    }

    /// All loaded years, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    /// The raw series for a year, if loaded.
    #[must_use]
    pub fn get_year_series(&self, year: i32) -> Option<&[SeriesPoint]> {
        self.years.get(&year).map(Vec::as_slice)
    }

    /// A year's final cumulative value (its total income to date).
    pub fn year_total(&self, year: i32) -> Result<f64, CoreError> {
        let series = self.year_series(year)?;
        Ok(series.last().map_or(0.0, |p| p.value))
    }

    // ── Smoothing ───────────────────────────────────────────────────

    /// A year's series smoothed for display. Day keys and length are
    /// identical to the raw series; first and last values are preserved.
    pub fn smoothed_series(
        &self,
        year: i32,
        strength: u8,
        method: SmoothingMethod,
    ) -> Result<Vec<SeriesPoint>, CoreError> {
        let series = self.year_series(year)?;
        Ok(self.smoothing_service.smooth(series, strength, method))
    }

    // ── Period Rollups ──────────────────────────────────────────────

    /// Per-period incremental income for a year.
    pub fn rollup(
        &self,
        year: i32,
        granularity: Granularity,
    ) -> Result<Vec<PeriodTotal>, CoreError> {
        let series = self.year_series(year)?;
        Ok(self.rollup_service.rollup(series, granularity))
    }

    /// Per-period income as a percentage of the year's total.
    pub fn rollup_percent(
        &self,
        year: i32,
        granularity: Granularity,
    ) -> Result<Vec<PeriodTotal>, CoreError> {
        let totals = self.rollup(year, granularity)?;
        let denominator = self.year_total(year)?;
        let incomes: Vec<f64> = totals.iter().map(|t| t.income).collect();
        let scaled = self.normalize_service.normalize(&incomes, denominator);
        Ok(totals
            .into_iter()
            .zip(scaled)
            .map(|(t, income)| PeriodTotal { income, ..t })
            .collect())
    }

    /// Full-year rollup from actual history plus the tail of a projected
    /// series beyond the last actual date.
    ///
    /// Without the projected tail, periods with no actual data yet would
    /// under-count to zero. The aggregator itself needs no special
    /// casing for the provenance switch.
    pub fn rollup_with_projection(
        &self,
        year: i32,
        projected: &[SeriesPoint],
        granularity: Granularity,
    ) -> Result<Vec<PeriodTotal>, CoreError> {
        let actual = self.year_series(year)?;
        let mut composite = actual.to_vec();
        if let Some(last) = actual.last() {
            composite.extend(
                projected
                    .iter()
                    .filter(|p| p.display_key.as_str() > last.display_key.as_str())
                    .cloned(),
            );
        }
        Ok(self.rollup_service.rollup(&composite, granularity))
    }

    // ── Cross-Year Statistics ───────────────────────────────────────

    /// Per-day combined statistics across the given years.
    ///
    /// `allowed_days` restricts the day axis (quarter/month views);
    /// `None` uses the full 365-day calendar.
    pub fn combined(
        &self,
        years: &[i32],
        allowed_days: Option<&[String]>,
        center: CenterStatistic,
        dispersion: Dispersion,
    ) -> Result<CombinedStats, CoreError> {
        let mut series: Vec<&[SeriesPoint]> = Vec::with_capacity(years.len());
        for year in years {
            series.push(self.year_series(*year)?);
        }
        Ok(self
            .stats_service
            .combine(&series, allowed_days, center, dispersion))
    }

    /// Combined statistics rescaled to percentages of `denominator`.
    /// Center and both band edges share the one denominator.
    pub fn combined_percent(
        &self,
        years: &[i32],
        allowed_days: Option<&[String]>,
        center: CenterStatistic,
        dispersion: Dispersion,
        denominator: f64,
    ) -> Result<CombinedStats, CoreError> {
        let stats = self.combined(years, allowed_days, center, dispersion)?;
        Ok(self.normalize_service.normalize_stats(&stats, denominator))
    }

    // ── Normalization ───────────────────────────────────────────────

    /// Rescale raw values to percentages of `denominator`. A zero or
    /// negative denominator returns the values unchanged.
    #[must_use]
    pub fn normalize(&self, values: &[f64], denominator: f64) -> Vec<f64> {
        self.normalize_service.normalize(values, denominator)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export a year's period rollup as a JSON payload for the
    /// rendering layer.
    pub fn export_rollup_json(
        &self,
        year: i32,
        granularity: Granularity,
    ) -> Result<String, CoreError> {
        let totals = self.rollup(year, granularity)?;
        Ok(serde_json::to_string_pretty(&totals)?)
    }

    /// Export combined cross-year statistics as a JSON payload for the
    /// rendering layer.
    pub fn export_combined_json(
        &self,
        years: &[i32],
        center: CenterStatistic,
        dispersion: Dispersion,
    ) -> Result<String, CoreError> {
        let stats = self.combined(years, None, center, dispersion)?;
        Ok(serde_json::to_string_pretty(&stats)?)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn year_series(&self, year: i32) -> Result<&[SeriesPoint], CoreError> {
        self.years
            .get(&year)
            .map(Vec::as_slice)
            .ok_or(CoreError::YearNotFound(year))
    }
}

impl Default for IncomeDashboard {
    fn default() -> Self {
        Self::create_new()
    }
}

/// Fold a Feb 29 reading into Feb 28. Cumulative values make the merge a
/// max, not a sum; the cross-year day axis carries no leap day.
fn fold_leap_day(points: &mut Vec<SeriesPoint>) {
    let Some(pos) = points.iter().position(|p| p.display_key == "02-29") else {
        return;
    };
    let leap = points.remove(pos);
    match points.iter_mut().find(|p| p.display_key == "02-28") {
        Some(feb28) => feb28.value = feb28.value.max(leap.value),
        None => {
            // No Feb 28 reading at all: keep the value under the folded key.
            points.insert(
                pos,
                SeriesPoint {
                    date_key: leap.date_key.replace("02-29", "02-28"),
                    display_key: "02-28".to_string(),
                    value: leap.value,
                },
            );
        }
    }
}
