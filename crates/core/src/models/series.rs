use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's cumulative income reading.
///
/// `value` is the running total of income from the start of the year
/// through this day. A correctly ordered series is non-decreasing, but
/// the engine does not enforce that invariant — every transform must
/// tolerate out-of-order or non-monotonic input gracefully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Full date key, `YYYY-MM-DD`
    pub date_key: String,

    /// Calendar-day key, `MM-DD` — the cross-year alignment axis
    pub display_key: String,

    /// Cumulative income through this day
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date_key: date.format("%Y-%m-%d").to_string(),
            display_key: date.format("%m-%d").to_string(),
            value,
        }
    }

    /// Calendar month (1–12) parsed from the display key, if well-formed.
    #[must_use]
    pub fn month(&self) -> Option<u32> {
        self.display_key
            .get(..2)?
            .parse()
            .ok()
            .filter(|m| (1..=12).contains(m))
    }

    /// Calendar year parsed from the date key, if well-formed.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date_key.get(..4)?.parse().ok()
    }
}

/// Smoothing algorithm selector (see `SmoothingService`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmoothingMethod {
    /// Clamped B-spline over a subsampled control-point set (default)
    BSpline,
    /// Symmetric weighted rolling average
    RollingAverage,
    /// Adaptive rolling average with Gaussian weights and boundary taper
    ImprovedRollingAverage,
}

/// Sort a series chronologically by its full date key, in place.
/// `YYYY-MM-DD` keys are zero-padded, so string order is date order.
pub fn sort_chronological(points: &mut [SeriesPoint]) {
    points.sort_by(|a, b| a.date_key.cmp(&b.date_key));
}

/// The 365 `MM-DD` keys of a non-leap year, in calendar order.
///
/// Historical series never carry a Feb 29 entry (leap-day income is
/// folded into Feb 28 at load time), so this is the complete cross-year
/// day axis.
#[must_use]
pub fn full_year_days() -> Vec<String> {
    // Any non-leap year works as the template.
    let start = NaiveDate::from_ymd_opt(2001, 1, 1).expect("valid template date");
    start
        .iter_days()
        .take(365)
        .map(|d| d.format("%m-%d").to_string())
        .collect()
}
