use serde::{Deserialize, Serialize};

/// Which per-day center statistic the cross-year combination reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CenterStatistic {
    Mean,
    /// Median of the per-year values. The dispersion band is still
    /// computed from the mean — a deliberate product simplification,
    /// preserved for chart compatibility.
    Median,
}

/// Dispersion band around the center statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dispersion {
    /// 95% confidence interval (z = 1.96)
    Ci95,
    /// Raw population standard deviation (z = 1)
    StdDev,
    /// No band: bounds collapse onto the mean
    None,
}

impl Dispersion {
    /// Multiplier applied to the per-day standard deviation.
    #[must_use]
    pub fn z(self) -> f64 {
        match self {
            Dispersion::Ci95 => 1.96,
            Dispersion::StdDev => 1.0,
            Dispersion::None => 0.0,
        }
    }
}

/// Cross-year combined statistics: four parallel arrays with one slot per
/// calendar day on the active axis.
///
/// `upper_bound = mean + z·σ` and `lower_bound = max(0, mean − z·σ)`,
/// where σ is the per-day population standard deviation across years.
/// `center` holds the mean by default, or the median when requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedStats {
    /// `MM-DD` keys of the active day axis
    pub days: Vec<String>,

    /// Per-day center statistic (mean or median)
    pub center: Vec<f64>,

    /// Per-day upper band edge
    pub upper_bound: Vec<f64>,

    /// Per-day lower band edge, clamped at zero
    pub lower_bound: Vec<f64>,
}

impl CombinedStats {
    /// Number of days covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
