use serde::{Deserialize, Serialize};

/// Bucket size for period rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    /// One bucket covering the whole year
    Year,
    /// Q1 = Jan–Mar, Q2 = Apr–Jun, Q3 = Jul–Sep, Q4 = Oct–Dec
    Quarter,
    /// One bucket per calendar month
    Month,
}

impl Granularity {
    /// Number of buckets this granularity produces for one year.
    #[must_use]
    pub fn bucket_count(self) -> usize {
        match self {
            Granularity::Year => 1,
            Granularity::Quarter => 4,
            Granularity::Month => 12,
        }
    }
}

/// Non-cumulative income earned strictly within one period bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    /// Bucket label: the year ("2025"), a quarter ("Q1".."Q4"),
    /// or a month ("Jan".."Dec")
    pub period_label: String,

    /// Incremental income earned within the bucket
    pub income: f64,
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Display label for a month number (1–12).
#[must_use]
pub fn month_label(month: u32) -> &'static str {
    MONTH_LABELS[(month.saturating_sub(1) as usize).min(11)]
}

/// Quarter number (1–4) for a month number (1–12).
#[must_use]
pub fn quarter_of_month(month: u32) -> u32 {
    month.saturating_sub(1) / 3 + 1
}
