// ═══════════════════════════════════════════════════════════════════
// Model Tests — SeriesPoint, calendar axis, period labels, enums
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use practice_dashboard_core::models::period::{
    month_label, quarter_of_month, Granularity, PeriodTotal,
};
use practice_dashboard_core::models::series::{
    full_year_days, sort_chronological, SeriesPoint,
};
use practice_dashboard_core::models::stats::{CombinedStats, Dispersion};

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod series_point {
    use super::*;

    #[test]
    fn keys_derived_from_date() {
        let p = SeriesPoint::new(make_date(2025, 3, 7), 1234.5);
        assert_eq!(p.date_key, "2025-03-07");
        assert_eq!(p.display_key, "03-07");
        assert_eq!(p.value, 1234.5);
    }

    #[test]
    fn month_and_year_accessors() {
        let p = SeriesPoint::new(make_date(2025, 11, 30), 0.0);
        assert_eq!(p.month(), Some(11));
        assert_eq!(p.year(), Some(2025));
    }

    #[test]
    fn malformed_keys_parse_to_none() {
        let p = SeriesPoint {
            date_key: "??".into(),
            display_key: "nope".into(),
            value: 1.0,
        };
        assert_eq!(p.month(), None);
        assert_eq!(p.year(), None);
    }

    #[test]
    fn out_of_range_month_rejected() {
        let p = SeriesPoint {
            date_key: "2025-13-01".into(),
            display_key: "13-01".into(),
            value: 1.0,
        };
        assert_eq!(p.month(), None);
    }

    #[test]
    fn sorts_chronologically_by_date_key() {
        let mut points = vec![
            SeriesPoint::new(make_date(2025, 6, 1), 3.0),
            SeriesPoint::new(make_date(2025, 1, 10), 1.0),
            SeriesPoint::new(make_date(2025, 2, 5), 2.0),
        ];
        sort_chronological(&mut points);
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn serde_round_trip() {
        let p = SeriesPoint::new(make_date(2025, 3, 7), 99.0);
        let json = serde_json::to_string(&p).unwrap();
        let back: SeriesPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}

mod calendar_axis {
    use super::*;

    #[test]
    fn full_year_has_365_days() {
        let days = full_year_days();
        assert_eq!(days.len(), 365);
        assert_eq!(days.first().unwrap(), "01-01");
        assert_eq!(days.last().unwrap(), "12-31");
    }

    #[test]
    fn no_leap_day_on_the_axis() {
        assert!(!full_year_days().contains(&"02-29".to_string()));
        assert!(full_year_days().contains(&"02-28".to_string()));
    }

    #[test]
    fn axis_is_sorted_and_unique() {
        let days = full_year_days();
        for pair in days.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}

mod periods {
    use super::*;

    #[test]
    fn bucket_counts() {
        assert_eq!(Granularity::Year.bucket_count(), 1);
        assert_eq!(Granularity::Quarter.bucket_count(), 4);
        assert_eq!(Granularity::Month.bucket_count(), 12);
    }

    #[test]
    fn quarter_boundaries() {
        assert_eq!(quarter_of_month(1), 1);
        assert_eq!(quarter_of_month(3), 1);
        assert_eq!(quarter_of_month(4), 2);
        assert_eq!(quarter_of_month(6), 2);
        assert_eq!(quarter_of_month(7), 3);
        assert_eq!(quarter_of_month(9), 3);
        assert_eq!(quarter_of_month(10), 4);
        assert_eq!(quarter_of_month(12), 4);
    }

    #[test]
    fn month_labels() {
        assert_eq!(month_label(1), "Jan");
        assert_eq!(month_label(12), "Dec");
    }

    #[test]
    fn period_total_serde_round_trip() {
        let total = PeriodTotal {
            period_label: "Q2".into(),
            income: 1500.0,
        };
        let json = serde_json::to_string(&total).unwrap();
        let back: PeriodTotal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, total);
    }
}

mod stats_model {
    use super::*;

    #[test]
    fn dispersion_z_values() {
        assert_eq!(Dispersion::Ci95.z(), 1.96);
        assert_eq!(Dispersion::StdDev.z(), 1.0);
        assert_eq!(Dispersion::None.z(), 0.0);
    }

    #[test]
    fn default_is_empty() {
        let stats = CombinedStats::default();
        assert!(stats.is_empty());
        assert_eq!(stats.len(), 0);
    }

    #[test]
    fn combined_stats_serde_round_trip() {
        let stats = CombinedStats {
            days: vec!["01-01".into()],
            center: vec![10.0],
            upper_bound: vec![12.0],
            lower_bound: vec![8.0],
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: CombinedStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
