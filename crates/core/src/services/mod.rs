pub mod normalize_service;
pub mod rollup_service;
pub mod smoothing_service;
pub mod stats_service;
