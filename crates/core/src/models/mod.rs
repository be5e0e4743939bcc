pub mod period;
pub mod series;
pub mod stats;
