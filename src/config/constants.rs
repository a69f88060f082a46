use crate::config::DF;

// Top Level Constants
pub const REQUIRED_COLUMNS: [&str; 4] = ["lon", "lat", "timestamp", "speed_kmh"];

pub const MAX_FILE_SIZE_MB: usize = 10;
pub const MAX_FILE_SIZE_BYTES: usize = MAX_FILE_SIZE_MB * 1024 * 1024;
pub const MAX_ROW_COUNT: usize = 10_000;

pub const LON_RANGE: (f64, f64) = (-180.0, 180.0);
pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);

// Activates the trace_time! macro without having to reach through DF at every call site.
pub const LOG_PERFORMANCE: bool = DF.log_performance;

pub mod advisory {
    //! Soft limits surfaced as warnings, never as rejections.

    pub const MAX_SPAN_DAYS: i64 = 30;
    pub const MAX_MEDIAN_INTERVAL_SECS: f64 = 20.0;
}
