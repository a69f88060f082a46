mod perf;
mod time_utils;

pub use time_utils::{AppInstant, format_duration, parse_timestamp_ms};
