//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Emit session lifecycle events (attempt starts, stale events, resets).
    pub log_session_events: bool,

    /// Log dataset swaps and fit-bounds requests on the map view.
    pub log_map_updates: bool,

    /// Log how files arrive (drop, path, sample) and their sizes.
    pub log_intake: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    /// Log request/response sizes and shapes at the prediction boundary.
    pub log_backend: bool,
}

pub const DF: LogFlags = LogFlags {
    log_session_events: true,

    log_intake: false,
    log_map_updates: false,
    log_backend: false,
    log_performance: false,
};
