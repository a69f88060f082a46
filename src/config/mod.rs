//! Configuration module for the park-scout application.

// Can all be private now because we have a public re-export.
mod debug;
mod endpoint;
mod map;
mod persistence;

// Public
pub mod constants;

// Re-export commonly used items
pub use constants::LOG_PERFORMANCE;
pub use debug::DF;
pub use endpoint::{PREDICTION_API, PredictionApiConfig};
pub use map::MAP_CONFIG;
pub use persistence::PERSISTENCE;
