// Domain types and value objects
mod geo;
mod label;
mod telemetry;

// Re-export commonly used types
pub use geo::BoundingBox;
pub use label::PredictionLabel;
pub use telemetry::{PredictionRecord, TelemetryPoint, TelemetrySummary, ValidatedUpload};
