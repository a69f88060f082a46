mod error;
mod exporter;
mod intake;
mod pipeline;
mod predictor;
mod validator;

pub use {
    error::{PipelineError, PredictionError, ValidationError},
    exporter::{export_file_name, render_csv},
    intake::{FileSource, UploadedFile, file_stem, sample_trip},
    pipeline::{SessionEvent, run_session, spawn_session},
    predictor::{HttpPredictionBackend, PredictionBackend, normalize_records, resolve_response},
    validator::validate_upload,
};

#[cfg(not(target_arch = "wasm32"))]
pub use exporter::write_csv_file;
