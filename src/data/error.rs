use thiserror::Error;

use crate::config::constants::{MAX_FILE_SIZE_MB, MAX_ROW_COUNT};

/// Local rejection reasons, checked in this order before any network call.
/// Display strings double as the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Uploaded file is not a CSV file.")]
    NotCsv,
    #[error("File size exceeds {MAX_FILE_SIZE_MB} MB.")]
    TooLarge,
    #[error("Parsing error: {0}")]
    Parse(String),
    #[error("Missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },
    #[error("Too many rows ({count}). Max allowed: {MAX_ROW_COUNT}.")]
    TooManyRows { count: usize },
    #[error("Invalid coordinate or speed values in {0} rows.")]
    InvalidValues(usize),
}

/// Failures past the validation gate: transport, service, or shape trouble.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// The service answered with a non-success status code.
    #[error("Upload failed: HTTP error! {status}")]
    Transport { status: u16 },
    /// The request never produced a status (DNS, refused, timeout).
    #[error("Upload failed: {0}")]
    Request(String),
    /// The service answered 2xx but reported a model-side error.
    #[error("Backend error: {0}")]
    Backend(String),
    /// The body was not JSON, or JSON in none of the known layouts.
    #[error("Upload failed: the service answered in an unexpected shape.")]
    UnexpectedShape,
}

/// Whatever ended a session attempt. All variants are terminal: the session
/// lands in its error state and only an explicit reset leaves it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    #[error("Upload failed: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_upload_box_wording() {
        assert_eq!(
            ValidationError::NotCsv.to_string(),
            "Uploaded file is not a CSV file."
        );
        assert_eq!(
            ValidationError::TooLarge.to_string(),
            "File size exceeds 10 MB."
        );
        assert_eq!(
            ValidationError::MissingColumns {
                missing: vec!["lat".to_string(), "speed_kmh".to_string()]
            }
            .to_string(),
            "Missing required columns: lat, speed_kmh"
        );
        assert_eq!(
            ValidationError::TooManyRows { count: 10_433 }.to_string(),
            "Too many rows (10433). Max allowed: 10000."
        );
        assert_eq!(
            ValidationError::InvalidValues(7).to_string(),
            "Invalid coordinate or speed values in 7 rows."
        );
    }

    #[test]
    fn test_prediction_messages() {
        assert_eq!(
            PredictionError::Transport { status: 502 }.to_string(),
            "Upload failed: HTTP error! 502"
        );
        assert_eq!(
            PredictionError::Backend("model unavailable".to_string()).to_string(),
            "Backend error: model unavailable"
        );
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: PipelineError = ValidationError::NotCsv.into();
        assert_eq!(err.to_string(), "Uploaded file is not a CSV file.");

        let err: PipelineError = PredictionError::UnexpectedShape.into();
        assert_eq!(
            err.to_string(),
            "Upload failed: the service answered in an unexpected shape."
        );
    }
}
