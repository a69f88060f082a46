//! Session pipeline: one attempt = load, validate, submit, normalize. Each
//! stage reports through a channel the UI thread pumps once per frame.

use std::sync::mpsc::Sender;

use crate::{
    config::DF,
    data::{
        error::PipelineError,
        intake::{FileSource, load_source},
        predictor::{HttpPredictionBackend, PredictionBackend, normalize_records},
        validator::validate_upload,
    },
    domain::{PredictionRecord, TelemetrySummary},
};

/// Progress reports from a running attempt. Every event carries the attempt
/// id so the UI can drop reports from a superseded upload.
#[derive(Debug)]
pub enum SessionEvent {
    Validated {
        attempt: u64,
        summary: TelemetrySummary,
    },
    Completed {
        attempt: u64,
        records: Vec<PredictionRecord>,
    },
    Failed {
        attempt: u64,
        error: PipelineError,
    },
}

/// Drive one attempt end to end against the given backend. Send errors are
/// ignored on purpose: a dropped receiver means the attempt was abandoned.
pub async fn run_session<B: PredictionBackend>(
    source: FileSource,
    backend: &B,
    attempt: u64,
    tx: &Sender<SessionEvent>,
) {
    if DF.log_session_events {
        log::info!("attempt {attempt}: loading {}", source.label());
    }
    let file = match load_source(source).await {
        Ok(file) => file,
        Err(error) => return report_failure(attempt, error, tx),
    };
    let validated = crate::trace_time!("validate_upload", 100_000, { validate_upload(&file) });
    let upload = match validated {
        Ok(upload) => upload,
        Err(error) => return report_failure(attempt, error.into(), tx),
    };
    if DF.log_session_events {
        log::info!(
            "attempt {attempt}: {} rows validated, submitting {}",
            upload.summary.row_count,
            upload.summary.file_name
        );
    }
    let _ = tx.send(SessionEvent::Validated {
        attempt,
        summary: upload.summary.clone(),
    });

    match backend.submit(&file).await {
        Ok(raw) => {
            let records = normalize_records(raw, &upload.points);
            if DF.log_session_events {
                log::info!("attempt {attempt}: {} predictions received", records.len());
            }
            let _ = tx.send(SessionEvent::Completed { attempt, records });
        }
        Err(error) => report_failure(attempt, error.into(), tx),
    }
}

fn report_failure(attempt: u64, error: PipelineError, tx: &Sender<SessionEvent>) {
    if DF.log_session_events {
        log::warn!("attempt {attempt} failed: {error}");
    }
    let _ = tx.send(SessionEvent::Failed { attempt, error });
}

/// Launch an attempt off the UI thread. Native gets its own thread with a
/// private runtime; the web build rides the browser event loop.
pub fn spawn_session(source: FileSource, endpoint: String, attempt: u64, tx: Sender<SessionEvent>) {
    #[cfg(not(target_arch = "wasm32"))]
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");
        runtime.block_on(async move {
            let backend = HttpPredictionBackend::new(endpoint);
            run_session(source, &backend, attempt, &tx).await;
        });
    });
    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(async move {
        let backend = HttpPredictionBackend::new(endpoint);
        run_session(source, &backend, attempt, &tx).await;
    });
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::data::{error::PredictionError, intake::UploadedFile};
    use std::sync::mpsc;

    struct ExplodingBackend;

    #[async_trait::async_trait]
    impl PredictionBackend for ExplodingBackend {
        async fn submit(
            &self,
            _file: &UploadedFile,
        ) -> Result<Vec<serde_json::Value>, PredictionError> {
            panic!("backend must not be reached for an invalid file");
        }
    }

    #[tokio::test]
    async fn test_invalid_file_never_reaches_the_backend() {
        let (tx, rx) = mpsc::channel();
        let source = FileSource::Memory(UploadedFile::new("notes.txt", b"hello".to_vec()));
        run_session(source, &ExplodingBackend, 1, &tx).await;
        match rx.try_recv().unwrap() {
            SessionEvent::Failed { attempt, error } => {
                assert_eq!(attempt, 1);
                assert_eq!(error.to_string(), "Uploaded file is not a CSV file.");
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(rx.try_recv().is_err(), "a failed attempt sends one event only");
    }
}
