/// Integration tests for the upload session pipeline
///
/// Run with: cargo test --test pipeline -- --nocapture

use std::sync::mpsc;

use serde_json::{Value, json};

use park_scout::data::{
    FileSource, PredictionBackend, PredictionError, SessionEvent, UploadedFile, export_file_name,
    render_csv, run_session,
};
use park_scout::domain::{BoundingBox, PredictionLabel, PredictionRecord};

const TRIP_CSV: &str = "\
lon,lat,timestamp,speed_kmh,heading
8.6821,50.1109,2025-06-14 09:30:00,32.5,80
8.6830,50.1113,2025-06-14 09:30:15,18.0,82
8.6842,50.1118,2025-06-14 09:30:30,6.5,85
";

struct CannedBackend {
    result: Result<Vec<Value>, PredictionError>,
}

#[async_trait::async_trait]
impl PredictionBackend for CannedBackend {
    async fn submit(&self, _file: &UploadedFile) -> Result<Vec<Value>, PredictionError> {
        self.result.clone()
    }
}

fn trip_source() -> FileSource {
    FileSource::Memory(UploadedFile::new("trip.csv", TRIP_CSV.as_bytes().to_vec()))
}

async fn complete_session(backend: CannedBackend) -> Vec<SessionEvent> {
    let (tx, rx) = mpsc::channel();
    run_session(trip_source(), &backend, 1, &tx).await;
    drop(tx);
    rx.into_iter().collect()
}

#[tokio::test]
async fn test_full_session_happy_path() {
    println!("\n=== Test: Full Session Happy Path ===");

    let backend = CannedBackend {
        result: Ok(vec![
            json!({"y_hat_label": 0}),
            json!({"y_hat_label": 1}),
            json!({"y_hat_label": "searching", "confidence": 0.91}),
        ]),
    };

    let events = complete_session(backend).await;
    assert_eq!(events.len(), 2, "expected a validation report then results");

    let SessionEvent::Validated { attempt, summary } = &events[0] else {
        panic!("first event should be Validated, got {:?}", events[0]);
    };
    assert_eq!(*attempt, 1);
    assert_eq!(summary.file_name, "trip.csv");
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.span_ms, Some(30_000));
    assert_eq!(summary.median_interval_ms, Some(15_000.0));
    assert!(summary.warnings.is_empty(), "a clean trip raises no warnings");
    println!("✓ Validation summary: {} rows over 30 s", summary.row_count);

    let SessionEvent::Completed { records, .. } = &events[1] else {
        panic!("second event should be Completed, got {:?}", events[1]);
    };
    assert_eq!(records.len(), 3);

    // Labels fold onto the shared palette, row order preserved.
    assert_eq!(records[0].label, PredictionLabel::Normal);
    assert_eq!(records[1].label, PredictionLabel::Searching);
    assert_eq!(records[2].label, PredictionLabel::Searching);
    assert!(records[0].lon < records[1].lon && records[1].lon < records[2].lon);

    // Extra columns survive; response-side extras win when present.
    assert_eq!(records[0].extra("heading"), Some("80"));
    assert_eq!(records[2].extra("confidence"), Some("0.91"));

    // Every prediction lands inside the box the route spans.
    let coords: Vec<[f64; 2]> = records.iter().map(PredictionRecord::coords).collect();
    let bbox = BoundingBox::from_coords(coords.iter())
        .expect("route with points has a bounding box");
    for record in records {
        assert!(bbox.contains(record.lon, record.lat));
    }
    println!("✓ {} predictions mapped and in bounds", records.len());
}

#[tokio::test]
async fn test_backend_error_reaches_the_ui_verbatim() {
    println!("\n=== Test: Backend Error Propagation ===");

    let backend = CannedBackend {
        result: Err(PredictionError::Backend("model unavailable".to_string())),
    };

    let events = complete_session(backend).await;
    assert_eq!(events.len(), 2, "validation succeeds before the upload fails");
    assert!(matches!(&events[0], SessionEvent::Validated { .. }));

    let SessionEvent::Failed { attempt, error } = &events[1] else {
        panic!("second event should be Failed, got {:?}", events[1]);
    };
    assert_eq!(*attempt, 1);
    assert_eq!(error.to_string(), "Backend error: model unavailable");
    println!("✓ Failure message: {}", error);
}

#[tokio::test]
async fn test_short_response_yields_fewer_predictions() {
    println!("\n=== Test: Short Response ===");

    let backend = CannedBackend {
        result: Ok(vec![json!({"y_hat_label": 1}), json!({"y_hat_label": 0})]),
    };

    let events = complete_session(backend).await;
    let SessionEvent::Completed { records, .. } = &events[1] else {
        panic!("expected Completed, got {:?}", events[1]);
    };

    // Two answers for three rows: the pairing is positional, so the third
    // row simply has no prediction.
    assert_eq!(records.len(), 2);
    assert!(records[0].label.is_searching());
    assert!((records[0].lon - 8.6821).abs() < 1e-9);
    assert!((records[1].lon - 8.6830).abs() < 1e-9);
    println!("✓ Kept {} of 3 rows", records.len());
}

#[tokio::test]
async fn test_results_export_round_trip() {
    println!("\n=== Test: Results Export ===");

    let backend = CannedBackend {
        result: Ok(vec![
            json!({"y_hat_label": 1}),
            json!({"y_hat_label": 0}),
            json!({"y_hat_label": 0}),
        ]),
    };

    let events = complete_session(backend).await;
    let SessionEvent::Completed { records, .. } = &events[1] else {
        panic!("expected Completed, got {:?}", events[1]);
    };

    let text = render_csv(records).expect("non-empty results render");
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().expect("export has a header row").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["lon", "lat", "timestamp", "speed_kmh", "label", "heading"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][4], "searching");
    assert_eq!(&rows[1][4], "normal");
    assert_eq!(&rows[0][5], "80", "extra columns ride along");

    assert_eq!(export_file_name("trip"), "trip_predictions.csv");
    println!("✓ Export round-trips through a CSV reader");
}
