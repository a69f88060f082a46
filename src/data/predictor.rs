//! Prediction service client. The service is a black box reached over one
//! POST: the whole CSV goes up base64-wrapped in JSON, and whatever comes
//! back is normalized into [`PredictionRecord`]s joined to the submitted
//! rows by position.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use {
    crate::{
        config::{DF, PREDICTION_API, constants::REQUIRED_COLUMNS},
        data::{error::PredictionError, intake::UploadedFile},
        domain::{PredictionLabel, PredictionRecord, TelemetryPoint},
    },
    async_trait::async_trait,
    base64::{Engine as _, engine::general_purpose::STANDARD},
    serde::Serialize,
    serde_json::Value,
};

/// Wire envelope the service expects. The field casing is part of its
/// contract, hence the rename.
#[derive(Debug, Serialize)]
struct PredictionEnvelope {
    #[serde(rename = "isBase64Encoded")]
    is_base64_encoded: bool,
    body: String,
}

impl PredictionEnvelope {
    fn wrap(file: &UploadedFile) -> Self {
        Self {
            is_base64_encoded: true,
            body: STANDARD.encode(&file.bytes),
        }
    }
}

/// Seam between the pipeline and the network. Sessions drive whatever
/// implementation they are handed, which keeps the pipeline testable
/// without a live endpoint.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PredictionBackend {
    /// Submit a validated file and return the raw prediction records.
    async fn submit(&self, file: &UploadedFile) -> Result<Vec<Value>, PredictionError>;
}

pub struct HttpPredictionBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpPredictionBackend {
    pub fn new(url: impl Into<String>) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(PREDICTION_API.timeout_secs))
            .build()
            .unwrap_or_default();
        // The browser's fetch governs its own timeouts.
        #[cfg(target_arch = "wasm32")]
        let client = reqwest::Client::new();
        Self {
            client,
            url: url.into(),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PredictionBackend for HttpPredictionBackend {
    async fn submit(&self, file: &UploadedFile) -> Result<Vec<Value>, PredictionError> {
        let envelope = PredictionEnvelope::wrap(file);
        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&envelope)
            .send()
            .await
            .map_err(|e| PredictionError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| PredictionError::Request(e.to_string()))?;
        if DF.log_backend {
            log::info!(
                "prediction service answered HTTP {} with {} body bytes",
                status,
                body.len()
            );
        }
        resolve_response(status, &body)
    }
}

/// Interpret a raw service answer. Accepted layouts: a bare JSON array of
/// records, or an object wrapping the array under `predictions`. A 2xx
/// object carrying a string `error` field is a model-side failure.
pub fn resolve_response(status: u16, body: &[u8]) -> Result<Vec<Value>, PredictionError> {
    if !(200..300).contains(&status) {
        return Err(PredictionError::Transport { status });
    }
    let value: Value =
        serde_json::from_slice(body).map_err(|_| PredictionError::UnexpectedShape)?;
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => {
            if let Some(Value::String(message)) = map.get(PREDICTION_API.error_field) {
                return Err(PredictionError::Backend(message.clone()));
            }
            match map.remove(PREDICTION_API.wrapped_records_field) {
                Some(Value::Array(records)) => Ok(records),
                _ => Err(PredictionError::UnexpectedShape),
            }
        }
        _ => Err(PredictionError::UnexpectedShape),
    }
}

fn field_f64(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn field_string(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pull the label out of a record, trying the string field first and the
/// numeric field second. Anything unrecognized folds to `Other`.
fn extract_label(value: &Value) -> PredictionLabel {
    let field = value
        .get(PREDICTION_API.label_field_str)
        .or_else(|| value.get(PREDICTION_API.label_field_num));
    match field {
        Some(Value::String(s)) => PredictionLabel::from_text(s),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                PredictionLabel::from_numeric(i)
            } else if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0) {
                PredictionLabel::from_numeric(f as i64)
            } else {
                PredictionLabel::Other(n.to_string())
            }
        }
        Some(Value::Bool(b)) => PredictionLabel::from_numeric(i64::from(*b)),
        _ => PredictionLabel::Other("unknown".to_string()),
    }
}

/// Join raw service records to the submitted rows by position. A record's
/// own fields win; whatever it omits is taken from the input row at the
/// same index. Records with no coordinates on either side are dropped.
pub fn normalize_records(raw: Vec<Value>, submitted: &[TelemetryPoint]) -> Vec<PredictionRecord> {
    if raw.len() != submitted.len() {
        log::warn!(
            "service returned {} records for {} submitted rows; joining by position anyway",
            raw.len(),
            submitted.len()
        );
    }
    let label_fields = [PREDICTION_API.label_field_str, PREDICTION_API.label_field_num];
    let mut records = Vec::with_capacity(raw.len());
    for (i, value) in raw.into_iter().enumerate() {
        let source = submitted.get(i);
        let lon = field_f64(&value, "lon").or_else(|| source.map(|p| p.lon));
        let lat = field_f64(&value, "lat").or_else(|| source.map(|p| p.lat));
        let (Some(lon), Some(lat)) = (lon, lat) else {
            log::warn!("record {i} carries no coordinates and matches no input row; dropped");
            continue;
        };
        let timestamp = field_string(&value, "timestamp")
            .or_else(|| source.map(|p| p.timestamp.clone()))
            .unwrap_or_default();
        let speed_kmh = field_f64(&value, "speed_kmh")
            .or_else(|| source.map(|p| p.speed_kmh))
            .unwrap_or_default();
        let label = extract_label(&value);

        // Extra response fields ride along for the table and the export.
        // serde_json object keys iterate sorted, so the order is stable.
        let mut extras: Vec<(String, String)> = Vec::new();
        if let Value::Object(map) = &value {
            extras = map
                .iter()
                .filter(|(key, _)| {
                    !REQUIRED_COLUMNS.contains(&key.as_str())
                        && !label_fields.contains(&key.as_str())
                })
                .map(|(key, field)| (key.clone(), stringify(field)))
                .collect();
        }
        if extras.is_empty() {
            if let Some(point) = source {
                extras = point.extras.clone();
            }
        }

        records.push(PredictionRecord {
            lon,
            lat,
            timestamp,
            speed_kmh,
            label,
            extras,
        });
    }
    records
}
