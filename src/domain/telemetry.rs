use serde::{Deserialize, Serialize};

use crate::domain::PredictionLabel;

/// One validated row of the uploaded track.
///
/// `timestamp` is carried verbatim: the service and the export both want the
/// original text, and only the advisory statistics ever try to parse it.
/// `extras` holds the passthrough columns in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryPoint {
    pub lon: f64,
    pub lat: f64,
    pub timestamp: String,
    pub speed_kmh: f64,
    pub extras: Vec<(String, String)>,
}

impl TelemetryPoint {
    pub fn coords(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// What the validator hands to the rest of the pipeline on success.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedUpload {
    pub points: Vec<TelemetryPoint>,
    pub summary: TelemetrySummary,
}

/// Advisory statistics over the validated upload.
///
/// None of these fail a file. Spans and intervals are computed over the
/// timestamps that parsed, the rest are counted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySummary {
    pub file_name: String,
    pub file_size_bytes: usize,
    pub row_count: usize,
    pub span_ms: Option<i64>,
    pub median_interval_ms: Option<f64>,
    pub unparsed_timestamps: usize,
    pub warnings: Vec<String>,
}

impl TelemetrySummary {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A classified point as rendered, exported, and listed in the results table.
///
/// One per record the service returned, positionally matching the submitted
/// rows. Built only by response normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub lon: f64,
    pub lat: f64,
    pub timestamp: String,
    pub speed_kmh: f64,
    pub label: PredictionLabel,
    pub extras: Vec<(String, String)>,
}

impl PredictionRecord {
    pub fn coords(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_lookup() {
        let record = PredictionRecord {
            lon: 8.68,
            lat: 50.11,
            timestamp: "2024-05-01 12:00:00".to_string(),
            speed_kmh: 23.0,
            label: PredictionLabel::Normal,
            extras: vec![("heading".to_string(), "184".to_string())],
        };

        assert_eq!(record.extra("heading"), Some("184"));
        assert_eq!(record.extra("altitude"), None);
    }
}
