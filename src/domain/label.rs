use {
    serde::{Deserialize, Serialize},
    strum_macros::Display,
};

/// Canonical classification of a telemetry point.
///
/// The prediction service answers either with the string field `y_hat_label`
/// or the numeric field `y_hat_labels`. Both collapse into this enum exactly
/// once, at the transport boundary. Everything downstream (map colors, CSV
/// export, the results table) works with the canonical form only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PredictionLabel {
    Searching,
    Normal,
    /// A label the service invented that we pass through verbatim (lowercased).
    #[strum(to_string = "{0}")]
    Other(String),
}

impl PredictionLabel {
    /// Fold a string label. Case folds so "SEARCHING" and "searching" agree.
    pub fn from_text(raw: &str) -> Self {
        let folded = raw.trim().to_lowercase();
        match folded.as_str() {
            "searching" => Self::Searching,
            "normal" => Self::Normal,
            _ => Self::Other(folded),
        }
    }

    /// Fold a numeric label: 1 means searching, 0 means normal.
    pub fn from_numeric(value: i64) -> Self {
        match value {
            1 => Self::Searching,
            0 => Self::Normal,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, Self::Searching)
    }
}
