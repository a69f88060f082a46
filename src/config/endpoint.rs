pub struct PredictionApiConfig {
    pub url: &'static str,
    /// Request timeout applied on native builds. The browser governs its own timeouts.
    pub timeout_secs: u64,
    /// Field holding the record list when the service wraps its answer in an object.
    pub wrapped_records_field: &'static str,
    pub error_field: &'static str,
    pub label_field_str: &'static str,
    pub label_field_num: &'static str,
}

pub const PREDICTION_API: PredictionApiConfig = PredictionApiConfig {
    url: "https://d3ezhigaqa.execute-api.eu-central-1.amazonaws.com/prod/predict",
    timeout_secs: 60,
    wrapped_records_field: "predictions",
    error_field: "error",
    label_field_str: "y_hat_label",
    label_field_num: "y_hat_labels",
};
