//! Prediction export. Renders the labeled records back into CSV text for
//! the clipboard on every target and for a file next to the binary on
//! native.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use {
    crate::domain::PredictionRecord,
    anyhow::Context,
    csv::{QuoteStyle, WriterBuilder},
};

/// Render records as CSV text, non-numeric fields quoted. The extra-column
/// layout follows the first record; later records fill blanks for keys they
/// lack. Returns `None` when there is nothing to export.
pub fn render_csv(records: &[PredictionRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }
    match try_render(records) {
        Ok(text) => Some(text),
        Err(err) => {
            log::error!("CSV export failed: {err:#}");
            None
        }
    }
}

fn try_render(records: &[PredictionRecord]) -> anyhow::Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    let extra_keys: Vec<String> = records[0].extras.iter().map(|(key, _)| key.clone()).collect();
    let mut header = vec!["lon", "lat", "timestamp", "speed_kmh", "label"];
    header.extend(extra_keys.iter().map(String::as_str));
    writer.write_record(&header).context("writing export header")?;

    for record in records {
        let mut row = vec![
            record.lon.to_string(),
            record.lat.to_string(),
            record.timestamp.clone(),
            record.speed_kmh.to_string(),
            record.label.to_string(),
        ];
        for key in &extra_keys {
            row.push(record.extra(key).unwrap_or_default().to_string());
        }
        writer.write_record(&row).context("writing export row")?;
    }

    let bytes = writer.into_inner().context("flushing export buffer")?;
    String::from_utf8(bytes).context("export text was not UTF-8")
}

pub fn export_file_name(input_stem: &str) -> String {
    format!("{input_stem}_predictions.csv")
}

/// Write the rendered CSV into the working directory and hand back the
/// path for the status notice.
#[cfg(not(target_arch = "wasm32"))]
pub fn write_csv_file(input_stem: &str, text: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(export_file_name(input_stem));
    std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionLabel;

    fn record(
        lon: f64,
        label: PredictionLabel,
        extras: Vec<(&str, &str)>,
    ) -> PredictionRecord {
        PredictionRecord {
            lon,
            lat: 50.11,
            timestamp: "2025-06-14 09:30:00".to_string(),
            speed_kmh: 31.5,
            label,
            extras: extras
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_empty_records_offer_nothing() {
        assert_eq!(render_csv(&[]), None);
    }

    #[test]
    fn test_rendered_text_quotes_non_numeric_fields() {
        let records = [record(8.6821, PredictionLabel::Normal, vec![("heading", "80")])];
        let text = render_csv(&records).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            r#""lon","lat","timestamp","speed_kmh","label","heading""#
        );
        assert_eq!(
            lines.next().unwrap(),
            r#"8.6821,50.11,"2025-06-14 09:30:00",31.5,"normal",80"#
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_embedded_quotes_and_commas_round_trip() {
        let records = [record(
            8.68,
            PredictionLabel::Searching,
            vec![("note", r#"stop, then "go""#)],
        )];
        let text = render_csv(&records).unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.get(5), Some(r#"stop, then "go""#));
    }

    #[test]
    fn test_extra_layout_follows_first_record() {
        let records = [
            record(8.68, PredictionLabel::Normal, vec![("heading", "80"), ("note", "a")]),
            record(8.69, PredictionLabel::Searching, vec![("note", "b")]),
        ];
        let text = render_csv(&records).unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["lon", "lat", "timestamp", "speed_kmh", "label", "heading", "note"]
        );
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        // Second record has no heading; the slot stays blank.
        assert_eq!(rows[1].get(5), Some(""));
        assert_eq!(rows[1].get(6), Some("b"));
    }

    #[test]
    fn test_export_file_name_appends_suffix() {
        assert_eq!(export_file_name("trip.v2"), "trip.v2_predictions.csv");
    }
}
