//! CSV validation gate. Every check here runs locally, in a fixed order, so
//! a rejected file never costs a network round trip. Rows that survive are
//! normalized into [`TelemetryPoint`]s with any extra columns carried along.

use {
    crate::{
        config::constants::{
            LAT_RANGE, LON_RANGE, MAX_FILE_SIZE_BYTES, MAX_ROW_COUNT, REQUIRED_COLUMNS, advisory,
        },
        data::{error::ValidationError, intake::UploadedFile},
        domain::{TelemetryPoint, TelemetrySummary, ValidatedUpload},
        utils::{format_duration, parse_timestamp_ms},
    },
    csv::{ReaderBuilder, StringRecord, Trim},
    statrs::statistics::{Data, OrderStatistics},
};

/// Where each required column sits in the header, plus the extra columns in
/// their original order.
struct ColumnMap {
    lon: usize,
    lat: usize,
    timestamp: usize,
    speed: usize,
    extras: Vec<(usize, String)>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self, ValidationError> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingColumns { missing });
        }
        let require = |name: &str| {
            position(name).ok_or_else(|| ValidationError::MissingColumns {
                missing: vec![name.to_string()],
            })
        };
        Ok(Self {
            lon: require("lon")?,
            lat: require("lat")?,
            timestamp: require("timestamp")?,
            speed: require("speed_kmh")?,
            extras: headers
                .iter()
                .enumerate()
                .filter(|(_, name)| !REQUIRED_COLUMNS.contains(name))
                .map(|(idx, name)| (idx, name.to_string()))
                .collect(),
        })
    }
}

/// Strict numeric field parse. NaN and infinities never pass, so the range
/// checks below cannot be skated past with "NaN" in a cell.
fn numeric_field(record: &StringRecord, idx: usize) -> Option<f64> {
    let value: f64 = record.get(idx)?.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Run the full check sequence against an uploaded file.
///
/// Checks apply in order: extension, size, parse, header, row cap, values.
/// The first failure wins; a file missing two columns with bad values in
/// half its rows reports the missing columns.
pub fn validate_upload(file: &UploadedFile) -> Result<ValidatedUpload, ValidationError> {
    if !file.name.to_lowercase().ends_with(".csv") {
        return Err(ValidationError::NotCsv);
    }
    if file.bytes.len() > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::TooLarge);
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file.bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| ValidationError::Parse(e.to_string()))?
        .clone();
    let columns = ColumnMap::resolve(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record.map_err(|e| ValidationError::Parse(e.to_string()))?);
    }
    if rows.len() > MAX_ROW_COUNT {
        return Err(ValidationError::TooManyRows { count: rows.len() });
    }

    let mut invalid_rows = 0usize;
    let mut points = Vec::with_capacity(rows.len());
    for record in &rows {
        let lon = numeric_field(record, columns.lon)
            .filter(|v| (LON_RANGE.0..=LON_RANGE.1).contains(v));
        let lat = numeric_field(record, columns.lat)
            .filter(|v| (LAT_RANGE.0..=LAT_RANGE.1).contains(v));
        let speed = numeric_field(record, columns.speed).filter(|v| *v >= 0.0);
        match (lon, lat, speed) {
            (Some(lon), Some(lat), Some(speed_kmh)) => points.push(TelemetryPoint {
                lon,
                lat,
                timestamp: record.get(columns.timestamp).unwrap_or_default().to_string(),
                speed_kmh,
                extras: columns
                    .extras
                    .iter()
                    .map(|(idx, name)| {
                        (name.clone(), record.get(*idx).unwrap_or_default().to_string())
                    })
                    .collect(),
            }),
            _ => invalid_rows += 1,
        }
    }
    if invalid_rows > 0 {
        return Err(ValidationError::InvalidValues(invalid_rows));
    }

    let summary = summarize(file, &points);
    Ok(ValidatedUpload { points, summary })
}

/// Advisory statistics over the accepted rows. Nothing here rejects the
/// upload; constraint misses surface as warnings on the summary card.
fn summarize(file: &UploadedFile, points: &[TelemetryPoint]) -> TelemetrySummary {
    let mut stamps: Vec<i64> = points
        .iter()
        .filter_map(|p| parse_timestamp_ms(&p.timestamp))
        .collect();
    let unparsed_timestamps = points.len() - stamps.len();
    stamps.sort_unstable();

    let span_ms = match (stamps.first(), stamps.last()) {
        (Some(first), Some(last)) if stamps.len() > 1 => Some(last - first),
        _ => None,
    };
    let intervals: Vec<f64> = stamps.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    let median_interval_ms = if intervals.is_empty() {
        None
    } else {
        let mut data = Data::new(intervals);
        Some(data.median())
    };

    let mut warnings = Vec::new();
    if let Some(span) = span_ms {
        if span > advisory::MAX_SPAN_DAYS * 24 * 60 * 60 * 1000 {
            warnings.push(format!(
                "Data spans {}, expected at most {} days.",
                format_duration(span),
                advisory::MAX_SPAN_DAYS
            ));
        }
    }
    if let Some(median) = median_interval_ms {
        if median >= advisory::MAX_MEDIAN_INTERVAL_SECS * 1000.0 {
            warnings.push(format!(
                "Median sample interval is {:.1} s, expected under {} s.",
                median / 1000.0,
                advisory::MAX_MEDIAN_INTERVAL_SECS
            ));
        }
    }
    if unparsed_timestamps > 0 {
        warnings.push(format!(
            "{unparsed_timestamps} timestamps could not be parsed; interval statistics ignore those rows."
        ));
    }

    TelemetrySummary {
        file_name: file.name.clone(),
        file_size_bytes: file.bytes.len(),
        row_count: points.len(),
        span_ms,
        median_interval_ms,
        unparsed_timestamps,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, text: &str) -> UploadedFile {
        UploadedFile::new(name, text.as_bytes().to_vec())
    }

    const GOOD: &str = "\
lon,lat,timestamp,speed_kmh,heading
8.6821,50.1109,2025-06-14 09:30:00,31.5,80
8.6840,50.1115,2025-06-14 09:30:15,28.0,85
8.6858,50.1121,2025-06-14 09:30:30,24.5,90
";

    #[test]
    fn test_valid_file_passes_with_extras() {
        let upload = validate_upload(&file("trip.csv", GOOD)).unwrap();
        assert_eq!(upload.points.len(), 3);
        assert_eq!(upload.summary.row_count, 3);
        assert_eq!(upload.points[0].lon, 8.6821);
        assert_eq!(upload.points[0].extras, vec![("heading".to_string(), "80".to_string())]);
        assert_eq!(upload.summary.median_interval_ms, Some(15_000.0));
        assert_eq!(upload.summary.span_ms, Some(30_000));
        assert!(upload.summary.warnings.is_empty());
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(validate_upload(&file("TRIP.CSV", GOOD)).is_ok());
        assert_eq!(
            validate_upload(&file("trip.txt", GOOD)),
            Err(ValidationError::NotCsv)
        );
    }

    #[test]
    fn test_oversized_file_rejected_before_parsing() {
        let big = UploadedFile::new("big.csv", vec![b'x'; MAX_FILE_SIZE_BYTES + 1]);
        assert_eq!(validate_upload(&big), Err(ValidationError::TooLarge));
    }

    #[test]
    fn test_missing_columns_listed_in_declared_order() {
        let result = validate_upload(&file("trip.csv", "lat,heading\n50.1,80\n"));
        assert_eq!(
            result,
            Err(ValidationError::MissingColumns {
                missing: vec![
                    "lon".to_string(),
                    "timestamp".to_string(),
                    "speed_kmh".to_string(),
                ]
            })
        );
    }

    #[test]
    fn test_empty_file_reports_all_columns_missing() {
        let result = validate_upload(&file("empty.csv", ""));
        assert_eq!(
            result,
            Err(ValidationError::MissingColumns {
                missing: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()
            })
        );
    }

    #[test]
    fn test_header_only_file_yields_zero_rows() {
        let upload = validate_upload(&file("trip.csv", "lon,lat,timestamp,speed_kmh\n")).unwrap();
        assert!(upload.points.is_empty());
        assert_eq!(upload.summary.row_count, 0);
        assert_eq!(upload.summary.span_ms, None);
        assert_eq!(upload.summary.median_interval_ms, None);
    }

    #[test]
    fn test_row_cap_enforced() {
        let mut text = String::from("lon,lat,timestamp,speed_kmh\n");
        for i in 0..(MAX_ROW_COUNT + 1) {
            text.push_str(&format!("8.68,50.11,2025-06-14 09:30:{:02},{}\n", i % 60, 20));
        }
        assert_eq!(
            validate_upload(&file("trip.csv", &text)),
            Err(ValidationError::TooManyRows {
                count: MAX_ROW_COUNT + 1
            })
        );
    }

    #[test]
    fn test_invalid_rows_counted_once_each() {
        // Row 2 has two bad fields but still counts as a single bad row.
        let text = "\
lon,lat,timestamp,speed_kmh
8.68,50.11,2025-06-14 09:30:00,20
200.0,95.0,2025-06-14 09:30:15,20
8.68,50.11,2025-06-14 09:30:30,-4
8.68,50.11,2025-06-14 09:30:45,NaN
8.68,abc,2025-06-14 09:31:00,20
";
        assert_eq!(
            validate_upload(&file("trip.csv", text)),
            Err(ValidationError::InvalidValues(4))
        );
    }

    #[test]
    fn test_short_rows_count_as_invalid() {
        let text = "lon,lat,timestamp,speed_kmh\n8.68,50.11\n8.68,50.11,2025-06-14 09:30:00,20\n";
        assert_eq!(
            validate_upload(&file("trip.csv", text)),
            Err(ValidationError::InvalidValues(1))
        );
    }

    #[test]
    fn test_quoted_fields_and_whitespace_survive() {
        let text = "lon, lat, timestamp, speed_kmh, note\n 8.68 ,50.11,2025-06-14 09:30:00, 20 ,\"stop, then go\"\n";
        let upload = validate_upload(&file("trip.csv", text)).unwrap();
        assert_eq!(upload.points[0].speed_kmh, 20.0);
        assert_eq!(
            upload.points[0].extras,
            vec![("note".to_string(), "stop, then go".to_string())]
        );
    }

    #[test]
    fn test_slow_sampling_warns_but_passes() {
        let text = "\
lon,lat,timestamp,speed_kmh
8.68,50.11,2025-06-14 09:30:00,20
8.68,50.11,2025-06-14 09:30:25,20
8.68,50.11,2025-06-14 09:30:50,20
";
        let upload = validate_upload(&file("trip.csv", text)).unwrap();
        assert_eq!(upload.summary.median_interval_ms, Some(25_000.0));
        assert!(
            upload.summary.warnings.iter().any(|w| w.contains("Median sample interval")),
            "expected an interval warning, got {:?}",
            upload.summary.warnings
        );
    }

    #[test]
    fn test_long_span_warns_but_passes() {
        let text = "\
lon,lat,timestamp,speed_kmh
8.68,50.11,2025-05-01 09:30:00,20
8.68,50.11,2025-06-14 09:30:00,20
";
        let upload = validate_upload(&file("trip.csv", text)).unwrap();
        assert!(
            upload.summary.warnings.iter().any(|w| w.contains("Data spans")),
            "expected a span warning, got {:?}",
            upload.summary.warnings
        );
    }

    #[test]
    fn test_unparsed_timestamps_only_warn() {
        let text = "\
lon,lat,timestamp,speed_kmh
8.68,50.11,yesterday,20
8.68,50.11,2025-06-14 09:30:15,20
";
        let upload = validate_upload(&file("trip.csv", text)).unwrap();
        assert_eq!(upload.points.len(), 2);
        assert_eq!(upload.summary.unparsed_timestamps, 1);
        assert_eq!(upload.summary.span_ms, None);
        assert!(upload.summary.warnings.iter().any(|w| w.contains("could not be parsed")));
    }
}
