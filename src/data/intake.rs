//! Upload intake: the raw bytes handed to a session attempt, wherever they
//! came from (drag and drop, the bundled sample, or a path on native).

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use crate::{
    config::{DF, constants::MAX_FILE_SIZE_BYTES},
    data::error::PipelineError,
};

/// A file as the pipeline sees it. The name is kept because the extension
/// check and the export file name both derive from it.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// File stem without the extension, used for the export file name.
    pub fn stem(&self) -> &str {
        file_stem(&self.name)
    }
}

/// File name without its last extension.
pub fn file_stem(name: &str) -> &str {
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}

/// Where an attempt's bytes come from. Paths only exist on native; the web
/// build always receives bytes directly from the browser.
#[derive(Debug, Clone)]
pub enum FileSource {
    Memory(UploadedFile),
    #[cfg(not(target_arch = "wasm32"))]
    Path(PathBuf),
}

impl FileSource {
    /// Display name before the file is read, for the validating screen.
    pub fn label(&self) -> String {
        match self {
            FileSource::Memory(file) => file.name.clone(),
            #[cfg(not(target_arch = "wasm32"))]
            FileSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

/// Short demo trip bundled into the binary so the app is usable without
/// hunting for a CSV first.
pub fn sample_trip() -> UploadedFile {
    UploadedFile::new(
        "sample_trip.csv",
        include_str!("../../demos/sample_trip.csv").as_bytes().to_vec(),
    )
}

/// Resolve a source into bytes. Oversized files on disk are rejected from
/// their metadata so a multi-gigabyte path never gets read into memory.
pub async fn load_source(source: FileSource) -> Result<UploadedFile, PipelineError> {
    match source {
        FileSource::Memory(file) => {
            if DF.log_intake {
                log::info!("intake: {} ({} bytes in memory)", file.name, file.bytes.len());
            }
            Ok(file)
        }
        #[cfg(not(target_arch = "wasm32"))]
        FileSource::Path(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let meta = tokio::fs::metadata(&path)
                .await
                .map_err(|e| PipelineError::Io(format!("{}: {e}", path.display())))?;
            if meta.len() > MAX_FILE_SIZE_BYTES as u64 {
                return Err(crate::data::error::ValidationError::TooLarge.into());
            }
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| PipelineError::Io(format!("{}: {e}", path.display())))?;
            if DF.log_intake {
                log::info!("intake: {} ({} bytes from disk)", name, bytes.len());
            }
            Ok(UploadedFile::new(name, bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_strips_only_the_last_extension() {
        assert_eq!(UploadedFile::new("trip.csv", vec![]).stem(), "trip");
        assert_eq!(
            UploadedFile::new("trip.v2.csv", vec![]).stem(),
            "trip.v2"
        );
        assert_eq!(UploadedFile::new("noext", vec![]).stem(), "noext");
    }

    #[test]
    fn test_sample_trip_is_nonempty_csv() {
        let sample = sample_trip();
        assert_eq!(sample.name, "sample_trip.csv");
        let text = String::from_utf8(sample.bytes).unwrap();
        let header = text.lines().next().unwrap();
        for column in ["lon", "lat", "timestamp", "speed_kmh"] {
            assert!(header.contains(column), "sample header misses {column}");
        }
        assert!(text.lines().count() > 10, "sample should hold a real trip");
    }
}
