//! JSON snapshot source and file sink.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tables_model::{RecordSet, Report};

use crate::error::{SinkError, SourceError};
use crate::{RecordSource, ReportSink};

/// Loads records from a previously written snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for SnapshotSource {
    fn load_records(&self) -> Result<RecordSet, SourceError> {
        let content = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records: RecordSet =
            serde_json::from_str(&content).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                source,
            })?;
        tracing::info!(
            path = %self.path.display(),
            record_count = records.len(),
            "loaded record snapshot"
        );
        Ok(records)
    }
}

/// Writes JSON documents to a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a record snapshot for later offline runs.
    pub fn store_records(&self, records: &RecordSet) -> Result<(), SinkError> {
        write_json_atomic(records, &self.path)?;
        tracing::info!(
            path = %self.path.display(),
            record_count = records.len(),
            "saved record snapshot"
        );
        Ok(())
    }
}

impl ReportSink for JsonFileSink {
    fn store_report(&self, report: &Report) -> Result<(), SinkError> {
        write_json_atomic(report, &self.path)?;
        tracing::info!(
            path = %self.path.display(),
            failing_records = report.failing_record_ids().len(),
            "saved report"
        );
        Ok(())
    }
}

/// Write `value` as UTF-8 JSON indented by four spaces.
///
/// Non-ASCII text is written as is. The file is written to a temp sibling and
/// renamed over `path`, creating parent directories as needed.
pub fn write_json_atomic<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), SinkError> {
    let mut bytes = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(SinkError::Serialization)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SinkError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(|source| SinkError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    file.write_all(&bytes).map_err(|source| SinkError::Io {
        operation: "write",
        path: temp_path.clone(),
        source,
    })?;
    file.sync_all().map_err(|source| SinkError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| SinkError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })
}
