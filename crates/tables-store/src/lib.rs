//! Record sources and report sinks.
//!
//! The audit core only sees two seams:
//!
//! - [`RecordSource`] supplies the [`RecordSet`] for a run
//! - [`ReportSink`] persists the finished [`Report`]
//!
//! Both are all-or-nothing: an error aborts the run before any report is
//! written.

mod error;
pub mod jira;
mod snapshot;

use tables_model::{RecordSet, Report};

pub use error::{SinkError, SourceError};
pub use jira::{JiraConfig, JiraFieldMap, JiraSource};
pub use snapshot::{JsonFileSink, SnapshotSource, write_json_atomic};

/// Default location of the record snapshot.
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/operating_tables.json";

/// Default location of the report.
pub const DEFAULT_REPORT_PATH: &str = "data/tables_with_problems.json";

/// Supplies the records to audit.
pub trait RecordSource {
    fn load_records(&self) -> Result<RecordSet, SourceError>;
}

/// Persists a finished report.
pub trait ReportSink {
    fn store_report(&self, report: &Report) -> Result<(), SinkError>;
}
