//! Rule engine for the operational table audit.
//!
//! Every record of a [`RecordSet`] is run through seven checks:
//!
//! - **Required fields**: `table_name`, `table_id`, `table_location`,
//!   `studio_location`, `stream_names` and `slack` must be set
//! - **Operating hours**: `operating_days_hours` must hold a timezone line
//!   followed by a schedule line in one of the accepted grammars
//!
//! Validation is pure. Violations are returned alongside the [`Report`] and
//! it is up to the caller to deliver them.
//!
//! # Example
//!
//! ```ignore
//! use tables_validate::{AuditConfig, Auditor};
//!
//! let auditor = Auditor::new(AuditConfig::default());
//! let outcome = auditor.run(&records);
//! for violation in &outcome.violations {
//!     println!("{}", violation.reason());
//! }
//! ```

mod checks;
mod config;
mod outcome;

use tables_model::RecordSet;

pub use checks::schedule::{OperatingHours, ScheduleGrammar, classify_schedule, parse_operating_hours};
pub use checks::{CheckOutcome, check_field, check_operating_hours};
pub use config::{
    AuditConfig, DEFAULT_EXCEPTIONS, DEFAULT_TIMEZONES, ExceptionMatch, ScheduleMatch, TimezoneMatch,
};
pub use outcome::AuditOutcome;

/// Runs the full check set with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    config: AuditConfig,
}

impl Auditor {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Run all seven checks over `records`.
    ///
    /// Checks never short-circuit each other; a record may fail several.
    pub fn run(&self, records: &RecordSet) -> AuditOutcome {
        checks::run_all(records, &self.config)
    }
}

/// Audit `records` with `config` in one call.
pub fn audit(records: &RecordSet, config: &AuditConfig) -> AuditOutcome {
    checks::run_all(records, config)
}
