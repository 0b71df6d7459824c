//! Check modules.
//!
//! Each module implements one kind of check and returns the failing records
//! together with the violations explaining them.

mod required;
pub mod schedule;

use std::collections::BTreeMap;

use tables_model::{Check, Field, Record, RecordSet, Violation};
use tracing::debug;

use crate::config::AuditConfig;
use crate::outcome::AuditOutcome;

pub use required::check as check_field;
pub use schedule::check as check_operating_hours;

/// Failing records and violations of a single check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub failing: BTreeMap<String, Record>,
    pub violations: Vec<Violation>,
}

impl CheckOutcome {
    pub(crate) fn fail(&mut self, record_id: &str, record: &Record, violation: Violation) {
        self.failing.insert(record_id.to_string(), record.clone());
        self.violations.push(violation);
    }
}

/// Run every check over the record set, in `Check::ALL` order.
pub fn run_all(records: &RecordSet, config: &AuditConfig) -> AuditOutcome {
    let mut outcome = AuditOutcome::default();

    for check in Check::ALL {
        let CheckOutcome {
            failing,
            violations,
        } = match check.field() {
            Field::OperatingDaysHours => schedule::check(records, config),
            field => required::check(field, records),
        };
        debug!(
            check = %check,
            record_count = records.len(),
            failing_count = failing.len(),
            "check complete"
        );
        outcome.report.insert(check, failing);
        outcome.violations.extend(violations);
    }

    outcome
}

