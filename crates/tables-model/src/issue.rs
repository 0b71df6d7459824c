//! Violation types.
//!
//! The Issue enum carries only the data each kind of failure needs; the
//! message text is derived on demand.

use serde::{Deserialize, Serialize};

use crate::field::{Check, Field};

/// What went wrong with a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    /// Required field is unset
    EmptyField { field: Field },
    /// Operating hours field has fewer than two lines
    ScheduleTooShort,
    /// First operating hours line is not an accepted timezone
    InvalidTimezone { timezone: String },
    /// Second operating hours line matches none of the schedule grammars
    InvalidWorkingHours { working_hours: String },
}

impl Issue {
    /// Check this issue is reported under.
    pub fn check(&self) -> Check {
        match self {
            Issue::EmptyField { field } => Check::for_field(*field),
            Issue::ScheduleTooShort
            | Issue::InvalidTimezone { .. }
            | Issue::InvalidWorkingHours { .. } => Check::OperatingDaysHours,
        }
    }

    /// Human-readable reason for `record_id`.
    pub fn message(&self, record_id: &str) -> String {
        match self {
            Issue::EmptyField { field } => format!("{record_id} has empty field: {field}"),
            Issue::ScheduleTooShort => format!(
                "{record_id} has NOT enough data in {} field",
                Field::OperatingDaysHours
            ),
            Issue::InvalidTimezone { timezone } => {
                format!("{record_id} has invalid timezone: {timezone}")
            }
            Issue::InvalidWorkingHours { working_hours } => {
                format!("{record_id} has invalid working_hours: {working_hours}")
            }
        }
    }
}

/// A single failed check for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub record_id: String,
    pub issue: Issue,
}

impl Violation {
    pub fn new(record_id: impl Into<String>, issue: Issue) -> Self {
        Self {
            record_id: record_id.into(),
            issue,
        }
    }

    pub fn check(&self) -> Check {
        self.issue.check()
    }

    /// Reason string sent to the notifier.
    pub fn reason(&self) -> String {
        self.issue.message(&self.record_id)
    }
}
