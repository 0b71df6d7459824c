//! Reference data and matching modes for the checks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Records exempt from the operating hours check out of the box.
pub const DEFAULT_EXCEPTIONS: &[&str] = &["TABLE-937", "TABLE-940", "TABLE-1231", "TABLE-398"];

/// Accepted timezone abbreviations out of the box.
pub const DEFAULT_TIMEZONES: &[&str] = &["RIX", "CET", "UK", "PST", "GET", "EDT"];

/// How the timezone line is compared against the accepted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimezoneMatch {
    /// Accept any substring of the `", "`-joined list.
    ///
    /// Loose on purpose: `ET` passes because it occurs inside `CET`, and an
    /// empty timezone line passes too.
    #[default]
    Containment,
    /// Accept only an exact list entry.
    Exact,
}

/// How a record id is compared against the exception list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionMatch {
    /// Only listed ids are exempt.
    #[default]
    Exact,
    /// Any substring of the `", "`-joined list is exempt, so `TABLE-93`
    /// rides along with `TABLE-937`.
    Containment,
}

/// How much of the schedule line a grammar has to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMatch {
    /// The grammar only has to match at the start; trailing text is ignored.
    #[default]
    Prefix,
    /// The grammar has to match the whole line.
    Full,
}

/// Immutable configuration shared by every check of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Record ids never evaluated by the operating hours check.
    pub operating_hours_exceptions: BTreeSet<String>,
    /// Accepted timezone abbreviations.
    pub valid_timezones: Vec<String>,
    pub exception_match: ExceptionMatch,
    pub timezone_match: TimezoneMatch,
    pub schedule_match: ScheduleMatch,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            operating_hours_exceptions: DEFAULT_EXCEPTIONS
                .iter()
                .map(|id| (*id).to_string())
                .collect(),
            valid_timezones: DEFAULT_TIMEZONES.iter().map(|tz| (*tz).to_string()).collect(),
            exception_match: ExceptionMatch::default(),
            timezone_match: TimezoneMatch::default(),
            schedule_match: ScheduleMatch::default(),
        }
    }
}

impl AuditConfig {
    /// True when `record_id` skips the operating hours check.
    pub fn is_exempt(&self, record_id: &str) -> bool {
        match self.exception_match {
            ExceptionMatch::Exact => self.operating_hours_exceptions.contains(record_id),
            ExceptionMatch::Containment => {
                let listed: Vec<&str> = self
                    .operating_hours_exceptions
                    .iter()
                    .map(String::as_str)
                    .collect();
                listed.join(", ").contains(record_id)
            }
        }
    }

    /// True when `timezone` is accepted under the configured match mode.
    pub fn accepts_timezone(&self, timezone: &str) -> bool {
        match self.timezone_match {
            TimezoneMatch::Containment => self.valid_timezones.join(", ").contains(timezone),
            TimezoneMatch::Exact => self.valid_timezones.iter().any(|tz| tz == timezone),
        }
    }

    #[must_use]
    pub fn with_exceptions<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operating_hours_exceptions = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_exception_match(mut self, mode: ExceptionMatch) -> Self {
        self.exception_match = mode;
        self
    }

    #[must_use]
    pub fn with_timezone_match(mut self, mode: TimezoneMatch) -> Self {
        self.timezone_match = mode;
        self
    }

    #[must_use]
    pub fn with_schedule_match(mut self, mode: ScheduleMatch) -> Self {
        self.schedule_match = mode;
        self
    }
}
