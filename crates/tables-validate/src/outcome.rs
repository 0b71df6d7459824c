//! Result of one aggregator pass.

use serde::Serialize;
use tables_model::{Check, Report, Violation};

/// Report plus the violations that produced it, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditOutcome {
    pub report: Report,
    pub violations: Vec<Violation>,
}

impl AuditOutcome {
    /// Violations reported under `check`.
    pub fn violations_for(&self, check: Check) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.check() == check)
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
