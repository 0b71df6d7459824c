//! Aggregated audit report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::Check;
use crate::record::Record;

static NO_FAILURES: BTreeMap<String, Record> = BTreeMap::new();

/// Failing records per check.
///
/// Serializes as `{ "<check>_problems": { "<record id>": { ... } } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    checks: BTreeMap<Check, BTreeMap<String, Record>>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    /// Create a report with every check present and passing.
    pub fn new() -> Self {
        Self {
            checks: Check::ALL
                .into_iter()
                .map(|check| (check, BTreeMap::new()))
                .collect(),
        }
    }

    /// Record the failing set for a check, replacing any previous one.
    pub fn insert(&mut self, check: Check, failing: BTreeMap<String, Record>) {
        self.checks.insert(check, failing);
    }

    /// Records failing `check`.
    pub fn failing(&self, check: Check) -> &BTreeMap<String, Record> {
        self.checks.get(&check).unwrap_or(&NO_FAILURES)
    }

    pub fn failing_count(&self, check: Check) -> usize {
        self.failing(check).len()
    }

    /// Sum of failing records over all checks (a record failing two checks counts twice).
    pub fn total_failures(&self) -> usize {
        self.checks.values().map(BTreeMap::len).sum()
    }

    /// True when no check has a failing record.
    pub fn is_clean(&self) -> bool {
        self.total_failures() == 0
    }

    /// Distinct ids failing at least one check.
    pub fn failing_record_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .checks
            .values()
            .flat_map(|failing| failing.keys().map(String::as_str))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Iterate checks in run order with their failing records.
    pub fn iter(&self) -> impl Iterator<Item = (Check, &BTreeMap<String, Record>)> {
        self.checks.iter().map(|(check, failing)| (*check, failing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    #[test]
    fn test_new_report_has_every_check() {
        let report = Report::new();
        let json = serde_json::to_value(&report).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(keys.len(), 7);
        for check in Check::ALL {
            assert!(keys.contains(&check.key()));
        }
        assert!(report.is_clean());
    }

    #[test]
    fn test_failing_record_ids_are_distinct() {
        let record = Record::new().with(Field::TableId, "3");
        let mut report = Report::new();
        report.insert(
            Check::TableName,
            BTreeMap::from([("TABLE-9".to_string(), record.clone())]),
        );
        report.insert(
            Check::Slack,
            BTreeMap::from([
                ("TABLE-9".to_string(), record.clone()),
                ("TABLE-1".to_string(), record),
            ]),
        );

        assert_eq!(report.total_failures(), 3);
        assert_eq!(report.failing_record_ids(), vec!["TABLE-1", "TABLE-9"]);
        assert_eq!(report.failing_count(Check::Slack), 2);
        assert!(report.failing(Check::StreamNames).is_empty());
    }
}
