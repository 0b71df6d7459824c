//! Required field checks.
//!
//! A field is empty when the record has no value for it, which is how the
//! `"None"` sentinel of the tracker export is read.

use tables_model::{Field, Issue, RecordSet, Violation};

use super::CheckOutcome;

/// Collect records whose `field` is unset.
pub fn check(field: Field, records: &RecordSet) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    for (record_id, record) in records {
        if record.is_missing(field) {
            outcome.fail(
                record_id,
                record,
                Violation::new(record_id.as_str(), Issue::EmptyField { field }),
            );
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use tables_model::{Record, RecordSet};

    #[test]
    fn test_only_unset_records_fail() {
        let records = RecordSet::from([
            (
                "TABLE-1".to_string(),
                Record::new().with(Field::TableName, "Roulette 1"),
            ),
            ("TABLE-2".to_string(), Record::new()),
        ]);

        let outcome = check(Field::TableName, &records);

        assert_eq!(outcome.failing.len(), 1);
        assert!(outcome.failing.contains_key("TABLE-2"));
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(
            outcome.violations[0].reason(),
            "TABLE-2 has empty field: table_name"
        );
    }

    #[test]
    fn test_blank_string_is_not_empty() {
        // Only the sentinel marks a field as unset; whitespace is a value.
        let records = RecordSet::from([(
            "TABLE-3".to_string(),
            Record::new().with(Field::Slack, " "),
        )]);

        assert!(check(Field::Slack, &records).failing.is_empty());
    }
}
