//! Tracked table records.
//!
//! Snapshots and reports spell an unset field as the literal string `"None"`.
//! Inside the crate an unset field is simply absent; the sentinel only exists
//! at the serialization boundary.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::field::Field;

/// Wire spelling of an unset field.
pub const MISSING_SENTINEL: &str = "None";

/// All records of one audit run, keyed by tracker issue key.
pub type RecordSet = BTreeMap<String, Record>;

/// Field values of one tracked table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<String>>")]
pub struct Record {
    values: BTreeMap<Field, String>,
    /// Keys outside the registry, kept so a snapshot round-trips unchanged.
    extra: BTreeMap<String, Option<String>>,
}

impl Record {
    /// Create a record with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for tests and sources.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Set or clear a field. The `"None"` sentinel clears it.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        match normalize(value) {
            Some(value) => {
                self.values.insert(field, value);
            }
            None => {
                self.values.remove(&field);
            }
        }
    }

    /// Value of a field, `None` when unset.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// True when the field has no value.
    pub fn is_missing(&self, field: Field) -> bool {
        !self.values.contains_key(&field)
    }

    /// Keys outside the field registry.
    pub fn extra(&self) -> &BTreeMap<String, Option<String>> {
        &self.extra
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| v != MISSING_SENTINEL)
}

impl From<BTreeMap<String, Option<String>>> for Record {
    fn from(raw: BTreeMap<String, Option<String>>) -> Self {
        let mut record = Record::new();
        for (key, value) in raw {
            match Field::parse(&key) {
                Some(field) => record.set(field, value),
                None => {
                    record.extra.insert(key, normalize(value));
                }
            }
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::ALL.len() + self.extra.len()))?;
        for field in Field::ALL {
            map.serialize_entry(field.name(), self.get(field).unwrap_or(MISSING_SENTINEL))?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value.as_deref().unwrap_or(MISSING_SENTINEL))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_reads_as_missing() {
        let record: Record = serde_json::from_str(
            r#"{"table_name": "None", "table_id": "42", "slack": null}"#,
        )
        .unwrap();

        assert!(record.is_missing(Field::TableName));
        assert!(record.is_missing(Field::Slack));
        assert_eq!(record.get(Field::TableId), Some("42"));
    }

    #[test]
    fn test_absent_key_reads_as_missing() {
        let record: Record = serde_json::from_str(r#"{"table_id": "7"}"#).unwrap();
        assert!(record.is_missing(Field::StreamNames));
    }

    #[test]
    fn test_serializes_all_fields_in_registry_order() {
        let record = Record::new()
            .with(Field::TableId, "12")
            .with(Field::OperatingDaysHours, "CET\n24h");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"table_name":"None","table_id":"12","table_location":"None","studio_location":"None","stream_names":"None","operating_days_hours":"CET\n24h","slack":"None"}"#
        );
    }

    #[test]
    fn test_extra_keys_are_preserved() {
        let record: Record =
            serde_json::from_str(r#"{"table_name": "Blackjack 3", "dealer": "Ann"}"#).unwrap();

        assert_eq!(record.extra().get("dealer"), Some(&Some("Ann".to_string())));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["dealer"], "Ann");
        assert_eq!(json["table_name"], "Blackjack 3");
    }

    #[test]
    fn test_setting_sentinel_clears_field() {
        let mut record = Record::new().with(Field::Slack, "#tables");
        record.set(Field::Slack, Some(MISSING_SENTINEL.to_string()));
        assert!(record.is_missing(Field::Slack));
    }
}
