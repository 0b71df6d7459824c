//! Mapping from tracker custom fields to record fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tables_model::{Field, Record};

/// Tracker custom field id for each required field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraFieldMap {
    pub table_name: String,
    pub table_id: String,
    pub table_location: String,
    pub studio_location: String,
    pub stream_names: String,
    pub operating_days_hours: String,
    pub slack: String,
}

impl Default for JiraFieldMap {
    fn default() -> Self {
        Self {
            table_name: "customfield_10649".to_string(),
            table_id: "customfield_10873".to_string(),
            table_location: "customfield_12311".to_string(),
            studio_location: "customfield_12772".to_string(),
            stream_names: "customfield_12324".to_string(),
            operating_days_hours: "customfield_16541".to_string(),
            slack: "customfield_14643".to_string(),
        }
    }
}

impl JiraFieldMap {
    /// Tracker field id for `field`.
    pub fn id(&self, field: Field) -> &str {
        match field {
            Field::TableName => &self.table_name,
            Field::TableId => &self.table_id,
            Field::TableLocation => &self.table_location,
            Field::StudioLocation => &self.studio_location,
            Field::StreamNames => &self.stream_names,
            Field::OperatingDaysHours => &self.operating_days_hours,
            Field::Slack => &self.slack,
        }
    }

    /// Comma-separated field ids for the search `fields` parameter.
    pub fn request_fields(&self) -> String {
        Field::ALL
            .iter()
            .map(|field| self.id(*field))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Build a record from an issue's `fields` object.
    pub fn to_record(&self, fields: &Map<String, Value>) -> Record {
        let mut record = Record::new();
        for field in Field::ALL {
            let value = fields.get(self.id(field)).and_then(field_text);
            record.set(field, value);
        }
        record
    }
}

/// Render a tracker field value as text, `None` when it has no value.
///
/// Numbers without a fractional part lose the trailing `.0` the tracker adds
/// to numeric custom fields; option fields render their `value` (or `name`);
/// multi-value fields are joined with `", "`.
pub(crate) fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(int.to_string())
            } else if let Some(float) = number.as_f64()
                && float.fract() == 0.0
            {
                Some(format!("{float:.0}"))
            } else {
                Some(number.to_string())
            }
        }
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(field_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(object) => object
            .get("value")
            .or_else(|| object.get("name"))
            .map_or_else(|| Some(value.to_string()), field_text),
    }
}
