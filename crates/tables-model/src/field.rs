//! Field registry: required fields and the checks audited over them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A required field of an operational table record.
///
/// Variants are declared in registry order; `Ord` follows that order so maps
/// keyed by `Field` serialize the same way the tracker export does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    TableName,
    TableId,
    TableLocation,
    StudioLocation,
    StreamNames,
    OperatingDaysHours,
    Slack,
}

impl Field {
    /// All required fields in registry order.
    pub const ALL: [Field; 7] = [
        Field::TableName,
        Field::TableId,
        Field::TableLocation,
        Field::StudioLocation,
        Field::StreamNames,
        Field::OperatingDaysHours,
        Field::Slack,
    ];

    /// Field name as used in snapshots and reports.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TableName => "table_name",
            Self::TableId => "table_id",
            Self::TableLocation => "table_location",
            Self::StudioLocation => "studio_location",
            Self::StreamNames => "stream_names",
            Self::OperatingDaysHours => "operating_days_hours",
            Self::Slack => "slack",
        }
    }

    /// Parse a field from its snapshot name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named check in the report, one per required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Check {
    #[serde(rename = "table_name_problems")]
    TableName,
    #[serde(rename = "table_id_problems")]
    TableId,
    #[serde(rename = "table_location_problems")]
    TableLocation,
    #[serde(rename = "studio_location_problems")]
    StudioLocation,
    #[serde(rename = "stream_names_problems")]
    StreamNames,
    #[serde(rename = "operating_days_hours_problems")]
    OperatingDaysHours,
    #[serde(rename = "slack_problems")]
    Slack,
}

impl Check {
    /// All checks in the order the aggregator runs them.
    pub const ALL: [Check; 7] = [
        Check::TableName,
        Check::TableId,
        Check::TableLocation,
        Check::StudioLocation,
        Check::StreamNames,
        Check::OperatingDaysHours,
        Check::Slack,
    ];

    /// Report key for this check.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::TableName => "table_name_problems",
            Self::TableId => "table_id_problems",
            Self::TableLocation => "table_location_problems",
            Self::StudioLocation => "studio_location_problems",
            Self::StreamNames => "stream_names_problems",
            Self::OperatingDaysHours => "operating_days_hours_problems",
            Self::Slack => "slack_problems",
        }
    }

    /// The field this check audits.
    pub const fn field(&self) -> Field {
        match self {
            Self::TableName => Field::TableName,
            Self::TableId => Field::TableId,
            Self::TableLocation => Field::TableLocation,
            Self::StudioLocation => Field::StudioLocation,
            Self::StreamNames => Field::StreamNames,
            Self::OperatingDaysHours => Field::OperatingDaysHours,
            Self::Slack => Field::Slack,
        }
    }

    /// The check auditing `field`.
    pub const fn for_field(field: Field) -> Self {
        match field {
            Field::TableName => Self::TableName,
            Field::TableId => Self::TableId,
            Field::TableLocation => Self::TableLocation,
            Field::StudioLocation => Self::StudioLocation,
            Field::StreamNames => Self::StreamNames,
            Field::OperatingDaysHours => Self::OperatingDaysHours,
            Field::Slack => Self::Slack,
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parse_matches_name() {
        for field in Field::ALL {
            assert_eq!(Field::parse(field.name()), Some(field));
        }
        assert_eq!(Field::parse("owner"), None);
        assert_eq!(Field::parse("Table_Name"), None);
    }

    #[test]
    fn test_check_field_mapping_is_bijective() {
        for field in Field::ALL {
            assert_eq!(Check::for_field(field).field(), field);
        }
    }

    #[test]
    fn test_check_key_matches_serde_name() {
        for check in Check::ALL {
            let json = serde_json::to_string(&check).unwrap();
            assert_eq!(json, format!("\"{}\"", check.key()));
        }
    }
}
