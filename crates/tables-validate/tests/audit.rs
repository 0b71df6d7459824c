//! End-to-end tests for the aggregator.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tables_model::{Check, Field, MISSING_SENTINEL, Record, RecordSet};
use tables_validate::{AuditConfig, Auditor, ExceptionMatch, ScheduleMatch, TimezoneMatch, audit};

fn complete_record(hours: &str) -> Record {
    Record::new()
        .with(Field::TableName, "Baccarat 2")
        .with(Field::TableId, "204")
        .with(Field::TableLocation, "Riga")
        .with(Field::StudioLocation, "Studio B")
        .with(Field::StreamNames, "bac2-main, bac2-backup")
        .with(Field::OperatingDaysHours, hours)
        .with(Field::Slack, "#baccarat")
}

fn single(id: &str, record: Record) -> RecordSet {
    RecordSet::from([(id.to_string(), record)])
}

#[test]
fn test_valid_record_passes_every_check() {
    let records = single("T1", complete_record("CET\n24h"));

    let outcome = audit(&records, &AuditConfig::default());

    assert!(outcome.report.failing(Check::OperatingDaysHours).is_empty());
    assert!(outcome.report.is_clean());
    assert!(outcome.violations.is_empty());
}

#[test]
fn test_invalid_timezone_is_reported_once() {
    let records = single("T2", complete_record("XYZ\n24h"));

    let outcome = audit(&records, &AuditConfig::default());

    let failing = outcome.report.failing(Check::OperatingDaysHours);
    assert_eq!(failing.len(), 1);
    assert!(failing.contains_key("T2"));
    assert_eq!(outcome.violations.len(), 1);
    insta::assert_snapshot!(outcome.violations[0].reason(), @"T2 has invalid timezone: XYZ");
}

#[test]
fn test_empty_table_name_is_reported() {
    let mut record = complete_record("CET\n24h");
    record.set(Field::TableName, Some(MISSING_SENTINEL.to_string()));
    let records = single("T3", record);

    let outcome = audit(&records, &AuditConfig::default());

    assert_eq!(
        outcome.report.failing(Check::TableName).keys().collect::<Vec<_>>(),
        vec!["T3"]
    );
    assert_eq!(outcome.report.total_failures(), 1);
    insta::assert_snapshot!(outcome.violations[0].reason(), @"T3 has empty field: table_name");
}

#[test]
fn test_exempt_record_with_unset_hours_is_excluded() {
    let mut record = complete_record("");
    record.set(Field::OperatingDaysHours, None);
    let records = single("TABLE-398", record);

    let outcome = audit(&records, &AuditConfig::default());

    assert!(outcome.report.failing(Check::OperatingDaysHours).is_empty());
    assert!(outcome.report.is_clean());
}

#[test]
fn test_checks_do_not_short_circuit() {
    let records = single("T4", Record::new());

    let outcome = audit(&records, &AuditConfig::default());

    for check in Check::ALL {
        assert_eq!(outcome.report.failing_count(check), 1, "{check}");
    }
    assert_eq!(outcome.violations.len(), 7);
    let order: Vec<Check> = outcome.violations.iter().map(|v| v.check()).collect();
    assert_eq!(order, Check::ALL.to_vec());
    insta::assert_snapshot!(
        outcome.violations[5].reason(),
        @"T4 has NOT enough data in operating_days_hours field"
    );
}

#[test]
fn test_loose_timezone_can_be_tightened() {
    let records = single("T5", complete_record("ET\n24h"));

    let loose = audit(&records, &AuditConfig::default());
    assert!(loose.report.is_clean());

    let strict = AuditConfig::default().with_timezone_match(TimezoneMatch::Exact);
    let outcome = audit(&records, &strict);
    assert!(outcome.report.failing(Check::OperatingDaysHours).contains_key("T5"));
}

#[test]
fn test_full_schedule_match_rejects_trailing_text() {
    let records = RecordSet::from([
        ("T6".to_string(), complete_record("CET\n24h except holidays")),
        ("T7".to_string(), complete_record("CET\n00.00-24.00")),
    ]);

    let prefix = audit(&records, &AuditConfig::default());
    assert!(prefix.is_clean());

    let auditor = Auditor::new(AuditConfig::default().with_schedule_match(ScheduleMatch::Full));
    assert_eq!(auditor.config().schedule_match, ScheduleMatch::Full);
    let outcome = auditor.run(&records);

    assert!(!outcome.is_clean());
    let reasons: Vec<String> = outcome
        .violations_for(Check::OperatingDaysHours)
        .map(|v| v.reason())
        .collect();
    insta::assert_debug_snapshot!(reasons, @r#"
    [
        "T6 has invalid working_hours: 24h except holidays",
    ]
    "#);
    assert_eq!(outcome.violations_for(Check::TableName).count(), 0);
}

#[test]
fn test_configured_exceptions_replace_defaults() {
    let records = RecordSet::from([
        ("TABLE-398".to_string(), complete_record("XYZ\n24h")),
        ("TABLE-77".to_string(), complete_record("XYZ\n24h")),
    ]);

    let config = AuditConfig::default().with_exceptions(["TABLE-77"]);
    let outcome = audit(&records, &config);

    let failing = outcome.report.failing(Check::OperatingDaysHours);
    assert_eq!(failing.keys().collect::<Vec<_>>(), vec!["TABLE-398"]);
}

#[test]
fn test_exception_containment_exempts_id_prefixes() {
    let records = single("TABLE-93", complete_record("None"));

    let exact = audit(&records, &AuditConfig::default());
    assert_eq!(exact.violations_for(Check::OperatingDaysHours).count(), 1);

    let loose = AuditConfig::default().with_exception_match(ExceptionMatch::Containment);
    assert!(audit(&records, &loose).is_clean());
}

#[test]
fn test_report_json_shape() {
    let mut record = complete_record("UK\n10-22");
    record.set(Field::Slack, None);
    let records = single("TABLE-12", record);

    let report = Auditor::new(AuditConfig::default()).run(&records).report;
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["slack_problems"]["TABLE-12"]["slack"], "None");
    assert_eq!(json["slack_problems"]["TABLE-12"]["table_id"], "204");
    assert_eq!(json["table_name_problems"], serde_json::json!({}));
}

#[test]
fn test_run_is_idempotent() {
    let records = RecordSet::from([
        ("A".to_string(), complete_record("CET\n24h")),
        ("B".to_string(), complete_record("XYZ\n24h")),
        ("C".to_string(), Record::new()),
    ]);
    let auditor = Auditor::new(AuditConfig::default());

    let first = auditor.run(&records);
    let second = auditor.run(&records);

    assert_eq!(first, second);
}

fn field_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(Some(MISSING_SENTINEL.to_string())),
        Just(None),
        "[A-Za-z0-9 #,.-]{1,12}".prop_map(Some),
    ]
}

fn raw_record() -> impl Strategy<Value = BTreeMap<String, Option<String>>> {
    proptest::collection::vec(field_value(), Field::ALL.len()).prop_map(|values| {
        Field::ALL
            .iter()
            .zip(values)
            .map(|(field, value)| (field.name().to_string(), value))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_required_field_fails_iff_unset(
        raws in proptest::collection::btree_map("TABLE-[0-9]{1,4}", raw_record(), 0..12)
    ) {
        let records: RecordSet = raws
            .iter()
            .map(|(id, raw)| (id.clone(), Record::from(raw.clone())))
            .collect();

        let report = audit(&records, &AuditConfig::default()).report;

        for field in Field::ALL {
            if field == Field::OperatingDaysHours {
                continue;
            }
            let failing = report.failing(Check::for_field(field));
            for (id, raw) in &raws {
                let unset = match raw.get(field.name()) {
                    Some(Some(value)) => value == MISSING_SENTINEL,
                    _ => true,
                };
                prop_assert_eq!(failing.contains_key(id), unset);
            }
        }
    }

    #[test]
    fn prop_exceptions_never_fail_hours(
        hours in proptest::option::of(".{0,40}"),
        id in proptest::sample::select(vec!["TABLE-937", "TABLE-940", "TABLE-1231", "TABLE-398"]),
    ) {
        let mut record = Record::new();
        record.set(Field::OperatingDaysHours, hours);
        let records = single(id, record);

        let report = audit(&records, &AuditConfig::default()).report;

        prop_assert!(report.failing(Check::OperatingDaysHours).is_empty());
    }
}
