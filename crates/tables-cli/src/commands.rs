use anyhow::{Context, Result};
use comfy_table::Table;
use tables_cli::config::AppConfig;
use tables_cli::pipeline::{AuditSummary, run_audit};
use tables_model::Check;
use tables_notify::{LogNotifier, Notifier, SlackNotifier};
use tables_store::{JiraSource, JsonFileSink, RecordSource, SnapshotSource};
use tables_validate::{Auditor, ScheduleMatch, TimezoneMatch};
use tracing::{info, warn};

use crate::cli::{AuditArgs, FetchArgs};
use crate::summary::apply_table_style;

pub fn run_audit_command(args: &AuditArgs, config: &AppConfig) -> Result<AuditSummary> {
    let mut rules = config.rules.clone();
    if args.exact_timezones {
        rules = rules.with_timezone_match(TimezoneMatch::Exact);
    }
    if args.full_schedule_match {
        rules = rules.with_schedule_match(ScheduleMatch::Full);
    }
    let auditor = Auditor::new(rules);

    let snapshot_path = args
        .snapshot
        .clone()
        .unwrap_or_else(|| config.paths.snapshot.clone());
    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| config.paths.report.clone());

    let source = SnapshotSource::new(snapshot_path);
    if args.live {
        run_fetch_to(config, &JsonFileSink::new(source.path()))?;
    }

    let notifier: Box<dyn Notifier> = if args.no_notify {
        Box::new(LogNotifier)
    } else if !config.slack.is_active() {
        warn!("slack webhook not configured, violations will only be logged");
        Box::new(LogNotifier)
    } else {
        Box::new(SlackNotifier::new(config.slack.clone()).context("create slack client")?)
    };

    info!(snapshot = %source.path().display(), "auditing snapshot");
    let sink = JsonFileSink::new(report_path);
    run_audit(&source, &auditor, &*notifier, &sink)
}

pub fn run_fetch(args: &FetchArgs, config: &AppConfig) -> Result<()> {
    let snapshot = JsonFileSink::new(
        args.snapshot
            .clone()
            .unwrap_or_else(|| config.paths.snapshot.clone()),
    );
    let count = run_fetch_to(config, &snapshot)?;
    println!("Fetched {count} tables into {}", snapshot.path().display());
    Ok(())
}

fn run_fetch_to(config: &AppConfig, snapshot: &JsonFileSink) -> Result<usize> {
    let source = JiraSource::from_env(config.jira.clone()).context("configure tracker client")?;
    let records = source
        .load_records()
        .context("fetch records from tracker")?;
    snapshot
        .store_records(&records)
        .context("save record snapshot")?;
    info!(
        record_count = records.len(),
        path = %snapshot.path().display(),
        "snapshot refreshed"
    );
    Ok(records.len())
}

pub fn run_checks() {
    let mut table = Table::new();
    table.set_header(vec!["Check", "Field", "Rule"]);
    apply_table_style(&mut table);
    for check in Check::ALL {
        let rule = match check {
            Check::OperatingDaysHours => {
                "timezone line, then 24h | 00.00-24.00 | 00-24 schedule line"
            }
            _ => "must be set",
        };
        table.add_row(vec![check.key(), check.field().name(), rule]);
    }
    println!("{table}");
}
