//! One audit run: load, validate, notify, store.

use std::time::Instant;

use anyhow::{Context, Result};
use tables_model::{RecordSet, Violation};
use tables_notify::Notifier;
use tables_store::{RecordSource, ReportSink};
use tables_validate::{AuditOutcome, Auditor};
use tracing::{info, info_span, warn};

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct AuditSummary {
    pub record_count: usize,
    pub outcome: AuditOutcome,
    pub delivery: DeliveryStats,
}

impl AuditSummary {
    pub fn has_failures(&self) -> bool {
        !self.outcome.is_clean()
    }
}

/// Notification counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub delivered: usize,
    pub failed: usize,
}

/// Run the audit once.
///
/// Source and sink failures abort the run; notification failures are logged
/// and counted but never stop it.
pub fn run_audit(
    source: &dyn RecordSource,
    auditor: &Auditor,
    notifier: &dyn Notifier,
    sink: &dyn ReportSink,
) -> Result<AuditSummary> {
    let span = info_span!("audit");
    let _guard = span.enter();

    let start = Instant::now();
    let records: RecordSet = source.load_records().context("load records")?;
    info!(record_count = records.len(), "records loaded");

    let rules = auditor.config();
    let outcome = auditor.run(&records);
    info!(
        failing_records = outcome.report.failing_record_ids().len(),
        violation_count = outcome.violations.len(),
        timezone_match = ?rules.timezone_match,
        schedule_match = ?rules.schedule_match,
        "checks complete"
    );

    let delivery = notify_violations(&outcome.violations, notifier);

    sink.store_report(&outcome.report).context("store report")?;
    info!(
        duration_ms = start.elapsed().as_millis(),
        delivered = delivery.delivered,
        failed = delivery.failed,
        "audit complete"
    );

    Ok(AuditSummary {
        record_count: records.len(),
        outcome,
        delivery,
    })
}

/// Log every violation and hand it to `notifier`.
pub fn notify_violations(violations: &[Violation], notifier: &dyn Notifier) -> DeliveryStats {
    let mut stats = DeliveryStats::default();

    for violation in violations {
        let reason = violation.reason();
        warn!(
            record_id = %violation.record_id,
            check = %violation.check(),
            %reason,
            "violation"
        );
        match notifier.notify(&violation.record_id, &reason) {
            Ok(()) => stats.delivered += 1,
            Err(error) => {
                warn!(record_id = %violation.record_id, %error, "failed to deliver notification");
                stats.failed += 1;
            }
        }
    }

    stats
}
