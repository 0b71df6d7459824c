//! Data model for the operational table audit.
//!
//! - [`Field`] and [`Check`] form the field registry: the seven required
//!   tracker fields and the report key each one is audited under.
//! - [`Record`] holds one tracked table's field values, keyed by tracker id
//!   in a [`RecordSet`].
//! - [`Issue`] and [`Violation`] describe a single failed check.
//! - [`Report`] aggregates every failing record per check.

mod field;
mod issue;
mod record;
mod report;

pub use field::{Check, Field};
pub use issue::{Issue, Violation};
pub use record::{MISSING_SENTINEL, Record, RecordSet};
pub use report::Report;
