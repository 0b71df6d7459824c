//! Library components of the `tables-audit` command.

pub mod config;
pub mod logging;
pub mod pipeline;
