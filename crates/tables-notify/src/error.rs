//! Notification error types.

use thiserror::Error;

/// A notification could not be delivered.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NotifyError {
    /// Request to the webhook failed before a response arrived.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Webhook answered with an error status.
    #[error("webhook rejected message with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Notifier cannot accept messages.
    #[error("notifier unavailable: {0}")]
    Unavailable(String),
}
