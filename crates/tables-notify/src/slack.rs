//! Slack incoming-webhook notifier.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Notifier;
use crate::error::NotifyError;

/// Attribution shown under every alert.
pub const DEFAULT_FOOTER: &str = ":copyright: team name";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Webhook settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Post alerts; when false violations are only logged.
    pub enabled: bool,
    /// Incoming webhook URL.
    pub webhook_url: String,
    /// Issue browse URL; alerts link to `{tracker_url}/{record id}`.
    pub tracker_url: String,
    pub footer: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            webhook_url: String::new(),
            tracker_url: String::new(),
            footer: DEFAULT_FOOTER.to_string(),
        }
    }
}

impl SlackConfig {
    /// True when alerts can actually be posted.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.webhook_url.trim().is_empty()
    }
}

/// Webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackMessage {
    pub text: String,
    pub attachments: Vec<SlackAttachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackAttachment {
    pub title: String,
    pub text: String,
    pub mrkdwn_in: Vec<String>,
    pub color: String,
    pub footer: String,
}

impl SlackMessage {
    /// Alert about `target` with `reason` as the attachment title.
    pub fn alert(target: &str, reason: &str, tracker_url: &str, footer: &str) -> Self {
        let tracker_url = tracker_url.trim_end_matches('/');
        Self {
            text: format!("*[JIRA]* {target} has problems\n "),
            attachments: vec![SlackAttachment {
                title: reason.to_string(),
                text: format!("<{tracker_url}/{target}>"),
                mrkdwn_in: vec!["text".to_string()],
                color: "danger".to_string(),
                footer: footer.to_string(),
            }],
        }
    }
}

/// Posts each violation to a Slack channel.
pub struct SlackNotifier {
    client: Client,
    config: SlackConfig,
}

impl SlackNotifier {
    pub fn new(config: SlackConfig) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn message(&self, target: &str, reason: &str) -> SlackMessage {
        SlackMessage::alert(target, reason, &self.config.tracker_url, &self.config.footer)
    }
}

impl Notifier for SlackNotifier {
    fn notify(&self, target: &str, reason: &str) -> Result<(), NotifyError> {
        let message = self.message(target, reason);
        debug!(target_id = %target, "posting slack alert");

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&message)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(NotifyError::Rejected { status, body });
        }
        Ok(())
    }
}
