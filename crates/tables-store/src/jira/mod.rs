//! Jira search source.
//!
//! Queries operational table issues through the REST search endpoint and maps
//! their custom fields onto records.

mod fields;

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tables_model::RecordSet;
use tracing::{debug, info};

use crate::RecordSource;
use crate::error::SourceError;

pub use fields::JiraFieldMap;

/// Search endpoint relative to the tracker base URL.
const SEARCH_PATH: &str = "rest/api/2/search";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings and query for the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Tracker base URL, e.g. `https://jira.example.com`.
    pub url: String,
    pub username: String,
    /// Environment variable holding the password or API token.
    pub password_env: String,
    /// JQL selecting the operational tables.
    pub query: String,
    /// Issues requested per page.
    pub page_size: u32,
    /// Upper bound on issues fetched per run.
    pub max_results: u32,
    pub fields: JiraFieldMap,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: String::new(),
            password_env: "TABLES_AUDIT_JIRA_PASSWORD".to_string(),
            query: r#"project = "TABLE" and status = Operational order by "Table ID""#.to_string(),
            page_size: 100,
            max_results: 1000,
            fields: JiraFieldMap::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    total: Option<u32>,
    #[serde(default)]
    issues: Vec<IssueEntry>,
}

#[derive(Debug, Deserialize)]
struct IssueEntry {
    key: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Loads records live from the tracker.
pub struct JiraSource {
    client: Client,
    config: JiraConfig,
    password: String,
}

impl JiraSource {
    /// Create a source with an explicit password.
    pub fn new(config: JiraConfig, password: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            config,
            password: password.into(),
        })
    }

    /// Create a source reading the password from `config.password_env`.
    pub fn from_env(config: JiraConfig) -> Result<Self, SourceError> {
        let password = std::env::var(&config.password_env)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| SourceError::MissingCredentials {
                env_var: config.password_env.clone(),
            })?;
        Self::new(config, password)
    }

    /// URL of one search page.
    fn search_url(&self, start_at: u32, page_size: u32) -> Result<Url, SourceError> {
        let base = self.config.url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{SEARCH_PATH}")).map_err(|e| {
            SourceError::InvalidUrl {
                url: self.config.url.clone(),
                message: e.to_string(),
            }
        })?;
        url.query_pairs_mut()
            .append_pair("jql", &self.config.query)
            .append_pair("startAt", &start_at.to_string())
            .append_pair("maxResults", &page_size.to_string())
            .append_pair("fields", &self.config.fields.request_fields());
        Ok(url)
    }

    fn fetch_page(&self, start_at: u32, page_size: u32) -> Result<SearchPage, SourceError> {
        let url = self.search_url(start_at, page_size)?;
        debug!(start_at, page_size, "fetching issue page");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.config.username, Some(&self.password))
            .header(USER_AGENT, concat!("tables-audit/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SourceError::TrackerApi { status, message });
        }

        Ok(response.json()?)
    }
}

impl RecordSource for JiraSource {
    fn load_records(&self) -> Result<RecordSet, SourceError> {
        let mut records = RecordSet::new();
        let mut start_at = 0u32;

        while start_at < self.config.max_results {
            let page_size = self.config.page_size.min(self.config.max_results - start_at);
            let page = self.fetch_page(start_at, page_size)?;
            let fetched = page.issues.len() as u32;

            for issue in page.issues {
                let record = self.config.fields.to_record(&issue.fields);
                records.insert(issue.key, record);
            }

            start_at += fetched;
            // a short page is the last one, whether or not `total` was sent
            let exhausted = page.total.is_some_and(|total| start_at >= total);
            if fetched == 0 || fetched < page_size || exhausted {
                break;
            }
        }

        info!(
            record_count = records.len(),
            url = %self.config.url,
            "fetched operational tables from tracker"
        );
        Ok(records)
    }
}
