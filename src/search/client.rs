//! HTTP client for the teacher search endpoint.
//!
//! One operation: GET `{base_url}/results?...` with JSON headers and
//! cookies included, then parse the `{ "teachers": [...] }` body.

use async_trait::async_trait;
use rand::Rng;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Instant;
use tracing::{info, warn};

use super::query::build_results_query;
use super::types::{SearchCriteria, SearchResponse, Teacher};
use crate::config::SearchConfig;
use crate::error::SearchError;

/// Source of teacher results.
///
/// [`SearchClient`] is the real implementation; tests drive the
/// submission flow with in-memory doubles.
#[async_trait]
pub trait TeacherDirectory: Send + Sync {
    /// Fetches teachers for an already-built query string
    /// (e.g. `/results?&day=Mon&start_time=09:00&end_time=10:00`).
    async fn fetch_teachers(&self, query: &str) -> Result<Vec<Teacher>, SearchError>;
}

/// Client for the tutor-discovery backend.
pub struct SearchClient {
    client: Client,
    config: SearchConfig,
}

impl SearchClient {
    /// Creates a client with default configuration.
    pub fn new() -> Result<Self, SearchError> {
        Self::with_config(SearchConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate_base_url()?;

        // Cookie store keeps the session credentials flowing with each request
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SearchError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    /// Builds the query for `criteria` and fetches matching teachers.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Teacher>, SearchError> {
        self.fetch_teachers(&build_results_query(criteria)).await
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[async_trait]
impl TeacherDirectory for SearchClient {
    async fn fetch_teachers(&self, query: &str) -> Result<Vec<Teacher>, SearchError> {
        let correlation_id = generate_correlation_id();
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), query);
        let start = Instant::now();

        info!(
            correlation_id = %correlation_id,
            url = %url,
            "Fetching teacher results"
        );

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            warn!(
                correlation_id = %correlation_id,
                status = status.as_u16(),
                "Search request failed"
            );
            return Err(SearchError::SearchFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        info!(
            correlation_id = %correlation_id,
            teachers = parsed.teachers.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Search completed"
        );

        Ok(parsed.teachers)
    }
}

/// Generates a unique correlation ID for request tracing.
fn generate_correlation_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros();
    let random: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", timestamp & 0xFFFFFFFF, random)
}
