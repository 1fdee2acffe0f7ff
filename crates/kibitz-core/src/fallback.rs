//! Direct analysis-request fallback.
//!
//! When clicking the page controls does not take, the site still accepts a
//! plain `POST /{gameId}/request-analysis` carrying the session cookies.
//! The capability is a trait so the orchestrator never touches a real
//! network in tests.

use async_trait::async_trait;
use tracing::debug;

use crate::error::FallbackError;

/// Capability to submit an analysis request outside the page.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Request analysis for one game. One shot: no retries on failure.
    async fn request_analysis(&self, game_id: &str) -> Result<(), FallbackError>;
}

/// HTTP implementation posting to the site with ambient session cookies.
pub struct HttpAnalysisBackend {
    client: reqwest::Client,
    base: String,
}

impl HttpAnalysisBackend {
    /// Create a backend for the given site base URL.
    pub fn new(base: &str) -> Result<Self, FallbackError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    async fn request_analysis(&self, game_id: &str) -> Result<(), FallbackError> {
        let url = format!("{}/{}/request-analysis", self.base, game_id);
        debug!("POST {}", url);

        let response = self.client.post(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FallbackError::Rejected { status });
        }
        Ok(())
    }
}
