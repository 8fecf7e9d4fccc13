use std::time::Duration;

use anyhow::{Context, Result};
use captain_model::PlayerId;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://leagues.ustanorcal.com";

/// Browser-like agent string; the league site rejects obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Where pages live and how politely to fetch them.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Site root the page templates are joined onto.
    pub base_url: String,
    pub user_agent: String,
    /// Upper bound on a single request, connect through body.
    pub timeout: Duration,
    /// Pause after every request before the next one may start.
    pub delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_DELAY,
        }
    }
}

impl FetchConfig {
    /// The page listing a player's matches and team memberships.
    pub fn player_url(&self, player_id: &PlayerId) -> String {
        format!("{}/playermatches.asp?id={player_id}", self.base())
    }

    /// The page listing a team's roster.
    pub fn team_url(&self, team_id: &str) -> String {
        format!("{}/teaminfo.asp?id={team_id}", self.base())
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        source: reqwest::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url }
            | FetchError::Status { url, .. }
            | FetchError::Request { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// Anything that can turn a URL into page text.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP page source with a fixed agent, a timeout and a post-request pause.
pub struct Fetcher {
    client: reqwest::Client,
    delay: Duration,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            delay: config.delay,
        })
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e, false))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|e| classify(url, e, true))
    }
}

fn classify(url: &str, source: reqwest::Error, reading_body: bool) -> FetchError {
    let url = url.to_string();
    if source.is_timeout() {
        FetchError::Timeout { url }
    } else if reading_body {
        FetchError::Body { url, source }
    } else {
        FetchError::Request { url, source }
    }
}

impl PageSource for Fetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::info!(url = %url, "Fetching");
        let result = self.get(url).await;
        match &result {
            Ok(html) => tracing::debug!(url = %url, bytes = html.len(), "Received HTML"),
            Err(e) => tracing::debug!(url = %url, error = %e, "Fetch failed"),
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        result
    }
}
