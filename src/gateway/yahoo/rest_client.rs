//! Yahoo Finance REST API client.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::constants::{CHART_PATH, USER_AGENT};
use crate::trader::constant::{Interval, Period};

/// Failure of one chart request, before any payload interpretation
#[derive(Debug, Error)]
pub enum RestError {
    /// Host or symbol did not form a valid URL
    #[error("invalid url: {0}")]
    Url(String),
    /// Transport failure or timeout
    #[error("request failed: {0}")]
    Transport(String),
    /// Non-success status with the raw body
    #[error("http status {code}")]
    Status { code: u16, body: String },
}

/// REST API client for the chart endpoint
pub struct YahooRestClient {
    client: Client,
    host: String,
}

impl YahooRestClient {
    /// Create a new REST client
    pub fn new(host: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build `{host}/v8/finance/chart/{symbol}?range=..&interval=..`
    pub fn build_chart_url(&self, symbol: &str, period: Period, interval: Interval) -> Result<Url, RestError> {
        let mut url = Url::parse(&format!("{}{}", self.host, CHART_PATH))
            .map_err(|e| RestError::Url(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| RestError::Url(format!("{} cannot carry a path", self.host)))?
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("range", period.value())
            .append_pair("interval", interval.value());

        Ok(url)
    }

    /// GET the chart payload as text.
    ///
    /// A non-success status still returns the body in the error, since the
    /// endpoint reports unknown symbols as a 404 with a JSON description.
    pub async fn get_chart(&self, symbol: &str, period: Period, interval: Interval) -> Result<String, RestError> {
        let url = self.build_chart_url(symbol, period, interval)?;

        debug!("Yahoo API request: GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RestError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RestError::Transport(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            if status.as_u16() == 429 {
                warn!("Yahoo API rate limit hit for {}", symbol);
            }
            return Err(RestError::Status {
                code: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}
