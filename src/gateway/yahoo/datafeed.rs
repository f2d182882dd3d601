//! Yahoo chart payload parsing and the `BaseDatafeed` implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::constants::{DEFAULT_TIMEOUT_SECS, YAHOO_REST_HOST};
use super::rest_client::{RestError, YahooRestClient};
use crate::error::DashboardError;
use crate::trader::datafeed::BaseDatafeed;
use crate::trader::object::{BarData, HistoryRequest, PriceSeries};
use crate::trader::setting::Settings;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

fn column_value(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}

fn bar_at(quote: &QuoteColumns, timestamp: i64, i: usize) -> Option<BarData> {
    Some(BarData::new(
        DateTime::<Utc>::from_timestamp(timestamp, 0)?,
        column_value(&quote.open, i)?,
        column_value(&quote.high, i)?,
        column_value(&quote.low, i)?,
        column_value(&quote.close, i)?,
        column_value(&quote.volume, i)?,
    ))
}

/// Convert a chart payload into a series.
///
/// Rows with any missing field are dropped. An API error object, a missing
/// result or a result without a single complete row all map to
/// `DataUnavailable`.
pub fn parse_chart_response(symbol: &str, text: &str) -> Result<PriceSeries, DashboardError> {
    let response: ChartResponse = serde_json::from_str(text)
        .map_err(|e| DashboardError::unavailable(symbol, format!("malformed chart payload: {}", e)))?;

    if let Some(error) = response.chart.error {
        return Err(DashboardError::unavailable(
            symbol,
            format!("{}: {}", error.code, error.description),
        ));
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| DashboardError::unavailable(symbol, "empty chart result"))?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut dropped = 0usize;
    let bars: Vec<BarData> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let bar = bar_at(&quote, ts, i);
            if bar.is_none() {
                dropped += 1;
            }
            bar
        })
        .collect();

    if dropped > 0 {
        debug!("Dropped {} incomplete rows for {}", dropped, symbol);
    }

    let series = PriceSeries::new(symbol, bars).drop_incomplete();
    if series.is_empty() {
        return Err(DashboardError::unavailable(symbol, "no complete bars in chart result"));
    }

    Ok(series)
}

/// Datafeed backed by the Yahoo Finance chart endpoint
pub struct YahooDatafeed {
    rest_client: YahooRestClient,
}

impl YahooDatafeed {
    pub fn new(host: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            rest_client: YahooRestClient::new(host, timeout)?,
        })
    }

    /// Build from the `datafeed.host` and `datafeed.timeout` settings
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        let host = settings
            .get_string("datafeed.host")
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| YAHOO_REST_HOST.to_string());
        let timeout = settings
            .get_int("datafeed.timeout")
            .filter(|t| *t > 0)
            .map(|t| t as u64)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(&host, Duration::from_secs(timeout))
    }

    pub fn host(&self) -> &str {
        self.rest_client.host()
    }
}

#[async_trait]
impl BaseDatafeed for YahooDatafeed {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn query_bar_history(&self, req: HistoryRequest) -> Result<PriceSeries, DashboardError> {
        let text = match self.rest_client.get_chart(&req.symbol, req.period, req.interval).await {
            Ok(text) => text,
            // Unknown symbols come back as 404 with a JSON error description
            Err(RestError::Status { code, body }) => {
                warn!("Yahoo API error {} for {}", code, req.symbol);
                let reason = format!("http status {}", code);
                return Err(parse_chart_response(&req.symbol, &body)
                    .err()
                    .unwrap_or_else(|| DashboardError::unavailable(&req.symbol, reason)));
            }
            Err(e) => {
                warn!("Yahoo request for {} failed: {}", req.symbol, e);
                return Err(DashboardError::unavailable(&req.symbol, e.to_string()));
            }
        };

        let series = parse_chart_response(&req.symbol, &text)?;
        debug!(
            "Fetched {} bars for {} ({}, {})",
            series.len(),
            req.symbol,
            req.period,
            req.interval
        );
        Ok(series)
    }
}
