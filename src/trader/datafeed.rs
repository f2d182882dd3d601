//! Datafeed module for connecting to different data sources.

use std::collections::HashMap;

use async_trait::async_trait;

use super::object::{HistoryRequest, PriceSeries};
use crate::error::DashboardError;

/// Abstract datafeed trait for connecting to different data sources
#[async_trait]
pub trait BaseDatafeed: Send + Sync {
    /// Datafeed name used in logs
    fn name(&self) -> &str;

    /// Query history bar data.
    ///
    /// An empty or unusable answer must be reported as
    /// `DashboardError::DataUnavailable`, never as an empty series.
    async fn query_bar_history(&self, req: HistoryRequest) -> Result<PriceSeries, DashboardError>;
}

/// Empty datafeed implementation for when no datafeed is configured
pub struct EmptyDatafeed;

impl EmptyDatafeed {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmptyDatafeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseDatafeed for EmptyDatafeed {
    fn name(&self) -> &str {
        "empty"
    }

    async fn query_bar_history(&self, req: HistoryRequest) -> Result<PriceSeries, DashboardError> {
        tracing::warn!("No datafeed configured, check the datafeed.name setting");
        Err(DashboardError::unavailable(req.symbol, "no datafeed configured"))
    }
}

/// Datafeed serving preloaded series, keyed by symbol
#[derive(Default)]
pub struct MemoryDatafeed {
    series: HashMap<String, PriceSeries>,
}

impl MemoryDatafeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series under its own symbol
    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.symbol().to_string(), series);
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }
}

#[async_trait]
impl BaseDatafeed for MemoryDatafeed {
    fn name(&self) -> &str {
        "memory"
    }

    async fn query_bar_history(&self, req: HistoryRequest) -> Result<PriceSeries, DashboardError> {
        match self.series.get(&req.symbol) {
            Some(series) if !series.is_empty() => Ok(series.clone()),
            Some(_) => Err(DashboardError::unavailable(req.symbol, "empty series")),
            None => Err(DashboardError::unavailable(req.symbol, "unknown symbol")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::trader::constant::{Interval, Period};
    use crate::trader::object::BarData;

    fn request(symbol: &str) -> HistoryRequest {
        HistoryRequest::new(symbol, Period::Day5, Interval::Hour)
    }

    #[tokio::test]
    async fn test_empty_datafeed() {
        let datafeed = EmptyDatafeed::new();

        let result = datafeed.query_bar_history(request("AAPL")).await;
        assert!(result.unwrap_err().is_unavailable());
    }

    #[tokio::test]
    async fn test_memory_datafeed() {
        let dt = Utc.timestamp_opt(0, 0).unwrap();
        let series = PriceSeries::new("AAPL", vec![BarData::new(dt, 1.0, 1.0, 1.0, 1.0, 10.0)]);
        let datafeed = MemoryDatafeed::new()
            .with_series(series.clone())
            .with_series(PriceSeries::empty("DEAD"));

        assert_eq!(datafeed.query_bar_history(request("AAPL")).await.unwrap(), series);
        assert!(datafeed.query_bar_history(request("DEAD")).await.unwrap_err().is_unavailable());
        assert!(datafeed.query_bar_history(request("MSFT")).await.unwrap_err().is_unavailable());
    }
}
