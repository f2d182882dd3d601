//! Dashboard engine: one refresh cycle of fetch, indicators and composition
//! for every watch-list entry.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures_util::future::{join_all, try_join};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::params::{ChartRequest, DashboardParams};
use crate::chart::{ChartComposer, ChartGrid, IndicatorEngine, InstrumentChart};
use crate::error::DashboardError;
use crate::trader::constant::{Interval, Period};
use crate::trader::datafeed::BaseDatafeed;
use crate::trader::object::{HistoryRequest, Instrument, PriceSeries};
use crate::trader::spread::difference;

/// Output of one refresh cycle
#[derive(Debug, Clone, Serialize)]
pub struct DashboardFrame {
    pub generated_at: DateTime<Utc>,
    pub period: Period,
    pub interval: Interval,
    pub grid: ChartGrid,
}

impl DashboardFrame {
    /// Charts that were produced, in grid order
    pub fn charts(&self) -> impl Iterator<Item = &InstrumentChart> {
        self.grid.cells().iter().filter_map(|cell| cell.chart())
    }
}

/// Runs the per-instrument pipeline against a datafeed
pub struct DashboardEngine {
    datafeed: Arc<dyn BaseDatafeed>,
}

impl DashboardEngine {
    pub fn new(datafeed: Arc<dyn BaseDatafeed>) -> Self {
        Self { datafeed }
    }

    pub fn datafeed_name(&self) -> &str {
        self.datafeed.name()
    }

    /// Fetch the series for an instrument, differencing both legs of a spread.
    ///
    /// Incomplete bars are dropped before the series is returned.
    pub async fn fetch_instrument(
        &self,
        instrument: &Instrument,
        period: Period,
        interval: Interval,
    ) -> Result<PriceSeries, DashboardError> {
        match instrument {
            Instrument::Single(code) => {
                let series = self
                    .datafeed
                    .query_bar_history(HistoryRequest::new(code.as_str(), period, interval))
                    .await?;
                Ok(series.drop_incomplete())
            }
            Instrument::Spread { minuend, subtrahend } => {
                let (left, right) = try_join(
                    self.datafeed
                        .query_bar_history(HistoryRequest::new(minuend.as_str(), period, interval)),
                    self.datafeed
                        .query_bar_history(HistoryRequest::new(subtrahend.as_str(), period, interval)),
                )
                .await?;
                let spread = difference(&left, &right)?;
                Ok(spread.drop_incomplete())
            }
        }
    }

    /// Fetch, compute indicators and compose the figure for one request
    pub async fn chart_instrument(&self, request: &ChartRequest) -> Result<InstrumentChart, DashboardError> {
        let series = self
            .fetch_instrument(&request.instrument, request.period, request.interval)
            .await?;
        debug!("{}: {} bars at {}", request.instrument, series.len(), request.interval);

        let columns = IndicatorEngine::compute(&series, &request.indicators);
        ChartComposer::compose(series, columns)
    }

    /// Run one refresh cycle over the whole watch list.
    ///
    /// Instruments are processed concurrently and kept in watch-list order.
    /// A failing instrument only affects its own grid cell.
    pub async fn run_cycle(&self, params: &DashboardParams) -> Result<DashboardFrame, DashboardError> {
        let start = Instant::now();
        let requests = params.chart_requests();

        let outcomes = join_all(requests.iter().map(|(title, request)| async move {
            let outcome = match request {
                Ok(request) => self.chart_instrument(request).await,
                Err(e) => Err(e.clone()),
            };
            if let Err(e) = &outcome {
                warn!("{}: {}", title, e);
            }
            (title.clone(), outcome)
        }))
        .await;

        let grid = ChartGrid::arrange(outcomes, params.columns)?;
        let failures = grid.failures().count();
        info!(
            "Refresh cycle done: {} charts, {} unavailable, {:.0?}",
            grid.len() - failures,
            failures,
            start.elapsed()
        );

        Ok(DashboardFrame {
            generated_at: Utc::now(),
            period: params.period,
            interval: params.interval,
            grid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;
    use crate::chart::IndicatorSpec;
    use crate::dashboard::watchlist::{Market, WatchItem};
    use crate::trader::datafeed::MemoryDatafeed;
    use crate::trader::object::BarData;

    fn hourly(symbol: &str, start_hour: i64, closes: &[f64], volume: f64) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let dt = start + chrono::Duration::hours(start_hour + i as i64);
                BarData::new(dt, c, c + 0.1, c - 0.1, c, volume)
            })
            .collect();
        PriceSeries::new(symbol, bars)
    }

    fn params(items: Vec<WatchItem>, indicators: Vec<IndicatorSpec>) -> DashboardParams {
        DashboardParams {
            watchlist: items,
            period: Period::Day5,
            interval: Interval::Minute15,
            indicators,
            rejected_indicators: vec![],
            columns: 2,
            refresh: Duration::from_secs(10),
        }
    }

    fn engine(datafeed: MemoryDatafeed) -> DashboardEngine {
        DashboardEngine::new(Arc::new(datafeed))
    }

    #[tokio::test]
    async fn test_cycle_isolates_failures() {
        let closes: Vec<f64> = (100..130).map(|c| c as f64).collect();
        let datafeed = MemoryDatafeed::new().with_series(hourly("AAPL", 0, &closes, 1000.0));
        let engine = engine(datafeed);
        let items = vec![
            WatchItem::new("Apple", "AAPL", Market::Us),
            WatchItem::new("Gone", "GONE", Market::Custom),
        ];

        let frame = engine
            .run_cycle(&params(items, vec![IndicatorSpec::MovingAverage { window: 5 }]))
            .await
            .unwrap();

        let cells = frame.grid.cells();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].title, "Apple (AAPL)");
        let chart = cells[0].chart().unwrap();
        assert_eq!(chart.last_price, 129.0);
        assert_eq!(chart.figure.line_traces()[0].name, "MA5");
        assert!(cells[1].error().unwrap().is_unavailable());
        assert_eq!(frame.charts().count(), 1);
    }

    #[tokio::test]
    async fn test_spread_uses_overlapping_bars_only() {
        let datafeed = MemoryDatafeed::new()
            .with_series(hourly("^TNX", 0, &[42.0, 42.5, 43.0, 43.5], 0.0))
            .with_series(hourly("^IRX", 2, &[52.0, 52.0, 52.0], 0.0));
        let engine = engine(datafeed);
        let instrument: Instrument = "^TNX-^IRX".parse().unwrap();

        let series = engine
            .fetch_instrument(&instrument, Period::Day5, Interval::Hour)
            .await
            .unwrap();

        assert_eq!(series.symbol(), "^TNX-^IRX");
        assert_eq!(series.len(), 2);
        assert_abs_diff_eq!(series.closes()[0], -9.0, epsilon = 1e-9);
        assert_abs_diff_eq!(series.closes()[1], -8.5, epsilon = 1e-9);
    }

    #[tokio::test]
    async fn test_disjoint_spread_is_unavailable_cell() {
        let datafeed = MemoryDatafeed::new()
            .with_series(hourly("^TYX", 0, &[45.0, 45.1], 0.0))
            .with_series(hourly("^TNX", 10, &[42.0, 42.1], 0.0));
        let engine = engine(datafeed);
        let items = vec![WatchItem::new("US 30Y-10Y yield spread", "^TYX-^TNX", Market::Bond)];

        let frame = engine.run_cycle(&params(items, vec![])).await.unwrap();

        let error = frame.grid.cells()[0].error().unwrap();
        assert!(matches!(error, DashboardError::Alignment { .. }));
        assert!(error.is_unavailable());
    }

    #[tokio::test]
    async fn test_missing_leg_fails_spread() {
        let datafeed = MemoryDatafeed::new().with_series(hourly("^TNX", 0, &[42.0], 0.0));
        let engine = engine(datafeed);
        let instrument: Instrument = "^TNX-^IRX".parse().unwrap();

        let err = engine
            .fetch_instrument(&instrument, Period::Day1, Interval::Hour)
            .await
            .unwrap_err();

        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_incomplete_only_series_is_unavailable() {
        let bad = BarData::new(Utc.timestamp_opt(0, 0).unwrap(), f64::NAN, 1.0, 1.0, 1.0, 1.0);
        let datafeed = MemoryDatafeed::new().with_series(PriceSeries::new("NAN", vec![bad]));
        let engine = engine(datafeed);
        let items = vec![WatchItem::new("NAN", "NAN", Market::Custom)];

        let frame = engine.run_cycle(&params(items, vec![])).await.unwrap();

        assert!(frame.grid.cells()[0].error().unwrap().is_unavailable());
    }

    #[tokio::test]
    async fn test_grid_positions_follow_watchlist_order() {
        let mut datafeed = MemoryDatafeed::new();
        let codes = ["A", "B", "C", "D", "E"];
        for code in codes {
            datafeed.insert(hourly(code, 0, &[1.0, 2.0, 3.0], 10.0));
        }
        let engine = engine(datafeed);
        let items = codes
            .iter()
            .map(|c| WatchItem::new(*c, *c, Market::Custom))
            .collect();

        let frame = engine.run_cycle(&params(items, vec![])).await.unwrap();

        let symbols: Vec<&str> = frame.charts().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, codes.to_vec());
        assert_eq!(frame.grid.row_count(), 3);
        assert_eq!(frame.grid.cells()[4].row, 2);
    }
}
