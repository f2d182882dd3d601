//! Stock Dashboard - candlestick charts with indicators for stocks, ETFs and
//! bond yields.
//!
//! This crate provides:
//!
//! - Price series fetching behind a datafeed trait, with a Yahoo Finance
//!   implementation and timestamp-aligned spreads of two series
//! - Moving average, exponential moving average and RSI columns
//! - Figure composition with indicator overlays and a volume panel on a
//!   secondary, rescaled axis
//! - Grid arrangement of many instruments and a periodic refresh loop
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stock_dashboard::dashboard::{DashboardEngine, DashboardParams};
//! use stock_dashboard::gateway::YahooDatafeed;
//! use stock_dashboard::trader::Settings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::with_defaults();
//!     let params = DashboardParams::from_settings(&settings)?;
//!     let engine = DashboardEngine::new(Arc::new(YahooDatafeed::from_settings(&settings)?));
//!     let frame = engine.run_cycle(&params).await?;
//!     for chart in frame.charts() {
//!         println!("{} {:.2}", chart.symbol, chart.last_price);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod cli;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod trader;

// Re-export commonly used types
pub use chart::{
    ChartComposer, ChartGrid, Figure, IndicatorColumn, IndicatorEngine, IndicatorSpec, InstrumentChart,
};
pub use dashboard::{DashboardEngine, DashboardFrame, DashboardParams, RefreshScheduler};
pub use error::{DashboardError, IndicatorError};
pub use gateway::YahooDatafeed;
pub use trader::{
    // Constants
    Interval, Period,
    // Data objects
    BarData, HistoryRequest, Instrument, PriceSeries,
    // Datafeeds
    BaseDatafeed, EmptyDatafeed, MemoryDatafeed,
    // Settings
    Settings, SETTINGS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
