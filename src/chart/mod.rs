//! Chart module for composing instrument figures.
//!
//! This module provides:
//! - `IndicatorEngine` - Moving average, exponential moving average and RSI columns
//! - `BarManager` - Bar data shared by the chart items
//! - `CandleItem`, `LineItem`, `VolumeItem` - Traces of one figure
//! - `ChartComposer` - Assembles items into a figure with a secondary volume axis
//! - `ChartGrid` - Row-major placement of composed charts
//!
//! # Example
//!
//! ```ignore
//! use stock_dashboard::chart::{ChartComposer, IndicatorEngine, IndicatorSpec};
//!
//! let columns = IndicatorEngine::compute(&series, &[IndicatorSpec::MovingAverage { window: 5 }]);
//! let chart = ChartComposer::compose(series, columns)?;
//! println!("{}", chart.figure.to_json()?);
//! ```

mod base;
mod composer;
mod figure;
mod grid;
mod indicator;
mod item;
mod manager;

pub use base::*;
pub use composer::{build_layout, ChartComposer, InstrumentChart};
pub use figure::{Axis, BarTrace, CandlestickTrace, Figure, Layout, LineTrace, Margin, Marker, RangeSlider, Trace};
pub use grid::{cell_title, ChartGrid, GridCell};
pub use indicator::*;
pub use item::{scale_volume, CandleItem, ChartItem, LineItem, VolumeItem, VolumeScale};
pub use manager::BarManager;
