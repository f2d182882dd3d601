//! Trader module - market data types and platform plumbing.
//!
//! - **constant**: History periods and bar intervals
//! - **object**: Bar data, price series, instruments and history requests
//! - **spread**: Timestamp-aligned differencing of two series
//! - **datafeed**: Datafeed abstraction for market data
//! - **setting**: Global settings management
//! - **logger**: Logging utilities
//! - **utility**: Dashboard folders and JSON helpers

pub mod constant;
pub mod datafeed;
pub mod logger;
pub mod object;
pub mod setting;
pub mod spread;
pub mod utility;

// Re-exports for convenience
pub use constant::{validate_period_interval, Interval, Period};
pub use datafeed::{BaseDatafeed, EmptyDatafeed, MemoryDatafeed};
pub use logger::{init_logger, Logger, CRITICAL, DEBUG, ERROR, INFO, WARNING};
pub use object::{BarData, HistoryRequest, Instrument, PriceSeries};
pub use setting::{Settings, SettingValue, SETTINGS};
pub use spread::difference;
pub use utility::{get_file_path, get_folder_path, save_json, DASHBOARD_DIR, TEMP_DIR};
