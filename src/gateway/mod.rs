//! Gateway module - Market data source implementations.
//!
//! - **yahoo**: Yahoo Finance chart endpoint datafeed

pub mod yahoo;

// Re-exports
pub use yahoo::YahooDatafeed;
