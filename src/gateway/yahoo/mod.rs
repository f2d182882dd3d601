//! Yahoo Finance datafeed.
//!
//! History comes from the public v8 chart endpoint, one request per symbol;
//! spreads are fetched leg by leg and differenced by the caller.

pub mod constants;
pub mod datafeed;
pub mod rest_client;

pub use datafeed::YahooDatafeed;
pub use rest_client::YahooRestClient;
