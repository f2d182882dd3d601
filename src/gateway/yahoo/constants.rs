//! Yahoo Finance API constants.

/// Public REST host
pub const YAHOO_REST_HOST: &str = "https://query1.finance.yahoo.com";

/// Chart endpoint path, the symbol is appended as the last segment
pub const CHART_PATH: &str = "/v8/finance/chart";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The endpoint rejects requests without a browser-like agent
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) stock_dashboard";
