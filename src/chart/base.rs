//! Base constants and utility functions for the chart module.

// Volume bar color
pub const VOLUME_COLOR: &str = "rgba(100, 100, 100, 0.3)";

// Trace and axis names
pub const CANDLE_NAME: &str = "Price";
pub const VOLUME_NAME: &str = "Volume (scaled)";
pub const PRICE_AXIS_TITLE: &str = "Price";
pub const VOLUME_AXIS_TITLE: &str = "Scaled volume";

// Volume panel scaling
pub const VOLUME_PRICE_RATIO: f64 = 0.3;
pub const VOLUME_AXIS_HEADROOM: f64 = 5.0;

// Layout constants
pub const CHART_HEIGHT: u32 = 500;
pub const MARGIN_LEFT: u32 = 0;
pub const MARGIN_RIGHT: u32 = 0;
pub const MARGIN_TOP: u32 = 30;
pub const MARGIN_BOTTOM: u32 = 0;

/// Format price with two decimals, as shown in the last-price metric
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// Format volume with appropriate units (K, M, B)
pub fn format_volume(volume: f64) -> String {
    if volume >= 1_000_000_000.0 {
        format!("{:.2}B", volume / 1_000_000_000.0)
    } else if volume >= 1_000_000.0 {
        format!("{:.2}M", volume / 1_000_000.0)
    } else if volume >= 1_000.0 {
        format!("{:.2}K", volume / 1_000.0)
    } else {
        format!("{:.2}", volume)
    }
}
