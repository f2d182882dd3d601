//! Bar data manager for the chart module.
//!
//! Wraps one price series with the shared x values and the range queries the
//! chart items need for axis scaling.

use chrono::{DateTime, Utc};

use crate::trader::object::{BarData, PriceSeries};

/// Manages the bar data of one chart
pub struct BarManager {
    /// Ordered series
    series: PriceSeries,
    /// X values shared by every trace
    datetimes: Vec<DateTime<Utc>>,
}

impl BarManager {
    /// Create a manager over a series
    pub fn new(series: PriceSeries) -> Self {
        let datetimes = series.datetimes();
        Self { series, datetimes }
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    /// Get total number of bars
    pub fn get_count(&self) -> usize {
        self.series.len()
    }

    /// Get all bar data
    pub fn get_all_bars(&self) -> &[BarData] {
        self.series.bars()
    }

    /// Bar timestamps in order
    pub fn get_datetimes(&self) -> &[DateTime<Utc>] {
        &self.datetimes
    }

    /// Low/high extent over all bars, `(0.0, 1.0)` when empty
    pub fn get_price_range(&self) -> (f64, f64) {
        let bars = self.series.bars();
        let Some(first) = bars.first() else {
            return (0.0, 1.0);
        };

        bars.iter().skip(1).fold((first.low_price, first.high_price), |(lo, hi), bar| {
            (lo.min(bar.low_price), hi.max(bar.high_price))
        })
    }

    /// Largest volume, floored at zero
    pub fn get_max_volume(&self) -> f64 {
        self.series
            .bars()
            .iter()
            .map(|bar| bar.volume)
            .fold(0.0, f64::max)
    }

    /// Largest absolute close, the price reference for volume scaling
    pub fn get_max_abs_close(&self) -> f64 {
        self.series
            .bars()
            .iter()
            .map(|bar| bar.close_price.abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_bar(minute: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> BarData {
        let datetime = Utc.timestamp_opt(minute * 60, 0).unwrap();
        BarData::new(datetime, open, high, low, close, volume)
    }

    #[test]
    fn test_bar_manager_datetimes_follow_series_order() {
        let bars = vec![
            create_test_bar(2, 102.0, 110.0, 98.0, 108.0, 1500.0),
            create_test_bar(1, 100.0, 105.0, 95.0, 102.0, 1000.0),
        ];
        let manager = BarManager::new(PriceSeries::new("TEST", bars));

        assert_eq!(manager.get_count(), 2);
        assert_eq!(manager.get_datetimes()[0], Utc.timestamp_opt(60, 0).unwrap());
        assert_eq!(manager.get_all_bars()[1].close_price, 108.0);
    }

    #[test]
    fn test_bar_manager_ranges() {
        let bars = vec![
            create_test_bar(1, 100.0, 105.0, 95.0, 102.0, 1000.0),
            create_test_bar(2, 102.0, 110.0, 98.0, -108.0, 1500.0),
        ];
        let manager = BarManager::new(PriceSeries::new("TEST", bars));

        assert_eq!(manager.get_price_range(), (95.0, 110.0));
        assert_eq!(manager.get_max_volume(), 1500.0);
        assert_eq!(manager.get_max_abs_close(), 108.0);
    }

    #[test]
    fn test_bar_manager_empty() {
        let manager = BarManager::new(PriceSeries::empty("TEST"));
        assert_eq!(manager.get_price_range(), (0.0, 1.0));
        assert_eq!(manager.get_max_volume(), 0.0);
    }
}
