//! Dashboard parameters resolved from settings, and the per-instrument chart
//! requests built from them each cycle.

use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use super::watchlist::{resolve_symbols, WatchItem};
use crate::chart::{cell_title, parse_indicator_list, IndicatorSpec};
use crate::error::{DashboardError, IndicatorError};
use crate::trader::constant::{validate_period_interval, Interval, Period};
use crate::trader::object::Instrument;
use crate::trader::setting::Settings;

/// Validated dashboard parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardParams {
    pub watchlist: Vec<WatchItem>,
    pub period: Period,
    pub interval: Interval,
    pub indicators: Vec<IndicatorSpec>,
    /// Labels that failed to parse, skipped but kept for reporting
    pub rejected_indicators: Vec<IndicatorError>,
    pub columns: usize,
    pub refresh: Duration,
}

impl DashboardParams {
    /// Read the `dashboard.*` keys.
    ///
    /// Unknown period or interval labels, a minute interval over a long
    /// period, zero grid columns and a zero refresh interval are rejected.
    /// Bad indicator labels are only reported.
    pub fn from_settings(settings: &Settings) -> Result<Self, DashboardError> {
        let period: Period = settings
            .get_string("dashboard.period")
            .unwrap_or_else(|| "1d".to_string())
            .parse()?;
        let interval: Interval = settings
            .get_string("dashboard.interval")
            .unwrap_or_else(|| "15m".to_string())
            .parse()?;
        validate_period_interval(period, interval)?;

        let columns = settings.get_int("dashboard.columns").unwrap_or(2);
        if columns <= 0 {
            return Err(DashboardError::invalid_params(format!(
                "grid columns must be positive, got {}",
                columns
            )));
        }

        let refresh = settings.get_int("dashboard.refresh").unwrap_or(10);
        if refresh <= 0 {
            return Err(DashboardError::invalid_params(format!(
                "refresh interval must be positive, got {}",
                refresh
            )));
        }

        let labels = settings.get_string("dashboard.indicators").unwrap_or_default();
        let (indicators, rejected_indicators) = parse_indicator_list(&labels);
        for error in &rejected_indicators {
            warn!("Skipping indicator: {}", error);
        }

        let symbols = settings.get_string("dashboard.symbols").unwrap_or_default();

        Ok(Self {
            watchlist: resolve_symbols(&symbols),
            period,
            interval,
            indicators,
            rejected_indicators,
            columns: columns as usize,
            refresh: Duration::from_secs(refresh as u64),
        })
    }

    /// Chart requests in watch-list order, with their grid positions.
    ///
    /// An entry whose code cannot be parsed yields its error in place.
    pub fn chart_requests(&self) -> Vec<(String, Result<ChartRequest, DashboardError>)> {
        self.watchlist
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let title = cell_title(&item.name, &item.code);
                let request = item.instrument().map(|instrument| ChartRequest {
                    name: item.name.clone(),
                    instrument,
                    period: self.period,
                    interval: item.market.interval_override().unwrap_or(self.interval),
                    indicators: self.indicators.clone(),
                    row: i / self.columns,
                    column: i % self.columns,
                });
                (title, request)
            })
            .collect()
    }
}

/// Everything needed to chart one instrument in one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRequest {
    pub name: String,
    pub instrument: Instrument,
    pub period: Period,
    pub interval: Interval,
    pub indicators: Vec<IndicatorSpec>,
    pub row: usize,
    pub column: usize,
}

impl ChartRequest {
    pub fn title(&self) -> String {
        cell_title(&self.name, &self.instrument.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trader::setting::SettingValue;

    fn settings(pairs: &[(&str, SettingValue)]) -> Settings {
        let settings = Settings::with_defaults();
        for (key, value) in pairs {
            settings.set(*key, value.clone());
        }
        settings
    }

    #[test]
    fn test_defaults_resolve() {
        let params = DashboardParams::from_settings(&Settings::with_defaults()).unwrap();

        assert_eq!(params.period, Period::Day1);
        assert_eq!(params.interval, Interval::Minute15);
        assert_eq!(params.indicators, vec![IndicatorSpec::MovingAverage { window: 1 }]);
        assert_eq!(params.columns, 2);
        assert_eq!(params.refresh, Duration::from_secs(10));
        assert!(params.watchlist.is_empty());
    }

    #[test]
    fn test_minute_interval_over_long_period_rejected() {
        let settings = settings(&[
            ("dashboard.period", SettingValue::String("1y".to_string())),
            ("dashboard.interval", SettingValue::String("1m".to_string())),
        ]);

        let err = DashboardParams::from_settings(&settings).unwrap_err();

        assert!(matches!(err, DashboardError::InvalidParams(_)));
    }

    #[test]
    fn test_zero_columns_rejected() {
        let settings = settings(&[("dashboard.columns", SettingValue::Int(0))]);
        assert!(DashboardParams::from_settings(&settings).is_err());
    }

    #[test]
    fn test_bad_indicator_labels_are_reported_not_fatal() {
        let settings = settings(&[(
            "dashboard.indicators",
            SettingValue::String("MA5,MAx,FOO,RSI".to_string()),
        )]);

        let params = DashboardParams::from_settings(&settings).unwrap();

        assert_eq!(
            params.indicators,
            vec![
                IndicatorSpec::MovingAverage { window: 5 },
                IndicatorSpec::RelativeStrengthIndex { window: 14 },
            ]
        );
        assert_eq!(params.rejected_indicators.len(), 2);
    }

    #[test]
    fn test_chart_requests_positions_and_bond_interval() {
        let settings = settings(&[
            ("dashboard.symbols", SettingValue::String("AAPL,MSFT,^TNX-^IRX".to_string())),
            ("dashboard.columns", SettingValue::Int(2)),
        ]);
        let params = DashboardParams::from_settings(&settings).unwrap();

        let requests: Vec<ChartRequest> = params
            .chart_requests()
            .into_iter()
            .map(|(_, r)| r.unwrap())
            .collect();

        assert_eq!((requests[0].row, requests[0].column), (0, 0));
        assert_eq!((requests[1].row, requests[1].column), (0, 1));
        assert_eq!((requests[2].row, requests[2].column), (1, 0));
        assert_eq!(requests[0].interval, Interval::Minute15);
        assert_eq!(requests[2].interval, Interval::Hour);
        assert_eq!(requests[2].title(), "US 10Y-13W yield spread (^TNX-^IRX)");
    }
}
