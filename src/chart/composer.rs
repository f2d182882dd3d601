//! Chart composition: candles, indicator overlays and the scaled volume panel
//! of one instrument, assembled into a single figure.

use serde::{Deserialize, Serialize};

use super::base::{
    CHART_HEIGHT, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, PRICE_AXIS_TITLE,
    VOLUME_AXIS_TITLE,
};
use super::figure::{Axis, Figure, Layout, Margin, RangeSlider};
use super::indicator::IndicatorColumn;
use super::item::{CandleItem, ChartItem, LineItem, VolumeItem};
use super::manager::BarManager;
use crate::error::DashboardError;
use crate::trader::object::PriceSeries;

/// Composed chart of one instrument plus its display scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentChart {
    pub symbol: String,
    pub figure: Figure,
    /// Latest close
    pub last_price: f64,
    /// Volume of the latest bar
    pub last_volume: f64,
    /// Low/high over candles and overlays
    pub price_range: (f64, f64),
}

/// Builds figures from a series and its indicator columns
pub struct ChartComposer;

impl ChartComposer {
    /// Compose the figure for one instrument.
    ///
    /// An empty series is reported as unavailable data instead of an empty
    /// chart. Columns that do not line up with the bars, or carry no value at
    /// all, are left out.
    pub fn compose(series: PriceSeries, columns: Vec<IndicatorColumn>) -> Result<InstrumentChart, DashboardError> {
        let symbol = series.symbol().to_string();
        let last_price = series
            .last_close()
            .ok_or_else(|| DashboardError::unavailable(&symbol, "no bars after dropping incomplete rows"))?;

        let manager = BarManager::new(series);
        let bar_count = manager.get_count();
        let last_volume = manager.get_all_bars().last().map_or(0.0, |bar| bar.volume);

        let candle = CandleItem::new();
        let lines: Vec<LineItem> = columns
            .into_iter()
            .filter_map(|column| {
                let name = column.name.clone();
                let item = LineItem::from_column(column, bar_count);
                if item.is_none() {
                    tracing::debug!("Skipping indicator {} for {}: nothing to draw", name, symbol);
                }
                item
            })
            .collect();
        let volume = VolumeItem::new(&manager);

        let mut price_items: Vec<&dyn ChartItem> = vec![&candle];
        price_items.extend(lines.iter().map(|line| line as &dyn ChartItem));
        let price_range = price_items
            .iter()
            .filter_map(|item| item.get_y_range(&manager))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (l, h)| (lo.min(l), hi.max(h)));

        let mut data: Vec<_> = price_items.iter().map(|item| item.to_trace(&manager)).collect();
        data.push(volume.to_trace(&manager));

        let volume_range = volume.get_y_range(&manager).unwrap_or((0.0, 0.0));
        let figure = Figure {
            data,
            layout: build_layout(volume_range.1),
        };

        tracing::debug!(
            "Composed {} with {} traces, price range {:.2}..{:.2}",
            symbol,
            figure.data.len(),
            price_range.0,
            price_range.1
        );

        Ok(InstrumentChart {
            symbol,
            figure,
            last_price,
            last_volume,
            price_range,
        })
    }
}

/// Price axis left, volume axis right without grid, no range slider.
pub fn build_layout(volume_axis_upper: f64) -> Layout {
    Layout {
        xaxis: Axis {
            domain: Some([0.0, 1.0]),
            rangeslider: Some(RangeSlider { visible: false }),
            ..Axis::default()
        },
        yaxis: Axis {
            title: Some(PRICE_AXIS_TITLE.to_string()),
            ..Axis::default()
        },
        yaxis2: Axis {
            title: Some(VOLUME_AXIS_TITLE.to_string()),
            overlaying: Some("y".to_string()),
            side: Some("right".to_string()),
            showgrid: Some(false),
            range: Some([0.0, volume_axis_upper]),
            ..Axis::default()
        },
        margin: Margin {
            l: MARGIN_LEFT,
            r: MARGIN_RIGHT,
            t: MARGIN_TOP,
            b: MARGIN_BOTTOM,
        },
        height: CHART_HEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, TimeZone, Utc};
    use crate::chart::figure::Trace;
    use crate::chart::indicator::{IndicatorEngine, IndicatorSpec};
    use crate::trader::object::BarData;

    fn daily_series(closes: &[f64], volume: f64) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| BarData::new(start + Duration::days(i as i64), c - 0.5, c + 1.0, c - 1.0, c, volume * (i + 1) as f64))
            .collect();
        PriceSeries::new("TEST", bars)
    }

    #[test]
    fn test_compose_layers_in_order() {
        let closes: Vec<f64> = (100..130).map(|c| c as f64).collect();
        let series = daily_series(&closes, 1000.0);
        let specs = vec![
            IndicatorSpec::MovingAverage { window: 5 },
            IndicatorSpec::MovingAverage { window: 200 },
            IndicatorSpec::RelativeStrengthIndex { window: 14 },
        ];
        let columns = IndicatorEngine::compute(&series, &specs);

        let chart = ChartComposer::compose(series, columns).unwrap();

        let names: Vec<&str> = chart.figure.data.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Price", "MA5", "RSI", "Volume (scaled)"]);
        assert_eq!(chart.last_price, 129.0);
        assert_eq!(chart.last_volume, 30_000.0);

        let Some(Trace::Scatter(ma)) = chart.figure.trace("MA5") else {
            panic!("missing MA5 overlay");
        };
        assert_abs_diff_eq!(ma.y[29].unwrap(), 127.0, epsilon = 1e-9);
    }

    #[test]
    fn test_volume_axis_bound() {
        let series = daily_series(&[10.0, 20.0, 40.0], 100.0);

        let chart = ChartComposer::compose(series, vec![]).unwrap();

        let volume = chart.figure.volume_trace().unwrap();
        let max_scaled = volume.y.iter().copied().fold(0.0, f64::max);
        assert_abs_diff_eq!(max_scaled, 40.0 * 0.3, epsilon = 1e-9);

        let range = chart.figure.layout.yaxis2.range.unwrap();
        assert_eq!(range[0], 0.0);
        assert_abs_diff_eq!(range[1], max_scaled * 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_volume_gives_flat_trace() {
        let series = daily_series(&[10.0, 11.0, 12.0], 0.0);

        let chart = ChartComposer::compose(series, vec![]).unwrap();

        let volume = chart.figure.volume_trace().unwrap();
        assert_eq!(volume.y, vec![0.0, 0.0, 0.0]);
        assert_eq!(chart.figure.layout.yaxis2.range, Some([0.0, 0.0]));
        let json = chart.figure.to_json().unwrap();
        assert!(!json.contains("NaN") && !json.contains("inf"));
    }

    #[test]
    fn test_empty_series_is_unavailable() {
        let result = ChartComposer::compose(PriceSeries::empty("DEAD"), vec![]);

        let err = result.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_layout_conventions() {
        let layout = build_layout(42.0);

        assert_eq!(layout.height, 500);
        assert_eq!(layout.margin, Margin { l: 0, r: 0, t: 30, b: 0 });
        assert_eq!(layout.xaxis.rangeslider, Some(RangeSlider { visible: false }));
        assert_eq!(layout.yaxis2.side.as_deref(), Some("right"));
        assert_eq!(layout.yaxis2.overlaying.as_deref(), Some("y"));
        assert_eq!(layout.yaxis2.showgrid, Some(false));

        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["yaxis2"]["range"], serde_json::json!([0.0, 42.0]));
    }

    #[test]
    fn test_price_range_covers_overlays() {
        let series = daily_series(&[10.0, 12.0], 1.0);
        let columns = vec![IndicatorColumn {
            name: "EMA3".to_string(),
            values: vec![Some(5.0), Some(30.0)],
        }];

        let chart = ChartComposer::compose(series, columns).unwrap();

        assert_eq!(chart.price_range, (5.0, 30.0));
    }
}
