//! Chart items turning bar data and indicator columns into figure traces.

use super::base::{
    CANDLE_NAME, VOLUME_AXIS_HEADROOM, VOLUME_COLOR, VOLUME_NAME, VOLUME_PRICE_RATIO,
};
use super::figure::{BarTrace, CandlestickTrace, LineTrace, Marker, Trace};
use super::indicator::IndicatorColumn;
use super::manager::BarManager;

/// Trait for chart items that can be drawn
pub trait ChartItem {
    /// Legend name
    fn name(&self) -> &str;

    /// Y range covered by the item, `None` when it has nothing to draw
    fn get_y_range(&self, manager: &BarManager) -> Option<(f64, f64)>;

    /// Build the trace for the figure
    fn to_trace(&self, manager: &BarManager) -> Trace;
}

/// Candlestick chart item
pub struct CandleItem;

impl Default for CandleItem {
    fn default() -> Self {
        Self::new()
    }
}

impl CandleItem {
    pub fn new() -> Self {
        Self
    }
}

impl ChartItem for CandleItem {
    fn name(&self) -> &str {
        CANDLE_NAME
    }

    fn get_y_range(&self, manager: &BarManager) -> Option<(f64, f64)> {
        (manager.get_count() > 0).then(|| manager.get_price_range())
    }

    fn to_trace(&self, manager: &BarManager) -> Trace {
        let bars = manager.get_all_bars();
        Trace::Candlestick(CandlestickTrace {
            name: CANDLE_NAME.to_string(),
            x: manager.get_datetimes().to_vec(),
            open: bars.iter().map(|b| b.open_price).collect(),
            high: bars.iter().map(|b| b.high_price).collect(),
            low: bars.iter().map(|b| b.low_price).collect(),
            close: bars.iter().map(|b| b.close_price).collect(),
        })
    }
}

/// Indicator overlay line on the price axis
pub struct LineItem {
    column: IndicatorColumn,
}

impl LineItem {
    /// Accept a column only if it lines up with the bars and has a value.
    pub fn from_column(column: IndicatorColumn, bar_count: usize) -> Option<Self> {
        if column.len() != bar_count || column.defined_count() == 0 {
            return None;
        }
        Some(Self { column })
    }
}

impl ChartItem for LineItem {
    fn name(&self) -> &str {
        &self.column.name
    }

    fn get_y_range(&self, _manager: &BarManager) -> Option<(f64, f64)> {
        let mut values = self.column.values.iter().flatten().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    fn to_trace(&self, manager: &BarManager) -> Trace {
        let y = self
            .column
            .values
            .iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();

        Trace::Scatter(LineTrace {
            name: self.column.name.clone(),
            mode: "lines".to_string(),
            x: manager.get_datetimes().to_vec(),
            y,
        })
    }
}

/// Volume rescaled into the price range for the secondary axis
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeScale {
    pub scaled: Vec<f64>,
    pub axis_upper: f64,
}

/// `scaled[i] = volume[i] / max(volume) * price_reference * 0.3`, axis upper
/// bound `max(scaled) * 5`.
///
/// Negative or non-finite volumes count as zero. No volume at all, or no
/// usable price reference, gives an all-zero trace and an upper bound of 0.
pub fn scale_volume(volumes: &[f64], price_reference: f64) -> VolumeScale {
    let max_volume = volumes.iter().copied().fold(0.0, f64::max);

    if max_volume <= 0.0 || !price_reference.is_finite() || price_reference <= 0.0 {
        return VolumeScale {
            scaled: vec![0.0; volumes.len()],
            axis_upper: 0.0,
        };
    }

    let factor = price_reference * VOLUME_PRICE_RATIO / max_volume;
    let scaled: Vec<f64> = volumes.iter().map(|v| v.max(0.0) * factor).collect();
    let axis_upper = scaled.iter().copied().fold(0.0, f64::max) * VOLUME_AXIS_HEADROOM;

    VolumeScale { scaled, axis_upper }
}

/// Volume bar chart item
pub struct VolumeItem {
    scale: VolumeScale,
}

impl VolumeItem {
    pub fn new(manager: &BarManager) -> Self {
        let volumes: Vec<f64> = manager.get_all_bars().iter().map(|b| b.volume).collect();
        Self {
            scale: scale_volume(&volumes, manager.get_max_abs_close()),
        }
    }

    pub fn scale(&self) -> &VolumeScale {
        &self.scale
    }
}

impl ChartItem for VolumeItem {
    fn name(&self) -> &str {
        VOLUME_NAME
    }

    fn get_y_range(&self, _manager: &BarManager) -> Option<(f64, f64)> {
        Some((0.0, self.scale.axis_upper))
    }

    fn to_trace(&self, manager: &BarManager) -> Trace {
        Trace::Bar(BarTrace {
            name: VOLUME_NAME.to_string(),
            x: manager.get_datetimes().to_vec(),
            y: self.scale.scaled.clone(),
            yaxis: "y2".to_string(),
            marker: Marker {
                color: VOLUME_COLOR.to_string(),
            },
        })
    }
}
