//! Technical indicators for charting.
//!
//! Indicators are selected with [`IndicatorSpec`], parsed once from the
//! dashboard labels (`MA20`, `EMA10`, `RSI`) and dispatched by `match`.
//! Every indicator yields an [`IndicatorColumn`] aligned 1:1 with the input
//! bars; entries without enough history are `None`.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use ta::indicators::{ExponentialMovingAverage, SimpleMovingAverage};
use ta::Next;

use crate::error::IndicatorError;
use crate::trader::object::PriceSeries;

/// Window used by a bare `RSI` label
pub const DEFAULT_RSI_WINDOW: usize = 14;

/// A technical indicator request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorSpec {
    /// Simple moving average of close
    MovingAverage { window: usize },
    /// Exponential moving average of close
    ExponentialMovingAverage { span: usize },
    /// Relative strength index of close
    RelativeStrengthIndex { window: usize },
}

impl IndicatorSpec {
    pub fn moving_average(window: usize) -> Result<Self, IndicatorError> {
        check_window("MA", window)?;
        Ok(IndicatorSpec::MovingAverage { window })
    }

    pub fn exponential_moving_average(span: usize) -> Result<Self, IndicatorError> {
        check_window("EMA", span)?;
        Ok(IndicatorSpec::ExponentialMovingAverage { span })
    }

    pub fn rsi(window: usize) -> Result<Self, IndicatorError> {
        check_window("RSI", window)?;
        Ok(IndicatorSpec::RelativeStrengthIndex { window })
    }

    /// Column name shown in the chart legend
    pub fn name(&self) -> String {
        match self {
            IndicatorSpec::MovingAverage { window } => format!("MA{}", window),
            IndicatorSpec::ExponentialMovingAverage { span } => format!("EMA{}", span),
            IndicatorSpec::RelativeStrengthIndex { window } if *window == DEFAULT_RSI_WINDOW => {
                "RSI".to_string()
            }
            IndicatorSpec::RelativeStrengthIndex { window } => format!("RSI{}", window),
        }
    }

    /// Compute this indicator over a series
    pub fn compute(&self, series: &PriceSeries) -> IndicatorColumn {
        let values = match *self {
            IndicatorSpec::MovingAverage { window } => compute_moving_average(series, window),
            IndicatorSpec::ExponentialMovingAverage { span } => {
                compute_exponential_moving_average(series, span)
            }
            IndicatorSpec::RelativeStrengthIndex { window } => compute_rsi(series, window),
        };

        IndicatorColumn {
            name: self.name(),
            values,
        }
    }

    /// Indicators offered by the dashboard selector
    pub fn presets() -> Vec<IndicatorSpec> {
        vec![
            IndicatorSpec::MovingAverage { window: 1 },
            IndicatorSpec::MovingAverage { window: 5 },
            IndicatorSpec::MovingAverage { window: 20 },
            IndicatorSpec::MovingAverage { window: 60 },
            IndicatorSpec::MovingAverage { window: 200 },
            IndicatorSpec::ExponentialMovingAverage { span: 10 },
            IndicatorSpec::ExponentialMovingAverage { span: 30 },
            IndicatorSpec::RelativeStrengthIndex { window: DEFAULT_RSI_WINDOW },
        ]
    }
}

impl fmt::Display for IndicatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for IndicatorSpec {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();

        if let Some(suffix) = label.strip_prefix("RSI") {
            if suffix.is_empty() {
                return IndicatorSpec::rsi(DEFAULT_RSI_WINDOW);
            }
            return IndicatorSpec::rsi(parse_window(label, suffix)?);
        }
        if let Some(suffix) = label.strip_prefix("EMA") {
            return IndicatorSpec::exponential_moving_average(parse_window(label, suffix)?);
        }
        if let Some(suffix) = label.strip_prefix("MA") {
            return IndicatorSpec::moving_average(parse_window(label, suffix)?);
        }

        Err(IndicatorError::UnknownIndicator(label.to_string()))
    }
}

fn parse_window(label: &str, suffix: &str) -> Result<usize, IndicatorError> {
    suffix.parse::<usize>().map_err(|_| IndicatorError::InvalidWindow {
        label: label.to_string(),
        suffix: suffix.to_string(),
    })
}

fn check_window(prefix: &str, window: usize) -> Result<(), IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::ZeroWindow(format!("{}0", prefix)));
    }
    Ok(())
}

/// Parse a comma separated label list.
///
/// Valid specs keep their order; each malformed label is returned as an
/// error without affecting the others.
pub fn parse_indicator_list(labels: &str) -> (Vec<IndicatorSpec>, Vec<IndicatorError>) {
    let mut specs = Vec::new();
    let mut errors = Vec::new();

    for label in labels.split(',').map(str::trim).filter(|l| !l.is_empty()) {
        match label.parse::<IndicatorSpec>() {
            Ok(spec) if !specs.contains(&spec) => specs.push(spec),
            Ok(_) => {}
            Err(e) => errors.push(e),
        }
    }

    (specs, errors)
}

/// Named numeric sequence aligned with the bars of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl IndicatorColumn {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries with a value
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }
}

/// Arithmetic mean of close over the trailing `window` bars.
pub fn compute_moving_average(series: &PriceSeries, window: usize) -> Vec<Option<f64>> {
    let len = series.len();
    if window == 0 || window > len {
        return vec![None; len];
    }

    let Ok(mut sma) = SimpleMovingAverage::new(window) else {
        return vec![None; len];
    };

    series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let value = sma.next(bar.close_price);
            (i + 1 >= window).then_some(value)
        })
        .collect()
}

/// Exponential moving average of close, alpha = 2 / (span + 1).
///
/// Seeded with the first close and defined from the first bar on.
pub fn compute_exponential_moving_average(series: &PriceSeries, span: usize) -> Vec<Option<f64>> {
    let len = series.len();
    let Ok(mut ema) = ExponentialMovingAverage::new(span) else {
        return vec![None; len];
    };

    series
        .bars()
        .iter()
        .map(|bar| Some(ema.next(bar.close_price)))
        .collect()
}

/// Relative strength index from simple averages of gains and losses.
///
/// The first bar has no delta and counts as neither gain nor loss. Values
/// start at index `window - 1`. A window without losses yields 100.
pub fn compute_rsi(series: &PriceSeries, window: usize) -> Vec<Option<f64>> {
    let len = series.len();
    if window == 0 || window > len {
        return vec![None; len];
    }

    let (Ok(mut avg_gain), Ok(mut avg_loss)) = (
        SimpleMovingAverage::new(window),
        SimpleMovingAverage::new(window),
    ) else {
        return vec![None; len];
    };

    let mut prev_close: Option<f64> = None;
    series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let delta = prev_close.map_or(0.0, |prev| bar.close_price - prev);
            prev_close = Some(bar.close_price);

            let gain = avg_gain.next(delta.max(0.0));
            let loss = avg_loss.next((-delta).max(0.0));
            (i + 1 >= window).then(|| rsi_from_averages(gain, loss))
        })
        .collect()
}

/// RSI = 100 - 100 / (1 + avg_gain / avg_loss), with 100 when nothing was lost.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss <= 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

/// Applies a list of indicator specs to a series
pub struct IndicatorEngine;

impl IndicatorEngine {
    /// One column per spec, in spec order. The series is left untouched.
    pub fn compute(series: &PriceSeries, specs: &[IndicatorSpec]) -> Vec<IndicatorColumn> {
        specs.par_iter().map(|spec| spec.compute(series)).collect()
    }
}
