//! Basic data structures: bars, price series, history requests and instrument codes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::constant::{Interval, Period};
use crate::error::DashboardError;

/// Candlestick bar data of a certain trading period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    pub datetime: DateTime<Utc>,

    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
}

impl BarData {
    /// Create a new BarData
    pub fn new(
        datetime: DateTime<Utc>,
        open_price: f64,
        high_price: f64,
        low_price: f64,
        close_price: f64,
        volume: f64,
    ) -> Self {
        Self {
            datetime,
            open_price,
            high_price,
            low_price,
            close_price,
            volume,
        }
    }

    /// All five values are real numbers
    pub fn is_complete(&self) -> bool {
        [
            self.open_price,
            self.high_price,
            self.low_price,
            self.close_price,
            self.volume,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Time-ordered OHLCV bars of one symbol.
///
/// Bars are strictly increasing by `datetime`; duplicated timestamps keep the
/// bar seen last.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<BarData>,
}

impl PriceSeries {
    /// Build a series from bars in any order
    pub fn new(symbol: impl Into<String>, bars: Vec<BarData>) -> Self {
        let mut by_time: BTreeMap<DateTime<Utc>, BarData> = BTreeMap::new();
        for bar in bars {
            by_time.insert(bar.datetime, bar);
        }

        Self {
            symbol: symbol.into(),
            bars: by_time.into_values().collect(),
        }
    }

    /// Empty series for a symbol
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[BarData] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Drop bars with a missing or non-finite field
    pub fn drop_incomplete(mut self) -> Self {
        self.bars.retain(BarData::is_complete);
        self
    }

    /// Latest close, used as the "last price" display value
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|bar| bar.close_price)
    }

    pub fn datetimes(&self) -> Vec<DateTime<Utc>> {
        self.bars.iter().map(|bar| bar.datetime).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close_price).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.volume).collect()
    }
}

/// Instrument to chart: a plain code or the difference of two codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
    Single(String),
    Spread {
        minuend: String,
        subtrahend: String,
    },
}

impl Instrument {
    /// Codes that must be fetched for this instrument
    pub fn codes(&self) -> Vec<&str> {
        match self {
            Instrument::Single(code) => vec![code.as_str()],
            Instrument::Spread { minuend, subtrahend } => vec![minuend.as_str(), subtrahend.as_str()],
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instrument::Single(code) => f.write_str(code),
            Instrument::Spread { minuend, subtrahend } => write!(f, "{}-{}", minuend, subtrahend),
        }
    }
}

impl FromStr for Instrument {
    type Err = DashboardError;

    /// `^TNX-^IRX` is a spread of two index codes; ticker dashes such as
    /// `BRK-B` stay part of a single code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DashboardError::invalid_params("empty instrument code"));
        }

        if let Some((left, right)) = s.split_once("-^") {
            if left.starts_with('^') && left.len() > 1 && !right.is_empty() {
                return Ok(Instrument::Spread {
                    minuend: left.to_string(),
                    subtrahend: format!("^{}", right),
                });
            }
        }

        Ok(Instrument::Single(s.to_string()))
    }
}

/// Request sent to a datafeed for querying history data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub symbol: String,
    pub period: Period,
    pub interval: Interval,
}

impl HistoryRequest {
    /// Create a new HistoryRequest
    pub fn new(symbol: impl Into<String>, period: Period, interval: Interval) -> Self {
        Self {
            symbol: symbol.into(),
            period,
            interval,
        }
    }
}
