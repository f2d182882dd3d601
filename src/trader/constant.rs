//! Constants used across the dashboard: history ranges and bar granularities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Requested history range, relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// 1 day
    Day1,
    /// 5 days
    Day5,
    /// 1 month
    Month1,
    /// 3 months
    Month3,
    /// 6 months
    Month6,
    /// 1 year
    Year1,
    /// 2 years
    Year2,
    /// 5 years
    Year5,
    /// 10 years
    Year10,
    /// Year to date
    YearToDate,
    /// Full history
    Max,
}

impl Period {
    /// Get period value string
    pub fn value(&self) -> &'static str {
        match self {
            Period::Day1 => "1d",
            Period::Day5 => "5d",
            Period::Month1 => "1mo",
            Period::Month3 => "3mo",
            Period::Month6 => "6mo",
            Period::Year1 => "1y",
            Period::Year2 => "2y",
            Period::Year5 => "5y",
            Period::Year10 => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }

    /// Get all periods for selection
    pub fn all() -> Vec<Period> {
        vec![
            Period::Day1,
            Period::Day5,
            Period::Month1,
            Period::Month3,
            Period::Month6,
            Period::Year1,
            Period::Year2,
            Period::Year5,
            Period::Year10,
            Period::YearToDate,
            Period::Max,
        ]
    }

    /// Short ranges that minute bars are served for
    pub fn is_short(&self) -> bool {
        matches!(self, Period::Day1 | Period::Day5)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for Period {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::all()
            .into_iter()
            .find(|p| p.value() == s)
            .ok_or_else(|| DashboardError::invalid_params(format!("unknown period: {}", s)))
    }
}

/// Bar granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// 1 minute
    Minute,
    /// 2 minutes
    Minute2,
    /// 5 minutes
    Minute5,
    /// 15 minutes
    Minute15,
    /// 30 minutes
    Minute30,
    /// 60 minutes
    Minute60,
    /// 90 minutes
    Minute90,
    /// 1 hour
    Hour,
    /// Daily
    Daily,
    /// 5 days
    Day5,
    /// Weekly
    Weekly,
    /// Monthly
    Monthly,
    /// Quarterly
    Month3,
}

impl Interval {
    /// Get interval value string
    pub fn value(&self) -> &'static str {
        match self {
            Interval::Minute => "1m",
            Interval::Minute2 => "2m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Minute60 => "60m",
            Interval::Minute90 => "90m",
            Interval::Hour => "1h",
            Interval::Daily => "1d",
            Interval::Day5 => "5d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
            Interval::Month3 => "3mo",
        }
    }

    /// Get all intervals for selection
    pub fn all() -> Vec<Interval> {
        vec![
            Interval::Minute,
            Interval::Minute2,
            Interval::Minute5,
            Interval::Minute15,
            Interval::Minute30,
            Interval::Minute60,
            Interval::Minute90,
            Interval::Hour,
            Interval::Daily,
            Interval::Day5,
            Interval::Weekly,
            Interval::Monthly,
            Interval::Month3,
        ]
    }

    /// Granularities only served for the last few days
    pub fn is_short_lived(&self) -> bool {
        matches!(self, Interval::Minute | Interval::Minute2)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for Interval {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::all()
            .into_iter()
            .find(|i| i.value() == s)
            .ok_or_else(|| DashboardError::invalid_params(format!("unknown interval: {}", s)))
    }
}

/// Reject interval/period pairs the data source cannot serve.
pub fn validate_period_interval(period: Period, interval: Interval) -> Result<(), DashboardError> {
    if interval.is_short_lived() && !period.is_short() {
        return Err(DashboardError::invalid_params(format!(
            "interval {} is only available for the 1d or 5d period, got {}",
            interval, period
        )));
    }
    Ok(())
}
