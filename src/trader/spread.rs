//! Synthetic spread series: the timestamp-aligned difference of two series.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::object::{BarData, PriceSeries};
use crate::error::DashboardError;

/// Subtract `subtrahend` from `minuend` field by field.
///
/// Inner join on timestamps: bars present in only one leg are discarded.
/// An empty intersection is an `Alignment` error.
pub fn difference(minuend: &PriceSeries, subtrahend: &PriceSeries) -> Result<PriceSeries, DashboardError> {
    let right: HashMap<DateTime<Utc>, &BarData> = subtrahend
        .bars()
        .iter()
        .map(|bar| (bar.datetime, bar))
        .collect();

    let bars: Vec<BarData> = minuend
        .bars()
        .iter()
        .filter_map(|left| {
            right.get(&left.datetime).map(|right| BarData {
                datetime: left.datetime,
                open_price: left.open_price - right.open_price,
                high_price: left.high_price - right.high_price,
                low_price: left.low_price - right.low_price,
                close_price: left.close_price - right.close_price,
                volume: left.volume - right.volume,
            })
        })
        .collect();

    if bars.is_empty() {
        return Err(DashboardError::Alignment {
            minuend: minuend.symbol().to_string(),
            subtrahend: subtrahend.symbol().to_string(),
        });
    }

    let dropped = minuend.len() + subtrahend.len() - 2 * bars.len();
    if dropped > 0 {
        tracing::debug!(
            "Spread {}-{} discarded {} unmatched bars",
            minuend.symbol(),
            subtrahend.symbol(),
            dropped
        );
    }

    let symbol = format!("{}-{}", minuend.symbol(), subtrahend.symbol());
    Ok(PriceSeries::new(symbol, bars))
}
