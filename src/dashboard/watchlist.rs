//! Built-in watch lists and symbol resolution.

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::trader::constant::Interval;
use crate::trader::object::Instrument;

/// Market a watch-list entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    Taiwan,
    Us,
    Bond,
    /// Code typed by the user, not in any built-in list
    Custom,
}

impl Market {
    /// Bond yields are always fetched hourly, whatever interval is selected
    pub fn interval_override(&self) -> Option<Interval> {
        match self {
            Market::Bond => Some(Interval::Hour),
            _ => None,
        }
    }
}

/// One instrument on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchItem {
    pub name: String,
    pub code: String,
    pub market: Market,
}

impl WatchItem {
    pub fn new(name: impl Into<String>, code: impl Into<String>, market: Market) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            market,
        }
    }

    pub fn instrument(&self) -> Result<Instrument, DashboardError> {
        self.code.parse()
    }
}

const TAIWAN: &[(&str, &str)] = &[
    ("TSMC", "2330.TW"),
    ("MediaTek", "2454.TW"),
    ("Hon Hai", "2317.TW"),
    ("Delta Electronics", "2308.TW"),
    ("Fubon Financial", "2881.TW"),
    ("CTBC Financial", "2891.TW"),
    ("Cathay Financial", "2882.TW"),
    ("Yuanta Taiwan 50", "0050.TW"),
    ("Fubon Taiwan 50", "006208.TW"),
];

const US: &[(&str, &str)] = &[
    ("Apple", "AAPL"),
    ("Tesla", "TSLA"),
    ("Microsoft", "MSFT"),
    ("Amazon", "AMZN"),
    ("NVIDIA", "NVDA"),
    ("SPDR Bloomberg 1-3 Month T-Bill ETF", "BIL"),
    ("Vanguard Total Bond Market ETF", "BND"),
    ("Vanguard Total World Bond ETF", "BNDW"),
    ("SPDR Dow Jones Industrial Average ETF", "DIA"),
    ("iShares 7-10 Year Treasury Bond ETF", "IEF"),
    ("Invesco QQQ Trust", "QQQ"),
    ("iShares Semiconductor ETF", "SOXX"),
    ("SPDR S&P 500 ETF", "SPY"),
    ("iShares TIPS Bond ETF", "TIP"),
    ("iShares 20+ Year Treasury Bond ETF", "TLT"),
    ("Vanguard S&P Small-Cap 600 Value ETF", "VIOV"),
    ("Vanguard Real Estate ETF", "VNQ"),
    ("Vanguard S&P 500 ETF", "VOO"),
    ("Vanguard Communication Services ETF", "VOX"),
    ("Vanguard Total World Stock ETF", "VT"),
    ("Materials Select Sector SPDR", "XLB"),
    ("Energy Select Sector SPDR", "XLE"),
    ("Consumer Staples Select Sector SPDR", "XLP"),
    ("Health Care Select Sector SPDR", "XLV"),
    ("Consumer Discretionary Select Sector SPDR", "XLY"),
];

// ^TNX and ^TYX quote the yield times ten
const BONDS: &[(&str, &str)] = &[
    ("US 13-week T-bill yield", "^IRX"),
    ("US 10-year Treasury yield", "^TNX"),
    ("US 30-year Treasury yield", "^TYX"),
    ("US 10Y-13W yield spread", "^TNX-^IRX"),
    ("US 30Y-10Y yield spread", "^TYX-^TNX"),
];

fn build(entries: &[(&str, &str)], market: Market) -> Vec<WatchItem> {
    entries
        .iter()
        .map(|(name, code)| WatchItem::new(*name, *code, market))
        .collect()
}

pub fn taiwan() -> Vec<WatchItem> {
    build(TAIWAN, Market::Taiwan)
}

pub fn us() -> Vec<WatchItem> {
    build(US, Market::Us)
}

pub fn bonds() -> Vec<WatchItem> {
    build(BONDS, Market::Bond)
}

/// Built-in entry for a code, if any
pub fn lookup(code: &str) -> Option<WatchItem> {
    [(TAIWAN, Market::Taiwan), (US, Market::Us), (BONDS, Market::Bond)]
        .into_iter()
        .find_map(|(entries, market)| {
            entries
                .iter()
                .find(|(_, c)| c.eq_ignore_ascii_case(code))
                .map(|(name, c)| WatchItem::new(*name, *c, market))
        })
}

/// Resolve a comma separated selection into watch items.
///
/// `tw`, `us` and `bond` expand to the whole built-in list. Known codes take
/// their built-in name; anything else is kept as a custom code named after
/// itself. Duplicates keep their first position.
pub fn resolve_symbols(selection: &str) -> Vec<WatchItem> {
    let mut items: Vec<WatchItem> = Vec::new();

    for token in selection.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let expanded = match token.to_ascii_lowercase().as_str() {
            "tw" => taiwan(),
            "us" => us(),
            "bond" | "bonds" => bonds(),
            _ => vec![lookup(token).unwrap_or_else(|| WatchItem::new(token, token, Market::Custom))],
        };

        for item in expanded {
            if !items.iter().any(|existing| existing.code == item.code) {
                items.push(item);
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_list_sizes() {
        assert_eq!(taiwan().len(), 9);
        assert_eq!(us().len(), 25);
        assert_eq!(bonds().len(), 5);
    }

    #[test]
    fn test_bond_spreads_parse_as_spreads() {
        let spreads: Vec<Instrument> = bonds()
            .iter()
            .filter(|b| b.code.contains('-'))
            .map(|b| b.instrument().unwrap())
            .collect();

        assert_eq!(
            spreads[0],
            Instrument::Spread {
                minuend: "^TNX".to_string(),
                subtrahend: "^IRX".to_string(),
            }
        );
        assert_eq!(spreads.len(), 2);
    }

    #[test]
    fn test_irx_is_labelled_as_tbill() {
        let irx = lookup("^IRX").unwrap();
        assert!(irx.name.contains("13-week"));
        assert_eq!(irx.market, Market::Bond);
    }

    #[test]
    fn test_bond_interval_override() {
        assert_eq!(Market::Bond.interval_override(), Some(Interval::Hour));
        assert_eq!(Market::Us.interval_override(), None);
        assert_eq!(Market::Custom.interval_override(), None);
    }

    #[test]
    fn test_resolve_mixed_selection() {
        let items = resolve_symbols("aapl, BRK-B, bond, ^TNX");

        assert_eq!(items[0].name, "Apple");
        assert_eq!(items[0].code, "AAPL");
        assert_eq!(items[1], WatchItem::new("BRK-B", "BRK-B", Market::Custom));
        assert_eq!(items.len(), 2 + 5);
        assert_eq!(items.iter().filter(|i| i.code == "^TNX").count(), 1);
    }

    #[test]
    fn test_resolve_empty_selection() {
        assert!(resolve_symbols("").is_empty());
        assert!(resolve_symbols(" , ,").is_empty());
    }
}
