use std::str::FromStr;
use std::time::Duration;

use clap::Parser;

use crate::trader::setting::{SettingValue, Settings};

/// Candlestick dashboard for stocks, ETFs and bond yields
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Codes or lists (tw, us, bond), comma separated; spreads as ^TNX-^IRX
    pub symbols: Option<String>,

    #[arg(short, long)]
    pub period: Option<String>,

    #[arg(short, long)]
    pub interval: Option<String>,

    /// Indicator labels such as MA5,EMA10,RSI
    #[arg(long)]
    pub indicators: Option<String>,

    /// Charts per grid row
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub columns: Option<u8>,

    #[arg(short, long, value_parser = parse_duration)]
    pub refresh: Option<Duration>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}

impl Args {
    /// Overlay the given options on top of the loaded settings
    pub fn apply(&self, settings: &Settings) {
        let strings = [
            ("dashboard.symbols", &self.symbols),
            ("dashboard.period", &self.period),
            ("dashboard.interval", &self.interval),
            ("dashboard.indicators", &self.indicators),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                settings.set(key, SettingValue::String(value.clone()));
            }
        }

        if let Some(columns) = self.columns {
            settings.set("dashboard.columns", SettingValue::Int(columns as i64));
        }
        if let Some(refresh) = self.refresh {
            settings.set("dashboard.refresh", SettingValue::Int(refresh.as_secs() as i64));
        }
    }
}

pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let secs = if let Some(stripped) = s.strip_suffix('s') {
        u64::from_str(stripped).map_err(|e| e.to_string())?
    } else if let Some(stripped) = s.strip_suffix('m') {
        u64::from_str(stripped).map_err(|e| e.to_string())? * 60
    } else if let Some(stripped) = s.strip_suffix('h') {
        u64::from_str(stripped).map_err(|e| e.to_string())? * 3600
    } else {
        return Err("Invalid duration format. Use formats like 10s, 3m, or 1h.".into());
    };

    if secs == 0 {
        return Err("Refresh interval must be positive.".into());
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration("3m").unwrap(), Duration::from_secs(180));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("0s").is_err());
    }

    #[test]
    fn test_columns_limited_to_four() {
        assert!(Args::try_parse_from(["stock_dashboard", "-c", "4"]).is_ok());
        assert!(Args::try_parse_from(["stock_dashboard", "-c", "5"]).is_err());
        assert!(Args::try_parse_from(["stock_dashboard", "-c", "0"]).is_err());
    }

    #[test]
    fn test_apply_overrides_settings() {
        let args = Args::try_parse_from([
            "stock_dashboard",
            "AAPL,^TNX-^IRX",
            "--period",
            "5d",
            "--indicators",
            "MA5,RSI",
            "-c",
            "3",
            "-r",
            "30s",
            "--once",
        ])
        .unwrap();
        let settings = Settings::with_defaults();

        args.apply(&settings);

        assert!(args.once);
        assert_eq!(settings.get_string("dashboard.symbols").unwrap(), "AAPL,^TNX-^IRX");
        assert_eq!(settings.get_string("dashboard.period").unwrap(), "5d");
        assert_eq!(settings.get_string("dashboard.interval").unwrap(), "15m");
        assert_eq!(settings.get_int("dashboard.columns"), Some(3));
        assert_eq!(settings.get_int("dashboard.refresh"), Some(30));
    }
}
