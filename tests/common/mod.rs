#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use swingtrader::domain::error::SwingError;
pub use swingtrader::domain::ohlcv::OhlcvBar;
use swingtrader::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, SwingError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SwingError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, SwingError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(symbol: &str, day: usize, open: f64, high: f64, low: f64, close: f64) -> OhlcvBar {
    OhlcvBar {
        symbol: symbol.to_string(),
        date: date(2024, 1, 1) + chrono::Duration::days(day as i64),
        open,
        high,
        low,
        close,
        volume: 1_000_000.0,
    }
}

/// `count - 1` quiet bars (open = close = 100, range 99..101) and a final bar.
pub fn quiet_then(symbol: &str, count: usize, last: (f64, f64, f64, f64)) -> Vec<OhlcvBar> {
    let mut bars: Vec<OhlcvBar> = (0..count - 1)
        .map(|d| make_bar(symbol, d, 100.0, 101.0, 99.0, 100.0))
        .collect();
    let (open, high, low, close) = last;
    bars.push(make_bar(symbol, count - 1, open, high, low, close));
    bars
}

/// Breakout near SMA10 inside normal volatility: allocates.
pub fn entry_series(symbol: &str) -> Vec<OhlcvBar> {
    quiet_then(symbol, 50, (100.0, 101.0, 99.5, 100.4))
}

/// Same setup but the last close sits below SMA10.
pub fn exit_series(symbol: &str) -> Vec<OhlcvBar> {
    let mut bars: Vec<OhlcvBar> = (0..49)
        .map(|d| make_bar(symbol, d, 101.0, 102.0, 100.0, 101.0))
        .collect();
    bars.push(make_bar(symbol, 49, 99.0, 100.5, 98.5, 100.0));
    bars
}

/// Close-over-open move larger than ATR while hugging SMA10.
pub fn volatile_series(symbol: &str) -> Vec<OhlcvBar> {
    let mut bars: Vec<OhlcvBar> = (0..49)
        .map(|d| make_bar(symbol, d, 100.0, 100.0, 100.0, 100.0))
        .collect();
    bars.push(make_bar(symbol, 49, 99.5, 100.4, 99.5, 100.4));
    bars
}

/// Steady uptrend: every SMA lags far behind the close.
pub fn trending_series(symbol: &str, count: usize) -> Vec<OhlcvBar> {
    (0..count)
        .map(|d| {
            let close = 100.0 + 2.0 * d as f64;
            make_bar(symbol, d, close - 1.0, close + 0.5, close - 1.5, close)
        })
        .collect()
}

pub fn to_csv(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("date,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.date, b.open, b.high, b.low, b.close, b.volume
        ));
    }
    out
}
