//! Borrowed bar snapshot handed to a strategy on each evaluation.

use crate::domain::ohlcv::OhlcvBar;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct MarketData<'a> {
    ohlcv: BTreeMap<&'a str, &'a [OhlcvBar]>,
}

impl<'a> MarketData<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &'a str, bars: &'a [OhlcvBar]) -> Self {
        self.ohlcv.insert(symbol, bars);
        self
    }

    /// Bars for `symbol`; an unknown symbol yields an empty slice.
    pub fn ohlcv(&self, symbol: &str) -> &'a [OhlcvBar] {
        self.ohlcv.get(symbol).copied().unwrap_or(&[])
    }

    pub fn symbols(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.ohlcv.keys().copied()
    }
}
