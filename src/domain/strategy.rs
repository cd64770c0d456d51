//! Swing strategy parameters and host metadata.

use crate::domain::allocation::Allocation;
use crate::domain::error::SwingError;
use crate::domain::market_data::MarketData;
use crate::domain::swing::{self, Decision};
use crate::domain::universe::parse_assets;
use crate::ports::config_port::{read_parsed, ConfigPort};
use crate::ports::diagnostic_port::DiagnosticSink;
use crate::ports::strategy_port::StrategyPort;

pub const DAILY_INTERVAL: &str = "1d";

fn count(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, SwingError> {
    read_parsed(config, "strategy", key, default, "a non-negative integer")
}

fn number(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, SwingError> {
    read_parsed(config, "strategy", key, default, "a number")
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwingStrategy {
    pub name: String,
    pub interval: String,
    pub assets: Vec<String>,
    pub sma_fast: usize,
    pub sma_medium: usize,
    pub sma_slow: usize,
    pub atr_period: usize,
    /// Relative distance from a moving average that still counts as support.
    pub proximity_tolerance: f64,
    /// Weight allocated on a valid entry.
    pub position_size: f64,
    /// Bars required before any signal is produced.
    pub min_bars: usize,
}

impl Default for SwingStrategy {
    fn default() -> Self {
        Self {
            name: "Laws of Swing".into(),
            interval: DAILY_INTERVAL.into(),
            assets: vec!["AAPL".into()],
            sma_fast: 10,
            sma_medium: 20,
            sma_slow: 50,
            atr_period: 14,
            proximity_tolerance: 0.01,
            position_size: 0.2,
            min_bars: 50,
        }
    }
}

impl SwingStrategy {
    /// Read the `[strategy]` section; absent keys keep their defaults.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, SwingError> {
        let defaults = Self::default();

        let assets = match config.get_string("strategy", "assets") {
            Some(list) => parse_assets(&list)
                .map_err(|e| SwingError::invalid("strategy", "assets", e.to_string()))?,
            None => defaults.assets,
        };

        Ok(Self {
            name: config
                .get_string("strategy", "name")
                .unwrap_or(defaults.name),
            interval: config
                .get_string("strategy", "interval")
                .unwrap_or(defaults.interval),
            assets,
            sma_fast: count(config, "sma_fast", defaults.sma_fast)?,
            sma_medium: count(config, "sma_medium", defaults.sma_medium)?,
            sma_slow: count(config, "sma_slow", defaults.sma_slow)?,
            atr_period: count(config, "atr_period", defaults.atr_period)?,
            proximity_tolerance: number(
                config,
                "proximity_tolerance",
                defaults.proximity_tolerance,
            )?,
            position_size: number(config, "position_size", defaults.position_size)?,
            min_bars: count(config, "min_bars", defaults.min_bars)?,
        })
    }

    /// Window length below which no signal is produced. Never less than the
    /// longest indicator period, so the latest values are always past warmup.
    pub fn required_bars(&self) -> usize {
        [
            self.min_bars,
            self.sma_fast,
            self.sma_medium,
            self.sma_slow,
            self.atr_period,
            1,
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }

    /// Evaluate every tracked asset, in configured order.
    pub fn decide(
        &self,
        data: &MarketData<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<(String, Decision)> {
        let mut decisions = Vec::with_capacity(self.assets.len());
        for symbol in &self.assets {
            let decision = swing::evaluate(self, symbol, data.ohlcv(symbol), sink);
            decisions.push((symbol.clone(), decision));
        }
        decisions
    }
}

impl StrategyPort for SwingStrategy {
    fn interval(&self) -> &str {
        &self.interval
    }

    fn assets(&self) -> &[String] {
        &self.assets
    }

    fn run(&self, data: &MarketData<'_>, sink: &mut dyn DiagnosticSink) -> Allocation {
        self.decide(data, sink)
            .iter()
            .map(|(symbol, decision)| (symbol.as_str(), decision.allocation()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn default_metadata() {
        let s = SwingStrategy::default();
        assert_eq!(s.interval(), "1d");
        assert_eq!(s.assets(), ["AAPL".to_string()]);
        assert_eq!((s.sma_fast, s.sma_medium, s.sma_slow), (10, 20, 50));
        assert_eq!(s.atr_period, 14);
        assert_eq!(s.min_bars, 50);
        assert_eq!(s.position_size, 0.2);
        assert_eq!(s.proximity_tolerance, 0.01);
    }

    #[test]
    fn from_config_overrides() {
        let adapter = FileConfigAdapter::from_string(
            "[strategy]\nname = Tight\nassets = msft, nvda\nsma_fast = 5\nposition_size = 0.1\n",
        )
        .unwrap();
        let s = SwingStrategy::from_config(&adapter).unwrap();
        assert_eq!(s.name, "Tight");
        assert_eq!(s.assets, vec!["MSFT", "NVDA"]);
        assert_eq!(s.sma_fast, 5);
        assert_eq!(s.sma_medium, 20);
        assert_eq!(s.position_size, 0.1);
    }

    #[test]
    fn from_config_empty_section_is_default() {
        let adapter = FileConfigAdapter::from_string("[strategy]\n").unwrap();
        assert_eq!(
            SwingStrategy::from_config(&adapter).unwrap(),
            SwingStrategy::default()
        );
    }

    #[test]
    fn from_config_rejects_bad_assets() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nassets = AAPL,,MSFT\n").unwrap();
        let err = SwingStrategy::from_config(&adapter).unwrap_err();
        assert!(matches!(err, SwingError::ConfigInvalid { ref key, .. } if key == "assets"));
    }

    #[test]
    fn from_config_rejects_negative_period() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\nsma_slow = -3\natr_period = -1\n").unwrap();
        let err = SwingStrategy::from_config(&adapter).unwrap_err();
        assert!(matches!(err, SwingError::ConfigInvalid { ref key, .. } if key == "sma_slow"));
    }

    #[test]
    fn from_config_rejects_non_numeric_values() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nsma_fast = ten\n").unwrap();
        let err = SwingStrategy::from_config(&adapter).unwrap_err();
        assert!(matches!(err, SwingError::ConfigInvalid { ref key, .. } if key == "sma_fast"));

        let adapter = FileConfigAdapter::from_string("[strategy]\nposition_size = big\n").unwrap();
        let err = SwingStrategy::from_config(&adapter).unwrap_err();
        assert!(matches!(err, SwingError::ConfigInvalid { ref key, .. } if key == "position_size"));
    }

    #[test]
    fn required_bars_covers_longest_period() {
        let mut s = SwingStrategy::default();
        assert_eq!(s.required_bars(), 50);
        s.min_bars = 20;
        assert_eq!(s.required_bars(), 50);
        s.min_bars = 80;
        assert_eq!(s.required_bars(), 80);
    }

    #[test]
    fn run_without_data_allocates_zero() {
        let s = SwingStrategy::default();
        let mut sink = Vec::<String>::new();
        let allocation = s.run(&MarketData::new(), &mut sink);
        assert_eq!(allocation.weight("AAPL"), Some(0.0));
        assert_eq!(allocation.iter().count(), 1);
    }

    #[test]
    fn decide_follows_asset_order() {
        let s = SwingStrategy {
            assets: vec!["NVDA".into(), "AAPL".into()],
            ..SwingStrategy::default()
        };
        let mut sink = Vec::<String>::new();
        let decisions = s.decide(&MarketData::new(), &mut sink);
        let symbols: Vec<&str> = decisions.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(symbols, ["NVDA", "AAPL"]);
        assert!(decisions
            .iter()
            .all(|(_, d)| matches!(d, Decision::InsufficientData { bars: 0, required: 50 })));
        assert_eq!(sink.len(), 2);
    }
}
