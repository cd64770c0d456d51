//! Strategy configuration validation.
//!
//! Runs before any evaluation so that the decision function can assume sane
//! periods and sizes.

use crate::domain::error::SwingError;
use crate::domain::strategy::{SwingStrategy, DAILY_INTERVAL};
use crate::ports::config_port::ConfigPort;

/// Build a strategy from `[strategy]` and validate it.
pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<SwingStrategy, SwingError> {
    let strategy = SwingStrategy::from_config(config)?;
    validate_strategy(&strategy)?;
    Ok(strategy)
}

pub fn validate_strategy(strategy: &SwingStrategy) -> Result<(), SwingError> {
    validate_interval(strategy)?;
    validate_assets(strategy)?;
    validate_periods(strategy)?;
    validate_tolerance(strategy)?;
    validate_position_size(strategy)?;
    validate_min_bars(strategy)?;
    Ok(())
}

fn validate_interval(strategy: &SwingStrategy) -> Result<(), SwingError> {
    if strategy.interval != DAILY_INTERVAL {
        return Err(SwingError::invalid(
            "strategy",
            "interval",
            format!("only \"{}\" bars are supported", DAILY_INTERVAL),
        ));
    }
    Ok(())
}

fn validate_assets(strategy: &SwingStrategy) -> Result<(), SwingError> {
    if strategy.assets.is_empty() {
        return Err(SwingError::ConfigMissing {
            section: "strategy".to_string(),
            key: "assets".to_string(),
        });
    }
    Ok(())
}

fn validate_periods(strategy: &SwingStrategy) -> Result<(), SwingError> {
    for (key, value) in [
        ("sma_fast", strategy.sma_fast),
        ("sma_medium", strategy.sma_medium),
        ("sma_slow", strategy.sma_slow),
        ("atr_period", strategy.atr_period),
    ] {
        if value == 0 {
            return Err(SwingError::invalid(
                "strategy",
                key,
                format!("{} must be positive", key),
            ));
        }
    }
    if strategy.sma_fast >= strategy.sma_medium {
        return Err(SwingError::invalid(
            "strategy",
            "sma_medium",
            "sma_medium must be longer than sma_fast",
        ));
    }
    if strategy.sma_medium >= strategy.sma_slow {
        return Err(SwingError::invalid(
            "strategy",
            "sma_slow",
            "sma_slow must be longer than sma_medium",
        ));
    }
    Ok(())
}

fn validate_tolerance(strategy: &SwingStrategy) -> Result<(), SwingError> {
    let value = strategy.proximity_tolerance;
    if !(value > 0.0 && value < 1.0) {
        return Err(SwingError::invalid(
            "strategy",
            "proximity_tolerance",
            "proximity_tolerance must be between 0 and 1",
        ));
    }
    Ok(())
}

fn validate_position_size(strategy: &SwingStrategy) -> Result<(), SwingError> {
    let value = strategy.position_size;
    if !(value > 0.0 && value <= 1.0) {
        return Err(SwingError::invalid(
            "strategy",
            "position_size",
            "position_size must be in (0, 1]",
        ));
    }
    Ok(())
}

fn validate_min_bars(strategy: &SwingStrategy) -> Result<(), SwingError> {
    let longest = strategy.sma_slow.max(strategy.atr_period);
    if strategy.min_bars < longest {
        return Err(SwingError::invalid(
            "strategy",
            "min_bars",
            format!("min_bars must be at least {}", longest),
        ));
    }
    Ok(())
}
