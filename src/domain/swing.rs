//! Allocation decision for one instrument.
//!
//! The rules run in a fixed order on the final bar of the window:
//!
//! 1. breakout: close above the opening-range reference (the day's open)
//! 2. volatility veto: a body larger than ATR voids the setup
//! 3. support: close within tolerance of the fast, medium or slow SMA
//! 4. sizing: a surviving signal gets the fixed position size
//! 5. exit: a close below the fast SMA forces the weight to zero
//!
//! Every call recomputes its indicators from `bars`; nothing is remembered
//! between calls. Diagnostics go to the caller's sink and never feed back
//! into the decision.

use crate::domain::indicator::{calculate_atr, calculate_sma};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::strategy::SwingStrategy;
use crate::ports::diagnostic_port::DiagnosticSink;
use std::fmt;

/// Latest indicator values used by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub sma_fast: f64,
    pub sma_medium: f64,
    pub sma_slow: f64,
    pub atr: f64,
}

impl IndicatorSnapshot {
    /// `None` when any indicator is still in warmup.
    pub fn compute(strategy: &SwingStrategy, bars: &[OhlcvBar]) -> Option<Self> {
        Some(Self {
            sma_fast: calculate_sma(bars, strategy.sma_fast).latest()?,
            sma_medium: calculate_sma(bars, strategy.sma_medium).latest()?,
            sma_slow: calculate_sma(bars, strategy.sma_slow).latest()?,
            atr: calculate_atr(bars, strategy.atr_period).latest()?,
        })
    }
}

/// Which moving average the entry is leaning on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportTier {
    /// Near the fast SMA.
    Strong,
    /// Near the medium SMA.
    Moderate,
    /// Near the slow SMA.
    Slower,
}

impl fmt::Display for SupportTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportTier::Strong => write!(f, "strong"),
            SupportTier::Moderate => write!(f, "moderate"),
            SupportTier::Slower => write!(f, "slower"),
        }
    }
}

/// |close - ma| / ma, or `None` when `ma` is zero or not finite.
pub fn relative_distance(close: f64, ma: f64) -> Option<f64> {
    if ma == 0.0 || !ma.is_finite() {
        return None;
    }
    Some((close - ma).abs() / ma)
}

/// First moving average, in fast → medium → slow order, within `tolerance`.
pub fn support_tier(
    close: f64,
    indicators: &IndicatorSnapshot,
    tolerance: f64,
) -> Option<SupportTier> {
    let near = |ma: f64| relative_distance(close, ma).is_some_and(|d| d < tolerance);

    if near(indicators.sma_fast) {
        Some(SupportTier::Strong)
    } else if near(indicators.sma_medium) {
        Some(SupportTier::Moderate)
    } else if near(indicators.sma_slow) {
        Some(SupportTier::Slower)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub indicators: IndicatorSnapshot,
    pub opening_range: f64,
    pub breakout: bool,
    pub volatility_veto: bool,
    pub support: Option<SupportTier>,
    pub entry_signal: bool,
    pub exit_signal: bool,
    /// Low of the final bar; informational only.
    pub stop_loss: f64,
    pub allocation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    InsufficientData { bars: usize, required: usize },
    Evaluated(Evaluation),
}

impl Decision {
    pub fn allocation(&self) -> f64 {
        match self {
            Decision::InsufficientData { .. } => 0.0,
            Decision::Evaluated(e) => e.allocation,
        }
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            Decision::InsufficientData { .. } => None,
            Decision::Evaluated(e) => Some(e),
        }
    }

    pub fn support(&self) -> Option<SupportTier> {
        self.evaluation().and_then(|e| e.support)
    }

    pub fn stop_loss(&self) -> Option<f64> {
        self.evaluation().map(|e| e.stop_loss)
    }
}

fn insufficient_data(
    symbol: &str,
    bars: usize,
    required: usize,
    sink: &mut dyn DiagnosticSink,
) -> Decision {
    sink.emit(&format!(
        "Insufficient data for {}: {} bars, need {}.",
        symbol, bars, required
    ));
    Decision::InsufficientData { bars, required }
}

pub fn evaluate(
    strategy: &SwingStrategy,
    symbol: &str,
    bars: &[OhlcvBar],
    sink: &mut dyn DiagnosticSink,
) -> Decision {
    let required = strategy.required_bars();
    if bars.len() < required {
        return insufficient_data(symbol, bars.len(), required, sink);
    }
    let (Some(latest), Some(indicators)) =
        (bars.last(), IndicatorSnapshot::compute(strategy, bars))
    else {
        return insufficient_data(symbol, bars.len(), required, sink);
    };

    sink.emit(&format!(
        "{}-day SMA: {:.2}, {}-day SMA: {:.2}, {}-day SMA: {:.2}",
        strategy.sma_fast,
        indicators.sma_fast,
        strategy.sma_medium,
        indicators.sma_medium,
        strategy.sma_slow,
        indicators.sma_slow
    ));
    sink.emit(&format!(
        "ATR ({}-day): {:.2}",
        strategy.atr_period, indicators.atr
    ));

    // Stand-in for the high of the first candle.
    let opening_range = latest.open;
    let breakout = latest.close > opening_range;
    let mut entry_signal = breakout;

    let volatility_veto = latest.body() > indicators.atr;
    if volatility_veto {
        sink.emit("Avoiding entry: Price change exceeds ATR.");
        entry_signal = false;
    }

    let support = support_tier(latest.close, &indicators, strategy.proximity_tolerance);
    if entry_signal {
        match support {
            Some(SupportTier::Strong) => sink.emit(&format!(
                "Entry setup: Price is near the {}-day SMA (strong support).",
                strategy.sma_fast
            )),
            Some(SupportTier::Moderate) => sink.emit(&format!(
                "Entry setup: Price is near the {}-day SMA (moderate support).",
                strategy.sma_medium
            )),
            Some(SupportTier::Slower) => sink.emit(&format!(
                "Entry setup: Price is near the {}-day SMA (slower setup).",
                strategy.sma_slow
            )),
            None => {
                sink.emit("Entry signal present but price is not close enough to a key MA.");
                entry_signal = false;
            }
        }
    }

    let mut allocation = if entry_signal {
        strategy.position_size
    } else {
        0.0
    };

    let exit_signal = latest.close < indicators.sma_fast;
    if exit_signal {
        sink.emit(&format!(
            "Exit signal: Price closed below the {}-day SMA.",
            strategy.sma_fast
        ));
        allocation = 0.0;
    }

    let stop_loss = latest.low;
    sink.emit(&format!("Stop-loss set at: {:.2}", stop_loss));

    Decision::Evaluated(Evaluation {
        indicators,
        opening_range,
        breakout,
        volatility_veto,
        support: if entry_signal { support } else { None },
        entry_signal,
        exit_signal,
        stop_loss,
        allocation,
    })
}
