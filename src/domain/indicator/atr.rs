//! Average True Range with Wilder smoothing.
//!
//! TR[0] = H[0] - L[0]; TR[i] = true range against C[i-1].
//! Seed at index n-1 is the mean of the first n true ranges, then
//! ATR[i] = (ATR[i-1] * (n-1) + TR[i]) / n.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_atr(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.len() < period {
        return IndicatorSeries::empty(IndicatorType::Atr(period));
    }

    let n = period as f64;
    let mut values: Vec<IndicatorPoint> = Vec::with_capacity(bars.len());
    let mut tr_sum = 0.0;
    let mut atr = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        let tr = match i {
            0 => bar.high - bar.low,
            _ => bar.true_range(bars[i - 1].close),
        };

        let valid = if i + 1 < period {
            tr_sum += tr;
            false
        } else if i + 1 == period {
            atr = (tr_sum + tr) / n;
            true
        } else {
            atr = (atr * (n - 1.0) + tr) / n;
            true
        };

        values.push(IndicatorPoint {
            date: bar.date,
            valid,
            value: if valid { atr } else { 0.0 },
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Atr(period),
        values,
    }
}
