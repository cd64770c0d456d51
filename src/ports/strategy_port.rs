//! Host-facing strategy contract.

use crate::domain::allocation::Allocation;
use crate::domain::market_data::MarketData;
use crate::ports::diagnostic_port::DiagnosticSink;

pub trait StrategyPort {
    /// Bar interval the strategy expects, e.g. "1d".
    fn interval(&self) -> &str;

    /// Symbols the strategy allocates to.
    fn assets(&self) -> &[String];

    /// Target weights for every tracked asset given the current bars.
    fn run(&self, data: &MarketData<'_>, sink: &mut dyn DiagnosticSink) -> Allocation;
}
