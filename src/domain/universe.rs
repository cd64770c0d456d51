//! Tracked asset list: parsing from config and history checks.

use crate::ports::data_port::DataPort;
use log::{info, warn};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    #[error("asset list is empty")]
    Empty,

    #[error("empty token in asset list")]
    EmptyToken,

    #[error("duplicate asset: {0}")]
    DuplicateAsset(String),
}

/// Parse a comma separated asset list into upper-case, de-duplicated symbols.
pub fn parse_assets(input: &str) -> Result<Vec<String>, UniverseError> {
    if input.trim().is_empty() {
        return Err(UniverseError::Empty);
    }

    let mut assets = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateAsset(symbol));
        }
        assets.push(symbol);
    }

    Ok(assets)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStatus {
    Ready { bars: usize },
    Short { bars: usize },
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHistory {
    pub symbol: String,
    pub status: HistoryStatus,
}

/// Report how much history each asset has against `min_bars`.
///
/// Short or missing history is reported, not rejected: the strategy answers
/// it with a zero allocation.
pub fn check_history(
    data_port: &dyn DataPort,
    assets: &[String],
    min_bars: usize,
) -> Vec<AssetHistory> {
    assets
        .iter()
        .map(|symbol| {
            let status = match data_port.get_data_range(symbol) {
                Ok(Some((first, last, bars))) if bars >= min_bars => {
                    info!("  {}: {} bars, {} to {} [OK]", symbol, bars, first, last);
                    HistoryStatus::Ready { bars }
                }
                Ok(Some((_, _, bars))) => {
                    warn!(
                        "{}: only {} bars, minimum {} required; allocation will be 0",
                        symbol, bars, min_bars
                    );
                    HistoryStatus::Short { bars }
                }
                Ok(None) => {
                    warn!("{}: no data found", symbol);
                    HistoryStatus::Missing
                }
                Err(e) => {
                    warn!("{}: {}", symbol, e);
                    HistoryStatus::Missing
                }
            };
            AssetHistory {
                symbol: symbol.clone(),
                status,
            }
        })
        .collect()
}
