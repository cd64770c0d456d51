//! CSV file data adapter.
//!
//! One file per symbol, `{SYMBOL}.csv`, with a `date,open,high,low,close,volume`
//! header and `%Y-%m-%d` dates.

use crate::domain::error::SwingError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn field<T>(record: &csv::StringRecord, index: usize, name: &str) -> Result<T, SwingError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| SwingError::Data {
            reason: format!("missing {} column", name),
        })?
        .trim()
        .parse()
        .map_err(|e| SwingError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

fn parse_bar(record: &csv::StringRecord, symbol: &str) -> Result<OhlcvBar, SwingError> {
    let date_str = record.get(0).ok_or_else(|| SwingError::Data {
        reason: "missing date column".into(),
    })?;
    let date = NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT).map_err(|e| {
        SwingError::Data {
            reason: format!("invalid date format: {}", e),
        }
    })?;

    Ok(OhlcvBar {
        symbol: symbol.to_string(),
        date,
        open: field(record, 1, "open")?,
        high: field(record, 2, "high")?,
        low: field(record, 3, "low")?,
        close: field(record, 4, "close")?,
        volume: field(record, 5, "volume")?,
    })
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, SwingError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| SwingError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| SwingError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            let bar = parse_bar(&record, symbol)?;
            if bar.date < start_date || bar.date > end_date {
                continue;
            }
            bars.push(bar);
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, SwingError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| SwingError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SwingError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    symbols.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
