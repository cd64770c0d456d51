//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{error, info, warn, Level};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::diagnostic_sink::LogSink;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::allocation::Allocation;
use crate::domain::config_validation::validate_strategy_config;
use crate::domain::error::SwingError;
use crate::domain::market_data::MarketData;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::strategy::SwingStrategy;
use crate::domain::swing::{self, Decision};
use crate::domain::universe::{check_history, HistoryStatus};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::strategy_port::StrategyPort;

#[derive(Parser, Debug)]
#[command(name = "swingtrader", about = "Moving-average swing strategy allocator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the target allocation from the latest bars
    Evaluate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Ignore bars after this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Re-evaluate the strategy for every day in a date range
    Replay {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Defaults to the first configured asset
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// CSV output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a strategy configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols with data files
    ListSymbols {
        #[arg(long)]
        data_dir: PathBuf,
    },
    /// Show data range and history sufficiency
    Info {
        #[arg(long)]
        data_dir: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Evaluate {
            config,
            data_dir,
            as_of,
        } => run_evaluate(&config, data_dir.as_deref(), as_of),
        Command::Replay {
            config,
            data_dir,
            symbol,
            from,
            to,
            output,
        } => run_replay_command(
            &config,
            data_dir.as_deref(),
            symbol.as_deref(),
            from,
            to,
            output.as_deref(),
        ),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { data_dir } => run_list_symbols(&data_dir),
        Command::Info {
            data_dir,
            symbol,
            config,
        } => run_info(&data_dir, symbol.as_deref(), config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

/// Load an INI file and build a validated strategy from it.
pub fn load_strategy(path: &Path) -> Result<(FileConfigAdapter, SwingStrategy), SwingError> {
    info!("Loading config from {}", path.display());
    let adapter = FileConfigAdapter::from_file(path)?;
    let strategy = validate_strategy_config(&adapter)?;
    Ok((adapter, strategy))
}

/// `--data-dir` wins over `[data] dir`.
pub fn resolve_data_dir(
    override_dir: Option<&Path>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, SwingError> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    config
        .get_string("data", "dir")
        .filter(|d| !d.trim().is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| SwingError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })
}

/// Outcome of one `evaluate` run: the allocation and the per-asset decisions
/// it was built from, in configured asset order.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub allocation: Allocation,
    pub decisions: Vec<(String, Decision)>,
}

/// Fetch each tracked asset up to `as_of` and run the strategy once.
///
/// An asset whose data cannot be read is allocated zero; it is an error only
/// when no asset has any bars at all.
pub fn run_evaluation(
    data_port: &dyn DataPort,
    strategy: &SwingStrategy,
    as_of: Option<NaiveDate>,
) -> Result<EvaluationReport, SwingError> {
    let end_date = as_of.unwrap_or(NaiveDate::MAX);
    let mut series: Vec<(String, Vec<OhlcvBar>)> = Vec::with_capacity(strategy.assets().len());

    for symbol in strategy.assets() {
        let bars = match data_port.fetch_ohlcv(symbol, NaiveDate::MIN, end_date) {
            Ok(bars) => bars,
            Err(e) => {
                warn!("{}: {}; allocating 0", symbol, e);
                Vec::new()
            }
        };
        series.push((symbol.clone(), bars));
    }

    if series.iter().all(|(_, bars)| bars.is_empty()) {
        return Err(SwingError::NoData {
            symbol: strategy.assets().join(","),
        });
    }

    let data = series
        .iter()
        .fold(MarketData::new(), |data, (symbol, bars)| {
            data.with_series(symbol, bars)
        });

    let mut sink = LogSink::new(&strategy.name, Level::Info);
    let decisions = strategy.decide(&data, &mut sink);
    let allocation = decisions
        .iter()
        .map(|(symbol, decision)| (symbol.as_str(), decision.allocation()))
        .collect();
    Ok(EvaluationReport {
        allocation,
        decisions,
    })
}

/// One `SYMBOL=weight` line per asset, followed by `SYMBOL stop-loss=price`
/// when the asset had enough history to produce one.
pub fn write_report<W: Write>(report: &EvaluationReport, mut out: W) -> Result<(), SwingError> {
    for (symbol, decision) in &report.decisions {
        let weight = report.allocation.weight(symbol).unwrap_or(0.0);
        writeln!(out, "{}={:.2}", symbol, weight)?;
        if let Some(stop_loss) = decision.stop_loss() {
            writeln!(out, "{} stop-loss={:.2}", symbol, stop_loss)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Evaluate every prefix window of `symbol` whose last bar falls in
/// `[from, to]`, writing one CSV row per day. Returns the row count.
pub fn run_replay<W: Write>(
    data_port: &dyn DataPort,
    strategy: &SwingStrategy,
    symbol: &str,
    from: NaiveDate,
    to: NaiveDate,
    out: W,
) -> Result<usize, SwingError> {
    let bars = data_port.fetch_ohlcv(symbol, NaiveDate::MIN, to)?;
    if bars.is_empty() {
        return Err(SwingError::NoData {
            symbol: symbol.to_string(),
        });
    }

    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["date", "close", "allocation", "support", "exit", "stop_loss"])
        .map_err(csv_error)?;

    let mut sink = LogSink::new(symbol, Level::Debug);
    let mut rows = 0;

    for (i, bar) in bars.iter().enumerate() {
        if bar.date < from {
            continue;
        }
        let decision = swing::evaluate(strategy, symbol, &bars[..=i], &mut sink);
        let support = decision.support().map(|t| t.to_string()).unwrap_or_default();
        let exit = decision.evaluation().is_some_and(|e| e.exit_signal);
        let stop_loss = decision
            .stop_loss()
            .map(|s| format!("{:.2}", s))
            .unwrap_or_default();

        writer
            .write_record([
                bar.date.to_string(),
                format!("{:.2}", bar.close),
                format!("{:.2}", decision.allocation()),
                support,
                exit.to_string(),
                stop_loss,
            ])
            .map_err(csv_error)?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

fn csv_error(e: csv::Error) -> SwingError {
    SwingError::Data {
        reason: format!("CSV write error: {}", e),
    }
}

fn run_evaluate(
    config_path: &Path,
    data_dir: Option<&Path>,
    as_of: Option<NaiveDate>,
) -> Result<(), SwingError> {
    let (adapter, strategy) = load_strategy(config_path)?;
    let data_port = CsvAdapter::new(resolve_data_dir(data_dir, &adapter)?);

    info!(
        "Evaluating {} ({}) for {}",
        strategy.name,
        strategy.interval(),
        strategy.assets().join(", ")
    );
    let report = run_evaluation(&data_port, &strategy, as_of)?;
    write_report(&report, io::stdout().lock())
}

fn run_replay_command(
    config_path: &Path,
    data_dir: Option<&Path>,
    symbol: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    output: Option<&Path>,
) -> Result<(), SwingError> {
    let (adapter, strategy) = load_strategy(config_path)?;
    let data_port = CsvAdapter::new(resolve_data_dir(data_dir, &adapter)?);

    let symbol = match symbol {
        Some(s) => s.to_uppercase(),
        None => strategy
            .assets()
            .first()
            .cloned()
            .ok_or_else(|| SwingError::ConfigMissing {
                section: "strategy".into(),
                key: "assets".into(),
            })?,
    };
    let from = from.unwrap_or(NaiveDate::MIN);
    let to = to.unwrap_or(NaiveDate::MAX);

    let rows = match output {
        Some(path) => {
            let rows = run_replay(&data_port, &strategy, &symbol, from, to, File::create(path)?)?;
            info!("Replay written to: {}", path.display());
            rows
        }
        None => run_replay(&data_port, &strategy, &symbol, from, to, io::stdout().lock())?,
    };
    info!("Replayed {} days for {}", rows, symbol);
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), SwingError> {
    let (_, strategy) = load_strategy(config_path)?;

    info!("Config validated successfully");
    info!("  strategy:  {}", strategy.name);
    info!("  interval:  {}", strategy.interval);
    info!("  assets:    {}", strategy.assets.join(", "));
    info!(
        "  SMAs:      {}/{}/{}, ATR {}",
        strategy.sma_fast, strategy.sma_medium, strategy.sma_slow, strategy.atr_period
    );
    info!(
        "  tolerance: {:.2}%, position size: {:.0}%, min bars: {}",
        strategy.proximity_tolerance * 100.0,
        strategy.position_size * 100.0,
        strategy.required_bars()
    );
    Ok(())
}

fn run_list_symbols(data_dir: &Path) -> Result<(), SwingError> {
    let data_port = CsvAdapter::new(data_dir.to_path_buf());
    let symbols = data_port.list_symbols()?;

    info!("Symbols in {} ({} total):", data_dir.display(), symbols.len());
    let mut stdout = io::stdout().lock();
    for symbol in &symbols {
        writeln!(stdout, "{}", symbol)?;
    }
    Ok(())
}

fn run_info(
    data_dir: &Path,
    symbol: Option<&str>,
    config_path: Option<&Path>,
) -> Result<(), SwingError> {
    let strategy = match config_path {
        Some(path) => load_strategy(path)?.1,
        None => SwingStrategy::default(),
    };
    let data_port = CsvAdapter::new(data_dir.to_path_buf());

    let symbols = match symbol {
        Some(s) => vec![s.to_uppercase()],
        None if config_path.is_some() => strategy.assets.clone(),
        None => data_port.list_symbols()?,
    };

    let report = check_history(&data_port, &symbols, strategy.required_bars());
    let mut stdout = io::stdout().lock();
    for entry in &report {
        let status = match entry.status {
            HistoryStatus::Ready { bars } => format!("{} bars, ready", bars),
            HistoryStatus::Short { bars } => format!("{} bars, too short", bars),
            HistoryStatus::Missing => "no data".to_string(),
        };
        writeln!(stdout, "{}: {}", entry.symbol, status)?;
    }
    Ok(())
}
