//! Core domain types and the allocation decision.

pub mod allocation;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod market_data;
pub mod ohlcv;
pub mod strategy;
pub mod swing;
pub mod universe;
