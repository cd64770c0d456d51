//! Port traits between the decision logic and its host.

pub mod config_port;
pub mod data_port;
pub mod diagnostic_port;
pub mod strategy_port;
