//! swingtrader — moving-average swing strategy allocator.
//!
//! Hexagonal architecture: the decision logic lives in [`domain`], host-facing
//! traits in [`ports`], file-backed implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
