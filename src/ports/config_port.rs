//! Configuration access port trait.

use crate::domain::error::SwingError;
use std::str::FromStr;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}

/// Absent keys yield `default`; a present value that does not parse is an error.
pub fn read_parsed<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: T,
    expected: &str,
) -> Result<T, SwingError> {
    match config.get_string(section, key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            SwingError::invalid(section, key, format!("expected {}, got {:?}", expected, raw))
        }),
    }
}
