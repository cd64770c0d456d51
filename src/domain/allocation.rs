//! Target allocation: symbol → fraction of portfolio equity.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allocation {
    weights: BTreeMap<String, f64>,
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weights are clamped to [0, 1]; NaN becomes 0.
    pub fn insert(&mut self, symbol: &str, weight: f64) {
        let weight = if weight.is_nan() {
            0.0
        } else {
            weight.clamp(0.0, 1.0)
        };
        self.weights.insert(symbol.to_string(), weight);
    }

    pub fn weight(&self, symbol: &str) -> Option<f64> {
        self.weights.get(symbol).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(s, w)| (s.as_str(), *w))
    }
}

impl<'a> FromIterator<(&'a str, f64)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut allocation = Self::new();
        for (symbol, weight) in iter {
            allocation.insert(symbol, weight);
        }
        allocation
    }
}
