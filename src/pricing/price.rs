//! Price calculators and the clamping band shared by every model.

use serde::Deserialize;

/// Hard floor and ceiling around the base price.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PriceBand {
    pub base_price: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

impl Default for PriceBand {
    fn default() -> Self {
        Self {
            base_price: 10.0,
            min_multiplier: 0.5,
            max_multiplier: 2.0,
        }
    }
}

impl PriceBand {
    pub fn floor(&self) -> f64 {
        self.base_price * self.min_multiplier
    }

    pub fn ceiling(&self) -> f64 {
        self.base_price * self.max_multiplier
    }

    pub fn clamp(&self, price: f64) -> f64 {
        self.floor().max(self.ceiling().min(price))
    }

    /// Previous price nudged up by `alpha * occupancy_rate`.
    pub fn linear_price(&self, previous_price: f64, occupancy_rate: f64, alpha: f64) -> f64 {
        self.clamp(previous_price + alpha * occupancy_rate)
    }

    /// Base price scaled by `1 + lambda * normalized_demand`.
    pub fn demand_price(&self, normalized_demand: f64, lambda: f64) -> f64 {
        self.clamp(self.base_price * (1.0 + lambda * normalized_demand))
    }
}
