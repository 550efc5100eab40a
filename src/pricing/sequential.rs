//! Sequential linear pricing.
//!
//! Formula: new_price = previous_price + alpha * occupancy_rate, clamped to the band.
//! The previous price is tracked per space and threaded explicitly through [`LinearModel::step`].

use crate::pricing::price::PriceBand;
use crate::pricing::{PricingModel, log_progress};
use crate::record::{Record, SequentialRow, SpaceId, sort_by_space_and_time};
use crate::table::{PricingOutput, PricingTable};
use serde::Deserialize;
use std::collections::HashMap;

/// Linear model parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinearParams {
    pub band: PriceBand,
    /// Price added per unit of occupancy rate.
    pub alpha: f64,
}

impl Default for LinearParams {
    fn default() -> Self {
        Self {
            band: PriceBand::default(),
            alpha: 5.0,
        }
    }
}

/// Running price of every space seen in one processing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingState {
    base_price: f64,
    prices: HashMap<SpaceId, f64>,
}

impl PricingState {
    pub fn new(base_price: f64) -> Self {
        Self {
            base_price,
            prices: HashMap::new(),
        }
    }

    /// State with every distinct space of `records` starting at the base price.
    pub fn seeded<'a>(base_price: f64, records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut state = Self::new(base_price);
        for record in records {
            state
                .prices
                .entry(record.space_id.clone())
                .or_insert(base_price);
        }
        state
    }

    /// Current price of a space, or the base price if it has not been seen.
    pub fn price(&self, space_id: &str) -> f64 {
        self.prices.get(space_id).copied().unwrap_or(self.base_price)
    }

    pub fn with_price(mut self, space_id: &str, price: f64) -> Self {
        match self.prices.get_mut(space_id) {
            Some(current) => *current = price,
            None => {
                self.prices.insert(space_id.to_string(), price);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[derive(Debug)]
pub struct LinearModel {
    pub params: LinearParams,
}

impl LinearModel {
    pub fn new(params: LinearParams) -> Self {
        Self { params }
    }

    pub fn with_defaults() -> Self {
        Self::new(LinearParams::default())
    }

    /// Advance the running price of `record`'s space by one observation.
    pub fn step(&self, state: PricingState, record: &Record) -> (PricingState, SequentialRow) {
        let occupancy_rate = record.occupancy_rate();
        let previous_price = state.price(&record.space_id);
        let new_price =
            self.params
                .band
                .linear_price(previous_price, occupancy_rate, self.params.alpha);

        let row = SequentialRow {
            id: record.id,
            space_id: record.space_id.clone(),
            date_time: record.date_time(),
            occupancy: record.occupancy,
            capacity: record.capacity,
            occupancy_rate,
            previous_price,
            new_price,
            price_change: new_price - previous_price,
            vehicle_type: record.vehicle_type.clone(),
            traffic_condition: record.traffic_condition.clone(),
            queue_length: record.queue_length,
        };

        (state.with_price(&record.space_id, new_price), row)
    }

    pub fn price_records(&self, records: &[Record]) -> PricingTable<SequentialRow> {
        let sorted = sort_by_space_and_time(records);
        let mut state = PricingState::seeded(self.params.band.base_price, sorted.iter().copied());
        let mut rows = Vec::with_capacity(sorted.len());

        for (index, record) in sorted.into_iter().enumerate() {
            let (next, row) = self.step(state, record);
            state = next;
            rows.push(row);
            log_progress(self.name(), index);
        }

        PricingTable::new(rows)
    }
}

impl PricingModel for LinearModel {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn band(&self) -> &PriceBand {
        &self.params.band
    }

    fn run(&self, records: &[Record]) -> PricingOutput {
        PricingOutput::Sequential(self.price_records(records))
    }
}
