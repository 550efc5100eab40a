//! Demand-based pricing.
//!
//! Raw demand is scored for every record, normalized once against the whole
//! batch, and each record is then priced from its own normalized demand:
//! price = base_price * (1 + lambda * normalized_demand), clamped to the band.

use crate::pricing::demand::{DemandCoefficients, RawDemand};
use crate::pricing::normalize::NormalizedDemand;
use crate::pricing::price::PriceBand;
use crate::pricing::{PricingModel, log_progress};
use crate::record::{DemandRow, Record, sort_by_space_and_time};
use crate::table::{PricingOutput, PricingTable};
use serde::Deserialize;
use tracing::info;

/// Demand model parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemandParams {
    pub band: PriceBand,
    pub coefficients: DemandCoefficients,
    /// Demand-to-price sensitivity.
    pub lambda: f64,
    /// Occupancy sensitivity of the linear baseline reported alongside each price.
    pub baseline_alpha: f64,
}

impl Default for DemandParams {
    fn default() -> Self {
        Self {
            band: PriceBand::default(),
            coefficients: DemandCoefficients::default(),
            lambda: 0.8,
            baseline_alpha: 5.0,
        }
    }
}

#[derive(Debug)]
pub struct DemandModel {
    pub params: DemandParams,
}

impl DemandModel {
    pub fn new(params: DemandParams) -> Self {
        Self { params }
    }

    pub fn with_defaults() -> Self {
        Self::new(DemandParams::default())
    }

    pub fn price_records(&self, records: &[Record]) -> PricingTable<DemandRow> {
        let sorted = sort_by_space_and_time(records);
        let raw = RawDemand::from_records(sorted.iter().copied(), &self.params.coefficients);
        let normalized = raw.normalize();
        self.price_batch(&sorted, &raw, &normalized)
    }

    /// Second pass: price each record from its slot in the batch-wide normalization.
    ///
    /// The baseline column is a single running linear price carried across the
    /// whole output order; it is not reset between spaces.
    fn price_batch(
        &self,
        sorted: &[&Record],
        raw: &RawDemand,
        normalized: &NormalizedDemand,
    ) -> PricingTable<DemandRow> {
        let band = &self.params.band;
        let mut baseline_price = band.base_price;
        let mut rows = Vec::with_capacity(sorted.len());

        for (index, (record, (&raw_demand, &normalized_demand))) in sorted
            .iter()
            .zip(raw.values().iter().zip(normalized.values()))
            .enumerate()
        {
            let occupancy_rate = record.occupancy_rate();
            let price = band.demand_price(normalized_demand, self.params.lambda);
            baseline_price =
                band.linear_price(baseline_price, occupancy_rate, self.params.baseline_alpha);

            rows.push(DemandRow {
                id: record.id,
                space_id: record.space_id.clone(),
                date_time: record.date_time(),
                occupancy_rate,
                queue_length: record.queue_length,
                traffic_condition: record.traffic_condition.clone(),
                is_special_day: record.is_special_day,
                vehicle_type: record.vehicle_type.clone(),
                raw_demand,
                normalized_demand,
                price,
                price_multiplier: price / band.base_price,
                baseline_price,
                price_difference: price - baseline_price,
            });
            log_progress(self.name(), index);
        }

        let table = PricingTable::new(rows);
        if let Some(difference) = mean_price_difference(&table) {
            info!(
                average_difference = difference,
                "Demand pricing compared against linear baseline"
            );
        }
        table
    }
}

/// Mean of `price - baseline_price` over the table.
pub fn mean_price_difference(table: &PricingTable<DemandRow>) -> Option<f64> {
    let rows = table.rows();
    if rows.is_empty() {
        return None;
    }
    let total: f64 = rows.iter().map(|row| row.price_difference).sum();
    Some(total / rows.len() as f64)
}

impl PricingModel for DemandModel {
    fn name(&self) -> &'static str {
        "demand"
    }

    fn band(&self) -> &PriceBand {
        &self.params.band
    }

    fn run(&self, records: &[Record]) -> PricingOutput {
        PricingOutput::Demand(self.price_records(records))
    }
}
