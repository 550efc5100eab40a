//! Location-aware competitive pricing.
//!
//! Every record is first priced like the demand model (batch-wide normalization,
//! chronological order across all spaces). The price is then adjusted against
//! the records of other spaces within `distance_threshold_km`:
//!
//! - competitors cheaper and queue above `queue_threshold`: undercut them by `undercut_margin`
//! - competitors dearer and occupancy above `occupancy_threshold`: add `premium_margin`
//! - otherwise keep the demand price
//!
//! A competitor's price is derived from its own demand normalized as a
//! one-element batch, which always lands on zero, so every competitor is
//! quoted at the (clamped) base price. This matches the reference pricing
//! output and is kept as-is.

use crate::geo::GeoPoint;
use crate::pricing::demand::{DemandCoefficients, RawDemand};
use crate::pricing::normalize::NormalizedDemand;
use crate::pricing::price::PriceBand;
use crate::pricing::{PricingModel, log_progress};
use crate::record::{CompetitiveRow, Record, sort_by_time};
use crate::table::{PricingOutput, PricingTable};
use serde::Deserialize;

/// Competitive model parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompetitiveParams {
    pub band: PriceBand,
    pub coefficients: DemandCoefficients,
    pub lambda: f64,
    /// Great-circle radius (km) within which another space counts as a competitor.
    pub distance_threshold_km: f64,
    /// Queue length that must be exceeded before undercutting.
    pub queue_threshold: u32,
    /// Occupancy rate that must be exceeded before adding a premium.
    pub occupancy_threshold: f64,
    pub undercut_margin: f64,
    pub premium_margin: f64,
}

impl Default for CompetitiveParams {
    fn default() -> Self {
        Self {
            band: PriceBand::default(),
            coefficients: DemandCoefficients::default(),
            lambda: 0.8,
            distance_threshold_km: 0.5,
            queue_threshold: 3,
            occupancy_threshold: 0.9,
            undercut_margin: 0.5,
            premium_margin: 0.5,
        }
    }
}

#[derive(Debug)]
pub struct CompetitiveModel {
    pub params: CompetitiveParams,
}

impl CompetitiveModel {
    pub fn new(params: CompetitiveParams) -> Self {
        Self { params }
    }

    pub fn with_defaults() -> Self {
        Self::new(CompetitiveParams::default())
    }

    pub fn price_records(&self, records: &[Record]) -> PricingTable<CompetitiveRow> {
        let band = &self.params.band;
        let sorted = sort_by_time(records);
        let raw = RawDemand::from_records(sorted.iter().copied(), &self.params.coefficients);
        let normalized = raw.normalize();

        let points: Vec<GeoPoint> = sorted.iter().map(|record| GeoPoint::from(*record)).collect();
        // Depends only on the competitor record, so quote it once per record.
        let quotes: Vec<f64> = sorted
            .iter()
            .map(|record| self.isolated_price(record))
            .collect();

        let mut rows = Vec::with_capacity(sorted.len());
        for (index, record) in sorted.iter().enumerate() {
            let raw_demand = raw.values()[index];
            let normalized_demand = normalized.values()[index];
            let demand_price = band.demand_price(normalized_demand, self.params.lambda);

            let nearby = self.nearby_quotes(index, &sorted, &points, &quotes);
            let price = band.clamp(self.adjust(demand_price, &nearby, record));

            rows.push(CompetitiveRow {
                id: record.id,
                space_id: record.space_id.clone(),
                date_time: record.date_time(),
                occupancy_rate: record.occupancy_rate(),
                queue_length: record.queue_length,
                raw_demand,
                normalized_demand,
                latitude: record.latitude,
                longitude: record.longitude,
                price,
                nearby_competitor_count: nearby.len(),
            });
            log_progress(self.name(), index);
        }

        PricingTable::new(rows)
    }

    /// Price of a record whose demand is normalized on its own.
    pub fn isolated_price(&self, record: &Record) -> f64 {
        let demand = self.params.coefficients.score(record);
        let normalized = NormalizedDemand::from_raw(&[demand]).get(0).unwrap_or(0.0);
        self.params.band.demand_price(normalized, self.params.lambda)
    }

    /// Quotes of every record from another space within the distance threshold.
    ///
    /// All-pairs scan: O(n) per record, O(n^2) per run.
    fn nearby_quotes(
        &self,
        index: usize,
        sorted: &[&Record],
        points: &[GeoPoint],
        quotes: &[f64],
    ) -> Vec<f64> {
        let this = sorted[index];
        let origin = &points[index];
        sorted
            .iter()
            .zip(points)
            .zip(quotes)
            .filter(|((other, point), _)| {
                other.space_id != this.space_id
                    && origin.distance_km(point) <= self.params.distance_threshold_km
            })
            .map(|(_, quote)| *quote)
            .collect()
    }

    fn adjust(&self, demand_price: f64, nearby: &[f64], record: &Record) -> f64 {
        if nearby.is_empty() {
            return demand_price;
        }
        let average = nearby.iter().sum::<f64>() / nearby.len() as f64;
        if average < demand_price && record.queue_length > self.params.queue_threshold {
            average - self.params.undercut_margin
        } else if average > demand_price
            && record.occupancy_rate() > self.params.occupancy_threshold
        {
            demand_price + self.params.premium_margin
        } else {
            demand_price
        }
    }
}

impl PricingModel for CompetitiveModel {
    fn name(&self) -> &'static str {
        "competitive"
    }

    fn band(&self) -> &PriceBand {
        &self.params.band
    }

    fn run(&self, records: &[Record]) -> PricingOutput {
        PricingOutput::Competitive(self.price_records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::record;

    // About 0.18 km from the fixture location.
    const NEAR: (f64, f64) = (26.146000, 91.737000);
    // About 11 km from the fixture location.
    const FAR: (f64, f64) = (26.244536, 91.736172);

    fn at(mut record: Record, (lat, lon): (f64, f64)) -> Record {
        record.latitude = lat;
        record.longitude = lon;
        record
    }

    fn with_queue(mut record: Record, queue_length: u32) -> Record {
        record.queue_length = queue_length;
        record
    }

    fn row<'a>(table: &'a PricingTable<CompetitiveRow>, space_id: &str) -> &'a CompetitiveRow {
        table
            .rows()
            .iter()
            .find(|row| row.space_id == space_id)
            .expect("row for space")
    }

    #[test]
    fn isolated_record_keeps_demand_price() {
        let model = CompetitiveModel::with_defaults();
        let records = vec![
            with_queue(record("A", "04-10-2016", "08:00:00", 90, 100), 8),
            at(record("B", "04-10-2016", "08:00:00", 10, 100), FAR),
        ];

        let table = model.price_records(&records);
        let a = row(&table, "A");

        assert_eq!(a.nearby_competitor_count, 0);
        assert_eq!(a.normalized_demand, 1.0);
        assert_eq!(a.price, 18.0);
    }

    #[test]
    fn busy_expensive_lot_undercuts_competitors() {
        let model = CompetitiveModel::with_defaults();
        let records = vec![
            with_queue(record("A", "04-10-2016", "08:00:00", 90, 100), 8),
            at(record("B", "04-10-2016", "08:00:00", 10, 100), NEAR),
        ];

        let table = model.price_records(&records);
        let a = row(&table, "A");

        // competitors are quoted at 10.0; A's own demand price is 18.0
        assert_eq!(a.nearby_competitor_count, 1);
        assert_eq!(a.price, 10.0 - 0.5);
    }

    #[test]
    fn short_queue_never_undercuts() {
        let model = CompetitiveModel::with_defaults();
        let records = vec![
            with_queue(record("A", "04-10-2016", "08:00:00", 90, 100), 3),
            at(record("B", "04-10-2016", "08:00:00", 10, 100), NEAR),
        ];

        let table = model.price_records(&records);
        let a = row(&table, "A");

        assert_eq!(a.nearby_competitor_count, 1);
        assert_eq!(a.price, 18.0);
    }

    #[test]
    fn full_cheap_lot_adds_premium() {
        let model = CompetitiveModel::with_defaults();
        let mut cheap = record("A", "04-10-2016", "08:00:00", 95, 100);
        cheap.traffic_condition = "high".to_string();
        let busy = with_queue(at(record("B", "04-10-2016", "08:00:00", 50, 100), NEAR), 10);

        let table = model.price_records(&[cheap, busy]);
        let a = row(&table, "A");

        // A has the lowest demand: 5.0 floor, competitors quoted at 10.0, occupancy 0.95
        assert_eq!(a.normalized_demand, -1.0);
        assert_eq!(a.price, 5.0 + 0.5);
    }

    #[test]
    fn same_space_records_are_not_competitors() {
        let model = CompetitiveModel::with_defaults();
        let records = vec![
            with_queue(record("A", "04-10-2016", "08:00:00", 90, 100), 8),
            record("A", "04-10-2016", "08:30:00", 10, 100),
        ];

        let table = model.price_records(&records);

        assert!(table.rows().iter().all(|row| row.nearby_competitor_count == 0));
    }

    #[test]
    fn competitors_are_counted_across_the_whole_batch() {
        let model = CompetitiveModel::with_defaults();
        let records = vec![
            record("A", "04-10-2016", "08:00:00", 50, 100),
            at(record("B", "04-10-2016", "09:00:00", 50, 100), NEAR),
            at(record("B", "05-10-2016", "09:00:00", 50, 100), NEAR),
            at(record("C", "04-10-2016", "08:00:00", 50, 100), FAR),
        ];

        let table = model.price_records(&records);

        assert_eq!(row(&table, "A").nearby_competitor_count, 2);
        assert_eq!(row(&table, "C").nearby_competitor_count, 0);
    }

    #[test]
    fn isolated_price_is_always_base_price() {
        let model = CompetitiveModel::with_defaults();
        let busy = with_queue(record("A", "04-10-2016", "08:00:00", 100, 100), 20);
        let idle = record("B", "04-10-2016", "08:00:00", 0, 100);

        assert_eq!(model.isolated_price(&busy), 10.0);
        assert_eq!(model.isolated_price(&idle), 10.0);
    }

    #[test]
    fn output_is_chronological_across_spaces() {
        let model = CompetitiveModel::with_defaults();
        let records = vec![
            record("A", "04-10-2016", "09:00:00", 50, 100),
            at(record("B", "04-10-2016", "08:00:00", 50, 100), FAR),
            record("A", "04-10-2016", "08:30:00", 50, 100),
        ];

        let table = model.price_records(&records);
        let order: Vec<(&str, &str)> = table
            .rows()
            .iter()
            .map(|row| (row.space_id.as_str(), row.date_time.as_str()))
            .collect();

        assert_eq!(
            order,
            vec![
                ("B", "04-10-2016 08:00:00"),
                ("A", "04-10-2016 08:30:00"),
                ("A", "04-10-2016 09:00:00"),
            ]
        );
    }

    #[test]
    fn final_price_stays_within_band() {
        let model = CompetitiveModel::new(CompetitiveParams {
            undercut_margin: 50.0,
            ..CompetitiveParams::default()
        });
        let records = vec![
            with_queue(record("A", "04-10-2016", "08:00:00", 90, 100), 8),
            at(record("B", "04-10-2016", "08:00:00", 10, 100), NEAR),
        ];

        let table = model.price_records(&records);

        assert_eq!(row(&table, "A").price, 5.0);
    }
}
