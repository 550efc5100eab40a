//! Ordered pricing results as handed to persistence and charting consumers.

use crate::record::{CompetitiveRow, DemandRow, PricedRow, SequentialRow};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;

/// One point of a per-space chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub time_index: usize,
    pub price: f64,
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub records: usize,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

/// Rows are immutable once the table is built; order is the producing model's output order.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable<R> {
    rows: Vec<R>,
}

impl<R: PricedRow> PricingTable<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `limit` distinct spaces, in order of first appearance.
    pub fn first_distinct_spaces(&self, limit: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut spaces = Vec::new();
        for row in &self.rows {
            if spaces.len() >= limit {
                break;
            }
            if seen.insert(row.space_id()) {
                spaces.push(row.space_id().to_string());
            }
        }
        spaces
    }

    pub fn space_series(&self, space_id: &str) -> Vec<ChartPoint> {
        self.rows
            .iter()
            .filter(|row| row.space_id() == space_id)
            .enumerate()
            .map(|(time_index, row)| ChartPoint {
                time_index,
                price: row.price(),
                occupancy_rate: row.occupancy_rate(),
            })
            .collect()
    }

    pub fn stats(&self) -> Option<PriceStats> {
        let first = self.rows.first()?.price();
        let (total, min, max) = self.rows.iter().map(PricedRow::price).fold(
            (0.0, first, first),
            |(total, min, max), price| (total + price, min.min(price), max.max(price)),
        );
        Some(PriceStats {
            records: self.rows.len(),
            average_price: total / self.rows.len() as f64,
            min_price: min,
            max_price: max,
        })
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Result of one model run.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingOutput {
    Sequential(PricingTable<SequentialRow>),
    Demand(PricingTable<DemandRow>),
    Competitive(PricingTable<CompetitiveRow>),
}

macro_rules! each_table {
    ($output:expr, $table:ident => $body:expr) => {
        match $output {
            PricingOutput::Sequential($table) => $body,
            PricingOutput::Demand($table) => $body,
            PricingOutput::Competitive($table) => $body,
        }
    };
}

impl PricingOutput {
    pub fn len(&self) -> usize {
        each_table!(self, table => table.len())
    }

    pub fn is_empty(&self) -> bool {
        each_table!(self, table => table.is_empty())
    }

    pub fn first_distinct_spaces(&self, limit: usize) -> Vec<String> {
        each_table!(self, table => table.first_distinct_spaces(limit))
    }

    pub fn space_series(&self, space_id: &str) -> Vec<ChartPoint> {
        each_table!(self, table => table.space_series(space_id))
    }

    pub fn stats(&self) -> Option<PriceStats> {
        each_table!(self, table => table.stats())
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        each_table!(self, table => table.write_csv(writer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(space_id: &str, price: f64, occupancy_rate: f64) -> SequentialRow {
        SequentialRow {
            id: 1,
            space_id: space_id.to_string(),
            date_time: "04-10-2016 07:59:00".to_string(),
            occupancy: 61,
            capacity: 577,
            occupancy_rate,
            previous_price: 10.0,
            new_price: price,
            price_change: price - 10.0,
            vehicle_type: "car".to_string(),
            traffic_condition: "low".to_string(),
            queue_length: 1,
        }
    }

    fn table() -> PricingTable<SequentialRow> {
        PricingTable::new(vec![
            row("BHMBCCMKT01", 11.0, 0.2),
            row("BHMBCCMKT01", 12.0, 0.2),
            row("BHMNCPHST01", 10.0, 0.0),
            row("BHMMBMMBX01", 16.0, 0.8),
        ])
    }

    #[test]
    fn first_distinct_spaces_keeps_order_and_limit() {
        let table = table();

        assert_eq!(
            table.first_distinct_spaces(2),
            vec!["BHMBCCMKT01".to_string(), "BHMNCPHST01".to_string()]
        );
        assert_eq!(table.first_distinct_spaces(10).len(), 3);
        assert!(table.first_distinct_spaces(0).is_empty());
    }

    #[test]
    fn space_series_is_indexed_per_space() {
        let series = table().space_series("BHMBCCMKT01");

        assert_eq!(
            series,
            vec![
                ChartPoint { time_index: 0, price: 11.0, occupancy_rate: 0.2 },
                ChartPoint { time_index: 1, price: 12.0, occupancy_rate: 0.2 },
            ]
        );
    }

    #[test]
    fn stats_summarize_prices() {
        let stats = table().stats().expect("non-empty table");

        assert_eq!(stats.records, 4);
        assert_eq!(stats.average_price, 12.25);
        assert_eq!(stats.min_price, 10.0);
        assert_eq!(stats.max_price, 16.0);
    }

    #[test]
    fn empty_table_has_no_stats() {
        let table: PricingTable<SequentialRow> = PricingTable::new(Vec::new());

        assert!(table.stats().is_none());
    }

    #[test]
    fn csv_uses_dataset_column_names() -> Result<(), Box<dyn std::error::Error>> {
        let output = PricingOutput::Sequential(table());
        let mut buffer = Vec::new();

        output.write_csv(&mut buffer)?;
        let text = String::from_utf8(buffer)?;
        let header = text.lines().next().unwrap_or_default();

        assert_eq!(
            header,
            "ID,SystemCodeNumber,DateTime,Occupancy,Capacity,OccupancyRate,PreviousPrice,\
             NewPrice,PriceChange,VehicleType,TrafficCondition,QueueLength"
        );
        assert_eq!(text.lines().count(), 5);
        Ok(())
    }
}
