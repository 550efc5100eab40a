//! Demand scoring.
//!
//! `demand = alpha*occupancy_rate + beta*queue - gamma*traffic + delta*special_day + epsilon*vehicle`

use crate::pricing::encoders::{encode_traffic, encode_vehicle_type};
use crate::pricing::normalize::NormalizedDemand;
use crate::record::Record;
use serde::Deserialize;

/// Weights of the linear demand score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemandCoefficients {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub delta: f64,
    pub epsilon: f64,
}

impl Default for DemandCoefficients {
    fn default() -> Self {
        Self {
            alpha: 0.6,
            beta: 0.15,
            gamma: 0.2,
            delta: 0.3,
            epsilon: 0.1,
        }
    }
}

impl DemandCoefficients {
    pub fn score(&self, record: &Record) -> f64 {
        self.alpha * record.occupancy_rate() + self.beta * record.queue_length as f64
            - self.gamma * encode_traffic(&record.traffic_condition)
            + self.delta * record.is_special_day as f64
            + self.epsilon * encode_vehicle_type(&record.vehicle_type)
    }
}

/// Un-normalized demand for a whole batch, index-aligned with the records it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDemand(Vec<f64>);

impl RawDemand {
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a Record>,
        coefficients: &DemandCoefficients,
    ) -> Self {
        Self(
            records
                .into_iter()
                .map(|record| coefficients.score(record))
                .collect(),
        )
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rescale against this batch's own extremes.
    pub fn normalize(&self) -> NormalizedDemand {
        NormalizedDemand::from_raw(&self.0)
    }
}

impl From<Vec<f64>> for RawDemand {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}
