use serde::{Deserialize, Serialize};

pub type SpaceId = String;

/// One telemetry observation for a parking space, as read from the dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "SystemCodeNumber")]
    pub space_id: SpaceId,
    #[serde(rename = "Capacity")]
    pub capacity: i64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Occupancy")]
    pub occupancy: u32,
    #[serde(rename = "VehicleType")]
    pub vehicle_type: String,
    #[serde(rename = "TrafficConditionNearby")]
    pub traffic_condition: String,
    #[serde(rename = "QueueLength")]
    pub queue_length: u32,
    #[serde(rename = "IsSpecialDay")]
    pub is_special_day: u8,
    #[serde(rename = "LastUpdatedDate")]
    pub date: String,
    #[serde(rename = "LastUpdatedTime")]
    pub time: String,
}

impl Record {
    /// Occupancy divided by capacity, or 0 when capacity is not positive.
    pub fn occupancy_rate(&self) -> f64 {
        occupancy_rate(self.occupancy, self.capacity)
    }

    pub fn date_time(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}

pub fn occupancy_rate(occupancy: u32, capacity: i64) -> f64 {
    if capacity > 0 {
        occupancy as f64 / capacity as f64
    } else {
        0.0
    }
}

/// Sort key used by the per-space engines: space, then date, then time.
pub fn sort_by_space_and_time(records: &[Record]) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| {
        a.space_id
            .cmp(&b.space_id)
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.time.cmp(&b.time))
    });
    sorted
}

/// Chronological sort across all spaces.
pub fn sort_by_time(records: &[Record]) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
    sorted
}

/// Columns every priced row exposes to downstream consumers.
pub trait PricedRow: Serialize {
    fn space_id(&self) -> &str;
    fn occupancy_rate(&self) -> f64;
    fn price(&self) -> f64;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequentialRow {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "SystemCodeNumber")]
    pub space_id: SpaceId,
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "Occupancy")]
    pub occupancy: u32,
    #[serde(rename = "Capacity")]
    pub capacity: i64,
    #[serde(rename = "OccupancyRate")]
    pub occupancy_rate: f64,
    #[serde(rename = "PreviousPrice")]
    pub previous_price: f64,
    #[serde(rename = "NewPrice")]
    pub new_price: f64,
    #[serde(rename = "PriceChange")]
    pub price_change: f64,
    #[serde(rename = "VehicleType")]
    pub vehicle_type: String,
    #[serde(rename = "TrafficCondition")]
    pub traffic_condition: String,
    #[serde(rename = "QueueLength")]
    pub queue_length: u32,
}

impl PricedRow for SequentialRow {
    fn space_id(&self) -> &str {
        &self.space_id
    }

    fn occupancy_rate(&self) -> f64 {
        self.occupancy_rate
    }

    fn price(&self) -> f64 {
        self.new_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandRow {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "SystemCodeNumber")]
    pub space_id: SpaceId,
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "OccupancyRate")]
    pub occupancy_rate: f64,
    #[serde(rename = "QueueLength")]
    pub queue_length: u32,
    #[serde(rename = "TrafficCondition")]
    pub traffic_condition: String,
    #[serde(rename = "IsSpecialDay")]
    pub is_special_day: u8,
    #[serde(rename = "VehicleType")]
    pub vehicle_type: String,
    #[serde(rename = "RawDemand")]
    pub raw_demand: f64,
    #[serde(rename = "NormalizedDemand")]
    pub normalized_demand: f64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "PriceMultiplier")]
    pub price_multiplier: f64,
    #[serde(rename = "Model1_Price")]
    pub baseline_price: f64,
    #[serde(rename = "Price_Difference")]
    pub price_difference: f64,
}

impl PricedRow for DemandRow {
    fn space_id(&self) -> &str {
        &self.space_id
    }

    fn occupancy_rate(&self) -> f64 {
        self.occupancy_rate
    }

    fn price(&self) -> f64 {
        self.price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitiveRow {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "SystemCodeNumber")]
    pub space_id: SpaceId,
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "OccupancyRate")]
    pub occupancy_rate: f64,
    #[serde(rename = "QueueLength")]
    pub queue_length: u32,
    #[serde(rename = "RawDemand")]
    pub raw_demand: f64,
    #[serde(rename = "NormalizedDemand")]
    pub normalized_demand: f64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "NearbyCompetitorCount")]
    pub nearby_competitor_count: usize,
}

impl PricedRow for CompetitiveRow {
    fn space_id(&self) -> &str {
        &self.space_id
    }

    fn occupancy_rate(&self) -> f64 {
        self.occupancy_rate
    }

    fn price(&self) -> f64 {
        self.price
    }
}
