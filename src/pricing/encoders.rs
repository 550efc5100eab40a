//! Numeric weights for categorical telemetry fields.
//!
//! Lookups are case-insensitive; anything unrecognized gets the documented default.

pub const DEFAULT_TRAFFIC_WEIGHT: f64 = 0.5;
pub const DEFAULT_VEHICLE_WEIGHT: f64 = 1.0;

const TRAFFIC_WEIGHTS: [(&str, f64); 3] = [("low", 0.2), ("average", 0.5), ("high", 0.8)];

const VEHICLE_WEIGHTS: [(&str, f64); 4] = [
    ("car", 1.0),
    ("truck", 1.5),
    ("bike", 0.7),
    ("cycle", 0.3),
];

pub fn encode_traffic(level: &str) -> f64 {
    lookup(&TRAFFIC_WEIGHTS, level).unwrap_or(DEFAULT_TRAFFIC_WEIGHT)
}

pub fn encode_vehicle_type(vehicle_type: &str) -> f64 {
    lookup(&VEHICLE_WEIGHTS, vehicle_type).unwrap_or(DEFAULT_VEHICLE_WEIGHT)
}

fn lookup(table: &[(&str, f64)], key: &str) -> Option<f64> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, weight)| *weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traffic_levels_map_to_weights() {
        assert_eq!(encode_traffic("low"), 0.2);
        assert_eq!(encode_traffic("average"), 0.5);
        assert_eq!(encode_traffic("high"), 0.8);
    }

    #[test]
    fn traffic_matching_ignores_case() {
        assert_eq!(encode_traffic("HIGH"), 0.8);
        assert_eq!(encode_traffic("Low"), 0.2);
    }

    #[test]
    fn unknown_traffic_falls_back_to_average() {
        assert_eq!(encode_traffic("gridlock"), DEFAULT_TRAFFIC_WEIGHT);
        assert_eq!(encode_traffic(""), DEFAULT_TRAFFIC_WEIGHT);
    }

    #[test]
    fn vehicle_types_map_to_weights() {
        assert_eq!(encode_vehicle_type("car"), 1.0);
        assert_eq!(encode_vehicle_type("Truck"), 1.5);
        assert_eq!(encode_vehicle_type("BIKE"), 0.7);
        assert_eq!(encode_vehicle_type("cycle"), 0.3);
        assert_eq!(encode_vehicle_type("bus"), DEFAULT_VEHICLE_WEIGHT);
    }
}
