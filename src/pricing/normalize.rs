//! Min-max rescaling of a demand batch to `[-1, 1]`.

/// Demand rescaled against the extremes of the batch it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDemand(Vec<f64>);

impl NormalizedDemand {
    /// A batch whose values are all equal maps to zeros. An empty batch stays empty.
    pub fn from_raw(values: &[f64]) -> Self {
        Self(normalize(values))
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn normalize(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = extremes(values) else {
        return Vec::new();
    };
    if max == min {
        return vec![0.0; values.len()];
    }
    let range = max - min;
    values
        .iter()
        .map(|value| 2.0 * (value - min) / range - 1.0)
        .collect()
}

fn extremes(values: &[f64]) -> Option<(f64, f64)> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold((*first, *first), |(min, max), value| {
        (min.min(*value), max.max(*value))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_map_to_unit_bounds() {
        let normalized = normalize(&[0.2, 0.8]);

        assert_eq!(normalized, vec![-1.0, 1.0]);
    }

    #[test]
    fn interior_values_stay_within_bounds() {
        let values = [3.1, -0.4, 1.7, 0.0, 2.25, -0.4];

        let normalized = normalize(&values);

        assert_eq!(normalized.len(), values.len());
        assert!(normalized.iter().all(|v| (-1.0..=1.0).contains(v)));
        assert_eq!(normalized[0], 1.0);
        assert_eq!(normalized[1], -1.0);
        assert_eq!(normalized[5], -1.0);
    }

    #[test]
    fn degenerate_batch_is_all_zero() {
        assert_eq!(normalize(&[0.7, 0.7, 0.7]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn single_value_batch_is_zero() {
        assert_eq!(NormalizedDemand::from_raw(&[42.0]).values(), &[0.0]);
    }

    #[test]
    fn empty_batch_stays_empty() {
        assert!(NormalizedDemand::from_raw(&[]).is_empty());
    }
}
