//! FILENAME: pivot-engine/src/accumulator.rs
//! Aggregate Accumulator - incremental per-cell aggregation state.
//!
//! One accumulator exists per (x, y) pair that received at least one source
//! row. Values that do not parse as numbers are counted by COUNT and skipped
//! by every numeric aggregation: they are never treated as zero. A numeric
//! aggregate that never saw a valid number finishes as `None`.

use serde::{Deserialize, Serialize};
use engine::CellValue;
use crate::definition::AggregationType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateAccumulator {
    /// Every contributing row, numeric or not.
    pub count: u64,
    /// Rows whose value parsed as a number.
    pub count_numbers: u64,
    pub sum: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AggregateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one source cell.
    pub fn add(&mut self, value: &CellValue) {
        match value.parse_float() {
            Some(n) => self.add_number(n),
            None => self.add_non_number(),
        }
    }

    pub fn add_number(&mut self, value: f64) {
        self.count += 1;
        self.count_numbers += 1;
        self.sum = Some(self.sum.unwrap_or(0.0) + value);
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn add_non_number(&mut self) {
        self.count += 1;
    }

    /// Computes the final cell value.
    pub fn finish(&self, aggregation: AggregationType) -> Option<f64> {
        match aggregation {
            AggregationType::Count => Some(self.count as f64),
            AggregationType::Sum => self.sum,
            AggregationType::Min => self.min,
            AggregationType::Max => self.max,
            AggregationType::Average => {
                if self.count_numbers == 0 {
                    return None;
                }
                self.sum
                    .map(|sum| round_to_cents(sum / self.count_numbers as f64))
            }
            AggregationType::None => None,
        }
    }
}

/// Rounds to 2 decimal places, halves towards +infinity.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc_of(values: &[CellValue]) -> AggregateAccumulator {
        let mut acc = AggregateAccumulator::new();
        for v in values {
            acc.add(v);
        }
        acc
    }

    #[test]
    fn test_average_rounds_to_two_places() {
        let acc = acc_of(&[1.0.into(), 2.0.into(), 4.0.into()]);
        assert_eq!(acc.finish(AggregationType::Average), Some(2.33));
    }

    #[test]
    fn test_non_numeric_is_skipped_not_zero() {
        let acc = acc_of(&[CellValue::text("abc"), 5.0.into(), CellValue::Empty]);
        assert_eq!(acc.finish(AggregationType::Sum), Some(5.0));
        assert_eq!(acc.finish(AggregationType::Min), Some(5.0));
        assert_eq!(acc.finish(AggregationType::Average), Some(5.0));
        assert_eq!(acc.finish(AggregationType::Count), Some(3.0));
    }

    #[test]
    fn test_all_non_numeric_stays_unset() {
        let acc = acc_of(&[CellValue::text("abc"), CellValue::Boolean(true)]);
        assert_eq!(acc.finish(AggregationType::Sum), None);
        assert_eq!(acc.finish(AggregationType::Min), None);
        assert_eq!(acc.finish(AggregationType::Max), None);
        assert_eq!(acc.finish(AggregationType::Average), None);
        assert_eq!(acc.finish(AggregationType::Count), Some(2.0));
    }

    #[test]
    fn test_min_max_with_negatives_and_text_numbers() {
        let acc = acc_of(&[CellValue::text("-4.5"), 3.0.into(), CellValue::text("10 units")]);
        assert_eq!(acc.finish(AggregationType::Min), Some(-4.5));
        assert_eq!(acc.finish(AggregationType::Max), Some(10.0));
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(7.0 / 3.0), 2.33);
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.12);
        assert_eq!(round_to_cents(10.0 / 4.0), 2.5);
    }
}
