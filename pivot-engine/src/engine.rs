//! FILENAME: pivot-engine/src/engine.rs
//! Pivot Engine - The calculation core that reshapes a result set into a
//! dense pivot.
//!
//! Algorithm:
//! 1. Validate the spec and resolve the three field names to column indices
//! 2. Single pass over the rows: x key -> (y key -> accumulator), while
//!    collecting every distinct y key across ALL rows
//! 3. Sort x keys and y keys ascending by their display strings, using the
//!    same case-insensitive collation for both (`compare_keys`)
//! 4. Emit one row per x key with one cell per y key (`None` if no rows)
//!
//! Incomplete or invalid configuration is never an error here: the engine
//! hands the input back untouched and says why, and the caller decides how
//! to show raw data.

use std::cmp::Ordering;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use engine::{CellValue, ResultSet};
use crate::accumulator::AggregateAccumulator;
use crate::definition::{AggregationType, PivotSpec};
use crate::view::{PivotRow, PivotedData};

// ============================================================================
// OUTCOME
// ============================================================================

/// Why the engine declined to pivot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PassthroughReason {
    /// Aggregation is `None`, a field is unset, or two fields coincide.
    IncompleteSpec,
    /// A configured field is not among the result's columns.
    MissingField(String),
    /// The input is an error/message sentinel rather than data.
    SentinelResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PivotOutcome {
    Pivoted(PivotedData),
    /// The raw rows, unchanged.
    Passthrough {
        reason: PassthroughReason,
        result: ResultSet,
    },
}

impl PivotOutcome {
    pub fn pivoted(&self) -> Option<&PivotedData> {
        match self {
            PivotOutcome::Pivoted(data) => Some(data),
            PivotOutcome::Passthrough { .. } => None,
        }
    }

    pub fn is_pivoted(&self) -> bool {
        self.pivoted().is_some()
    }

    /// Rows to render as a table, whichever way the engine went.
    pub fn to_result_set(&self) -> ResultSet {
        match self {
            PivotOutcome::Pivoted(data) => data.to_result_set(),
            PivotOutcome::Passthrough { result, .. } => result.clone(),
        }
    }
}

// ============================================================================
// PIVOT CALCULATOR
// ============================================================================

/// Accumulation state for one distinct x key.
struct XGroup {
    /// First source value seen for this key; kept as the row label.
    label: CellValue,
    cells: FxHashMap<String, AggregateAccumulator>,
}

/// The main calculation engine for pivots.
pub struct PivotCalculator<'a> {
    result: &'a ResultSet,
    x_field: &'a str,
    x_index: usize,
    y_index: usize,
    value_index: usize,
    aggregation: AggregationType,

    groups: FxHashMap<String, XGroup>,
    y_keys: FxHashSet<String>,
}

impl<'a> PivotCalculator<'a> {
    /// Creates a calculator, or explains why this input cannot be pivoted.
    pub fn new(result: &'a ResultSet, spec: &'a PivotSpec) -> Result<Self, PassthroughReason> {
        if result.is_sentinel() {
            return Err(PassthroughReason::SentinelResult);
        }
        if spec.aggregation.is_none() {
            return Err(PassthroughReason::IncompleteSpec);
        }
        let (x_field, y_field, value_field) =
            spec.fields().ok_or(PassthroughReason::IncompleteSpec)?;

        let index_of = |name: &str| {
            result
                .column_index(name)
                .ok_or_else(|| PassthroughReason::MissingField(name.to_string()))
        };

        Ok(PivotCalculator {
            result,
            x_field,
            x_index: index_of(x_field)?,
            y_index: index_of(y_field)?,
            value_index: index_of(value_field)?,
            aggregation: spec.aggregation,
            groups: FxHashMap::default(),
            y_keys: FxHashSet::default(),
        })
    }

    /// Executes the full calculation and returns the dense view.
    pub fn calculate(mut self) -> PivotedData {
        self.accumulate();
        self.generate_view()
    }

    fn accumulate(&mut self) {
        let result = self.result;
        for row in result.rows() {
            let x_value = &row[self.x_index];
            let y_key = row[self.y_index].display_value();
            let cell = &row[self.value_index];

            let group = self
                .groups
                .entry(x_value.display_value())
                .or_insert_with(|| XGroup {
                    label: x_value.clone(),
                    cells: FxHashMap::default(),
                });
            group.cells.entry(y_key.clone()).or_default().add(cell);
            self.y_keys.insert(y_key);
        }
    }

    fn generate_view(self) -> PivotedData {
        let mut y_keys: Vec<String> = self.y_keys.into_iter().collect();
        y_keys.sort_by(|a, b| compare_keys(a, b));

        let mut groups: Vec<(String, XGroup)> = self.groups.into_iter().collect();
        groups.sort_by(|a, b| compare_keys(&a.0, &b.0));

        let aggregation = self.aggregation;
        let rows = groups
            .into_iter()
            .map(|(_, group)| PivotRow {
                cells: y_keys
                    .iter()
                    .map(|y| group.cells.get(y).and_then(|acc| acc.finish(aggregation)))
                    .collect(),
                x_value: group.label,
            })
            .collect();

        let mut columns = Vec::with_capacity(y_keys.len() + 1);
        columns.push(self.x_field.to_string());
        columns.extend(y_keys);

        PivotedData {
            x_field: self.x_field.to_string(),
            columns,
            rows,
        }
    }
}

// ============================================================================
// KEY ORDERING
// ============================================================================

/// Collation order for pivot row and column keys.
///
/// Letters compare case-insensitively ("apple" < "Banana"); keys that differ
/// only in case put the lowercase form first. Digits stay character-wise, so
/// "10" sorts before "9".
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map(|(x, y)| y.is_lowercase().cmp(&x.is_lowercase()).then(x.cmp(&y)))
            .unwrap_or_else(|| a.cmp(b))
    })
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Pivots `result` according to `spec`.
/// This is the main entry point for the calculation engine.
pub fn calculate_pivot(result: &ResultSet, spec: &PivotSpec) -> PivotOutcome {
    match PivotCalculator::new(result, spec) {
        Ok(calculator) => {
            let data = calculator.calculate();
            log::debug!(
                "pivot x={} agg={} -> {} rows x {} columns",
                data.x_field,
                spec.aggregation,
                data.row_count(),
                data.y_columns().len()
            );
            PivotOutcome::Pivoted(data)
        }
        Err(reason) => {
            match &reason {
                PassthroughReason::MissingField(field) => {
                    log::warn!("pivot field '{}' not found in result columns, showing raw rows", field)
                }
                PassthroughReason::SentinelResult => {
                    log::warn!("pivot requested on an error/message result, showing raw rows")
                }
                PassthroughReason::IncompleteSpec => {
                    log::debug!("pivot spec incomplete, showing raw rows")
                }
            }
            PivotOutcome::Passthrough {
                reason,
                result: result.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_set(columns: &[&str], rows: Vec<Vec<CellValue>>) -> ResultSet {
        ResultSet::new(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap()
    }

    fn sales() -> ResultSet {
        result_set(
            &["month", "region", "sales"],
            vec![
                vec!["Jan".into(), "East".into(), 100.0.into()],
                vec!["Jan".into(), "West".into(), 50.0.into()],
                vec!["Feb".into(), "East".into(), 70.0.into()],
            ],
        )
    }

    fn pivot(result: &ResultSet, spec: &PivotSpec) -> PivotedData {
        match calculate_pivot(result, spec) {
            PivotOutcome::Pivoted(data) => data,
            other => panic!("expected a pivot, got {:?}", other),
        }
    }

    #[test]
    fn test_month_region_scenario() {
        let spec = PivotSpec::new("month", "region", "sales", AggregationType::Sum);
        let data = pivot(&sales(), &spec);

        assert_eq!(data.columns, vec!["month", "East", "West"]);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].x_value, CellValue::text("Feb"));
        assert_eq!(data.rows[0].cells, vec![Some(70.0), None]);
        assert_eq!(data.rows[1].x_value, CellValue::text("Jan"));
        assert_eq!(data.rows[1].cells, vec![Some(100.0), Some(50.0)]);
    }

    #[test]
    fn test_sum_example() {
        let rs = result_set(
            &["g", "k", "v"],
            vec![
                vec!["A".into(), "x".into(), 10.0.into()],
                vec!["A".into(), "y".into(), 5.0.into()],
                vec!["B".into(), "x".into(), 3.0.into()],
            ],
        );
        let data = pivot(&rs, &PivotSpec::new("g", "k", "v", AggregationType::Sum));
        assert_eq!(data.columns, vec!["g", "x", "y"]);
        assert_eq!(data.value(0, "x"), Some(10.0));
        assert_eq!(data.value(0, "y"), Some(5.0));
        assert_eq!(data.value(1, "x"), Some(3.0));
        assert_eq!(data.rows[1].cells[1], None);
    }

    #[test]
    fn test_average_in_one_cell() {
        let rs = result_set(
            &["g", "k", "v"],
            vec![
                vec!["A".into(), "x".into(), 1.0.into()],
                vec!["A".into(), "x".into(), 2.0.into()],
                vec!["A".into(), "x".into(), 4.0.into()],
            ],
        );
        let data = pivot(&rs, &PivotSpec::new("g", "k", "v", AggregationType::Average));
        assert_eq!(data.value(0, "x"), Some(2.33));
    }

    #[test]
    fn test_non_numeric_group_is_null_not_zero() {
        let rs = result_set(
            &["g", "k", "v"],
            vec![
                vec!["A".into(), "x".into(), "abc".into()],
                vec!["A".into(), "y".into(), 2.0.into()],
            ],
        );
        let data = pivot(&rs, &PivotSpec::new("g", "k", "v", AggregationType::Sum));
        assert_eq!(data.rows[0].cells, vec![None, Some(2.0)]);

        let counted = pivot(&rs, &PivotSpec::new("g", "k", "v", AggregationType::Count));
        assert_eq!(counted.rows[0].cells, vec![Some(1.0), Some(1.0)]);
    }

    #[test]
    fn test_every_row_has_every_column() {
        let rs = result_set(
            &["g", "k", "v"],
            vec![
                vec!["A".into(), "x".into(), 1.0.into()],
                vec!["B".into(), "y".into(), 2.0.into()],
                vec!["C".into(), "z".into(), 3.0.into()],
            ],
        );
        let data = pivot(&rs, &PivotSpec::new("g", "k", "v", AggregationType::Max));
        assert_eq!(data.y_columns().len(), 3);
        assert!(data.rows.iter().all(|r| r.cells.len() == 3));
        assert_eq!(data.rows[2].cells, vec![None, None, Some(3.0)]);
    }

    #[test]
    fn test_numbers_sort_as_strings() {
        let rs = result_set(
            &["g", "k", "v"],
            vec![
                vec![9.0.into(), 2024.0.into(), 1.0.into()],
                vec![10.0.into(), 2023.0.into(), 1.0.into()],
            ],
        );
        let data = pivot(&rs, &PivotSpec::new("g", "k", "v", AggregationType::Count));
        assert_eq!(data.columns, vec!["g", "2023", "2024"]);
        // "10" < "9" lexically
        assert_eq!(data.rows[0].x_value, CellValue::Number(10.0));
        assert_eq!(data.rows[1].x_value, CellValue::Number(9.0));
    }

    #[test]
    fn test_mixed_case_keys_sort_case_insensitively() {
        let rs = result_set(
            &["g", "k", "v"],
            vec![
                vec!["beta".into(), "apple".into(), 1.0.into()],
                vec!["Alpha".into(), "Banana".into(), 2.0.into()],
            ],
        );
        let data = pivot(&rs, &PivotSpec::new("g", "k", "v", AggregationType::Sum));
        assert_eq!(data.columns, vec!["g", "apple", "Banana"]);
        assert_eq!(data.rows[0].x_value, CellValue::text("Alpha"));
        assert_eq!(data.rows[0].cells, vec![None, Some(2.0)]);
        assert_eq!(data.rows[1].x_value, CellValue::text("beta"));
        assert_eq!(data.rows[1].cells, vec![Some(1.0), None]);
    }

    #[test]
    fn test_compare_keys() {
        assert_eq!(compare_keys("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_keys("a", "A"), Ordering::Less);
        assert_eq!(compare_keys("East", "east"), Ordering::Greater);
        assert_eq!(compare_keys("10", "9"), Ordering::Less);
        assert_eq!(compare_keys("", "a"), Ordering::Less);
        assert_eq!(compare_keys("Jan", "Jan"), Ordering::Equal);

        let mut keys = vec!["b", "B", "a", "A", "ab"];
        keys.sort_by(|x, y| compare_keys(x, y));
        assert_eq!(keys, vec!["a", "A", "ab", "b", "B"]);
    }

    #[test]
    fn test_incomplete_spec_passes_through() {
        let rs = sales();
        let spec = PivotSpec::new("month", "month", "sales", AggregationType::Sum);
        match calculate_pivot(&rs, &spec) {
            PivotOutcome::Passthrough { reason, result } => {
                assert_eq!(reason, PassthroughReason::IncompleteSpec);
                assert_eq!(result, rs);
            }
            other => panic!("unexpected {:?}", other),
        }

        let spec = PivotSpec::new("month", "region", "sales", AggregationType::None);
        assert!(!calculate_pivot(&rs, &spec).is_pivoted());
    }

    #[test]
    fn test_missing_field_passes_through() {
        let spec = PivotSpec::new("month", "country", "sales", AggregationType::Sum);
        let outcome = calculate_pivot(&sales(), &spec);
        assert_eq!(
            outcome,
            PivotOutcome::Passthrough {
                reason: PassthroughReason::MissingField("country".to_string()),
                result: sales(),
            }
        );
    }

    #[test]
    fn test_sentinel_passes_through() {
        let rs = ResultSet::sentinel("Error", "boom");
        let spec = PivotSpec::new("a", "b", "c", AggregationType::Sum);
        match calculate_pivot(&rs, &spec) {
            PivotOutcome::Passthrough { reason, .. } => {
                assert_eq!(reason, PassthroughReason::SentinelResult)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_deterministic() {
        let spec = PivotSpec::new("month", "region", "sales", AggregationType::Average);
        let rs = sales();
        assert_eq!(calculate_pivot(&rs, &spec), calculate_pivot(&rs, &spec));
    }
}
