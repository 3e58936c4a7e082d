//! FILENAME: pivot-engine/src/resolver.rs
//! Default field resolution.
//!
//! Picks a usable (x, y, value, aggregation) spec without user input so a
//! pivot can render as soon as a result arrives. The priority order is a
//! fixed policy; the UI depends on its tie-breaks:
//!
//! 1. descriptor x-axis field -> x
//! 2. first descriptor body field not already used as x -> value
//! 3. descriptor y-axis field, if not used as x or value -> y
//! 4. remaining slots from the result columns in column order, skipping
//!    claimed names: x first, then y, then value
//! 5. SUM when all three are set, otherwise NONE
//!
//! Every candidate must be one of `columns`. Resolution never fails.

use smallvec::SmallVec;
use engine::ChartDescriptor;
use crate::definition::{AggregationType, PivotSpec};

/// Guesses a pivot spec from the result's columns and an optional chart
/// descriptor.
pub fn resolve_default_spec(columns: &[String], descriptor: Option<&ChartDescriptor>) -> PivotSpec {
    let is_column = |name: &str| columns.iter().any(|c| c == name);

    let mut x: Option<&str> = None;
    let mut y: Option<&str> = None;
    let mut value: Option<&str> = None;

    if let Some(descriptor) = descriptor {
        x = descriptor.x_field().filter(|f| is_column(*f));

        value = descriptor
            .body_fields
            .iter()
            .map(String::as_str)
            .find(|f| is_column(*f) && Some(*f) != x);

        y = descriptor
            .y_field()
            .filter(|f| is_column(*f) && Some(*f) != x && Some(*f) != value);
    }

    if x.is_none() {
        x = first_unclaimed(columns, &claimed(&[y, value]));
    }
    if y.is_none() {
        y = first_unclaimed(columns, &claimed(&[x, value]));
    }
    if value.is_none() {
        value = first_unclaimed(columns, &claimed(&[x, y]));
    }

    let aggregation = if x.is_some() && y.is_some() && value.is_some() {
        AggregationType::Sum
    } else {
        AggregationType::None
    };

    PivotSpec {
        x_axis_field: x.map(str::to_string),
        y_axis_field: y.map(str::to_string),
        value_field: value.map(str::to_string),
        aggregation,
    }
}

fn claimed<'a>(slots: &[Option<&'a str>]) -> SmallVec<[&'a str; 3]> {
    slots.iter().flatten().copied().collect()
}

fn first_unclaimed<'a>(columns: &'a [String], claimed: &[&str]) -> Option<&'a str> {
    columns
        .iter()
        .map(String::as_str)
        .find(|c| !claimed.contains(c))
}
