//! Stable sorting for list queries
//!
//! String fields compare case-insensitively (with a raw comparison breaking
//! case-only ties); everything else falls back to a deterministic cross-type
//! ordering. The sort is stable so repagination of equal-keyed records is
//! idempotent.

use std::cmp::Ordering;

use serde_json::Value;

use crate::query::{SortDirection, SortSpec};

/// Sorts record collections
pub struct RecordSorter;

impl RecordSorter {
    /// Sorts records by the spec's top-level field.
    ///
    /// Stable: ties keep their original relative order.
    pub fn sort(records: &mut [Value], spec: &SortSpec) {
        records.sort_by(|a, b| {
            let ordering = Self::compare_values(a.get(&spec.field), b.get(&spec.field));
            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    /// Compares two field values.
    ///
    /// String pairs: case-insensitive first, raw string as tiebreak.
    /// Mixed/other pairs: absent first, then null < bool < number < string,
    /// natural ordering within a type.
    fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        if let (Some(Value::String(a_s)), Some(Value::String(b_s))) = (a, b) {
            let folded = a_s.to_lowercase().cmp(&b_s.to_lowercase());
            return if folded == Ordering::Equal {
                a_s.cmp(b_s)
            } else {
                folded
            };
        }

        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => {
                let type_order = |v: &Value| -> u8 {
                    match v {
                        Value::Null => 0,
                        Value::Bool(_) => 1,
                        Value::Number(_) => 2,
                        Value::String(_) => 3,
                        Value::Array(_) => 4,
                        Value::Object(_) => 5,
                    }
                };

                let a_type = type_order(a_val);
                let b_type = type_order(b_val);
                if a_type != b_type {
                    return a_type.cmp(&b_type);
                }

                match (a_val, b_val) {
                    (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                    (Value::Number(a_n), Value::Number(b_n)) => {
                        let a_f = a_n.as_f64().unwrap_or(0.0);
                        let b_f = b_n.as_f64().unwrap_or(0.0);
                        a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                    }
                    // Arrays and objects carry no ordering
                    _ => Ordering::Equal,
                }
            }
        }
    }
}
