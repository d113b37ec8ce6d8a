//! Page slicing for list queries

use serde_json::Value;

use super::result::PaginatedResult;
use crate::query::PageSpec;

/// Slices sorted collections into pages
pub struct Paginator;

impl Paginator {
    /// Takes the requested page out of the full filtered collection.
    ///
    /// `total_count` is captured before slicing. A page past the end of the
    /// data yields empty `data` with the real total, never an error.
    pub fn slice(records: Vec<Value>, spec: &PageSpec) -> PaginatedResult<Value> {
        let total_count = records.len();
        let data = records
            .into_iter()
            .skip(spec.start_index())
            .take(spec.limit)
            .collect();

        PaginatedResult::new(total_count, data)
    }
}
