//! Result types for list queries

use serde::{Deserialize, Serialize};

/// One page of a filtered collection, plus the pre-pagination total.
///
/// `total_count` is the size of the whole filtered set so clients can
/// compute page counts; `data` is just the requested slice. Serializes with
/// the wire names `totalCount`/`data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    /// Count after filtering, before pagination
    pub total_count: usize,
    /// The page slice
    pub data: Vec<T>,
}

impl<T> PaginatedResult<T> {
    /// Creates a result from a page slice and the pre-slice total
    pub fn new(total_count: usize, data: Vec<T>) -> Self {
        Self { total_count, data }
    }

    /// Creates an empty result
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            data: Vec::new(),
        }
    }

    /// Returns the number of records on this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this page holds no records
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns an iterator over the page
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}
