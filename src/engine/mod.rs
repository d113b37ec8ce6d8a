//! List engine subsystem
//!
//! Consumes normalized queries and record collections, producing one page
//! plus the pre-pagination total.
//!
//! # Pipeline (strict order)
//!
//! 1. Normalize the raw query bag
//! 2. Filter records against the criteria tree (optional stage)
//! 3. Stable-sort by the requested field
//! 4. Slice the requested page, keeping the full filtered count
//!
//! Filtering and sorting are both order-stable, so repeating a query over
//! the same records repaginates identically.

mod filters;
mod paginator;
mod pipeline;
mod result;
mod sorter;

pub use filters::RecordFilter;
pub use paginator::Paginator;
pub use pipeline::{manage, ListPipeline};
pub use result::PaginatedResult;
pub use sorter::RecordSorter;
