//! Query normalization subsystem
//!
//! Takes the flat string bag decoded from a URL query string and produces a
//! structured query: pagination/sorting options from the reserved keys and a
//! closed filter tree from everything else.
//!
//! # Conventions recognized
//!
//! - `page`, `limit`, `sortBy`, `order` — reserved controls, never filters
//! - `category.name=x` — dotted keys address nested fields
//! - `createdAt=from,01-01-2024,to,15-01-2024` — inclusive date ranges
//! - `status=a,b,c` — any-of value lists
//! - `featured.is=true` — exact-equality escape
//! - anything else — case-insensitive substring target

mod ast;
mod errors;
mod parser;

pub use ast::{
    FilterNode, FilterTree, PageSpec, QueryOptions, RawQuery, SortDirection, SortSpec,
    EXACT_MATCH_KEY, RESERVED_KEYS,
};
pub use errors::{QueryError, QueryResult, Severity};
pub use parser::ParsedQuery;
