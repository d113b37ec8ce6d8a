//! listkit - query-string driven filtering, sorting and pagination for
//! in-memory JSON record collections
//!
//! The caller fetches records (as `serde_json::Value`) and hands them over
//! together with the raw query-parameter bag from the URL; the engine
//! normalizes the parameters, filters, stable-sorts, and returns one page
//! plus the pre-pagination total count.
//!
//! ```
//! use listkit::{manage, RawQuery};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"id": 1, "name": "Apple", "createdAt": "2024-01-01"}),
//!     json!({"id": 2, "name": "Banana", "createdAt": "2024-02-01"}),
//! ];
//! let query: RawQuery = [("name".to_string(), "app".to_string())].into();
//!
//! let page = manage(records, &query, true).unwrap();
//! assert_eq!(page.total_count, 1);
//! assert_eq!(page.data[0]["name"], "Apple");
//! ```

pub mod engine;
pub mod observability;
pub mod query;

pub use engine::{manage, ListPipeline, PaginatedResult};
pub use query::{
    FilterNode, FilterTree, ParsedQuery, QueryError, QueryOptions, QueryResult, RawQuery,
    SortDirection, SortSpec,
};
