//! Structured query representation
//!
//! A raw query-parameter bag normalizes into two things: `QueryOptions`
//! (pagination and sorting, taken from the reserved keys) and a `FilterTree`
//! (every other key). The filter tree is a closed set of variants so the
//! matcher can pattern-match exhaustively instead of probing shapes at
//! runtime.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Reserved keys consumed as pagination/sorting controls, never as filters.
pub const RESERVED_KEYS: [&str; 4] = ["page", "limit", "sortBy", "order"];

/// Child key that switches a nested comparison to exact equality.
pub const EXACT_MATCH_KEY: &str = "is";

/// Raw query parameters as decoded from a URL query string.
///
/// Values are always strings at this boundary; numeric coercion for
/// `page`/`limit` happens during normalization.
pub type RawQuery = BTreeMap<String, String>;

/// Normalized filter criteria keyed by top-level field name.
pub type FilterTree = BTreeMap<String, FilterNode>;

/// One normalized filter criterion
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// Free-text target: case-insensitive substring match
    Direct(String),
    /// Any-of target: case-sensitive membership match
    List(Vec<String>),
    /// Inclusive date range, either bound optional
    DateRange {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
    /// Nested criteria reached through a dotted key; all children must match
    Nested(BTreeMap<String, FilterNode>),
}

impl FilterNode {
    /// Free-text criterion
    pub fn direct(value: impl Into<String>) -> Self {
        FilterNode::Direct(value.into())
    }

    /// Any-of criterion
    pub fn list(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        FilterNode::List(values.into_iter().map(Into::into).collect())
    }

    /// Exact-equality criterion, expressed through the `is` escape
    pub fn exact(value: impl Into<String>) -> Self {
        let mut children = BTreeMap::new();
        children.insert(EXACT_MATCH_KEY.to_string(), FilterNode::Direct(value.into()));
        FilterNode::Nested(children)
    }

    /// Returns true if this is a nested container
    pub fn is_nested(&self) -> bool {
        matches!(self, FilterNode::Nested(_))
    }

    /// Returns true if this is a date-range criterion
    pub fn is_date_range(&self) -> bool {
        matches!(self, FilterNode::DateRange { .. })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Parses the `order` query value; anything other than `desc` is ascending.
    pub fn from_query_value(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Top-level field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Page specification (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub page: usize,
    pub limit: usize,
}

impl PageSpec {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Index of the first record on this page.
    ///
    /// Saturates instead of overflowing; any index past the end of the data
    /// just produces an empty page.
    pub fn start_index(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Pagination and sorting controls extracted from the reserved keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// 1-indexed page number
    pub page: usize,
    /// Page size
    pub limit: usize,
    /// Top-level sort field
    pub sort_by: String,
    /// Sort direction
    pub order: SortDirection,
}

impl QueryOptions {
    pub const DEFAULT_PAGE: usize = 1;
    pub const DEFAULT_LIMIT: usize = 10;
    pub const DEFAULT_SORT_BY: &'static str = "createdAt";

    /// The sort stage view of these options
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec {
            field: self.sort_by.clone(),
            direction: self.order,
        }
    }

    /// The pagination stage view of these options
    pub fn page_spec(&self) -> PageSpec {
        PageSpec {
            page: self.page,
            limit: self.limit,
        }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
            sort_by: Self::DEFAULT_SORT_BY.to_string(),
            order: SortDirection::Asc,
        }
    }
}
