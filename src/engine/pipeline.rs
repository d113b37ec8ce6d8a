//! The full list pipeline
//!
//! normalize -> filter -> sort -> paginate, in that order. Records arrive
//! already fetched by the caller; the pipeline holds no state between calls
//! and performs no I/O besides log lines.

use serde_json::Value;

use crate::observability::{log_event, Event};
use crate::query::{ParsedQuery, QueryResult, RawQuery};

use super::filters::RecordFilter;
use super::paginator::Paginator;
use super::result::PaginatedResult;
use super::sorter::RecordSorter;

/// Runs list queries over in-memory record collections
pub struct ListPipeline;

impl ListPipeline {
    /// Processes one list query.
    ///
    /// `enable_filtering` switches the filter stage; when off, non-reserved
    /// query keys are ignored and the pipeline only sorts and paginates.
    /// The only error is a malformed date-range filter value; zero matches
    /// and out-of-range pages are normal results.
    pub fn run(
        records: Vec<Value>,
        query: &RawQuery,
        enable_filtering: bool,
    ) -> QueryResult<PaginatedResult<Value>> {
        let parsed = match ParsedQuery::parse(query) {
            Ok(parsed) => parsed,
            Err(err) => {
                log_event(
                    Event::QueryRejected,
                    &[("code", err.code()), ("reason", &err.to_string())],
                );
                return Err(err);
            }
        };

        log_event(
            Event::QueryParsed,
            &[
                ("criteria", &parsed.filters.len().to_string()),
                ("filtering", if enable_filtering { "on" } else { "off" }),
            ],
        );

        let scanned = records.len();

        let mut matched = if enable_filtering {
            RecordFilter::apply(records, &parsed.filters)
        } else {
            records
        };

        RecordSorter::sort(&mut matched, &parsed.options.sort_spec());

        let result = Paginator::slice(matched, &parsed.options.page_spec());

        log_event(
            Event::ListComplete,
            &[
                ("matched", &result.total_count.to_string()),
                ("page", &parsed.options.page.to_string()),
                ("returned", &result.len().to_string()),
                ("scanned", &scanned.to_string()),
            ],
        );

        Ok(result)
    }
}

/// Convenience wrapper over [`ListPipeline::run`].
pub fn manage(
    records: Vec<Value>,
    query: &RawQuery,
    enable_filtering: bool,
) -> QueryResult<PaginatedResult<Value>> {
    ListPipeline::run(records, query, enable_filtering)
}
