//! Query parameter normalization
//!
//! Turns the flat, string-typed parameter bag of a URL query string into
//! `QueryOptions` plus a structured `FilterTree`:
//!
//! 1. Reserved keys (`page`, `limit`, `sortBy`, `order`) become options.
//! 2. Dotted keys split on `.` and merge into shared nested containers.
//! 3. Values shaped `from,DD-MM-YYYY,to,DD-MM-YYYY` become date ranges
//!    (either clause may be absent).
//! 4. Remaining comma-separated values become any-of lists, trimmed.
//! 5. Everything else is a free-text target.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use super::ast::{
    FilterNode, FilterTree, QueryOptions, RawQuery, SortDirection, RESERVED_KEYS,
};
use super::errors::{QueryError, QueryResult};

// The upstream service built range bounds on a UTC+3 wall clock, shifting
// both bounds by +1 calendar day and the lower bound by a further -21 hours.
// Net effect in UTC: lower bound = from-day 00:00, upper bound = to-day
// 21:00. Kept bit-for-bit; see DESIGN.md before touching any of these.
const BOUND_DAY_SHIFT: i64 = 1;
const FROM_HOUR_SHIFT: i64 = -21;
const ASSUMED_UTC_OFFSET_HOURS: i64 = 3;

/// Literal token opening a lower-bound clause
const FROM_TOKEN: &str = "from";
/// Literal token opening an upper-bound clause
const TO_TOKEN: &str = "to";

/// A raw query bag normalized into options and filter criteria
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Pagination and sorting controls
    pub options: QueryOptions,
    /// Filter criteria from the non-reserved keys
    pub filters: FilterTree,
}

impl ParsedQuery {
    /// Normalizes a raw query bag.
    ///
    /// Fails only on a malformed date-range value; every other input shape
    /// produces some (possibly empty) filter tree.
    pub fn parse(raw: &RawQuery) -> QueryResult<Self> {
        let options = parse_options(raw);
        let mut filters = FilterTree::new();

        for (key, value) in raw {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }

            if key.contains('.') {
                let segments: Vec<&str> = key.split('.').collect();
                insert_path(&mut filters, &segments, FilterNode::Direct(value.clone()));
            } else if let Some(node) = parse_date_range(key, value)? {
                filters.insert(key.clone(), node);
            } else if value.contains(',') {
                let parts = value.split(',').map(|v| v.trim().to_string()).collect();
                filters.insert(key.clone(), FilterNode::List(parts));
            } else {
                filters.insert(key.clone(), FilterNode::Direct(value.clone()));
            }
        }

        Ok(Self { options, filters })
    }
}

/// Extracts pagination and sorting controls from the reserved keys.
///
/// Absent or non-numeric `page`/`limit` take the defaults; numeric values
/// below 1 clamp to 1.
fn parse_options(raw: &RawQuery) -> QueryOptions {
    QueryOptions {
        page: parse_index(raw.get("page"), QueryOptions::DEFAULT_PAGE),
        limit: parse_index(raw.get("limit"), QueryOptions::DEFAULT_LIMIT),
        sort_by: raw
            .get("sortBy")
            .cloned()
            .unwrap_or_else(|| QueryOptions::DEFAULT_SORT_BY.to_string()),
        order: SortDirection::from_query_value(raw.get("order").map(String::as_str)),
    }
}

fn parse_index(value: Option<&String>, default: usize) -> usize {
    match value.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(n) => n.max(1) as usize,
        None => default,
    }
}

/// Descends/creates nested containers so the final segment holds the leaf.
///
/// Keys sharing a path prefix merge into the same container; a plain value
/// already stored at an intermediate segment is displaced by the container.
fn insert_path(tree: &mut BTreeMap<String, FilterNode>, segments: &[&str], leaf: FilterNode) {
    let (first, rest) = match segments.split_first() {
        Some(split) => split,
        None => return,
    };

    if rest.is_empty() {
        tree.insert((*first).to_string(), leaf);
        return;
    }

    let entry = tree
        .entry((*first).to_string())
        .or_insert_with(|| FilterNode::Nested(BTreeMap::new()));
    if !entry.is_nested() {
        *entry = FilterNode::Nested(BTreeMap::new());
    }
    if let FilterNode::Nested(children) = entry {
        insert_path(children, rest, leaf);
    }
}

/// Recognizes the `from,DD-MM-YYYY,to,DD-MM-YYYY` convention.
///
/// Returns `Ok(None)` when the value does not trigger range parsing at all:
/// no comma, no `from`/`to` prefix, or a prefix that is not the literal
/// token once comma-split (`tokyo,osaka` stays a plain list).
fn parse_date_range(field: &str, value: &str) -> QueryResult<Option<FilterNode>> {
    if !value.contains(',') || !(value.starts_with(FROM_TOKEN) || value.starts_with(TO_TOKEN)) {
        return Ok(None);
    }

    let parts: Vec<&str> = value.split(',').collect();
    let from_idx = parts.iter().position(|p| *p == FROM_TOKEN);
    let to_idx = parts.iter().position(|p| *p == TO_TOKEN);
    if from_idx.is_none() && to_idx.is_none() {
        return Ok(None);
    }

    let from = match from_idx {
        Some(idx) => Some(range_bound(field, value, &parts, idx, true)?),
        None => None,
    };
    let to = match to_idx {
        Some(idx) => Some(range_bound(field, value, &parts, idx, false)?),
        None => None,
    };

    Ok(Some(FilterNode::DateRange { from, to }))
}

/// Builds the bound following a `from`/`to` token.
fn range_bound(
    field: &str,
    value: &str,
    parts: &[&str],
    token_idx: usize,
    lower: bool,
) -> QueryResult<DateTime<Utc>> {
    let token = parts[token_idx];
    let date_part = parts.get(token_idx + 1).ok_or_else(|| {
        QueryError::invalid_filter(field, value, format!("missing date after `{token}`"))
    })?;

    let (day, month, year) = parse_day_month_year(field, value, date_part)?;

    let date = match (day.checked_add(BOUND_DAY_SHIFT), month.checked_sub(1)) {
        (Some(shifted_day), Some(month_index)) => calendar_date(year, month_index, shifted_day),
        _ => None,
    }
    .ok_or_else(|| {
        QueryError::invalid_filter(field, value, format!("date `{date_part}` out of range"))
    })?;

    let mut instant = date.and_time(NaiveTime::MIN);
    if lower {
        instant += Duration::hours(FROM_HOUR_SHIFT);
    }
    instant -= Duration::hours(ASSUMED_UTC_OFFSET_HOURS);

    Ok(Utc.from_utc_datetime(&instant))
}

fn parse_day_month_year(field: &str, value: &str, part: &str) -> QueryResult<(i64, i64, i32)> {
    let segments: Vec<&str> = part.split('-').collect();
    if segments.len() != 3 {
        return Err(QueryError::invalid_filter(
            field,
            value,
            format!("expected DD-MM-YYYY, got `{part}`"),
        ));
    }

    let day = parse_component(field, value, segments[0], "day")?;
    let month = parse_component(field, value, segments[1], "month")?;
    let year = parse_component(field, value, segments[2], "year")?;
    let year = i32::try_from(year).map_err(|_| {
        QueryError::invalid_filter(field, value, format!("year `{}` out of range", segments[2]))
    })?;

    Ok((day, month, year))
}

fn parse_component(field: &str, value: &str, raw: &str, name: &str) -> QueryResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        QueryError::invalid_filter(field, value, format!("non-numeric {name} `{raw}`"))
    })
}

/// Resolves a possibly out-of-range day/month pair the way a JS `Date`
/// constructor does: excess months carry into the year, excess days into
/// the month. `month_index` is zero-based.
fn calendar_date(year: i32, month_index: i64, day: i64) -> Option<NaiveDate> {
    let year = i64::from(year) + month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    let offset = Duration::try_days(day.checked_sub(1)?)?;
    first.checked_add_signed(offset)
}
