//! Record matching for list queries
//!
//! Evaluates a normalized filter tree against JSON records. All criteria
//! combine with AND semantics; a missing or null field never matches.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::query::{FilterNode, FilterTree, EXACT_MATCH_KEY};

/// Evaluates filter trees against records
pub struct RecordFilter;

impl RecordFilter {
    /// Checks if a record satisfies every criterion in the tree.
    ///
    /// Tree keys are single top-level field names; deeper fields are reached
    /// through `Nested` nodes, never through dotted keys.
    pub fn matches(record: &Value, filters: &FilterTree) -> bool {
        filters
            .iter()
            .all(|(key, node)| Self::matches_node(record.get(key), node))
    }

    /// Retains only matching records, preserving relative order.
    pub fn apply(records: Vec<Value>, filters: &FilterTree) -> Vec<Value> {
        records
            .into_iter()
            .filter(|record| Self::matches(record, filters))
            .collect()
    }

    /// Evaluates one criterion against one resolved record value.
    fn matches_node(value: Option<&Value>, node: &FilterNode) -> bool {
        let value = match value {
            Some(v) if !v.is_null() => v,
            _ => return false,
        };

        // An array matches when any element independently does. This takes
        // precedence over the node-kind rules so that child-row collections
        // (translations, tags) get "exists" semantics.
        if let Value::Array(items) = value {
            return items.iter().any(|item| Self::matches_node(Some(item), node));
        }

        match node {
            FilterNode::Nested(children) => children.iter().all(|(key, child)| {
                if key == EXACT_MATCH_KEY {
                    match child {
                        FilterNode::Direct(expected) => {
                            value_text(value).as_deref() == Some(expected.as_str())
                        }
                        _ => false,
                    }
                } else {
                    Self::matches_node(value.get(key), child)
                }
            }),
            FilterNode::DateRange { from, to } => match coerce_date(value) {
                Some(instant) => {
                    let after_from = match from {
                        Some(f) => instant >= *f,
                        None => true,
                    };
                    let before_to = match to {
                        Some(t) => instant <= *t,
                        None => true,
                    };
                    after_from && before_to
                }
                None => false,
            },
            FilterNode::List(entries) => match value_text(value) {
                Some(text) => entries.iter().any(|entry| *entry == text),
                None => false,
            },
            FilterNode::Direct(target) => match value_text(value) {
                Some(text) => text.to_lowercase().contains(&target.to_lowercase()),
                None => false,
            },
        }
    }
}

/// Textual form of a scalar value, matching JS `toString()` for the types
/// the engine compares. Objects and null have no textual form.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerces a record value to an instant.
///
/// Accepts RFC 3339 strings, naive `YYYY-MM-DDTHH:MM:SS` strings (read as
/// UTC), plain `YYYY-MM-DD` dates (midnight UTC) and integer epoch
/// milliseconds.
fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                return Some(parsed.with_timezone(&Utc));
            }
            if let Ok(parsed) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(Utc.from_utc_datetime(&parsed));
            }
            if let Ok(parsed) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Some(Utc.from_utc_datetime(&parsed.and_time(chrono::NaiveTime::MIN)));
            }
            None
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ParsedQuery, RawQuery};
    use serde_json::json;

    fn filters(pairs: &[(&str, &str)]) -> FilterTree {
        let raw: RawQuery = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ParsedQuery::parse(&raw).unwrap().filters
    }

    #[test]
    fn test_substring_match_case_insensitive() {
        let doc = json!({"name": "Apple"});
        assert!(RecordFilter::matches(&doc, &filters(&[("name", "app")])));
        assert!(RecordFilter::matches(&doc, &filters(&[("name", "APPLE")])));
        assert!(!RecordFilter::matches(&doc, &filters(&[("name", "banana")])));
    }

    #[test]
    fn test_number_and_bool_match_as_text() {
        let doc = json!({"views": 1024, "featured": true});
        assert!(RecordFilter::matches(&doc, &filters(&[("views", "102")])));
        assert!(RecordFilter::matches(&doc, &filters(&[("featured", "true")])));
    }

    #[test]
    fn test_all_criteria_must_match() {
        let doc = json!({"name": "Apple", "author": "jane"});
        assert!(RecordFilter::matches(
            &doc,
            &filters(&[("name", "app"), ("author", "jane")])
        ));
        assert!(!RecordFilter::matches(
            &doc,
            &filters(&[("name", "app"), ("author", "bob")])
        ));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let doc = json!({"name": "Apple"});
        assert!(!RecordFilter::matches(&doc, &filters(&[("author", "jane")])));
        assert!(!RecordFilter::matches(&doc, &filters(&[("category.name", "news")])));
    }

    #[test]
    fn test_null_field_never_matches() {
        let doc = json!({"name": null});
        assert!(!RecordFilter::matches(&doc, &filters(&[("name", "app")])));
    }

    #[test]
    fn test_nested_path_match() {
        let doc = json!({"category": {"name": "Technology"}});
        assert!(RecordFilter::matches(&doc, &filters(&[("category.name", "tech")])));
        assert!(!RecordFilter::matches(&doc, &filters(&[("category.name", "sports")])));
    }

    #[test]
    fn test_array_any_match() {
        let doc = json!({
            "translations": [
                {"language": "en", "title": "Hello"},
                {"language": "tr", "title": "Merhaba"}
            ]
        });
        assert!(RecordFilter::matches(
            &doc,
            &filters(&[("translations.language", "tr")])
        ));
        assert!(!RecordFilter::matches(
            &doc,
            &filters(&[("translations.language", "de")])
        ));
    }

    #[test]
    fn test_exact_escape_bypasses_substring() {
        let doc = json!({"language": "en-US"});
        // Substring semantics would accept the prefix; the escape must not.
        assert!(RecordFilter::matches(&doc, &filters(&[("language", "en")])));
        assert!(!RecordFilter::matches(&doc, &filters(&[("language.is", "en")])));
        assert!(RecordFilter::matches(&doc, &filters(&[("language.is", "en-US")])));
    }

    #[test]
    fn test_exact_escape_stringifies_both_sides() {
        let doc = json!({"featured": true, "id": 7});
        assert!(RecordFilter::matches(&doc, &filters(&[("featured.is", "true")])));
        assert!(RecordFilter::matches(&doc, &filters(&[("id.is", "7")])));
        assert!(!RecordFilter::matches(&doc, &filters(&[("id.is", "70")])));
    }

    #[test]
    fn test_value_list_is_case_sensitive() {
        let doc = json!({"status": "published"});
        assert!(RecordFilter::matches(
            &doc,
            &filters(&[("status", "draft,published")])
        ));
        assert!(!RecordFilter::matches(
            &doc,
            &filters(&[("status", "Draft,Published")])
        ));
    }

    #[test]
    fn test_date_range_inclusive_bounds() {
        let tree = filters(&[("createdAt", "from,01-01-2024,to,15-01-2024")]);

        // Exactly on the lower bound (from-day midnight UTC)
        assert!(RecordFilter::matches(&json!({"createdAt": "2024-01-01"}), &tree));
        // Exactly on the upper bound (to-day 21:00 UTC)
        assert!(RecordFilter::matches(
            &json!({"createdAt": "2024-01-15T21:00:00Z"}),
            &tree
        ));
        // Just past the upper bound
        assert!(!RecordFilter::matches(
            &json!({"createdAt": "2024-01-15T21:00:01Z"}),
            &tree
        ));
        assert!(!RecordFilter::matches(&json!({"createdAt": "2024-02-01"}), &tree));
    }

    #[test]
    fn test_date_range_unparseable_value_no_match() {
        let tree = filters(&[("createdAt", "from,01-01-2024")]);
        assert!(!RecordFilter::matches(&json!({"createdAt": "not a date"}), &tree));
        assert!(!RecordFilter::matches(&json!({"createdAt": true}), &tree));
    }

    #[test]
    fn test_apply_preserves_order() {
        let records = vec![
            json!({"id": 1, "name": "Apple"}),
            json!({"id": 2, "name": "Banana"}),
            json!({"id": 3, "name": "apple pie"}),
        ];
        let kept = RecordFilter::apply(records, &filters(&[("name", "apple")]));
        let ids: Vec<i64> = kept.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_empty_tree_matches_everything() {
        let doc = json!({"name": "anything"});
        assert!(RecordFilter::matches(&doc, &FilterTree::new()));
    }
}
