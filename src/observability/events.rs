//! Observable engine events
//!
//! The engine is a single synchronous transformation, so its lifecycle is
//! short: a query is parsed, then either rejected or completed.

use std::fmt;

use super::logger::Severity;

/// Observable events in the list engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Raw query normalized into options and filters
    QueryParsed,
    /// Raw query rejected during normalization
    QueryRejected,
    /// Filter/sort/paginate pipeline finished
    ListComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::QueryParsed => "QUERY_PARSED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::ListComplete => "LIST_COMPLETE",
        }
    }

    /// Default severity when this event is logged
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryRejected => Severity::Warn,
            _ => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::QueryParsed.as_str(), "QUERY_PARSED");
        assert_eq!(Event::QueryRejected.as_str(), "QUERY_REJECTED");
        assert_eq!(Event::ListComplete.as_str(), "LIST_COMPLETE");
    }

    #[test]
    fn test_rejection_is_warn() {
        assert_eq!(Event::QueryRejected.severity(), Severity::Warn);
        assert_eq!(Event::ListComplete.severity(), Severity::Trace);
    }
}
