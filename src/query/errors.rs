//! Query normalization errors
//!
//! The engine rejects exactly one condition: a date-range filter whose
//! day/month/year tokens cannot be parsed. Empty result sets and
//! out-of-range pages are normal outcomes, not errors.

use thiserror::Error;

/// Severity of a query error; normalization failures always reject the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client input rejected, engine state unaffected
    Reject,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Reject => "REJECT",
        }
    }
}

/// Errors surfaced while normalizing a raw query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Date-range value with unparseable day/month/year tokens
    #[error("invalid filter value `{value}` for `{field}`: {reason}")]
    InvalidFilterSyntax {
        /// Filter key the bad value arrived under
        field: String,
        /// Raw value as received
        value: String,
        /// What failed to parse
        reason: String,
    },
}

impl QueryError {
    pub fn invalid_filter(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QueryError::InvalidFilterSyntax {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidFilterSyntax { .. } => "LISTKIT_FILTER_INVALID",
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

/// Result type for query normalization
pub type QueryResult<T> = Result<T, QueryError>;
