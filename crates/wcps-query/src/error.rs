//! Error types for WCPS query construction and rendering.

use thiserror::Error;

/// Result type alias using QueryError.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while building or rendering a query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    // === Rendering Errors ===
    #[error("No coverage specified")]
    MissingCoverage,

    // === Construction Errors ===
    #[error("Invalid encoding type: {0}")]
    InvalidEncodingType(String),

    #[error("Invalid aggregation method: {0}")]
    InvalidAggregationMethod(String),

    #[error("Literal contains a double quote: {0}")]
    InvalidLiteral(String),

    #[error("Unbalanced delimiters in expression: {0}")]
    UnbalancedExpression(String),
}

impl QueryError {
    /// True when the error comes from rendering an incomplete query rather
    /// than from rejecting a value at construction time.
    pub fn is_render_error(&self) -> bool {
        matches!(self, QueryError::MissingCoverage)
    }
}
