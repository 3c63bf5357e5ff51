//! Subset coordinates.
//!
//! A coordinate is one bound of an axis subset. Textual coordinates (dates,
//! labels) are quoted when rendered; numeric coordinates are written in
//! their native form; raw coordinates are spliced into the query verbatim.

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// One bound of an axis subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    /// Integer coordinate, rendered unquoted.
    Integer(i64),
    /// Floating point coordinate, rendered unquoted.
    Float(f64),
    /// Text spliced into the query as-is (open bounds, iterator variables).
    Raw { raw: String },
    /// Textual coordinate, rendered inside double quotes without escaping.
    Text(String),
}

impl Coordinate {
    /// Textual coordinate that is checked before it is accepted.
    ///
    /// `Text` trusts the caller; this rejects values containing a double
    /// quote, which would otherwise terminate the quoted literal early.
    pub fn literal(text: impl Into<String>) -> QueryResult<Self> {
        let text = text.into();
        if text.contains('"') {
            return Err(QueryError::InvalidLiteral(text));
        }
        Ok(Coordinate::Text(text))
    }

    /// Raw coordinate, rendered without quotes.
    pub fn raw(text: impl Into<String>) -> Self {
        Coordinate::Raw { raw: text.into() }
    }

    /// Open bound (`*`), e.g. `Lat(*:30)`.
    pub fn unbounded() -> Self {
        Self::raw("*")
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Coordinate::Integer(_) | Coordinate::Float(_))
    }

    /// Render the coordinate to WCPS text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Integer(v) => write!(f, "{}", v),
            // `{:?}` keeps the fractional part of integral values (`64.0`)
            Coordinate::Float(v) => write!(f, "{:?}", v),
            Coordinate::Raw { raw } => f.write_str(raw),
            Coordinate::Text(text) => write!(f, "\"{}\"", text),
        }
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Coordinate::Text(value.to_string())
    }
}

impl From<String> for Coordinate {
    fn from(value: String) -> Self {
        Coordinate::Text(value)
    }
}

impl From<i32> for Coordinate {
    fn from(value: i32) -> Self {
        Coordinate::Integer(value as i64)
    }
}

impl From<i64> for Coordinate {
    fn from(value: i64) -> Self {
        Coordinate::Integer(value)
    }
}

impl From<u32> for Coordinate {
    fn from(value: u32) -> Self {
        Coordinate::Integer(value as i64)
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Float(value)
    }
}

impl From<NaiveDate> for Coordinate {
    fn from(value: NaiveDate) -> Self {
        Coordinate::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl From<DateTime<Utc>> for Coordinate {
    fn from(value: DateTime<Utc>) -> Self {
        Coordinate::Text(value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}
