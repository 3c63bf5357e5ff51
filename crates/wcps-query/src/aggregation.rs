//! Condensers that reduce a coverage region to a scalar.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Aggregation function wrapped around the return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMethod {
    Avg,
    Sum,
    Min,
    Max,
    Count,
}

impl AggregationMethod {
    /// WCPS function name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMethod::Avg => "avg",
            AggregationMethod::Sum => "sum",
            AggregationMethod::Min => "min",
            AggregationMethod::Max => "max",
            AggregationMethod::Count => "count",
        }
    }
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMethod {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avg" | "average" => Ok(AggregationMethod::Avg),
            "sum" | "add" => Ok(AggregationMethod::Sum),
            "min" | "minimum" => Ok(AggregationMethod::Min),
            "max" | "maximum" => Ok(AggregationMethod::Max),
            "count" => Ok(AggregationMethod::Count),
            _ => Err(QueryError::InvalidAggregationMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("avg".parse::<AggregationMethod>().unwrap(), AggregationMethod::Avg);
        assert_eq!("average".parse::<AggregationMethod>().unwrap(), AggregationMethod::Avg);
        assert_eq!("add".parse::<AggregationMethod>().unwrap(), AggregationMethod::Sum);
        assert_eq!("MAX".parse::<AggregationMethod>().unwrap(), AggregationMethod::Max);
        assert_eq!("count".parse::<AggregationMethod>().unwrap(), AggregationMethod::Count);
    }

    #[test]
    fn test_invalid_method() {
        assert_eq!(
            "invalid_method".parse::<AggregationMethod>(),
            Err(QueryError::InvalidAggregationMethod("invalid_method".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(AggregationMethod::Sum.to_string(), "sum");
        assert_eq!(AggregationMethod::Min.to_string(), "min");
    }
}
