//! Inline coverage constructors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expression::Expression;
use crate::subset::AxisSubset;

/// Prefix of the iterator variable bound to each domain axis.
pub const ITERATOR_PREFIX: &str = "$p";

/// Synthesizes a new coverage by iterating over a domain.
///
/// Each domain axis gets an iterator variable named `$p<axis>`; the value
/// expression computes every output cell from those variables:
///
/// ```text
/// coverage gradient
/// over $px x(0:200), $py y(0:200)
/// values $px + $py
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageConstructor {
    name: String,
    domain: Vec<AxisSubset>,
    value_expression: String,
}

impl CoverageConstructor {
    pub fn new(
        name: impl Into<String>,
        domain: Vec<AxisSubset>,
        value_expression: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            domain,
            value_expression: value_expression.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &[AxisSubset] {
        &self.domain
    }

    pub fn value_expression(&self) -> &str {
        &self.value_expression
    }

    /// Iterator variable bound to `axis`.
    pub fn iterator_name(axis: &str) -> String {
        format!("{}{}", ITERATOR_PREFIX, axis)
    }

    /// Render the constructor to WCPS text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Use the constructor as a query return value.
    pub fn to_expression(&self) -> Expression {
        Expression::Raw(self.render())
    }
}

impl fmt::Display for CoverageConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self
            .domain
            .iter()
            .map(|subset| format!("{} {}", Self::iterator_name(&subset.axis), subset))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(f, "coverage {}", self.name)?;
        writeln!(f, "over {}", bindings)?;
        write!(f, "values {}", self.value_expression)
    }
}

impl From<CoverageConstructor> for Expression {
    fn from(value: CoverageConstructor) -> Self {
        value.to_expression()
    }
}
