//! Return-value and branch expressions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// Name of the iteration variable bound by the `for` clause.
pub const ITERATOR: &str = "$c";

/// An expression spliced into the return clause or a switch branch.
///
/// Expressions are opaque WCPS text. `Raw` values are trusted; use
/// [`Expression::checked`] to have the delimiters verified first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    Integer(i64),
    Float(f64),
    Raw(String),
}

impl Expression {
    /// The iteration variable `$c`.
    pub fn iterator() -> Self {
        Expression::Raw(ITERATOR.to_string())
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Expression::Raw(text.into())
    }

    /// Accept `text` only if its quotes and brackets are balanced.
    pub fn checked(text: impl Into<String>) -> QueryResult<Self> {
        let text = text.into();
        if !delimiters_balanced(&text) {
            return Err(QueryError::UnbalancedExpression(text));
        }
        Ok(Expression::Raw(text))
    }

    /// True when the expression is exactly the iteration variable.
    pub fn is_iterator(&self) -> bool {
        matches!(self, Expression::Raw(text) if text.trim() == ITERATOR)
    }

    /// Render the expression to WCPS text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Expression {
    fn default() -> Self {
        Self::iterator()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer(v) => write!(f, "{}", v),
            Expression::Float(v) => write!(f, "{:?}", v),
            Expression::Raw(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Expression::Raw(value.to_string())
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Self {
        Expression::Raw(value)
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Self {
        Expression::Integer(value as i64)
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::Integer(value)
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Float(value)
    }
}

/// Brackets must nest properly outside of string literals and every
/// opened string literal must be closed.
fn delimiters_balanced(text: &str) -> bool {
    let mut stack = Vec::new();
    let mut in_string = false;

    for ch in text.chars() {
        if ch == '"' {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        match ch {
            '(' | '[' | '{' => stack.push(ch),
            ')' | ']' | '}' => {
                let expected = match ch {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return false;
                }
            }
            _ => {}
        }
    }

    !in_string && stack.is_empty()
}
