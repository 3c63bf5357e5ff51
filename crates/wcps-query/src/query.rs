//! The query aggregate and its serialization to WCPS.
//!
//! A [`Query`] is rendered on demand from its current state:
//!
//! ```text
//! for $c in ( AvgLandTemp )
//! let $subset := [ansi("2014-07"), Lat(-20:30), Long(10:30)]
//! return encode ( $c [ $subset ] , "image/png" )
//! ```
//!
//! Exactly one [`ReturnMode`] governs the return clause. Setting a mode
//! replaces the active one; resetting a mode falls back to [`ReturnMode::Plain`].

use serde::{Deserialize, Serialize};

use crate::aggregation::AggregationMethod;
use crate::encoding::EncodingType;
use crate::error::{QueryError, QueryResult};
use crate::expression::{Expression, ITERATOR};
use crate::subset::AxisSubset;
use crate::switch::{SwitchBlock, SwitchCase};

/// Variable the subset list is bound to by the `let` clause.
pub const SUBSET_VARIABLE: &str = "$subset";

/// How the return clause is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReturnMode {
    /// `return ( <value> )`
    #[default]
    Plain,
    /// `return <method> ( <value> )`
    Aggregate { method: AggregationMethod },
    /// `return encode ( <value> , "<media-type>" )`
    Encode { format: EncodingType },
    /// `return ( switch ... )`; the query's return value is ignored.
    Switch(SwitchBlock),
}

/// A declarative WCPS query over one or more coverages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    coverages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subset: Vec<AxisSubset>,
    #[serde(default)]
    return_value: Expression,
    #[serde(default)]
    mode: ReturnMode,
}

impl Query {
    /// Create a plain query returning `$c` for the given coverages.
    pub fn new<I, S>(coverages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            coverages: coverages.into_iter().map(Into::into).collect(),
            subset: Vec::new(),
            return_value: Expression::iterator(),
            mode: ReturnMode::Plain,
        }
    }

    // === Coverages ===

    pub fn coverages(&self) -> &[String] {
        &self.coverages
    }

    pub fn set_coverages<I, S>(&mut self, coverages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coverages = coverages.into_iter().map(Into::into).collect();
    }

    // === Subset ===

    pub fn subset(&self) -> &[AxisSubset] {
        &self.subset
    }

    /// Replace the subset applied to the return value.
    pub fn set_subset(&mut self, subset: Vec<AxisSubset>) {
        self.subset = subset;
    }

    pub fn clear_subset(&mut self) {
        self.subset.clear();
    }

    pub fn with_subset(mut self, subset: Vec<AxisSubset>) -> Self {
        self.set_subset(subset);
        self
    }

    // === Return value ===

    pub fn return_value(&self) -> &Expression {
        &self.return_value
    }

    /// Set the returned expression. Ignored while a switch is active.
    pub fn set_return_value(&mut self, value: impl Into<Expression>) {
        self.return_value = value.into();
    }

    pub fn with_return_value(mut self, value: impl Into<Expression>) -> Self {
        self.set_return_value(value);
        self
    }

    // === Return mode ===

    pub fn mode(&self) -> &ReturnMode {
        &self.mode
    }

    /// Encode the result to the given media type.
    pub fn encode(&mut self, format: EncodingType) {
        self.mode = ReturnMode::Encode { format };
    }

    pub fn with_encoding(mut self, format: EncodingType) -> Self {
        self.encode(format);
        self
    }

    /// Drop the encoding if it is the active mode.
    pub fn reset_encoding(&mut self) {
        if matches!(self.mode, ReturnMode::Encode { .. }) {
            self.mode = ReturnMode::Plain;
        }
    }

    pub fn encoding(&self) -> Option<EncodingType> {
        match self.mode {
            ReturnMode::Encode { format } => Some(format),
            _ => None,
        }
    }

    /// Condense the result with an aggregation function.
    pub fn set_aggregation_method(&mut self, method: AggregationMethod) {
        self.mode = ReturnMode::Aggregate { method };
    }

    pub fn with_aggregation(mut self, method: AggregationMethod) -> Self {
        self.set_aggregation_method(method);
        self
    }

    /// Drop the aggregation if it is the active mode.
    pub fn reset_aggregation_method(&mut self) {
        if matches!(self.mode, ReturnMode::Aggregate { .. }) {
            self.mode = ReturnMode::Plain;
        }
    }

    pub fn aggregation_method(&self) -> Option<AggregationMethod> {
        match self.mode {
            ReturnMode::Aggregate { method } => Some(method),
            _ => None,
        }
    }

    /// Add a branch to the switch, activating switch mode if needed.
    pub fn add_switch_case(&mut self, case: SwitchCase) {
        match &mut self.mode {
            ReturnMode::Switch(block) => block.push(case),
            mode => *mode = ReturnMode::Switch(SwitchBlock::new().with_case(case)),
        }
    }

    /// Replace the switch branches wholesale.
    pub fn set_switch(&mut self, block: SwitchBlock) {
        self.mode = ReturnMode::Switch(block);
    }

    /// Drop all switch branches if a switch is the active mode.
    pub fn reset_cases(&mut self) {
        if matches!(self.mode, ReturnMode::Switch(_)) {
            self.mode = ReturnMode::Plain;
        }
    }

    pub fn switch(&self) -> Option<&SwitchBlock> {
        match &self.mode {
            ReturnMode::Switch(block) => Some(block),
            _ => None,
        }
    }

    // === Rendering ===

    /// Render the query to WCPS text.
    ///
    /// Fails when no coverage is set, or when a switch has no default branch.
    pub fn render(&self) -> QueryResult<String> {
        let mut lines = vec![self.render_for_clause()?];

        if !self.subset.is_empty() {
            let terms = self
                .subset
                .iter()
                .map(AxisSubset::render)
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("let {} := [{}]", SUBSET_VARIABLE, terms));
        }

        lines.extend(self.render_return_clause());

        Ok(lines.join("\n"))
    }

    fn render_for_clause(&self) -> QueryResult<String> {
        match self.coverages.as_slice() {
            [] => Err(QueryError::MissingCoverage),
            [single] => Ok(format!("for {} in ( {} )", ITERATOR, single)),
            many => Ok(format!("for {} in ({})", ITERATOR, many.join(","))),
        }
    }

    fn render_return_clause(&self) -> Vec<String> {
        let subset = if self.subset.is_empty() {
            String::new()
        } else {
            format!(" [ {} ]", SUBSET_VARIABLE)
        };

        let value = if self.return_value.is_iterator() {
            ITERATOR.to_string()
        } else {
            format!("( {} )", self.return_value)
        };

        let lines = match &self.mode {
            ReturnMode::Plain => vec![format!("return ( {}{} )", value, subset)],
            ReturnMode::Aggregate { method } => {
                vec![format!("return {} ( {}{} )", method, value, subset)]
            }
            ReturnMode::Encode { format } => vec![format!(
                "return encode ( {}{} , \"{}\" )",
                value,
                subset,
                format.media_type()
            )],
            ReturnMode::Switch(block) => {
                let mut lines = vec!["return (".to_string()];
                lines.extend(block.render_lines());
                lines.push(format!("){}", subset));
                lines
            }
        };

        lines
    }
}
