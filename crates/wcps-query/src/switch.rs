//! Switch-case coverage conditionals.
//!
//! A switch evaluates its ordinary branches in insertion order and falls
//! back to the default branch when no guard holds. The default is stored
//! apart from the ordinary branches so it always renders last.

use serde::{Deserialize, Serialize};

use crate::expression::Expression;

/// One branch of a switch expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    #[serde(default)]
    pub is_default: bool,
    /// Boolean guard; ignored for the default branch.
    #[serde(default)]
    pub condition: String,
    pub result: Expression,
}

impl SwitchCase {
    /// Ordinary branch: `case <condition> return <result>`.
    pub fn new(condition: impl Into<String>, result: impl Into<Expression>) -> Self {
        Self {
            is_default: false,
            condition: condition.into(),
            result: result.into(),
        }
    }

    /// Fallback branch: `default return <result>`.
    pub fn default_branch(result: impl Into<Expression>) -> Self {
        Self {
            is_default: true,
            condition: String::new(),
            result: result.into(),
        }
    }
}

/// The full set of branches of one switch expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SwitchBlockRepr")]
pub struct SwitchBlock {
    cases: Vec<SwitchCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Expression>,
}

/// Serialized form. Default-flagged entries in `cases` are routed through
/// [`SwitchBlock::push`] and take precedence over the `default` key.
#[derive(Deserialize)]
struct SwitchBlockRepr {
    #[serde(default)]
    cases: Vec<SwitchCase>,
    #[serde(default)]
    default: Option<Expression>,
}

impl From<SwitchBlockRepr> for SwitchBlock {
    fn from(repr: SwitchBlockRepr) -> Self {
        let mut block = SwitchBlock {
            cases: Vec::with_capacity(repr.cases.len()),
            default: repr.default,
        };
        for case in repr.cases {
            block.push(case);
        }
        block
    }
}

impl SwitchBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a branch. A default branch replaces any earlier default.
    pub fn push(&mut self, case: SwitchCase) {
        if case.is_default {
            self.default = Some(case.result);
        } else {
            self.cases.push(case);
        }
    }

    /// Builder form of [`SwitchBlock::push`].
    pub fn with_case(mut self, case: SwitchCase) -> Self {
        self.push(case);
        self
    }

    /// Ordinary branches in evaluation order.
    pub fn cases(&self) -> &[SwitchCase] {
        &self.cases
    }

    pub fn default_result(&self) -> Option<&Expression> {
        self.default.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty() && self.default.is_none()
    }

    /// Render `switch` and one line per branch, default last. Without a
    /// default branch no `default return` line is emitted.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.cases.len() + 2);
        lines.push("switch".to_string());
        for case in &self.cases {
            lines.push(format!("case {} return {}", case.condition, case.result));
        }
        if let Some(default) = &self.default {
            lines.push(format!("default return {}", default));
        }
        lines
    }

    /// Render the switch as a standalone expression.
    pub fn render(&self) -> String {
        self.render_lines().join("\n")
    }
}
