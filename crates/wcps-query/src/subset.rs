//! Axis subsets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A constraint on one axis of a coverage: a single point or an interval.
///
/// Renders as `axis(start)` or `axis(start:stop)`. Start and stop may be
/// of different coordinate kinds; no consistency check is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSubset {
    /// Axis name, e.g. `Lat`, `Long` or `ansi`.
    pub axis: String,
    pub start: Coordinate,
    /// Upper bound; `None` for a point subset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Coordinate>,
}

impl AxisSubset {
    pub fn new(axis: impl Into<String>, start: impl Into<Coordinate>, stop: Option<Coordinate>) -> Self {
        Self {
            axis: axis.into(),
            start: start.into(),
            stop,
        }
    }

    /// Slice the axis at a single coordinate.
    pub fn point(axis: impl Into<String>, start: impl Into<Coordinate>) -> Self {
        Self::new(axis, start, None)
    }

    /// Trim the axis to the interval `start:stop`.
    pub fn range(
        axis: impl Into<String>,
        start: impl Into<Coordinate>,
        stop: impl Into<Coordinate>,
    ) -> Self {
        Self::new(axis, start, Some(stop.into()))
    }

    pub fn is_point(&self) -> bool {
        self.stop.is_none()
    }

    /// Render the subset to WCPS text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AxisSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stop {
            Some(stop) => write!(f, "{}({}:{})", self.axis, self.start, stop),
            None => write!(f, "{}({})", self.axis, self.start),
        }
    }
}
