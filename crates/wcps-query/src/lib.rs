//! Declarative WCPS (Web Coverage Processing Service) queries.
//!
//! Build a [`Query`] over named coverages, narrow it with [`AxisSubset`]s,
//! choose how the result is returned (plain, aggregated, encoded or through
//! a switch), then render it to WCPS text for a coverage server.
//!
//! # Example
//!
//! ```rust
//! use wcps_query::{AxisSubset, EncodingType, Query};
//!
//! let mut query = Query::new(["AvgLandTemp"]);
//! query.set_subset(vec![
//!     AxisSubset::point("ansi", "2014-07"),
//!     AxisSubset::range("Lat", -20, 30),
//!     AxisSubset::range("Long", 10, 30),
//! ]);
//! query.encode(EncodingType::Png);
//!
//! let wcps = query.render().unwrap();
//! assert!(wcps.starts_with("for $c in ( AvgLandTemp )"));
//! ```

pub mod aggregation;
pub mod constructor;
pub mod coordinate;
pub mod encoding;
pub mod error;
pub mod expression;
pub mod query;
pub mod subset;
pub mod switch;

pub use aggregation::AggregationMethod;
pub use constructor::CoverageConstructor;
pub use coordinate::Coordinate;
pub use encoding::EncodingType;
pub use error::{QueryError, QueryResult};
pub use expression::Expression;
pub use query::{Query, ReturnMode};
pub use subset::AxisSubset;
pub use switch::{SwitchBlock, SwitchCase};
