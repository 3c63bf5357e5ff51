//! Ready-made queries for common coverage questions.
//!
//! Each function returns a [`Query`] that can be refined further before it
//! is executed. `subset` narrows the coverage (typically `Lat`, `Long` and
//! `ansi`).

use wcps_query::{
    AggregationMethod, AxisSubset, CoverageConstructor, EncodingType, Expression, Query,
    SwitchBlock, SwitchCase,
};

/// Sentinel used by temperature coverages for missing cells.
pub const NO_DATA: i64 = 99999;

/// Returns 1 for every cell of the coverage.
pub fn basic_query(coverage: &str) -> Query {
    Query::new([coverage]).with_return_value(1)
}

/// Value at a single point.
pub fn single_value(coverage: &str, subset: Vec<AxisSubset>) -> Query {
    Query::new([coverage]).with_subset(subset)
}

pub fn minimum(coverage: &str, subset: Vec<AxisSubset>) -> Query {
    aggregate(coverage, subset, AggregationMethod::Min)
}

pub fn maximum(coverage: &str, subset: Vec<AxisSubset>) -> Query {
    aggregate(coverage, subset, AggregationMethod::Max)
}

pub fn average(coverage: &str, subset: Vec<AxisSubset>) -> Query {
    aggregate(coverage, subset, AggregationMethod::Avg)
}

/// Number of cells whose value is below `threshold`.
pub fn count_below(coverage: &str, subset: Vec<AxisSubset>, threshold: f64) -> Query {
    aggregate(coverage, subset, AggregationMethod::Count)
        .with_return_value(format!("$c < {:?}", threshold))
}

/// Number of cells whose value is above `threshold`.
pub fn count_above(coverage: &str, subset: Vec<AxisSubset>, threshold: f64) -> Query {
    aggregate(coverage, subset, AggregationMethod::Count)
        .with_return_value(format!("$c > {:?}", threshold))
}

/// A one-dimensional slice as CSV, e.g. a time series at one location.
pub fn transform_to_1d(coverage: &str, subset: Vec<AxisSubset>) -> Query {
    Query::new([coverage])
        .with_subset(subset)
        .with_encoding(EncodingType::Csv)
}

/// A two-dimensional slice as PNG, e.g. a map at one time step.
pub fn transform_to_2d(coverage: &str, subset: Vec<AxisSubset>) -> Query {
    Query::new([coverage])
        .with_subset(subset)
        .with_encoding(EncodingType::Png)
}

/// Celsius values converted to Kelvin, as CSV.
pub fn celsius_to_kelvin(coverage: &str, subset: Vec<AxisSubset>) -> Query {
    transform_to_1d(coverage, subset).with_return_value("$c + 273.15")
}

/// Temperature classes colored white (no data), blue, yellow, orange and
/// red, encoded as PNG.
pub fn color_map(coverage: &str, subset: Vec<AxisSubset>) -> Query {
    let cell = if subset.is_empty() {
        "$c".to_string()
    } else {
        let terms = subset
            .iter()
            .map(AxisSubset::render)
            .collect::<Vec<_>>()
            .join(", ");
        format!("$c[{}]", terms)
    };

    let block = SwitchBlock::new()
        .with_case(SwitchCase::new(
            format!("{} = {}", cell, NO_DATA),
            "{red: 255; green: 255; blue: 255}",
        ))
        .with_case(SwitchCase::new(format!("18 > {}", cell), "{red: 0; green: 0; blue: 255}"))
        .with_case(SwitchCase::new(format!("23 > {}", cell), "{red: 255; green: 255; blue: 0}"))
        .with_case(SwitchCase::new(format!("30 > {}", cell), "{red: 255; green: 140; blue: 0}"))
        .with_case(SwitchCase::default_branch("{red: 255; green: 0; blue: 0}"));

    Query::new([coverage])
        .with_return_value(Expression::raw(block.render()))
        .with_encoding(EncodingType::Png)
}

/// A synthetic `size` x `size` gradient image, independent of the coverage
/// values.
pub fn gradient_image(coverage: &str, size: u32) -> Query {
    let constructor = CoverageConstructor::new(
        "gradient",
        vec![AxisSubset::range("x", 0, size), AxisSubset::range("y", 0, size)],
        "$px + $py",
    );

    Query::new([coverage])
        .with_return_value(constructor)
        .with_encoding(EncodingType::Png)
}

fn aggregate(coverage: &str, subset: Vec<AxisSubset>, method: AggregationMethod) -> Query {
    Query::new([coverage])
        .with_subset(subset)
        .with_aggregation(method)
}
