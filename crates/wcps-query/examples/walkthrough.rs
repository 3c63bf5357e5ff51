//! Builds one query step by step and prints each rendering.
//!
//! Run with `cargo run -p wcps-query --example walkthrough`.

use wcps_query::{
    AggregationMethod, AxisSubset, EncodingType, Expression, Query, QueryResult, SwitchBlock,
    SwitchCase,
};

fn main() -> QueryResult<()> {
    let mut query = Query::new(["AvgLandTemp"]);
    println!("Plain query:\n{}\n", query.render()?);

    query.set_subset(vec![
        AxisSubset::point("ansi", "2014-07"),
        AxisSubset::range("Lat", -20, 30),
        AxisSubset::range("Long", 10, 30),
    ]);
    println!("Subsetting:\n{}\n", query.render()?);

    query.encode(EncodingType::Png);
    println!("Encoded to PNG:\n{}\n", query.render()?);

    query.set_aggregation_method(AggregationMethod::Max);
    println!("Maximum temperature of the month:\n{}\n", query.render()?);

    query.reset_aggregation_method();
    query.add_switch_case(SwitchCase::new("$c = 99999", "{red: 255; green: 255; blue: 255}"));
    query.add_switch_case(SwitchCase::new("18 > $c", "{red: 0; green: 0; blue: 255}"));
    query.add_switch_case(SwitchCase::new("23 > $c", "{red: 255; green: 255; blue: 0}"));
    query.add_switch_case(SwitchCase::new("30 > $c", "{red: 255; green: 140; blue: 0}"));
    query.add_switch_case(SwitchCase::default_branch("{red: 255; green: 0; blue: 0}"));
    println!("Switch case:\n{}\n", query.render()?);

    // A switch is its own return mode, so the colored map is encoded by
    // returning the switch expression under the PNG encoding mode.
    let colors = query.switch().map(SwitchBlock::render).unwrap_or_default();
    query.set_return_value(Expression::raw(colors));
    query.encode(EncodingType::Png);
    println!("Switch case encoded to PNG:\n{}", query.render()?);

    Ok(())
}
