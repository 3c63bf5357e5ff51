//! Rendering tests for complete queries.

use wcps_query::{
    AggregationMethod, AxisSubset, Coordinate, CoverageConstructor, EncodingType, Expression,
    Query, QueryError, ReturnMode, SwitchCase,
};

fn avg_land_temp() -> Query {
    Query::new(["AvgLandTemp"])
}

fn temperature_subset() -> Vec<AxisSubset> {
    vec![
        AxisSubset::point("ansi", "2014-07"),
        AxisSubset::range("Lat", -20, 30),
        AxisSubset::range("Long", 10, 30),
    ]
}

fn color_cases(query: &mut Query) {
    query.add_switch_case(SwitchCase::new("$c = 99999", "{red: 255; green: 255; blue: 255}"));
    query.add_switch_case(SwitchCase::new("18 > $c", "{red: 0; green: 0; blue: 255}"));
    query.add_switch_case(SwitchCase::new("23 > $c", "{red: 255; green: 255; blue: 0}"));
    query.add_switch_case(SwitchCase::new("30 > $c", "{red: 255; green: 140; blue: 0}"));
    query.add_switch_case(SwitchCase::default_branch("{red: 255; green: 0; blue: 0}"));
}

// ============================================================================
// Iteration clause
// ============================================================================

#[test]
fn test_single_coverage_for_clause() {
    let text = avg_land_temp().render().unwrap();
    assert!(text.starts_with("for $c in ( AvgLandTemp )\n"));
}

#[test]
fn test_multi_coverage_for_clause() {
    let query = Query::new(["AvgLandTemp", "AverageChloroColorScaled", "S2_L2A"]);
    let text = query.render().unwrap();
    assert!(text.starts_with("for $c in (AvgLandTemp,AverageChloroColorScaled,S2_L2A)\n"));
}

#[test]
fn test_empty_coverages_always_fail() {
    let mut query = avg_land_temp()
        .with_subset(temperature_subset())
        .with_encoding(EncodingType::Png);
    query.set_coverages(Vec::<String>::new());

    assert_eq!(query.render(), Err(QueryError::MissingCoverage));
}

// ============================================================================
// Subset binding
// ============================================================================

#[test]
fn test_subset_terms_keep_order() {
    let subset = vec![
        AxisSubset::point("Long", 64),
        AxisSubset::range("ansi", "2003-09", "2009-02"),
        AxisSubset::point("Lat", 27.09),
        AxisSubset::range("E", Coordinate::unbounded(), 100),
    ];
    let query = avg_land_temp().with_subset(subset.clone());
    let text = query.render().unwrap();

    let let_line = text.lines().nth(1).unwrap();
    let inner = let_line
        .strip_prefix("let $subset := [")
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap();
    let terms: Vec<&str> = inner.split(", ").collect();

    assert_eq!(terms.len(), subset.len());
    assert_eq!(terms, vec!["Long(64)", "ansi(\"2003-09\":\"2009-02\")", "Lat(27.09)", "E(*:100)"]);
}

#[test]
fn test_clear_subset_drops_binding() {
    let mut query = avg_land_temp().with_subset(temperature_subset());
    query.clear_subset();
    let text = query.render().unwrap();

    assert!(!text.contains("let $subset"));
    assert!(!text.contains("[ $subset ]"));
}

// ============================================================================
// Return modes
// ============================================================================

#[test]
fn test_scenario_plain() {
    assert_eq!(
        avg_land_temp().render().unwrap(),
        "for $c in ( AvgLandTemp )\nreturn ( $c )"
    );
}

#[test]
fn test_scenario_subset_then_encode() {
    let mut query = avg_land_temp();
    query.set_subset(temperature_subset());
    query.encode(EncodingType::Png);

    let text = query.render().unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "let $subset := [ansi(\"2014-07\"), Lat(-20:30), Long(10:30)]");
    assert_eq!(lines[2], "return encode ( $c [ $subset ] , \"image/png\" )");
}

#[test]
fn test_scenario_switch_cases() {
    let mut query = avg_land_temp().with_return_value("$c + 1");
    color_cases(&mut query);

    let text = query.render().unwrap();
    let case_lines = text.lines().filter(|l| l.starts_with("case ")).count();
    let default_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("default return")).collect();

    assert!(text.contains("\nswitch\n"));
    assert_eq!(case_lines, 4);
    assert_eq!(default_lines, vec!["default return {red: 255; green: 0; blue: 0}"]);
    assert!(!text.contains("$c + 1"));

    // Default is the last branch line.
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[lines.len() - 2], default_lines[0]);
}

#[test]
fn test_default_added_first_still_renders_last() {
    let mut query = avg_land_temp();
    query.add_switch_case(SwitchCase::default_branch(0));
    query.add_switch_case(SwitchCase::new("$c > 30", 1));

    let text = query.render().unwrap();
    let case_pos = text.find("case $c > 30 return 1").unwrap();
    let default_pos = text.find("default return 0").unwrap();
    assert!(case_pos < default_pos);
}

#[test]
fn test_switch_without_default_renders_cases_only() {
    let mut query = avg_land_temp();
    query.add_switch_case(SwitchCase::new("$c > 30", 1));
    assert_eq!(
        query.render().unwrap(),
        "for $c in ( AvgLandTemp )\nreturn (\nswitch\ncase $c > 30 return 1\n)"
    );
}

#[test]
fn test_scenario_aggregation_reset() {
    let mut query = avg_land_temp().with_subset(temperature_subset());
    query.set_aggregation_method(AggregationMethod::Max);
    assert!(query.render().unwrap().contains("return max ( $c [ $subset ] )"));

    query.reset_aggregation_method();
    let text = query.render().unwrap();
    assert!(!text.contains("max ("));
    assert!(text.ends_with("return ( $c [ $subset ] )"));
}

#[test]
fn test_setting_a_mode_replaces_the_active_one() {
    let mut query = avg_land_temp().with_subset(temperature_subset());
    query.set_aggregation_method(AggregationMethod::Min);
    query.encode(EncodingType::Tiff);

    let text = query.render().unwrap();
    assert!(text.contains("encode ("));
    assert!(text.contains("\"image/tiff\""));
    assert!(!text.contains("min ("));
    assert_eq!(query.aggregation_method(), None);

    query.set_aggregation_method(AggregationMethod::Avg);
    let text = query.render().unwrap();
    assert!(text.contains("return avg ( $c [ $subset ] )"));
    assert!(!text.contains("image/tiff"));

    color_cases(&mut query);
    let text = query.render().unwrap();
    assert!(text.contains("\nswitch\n"));
    assert!(!text.contains("avg ("));
    assert!(!text.contains("encode ("));
}

#[test]
fn test_reset_cases_returns_to_plain() {
    let mut query = avg_land_temp().with_return_value(1);
    color_cases(&mut query);
    query.reset_cases();

    assert_eq!(query.mode(), &ReturnMode::Plain);
    assert!(query.render().unwrap().ends_with("return ( ( 1 ) )"));
}

#[test]
fn test_encode_custom_expression() {
    let query = avg_land_temp()
        .with_subset(vec![
            AxisSubset::point("Lat", 53.08),
            AxisSubset::point("Long", 8.80),
            AxisSubset::range("ansi", "2014-01", "2014-12"),
        ])
        .with_return_value("$c + 273.15")
        .with_encoding(EncodingType::Csv);

    assert!(query
        .render()
        .unwrap()
        .ends_with("return encode ( ( $c + 273.15 ) [ $subset ] , \"text/csv\" )"));
}

#[test]
fn test_coverage_constructor_as_return_value() {
    let constructor = CoverageConstructor::new(
        "myCoverage",
        vec![AxisSubset::range("x", 0, 200), AxisSubset::range("y", 0, 200)],
        "$px + $py",
    );
    let query = avg_land_temp()
        .with_return_value(constructor)
        .with_encoding(EncodingType::Png);

    assert_eq!(
        query.render().unwrap(),
        "for $c in ( AvgLandTemp )\n\
         return encode ( ( coverage myCoverage\n\
         over $px x(0:200), $py y(0:200)\n\
         values $px + $py ) , \"image/png\" )"
    );
}

// ============================================================================
// Rendering is a pure function of state
// ============================================================================

#[test]
fn test_render_is_idempotent() {
    let mut query = avg_land_temp().with_subset(temperature_subset());
    color_cases(&mut query);

    let first = query.render().unwrap();
    let second = query.render().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_render_reflects_later_mutation() {
    let mut query = avg_land_temp();
    let before = query.render().unwrap();

    query.set_coverages(["AverageChloroColorScaled"]);
    query.set_return_value(Expression::from(1));
    let after = query.render().unwrap();

    assert_ne!(before, after);
    assert_eq!(after, "for $c in ( AverageChloroColorScaled )\nreturn ( ( 1 ) )");
}

// ============================================================================
// Declarative descriptions
// ============================================================================

#[test]
fn test_query_from_yaml() {
    let yaml = r#"
coverages: [AvgLandTemp]
subset:
  - axis: ansi
    start: "2014-07"
  - axis: Lat
    start: -20
    stop: 30
  - axis: Long
    start: 10.5
    stop: { raw: "*" }
mode:
  kind: encode
  format: png
"#;

    let query: Query = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(query.encoding(), Some(EncodingType::Png));
    assert!(query.return_value().is_iterator());
    assert_eq!(
        query.render().unwrap().lines().nth(1).unwrap(),
        "let $subset := [ansi(\"2014-07\"), Lat(-20:30), Long(10.5:*)]"
    );
}

#[test]
fn test_switch_query_from_json() {
    let json = r#"{
        "coverages": ["AvgLandTemp"],
        "mode": {
            "kind": "switch",
            "cases": [{"condition": "18 > $c", "result": "{red: 0; green: 0; blue: 255}"}],
            "default": "{red: 255; green: 0; blue: 0}"
        }
    }"#;

    let query: Query = serde_json::from_str(json).unwrap();
    let text = query.render().unwrap();
    assert!(text.contains("case 18 > $c return {red: 0; green: 0; blue: 255}"));
    assert!(text.contains("default return {red: 255; green: 0; blue: 0}"));
}

#[test]
fn test_default_flagged_case_in_file_renders_last() {
    let json = r#"{
        "coverages": ["A"],
        "mode": {
            "kind": "switch",
            "cases": [
                {"is_default": true, "result": 0},
                {"condition": "$c > 1", "result": 1}
            ]
        }
    }"#;

    let query: Query = serde_json::from_str(json).unwrap();
    assert_eq!(
        query.render().unwrap(),
        "for $c in ( A )\nreturn (\nswitch\ncase $c > 1 return 1\ndefault return 0\n)"
    );
}

#[test]
fn test_default_flagged_case_wins_over_default_key() {
    let json = r#"{
        "coverages": ["A"],
        "mode": {
            "kind": "switch",
            "cases": [
                {"is_default": true, "result": 0},
                {"condition": "$c > 1", "result": 1}
            ],
            "default": 2
        }
    }"#;

    let query: Query = serde_json::from_str(json).unwrap();
    let text = query.render().unwrap();
    assert!(!text.contains("case  return"));
    assert_eq!(text.matches("default return").count(), 1);
    assert!(text.contains("case $c > 1 return 1\ndefault return 0\n)"));
}

#[test]
fn test_json_round_trip_preserves_render() {
    let query = avg_land_temp()
        .with_subset(temperature_subset())
        .with_return_value("$c < 10")
        .with_aggregation(AggregationMethod::Count);

    let json = serde_json::to_string(&query).unwrap();
    let restored: Query = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, query);
    assert_eq!(restored.render().unwrap(), query.render().unwrap());
}
