//! Building a query from command-line flags or a query file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::debug;
use wcps_query::{AggregationMethod, AxisSubset, Coordinate, EncodingType, Expression, Query};

/// Flags describing a query. Flags override fields loaded from `--query-file`.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Coverage to iterate over (repeatable)
    #[arg(short = 'c', long = "coverage")]
    pub coverages: Vec<String>,

    /// Axis subset as axis=start[:stop] (repeatable). Numbers are unquoted,
    /// `*` is an open bound, anything else is a quoted literal.
    #[arg(short = 's', long = "subset")]
    pub subsets: Vec<String>,

    /// Expression to return instead of $c
    #[arg(long)]
    pub return_value: Option<String>,

    /// Aggregation method: avg, sum, min, max, count
    #[arg(long, conflicts_with = "encode")]
    pub aggregate: Option<String>,

    /// Output encoding: png, jpeg, tiff, gif, csv
    #[arg(long)]
    pub encode: Option<String>,

    /// YAML or JSON query description
    #[arg(short = 'f', long)]
    pub query_file: Option<PathBuf>,
}

impl QueryArgs {
    pub fn build_query(&self) -> Result<Query> {
        let mut query = match &self.query_file {
            Some(path) => load_query_file(path)?,
            None => Query::new(Vec::<String>::new()),
        };

        if !self.coverages.is_empty() {
            query.set_coverages(self.coverages.iter().cloned());
        }

        if !self.subsets.is_empty() {
            let subset = self
                .subsets
                .iter()
                .map(|spec| parse_subset(spec))
                .collect::<Result<Vec<_>>>()?;
            query.set_subset(subset);
        }

        if let Some(value) = &self.return_value {
            query.set_return_value(parse_expression(value)?);
        }

        if let Some(method) = &self.aggregate {
            query.set_aggregation_method(method.parse::<AggregationMethod>()?);
        }

        if let Some(format) = &self.encode {
            query.encode(format.parse::<EncodingType>()?);
        }

        Ok(query)
    }
}

/// Load a query description; `.json` files are JSON, anything else YAML.
pub fn load_query_file(path: &Path) -> Result<Query> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read query file: {}", path.display()))?;

    let is_json = path.extension().map_or(false, |ext| ext == "json");
    let query: Query = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse query file: {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse query file: {}", path.display()))?
    };

    debug!(path = %path.display(), coverages = ?query.coverages(), "Loaded query file");
    Ok(query)
}

/// Parse `axis=start` or `axis=start:stop`.
pub fn parse_subset(spec: &str) -> Result<AxisSubset> {
    let (axis, bounds) = spec
        .split_once('=')
        .with_context(|| format!("Subset '{}' must look like axis=start[:stop]", spec))?;

    let axis = axis.trim();
    if axis.is_empty() {
        bail!("Subset '{}' has no axis name", spec);
    }

    let parts = split_outside_quotes(bounds, ':');
    match parts.as_slice() {
        [start] => Ok(AxisSubset::point(axis, parse_coordinate(start)?)),
        [start, stop] => Ok(AxisSubset::range(
            axis,
            parse_coordinate(start)?,
            parse_coordinate(stop)?,
        )),
        _ => bail!("Subset '{}' has more than one ':' outside quotes", spec),
    }
}

fn parse_coordinate(text: &str) -> Result<Coordinate> {
    let text = text.trim();
    if text.is_empty() {
        bail!("Empty subset bound");
    }
    if text == "*" {
        return Ok(Coordinate::unbounded());
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Ok(Coordinate::literal(&text[1..text.len() - 1])?);
    }
    if let Ok(value) = text.parse::<i64>() {
        return Ok(Coordinate::Integer(value));
    }
    if let Ok(value) = text.parse::<f64>() {
        if value.is_finite() {
            return Ok(Coordinate::Float(value));
        }
    }
    Ok(Coordinate::literal(text)?)
}

fn parse_expression(text: &str) -> Result<Expression> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(Expression::Integer(value));
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() {
            return Ok(Expression::Float(value));
        }
    }
    Ok(Expression::checked(trimmed)?)
}

fn split_outside_quotes(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == separator && !in_quotes {
            parts.push(&text[start..i]);
            start = i + ch.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}
