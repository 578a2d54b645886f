//! Reverse builder: structured configuration to `stats` AST.
//!
//! Used when an edit originates from UI controls rather than typed text.
//! The resulting tree has the same shape the forward builder would produce
//! for equivalent text, except every span is the sentinel - the nodes have
//! no originating text. Rendering the result is deterministic for a given
//! configuration.

use regex::Regex;

use crate::ast::{
    AggregateFunction, AggregateTerm, Aggregations, Field, GroupBy, Operand, Span, SpanExpression,
    StatsFlag, TextSpan,
};
use crate::config::{
    AggregationConfig, FunctionConfig, GroupByConfig, SpanConfig, StatsConfig,
};

pub fn build_stats(config: &StatsConfig) -> Aggregations {
    Aggregations {
        partitions: value_flag("partitions", &config.partitions),
        all_num: value_flag("allnum", &config.all_num),
        delim: value_flag("delim", &config.delim),
        aggregations: config.aggregations.iter().map(build_term).collect(),
        group_by: build_group_by(&config.group_by),
        dedup_split_value: config.dedup_split_value.as_ref().map(|flag| StatsFlag {
            keyword: flag.keyword.clone(),
            sign: flag.sign.clone(),
            value: flag.value.clone(),
        }),
        span: TextSpan::NONE,
    }
}

fn value_flag(keyword: &str, value: &Option<String>) -> Option<StatsFlag> {
    value
        .as_ref()
        .filter(|v| !v.is_empty())
        .map(|v| StatsFlag {
            keyword: keyword.to_string(),
            sign: "=".to_string(),
            value: v.clone(),
        })
}

fn build_term(config: &AggregationConfig) -> AggregateTerm {
    AggregateTerm {
        function: build_function(&config.function),
        alias: config.alias.clone().filter(|alias| !alias.is_empty()),
        span: TextSpan::NONE,
    }
}

fn build_function(config: &FunctionConfig) -> AggregateFunction {
    if let Some(percentile) = config
        .percentile_form
        .as_ref()
        .filter(|form| !form.is_empty())
    {
        return AggregateFunction::Percentile {
            text: percentile.clone(),
            span: TextSpan::NONE,
        };
    }
    let argument = if config.value_expression.is_empty() {
        None
    } else {
        Some(Operand::Text(config.value_expression.clone()))
    };
    AggregateFunction::Named {
        name: config.name.clone(),
        argument,
        span: TextSpan::NONE,
    }
}

fn build_group_by(config: &GroupByConfig) -> Option<GroupBy> {
    let fields: Vec<Field> = config
        .fields
        .iter()
        .map(|field| Field {
            expression: quote_field(&field.name),
            span: TextSpan::NONE,
        })
        .collect();
    let span_clause = config.span.as_ref().map(build_span);
    if fields.is_empty() && span_clause.is_none() {
        return None;
    }
    Some(GroupBy {
        fields,
        span_clause,
        span: TextSpan::NONE,
    })
}

fn build_span(config: &SpanConfig) -> Span {
    Span {
        expression: SpanExpression {
            field: quote_field(&config.field),
            literal: Operand::Text(config.interval.clone()),
            time_unit: config.unit.clone(),
            span: TextSpan::NONE,
        },
        alias: config.alias.clone().filter(|alias| !alias.is_empty()),
        span: TextSpan::NONE,
    }
}

/// Field names typed into a form are backtick-quoted unless they already
/// read as a plain (possibly dotted) identifier.
fn quote_field(name: &str) -> String {
    if name.starts_with('`') && name.ends_with('`') && name.len() >= 2 {
        return name.to_string();
    }
    let plain = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("identifier pattern");
    if plain.is_match(name) {
        name.to_string()
    } else {
        format!("`{}`", name)
    }
}
