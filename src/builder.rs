//! AST builders.
//!
//! The forward direction ([`build_query`] plus the [`stats`] and [`logical`]
//! visitor families) walks the parse tree the syntax layer produced and
//! instantiates typed AST nodes. Dispatch is a `match` over each child
//! context's [`Rule`], decided once where the parse tree is inspected; a
//! child shape with no dedicated visitor falls through to an
//! [`Unhandled`] node carrying the production name - a recognized
//! "feature not yet modeled" outcome, not an error.
//!
//! The reverse direction ([`reverse`]) builds the same `stats` node shape
//! directly from structured configuration, with sentinel spans.

pub mod logical;
pub mod reverse;
pub mod stats;

use crate::ast::{PplNode, QueryStatement, TextSpan, Unhandled};
use crate::syntax::{Context, Rule};

/// Build the AST for a parsed query, starting from the root context.
///
/// An empty input yields the unhandled sentinel rather than a statement, so
/// callers can tell "nothing parsed" apart from "clause not present".
pub fn build_query(root: &Context) -> PplNode {
    visit_root(root)
}

/// The no-op result for grammar branches without a dedicated visitor.
pub(crate) fn default_result(rule: Rule) -> PplNode {
    PplNode::Unhandled(Unhandled {
        rule: rule_name(rule).to_string(),
        text: String::new(),
        span: TextSpan::NONE,
    })
}

fn visit_root(ctx: &Context) -> PplNode {
    match ctx.find_rule(Rule::PplStatement) {
        Some(statement) => visit_ppl_statement(statement),
        None => default_result(Rule::Root),
    }
}

fn visit_ppl_statement(ctx: &Context) -> PplNode {
    match ctx.find_rule(Rule::DmlStatement) {
        Some(dml) => visit_dml_statement(dml),
        None => default_result(Rule::PplStatement),
    }
}

fn visit_dml_statement(ctx: &Context) -> PplNode {
    match ctx.find_rule(Rule::QueryStatement) {
        Some(query) => visit_query_statement(query),
        None => default_result(Rule::DmlStatement),
    }
}

fn visit_query_statement(ctx: &Context) -> PplNode {
    let source = ctx
        .find_rule(Rule::PplCommands)
        .map(|commands| commands.joined_text())
        .unwrap_or_default();
    let commands: Vec<PplNode> = ctx
        .rules()
        .filter(|child| child.rule == Rule::Commands)
        .map(visit_commands)
        .collect();
    PplNode::QueryStatement(QueryStatement {
        source,
        commands,
        span: ctx.span,
    })
}

fn visit_commands(ctx: &Context) -> PplNode {
    if let Some(child) = ctx.rules().next() {
        match child.rule {
            Rule::StatsCommand => return stats::visit_stats_command(child),
            Rule::WhereCommand => return logical::visit_where_command(child),
            _ => {}
        }
    }
    // A command keyword with no dedicated builder: walked but not
    // translated, kept as raw text so a full statement render is lossless.
    PplNode::Unhandled(Unhandled {
        rule: rule_name(Rule::Commands).to_string(),
        text: ctx.joined_text(),
        span: ctx.span,
    })
}

/// The production name carried by [`Unhandled`] nodes.
pub(crate) fn rule_name(rule: Rule) -> &'static str {
    match rule {
        Rule::Root => "root",
        Rule::PplStatement => "ppl_statement",
        Rule::DmlStatement => "dml_statement",
        Rule::QueryStatement => "query_statement",
        Rule::PplCommands => "ppl_commands",
        Rule::Commands => "commands",
        Rule::StatsCommand => "stats_command",
        Rule::StatsAggTerm => "stats_agg_term",
        Rule::StatsFunction => "stats_function",
        Rule::StatsFunctionName => "stats_function_name",
        Rule::PercentileAggFunction => "percentile_agg_function",
        Rule::TakeAggFunctionCall => "take_agg_function_call",
        Rule::StatsByClause => "stats_by_clause",
        Rule::FieldList => "field_list",
        Rule::BySpanClause => "by_span_clause",
        Rule::SpanClause => "span_clause",
        Rule::TimespanUnit => "timespan_unit",
        Rule::FieldExpression => "field_expression",
        Rule::WcFieldExpression => "wc_field_expression",
        Rule::QualifiedName => "qualified_name",
        Rule::WhereCommand => "where_command",
        Rule::LogicalOr => "logical_or",
        Rule::LogicalXor => "logical_xor",
        Rule::LogicalAnd => "logical_and",
        Rule::LogicalNot => "logical_not",
        Rule::Comparison => "comparison",
        Rule::ComparisonExpression => "comparison_expression",
        Rule::BooleanExpression => "boolean_expression",
        Rule::ValueExpression => "value_expression",
        Rule::PrimaryExpression => "primary_expression",
        Rule::EvalFunctionCall => "eval_function_call",
        Rule::EvalFunctionName => "eval_function_name",
        Rule::FunctionArgs => "function_args",
        Rule::FunctionArg => "function_arg",
        Rule::LiteralValue => "literal_value",
        Rule::IntervalLiteral => "interval_literal",
    }
}
