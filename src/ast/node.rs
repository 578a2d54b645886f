use serde_json::Value;

use crate::ast::expressions::{
    AggregateFunction, AggregateTerm, ComparisonExpression, EvalFunctionCall, Field, GroupBy,
    IntervalLiteral, LogicalAnd, LogicalOperator, LogicalOr, Span, SpanExpression, Unhandled,
};
use crate::ast::statements::{Aggregations, Filter, QueryStatement};

/// Structured field map exported by [`PplNode::tokens`]: nested JSON maps,
/// lists, and strings mirroring the node's semantic fields.
pub type Tokens = Value;

/// Inclusive character-offset range into the original query text.
///
/// `end` is the offset of the span's last character. The `(-1, -1)`
/// sentinel marks a node with no corresponding text: either synthesized by
/// the reverse builder or produced for an unimplemented grammar branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    pub start: isize,
    pub end: isize,
}

impl TextSpan {
    pub const NONE: TextSpan = TextSpan { start: -1, end: -1 };

    pub fn new(start: usize, end: usize) -> Self {
        TextSpan {
            start: start as isize,
            end: end as isize,
        }
    }

    pub fn is_none(&self) -> bool {
        self.start < 0 || self.end < 0
    }

    /// Usable bounds, or `None` for the sentinel.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        if self.is_none() {
            None
        } else {
            Some((self.start as usize, self.end as usize))
        }
    }
}

/// An operand position that holds either plain literal text or a nested
/// expression node. Used for comparison operands, aggregate-function
/// arguments, span literal values, and eval-function arguments.
#[derive(Debug, Clone)]
pub enum Operand {
    Text(String),
    Node(Box<PplNode>),
}

impl Operand {
    pub fn render(&self) -> String {
        match self {
            Operand::Text(text) => text.clone(),
            Operand::Node(node) => node.render(),
        }
    }

    pub fn tokens(&self) -> Tokens {
        match self {
            Operand::Text(text) => Value::String(text.clone()),
            Operand::Node(node) => node.tokens(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Operand::Text(text) => text.is_empty(),
            Operand::Node(_) => false,
        }
    }
}

/// The typed AST node, polymorphic over the closed set of clause and
/// expression variants the builders produce.
///
/// Every variant satisfies the same contract: a stable `kind` tag, a
/// [`TextSpan`], a [`render`](PplNode::render) projection back to canonical
/// PPL text, and a [`tokens`](PplNode::tokens) projection to a structured
/// field map.
#[derive(Debug, Clone)]
pub enum PplNode {
    QueryStatement(QueryStatement),
    Filter(Filter),
    Aggregations(Aggregations),
    AggregateTerm(AggregateTerm),
    AggregateFunction(AggregateFunction),
    GroupBy(GroupBy),
    Span(Span),
    SpanExpression(SpanExpression),
    Field(Field),
    Comparison(ComparisonExpression),
    LogicalAnd(LogicalAnd),
    LogicalOr(LogicalOr),
    LogicalOperator(LogicalOperator),
    EvalFunctionCall(EvalFunctionCall),
    IntervalLiteral(IntervalLiteral),
    Unhandled(Unhandled),
}

impl PplNode {
    /// Stable string tag identifying the clause/expression family.
    pub fn kind(&self) -> &'static str {
        match self {
            PplNode::QueryStatement(_) => "query_statement",
            PplNode::Filter(_) => "where_command",
            PplNode::Aggregations(_) => "stats_command",
            PplNode::AggregateTerm(_) => "stats_agg_term",
            PplNode::AggregateFunction(_) => "stats_function",
            PplNode::GroupBy(_) => "stats_by_clause",
            PplNode::Span(_) => "span",
            PplNode::SpanExpression(_) => "span_clause",
            PplNode::Field(_) => "field_list",
            PplNode::Comparison(_) => "comparison_expression",
            PplNode::LogicalAnd(_) => "logical_and",
            PplNode::LogicalOr(_) => "logical_or",
            PplNode::LogicalOperator(_) => "logical_operator",
            PplNode::EvalFunctionCall(_) => "eval_function_call",
            PplNode::IntervalLiteral(_) => "interval_literal",
            PplNode::Unhandled(_) => "unhandled",
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            PplNode::QueryStatement(node) => node.span,
            PplNode::Filter(node) => node.span,
            PplNode::Aggregations(node) => node.span,
            PplNode::AggregateTerm(node) => node.span,
            PplNode::AggregateFunction(node) => node.span(),
            PplNode::GroupBy(node) => node.span,
            PplNode::Span(node) => node.span,
            PplNode::SpanExpression(node) => node.span,
            PplNode::Field(node) => node.span,
            PplNode::Comparison(node) => node.span,
            PplNode::LogicalAnd(node) => node.span,
            PplNode::LogicalOr(node) => node.span,
            PplNode::LogicalOperator(node) => node.span,
            PplNode::EvalFunctionCall(node) => node.span,
            PplNode::IntervalLiteral(node) => node.span,
            PplNode::Unhandled(node) => node.span,
        }
    }

    /// Canonical PPL text for this subtree, syntactically valid on its own.
    pub fn render(&self) -> String {
        match self {
            PplNode::QueryStatement(node) => node.render(),
            PplNode::Filter(node) => node.render(),
            PplNode::Aggregations(node) => node.render(),
            PplNode::AggregateTerm(node) => node.render(),
            PplNode::AggregateFunction(node) => node.render(),
            PplNode::GroupBy(node) => node.render(),
            PplNode::Span(node) => node.render(),
            PplNode::SpanExpression(node) => node.render(),
            PplNode::Field(node) => node.render(),
            PplNode::Comparison(node) => node.render(),
            PplNode::LogicalAnd(node) => node.render(),
            PplNode::LogicalOr(node) => node.render(),
            PplNode::LogicalOperator(node) => node.render(),
            PplNode::EvalFunctionCall(node) => node.render(),
            PplNode::IntervalLiteral(node) => node.render(),
            PplNode::Unhandled(node) => node.render(),
        }
    }

    /// Structured field map for non-textual consumers.
    pub fn tokens(&self) -> Tokens {
        match self {
            PplNode::QueryStatement(node) => node.tokens(),
            PplNode::Filter(node) => node.tokens(),
            PplNode::Aggregations(node) => node.tokens(),
            PplNode::AggregateTerm(node) => node.tokens(),
            PplNode::AggregateFunction(node) => node.tokens(),
            PplNode::GroupBy(node) => node.tokens(),
            PplNode::Span(node) => node.tokens(),
            PplNode::SpanExpression(node) => node.tokens(),
            PplNode::Field(node) => node.tokens(),
            PplNode::Comparison(node) => node.tokens(),
            PplNode::LogicalAnd(node) => node.tokens(),
            PplNode::LogicalOr(node) => node.tokens(),
            PplNode::LogicalOperator(node) => node.tokens(),
            PplNode::EvalFunctionCall(node) => node.tokens(),
            PplNode::IntervalLiteral(node) => node.tokens(),
            PplNode::Unhandled(node) => node.tokens(),
        }
    }
}
