//! Builder for the `where`/logical-expression family.
//!
//! Resolves a `where` command into ComparisonExpression leaves combined by
//! LogicalAnd/LogicalOr internal nodes, tie-broken by the grammar's own
//! associativity: the left operand is whichever sub-expression appears
//! first among the production's children. `not` produces the unary
//! LogicalOperator form; `xor` and bare boolean expressions stay unhandled,
//! matching the commands the original surface supports.

use crate::ast::{
    ComparisonExpression, EvalFunctionCall, Filter, IntervalLiteral, LogicalAnd, LogicalOperator,
    LogicalOr, Operand, PplNode, Unhandled,
};
use crate::builder::{default_result, rule_name};
use crate::syntax::{Context, Rule};

pub(crate) fn visit_where_command(ctx: &Context) -> PplNode {
    let expression = ctx
        .rules()
        .find(|child| is_logical_rule(child.rule))
        .map(visit_logical_expression)
        .unwrap_or_else(|| default_result(Rule::WhereCommand));
    PplNode::Filter(Filter {
        expression: Box::new(expression),
        span: ctx.span,
    })
}

fn is_logical_rule(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::LogicalAnd
            | Rule::LogicalOr
            | Rule::LogicalXor
            | Rule::LogicalNot
            | Rule::Comparison
            | Rule::BooleanExpression
    )
}

pub(crate) fn visit_logical_expression(ctx: &Context) -> PplNode {
    match ctx.rule {
        Rule::LogicalAnd => {
            let (operator, left, right) = binary_parts(ctx);
            PplNode::LogicalAnd(LogicalAnd {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span: ctx.span,
            })
        }
        Rule::LogicalOr => {
            let (operator, left, right) = binary_parts(ctx);
            PplNode::LogicalOr(LogicalOr {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span: ctx.span,
            })
        }
        Rule::LogicalNot => {
            let operator = ctx
                .tokens()
                .next()
                .map(|token| token.text.clone())
                .unwrap_or_default();
            let operand = ctx
                .rules()
                .next()
                .map(visit_logical_expression)
                .unwrap_or_else(|| default_result(Rule::LogicalNot));
            PplNode::LogicalOperator(LogicalOperator {
                operator,
                operand: Box::new(operand),
                span: ctx.span,
            })
        }
        Rule::Comparison => match ctx.find_rule(Rule::ComparisonExpression) {
            Some(comparison) => visit_comparison_expression(comparison),
            None => default_result(Rule::Comparison),
        },
        // xor and bare boolean expressions have no dedicated node yet
        other => PplNode::Unhandled(Unhandled {
            rule: rule_name(other).to_string(),
            text: ctx.joined_text(),
            span: ctx.span,
        }),
    }
}

/// Operator token plus the two operand sub-expressions, in source order.
fn binary_parts(ctx: &Context) -> (String, PplNode, PplNode) {
    let operator = ctx
        .tokens()
        .next()
        .map(|token| token.text.clone())
        .unwrap_or_default();
    let mut operands = ctx.rules().filter(|child| is_logical_rule(child.rule));
    let left = operands
        .next()
        .map(visit_logical_expression)
        .unwrap_or_else(|| default_result(ctx.rule));
    let right = operands
        .next()
        .map(visit_logical_expression)
        .unwrap_or_else(|| default_result(ctx.rule));
    (operator, left, right)
}

fn visit_comparison_expression(ctx: &Context) -> PplNode {
    let mut values = ctx
        .rules()
        .filter(|child| child.rule == Rule::ValueExpression);
    let left = values
        .next()
        .map(visit_value_expression)
        .unwrap_or_else(|| Operand::Text(String::new()));
    let right = values
        .next()
        .map(visit_value_expression)
        .unwrap_or_else(|| Operand::Text(String::new()));
    let operator = ctx
        .tokens()
        .next()
        .map(|token| token.text.clone())
        .unwrap_or_default();
    PplNode::Comparison(ComparisonExpression {
        left,
        operator,
        right,
        span: ctx.span,
    })
}

/// A value expression collapses to literal text unless one of its
/// alternatives has a dedicated node (eval call, interval literal).
pub(crate) fn visit_value_expression(ctx: &Context) -> Operand {
    let Some(primary) = ctx.find_rule(Rule::PrimaryExpression) else {
        return Operand::Text(ctx.text());
    };
    let Some(child) = primary.rules().next() else {
        return Operand::Text(primary.text());
    };
    match child.rule {
        Rule::LiteralValue => visit_literal_value(child),
        Rule::EvalFunctionCall => Operand::Node(Box::new(visit_eval_function_call(child))),
        _ => Operand::Text(child.text()),
    }
}

pub(crate) fn visit_literal_value(ctx: &Context) -> Operand {
    if let Some(interval) = ctx.find_rule(Rule::IntervalLiteral) {
        return Operand::Node(Box::new(visit_interval_literal(interval)));
    }
    Operand::Text(ctx.text())
}

fn visit_interval_literal(ctx: &Context) -> PplNode {
    // token layout: INTERVAL keyword, value literal, unit
    let mut tokens = ctx.tokens();
    let literal_type = tokens.next().map(|t| t.text.clone()).unwrap_or_default();
    let value = tokens.next().map(|t| t.text.clone()).unwrap_or_default();
    let unit = tokens.next().map(|t| t.text.clone()).unwrap_or_default();
    PplNode::IntervalLiteral(IntervalLiteral {
        literal_type,
        value,
        unit,
        span: ctx.span,
    })
}

fn visit_eval_function_call(ctx: &Context) -> PplNode {
    let name = ctx
        .find_rule(Rule::EvalFunctionName)
        .map(|n| n.text())
        .unwrap_or_default();
    let delimiters: Vec<String> = ctx.tokens().map(|token| token.text.clone()).collect();
    let args: Vec<Operand> = ctx
        .find_rule(Rule::FunctionArgs)
        .map(|function_args| {
            function_args
                .rules()
                .filter(|child| child.rule == Rule::FunctionArg)
                .map(|arg| {
                    arg.find_rule(Rule::ValueExpression)
                        .map(visit_value_expression)
                        .unwrap_or_else(|| Operand::Text(arg.text()))
                })
                .collect()
        })
        .unwrap_or_default();
    PplNode::EvalFunctionCall(EvalFunctionCall {
        name,
        delimiters,
        args,
        span: ctx.span,
    })
}
