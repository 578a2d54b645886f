//! Builder for the `stats` command family.
//!
//! Resolves, for a single command: the optional `<keyword> = <value>`
//! arguments, the ordered aggregate-term list (each term in exactly one of
//! its function shapes), and the optional `by` clause with its field list
//! and span grouping. Every node's span comes from the first and last token
//! of its production.

use crate::ast::{
    AggregateFunction, AggregateTerm, Aggregations, Field, GroupBy, Operand, PplNode, Span,
    SpanExpression, StatsFlag, TextSpan,
};
use crate::builder::logical;
use crate::syntax::lexer::Keyword;
use crate::syntax::{Context, Rule, Tree};

pub(crate) fn visit_stats_command(ctx: &Context) -> PplNode {
    let mut partitions = None;
    let mut all_num = None;
    let mut delim = None;
    let mut dedup_split_value = None;
    let mut aggregations = Vec::new();
    let mut group_by = None;

    let mut index = 0;
    while index < ctx.children.len() {
        match &ctx.children[index] {
            Tree::Token(token) => {
                if let Some(kw) = token.keyword() {
                    if is_flag_keyword(kw) {
                        // keyword, sign, value are consecutive children
                        let flag = StatsFlag {
                            keyword: token.text.clone(),
                            sign: child_text(ctx, index + 1),
                            value: child_text(ctx, index + 2),
                        };
                        match kw {
                            Keyword::Partitions => partitions = Some(flag),
                            Keyword::Allnum => all_num = Some(flag),
                            Keyword::Delim => delim = Some(flag),
                            _ => dedup_split_value = Some(flag),
                        }
                        index += 3;
                        continue;
                    }
                }
            }
            Tree::Rule(child) => match child.rule {
                Rule::StatsAggTerm => aggregations.push(visit_stats_agg_term(child)),
                Rule::StatsByClause => group_by = Some(visit_stats_by_clause(child)),
                _ => {}
            },
        }
        index += 1;
    }

    PplNode::Aggregations(Aggregations {
        partitions,
        all_num,
        delim,
        aggregations,
        group_by,
        dedup_split_value,
        span: ctx.span,
    })
}

fn is_flag_keyword(kw: Keyword) -> bool {
    matches!(
        kw,
        Keyword::Partitions | Keyword::Allnum | Keyword::Delim | Keyword::DedupSplitvalues
    )
}

fn child_text(ctx: &Context, index: usize) -> String {
    match ctx.children.get(index) {
        Some(Tree::Token(token)) => token.text.clone(),
        _ => String::new(),
    }
}

fn visit_stats_agg_term(ctx: &Context) -> AggregateTerm {
    let function = match ctx.find_rule(Rule::StatsFunction) {
        Some(function) => visit_stats_function(function),
        None => AggregateFunction::Named {
            name: String::new(),
            argument: None,
            span: TextSpan::NONE,
        },
    };
    let alias = ctx
        .find_rule(Rule::WcFieldExpression)
        .map(|field| field.text());
    AggregateTerm {
        function,
        alias,
        span: ctx.span,
    }
}

fn visit_stats_function(ctx: &Context) -> AggregateFunction {
    if let Some(percentile) = ctx.find_rule(Rule::PercentileAggFunction) {
        return AggregateFunction::Percentile {
            text: percentile.text(),
            span: percentile.span,
        };
    }
    if let Some(take) = ctx.find_rule(Rule::TakeAggFunctionCall) {
        return AggregateFunction::Take {
            text: take.text(),
            span: take.span,
        };
    }
    // Plain named form: the name is either a dedicated name production or
    // the count/distinct_count/dc keyword token.
    let mut name = ctx
        .find_rule(Rule::StatsFunctionName)
        .map(|n| n.text())
        .unwrap_or_default();
    if name.is_empty() {
        for token in ctx.tokens() {
            if matches!(
                token.keyword(),
                Some(Keyword::Count | Keyword::DistinctCount | Keyword::Dc)
            ) {
                name = token.text.clone();
                break;
            }
        }
    }
    let argument: Option<Operand> = ctx
        .find_rule(Rule::ValueExpression)
        .map(logical::visit_value_expression);
    AggregateFunction::Named {
        name,
        argument,
        span: ctx.span,
    }
}

fn visit_stats_by_clause(ctx: &Context) -> GroupBy {
    let fields: Vec<Field> = ctx
        .find_rule(Rule::FieldList)
        .map(|list| {
            list.rules()
                .filter(|child| child.rule == Rule::FieldExpression)
                .map(|field| Field {
                    expression: field.text(),
                    span: field.span,
                })
                .collect()
        })
        .unwrap_or_default();
    let span_clause = ctx.find_rule(Rule::BySpanClause).map(visit_by_span_clause);
    GroupBy {
        fields,
        span_clause,
        span: ctx.span,
    }
}

fn visit_by_span_clause(ctx: &Context) -> Span {
    let expression = match ctx.find_rule(Rule::SpanClause) {
        Some(span_clause) => visit_span_clause(span_clause),
        None => SpanExpression {
            field: String::new(),
            literal: Operand::Text(String::new()),
            time_unit: String::new(),
            span: TextSpan::NONE,
        },
    };
    let alias = ctx.find_rule(Rule::QualifiedName).map(|name| name.text());
    Span {
        expression,
        alias,
        span: ctx.span,
    }
}

fn visit_span_clause(ctx: &Context) -> SpanExpression {
    let field = ctx
        .find_rule(Rule::FieldExpression)
        .map(|f| f.text())
        .unwrap_or_default();
    let literal = ctx
        .find_rule(Rule::LiteralValue)
        .map(logical::visit_literal_value)
        .unwrap_or_else(|| Operand::Text(String::new()));
    let time_unit = ctx
        .find_rule(Rule::TimespanUnit)
        .map(|unit| unit.text())
        .unwrap_or_default();
    SpanExpression {
        field,
        literal,
        time_unit,
        span: ctx.span,
    }
}
