// tests/parser_tests.rs
//
// Forward direction: query text -> parse tree -> typed AST.

use ppl_lang::ast::{AggregateFunction, Aggregations, PplNode};
use ppl_lang::{parse, SyntaxError};

fn stats_of(query: &str) -> Aggregations {
    let parsed = parse(query).expect("query should parse");
    parsed.stats().expect("query should have a stats clause").clone()
}

// ============================================================================
// Statement dispatch
// ============================================================================

#[test]
fn test_source_and_commands() {
    let parsed = parse("source=logs | where a = 1 | stats count()").unwrap();
    let PplNode::QueryStatement(query) = parsed.statement() else {
        panic!("expected a query statement");
    };
    assert_eq!(query.commands.len(), 2);
    assert!(matches!(query.commands[0], PplNode::Filter(_)));
    assert!(matches!(query.commands[1], PplNode::Aggregations(_)));
}

#[test]
fn test_unknown_command_becomes_unhandled() {
    let parsed = parse("source=logs | rename a as b").unwrap();
    let PplNode::QueryStatement(query) = parsed.statement() else {
        panic!("expected a query statement");
    };
    let PplNode::Unhandled(unhandled) = &query.commands[0] else {
        panic!("expected an unhandled command");
    };
    assert_eq!(unhandled.rule, "commands");
    assert_eq!(unhandled.text, "rename a as b");
    assert!(!unhandled.span.is_none());
}

#[test]
fn test_empty_input_yields_unhandled_root() {
    let parsed = parse("").unwrap();
    assert_eq!(parsed.statement().kind(), "unhandled");
    assert!(parsed.statement().span().is_none());
}

#[test]
fn test_malformed_query_is_a_hard_error() {
    assert!(matches!(
        parse("source=logs | stats"),
        Err(SyntaxError::UnexpectedEof)
    ));
    assert!(parse("source=logs | stats count() extra").is_err());
}

// ============================================================================
// Stats command
// ============================================================================

#[test]
fn test_count_round_trip_sample() {
    let stats = stats_of("source=logs | stats count() by host");
    assert_eq!(stats.aggregations.len(), 1);
    let term = &stats.aggregations[0];
    let AggregateFunction::Named { name, argument, .. } = &term.function else {
        panic!("expected the named function shape");
    };
    assert_eq!(name, "count");
    assert!(argument.is_none());
    assert!(term.alias.is_none());

    let group_by = stats.group_by.as_ref().unwrap();
    let names: Vec<&str> = group_by
        .fields
        .iter()
        .map(|f| f.expression.as_str())
        .collect();
    assert_eq!(names, ["host"]);
    assert!(group_by.span_clause.is_none());
}

#[test]
fn test_aggregate_function_shapes_are_exclusive() {
    let stats = stats_of(
        "source=logs | stats count(), avg(bytes), percentile<95>(latency), \
         take(name, 5), distinct_count(clientip) by host",
    );
    assert_eq!(stats.aggregations.len(), 5);

    for term in &stats.aggregations {
        let tokens = term.function.tokens();
        let map = tokens.as_object().unwrap();
        // exactly one of the three shapes is populated
        let named = map.contains_key("name");
        let percentile = map.contains_key("percentileForm");
        let take = map.contains_key("takeForm");
        assert_eq!(
            [named, percentile, take].iter().filter(|b| **b).count(),
            1,
            "term {:?} populated more than one shape",
            term
        );
    }

    assert!(matches!(
        &stats.aggregations[0].function,
        AggregateFunction::Named { argument: None, .. }
    ));
    assert!(matches!(
        &stats.aggregations[1].function,
        AggregateFunction::Named {
            argument: Some(_),
            ..
        }
    ));
    assert!(matches!(
        &stats.aggregations[2].function,
        AggregateFunction::Percentile { .. }
    ));
    assert!(matches!(
        &stats.aggregations[3].function,
        AggregateFunction::Take { .. }
    ));
    assert!(matches!(
        &stats.aggregations[4].function,
        AggregateFunction::Named {
            argument: Some(_),
            ..
        }
    ));
}

#[test]
fn test_percentile_and_take_keep_raw_text() {
    let stats = stats_of("source=logs | stats percentile<99>(latency), take(name, 3)");
    let AggregateFunction::Percentile { text, .. } = &stats.aggregations[0].function else {
        panic!("expected percentile shape");
    };
    assert_eq!(text, "percentile<99>(latency)");
    let AggregateFunction::Take { text, .. } = &stats.aggregations[1].function else {
        panic!("expected take shape");
    };
    assert_eq!(text, "take(name,3)");
}

#[test]
fn test_aggregate_alias() {
    let stats = stats_of("source=logs | stats avg(bytes) as avg_bytes");
    assert_eq!(stats.aggregations[0].alias.as_deref(), Some("avg_bytes"));
    assert_eq!(stats.aggregations[0].render(), "avg(bytes) as avg_bytes");
}

#[test]
fn test_stats_arguments() {
    let stats = stats_of(
        "source=logs | stats partitions = 2 allnum = true delim = ',' \
         count() by host dedup_splitvalues = true",
    );
    assert_eq!(stats.partitions.as_ref().unwrap().render(), "partitions = 2");
    assert_eq!(stats.all_num.as_ref().unwrap().render(), "allnum = true");
    assert_eq!(stats.delim.as_ref().unwrap().render(), "delim = ','");
    assert_eq!(
        stats.dedup_split_value.as_ref().unwrap().render(),
        "dedup_splitvalues = true"
    );
    assert_eq!(
        stats.render(),
        "stats partitions = 2 allnum = true delim = ',' count() by host \
         dedup_splitvalues = true"
    );
}

#[test]
fn test_span_grouping_with_alias_and_fields() {
    let stats = stats_of("source=logs | stats count() by span(ts, 1h) as tspan, host, region");
    let group_by = stats.group_by.as_ref().unwrap();
    let span = group_by.span_clause.as_ref().unwrap();
    assert_eq!(span.expression.field, "ts");
    assert_eq!(span.expression.literal.render(), "1");
    assert_eq!(span.expression.time_unit, "h");
    assert_eq!(span.alias.as_deref(), Some("tspan"));
    assert_eq!(group_by.render(), "span(ts, 1h) as tspan, host, region");
}

#[test]
fn test_span_grouping_with_interval_literal() {
    let stats = stats_of("source=logs | stats count() by span(ts, interval 1 day)");
    let group_by = stats.group_by.as_ref().unwrap();
    let span = group_by.span_clause.as_ref().unwrap();
    assert_eq!(span.expression.literal.render(), "interval 1 day");
    assert_eq!(span.render(), "span(ts, interval 1 day)");
}

#[test]
fn test_stats_span_covers_the_whole_clause() {
    let query = "source=logs | stats count() by host";
    let stats = stats_of(query);
    let (start, end) = stats.span.bounds().unwrap();
    let slice: String = query
        .chars()
        .skip(start)
        .take(end - start + 1)
        .collect();
    assert_eq!(slice, "stats count() by host");
}

#[test]
fn test_dotted_field_names() {
    let stats = stats_of("source=logs | stats avg(account.balance) by account.region");
    let AggregateFunction::Named { argument, .. } = &stats.aggregations[0].function else {
        panic!("expected named shape");
    };
    assert_eq!(argument.as_ref().unwrap().render(), "account.balance");
    let group_by = stats.group_by.as_ref().unwrap();
    assert_eq!(group_by.fields[0].expression, "account.region");
}

// ============================================================================
// Where command
// ============================================================================

#[test]
fn test_simple_comparison() {
    let parsed = parse("source=logs | where status = 200").unwrap();
    let filter = parsed.filter().unwrap();
    let PplNode::Comparison(cmp) = filter.expression.as_ref() else {
        panic!("expected a comparison");
    };
    assert_eq!(cmp.left.render(), "status");
    assert_eq!(cmp.operator, "=");
    assert_eq!(cmp.right.render(), "200");
    assert_eq!(filter.render(), "where status = 200");
}

#[test]
fn test_logical_associativity_matches_the_grammar() {
    // and binds tighter than or: (a=1 and b=2) or c=3
    let parsed = parse("source=logs | where a=1 and b=2 or c=3").unwrap();
    let filter = parsed.filter().unwrap();
    let PplNode::LogicalOr(or) = filter.expression.as_ref() else {
        panic!("expected or at the root");
    };
    let PplNode::LogicalAnd(and) = or.left.as_ref() else {
        panic!("expected and on the left");
    };
    assert!(matches!(and.left.as_ref(), PplNode::Comparison(c) if c.left.render() == "a"));
    assert!(matches!(and.right.as_ref(), PplNode::Comparison(c) if c.left.render() == "b"));
    assert!(matches!(or.right.as_ref(), PplNode::Comparison(c) if c.left.render() == "c"));
}

#[test]
fn test_left_associative_chains() {
    // a=1 or b=2 or c=3 -> ((a or b) or c)
    let parsed = parse("source=logs | where a=1 or b=2 or c=3").unwrap();
    let filter = parsed.filter().unwrap();
    let PplNode::LogicalOr(outer) = filter.expression.as_ref() else {
        panic!("expected or at the root");
    };
    assert!(matches!(outer.left.as_ref(), PplNode::LogicalOr(_)));
    assert!(matches!(outer.right.as_ref(), PplNode::Comparison(_)));
}

#[test]
fn test_not_is_the_unary_logical_operator() {
    let parsed = parse("source=logs | where not a = 1 and b = 2").unwrap();
    let filter = parsed.filter().unwrap();
    let PplNode::LogicalAnd(and) = filter.expression.as_ref() else {
        panic!("expected and at the root");
    };
    let PplNode::LogicalOperator(not) = and.left.as_ref() else {
        panic!("expected the unary operator on the left");
    };
    assert_eq!(not.operator, "not");
    assert!(matches!(not.operand.as_ref(), PplNode::Comparison(_)));
    assert_eq!(not.render(), "not a = 1");
}

#[test]
fn test_xor_is_an_unhandled_branch() {
    let parsed = parse("source=logs | where a=1 xor b=2").unwrap();
    let filter = parsed.filter().unwrap();
    let PplNode::Unhandled(unhandled) = filter.expression.as_ref() else {
        panic!("expected an unhandled expression");
    };
    assert_eq!(unhandled.rule, "logical_xor");
}

#[test]
fn test_eval_function_call_arguments() {
    let parsed = parse("source=logs | where date_format(ts, 'yyyy') = '2024'").unwrap();
    let filter = parsed.filter().unwrap();
    let PplNode::Comparison(cmp) = filter.expression.as_ref() else {
        panic!("expected a comparison");
    };
    let ppl_lang::Operand::Node(node) = &cmp.left else {
        panic!("expected a nested node operand");
    };
    let PplNode::EvalFunctionCall(call) = node.as_ref() else {
        panic!("expected an eval function call");
    };
    assert_eq!(call.name, "date_format");
    assert_eq!(call.args.len(), 2);
    assert_eq!(call.args[0].render(), "ts");
    assert_eq!(call.args[1].render(), "'yyyy'");
    assert_eq!(call.render(), "date_format(ts, 'yyyy')");
}

#[test]
fn test_string_literal_case_is_preserved() {
    let upper = parse("source=A | WHERE x = 'MixedCase'").unwrap();
    let lower = parse("source=A | where x = 'MixedCase'").unwrap();
    for parsed in [&upper, &lower] {
        let filter = parsed.filter().unwrap();
        let PplNode::Comparison(cmp) = filter.expression.as_ref() else {
            panic!("expected a comparison");
        };
        assert_eq!(cmp.right.render(), "'MixedCase'");
    }
    // same structure either way
    assert_eq!(
        upper.filter().unwrap().expression.kind(),
        lower.filter().unwrap().expression.kind()
    );
}
