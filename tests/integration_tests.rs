// tests/integration_tests.rs
//
// End-to-end read and write paths, the way an editor UI drives them.

use ppl_lang::{parse, parse_filter_to_tokens, parse_query_to_tokens, rewrite_stats_clause};
use serde_json::json;

// ============================================================================
// Read path: structured token export
// ============================================================================

#[test]
fn test_stats_token_export() {
    let tokens = parse_query_to_tokens("source=logs | stats count() by host").unwrap();
    assert_eq!(tokens["aggregations"].as_array().unwrap().len(), 1);
    assert_eq!(tokens["aggregations"][0]["function"]["name"], "count");
    assert_eq!(tokens["aggregations"][0]["function"]["valueExpression"], "");
    assert_eq!(tokens["aggregations"][0]["alias"], "");
    assert_eq!(tokens["groupBy"]["fields"], json!([{ "name": "host" }]));
    // no span grouping: the key is absent, not null
    assert!(tokens["groupBy"].get("span").is_none());
    assert_eq!(tokens["partitions"], "");
}

#[test]
fn test_stats_token_export_with_span_and_arguments() {
    let tokens = parse_query_to_tokens(
        "source=logs | stats partitions = 2 avg(bytes) as b by span(ts, 1h) as tspan, host",
    )
    .unwrap();
    assert_eq!(tokens["partitions"], "2");
    assert_eq!(tokens["aggregations"][0]["function"]["name"], "avg");
    assert_eq!(
        tokens["aggregations"][0]["function"]["valueExpression"],
        "bytes"
    );
    assert_eq!(tokens["aggregations"][0]["alias"], "b");
    assert_eq!(
        tokens["groupBy"]["span"],
        json!({ "field": "ts", "interval": "1", "unit": "h", "alias": "tspan" })
    );
}

#[test]
fn test_where_token_export() {
    let tokens = parse_filter_to_tokens("source=logs | where a = 1 and b = 2").unwrap();
    assert_eq!(tokens["logicalExpression"]["operator"], "and");
    assert_eq!(
        tokens["logicalExpression"]["left"],
        json!({ "left": "a", "operator": "=", "right": "1" })
    );
}

#[test]
fn test_read_path_tolerates_parse_failure() {
    assert!(parse_query_to_tokens("source=logs | stats #").is_none());
    assert!(parse_filter_to_tokens("source=logs | where").is_none());
    assert!(parse_query_to_tokens("").is_none());
}

#[test]
fn test_read_path_absent_clause_is_none_not_error() {
    // recognized query, no stats clause
    assert!(parse_query_to_tokens("source=logs | where a = 1").is_none());
    // unsupported command, still a clean parse
    assert!(parse_query_to_tokens("source=logs | rename a as b").is_none());
    assert!(parse_filter_to_tokens("source=logs | rename a as b").is_none());
}

// ============================================================================
// Case behavior end to end
// ============================================================================

#[test]
fn test_keyword_case_does_not_change_the_ast() {
    let upper = parse_query_to_tokens("source=logs | STATS COUNT() BY host").unwrap();
    let lower = parse_query_to_tokens("source=logs | stats count() by host").unwrap();
    assert_eq!(upper["groupBy"], lower["groupBy"]);
    assert_eq!(
        upper["aggregations"][0]["function"]["name"]
            .as_str()
            .unwrap()
            .to_ascii_lowercase(),
        lower["aggregations"][0]["function"]["name"]
    );
}

#[test]
fn test_literal_case_survives_the_read_path() {
    for query in [
        "source=A | WHERE x = 'MixedCase'",
        "source=A | where x = 'MixedCase'",
    ] {
        let tokens = parse_filter_to_tokens(query).unwrap();
        assert_eq!(tokens["logicalExpression"]["right"], "'MixedCase'");
    }
}

// ============================================================================
// Write path driven from config JSON
// ============================================================================

#[test]
fn test_rewrite_from_camel_case_config_json() {
    let config_json = r#"{
        "aggregations": [
            { "function": { "name": "avg", "valueExpression": "bytes" }, "alias": "b" }
        ],
        "groupBy": {
            "fields": [{ "name": "host" }],
            "span": { "field": "ts", "interval": "1", "unit": "h" }
        },
        "partitions": "2",
        "dedupSplitValue": { "keyword": "dedup_splitvalues", "sign": "=", "value": "true" }
    }"#;
    let config: ppl_lang::StatsConfig = serde_json::from_str(config_json).unwrap();
    let rewritten =
        rewrite_stats_clause("source=logs | stats count() | fields host", &config).unwrap();
    assert_eq!(
        rewritten,
        "source=logs | stats partitions = 2 avg(bytes) as b by span(ts, 1h), host \
         dedup_splitvalues = true | fields host"
    );
}

#[test]
fn test_rewritten_query_parses_back_to_the_same_config_shape() {
    let config: ppl_lang::StatsConfig = serde_json::from_str(
        r#"{
            "aggregations": [{ "function": { "name": "max", "valueExpression": "latency" } }],
            "groupBy": { "fields": [{ "name": "region" }] }
        }"#,
    )
    .unwrap();
    let rewritten = rewrite_stats_clause("source=logs", &config).unwrap();
    assert_eq!(rewritten, "source=logs | stats max(latency) by region");

    let tokens = parse_query_to_tokens(&rewritten).unwrap();
    assert_eq!(tokens["aggregations"][0]["function"]["name"], "max");
    assert_eq!(
        tokens["aggregations"][0]["function"]["valueExpression"],
        "latency"
    );
    assert_eq!(tokens["groupBy"]["fields"], json!([{ "name": "region" }]));
}

#[test]
fn test_statement_render_is_reparseable() {
    let parsed = parse("source=logs | WHERE a = 1 | STATS COUNT() BY host").unwrap();
    let rendered = parsed.statement().render();
    // rendering normalizes but must stay semantically equivalent
    let reparsed = parse(&rendered).unwrap();
    assert!(reparsed.stats().is_some());
    assert!(reparsed.filter().is_some());
}
