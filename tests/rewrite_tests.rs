// tests/rewrite_tests.rs
//
// Reverse direction and the rewrite engine: config -> AST -> spliced text.

use ppl_lang::config::{
    AggregationConfig, FieldConfig, FlagConfig, FunctionConfig, GroupByConfig, SpanConfig,
    StatsConfig,
};
use ppl_lang::{RewriteError, build_stats, rewrite_stats_clause};

fn avg_by_host_config() -> StatsConfig {
    StatsConfig {
        aggregations: vec![AggregationConfig {
            function: FunctionConfig {
                name: "avg".into(),
                value_expression: "bytes".into(),
                percentile_form: None,
            },
            alias: Some("avg_bytes".into()),
        }],
        group_by: GroupByConfig {
            fields: vec![FieldConfig {
                name: "host".into(),
            }],
            span: None,
        },
        ..StatsConfig::default()
    }
}

// ============================================================================
// Reverse builder
// ============================================================================

#[test]
fn test_reverse_build_is_idempotent() {
    let config = avg_by_host_config();
    let first = build_stats(&config).render();
    let second = build_stats(&config).render();
    assert_eq!(first, second);
    assert_eq!(first, "stats avg(bytes) as avg_bytes by host");
}

#[test]
fn test_reverse_build_has_sentinel_spans() {
    let stats = build_stats(&avg_by_host_config());
    assert!(stats.span.is_none());
    assert!(stats.aggregations[0].span.is_none());
    assert!(stats.group_by.as_ref().unwrap().span.is_none());
}

#[test]
fn test_count_with_empty_expression_renders_zero_argument_form() {
    let config = StatsConfig {
        aggregations: vec![AggregationConfig {
            function: FunctionConfig {
                name: "count".into(),
                value_expression: String::new(),
                percentile_form: None,
            },
            alias: None,
        }],
        ..StatsConfig::default()
    };
    assert_eq!(build_stats(&config).render(), "stats count()");
}

#[test]
fn test_percentile_form_takes_precedence() {
    let config = StatsConfig {
        aggregations: vec![AggregationConfig {
            function: FunctionConfig {
                name: "percentile".into(),
                value_expression: "latency".into(),
                percentile_form: Some("percentile<95>(latency)".into()),
            },
            alias: None,
        }],
        ..StatsConfig::default()
    };
    assert_eq!(build_stats(&config).render(), "stats percentile<95>(latency)");
}

#[test]
fn test_span_and_arguments_render() {
    let config = StatsConfig {
        aggregations: vec![AggregationConfig {
            function: FunctionConfig {
                name: "count".into(),
                value_expression: String::new(),
                percentile_form: None,
            },
            alias: None,
        }],
        group_by: GroupByConfig {
            fields: vec![FieldConfig {
                name: "host".into(),
            }],
            span: Some(SpanConfig {
                field: "ts".into(),
                interval: "1".into(),
                unit: "h".into(),
                alias: Some("tspan".into()),
            }),
        },
        partitions: Some("2".into()),
        dedup_split_value: Some(FlagConfig {
            keyword: "dedup_splitvalues".into(),
            sign: "=".into(),
            value: "true".into(),
        }),
        ..StatsConfig::default()
    };
    assert_eq!(
        build_stats(&config).render(),
        "stats partitions = 2 count() by span(ts, 1h) as tspan, host \
         dedup_splitvalues = true"
    );
}

#[test]
fn test_irregular_field_names_are_backtick_quoted() {
    let config = StatsConfig {
        aggregations: vec![AggregationConfig {
            function: FunctionConfig {
                name: "count".into(),
                value_expression: String::new(),
                percentile_form: None,
            },
            alias: None,
        }],
        group_by: GroupByConfig {
            fields: vec![
                FieldConfig {
                    name: "two words".into(),
                },
                FieldConfig {
                    name: "account.region".into(),
                },
            ],
            span: None,
        },
        ..StatsConfig::default()
    };
    assert_eq!(
        build_stats(&config).render(),
        "stats count() by `two words`, account.region"
    );
}

// ============================================================================
// Splice and append
// ============================================================================

#[test]
fn test_splice_locality() {
    let original = "source=logs | stats count() by host | fields host";
    let config = avg_by_host_config();
    let rendered = build_stats(&config).render();
    let rewritten = rewrite_stats_clause(original, &config).unwrap();

    // every byte outside the clause span is untouched
    let start = original.find("stats").unwrap();
    let end = original.find(" | fields").unwrap();
    let expected = format!(
        "{}{}{}",
        &original[..start],
        rendered,
        &original[end..]
    );
    assert_eq!(rewritten, expected);
    assert_eq!(
        rewritten,
        "source=logs | stats avg(bytes) as avg_bytes by host | fields host"
    );
}

#[test]
fn test_splice_preserves_surrounding_formatting() {
    // unusual spacing outside the clause must survive
    let original = "source = logs   | stats count() by host";
    let rewritten = rewrite_stats_clause(original, &avg_by_host_config()).unwrap();
    assert_eq!(
        rewritten,
        "source = logs   | stats avg(bytes) as avg_bytes by host"
    );
}

#[test]
fn test_append_when_no_stats_clause() {
    let original = "source=logs | where a = 1";
    let rewritten = rewrite_stats_clause(original, &avg_by_host_config()).unwrap();
    assert_eq!(
        rewritten,
        "source=logs | where a = 1 | stats avg(bytes) as avg_bytes by host"
    );
}

#[test]
fn test_append_to_bare_source() {
    let rewritten = rewrite_stats_clause("source=logs", &avg_by_host_config()).unwrap();
    assert_eq!(
        rewritten,
        "source=logs | stats avg(bytes) as avg_bytes by host"
    );
}

#[test]
fn test_rewrite_of_malformed_text_propagates() {
    let err = rewrite_stats_clause("source=logs | stats", &avg_by_host_config()).unwrap_err();
    assert!(matches!(err, RewriteError::Syntax(_)));
}

#[test]
fn test_rewrite_replaces_only_the_first_stats_clause() {
    let original = "source=logs | stats count() | stats avg(a)";
    let rewritten = rewrite_stats_clause(original, &avg_by_host_config()).unwrap();
    assert_eq!(
        rewritten,
        "source=logs | stats avg(bytes) as avg_bytes by host | stats avg(a)"
    );
}
