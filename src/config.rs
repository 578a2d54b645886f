//! Structured configuration for the reverse builder.
//!
//! This is the shape an aggregation-settings form produces: a list of
//! aggregation triples, group-by settings, and the optional `stats`
//! arguments carried over from a previously parsed query. Field names are
//! camelCase on the wire so the JSON matches the UI payload directly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsConfig {
    #[serde(default)]
    pub aggregations: Vec<AggregationConfig>,

    #[serde(default)]
    pub group_by: GroupByConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_num: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delim: Option<String>,

    /// Carried-over `dedup_splitvalues` argument, kept as the exact
    /// keyword/sign/value triple read from the previous query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedup_split_value: Option<FlagConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationConfig {
    #[serde(default)]
    pub function: FunctionConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// One aggregate function. `count` with an empty value expression renders
/// as the zero-argument form; a populated `percentileForm` takes precedence
/// over the named form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub value_expression: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile_form: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupByConfig {
    #[serde(default)]
    pub fields: Vec<FieldConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<SpanConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanConfig {
    #[serde(default)]
    pub field: String,

    #[serde(default)]
    pub interval: String,

    #[serde(default)]
    pub unit: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// A `<keyword> <sign> <value>` argument triple.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagConfig {
    #[serde(default)]
    pub keyword: String,

    #[serde(default)]
    pub sign: String,

    #[serde(default)]
    pub value: String,
}
