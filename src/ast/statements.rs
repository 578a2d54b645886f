use serde_json::{Map, Value, json};

use crate::ast::expressions::{AggregateTerm, GroupBy};
use crate::ast::node::{PplNode, TextSpan, Tokens};

/// Root of a parsed query: the leading source/search segment (kept as raw
/// text) plus one node per piped command.
#[derive(Debug, Clone)]
pub struct QueryStatement {
    /// The text of the leading source command, e.g. `source=logs`
    pub source: String,

    /// One node per `|`-separated command, in pipeline order
    pub commands: Vec<PplNode>,

    pub span: TextSpan,
}

impl QueryStatement {
    pub fn render(&self) -> String {
        if self.commands.is_empty() {
            return self.source.clone();
        }
        let commands: Vec<String> = self.commands.iter().map(|cmd| cmd.render()).collect();
        format!("{} | {}", self.source, commands.join(" | "))
    }

    pub fn tokens(&self) -> Tokens {
        let commands: Vec<Value> = self
            .commands
            .iter()
            .map(|cmd| {
                json!({
                    "kind": cmd.kind(),
                    "tokens": cmd.tokens(),
                })
            })
            .collect();
        json!({
            "source": self.source,
            "commands": commands,
        })
    }
}

/// A `where` command carrying one logical expression.
#[derive(Debug, Clone)]
pub struct Filter {
    pub expression: Box<PplNode>,
    pub span: TextSpan,
}

impl Filter {
    pub fn render(&self) -> String {
        format!("where {}", self.expression.render())
    }

    pub fn tokens(&self) -> Tokens {
        json!({
            "logicalExpression": self.expression.tokens(),
        })
    }
}

/// One `<keyword> = <value>` argument of a `stats` command
/// (`partitions`, `allnum`, `delim`, `dedup_splitvalues`).
#[derive(Debug, Clone)]
pub struct StatsFlag {
    pub keyword: String,
    pub sign: String,
    pub value: String,
}

impl StatsFlag {
    pub fn render(&self) -> String {
        format!("{} {} {}", self.keyword, self.sign, self.value)
    }

    pub fn tokens(&self) -> Tokens {
        json!({
            "keyword": self.keyword,
            "sign": self.sign,
            "value": self.value,
        })
    }
}

/// A `stats` command: optional flags, ordered aggregate terms, and an
/// optional group-by clause.
#[derive(Debug, Clone)]
pub struct Aggregations {
    pub partitions: Option<StatsFlag>,
    pub all_num: Option<StatsFlag>,
    pub delim: Option<StatsFlag>,
    pub aggregations: Vec<AggregateTerm>,
    pub group_by: Option<GroupBy>,
    pub dedup_split_value: Option<StatsFlag>,
    pub span: TextSpan,
}

impl Aggregations {
    pub fn render(&self) -> String {
        let mut parts = vec!["stats".to_string()];
        for flag in [&self.partitions, &self.all_num, &self.delim]
            .into_iter()
            .flatten()
        {
            parts.push(flag.render());
        }
        let terms: Vec<String> = self.aggregations.iter().map(|term| term.render()).collect();
        if !terms.is_empty() {
            parts.push(terms.join(", "));
        }
        if let Some(group_by) = &self.group_by {
            let rendered = group_by.render();
            if !rendered.is_empty() {
                parts.push(format!("by {}", rendered));
            }
        }
        if let Some(flag) = &self.dedup_split_value {
            parts.push(flag.render());
        }
        parts.join(" ")
    }

    pub fn tokens(&self) -> Tokens {
        let mut map = Map::new();
        map.insert(
            "partitions".into(),
            Value::String(flag_value(&self.partitions)),
        );
        map.insert("allNum".into(), Value::String(flag_value(&self.all_num)));
        map.insert("delim".into(), Value::String(flag_value(&self.delim)));
        map.insert(
            "aggregations".into(),
            Value::Array(self.aggregations.iter().map(|term| term.tokens()).collect()),
        );
        map.insert(
            "groupBy".into(),
            match &self.group_by {
                Some(group_by) => group_by.tokens(),
                None => json!({ "fields": [] }),
            },
        );
        if let Some(flag) = &self.dedup_split_value {
            map.insert("dedupSplitValue".into(), flag.tokens());
        }
        Value::Object(map)
    }
}

fn flag_value(flag: &Option<StatsFlag>) -> String {
    flag.as_ref().map(|f| f.value.clone()).unwrap_or_default()
}
