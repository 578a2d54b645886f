use serde_json::{Map, Value, json};

use crate::ast::node::{Operand, PplNode, TextSpan, Tokens};

/// One aggregate term of a `stats` command: a function plus an optional
/// `as` alias.
#[derive(Debug, Clone)]
pub struct AggregateTerm {
    pub function: AggregateFunction,
    pub alias: Option<String>,
    pub span: TextSpan,
}

impl AggregateTerm {
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {}", self.function.render(), alias),
            None => self.function.render(),
        }
    }

    pub fn tokens(&self) -> Tokens {
        json!({
            "function": self.function.tokens(),
            "alias": self.alias.clone().unwrap_or_default(),
        })
    }
}

/// An aggregate function in one of its three mutually exclusive shapes.
///
/// The zero-argument `count()` form is a [`AggregateFunction::Named`] with
/// no argument; the percentile and take forms keep their raw production
/// text, the way the forward builder reads them.
#[derive(Debug, Clone)]
pub enum AggregateFunction {
    Named {
        name: String,
        argument: Option<Operand>,
        span: TextSpan,
    },
    Percentile {
        text: String,
        span: TextSpan,
    },
    Take {
        text: String,
        span: TextSpan,
    },
}

impl AggregateFunction {
    pub fn span(&self) -> TextSpan {
        match self {
            AggregateFunction::Named { span, .. } => *span,
            AggregateFunction::Percentile { span, .. } => *span,
            AggregateFunction::Take { span, .. } => *span,
        }
    }

    pub fn render(&self) -> String {
        match self {
            AggregateFunction::Named { name, argument, .. } => {
                let arg = argument.as_ref().map(|a| a.render()).unwrap_or_default();
                format!("{}({})", name, arg)
            }
            AggregateFunction::Percentile { text, .. } => text.clone(),
            AggregateFunction::Take { text, .. } => text.clone(),
        }
    }

    pub fn tokens(&self) -> Tokens {
        match self {
            AggregateFunction::Named { name, argument, .. } => json!({
                "name": name,
                "valueExpression": argument.as_ref().map(|a| a.render()).unwrap_or_default(),
            }),
            AggregateFunction::Percentile { text, .. } => json!({
                "percentileForm": text,
            }),
            AggregateFunction::Take { text, .. } => json!({
                "takeForm": text,
            }),
        }
    }
}

/// The `by` clause of a `stats` command: an ordered field list plus an
/// optional span grouping.
#[derive(Debug, Clone)]
pub struct GroupBy {
    pub fields: Vec<Field>,
    pub span_clause: Option<Span>,
    pub span: TextSpan,
}

impl GroupBy {
    pub fn render(&self) -> String {
        let mut items = Vec::new();
        if let Some(span_clause) = &self.span_clause {
            items.push(span_clause.render());
        }
        for field in &self.fields {
            items.push(field.render());
        }
        items.join(", ")
    }

    pub fn tokens(&self) -> Tokens {
        let mut map = Map::new();
        map.insert(
            "fields".into(),
            Value::Array(self.fields.iter().map(|field| field.tokens()).collect()),
        );
        if let Some(span_clause) = &self.span_clause {
            map.insert("span".into(), span_clause.tokens());
        }
        Value::Object(map)
    }
}

/// A `span(...)` grouping with its optional alias.
#[derive(Debug, Clone)]
pub struct Span {
    pub expression: SpanExpression,
    pub alias: Option<String>,
    pub span: TextSpan,
}

impl Span {
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {}", self.expression.render(), alias),
            None => self.expression.render(),
        }
    }

    /// Flat map matching the structured-configuration span shape.
    pub fn tokens(&self) -> Tokens {
        json!({
            "field": self.expression.field,
            "interval": self.expression.literal.render(),
            "unit": self.expression.time_unit,
            "alias": self.alias.clone().unwrap_or_default(),
        })
    }
}

/// The `span(field, interval unit)` core of a span grouping.
#[derive(Debug, Clone)]
pub struct SpanExpression {
    pub field: String,
    pub literal: Operand,
    pub time_unit: String,
    pub span: TextSpan,
}

impl SpanExpression {
    pub fn render(&self) -> String {
        format!(
            "span({}, {}{})",
            self.field,
            self.literal.render(),
            self.time_unit
        )
    }

    pub fn tokens(&self) -> Tokens {
        json!({
            "field": self.field,
            "interval": self.literal.render(),
            "unit": self.time_unit,
        })
    }
}

/// A single group-by field, kept as its raw field-expression text.
#[derive(Debug, Clone)]
pub struct Field {
    pub expression: String,
    pub span: TextSpan,
}

impl Field {
    pub fn render(&self) -> String {
        self.expression.clone()
    }

    pub fn tokens(&self) -> Tokens {
        json!({ "name": self.expression })
    }
}

/// `left <operator> right` comparison; operands are literal text or nested
/// expression nodes.
#[derive(Debug, Clone)]
pub struct ComparisonExpression {
    pub left: Operand,
    pub operator: String,
    pub right: Operand,
    pub span: TextSpan,
}

impl ComparisonExpression {
    pub fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.left.render(),
            self.operator,
            self.right.render()
        )
    }

    pub fn tokens(&self) -> Tokens {
        json!({
            "left": self.left.tokens(),
            "operator": self.operator,
            "right": self.right.tokens(),
        })
    }
}

/// Two-operand `and` node. The operator text keeps the user's casing.
#[derive(Debug, Clone)]
pub struct LogicalAnd {
    pub operator: String,
    pub left: Box<PplNode>,
    pub right: Box<PplNode>,
    pub span: TextSpan,
}

impl LogicalAnd {
    pub fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.left.render(),
            self.operator,
            self.right.render()
        )
    }

    pub fn tokens(&self) -> Tokens {
        json!({
            "operator": self.operator,
            "left": self.left.tokens(),
            "right": self.right.tokens(),
        })
    }
}

/// Two-operand `or` node.
#[derive(Debug, Clone)]
pub struct LogicalOr {
    pub operator: String,
    pub left: Box<PplNode>,
    pub right: Box<PplNode>,
    pub span: TextSpan,
}

impl LogicalOr {
    pub fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.left.render(),
            self.operator,
            self.right.render()
        )
    }

    pub fn tokens(&self) -> Tokens {
        json!({
            "operator": self.operator,
            "left": self.left.tokens(),
            "right": self.right.tokens(),
        })
    }
}

/// Single-operand prefixed logical form, e.g. `not <expr>`.
#[derive(Debug, Clone)]
pub struct LogicalOperator {
    pub operator: String,
    pub operand: Box<PplNode>,
    pub span: TextSpan,
}

impl LogicalOperator {
    pub fn render(&self) -> String {
        format!("{} {}", self.operator, self.operand.render())
    }

    pub fn tokens(&self) -> Tokens {
        json!({
            "operator": self.operator,
            "operand": self.operand.tokens(),
        })
    }
}

/// An evaluation-function call used inside comparisons,
/// e.g. `abs(offset)` or `date_format(ts, 'yyyy')`.
#[derive(Debug, Clone)]
pub struct EvalFunctionCall {
    pub name: String,
    /// The delimiter tokens of the call as parsed: `(`, `,`, `)`
    pub delimiters: Vec<String>,
    pub args: Vec<Operand>,
    pub span: TextSpan,
}

impl EvalFunctionCall {
    pub fn render(&self) -> String {
        let args: Vec<String> = self.args.iter().map(|arg| arg.render()).collect();
        format!("{}({})", self.name, args.join(", "))
    }

    pub fn tokens(&self) -> Tokens {
        json!({
            "name": self.name,
            "args": self.args.iter().map(|arg| arg.tokens()).collect::<Vec<_>>(),
        })
    }
}

/// `interval <value> <unit>` literal.
#[derive(Debug, Clone)]
pub struct IntervalLiteral {
    pub literal_type: String,
    pub value: String,
    pub unit: String,
    pub span: TextSpan,
}

impl IntervalLiteral {
    pub fn render(&self) -> String {
        format!("{} {} {}", self.literal_type, self.value, self.unit)
    }

    pub fn tokens(&self) -> Tokens {
        json!({
            "literalType": self.literal_type,
            "value": self.value,
            "unit": self.unit,
        })
    }
}

/// Sentinel for grammar branches with no dedicated builder. Carries the
/// production name it came from so unsupported constructs stay diagnosable,
/// plus the raw text when the branch covered real input.
#[derive(Debug, Clone)]
pub struct Unhandled {
    pub rule: String,
    pub text: String,
    pub span: TextSpan,
}

impl Unhandled {
    pub fn render(&self) -> String {
        self.text.clone()
    }

    pub fn tokens(&self) -> Tokens {
        json!({ "rule": self.rule })
    }
}
