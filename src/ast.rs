//! # PPL Abstract Syntax Tree
//!
//! This module defines the typed AST for the supported PPL clause families,
//! distinct from the raw parse tree the [`crate::syntax`] layer produces.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[node]** - The [`PplNode`] tagged union, spans, and the token export
//! - **[statements]** - Command-level nodes (query statement, `where`, `stats`)
//! - **[expressions]** - Expression-level nodes (aggregate terms, group-by,
//!   span clauses, logical/comparison trees, literals)
//!
//! ## Core Concepts
//!
//! ### Spans
//!
//! Every node parsed from text carries a [`TextSpan`]: the inclusive
//! character-offset range it was read from. Slicing that range out of the
//! original query yields a complete instance of the node's production.
//! Nodes synthesized from structured configuration carry the
//! [`TextSpan::NONE`] sentinel instead.
//!
//! ### Rendering and token export
//!
//! Each node offers two independent projections:
//!
//! - [`PplNode::render`] - canonical PPL text for the subtree, valid on its
//!   own. Not guaranteed byte-identical to the original slice (casing and
//!   whitespace may normalize) but semantically equivalent when re-parsed.
//! - [`PplNode::tokens`] - a structured field map (nested maps, lists,
//!   strings) describing the node for non-textual consumers such as UI
//!   forms. Absent optional features are omitted or empty, never null.
//!
//! ### Immutability
//!
//! Nodes are value objects: built once by a builder, never mutated. Every
//! edit produces a fresh AST and a fresh query string.
//!
//! ## Example
//!
//! ```text
//! source=logs | stats count() by host
//! ```
//!
//! parses to a query statement whose single command is an
//! [`statements::Aggregations`] node: one aggregate term (`count`, no value
//! expression) grouped by the field `host`.
pub mod expressions;
pub mod node;
pub mod statements;

pub use expressions::{
    AggregateFunction, AggregateTerm, ComparisonExpression, EvalFunctionCall, Field, GroupBy,
    IntervalLiteral, LogicalAnd, LogicalOperator, LogicalOr, Span, SpanExpression, Unhandled,
};
pub use node::{Operand, PplNode, TextSpan, Tokens};
pub use statements::{Aggregations, Filter, QueryStatement, StatsFlag};
