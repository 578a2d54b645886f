pub mod ast;
pub mod builder;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod rewrite;
pub mod syntax;

pub use ast::{Operand, PplNode, TextSpan, Tokens};
pub use builder::build_query;
pub use builder::reverse::build_stats;
pub use config::StatsConfig;
pub use rewrite::{
    ParsedQuery, RewriteError, parse, parse_filter_to_tokens, parse_query_to_tokens,
    rewrite_stats_clause,
};
pub use syntax::{Lexer, SyntaxError};
