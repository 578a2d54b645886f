//! CLI support for ppl-lang
//!
//! Provides programmatic access to the ppl CLI functionality for embedding
//! in other tools.

use std::io;

use crate::config::StatsConfig;
use crate::rewrite::{self, RewriteError};
use crate::syntax::SyntaxError;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Syntax error in the query
    Syntax(SyntaxError),
    /// Rewrite error
    Rewrite(RewriteError),
    /// Config JSON error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No config provided
    NoConfig,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Syntax(e) => write!(f, "Syntax error: {}", e),
            CliError::Rewrite(e) => write!(f, "Rewrite error: {}", e),
            CliError::Json(e) => write!(f, "Invalid config JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoConfig => {
                write!(f, "No config provided. Use --config or pipe JSON to stdin.")
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Syntax(e) => Some(e),
            CliError::Rewrite(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::NoConfig => None,
        }
    }
}

/// Which clause of the query the token export reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Stats,
    Where,
}

/// Validate query syntax.
pub fn execute_check(query: &str) -> Result<(), CliError> {
    rewrite::parse(query).map(|_| ()).map_err(CliError::Syntax)
}

/// Read path: the clause's structured token map as a JSON string, or `None`
/// when the query does not parse or has no such clause.
pub fn execute_tokens(
    query: &str,
    clause: Clause,
    pretty: bool,
) -> Result<Option<String>, CliError> {
    let tokens = match clause {
        Clause::Stats => rewrite::parse_query_to_tokens(query),
        Clause::Where => rewrite::parse_filter_to_tokens(query),
    };
    match tokens {
        None => Ok(None),
        Some(value) => {
            let json = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            }
            .map_err(CliError::Json)?;
            Ok(Some(json))
        }
    }
}

/// Write path: rewrite the query's stats clause from a JSON configuration.
pub fn execute_rewrite(query: &str, config_json: &str) -> Result<String, CliError> {
    let config: StatsConfig = serde_json::from_str(config_json).map_err(CliError::Json)?;
    rewrite::rewrite_stats_clause(query, &config).map_err(CliError::Rewrite)
}
