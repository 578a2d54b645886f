//! Query rewrite engine.
//!
//! The write path re-renders a `stats` clause from structured configuration
//! and splices it back into the *original* query text at the clause's span,
//! leaving every character the user did not touch byte-for-byte unchanged.
//! When no clause exists, the rendered replacement is appended as a new
//! final pipe segment instead.
//!
//! The read path parses a query and exports the structured token map of the
//! clause of interest, tolerating total parse failure by returning `None`.
//!
//! All offsets are zero-based character offsets with inclusive span ends;
//! the result of a rewrite is not re-parsed before being handed back, so
//! correctness rests on span accuracy and on `render()` producing valid PPL.

use crate::ast::{Aggregations, Filter, PplNode, TextSpan, Tokens};
use crate::builder::{self, reverse};
use crate::config::StatsConfig;
use crate::syntax::{self, SyntaxError};

/// Errors from the write path.
///
/// A malformed original text is a caller error (the text should always be
/// the last successfully-applied query), so hard parse failures propagate
/// here instead of being swallowed. An inconsistent clause span is an
/// internal defect; it fails loudly rather than returning mangled text.
#[derive(Debug)]
pub enum RewriteError {
    /// The original text did not parse
    Syntax(SyntaxError),

    /// The located clause span does not fit the original text
    SpanOutOfBounds {
        start: isize,
        end: isize,
        length: usize,
    },
}

impl std::fmt::Display for RewriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewriteError::Syntax(e) => write!(f, "Parse error: {}", e),
            RewriteError::SpanOutOfBounds { start, end, length } => write!(
                f,
                "Inconsistent clause span ({}, {}) for a query of {} characters",
                start, end, length
            ),
        }
    }
}

impl std::error::Error for RewriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RewriteError::Syntax(e) => Some(e),
            RewriteError::SpanOutOfBounds { .. } => None,
        }
    }
}

impl From<SyntaxError> for RewriteError {
    fn from(e: SyntaxError) -> Self {
        RewriteError::Syntax(e)
    }
}

/// A parsed query with typed access to the clauses the UI edits.
pub struct ParsedQuery {
    statement: PplNode,
}

impl ParsedQuery {
    pub fn statement(&self) -> &PplNode {
        &self.statement
    }

    fn commands(&self) -> &[PplNode] {
        match &self.statement {
            PplNode::QueryStatement(query) => &query.commands,
            _ => &[],
        }
    }

    /// The first `stats` command, if the query has one.
    pub fn stats(&self) -> Option<&Aggregations> {
        self.commands().iter().find_map(|cmd| match cmd {
            PplNode::Aggregations(stats) => Some(stats),
            _ => None,
        })
    }

    /// The first `where` command, if the query has one.
    pub fn filter(&self) -> Option<&Filter> {
        self.commands().iter().find_map(|cmd| match cmd {
            PplNode::Filter(filter) => Some(filter),
            _ => None,
        })
    }

    pub fn stats_tokens(&self) -> Option<Tokens> {
        self.stats().map(|stats| stats.tokens())
    }

    pub fn filter_tokens(&self) -> Option<Tokens> {
        self.filter().map(|filter| filter.tokens())
    }
}

/// Parse a query into its AST. Hard parse failures propagate.
pub fn parse(text: &str) -> Result<ParsedQuery, SyntaxError> {
    let tree = syntax::parse(text)?;
    Ok(ParsedQuery {
        statement: builder::build_query(&tree),
    })
}

/// Read path: the structured token map of the query's `stats` clause, or
/// `None` on parse failure or when the query has no `stats` clause.
pub fn parse_query_to_tokens(text: &str) -> Option<Tokens> {
    parse(text).ok()?.stats_tokens()
}

/// Read path for the `where` clause; same tolerance as
/// [`parse_query_to_tokens`].
pub fn parse_filter_to_tokens(text: &str) -> Option<Tokens> {
    parse(text).ok()?.filter_tokens()
}

/// Write path: rebuild the `stats` clause from `config` and splice it into
/// `text` at the existing clause's span, or append it as a new final pipe
/// segment when the query has none.
pub fn rewrite_stats_clause(text: &str, config: &StatsConfig) -> Result<String, RewriteError> {
    let query = parse(text)?;
    let replacement = reverse::build_stats(config).render();
    match query.stats().map(|stats| stats.span) {
        Some(span) if !span.is_none() => splice(text, span, &replacement),
        // no stats clause, or one without a usable span
        _ => Ok(format!("{} | {}", text, replacement)),
    }
}

/// Replace exactly the inclusive `[start, end]` character range of `text`.
fn splice(text: &str, span: TextSpan, replacement: &str) -> Result<String, RewriteError> {
    let chars: Vec<char> = text.chars().collect();
    let out_of_bounds = RewriteError::SpanOutOfBounds {
        start: span.start,
        end: span.end,
        length: chars.len(),
    };
    let Some((start, end)) = span.bounds() else {
        return Err(out_of_bounds);
    };
    if end < start || end >= chars.len() {
        return Err(out_of_bounds);
    }
    let prefix: String = chars[..start].iter().collect();
    let suffix: String = chars[end + 1..].iter().collect();
    Ok(format!("{}{}{}", prefix, replacement, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_replaces_exact_inclusive_range() {
        let out = splice("abcdef", TextSpan::new(2, 3), "XY").unwrap();
        assert_eq!(out, "abXYef");
    }

    #[test]
    fn splice_rejects_inverted_span() {
        let err = splice("abcdef", TextSpan { start: 4, end: 1 }, "X").unwrap_err();
        assert!(matches!(err, RewriteError::SpanOutOfBounds { .. }));
    }

    #[test]
    fn splice_rejects_span_past_end() {
        let err = splice("abc", TextSpan::new(1, 9), "X").unwrap_err();
        assert!(matches!(err, RewriteError::SpanOutOfBounds { .. }));
    }

    #[test]
    fn splice_rejects_sentinel_span() {
        let err = splice("abc", TextSpan::NONE, "X").unwrap_err();
        assert!(matches!(err, RewriteError::SpanOutOfBounds { .. }));
    }
}
