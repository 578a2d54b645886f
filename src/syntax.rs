//! Syntax front-end for PPL query strings.
//!
//! Assembles the lexer/parser pair over a raw query and exposes the root
//! parse-tree node plus the token stream. The parse tree produced here is a
//! homogeneous tree of typed context nodes ([`grammar::Context`]) with
//! per-token character offsets; the AST builders in [`crate::builder`]
//! consume it through that contract only.
//!
//! Keyword matching is case-insensitive (via [`stream::CaseInsensitiveStream`])
//! while every extracted substring keeps the user's original casing.

pub mod grammar;
pub mod lexer;
pub mod stream;

pub use grammar::{Context, Rule, Tree};
pub use lexer::{Keyword, Lexer, Token, TokenKind};
pub use stream::CaseInsensitiveStream;

/// Errors produced by the lexer or the grammar layer.
///
/// These are hard parse failures: there is no recovery, and the offending
/// position is a zero-based character offset into the query string.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// A character the lexer cannot classify
    UnexpectedChar { ch: char, position: usize },

    /// A string or backtick literal missing its closing quote
    UnterminatedString { position: usize },

    /// A token that does not fit the grammar at this point
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    /// Input ended in the middle of a production
    UnexpectedEof,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::UnexpectedChar { ch, position } => {
                write!(f, "Unexpected character '{}' at position {}", ch, position)
            }
            SyntaxError::UnterminatedString { position } => {
                write!(f, "Unterminated string starting at position {}", position)
            }
            SyntaxError::UnexpectedToken {
                expected,
                found,
                position,
            } => {
                write!(
                    f,
                    "Expected {} but found '{}' at position {}",
                    expected, found, position
                )
            }
            SyntaxError::UnexpectedEof => write!(f, "Unexpected end of query"),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Tokenize a full query string.
pub fn tokenize(text: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer::new(text);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

/// Parse a query string into its root parse-tree node.
///
/// Pure and synchronous; syntactic errors propagate as [`SyntaxError`].
pub fn parse(text: &str) -> Result<Context, SyntaxError> {
    let tokens = tokenize(text)?;
    grammar::Parser::new(tokens).parse_root()
}
