use crate::syntax::SyntaxError;
use crate::syntax::stream::{CaseInsensitiveStream, EOF};

/// PPL keywords recognized case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Source,
    Search,
    Index,
    Where,
    Stats,
    By,
    As,
    Span,
    Not,
    And,
    Or,
    Xor,
    Partitions,
    Allnum,
    Delim,
    DedupSplitvalues,
    Count,
    DistinctCount,
    Dc,
    Percentile,
    Take,
    Interval,
}

impl Keyword {
    fn from_folded(word: &str) -> Option<Keyword> {
        match word {
            "SOURCE" => Some(Keyword::Source),
            "SEARCH" => Some(Keyword::Search),
            "INDEX" => Some(Keyword::Index),
            "WHERE" => Some(Keyword::Where),
            "STATS" => Some(Keyword::Stats),
            "BY" => Some(Keyword::By),
            "AS" => Some(Keyword::As),
            "SPAN" => Some(Keyword::Span),
            "NOT" => Some(Keyword::Not),
            "AND" => Some(Keyword::And),
            "OR" => Some(Keyword::Or),
            "XOR" => Some(Keyword::Xor),
            "PARTITIONS" => Some(Keyword::Partitions),
            "ALLNUM" => Some(Keyword::Allnum),
            "DELIM" => Some(Keyword::Delim),
            "DEDUP_SPLITVALUES" => Some(Keyword::DedupSplitvalues),
            "COUNT" => Some(Keyword::Count),
            "DISTINCT_COUNT" => Some(Keyword::DistinctCount),
            "DC" => Some(Keyword::Dc),
            "PERCENTILE" => Some(Keyword::Percentile),
            "TAKE" => Some(Keyword::Take),
            "INTERVAL" => Some(Keyword::Interval),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Pipe,
    Comma,
    Dot,
    Lparen,
    Rparen,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Keyword(Keyword),
    Ident,
    String,
    Integer,
    Decimal,
    Eof,
}

/// A lexed token with its original text and inclusive character span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }
}

pub struct Lexer {
    stream: CaseInsensitiveStream,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            stream: CaseInsensitiveStream::new(input),
        }
    }

    /// The current character, already uppercased by the stream adapter.
    fn current(&self) -> Option<char> {
        code_to_char(self.stream.la(1))
    }

    fn peek(&self) -> Option<char> {
        code_to_char(self.stream.la(2))
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.stream.consume();
            } else {
                break;
            }
        }
    }

    fn symbol(&mut self, kind: TokenKind, length: usize) -> Token {
        let start = self.stream.index();
        for _ in 0..length {
            self.stream.consume();
        }
        self.token(kind, start)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        let end = self.stream.index().saturating_sub(1);
        Token {
            kind,
            text: self.stream.text(start, end),
            start,
            end,
        }
    }

    /// Identifier or keyword. Matching runs on the folded look-ahead while
    /// the token text is extracted with original casing.
    fn read_word(&mut self) -> Token {
        let start = self.stream.index();
        let mut folded = String::new();
        while let Some(ch) = self.current() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                folded.push(ch);
                self.stream.consume();
            } else {
                break;
            }
        }
        let kind = match Keyword::from_folded(&folded) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident,
        };
        self.token(kind, start)
    }

    fn read_number(&mut self) -> Token {
        let start = self.stream.index();
        let mut is_decimal = false;
        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() {
                self.stream.consume();
            } else if ch == '.' && !is_decimal && self.peek().is_some_and(|c| c.is_ascii_digit()) {
                is_decimal = true;
                self.stream.consume();
            } else {
                break;
            }
        }
        let kind = if is_decimal {
            TokenKind::Decimal
        } else {
            TokenKind::Integer
        };
        self.token(kind, start)
    }

    /// Quoted string or backtick identifier. The token text keeps the
    /// surrounding quotes, matching what callers see when they extract the
    /// production's text.
    fn read_quoted(&mut self, quote: char, kind: TokenKind) -> Result<Token, SyntaxError> {
        let start = self.stream.index();
        self.stream.consume();
        while let Some(ch) = self.current() {
            self.stream.consume();
            if ch == quote {
                return Ok(self.token(kind, start));
            }
        }
        Err(SyntaxError::UnterminatedString { position: start })
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespace();

        match self.current() {
            None => {
                let at = self.stream.index();
                Ok(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    start: at,
                    end: at,
                })
            }
            Some('|') => Ok(self.symbol(TokenKind::Pipe, 1)),
            Some(',') => Ok(self.symbol(TokenKind::Comma, 1)),
            Some('.') => Ok(self.symbol(TokenKind::Dot, 1)),
            Some('(') => Ok(self.symbol(TokenKind::Lparen, 1)),
            Some(')') => Ok(self.symbol(TokenKind::Rparen, 1)),
            Some('=') => Ok(self.symbol(TokenKind::Equal, 1)),
            Some('+') => Ok(self.symbol(TokenKind::Plus, 1)),
            Some('-') => Ok(self.symbol(TokenKind::Minus, 1)),
            Some('*') => Ok(self.symbol(TokenKind::Star, 1)),
            Some('/') => Ok(self.symbol(TokenKind::Slash, 1)),
            Some('<') => {
                if self.peek() == Some('=') {
                    Ok(self.symbol(TokenKind::LessEqual, 2))
                } else {
                    Ok(self.symbol(TokenKind::Less, 1))
                }
            }
            Some('>') => {
                if self.peek() == Some('=') {
                    Ok(self.symbol(TokenKind::GreaterEqual, 2))
                } else {
                    Ok(self.symbol(TokenKind::Greater, 1))
                }
            }
            Some('!') => {
                if self.peek() == Some('=') {
                    Ok(self.symbol(TokenKind::NotEqual, 2))
                } else {
                    Err(SyntaxError::UnexpectedChar {
                        ch: '!',
                        position: self.stream.index(),
                    })
                }
            }
            Some('\'') => self.read_quoted('\'', TokenKind::String),
            Some('"') => self.read_quoted('"', TokenKind::String),
            Some('`') => self.read_quoted('`', TokenKind::Ident),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => Ok(self.read_word()),
            Some(ch) if ch.is_ascii_digit() => Ok(self.read_number()),
            Some(_) => {
                // The folded look-ahead is only for keywords; report the
                // original character.
                let position = self.stream.index();
                let ch = self
                    .stream
                    .text(position, position)
                    .chars()
                    .next()
                    .unwrap_or('\u{fffd}');
                Err(SyntaxError::UnexpectedChar { ch, position })
            }
        }
    }
}

fn code_to_char(code: i32) -> Option<char> {
    if code == EOF {
        return None;
    }
    char::from_u32(code as u32)
}

#[test]
fn test_keywords_fold_case() {
    let mut lexer = Lexer::new("WHERE where WhErE");
    for _ in 0..3 {
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Keyword(Keyword::Where));
    }
    let mut lexer = Lexer::new("STATS stats By");
    assert_eq!(
        lexer.next_token().unwrap().kind,
        TokenKind::Keyword(Keyword::Stats)
    );
    assert_eq!(
        lexer.next_token().unwrap().kind,
        TokenKind::Keyword(Keyword::Stats)
    );
    assert_eq!(
        lexer.next_token().unwrap().kind,
        TokenKind::Keyword(Keyword::By)
    );
}

#[test]
fn test_text_keeps_original_casing() {
    let mut lexer = Lexer::new("WheRe HostName = 'MixedCase'");
    let where_token = lexer.next_token().unwrap();
    assert_eq!(where_token.text, "WheRe");
    let field = lexer.next_token().unwrap();
    assert_eq!(field.text, "HostName");
    lexer.next_token().unwrap();
    let literal = lexer.next_token().unwrap();
    assert_eq!(literal.kind, TokenKind::String);
    assert_eq!(literal.text, "'MixedCase'");
}

#[test]
fn test_spans_are_inclusive() {
    let mut lexer = Lexer::new("stats count");
    let stats = lexer.next_token().unwrap();
    assert_eq!((stats.start, stats.end), (0, 4));
    let count = lexer.next_token().unwrap();
    assert_eq!((count.start, count.end), (6, 10));
}
