// tests/lexer_tests.rs

use ppl_lang::syntax::lexer::{Keyword, Lexer, TokenKind};
use ppl_lang::syntax::{SyntaxError, tokenize};

// ============================================================================
// Basic tokens
// ============================================================================

#[test]
fn test_pipeline_symbols() {
    let mut lexer = Lexer::new("| , ( ) = != < <= > >=");
    let kinds = [
        TokenKind::Pipe,
        TokenKind::Comma,
        TokenKind::Lparen,
        TokenKind::Rparen,
        TokenKind::Equal,
        TokenKind::NotEqual,
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
    ];
    for expected in kinds {
        assert_eq!(lexer.next_token().unwrap().kind, expected);
    }
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_numbers() {
    let mut lexer = Lexer::new("42 3.14");
    let integer = lexer.next_token().unwrap();
    assert_eq!(integer.kind, TokenKind::Integer);
    assert_eq!(integer.text, "42");
    let decimal = lexer.next_token().unwrap();
    assert_eq!(decimal.kind, TokenKind::Decimal);
    assert_eq!(decimal.text, "3.14");
}

#[test]
fn test_interval_shorthand_splits_value_and_unit() {
    // 1h lexes as an integer followed by an identifier
    let mut lexer = Lexer::new("1h");
    let value = lexer.next_token().unwrap();
    assert_eq!(value.kind, TokenKind::Integer);
    assert_eq!(value.text, "1");
    let unit = lexer.next_token().unwrap();
    assert_eq!(unit.kind, TokenKind::Ident);
    assert_eq!(unit.text, "h");
}

// ============================================================================
// Keywords and case behavior
// ============================================================================

#[test]
fn test_keywords_are_case_insensitive() {
    for input in ["where", "WHERE", "WhErE"] {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Keyword(Keyword::Where));
    }
    let mut lexer = Lexer::new("STATS by AS span DEDUP_SPLITVALUES");
    let expected = [
        Keyword::Stats,
        Keyword::By,
        Keyword::As,
        Keyword::Span,
        Keyword::DedupSplitvalues,
    ];
    for kw in expected {
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Keyword(kw));
    }
}

#[test]
fn test_keyword_text_preserves_original_casing() {
    let mut lexer = Lexer::new("WheRe");
    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Keyword(Keyword::Where));
    assert_eq!(token.text, "WheRe");
}

#[test]
fn test_identifier_casing_is_preserved() {
    let mut lexer = Lexer::new("HostName host_name");
    assert_eq!(lexer.next_token().unwrap().text, "HostName");
    assert_eq!(lexer.next_token().unwrap().text, "host_name");
}

// ============================================================================
// Strings and quoted identifiers
// ============================================================================

#[test]
fn test_string_literals_keep_quotes_and_case() {
    let mut lexer = Lexer::new("'MixedCase' \"Another One\"");
    let single = lexer.next_token().unwrap();
    assert_eq!(single.kind, TokenKind::String);
    assert_eq!(single.text, "'MixedCase'");
    let double = lexer.next_token().unwrap();
    assert_eq!(double.kind, TokenKind::String);
    assert_eq!(double.text, "\"Another One\"");
}

#[test]
fn test_backtick_identifier() {
    let mut lexer = Lexer::new("`two words`");
    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Ident);
    assert_eq!(token.text, "`two words`");
}

#[test]
fn test_unterminated_string_errors() {
    let mut lexer = Lexer::new("'oops");
    let err = lexer.next_token().unwrap_err();
    assert!(matches!(err, SyntaxError::UnterminatedString { position: 0 }));
}

#[test]
fn test_unexpected_character_errors() {
    let mut lexer = Lexer::new("  #");
    let err = lexer.next_token().unwrap_err();
    assert!(matches!(
        err,
        SyntaxError::UnexpectedChar {
            ch: '#',
            position: 2
        }
    ));
}

// ============================================================================
// Spans
// ============================================================================

#[test]
fn test_spans_are_inclusive_character_offsets() {
    let tokens = tokenize("stats count() by host").unwrap();
    // stats, count, (, ), by, host, eof
    assert_eq!((tokens[0].start, tokens[0].end), (0, 4));
    assert_eq!((tokens[1].start, tokens[1].end), (6, 10));
    assert_eq!((tokens[2].start, tokens[2].end), (11, 11));
    assert_eq!((tokens[3].start, tokens[3].end), (12, 12));
    assert_eq!((tokens[4].start, tokens[4].end), (14, 15));
    assert_eq!((tokens[5].start, tokens[5].end), (17, 20));
    assert_eq!(tokens[6].kind, TokenKind::Eof);
}

#[test]
fn test_spans_count_characters_not_bytes() {
    // the ü is one character offset even though it is two bytes
    let tokens = tokenize("'ü' = x").unwrap();
    assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
    assert_eq!((tokens[1].start, tokens[1].end), (4, 4));
    assert_eq!((tokens[2].start, tokens[2].end), (6, 6));
}
