//! Grammar layer: recursive descent over the token stream, producing a
//! homogeneous tree of typed context nodes.
//!
//! Only the productions the AST builders consume are modeled (`stats`, the
//! `where`/logical-expression family, and the shared value/literal rules);
//! any other piped command is captured as a raw token run under its
//! [`Rule::Commands`] context so unsupported commands still parse.

use crate::ast::TextSpan;
use crate::syntax::SyntaxError;
use crate::syntax::lexer::{Keyword, Token, TokenKind};

/// Grammar productions, one tag per context-node shape the builders inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Root,
    PplStatement,
    DmlStatement,
    QueryStatement,
    PplCommands,
    Commands,
    StatsCommand,
    StatsAggTerm,
    StatsFunction,
    StatsFunctionName,
    PercentileAggFunction,
    TakeAggFunctionCall,
    StatsByClause,
    FieldList,
    BySpanClause,
    SpanClause,
    TimespanUnit,
    FieldExpression,
    WcFieldExpression,
    QualifiedName,
    WhereCommand,
    LogicalOr,
    LogicalXor,
    LogicalAnd,
    LogicalNot,
    Comparison,
    ComparisonExpression,
    BooleanExpression,
    ValueExpression,
    PrimaryExpression,
    EvalFunctionCall,
    EvalFunctionName,
    FunctionArgs,
    FunctionArg,
    LiteralValue,
    IntervalLiteral,
}

#[derive(Debug, Clone)]
pub enum Tree {
    Rule(Context),
    Token(Token),
}

/// A typed parse-tree node: its production tag, ordered children, and the
/// inclusive character span covering every token underneath it.
#[derive(Debug, Clone)]
pub struct Context {
    pub rule: Rule,
    pub children: Vec<Tree>,
    pub span: TextSpan,
}

impl Context {
    /// Build a context, deriving the span from the tokens underneath.
    /// A context with no tokens gets the sentinel span.
    pub fn new(rule: Rule, children: Vec<Tree>) -> Self {
        let mut start: Option<usize> = None;
        let mut end: Option<usize> = None;
        collect_bounds(&children, &mut start, &mut end);
        let span = match (start, end) {
            (Some(s), Some(e)) => TextSpan::new(s, e),
            _ => TextSpan::NONE,
        };
        Context {
            rule,
            children,
            span,
        }
    }

    /// Concatenated token text of the whole subtree, no separators: the
    /// textual-extraction accessor, so original casing is preserved.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Tree::Token(token) => out.push_str(&token.text),
                Tree::Rule(ctx) => ctx.collect_text(out),
            }
        }
    }

    /// Subtree token text joined with single spaces, for raw command runs.
    pub fn joined_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_parts(&mut parts);
        parts.join(" ")
    }

    fn collect_parts(&self, parts: &mut Vec<String>) {
        for child in &self.children {
            match child {
                Tree::Token(token) => parts.push(token.text.clone()),
                Tree::Rule(ctx) => ctx.collect_parts(parts),
            }
        }
    }

    /// Direct child contexts, in order.
    pub fn rules(&self) -> impl Iterator<Item = &Context> {
        self.children.iter().filter_map(|child| match child {
            Tree::Rule(ctx) => Some(ctx),
            Tree::Token(_) => None,
        })
    }

    /// First direct child context with the given rule.
    pub fn find_rule(&self, rule: Rule) -> Option<&Context> {
        self.rules().find(|ctx| ctx.rule == rule)
    }

    /// Direct token children, in order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(|child| match child {
            Tree::Token(token) => Some(token),
            Tree::Rule(_) => None,
        })
    }
}

fn collect_bounds(children: &[Tree], start: &mut Option<usize>, end: &mut Option<usize>) {
    for child in children {
        match child {
            Tree::Token(token) => {
                if start.is_none_or(|s| token.start < s) {
                    *start = Some(token.start);
                }
                if end.is_none_or(|e| token.end > e) {
                    *end = Some(token.end);
                }
            }
            Tree::Rule(ctx) => collect_bounds(&ctx.children, start, end),
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // the stream must terminate with Eof so current() can always clamp
        if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
            let at = tokens.last().map(|token| token.end + 1).unwrap_or(0);
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                start: at,
                end: at,
            });
        }
        Parser {
            tokens,
            position: 0,
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        let next = (self.position + 1).min(self.tokens.len() - 1);
        &self.tokens[next]
    }

    fn at_kind(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        self.current().keyword() == Some(kw)
    }

    fn at_boolean(&self) -> bool {
        self.at_kind(TokenKind::Ident)
            && (self.current().text.eq_ignore_ascii_case("true")
                || self.current().text.eq_ignore_ascii_case("false"))
    }

    fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn expect_kind(&mut self, kind: TokenKind, expected: &str) -> Result<Token, SyntaxError> {
        if self.at_kind(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            SyntaxError::UnexpectedEof
        } else {
            SyntaxError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.text.clone(),
                position: token.start,
            }
        }
    }

    /// root := queryStatement? EOF
    ///
    /// The pplStatement/dmlStatement levels are kept as explicit tree nodes
    /// so the builder walk can dispatch level by level.
    pub fn parse_root(&mut self) -> Result<Context, SyntaxError> {
        if self.at_kind(TokenKind::Eof) {
            return Ok(Context::new(Rule::Root, Vec::new()));
        }
        let query = self.parse_query_statement()?;
        if !self.at_kind(TokenKind::Eof) {
            return Err(self.unexpected("'|' or end of query"));
        }
        let dml = Context::new(Rule::DmlStatement, vec![Tree::Rule(query)]);
        let ppl = Context::new(Rule::PplStatement, vec![Tree::Rule(dml)]);
        Ok(Context::new(Rule::Root, vec![Tree::Rule(ppl)]))
    }

    /// queryStatement := pplCommands (PIPE commands)*
    fn parse_query_statement(&mut self) -> Result<Context, SyntaxError> {
        let mut children = vec![Tree::Rule(self.parse_ppl_commands()?)];
        while self.at_kind(TokenKind::Pipe) {
            children.push(Tree::Token(self.bump()));
            children.push(Tree::Rule(self.parse_commands()?));
        }
        Ok(Context::new(Rule::QueryStatement, children))
    }

    /// The leading source/search segment, captured as a raw token run.
    fn parse_ppl_commands(&mut self) -> Result<Context, SyntaxError> {
        let mut children = Vec::new();
        while !self.at_kind(TokenKind::Pipe) && !self.at_kind(TokenKind::Eof) {
            children.push(Tree::Token(self.bump()));
        }
        if children.is_empty() {
            return Err(self.unexpected("a source command"));
        }
        Ok(Context::new(Rule::PplCommands, children))
    }

    /// commands := statsCommand | whereCommand | raw token run
    fn parse_commands(&mut self) -> Result<Context, SyntaxError> {
        if self.at_keyword(Keyword::Stats) {
            let stats = self.parse_stats_command()?;
            return Ok(Context::new(Rule::Commands, vec![Tree::Rule(stats)]));
        }
        if self.at_keyword(Keyword::Where) {
            let filter = self.parse_where_command()?;
            return Ok(Context::new(Rule::Commands, vec![Tree::Rule(filter)]));
        }
        let mut children = Vec::new();
        while !self.at_kind(TokenKind::Pipe) && !self.at_kind(TokenKind::Eof) {
            children.push(Tree::Token(self.bump()));
        }
        if children.is_empty() {
            return Err(self.unexpected("a command"));
        }
        Ok(Context::new(Rule::Commands, children))
    }

    /// statsCommand := STATS flags? statsAggTerm (COMMA statsAggTerm)*
    ///                 statsByClause? (DEDUP_SPLITVALUES EQ boolean)?
    fn parse_stats_command(&mut self) -> Result<Context, SyntaxError> {
        let mut children = vec![Tree::Token(self.bump())];
        if self.at_keyword(Keyword::Partitions) {
            self.parse_stats_flag(&mut children, FlagValue::Integer)?;
        }
        if self.at_keyword(Keyword::Allnum) {
            self.parse_stats_flag(&mut children, FlagValue::Boolean)?;
        }
        if self.at_keyword(Keyword::Delim) {
            self.parse_stats_flag(&mut children, FlagValue::Text)?;
        }
        children.push(Tree::Rule(self.parse_stats_agg_term()?));
        while self.at_kind(TokenKind::Comma) {
            children.push(Tree::Token(self.bump()));
            children.push(Tree::Rule(self.parse_stats_agg_term()?));
        }
        if self.at_keyword(Keyword::By) {
            children.push(Tree::Rule(self.parse_stats_by_clause()?));
        }
        if self.at_keyword(Keyword::DedupSplitvalues) {
            self.parse_stats_flag(&mut children, FlagValue::Boolean)?;
        }
        Ok(Context::new(Rule::StatsCommand, children))
    }

    /// `<keyword> = <value>` — the keyword, sign, and value tokens are kept
    /// as direct children of the stats command.
    fn parse_stats_flag(
        &mut self,
        children: &mut Vec<Tree>,
        value: FlagValue,
    ) -> Result<(), SyntaxError> {
        children.push(Tree::Token(self.bump()));
        children.push(Tree::Token(self.expect_kind(TokenKind::Equal, "'='")?));
        let matches = match value {
            FlagValue::Integer => self.at_kind(TokenKind::Integer),
            FlagValue::Boolean => self.at_boolean(),
            FlagValue::Text => self.at_kind(TokenKind::String),
        };
        if !matches {
            return Err(self.unexpected(value.expected()));
        }
        children.push(Tree::Token(self.bump()));
        Ok(())
    }

    /// statsAggTerm := statsFunction (AS wcFieldExpression)?
    fn parse_stats_agg_term(&mut self) -> Result<Context, SyntaxError> {
        let mut children = vec![Tree::Rule(self.parse_stats_function()?)];
        if self.at_keyword(Keyword::As) {
            children.push(Tree::Token(self.bump()));
            children.push(Tree::Rule(self.parse_wc_field_expression()?));
        }
        Ok(Context::new(Rule::StatsAggTerm, children))
    }

    fn parse_stats_function(&mut self) -> Result<Context, SyntaxError> {
        if self.at_keyword(Keyword::Percentile) {
            let percentile = self.parse_percentile_agg_function()?;
            return Ok(Context::new(
                Rule::StatsFunction,
                vec![Tree::Rule(percentile)],
            ));
        }
        if self.at_keyword(Keyword::Take) {
            let take = self.parse_take_agg_function_call()?;
            return Ok(Context::new(Rule::StatsFunction, vec![Tree::Rule(take)]));
        }
        if self.at_keyword(Keyword::Count) {
            let mut children = vec![Tree::Token(self.bump())];
            children.push(Tree::Token(self.expect_kind(TokenKind::Lparen, "'('")?));
            if !self.at_kind(TokenKind::Rparen) {
                children.push(Tree::Rule(self.parse_value_expression()?));
            }
            children.push(Tree::Token(self.expect_kind(TokenKind::Rparen, "')'")?));
            return Ok(Context::new(Rule::StatsFunction, children));
        }
        if self.at_keyword(Keyword::DistinctCount) || self.at_keyword(Keyword::Dc) {
            let mut children = vec![Tree::Token(self.bump())];
            children.push(Tree::Token(self.expect_kind(TokenKind::Lparen, "'('")?));
            children.push(Tree::Rule(self.parse_value_expression()?));
            children.push(Tree::Token(self.expect_kind(TokenKind::Rparen, "')'")?));
            return Ok(Context::new(Rule::StatsFunction, children));
        }
        if self.at_kind(TokenKind::Ident) {
            let name = Context::new(Rule::StatsFunctionName, vec![Tree::Token(self.bump())]);
            let mut children = vec![Tree::Rule(name)];
            children.push(Tree::Token(self.expect_kind(TokenKind::Lparen, "'('")?));
            children.push(Tree::Rule(self.parse_value_expression()?));
            children.push(Tree::Token(self.expect_kind(TokenKind::Rparen, "')'")?));
            return Ok(Context::new(Rule::StatsFunction, children));
        }
        Err(self.unexpected("an aggregate function"))
    }

    /// percentileAggFunction := PERCENTILE '<' integer '>' '(' fieldExpression ')'
    fn parse_percentile_agg_function(&mut self) -> Result<Context, SyntaxError> {
        let mut children = vec![Tree::Token(self.bump())];
        children.push(Tree::Token(self.expect_kind(TokenKind::Less, "'<'")?));
        children.push(Tree::Token(
            self.expect_kind(TokenKind::Integer, "an integer")?,
        ));
        children.push(Tree::Token(self.expect_kind(TokenKind::Greater, "'>'")?));
        children.push(Tree::Token(self.expect_kind(TokenKind::Lparen, "'('")?));
        children.push(Tree::Rule(self.parse_field_expression()?));
        children.push(Tree::Token(self.expect_kind(TokenKind::Rparen, "')'")?));
        Ok(Context::new(Rule::PercentileAggFunction, children))
    }

    /// takeAggFunctionCall := TAKE '(' fieldExpression (COMMA integer)? ')'
    fn parse_take_agg_function_call(&mut self) -> Result<Context, SyntaxError> {
        let mut children = vec![Tree::Token(self.bump())];
        children.push(Tree::Token(self.expect_kind(TokenKind::Lparen, "'('")?));
        children.push(Tree::Rule(self.parse_field_expression()?));
        if self.at_kind(TokenKind::Comma) {
            children.push(Tree::Token(self.bump()));
            children.push(Tree::Token(
                self.expect_kind(TokenKind::Integer, "an integer")?,
            ));
        }
        children.push(Tree::Token(self.expect_kind(TokenKind::Rparen, "')'")?));
        Ok(Context::new(Rule::TakeAggFunctionCall, children))
    }

    /// statsByClause := BY (bySpanClause | fieldExpression)
    ///                  (COMMA (bySpanClause | fieldExpression))*
    ///
    /// Consecutive fields are collected under one FieldList context, the way
    /// the builder expects them.
    fn parse_stats_by_clause(&mut self) -> Result<Context, SyntaxError> {
        let mut children = vec![Tree::Token(self.bump())];
        let mut fields = Vec::new();
        loop {
            if self.at_keyword(Keyword::Span) {
                children.push(Tree::Rule(self.parse_by_span_clause()?));
            } else {
                fields.push(Tree::Rule(self.parse_field_expression()?));
            }
            if self.at_kind(TokenKind::Comma) {
                children.push(Tree::Token(self.bump()));
            } else {
                break;
            }
        }
        if !fields.is_empty() {
            children.push(Tree::Rule(Context::new(Rule::FieldList, fields)));
        }
        Ok(Context::new(Rule::StatsByClause, children))
    }

    /// bySpanClause := spanClause (AS qualifiedName)?
    fn parse_by_span_clause(&mut self) -> Result<Context, SyntaxError> {
        let mut children = vec![Tree::Rule(self.parse_span_clause()?)];
        if self.at_keyword(Keyword::As) {
            children.push(Tree::Token(self.bump()));
            children.push(Tree::Rule(self.parse_qualified_name()?));
        }
        Ok(Context::new(Rule::BySpanClause, children))
    }

    /// spanClause := SPAN '(' fieldExpression COMMA literalValue timespanUnit? ')'
    fn parse_span_clause(&mut self) -> Result<Context, SyntaxError> {
        let mut children = vec![Tree::Token(self.bump())];
        children.push(Tree::Token(self.expect_kind(TokenKind::Lparen, "'('")?));
        children.push(Tree::Rule(self.parse_field_expression()?));
        children.push(Tree::Token(self.expect_kind(TokenKind::Comma, "','")?));
        children.push(Tree::Rule(self.parse_literal_value()?));
        if self.at_kind(TokenKind::Ident) {
            let unit = Context::new(Rule::TimespanUnit, vec![Tree::Token(self.bump())]);
            children.push(Tree::Rule(unit));
        }
        children.push(Tree::Token(self.expect_kind(TokenKind::Rparen, "')'")?));
        Ok(Context::new(Rule::SpanClause, children))
    }

    /// literalValue := intervalLiteral | string | number | boolean
    fn parse_literal_value(&mut self) -> Result<Context, SyntaxError> {
        if self.at_keyword(Keyword::Interval) {
            let mut children = vec![Tree::Token(self.bump())];
            let value_ok = self.at_kind(TokenKind::Integer)
                || self.at_kind(TokenKind::Decimal)
                || self.at_kind(TokenKind::String);
            if !value_ok {
                return Err(self.unexpected("an interval value"));
            }
            children.push(Tree::Token(self.bump()));
            children.push(Tree::Token(
                self.expect_kind(TokenKind::Ident, "a time unit")?,
            ));
            let interval = Context::new(Rule::IntervalLiteral, children);
            return Ok(Context::new(Rule::LiteralValue, vec![Tree::Rule(interval)]));
        }
        let literal_ok = self.at_kind(TokenKind::String)
            || self.at_kind(TokenKind::Integer)
            || self.at_kind(TokenKind::Decimal)
            || self.at_boolean();
        if !literal_ok {
            return Err(self.unexpected("a literal value"));
        }
        Ok(Context::new(
            Rule::LiteralValue,
            vec![Tree::Token(self.bump())],
        ))
    }

    fn parse_field_expression(&mut self) -> Result<Context, SyntaxError> {
        let name = self.parse_qualified_name()?;
        Ok(Context::new(Rule::FieldExpression, vec![Tree::Rule(name)]))
    }

    fn parse_wc_field_expression(&mut self) -> Result<Context, SyntaxError> {
        let name = self.parse_qualified_name()?;
        Ok(Context::new(Rule::WcFieldExpression, vec![Tree::Rule(name)]))
    }

    /// qualifiedName := ident (DOT ident)*
    fn parse_qualified_name(&mut self) -> Result<Context, SyntaxError> {
        let mut children = vec![Tree::Token(
            self.expect_kind(TokenKind::Ident, "a field name")?,
        )];
        while self.at_kind(TokenKind::Dot) && self.peek().kind == TokenKind::Ident {
            children.push(Tree::Token(self.bump()));
            children.push(Tree::Token(self.bump()));
        }
        Ok(Context::new(Rule::QualifiedName, children))
    }

    /// whereCommand := WHERE logicalExpression
    fn parse_where_command(&mut self) -> Result<Context, SyntaxError> {
        let mut children = vec![Tree::Token(self.bump())];
        children.push(Tree::Rule(self.parse_logical_expression()?));
        Ok(Context::new(Rule::WhereCommand, children))
    }

    /// Precedence follows the source grammar's alternative order:
    /// NOT (prefix) binds tightest, then AND, then XOR, then OR;
    /// all binary forms are left-associative.
    fn parse_logical_expression(&mut self) -> Result<Context, SyntaxError> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> Result<Context, SyntaxError> {
        let mut left = self.parse_logical_xor()?;
        while self.at_keyword(Keyword::Or) {
            let op = self.bump();
            let right = self.parse_logical_xor()?;
            left = Context::new(
                Rule::LogicalOr,
                vec![Tree::Rule(left), Tree::Token(op), Tree::Rule(right)],
            );
        }
        Ok(left)
    }

    fn parse_logical_xor(&mut self) -> Result<Context, SyntaxError> {
        let mut left = self.parse_logical_and()?;
        while self.at_keyword(Keyword::Xor) {
            let op = self.bump();
            let right = self.parse_logical_and()?;
            left = Context::new(
                Rule::LogicalXor,
                vec![Tree::Rule(left), Tree::Token(op), Tree::Rule(right)],
            );
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<Context, SyntaxError> {
        let mut left = self.parse_logical_unary()?;
        while self.at_keyword(Keyword::And) {
            let op = self.bump();
            let right = self.parse_logical_unary()?;
            left = Context::new(
                Rule::LogicalAnd,
                vec![Tree::Rule(left), Tree::Token(op), Tree::Rule(right)],
            );
        }
        Ok(left)
    }

    fn parse_logical_unary(&mut self) -> Result<Context, SyntaxError> {
        if self.at_keyword(Keyword::Not) {
            let op = self.bump();
            let operand = self.parse_logical_unary()?;
            return Ok(Context::new(
                Rule::LogicalNot,
                vec![Tree::Token(op), Tree::Rule(operand)],
            ));
        }
        let left = self.parse_value_expression()?;
        let operator = match self.current().kind {
            TokenKind::Equal
            | TokenKind::NotEqual
            | TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => self.bump(),
            // A value expression with no comparison after it is a boolean
            // expression alternative; the builder treats it as unhandled.
            _ => {
                return Ok(Context::new(
                    Rule::BooleanExpression,
                    vec![Tree::Rule(left)],
                ));
            }
        };
        let right = self.parse_value_expression()?;
        let comparison = Context::new(
            Rule::ComparisonExpression,
            vec![Tree::Rule(left), Tree::Token(operator), Tree::Rule(right)],
        );
        Ok(Context::new(
            Rule::Comparison,
            vec![Tree::Rule(comparison)],
        ))
    }

    fn parse_value_expression(&mut self) -> Result<Context, SyntaxError> {
        let primary = self.parse_primary_expression()?;
        Ok(Context::new(
            Rule::ValueExpression,
            vec![Tree::Rule(primary)],
        ))
    }

    fn parse_primary_expression(&mut self) -> Result<Context, SyntaxError> {
        let child = if self.at_kind(TokenKind::Ident) && self.peek().kind == TokenKind::Lparen {
            self.parse_eval_function_call()?
        } else if self.at_kind(TokenKind::String)
            || self.at_kind(TokenKind::Integer)
            || self.at_kind(TokenKind::Decimal)
            || self.at_keyword(Keyword::Interval)
            || self.at_boolean()
        {
            self.parse_literal_value()?
        } else if self.at_kind(TokenKind::Ident) {
            self.parse_field_expression()?
        } else {
            return Err(self.unexpected("a value expression"));
        };
        Ok(Context::new(Rule::PrimaryExpression, vec![Tree::Rule(child)]))
    }

    /// evalFunctionCall := ident '(' (functionArg (COMMA functionArg)*)? ')'
    fn parse_eval_function_call(&mut self) -> Result<Context, SyntaxError> {
        let name = Context::new(Rule::EvalFunctionName, vec![Tree::Token(self.bump())]);
        let mut children = vec![Tree::Rule(name)];
        children.push(Tree::Token(self.expect_kind(TokenKind::Lparen, "'('")?));
        children.push(Tree::Rule(self.parse_function_args()?));
        children.push(Tree::Token(self.expect_kind(TokenKind::Rparen, "')'")?));
        Ok(Context::new(Rule::EvalFunctionCall, children))
    }

    fn parse_function_args(&mut self) -> Result<Context, SyntaxError> {
        let mut children = Vec::new();
        if !self.at_kind(TokenKind::Rparen) {
            loop {
                let value = self.parse_value_expression()?;
                let arg = Context::new(Rule::FunctionArg, vec![Tree::Rule(value)]);
                children.push(Tree::Rule(arg));
                if self.at_kind(TokenKind::Comma) {
                    children.push(Tree::Token(self.bump()));
                } else {
                    break;
                }
            }
        }
        Ok(Context::new(Rule::FunctionArgs, children))
    }
}

enum FlagValue {
    Integer,
    Boolean,
    Text,
}

impl FlagValue {
    fn expected(&self) -> &'static str {
        match self {
            FlagValue::Integer => "an integer",
            FlagValue::Boolean => "'true' or 'false'",
            FlagValue::Text => "a quoted string",
        }
    }
}
