//! Recursive-descent grammar producing a typed CST.
//!
//! Rules are methods on a private `Parser` cursor. The public surface is the
//! entry-rule table: [`Grammar::parse`] looks up the rule for an
//! [`EntryRule`], runs it over the token stream, and rejects trailing input.
//!
//! The same rules drive suggestions. In prediction mode every token check
//! made at end of input is recorded, which yields exactly the set of kinds
//! that could legally come next.

pub mod cst;
mod expression;
mod json;
mod statement;

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::error::{ErrorFormatter, ParseError, ParseResult};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Named entry points into the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryRule {
    /// A full statement, optionally wrapped in EXPLAIN.
    Statement,
    /// A boolean condition or filter expression.
    Expression,
    /// The restricted key-condition grammar.
    KeyCondition,
    /// A JSON object literal.
    JsonObject,
}

/// Result of running an entry rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Cst {
    /// Output of [`EntryRule::Statement`].
    Statement(cst::Statement),
    /// Output of [`EntryRule::Expression`].
    Expression(cst::Expression),
    /// Output of [`EntryRule::KeyCondition`].
    KeyCondition(cst::Expression),
    /// Output of [`EntryRule::JsonObject`].
    JsonObject(Value),
}

type RuleFn = fn(&mut Parser<'_>) -> ParseResult<Cst>;

fn statement_rule(parser: &mut Parser<'_>) -> ParseResult<Cst> {
    parser.statement().map(Cst::Statement)
}

fn expression_rule(parser: &mut Parser<'_>) -> ParseResult<Cst> {
    parser.expression().map(Cst::Expression)
}

fn key_condition_rule(parser: &mut Parser<'_>) -> ParseResult<Cst> {
    parser.key_condition().map(Cst::KeyCondition)
}

fn json_object_rule(parser: &mut Parser<'_>) -> ParseResult<Cst> {
    parser.json_object().map(Cst::JsonObject)
}

impl EntryRule {
    fn rule(self) -> RuleFn {
        match self {
            Self::Statement => statement_rule,
            Self::Expression => expression_rule,
            Self::KeyCondition => key_condition_rule,
            Self::JsonObject => json_object_rule,
        }
    }
}

/// Grammar front end bound to an error formatter.
#[derive(Debug, Clone, Copy)]
pub struct Grammar<'f> {
    formatter: &'f dyn ErrorFormatter,
}

impl<'f> Grammar<'f> {
    /// Create a grammar reporting errors through `formatter`.
    #[must_use]
    pub fn new(formatter: &'f dyn ErrorFormatter) -> Self {
        Self { formatter }
    }

    /// Tokenize `input` with this grammar's formatter.
    pub fn tokenize(&self, input: &str) -> ParseResult<Vec<Token>> {
        Lexer::new(input, self.formatter).tokenize()
    }

    /// Tokenize and parse `input` with `rule`.
    pub fn parse(&self, rule: EntryRule, input: &str) -> ParseResult<Cst> {
        let tokens = self.tokenize(input)?;
        self.parse_tokens(rule, &tokens)
    }

    /// Parse an already tokenized input with `rule`.
    pub fn parse_tokens(&self, rule: EntryRule, tokens: &[Token]) -> ParseResult<Cst> {
        debug!(?rule, tokens = tokens.len(), "parsing input");
        self.run(tokens, rule.rule())
    }

    /// Parse a statement.
    pub fn parse_statement(&self, input: &str) -> ParseResult<cst::Statement> {
        self.run(&self.tokenize(input)?, |parser| parser.statement())
    }

    /// Parse a condition or filter expression.
    pub fn parse_expression(&self, input: &str) -> ParseResult<cst::Expression> {
        self.run(&self.tokenize(input)?, |parser| parser.expression())
    }

    /// Parse a key condition.
    pub fn parse_key_condition(&self, input: &str) -> ParseResult<cst::Expression> {
        self.run(&self.tokenize(input)?, |parser| parser.key_condition())
    }

    /// Parse a JSON object literal.
    pub fn parse_json_object(&self, input: &str) -> ParseResult<Value> {
        self.run(&self.tokenize(input)?, |parser| parser.json_object())
    }

    /// Run `rule` over `tokens` and reject anything left over.
    fn run<T>(
        &self,
        tokens: &[Token],
        rule: impl FnOnce(&mut Parser<'_>) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let mut parser = Parser::new(tokens, self.formatter);
        let output = rule(&mut parser)?;
        parser.finish()?;
        Ok(output)
    }

    /// Kinds that may follow `tokens` when parsed with `rule`.
    ///
    /// Returns `None` when the tokens are invalid before their end.
    #[must_use]
    pub fn predict(&self, rule: EntryRule, tokens: &[Token]) -> Option<BTreeSet<TokenKind>> {
        let mut parser = Parser::new(tokens, self.formatter);
        parser.predictions = Some(BTreeSet::new());
        let outcome = (rule.rule())(&mut parser).and_then(|_| parser.finish());
        match outcome {
            Ok(()) => parser.predictions,
            Err(_) if parser.at_end() => parser.predictions,
            Err(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parser cursor
// ---------------------------------------------------------------------------

/// Token cursor shared by all rules.
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    formatter: &'a dyn ErrorFormatter,
    /// Kinds checked at end of input, when predicting.
    predictions: Option<BTreeSet<TokenKind>>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], formatter: &'a dyn ErrorFormatter) -> Self {
        Self {
            tokens,
            pos: 0,
            formatter,
            predictions: None,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Return the current kind if it is one of `kinds`.
    ///
    /// At end of input the candidates are recorded for prediction.
    fn lookahead(&mut self, kinds: &[TokenKind]) -> Option<TokenKind> {
        match self.peek() {
            Some(token) => kinds.contains(&token.kind).then_some(token.kind),
            None => {
                if let Some(predictions) = self.predictions.as_mut() {
                    predictions.extend(kinds.iter().copied());
                }
                None
            }
        }
    }

    fn at(&mut self, kind: TokenKind) -> bool {
        self.lookahead(&[kind]).is_some()
    }

    /// Consume the current token if it is `kind`.
    fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.at(kind) { self.advance() } else { None }
    }

    /// Consume a mandatory `kind`, reporting `custom` when it is missing.
    fn consume(&mut self, kind: TokenKind, custom: Option<&str>) -> ParseResult<&'a Token> {
        self.eat(kind)
            .ok_or_else(|| self.formatter.mismatched_token(custom, self.peek()))
    }

    /// Image of a mandatory `kind`.
    fn consume_image(&mut self, kind: TokenKind, custom: &str) -> ParseResult<String> {
        self.consume(kind, Some(custom)).map(|t| t.image.clone())
    }

    fn no_viable(&self, custom: Option<&str>) -> ParseError {
        self.formatter.no_viable_alternative(custom, self.peek())
    }

    /// Reject unconsumed input.
    fn finish(&self) -> ParseResult<()> {
        match self.peek() {
            Some(token) => Err(self.formatter.not_all_input_parsed(token)),
            None => Ok(()),
        }
    }
}
