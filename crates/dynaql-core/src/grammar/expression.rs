//! Condition, filter and key-condition rules.

use super::Parser;
use super::cst::{Atomic, CompareOp, Expression, Function, LogicalOp, Term};
use crate::error::{ParseResult, messages};
use crate::token::TokenKind;

const LOGICAL_OPS: &[TokenKind] = &[TokenKind::And, TokenKind::Or];

const COMPARE_OPS: &[TokenKind] = &[
    TokenKind::Equal,
    TokenKind::NotEqual,
    TokenKind::LessThan,
    TokenKind::LessThanEqual,
    TokenKind::GreaterThan,
    TokenKind::GreaterThanEqual,
];

const ATOMICS: &[TokenKind] = &[TokenKind::Number, TokenKind::String, TokenKind::Boolean];

const TERM_STARTS: &[TokenKind] = &[
    TokenKind::Not,
    TokenKind::LeftParenthesis,
    TokenKind::AttributeExists,
    TokenKind::AttributeNotExists,
    TokenKind::AttributeType,
    TokenKind::BeginsWith,
    TokenKind::Contains,
    TokenKind::Size,
    TokenKind::Identifier,
];

const KEY_TERM_STARTS: &[TokenKind] = &[TokenKind::LeftParenthesis, TokenKind::Identifier];

impl Parser<'_> {
    /// `expression := term ((AND | OR) term)*`
    pub(super) fn expression(&mut self) -> ParseResult<Expression> {
        self.logical_chain(Self::term)
    }

    /// `key_condition := key_term ((AND | OR) key_term)*`
    pub(super) fn key_condition(&mut self) -> ParseResult<Expression> {
        self.logical_chain(Self::key_term)
    }

    fn logical_chain(
        &mut self,
        term: fn(&mut Self) -> ParseResult<Term>,
    ) -> ParseResult<Expression> {
        let first = term(self)?;
        let mut rest = Vec::new();
        while let Some(kind) = self.lookahead(LOGICAL_OPS) {
            self.advance();
            let op = if kind == TokenKind::And {
                LogicalOp::And
            } else {
                LogicalOp::Or
            };
            rest.push((op, term(self)?));
        }
        Ok(Expression { first, rest })
    }

    fn term(&mut self) -> ParseResult<Term> {
        match self.lookahead(TERM_STARTS) {
            Some(TokenKind::Not) => {
                self.advance();
                Ok(Term::Not(Box::new(self.term()?)))
            }
            Some(TokenKind::LeftParenthesis) => self.group(Self::expression),
            Some(TokenKind::Identifier) => self.identifier_term(),
            Some(function) => self.function(function).map(Term::Function),
            None => Err(self.no_viable(None)),
        }
    }

    fn key_term(&mut self) -> ParseResult<Term> {
        match self.lookahead(KEY_TERM_STARTS) {
            Some(TokenKind::LeftParenthesis) => self.group(Self::key_condition),
            Some(_) => {
                let name = self.identifier()?;
                let op = self.compare_op()?;
                let value = self.atomic(None)?;
                Ok(Term::Comparison { name, op, value })
            }
            None => Err(self.no_viable(None)),
        }
    }

    fn group(&mut self, inner: fn(&mut Self) -> ParseResult<Expression>) -> ParseResult<Term> {
        self.advance();
        let expression = inner(self)?;
        self.consume(
            TokenKind::RightParenthesis,
            Some(messages::EXPRESSION_MISSING_PARENTHESIS),
        )?;
        Ok(Term::Group(Box::new(expression)))
    }

    /// Comparison, BETWEEN or IN, chosen by the token after the identifier.
    fn identifier_term(&mut self) -> ParseResult<Term> {
        let name = self.identifier()?;
        let mut candidates = COMPARE_OPS.to_vec();
        candidates.extend([TokenKind::Between, TokenKind::In]);
        match self.lookahead(&candidates) {
            Some(TokenKind::Between) => {
                self.advance();
                let low = self.atomic(None)?;
                self.consume(TokenKind::And, Some(messages::EXPRESSION_MISSING_BETWEEN_AND))?;
                let high = self.atomic(None)?;
                Ok(Term::Between { name, low, high })
            }
            Some(TokenKind::In) => {
                self.advance();
                self.consume(
                    TokenKind::LeftParenthesis,
                    Some(messages::EXPRESSION_MISSING_IN_LIST),
                )?;
                let mut values = vec![self.atomic(None)?];
                while self.eat(TokenKind::Comma).is_some() {
                    values.push(self.atomic(None)?);
                }
                self.consume(
                    TokenKind::RightParenthesis,
                    Some(messages::EXPRESSION_MISSING_PARENTHESIS),
                )?;
                Ok(Term::In { name, values })
            }
            Some(_) => {
                let op = self.compare_op()?;
                let value = self.atomic(None)?;
                Ok(Term::Comparison { name, op, value })
            }
            None => Err(self.no_viable(None)),
        }
    }

    /// Function predicate; the current token is the function keyword.
    fn function(&mut self, kind: TokenKind) -> ParseResult<Function> {
        self.advance();
        let name = self.property_name()?;
        let function = match kind {
            TokenKind::AttributeExists => Function::AttributeExists { name },
            TokenKind::AttributeNotExists => Function::AttributeNotExists { name },
            TokenKind::AttributeType => Function::AttributeType {
                name,
                kind: self.string_argument()?,
            },
            TokenKind::BeginsWith => Function::BeginsWith {
                name,
                prefix: self.string_argument()?,
            },
            TokenKind::Contains => {
                self.consume(TokenKind::Comma, Some(messages::FUNCTION_MISSING_ARGUMENT))?;
                Function::Contains {
                    name,
                    operand: self.atomic(None)?,
                }
            }
            _ => {
                self.close_function()?;
                let op = self.compare_op()?;
                let value = self.atomic(None)?;
                return Ok(Function::Size { name, op, value });
            }
        };
        self.close_function()?;
        Ok(function)
    }

    fn string_argument(&mut self) -> ParseResult<Atomic> {
        self.consume(TokenKind::Comma, Some(messages::FUNCTION_MISSING_ARGUMENT))?;
        self.consume_image(TokenKind::String, messages::FUNCTION_MISSING_ARGUMENT)
            .map(Atomic::String)
    }

    fn close_function(&mut self) -> ParseResult<()> {
        self.consume(
            TokenKind::RightParenthesis,
            Some(messages::FUNCTION_MISSING_PARENTHESIS),
        )
        .map(|_| ())
    }

    fn compare_op(&mut self) -> ParseResult<CompareOp> {
        let op = match self.lookahead(COMPARE_OPS) {
            Some(TokenKind::Equal) => CompareOp::Eq,
            Some(TokenKind::NotEqual) => CompareOp::Ne,
            Some(TokenKind::LessThan) => CompareOp::Lt,
            Some(TokenKind::LessThanEqual) => CompareOp::Le,
            Some(TokenKind::GreaterThan) => CompareOp::Gt,
            Some(_) => CompareOp::Ge,
            None => return Err(self.no_viable(None)),
        };
        self.advance();
        Ok(op)
    }

    /// `atomic := NUMBER | STRING | BOOLEAN`
    pub(super) fn atomic(&mut self, custom: Option<&str>) -> ParseResult<Atomic> {
        let Some(kind) = self.lookahead(ATOMICS) else {
            return Err(self.no_viable(custom));
        };
        let image = self.advance().map(|t| t.image.clone()).unwrap_or_default();
        Ok(match kind {
            TokenKind::Number => Atomic::Number(image),
            TokenKind::String => Atomic::String(image),
            _ => Atomic::Boolean(image),
        })
    }

    fn identifier(&mut self) -> ParseResult<String> {
        self.consume(TokenKind::Identifier, None).map(|t| t.image.clone())
    }

    pub(super) fn property_name(&mut self) -> ParseResult<String> {
        self.consume_image(TokenKind::Identifier, messages::MISSING_PROPERTY_NAME)
    }
}
