//! Tokenizer.

use tracing::trace;

use crate::error::{ErrorFormatter, ParseError, ParseResult, messages};
use crate::token::{Token, TokenKind, catalog, is_identifier_char};

/// Splits statement text into tokens, skipping whitespace.
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    formatter: &'a dyn ErrorFormatter,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `input`.
    #[must_use]
    pub fn new(input: &'a str, formatter: &'a dyn ErrorFormatter) -> Self {
        Self {
            input,
            pos: 0,
            formatter,
        }
    }

    /// Tokenize the whole input, failing on the first unrecognized character.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        trace!(count = tokens.len(), "tokenized input");
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn next_token(&mut self) -> ParseResult<Option<Token>> {
        self.skip_whitespace();
        let rest = &self.input[self.pos..];
        let Some(first) = rest.chars().next() else {
            return Ok(None);
        };

        let patterns = catalog().map_err(|e| ParseError::Lexical {
            offset: self.pos,
            message: e.to_string(),
        })?;

        for pattern in patterns {
            let Some(found) = pattern.regex.find(rest) else {
                continue;
            };
            if pattern.boundary && rest[found.end()..].starts_with(is_identifier_char) {
                continue;
            }
            let token = Token {
                kind: pattern.kind,
                image: found.as_str().to_owned(),
                offset: self.pos,
            };
            if token.kind == TokenKind::Number && !is_finite(&token.image) {
                return Err(ParseError::Lexical {
                    offset: self.pos,
                    message: messages::fill(messages::NUMBER_OUT_OF_RANGE, &token.image),
                });
            }
            self.pos += found.end();
            return Ok(Some(token));
        }

        Err(self.formatter.unrecognized_character(self.pos, first))
    }
}

/// Numbers must have a finite JSON form.
fn is_finite(image: &str) -> bool {
    image.parse::<f64>().is_ok_and(f64::is_finite)
}
