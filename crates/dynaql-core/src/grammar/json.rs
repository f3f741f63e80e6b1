//! Relaxed JSON literals: keys may be bare words.

use serde_json::{Map, Value};

use super::Parser;
use crate::error::{ParseResult, messages};
use crate::literal;
use crate::token::TokenKind;

const KEY_KINDS: &[TokenKind] = &[TokenKind::String, TokenKind::Identifier];

const VALUE_STARTS: &[TokenKind] = &[
    TokenKind::String,
    TokenKind::Number,
    TokenKind::Boolean,
    TokenKind::Null,
    TokenKind::LeftCurly,
    TokenKind::LeftBracket,
];

impl Parser<'_> {
    /// `json_object := "{" (property ("," property)*)? "}"`
    pub(super) fn json_object(&mut self) -> ParseResult<Value> {
        self.consume(TokenKind::LeftCurly, Some(messages::JSON_INVALID_OBJECT))?;
        let mut object = Map::new();
        if self.at_property_key() {
            self.property(&mut object)?;
            while self.eat(TokenKind::Comma).is_some() {
                self.property(&mut object)?;
            }
        }
        self.consume(
            TokenKind::RightCurly,
            Some(messages::JSON_MISSING_CLOSING_BRACE),
        )?;
        Ok(Value::Object(object))
    }

    /// Strings, identifiers and single-word keywords all name a property.
    /// Only the first two are offered as predictions.
    fn at_property_key(&mut self) -> bool {
        let keyword = self
            .peek()
            .is_some_and(|token| token.kind.is_single_word_keyword());
        self.lookahead(KEY_KINDS).is_some() || keyword
    }

    fn property(&mut self, object: &mut Map<String, Value>) -> ParseResult<()> {
        if !self.at_property_key() {
            return Err(self
                .formatter
                .mismatched_token(Some(messages::JSON_MISSING_PROPERTY_NAME), self.peek()));
        }
        let key = match self.advance() {
            Some(token) if token.kind == TokenKind::String => literal::json_string(&token.image),
            Some(token) => token.image.clone(),
            None => String::new(),
        };
        self.consume(TokenKind::Colon, Some(messages::JSON_MISSING_PROPERTY_VALUE))?;
        let value = self.json_value()?;
        object.insert(key, value);
        Ok(())
    }

    fn json_value(&mut self) -> ParseResult<Value> {
        match self.lookahead(VALUE_STARTS) {
            Some(TokenKind::LeftCurly) => self.json_object(),
            Some(TokenKind::LeftBracket) => self.json_array(),
            Some(kind) => {
                let image = self.advance().map(|t| t.image.as_str()).unwrap_or_default();
                Ok(match kind {
                    TokenKind::String => Value::String(literal::json_string(image)),
                    TokenKind::Number => literal::number(image),
                    TokenKind::Boolean => Value::Bool(literal::boolean(image)),
                    _ => Value::Null,
                })
            }
            None => Err(self.no_viable(Some(messages::JSON_INVALID_VALUE))),
        }
    }

    fn json_array(&mut self) -> ParseResult<Value> {
        self.advance();
        let mut items = Vec::new();
        if self.lookahead(VALUE_STARTS).is_some() {
            items.push(self.json_value()?);
            while self.eat(TokenKind::Comma).is_some() {
                items.push(self.json_value()?);
            }
        }
        self.consume(
            TokenKind::RightBracket,
            Some(messages::JSON_MISSING_CLOSING_BRACKET),
        )?;
        Ok(Value::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::error::{DefaultErrorFormatter, ParseError, ParseErrorKind, messages};
    use crate::grammar::{Cst, EntryRule, Grammar};

    fn parse(input: &str) -> Result<Value, ParseError> {
        match Grammar::new(&DefaultErrorFormatter).parse(EntryRule::JsonObject, input)? {
            Cst::JsonObject(value) => Ok(value),
            other => panic!("expected JsonObject, got {other:?}"),
        }
    }

    #[test]
    fn test_should_parse_nested_object() {
        let value = parse(r#"{id: 1, "name": "x", tags: ["a", true, null], meta: {score: 1.5}}"#)
            .unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "name": "x", "tags": ["a", true, null], "meta": {"score": 1.5}})
        );
    }

    #[test]
    fn test_should_decode_string_escapes() {
        let value = parse(r#"{k1: "hello, \"world\""}"#).unwrap();
        assert_eq!(value, json!({"k1": "hello, \"world\""}));
    }

    #[test]
    fn test_should_accept_keywords_as_keys() {
        let value = parse("{order: 1, limit: 2, from: 3}").unwrap();
        assert_eq!(value, json!({"order": 1, "limit": 2, "from": 3}));
    }

    #[test]
    fn test_should_parse_empty_containers() {
        assert_eq!(parse("{}").unwrap(), json!({}));
        assert_eq!(parse("{a: []}").unwrap(), json!({"a": []}));
    }

    #[test]
    fn test_should_report_json_errors() {
        let cases = [
            ("{", ParseErrorKind::MismatchedToken, messages::JSON_MISSING_CLOSING_BRACE),
            (r#"{"a"}"#, ParseErrorKind::MismatchedToken, messages::JSON_MISSING_PROPERTY_VALUE),
            (r#"{"a":}"#, ParseErrorKind::NoViableAlternative, messages::JSON_INVALID_VALUE),
            (r#"{"a":b}"#, ParseErrorKind::NoViableAlternative, messages::JSON_INVALID_VALUE),
            (r#"{"a":[1,}"#, ParseErrorKind::NoViableAlternative, messages::JSON_INVALID_VALUE),
            (r#"{"a":[}"#, ParseErrorKind::MismatchedToken, messages::JSON_MISSING_CLOSING_BRACKET),
            (r#"{"a":1,}"#, ParseErrorKind::MismatchedToken, messages::JSON_MISSING_PROPERTY_NAME),
            ("42", ParseErrorKind::MismatchedToken, messages::JSON_INVALID_OBJECT),
        ];
        for (input, kind, message) in cases {
            let err = parse(input).unwrap_err();
            assert_eq!(err.kind(), kind, "kind for {input:?}");
            assert_eq!(err.message(), message, "message for {input:?}");
        }
    }
}
