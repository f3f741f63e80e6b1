//! Parse errors and the messages they carry.
//!
//! The grammar never builds message text itself. It reports which failure
//! shape occurred, which custom message (if any) the rule registered at that
//! position, and the offending token; an [`ErrorFormatter`] turns that into
//! the final [`ParseError`].

use std::fmt;

use serde::Serialize;

use crate::token::Token;

/// Error returned for any malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No token pattern matched at some offset.
    #[error("{message}")]
    Lexical {
        /// Byte offset of the unrecognized character.
        offset: usize,
        /// Human-readable message.
        message: String,
    },
    /// A mandatory token was missing or of the wrong kind.
    #[error("{message}")]
    MismatchedToken {
        /// Human-readable message.
        message: String,
    },
    /// None of a rule's alternatives matched.
    #[error("{message}")]
    NoViableAlternative {
        /// Human-readable message.
        message: String,
    },
    /// The grammar matched a prefix of the input and stopped.
    #[error("{message}")]
    NotAllInputParsed {
        /// Human-readable message.
        message: String,
    },
    /// A repetition that needs at least one iteration had none.
    #[error("{message}")]
    EarlyExit {
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParseErrorKind {
    /// See [`ParseError::Lexical`].
    Lexical,
    /// See [`ParseError::MismatchedToken`].
    MismatchedToken,
    /// See [`ParseError::NoViableAlternative`].
    NoViableAlternative,
    /// See [`ParseError::NotAllInputParsed`].
    NotAllInputParsed,
    /// See [`ParseError::EarlyExit`].
    EarlyExit,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lexical => "Lexical",
            Self::MismatchedToken => "MismatchedToken",
            Self::NoViableAlternative => "NoViableAlternative",
            Self::NotAllInputParsed => "NotAllInputParsed",
            Self::EarlyExit => "EarlyExit",
        };
        f.write_str(name)
    }
}

impl ParseError {
    /// Which failure shape this is.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::Lexical { .. } => ParseErrorKind::Lexical,
            Self::MismatchedToken { .. } => ParseErrorKind::MismatchedToken,
            Self::NoViableAlternative { .. } => ParseErrorKind::NoViableAlternative,
            Self::NotAllInputParsed { .. } => ParseErrorKind::NotAllInputParsed,
            Self::EarlyExit { .. } => ParseErrorKind::EarlyExit,
        }
    }

    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Lexical { message, .. }
            | Self::MismatchedToken { message }
            | Self::NoViableAlternative { message }
            | Self::NotAllInputParsed { message }
            | Self::EarlyExit { message } => message,
        }
    }
}

/// Convenience result type for parsing.
pub type ParseResult<T> = Result<T, ParseError>;

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// Builds a [`ParseError`] for each failure shape.
///
/// `custom` is the message the grammar registered at the failing position;
/// `actual` is the token found there, `None` at end of input.
pub trait ErrorFormatter: fmt::Debug + Send + Sync {
    /// A mandatory token assertion failed.
    fn mismatched_token(&self, custom: Option<&str>, actual: Option<&Token>) -> ParseError;

    /// No alternative of a decision point matched.
    fn no_viable_alternative(&self, custom: Option<&str>, actual: Option<&Token>) -> ParseError;

    /// Parsing stopped before the last token.
    fn not_all_input_parsed(&self, first_unconsumed: &Token) -> ParseError;

    /// A one-or-more repetition matched nothing.
    fn early_exit(&self, custom: Option<&str>, actual: Option<&Token>) -> ParseError;

    /// No token pattern matched at `offset`.
    fn unrecognized_character(&self, offset: usize, found: char) -> ParseError;
}

/// Formatter producing the standard DynaQL messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorFormatter;

impl DefaultErrorFormatter {
    fn unexpected(actual: Option<&Token>, template: &str) -> String {
        actual.map_or_else(
            || messages::UNEXPECTED_END_OF_STATEMENT.to_owned(),
            |token| messages::fill(template, &token.image),
        )
    }
}

impl ErrorFormatter for DefaultErrorFormatter {
    fn mismatched_token(&self, custom: Option<&str>, actual: Option<&Token>) -> ParseError {
        let message = custom.map_or_else(
            || Self::unexpected(actual, messages::UNEXPECTED_TOKEN),
            str::to_owned,
        );
        ParseError::MismatchedToken { message }
    }

    fn no_viable_alternative(&self, custom: Option<&str>, actual: Option<&Token>) -> ParseError {
        let message = custom.map_or_else(
            || Self::unexpected(actual, messages::UNRECOGNIZED_COMMAND),
            str::to_owned,
        );
        ParseError::NoViableAlternative { message }
    }

    fn not_all_input_parsed(&self, first_unconsumed: &Token) -> ParseError {
        ParseError::NotAllInputParsed {
            message: messages::fill(messages::UNEXPECTED_TOKEN, &first_unconsumed.image),
        }
    }

    fn early_exit(&self, custom: Option<&str>, actual: Option<&Token>) -> ParseError {
        let message = custom.map_or_else(
            || Self::unexpected(actual, messages::UNRECOGNIZED_COMMAND),
            str::to_owned,
        );
        ParseError::EarlyExit { message }
    }

    fn unrecognized_character(&self, offset: usize, found: char) -> ParseError {
        ParseError::Lexical {
            offset,
            message: format!("Unrecognized character \"{found}\" at offset {offset}."),
        }
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Message registry. `?` in a template is replaced by a token image.
#[allow(missing_docs)]
pub mod messages {
    /// Generic mismatched token / trailing input.
    pub const UNEXPECTED_TOKEN: &str = "Unexpected token \"?\" found.";
    /// Generic no-viable-alternative.
    pub const UNRECOGNIZED_COMMAND: &str = "Unrecognized command \"?\" found.";
    /// Input ended where more was required.
    pub const UNEXPECTED_END_OF_STATEMENT: &str = "Unexpected end of statement.";
    /// Number literal with no finite value.
    pub const NUMBER_OUT_OF_RANGE: &str = "Number \"?\" is out of range.";

    pub const MISSING_OBJECT_ID: &str = "Missing an object ID.";
    pub const MISSING_ENTITY_NAME: &str = "Missing a table name.";
    pub const MISSING_PROPERTY_NAME: &str = "Missing a property name.";

    pub const GET_MISSING_FROM: &str = "Missing \"FROM\" clause from the GET statement.";
    pub const GET_MISSING_TABLE: &str = "Missing a table name from the GET statement.";

    pub const DELETE_MISSING_FROM: &str = "Missing \"FROM\" clause from the DELETE statement.";

    pub const FIND_MISSING_PROJECTIONS: &str =
        "Missing projections: use \"*\" or a list of property names.";
    pub const FIND_MISSING_PROJECTION: &str = "Missing a property name after \",\".";
    pub const FIND_MISSING_FROM: &str = "Missing \"FROM\" clause.";
    pub const FIND_MISSING_TABLE: &str = "Missing a table name after \"FROM\".";
    pub const FIND_MISSING_USING: &str = "Missing an index name after \"USING\".";
    pub const FIND_MISSING_RESUME: &str = "Missing a pagination token after \"RESUME\".";
    pub const FIND_MISSING_ORDER: &str = "Missing \"ASC\" or \"DESC\" after \"ORDER\".";
    pub const FIND_MISSING_LIMIT: &str = "Missing a number after \"LIMIT\".";

    pub const LIST_MISSING_BY_HASH: &str = "Missing a hash key name after \"BY\".";
    pub const LIST_MISSING_BY_RANGE: &str = "Missing a range key name after \",\".";

    pub const ON_MISSING_FROM: &str = "Missing \"FROM\" clause from the ON statement.";
    pub const OR_MISSING_EXPRESSION: &str =
        "Missing an expression: use \"SET\", \"ADD\", \"REMOVE\" or \"DELETE\".";
    pub const ON_SET_MISSING_EQUAL: &str = "Missing \"=\" in the SET action.";
    pub const ON_ADD_MISSING_NUMBER: &str = "Missing a number in the ADD action.";
    pub const ON_DELETE_MISSING_VALUE: &str = "Missing a value in the DELETE action.";

    pub const CREATE_TABLE_MISSING_FOR: &str = "Missing \"FOR\" clause from CREATE TABLE.";
    pub const CREATE_TABLE_MISSING_READ_CAPACITY: &str = "Missing the read capacity.";
    pub const CREATE_TABLE_MISSING_WRITE_CAPACITY: &str = "Missing the write capacity.";

    pub const DELETE_TABLE_MISSING_FOR: &str = "Missing \"FOR\" clause from DELETE TABLE.";
    pub const DELETE_TABLE_MISSING_ENTITY_NAME: &str = "Missing an entity name from DELETE TABLE.";

    pub const IMPORT_MISSING_FROM: &str = "Missing \"FROM\" clause from the IMPORT statement.";
    pub const IMPORT_MISSING_PACKAGE_NAME: &str = "Missing a quoted package name.";
    pub const IMPORT_MISSING_ALIAS: &str = "Missing an alias after \"AS\".";
    pub const IMPORT_MISSING_CLOSING_BRACE: &str = "Missing a closing \"}\" in the import list.";

    pub const EXPRESSION_MISSING_PARENTHESIS: &str =
        "Missing a closing parenthesis in the expression.";
    pub const EXPRESSION_MISSING_BETWEEN_AND: &str = "Missing \"AND\" in the BETWEEN expression.";
    pub const EXPRESSION_MISSING_IN_LIST: &str = "Missing \"(\" after \"IN\".";
    pub const FUNCTION_MISSING_ARGUMENT: &str = "Missing the second function argument.";
    pub const FUNCTION_MISSING_PARENTHESIS: &str = "Missing a closing parenthesis in the function.";

    pub const JSON_INVALID_OBJECT: &str = "Invalid JSON object: expected \"{\".";
    pub const JSON_MISSING_PROPERTY_NAME: &str = "Missing a property name in the JSON object.";
    pub const JSON_MISSING_PROPERTY_VALUE: &str = "Missing \":\" and a value after the property.";
    pub const JSON_INVALID_VALUE: &str = "Invalid JSON value.";
    pub const JSON_MISSING_CLOSING_BRACE: &str = "Missing a closing \"}\" in the JSON object.";
    pub const JSON_MISSING_CLOSING_BRACKET: &str = "Missing a closing \"]\" in the JSON array.";

    /// Substitute the first `?` in `template` with `image`.
    #[must_use]
    pub fn fill(template: &str, image: &str) -> String {
        template.replacen('?', image, 1)
    }
}
