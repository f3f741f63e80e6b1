//! Token kinds and the ordered pattern catalog.
//!
//! The catalog is tried top to bottom and the first match wins, so
//! multi-word keywords come before their one-word prefixes and every keyword
//! comes before [`TokenKind::Identifier`]. Keyword patterns are
//! case-insensitive and must end on an identifier boundary: `get` does not
//! match the start of `getter`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    // Statement keywords
    /// `explain`
    Explain,
    /// `get`
    Get,
    /// `from`
    From,
    /// `strongly consistent`
    StronglyConsistent,
    /// `create table`
    CreateTable,
    /// `for`
    For,
    /// `with capacity of`
    WithCapacityOf,
    /// `with version check`
    WithVersionCheck,
    /// `delete table`
    DeleteTable,
    /// `delete`
    Delete,
    /// `where`
    Where,
    /// `find`
    Find,
    /// `filter`
    Filter,
    /// `order`
    Order,
    /// `using`
    Using,
    /// `resume`
    Resume,
    /// `on`
    On,
    /// `add`
    Add,
    /// `remove`
    Remove,
    /// `set`
    Set,
    /// `as`
    As,
    /// `describe`
    Describe,
    /// `asc`
    Asc,
    /// `desc`
    Desc,
    /// `*`
    Star,
    /// `by`
    By,
    /// `limit`
    Limit,
    /// `unload table`
    UnloadTable,
    /// `show tables`
    ShowTables,
    /// `list`
    List,
    /// `insert`
    Insert,
    /// `into`
    Into,
    /// `import`
    Import,
    /// `update`
    Update,
    // Expression keywords
    /// `and`
    And,
    /// `or`
    Or,
    /// `in`
    In,
    /// `between`
    Between,
    /// `not`
    Not,
    // Functions, including their opening parenthesis
    /// `attribute_exists(`
    AttributeExists,
    /// `attribute_not_exists(`
    AttributeNotExists,
    /// `attribute_type(`
    AttributeType,
    /// `begins_with(`
    BeginsWith,
    /// `contains(`
    Contains,
    /// `size(`
    Size,
    // Literals
    /// `true` / `false`
    Boolean,
    /// `null`
    Null,
    /// Double-quoted string with JSON escapes.
    String,
    /// Attribute, table or index name.
    Identifier,
    /// JSON number.
    Number,
    // Punctuation
    /// `>=`
    GreaterThanEqual,
    /// `>`
    GreaterThan,
    /// `=`
    Equal,
    /// `<=`
    LessThanEqual,
    /// `<>`
    NotEqual,
    /// `<`
    LessThan,
    /// `(`
    LeftParenthesis,
    /// `)`
    RightParenthesis,
    /// `{`
    LeftCurly,
    /// `}`
    RightCurly,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
}

impl TokenKind {
    /// Human-readable label used by suggestions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Explain => "explain",
            Self::Get => "get",
            Self::From => "from",
            Self::StronglyConsistent => "strongly consistent",
            Self::CreateTable => "create table",
            Self::For => "for",
            Self::WithCapacityOf => "with capacity of",
            Self::WithVersionCheck => "with version check",
            Self::DeleteTable => "delete table",
            Self::Delete => "delete",
            Self::Where => "where",
            Self::Find => "find",
            Self::Filter => "filter",
            Self::Order => "order",
            Self::Using => "using",
            Self::Resume => "resume",
            Self::On => "on",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Set => "set",
            Self::As => "as",
            Self::Describe => "describe",
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::Star => "*",
            Self::By => "by",
            Self::Limit => "limit",
            Self::UnloadTable => "unload table",
            Self::ShowTables => "show tables",
            Self::List => "list",
            Self::Insert => "insert",
            Self::Into => "into",
            Self::Import => "import",
            Self::Update => "update",
            Self::And => "and",
            Self::Or => "or",
            Self::In => "in",
            Self::Between => "between",
            Self::Not => "not",
            Self::AttributeExists => "attribute_exists",
            Self::AttributeNotExists => "attribute_not_exists",
            Self::AttributeType => "attribute_type",
            Self::BeginsWith => "begins_with",
            Self::Contains => "contains",
            Self::Size => "size",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::String => "string",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::GreaterThanEqual => ">=",
            Self::GreaterThan => ">",
            Self::Equal => "=",
            Self::LessThanEqual => "<=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LeftParenthesis => "(",
            Self::RightParenthesis => ")",
            Self::LeftCurly => "{",
            Self::RightCurly => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Comma => ",",
            Self::Colon => ":",
        }
    }

    /// Whether this kind is a keyword made of a single word.
    ///
    /// JSON property keys accept these in place of an identifier.
    #[must_use]
    pub fn is_single_word_keyword(self) -> bool {
        !matches!(self, Self::Identifier | Self::String | Self::Number)
            && self.label().chars().all(|c| c.is_ascii_alphabetic())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Category.
    pub kind: TokenKind,
    /// Source text, without surrounding whitespace.
    pub image: String,
    /// Byte offset of the first character.
    pub offset: usize,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// One catalog entry.
#[derive(Debug)]
pub(crate) struct TokenPattern {
    pub(crate) kind: TokenKind,
    pub(crate) regex: Regex,
    /// The match must not be followed by an identifier character.
    pub(crate) boundary: bool,
}

/// Keyword: case-insensitive, words separated by any whitespace run.
const fn keyword(kind: TokenKind, words: &'static str) -> (TokenKind, &'static str, Pattern) {
    (kind, words, Pattern::Keyword)
}

const fn function(kind: TokenKind, name: &'static str) -> (TokenKind, &'static str, Pattern) {
    (kind, name, Pattern::Function)
}

const fn raw(kind: TokenKind, regex: &'static str) -> (TokenKind, &'static str, Pattern) {
    (kind, regex, Pattern::Raw)
}

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Keyword,
    Function,
    Raw,
}

/// Catalog source in match order.
const CATALOG_SOURCE: &[(TokenKind, &str, Pattern)] = &[
    keyword(TokenKind::Explain, "explain"),
    keyword(TokenKind::Get, "get"),
    keyword(TokenKind::From, "from"),
    keyword(TokenKind::StronglyConsistent, "strongly consistent"),
    keyword(TokenKind::CreateTable, "create table"),
    keyword(TokenKind::For, "for"),
    keyword(TokenKind::WithCapacityOf, "with capacity of"),
    keyword(TokenKind::WithVersionCheck, "with version check"),
    keyword(TokenKind::DeleteTable, "delete table"),
    keyword(TokenKind::Delete, "delete"),
    keyword(TokenKind::Where, "where"),
    keyword(TokenKind::Find, "find"),
    keyword(TokenKind::Filter, "filter"),
    keyword(TokenKind::Order, "order"),
    keyword(TokenKind::Using, "using"),
    keyword(TokenKind::Resume, "resume"),
    keyword(TokenKind::On, "on"),
    keyword(TokenKind::Add, "add"),
    keyword(TokenKind::Remove, "remove"),
    keyword(TokenKind::Set, "set"),
    keyword(TokenKind::As, "as"),
    keyword(TokenKind::Describe, "describe"),
    keyword(TokenKind::Asc, "asc"),
    keyword(TokenKind::Desc, "desc"),
    raw(TokenKind::Star, r"\*"),
    keyword(TokenKind::By, "by"),
    keyword(TokenKind::Limit, "limit"),
    keyword(TokenKind::UnloadTable, "unload table"),
    keyword(TokenKind::ShowTables, "show tables"),
    keyword(TokenKind::List, "list"),
    keyword(TokenKind::Insert, "insert"),
    keyword(TokenKind::Into, "into"),
    keyword(TokenKind::Import, "import"),
    keyword(TokenKind::Update, "update"),
    keyword(TokenKind::And, "and"),
    keyword(TokenKind::Or, "or"),
    keyword(TokenKind::In, "in"),
    keyword(TokenKind::Between, "between"),
    keyword(TokenKind::Not, "not"),
    function(TokenKind::AttributeExists, "attribute_exists"),
    function(TokenKind::AttributeNotExists, "attribute_not_exists"),
    function(TokenKind::AttributeType, "attribute_type"),
    function(TokenKind::BeginsWith, "begins_with"),
    function(TokenKind::Contains, "contains"),
    function(TokenKind::Size, "size"),
    keyword(TokenKind::Boolean, "true|false"),
    keyword(TokenKind::Null, "null"),
    raw(
        TokenKind::String,
        r#""(?:[^\\"]|\\(?:[bfnrt"\\/]|u[0-9a-fA-F]{4}))*""#,
    ),
    raw(TokenKind::Identifier, r"[a-zA-Z][a-zA-Z0-9_\-\.]*"),
    raw(TokenKind::Number, r"-?(?:0|[1-9]\d*)(?:\.\d+)?(?:[eE][+-]?\d+)?"),
    raw(TokenKind::GreaterThanEqual, ">="),
    raw(TokenKind::GreaterThan, ">"),
    raw(TokenKind::Equal, "="),
    raw(TokenKind::LessThanEqual, "<="),
    raw(TokenKind::NotEqual, "<>"),
    raw(TokenKind::LessThan, "<"),
    raw(TokenKind::LeftParenthesis, r"\("),
    raw(TokenKind::RightParenthesis, r"\)"),
    raw(TokenKind::LeftCurly, r"\{"),
    raw(TokenKind::RightCurly, r"\}"),
    raw(TokenKind::LeftBracket, r"\["),
    raw(TokenKind::RightBracket, r"\]"),
    raw(TokenKind::Comma, ","),
    raw(TokenKind::Colon, ":"),
];

static CATALOG: LazyLock<Result<Vec<TokenPattern>, regex::Error>> = LazyLock::new(compile_catalog);

fn compile_catalog() -> Result<Vec<TokenPattern>, regex::Error> {
    CATALOG_SOURCE
        .iter()
        .map(|&(kind, source, pattern)| {
            let (regex, boundary) = match pattern {
                Pattern::Keyword => {
                    let words = source.replace(' ', r"\s+");
                    (format!(r"^(?i:{words})"), true)
                }
                Pattern::Function => (format!(r"^(?i:{source})\s*\("), false),
                Pattern::Raw => (format!("^(?:{source})"), false),
            };
            Ok(TokenPattern {
                kind,
                regex: Regex::new(&regex)?,
                boundary,
            })
        })
        .collect()
}

/// The compiled catalog in match order.
pub(crate) fn catalog() -> Result<&'static [TokenPattern], &'static regex::Error> {
    (*CATALOG).as_ref().map(Vec::as_slice)
}

/// Characters that may continue an identifier.
pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}
