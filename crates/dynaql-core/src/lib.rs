//! DynaQL compiler: a small query language compiled to DynamoDB expressions.
//!
//! Statements such as `FIND * FROM users WHERE id = 1 FILTER age > 21` are
//! tokenized, parsed into a typed concrete syntax tree, and lowered to a
//! [`Statement`] descriptor whose expression clauses use `#name` / `:value`
//! placeholders with their attribute maps.
//!
//! # Architecture
//!
//! ```text
//! text --> Lexer (ordered token catalog)
//!             |
//!             v
//!          Grammar (entry-rule table, ErrorFormatter)
//!             |
//!             v
//!          Compiler (CompilationContext, placeholder merge)
//!             |
//!             v
//!          Statement / ExpressionFragment
//! ```
//!
//! The free functions below share one process-wide [`Compiler`] behind a
//! mutex, so the collision index persists across calls until
//! [`reset_collision_index`]. Construct a [`Compiler`] directly for an
//! independent index.

pub mod compiler;
pub mod config;
pub mod error;
pub mod grammar;
pub mod lexer;
mod literal;
mod suggest;
pub mod token;

use std::sync::LazyLock;

pub use compiler::{CompilationContext, Compiler};
pub use config::CompilerConfig;
pub use dynaql_model::{ExpressionFragment, Statement};
pub use error::{DefaultErrorFormatter, ErrorFormatter, ParseError, ParseErrorKind, ParseResult};
use parking_lot::Mutex;
use serde_json::Value;

static SHARED: LazyLock<Mutex<Compiler>> =
    LazyLock::new(|| Mutex::new(Compiler::new(CompilerConfig::from_env())));

/// Compile one statement with the shared compiler.
pub fn compile_statement(text: &str) -> ParseResult<Statement> {
    SHARED.lock().compile_statement(text)
}

/// Compile a condition or filter expression with the shared compiler.
pub fn compile_expression(text: &str) -> ParseResult<ExpressionFragment> {
    SHARED.lock().compile_expression(text)
}

/// Compile a key condition with the shared compiler.
pub fn compile_key_condition(text: &str) -> ParseResult<ExpressionFragment> {
    SHARED.lock().compile_key_condition(text)
}

/// Parse a relaxed JSON object literal.
pub fn parse_json_object(text: &str) -> ParseResult<Value> {
    SHARED.lock().parse_json_object(text)
}

/// Labels of the tokens that may follow `text`.
#[must_use]
pub fn suggest(text: &str) -> Vec<String> {
    SHARED.lock().suggest(text)
}

/// Restart the shared collision index from 1.
pub fn reset_collision_index() {
    SHARED.lock().reset_collision_index();
}
