//! Semantic compiler: statement text to descriptors.
//!
//! A [`Compiler`] owns the [`CompilationContext`] whose collision index keeps
//! placeholders unique. The index is shared by every clause of one statement
//! and, unless [`CompilerConfig::reset_per_statement`] is set, carries over
//! between calls until [`Compiler::reset_collision_index`].

mod context;
mod expression;
mod fragment;
mod statement;

use dynaql_model::{ExpressionFragment, Statement};
use serde_json::Value;
use tracing::debug;

pub use self::context::CompilationContext;
use crate::config::CompilerConfig;
use crate::error::{DefaultErrorFormatter, ErrorFormatter, ParseResult};
use crate::grammar::Grammar;
use crate::suggest;

/// Compiles DynaQL text.
///
/// Compilation takes `&mut self`; share one instance behind a lock.
#[derive(Debug)]
pub struct Compiler {
    config: CompilerConfig,
    context: CompilationContext,
    formatter: Box<dyn ErrorFormatter>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl Compiler {
    /// Create a compiler reporting errors with [`DefaultErrorFormatter`].
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            context: CompilationContext::new(),
            formatter: Box::new(DefaultErrorFormatter),
        }
    }

    /// Replace the error formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl ErrorFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// The collision state.
    #[must_use]
    pub fn context(&self) -> &CompilationContext {
        &self.context
    }

    fn grammar(&self) -> Grammar<'_> {
        Grammar::new(self.formatter.as_ref())
    }

    fn begin(&mut self) {
        if self.config.reset_per_statement {
            self.context.reset();
        }
    }

    /// Compile one statement.
    pub fn compile_statement(&mut self, text: &str) -> ParseResult<Statement> {
        let tree = self.grammar().parse_statement(text)?;
        self.begin();
        let statement = statement::statement(&tree, &mut self.context);
        debug!(
            kind = statement.kind(),
            collision_index = self.context.current_index(),
            "compiled statement"
        );
        Ok(statement)
    }

    /// Compile a standalone condition or filter expression.
    pub fn compile_expression(&mut self, text: &str) -> ParseResult<ExpressionFragment> {
        let tree = self.grammar().parse_expression(text)?;
        self.begin();
        let fragment = ExpressionFragment::from(expression::expression(&tree, &mut self.context));
        debug!(expression = %fragment.expression, "compiled expression");
        Ok(fragment)
    }

    /// Compile a key condition: comparisons, AND/OR and parentheses only.
    pub fn compile_key_condition(&mut self, text: &str) -> ParseResult<ExpressionFragment> {
        let tree = self.grammar().parse_key_condition(text)?;
        self.begin();
        let fragment = ExpressionFragment::from(expression::expression(&tree, &mut self.context));
        debug!(expression = %fragment.expression, "compiled key condition");
        Ok(fragment)
    }

    /// Parse a relaxed JSON object literal.
    pub fn parse_json_object(&self, text: &str) -> ParseResult<Value> {
        self.grammar().parse_json_object(text)
    }

    /// Labels of the tokens that may follow `text`, sorted and unique.
    #[must_use]
    pub fn suggest(&self, text: &str) -> Vec<String> {
        suggest::suggest(&self.grammar(), text)
    }

    /// Restart collision numbering from 1.
    pub fn reset_collision_index(&mut self) {
        self.context.reset();
    }
}
