//! End-to-end tests for the DynaQL compiler.
//!
//! Each test compiles statement text through the public API and compares the
//! serialized descriptor with the expected JSON.
//!
//! ```text
//! cargo test -p dynaql-integration
//! ```

use std::sync::Once;

use dynaql_core::{Compiler, CompilerConfig};
use serde_json::Value;
use tracing::debug;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A compiler with a fresh collision index.
#[must_use]
pub fn compiler() -> Compiler {
    init_tracing();
    Compiler::new(CompilerConfig::default())
}

/// Compile `text` with a fresh compiler and serialize the descriptor.
///
/// # Panics
///
/// Panics when `text` does not compile.
#[must_use]
pub fn compile(text: &str) -> Value {
    let statement = compiler()
        .compile_statement(text)
        .unwrap_or_else(|e| panic!("failed to compile {text:?}: {e}"));
    debug!(%text, kind = statement.kind(), "compiled");
    serde_json::to_value(statement).unwrap_or_else(|e| panic!("failed to serialize: {e}"))
}

mod test_expression;
mod test_find;
mod test_import;
mod test_item;
mod test_on;
mod test_shared;
mod test_suggest;
mod test_table;
