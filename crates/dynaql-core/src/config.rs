//! Compiler configuration.

use std::env;

/// Compiler behaviour switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerConfig {
    /// Reset the collision index before every top-level compilation, so
    /// each result is independent of earlier calls.
    pub reset_per_statement: bool,
}

impl CompilerConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            reset_per_statement: env_bool("DYNAQL_RESET_PER_STATEMENT", false),
        }
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| parse_bool(&v))
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes" | "TRUE" | "YES")
}
