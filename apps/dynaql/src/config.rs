//! Command line configuration.

use dynaql_core::CompilerConfig;

/// Configuration for the `dynaql` binary.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Compiler settings.
    pub compiler: CompilerConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            pretty: false,
            compiler: CompilerConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self {
            compiler: CompilerConfig::from_env(),
            ..Self::default()
        };

        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("DYNAQL_PRETTY") {
            config.pretty = v == "1" || v.eq_ignore_ascii_case("true");
        }

        config
    }
}
