//! DynaQL command line compiler.
//!
//! Compiles statements, expressions or key conditions to JSON descriptors, or
//! lists the tokens that may follow a partial statement.
//!
//! # Usage
//!
//! ```text
//! dynaql 'FIND * FROM users WHERE id = 1'
//! dynaql --expression 'age > 21 and age < 65'
//! dynaql --suggest 'find * from users'
//! dynaql --pretty create table for books with capacity of 5 10
//! echo 'GET "1" FROM users' | dynaql
//! ```
//!
//! Without TEXT, every non-empty line of stdin is compiled in turn with one
//! shared collision index. Each input prints one JSON document; failures
//! print `{"error": kind, "message": text}` and make the exit status non-zero.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//! | `DYNAQL_PRETTY` | `false` | Pretty-print JSON output (same as `--pretty`) |
//! | `DYNAQL_RESET_PER_STATEMENT` | `false` | Restart placeholder numbering for every input |

mod config;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser};
use dynaql_core::{Compiler, ParseError, ParseErrorKind};
use dynaql_model::{ExpressionFragment, Statement};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    Ok(())
}

/// What each input is compiled as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Statement,
    Expression,
    KeyCondition,
    Json,
    Suggest,
}

#[derive(Debug, Parser)]
#[command(name = "dynaql", version)]
#[command(about = "Compile DynaQL statements to DynamoDB expression descriptors", long_about = None)]
struct Cli {
    #[command(flatten)]
    mode: ModeFlags,
    /// Pretty print the output
    #[arg(short, long)]
    pretty: bool,
    /// Text to compile; stdin lines are compiled when absent
    #[arg(trailing_var_arg = true)]
    text: Vec<String>,
}

/// Mutually exclusive input modes; none means a statement.
#[derive(Debug, Args)]
#[group(multiple = false)]
#[allow(clippy::struct_excessive_bools)]
struct ModeFlags {
    /// Compile a bare condition expression
    #[arg(short, long)]
    expression: bool,
    /// Compile a key condition (comparisons, BETWEEN and begins_with joined by AND)
    #[arg(short, long)]
    key_condition: bool,
    /// Parse a relaxed JSON object literal
    #[arg(short, long)]
    json: bool,
    /// List the tokens that may follow a partial statement
    #[arg(short, long)]
    suggest: bool,
}

impl ModeFlags {
    fn mode(&self) -> Mode {
        if self.expression {
            Mode::Expression
        } else if self.key_condition {
            Mode::KeyCondition
        } else if self.json {
            Mode::Json
        } else if self.suggest {
            Mode::Suggest
        } else {
            Mode::Statement
        }
    }
}

impl Cli {
    /// Trailing words joined with single spaces.
    fn text(&self) -> Option<String> {
        (!self.text.is_empty()).then(|| self.text.join(" "))
    }
}

/// One JSON document written per input.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Output {
    Statement(Statement),
    Fragment(ExpressionFragment),
    Object(Value),
    Suggestions(Vec<String>),
    Error {
        error: ParseErrorKind,
        message: String,
    },
}

impl From<ParseError> for Output {
    fn from(err: ParseError) -> Self {
        Self::Error {
            error: err.kind(),
            message: err.message().to_owned(),
        }
    }
}

fn compile(compiler: &mut Compiler, mode: Mode, input: &str) -> Output {
    let result = match mode {
        Mode::Statement => compiler.compile_statement(input).map(Output::Statement),
        Mode::Expression => compiler.compile_expression(input).map(Output::Fragment),
        Mode::KeyCondition => compiler.compile_key_condition(input).map(Output::Fragment),
        Mode::Json => compiler.parse_json_object(input).map(Output::Object),
        Mode::Suggest => Ok(Output::Suggestions(compiler.suggest(input))),
    };
    result.unwrap_or_else(Output::from)
}

fn render(output: &Output, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(output)
    } else {
        serde_json::to_string(output)
    }
    .context("failed to serialize output")
}

fn read_inputs(cli: &Cli) -> Result<Vec<String>> {
    if let Some(text) = cli.text() {
        return Ok(vec![text]);
    }
    let mut inputs = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if !line.trim().is_empty() {
            inputs.push(line);
        }
    }
    Ok(inputs)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env();
    init_tracing(&config.log_level)?;
    debug!(?config, ?cli, "starting dynaql");

    let mode = cli.mode.mode();
    let pretty = cli.pretty || config.pretty;
    let inputs = read_inputs(&cli)?;
    let mut compiler = Compiler::new(config.compiler.clone());
    let mut stdout = io::stdout().lock();
    let mut failures = 0_usize;

    for input in &inputs {
        let output = compile(&mut compiler, mode, input);
        if let Output::Error { error, message } = &output {
            warn!(%error, %message, input = %input, "compilation failed");
            failures += 1;
        }
        writeln!(stdout, "{}", render(&output, pretty)?)
            .context("failed to write output")?;
    }

    info!(inputs = inputs.len(), failures, "done");
    if failures > 0 {
        anyhow::bail!("{failures} of {} inputs failed to compile", inputs.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(list: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dynaql").chain(list.iter().copied())).unwrap()
    }

    #[test]
    fn test_should_parse_mode_flags() {
        assert_eq!(cli(&[]).mode.mode(), Mode::Statement);
        assert_eq!(cli(&["--expression", "a = 1"]).mode.mode(), Mode::Expression);
        assert_eq!(cli(&["-k"]).mode.mode(), Mode::KeyCondition);
        assert_eq!(cli(&["-j"]).mode.mode(), Mode::Json);
        assert_eq!(cli(&["--suggest"]).mode.mode(), Mode::Suggest);
        assert!(cli(&["-p", "show tables"]).pretty);
    }

    #[test]
    fn test_should_join_words_into_text() {
        let parsed = cli(&["get", "1", "from", "users"]);
        assert_eq!(parsed.text().as_deref(), Some("get 1 from users"));
        assert_eq!(cli(&["--json"]).text(), None);
    }

    #[test]
    fn test_should_keep_flag_like_words_after_text() {
        let parsed = cli(&["-e", "a", "=", "-1"]);
        assert_eq!(parsed.mode.mode(), Mode::Expression);
        assert_eq!(parsed.text().as_deref(), Some("a = -1"));
    }

    #[test]
    fn test_should_reject_unknown_flag() {
        assert!(Cli::try_parse_from(["dynaql", "--nope"]).is_err());
    }

    #[test]
    fn test_should_reject_conflicting_modes() {
        let err = Cli::try_parse_from(["dynaql", "-e", "-s", "a"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_should_verify_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_should_render_errors_as_json() {
        let mut compiler = Compiler::default();
        let output = compile(&mut compiler, Mode::Statement, "get 1");
        let rendered: Value = serde_json::from_str(&render(&output, false).unwrap()).unwrap();
        assert_eq!(
            rendered,
            serde_json::json!({
                "error": "MismatchedToken",
                "message": "Missing \"FROM\" clause from the GET statement.",
            })
        );
    }

    #[test]
    fn test_should_render_statement_descriptor() {
        let mut compiler = Compiler::default();
        let output = compile(&mut compiler, Mode::Statement, "describe users");
        assert_eq!(
            render(&output, false).unwrap(),
            r#"{"type":"describe","name":"users"}"#
        );
    }
}
