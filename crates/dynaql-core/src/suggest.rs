//! Next-token suggestions for partial statements.

use std::collections::BTreeSet;

use tracing::trace;

use crate::grammar::{EntryRule, Grammar};
use crate::token::TokenKind;

/// Labels of the token kinds that may follow `text`, sorted and unique.
///
/// Empty when `text` does not tokenize, is invalid before its end, or is
/// already complete with nothing allowed after it.
pub(crate) fn suggest(grammar: &Grammar<'_>, text: &str) -> Vec<String> {
    let Ok(tokens) = grammar.tokenize(text) else {
        trace!("no suggestions for untokenizable input");
        return Vec::new();
    };
    let labels: BTreeSet<&str> = grammar
        .predict(EntryRule::Statement, &tokens)
        .unwrap_or_default()
        .into_iter()
        .map(TokenKind::label)
        .collect();
    labels.into_iter().map(str::to_owned).collect()
}
