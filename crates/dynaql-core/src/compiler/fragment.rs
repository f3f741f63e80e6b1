//! Placeholder-aware expression fragments.
//!
//! A [`Fragment`] keeps its text as pieces so placeholders can be renamed
//! without rescanning strings. Every value placeholder belongs to the name
//! placeholder it was derived from; renaming a name renames its values with
//! it, which keeps `#a` and `:a_between_1` paired after a collision.

use std::collections::BTreeMap;

use dynaql_model::ExpressionFragment;
use dynaql_model::fragment::{AttributeNames, AttributeValues};
use serde_json::Value;
use tracing::trace;

use super::context::CompilationContext;
use crate::grammar::cst::LogicalOp;

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Text(String),
    Name(String),
    Value(String),
}

/// The name group a value placeholder belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Owner {
    name: String,
    /// Text after the stem, e.g. `_between_1`.
    suffix: String,
}

/// A compiled expression subtree.
#[derive(Debug, Clone, Default)]
pub(crate) struct Fragment {
    pieces: Vec<Piece>,
    names: AttributeNames,
    values: AttributeValues,
    owners: BTreeMap<String, Owner>,
}

impl Fragment {
    pub(crate) fn text(mut self, text: &str) -> Self {
        self.pieces.push(Piece::Text(text.to_owned()));
        self
    }

    /// Append `#stem`, standing for `attribute`.
    pub(crate) fn name(mut self, stem: &str, attribute: &str) -> Self {
        let key = format!("#{stem}");
        self.names.insert(key.clone(), attribute.to_owned());
        self.pieces.push(Piece::Name(key));
        self
    }

    /// Append `:stem<suffix>`, owned by `#stem`.
    pub(crate) fn value(mut self, stem: &str, suffix: &str, value: Value) -> Self {
        let key = format!(":{stem}{suffix}");
        self.values.insert(key.clone(), value);
        self.owners.insert(
            key.clone(),
            Owner {
                name: format!("#{stem}"),
                suffix: suffix.to_owned(),
            },
        );
        self.pieces.push(Piece::Value(key));
        self
    }

    /// Surround the whole fragment with literal text.
    pub(crate) fn wrap(mut self, prefix: &str, suffix: &str) -> Self {
        self.pieces.insert(0, Piece::Text(prefix.to_owned()));
        self.pieces.push(Piece::Text(suffix.to_owned()));
        self
    }

    /// `self <op> right`, renaming right-hand placeholders that collide.
    pub(crate) fn merge(
        mut self,
        op: LogicalOp,
        mut right: Fragment,
        context: &mut CompilationContext,
    ) -> Self {
        right.avoid(&self.names, &self.values, context);
        self.pieces.push(Piece::Text(format!(" {op} ")));
        self.pieces.append(&mut right.pieces);
        self.names.append(&mut right.names);
        self.values.append(&mut right.values);
        self.owners.append(&mut right.owners);
        self
    }

    /// Rename every name group that collides with `names` or whose values
    /// collide with `values`.
    pub(crate) fn avoid(
        &mut self,
        names: &AttributeNames,
        values: &AttributeValues,
        context: &mut CompilationContext,
    ) {
        for name in self.name_order() {
            let owned: Vec<(String, String)> = self
                .owners
                .iter()
                .filter(|(_, owner)| owner.name == name)
                .map(|(key, owner)| (key.clone(), owner.suffix.clone()))
                .collect();
            let collides =
                names.contains_key(&name) || owned.iter().any(|(key, _)| values.contains_key(key));
            if !collides {
                continue;
            }

            let stem = name.strip_prefix('#').unwrap_or(&name).to_owned();
            loop {
                let index = context.next_index();
                let new_name = format!("#{stem}___{index}");
                let renamed: Vec<(String, String)> = owned
                    .iter()
                    .map(|(key, suffix)| (key.clone(), format!(":{stem}___{index}{suffix}")))
                    .collect();
                let taken = names.contains_key(&new_name)
                    || self.names.contains_key(&new_name)
                    || renamed.iter().any(|(_, key)| {
                        values.contains_key(key) || self.values.contains_key(key)
                    });
                if taken {
                    continue;
                }
                trace!(from = %name, to = %new_name, "renamed colliding placeholder");
                self.rename(&name, &new_name, &renamed);
                break;
            }
        }
    }

    fn name_order(&self) -> Vec<String> {
        let mut order: Vec<String> = Vec::new();
        for piece in &self.pieces {
            if let Piece::Name(key) = piece
                && !order.contains(key)
            {
                order.push(key.clone());
            }
        }
        order
    }

    fn rename(&mut self, old: &str, new: &str, values: &[(String, String)]) {
        for piece in &mut self.pieces {
            match piece {
                Piece::Name(key) if *key == old => *key = new.to_owned(),
                Piece::Value(key) => {
                    if let Some((_, renamed)) = values.iter().find(|(from, _)| *from == *key) {
                        *key = renamed.clone();
                    }
                }
                _ => {}
            }
        }
        if let Some(attribute) = self.names.remove(old) {
            self.names.insert(new.to_owned(), attribute);
        }
        for (from, to) in values {
            if let Some(value) = self.values.remove(from) {
                self.values.insert(to.clone(), value);
            }
            if let Some(mut owner) = self.owners.remove(from) {
                new.clone_into(&mut owner.name);
                self.owners.insert(to.clone(), owner);
            }
        }
    }

    pub(crate) fn names(&self) -> &AttributeNames {
        &self.names
    }

    pub(crate) fn values(&self) -> &AttributeValues {
        &self.values
    }

    fn render(&self) -> String {
        self.pieces
            .iter()
            .map(|piece| match piece {
                Piece::Text(text) | Piece::Name(text) | Piece::Value(text) => text.as_str(),
            })
            .collect()
    }
}

impl From<Fragment> for ExpressionFragment {
    fn from(fragment: Fragment) -> Self {
        Self {
            expression: fragment.render(),
            expression_attribute_names: fragment.names,
            expression_attribute_values: fragment.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn comparison(stem: &str, op: &str, value: Value) -> Fragment {
        Fragment::default()
            .name(stem, stem)
            .text(&format!(" {op} "))
            .value(stem, "", value)
    }

    #[test]
    fn test_should_render_pieces_in_order() {
        let fragment: ExpressionFragment = comparison("age", ">", json!(21)).into();
        assert_eq!(fragment.expression, "#age > :age");
        assert_eq!(fragment.expression_attribute_names["#age"], "age");
        assert_eq!(fragment.expression_attribute_values[":age"], json!(21));
    }

    #[test]
    fn test_should_rename_right_side_on_collision() {
        let mut context = CompilationContext::new();
        let merged = comparison("age", ">", json!(21)).merge(
            LogicalOp::And,
            comparison("age", "<", json!(65)),
            &mut context,
        );
        let fragment: ExpressionFragment = merged.into();
        assert_eq!(fragment.expression, "#age > :age and #age___1 < :age___1");
        assert_eq!(fragment.expression_attribute_names["#age___1"], "age");
        assert_eq!(fragment.expression_attribute_values[":age___1"], json!(65));
    }

    #[test]
    fn test_should_keep_distinct_names_untouched() {
        let mut context = CompilationContext::new();
        let merged = comparison("a", "=", json!(1)).merge(
            LogicalOp::Or,
            comparison("b", "=", json!(2)),
            &mut context,
        );
        let fragment: ExpressionFragment = merged.into();
        assert_eq!(fragment.expression, "#a = :a or #b = :b");
        assert_eq!(context.current_index(), 0);
    }

    #[test]
    fn test_should_rename_owned_values_together() {
        let mut context = CompilationContext::new();
        let left = Fragment::default()
            .name("a_between_1", "a_between_1")
            .text(" = ")
            .value("a_between_1", "", json!(0));
        let right = Fragment::default()
            .name("a", "a")
            .text(" between ")
            .value("a", "_between_1", json!(1))
            .text(" and ")
            .value("a", "_between_2", json!(2));
        let fragment: ExpressionFragment = left.merge(LogicalOp::And, right, &mut context).into();
        assert_eq!(
            fragment.expression,
            "#a_between_1 = :a_between_1 and #a___1 between :a___1_between_1 and :a___1_between_2"
        );
        assert_eq!(fragment.expression_attribute_values.len(), 3);
    }

    #[test]
    fn test_should_redraw_when_renamed_key_is_taken() {
        let mut context = CompilationContext::new();
        let left = comparison("a", "=", json!(1)).merge(
            LogicalOp::And,
            comparison("a___1", "=", json!(2)),
            &mut context,
        );
        let fragment: ExpressionFragment = left
            .merge(LogicalOp::And, comparison("a", "=", json!(3)), &mut context)
            .into();
        assert_eq!(fragment.expression, "#a = :a and #a___1 = :a___1 and #a___2 = :a___2");
    }

    #[test]
    fn test_should_wrap_text() {
        let fragment: ExpressionFragment =
            comparison("a", "=", json!(true)).wrap("not (", ")").into();
        assert_eq!(fragment.expression, "not (#a = :a)");
    }
}
