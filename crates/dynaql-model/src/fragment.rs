//! Compiled expression views.
//!
//! An [`ExpressionFragment`] is the generic result of compiling a boolean
//! expression. Statements embed it under clause-specific field names, so each
//! clause gets its own struct with the expression text renamed accordingly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder name map: `#placeholder` to original attribute name.
pub type AttributeNames = BTreeMap<String, String>;

/// Placeholder value map: `:placeholder` to literal value.
pub type AttributeValues = BTreeMap<String, Value>;

/// A compiled boolean expression with its placeholder maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionFragment {
    /// Expression text using `#name` / `:value` placeholders.
    pub expression: String,
    /// Attribute name placeholders referenced by `expression`.
    pub expression_attribute_names: AttributeNames,
    /// Attribute value placeholders referenced by `expression`.
    pub expression_attribute_values: AttributeValues,
}

/// The `WHERE` clause of DELETE, INSERT, UPDATE and ON statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionClause {
    /// Condition expression text.
    pub condition_expression: String,
    /// Attribute name placeholders.
    pub expression_attribute_names: AttributeNames,
    /// Attribute value placeholders.
    pub expression_attribute_values: AttributeValues,
}

/// The `WHERE` clause of a FIND statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyConditionClause {
    /// Key condition expression text.
    pub key_conditions: String,
    /// Attribute name placeholders.
    pub expression_attribute_names: AttributeNames,
    /// Attribute value placeholders.
    pub expression_attribute_values: AttributeValues,
}

/// The `FILTER` clause of FIND and LIST statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    /// Filter expression text.
    pub filter_expression: String,
    /// Attribute name placeholders.
    pub expression_attribute_names: AttributeNames,
    /// Attribute value placeholders.
    pub expression_attribute_values: AttributeValues,
}

impl From<ExpressionFragment> for ConditionClause {
    fn from(fragment: ExpressionFragment) -> Self {
        Self {
            condition_expression: fragment.expression,
            expression_attribute_names: fragment.expression_attribute_names,
            expression_attribute_values: fragment.expression_attribute_values,
        }
    }
}

impl From<ExpressionFragment> for KeyConditionClause {
    fn from(fragment: ExpressionFragment) -> Self {
        Self {
            key_conditions: fragment.expression,
            expression_attribute_names: fragment.expression_attribute_names,
            expression_attribute_values: fragment.expression_attribute_values,
        }
    }
}

impl From<ExpressionFragment> for FilterClause {
    fn from(fragment: ExpressionFragment) -> Self {
        Self {
            filter_expression: fragment.expression,
            expression_attribute_names: fragment.expression_attribute_names,
            expression_attribute_values: fragment.expression_attribute_values,
        }
    }
}

// ---------------------------------------------------------------------------
// Update action clauses
// ---------------------------------------------------------------------------

/// `SET` actions of an ON statement, e.g. `#name___1 = :name___1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetClause {
    /// One rendered assignment per action.
    pub set_expressions: Vec<String>,
    /// Attribute name placeholders.
    pub expression_attribute_names: AttributeNames,
    /// Attribute value placeholders.
    pub expression_attribute_values: AttributeValues,
}

/// `ADD` actions of an ON statement, e.g. `#count___1 :count___1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddClause {
    /// One rendered action per attribute.
    pub add_expressions: Vec<String>,
    /// Attribute name placeholders.
    pub expression_attribute_names: AttributeNames,
    /// Attribute value placeholders.
    pub expression_attribute_values: AttributeValues,
}

/// `REMOVE` actions of an ON statement, e.g. `#tags___1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveClause {
    /// One rendered action per attribute.
    pub remove_expressions: Vec<String>,
    /// Attribute name placeholders.
    pub expression_attribute_names: AttributeNames,
    /// Always empty; kept so every clause has the same shape.
    pub expression_attribute_values: AttributeValues,
}

/// `DELETE` actions of an ON statement, e.g. `#tags___1 :tags___1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClause {
    /// One rendered action per attribute.
    pub delete_expressions: Vec<String>,
    /// Attribute name placeholders.
    pub expression_attribute_names: AttributeNames,
    /// Attribute value placeholders.
    pub expression_attribute_values: AttributeValues,
}
