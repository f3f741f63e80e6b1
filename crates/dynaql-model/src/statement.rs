//! Statement descriptors.
//!
//! [`Statement`] is internally tagged on `type`, so `GET "1" FROM users`
//! serializes as `{"type": "get", "id": "1", "from": "users"}`.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::fragment::{
    AddClause, ConditionClause, DeleteClause, FilterClause, KeyConditionClause, RemoveClause,
    SetClause,
};

/// A compiled statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    /// `GET id FROM table [STRONGLY CONSISTENT]`
    Get(GetStatement),
    /// `DELETE id FROM table [WHERE expr]`
    Delete(DeleteStatement),
    /// `FIND projections FROM table ...`
    Find(FindStatement),
    /// `LIST projections FROM table ...`
    List(ListStatement),
    /// `INSERT {json} INTO table [WHERE expr]`
    Insert(InsertStatement),
    /// `UPDATE {json} FROM table [WHERE expr] [WITH VERSION CHECK]`
    Update(UpdateStatement),
    /// `ON id FROM table SET|ADD|REMOVE|DELETE ...`
    On(OnStatement),
    /// `CREATE TABLE FOR entity [WITH CAPACITY OF read write]`
    CreateTable(CreateTableStatement),
    /// `DELETE TABLE FOR entity`
    DeleteTable(DeleteTableStatement),
    /// `SHOW TABLES`
    ShowTables,
    /// `UNLOAD TABLE entity`
    UnloadTable(UnloadTableStatement),
    /// `IMPORT entities FROM "package"`
    Import(ImportStatement),
    /// `DESCRIBE entity`
    Describe(DescribeStatement),
    /// `EXPLAIN statement`
    Explain(ExplainStatement),
}

impl Statement {
    /// The `type` tag this statement serializes with.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Get(_) => "get",
            Self::Delete(_) => "delete",
            Self::Find(_) => "find",
            Self::List(_) => "list",
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::On(_) => "on",
            Self::CreateTable(_) => "create_table",
            Self::DeleteTable(_) => "delete_table",
            Self::ShowTables => "show_tables",
            Self::UnloadTable(_) => "unload_table",
            Self::Import(_) => "import",
            Self::Describe(_) => "describe",
            Self::Explain(_) => "explain",
        }
    }
}

/// Object identifier: either a quoted string or a number literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectId {
    /// Numeric id, e.g. `GET 42 FROM users`.
    Number(Number),
    /// String id, e.g. `GET "a1" FROM users`.
    String(String),
}

/// GET statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStatement {
    /// Object id.
    pub id: ObjectId,
    /// Table name.
    pub from: String,
    /// `Some(true)` when `STRONGLY CONSISTENT` was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strongly_consistent: Option<bool>,
}

/// DELETE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStatement {
    /// Object id.
    pub id: ObjectId,
    /// Table name.
    pub from: String,
    /// Optional condition.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionClause>,
}

/// FIND statement (key query).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindStatement {
    /// Projected attributes; `None` for `*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projections: Option<Vec<String>>,
    /// Table name.
    pub from: String,
    /// Index name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using: Option<String>,
    /// Key condition.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub key_condition: Option<KeyConditionClause>,
    /// Filter expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterClause>,
    /// Pagination token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    /// `true` for ascending, `false` for descending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<bool>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Number>,
    /// `Some(true)` when `STRONGLY CONSISTENT` was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strongly_consistent: Option<bool>,
}

/// Key attributes named by `LIST ... BY "hash", "range"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBy {
    /// Hash key attribute.
    pub hash: String,
    /// Range key attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

/// LIST statement (scan).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStatement {
    /// Projected attributes; `None` for `*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projections: Option<Vec<String>>,
    /// Table name.
    pub from: String,
    /// Index name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using: Option<String>,
    /// Key attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<ListBy>,
    /// Filter expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterClause>,
    /// Pagination token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    /// `true` for ascending, `false` for descending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<bool>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Number>,
    /// `Some(true)` when `STRONGLY CONSISTENT` was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strongly_consistent: Option<bool>,
}

/// INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertStatement {
    /// Object literal to insert.
    pub object: Value,
    /// Table name.
    pub into: String,
    /// Optional condition.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionClause>,
}

/// UPDATE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatement {
    /// Replacement object literal.
    pub object: Value,
    /// Table name.
    pub from: String,
    /// Optional condition.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionClause>,
    /// `Some(true)` when `WITH VERSION CHECK` was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_check: Option<bool>,
}

/// ON statement (in-place update).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnStatement {
    /// Object id.
    pub id: ObjectId,
    /// Table name.
    pub from: String,
    /// All `SET` actions, across every `SET` clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<SetClause>,
    /// All `ADD` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<AddClause>,
    /// All `REMOVE` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<RemoveClause>,
    /// All `DELETE` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<DeleteClause>,
    /// Optional condition.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionClause>,
    /// `Some(true)` when `WITH VERSION CHECK` was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_check: Option<bool>,
}

/// Provisioned read/write capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedCapacity {
    /// Read capacity units.
    pub read_capacity: Number,
    /// Write capacity units.
    pub write_capacity: Number,
}

/// CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableStatement {
    /// Entity the table is created for.
    #[serde(rename = "for")]
    pub entity: String,
    /// Optional provisioned capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_capacity_of: Option<ProvisionedCapacity>,
}

/// DELETE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTableStatement {
    /// Entity whose table is dropped.
    #[serde(rename = "for")]
    pub entity: String,
}

/// UNLOAD TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnloadTableStatement {
    /// Entity name.
    pub name: String,
}

/// DESCRIBE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeStatement {
    /// Entity name.
    pub name: String,
}

/// One imported entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEntity {
    /// Exported name.
    pub name: String,
    /// Local alias; equals `name` when no `AS` was given.
    #[serde(rename = "as")]
    pub alias: String,
    /// `true` for a bare import, `false` inside `{ ... }`.
    pub default: bool,
}

/// IMPORT statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStatement {
    /// Imported entities in source order.
    #[serde(rename = "entity")]
    pub entities: Vec<ImportEntity>,
    /// Package or file path.
    pub from: String,
}

/// EXPLAIN statement wrapping another statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainStatement {
    /// The explained statement.
    pub statement: Box<Statement>,
}
