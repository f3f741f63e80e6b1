//! Statement descriptor types for DynaQL.
//!
//! These are the values the compiler hands back to callers. Every type
//! serializes to camelCase JSON so a descriptor can be passed straight to a
//! DynamoDB client layer: expression clauses carry their own
//! `expressionAttributeNames` / `expressionAttributeValues` maps. Optional
//! clauses are omitted from the JSON when absent.

pub mod fragment;
pub mod statement;

pub use fragment::{
    AddClause, ConditionClause, DeleteClause, ExpressionFragment, FilterClause,
    KeyConditionClause, RemoveClause, SetClause,
};
pub use statement::{
    CreateTableStatement, DeleteStatement, DeleteTableStatement, DescribeStatement,
    ExplainStatement, FindStatement, GetStatement, ImportEntity, ImportStatement, InsertStatement,
    ListBy, ListStatement, ObjectId, OnStatement, ProvisionedCapacity, Statement,
    UnloadTableStatement, UpdateStatement,
};
