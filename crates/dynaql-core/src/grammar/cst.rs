//! Concrete syntax tree.
//!
//! One type per grammar rule and one variant per alternative, so the compiler
//! matches exhaustively instead of probing for optional children. Leaves keep
//! the raw token image; literal decoding happens in the compiler.
#![allow(missing_docs)]

use std::fmt;

use serde_json::Value;

/// `statement := EXPLAIN atomic | atomic`
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `EXPLAIN atomic`
    Explain(AtomicStatement),
    /// Any other statement.
    Atomic(AtomicStatement),
}

/// One statement kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicStatement {
    Get(Get),
    Delete(Delete),
    Find(Find),
    List(List),
    Insert(Insert),
    Update(Update),
    On(On),
    CreateTable(CreateTable),
    DeleteTable(DeleteTable),
    ShowTables,
    UnloadTable(String),
    Import(Import),
    Describe(String),
}

/// `STRING | NUMBER` object id, raw image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectId {
    String(String),
    Number(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Get {
    pub id: ObjectId,
    pub table: String,
    pub strongly_consistent: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub id: ObjectId,
    pub table: String,
    pub condition: Option<Expression>,
}

/// `*` or a list of property names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projections {
    All,
    Properties(Vec<String>),
}

/// Clauses shared by FIND and LIST after the source-specific part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOptions {
    /// Raw string image.
    pub resume: Option<String>,
    /// `true` for ASC.
    pub ascending: Option<bool>,
    /// Raw number image.
    pub limit: Option<String>,
    pub strongly_consistent: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Find {
    pub projections: Projections,
    pub table: String,
    pub index: Option<String>,
    pub key_condition: Option<Expression>,
    pub filter: Option<Expression>,
    pub page: PageOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub projections: Projections,
    pub table: String,
    pub index: Option<String>,
    /// Raw string images of the hash and optional range key.
    pub by: Option<(String, Option<String>)>,
    pub filter: Option<Expression>,
    pub page: PageOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub object: Value,
    pub table: String,
    pub condition: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub object: Value,
    pub table: String,
    pub condition: Option<Expression>,
    pub version_check: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct On {
    pub id: ObjectId,
    pub table: String,
    /// Actions in source order, across every clause.
    pub actions: Vec<Action>,
    pub condition: Option<Expression>,
    pub version_check: bool,
}

/// One update action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// `name = value`
    Set { name: String, value: Atomic },
    /// `name number`, raw number image.
    Add { name: String, value: String },
    /// `name`
    Remove { name: String },
    /// `name value`
    Delete { name: String, value: Atomic },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub entity: String,
    /// Raw number images of read and write capacity.
    pub capacity: Option<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTable {
    pub entity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub groups: Vec<ImportGroup>,
    /// Raw string image.
    pub package: String,
}

/// A bare import or a braced list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportGroup {
    Default(ImportItem),
    Named(Vec<ImportItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportItem {
    pub name: String,
    pub alias: Option<String>,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// `term ((AND | OR) term)*`, flat and left-associative.
///
/// Each operator is stored with its right operand, so source order is
/// preserved by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub first: Term,
    pub rest: Vec<(LogicalOp, Term)>,
}

/// Logical connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "<>"),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// High-precedence term.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// `NOT term`
    Not(Box<Term>),
    /// `( expression )`
    Group(Box<Expression>),
    /// `name op value`
    Comparison {
        name: String,
        op: CompareOp,
        value: Atomic,
    },
    /// `name BETWEEN low AND high`
    Between {
        name: String,
        low: Atomic,
        high: Atomic,
    },
    /// `name IN (values...)`
    In { name: String, values: Vec<Atomic> },
    /// Function predicate.
    Function(Function),
}

/// Function predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    AttributeExists { name: String },
    AttributeNotExists { name: String },
    AttributeType { name: String, kind: Atomic },
    BeginsWith { name: String, prefix: Atomic },
    Contains { name: String, operand: Atomic },
    Size { name: String, op: CompareOp, value: Atomic },
}

/// Literal operand, raw image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atomic {
    Number(String),
    String(String),
    Boolean(String),
}
