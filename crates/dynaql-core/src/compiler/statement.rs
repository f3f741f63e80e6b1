//! Lowering of statement trees to descriptors.

use dynaql_model::fragment::{AttributeNames, AttributeValues};
use dynaql_model::{
    AddClause, ConditionClause, CreateTableStatement, DeleteClause, DeleteStatement,
    DeleteTableStatement, DescribeStatement, ExplainStatement, ExpressionFragment, FilterClause,
    FindStatement, GetStatement, ImportEntity, ImportStatement, InsertStatement,
    KeyConditionClause, ListBy, ListStatement, ObjectId, OnStatement, ProvisionedCapacity,
    RemoveClause, SetClause, Statement, UnloadTableStatement, UpdateStatement,
};
use serde_json::Value;

use super::context::CompilationContext;
use super::expression::{expression, stem};
use super::fragment::Fragment;
use crate::grammar::cst;
use crate::literal;

pub(crate) fn statement(statement: &cst::Statement, context: &mut CompilationContext) -> Statement {
    match statement {
        cst::Statement::Explain(inner) => Statement::Explain(ExplainStatement {
            statement: Box::new(atomic(inner, context)),
        }),
        cst::Statement::Atomic(inner) => atomic(inner, context),
    }
}

fn atomic(statement: &cst::AtomicStatement, context: &mut CompilationContext) -> Statement {
    use cst::AtomicStatement as S;

    match statement {
        S::Get(get) => Statement::Get(GetStatement {
            id: object_id(&get.id),
            from: get.table.clone(),
            strongly_consistent: get.strongly_consistent.then_some(true),
        }),
        S::Delete(delete) => Statement::Delete(DeleteStatement {
            id: object_id(&delete.id),
            from: delete.table.clone(),
            condition: condition(delete.condition.as_ref(), context),
        }),
        S::Find(find) => Statement::Find(self::find(find, context)),
        S::List(list) => Statement::List(self::list(list, context)),
        S::Insert(insert) => Statement::Insert(InsertStatement {
            object: insert.object.clone(),
            into: insert.table.clone(),
            condition: condition(insert.condition.as_ref(), context),
        }),
        S::Update(update) => Statement::Update(UpdateStatement {
            object: update.object.clone(),
            from: update.table.clone(),
            condition: condition(update.condition.as_ref(), context),
            version_check: update.version_check.then_some(true),
        }),
        S::On(on) => Statement::On(self::on(on, context)),
        S::CreateTable(create) => Statement::CreateTable(CreateTableStatement {
            entity: create.entity.clone(),
            with_capacity_of: create.capacity.as_ref().and_then(|(read, write)| {
                Some(ProvisionedCapacity {
                    read_capacity: literal::json_number(read)?,
                    write_capacity: literal::json_number(write)?,
                })
            }),
        }),
        S::DeleteTable(delete) => Statement::DeleteTable(DeleteTableStatement {
            entity: delete.entity.clone(),
        }),
        S::ShowTables => Statement::ShowTables,
        S::UnloadTable(name) => Statement::UnloadTable(UnloadTableStatement { name: name.clone() }),
        S::Import(import) => Statement::Import(self::import(import)),
        S::Describe(name) => Statement::Describe(DescribeStatement { name: name.clone() }),
    }
}

fn object_id(id: &cst::ObjectId) -> ObjectId {
    match id {
        cst::ObjectId::String(image) => ObjectId::String(literal::unquoted(image)),
        cst::ObjectId::Number(image) => literal::json_number(image)
            .map_or_else(|| ObjectId::String(image.clone()), ObjectId::Number),
    }
}

fn condition(
    condition: Option<&cst::Expression>,
    context: &mut CompilationContext,
) -> Option<ConditionClause> {
    condition.map(|tree| ConditionClause::from(ExpressionFragment::from(expression(tree, context))))
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

fn projections(projections: &cst::Projections) -> Option<Vec<String>> {
    match projections {
        cst::Projections::All => None,
        cst::Projections::Properties(names) => Some(names.clone()),
    }
}

fn find(find: &cst::Find, context: &mut CompilationContext) -> FindStatement {
    let key_condition = find
        .key_condition
        .as_ref()
        .map(|tree| expression(tree, context));
    let filter = find.filter.as_ref().map(|tree| {
        let mut filter = expression(tree, context);
        if let Some(key_condition) = &key_condition {
            filter.avoid(key_condition.names(), key_condition.values(), context);
        }
        filter
    });

    FindStatement {
        projections: projections(&find.projections),
        from: find.table.clone(),
        using: find.index.clone(),
        key_condition: key_condition.map(|f| KeyConditionClause::from(ExpressionFragment::from(f))),
        filter: filter.map(|f| FilterClause::from(ExpressionFragment::from(f))),
        resume: find.page.resume.as_deref().map(literal::unquoted),
        order: find.page.ascending,
        limit: find.page.limit.as_deref().and_then(literal::json_number),
        strongly_consistent: find.page.strongly_consistent.then_some(true),
    }
}

fn list(list: &cst::List, context: &mut CompilationContext) -> ListStatement {
    ListStatement {
        projections: projections(&list.projections),
        from: list.table.clone(),
        using: list.index.clone(),
        by: list.by.as_ref().map(|(hash, range)| ListBy {
            hash: literal::unquoted(hash),
            range: range.as_deref().map(literal::unquoted),
        }),
        filter: list
            .filter
            .as_ref()
            .map(|tree| FilterClause::from(ExpressionFragment::from(expression(tree, context)))),
        resume: list.page.resume.as_deref().map(literal::unquoted),
        order: list.page.ascending,
        limit: list.page.limit.as_deref().and_then(literal::json_number),
        strongly_consistent: list.page.strongly_consistent.then_some(true),
    }
}

// ---------------------------------------------------------------------------
// ON actions
// ---------------------------------------------------------------------------

fn on(on: &cst::On, context: &mut CompilationContext) -> OnStatement {
    let mut actions = Actions::default();
    for action in &on.actions {
        actions.push(action, context);
    }
    let condition = on.condition.as_ref().map(|tree| {
        let mut fragment: Fragment = expression(tree, context);
        fragment.avoid(&actions.names, &actions.values, context);
        ConditionClause::from(ExpressionFragment::from(fragment))
    });

    OnStatement {
        id: object_id(&on.id),
        from: on.table.clone(),
        set: actions.set,
        add: actions.add,
        remove: actions.remove,
        delete: actions.delete,
        condition,
        version_check: on.version_check.then_some(true),
    }
}

/// Rendered actions grouped by clause, plus the union of their maps.
#[derive(Debug, Default)]
struct Actions {
    set: Option<SetClause>,
    add: Option<AddClause>,
    remove: Option<RemoveClause>,
    delete: Option<DeleteClause>,
    names: AttributeNames,
    values: AttributeValues,
}

impl Actions {
    fn push(&mut self, action: &cst::Action, context: &mut CompilationContext) {
        let (attribute, value) = match action {
            cst::Action::Set { name, value } | cst::Action::Delete { name, value } => {
                (name, Some(literal::atomic(value)))
            }
            cst::Action::Add { name, value } => (name, Some(literal::number(value))),
            cst::Action::Remove { name } => (name, None),
        };

        let stem = self.draw(&stem(attribute), context);
        let name_key = format!("#{stem}");
        let value_key = format!(":{stem}");
        self.names.insert(name_key.clone(), attribute.clone());
        if let Some(value) = &value {
            self.values.insert(value_key.clone(), value.clone());
        }

        let name = (name_key.clone(), attribute.clone());
        let value = value.map(|value| (value_key.clone(), value));
        match action {
            cst::Action::Set { .. } => {
                record(&mut self.set, format!("{name_key} = {value_key}"), name, value);
            }
            cst::Action::Add { .. } => {
                record(&mut self.add, format!("{name_key} {value_key}"), name, value);
            }
            cst::Action::Remove { .. } => record(&mut self.remove, name_key, name, None),
            cst::Action::Delete { .. } => {
                record(&mut self.delete, format!("{name_key} {value_key}"), name, value);
            }
        }
    }

    /// `stem___N` with the next index not yet used by an action.
    fn draw(&self, stem: &str, context: &mut CompilationContext) -> String {
        loop {
            let candidate = format!("{stem}___{}", context.next_index());
            if !self.names.contains_key(&format!("#{candidate}"))
                && !self.values.contains_key(&format!(":{candidate}"))
            {
                return candidate;
            }
        }
    }
}

/// Shared shape of the four action clauses.
trait ActionClause: Default {
    fn parts(&mut self) -> (&mut Vec<String>, &mut AttributeNames, &mut AttributeValues);
}

macro_rules! impl_action_clause {
    ($($clause:ty => $field:ident),* $(,)?) => {
        $(
            impl ActionClause for $clause {
                fn parts(&mut self) -> (&mut Vec<String>, &mut AttributeNames, &mut AttributeValues) {
                    (
                        &mut self.$field,
                        &mut self.expression_attribute_names,
                        &mut self.expression_attribute_values,
                    )
                }
            }
        )*
    };
}

impl_action_clause! {
    SetClause => set_expressions,
    AddClause => add_expressions,
    RemoveClause => remove_expressions,
    DeleteClause => delete_expressions,
}

fn record<C: ActionClause>(
    clause: &mut Option<C>,
    text: String,
    name: (String, String),
    value: Option<(String, Value)>,
) {
    let (expressions, names, values) = clause.get_or_insert_with(C::default).parts();
    expressions.push(text);
    names.insert(name.0, name.1);
    if let Some((key, value)) = value {
        values.insert(key, value);
    }
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

fn import(import: &cst::Import) -> ImportStatement {
    let entity = |item: &cst::ImportItem, default: bool| ImportEntity {
        name: item.name.clone(),
        alias: item.alias.clone().unwrap_or_else(|| item.name.clone()),
        default,
    };
    let entities = import
        .groups
        .iter()
        .flat_map(|group| match group {
            cst::ImportGroup::Default(item) => vec![entity(item, true)],
            cst::ImportGroup::Named(items) => items.iter().map(|item| entity(item, false)).collect(),
        })
        .collect();
    ImportStatement {
        entities,
        from: literal::unquoted(&import.package),
    }
}
