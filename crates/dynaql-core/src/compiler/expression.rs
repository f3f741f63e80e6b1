//! Lowering of expression trees to fragments.

use super::context::CompilationContext;
use super::fragment::Fragment;
use crate::grammar::cst::{Atomic, CompareOp, Expression, Function, Term};
use crate::literal;

/// Fold `first (op term)*` left to right.
pub(crate) fn expression(expression: &Expression, context: &mut CompilationContext) -> Fragment {
    let mut fragment = term(&expression.first, context);
    for (op, right) in &expression.rest {
        let right = term(right, context);
        fragment = fragment.merge(*op, right, context);
    }
    fragment
}

fn term(term: &Term, context: &mut CompilationContext) -> Fragment {
    match term {
        Term::Not(inner) => self::term(inner, context).wrap("not ", ""),
        Term::Group(inner) => expression(inner, context).wrap("(", ")"),
        Term::Comparison { name, op, value } => comparison(name, *op, value),
        Term::Between { name, low, high } => {
            let stem = stem(name);
            Fragment::default()
                .name(&stem, name)
                .text(" between ")
                .value(&stem, "_between_1", literal::atomic(low))
                .text(" and ")
                .value(&stem, "_between_2", literal::atomic(high))
        }
        Term::In { name, values } => {
            let stem = stem(name);
            let mut fragment = Fragment::default().name(&stem, name).text(" in (");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    fragment = fragment.text(",");
                }
                fragment = fragment.value(&stem, &format!("_in_{}", i + 1), literal::atomic(value));
            }
            fragment.text(")")
        }
        Term::Function(function) => self::function(function),
    }
}

fn comparison(name: &str, op: CompareOp, value: &Atomic) -> Fragment {
    let stem = stem(name);
    Fragment::default()
        .name(&stem, name)
        .text(&format!(" {op} "))
        .value(&stem, "", literal::atomic(value))
}

fn function(function: &Function) -> Fragment {
    match function {
        Function::AttributeExists { name } => unary("attribute_exists", name),
        Function::AttributeNotExists { name } => unary("attribute_not_exists", name),
        Function::AttributeType { name, kind } => binary("attribute_type", name, kind),
        Function::BeginsWith { name, prefix } => binary("begins_with", name, prefix),
        Function::Contains { name, operand } => binary("contains", name, operand),
        Function::Size { name, op, value } => {
            let stem = stem(name);
            Fragment::default()
                .text("size(")
                .name(&stem, name)
                .text(&format!(") {op} "))
                .value(&stem, "", literal::atomic(value))
        }
    }
}

fn unary(function: &str, name: &str) -> Fragment {
    Fragment::default()
        .text(&format!("{function}("))
        .name(&stem(name), name)
        .text(")")
}

fn binary(function: &str, name: &str, operand: &Atomic) -> Fragment {
    let stem = stem(name);
    Fragment::default()
        .text(&format!("{function}("))
        .name(&stem, name)
        .text(",")
        .value(&stem, "", literal::atomic(operand))
        .text(")")
}

/// Placeholder stem for an attribute: non-word characters become `_`.
pub(crate) fn stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
