//! Recursive group and leaf checks.

use questline_core::ValueType;

use super::ValidationResult;
use crate::index::DefinitionIndex;
use crate::schema::{ConditionGroup, ConditionLeaf, ConditionNode, ConditionOperator, LogicalOperator};

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

pub(super) fn check_group(
    group: &ConditionGroup,
    path: &str,
    index: &DefinitionIndex<'_>,
    result: &mut ValidationResult,
) {
    if group.operator == LogicalOperator::Unknown {
        result.error(join(path, "operator"), "group operator must be 'and' or 'or'");
    }

    // Reduction over an empty list is undefined; fail closed.
    if group.conditions.is_empty() {
        result.error(join(path, "conditions"), "group must contain at least one condition");
    }

    for (i, node) in group.conditions.iter().enumerate() {
        let child = join(path, &format!("conditions[{i}]"));
        match node {
            ConditionNode::Leaf(leaf) => check_leaf(leaf, &child, index, result),
            ConditionNode::Group(inner) => check_group(inner, &child, index, result),
        }
    }
}

fn check_leaf(
    leaf: &ConditionLeaf,
    path: &str,
    index: &DefinitionIndex<'_>,
    result: &mut ValidationResult,
) {
    if leaf.operator == ConditionOperator::Unknown {
        result.error(join(path, "operator"), "unrecognized condition operator");
    }

    let id = leaf.id();
    let id_path = join(path, "leftOperand.id");
    if id.as_str().is_empty() {
        result.error(id_path, "condition id must not be empty");
        return;
    }
    if index.is_ambiguous(id) {
        result.error(id_path, format!("condition id '{id}' matches more than one definition"));
        return;
    }
    let Some(def) = index.get(id) else {
        result.error(id_path, format!("unknown condition id '{id}'"));
        return;
    };

    if !def.value_type.accepts(&leaf.right_operand) {
        let expected = match def.value_type {
            ValueType::Date => "date-like".to_string(),
            other => other.to_string(),
        };
        result.error(
            join(path, "rightOperand"),
            format!(
                "expected {expected} literal for condition '{}', got {}",
                def.field_name,
                leaf.right_operand.kind()
            ),
        );
        return;
    }

    match leaf.operator {
        ConditionOperator::In | ConditionOperator::Nin => result.warn(
            join(path, "operator"),
            format!("'{}' is not supported and always evaluates to false", leaf.operator),
        ),
        ConditionOperator::IsNull => result.warn(
            join(path, "operator"),
            "'isNull' only matches explicitly logged null values",
        ),
        op if op.is_ordering() && def.value_type == ValueType::String => result.warn(
            join(path, "operator"),
            format!("'{op}' has no ordering for string conditions and always evaluates to false"),
        ),
        _ => {}
    }
}
