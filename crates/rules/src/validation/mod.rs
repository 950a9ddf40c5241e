//! Structural validation of condition trees.
//!
//! A tree is safe to attach to an event when every group has a known
//! combinator and at least one child, every leaf has a known operator, every
//! leaf id resolves to exactly one supplied definition, and every right
//! operand matches its definition's value type. Validation is a conjunction
//! over the whole tree regardless of the AND/OR combinators used.
//!
//! [`ConditionTreeValidator::check`] reports each problem with a path;
//! [`ConditionTreeValidator::validate`] collapses that to a boolean.

mod tree_checks;

use questline_core::ConditionDefinition;
use serde::{Deserialize, Serialize};

use crate::index::DefinitionIndex;
use crate::schema::ConditionGroup;

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON-path-like location, e.g. `"conditions[1].rightOperand"`.
    pub path: String,
    pub message: String,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Stateless validator over a tree and the definitions its leaves reference.
pub struct ConditionTreeValidator;

impl ConditionTreeValidator {
    /// True iff the tree is structurally sound. Never panics or errors.
    pub fn validate(tree: &ConditionGroup, definitions: &[ConditionDefinition]) -> bool {
        Self::check(tree, definitions).valid
    }

    /// Validate and report every problem found.
    pub fn check(tree: &ConditionGroup, definitions: &[ConditionDefinition]) -> ValidationResult {
        let index = DefinitionIndex::new(definitions);
        let mut result = ValidationResult::new();
        tree_checks::check_group(tree, "", &index, &mut result);
        result
    }

    /// Validate an arbitrary JSON document; anything that is not a condition
    /// group shape is invalid.
    pub fn validate_json(document: &serde_json::Value, definitions: &[ConditionDefinition]) -> bool {
        Self::check_json(document, definitions).valid
    }

    /// Like [`check`](Self::check) for an arbitrary JSON document. Shape
    /// errors are reported at the root path.
    pub fn check_json(
        document: &serde_json::Value,
        definitions: &[ConditionDefinition],
    ) -> ValidationResult {
        match ConditionGroup::deserialize(document) {
            Ok(tree) => Self::check(&tree, definitions),
            Err(e) => {
                let mut result = ValidationResult::new();
                result.error("", format!("not a condition group: {e}"));
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;
    use questline_core::{ConditionDefinition, Literal, ValueType};
    use serde_json::json;

    fn definitions() -> Vec<ConditionDefinition> {
        vec![
            ConditionDefinition::new("c1", "login_streak", ValueType::Number),
            ConditionDefinition::new("c2", "membership_tier", ValueType::String),
            ConditionDefinition::new("c3", "signup_date", ValueType::Date),
        ]
    }

    fn valid_tree() -> ConditionGroup {
        ConditionGroup::and(vec![
            ConditionLeaf::new("c1", ConditionOperator::Gte, 7i64).into(),
            ConditionGroup::or(vec![
                ConditionLeaf::new("c2", ConditionOperator::Eq, "gold").into(),
                ConditionLeaf::new("c3", ConditionOperator::Lt, "2025-01-01T00:00:00Z").into(),
            ])
            .into(),
        ])
    }

    fn nested_leaf_mut(tree: &mut ConditionGroup) -> &mut ConditionLeaf {
        match &mut tree.conditions[1] {
            ConditionNode::Group(group) => match &mut group.conditions[0] {
                ConditionNode::Leaf(leaf) => leaf,
                _ => unreachable!(),
            },
            _ => unreachable!(),
        }
    }

    #[test]
    fn well_formed_tree_is_valid() {
        let result = ConditionTreeValidator::check(&valid_tree(), &definitions());
        assert!(result.valid, "unexpected errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unknown_id_invalidates_whole_tree() {
        let mut tree = valid_tree();
        nested_leaf_mut(&mut tree).left_operand.id = "missing".into();

        let result = ConditionTreeValidator::check(&tree, &definitions());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "conditions[1].conditions[0].leftOperand.id");
    }

    #[test]
    fn type_mismatch_invalidates_whole_tree() {
        let mut tree = valid_tree();
        nested_leaf_mut(&mut tree).right_operand = Literal::Number(3.0);

        let result = ConditionTreeValidator::check(&tree, &definitions());
        assert!(!result.valid);
        assert_eq!(result.errors[0].path, "conditions[1].conditions[0].rightOperand");
        assert!(result.errors[0].message.contains("expected string"));
    }

    #[test]
    fn number_definition_rejects_numeric_string() {
        let tree = ConditionGroup::and(vec![
            ConditionLeaf::new("c1", ConditionOperator::Gte, "7").into(),
        ]);
        assert!(!ConditionTreeValidator::validate(&tree, &definitions()));
    }

    #[test]
    fn date_definition_requires_date_like_literal() {
        let ok = ConditionGroup::and(vec![
            ConditionLeaf::new("c3", ConditionOperator::Eq, "2025-02-01").into(),
        ]);
        let bad = ConditionGroup::and(vec![
            ConditionLeaf::new("c3", ConditionOperator::Eq, "next tuesday").into(),
        ]);
        assert!(ConditionTreeValidator::validate(&ok, &definitions()));
        assert!(!ConditionTreeValidator::validate(&bad, &definitions()));
    }

    #[test]
    fn null_and_list_operands_are_rejected() {
        let tree = ConditionGroup::or(vec![
            ConditionLeaf {
                left_operand: LeftOperand { id: "c2".into() },
                operator: ConditionOperator::In,
                right_operand: Literal::List(vec![Literal::from("gold")]),
            }
            .into(),
            ConditionLeaf {
                left_operand: LeftOperand { id: "c1".into() },
                operator: ConditionOperator::Exists,
                right_operand: Literal::Null,
            }
            .into(),
        ]);
        let result = ConditionTreeValidator::check(&tree, &definitions());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn empty_groups_are_rejected_at_any_depth() {
        let root = ConditionGroup::and(vec![]);
        assert!(!ConditionTreeValidator::validate(&root, &definitions()));

        let nested = ConditionGroup::and(vec![
            ConditionLeaf::new("c1", ConditionOperator::Gte, 7i64).into(),
            ConditionGroup::or(vec![]).into(),
        ]);
        let result = ConditionTreeValidator::check(&nested, &definitions());
        assert!(!result.valid);
        assert_eq!(result.errors[0].path, "conditions[1].conditions");
    }

    #[test]
    fn unknown_operators_are_rejected() {
        let tree = ConditionGroup::new(
            LogicalOperator::Unknown,
            vec![ConditionLeaf::new("c1", ConditionOperator::Unknown, 1i64).into()],
        );
        let result = ConditionTreeValidator::check(&tree, &definitions());
        let paths: Vec<&str> = result.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["operator", "conditions[0].operator"]);
    }

    #[test]
    fn ambiguous_definition_ids_are_rejected() {
        let mut defs = definitions();
        defs.push(ConditionDefinition::new("c1", "login_streak_v2", ValueType::Number));
        let tree = ConditionGroup::and(vec![
            ConditionLeaf::new("c1", ConditionOperator::Gte, 7i64).into(),
        ]);
        assert!(!ConditionTreeValidator::validate(&tree, &defs));
    }

    #[test]
    fn advisory_operators_produce_warnings_only() {
        let tree = ConditionGroup::or(vec![
            ConditionLeaf::new("c2", ConditionOperator::Gt, "bronze").into(),
            ConditionLeaf::new("c1", ConditionOperator::IsNull, 0i64).into(),
            ConditionLeaf::new("c2", ConditionOperator::Nin, "gold").into(),
        ]);
        let result = ConditionTreeValidator::check(&tree, &definitions());
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 3);
        assert_eq!(result.warnings[1].path, "conditions[1].operator");
        assert_eq!(
            result.warnings[1].message,
            "'isNull' only matches explicitly logged null values"
        );
    }

    #[test]
    fn json_documents_of_the_wrong_shape_are_invalid() {
        let defs = definitions();
        assert!(!ConditionTreeValidator::validate_json(&json!(null), &defs));
        assert!(!ConditionTreeValidator::validate_json(&json!([1, 2]), &defs));
        assert!(!ConditionTreeValidator::validate_json(
            &json!({ "operator": "and", "conditions": "c1" }),
            &defs
        ));
        assert!(!ConditionTreeValidator::validate_json(
            &json!({ "operator": "and", "conditions": [ { "foo": 1 } ] }),
            &defs
        ));
        assert!(ConditionTreeValidator::validate_json(
            &json!({
                "operator": "and",
                "conditions": [
                    { "leftOperand": { "id": "c1" }, "operator": "gte", "rightOperand": 7 }
                ]
            }),
            &defs
        ));
    }
}
