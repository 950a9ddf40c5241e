//! Recursive group/leaf reduction and its textual trace.

use crate::schema::{ConditionGroup, ConditionLeaf, ConditionNode, LogicalOperator};

use super::compare::compare;
use super::EvaluationContext;

impl EvaluationContext<'_> {
    /// Reduce a group: AND = all children true, OR = any child true.
    /// Unknown combinators are false.
    pub(crate) fn evaluate_group(&self, group: &ConditionGroup) -> bool {
        match group.operator {
            LogicalOperator::And => group.conditions.iter().all(|c| self.evaluate_node(c)),
            LogicalOperator::Or => group.conditions.iter().any(|c| self.evaluate_node(c)),
            LogicalOperator::Unknown => false,
        }
    }

    fn evaluate_node(&self, node: &ConditionNode) -> bool {
        match node {
            ConditionNode::Leaf(leaf) => self.evaluate_leaf(leaf),
            ConditionNode::Group(group) => self.evaluate_group(group),
        }
    }

    /// Existential over every logged value for the leaf's field; no logs
    /// means unsatisfied whatever the operator.
    fn evaluate_leaf(&self, leaf: &ConditionLeaf) -> bool {
        let Some(def) = self.definitions.get(leaf.id()) else {
            tracing::trace!(condition_id = %leaf.id(), "leaf references unknown condition");
            return false;
        };
        self.values_for(&def.field_name)
            .iter()
            .any(|value| compare(def.value_type, leaf.operator, value, &leaf.right_operand))
    }

    pub(crate) fn explain_group(&self, group: &ConditionGroup) -> String {
        let op_str = match group.operator {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Unknown => "UNKNOWN",
        };

        let parts: Vec<String> = group
            .conditions
            .iter()
            .map(|c| match c {
                ConditionNode::Leaf(leaf) => self.explain_leaf(leaf),
                ConditionNode::Group(inner) => self.explain_group(inner),
            })
            .collect();

        format!("{}({}) = {}", op_str, parts.join(", "), self.evaluate_group(group))
    }

    fn explain_leaf(&self, leaf: &ConditionLeaf) -> String {
        let subject = match self.definitions.get(leaf.id()) {
            Some(def) => def.field_name.clone(),
            None => format!("<unknown condition '{}'>", leaf.id()),
        };
        format!(
            "{} {} {} = {}",
            subject,
            leaf.operator,
            leaf.right_operand,
            self.evaluate_leaf(leaf)
        )
    }
}

// ── Tests ───────────────────────────────────────────────────────────
