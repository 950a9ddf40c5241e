//! Boolean condition tree: groups combine leaves and nested groups with AND/OR.

use serde::{Deserialize, Serialize};

use questline_core::{ConditionId, Literal};

use super::ConditionOperator;

/// Combinator node of a condition tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionGroup {
    pub operator: LogicalOperator,
    pub conditions: Vec<ConditionNode>,
}

/// Logical operators for combining conditions.
///
/// Unrecognized operator strings deserialize to `Unknown` so a stored tree can
/// still be loaded, then rejected by validation and evaluated as false.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOperator {
    And,
    Or,
    #[serde(other)]
    Unknown,
}

/// A condition leaf or nested group.
///
/// Untagged on the wire: a leaf carries `leftOperand`/`operator`/`rightOperand`,
/// a group carries `operator`/`conditions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ConditionNode {
    Leaf(ConditionLeaf),
    Group(ConditionGroup),
}

/// One atomic comparison against a condition definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConditionLeaf {
    pub left_operand: LeftOperand,
    pub operator: ConditionOperator,
    pub right_operand: Literal,
}

/// Reference to a condition definition by id only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeftOperand {
    pub id: ConditionId,
}

impl ConditionGroup {
    pub fn new(operator: LogicalOperator, conditions: Vec<ConditionNode>) -> Self {
        Self { operator, conditions }
    }

    pub fn and(conditions: Vec<ConditionNode>) -> Self {
        Self::new(LogicalOperator::And, conditions)
    }

    pub fn or(conditions: Vec<ConditionNode>) -> Self {
        Self::new(LogicalOperator::Or, conditions)
    }

    /// Depth-first visit of every leaf in the tree.
    pub fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a ConditionLeaf)) {
        for node in &self.conditions {
            match node {
                ConditionNode::Leaf(leaf) => f(leaf),
                ConditionNode::Group(group) => group.for_each_leaf(f),
            }
        }
    }
}

impl ConditionLeaf {
    pub fn new(
        id: impl Into<String>,
        operator: ConditionOperator,
        right_operand: impl Into<Literal>,
    ) -> Self {
        Self {
            left_operand: LeftOperand {
                id: ConditionId(id.into()),
            },
            operator,
            right_operand: right_operand.into(),
        }
    }

    pub fn id(&self) -> &ConditionId {
        &self.left_operand.id
    }
}

impl From<ConditionLeaf> for ConditionNode {
    fn from(leaf: ConditionLeaf) -> Self {
        ConditionNode::Leaf(leaf)
    }
}

impl From<ConditionGroup> for ConditionNode {
    fn from(group: ConditionGroup) -> Self {
        ConditionNode::Group(group)
    }
}
