//! Comparison operators available to condition leaves.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
    In,
    Nin,
    Exists,
    IsNull,
    IsNotNull,
    #[serde(other)]
    Unknown,
}

impl ConditionOperator {
    /// Wire name, as used in stored trees.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Eq => "eq",
            ConditionOperator::Neq => "neq",
            ConditionOperator::Gt => "gt",
            ConditionOperator::Lt => "lt",
            ConditionOperator::Gte => "gte",
            ConditionOperator::Lte => "lte",
            ConditionOperator::In => "in",
            ConditionOperator::Nin => "nin",
            ConditionOperator::Exists => "exists",
            ConditionOperator::IsNull => "isNull",
            ConditionOperator::IsNotNull => "isNotNull",
            ConditionOperator::Unknown => "unknown",
        }
    }

    /// `gt`, `lt`, `gte` or `lte`.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            ConditionOperator::Gt
                | ConditionOperator::Lt
                | ConditionOperator::Gte
                | ConditionOperator::Lte
        )
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
