//! Event condition engine.
//!
//! This crate provides:
//! - Condition tree schema (AND/OR groups over typed comparison leaves)
//! - Structural validation against condition definitions
//! - Reward eligibility evaluation against a user's logged events
//! - Leaf id extraction shared by validation and evaluation callers

pub mod evaluator;
pub mod ids;
mod index;
pub mod schema;
pub mod validation;

pub use evaluator::RewardEligibilityEvaluator;
pub use ids::collect_condition_ids;
pub use schema::{ConditionGroup, ConditionLeaf, ConditionNode, ConditionOperator, LogicalOperator};
pub use validation::{ConditionTreeValidator, ValidationResult};
