//! Condition tree schema types with serde deserialization.
//!
//! A tree is rooted at a [`ConditionGroup`]; internal nodes are groups
//! combined with AND/OR and leaves are [`ConditionLeaf`] comparisons that
//! reference a condition definition by id.

mod composition;
mod operators;

pub use composition::*;
pub use operators::*;

#[cfg(test)]
mod tests;
