//! Leaf id extraction.

use std::collections::HashSet;

use questline_core::ConditionId;

use crate::schema::ConditionGroup;

/// Collect every condition id referenced by the tree's leaves, in first-seen
/// order with duplicates removed.
///
/// Callers use this to fetch exactly the definitions a tree needs before
/// validating or evaluating it.
pub fn collect_condition_ids(tree: &ConditionGroup) -> Vec<ConditionId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    tree.for_each_leaf(&mut |leaf| {
        if seen.insert(leaf.id().clone()) {
            ids.push(leaf.id().clone());
        }
    });
    ids
}
