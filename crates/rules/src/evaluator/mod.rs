//! Reward eligibility evaluation over condition trees.
//!
//! A tree is reduced to a single verdict against a user's logged events.
//! Groups combine children with AND (`all`) or OR (`any`); a leaf is
//! satisfied when *any* log recorded under its definition's field name
//! satisfies the comparison. Every failure mode (missing definition, no
//! logs, unsupported operator/type pair, unknown combinator) degrades to
//! `false` for that node instead of aborting evaluation.

mod compare;
mod composition;

use std::collections::HashMap;

use questline_core::{ConditionDefinition, Literal, LoggedEvent};

use crate::index::DefinitionIndex;
use crate::schema::ConditionGroup;

// ── Evaluator ───────────────────────────────────────────────────────

/// Stateless evaluator; safe to call concurrently and repeatedly.
pub struct RewardEligibilityEvaluator;

impl RewardEligibilityEvaluator {
    /// Decide whether the logged events satisfy the tree.
    pub fn evaluate(
        tree: &ConditionGroup,
        definitions: &[ConditionDefinition],
        logs: &[LoggedEvent],
    ) -> bool {
        EvaluationContext::new(definitions, logs).evaluate_group(tree)
    }

    /// Human-readable trace of how each node evaluated, e.g.
    /// `AND(login_streak gte 7 = true, OR(tier eq 'gold' = false) = false) = false`.
    pub fn explain(
        tree: &ConditionGroup,
        definitions: &[ConditionDefinition],
        logs: &[LoggedEvent],
    ) -> String {
        EvaluationContext::new(definitions, logs).explain_group(tree)
    }
}

// ── Per-call lookup tables ──────────────────────────────────────────

/// Definitions by id and logged values by field name, built once per call.
pub(crate) struct EvaluationContext<'a> {
    definitions: DefinitionIndex<'a>,
    values_by_field: HashMap<&'a str, Vec<&'a Literal>>,
}

impl<'a> EvaluationContext<'a> {
    pub(crate) fn new(definitions: &'a [ConditionDefinition], logs: &'a [LoggedEvent]) -> Self {
        let mut values_by_field: HashMap<&'a str, Vec<&'a Literal>> = HashMap::new();
        for log in logs {
            values_by_field
                .entry(log.field_name.as_str())
                .or_default()
                .push(&log.value);
        }
        Self {
            definitions: DefinitionIndex::new(definitions),
            values_by_field,
        }
    }

    fn values_for(&self, field_name: &str) -> &[&'a Literal] {
        self.values_by_field
            .get(field_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;
    use questline_core::ValueType;

    fn definitions() -> Vec<ConditionDefinition> {
        vec![
            ConditionDefinition::new("c1", "login_streak", ValueType::Number),
            ConditionDefinition::new("c2", "membership_tier", ValueType::String),
            ConditionDefinition::new("c3", "last_purchase", ValueType::Date),
        ]
    }

    fn log(field: &str, value: impl Into<Literal>) -> LoggedEvent {
        LoggedEvent::new("u1", field, value)
    }

    #[test]
    fn end_to_end_login_streak() {
        let defs = vec![ConditionDefinition::new("c1", "login_streak", ValueType::Number)];
        let tree = ConditionGroup::and(vec![
            ConditionLeaf::new("c1", ConditionOperator::Gte, 7i64).into(),
        ]);

        let mut logs = vec![log("login_streak", 5i64)];
        assert!(!RewardEligibilityEvaluator::evaluate(&tree, &defs, &logs));

        logs.push(log("login_streak", 9i64));
        assert!(RewardEligibilityEvaluator::evaluate(&tree, &defs, &logs));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let tree = ConditionGroup::and(vec![
            ConditionLeaf::new("c1", ConditionOperator::Gt, 2i64).into(),
        ]);
        let defs = definitions();
        let logs = vec![log("login_streak", 3i64)];
        let first = RewardEligibilityEvaluator::evaluate(&tree, &defs, &logs);
        let second = RewardEligibilityEvaluator::evaluate(&tree, &defs, &logs);
        assert!(first && second);
    }

    #[test]
    fn explain_reports_each_node() {
        let tree = ConditionGroup::and(vec![
            ConditionLeaf::new("c1", ConditionOperator::Gte, 7i64).into(),
            ConditionGroup::or(vec![
                ConditionLeaf::new("c2", ConditionOperator::Eq, "gold").into(),
            ])
            .into(),
        ]);
        let logs = vec![log("login_streak", 9i64), log("membership_tier", "silver")];

        let trace = RewardEligibilityEvaluator::explain(&tree, &definitions(), &logs);
        assert_eq!(
            trace,
            "AND(login_streak gte 7 = true, OR(membership_tier eq 'gold' = false) = false) = false"
        );
    }

    #[test]
    fn explain_marks_unresolved_leaves() {
        let tree = ConditionGroup::or(vec![
            ConditionLeaf::new("ghost", ConditionOperator::Exists, 0i64).into(),
        ]);
        let trace = RewardEligibilityEvaluator::explain(&tree, &definitions(), &[]);
        assert_eq!(trace, "OR(<unknown condition 'ghost'> exists 0 = false) = false");
    }
}
