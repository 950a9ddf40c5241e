//! Type-aware comparison of a logged value against a leaf's right operand.
//!
//! Dispatch is keyed by operator first, then by the definition's value type.
//! Every operator/type pair without defined semantics resolves to `false`.

use std::cmp::Ordering;

use questline_core::{Literal, ValueType};

use crate::schema::ConditionOperator;

/// Compare one logged value against the right operand.
pub(crate) fn compare(
    value_type: ValueType,
    operator: ConditionOperator,
    logged: &Literal,
    right: &Literal,
) -> bool {
    match operator {
        ConditionOperator::Exists => !logged.is_null(),
        ConditionOperator::IsNull => logged.is_null(),
        ConditionOperator::IsNotNull => !logged.is_null(),
        // Membership against lists is not supported.
        ConditionOperator::In | ConditionOperator::Nin => false,
        ConditionOperator::Unknown => false,
        ConditionOperator::Eq
        | ConditionOperator::Neq
        | ConditionOperator::Gt
        | ConditionOperator::Lt
        | ConditionOperator::Gte
        | ConditionOperator::Lte => match value_type {
            ValueType::Number => compare_numbers(operator, logged, right),
            ValueType::Date => compare_dates(operator, logged, right),
            ValueType::String => compare_strings(operator, logged, right),
        },
    }
}

/// Apply an equality/ordering operator to an already computed ordering.
fn holds(operator: ConditionOperator, ordering: Ordering) -> bool {
    match operator {
        ConditionOperator::Eq => ordering == Ordering::Equal,
        ConditionOperator::Neq => ordering != Ordering::Equal,
        ConditionOperator::Gt => ordering == Ordering::Greater,
        ConditionOperator::Lt => ordering == Ordering::Less,
        ConditionOperator::Gte => ordering != Ordering::Less,
        ConditionOperator::Lte => ordering != Ordering::Greater,
        _ => false,
    }
}

fn compare_numbers(operator: ConditionOperator, logged: &Literal, right: &Literal) -> bool {
    let (Some(l), Some(r)) = (logged.as_number(), right.as_number()) else {
        return false;
    };
    l.partial_cmp(&r).is_some_and(|ordering| holds(operator, ordering))
}

/// Equality is by calendar day (UTC); ordering is chronological.
fn compare_dates(operator: ConditionOperator, logged: &Literal, right: &Literal) -> bool {
    let (Some(l), Some(r)) = (logged.as_datetime(), right.as_datetime()) else {
        return false;
    };
    match operator {
        ConditionOperator::Eq | ConditionOperator::Neq => {
            holds(operator, l.date_naive().cmp(&r.date_naive()))
        }
        _ => holds(operator, l.cmp(&r)),
    }
}

/// Exact equality only; strings have no ordering.
fn compare_strings(operator: ConditionOperator, logged: &Literal, right: &Literal) -> bool {
    let (Some(l), Some(r)) = (logged.as_str(), right.as_str()) else {
        return false;
    };
    match operator {
        ConditionOperator::Eq => l == r,
        ConditionOperator::Neq => l != r,
        _ => false,
    }
}
