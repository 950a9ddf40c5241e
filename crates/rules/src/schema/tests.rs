use super::*;
use questline_core::Literal;

#[test]
fn parse_nested_tree_from_json() {
    let tree: ConditionGroup = serde_json::from_str(
        r#"{
            "operator": "and",
            "conditions": [
                { "leftOperand": { "id": "c1" }, "operator": "gte", "rightOperand": 7 },
                {
                    "operator": "or",
                    "conditions": [
                        { "leftOperand": { "id": "c2" }, "operator": "eq", "rightOperand": "gold" },
                        { "leftOperand": { "id": "c3" }, "operator": "isNotNull", "rightOperand": "2025-01-01" }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(tree.operator, LogicalOperator::And);
    assert_eq!(tree.conditions.len(), 2);

    match &tree.conditions[0] {
        ConditionNode::Leaf(leaf) => {
            assert_eq!(leaf.id().as_str(), "c1");
            assert_eq!(leaf.operator, ConditionOperator::Gte);
            assert_eq!(leaf.right_operand, Literal::Number(7.0));
        }
        other => panic!("expected leaf, got {other:?}"),
    }

    match &tree.conditions[1] {
        ConditionNode::Group(group) => {
            assert_eq!(group.operator, LogicalOperator::Or);
            assert_eq!(group.conditions.len(), 2);
        }
        other => panic!("expected group, got {other:?}"),
    }
}

#[test]
fn parse_tree_from_yaml() {
    let tree: ConditionGroup = serde_yaml::from_str(
        r#"
operator: or
conditions:
  - leftOperand: { id: c1 }
    operator: isNull
    rightOperand: 0
"#,
    )
    .unwrap();
    assert_eq!(tree.operator, LogicalOperator::Or);
    assert!(matches!(
        &tree.conditions[0],
        ConditionNode::Leaf(leaf) if leaf.operator == ConditionOperator::IsNull
    ));
}

#[test]
fn unknown_operators_deserialize_to_unknown() {
    let tree: ConditionGroup = serde_json::from_str(
        r#"{
            "operator": "xor",
            "conditions": [
                { "leftOperand": { "id": "c1" }, "operator": "like", "rightOperand": "a%" }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(tree.operator, LogicalOperator::Unknown);
    match &tree.conditions[0] {
        ConditionNode::Leaf(leaf) => assert_eq!(leaf.operator, ConditionOperator::Unknown),
        other => panic!("expected leaf, got {other:?}"),
    }
}

#[test]
fn operator_wire_names_round_trip() {
    for op in [
        ConditionOperator::Eq,
        ConditionOperator::Nin,
        ConditionOperator::IsNull,
        ConditionOperator::IsNotNull,
    ] {
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, format!("\"{}\"", op.as_str()));
        let back: ConditionOperator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
    }
}

#[test]
fn leaf_without_right_operand_is_not_a_node() {
    let parsed = serde_json::from_str::<ConditionNode>(
        r#"{ "leftOperand": { "id": "c1" }, "operator": "exists" }"#,
    );
    assert!(parsed.is_err());
}

#[test]
fn for_each_leaf_visits_depth_first() {
    let tree = ConditionGroup::and(vec![
        ConditionLeaf::new("a", ConditionOperator::Eq, 1i64).into(),
        ConditionGroup::or(vec![
            ConditionLeaf::new("b", ConditionOperator::Eq, 2i64).into(),
            ConditionLeaf::new("c", ConditionOperator::Eq, 3i64).into(),
        ])
        .into(),
        ConditionLeaf::new("d", ConditionOperator::Eq, 4i64).into(),
    ]);

    let mut seen = Vec::new();
    tree.for_each_leaf(&mut |leaf| seen.push(leaf.id().as_str().to_string()));
    assert_eq!(seen, vec!["a", "b", "c", "d"]);
}
