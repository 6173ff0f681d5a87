//! Tests for checking trees against their schema.

use crate::builder_tests::assignment_tree;
use crate::node::{
    CallExpression, ExpressionStatement, Identifier, Program, SpreadElement, Super,
};
use crate::{ContractViolation, NodeIndex, NodeList, TreeBuilder};
use esast_common::Span;
use esast_schema::{FieldType, GrammarLayer, GrammarVersion, NodeKind, list, merge};
use std::sync::Arc;

/// `super(...x);` inside a script.
fn super_call() -> TreeBuilder {
    let mut builder = TreeBuilder::new();
    let x = builder
        .add(Span::default(), Identifier { name: "x".to_string() })
        .unwrap();
    let spread = builder
        .add(Span::default(), SpreadElement { argument: x })
        .unwrap();
    let callee = builder.add(Span::default(), Super {}).unwrap();
    let call = builder
        .add(
            Span::default(),
            CallExpression {
                callee,
                arguments: NodeList::from(vec![spread]),
            },
        )
        .unwrap();
    let stmt = builder
        .add(Span::default(), ExpressionStatement { expression: call })
        .unwrap();
    builder
        .add(
            Span::default(),
            Program {
                body: NodeList::from(vec![stmt]),
                comments: Vec::new(),
                tokens: Vec::new(),
            },
        )
        .unwrap();
    builder
}

#[test]
fn test_conforming_tree_has_no_violations() {
    for version in GrammarVersion::ALL {
        assert!(assignment_tree(version).tree.validate().is_empty(), "{version}");
    }
}

#[test]
fn test_newer_kinds_against_older_schema() {
    let tree = super_call()
        .finish(NodeIndex(5), GrammarVersion::Es5.schema())
        .unwrap();
    let violations = tree.validate();
    assert_eq!(
        violations,
        vec![
            ContractViolation::UnknownKind {
                index: NodeIndex(1),
                kind: NodeKind::SpreadElement,
            },
            ContractViolation::UnknownKind {
                index: NodeIndex(2),
                kind: NodeKind::Super,
            },
            ContractViolation::UnexpectedChildKind {
                index: NodeIndex(2),
                parent: NodeKind::CallExpression,
                field: "callee",
                kind: NodeKind::Super,
            },
            ContractViolation::UnexpectedChildKind {
                index: NodeIndex(1),
                parent: NodeKind::CallExpression,
                field: "arguments",
                kind: NodeKind::SpreadElement,
            },
        ]
    );
    assert_eq!(
        violations[2].to_string(),
        "Super #2 is not allowed in CallExpression.callee"
    );

    let tree = super_call()
        .finish(NodeIndex(5), GrammarVersion::Es2015.schema())
        .unwrap();
    assert!(tree.validate().is_empty());
}

#[test]
fn test_undeclared_child_field() {
    let layer = GrammarLayer::new("narrow")
        .node(NodeKind::Program, |n| n.field("body", list!(Statement)))
        .node(NodeKind::ExpressionStatement, |n| n)
        .node(NodeKind::Identifier, |n| n.field("name", FieldType::string()))
        .roots([NodeKind::Program])
        .statements([NodeKind::ExpressionStatement]);
    let schema = Arc::new(merge(&layer, &[]).unwrap());

    let mut builder = TreeBuilder::new();
    let x = builder
        .add(Span::default(), Identifier { name: "x".to_string() })
        .unwrap();
    let stmt = builder
        .add(Span::default(), ExpressionStatement { expression: x })
        .unwrap();
    let root = builder
        .add(
            Span::default(),
            Program {
                body: NodeList::from(vec![stmt]),
                comments: Vec::new(),
                tokens: Vec::new(),
            },
        )
        .unwrap();
    let tree = builder.finish(root, schema).unwrap();

    let violations = tree.validate();
    assert_eq!(
        violations,
        vec![ContractViolation::UndeclaredField {
            index: stmt,
            kind: NodeKind::ExpressionStatement,
            field: "expression",
        }]
    );

    let json = serde_json::to_value(&violations).unwrap();
    assert_eq!(json[0]["violation"], "undeclaredField");
    assert_eq!(json[0]["kind"], "ExpressionStatement");
    assert_eq!(json[0]["index"], 1);
}
