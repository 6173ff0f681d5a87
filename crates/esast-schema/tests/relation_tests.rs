//! Tests for derived child/parent relations and the classifiers.

use crate::{
    BuiltinLayer, FieldType, GrammarLayer, GrammarVersion, KindSet, NodeKind, ParentType,
    PseudoKinds, compose, list, merge, one,
};

#[test]
fn test_es5_identifier_parents() {
    let schema = GrammarVersion::Es5.schema();
    let parents = schema.derive_parents(NodeKind::Identifier);
    for kind in [
        NodeKind::AssignmentExpression,
        NodeKind::BasicMemberExpression,
        NodeKind::VariableDeclarator,
        NodeKind::FunctionDeclaration,
        NodeKind::CatchClause,
        NodeKind::CallExpression,
    ] {
        assert!(parents.contains(kind), "{kind} should contain Identifier");
    }
    // Identifier holds no nodes.
    assert!(schema.derive_children(NodeKind::Identifier).is_empty());
}

#[test]
fn test_class_layer_introduces_super() {
    let es5 = GrammarVersion::Es5.schema();
    assert!(!es5.contains(NodeKind::Super));
    assert!(es5.derive_parents(NodeKind::Super).is_empty());

    let schema = compose(&[BuiltinLayer::Class]).unwrap();
    assert!(schema.contains(NodeKind::Super));
    assert_eq!(
        schema.derive_parents(NodeKind::Super).names(),
        vec![
            "BasicMemberExpression",
            "CallExpression",
            "ComputedMemberExpression"
        ]
    );
    assert!(schema.diagnostics().is_empty());
}

#[test]
fn test_spread_layer_widens_argument_lists() {
    let es5 = GrammarVersion::Es5.schema();
    let elements = es5.field(NodeKind::ArrayExpression, "elements").unwrap();
    assert_eq!(elements.to_string(), "(Expression | null)[]");

    let schema = compose(&[BuiltinLayer::Spread]).unwrap();
    let elements = schema.field(NodeKind::ArrayExpression, "elements").unwrap();
    let list = elements.list_type().unwrap();
    assert_eq!(list.elements.pseudo(), PseudoKinds::EXPRESSION);
    assert_eq!(list.elements.kinds().names(), vec!["SpreadElement"]);
    assert!(list.holes);
    assert_eq!(elements.to_string(), "(Expression | SpreadElement | null)[]");

    assert_eq!(
        schema.derive_parents(NodeKind::SpreadElement).names(),
        vec!["ArrayExpression", "CallExpression", "NewExpression"]
    );
    assert_eq!(
        schema.field(NodeKind::CallExpression, "arguments").unwrap().to_string(),
        "(Expression | SpreadElement)[]"
    );
}

#[test]
fn test_script_and_module_roots() {
    let schema = GrammarVersion::Es2015.schema();
    for root in [NodeKind::Program, NodeKind::ModuleProgram] {
        assert!(schema.all_kinds().contains(root));
        assert!(schema.is_root_kind(root));
        assert!(schema.derive_parents(root).is_empty());
        assert_eq!(schema.parent_type(root), ParentType::Absent);
        assert_eq!(schema.type_tag(root), Some("Program"));
    }
    assert_eq!(
        schema.kinds_with_tag("Program").names(),
        vec!["ModuleProgram", "Program"]
    );
    assert_eq!(
        schema.field(NodeKind::Program, "sourceType").unwrap().to_string(),
        "\"script\""
    );
    assert_eq!(
        schema
            .field(NodeKind::ModuleProgram, "sourceType")
            .unwrap()
            .to_string(),
        "\"module\""
    );
}

#[test]
fn test_every_non_root_kind_has_a_parent() {
    for version in GrammarVersion::ALL {
        let schema = version.schema();
        for kind in schema.all_kinds().iter() {
            let parents = schema.derive_parents(kind);
            if schema.is_root_kind(kind) {
                assert!(parents.is_empty(), "{version}: root {kind} has parents");
            } else {
                assert!(!parents.is_empty(), "{version}: {kind} is unreachable");
            }
        }
        assert!(schema.diagnostics().is_empty(), "{version}");
    }
}

#[test]
fn test_parent_and_child_relations_round_trip() {
    for version in GrammarVersion::ALL {
        let schema = version.schema();
        for kind in schema.all_kinds().iter() {
            for parent in schema.derive_parents(kind).iter() {
                assert!(
                    schema.derive_children(parent).contains(kind),
                    "{version}: {parent} lists no {kind} child"
                );
            }
            for child in schema.derive_children(kind).iter() {
                assert!(schema.derive_parents(child).contains(kind));
            }
        }
    }
}

#[test]
fn test_classified_kinds_are_defined() {
    for version in GrammarVersion::ALL {
        let schema = version.schema();
        let all = schema.all_kinds();
        assert!(schema.statement_kinds().is_subset(all));
        assert!(schema.expression_kinds().is_subset(all));
        assert!(schema.root_kinds().is_subset(all));
        assert!(
            schema
                .statement_kinds()
                .intersection(schema.expression_kinds())
                .is_empty()
        );
        let covered = schema
            .other_kinds()
            .union(schema.statement_kinds())
            .union(schema.expression_kinds())
            .union(schema.root_kinds());
        assert_eq!(&covered, all);
    }
}

#[test]
fn test_statement_pseudo_kind_expands_to_members() {
    let schema = GrammarVersion::Es2015.schema();
    let body = schema.field_children(NodeKind::BlockStatement, "body").unwrap();
    assert_eq!(body, schema.statement_kinds());
    assert!(body.contains(NodeKind::ClassDeclaration));
    assert!(body.contains(NodeKind::ForOfStatement));

    let module_body = schema
        .field_children(NodeKind::ModuleProgram, "body")
        .unwrap();
    assert!(body.is_subset(module_body));
    assert!(module_body.contains(NodeKind::ImportDeclaration));
    assert!(!schema.derive_children(NodeKind::Program).contains(NodeKind::ImportDeclaration));
    assert_eq!(schema.field_children(NodeKind::Identifier, "name"), None);
}

#[test]
fn test_node_pseudo_kind_expands_to_every_non_root_kind() {
    let base = GrammarLayer::new("any")
        .node(NodeKind::Program, |n| n.field("body", list!(Node)))
        .node(NodeKind::Identifier, |n| n.field("name", FieldType::string()))
        .node(NodeKind::ExpressionStatement, |n| {
            n.field("expression", one!(Identifier))
        })
        .roots([NodeKind::Program]);
    let schema = merge(&base, &[]).unwrap();
    assert_eq!(
        schema.derive_children(NodeKind::Program),
        &KindSet::from([
            NodeKind::ExpressionStatement,
            NodeKind::Identifier,
        ])
    );
    assert_eq!(
        schema.derive_parents(NodeKind::Identifier).names(),
        vec!["ExpressionStatement", "Program"]
    );
    assert!(schema.derive_parents(NodeKind::Program).is_empty());
    assert_eq!(schema.parent_type(NodeKind::Program), ParentType::Absent);
    assert!(schema.diagnostics().is_empty());
}

#[test]
fn test_root_kind_never_gains_parents() {
    for version in GrammarVersion::ALL {
        let schema = version.schema();
        for root in schema.root_kinds().iter() {
            assert!(schema.derive_parents(root).is_empty(), "{version} {root}");
        }
    }
}

#[test]
fn test_member_expression_tag_extraction() {
    let schema = GrammarVersion::Es5.schema();
    assert_eq!(
        schema.kinds_with_tag("MemberExpression").names(),
        vec!["BasicMemberExpression", "ComputedMemberExpression"]
    );
    assert_eq!(
        schema.kinds_with_tag("Literal").names(),
        vec!["BooleanLiteral", "NullLiteral", "NumberLiteral", "RegExpLiteral", "StringLiteral"]
    );
    assert!(schema.kinds_with_tag("ArrayPattern").is_empty());

    let latest = GrammarVersion::LATEST.schema();
    assert_eq!(
        latest.kinds_with_tag("Property").len(),
        // Basic, Accessor, Method, Shorthand, Computed, ComputedAccessor,
        // ComputedMethod plus three each for assignment and binding patterns
        13
    );
}
