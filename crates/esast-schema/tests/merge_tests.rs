//! Tests for layer merging: union semantics, tag overrides and validation.

use crate::{
    BuiltinLayer, FieldType, GrammarLayer, KindCategory, LiteralValue, NodeKind, SchemaDiagnostic,
    SchemaError, base, compose, list, merge, one, opt,
};

fn tiny_base() -> GrammarLayer {
    GrammarLayer::new("tiny")
        .node(NodeKind::Program, |n| n.field("body", list!(Statement)))
        .node(NodeKind::ExpressionStatement, |n| {
            n.field("expression", one!(Expression))
        })
        .node(NodeKind::Identifier, |n| n.field("name", FieldType::string()))
        .roots([NodeKind::Program])
        .statements([NodeKind::ExpressionStatement])
        .expressions([NodeKind::Identifier])
}

#[test]
fn test_same_field_from_two_layers_is_unioned() {
    let first = GrammarLayer::new("first").node(NodeKind::Identifier, |n| {
        n.field("optional", FieldType::boolean())
    });
    let second = GrammarLayer::new("second").node(NodeKind::Identifier, |n| {
        n.field("optional", FieldType::null())
    });

    let schema = merge(&tiny_base(), &[first, second]).unwrap();
    let ty = schema.field(NodeKind::Identifier, "optional").unwrap();
    assert_eq!(ty.to_string(), "boolean | null");
    assert_eq!(schema.name(), "tiny+first+second");
    assert_eq!(schema.layers(), &["tiny", "first", "second"]);
}

#[test]
fn test_later_layer_does_not_replace_earlier_type() {
    let widen = GrammarLayer::new("widen").node(NodeKind::ExpressionStatement, |n| {
        n.field("expression", one!(Program))
    });
    let schema = merge(&tiny_base(), &[widen]).unwrap();
    assert_eq!(
        schema
            .field(NodeKind::ExpressionStatement, "expression")
            .unwrap()
            .to_string(),
        "Expression | Program"
    );
    assert!(
        schema
            .derive_children(NodeKind::ExpressionStatement)
            .contains(NodeKind::Identifier)
    );
}

#[test]
fn test_new_kinds_keep_the_layer_that_introduced_them() {
    let layer = GrammarLayer::new("this")
        .node(NodeKind::ThisExpression, |n| n)
        .expressions([NodeKind::ThisExpression]);
    let schema = merge(&tiny_base(), &[layer]).unwrap();
    assert_eq!(
        schema.kind(NodeKind::ThisExpression).unwrap().introduced_by,
        "this"
    );
    assert_eq!(schema.kind(NodeKind::Identifier).unwrap().introduced_by, "tiny");
    assert!(schema.is_expression_kind(NodeKind::ThisExpression));
}

#[test]
fn test_tag_override_replaces_kind_name() {
    let layer = GrammarLayer::new("member").node(NodeKind::BasicMemberExpression, |n| {
        n.tag("MemberExpression")
            .field("object", one!(Expression))
            .field("property", one!(Identifier))
    });
    let schema = merge(&tiny_base(), &[layer.expressions([NodeKind::BasicMemberExpression])])
        .unwrap();
    assert_eq!(
        schema.type_tag(NodeKind::BasicMemberExpression),
        Some("MemberExpression")
    );
    assert_eq!(schema.type_tag(NodeKind::Identifier), Some("Identifier"));
    assert_eq!(schema.type_tag(NodeKind::Super), None);
}

#[test]
fn test_conflicting_tag_overrides_fail() {
    let first = GrammarLayer::new("first").node(NodeKind::Identifier, |n| n.tag("Name"));
    let second = GrammarLayer::new("second").node(NodeKind::Identifier, |n| n.tag("Ident"));

    let err = merge(&tiny_base(), &[first, second]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::ConflictingTag {
            kind: NodeKind::Identifier,
            tag: "Ident",
            layer: "second",
            previous: "Name",
            previous_layer: "first",
        }
    );
    assert_eq!(err.kind(), NodeKind::Identifier);
    assert!(err.to_string().contains("`second`"));
}

#[test]
fn test_conflicting_tags_within_one_layer_fail() {
    let layer = GrammarLayer::new("renames")
        .node(NodeKind::Identifier, |n| n.tag("A"))
        .node(NodeKind::Identifier, |n| n.tag("B"));
    assert_eq!(
        layer.delta(NodeKind::Identifier).unwrap().conflicting_tags(),
        Some(("A", "B"))
    );

    let err = merge(&tiny_base(), &[layer]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::ConflictingTag {
            kind: NodeKind::Identifier,
            tag: "B",
            layer: "renames",
            previous: "A",
            previous_layer: "renames",
        }
    );

    let same = GrammarLayer::new("same")
        .node(NodeKind::Identifier, |n| n.tag("A").tag("A"))
        .node(NodeKind::Identifier, |n| n.tag("A"));
    let schema = merge(&tiny_base(), &[same]).unwrap();
    assert_eq!(schema.type_tag(NodeKind::Identifier), Some("A"));
}

#[test]
fn test_reference_to_root_kind_fails() {
    let base = GrammarLayer::new("nested")
        .node(NodeKind::Program, |n| n.field("body", list!(Statement)))
        .node(NodeKind::ExpressionStatement, |n| {
            n.field("expression", one!(Program))
        })
        .roots([NodeKind::Program])
        .statements([NodeKind::ExpressionStatement]);

    let err = merge(&base, &[]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::RootReferenced {
            kind: NodeKind::ExpressionStatement,
            field: "expression",
            root: NodeKind::Program,
        }
    );
    assert_eq!(err.kind(), NodeKind::ExpressionStatement);
}

#[test]
fn test_identical_tag_overrides_are_accepted() {
    let first = GrammarLayer::new("first").node(NodeKind::Identifier, |n| n.tag("Name"));
    let second = GrammarLayer::new("second").node(NodeKind::Identifier, |n| n.tag("Name"));

    let schema = merge(&tiny_base(), &[first, second]).unwrap();
    let tag = schema.kind(NodeKind::Identifier).unwrap().tag.unwrap();
    assert_eq!(tag.tag, "Name");
    assert_eq!(tag.layer, "first");
}

#[test]
fn test_merging_a_layer_twice_is_idempotent() {
    for layer in [BuiltinLayer::Class, BuiltinLayer::Spread, BuiltinLayer::TemplateLiteral] {
        let once = compose(&[layer]).unwrap().snapshot();
        let twice = compose(&[layer, layer]).unwrap().snapshot();
        assert_eq!(once.kinds, twice.kinds, "{layer}");
        assert_eq!(once.statement_kinds, twice.statement_kinds);
        assert_eq!(once.expression_kinds, twice.expression_kinds);
        assert_eq!(once.root_kinds, twice.root_kinds);
        assert_eq!(twice.layers.len(), once.layers.len() + 1);
    }
}

#[test]
fn test_dangling_reference_names_kind_and_field() {
    // Module refers to class kinds that only the Class layer defines.
    let err = compose(&[BuiltinLayer::Module]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::DanglingReference {
            kind: NodeKind::AnonymousDefaultExportedClassDeclaration,
            field: "body",
            target: NodeKind::ClassBody,
        }
    );
    assert!(compose(&[BuiltinLayer::Class, BuiltinLayer::Module]).is_err());
}

#[test]
fn test_dangling_reference_to_undefined_kind() {
    let layer = GrammarLayer::new("broken").node(NodeKind::Identifier, |n| {
        n.field("typeAnnotation", opt!(Super))
    });
    let err = merge(&tiny_base(), &[layer]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::DanglingReference {
            kind: NodeKind::Identifier,
            field: "typeAnnotation",
            target: NodeKind::Super,
        }
    );
}

#[test]
fn test_pseudo_kind_with_no_members_is_empty_kind_set() {
    let base = GrammarLayer::new("bare")
        .node(NodeKind::Program, |n| n.field("body", list!(Statement)))
        .roots([NodeKind::Program]);
    let err = merge(&base, &[]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::EmptyKindSet {
            kind: NodeKind::Program,
            field: "body",
        }
    );
}

#[test]
fn test_field_without_any_type_is_rejected() {
    let layer = GrammarLayer::new("empty").node(NodeKind::Identifier, |n| {
        n.field("nothing", FieldType::default())
    });
    let err = merge(&tiny_base(), &[layer]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::EmptyFieldType {
            kind: NodeKind::Identifier,
            field: "nothing",
        }
    );
}

#[test]
fn test_membership_of_undefined_kind_is_rejected() {
    let layer = GrammarLayer::new("phantom").statements([NodeKind::EmptyStatement]);
    let err = merge(&tiny_base(), &[layer]).unwrap_err();
    assert_eq!(
        err,
        SchemaError::UndefinedMember {
            category: KindCategory::Statement,
            kind: NodeKind::EmptyStatement,
        }
    );
}

#[test]
fn test_unreachable_kind_is_a_diagnostic_not_an_error() {
    let layer = GrammarLayer::new("island").node(NodeKind::TemplateElement, |n| {
        n.field("tail", FieldType::boolean())
    });
    let schema = merge(&tiny_base(), &[layer]).unwrap();
    assert_eq!(
        schema.diagnostics(),
        &[SchemaDiagnostic::UnreachableKind {
            kind: NodeKind::TemplateElement,
            introduced_by: "island",
        }]
    );
    assert!(schema.contains(NodeKind::TemplateElement));
    assert!(schema.parent_type(NodeKind::TemplateElement).is_absent());
}

#[test]
fn test_literal_values_follow_operator_layers() {
    let es5 = merge(&base(), &[]).unwrap();
    let values = es5.literal_values(NodeKind::BinaryExpression, "operator");
    assert_eq!(values.len(), 21);
    assert!(!values.contains(&LiteralValue::Str("**")));

    let es2016 = crate::GrammarVersion::Es2016.schema();
    let values = es2016.literal_values(NodeKind::BinaryExpression, "operator");
    assert_eq!(values.len(), 22);
    assert!(values.contains(&LiteralValue::Str("**")));
    assert!(
        es2016
            .literal_values(NodeKind::AssignmentExpression, "operator")
            .contains(&LiteralValue::Str("**="))
    );
    assert!(es5.literal_values(NodeKind::Identifier, "missing").is_empty());
}
