//! Tests for node views, typed narrowing and parent references.

use crate::builder_tests::assignment_tree;
use crate::node::{
    AssignmentExpression, BasicMemberExpression, CallExpression, ClassBody,
    ComputedMemberExpression, ExpressionStatement, Identifier, ModuleProgram, Program,
    SequenceExpression,
};
use crate::{AccessError, NodeIndex, NodeList, TreeBuilder};
use esast_common::Span;
use esast_schema::{AssignmentOperator, GrammarVersion, NodeKind, SourceType};
use rayon::prelude::*;

#[test]
fn test_parent_narrows_to_declared_kinds() {
    let fx = assignment_tree(GrammarVersion::Es2015);
    let a = fx.tree.get(fx.a).unwrap();
    let parent = a.parent().unwrap();

    assert_eq!(parent.kind(), NodeKind::AssignmentExpression);
    assert_eq!(parent.field(), Some("left"));
    assert_eq!(
        parent.kinds(),
        fx.tree.schema().derive_parents(NodeKind::Identifier)
    );
    assert!(parent.kinds().contains(NodeKind::VariableDeclarator));

    let assign = parent.narrow::<AssignmentExpression>().unwrap();
    assert_eq!(assign.operator, AssignmentOperator::Assign);
    assert_eq!(assign.index(), fx.assign);

    // Declared but not the actual parent.
    assert_eq!(
        parent.narrow::<CallExpression>().unwrap_err(),
        AccessError::KindMismatch {
            index: fx.assign,
            expected: NodeKind::CallExpression,
            found: NodeKind::AssignmentExpression,
        }
    );
    // Never a parent of an identifier.
    for err in [
        parent.narrow::<Program>().map(|_| ()).unwrap_err(),
        parent.narrow::<ClassBody>().map(|_| ()).unwrap_err(),
    ] {
        assert!(matches!(
            err,
            AccessError::UndeclaredParentKind {
                child: NodeKind::Identifier,
                ..
            }
        ));
    }

    let b = fx.tree.get(fx.b).unwrap();
    assert_eq!(b.parent().unwrap().field(), Some("right"));
}

#[test]
fn test_walk_down_from_root() {
    let fx = assignment_tree(GrammarVersion::Es5);
    let root = fx.tree.root();
    assert!(root.parent().is_none());
    assert!(fx.tree.schema().parent_type(root.kind()).is_absent());

    let program = root.expect::<Program>();
    assert_eq!(program.source_type(), SourceType::Script);
    assert_eq!(program.tokens.len(), 4);
    assert!(program.tokens[1].is_punctuator("="));

    let body = program.resolve(&program.body);
    assert_eq!(body.len(), 1);
    let stmt = body[0].expect::<ExpressionStatement>();
    assert_eq!(stmt.index(), fx.stmt);
    let assign = stmt.resolve(stmt.expression).expect::<AssignmentExpression>();
    let left = assign.resolve(assign.left).expect::<Identifier>();
    assert_eq!(left.name, "a");
    let right = assign.resolve(assign.right).narrow::<Identifier>().unwrap();
    assert_eq!(right.name, "b");
    assert_eq!(right.parent().unwrap().view(), assign.view());
}

#[test]
fn test_children_in_field_order() {
    let fx = assignment_tree(GrammarVersion::Es5);
    let assign = fx.tree.get(fx.assign).unwrap();
    let indices: Vec<_> = assign.children().iter().map(|child| child.index()).collect();
    assert_eq!(indices, vec![fx.a, fx.b]);

    let mut fields = Vec::new();
    assign.for_each_child(|field, _| fields.push(field));
    assert_eq!(fields, ["left", "right"]);
    assert!(fx.tree.get(fx.a).unwrap().children().is_empty());
    assert!(fx.tree.get(NodeIndex(99)).is_none());
}

#[test]
#[should_panic(expected = "expected Program at #0, found Identifier")]
fn test_expect_fails_loudly() {
    let fx = assignment_tree(GrammarVersion::Es5);
    fx.tree.get(fx.a).unwrap().expect::<Program>();
}

#[test]
fn test_shared_tags_and_module_root() {
    let mut builder = TreeBuilder::new();
    let mut ident = |name: &str| {
        builder
            .add(Span::default(), Identifier { name: name.to_string() })
            .unwrap()
    };
    let (a, b, c, d) = (ident("a"), ident("b"), ident("c"), ident("d"));
    let basic = builder
        .add(
            Span::default(),
            BasicMemberExpression {
                object: a,
                property: b,
            },
        )
        .unwrap();
    let computed = builder
        .add(
            Span::default(),
            ComputedMemberExpression {
                object: c,
                property: d,
            },
        )
        .unwrap();
    let sequence = builder
        .add(
            Span::default(),
            SequenceExpression {
                expressions: NodeList::from(vec![basic, computed]),
            },
        )
        .unwrap();
    let stmt = builder
        .add(Span::default(), ExpressionStatement { expression: sequence })
        .unwrap();
    let root = builder
        .add(
            Span::default(),
            ModuleProgram {
                body: NodeList::from(vec![stmt]),
                comments: Vec::new(),
                tokens: Vec::new(),
            },
        )
        .unwrap();
    let tree = builder
        .finish(root, GrammarVersion::Es2015.schema())
        .unwrap();

    let root = tree.root();
    assert_eq!(root.kind(), NodeKind::ModuleProgram);
    assert_eq!(root.type_tag(), "Program");
    assert_eq!(root.expect::<ModuleProgram>().source_type(), SourceType::Module);

    let basic = tree.get(basic).unwrap();
    let computed = tree.get(computed).unwrap();
    assert_eq!(basic.type_tag(), "MemberExpression");
    assert_eq!(computed.type_tag(), "MemberExpression");
    assert_ne!(basic.kind(), computed.kind());
    assert!(!basic.expect::<BasicMemberExpression>().computed());
    assert!(computed.expect::<ComputedMemberExpression>().computed());
    assert!(computed.is::<ComputedMemberExpression>());

    let names: Vec<_> = tree
        .nodes_of::<Identifier>()
        .map(|id| id.record().name.as_str())
        .collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
    assert_eq!(tree.get(a).unwrap().type_tag(), "Identifier");
}

#[test]
fn test_concurrent_readers() {
    let fx = assignment_tree(GrammarVersion::Es2019);
    let tree = &fx.tree;

    let parents: Vec<Option<NodeKind>> = (0..tree.len() as u32)
        .into_par_iter()
        .map(|slot| {
            tree.get(NodeIndex(slot))
                .and_then(|view| view.parent())
                .map(|parent| parent.kind())
        })
        .collect();
    assert_eq!(
        parents,
        vec![
            Some(NodeKind::AssignmentExpression),
            Some(NodeKind::AssignmentExpression),
            Some(NodeKind::ExpressionStatement),
            Some(NodeKind::Program),
            None,
        ]
    );

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| assert!(tree.validate().is_empty()));
        }
    });
}
