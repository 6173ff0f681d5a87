//! ES2015 extension layers, in application order.

use crate::field::{FieldType, Primitives};
use crate::kind::NodeKind as K;
use crate::layer::GrammarLayer;
use crate::operators::{AccessorKind, MethodKind, SourceType, VariableKind};
use crate::{holey_list, list, one, opt};

fn property_key() -> FieldType {
    one!(Identifier | NumberLiteral | StringLiteral)
}

fn binding_params() -> FieldType {
    list!(BindingArrayPattern | BindingAssignmentPattern | BindingObjectPattern | BindingRestElement | Identifier)
}

fn assignment_target() -> FieldType {
    one!(
        AssignmentArrayPattern
            | AssignmentAssignmentPattern
            | AssignmentObjectPattern
            | Identifier
            | BasicMemberExpression
            | ComputedMemberExpression
    )
}

fn binding_target() -> FieldType {
    one!(BindingArrayPattern | BindingAssignmentPattern | BindingObjectPattern | Identifier)
}

/// `kind: "init"` plus the three boolean flags every ES2015 property carries.
fn property_flags(computed: bool, method: bool, shorthand: bool) -> impl FnOnce(crate::KindDelta) -> crate::KindDelta {
    move |n| {
        n.tag("Property")
            .field("kind", FieldType::str_literal("init"))
            .field("computed", FieldType::bool_literal(computed))
            .field("method", FieldType::bool_literal(method))
            .field("shorthand", FieldType::bool_literal(shorthand))
    }
}

pub fn arrow_function() -> GrammarLayer {
    GrammarLayer::new("ArrowFunction")
        .node(K::ArrowFunctionExpression, |n| {
            n.field("id", opt!(Identifier))
                .field("params", binding_params())
                .field("body", one!(BlockStatement | Expression))
        })
        .expressions([K::ArrowFunctionExpression])
}

pub fn class() -> GrammarLayer {
    GrammarLayer::new("Class")
        .node(K::CallExpression, |n| n.field("callee", one!(Super)))
        .node(K::BasicMemberExpression, |n| n.field("object", one!(Super)))
        .node(K::ComputedMemberExpression, |n| n.field("object", one!(Super)))
        .node(K::ClassDeclaration, |n| {
            n.field("id", one!(Identifier))
                .field("superClass", opt!(Expression))
                .field("body", one!(ClassBody))
        })
        .node(K::ClassExpression, |n| {
            n.field("id", opt!(Identifier))
                .field("superClass", opt!(Expression))
                .field("body", one!(ClassBody))
        })
        .node(K::MetaProperty, |n| {
            n.field("meta", one!(Identifier))
                .field("property", one!(Identifier))
        })
        .node(K::ClassBody, |n| {
            n.field(
                "body",
                list!(ComputedMethodDefinition | ConstructorDefinition | MethodDefinition),
            )
        })
        .node(K::MethodDefinition, |n| {
            n.field("computed", FieldType::bool_literal(false))
                .field("kind", FieldType::one_of(MethodKind::ALL))
                .field("static", FieldType::boolean())
                .field("key", property_key())
                .field("value", one!(FunctionExpression))
        })
        .node(K::ConstructorDefinition, |n| {
            n.tag("MethodDefinition")
                .field("computed", FieldType::bool_literal(false))
                .field("kind", FieldType::str_literal("constructor"))
                .field("static", FieldType::bool_literal(false))
                .field("key", one!(Identifier | StringLiteral))
                .field("value", one!(FunctionExpression))
        })
        .node(K::ComputedMethodDefinition, |n| {
            n.tag("MethodDefinition")
                .field("computed", FieldType::bool_literal(true))
                .field("kind", FieldType::one_of(MethodKind::ALL))
                .field("static", FieldType::boolean())
                .field("key", one!(Expression))
                .field("value", one!(FunctionExpression))
        })
        .node(K::Super, |n| n)
        .statements([K::ClassDeclaration])
        .expressions([K::ClassExpression, K::MetaProperty])
}

pub fn destructuring_assignment() -> GrammarLayer {
    GrammarLayer::new("DestructuringAssignment")
        .node(K::ForInStatement, |n| {
            n.field("left", one!(AssignmentArrayPattern | AssignmentObjectPattern))
        })
        .node(K::AssignmentExpression, |n| {
            n.field("left", one!(AssignmentArrayPattern | AssignmentObjectPattern))
        })
        .node(K::AssignmentArrayPattern, |n| {
            n.tag("ArrayPattern").field(
                "elements",
                holey_list!(
                    AssignmentArrayPattern
                        | AssignmentAssignmentPattern
                        | AssignmentObjectPattern
                        | AssignmentRestElement
                        | BasicMemberExpression
                        | ComputedMemberExpression
                        | Identifier
                ),
            )
        })
        .node(K::AssignmentAssignmentPattern, |n| {
            n.tag("AssignmentPattern")
                .field(
                    "left",
                    one!(
                        AssignmentArrayPattern
                            | AssignmentObjectPattern
                            | BasicMemberExpression
                            | ComputedMemberExpression
                            | Identifier
                    ),
                )
                .field("right", one!(Expression))
        })
        .node(K::AssignmentProperty, |n| {
            property_flags(false, false, false)(n)
                .field("key", property_key())
                .field("value", assignment_target())
        })
        .node(K::AssignmentShorthandProperty, |n| {
            property_flags(false, false, true)(n)
                .field("key", one!(Identifier))
                .field("value", one!(Identifier))
        })
        .node(K::AssignmentComputedProperty, |n| {
            property_flags(true, false, false)(n)
                .field("key", one!(Expression))
                .field("value", assignment_target())
        })
        .node(K::AssignmentObjectPattern, |n| {
            n.tag("ObjectPattern").field(
                "properties",
                list!(AssignmentComputedProperty | AssignmentProperty | AssignmentShorthandProperty),
            )
        })
        .node(K::AssignmentRestElement, |n| {
            n.tag("RestElement").field(
                "argument",
                one!(
                    AssignmentArrayPattern
                        | AssignmentObjectPattern
                        | Identifier
                        | BasicMemberExpression
                        | ComputedMemberExpression
                ),
            )
        })
}

pub fn destructuring_binding() -> GrammarLayer {
    let pattern_params =
        || list!(BindingArrayPattern | BindingAssignmentPattern | BindingObjectPattern | BindingRestElement);

    GrammarLayer::new("DestructuringBinding")
        .node(K::CatchClause, |n| {
            n.field("param", one!(BindingArrayPattern | BindingObjectPattern))
        })
        .node(K::FunctionDeclaration, |n| n.field("params", pattern_params()))
        .node(K::FunctionExpression, |n| n.field("params", pattern_params()))
        .node(K::VariableDeclarator, |n| {
            n.field("id", one!(BindingArrayPattern | BindingObjectPattern))
        })
        .node(K::BindingArrayPattern, |n| {
            n.tag("ArrayPattern").field(
                "elements",
                holey_list!(
                    BindingAssignmentPattern
                        | BindingArrayPattern
                        | BindingObjectPattern
                        | BindingRestElement
                        | Identifier
                ),
            )
        })
        .node(K::BindingAssignmentPattern, |n| {
            n.tag("AssignmentPattern")
                .field("left", one!(BindingArrayPattern | BindingObjectPattern | Identifier))
                .field("right", one!(Expression))
        })
        .node(K::BindingProperty, |n| {
            property_flags(false, false, false)(n)
                .field("key", property_key())
                .field("value", binding_target())
        })
        .node(K::BindingShorthandProperty, |n| {
            property_flags(false, false, true)(n)
                .field("key", one!(Identifier))
                .field("value", one!(Identifier))
        })
        .node(K::BindingComputedProperty, |n| {
            property_flags(true, false, false)(n)
                .field("key", one!(Expression))
                .field("value", binding_target())
        })
        .node(K::BindingObjectPattern, |n| {
            n.tag("ObjectPattern").field(
                "properties",
                list!(BindingComputedProperty | BindingProperty | BindingShorthandProperty),
            )
        })
        .node(K::BindingRestElement, |n| {
            n.tag("RestElement").field("argument", one!(Identifier))
        })
}

pub fn iteration() -> GrammarLayer {
    GrammarLayer::new("Iteration")
        .node(K::FunctionDeclaration, |n| n.field("generator", FieldType::boolean()))
        .node(K::FunctionExpression, |n| n.field("generator", FieldType::boolean()))
        .node(K::ForOfStatement, |n| {
            n.field(
                "left",
                one!(
                    AssignmentArrayPattern
                        | AssignmentObjectPattern
                        | BasicMemberExpression
                        | ComputedMemberExpression
                        | Identifier
                        | VariableDeclaration
                ),
            )
            .field("right", one!(Expression))
            .field("body", one!(Statement))
        })
        .node(K::YieldExpression, |n| {
            n.field("delegate", FieldType::boolean())
                .field("argument", opt!(Expression))
        })
        .statements([K::ForOfStatement])
        .expressions([K::YieldExpression])
}

pub fn lexical_binding() -> GrammarLayer {
    GrammarLayer::new("LexicalBinding").node(K::VariableDeclaration, |n| {
        n.field("kind", FieldType::one_of(VariableKind::ALL))
    })
}

pub fn module() -> GrammarLayer {
    GrammarLayer::new("Module")
        .node(K::Program, |n| {
            n.field("sourceType", FieldType::one_of(&[SourceType::Script]))
        })
        .node(K::ModuleProgram, |n| {
            n.tag("Program")
                .field("sourceType", FieldType::one_of(&[SourceType::Module]))
                .field(
                    "body",
                    list!(
                        Statement
                            | ExportAllDeclaration
                            | ExportDefaultDeclaration
                            | ExportNamedDeclaration
                            | ExportNamedFromDeclaration
                            | ImportDeclaration
                    ),
                )
                .field("comments", FieldType::primitive(Primitives::COMMENTS))
                .field("tokens", FieldType::primitive(Primitives::TOKENS))
        })
        .node(K::ExportAllDeclaration, |n| n.field("source", one!(StringLiteral)))
        .node(K::ExportDefaultDeclaration, |n| {
            n.field(
                "declaration",
                one!(
                    AnonymousDefaultExportedClassDeclaration
                        | AnonymousDefaultExportedFunctionDeclaration
                        | ClassDeclaration
                        | FunctionDeclaration
                        | Expression
                ),
            )
        })
        .node(K::ExportNamedDeclaration, |n| {
            n.tag("ExportNamedDeclaration")
                .field(
                    "declaration",
                    one!(ClassDeclaration | FunctionDeclaration | VariableDeclaration),
                )
                .field("specifiers", FieldType::empty_list())
                .field("source", FieldType::null())
        })
        .node(K::ExportNamedFromDeclaration, |n| {
            n.tag("ExportNamedDeclaration")
                .field("declaration", FieldType::null())
                .field("specifiers", list!(ExportSpecifier))
                .field("source", one!(StringLiteral))
        })
        .node(K::ImportDeclaration, |n| {
            n.field(
                "specifiers",
                list!(ImportSpecifier | ImportDefaultSpecifier | ImportNamespaceSpecifier),
            )
            .field("source", one!(StringLiteral))
        })
        .node(K::AnonymousDefaultExportedClassDeclaration, |n| {
            n.tag("ClassDeclaration")
                .field("id", FieldType::null())
                .field("superClass", opt!(Expression))
                .field("body", one!(ClassBody))
        })
        .node(K::AnonymousDefaultExportedFunctionDeclaration, |n| {
            n.tag("FunctionDeclaration")
                .field("generator", FieldType::boolean())
                .field("id", FieldType::null())
                .field("params", binding_params())
                .field("body", one!(BlockStatement))
        })
        .node(K::ExportSpecifier, |n| {
            n.field("local", one!(Identifier))
                .field("exported", one!(Identifier))
        })
        .node(K::ImportDefaultSpecifier, |n| n.field("local", one!(Identifier)))
        .node(K::ImportNamespaceSpecifier, |n| n.field("local", one!(Identifier)))
        .node(K::ImportSpecifier, |n| {
            n.field("imported", one!(Identifier))
                .field("local", one!(Identifier))
        })
        .roots([K::ModuleProgram])
}

pub fn object_literal() -> GrammarLayer {
    let legacy_flags = |n: crate::KindDelta| {
        n.field("computed", FieldType::bool_literal(false))
            .field("method", FieldType::bool_literal(false))
            .field("shorthand", FieldType::bool_literal(false))
    };

    GrammarLayer::new("ObjectLiteral")
        .node(K::ObjectExpression, |n| {
            n.field(
                "properties",
                list!(
                    MethodProperty
                        | ShorthandProperty
                        | ComputedProperty
                        | ComputedAccessorProperty
                        | ComputedMethodProperty
                ),
            )
        })
        .node(K::BasicProperty, legacy_flags)
        .node(K::AccessorProperty, legacy_flags)
        .node(K::MethodProperty, |n| {
            property_flags(false, true, false)(n)
                .field("key", property_key())
                .field("value", one!(FunctionExpression))
        })
        .node(K::ShorthandProperty, |n| {
            property_flags(false, false, true)(n)
                .field("key", one!(Identifier))
                .field("value", one!(Identifier))
        })
        .node(K::ComputedProperty, |n| {
            property_flags(true, false, false)(n)
                .field("key", one!(Expression))
                .field("value", one!(Expression))
        })
        .node(K::ComputedAccessorProperty, |n| {
            n.tag("Property")
                .field("kind", FieldType::one_of(AccessorKind::ALL))
                .field("computed", FieldType::bool_literal(true))
                .field("method", FieldType::bool_literal(false))
                .field("shorthand", FieldType::bool_literal(false))
                .field("key", one!(Expression))
                .field("value", one!(FunctionExpression))
        })
        .node(K::ComputedMethodProperty, |n| {
            property_flags(true, true, false)(n)
                .field("key", one!(Expression))
                .field("value", one!(FunctionExpression))
        })
}

pub fn regexp() -> GrammarLayer {
    GrammarLayer::new("RegExp").node(K::RegExpLiteral, |n| n.field("value", FieldType::null()))
}

pub fn spread() -> GrammarLayer {
    GrammarLayer::new("Spread")
        .node(K::ArrayExpression, |n| n.field("elements", list!(SpreadElement)))
        .node(K::CallExpression, |n| n.field("arguments", list!(SpreadElement)))
        .node(K::NewExpression, |n| n.field("arguments", list!(SpreadElement)))
        .node(K::SpreadElement, |n| n.field("argument", one!(Expression)))
}

pub fn template_literal() -> GrammarLayer {
    GrammarLayer::new("TemplateLiteral")
        .node(K::TaggedTemplateExpression, |n| {
            n.field("tag", one!(Expression))
                .field("quasi", one!(TemplateLiteral))
        })
        .node(K::TemplateLiteral, |n| {
            n.field("quasis", list!(TemplateElement))
                .field("expressions", list!(Expression))
        })
        .node(K::TemplateElement, |n| {
            n.field("tail", FieldType::boolean())
                .field("value", FieldType::primitive(Primitives::TEMPLATE_VALUE))
        })
        .expressions([K::TaggedTemplateExpression, K::TemplateLiteral])
}
