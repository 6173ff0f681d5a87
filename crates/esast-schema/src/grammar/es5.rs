//! The ES5 base grammar.

use crate::field::{FieldType, Primitives};
use crate::kind::NodeKind as K;
use crate::layer::GrammarLayer;
use crate::operators::{
    AccessorKind, AssignmentOperator as A, BinaryOperator as B, LogicalOperator, UnaryOperator,
    UpdateOperator,
};
use crate::{holey_list, list, one, opt};

pub const NAME: &str = "ES5";

/// Assignment operators that exist in ES5 (no `**=`).
pub(crate) const ASSIGNMENT_OPERATORS: &[A] = &[
    A::Assign,
    A::AddAssign,
    A::SubtractAssign,
    A::MultiplyAssign,
    A::DivideAssign,
    A::RemainderAssign,
    A::LeftShiftAssign,
    A::RightShiftAssign,
    A::UnsignedRightShiftAssign,
    A::BitwiseOrAssign,
    A::BitwiseXorAssign,
    A::BitwiseAndAssign,
];

/// Binary operators that exist in ES5 (no `**`).
pub(crate) const BINARY_OPERATORS: &[B] = &[
    B::Equal,
    B::NotEqual,
    B::StrictEqual,
    B::StrictNotEqual,
    B::LessThan,
    B::LessThanOrEqual,
    B::GreaterThan,
    B::GreaterThanOrEqual,
    B::LeftShift,
    B::RightShift,
    B::UnsignedRightShift,
    B::BitwiseOr,
    B::BitwiseXor,
    B::BitwiseAnd,
    B::Add,
    B::Subtract,
    B::Multiply,
    B::Divide,
    B::Remainder,
    B::In,
    B::Instanceof,
];

fn literal_kind(layer: GrammarLayer, kind: K, value: FieldType) -> GrammarLayer {
    layer.node(kind, |n| {
        n.tag("Literal")
            .field("value", value)
            .field("regex", FieldType::undefined())
    })
}

fn property_key() -> FieldType {
    one!(Identifier | NumberLiteral | StringLiteral)
}

pub fn layer() -> GrammarLayer {
    let layer = GrammarLayer::new(NAME)
        // Root
        .node(K::Program, |n| {
            n.field("body", list!(Statement))
                .field("comments", FieldType::primitive(Primitives::COMMENTS))
                .field("tokens", FieldType::primitive(Primitives::TOKENS))
        })
        // Statements
        .node(K::BlockStatement, |n| n.field("body", list!(Statement)))
        .node(K::BreakStatement, |n| n.field("label", opt!(Identifier)))
        .node(K::ContinueStatement, |n| n.field("label", opt!(Identifier)))
        .node(K::DebuggerStatement, |n| n)
        .node(K::DoWhileStatement, |n| {
            n.field("body", one!(Statement))
                .field("test", one!(Expression))
        })
        .node(K::EmptyStatement, |n| n)
        .node(K::ExpressionStatement, |n| n.field("expression", one!(Expression)))
        .node(K::ForInStatement, |n| {
            n.field(
                "left",
                one!(Identifier | BasicMemberExpression | ComputedMemberExpression | VariableDeclaration),
            )
            .field("right", one!(Expression))
            .field("body", one!(Statement))
        })
        .node(K::ForStatement, |n| {
            n.field("init", opt!(VariableDeclaration | Expression))
                .field("test", opt!(Expression))
                .field("update", opt!(Expression))
                .field("body", one!(Statement))
        })
        .node(K::FunctionDeclaration, |n| {
            n.field("id", one!(Identifier))
                .field("params", list!(Identifier))
                .field("body", one!(BlockStatement))
        })
        .node(K::IfStatement, |n| {
            n.field("test", one!(Expression))
                .field("consequent", one!(Statement))
                .field("alternate", opt!(Statement))
        })
        .node(K::LabeledStatement, |n| {
            n.field("label", one!(Identifier))
                .field("body", one!(Statement))
        })
        .node(K::ReturnStatement, |n| n.field("argument", opt!(Expression)))
        .node(K::SwitchStatement, |n| {
            n.field("discriminant", one!(Expression))
                .field("cases", list!(SwitchCase))
        })
        .node(K::ThrowStatement, |n| n.field("argument", one!(Expression)))
        .node(K::TryStatement, |n| {
            n.field("block", one!(BlockStatement))
                .field("handler", opt!(CatchClause))
                .field("finalizer", opt!(BlockStatement))
        })
        .node(K::VariableDeclaration, |n| {
            n.field("declarations", list!(VariableDeclarator))
        })
        .node(K::WhileStatement, |n| {
            n.field("test", one!(Expression))
                .field("body", one!(Statement))
        })
        .node(K::WithStatement, |n| {
            n.field("object", one!(Expression))
                .field("body", one!(Statement))
        })
        // Expressions
        .node(K::ArrayExpression, |n| n.field("elements", holey_list!(Expression)))
        .node(K::AssignmentExpression, |n| {
            n.field("operator", FieldType::one_of(ASSIGNMENT_OPERATORS))
                .field(
                    "left",
                    one!(Identifier | BasicMemberExpression | ComputedMemberExpression),
                )
                .field("right", one!(Expression))
        })
        .node(K::BinaryExpression, |n| {
            n.field("operator", FieldType::one_of(BINARY_OPERATORS))
                .field("left", one!(Expression))
                .field("right", one!(Expression))
        })
        .node(K::CallExpression, |n| {
            n.field("callee", one!(Expression))
                .field("arguments", list!(Expression))
        })
        .node(K::ConditionalExpression, |n| {
            n.field("test", one!(Expression))
                .field("alternate", one!(Expression))
                .field("consequent", one!(Expression))
        })
        .node(K::FunctionExpression, |n| {
            n.field("id", opt!(Identifier))
                .field("params", list!(Identifier))
                .field("body", one!(BlockStatement))
        })
        .node(K::Identifier, |n| n.field("name", FieldType::string()))
        .node(K::LogicalExpression, |n| {
            n.field("operator", FieldType::one_of(LogicalOperator::ALL))
                .field("left", one!(Expression))
                .field("right", one!(Expression))
        })
        .node(K::BasicMemberExpression, |n| {
            n.tag("MemberExpression")
                .field("computed", FieldType::bool_literal(false))
                .field("object", one!(Expression))
                .field("property", one!(Identifier))
        })
        .node(K::ComputedMemberExpression, |n| {
            n.tag("MemberExpression")
                .field("computed", FieldType::bool_literal(true))
                .field("object", one!(Expression))
                .field("property", one!(Expression))
        })
        .node(K::NewExpression, |n| {
            n.field("callee", one!(Expression))
                .field("arguments", list!(Expression))
        })
        .node(K::ObjectExpression, |n| {
            n.field("properties", list!(BasicProperty | AccessorProperty))
        })
        .node(K::SequenceExpression, |n| n.field("expressions", list!(Expression)))
        .node(K::ThisExpression, |n| n)
        .node(K::UnaryExpression, |n| {
            n.field("operator", FieldType::one_of(UnaryOperator::ALL))
                .field("prefix", FieldType::boolean())
                .field("argument", one!(Expression))
        })
        .node(K::UpdateExpression, |n| {
            n.field("operator", FieldType::one_of(UpdateOperator::ALL))
                .field(
                    "argument",
                    one!(Identifier | BasicMemberExpression | ComputedMemberExpression),
                )
                .field("prefix", FieldType::boolean())
        })
        .node(K::RegExpLiteral, |n| {
            n.tag("Literal")
                .field("value", FieldType::primitive(Primitives::REGEXP))
                .field("regex", FieldType::primitive(Primitives::REGEX_SOURCE))
        })
        // Others
        .node(K::CatchClause, |n| {
            n.field("param", one!(Identifier))
                .field("body", one!(BlockStatement))
        })
        .node(K::BasicProperty, |n| {
            n.tag("Property")
                .field("kind", FieldType::str_literal("init"))
                .field("key", property_key())
                .field("value", one!(Expression))
        })
        .node(K::AccessorProperty, |n| {
            n.tag("Property")
                .field("kind", FieldType::one_of(AccessorKind::ALL))
                .field("key", property_key())
                .field("value", one!(FunctionExpression))
        })
        .node(K::SwitchCase, |n| {
            n.field("test", opt!(Expression))
                .field("consequent", list!(Statement))
        })
        .node(K::VariableDeclarator, |n| {
            n.field("id", one!(Identifier))
                .field("init", opt!(Expression))
        });

    let layer = literal_kind(layer, K::BooleanLiteral, FieldType::boolean());
    let layer = literal_kind(layer, K::NullLiteral, FieldType::null());
    let layer = literal_kind(layer, K::NumberLiteral, FieldType::number());
    let layer = literal_kind(layer, K::StringLiteral, FieldType::string());

    layer
        .roots([K::Program])
        .statements([
            K::BlockStatement,
            K::BreakStatement,
            K::ContinueStatement,
            K::DebuggerStatement,
            K::DoWhileStatement,
            K::EmptyStatement,
            K::ExpressionStatement,
            K::ForInStatement,
            K::ForStatement,
            K::FunctionDeclaration,
            K::IfStatement,
            K::LabeledStatement,
            K::ReturnStatement,
            K::SwitchStatement,
            K::ThrowStatement,
            K::TryStatement,
            K::VariableDeclaration,
            K::WhileStatement,
            K::WithStatement,
        ])
        .expressions([
            K::ArrayExpression,
            K::AssignmentExpression,
            K::BinaryExpression,
            K::BooleanLiteral,
            K::CallExpression,
            K::ConditionalExpression,
            K::FunctionExpression,
            K::Identifier,
            K::LogicalExpression,
            K::BasicMemberExpression,
            K::ComputedMemberExpression,
            K::NewExpression,
            K::NullLiteral,
            K::NumberLiteral,
            K::ObjectExpression,
            K::RegExpLiteral,
            K::SequenceExpression,
            K::StringLiteral,
            K::ThisExpression,
            K::UnaryExpression,
            K::UpdateExpression,
        ])
}
