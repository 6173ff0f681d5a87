//! Typed per-kind node records.
//!
//! Every node kind of the latest grammar has a record struct carrying its
//! syntax-specific fields. Child references are [`NodeIndex`] handles into
//! the owning tree; fields whose value is fixed by the kind (for example
//! `computed` on `BasicMemberExpression`) are `const fn` accessors rather
//! than stored data.
//!
//! Span and parent are not part of a record. The arena stores them next to
//! the record for every node.

use crate::index::{HoleyList, NodeIndex, NodeList};
use esast_common::{Comment, RegexSource, Token};
use esast_schema::{
    AccessorKind, AssignmentOperator, BinaryOperator, LogicalOperator, MethodKind, NodeKind,
    SourceType, UnaryOperator, UpdateOperator, VariableKind,
};
use serde::Serialize;

/// The `{ cooked, raw }` value of a template element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TemplateValue {
    /// `None` for invalid escapes in tagged templates.
    pub cooked: Option<String>,
    pub raw: String,
}

/// Visits the node handles stored in one record field.
pub trait ChildSlots {
    fn for_each_slot(&self, f: &mut dyn FnMut(NodeIndex));
}

impl ChildSlots for NodeIndex {
    #[inline]
    fn for_each_slot(&self, f: &mut dyn FnMut(NodeIndex)) {
        f(*self);
    }
}

impl ChildSlots for Option<NodeIndex> {
    #[inline]
    fn for_each_slot(&self, f: &mut dyn FnMut(NodeIndex)) {
        if let Some(child) = self {
            f(*child);
        }
    }
}

impl ChildSlots for NodeList {
    fn for_each_slot(&self, f: &mut dyn FnMut(NodeIndex)) {
        for &child in &self.nodes {
            f(child);
        }
    }
}

impl ChildSlots for HoleyList {
    fn for_each_slot(&self, f: &mut dyn FnMut(NodeIndex)) {
        for &child in self.elements.iter().flatten() {
            f(child);
        }
    }
}

macro_rules! leaf_slots {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ChildSlots for $ty {
                #[inline]
                fn for_each_slot(&self, _: &mut dyn FnMut(NodeIndex)) {}
            }
        )+
    };
}

leaf_slots!(
    bool,
    f64,
    String,
    TemplateValue,
    RegexSource,
    Option<RegexSource>,
    Vec<Comment>,
    Vec<Token>,
    AccessorKind,
    AssignmentOperator,
    BinaryOperator,
    LogicalOperator,
    MethodKind,
    UnaryOperator,
    UpdateOperator,
    VariableKind,
);

/// A record struct for one node kind.
pub trait NodeRecord: Sized + 'static {
    const KIND: NodeKind;

    /// Field names as they appear in ESTree JSON, fixed fields included.
    const FIELDS: &'static [&'static str];

    /// Calls `f` with the field name and handle of every child, in field order.
    fn for_each_child(&self, f: &mut dyn FnMut(&'static str, NodeIndex));

    fn into_data(self) -> NodeData;

    fn from_data(data: &NodeData) -> Option<&Self>;
}

macro_rules! json_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident $json:literal) => {
        $json
    };
}

/// Generates the record structs, `NodeData` and `record_fields`.
///
/// ```text
/// Kind {
///     stored_field: Type,
///     rust_name as "jsonName": Type,
///     ; fixed_field: Type = value
/// }
/// ```
macro_rules! define_nodes {
    ($(
        $(#[$meta:meta])*
        $kind:ident {
            $($field:ident $(as $json:literal)?: $ty:ty),* $(,)?
            $(; $($fixed:ident $(as $fixed_json:literal)?: $fixed_ty:ty = $value:expr),* $(,)?)?
        }
    )+) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Debug, PartialEq)]
            #[allow(clippy::empty_structs_with_brackets)]
            pub struct $kind {
                $(pub $field: $ty,)*
            }

            impl $kind {
                $($(
                    #[inline]
                    pub const fn $fixed(&self) -> $fixed_ty {
                        $value
                    }
                )*)?
            }

            impl NodeRecord for $kind {
                const KIND: NodeKind = NodeKind::$kind;

                const FIELDS: &'static [&'static str] = &[
                    $(json_name!($field $($json)?),)*
                    $($(json_name!($fixed $($fixed_json)?),)*)?
                ];

                #[allow(unused_variables)]
                fn for_each_child(&self, f: &mut dyn FnMut(&'static str, NodeIndex)) {
                    $(
                        ChildSlots::for_each_slot(&self.$field, &mut |child| {
                            f(json_name!($field $($json)?), child)
                        });
                    )*
                }

                #[inline]
                fn into_data(self) -> NodeData {
                    NodeData::$kind(self)
                }

                #[inline]
                fn from_data(data: &NodeData) -> Option<&Self> {
                    match data {
                        NodeData::$kind(record) => Some(record),
                        _ => None,
                    }
                }
            }
        )+

        /// The record of a node of any kind.
        #[derive(Clone, Debug, PartialEq)]
        pub enum NodeData {
            $($kind($kind),)+
        }

        impl NodeData {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(NodeData::$kind(_) => NodeKind::$kind,)+
                }
            }

            pub fn for_each_child(&self, f: &mut dyn FnMut(&'static str, NodeIndex)) {
                match self {
                    $(NodeData::$kind(record) => record.for_each_child(f),)+
                }
            }
        }

        /// Field names of the record for `kind`.
        pub fn record_fields(kind: NodeKind) -> &'static [&'static str] {
            match kind {
                $(NodeKind::$kind => <$kind as NodeRecord>::FIELDS,)+
            }
        }
    };
}

define_nodes! {
    /// `{ get x() {} }`
    AccessorProperty {
        kind: AccessorKind,
        key: NodeIndex,
        value: NodeIndex,
        ; computed: bool = false,
        method: bool = false,
        shorthand: bool = false,
    }

    /// `export default class {}`
    AnonymousDefaultExportedClassDeclaration {
        super_class as "superClass": Option<NodeIndex>,
        body: NodeIndex,
        ; id: Option<NodeIndex> = None,
    }

    /// `export default function () {}`
    AnonymousDefaultExportedFunctionDeclaration {
        generator: bool,
        params: NodeList,
        body: NodeIndex,
        is_async as "async": bool,
        ; id: Option<NodeIndex> = None,
    }

    ArrayExpression {
        elements: HoleyList,
    }

    ArrowFunctionExpression {
        id: Option<NodeIndex>,
        params: NodeList,
        body: NodeIndex,
        is_async as "async": bool,
    }

    /// `[a, b] = c`
    AssignmentArrayPattern {
        elements: HoleyList,
    }

    /// `[a = 1] = b`
    AssignmentAssignmentPattern {
        left: NodeIndex,
        right: NodeIndex,
    }

    AssignmentComputedProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = true,
        method: bool = false,
        shorthand: bool = false,
    }

    AssignmentExpression {
        operator: AssignmentOperator,
        left: NodeIndex,
        right: NodeIndex,
    }

    AssignmentObjectPattern {
        properties: NodeList,
    }

    AssignmentProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = false,
        method: bool = false,
        shorthand: bool = false,
    }

    AssignmentRestElement {
        argument: NodeIndex,
    }

    AssignmentShorthandProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = false,
        method: bool = false,
        shorthand: bool = true,
    }

    AwaitExpression {
        argument: NodeIndex,
    }

    /// `a.b`
    BasicMemberExpression {
        object: NodeIndex,
        property: NodeIndex,
        ; computed: bool = false,
    }

    /// `{ a: b }`
    BasicProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = false,
        method: bool = false,
        shorthand: bool = false,
    }

    BinaryExpression {
        operator: BinaryOperator,
        left: NodeIndex,
        right: NodeIndex,
    }

    /// `let [a, b] = c`
    BindingArrayPattern {
        elements: HoleyList,
    }

    BindingAssignmentPattern {
        left: NodeIndex,
        right: NodeIndex,
    }

    BindingComputedProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = true,
        method: bool = false,
        shorthand: bool = false,
    }

    BindingObjectPattern {
        properties: NodeList,
    }

    BindingProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = false,
        method: bool = false,
        shorthand: bool = false,
    }

    BindingRestElement {
        argument: NodeIndex,
    }

    BindingShorthandProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = false,
        method: bool = false,
        shorthand: bool = true,
    }

    BlockStatement {
        body: NodeList,
    }

    BooleanLiteral {
        value: bool,
        ; regex: Option<&'static RegexSource> = None,
    }

    BreakStatement {
        label: Option<NodeIndex>,
    }

    CallExpression {
        callee: NodeIndex,
        arguments: NodeList,
    }

    CatchClause {
        param: Option<NodeIndex>,
        body: NodeIndex,
    }

    ClassBody {
        body: NodeList,
    }

    ClassDeclaration {
        id: NodeIndex,
        super_class as "superClass": Option<NodeIndex>,
        body: NodeIndex,
    }

    ClassExpression {
        id: Option<NodeIndex>,
        super_class as "superClass": Option<NodeIndex>,
        body: NodeIndex,
    }

    /// `{ get [k]() {} }`
    ComputedAccessorProperty {
        kind: AccessorKind,
        key: NodeIndex,
        value: NodeIndex,
        ; computed: bool = true,
        method: bool = false,
        shorthand: bool = false,
    }

    /// `a[b]`
    ComputedMemberExpression {
        object: NodeIndex,
        property: NodeIndex,
        ; computed: bool = true,
    }

    /// `class { [k]() {} }`
    ComputedMethodDefinition {
        kind: MethodKind,
        is_static as "static": bool,
        key: NodeIndex,
        value: NodeIndex,
        ; computed: bool = true,
    }

    ComputedMethodProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = true,
        method: bool = true,
        shorthand: bool = false,
    }

    ComputedProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = true,
        method: bool = false,
        shorthand: bool = false,
    }

    ConditionalExpression {
        test: NodeIndex,
        alternate: NodeIndex,
        consequent: NodeIndex,
    }

    /// `class { constructor() {} }`
    ConstructorDefinition {
        key: NodeIndex,
        value: NodeIndex,
        ; computed: bool = false,
        kind: &'static str = "constructor",
        is_static as "static": bool = false,
    }

    ContinueStatement {
        label: Option<NodeIndex>,
    }

    DebuggerStatement {}

    DoWhileStatement {
        body: NodeIndex,
        test: NodeIndex,
    }

    EmptyStatement {}

    ExportAllDeclaration {
        source: NodeIndex,
    }

    ExportDefaultDeclaration {
        declaration: NodeIndex,
    }

    /// `export var a = 1;`
    ExportNamedDeclaration {
        declaration: NodeIndex,
        ; specifiers: &'static [NodeIndex] = &[],
        source: Option<NodeIndex> = None,
    }

    /// `export { a } from "b";`
    ExportNamedFromDeclaration {
        specifiers: NodeList,
        source: NodeIndex,
        ; declaration: Option<NodeIndex> = None,
    }

    ExportSpecifier {
        local: NodeIndex,
        exported: NodeIndex,
    }

    ExpressionStatement {
        expression: NodeIndex,
    }

    ForInStatement {
        left: NodeIndex,
        right: NodeIndex,
        body: NodeIndex,
    }

    ForOfStatement {
        left: NodeIndex,
        right: NodeIndex,
        body: NodeIndex,
        is_await as "await": bool,
    }

    ForStatement {
        init: Option<NodeIndex>,
        test: Option<NodeIndex>,
        update: Option<NodeIndex>,
        body: NodeIndex,
    }

    FunctionDeclaration {
        id: NodeIndex,
        params: NodeList,
        body: NodeIndex,
        generator: bool,
        is_async as "async": bool,
    }

    FunctionExpression {
        id: Option<NodeIndex>,
        params: NodeList,
        body: NodeIndex,
        generator: bool,
        is_async as "async": bool,
    }

    Identifier {
        name: String,
    }

    IfStatement {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: Option<NodeIndex>,
    }

    ImportDeclaration {
        specifiers: NodeList,
        source: NodeIndex,
    }

    ImportDefaultSpecifier {
        local: NodeIndex,
    }

    ImportNamespaceSpecifier {
        local: NodeIndex,
    }

    ImportSpecifier {
        imported: NodeIndex,
        local: NodeIndex,
    }

    LabeledStatement {
        label: NodeIndex,
        body: NodeIndex,
    }

    LogicalExpression {
        operator: LogicalOperator,
        left: NodeIndex,
        right: NodeIndex,
    }

    /// `new.target`
    MetaProperty {
        meta: NodeIndex,
        property: NodeIndex,
    }

    MethodDefinition {
        kind: MethodKind,
        is_static as "static": bool,
        key: NodeIndex,
        value: NodeIndex,
        ; computed: bool = false,
    }

    /// `{ a() {} }`
    MethodProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = false,
        method: bool = true,
        shorthand: bool = false,
    }

    /// Root of a module. Shares the `Program` tag with the script root.
    ModuleProgram {
        body: NodeList,
        comments: Vec<Comment>,
        tokens: Vec<Token>,
        ; source_type as "sourceType": SourceType = SourceType::Module,
    }

    NewExpression {
        callee: NodeIndex,
        arguments: NodeList,
    }

    NullLiteral {
        ; value: () = (),
        regex: Option<&'static RegexSource> = None,
    }

    NumberLiteral {
        value: f64,
        ; regex: Option<&'static RegexSource> = None,
    }

    ObjectExpression {
        properties: NodeList,
    }

    /// Root of a script.
    Program {
        body: NodeList,
        comments: Vec<Comment>,
        tokens: Vec<Token>,
        ; source_type as "sourceType": SourceType = SourceType::Script,
    }

    /// `value` is `None` when the host cannot construct the expression.
    RegExpLiteral {
        value: Option<RegexSource>,
        regex: RegexSource,
    }

    ReturnStatement {
        argument: Option<NodeIndex>,
    }

    SequenceExpression {
        expressions: NodeList,
    }

    /// `{ a }`
    ShorthandProperty {
        key: NodeIndex,
        value: NodeIndex,
        ; kind: &'static str = "init",
        computed: bool = false,
        method: bool = false,
        shorthand: bool = true,
    }

    SpreadElement {
        argument: NodeIndex,
    }

    StringLiteral {
        value: String,
        ; regex: Option<&'static RegexSource> = None,
    }

    Super {}

    SwitchCase {
        test: Option<NodeIndex>,
        consequent: NodeList,
    }

    SwitchStatement {
        discriminant: NodeIndex,
        cases: NodeList,
    }

    TaggedTemplateExpression {
        tag: NodeIndex,
        quasi: NodeIndex,
    }

    TemplateElement {
        tail: bool,
        value: TemplateValue,
    }

    TemplateLiteral {
        quasis: NodeList,
        expressions: NodeList,
    }

    ThisExpression {}

    ThrowStatement {
        argument: NodeIndex,
    }

    TryStatement {
        block: NodeIndex,
        handler: Option<NodeIndex>,
        finalizer: Option<NodeIndex>,
    }

    UnaryExpression {
        operator: UnaryOperator,
        prefix: bool,
        argument: NodeIndex,
    }

    UpdateExpression {
        operator: UpdateOperator,
        argument: NodeIndex,
        prefix: bool,
    }

    VariableDeclaration {
        declarations: NodeList,
        kind: VariableKind,
    }

    VariableDeclarator {
        id: NodeIndex,
        init: Option<NodeIndex>,
    }

    WhileStatement {
        test: NodeIndex,
        body: NodeIndex,
    }

    WithStatement {
        object: NodeIndex,
        body: NodeIndex,
    }

    YieldExpression {
        delegate: bool,
        argument: Option<NodeIndex>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_are_visited_in_field_order() {
        let call = CallExpression {
            callee: NodeIndex(3),
            arguments: NodeList::from(vec![NodeIndex(1), NodeIndex(2)]),
        };
        let mut seen = Vec::new();
        call.for_each_child(&mut |field, child| seen.push((field, child.0)));
        assert_eq!(
            seen,
            vec![("callee", 3), ("arguments", 1), ("arguments", 2)]
        );
    }

    #[test]
    fn test_holes_and_absent_slots_are_skipped() {
        let array = ArrayExpression {
            elements: HoleyList::from(vec![None, Some(NodeIndex(0)), None]),
        };
        let mut count = 0;
        array.for_each_child(&mut |_, _| count += 1);
        assert_eq!(count, 1);

        let ret = ReturnStatement { argument: None };
        ret.into_data().for_each_child(&mut |_, _| panic!("no children"));
    }

    #[test]
    fn test_fixed_fields() {
        let member = BasicMemberExpression {
            object: NodeIndex(0),
            property: NodeIndex(1),
        };
        assert!(!member.computed());
        assert_eq!(BasicMemberExpression::FIELDS, ["object", "property", "computed"]);

        let ctor = ConstructorDefinition {
            key: NodeIndex(0),
            value: NodeIndex(1),
        };
        assert_eq!(ctor.kind(), "constructor");
        assert!(!ctor.is_static());
        assert!(ConstructorDefinition::FIELDS.contains(&"static"));
        assert_eq!(NullLiteral {}.regex(), None);
    }

    #[test]
    fn test_data_round_trip_through_record() {
        let data = Identifier {
            name: "a".to_string(),
        }
        .into_data();
        assert_eq!(data.kind(), NodeKind::Identifier);
        assert_eq!(Identifier::from_data(&data).map(|id| id.name.as_str()), Some("a"));
        assert!(ThisExpression::from_data(&data).is_none());
        assert_eq!(record_fields(NodeKind::ForOfStatement), ["left", "right", "body", "await"]);
    }
}
