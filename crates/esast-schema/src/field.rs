//! Field types.
//!
//! A `FieldType` is kept in a normalized union form rather than as a nested
//! `Optional(Ref(..))` tree: every field is the union of
//! - a single node reference (`node`),
//! - a list of node references (`list`),
//! - primitive value shapes (`primitives`),
//! - literal values (`literals`; `null` here is what makes a field optional).
//!
//! Merging two contributions to the same field is then a component-wise
//! union, and widening `Expression[]` with `SpreadElement[]` yields
//! `(Expression | SpreadElement)[]` without any special casing.

use crate::kind::{KindSet, NodeKind};
use crate::operators::Vocabulary;
use bitflags::bitflags;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

bitflags! {
    /// Pseudo-kinds a reference may name in place of concrete kinds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PseudoKinds: u8 {
        /// Every kind in the merged statement-kind-set.
        const STATEMENT = 1 << 0;
        /// Every kind in the merged expression-kind-set.
        const EXPRESSION = 1 << 1;
        /// Every kind in the merged schema.
        const NODE = 1 << 2;
    }
}

impl Default for PseudoKinds {
    fn default() -> Self {
        PseudoKinds::empty()
    }
}

/// One member of a reference union, as written in a grammar layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Kind(NodeKind),
    Statement,
    Expression,
    Node,
}

/// The declared (unexpanded) targets of a node reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RefSet {
    kinds: KindSet,
    pseudo: PseudoKinds,
}

impl RefSet {
    pub fn new() -> RefSet {
        RefSet::default()
    }

    pub fn add(&mut self, target: Target) {
        match target {
            Target::Kind(kind) => {
                self.kinds.insert(kind);
            }
            Target::Statement => self.pseudo |= PseudoKinds::STATEMENT,
            Target::Expression => self.pseudo |= PseudoKinds::EXPRESSION,
            Target::Node => self.pseudo |= PseudoKinds::NODE,
        }
    }

    pub fn with(mut self, target: Target) -> RefSet {
        self.add(target);
        self
    }

    /// Concrete kinds named directly.
    #[inline]
    pub fn kinds(&self) -> &KindSet {
        &self.kinds
    }

    #[inline]
    pub fn pseudo(&self) -> PseudoKinds {
        self.pseudo
    }

    /// True when nothing at all is referenced.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty() && self.pseudo.is_empty()
    }

    pub fn union_with(&mut self, other: &RefSet) {
        self.kinds.union_with(&other.kinds);
        self.pseudo |= other.pseudo;
    }

    fn write_members(&self, out: &mut Vec<String>) {
        for (flag, name) in [
            (PseudoKinds::STATEMENT, "Statement"),
            (PseudoKinds::EXPRESSION, "Expression"),
            (PseudoKinds::NODE, "Node"),
        ] {
            if self.pseudo.contains(flag) {
                out.push(name.to_string());
            }
        }
        out.extend(self.kinds.iter().map(|kind| kind.name().to_string()));
    }
}

impl FromIterator<Target> for RefSet {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        let mut set = RefSet::new();
        for target in iter {
            set.add(target);
        }
        set
    }
}

/// The element type of a list field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ListType {
    pub elements: RefSet,
    /// Elements may be `null` (array holes).
    pub holes: bool,
}

impl ListType {
    fn union_with(&mut self, other: &ListType) {
        self.elements.union_with(&other.elements);
        self.holes |= other.holes;
    }
}

bitflags! {
    /// Primitive value shapes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Primitives: u8 {
        const STRING = 1 << 0;
        const NUMBER = 1 << 1;
        const BOOLEAN = 1 << 2;
        /// A host regular expression value.
        const REGEXP = 1 << 3;
        /// `{ pattern, flags }`
        const REGEX_SOURCE = 1 << 4;
        /// `{ cooked, raw }`
        const TEMPLATE_VALUE = 1 << 5;
        const COMMENTS = 1 << 6;
        const TOKENS = 1 << 7;
    }
}

impl Default for Primitives {
    fn default() -> Self {
        Primitives::empty()
    }
}

impl Primitives {
    const NOTATION: [(Primitives, &'static str); 8] = [
        (Primitives::STRING, "string"),
        (Primitives::NUMBER, "number"),
        (Primitives::BOOLEAN, "boolean"),
        (Primitives::REGEXP, "RegExp"),
        (Primitives::REGEX_SOURCE, "{ pattern: string; flags: string }"),
        (Primitives::TEMPLATE_VALUE, "{ cooked: string; raw: string }"),
        (Primitives::COMMENTS, "Comment[]"),
        (Primitives::TOKENS, "Token[]"),
    ];

    fn write_members(self, out: &mut Vec<String>) {
        for (flag, notation) in Primitives::NOTATION {
            if self.contains(flag) {
                out.push(notation.to_string());
            }
        }
    }
}

/// A fixed literal value a field may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Null,
    Undefined,
    Bool(bool),
    Str(&'static str),
    /// The empty list `[]`.
    EmptyList,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => f.write_str("null"),
            LiteralValue::Undefined => f.write_str("undefined"),
            LiteralValue::Bool(value) => write!(f, "{value}"),
            LiteralValue::Str(value) => write!(f, "\"{value}\""),
            LiteralValue::EmptyList => f.write_str("[]"),
        }
    }
}

/// The type of one field of one node kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldType {
    node: RefSet,
    list: Option<ListType>,
    primitives: Primitives,
    literals: SmallVec<[LiteralValue; 4]>,
}

impl FieldType {
    /// A single node reference.
    pub fn node(refs: RefSet) -> FieldType {
        FieldType {
            node: refs,
            ..FieldType::default()
        }
    }

    /// A list of node references.
    pub fn list(elements: RefSet) -> FieldType {
        FieldType {
            list: Some(ListType {
                elements,
                holes: false,
            }),
            ..FieldType::default()
        }
    }

    /// A list of node references whose elements may be `null`.
    pub fn holey_list(elements: RefSet) -> FieldType {
        FieldType {
            list: Some(ListType {
                elements,
                holes: true,
            }),
            ..FieldType::default()
        }
    }

    pub fn primitive(primitives: Primitives) -> FieldType {
        FieldType {
            primitives,
            ..FieldType::default()
        }
    }

    pub fn string() -> FieldType {
        FieldType::primitive(Primitives::STRING)
    }

    pub fn number() -> FieldType {
        FieldType::primitive(Primitives::NUMBER)
    }

    pub fn boolean() -> FieldType {
        FieldType::primitive(Primitives::BOOLEAN)
    }

    pub fn literal(value: LiteralValue) -> FieldType {
        let mut literals = SmallVec::new();
        literals.push(value);
        FieldType {
            literals,
            ..FieldType::default()
        }
    }

    pub fn null() -> FieldType {
        FieldType::literal(LiteralValue::Null)
    }

    pub fn undefined() -> FieldType {
        FieldType::literal(LiteralValue::Undefined)
    }

    pub fn bool_literal(value: bool) -> FieldType {
        FieldType::literal(LiteralValue::Bool(value))
    }

    pub fn str_literal(value: &'static str) -> FieldType {
        FieldType::literal(LiteralValue::Str(value))
    }

    pub fn empty_list() -> FieldType {
        FieldType::literal(LiteralValue::EmptyList)
    }

    /// A union of string literals drawn from an operator or keyword vocabulary.
    pub fn one_of<V: Vocabulary>(values: &[V]) -> FieldType {
        let mut ty = FieldType::default();
        for value in values {
            ty.push_literal(LiteralValue::Str(value.as_str()));
        }
        ty
    }

    /// This type, or `null`.
    pub fn nullable(mut self) -> FieldType {
        self.push_literal(LiteralValue::Null);
        self
    }

    /// Widen this type with every member of `other`.
    pub fn union_with(&mut self, other: &FieldType) {
        self.node.union_with(&other.node);
        match (&mut self.list, &other.list) {
            (Some(list), Some(more)) => list.union_with(more),
            (None, Some(more)) => self.list = Some(more.clone()),
            _ => {}
        }
        self.primitives |= other.primitives;
        for &literal in &other.literals {
            self.push_literal(literal);
        }
    }

    pub fn union(mut self, other: &FieldType) -> FieldType {
        self.union_with(other);
        self
    }

    fn push_literal(&mut self, literal: LiteralValue) {
        if !self.literals.contains(&literal) {
            self.literals.push(literal);
        }
    }

    /// The single-node reference targets, if the field can hold one node.
    pub fn node_refs(&self) -> Option<&RefSet> {
        (!self.node.is_empty()).then_some(&self.node)
    }

    pub fn list_type(&self) -> Option<&ListType> {
        self.list.as_ref()
    }

    #[inline]
    pub fn primitives(&self) -> Primitives {
        self.primitives
    }

    #[inline]
    pub fn literals(&self) -> &[LiteralValue] {
        &self.literals
    }

    pub fn is_nullable(&self) -> bool {
        self.literals.contains(&LiteralValue::Null)
    }

    /// True when the field can reference nodes at all.
    pub fn references_nodes(&self) -> bool {
        !self.node.is_empty() || self.list.is_some()
    }

    /// True when the type admits no value whatsoever.
    pub fn is_empty(&self) -> bool {
        self.node.is_empty()
            && self.list.is_none()
            && self.primitives.is_empty()
            && self.literals.is_empty()
    }

    /// The one value this field can hold, if it is a single literal.
    pub fn single_literal(&self) -> Option<LiteralValue> {
        match self.literals.as_slice() {
            [only] if !self.references_nodes() && self.primitives.is_empty() => Some(*only),
            _ => None,
        }
    }

    /// Every declared reference of the field, single and list alike.
    pub fn all_refs(&self) -> RefSet {
        let mut refs = self.node.clone();
        if let Some(list) = &self.list {
            refs.union_with(&list.elements);
        }
        refs
    }
}

/// Renders in TypeScript-like notation, e.g.
/// `Identifier | null` or `(Expression | SpreadElement | null)[]`.
impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        self.node.write_members(&mut parts);

        if let Some(list) = &self.list {
            let mut elements = Vec::new();
            list.elements.write_members(&mut elements);
            if list.holes {
                elements.push("null".to_string());
            }
            match elements.as_slice() {
                [] => parts.push("never[]".to_string()),
                [single] => parts.push(format!("{single}[]")),
                _ => parts.push(format!("({})[]", elements.join(" | "))),
            }
        }

        self.primitives.write_members(&mut parts);

        let (trailing, leading): (Vec<&LiteralValue>, Vec<&LiteralValue>) = self
            .literals
            .iter()
            .partition(|lit| matches!(lit, LiteralValue::Null | LiteralValue::Undefined));
        parts.extend(leading.iter().map(ToString::to_string));
        parts.extend(trailing.iter().map(ToString::to_string));

        if parts.is_empty() {
            return f.write_str("never");
        }
        f.write_str(&parts.join(" | "))
    }
}

impl Serialize for FieldType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Builds a [`RefSet`] from `|`-separated kind names.
///
/// `Statement`, `Expression` and `Node` name the pseudo-kinds; any other
/// identifier must be a [`NodeKind`](crate::NodeKind) variant.
#[macro_export]
macro_rules! refs {
    ($($target:ident)|+) => {{
        let mut set = $crate::RefSet::new();
        $( set.add($crate::__target!($target)); )+
        set
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __target {
    (Statement) => {
        $crate::Target::Statement
    };
    (Expression) => {
        $crate::Target::Expression
    };
    (Node) => {
        $crate::Target::Node
    };
    ($kind:ident) => {
        $crate::Target::Kind($crate::NodeKind::$kind)
    };
}

/// A required single node reference: `one!(Identifier | Expression)`.
#[macro_export]
macro_rules! one {
    ($($target:ident)|+) => {
        $crate::FieldType::node($crate::refs!($($target)|+))
    };
}

/// A nullable single node reference: `opt!(Identifier)` is `Identifier | null`.
#[macro_export]
macro_rules! opt {
    ($($target:ident)|+) => {
        $crate::FieldType::node($crate::refs!($($target)|+)).nullable()
    };
}

/// A list of node references: `list!(Statement)` is `Statement[]`.
#[macro_export]
macro_rules! list {
    ($($target:ident)|+) => {
        $crate::FieldType::list($crate::refs!($($target)|+))
    };
}

/// A list whose elements may be `null`: `holey_list!(Expression)`.
#[macro_export]
macro_rules! holey_list {
    ($($target:ident)|+) => {
        $crate::FieldType::holey_list($crate::refs!($($target)|+))
    };
}
