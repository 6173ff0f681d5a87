//! ES2018: asynchronous iteration and object rest/spread.

use crate::field::FieldType;
use crate::kind::NodeKind as K;
use crate::layer::GrammarLayer;
use crate::list;

pub fn async_iteration() -> GrammarLayer {
    GrammarLayer::new("AsyncIteration")
        .node(K::ForOfStatement, |n| n.field("await", FieldType::boolean()))
}

pub fn object_rest_spread() -> GrammarLayer {
    GrammarLayer::new("ObjectRestSpread")
        .node(K::ObjectExpression, |n| {
            n.field("properties", list!(SpreadElement))
        })
        .node(K::BindingObjectPattern, |n| {
            n.field("properties", list!(BindingRestElement))
        })
        .node(K::AssignmentObjectPattern, |n| {
            n.field("properties", list!(AssignmentRestElement))
        })
}
