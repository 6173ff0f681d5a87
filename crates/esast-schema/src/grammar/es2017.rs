//! ES2017: async functions.

use crate::field::FieldType;
use crate::kind::NodeKind as K;
use crate::layer::GrammarLayer;
use crate::one;

pub fn async_function() -> GrammarLayer {
    let is_async = |n: crate::KindDelta| n.field("async", FieldType::boolean());

    GrammarLayer::new("AsyncFunction")
        .node(K::FunctionDeclaration, is_async)
        .node(K::FunctionExpression, is_async)
        .node(K::ArrowFunctionExpression, is_async)
        .node(K::AnonymousDefaultExportedFunctionDeclaration, is_async)
        .node(K::AwaitExpression, |n| n.field("argument", one!(Expression)))
        .expressions([K::AwaitExpression])
}
