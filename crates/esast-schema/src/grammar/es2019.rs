//! ES2019: optional catch binding.

use crate::field::FieldType;
use crate::kind::NodeKind as K;
use crate::layer::GrammarLayer;

pub fn optional_catch_binding() -> GrammarLayer {
    GrammarLayer::new("OptionalCatchBinding")
        .node(K::CatchClause, |n| n.field("param", FieldType::null()))
}
