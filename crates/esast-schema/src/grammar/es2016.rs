//! ES2016: the exponentiation operator.

use crate::field::FieldType;
use crate::kind::NodeKind as K;
use crate::layer::GrammarLayer;
use crate::operators::{AssignmentOperator, BinaryOperator};

pub fn exponentiation() -> GrammarLayer {
    GrammarLayer::new("Exponentiation")
        .node(K::BinaryExpression, |n| {
            n.field("operator", FieldType::one_of(&[BinaryOperator::Exponent]))
        })
        .node(K::AssignmentExpression, |n| {
            n.field(
                "operator",
                FieldType::one_of(&[AssignmentOperator::ExponentAssign]),
            )
        })
}
