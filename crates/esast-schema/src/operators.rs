//! Operator and keyword vocabularies.
//!
//! Each enum is the closed set of spellings one literal field may take in the
//! latest grammar. Grammar layers pick the subset that exists at their
//! language level (ES5 `BinaryExpression.operator` has no `**`), and the typed
//! node records store these enums directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of string spellings usable as a literal field type.
pub trait Vocabulary: Copy + 'static {
    fn as_str(self) -> &'static str;
}

macro_rules! operator_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant
            ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn parse(text: &str) -> Option<$name> {
                match text {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Vocabulary for $name {
            #[inline]
            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

operator_enum! {
    /// `AssignmentExpression.operator`
    AssignmentOperator {
        Assign => "=",
        AddAssign => "+=",
        SubtractAssign => "-=",
        MultiplyAssign => "*=",
        DivideAssign => "/=",
        RemainderAssign => "%=",
        LeftShiftAssign => "<<=",
        RightShiftAssign => ">>=",
        UnsignedRightShiftAssign => ">>>=",
        BitwiseOrAssign => "|=",
        BitwiseXorAssign => "^=",
        BitwiseAndAssign => "&=",
        ExponentAssign => "**=",
    }
}

operator_enum! {
    /// `BinaryExpression.operator`
    BinaryOperator {
        Equal => "==",
        NotEqual => "!=",
        StrictEqual => "===",
        StrictNotEqual => "!==",
        LessThan => "<",
        LessThanOrEqual => "<=",
        GreaterThan => ">",
        GreaterThanOrEqual => ">=",
        LeftShift => "<<",
        RightShift => ">>",
        UnsignedRightShift => ">>>",
        BitwiseOr => "|",
        BitwiseXor => "^",
        BitwiseAnd => "&",
        Add => "+",
        Subtract => "-",
        Multiply => "*",
        Divide => "/",
        Remainder => "%",
        In => "in",
        Instanceof => "instanceof",
        Exponent => "**",
    }
}

operator_enum! {
    /// `LogicalExpression.operator`
    LogicalOperator {
        Or => "||",
        And => "&&",
    }
}

operator_enum! {
    /// `UnaryExpression.operator`
    UnaryOperator {
        Minus => "-",
        Plus => "+",
        LogicalNot => "!",
        BitwiseNot => "~",
        Typeof => "typeof",
        Void => "void",
        Delete => "delete",
    }
}

operator_enum! {
    /// `UpdateExpression.operator`
    UpdateOperator {
        Increment => "++",
        Decrement => "--",
    }
}

operator_enum! {
    /// `VariableDeclaration.kind`
    VariableKind {
        Var => "var",
        Let => "let",
        Const => "const",
    }
}

operator_enum! {
    /// `kind` of getter/setter properties.
    AccessorKind {
        Get => "get",
        Set => "set",
    }
}

operator_enum! {
    /// `kind` of class methods other than the constructor.
    MethodKind {
        Method => "method",
        Get => "get",
        Set => "set",
    }
}

operator_enum! {
    /// `Program.sourceType`
    SourceType {
        Script => "script",
        Module => "module",
    }
}

impl BinaryOperator {
    /// Relational keyword operators (`in`, `instanceof`).
    pub fn is_keyword(self) -> bool {
        matches!(self, BinaryOperator::In | BinaryOperator::Instanceof)
    }
}

impl AssignmentOperator {
    /// The binary operator a compound assignment applies, `None` for `=`.
    pub fn binary_operator(self) -> Option<BinaryOperator> {
        let op = match self {
            AssignmentOperator::Assign => return None,
            AssignmentOperator::AddAssign => BinaryOperator::Add,
            AssignmentOperator::SubtractAssign => BinaryOperator::Subtract,
            AssignmentOperator::MultiplyAssign => BinaryOperator::Multiply,
            AssignmentOperator::DivideAssign => BinaryOperator::Divide,
            AssignmentOperator::RemainderAssign => BinaryOperator::Remainder,
            AssignmentOperator::LeftShiftAssign => BinaryOperator::LeftShift,
            AssignmentOperator::RightShiftAssign => BinaryOperator::RightShift,
            AssignmentOperator::UnsignedRightShiftAssign => BinaryOperator::UnsignedRightShift,
            AssignmentOperator::BitwiseOrAssign => BinaryOperator::BitwiseOr,
            AssignmentOperator::BitwiseXorAssign => BinaryOperator::BitwiseXor,
            AssignmentOperator::BitwiseAndAssign => BinaryOperator::BitwiseAnd,
            AssignmentOperator::ExponentAssign => BinaryOperator::Exponent,
        };
        Some(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_spelling() {
        for &op in BinaryOperator::ALL {
            assert_eq!(BinaryOperator::parse(op.as_str()), Some(op));
        }
        for &op in AssignmentOperator::ALL {
            assert_eq!(AssignmentOperator::parse(op.as_str()), Some(op));
        }
        assert_eq!(UnaryOperator::parse("typeof"), Some(UnaryOperator::Typeof));
        assert_eq!(UpdateOperator::parse("+"), None);
    }

    #[test]
    fn test_compound_assignment_maps_to_binary() {
        assert_eq!(AssignmentOperator::Assign.binary_operator(), None);
        for &op in &AssignmentOperator::ALL[1..] {
            let binary = op.binary_operator().unwrap();
            assert_eq!(format!("{binary}="), op.as_str());
        }
    }

    #[test]
    fn test_serde_uses_spelling() {
        assert_eq!(
            serde_json::to_string(&VariableKind::Const).unwrap(),
            "\"const\""
        );
        assert_eq!(
            serde_json::from_str::<SourceType>("\"module\"").unwrap(),
            SourceType::Module
        );
        assert!(BinaryOperator::Instanceof.is_keyword());
        assert_eq!(MethodKind::ALL.len(), 3);
    }
}
