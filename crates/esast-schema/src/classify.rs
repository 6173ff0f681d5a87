//! Root, statement and expression classifiers.

use crate::kind::{KindSet, NodeKind};
use crate::schema::MergedSchema;

impl MergedSchema {
    #[inline]
    pub fn is_statement_kind(&self, kind: NodeKind) -> bool {
        self.statements.contains(kind)
    }

    #[inline]
    pub fn is_expression_kind(&self, kind: NodeKind) -> bool {
        self.expressions.contains(kind)
    }

    #[inline]
    pub fn is_root_kind(&self, kind: NodeKind) -> bool {
        self.roots.contains(kind)
    }

    pub fn all_kinds(&self) -> &KindSet {
        &self.all
    }

    pub fn statement_kinds(&self) -> &KindSet {
        &self.statements
    }

    pub fn expression_kinds(&self) -> &KindSet {
        &self.expressions
    }

    pub fn root_kinds(&self) -> &KindSet {
        &self.roots
    }

    /// Kinds that are neither statements, expressions nor roots.
    pub fn other_kinds(&self) -> KindSet {
        self.all
            .difference(&self.statements)
            .difference(&self.expressions)
            .difference(&self.roots)
    }
}
