//! Built-in grammar versions.
//!
//! Every version is the ES5 base plus the ordered layers of each edition up
//! to it. Versions are merged lazily on first use and cached for the life of
//! the process.

use crate::error::SchemaError;
use crate::grammar::{es5, es2015, es2016, es2017, es2018, es2019};
use crate::layer::GrammarLayer;
use crate::merge::{merge, Merger};
use crate::schema::MergedSchema;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// An ECMAScript edition with a built-in schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GrammarVersion {
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
}

impl GrammarVersion {
    pub const ALL: [GrammarVersion; 6] = [
        GrammarVersion::Es5,
        GrammarVersion::Es2015,
        GrammarVersion::Es2016,
        GrammarVersion::Es2017,
        GrammarVersion::Es2018,
        GrammarVersion::Es2019,
    ];

    pub const LATEST: GrammarVersion = GrammarVersion::Es2019;

    pub const fn name(self) -> &'static str {
        match self {
            GrammarVersion::Es5 => "ES5",
            GrammarVersion::Es2015 => "ES2015",
            GrammarVersion::Es2016 => "ES2016",
            GrammarVersion::Es2017 => "ES2017",
            GrammarVersion::Es2018 => "ES2018",
            GrammarVersion::Es2019 => "ES2019",
        }
    }

    /// The extension layers applied on top of the base, in order.
    pub fn layers(self) -> impl Iterator<Item = BuiltinLayer> {
        BuiltinLayer::ALL
            .into_iter()
            .filter(move |layer| layer.since() <= self)
    }

    /// Merge this version from scratch.
    pub fn build(self) -> Result<MergedSchema, SchemaError> {
        let mut merger = Merger::new(self.name());
        merger.apply(&es5::layer())?;
        for layer in self.layers() {
            merger.apply(&layer.layer())?;
        }
        merger.finish()
    }

    /// The shared, cached schema of this version.
    ///
    /// # Panics
    /// If the built-in layers of this version fail to merge.
    pub fn schema(self) -> Arc<MergedSchema> {
        static CACHE: [OnceLock<Arc<MergedSchema>>; 6] = [const { OnceLock::new() }; 6];
        CACHE[self as usize]
            .get_or_init(|| match self.build() {
                Ok(schema) => Arc::new(schema),
                Err(err) => panic!("built-in grammar {self} is malformed: {err}"),
            })
            .clone()
    }
}

impl fmt::Display for GrammarVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown version or layer name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what} `{name}`")]
pub struct UnknownName {
    pub what: &'static str,
    pub name: String,
}

impl FromStr for GrammarVersion {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = match s.to_ascii_lowercase().as_str() {
            "es5" => GrammarVersion::Es5,
            "es2015" | "es6" => GrammarVersion::Es2015,
            "es2016" | "es7" => GrammarVersion::Es2016,
            "es2017" | "es8" => GrammarVersion::Es2017,
            "es2018" | "es9" => GrammarVersion::Es2018,
            "es2019" | "es10" | "latest" => GrammarVersion::Es2019,
            _ => {
                return Err(UnknownName {
                    what: "grammar version",
                    name: s.to_string(),
                });
            }
        };
        Ok(version)
    }
}

/// A built-in extension layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinLayer {
    ArrowFunction,
    Class,
    DestructuringAssignment,
    DestructuringBinding,
    Iteration,
    LexicalBinding,
    Module,
    ObjectLiteral,
    RegExp,
    Spread,
    TemplateLiteral,
    Exponentiation,
    AsyncFunction,
    AsyncIteration,
    ObjectRestSpread,
    OptionalCatchBinding,
}

impl BuiltinLayer {
    /// Every layer, in application order.
    pub const ALL: [BuiltinLayer; 16] = [
        BuiltinLayer::ArrowFunction,
        BuiltinLayer::Class,
        BuiltinLayer::DestructuringAssignment,
        BuiltinLayer::DestructuringBinding,
        BuiltinLayer::Iteration,
        BuiltinLayer::LexicalBinding,
        BuiltinLayer::Module,
        BuiltinLayer::ObjectLiteral,
        BuiltinLayer::RegExp,
        BuiltinLayer::Spread,
        BuiltinLayer::TemplateLiteral,
        BuiltinLayer::Exponentiation,
        BuiltinLayer::AsyncFunction,
        BuiltinLayer::AsyncIteration,
        BuiltinLayer::ObjectRestSpread,
        BuiltinLayer::OptionalCatchBinding,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            BuiltinLayer::ArrowFunction => "ArrowFunction",
            BuiltinLayer::Class => "Class",
            BuiltinLayer::DestructuringAssignment => "DestructuringAssignment",
            BuiltinLayer::DestructuringBinding => "DestructuringBinding",
            BuiltinLayer::Iteration => "Iteration",
            BuiltinLayer::LexicalBinding => "LexicalBinding",
            BuiltinLayer::Module => "Module",
            BuiltinLayer::ObjectLiteral => "ObjectLiteral",
            BuiltinLayer::RegExp => "RegExp",
            BuiltinLayer::Spread => "Spread",
            BuiltinLayer::TemplateLiteral => "TemplateLiteral",
            BuiltinLayer::Exponentiation => "Exponentiation",
            BuiltinLayer::AsyncFunction => "AsyncFunction",
            BuiltinLayer::AsyncIteration => "AsyncIteration",
            BuiltinLayer::ObjectRestSpread => "ObjectRestSpread",
            BuiltinLayer::OptionalCatchBinding => "OptionalCatchBinding",
        }
    }

    /// The edition that introduced the layer.
    pub const fn since(self) -> GrammarVersion {
        match self {
            BuiltinLayer::ArrowFunction
            | BuiltinLayer::Class
            | BuiltinLayer::DestructuringAssignment
            | BuiltinLayer::DestructuringBinding
            | BuiltinLayer::Iteration
            | BuiltinLayer::LexicalBinding
            | BuiltinLayer::Module
            | BuiltinLayer::ObjectLiteral
            | BuiltinLayer::RegExp
            | BuiltinLayer::Spread
            | BuiltinLayer::TemplateLiteral => GrammarVersion::Es2015,
            BuiltinLayer::Exponentiation => GrammarVersion::Es2016,
            BuiltinLayer::AsyncFunction => GrammarVersion::Es2017,
            BuiltinLayer::AsyncIteration | BuiltinLayer::ObjectRestSpread => GrammarVersion::Es2018,
            BuiltinLayer::OptionalCatchBinding => GrammarVersion::Es2019,
        }
    }

    pub fn layer(self) -> GrammarLayer {
        match self {
            BuiltinLayer::ArrowFunction => es2015::arrow_function(),
            BuiltinLayer::Class => es2015::class(),
            BuiltinLayer::DestructuringAssignment => es2015::destructuring_assignment(),
            BuiltinLayer::DestructuringBinding => es2015::destructuring_binding(),
            BuiltinLayer::Iteration => es2015::iteration(),
            BuiltinLayer::LexicalBinding => es2015::lexical_binding(),
            BuiltinLayer::Module => es2015::module(),
            BuiltinLayer::ObjectLiteral => es2015::object_literal(),
            BuiltinLayer::RegExp => es2015::regexp(),
            BuiltinLayer::Spread => es2015::spread(),
            BuiltinLayer::TemplateLiteral => es2015::template_literal(),
            BuiltinLayer::Exponentiation => es2016::exponentiation(),
            BuiltinLayer::AsyncFunction => es2017::async_function(),
            BuiltinLayer::AsyncIteration => es2018::async_iteration(),
            BuiltinLayer::ObjectRestSpread => es2018::object_rest_spread(),
            BuiltinLayer::OptionalCatchBinding => es2019::optional_catch_binding(),
        }
    }
}

impl fmt::Display for BuiltinLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinLayer {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinLayer::ALL
            .into_iter()
            .find(|layer| layer.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName {
                what: "grammar layer",
                name: s.to_string(),
            })
    }
}

/// The ES5 base grammar.
pub fn base() -> GrammarLayer {
    es5::layer()
}

/// Merge the ES5 base with an arbitrary selection of built-in layers, applied
/// in the order given.
pub fn compose(layers: &[BuiltinLayer]) -> Result<MergedSchema, SchemaError> {
    let layers: Vec<_> = layers.iter().map(|layer| layer.layer()).collect();
    merge(&base(), &layers)
}
