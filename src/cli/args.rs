use clap::{Parser, Subcommand, ValueEnum};
use esast_schema::{BuiltinLayer, GrammarVersion, NodeKind};

/// CLI arguments for the esast binary.
#[derive(Parser, Debug)]
#[command(
    name = "esast",
    version,
    about = "Inspect layered ESTree grammar schemas"
)]
pub struct CliArgs {
    /// Built-in grammar version (es5, es2015 .. es2019, latest).
    #[arg(short = 'g', long, global = true, default_value = "latest")]
    pub grammar: GrammarVersion,

    /// Start from the bare ES5 base and apply only the `--layer` layers.
    #[arg(long, global = true)]
    pub base: bool,

    /// Extension layer to apply on top of the ES5 base; repeatable, applied in order.
    #[arg(short = 'l', long = "layer", global = true, value_delimiter = ',')]
    pub layers: Vec<BuiltinLayer>,

    /// Output format.
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl CliArgs {
    /// Whether the schema is an explicit composition rather than a built-in version.
    pub fn is_composed(&self) -> bool {
        self.base || !self.layers.is_empty()
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List node kinds.
    Kinds {
        #[arg(value_enum, default_value_t = KindFilter::All)]
        filter: KindFilter,
    },
    /// Render the merged schema, or only the named kinds.
    Schema { kinds: Vec<NodeKind> },
    /// Kinds a node of this kind may hold directly.
    Children { kind: NodeKind },
    /// Kinds that may hold a node of this kind.
    Parents { kind: NodeKind },
    /// Merge every built-in version and report errors and diagnostics.
    Check {
        /// Fail on diagnostics as well as errors.
        #[arg(long)]
        deny_warnings: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
    All,
    Statement,
    Expression,
    Root,
    Other,
}
