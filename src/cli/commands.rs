//! Subcommand implementations. Output goes to the given writer so the
//! commands can be exercised without a process.

use super::args::{CliArgs, Command, KindFilter, OutputFormat};
use anyhow::{Context, Result, bail};
use esast_schema::{
    BuiltinLayer, GrammarVersion, KindSet, MergedSchema, NodeKind, ParentType, SchemaDiagnostic,
    compose,
};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// Run the selected subcommand. Returns `false` when `check` found problems.
pub fn run(args: &CliArgs, out: &mut impl Write) -> Result<bool> {
    match &args.command {
        Command::Kinds { filter } => {
            let schema = load_schema(args)?;
            let kinds = filtered_kinds(&schema, *filter);
            write_kind_list(out, args.format, &kinds)?;
        }
        Command::Schema { kinds } => {
            let schema = load_schema(args)?;
            write_schema(out, args.format, &schema, kinds)?;
        }
        Command::Children { kind } => {
            let schema = load_schema(args)?;
            ensure_defined(&schema, *kind)?;
            write_relation(out, args.format, *kind, "children", Some(schema.derive_children(*kind)))?;
        }
        Command::Parents { kind } => {
            let schema = load_schema(args)?;
            ensure_defined(&schema, *kind)?;
            let parents = match schema.parent_type(*kind) {
                ParentType::Absent => None,
                ParentType::OneOf(parents) => Some(parents),
            };
            write_relation(out, args.format, *kind, "parents", parents)?;
        }
        Command::Check { deny_warnings } => {
            return check(args, *deny_warnings, out);
        }
    }
    Ok(true)
}

/// The built-in version, or the ES5 base composed with `--layer` layers.
pub fn load_schema(args: &CliArgs) -> Result<Arc<MergedSchema>> {
    if !args.is_composed() {
        return Ok(args.grammar.schema());
    }
    let schema = compose(&args.layers)
        .with_context(|| format!("failed to compose ES5 with [{}]", layer_names(&args.layers)))?;
    Ok(Arc::new(schema))
}

fn layer_names(layers: &[BuiltinLayer]) -> String {
    layers
        .iter()
        .map(|layer| layer.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn ensure_defined(schema: &MergedSchema, kind: NodeKind) -> Result<()> {
    if !schema.contains(kind) {
        bail!("{kind} is not defined in {}", schema.name());
    }
    Ok(())
}

fn filtered_kinds(schema: &MergedSchema, filter: KindFilter) -> KindSet {
    match filter {
        KindFilter::All => schema.all_kinds().clone(),
        KindFilter::Statement => schema.statement_kinds().clone(),
        KindFilter::Expression => schema.expression_kinds().clone(),
        KindFilter::Root => schema.root_kinds().clone(),
        KindFilter::Other => schema.other_kinds(),
    }
}

fn write_kind_list(out: &mut impl Write, format: OutputFormat, kinds: &KindSet) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for kind in kinds.iter() {
                writeln!(out, "{kind}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, kinds)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_schema(
    out: &mut impl Write,
    format: OutputFormat,
    schema: &MergedSchema,
    only: &[NodeKind],
) -> Result<()> {
    for &kind in only {
        ensure_defined(schema, kind)?;
    }
    let snapshot = schema.snapshot();
    if only.is_empty() {
        match format {
            OutputFormat::Text => write!(out, "{snapshot}")?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &snapshot)?;
                writeln!(out)?;
            }
        }
        return Ok(());
    }

    let selected: Vec<_> = snapshot
        .kinds
        .iter()
        .filter(|kind| only.contains(&kind.kind))
        .collect();
    match format {
        OutputFormat::Text => {
            for kind in selected {
                writeln!(out, "{kind}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &selected)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct RelationOutput<'a> {
    kind: NodeKind,
    #[serde(flatten)]
    relation: RelationField<'a>,
}

struct RelationField<'a> {
    name: &'static str,
    kinds: Option<&'a KindSet>,
}

impl Serialize for RelationField<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name, &self.kinds)?;
        map.end()
    }
}

/// `None` is an absent relation (a root's parent), rendered as `null`.
fn write_relation(
    out: &mut impl Write,
    format: OutputFormat,
    kind: NodeKind,
    name: &'static str,
    kinds: Option<&KindSet>,
) -> Result<()> {
    match format {
        OutputFormat::Text => match kinds {
            None => writeln!(out, "null")?,
            Some(kinds) if kinds.is_empty() => writeln!(out, "never")?,
            Some(kinds) => {
                for kind in kinds.iter() {
                    writeln!(out, "{kind}")?;
                }
            }
        },
        OutputFormat::Json => {
            let output = RelationOutput {
                kind,
                relation: RelationField { name, kinds },
            };
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Outcome of merging one grammar.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub name: String,
    pub kinds: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub diagnostics: Vec<SchemaDiagnostic>,
}

impl CheckReport {
    fn passed(&self, deny_warnings: bool) -> bool {
        self.error.is_none() && !(deny_warnings && !self.diagnostics.is_empty())
    }
}

fn check_one(name: String, built: Result<MergedSchema, esast_schema::SchemaError>) -> CheckReport {
    match built {
        Ok(schema) => CheckReport {
            name,
            kinds: schema.all_kinds().len(),
            error: None,
            diagnostics: schema.diagnostics().to_vec(),
        },
        Err(err) => CheckReport {
            name,
            kinds: 0,
            error: Some(err.to_string()),
            diagnostics: Vec::new(),
        },
    }
}

fn check(args: &CliArgs, deny_warnings: bool, out: &mut impl Write) -> Result<bool> {
    let mut reports: Vec<CheckReport> = GrammarVersion::ALL
        .iter()
        .map(|version| check_one(version.name().to_string(), version.build()))
        .collect();
    if args.is_composed() {
        let name = format!("ES5+[{}]", layer_names(&args.layers));
        reports.push(check_one(name, compose(&args.layers)));
    }

    let passed = reports.iter().all(|report| report.passed(deny_warnings));
    info!(grammars = reports.len(), passed, "checked grammars");

    match args.format {
        OutputFormat::Text => {
            for report in &reports {
                match &report.error {
                    Some(err) => writeln!(out, "error: {}: {err}", report.name)?,
                    None => writeln!(out, "ok: {} ({} kinds)", report.name, report.kinds)?,
                }
                for diagnostic in &report.diagnostics {
                    writeln!(out, "warning: {}: {diagnostic}", report.name)?;
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        }
    }
    Ok(passed)
}
