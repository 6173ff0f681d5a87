use clap::Parser;

use super::args::{CliArgs, Command, KindFilter, OutputFormat};
use esast_schema::{BuiltinLayer, GrammarVersion, NodeKind};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["esast", "kinds"]).expect("default args should parse");

    assert_eq!(args.grammar, GrammarVersion::Es2019);
    assert!(!args.base);
    assert!(args.layers.is_empty());
    assert!(!args.is_composed());
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(
        args.command,
        Command::Kinds {
            filter: KindFilter::All
        }
    );
}

#[test]
fn parses_global_flags_after_subcommand() {
    let args = CliArgs::try_parse_from([
        "esast",
        "parents",
        "Super",
        "--grammar",
        "es6",
        "--format",
        "json",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.grammar, GrammarVersion::Es2015);
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(
        args.command,
        Command::Parents {
            kind: NodeKind::Super
        }
    );
}

#[test]
fn parses_layer_lists() {
    let args = CliArgs::try_parse_from([
        "esast",
        "-l",
        "class,spread",
        "--layer",
        "TemplateLiteral",
        "schema",
        "ClassBody",
        "TemplateElement",
    ])
    .expect("layer args should parse");

    assert!(args.is_composed());
    assert_eq!(
        args.layers,
        vec![
            BuiltinLayer::Class,
            BuiltinLayer::Spread,
            BuiltinLayer::TemplateLiteral
        ]
    );
    assert_eq!(
        args.command,
        Command::Schema {
            kinds: vec![NodeKind::ClassBody, NodeKind::TemplateElement]
        }
    );
}

#[test]
fn parses_check_flags() {
    let args = CliArgs::try_parse_from(["esast", "--base", "check", "--deny-warnings"])
        .expect("check args should parse");

    assert!(args.base);
    assert!(args.is_composed());
    assert_eq!(
        args.command,
        Command::Check {
            deny_warnings: true
        }
    );
}

#[test]
fn rejects_unknown_names() {
    assert!(CliArgs::try_parse_from(["esast", "children", "Identifierr"]).is_err());
    assert!(CliArgs::try_parse_from(["esast", "--grammar", "es2077", "kinds"]).is_err());
    assert!(CliArgs::try_parse_from(["esast", "--layer", "decorators", "kinds"]).is_err());
    assert!(CliArgs::try_parse_from(["esast", "kinds", "declarations"]).is_err());
    assert!(CliArgs::try_parse_from(["esast"]).is_err());
}
