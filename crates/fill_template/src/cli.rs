// crates/fill_template/src/cli.rs

use clap::{Arg, ArgAction, Command};

fn document_arg() -> Arg {
    Arg::new("document")
        .required(true)
        .help("Template document (.json for the structured shape, anything else is plain text)")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .num_args(1)
        .help("Where to write the edited document [default: <name>_filled.<ext> next to the input]")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print the result as JSON")
        .action(ArgAction::SetTrue)
        .default_value("false")
}

pub fn build_cli() -> Command {
    Command::new("fill_template")
        .version("0.1.0")
        .about("Finds placeholder markers in a document and fills them with values")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue)
                .default_value("false"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .global(true)
                .num_args(1)
                .value_parser(["json", "text"])
                .help("Document format, overriding the guess from the file extension"),
        )
        .subcommand(
            Command::new("markers")
                .about("Lists the markers found in a document")
                .arg(document_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("formats")
                .about("Lists the supported marker syntaxes")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("fill")
                .about("Replaces markers with values from a JSON file and/or --set")
                .arg(document_arg())
                .arg(
                    Arg::new("values")
                        .long("values")
                        .num_args(1)
                        .help("JSON object mapping marker names to values"),
                )
                .arg(
                    Arg::new("set")
                        .long("set")
                        .action(ArgAction::Append)
                        .value_name("NAME=VALUE")
                        .help("Sets one marker value; overrides the values file"),
                )
                .arg(output_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("replace")
                .about("Replaces literal text everywhere in the document")
                .arg(document_arg())
                .arg(
                    Arg::new("search")
                        .long("search")
                        .required(true)
                        .num_args(1)
                        .help("Text to look for"),
                )
                .arg(
                    Arg::new("with")
                        .long("with")
                        .required(true)
                        .num_args(1)
                        .allow_hyphen_values(true)
                        .help("Replacement text"),
                )
                .arg(output_arg())
                .arg(json_arg()),
        )
}
