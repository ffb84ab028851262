//! # orgtbl
//!
//! A CLI tool for rendering statistical tables as org-mode pipe tables.
//!
//! ## Overview
//!
//! orgtbl is built on top of orgtbllib. `encode` reads panels described as
//! JSON and prints them as one org-table; `decode` reads an org-table back
//! and prints what it recovered.
//!
//! ## Usage
//!
//! ```bash
//! # Encode one panel or a list of panels
//! orgtbl encode results.json
//! orgtbl encode results.json --float-fmt "%.2f" --plain
//!
//! # Read JSON from stdin
//! cat results.json | orgtbl encode -
//!
//! # Decode a named table, moving "var" into the row index
//! orgtbl decode paper.org --name coefs --index var --coerce float
//!
//! # Decoded model as JSON
//! orgtbl decode paper.org --output json
//! ```

mod render;

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::Env;
use orgtbllib::{
    decode, encode_stack, named_table_rows, tokenize_rows, DecodeOptions, EncodeOptions,
    FloatFormat, Panel, ScalarType,
};
use outstanding::cli::{App, CommandContext, HandlerResult, Output, RunResult};
use serde::Deserialize;

use render::{create_theme, DecodeView, EncodeView, DECODE_TEMPLATE, ENCODE_TEMPLATE};

/// Encode input: a single panel or a list of panels
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PanelInput {
    Many(Vec<Panel>),
    One(Box<Panel>),
}

impl PanelInput {
    fn into_panels(self) -> Vec<Panel> {
        match self {
            PanelInput::Many(panels) => panels,
            PanelInput::One(panel) => vec![*panel],
        }
    }
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("orgtbl")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render statistical tables as org-mode pipe tables, and read them back")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .action(ArgAction::Set)
                .value_name("LOG_LEVEL")
                .help("Set the log level (overrides RUST_LOG)"),
        )
        .subcommand(
            Command::new("encode")
                .about("Encode panels described as JSON into an org-table")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("JSON file with one panel or a list of panels ('-' for stdin)"),
                )
                .arg(
                    Arg::new("float-fmt")
                        .long("float-fmt")
                        .value_parser(FloatFormat::parse)
                        .help("printf-style number format (default %5.3f)"),
                )
                .arg(
                    Arg::new("plain")
                        .long("plain")
                        .action(ArgAction::SetTrue)
                        .help("Do not wrap numbers in math delimiters"),
                )
                .arg(
                    Arg::new("no-heading")
                        .long("no-heading")
                        .action(ArgAction::SetTrue)
                        .help("Omit the heading rows"),
                ),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode an org-table into rows and columns")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Org file holding the table ('-' for stdin)"),
                )
                .arg(
                    Arg::new("header-rows")
                        .long("header-rows")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1")
                        .help("Number of rows holding column labels"),
                )
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .help("Decode the table after '#+name: NAME' instead of every table row"),
                )
                .arg(
                    Arg::new("index")
                        .short('i')
                        .long("index")
                        .action(ArgAction::Append)
                        .help("Move a column into the row index (can be specified multiple times)"),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .help("Column-name template; '{}' or '{N}' stand for header labels"),
                )
                .arg(
                    Arg::new("coerce")
                        .long("coerce")
                        .value_parser(|s: &str| s.parse::<ScalarType>())
                        .help("Coerce cells to a type: text, float or integer"),
                ),
        )
}

/// Install the logger, honouring --log-level over RUST_LOG
fn init_logging(matches: &ArgMatches) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = matches.get_one::<String>("log-level") {
        builder.parse_filters(level);
    }
    // A second handler in the same process keeps the first logger
    let _ = builder.try_init();
}

/// Read a file, or stdin for '-'
fn read_input(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let path = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");

    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
}

/// Handler for encode command
fn encode_handler(
    matches: &ArgMatches,
    _ctx: &CommandContext,
) -> HandlerResult<serde_json::Value> {
    init_logging(matches);

    let text = read_input(matches)?;
    let panels = serde_json::from_str::<PanelInput>(&text)
        .context("input is neither a panel nor a list of panels")?
        .into_panels();

    let mut options = EncodeOptions::new()
        .math_delimiters(!matches.get_flag("plain"))
        .heading(!matches.get_flag("no-heading"));
    if let Some(format) = matches.get_one::<FloatFormat>("float-fmt") {
        options = options.float_format(format.clone());
    }

    let table = encode_stack(&panels, &options)?;
    log::debug!("encoded {} panels", panels.len());

    let view = EncodeView {
        panels: panels.len(),
        table,
    };
    Ok(Output::Render(serde_json::to_value(&view)?))
}

/// Handler for decode command
fn decode_handler(
    matches: &ArgMatches,
    ctx: &CommandContext,
) -> HandlerResult<serde_json::Value> {
    init_logging(matches);

    let text = read_input(matches)?;
    let rows = match matches.get_one::<String>("name") {
        Some(name) => named_table_rows(&text, name)
            .ok_or_else(|| anyhow::anyhow!("no table named '{}'", name))?,
        None => tokenize_rows(&text),
    };

    let mut options = DecodeOptions::new()
        .header_rows(*matches.get_one::<usize>("header-rows").unwrap_or(&1))
        .index_columns(
            matches
                .get_many::<String>("index")
                .map(|v| v.cloned().collect::<Vec<_>>())
                .unwrap_or_default(),
        );
    if let Some(template) = matches.get_one::<String>("template") {
        options = options.name_template(template.clone());
    }
    if let Some(target) = matches.get_one::<ScalarType>("coerce") {
        options = options.coerce(*target);
    }

    let table = decode(&rows, &options)?;

    // For JSON mode, return the decoded model
    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::to_value(&table)?));
    }

    let view = DecodeView::new(&table, FloatFormat::default())?;
    Ok(Output::Render(serde_json::to_value(&view)?))
}

fn main() -> ExitCode {
    let cmd = build_command();
    let theme = create_theme();

    let result = App::builder()
        .theme(theme)
        .command("encode", encode_handler, ENCODE_TEMPLATE)
        .command("decode", decode_handler, DECODE_TEMPLATE)
        .run_to_string(cmd, std::env::args());

    match result {
        RunResult::Handled(output) => {
            if !output.is_empty() {
                // Check if it's an error message from handler
                if output.starts_with("Error:") {
                    eprintln!("{}", output);
                    return ExitCode::FAILURE;
                }
                print!("{}", output);
            }
            ExitCode::SUCCESS
        }
        RunResult::Binary(_, _) => ExitCode::SUCCESS,
        RunResult::NoMatch(_) => {
            let _ = build_command().print_help();
            ExitCode::FAILURE
        }
    }
}
