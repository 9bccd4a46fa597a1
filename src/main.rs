//! Purpose: `maplite` CLI entry point and v0.1 command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits output on stdout.
//! Invariants: Commands emit stable stdout formats (human or JSON by command/flags).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: All decoding goes through `api::decode_object`/`api::decode_value`.
#![allow(clippy::result_large_err)]
use std::ffi::OsString;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint,
    error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;
mod inspect;

use color_json::colorize_json;
use maplite::api::{
    DecodeOptions, Error, ErrorKind, JsonValue, decode_object, decode_object_with, to_exit_code,
    to_json_pretty,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_logging();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

// Diagnostics stay on stderr so stdout remains the command's data channel.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = clap_error_summary(&err);
                let hint = clap_error_hint(&err);
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint(hint),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;

    command_dispatch::dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let replacement = arg.to_str().and_then(|value| match value {
                "---help" => Some("--help"),
                "---version" => Some("--version"),
                _ => None,
            });
            replacement.map(OsString::from).unwrap_or_else(|| arg)
        })
        .collect()
}

#[derive(Debug, Parser)]
#[command(
    name = "maplite",
    version,
    about = "Decode JSON documents into ordered, typed maps",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Documents decode into maps that keep document key order. Numbers keep
their integral or fractional shape.

Mental model:
  - `read` decodes a document and lists its top-level entries
  - `widen` demonstrates integer widening through an encode/decode round trip
"#,
    after_help = r#"EXAMPLES
  $ echo '{"name": "ada", "age": 36}' | maplite read
  $ maplite read config.json --pretty
  $ maplite widen --json

LEARN MORE
  $ maplite <command> --help
  https://github.com/sandover/maplite"#,
    arg_required_else_help = true,
    disable_help_subcommand = false
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Decode a JSON document and list its top-level entries",
        long_about = r#"Read a JSON document from FILE (or stdin) and decode it into an ordered map.

The document's top-level value must be an object. Each top-level entry prints
with the runtime type it decoded to."#,
        after_help = r#"EXAMPLES
  $ maplite read config.json
  $ cat config.json | maplite read
  $ maplite read config.json --json
  $ maplite read config.json --pretty"#
    )]
    Read {
        #[arg(
            help = "Input file (defaults to stdin; `-` forces stdin)",
            value_hint = ValueHint::FilePath
        )]
        file: Option<PathBuf>,
        #[arg(long, help = "Emit a machine-readable entry report")]
        json: bool,
        #[arg(long, help = "Re-emit the decoded document as pretty JSON")]
        pretty: bool,
        #[arg(long, help = "Maximum nesting depth accepted while decoding")]
        max_depth: Option<usize>,
    },
    #[command(
        about = "Show integer widening through an encode/decode round trip",
        long_about = r#"Encode a sample map holding narrow integers, decode the JSON text back, and
show both sides with their runtime types.

JSON has one numeric literal shape, so every integral value comes back as a
64-bit integer regardless of how narrow it started."#,
        after_help = r#"EXAMPLES
  $ maplite widen
  $ maplite widen --json"#
    )]
    Widen {
        #[arg(long, help = "Emit a machine-readable widening report")]
        json: bool,
    },
    #[command(about = "Generate shell completions", after_help = r#"EXAMPLES
  $ maplite completion bash > /etc/bash_completion.d/maplite
  $ maplite completion zsh > "${fpath[1]}/_maplite""#)]
    Completion {
        #[arg(value_enum, help = "Shell to generate completions for")]
        shell: Shell,
    },
    #[command(about = "Show version information")]
    Version,
}

fn read_input(file: Option<&Path>) -> Result<String, Error> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .map_err(|err| io_error(err, "failed to read input file").with_path(path)),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| io_error(err, "failed to read stdin"))?;
            Ok(buffer)
        }
    }
}

fn io_error(err: io::Error, message: &str) -> Error {
    Error::new(ErrorKind::Io).with_message(message).with_source(err)
}

// Decode failures for file input carry the path; stdin has none to name.
fn attach_input_path(err: Error, file: Option<&Path>) -> Error {
    match file {
        Some(path) if path.as_os_str() != "-" => err.with_path(path),
        _ => err,
    }
}

fn emit_version_output(color_mode: ColorMode) {
    if io::stdout().is_terminal() {
        println!("maplite {}", env!("CARGO_PKG_VERSION"));
    } else {
        emit_json(
            json!({
                "name": "maplite",
                "version": env!("CARGO_PKG_VERSION"),
            }),
            color_mode,
        );
    }
}

fn emit_table(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", render_table(headers, rows));
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let column_count = headers.len();
    let mut sanitized_rows = Vec::with_capacity(rows.len());
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();

    for row in rows {
        let mut sanitized = Vec::with_capacity(column_count);
        for (idx, width) in widths.iter_mut().enumerate() {
            let value = row.get(idx).map(String::as_str).unwrap_or("");
            let cleaned = sanitize_table_cell(value);
            *width = (*width).max(cleaned.chars().count());
            sanitized.push(cleaned);
        }
        sanitized_rows.push(sanitized);
    }

    let mut lines = Vec::with_capacity(sanitized_rows.len() + 1);
    lines.push(format_table_line(
        &headers
            .iter()
            .map(|header| header.to_string())
            .collect::<Vec<_>>(),
        &widths,
    ));
    for row in sanitized_rows {
        lines.push(format_table_line(&row, &widths));
    }
    lines.join("\n")
}

fn sanitize_table_cell(value: &str) -> String {
    value.replace('\n', "\\n").replace('\r', "\\r")
}

fn format_table_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        line.push_str(cell);
        let cell_len = cell.chars().count();
        if *width > cell_len {
            line.push_str(&" ".repeat(*width - cell_len));
        }
    }
    line
}

const ENTRY_TABLE_HEADERS: [&str; 3] = ["KEY", "TYPE", "VALUE"];

fn entry_table_rows(rows: &[inspect::EntryRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            vec![
                row.key.clone(),
                row.type_name.to_string(),
                row.rendered.clone(),
            ]
        })
        .collect()
}

fn emit_entry_table(rows: &[inspect::EntryRow]) {
    emit_table(&ENTRY_TABLE_HEADERS, &entry_table_rows(rows));
}

// Header line stays uncolored; data rows take the section's color.
fn emit_entry_table_colored(rows: &[inspect::EntryRow], color: AnsiColor, enabled: bool) {
    let rendered = render_table(&ENTRY_TABLE_HEADERS, &entry_table_rows(rows));
    for (idx, line) in rendered.lines().enumerate() {
        if idx == 0 {
            println!("{line}");
        } else {
            println!("{}", colorize_label(line, enabled, color));
        }
    }
}

fn emit_json(value: serde_json::Value, color_mode: ColorMode) {
    let is_tty = io::stdout().is_terminal();
    let use_color = color_mode.use_color(is_tty);
    let pretty = is_tty || use_color;
    let json = if pretty {
        if use_color {
            colorize_serde_json(&value, true)
        } else {
            serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
        }
    } else {
        serde_json::to_string(&value)
            .unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    };
    println!("{json}");
}

// Report envelopes are serde values; route them through the shared colorizer
// by way of the bridge so both emitters share one palette.
fn colorize_serde_json(value: &serde_json::Value, use_color: bool) -> String {
    colorize_json(&JsonValue::from_serde(value), use_color)
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Green,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Green => "32",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Io\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Empty => "empty input".to_string(),
        ErrorKind::Syntax => "invalid json".to_string(),
        ErrorKind::TopLevel => "top-level value is not an object".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(offset) = err.offset() {
        lines.push(format!(
            "{} {offset}",
            colorize_label("offset:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);

    let Some(usage) = usage else {
        return "Try `maplite --help`.".to_string();
    };

    let tokens: Vec<&str> = usage.split_whitespace().collect();
    let Some(pos) = tokens.iter().position(|t| *t == "maplite") else {
        return "Try `maplite --help`.".to_string();
    };

    let mut parts = Vec::new();
    for token in tokens.iter().skip(pos + 1) {
        if token.starts_with('-') || token.starts_with('<') || token.starts_with('[') {
            break;
        }
        parts.push(*token);
    }

    if parts.is_empty() {
        return "Try `maplite --help`.".to_string();
    }

    format!("Try `maplite {} --help`.", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn error_text_respects_color_flag() {
        let err = Error::new(ErrorKind::Usage).with_message("bad input");
        let colored = error_text(&err, true);
        let plain = error_text(&err, false);
        assert!(colored.contains("\u{1b}[31merror:\u{1b}[0m"));
        assert!(plain.contains("error:"));
        assert!(!plain.contains("\u{1b}["));
    }

    #[test]
    fn error_json_carries_kind_message_hint_and_offset() {
        let err = Error::new(ErrorKind::Syntax)
            .with_message("expected value")
            .with_offset(6)
            .with_hint("Check the document near the reported offset.");
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], json!("Syntax"));
        assert_eq!(value["error"]["message"], json!("expected value"));
        assert_eq!(value["error"]["offset"], json!(6));
        assert!(value["error"]["hint"].is_string());
        assert!(value["error"].get("causes").is_none());
    }

    #[test]
    fn error_message_falls_back_to_kind_defaults() {
        assert_eq!(error_message(&Error::new(ErrorKind::Empty)), "empty input");
        assert_eq!(
            error_message(&Error::new(ErrorKind::TopLevel)),
            "top-level value is not an object"
        );
    }

    #[test]
    fn error_causes_walk_the_source_chain() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing file");
        let err = io_error(io_err, "failed to read input file");
        let causes = error_causes(&err);
        assert_eq!(causes, vec!["missing file".to_string()]);
    }

    #[test]
    fn clap_errors_become_usage_summaries_with_subcommand_hints() {
        let err = Cli::try_parse_from(["maplite", "read", "--bogus"]).unwrap_err();
        let summary = clap_error_summary(&err);
        assert!(!summary.is_empty());
        assert!(!summary.starts_with("error:"));
        assert_eq!(clap_error_hint(&err), "Try `maplite read --help`.");
    }

    #[test]
    fn normalize_args_rewrites_triple_dash_help() {
        let args = normalize_args(vec![
            OsString::from("maplite"),
            OsString::from("---help"),
            OsString::from("---version"),
            OsString::from("read"),
        ]);
        assert_eq!(
            args,
            vec![
                OsString::from("maplite"),
                OsString::from("--help"),
                OsString::from("--version"),
                OsString::from("read"),
            ]
        );
    }

    #[test]
    fn attach_input_path_skips_the_stdin_marker() {
        let err = attach_input_path(Error::new(ErrorKind::Syntax), Some(Path::new("-")));
        assert!(err.path().is_none());
        let err = attach_input_path(Error::new(ErrorKind::Syntax), Some(Path::new("in.json")));
        assert_eq!(err.path(), Some(&PathBuf::from("in.json")));
    }

    #[test]
    fn read_input_reads_files_and_reports_io_failures() {
        let mut file = NamedTempFile::new().expect("tempfile");
        std::io::Write::write_all(&mut file, b"{\"a\": 1}").expect("write");
        let text = read_input(Some(file.path())).expect("read");
        assert_eq!(text, "{\"a\": 1}");

        let err = read_input(Some(Path::new("/no/such/maplite-input.json"))).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.path().is_some());
        assert!(!error_causes(&err).is_empty());
    }

    #[test]
    fn render_table_aligns_and_sanitizes_cells() {
        let output = render_table(
            &["NAME", "DETAIL"],
            &[
                vec!["a".to_string(), "line1\nline2".to_string()],
                vec!["long-name".to_string(), "ok".to_string()],
            ],
        );
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[0].contains("  DETAIL"));
        assert!(lines[1].contains("line1\\nline2"));
        assert!(lines[2].contains("long-name"));
    }

    #[test]
    fn entry_table_rows_render_compact_values() {
        let map = maplite::api::decode_object("{\"a\": {\"nested\": true}}").expect("decode");
        let rows = inspect::entry_rows(&map);
        assert_eq!(
            entry_table_rows(&rows),
            vec![vec![
                "a".to_string(),
                "object".to_string(),
                "{\"nested\":true}".to_string(),
            ]]
        );
    }
}
