//! Purpose: Hold top-level CLI command dispatch for `maplite`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Command behavior, output envelopes, and exit code semantics stay unchanged.
//! Invariants: Helpers in `main.rs` remain the source of shared emission logic.

use super::*;

pub(super) fn dispatch_command(
    command: Command,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "maplite", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_version_output(color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Read {
            file,
            json,
            pretty,
            max_depth,
        } => {
            if json && pretty {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message("--json cannot be combined with --pretty")
                    .with_hint("Use --json for entry reports or --pretty for documents, not both."));
            }
            let options = match max_depth {
                Some(0) => {
                    return Err(Error::new(ErrorKind::Usage)
                        .with_message("--max-depth must be at least 1")
                        .with_hint("Use a positive depth like 128."));
                }
                Some(max_depth) => DecodeOptions { max_depth },
                None => DecodeOptions::default(),
            };
            let input = read_input(file.as_deref())?;
            let map = decode_object_with(&input, options)
                .map_err(|err| attach_input_path(err, file.as_deref()))?;
            tracing::debug!(entries = map.len(), bytes = input.len(), "decoded document");

            if pretty {
                let use_color = color_mode.use_color(io::stdout().is_terminal());
                println!("{}", colorize_json(&JsonValue::Object(map), use_color));
                return Ok(RunOutcome::ok());
            }

            let rows = inspect::entry_rows(&map);
            if json {
                emit_json(inspect::read_report_json(&rows), color_mode);
            } else {
                emit_entry_table(&rows);
            }
            Ok(RunOutcome::ok())
        }
        Command::Widen { json } => {
            let sample = inspect::widen_sample();
            let original_rows = inspect::entry_rows(&sample);
            let sample_value = JsonValue::Object(sample);
            let encoded = to_json_pretty(&sample_value);
            let decoded = decode_object(&encoded)?;
            let decoded_rows = inspect::entry_rows(&decoded);
            tracing::debug!(bytes = encoded.len(), "round-tripped widen sample");

            if json {
                emit_json(
                    inspect::widen_report_json(&original_rows, &encoded, &decoded_rows),
                    color_mode,
                );
                return Ok(RunOutcome::ok());
            }

            let use_color = color_mode.use_color(io::stdout().is_terminal());
            println!("original");
            emit_entry_table_colored(&original_rows, AnsiColor::Green, use_color);
            println!();
            println!("encoded");
            println!("{}", colorize_json(&sample_value, use_color));
            println!();
            println!("decoded");
            emit_entry_table_colored(&decoded_rows, AnsiColor::Red, use_color);
            Ok(RunOutcome::ok())
        }
    }
}
