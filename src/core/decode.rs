// Decode entrypoints: empty-input handling, full parse, root projection.
use crate::core::error::{Error, ErrorKind};
use crate::core::parse::Parser;
use crate::core::value::{JsonMap, JsonValue};

/// Recursion bound applied when no explicit option is given.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Clone, Copy, Debug)]
pub struct DecodeOptions {
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Decodes a JSON document whose top-level value is an object into an
/// insertion-ordered map of its members.
///
/// Pure function of the input text: no I/O, no logging, no shared state, so
/// concurrent calls on separate inputs cannot interfere. Fails with `Empty`
/// for empty or whitespace-only input, `Syntax` for malformed documents, and
/// `TopLevel` for valid documents whose root is not an object.
pub fn decode_object(text: &str) -> Result<JsonMap, Error> {
    decode_object_with(text, DecodeOptions::default())
}

pub fn decode_object_with(text: &str, options: DecodeOptions) -> Result<JsonMap, Error> {
    match decode_value_with(text, options)? {
        JsonValue::Object(map) => Ok(map),
        other => Err(Error::new(ErrorKind::TopLevel)
            .with_message(format!(
                "top-level value is {}, not an object",
                other.type_name()
            ))
            .with_hint("Only documents whose root is a JSON object decode to a map.")),
    }
}

/// Decodes any JSON document into a value tree, object-rooted or not.
pub fn decode_value(text: &str) -> Result<JsonValue, Error> {
    decode_value_with(text, DecodeOptions::default())
}

pub fn decode_value_with(text: &str, options: DecodeOptions) -> Result<JsonValue, Error> {
    // JSON whitespace only; other blank-looking bytes must reach the scanner.
    if text
        .bytes()
        .all(|byte| matches!(byte, b' ' | b'\t' | b'\n' | b'\r'))
    {
        return Err(Error::new(ErrorKind::Empty).with_message("input contains no JSON content"));
    }
    let mut parser = Parser::new(text, options.max_depth)?;
    parser.parse_document()
}
