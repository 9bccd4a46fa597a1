//! Purpose: Define the stable public Rust API boundary for maplite.
//! Exports: Decode entrypoints, the value model, encoders, and error types.
//! Role: Public, additive-only surface; hides parser internals.
//! Invariants: This module is the only public path to the decoder.
//! Invariants: Scanner and parser modules stay private and are not exposed.

pub use crate::core::decode::{
    DEFAULT_MAX_DEPTH, DecodeOptions, decode_object, decode_object_with, decode_value,
    decode_value_with,
};
pub use crate::core::encode::{to_json, to_json_pretty};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::value::{JsonMap, JsonValue};
