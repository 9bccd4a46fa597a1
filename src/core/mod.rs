// Core modules implementing value modeling, decoding, encoding, and error modeling.
pub mod decode;
pub mod encode;
pub mod error;
pub(crate) mod parse;
pub(crate) mod scan;
pub mod value;
