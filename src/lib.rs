//! Purpose: Shared core library crate used by the `maplite` CLI and tests.
//! Exports: `core` (value model, decoding, encoding, errors) and the `api` boundary.
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: Treat the crate API as internal until a dedicated library release.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
