//! Quill runtime: the draw/read/dispatch loop and startup helpers.
//!
//! Kept in the library half of the package so the loop can be driven by a fake
//! terminal and scripted input in tests; `main.rs` only wires up the real
//! crossterm backend, logging and configuration.

pub mod runtime;

pub use runtime::{EditorRuntime, initial_state};
