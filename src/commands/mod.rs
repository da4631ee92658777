//! CLI command implementations for desymm.
//!
//! Each submodule owns one command: its configuration struct and the
//! handler that runs it and reports the outcome.
//!
//! Available commands:
//! - **desym**: Rewrite a symmetric coordinate file as a general one

pub mod desym;

pub use desym::{handle_desym, DesymConfig};
