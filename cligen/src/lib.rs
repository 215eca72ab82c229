//! Library interface for `cligen`.
//!
//! `cligen` reads a Rust source file, finds the argument struct declared for
//! a command, and writes a small crate whose `main.rs` parses those arguments
//! with clap. Field annotations such as
//! `#[tag = r#"cli:"port,p,default:8080""#]` control flag names, short flags,
//! defaults, required checks, allowed values and help text.

pub mod cli;
pub mod descriptor;
pub mod directive;
pub mod emit;
pub mod error;
pub mod extract;
pub mod generator;
pub mod locate;
pub mod output;
pub mod source;
