//! Test helpers shared across the `cligen` workspace.
//!
//! `cligen` resolves its source file from `CLIGEN_SOURCE` and its log filter
//! from `CLIGEN_LOG`, so tests that exercise those paths mutate the process
//! environment. The [`env`] guards keep such mutations serialised and
//! restore the previous state on drop.

pub mod env;
