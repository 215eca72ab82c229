//! `rstest-bdd` scaffolding for `cligen`.
//!
//! Scenarios drive the compiled binary inside a scratch directory so that
//! every run starts from an empty output tree.

mod behaviour;
mod fixtures;
