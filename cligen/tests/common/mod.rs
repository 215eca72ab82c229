//! Shared helpers for `cligen` integration tests.

use std::process::{Command, Output};

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Scratch directory with a source file, ready for `cligen` runs.
pub(crate) struct Scratch {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl Scratch {
    /// Creates a scratch directory holding `args.rs` with `source`.
    pub(crate) fn with_source(source: &str) -> anyhow::Result<Self> {
        let temp = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non-UTF-8 path: {}", path.display()))?;
        std::fs::write(root.join("args.rs"), source)?;
        Ok(Self { _temp: temp, root })
    }

    /// Root of the scratch directory.
    pub(crate) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Runs `cligen` in the scratch directory with `CLIGEN_SOURCE` set.
    pub(crate) fn run(&self, args: &[&str]) -> anyhow::Result<Output> {
        let output = cligen()
            .current_dir(self.root.as_str())
            .env("CLIGEN_SOURCE", self.root.join("args.rs").as_str())
            .args(args)
            .output()?;
        Ok(output)
    }

    /// Reads a file relative to the scratch root.
    pub(crate) fn read(&self, relative: &str) -> anyhow::Result<String> {
        Ok(std::fs::read_to_string(self.root.join(relative))?)
    }
}

/// Command for the compiled `cligen` binary with logging environment cleared.
pub(crate) fn cligen() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cligen"));
    command.env_remove("CLIGEN_LOG").env_remove("RUST_LOG");
    command
}
