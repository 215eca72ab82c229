//! Shared fixtures for the `cligen` behavioural scenarios.

use std::process::Output;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tempfile::TempDir;

/// Front-end path handed to `cligen`, relative to the scratch directory.
pub const FRONT_END: &str = "app/src/main.rs";

/// Implementation stub written next to [`FRONT_END`].
pub const STUB: &str = "app/src/serve_impl.rs";

/// Source file the scenarios annotate.
pub const SOURCE: &str = "args.rs";

/// Scenario state shared between generation steps.
#[derive(Debug, Default, ScenarioState)]
pub struct GenerationContext {
    pub workspace: Slot<TempDir>,
    pub last_output: Slot<Output>,
    pub previous_front_end: Slot<String>,
}

impl GenerationContext {
    /// Root of the scratch directory.
    pub fn root(&self) -> anyhow::Result<Utf8PathBuf> {
        self.workspace
            .with_ref(|dir| {
                Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
                    .map_err(|path| anyhow::anyhow!("non-UTF-8 path: {}", path.display()))
            })
            .ok_or_else(|| anyhow::anyhow!("workspace should be set"))?
    }
}

/// Provides a context with a fresh scratch directory.
#[fixture]
pub fn generation_context() -> GenerationContext {
    let ctx = GenerationContext::default();
    ctx.workspace
        .set(tempfile::tempdir().expect("create scratch directory"));
    ctx
}
