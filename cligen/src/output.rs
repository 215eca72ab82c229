//! Output writers for generated command crates.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::Write;

use crate::emit::EmittedCommand;
use crate::error::CligenError;

const SOURCE_DIR: &str = "src";
const MANIFEST_FILE: &str = "Cargo.toml";

/// Where each generated file lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Generated `main.rs`.
    pub front_end: Utf8PathBuf,
    /// Implementation stub next to the front end.
    pub stub: Utf8PathBuf,
    /// Crate root holding the manifest.
    pub crate_root: Utf8PathBuf,
    /// Crate manifest.
    pub manifest: Utf8PathBuf,
}

impl OutputLayout {
    /// Derives the layout from the front-end path.
    ///
    /// The crate root is the front end's directory, or its grandparent when
    /// that directory is named `src`.
    #[must_use]
    pub fn for_front_end(front_end: &Utf8Path, impl_module: &str) -> Self {
        let dir = parent_or_cwd(front_end);
        let crate_root = if dir.file_name() == Some(SOURCE_DIR) {
            parent_or_cwd(dir).to_path_buf()
        } else {
            dir.to_path_buf()
        };
        Self {
            front_end: front_end.to_path_buf(),
            stub: dir.join(format!("{impl_module}.rs")),
            manifest: crate_root.join(MANIFEST_FILE),
            crate_root,
        }
    }

    /// Default front-end path for `command`: `cmd/<command>/src/main.rs`.
    #[must_use]
    pub fn default_front_end(command: &str) -> Utf8PathBuf {
        Utf8PathBuf::from("cmd")
            .join(command)
            .join(SOURCE_DIR)
            .join("main.rs")
    }

    /// Front-end path relative to the crate root, as written in the manifest.
    #[must_use]
    pub fn bin_path(&self) -> String {
        let file_name = self.front_end.file_name().unwrap_or("main.rs");
        if parent_or_cwd(&self.front_end).file_name() == Some(SOURCE_DIR) {
            format!("{SOURCE_DIR}/{file_name}")
        } else {
            file_name.to_owned()
        }
    }
}

/// Paths touched by one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// Generated front end.
    pub front_end: Utf8PathBuf,
    /// Files created or rewritten.
    pub written: Vec<Utf8PathBuf>,
    /// Files left alone because they already existed.
    pub skipped: Vec<Utf8PathBuf>,
}

/// Writes the emitted files into `layout`.
///
/// The front end and manifest are always rewritten; the stub is only created
/// when missing.
///
/// # Errors
///
/// Returns [`CligenError::OutputWrite`] when a directory or file cannot be
/// created or written.
pub fn write_command(
    layout: &OutputLayout,
    emitted: &EmittedCommand,
) -> Result<GeneratedFiles, CligenError> {
    let mut report = GeneratedFiles {
        front_end: layout.front_end.clone(),
        ..GeneratedFiles::default()
    };

    write_file(&layout.front_end, &emitted.front_end, WriteMode::Replace)?;
    report.written.push(layout.front_end.clone());

    if write_file(&layout.stub, &emitted.stub, WriteMode::CreateNew)? {
        report.written.push(layout.stub.clone());
    } else {
        tracing::info!(path = %layout.stub, "implementation stub exists; leaving it untouched");
        report.skipped.push(layout.stub.clone());
    }

    write_file(&layout.manifest, &emitted.manifest, WriteMode::Replace)?;
    report.written.push(layout.manifest.clone());

    Ok(report)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Replace,
    CreateNew,
}

/// Returns `false` when `mode` is [`WriteMode::CreateNew`] and the file
/// already exists.
fn write_file(path: &Utf8Path, content: &str, mode: WriteMode) -> Result<bool, CligenError> {
    let dir = ensure_dir(parent_or_cwd(path))?;
    let file_name = path.file_name().ok_or_else(|| {
        CligenError::output_write(path, std::io::ErrorKind::InvalidInput.into())
    })?;

    let mut options = OpenOptions::new();
    options.write(true);
    match mode {
        WriteMode::Replace => options.create(true).truncate(true),
        WriteMode::CreateNew => options.create_new(true),
    };

    let mut file = match dir.open_with(file_name, &options) {
        Ok(file) => file,
        Err(err)
            if mode == WriteMode::CreateNew && err.kind() == std::io::ErrorKind::AlreadyExists =>
        {
            return Ok(false);
        }
        Err(err) => return Err(CligenError::output_write(path, err)),
    };
    file.write_all(content.as_bytes())
        .map_err(|err| CligenError::output_write(path, err))?;
    tracing::info!(path = %path, "wrote file");
    Ok(true)
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, CligenError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|err| CligenError::output_write(path, err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|err| CligenError::output_write(path, err))
        }
        Err(open_err) => Err(CligenError::output_write(path, open_err)),
    }
}

fn parent_or_cwd(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}
