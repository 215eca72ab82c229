//! Source adapter: reads a Rust file and exposes its top-level structs.
//!
//! Only the information the generator needs survives parsing: each struct's
//! identifier, its attributes (for the explicit command marker), and its
//! fields in declaration order. Items nested in modules or function bodies
//! are not visited.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use syn::{Attribute, Fields, Item};

use crate::error::CligenError;

/// A parsed source file reduced to its struct declarations.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: Utf8PathBuf,
    declarations: Vec<SourceDeclaration>,
}

/// One top-level struct declaration, kept in source order.
#[derive(Debug, Clone)]
pub struct SourceDeclaration {
    /// Struct identifier as written.
    pub ident: String,
    /// Outer attributes on the struct.
    pub attrs: Vec<Attribute>,
    /// Field list in declaration order.
    pub fields: Fields,
}

impl SourceFile {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CligenError::SourceRead`] when the file cannot be read and
    /// [`CligenError::SourceParse`] when it is not valid Rust.
    pub fn read(path: &Utf8Path) -> Result<Self, CligenError> {
        let text = read_source(path)?;
        Self::parse(path, &text)
    }

    /// Parses in-memory `text`, using `path` as the label in diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`CligenError::SourceParse`] when `text` is not valid Rust.
    pub fn parse(path: &Utf8Path, text: &str) -> Result<Self, CligenError> {
        let file = syn::parse_file(text).map_err(|err| CligenError::source_parse(path, &err))?;
        let declarations = file
            .items
            .into_iter()
            .filter_map(|item| match item {
                Item::Struct(item) => Some(SourceDeclaration {
                    ident: item.ident.to_string(),
                    attrs: item.attrs,
                    fields: item.fields,
                }),
                _ => None,
            })
            .collect();
        Ok(Self {
            path: path.to_path_buf(),
            declarations,
        })
    }

    /// Path (or label) the file was parsed from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Struct declarations in source order.
    #[must_use]
    pub fn declarations(&self) -> &[SourceDeclaration] {
        &self.declarations
    }
}

fn read_source(path: &Utf8Path) -> Result<String, CligenError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| CligenError::SourceRead {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|io_err| {
        CligenError::SourceRead {
            path: path.to_path_buf(),
            source: io_err,
        }
    })?;
    dir.read_to_string(file_name)
        .map_err(|io_err| CligenError::SourceRead {
            path: path.to_path_buf(),
            source: io_err,
        })
}
