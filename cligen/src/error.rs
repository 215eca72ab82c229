//! Error types for `cligen`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `cligen` generation pipeline.
#[derive(Debug, Error)]
pub enum CligenError {
    /// The source file could not be read.
    #[error("failed to read source file {path}: {source}")]
    SourceRead {
        /// Path of the unreadable source file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The source file is not valid Rust.
    #[error("failed to parse source file {path}:{line}:{column}: {message}")]
    SourceParse {
        /// Path of the source file (or a label for in-memory text).
        path: Utf8PathBuf,
        /// One-based line of the parse failure.
        line: usize,
        /// One-based column of the parse failure.
        column: usize,
        /// Parser diagnostic.
        message: String,
    },

    /// A `#[cligen(...)]` marker could not be understood.
    #[error("invalid #[cligen] marker on '{declaration}': {message}")]
    InvalidMarker {
        /// Identifier of the declaration carrying the marker.
        declaration: String,
        /// Parser diagnostic.
        message: String,
    },

    /// No declaration matched the command.
    #[error("could not find struct for command {command}")]
    DeclarationNotFound {
        /// Command name that was searched for.
        command: String,
    },

    /// A directive token was not recognised and the policy rejects it.
    #[error("unrecognised directive '{token}' on field '{field}'")]
    UnrecognizedDirective {
        /// Field carrying the directive.
        field: String,
        /// Offending token, trimmed.
        token: String,
    },

    /// Two fields resolve to the same long or short flag.
    #[error("flag {flag} is used by both '{first}' and '{second}'")]
    DuplicateFlag {
        /// Flag as typed on the command line, with dashes.
        flag: String,
        /// Field that claimed the flag first.
        first: String,
        /// Field that repeats it.
        second: String,
    },

    /// Creating a directory or writing an output file failed.
    #[error("failed to write {path}: {source}")]
    OutputWrite {
        /// Path that could not be written.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// No source file was configured.
    #[error("{var} environment variable not set; pass --source or export {var}")]
    MissingSource {
        /// Environment variable consulted for the source path.
        var: &'static str,
    },

    /// The invocation was malformed.
    #[error("{0}")]
    Usage(String),

    /// A template could not be rendered.
    #[error("failed to render {0}")]
    Render(&'static str),
}

impl CligenError {
    /// Builds a [`CligenError::SourceParse`] from a `syn` diagnostic.
    pub(crate) fn source_parse(path: &camino::Utf8Path, err: &syn::Error) -> Self {
        let start = err.span().start();
        Self::SourceParse {
            path: path.to_path_buf(),
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    }

    /// Builds a [`CligenError::OutputWrite`] for `path`.
    pub(crate) fn output_write(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }
}
