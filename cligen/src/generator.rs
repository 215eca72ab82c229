//! End-to-end generation pipeline.
//!
//! [`Generator::generate`] runs one straight pass: parse the source, locate
//! the command's declaration, extract its fields, resolve directives, emit
//! the three files and write them. Any failure aborts the run.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};

use crate::descriptor::FieldDescriptor;
use crate::directive::{self, UnknownDirectivePolicy};
use crate::emit::{self, EmitContext};
use crate::error::CligenError;
use crate::extract;
use crate::locate;
use crate::output::{self, GeneratedFiles, OutputLayout};
use crate::source::{SourceDeclaration, SourceFile};

/// Resolved settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Command name.
    pub command: String,
    /// Top-level help text for the generated command.
    pub help: String,
    /// Rust source file holding the argument declaration.
    pub source: Utf8PathBuf,
    /// Front-end path; defaults to `cmd/<command>/src/main.rs`.
    pub output: Option<Utf8PathBuf>,
    /// Handling of unrecognised directive tokens.
    pub policy: UnknownDirectivePolicy,
}

impl GeneratorConfig {
    /// Front-end path after applying the default.
    #[must_use]
    pub fn front_end_path(&self) -> Utf8PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| OutputLayout::default_front_end(&self.command))
    }
}

/// Drives a generation run for one command.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator for `config`.
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Settings this generator runs with.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Reads the configured source file and generates the command crate.
    ///
    /// # Errors
    ///
    /// Returns any [`CligenError`] raised while reading, locating, parsing
    /// directives, rendering or writing.
    pub fn generate(&self) -> Result<GeneratedFiles, CligenError> {
        tracing::debug!(source = %self.config.source, "reading source");
        let source = SourceFile::read(&self.config.source)?;
        self.generate_from(&source)
    }

    /// Generates the command crate from an already parsed source file.
    ///
    /// # Errors
    ///
    /// As for [`Generator::generate`], minus read failures.
    pub fn generate_from(&self, source: &SourceFile) -> Result<GeneratedFiles, CligenError> {
        let command = self.config.command.as_str();
        let (declaration, kind) = locate::locate(source.declarations(), command)?;
        tracing::debug!(
            command,
            declaration = %declaration.ident,
            ?kind,
            "located declaration"
        );

        let descriptors = self.descriptors(declaration)?;
        let front_end = self.config.front_end_path();
        let impl_module = emit::impl_module_name(command);
        let layout = OutputLayout::for_front_end(&front_end, &impl_module);
        let bin_path = layout.bin_path();

        let emitted = emit::emit(&EmitContext {
            command,
            help: &self.config.help,
            struct_name: &declaration.ident,
            source_label: source_label(source.path()),
            bin_path: &bin_path,
            fields: &descriptors,
        })?;
        tracing::debug!(fields = descriptors.len(), "rendered command");

        output::write_command(&layout, &emitted)
    }

    fn descriptors(
        &self,
        declaration: &SourceDeclaration,
    ) -> Result<Vec<FieldDescriptor>, CligenError> {
        let fields = extract::extract_fields(declaration);
        let mut descriptors = Vec::with_capacity(fields.len());
        for field in &fields {
            let descriptor = directive::parse_field(field).resolve(self.config.policy)?;
            warn_on_questionable(&descriptor, &field.declared_type.to_string());
            descriptors.push(descriptor);
        }
        check_unique_flags(&descriptors)?;
        Ok(descriptors)
    }
}

/// Rejects two supported fields sharing a long or short flag; clap would
/// panic on the generated command at startup.
fn check_unique_flags(descriptors: &[FieldDescriptor]) -> Result<(), CligenError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for descriptor in descriptors.iter().filter(|d| d.kind.is_supported()) {
        let long = format!("--{}", descriptor.cli_name);
        let short = descriptor.short.map(|c| format!("-{c}"));
        for flag in std::iter::once(long).chain(short) {
            if let Some(first) = seen.get(&flag) {
                return Err(CligenError::DuplicateFlag {
                    flag,
                    first: (*first).to_owned(),
                    second: descriptor.name.clone(),
                });
            }
            seen.insert(flag, &descriptor.name);
        }
    }
    Ok(())
}

fn warn_on_questionable(descriptor: &FieldDescriptor, declared_type: &str) {
    if !descriptor.kind.is_supported() {
        tracing::warn!(
            field = %descriptor.name,
            ty = declared_type,
            "skipping field of unsupported type"
        );
        return;
    }
    if descriptor.options.is_some() && descriptor.enforced_options().is_none() {
        tracing::warn!(
            field = %descriptor.name,
            "allowed values are only enforced for string fields"
        );
    }
    if descriptor.required && descriptor.default.is_some() {
        tracing::warn!(
            field = %descriptor.name,
            "required field has a default, which always satisfies the check"
        );
    }
}

fn source_label(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or_else(|| path.as_str())
}
