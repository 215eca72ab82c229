//! Code emission for generated command crates.
//!
//! [`emit`] turns a command's field descriptors into the text of three files:
//! the front end that registers and validates flags, the one-time
//! implementation stub, and the crate manifest. Emission is pure; writing is
//! left to [`crate::output`].

mod front_end;
mod templates;

pub use templates::{TEMPLATES, Template, Templates};

use heck::{ToKebabCase, ToSnakeCase};

use crate::descriptor::FieldDescriptor;
use crate::error::CligenError;

/// Inputs for one emission.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Command name as given on the command line.
    pub command: &'a str,
    /// Top-level help text.
    pub help: &'a str,
    /// Identifier of the matched declaration; reused for the generated record.
    pub struct_name: &'a str,
    /// Label for the source file, shown in the generated header.
    pub source_label: &'a str,
    /// Front-end path relative to the crate root, used in the manifest.
    pub bin_path: &'a str,
    /// Field descriptors in declaration order.
    pub fields: &'a [FieldDescriptor],
}

/// Rendered file contents for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedCommand {
    /// Module name of the implementation stub, without extension.
    pub impl_module: String,
    /// Generated `main.rs`.
    pub front_end: String,
    /// Implementation stub.
    pub stub: String,
    /// Crate manifest.
    pub manifest: String,
}

/// Renders the generated files for `ctx`.
///
/// Fields of unsupported kind are left out of every generated file.
///
/// # Errors
///
/// Returns [`CligenError::Render`] when a template cannot be filled.
pub fn emit(ctx: &EmitContext<'_>) -> Result<EmittedCommand, CligenError> {
    let fields = supported_fields(ctx.fields);
    let impl_module = impl_module_name(ctx.command);
    let command_literal = literal(ctx.command);

    let members = front_end::members(&fields)?;
    let registrations = front_end::registrations(&fields)?;
    let readers = front_end::readers(&fields)?;
    let required_checks = front_end::required_checks(&fields)?;
    let option_checks = front_end::option_checks(&fields)?;
    let help_literal = literal(ctx.help);

    let front_end = TEMPLATES.front_end.render(&[
        ("source", ctx.source_label),
        ("impl_module", impl_module.as_str()),
        ("command", ctx.command),
        ("struct_name", ctx.struct_name),
        ("members", members.as_str()),
        ("help_literal", help_literal.as_str()),
        ("command_literal", command_literal.as_str()),
        ("registrations", registrations.as_str()),
        ("readers", readers.as_str()),
        ("required_checks", required_checks.as_str()),
        ("option_checks", option_checks.as_str()),
    ])?;

    let stub = TEMPLATES.stub.render(&[
        ("command", ctx.command),
        ("struct_name", ctx.struct_name),
        ("command_literal", command_literal.as_str()),
    ])?;

    let package_literal = literal(&package_name(ctx.command));
    let bin_path_literal = literal(ctx.bin_path);
    let manifest = TEMPLATES.manifest.render(&[
        ("package_literal", package_literal.as_str()),
        ("bin_path_literal", bin_path_literal.as_str()),
    ])?;

    Ok(EmittedCommand {
        impl_module,
        front_end,
        stub,
        manifest,
    })
}

/// Module name of the implementation stub for `command`.
#[must_use]
pub fn impl_module_name(command: &str) -> String {
    format!("{}_impl", command.to_snake_case())
}

/// Package name of the generated crate for `command`.
#[must_use]
pub fn package_name(command: &str) -> String {
    command.to_kebab_case()
}

fn supported_fields(fields: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
    fields
        .iter()
        .filter(|field| field.kind.is_supported())
        .collect()
}

/// Rust string literal for `text`.
pub(crate) fn literal(text: &str) -> String {
    format!("{text:?}")
}
