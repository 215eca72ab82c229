//! Declaration lookup for a command.
//!
//! A struct can name its command explicitly with
//! `#[cligen(command = "serve")]`. Without any matching marker the locator
//! falls back to the naming convention: the first struct, in source order,
//! whose identifier contains both the command name and `args`
//! (case-insensitively). Later candidates are never considered.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token, parenthesized};

use crate::error::CligenError;
use crate::source::SourceDeclaration;

/// Substring every convention-matched declaration must contain.
pub const ARGS_MARKER: &str = "args";

/// Attribute naming a struct's command explicitly.
pub const MARKER_ATTRIBUTE: &str = "cligen";

/// How a declaration was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Selected through `#[cligen(command = "...")]`.
    Marker,
    /// Selected through the `<command>` + `args` naming convention.
    Convention,
}

/// Returns the declaration generating `command`'s front end.
///
/// # Errors
///
/// Returns [`CligenError::InvalidMarker`] for a malformed marker and
/// [`CligenError::DeclarationNotFound`] when nothing qualifies.
pub fn locate<'a>(
    declarations: &'a [SourceDeclaration],
    command: &str,
) -> Result<(&'a SourceDeclaration, MatchKind), CligenError> {
    for decl in declarations {
        if let Some(marked) = command_marker(decl)?
            && marked.eq_ignore_ascii_case(command)
        {
            tracing::debug!(declaration = %decl.ident, "selected by marker");
            return Ok((decl, MatchKind::Marker));
        }
    }

    let found = declarations
        .iter()
        .find(|decl| matches_convention(&decl.ident, command))
        .ok_or_else(|| CligenError::DeclarationNotFound {
            command: command.to_owned(),
        })?;
    tracing::debug!(declaration = %found.ident, "selected by naming convention");
    Ok((found, MatchKind::Convention))
}

/// Tests the `<command>` + `args` naming convention.
#[must_use]
pub fn matches_convention(ident: &str, command: &str) -> bool {
    let ident = ident.to_lowercase();
    ident.contains(&command.to_lowercase()) && ident.contains(ARGS_MARKER)
}

/// Reads the command named by a declaration's `#[cligen(...)]` marker.
///
/// Unknown keys inside the marker are skipped so newer markers keep working
/// with older generators.
fn command_marker(decl: &SourceDeclaration) -> Result<Option<String>, CligenError> {
    let mut command = None;
    for attr in marker_attrs(&decl.attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("command") {
                let value: LitStr = meta.value()?.parse()?;
                command = Some(value.value());
                Ok(())
            } else {
                discard_unknown(&meta)
            }
        })
        .map_err(|err| CligenError::InvalidMarker {
            declaration: decl.ident.clone(),
            message: err.to_string(),
        })?;
    }
    Ok(command)
}

fn marker_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident(MARKER_ATTRIBUTE))
}

fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}
