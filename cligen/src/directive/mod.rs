//! Directive parsing for field annotations.
//!
//! The `cli` entry of a field's annotation holds a comma-separated directive
//! list: the first token renames the flag, and each later token is one of
//!
//! - a single character: short flag,
//! - `default:<text>`: default literal, kept verbatim,
//! - `required`: reject the zero value at runtime,
//! - `options:a|b|c`: allowed values in order,
//! - `usage:<text>`: per-flag help.
//!
//! Parsing never fails. Tokens that match no directive come back as
//! [`DirectiveToken::Unrecognized`] so the caller can choose how loud to be
//! about them. When a directive repeats, the last occurrence wins.

mod tag;

pub use tag::lookup_tag;

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::error::CligenError;
use crate::extract::FieldDeclaration;

/// Annotation key holding the directive list.
pub const DIRECTIVE_KEY: &str = "cli";

const DEFAULT_PREFIX: &str = "default:";
const OPTIONS_PREFIX: &str = "options:";
const USAGE_PREFIX: &str = "usage:";
const REQUIRED: &str = "required";

/// One recognised directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Single-character short flag.
    ShortFlag(char),
    /// Default literal.
    Default(String),
    /// Zero value is rejected.
    Required,
    /// Allowed values in order.
    Options(Vec<String>),
    /// Help text.
    Usage(String),
}

/// Classification result for one token after the flag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveToken {
    /// The token is a known directive.
    Recognized(Directive),
    /// The token matches no directive; holds the trimmed text.
    Unrecognized(String),
}

/// What to do with unrecognised directive tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownDirectivePolicy {
    /// Drop them silently.
    Ignore,
    /// Log a warning for each and continue.
    #[default]
    Warn,
    /// Fail the run on the first one.
    Deny,
}

/// Result of parsing one field's annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedField {
    /// Resolved descriptor.
    pub descriptor: FieldDescriptor,
    /// Tokens that matched no directive, in order.
    pub unrecognized: Vec<String>,
}

impl ParsedField {
    /// Applies `policy` to the unrecognised tokens and returns the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`CligenError::UnrecognizedDirective`] under
    /// [`UnknownDirectivePolicy::Deny`] when any token was not recognised.
    pub fn resolve(self, policy: UnknownDirectivePolicy) -> Result<FieldDescriptor, CligenError> {
        match policy {
            UnknownDirectivePolicy::Ignore => {}
            UnknownDirectivePolicy::Warn => {
                for token in &self.unrecognized {
                    tracing::warn!(
                        field = %self.descriptor.name,
                        token = %token,
                        "ignoring unrecognised directive"
                    );
                }
            }
            UnknownDirectivePolicy::Deny => {
                if let Some(token) = self.unrecognized.into_iter().next() {
                    return Err(CligenError::UnrecognizedDirective {
                        field: self.descriptor.name,
                        token,
                    });
                }
            }
        }
        Ok(self.descriptor)
    }
}

/// Parses a field's annotation into a descriptor.
#[must_use]
pub fn parse_field(field: &FieldDeclaration) -> ParsedField {
    let kind = FieldKind::from_declared(&field.declared_type);
    let mut descriptor = FieldDescriptor::new(&field.name, kind);
    descriptor.cli_name = field.flag_name.to_lowercase();
    let mut unrecognized = Vec::new();

    let Some(value) = lookup_tag(&field.annotation, DIRECTIVE_KEY).filter(|v| !v.is_empty())
    else {
        return ParsedField {
            descriptor,
            unrecognized,
        };
    };

    let mut tokens = value.split(',').map(str::trim);
    if let Some(flag_name) = tokens.next().filter(|name| !name.is_empty()) {
        flag_name.clone_into(&mut descriptor.cli_name);
    }

    for token in tokens.filter(|token| !token.is_empty()) {
        match classify(token) {
            DirectiveToken::Recognized(directive) => apply(&mut descriptor, directive),
            DirectiveToken::Unrecognized(text) => unrecognized.push(text),
        }
    }

    ParsedField {
        descriptor,
        unrecognized,
    }
}

/// Classifies one trimmed token that follows the flag name.
#[must_use]
pub fn classify(token: &str) -> DirectiveToken {
    let mut chars = token.chars();
    if let (Some(short), None) = (chars.next(), chars.next()) {
        return DirectiveToken::Recognized(Directive::ShortFlag(short));
    }
    let directive = if let Some(default) = token.strip_prefix(DEFAULT_PREFIX) {
        Directive::Default(default.to_owned())
    } else if token == REQUIRED {
        Directive::Required
    } else if let Some(options) = token.strip_prefix(OPTIONS_PREFIX) {
        Directive::Options(options.split('|').map(str::to_owned).collect())
    } else if let Some(usage) = token.strip_prefix(USAGE_PREFIX) {
        Directive::Usage(usage.to_owned())
    } else {
        return DirectiveToken::Unrecognized(token.to_owned());
    };
    DirectiveToken::Recognized(directive)
}

fn apply(descriptor: &mut FieldDescriptor, directive: Directive) {
    match directive {
        Directive::ShortFlag(short) => descriptor.short = Some(short),
        Directive::Default(default) => descriptor.default = Some(default),
        Directive::Required => descriptor.required = true,
        Directive::Options(options) => descriptor.options = Some(options),
        Directive::Usage(usage) => descriptor.help = Some(usage),
    }
}
