//! Field metadata extraction.
//!
//! Walks a located declaration and yields one [`FieldDeclaration`] per named
//! field: its name, a shallow resolution of its declared type, and the raw
//! annotation string gathered from `#[tag = "..."]` / `#[tag("...")]`
//! attributes.

use std::fmt;

use syn::ext::IdentExt as _;
use syn::{Attribute, Expr, ExprLit, GenericArgument, Lit, LitStr, Meta, PathArguments, Type};

use crate::source::SourceDeclaration;

/// Attribute holding a field's annotation string.
pub const TAG_ATTRIBUTE: &str = "tag";

/// Declared field type, resolved only as far as flag generation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// A bare identifier such as `String` or `i64`.
    Named(String),
    /// `Vec<T>`, `[T; N]` or `[T]`.
    List(Box<DeclaredType>),
    /// `Option<T>`, `Box<T>`, `&T` or a raw pointer.
    Optional(Box<DeclaredType>),
    /// Any other shape; never becomes a flag.
    Unknown,
}

impl DeclaredType {
    /// Returns the identifier of a [`DeclaredType::Named`] type.
    #[must_use]
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "Vec<{inner}>"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::Unknown => f.write_str("_"),
        }
    }
}

/// One named field of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// Field identifier as written, keeping any `r#` prefix.
    pub name: String,
    /// Identifier without the `r#` prefix; the basis of the default flag.
    pub flag_name: String,
    /// Resolved declared type.
    pub declared_type: DeclaredType,
    /// Raw annotation text; empty when the field carries none.
    pub annotation: String,
}

/// Lists the named fields of `decl` in declaration order.
///
/// Tuple-struct fields have no name and cannot become flags, so they are
/// skipped.
#[must_use]
pub fn extract_fields(decl: &SourceDeclaration) -> Vec<FieldDeclaration> {
    decl.fields
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            Some(FieldDeclaration {
                name: ident.to_string(),
                flag_name: ident.unraw().to_string(),
                declared_type: resolve_type(&field.ty),
                annotation: raw_annotation(&field.attrs),
            })
        })
        .collect()
}

/// Resolves a `syn` type into a [`DeclaredType`].
#[must_use]
pub fn resolve_type(ty: &Type) -> DeclaredType {
    match ty {
        Type::Paren(paren) => resolve_type(&paren.elem),
        Type::Group(group) => resolve_type(&group.elem),
        Type::Reference(reference) => {
            DeclaredType::Optional(Box::new(resolve_type(&reference.elem)))
        }
        Type::Ptr(ptr) => DeclaredType::Optional(Box::new(resolve_type(&ptr.elem))),
        Type::Array(array) => DeclaredType::List(Box::new(resolve_type(&array.elem))),
        Type::Slice(slice) => DeclaredType::List(Box::new(resolve_type(&slice.elem))),
        Type::Path(path) if path.qself.is_none() => resolve_path(&path.path),
        _ => DeclaredType::Unknown,
    }
}

fn resolve_path(path: &syn::Path) -> DeclaredType {
    let Some(last) = path.segments.last() else {
        return DeclaredType::Unknown;
    };
    match &last.arguments {
        PathArguments::None => DeclaredType::Named(last.ident.to_string()),
        PathArguments::AngleBracketed(args) => {
            let mut types = args.args.iter().filter_map(|arg| match arg {
                GenericArgument::Type(inner) => Some(inner),
                _ => None,
            });
            let (Some(inner), None) = (types.next(), types.next()) else {
                return DeclaredType::Unknown;
            };
            if last.ident == "Vec" {
                DeclaredType::List(Box::new(resolve_type(inner)))
            } else if last.ident == "Option" || last.ident == "Box" {
                DeclaredType::Optional(Box::new(resolve_type(inner)))
            } else {
                DeclaredType::Unknown
            }
        }
        PathArguments::Parenthesized(_) => DeclaredType::Unknown,
    }
}

/// Joins the string values of every `tag` attribute with single spaces.
fn raw_annotation(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(TAG_ATTRIBUTE))
        .filter_map(tag_value)
        .collect::<Vec<_>>()
        .join(" ")
}

fn tag_value(attr: &Attribute) -> Option<String> {
    let value = match &attr.meta {
        Meta::NameValue(name_value) => match &name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => Some(lit.value()),
            _ => None,
        },
        Meta::List(_) => attr.parse_args::<LitStr>().ok().map(|lit| lit.value()),
        Meta::Path(_) => None,
    };
    if value.is_none() {
        tracing::warn!("ignoring #[tag] attribute without a string literal");
    }
    value
}
