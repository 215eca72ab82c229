//! Canonical field descriptors consumed by the emitter.

use crate::extract::DeclaredType;

/// Primitive integer types accepted for integer flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerType {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `usize`
    Usize,
}

impl IntegerType {
    /// Maps a type identifier onto an integer type.
    ///
    /// `int` is accepted as an alias for `i64`.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        let ty = match ident {
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" | "int" => Self::I64,
            "i128" => Self::I128,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "usize" => Self::Usize,
            _ => return None,
        };
        Some(ty)
    }

    /// Rust spelling of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
        }
    }
}

/// Semantic type of a field; each supported kind owns one registration
/// strategy in the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `String`
    String,
    /// Any primitive integer.
    Integer(IntegerType),
    /// `bool`
    Boolean,
    /// `Vec<String>`
    StringList,
    /// Anything else; no flag is generated.
    Unknown,
}

impl FieldKind {
    /// Classifies a declared type.
    #[must_use]
    pub fn from_declared(ty: &DeclaredType) -> Self {
        match ty {
            DeclaredType::Named(name) => match name.as_str() {
                "String" => Self::String,
                "bool" => Self::Boolean,
                other => IntegerType::from_ident(other).map_or(Self::Unknown, Self::Integer),
            },
            DeclaredType::List(inner) if inner.as_named() == Some("String") => Self::StringList,
            _ => Self::Unknown,
        }
    }

    /// Whether a flag can be generated for this kind.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Rust type of the generated record member, if supported.
    #[must_use]
    pub const fn rust_type(self) -> Option<&'static str> {
        match self {
            Self::String => Some("String"),
            Self::Integer(int) => Some(int.as_str()),
            Self::Boolean => Some("bool"),
            Self::StringList => Some("Vec<String>"),
            Self::Unknown => None,
        }
    }

    /// Expression testing `value` against the kind's zero value.
    #[must_use]
    pub fn zero_check(self, value: &str) -> Option<String> {
        match self {
            Self::String | Self::StringList => Some(format!("{value}.is_empty()")),
            Self::Integer(_) => Some(format!("{value} == 0")),
            Self::Boolean => Some(format!("!{value}")),
            Self::Unknown => None,
        }
    }
}

/// Directive-resolved description of one argument field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field identifier in the declaration.
    pub name: String,
    /// Semantic type.
    pub kind: FieldKind,
    /// Long flag name, without leading dashes.
    pub cli_name: String,
    /// Single-character short flag.
    pub short: Option<char>,
    /// Default literal, verbatim.
    pub default: Option<String>,
    /// Whether the zero value is rejected at runtime.
    pub required: bool,
    /// Allowed values in declaration order.
    pub options: Option<Vec<String>>,
    /// Per-flag help text.
    pub help: Option<String>,
}

impl FieldDescriptor {
    /// Creates a descriptor carrying only the default flag name.
    #[must_use]
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            cli_name: name.to_lowercase(),
            short: None,
            default: None,
            required: false,
            options: None,
            help: None,
        }
    }

    /// Allowed values that the emitter enforces.
    ///
    /// Only string fields honour allowed values.
    #[must_use]
    pub fn enforced_options(&self) -> Option<&[String]> {
        match (self.kind, &self.options) {
            (FieldKind::String, Some(options)) => Some(options),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for field kinds.

    use super::*;
    use rstest::rstest;

    fn named(name: &str) -> DeclaredType {
        DeclaredType::Named(name.to_owned())
    }

    #[rstest]
    #[case::string(named("String"), FieldKind::String)]
    #[case::int_alias(named("int"), FieldKind::Integer(IntegerType::I64))]
    #[case::unsigned(named("u16"), FieldKind::Integer(IntegerType::U16))]
    #[case::boolean(named("bool"), FieldKind::Boolean)]
    #[case::string_list(DeclaredType::List(Box::new(named("String"))), FieldKind::StringList)]
    #[case::int_list(DeclaredType::List(Box::new(named("i64"))), FieldKind::Unknown)]
    #[case::optional(DeclaredType::Optional(Box::new(named("String"))), FieldKind::Unknown)]
    #[case::float(named("f64"), FieldKind::Unknown)]
    #[case::unknown(DeclaredType::Unknown, FieldKind::Unknown)]
    fn classifies_declared_types(#[case] ty: DeclaredType, #[case] expected: FieldKind) {
        assert_eq!(FieldKind::from_declared(&ty), expected);
    }

    #[rstest]
    #[case::string(FieldKind::String, "args.env.is_empty()")]
    #[case::integer(FieldKind::Integer(IntegerType::I64), "args.env == 0")]
    #[case::boolean(FieldKind::Boolean, "!args.env")]
    #[case::list(FieldKind::StringList, "args.env.is_empty()")]
    fn zero_checks_match_kind(#[case] kind: FieldKind, #[case] expected: &str) {
        assert_eq!(kind.zero_check("args.env").as_deref(), Some(expected));
    }

    #[rstest]
    fn default_descriptor_lowercases_name() {
        let descriptor = FieldDescriptor::new("LogLevel", FieldKind::String);
        assert_eq!(descriptor.cli_name, "loglevel");
        assert!(descriptor.short.is_none());
        assert!(!descriptor.required);
    }

    #[rstest]
    fn options_are_enforced_only_for_strings() {
        let mut descriptor = FieldDescriptor::new("level", FieldKind::Integer(IntegerType::U8));
        descriptor.options = Some(vec!["1".to_owned(), "2".to_owned()]);
        assert!(descriptor.enforced_options().is_none());
        descriptor.kind = FieldKind::String;
        assert_eq!(descriptor.enforced_options().map(<[String]>::len), Some(2));
    }
}
