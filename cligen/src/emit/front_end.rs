//! Per-field fragments of the generated front end.
//!
//! Every builder walks the supported descriptors in declaration order, so
//! identical input always yields identical text.

use std::fmt::Write as _;

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::error::CligenError;

use super::literal;

const RENDER_ERR: CligenError = CligenError::Render("front end");

/// Record members, one line per field.
pub(super) fn members(fields: &[&FieldDescriptor]) -> Result<String, CligenError> {
    let mut out = String::new();
    for field in fields {
        let Some(rust_type) = field.kind.rust_type() else {
            continue;
        };
        writeln!(out, "    pub {}: {rust_type},", field.name).map_err(|_| RENDER_ERR)?;
    }
    Ok(out)
}

/// One `.arg(...)` registration per field, chosen by kind.
pub(super) fn registrations(fields: &[&FieldDescriptor]) -> Result<String, CligenError> {
    let mut out = String::new();
    for field in fields {
        write_registration(&mut out, field).map_err(|_| RENDER_ERR)?;
    }
    Ok(out)
}

fn write_registration(out: &mut String, field: &FieldDescriptor) -> std::fmt::Result {
    let name = literal(&field.cli_name);
    out.push_str("        .arg(\n");
    writeln!(out, "            Arg::new({name})")?;
    writeln!(out, "                .long({name})")?;
    if let Some(short) = field.short {
        writeln!(out, "                .short({short:?})")?;
    }
    match field.kind {
        FieldKind::String => {
            out.push_str("                .value_parser(clap::value_parser!(String))\n");
            write_default(out, field.default.as_deref())?;
        }
        FieldKind::Integer(int) => {
            writeln!(
                out,
                "                .value_parser(clap::value_parser!({}))",
                int.as_str()
            )?;
            write_default(out, field.default.as_deref())?;
        }
        FieldKind::Boolean => {
            out.push_str("                .num_args(0..=1)\n");
            out.push_str("                .require_equals(true)\n");
            out.push_str("                .default_missing_value(\"true\")\n");
            out.push_str("                .value_parser(clap::value_parser!(bool))\n");
            write_default(out, Some(field.default.as_deref().unwrap_or("false")))?;
        }
        FieldKind::StringList => {
            out.push_str("                .action(clap::ArgAction::Append)\n");
            out.push_str("                .value_delimiter(',')\n");
            out.push_str("                .value_parser(clap::value_parser!(String))\n");
            write_default(out, field.default.as_deref())?;
        }
        FieldKind::Unknown => {}
    }
    if let Some(help) = &field.help {
        writeln!(out, "                .help({})", literal(help))?;
    }
    out.push_str("        )\n");
    Ok(())
}

fn write_default(out: &mut String, default: Option<&str>) -> std::fmt::Result {
    match default {
        Some(value) => writeln!(out, "                .default_value({})", literal(value)),
        None => Ok(()),
    }
}

/// Struct-literal lines reading each field back from the matches.
pub(super) fn readers(fields: &[&FieldDescriptor]) -> Result<String, CligenError> {
    let mut out = String::new();
    for field in fields {
        let id = literal(&field.cli_name);
        let line = match field.kind {
            FieldKind::String => format!(
                "        {}: matches.get_one::<String>({id}).cloned().unwrap_or_default(),",
                field.name
            ),
            FieldKind::Integer(int) => format!(
                "        {}: matches.get_one::<{}>({id}).copied().unwrap_or_default(),",
                field.name,
                int.as_str()
            ),
            FieldKind::Boolean => format!(
                "        {}: matches.get_one::<bool>({id}).copied().unwrap_or_default(),",
                field.name
            ),
            FieldKind::StringList => format!(
                concat!(
                    "        {}: matches\n",
                    "            .get_many::<String>({})\n",
                    "            .map(|values| values.cloned().collect())\n",
                    "            .unwrap_or_default(),"
                ),
                field.name, id
            ),
            FieldKind::Unknown => continue,
        };
        writeln!(out, "{line}").map_err(|_| RENDER_ERR)?;
    }
    Ok(out)
}

/// Zero-value checks for required fields.
pub(super) fn required_checks(fields: &[&FieldDescriptor]) -> Result<String, CligenError> {
    let mut out = String::new();
    for field in fields.iter().filter(|field| field.required) {
        let Some(check) = field.kind.zero_check(&format!("args.{}", field.name)) else {
            continue;
        };
        let message = literal(&format!("--{} is required", field.cli_name));
        write!(
            out,
            concat!(
                "\n",
                "    if {check} {{\n",
                "        fail(&mut cmd, {message});\n",
                "    }}\n"
            ),
            check = check,
            message = message,
        )
        .map_err(|_| RENDER_ERR)?;
    }
    Ok(out)
}

/// Membership checks for string fields with allowed values.
///
/// An empty value is not checked; `required` covers that case.
pub(super) fn option_checks(fields: &[&FieldDescriptor]) -> Result<String, CligenError> {
    let mut out = String::new();
    for field in fields {
        let Some(options) = field.enforced_options() else {
            continue;
        };
        let allowed = options
            .iter()
            .map(|value| literal(value))
            .collect::<Vec<_>>()
            .join(", ");
        let message = literal(&format!(
            "invalid value for --{}: must be one of [{}]",
            field.cli_name,
            options.join(", ")
        ));
        write!(
            out,
            concat!(
                "\n",
                "    if !args.{name}.is_empty() && ![{allowed}].contains(&args.{name}.as_str()) {{\n",
                "        fail(&mut cmd, {message});\n",
                "    }}\n"
            ),
            name = field.name,
            allowed = allowed,
            message = message,
        )
        .map_err(|_| RENDER_ERR)?;
    }
    Ok(out)
}
