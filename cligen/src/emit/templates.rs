//! Template bodies for generated files.
//!
//! Templates are embedded at build time and compiled once into
//! [`TEMPLATES`], which stays read-only for the life of the process. A
//! template is plain text with `{{slot}}` placeholders; rendering substitutes
//! every slot and fails if a slot has no value.

use std::sync::LazyLock;

use crate::error::CligenError;

/// Compiled template set shared by every emission.
pub static TEMPLATES: LazyLock<Templates> = LazyLock::new(Templates::load);

/// The three file templates the emitter renders.
#[derive(Debug)]
pub struct Templates {
    /// Generated `main.rs` skeleton.
    pub front_end: Template,
    /// One-time implementation stub.
    pub stub: Template,
    /// Crate manifest.
    pub manifest: Template,
}

impl Templates {
    fn load() -> Self {
        Self {
            front_end: Template::compile(
                "front end",
                include_str!("../../templates/front_end.rs.tmpl"),
            ),
            stub: Template::compile(
                "implementation stub",
                include_str!("../../templates/impl.rs.tmpl"),
            ),
            manifest: Template::compile(
                "manifest",
                include_str!("../../templates/manifest.toml.tmpl"),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Text(&'static str),
    Slot(&'static str),
}

/// A template split into literal text and named slots.
#[derive(Debug)]
pub struct Template {
    name: &'static str,
    segments: Vec<Segment>,
}

impl Template {
    /// Splits `body` at `{{slot}}` markers. An unterminated `{{` is kept as
    /// text.
    #[must_use]
    pub fn compile(name: &'static str, body: &'static str) -> Self {
        let mut segments = Vec::new();
        let mut rest = body;
        while let Some(open) = rest.find("{{") {
            let (text, tail) = rest.split_at(open);
            let Some(close) = tail.find("}}") else {
                break;
            };
            let (marker, after) = tail.split_at(close);
            if !text.is_empty() {
                segments.push(Segment::Text(text));
            }
            let slot = marker.strip_prefix("{{").unwrap_or(marker).trim();
            segments.push(Segment::Slot(slot));
            rest = after.strip_prefix("}}").unwrap_or(after);
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest));
        }
        Self { name, segments }
    }

    /// Substitutes `values` into the template.
    ///
    /// # Errors
    ///
    /// Returns [`CligenError::Render`] when a slot has no value.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, CligenError> {
        let mut out = String::with_capacity(4096);
        for segment in &self.segments {
            match *segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => {
                    let (_, value) = values
                        .iter()
                        .find(|(key, _)| *key == slot)
                        .ok_or(CligenError::Render(self.name))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}
