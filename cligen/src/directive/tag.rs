//! `key:"value"` annotation lookup.
//!
//! An annotation is a whitespace-separated sequence of `key:"value"` pairs.
//! Keys contain no spaces, quotes, colons or control characters; values are
//! double-quoted and may escape characters with a backslash. Scanning stops
//! at the first malformed pair, so anything after it is invisible.

/// Returns the unquoted value stored under `key`, if present.
///
/// # Examples
///
/// ```
/// use cligen::directive::lookup_tag;
///
/// let tag = r#"json:"port" cli:"port,p,default:8080""#;
/// assert_eq!(lookup_tag(tag, "cli").as_deref(), Some("port,p,default:8080"));
/// assert_eq!(lookup_tag(tag, "yaml"), None);
/// ```
#[must_use]
pub fn lookup_tag(annotation: &str, key: &str) -> Option<String> {
    let mut rest = annotation;
    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return None;
        }

        let key_len = rest
            .char_indices()
            .find(|&(_, ch)| ch <= ' ' || ch == ':' || ch == '"' || ch == '\u{7f}')
            .map_or(rest.len(), |(idx, _)| idx);
        let (name, after_name) = rest.split_at(key_len);
        if name.is_empty() {
            return None;
        }
        let quoted = after_name.strip_prefix(':')?;
        let (raw_value, remainder) = split_quoted(quoted)?;
        rest = remainder;

        if name == key {
            return unquote(raw_value);
        }
    }
}

/// Splits a leading `"..."` from `input`, returning the inner text and the
/// remainder after the closing quote.
fn split_quoted(input: &str) -> Option<(&str, &str)> {
    let body = input.strip_prefix('"')?;
    let mut escaped = false;
    for (idx, ch) in body.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => {
                let (inner, closing) = body.split_at(idx);
                return Some((inner, closing.strip_prefix('"').unwrap_or(closing)));
            }
            _ => {}
        }
    }
    None
}

/// Resolves backslash escapes; an unknown escape invalidates the value.
fn unquote(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let escaped = match chars.next()? {
            '"' => '"',
            '\\' => '\\',
            '\'' => '\'',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    //! Unit tests for annotation lookup.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::single(r#"cli:"port,p""#, "cli", Some("port,p"))]
    #[case::second_pair(r#"json:"x" cli:"env""#, "cli", Some("env"))]
    #[case::leading_spaces(r#"   cli:"env""#, "cli", Some("env"))]
    #[case::escaped_quote(r#"cli:"usage:say \"hi\"""#, "cli", Some(r#"usage:say "hi""#))]
    #[case::empty_value(r#"cli:"""#, "cli", Some(""))]
    #[case::absent(r#"json:"x""#, "cli", None)]
    #[case::unquoted(r"cli:port", "cli", None)]
    #[case::unterminated(r#"cli:"port"#, "cli", None)]
    #[case::stops_at_malformed(r#"bad json:"x" cli:"env""#, "cli", None)]
    #[case::bad_escape(r#"cli:"a\qb""#, "cli", None)]
    #[case::empty("", "cli", None)]
    fn looks_up_values(#[case] tag: &str, #[case] key: &str, #[case] expected: Option<&str>) {
        assert_eq!(lookup_tag(tag, key).as_deref(), expected);
    }
}
