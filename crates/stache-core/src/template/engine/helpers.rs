//! Helper functions for template rendering

use crate::config::consts::html::ENTITIES;
use crate::config::RenderConfig;
use crate::view::Value;

/// Escape the characters `& < > " ' / ` =` as HTML entities
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for chr in text.chars() {
        match ENTITIES.iter().find(|(special, _)| *special == chr) {
            Some((_, entity)) => escaped.push_str(entity),
            None => escaped.push(chr),
        }
    }
    escaped
}

/// Text for an escaped `{{name}}` interpolation.
///
/// Numbers skip escaping unless a custom escaper is configured.
pub(crate) fn escaped_value(value: Option<Value>, config: &RenderConfig) -> String {
    let value = match value {
        Some(value) if !value.is_null() => value,
        _ => return String::new(),
    };

    match (&value, &config.escape) {
        (_, Some(escape)) => escape(&value.to_string()),
        (Value::Number(_), None) => value.to_string(),
        (_, None) => escape_html(&value.to_string()),
    }
}

/// Text for an unescaped `{{&name}}` or `{{{name}}}` interpolation
pub(crate) fn raw_value(value: Option<Value>) -> String {
    match value {
        Some(value) if !value.is_null() => value.to_string(),
        _ => String::new(),
    }
}

/// Prefix every non-empty line of a partial with the tag's indentation.
///
/// Only spaces and tabs of `indentation` are kept. When text preceded the
/// tag on its line the first line is left alone, since it continues that
/// line.
pub(crate) fn indent_partial(partial: &str, indentation: &str, line_has_non_space: bool) -> String {
    let prefix: String = indentation
        .chars()
        .filter(|chr| *chr == ' ' || *chr == '\t')
        .collect();

    partial
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            if !line.is_empty() && (index > 0 || !line_has_non_space) {
                format!("{prefix}{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
