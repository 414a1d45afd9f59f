//! Inline code spans resolved by their source text.
//!
//! A language marker renders a highlightable code span; a leading sigil
//! makes an anchor or a link to one; anything else is looked up in the
//! conversion's variables and falls through to itself on a miss.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::convert::Variables;

/// Resolve the source of one backtick span to HTML.
pub(crate) fn resolve(source: &str, variables: &Variables) -> String {
    if let Some((language, body)) = split_language(source) {
        return format!(
            "<code class=\"block language-{}\">{}</code>",
            encode_double_quoted_attribute(language),
            encode_text(body)
        );
    }
    if let Some(name) = source.strip_prefix('#') {
        return format!(
            "<span id=\"{}\">{}</span>",
            encode_double_quoted_attribute(name),
            encode_text(name)
        );
    }
    if let Some(name) = source.strip_prefix('-') {
        return format!(
            "<a href=\"#{}\">{}</a>",
            encode_double_quoted_attribute(name),
            encode_text(name)
        );
    }
    let value = variables.get(source).map(String::as_str).unwrap_or(source);
    format!("<code id=\"block\">{}</code>", encode_text(value))
}

/// Split a `#!LANG CODE` or `:::LANG CODE` span into language and code.
fn split_language(source: &str) -> Option<(&str, &str)> {
    let rest = source
        .strip_prefix("#!")
        .or_else(|| source.strip_prefix(":::"))?;
    let (language, body) = rest.split_once(char::is_whitespace)?;
    let body = body.trim_start();
    if language.is_empty() || body.is_empty() {
        return None;
    }
    Some((language, body))
}
