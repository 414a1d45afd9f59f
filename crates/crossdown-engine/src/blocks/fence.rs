//! Routing table for fence names the dialect claims.
//!
//! The first token of a fence info string is the name; the remainder is
//! handed to the formatter as an argument. Names not in the table fall
//! through to the host's ordinary code-block rendering.

use html_escape::encode_text;

use super::dialogue;

/// A claimed fence: its name and the formatter for its body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FenceRule {
    pub name: &'static str,
    pub format: fn(&str, &str) -> String,
}

pub(crate) fn builtin_fences() -> Vec<FenceRule> {
    vec![
        FenceRule {
            name: "dialogue",
            format: dialogue::render_block,
        },
        FenceRule {
            name: "mermaid",
            format: mermaid_block,
        },
    ]
}

/// Split an info string into name and argument and find the matching
/// rule.
pub(crate) fn lookup(fences: &[FenceRule], info: &str) -> Option<(FenceRule, String)> {
    let info = info.trim();
    let (name, argument) = match info.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (info, ""),
    };
    let rule = fences.iter().find(|rule| rule.name == name)?;
    Some((*rule, argument.to_string()))
}

/// Diagram source for client-side mermaid.js, untouched apart from HTML
/// escaping.
fn mermaid_block(body: &str, _argument: &str) -> String {
    format!(
        "<div class=\"mermaid\">{}</div>\n",
        encode_text(body.trim_end_matches('\n'))
    )
}
