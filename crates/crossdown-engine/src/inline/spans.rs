//! Declarative inline span rules.
//!
//! A rule couples a compiled pattern with a result shape and a priority.
//! Rules run in descending priority over the plain text between other
//! inline constructs; text a rule has claimed is opaque to every rule
//! after it.

use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{CowStr, Event};
use regex::{Captures, Regex};
use thiserror::Error;

/// Where a tagged rule's attribute value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A capture group of the rule's pattern.
    Capture(usize),
    /// A fixed string.
    Literal(String),
}

impl Default for AttrValue {
    /// Capture group 2, the conventional value group.
    fn default() -> Self {
        AttrValue::Capture(2)
    }
}

/// The HTML a rule produces for a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanShape {
    /// `<tag>capture 1</tag>`
    Simple { tag: String },
    /// `<outer>capture 1<inner>capture 2</inner></outer>`
    Nest { outer: String, inner: String },
    /// `<tag attr="value">capture 1</tag>`
    Tagged {
        tag: String,
        attr: String,
        value: AttrValue,
    },
}

#[derive(Debug, Error)]
pub enum SpanRuleError {
    #[error("invalid span pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// One inline rule: pattern, result shape, and priority.
#[derive(Debug, Clone)]
pub struct SpanRule {
    priority: i32,
    pattern: Regex,
    shape: SpanShape,
}

impl SpanRule {
    pub fn new(pattern: &str, priority: i32, shape: SpanShape) -> Result<Self, SpanRuleError> {
        let compiled = Regex::new(pattern).map_err(|source| SpanRuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            priority,
            pattern: compiled,
            shape,
        })
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }
}

/// The built-in rules, ordered by descending priority.
pub(crate) fn builtin_rules() -> Vec<SpanRule> {
    vec![
        // [VISIBLE]-(HIDDEN): hover text. Outranks the gloss rule.
        SpanRule::new(
            r"\[(.*?)\]-\((.*?)\)",
            180,
            SpanShape::Tagged {
                tag: "span".to_string(),
                attr: "title".to_string(),
                value: AttrValue::default(),
            },
        )
        .expect("Invalid hover span pattern"),
        // [BASE]^(ANNOTATION): ruby gloss.
        SpanRule::new(
            r"\[(.*?)\]\^\((.*?)\)",
            179,
            SpanShape::Nest {
                outer: "ruby".to_string(),
                inner: "rt".to_string(),
            },
        )
        .expect("Invalid gloss span pattern"),
    ]
}

enum Piece {
    Plain(String),
    Markup(String),
}

/// Apply every rule to one run of plain text, pushing text and inline
/// HTML events in order.
pub(crate) fn apply<'a>(rules: &[SpanRule], text: &str, out: &mut Vec<Event<'a>>) {
    let mut pieces = vec![Piece::Plain(text.to_string())];
    for rule in rules {
        let mut next = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match piece {
                Piece::Plain(plain) => split_matches(rule, plain, &mut next),
                markup => next.push(markup),
            }
        }
        pieces = next;
    }
    for piece in pieces {
        out.push(match piece {
            Piece::Plain(plain) => Event::Text(CowStr::from(plain)),
            Piece::Markup(markup) => Event::InlineHtml(CowStr::from(markup)),
        });
    }
}

/// Split one plain piece around a rule's accepted matches.
///
/// A rule consumes exactly its match span. A declined match (a capture
/// group the shape needs is absent) leaves the text in place and the scan
/// resumes one character past the match start.
fn split_matches(rule: &SpanRule, plain: String, out: &mut Vec<Piece>) {
    let mut consumed = 0;
    let mut from = 0;
    while from <= plain.len() {
        let Some(caps) = rule.pattern.captures_at(&plain, from) else {
            break;
        };
        let Some(matched) = caps.get(0) else {
            break;
        };
        match render(&rule.shape, &caps) {
            Some(markup) => {
                if matched.start() > consumed {
                    out.push(Piece::Plain(plain[consumed..matched.start()].to_string()));
                }
                out.push(Piece::Markup(markup));
                consumed = matched.end();
                from = if matched.end() > matched.start() {
                    matched.end()
                } else {
                    next_char_boundary(&plain, matched.end())
                };
            }
            None => from = next_char_boundary(&plain, matched.start()),
        }
    }
    if consumed < plain.len() {
        out.push(Piece::Plain(plain[consumed..].to_string()));
    }
}

fn next_char_boundary(s: &str, index: usize) -> usize {
    let mut next = index + 1;
    while next < s.len() && !s.is_char_boundary(next) {
        next += 1;
    }
    next
}

fn render(shape: &SpanShape, caps: &Captures) -> Option<String> {
    match shape {
        SpanShape::Simple { tag } => {
            let text = caps.get(1)?.as_str();
            Some(format!("<{tag}>{}</{tag}>", encode_text(text)))
        }
        SpanShape::Nest { outer, inner } => {
            let text = caps.get(1)?.as_str();
            let nested = caps.get(2)?.as_str();
            Some(format!(
                "<{outer}>{}<{inner}>{}</{inner}></{outer}>",
                encode_text(text),
                encode_text(nested)
            ))
        }
        SpanShape::Tagged { tag, attr, value } => {
            let text = caps.get(1)?.as_str();
            let value = match value {
                AttrValue::Capture(group) => caps.get(*group)?.as_str().to_string(),
                AttrValue::Literal(literal) => literal.clone(),
            };
            Some(format!(
                "<{tag} {attr}=\"{}\">{}</{tag}>",
                encode_double_quoted_attribute(&value),
                encode_text(text)
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_to_string(rules: &[SpanRule], text: &str) -> String {
        let mut events = Vec::new();
        apply(rules, text, &mut events);
        events
            .into_iter()
            .map(|event| match event {
                Event::Text(text) => format!("T({text})"),
                Event::InlineHtml(html) => format!("H({html})"),
                other => panic!("unexpected event {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_hover_rule_produces_titled_span() {
        let rules = builtin_rules();
        assert_eq!(
            apply_to_string(&rules, "[team]-(the usual suspects)"),
            "H(<span title=\"the usual suspects\">team</span>)"
        );
    }

    #[test]
    fn test_gloss_rule_produces_ruby() {
        let rules = builtin_rules();
        assert_eq!(
            apply_to_string(&rules, "[日本]^(にほん)"),
            "H(<ruby>日本<rt>にほん</rt></ruby>)"
        );
    }

    #[test]
    fn test_rule_consumes_exactly_its_match() {
        let rules = builtin_rules();
        assert_eq!(
            apply_to_string(&rules, "pre [a]^(b) post"),
            "T(pre )H(<ruby>a<rt>b</rt></ruby>)T( post)"
        );
    }

    #[test]
    fn test_higher_priority_rule_claims_overlap() {
        // The hover match spans the gloss candidate entirely, so the
        // gloss rule never sees it.
        let rules = builtin_rules();
        assert_eq!(
            apply_to_string(&rules, "[a]^(x)]-(y)"),
            "H(<span title=\"y\">a]^(x)</span>)"
        );
    }

    #[test]
    fn test_produced_markup_is_opaque_to_later_rules() {
        let rules = builtin_rules();
        assert_eq!(
            apply_to_string(&rules, "[a]-(b) then [c]^(d)"),
            "H(<span title=\"b\">a</span>)T( then )H(<ruby>c<rt>d</rt></ruby>)"
        );
    }

    #[test]
    fn test_text_and_attribute_values_are_escaped() {
        let rules = builtin_rules();
        assert_eq!(
            apply_to_string(&rules, "[a<b]-(c\"d)"),
            "H(<span title=\"c&quot;d\">a&lt;b</span>)"
        );
    }

    #[test]
    fn test_rule_without_needed_capture_declines() {
        let rule = SpanRule::new(
            r"\{x\}",
            10,
            SpanShape::Simple {
                tag: "b".to_string(),
            },
        )
        .unwrap();
        assert_eq!(apply_to_string(&[rule], "a {x} b"), "T(a {x} b)");
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let result = SpanRule::new(
            r"([unclosed",
            10,
            SpanShape::Simple {
                tag: "b".to_string(),
            },
        );
        assert!(matches!(
            result,
            Err(SpanRuleError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_simple_shape_wraps_capture() {
        let rule = SpanRule::new(
            r"==(.+?)==",
            150,
            SpanShape::Simple {
                tag: "mark".to_string(),
            },
        )
        .unwrap();
        assert_eq!(
            apply_to_string(&[rule], "a ==hot== b"),
            "T(a )H(<mark>hot</mark>)T( b)"
        );
    }

    #[test]
    fn test_literal_attribute_value() {
        let rule = SpanRule::new(
            r"!!(.+?)!!",
            150,
            SpanShape::Tagged {
                tag: "span".to_string(),
                attr: "class".to_string(),
                value: AttrValue::Literal("alert".to_string()),
            },
        )
        .unwrap();
        assert_eq!(
            apply_to_string(&[rule], "!!now!!"),
            "H(<span class=\"alert\">now</span>)"
        );
    }

    #[test]
    fn test_multiple_matches_in_one_run() {
        let rules = builtin_rules();
        assert_eq!(
            apply_to_string(&rules, "[a]^(b) and [c]^(d)"),
            "H(<ruby>a<rt>b</rt></ruby>)T( and )H(<ruby>c<rt>d</rt></ruby>)"
        );
    }
}
