//! Outline-numbered paragraphs rewritten into headings.
//!
//! A paragraph whose raw source opens with a dotted numeric prefix, such
//! as `2.3 Setup`, becomes a heading: the prefix is the id, the segment
//! count is the level, and the text re-joins prefix and title with a
//! single space. The rest of the paragraph is dropped with it.

use std::sync::OnceLock;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Tag, TagEnd};
use regex::Regex;

static OUTLINE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn outline_pattern() -> &'static Regex {
    OUTLINE_PATTERN
        .get_or_init(|| Regex::new(r"^(\d+(?:\.\d+)*)\s+(\S.*)").expect("Invalid outline regex"))
}

/// A heading synthesized from an outline-numbered paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutlineHeading {
    pub id: String,
    pub level: HeadingLevel,
    pub text: String,
}

impl OutlineHeading {
    /// The events that replace the swallowed paragraph.
    pub(crate) fn into_events<'a>(self) -> [Event<'a>; 3] {
        [
            Event::Start(Tag::Heading {
                level: self.level,
                id: Some(CowStr::from(self.id)),
                classes: Vec::new(),
                attrs: Vec::new(),
            }),
            Event::Text(CowStr::from(self.text)),
            Event::End(TagEnd::Heading(self.level)),
        ]
    }
}

/// Match a paragraph's raw source against the outline prefix form.
pub(crate) fn match_outline(raw: &str) -> Option<OutlineHeading> {
    let caps = outline_pattern().captures(raw)?;
    let id = caps.get(1)?.as_str();
    let title = caps.get(2)?.as_str().trim_end();
    Some(OutlineHeading {
        id: id.to_string(),
        level: heading_level(id.split('.').count()),
        text: format!("{id} {title}"),
    })
}

/// Dot-segment count to heading level, clamped to the deepest level HTML
/// has.
fn heading_level(segments: usize) -> HeadingLevel {
    match segments {
        1 => HeadingLevel::H1,
        2 => HeadingLevel::H2,
        3 => HeadingLevel::H3,
        4 => HeadingLevel::H4,
        5 => HeadingLevel::H5,
        _ => HeadingLevel::H6,
    }
}
