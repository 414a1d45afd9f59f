//! Block-stage rewriting of the host event stream.
//!
//! One pass over the parsed events: paragraphs opening with an outline
//! prefix become headings, fences named in the routing table are rendered
//! by their formatter, and a leading metadata block is collected instead
//! of emitted.

pub mod dialogue;
pub mod fence;
pub mod metadata;
pub mod outline;

use std::mem;
use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};

use crate::convert::Metadata;
use fence::FenceRule;

pub(crate) struct BlockStage<'a, 'd> {
    source: &'a str,
    fences: &'d [FenceRule],
    out: Vec<Event<'a>>,
    metadata: Metadata,
    mode: Mode,
}

enum Mode {
    /// Pass events through, watching for blocks the dialect claims.
    Copy,
    /// Swallow the remainder of a paragraph replaced by a heading.
    DropParagraph,
    /// Accumulate the body of a claimed fence.
    Fence {
        format: fn(&str, &str) -> String,
        argument: String,
        body: String,
    },
    /// Accumulate the lines of a metadata block.
    Metadata { body: String },
}

impl<'a, 'd> BlockStage<'a, 'd> {
    pub(crate) fn new(source: &'a str, fences: &'d [FenceRule]) -> Self {
        Self {
            source,
            fences,
            out: Vec::new(),
            metadata: Metadata::new(),
            mode: Mode::Copy,
        }
    }

    pub(crate) fn push(&mut self, event: Event<'a>, range: Range<usize>) {
        match &mut self.mode {
            Mode::Copy => self.scan(event, range),
            Mode::DropParagraph => {
                if matches!(event, Event::End(TagEnd::Paragraph)) {
                    self.mode = Mode::Copy;
                }
            }
            Mode::Fence { body, .. } => match event {
                Event::Text(text) => body.push_str(&text),
                Event::End(TagEnd::CodeBlock) => {
                    let Mode::Fence {
                        format,
                        argument,
                        body,
                    } = mem::replace(&mut self.mode, Mode::Copy)
                    else {
                        return;
                    };
                    self.out
                        .push(Event::Html(CowStr::from(format(&body, &argument))));
                }
                // Fenced bodies only carry text events.
                _ => {}
            },
            Mode::Metadata { body } => match event {
                Event::Text(text) => body.push_str(&text),
                Event::End(TagEnd::MetadataBlock(_)) => {
                    let Mode::Metadata { body } = mem::replace(&mut self.mode, Mode::Copy) else {
                        return;
                    };
                    self.metadata = metadata::parse(&body);
                }
                _ => {}
            },
        }
    }

    fn scan(&mut self, event: Event<'a>, range: Range<usize>) {
        match &event {
            Event::Start(Tag::Paragraph) => {
                if let Some(heading) = outline::match_outline(&self.source[range]) {
                    self.out.extend(heading.into_events());
                    self.mode = Mode::DropParagraph;
                    return;
                }
            }
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                if let Some((rule, argument)) = fence::lookup(self.fences, info) {
                    self.mode = Mode::Fence {
                        format: rule.format,
                        argument,
                        body: String::new(),
                    };
                    return;
                }
            }
            Event::Start(Tag::MetadataBlock(_)) => {
                self.mode = Mode::Metadata {
                    body: String::new(),
                };
                return;
            }
            _ => {}
        }
        self.out.push(event);
    }

    pub(crate) fn finish(self) -> (Vec<Event<'a>>, Metadata) {
        (self.out, self.metadata)
    }
}
