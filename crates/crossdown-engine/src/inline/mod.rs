//! Inline-stage rewriting: span rules over plain text, and inline code
//! resolution.
//!
//! The host may split one literal run of text into several events around
//! brackets and other near-markup, so the stage buffers consecutive text
//! events and applies the span rules to the coalesced run. Inside code
//! blocks and raw HTML blocks everything passes through untouched.

pub mod code;
pub mod spans;

use std::mem;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

use crate::convert::Variables;
use spans::SpanRule;

pub(crate) struct InlineStage<'a, 'd> {
    rules: &'d [SpanRule],
    variables: &'d Variables,
    out: Vec<Event<'a>>,
    text: String,
    raw_depth: usize,
}

impl<'a, 'd> InlineStage<'a, 'd> {
    pub(crate) fn new(rules: &'d [SpanRule], variables: &'d Variables) -> Self {
        Self {
            rules,
            variables,
            out: Vec::new(),
            text: String::new(),
            raw_depth: 0,
        }
    }

    pub(crate) fn push(&mut self, event: Event<'a>) {
        match event {
            Event::Text(text) if self.raw_depth == 0 => self.text.push_str(&text),
            Event::Code(source) if self.raw_depth == 0 => {
                self.flush();
                let html = code::resolve(&source, self.variables);
                self.out.push(Event::InlineHtml(CowStr::from(html)));
            }
            event => {
                match &event {
                    Event::Start(Tag::CodeBlock(_)) | Event::Start(Tag::HtmlBlock) => {
                        self.raw_depth += 1;
                    }
                    Event::End(TagEnd::CodeBlock) | Event::End(TagEnd::HtmlBlock) => {
                        self.raw_depth = self.raw_depth.saturating_sub(1);
                    }
                    _ => {}
                }
                self.flush();
                self.out.push(event);
            }
        }
    }

    fn flush(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = mem::take(&mut self.text);
        spans::apply(self.rules, &text, &mut self.out);
    }

    pub(crate) fn finish(mut self) -> Vec<Event<'a>> {
        self.flush();
        self.out
    }
}
