//! Dialect registry and the conversion entry point.
//!
//! A [`Dialect`] is the explicit configuration object: the host parser
//! options, the compiled span rules, and the fence routing table. Build one
//! at startup and pass it by reference; conversion itself is pure and keeps
//! no state between calls.

use std::collections::{BTreeMap, HashMap};

use pulldown_cmark::{Options, Parser, html};

use crate::blocks::BlockStage;
use crate::blocks::fence::{self, FenceRule};
use crate::inline::InlineStage;
use crate::inline::spans::{self, SpanRule};

/// Variable bindings consulted when a bare inline code span is resolved.
pub type Variables = HashMap<String, String>;

/// Front-matter entries: lowercased key to one or more values.
pub type Metadata = BTreeMap<String, Vec<String>>;

/// The outcome of converting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// The final HTML.
    pub html: String,
    /// Entries collected from a leading metadata block, if any.
    pub metadata: Metadata,
}

/// Dialect configuration: host options, span rules, and claimed fences.
#[derive(Debug, Clone)]
pub struct Dialect {
    options: Options,
    span_rules: Vec<SpanRule>,
    fences: Vec<FenceRule>,
}

impl Dialect {
    /// Build the built-in dialect configuration.
    pub fn new() -> Self {
        Self {
            options: host_options(),
            span_rules: spans::builtin_rules(),
            fences: fence::builtin_fences(),
        }
    }

    /// Add a span rule, keeping the rule list ordered by descending
    /// priority. Earlier-registered rules win ties.
    pub fn with_span_rule(mut self, rule: SpanRule) -> Self {
        self.span_rules.push(rule);
        self.span_rules
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
        self
    }

    /// Convert one document to HTML, resolving bare inline code spans
    /// against `variables`.
    pub fn convert(&self, text: &str, variables: &Variables) -> Rendered {
        let parser = Parser::new_ext(text, self.options);

        let mut block_stage = BlockStage::new(text, &self.fences);
        for (event, range) in parser.into_offset_iter() {
            block_stage.push(event, range);
        }
        let (events, metadata) = block_stage.finish();

        let mut inline_stage = InlineStage::new(&self.span_rules, variables);
        for event in events {
            inline_stage.push(event);
        }
        let events = inline_stage.finish();

        let mut html = String::new();
        html::push_html(&mut html, events.into_iter());
        Rendered { html, metadata }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert with a freshly built default [`Dialect`]. Callers converting
/// repeatedly should construct the dialect once and reuse it.
pub fn convert(text: &str, variables: &Variables) -> Rendered {
    Dialect::new().convert(text, variables)
}

/// The host extensions every conversion runs with.
///
/// Superscript and subscript stay off: the caret form would claim the
/// `]^(` sequence the gloss span rule matches, and the host offers no
/// ordering hook between its own extensions and ours.
fn host_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_DEFINITION_LIST);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options.insert(Options::ENABLE_MATH);
    options.insert(Options::ENABLE_GFM);
    options.insert(Options::ENABLE_WIKILINKS);
    options
}
