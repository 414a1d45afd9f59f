//! Conversion engine for the crossdown markdown dialect.
//!
//! The dialect layers on pulldown-cmark: the host parses the document and
//! serialises the final HTML, while this crate rewrites the event stream in
//! between. A block pass turns outline-numbered paragraphs into headings,
//! routes claimed fences (dialogue transcripts, mermaid diagrams), and
//! collects front-matter; an inline pass applies declarative span rules and
//! resolves inline code spans against conversion variables.

pub mod blocks;
pub mod convert;
pub mod inline;

// Re-export key types for easier usage
pub use blocks::dialogue::{Direction, Turn, TurnKind};
pub use convert::{Dialect, Metadata, Rendered, Variables, convert};
pub use inline::spans::{AttrValue, SpanRule, SpanRuleError, SpanShape};
