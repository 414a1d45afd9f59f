//! Dialogue fences rendered as a two-column chat transcript.
//!
//! Each body line stands alone: `SPEAKER>UTTERANCE` is a turn spoken from
//! the left, `SPEAKER<UTTERANCE` from the right, doubled separators mark
//! inner thoughts, and a line with no separator is narration. Blank lines
//! and lines with a separator run longer than two are skipped.

use std::sync::OnceLock;

use html_escape::encode_text;
use regex::Regex;

/// Which column a turn occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Center,
    Right,
}

/// Whether a turn is spoken aloud or thought.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Spoken,
    Thought,
}

/// One classified line of a dialogue body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub direction: Direction,
    pub speaker: String,
    pub text: String,
    pub kind: TurnKind,
}

static LINE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn line_pattern() -> &'static Regex {
    LINE_PATTERN
        .get_or_init(|| Regex::new(r"^(.+?)(<+|>+)(.+)$").expect("Invalid dialogue line regex"))
}

fn separator(run: &str) -> Option<(Direction, TurnKind)> {
    match run {
        ">" => Some((Direction::Left, TurnKind::Spoken)),
        "<" => Some((Direction::Right, TurnKind::Spoken)),
        ">>" => Some((Direction::Left, TurnKind::Thought)),
        "<<" => Some((Direction::Right, TurnKind::Thought)),
        _ => None,
    }
}

fn classify_line(line: &str) -> Option<Turn> {
    if line.is_empty() {
        return None;
    }
    let Some(caps) = line_pattern().captures(line) else {
        return Some(Turn {
            direction: Direction::Center,
            speaker: String::new(),
            text: line.to_string(),
            kind: TurnKind::Spoken,
        });
    };
    let (direction, kind) = separator(caps.get(2)?.as_str())?;
    Some(Turn {
        direction,
        speaker: caps.get(1)?.as_str().to_string(),
        text: caps.get(3)?.as_str().to_string(),
        kind,
    })
}

/// Classify every line of a fence body, in order.
pub fn classify_lines(body: &str) -> Vec<Turn> {
    body.lines().filter_map(classify_line).collect()
}

/// Render a dialogue fence body.
///
/// The fence argument names the dialogue but is not interpolated; the
/// title element renders empty.
pub(crate) fn render_block(body: &str, _title: &str) -> String {
    render_turns(&classify_lines(body))
}

fn render_turns(turns: &[Turn]) -> String {
    let mut html = String::from(
        "<div class=\"dialogue\">\n<div class=\"message-title\"></div>\n<div class=\"dialog-container\">\n",
    );
    for turn in turns {
        html.push_str(&render_row(turn));
        html.push('\n');
    }
    html.push_str("</div>\n<br />\n</div>\n");
    html
}

fn render_row(turn: &Turn) -> String {
    let speaker = encode_text(&turn.speaker);
    let content = match turn.kind {
        TurnKind::Spoken => encode_text(&turn.text).into_owned(),
        TurnKind::Thought => format!("<p class=\"thought\">{}</p>", encode_text(&turn.text)),
    };
    let (left, right) = match turn.direction {
        Direction::Left => (
            format!("<div class=\"user-name left\">{speaker}</div>"),
            String::from("<div class=\"user-name\"></div>"),
        ),
        Direction::Right => (
            String::from("<div class=\"user-name\"></div>"),
            format!("<div class=\"user-name right\">{speaker}</div>"),
        ),
        Direction::Center => (
            String::from("<div class=\"user-name\"></div>"),
            String::from("<div class=\"user-name\"></div>"),
        ),
    };
    format!("<div class=\"dialog-row\">{left}<div class=\"message-content\">{content}</div>{right}</div>")
}
