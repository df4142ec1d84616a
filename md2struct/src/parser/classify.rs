//! Line-to-block classification by leading characters.

use crate::block::{Block, BlockStyle};
use crate::parser::Compatibility;
use crate::parser::error::InlineError;
use crate::parser::inline::{self, Inline};
use crate::span::MarkDef;

/// The structural kind of a line, decided from its first characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// Heading with the number of leading `#` characters.
    Heading(usize),
    Bullet,
    Paragraph,
}

/// A line split into its kind and the text left for the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    pub kind: LineKind,
    pub body: &'a str,
    /// Byte offset of `body` within the line.
    pub offset: usize,
}

/// Decide the kind of `line` and cut off its block marker.
pub fn split_line(line: &str) -> Classified<'_> {
    let blank = Classified {
        kind: LineKind::Blank,
        body: "",
        offset: 0,
    };
    // Only the empty line is blank; whitespace is ordinary paragraph text.
    let Some(first) = line.chars().next() else {
        return blank;
    };

    match first {
        '#' => {
            let level = line.bytes().take_while(|&b| b == b'#').count();
            let after = &line[level..];
            let body = after.trim();
            Classified {
                kind: LineKind::Heading(level),
                body,
                offset: level + (after.len() - after.trim_start().len()),
            }
        }
        '-' | '*' => {
            // The marker is assumed to be followed by one separator character.
            let mut chars = line.chars();
            chars.next();
            chars.next();
            let body = chars.as_str();
            Classified {
                kind: LineKind::Bullet,
                body,
                offset: line.len() - body.len(),
            }
        }
        _ => Classified {
            kind: LineKind::Paragraph,
            body: line,
            offset: 0,
        },
    }
}

/// Build the block for an already tokenized line.
/// Returns `None` for blank lines.
pub fn assemble(kind: LineKind, inline: Inline, compatibility: Compatibility) -> Option<Block> {
    let Inline { spans, mark_defs } = inline;
    match kind {
        LineKind::Blank => None,
        LineKind::Heading(level) => Some(Block::heading(
            BlockStyle::for_heading(level),
            spans,
            nested_defs(mark_defs, compatibility),
        )),
        LineKind::Bullet => Some(Block::bullet(spans, nested_defs(mark_defs, compatibility))),
        LineKind::Paragraph => Some(Block::paragraph(spans, mark_defs)),
    }
}

/// Headings and list items only keep their definitions when corrected.
fn nested_defs(mark_defs: Vec<MarkDef>, compatibility: Compatibility) -> Option<Vec<MarkDef>> {
    match compatibility {
        Compatibility::Corrected if !mark_defs.is_empty() => Some(mark_defs),
        _ => None,
    }
}

/// Classify and tokenize one line. Link failures carry spans relative to `line`.
pub fn classify(line: &str, compatibility: Compatibility) -> Result<Option<Block>, InlineError> {
    let classified = split_line(line);
    if classified.kind == LineKind::Blank {
        return Ok(None);
    }
    let inline = inline::tokenize(classified.body, compatibility)
        .map_err(|err| err.shifted(classified.offset))?;
    Ok(assemble(classified.kind, inline, compatibility))
}
