//! Inline tokenizer: splits one line into marked text spans.
//!
//! The scan is a single left-to-right pass with one character of lookahead.
//! At most one style modifier is active at a time, so a delimiter seen while
//! a modifier is open always closes it, whatever its kind.

use crate::parser::Compatibility;
use crate::parser::error::{InlineError, LinkErrorKind};
use crate::span::{Mark, MarkDef, TextSpan};

/// Result of tokenizing one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inline {
    pub spans: Vec<TextSpan>,
    /// Link definitions referenced by `spans`, in order of appearance.
    pub mark_defs: Vec<MarkDef>,
}

/// The style modifier currently open in the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    #[default]
    None,
    Italic,
    Bold,
}

impl Modifier {
    /// Classify the delimiter at `current`, with `next` as lookahead.
    /// `_` and a lone `*` are italic, `**` is bold.
    pub fn at(current: char, next: Option<char>) -> Self {
        match (current, next) {
            ('_', _) => Modifier::Italic,
            ('*', Some('*')) => Modifier::Bold,
            ('*', _) => Modifier::Italic,
            _ => Modifier::None,
        }
    }

    pub fn is_active(self) -> bool {
        self != Modifier::None
    }

    /// Number of characters the delimiter occupies.
    pub fn width(self) -> usize {
        match self {
            Modifier::None => 0,
            Modifier::Italic => 1,
            Modifier::Bold => 2,
        }
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Modifier::None => None,
            Modifier::Italic => Some(Mark::Italic),
            Modifier::Bold => Some(Mark::Bold),
        }
    }
}

/// Tokenize `line`, failing on the first malformed link.
pub fn tokenize(line: &str, compatibility: Compatibility) -> Result<Inline, InlineError> {
    Tokenizer::new(line, compatibility)
        .run()
        .map(|(inline, _)| inline)
}

/// Tokenize `line`, keeping the `[` of each malformed link as plain text.
/// Returns the spans together with every link failure that was recovered.
pub fn tokenize_lenient(line: &str, compatibility: Compatibility) -> (Inline, Vec<InlineError>) {
    let mut tokenizer = Tokenizer::new(line, compatibility);
    tokenizer.recovered = Some(Vec::new());
    tokenizer
        .run()
        .unwrap_or_else(|err| (Inline::default(), vec![err]))
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Character cursor over a line, tracking the byte position.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Cursor { line, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn jump_to(&mut self, pos: usize) {
        self.pos = pos.min(self.line.len());
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

struct Link<'a> {
    text: &'a str,
    href: &'a str,
    /// Byte position just past the closing `)`.
    end: usize,
}

struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    compatibility: Compatibility,
    modifier: Modifier,
    /// Mark given to the accumulated text; normally the open modifier's.
    text_mark: Option<Mark>,
    text: String,
    spans: Vec<TextSpan>,
    mark_defs: Vec<MarkDef>,
    /// Set in lenient mode: malformed links land here instead of failing.
    recovered: Option<Vec<InlineError>>,
}

impl<'a> Tokenizer<'a> {
    fn new(line: &'a str, compatibility: Compatibility) -> Self {
        Tokenizer {
            cursor: Cursor::new(line),
            compatibility,
            modifier: Modifier::None,
            text_mark: None,
            text: String::new(),
            spans: Vec::new(),
            mark_defs: Vec::new(),
            recovered: None,
        }
    }

    fn run(mut self) -> Result<(Inline, Vec<InlineError>), InlineError> {
        while let Some(current) = self.cursor.peek() {
            let delimiter = Modifier::at(current, self.cursor.peek_next());

            if self.modifier.is_active() && delimiter.is_active() {
                self.close();
                self.cursor.bump_n(delimiter.width());
            } else if delimiter.is_active() {
                self.open(delimiter);
                self.cursor.bump_n(delimiter.width());
            } else if current == '[' {
                match self.scan_link() {
                    Ok(link) => self.push_link(link),
                    Err(err) => match self.recovered.as_mut() {
                        Some(errors) => {
                            errors.push(err);
                            self.text.push(current);
                            self.cursor.bump();
                        }
                        None => return Err(err),
                    },
                }
            } else {
                self.text.push(current);
                self.cursor.bump();
            }
        }

        // An unterminated modifier keeps its mark on the trailing text.
        self.flush();

        let inline = Inline {
            spans: self.spans,
            mark_defs: self.mark_defs,
        };
        Ok((inline, self.recovered.unwrap_or_default()))
    }

    /// Push the accumulated text, if any, marked with the active modifier.
    fn flush(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let span = TextSpan {
            text: std::mem::take(&mut self.text),
            marks: self.text_mark.clone().into_iter().collect(),
        };
        log::trace!("pushed span {:?} with marks {:?}", span.text, span.marks);
        self.spans.push(span);
    }

    fn open(&mut self, modifier: Modifier) {
        self.flush();
        self.modifier = modifier;
        self.text_mark = modifier.mark();
    }

    fn close(&mut self) {
        self.flush();
        self.modifier = Modifier::None;
        self.text_mark = None;
    }

    fn push_link(&mut self, link: Link<'a>) {
        self.flush();
        let mark = Mark::link(link.text);
        self.mark_defs.push(MarkDef::link(&mark, link.href));
        self.spans.push(TextSpan::marked(link.text, mark));
        self.cursor.jump_to(link.end);
        // Legacy output leaves the text after a link unmarked, though the
        // modifier stays open and the next delimiter still closes it.
        if self.compatibility == Compatibility::Legacy {
            self.text_mark = None;
        }
    }

    /// Parse `[text](href)` at the cursor without consuming anything.
    fn scan_link(&self) -> Result<Link<'a>, InlineError> {
        let line = self.cursor.line;
        let start = self.cursor.pos;
        let rest = self.cursor.rest();
        let fail = |kind| InlineError::new(kind, start..line.len());

        let close = rest.find(']').ok_or_else(|| fail(LinkErrorKind::UnclosedText))?;
        let text = &rest[1..close];
        if text.is_empty() {
            return Err(fail(LinkErrorKind::EmptyText));
        }
        let after_text = start + close + 1;

        match self.compatibility {
            Compatibility::Corrected => {
                let target = line[after_text..]
                    .strip_prefix('(')
                    .ok_or_else(|| fail(LinkErrorKind::MissingHref))?;
                let len = target
                    .find(')')
                    .ok_or_else(|| fail(LinkErrorKind::UnclosedHref))?;
                Ok(Link {
                    text,
                    href: &target[..len],
                    end: after_text + 1 + len + 1,
                })
            }
            Compatibility::Legacy => {
                // The target is the first `(...)` anywhere in the line, even
                // when it belongs to an earlier link.
                let (Some(open), Some(close_paren)) = (line.find('('), line.find(')')) else {
                    return Err(fail(LinkErrorKind::MissingHref));
                };
                if close_paren < open {
                    return Err(fail(LinkErrorKind::MissingHref));
                }
                let end = line[after_text..]
                    .find(')')
                    .map(|idx| after_text + idx + 1)
                    .ok_or_else(|| fail(LinkErrorKind::UnclosedHref))?;
                Ok(Link {
                    text,
                    href: &line[open + 1..close_paren],
                    end,
                })
            }
        }
    }
}
