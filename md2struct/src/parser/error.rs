use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

/// Parse errors with source location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Range<usize>,
    pub file_id: usize,
    pub severity: Severity,
    pub notes: Vec<String>,
}

impl ParseError {
    pub fn warning(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        ParseError {
            message: message.into(),
            span,
            file_id,
            severity: Severity::Warning,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::new(self.severity)
            .with_message(&self.message)
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(self.notes.clone())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkErrorKind {
    /// `[` without a later `]`.
    UnclosedText,
    /// `[]`: a link needs text to build its key from.
    EmptyText,
    /// No `(` target where one is required.
    MissingHref,
    /// `(` target without a closing `)`.
    UnclosedHref,
}

impl fmt::Display for LinkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkErrorKind::UnclosedText => write!(f, "link text is missing a closing `]`"),
            LinkErrorKind::EmptyText => write!(f, "link text is empty"),
            LinkErrorKind::MissingHref => write!(f, "link has no `(...)` target"),
            LinkErrorKind::UnclosedHref => write!(f, "link target is missing a closing `)`"),
        }
    }
}

/// A malformed link found while tokenizing one line.
/// `span` is a byte range relative to the tokenized text, starting at the `[`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineError {
    pub kind: LinkErrorKind,
    pub span: Range<usize>,
}

impl InlineError {
    pub fn new(kind: LinkErrorKind, span: Range<usize>) -> Self {
        InlineError { kind, span }
    }

    /// Move the span by `offset` bytes, e.g. from a heading body to its line.
    pub fn shifted(self, offset: usize) -> Self {
        InlineError {
            kind: self.kind,
            span: self.span.start + offset..self.span.end + offset,
        }
    }
}

impl fmt::Display for InlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed link at column {}: {}", self.span.start + 1, self.kind)
    }
}

impl std::error::Error for InlineError {}
