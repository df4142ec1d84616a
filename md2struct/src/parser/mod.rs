pub mod builder;
pub mod classify;
pub mod error;
pub mod inline;

pub use builder::{Conversion, DocumentBuilder, SourceLine};
pub use classify::classify;
pub use error::{InlineError, LinkErrorKind, ParseError};
pub use inline::{Inline, Modifier, tokenize};

use serde::Deserialize;

/// How far to follow the historic output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compatibility {
    /// Each link's target is the `(...)` right after its `]`, and headings and
    /// list items keep the definitions of the links they contain.
    #[default]
    Corrected,
    /// Link targets come from the first `(...)` in the line, text after a
    /// link inside a style is left unmarked, and only paragraphs carry
    /// `markDefs`.
    Legacy,
}

/// What to do with a line containing a malformed link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recovery {
    /// Leave the line out of the document.
    #[default]
    Skip,
    /// Keep the line, treating the offending `[` as text.
    Literal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub compatibility: Compatibility,
    pub recovery: Recovery,
}

/// Parser entry point for an in-memory source.
pub struct Parser {
    source: String,
    file_id: usize,
    options: ParseOptions,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser {
            source,
            file_id,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Convert the whole source. Malformed lines are reported, never fatal.
    pub fn parse(&self) -> Conversion {
        builder::build_document(builder::lines(&self.source), self.options, self.file_id)
    }
}
