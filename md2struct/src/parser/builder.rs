//! Drives the classifier over a sequence of lines.

use crate::block::Block;
use crate::document::Document;
use crate::parser::classify::{self, LineKind};
use crate::parser::error::{InlineError, ParseError};
use crate::parser::inline;
use crate::parser::{ParseOptions, Recovery};

/// One input line with its terminator stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub text: &'a str,
    /// Byte offset of the line start in the source.
    pub offset: usize,
    /// 1-based line number.
    pub number: usize,
}

/// Split `source` into lines, stripping `\n` and `\r\n` terminators.
pub fn lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .enumerate()
        .map(move |(idx, raw)| {
            let start = offset;
            offset += raw.len();
            let text = raw.strip_suffix('\n').unwrap_or(raw);
            let text = text.strip_suffix('\r').unwrap_or(text);
            SourceLine {
                text,
                offset: start,
                number: idx + 1,
            }
        })
}

/// Outcome of one conversion run.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: Document,
    /// One warning per recovered or skipped malformed link.
    pub diagnostics: Vec<ParseError>,
}

impl Conversion {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The document, or the diagnostics if any line needed recovery.
    pub fn into_result(self) -> Result<Document, Vec<ParseError>> {
        if self.diagnostics.is_empty() {
            Ok(self.document)
        } else {
            Err(self.diagnostics)
        }
    }
}

/// Accumulates blocks for a single conversion run.
pub struct DocumentBuilder {
    options: ParseOptions,
    file_id: usize,
    blocks: Vec<Block>,
    diagnostics: Vec<ParseError>,
}

impl DocumentBuilder {
    pub fn new(options: ParseOptions, file_id: usize) -> Self {
        DocumentBuilder {
            options,
            file_id,
            blocks: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Classify `line` and append its block, if it produces one.
    pub fn push_line(&mut self, line: SourceLine<'_>) {
        let classified = classify::split_line(line.text);
        if classified.kind == LineKind::Blank {
            return;
        }
        let compatibility = self.options.compatibility;
        let base = line.offset + classified.offset;

        match self.options.recovery {
            Recovery::Skip => match inline::tokenize(classified.body, compatibility) {
                Ok(tokens) => {
                    self.blocks
                        .extend(classify::assemble(classified.kind, tokens, compatibility));
                }
                Err(err) => {
                    log::debug!("skipping line {}: {}", line.number, err);
                    let warning = self
                        .link_warning(&err, base)
                        .with_note(format!("line {} was left out of the document", line.number));
                    self.diagnostics.push(warning);
                }
            },
            Recovery::Literal => {
                let (tokens, recovered) = inline::tokenize_lenient(classified.body, compatibility);
                for err in &recovered {
                    log::debug!("recovered line {}: {}", line.number, err);
                    let warning = self
                        .link_warning(err, base)
                        .with_note("the `[` was kept as plain text");
                    self.diagnostics.push(warning);
                }
                self.blocks
                    .extend(classify::assemble(classified.kind, tokens, compatibility));
            }
        }
    }

    fn link_warning(&self, err: &InlineError, base: usize) -> ParseError {
        ParseError::warning(
            format!("malformed link: {}", err.kind),
            err.span.start + base..err.span.end + base,
            self.file_id,
        )
    }

    pub fn finish(self) -> Conversion {
        Conversion {
            document: Document {
                blocks: self.blocks,
            },
            diagnostics: self.diagnostics,
        }
    }
}

/// Convert every line of `lines`, in order.
pub fn build_document<'a>(
    lines: impl IntoIterator<Item = SourceLine<'a>>,
    options: ParseOptions,
    file_id: usize,
) -> Conversion {
    let mut builder = DocumentBuilder::new(options, file_id);
    for line in lines {
        builder.push_line(line);
    }
    builder.finish()
}
