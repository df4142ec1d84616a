pub mod block;
pub mod document;
pub mod parser;
pub mod span;

pub use block::{Block, BlockStyle, ListItem};
pub use document::Document;
pub use parser::{Compatibility, Conversion, ParseError, ParseOptions, Parser, Recovery};
pub use span::{Mark, MarkDef, TextSpan};
