use std::fmt;

use serde::{Serialize, Serializer};

/// A run of inline text sharing one set of marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "span")]
pub struct TextSpan {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl TextSpan {
    /// A span without any marks.
    pub fn plain(text: impl Into<String>) -> Self {
        TextSpan {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// A span carrying a single mark.
    pub fn marked(text: impl Into<String>, mark: Mark) -> Self {
        TextSpan {
            text: text.into(),
            marks: vec![mark],
        }
    }

    pub fn is_plain(&self) -> bool {
        self.marks.is_empty()
    }
}

/// A tag on a span: either a style or a reference to a link definition.
/// Serialized as its key string (`bold`, `italic`, `url_<slug>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    /// Reference to a [`MarkDef`] on the same block. Holds the slug, i.e. the
    /// link text with spaces replaced by underscores.
    Link(String),
}

impl Mark {
    /// Build the link mark for the given link text.
    pub fn link(text: &str) -> Self {
        Mark::Link(text.replace(' ', "_"))
    }

    /// The key written to the `marks` array.
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn is_style(&self) -> bool {
        matches!(self, Mark::Bold | Mark::Italic)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Bold => write!(f, "bold"),
            Mark::Italic => write!(f, "italic"),
            Mark::Link(slug) => write!(f, "url_{}", slug),
        }
    }
}

impl Serialize for Mark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Out-of-line definition resolving a link mark key to its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "link")]
pub struct MarkDef {
    pub key: String,
    pub href: String,
}

impl MarkDef {
    pub fn link(mark: &Mark, href: impl Into<String>) -> Self {
        MarkDef {
            key: mark.key(),
            href: href.into(),
        }
    }
}
