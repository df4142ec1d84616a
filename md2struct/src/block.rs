use std::fmt;

use serde::Serialize;

use crate::span::{MarkDef, TextSpan};

/// Styles selectable by heading depth, `#` through `######`.
const HEADING_STYLES: [BlockStyle; 6] = [
    BlockStyle::Sidetittel,
    BlockStyle::Innholdstittel,
    BlockStyle::Systemtittel,
    BlockStyle::Undertittel,
    BlockStyle::Ingress,
    BlockStyle::Element,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    Sidetittel,
    Innholdstittel,
    Systemtittel,
    Undertittel,
    Ingress,
    Element,
    Normaltekst,
}

impl BlockStyle {
    /// Style for a heading with `level` leading `#` characters.
    /// Levels outside 1-6 fall back to [`BlockStyle::Normaltekst`].
    pub fn for_heading(level: usize) -> Self {
        level
            .checked_sub(1)
            .and_then(|idx| HEADING_STYLES.get(idx))
            .copied()
            .unwrap_or(BlockStyle::Normaltekst)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockStyle::Sidetittel => "sidetittel",
            BlockStyle::Innholdstittel => "innholdstittel",
            BlockStyle::Systemtittel => "systemtittel",
            BlockStyle::Undertittel => "undertittel",
            BlockStyle::Ingress => "ingress",
            BlockStyle::Element => "element",
            BlockStyle::Normaltekst => "normaltekst",
        }
    }
}

impl fmt::Display for BlockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListItem {
    Bullet,
}

/// One structural unit of the document: a heading, list item or paragraph.
/// Serialized as an `avsnitt` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "avsnitt", rename_all = "camelCase")]
pub struct Block {
    pub style: BlockStyle,
    pub children: Vec<TextSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_item: Option<ListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_defs: Option<Vec<MarkDef>>,
}

impl Block {
    pub fn heading(
        style: BlockStyle,
        children: Vec<TextSpan>,
        mark_defs: Option<Vec<MarkDef>>,
    ) -> Self {
        Block {
            style,
            children,
            list_item: None,
            level: None,
            mark_defs,
        }
    }

    /// A first-level bullet list item.
    pub fn bullet(children: Vec<TextSpan>, mark_defs: Option<Vec<MarkDef>>) -> Self {
        Block {
            style: BlockStyle::Normaltekst,
            children,
            list_item: Some(ListItem::Bullet),
            level: Some(1),
            mark_defs,
        }
    }

    /// Body text. Paragraphs always carry a (possibly empty) mark definition table.
    pub fn paragraph(children: Vec<TextSpan>, mark_defs: Vec<MarkDef>) -> Self {
        Block {
            style: BlockStyle::Normaltekst,
            children,
            list_item: None,
            level: None,
            mark_defs: Some(mark_defs),
        }
    }

    pub fn is_list_item(&self) -> bool {
        self.list_item.is_some()
    }

    pub fn mark_defs(&self) -> &[MarkDef] {
        self.mark_defs.as_deref().unwrap_or_default()
    }

    /// Concatenated text of all children, marks dropped.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|span| span.text.as_str()).collect()
    }
}
