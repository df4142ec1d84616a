use md2struct::parser::classify::{split_line, LineKind};
use md2struct::parser::{Compatibility, LinkErrorKind, classify};
use md2struct::{Block, BlockStyle, ListItem, Mark, TextSpan};
use pretty_assertions::assert_eq;

fn block(line: &str) -> Block {
    classify(line, Compatibility::Corrected)
        .expect("classify failed")
        .expect("line produced no block")
}

#[test]
fn blank_lines_produce_nothing() {
    assert_eq!(classify("", Compatibility::Corrected).unwrap(), None);
    assert_eq!(split_line("").kind, LineKind::Blank);
}

#[test]
fn whitespace_lines_are_paragraphs() {
    for line in ["   ", "\t"] {
        assert_eq!(split_line(line).kind, LineKind::Paragraph);
        let para = block(line);
        assert_eq!(para.style, BlockStyle::Normaltekst);
        assert_eq!(para.children, vec![TextSpan::plain(line)]);
        assert_eq!(para.mark_defs, Some(vec![]));
    }
}

#[test]
fn heading_levels() {
    let title = block("# Title");
    assert_eq!(title.style, BlockStyle::Sidetittel);
    assert_eq!(title.children, vec![TextSpan::plain("Title")]);
    assert_eq!(title.mark_defs, None);
    assert_eq!(title.list_item, None);

    assert_eq!(block("## Two").style, BlockStyle::Innholdstittel);
    assert_eq!(block("### Three").style, BlockStyle::Systemtittel);
    assert_eq!(block("#### Four").style, BlockStyle::Undertittel);
    assert_eq!(block("##### Five").style, BlockStyle::Ingress);
    assert_eq!(block("###### Six").style, BlockStyle::Element);
}

#[test]
fn deep_heading_falls_back_to_body_style() {
    let deep = block("####### Too deep");
    assert_eq!(deep.style, BlockStyle::Normaltekst);
    assert_eq!(deep.children, vec![TextSpan::plain("Too deep")]);
    assert_eq!(BlockStyle::for_heading(0), BlockStyle::Normaltekst);
}

#[test]
fn heading_without_space() {
    let heading = block("#Compact  ");
    assert_eq!(heading.style, BlockStyle::Sidetittel);
    assert_eq!(heading.plain_text(), "Compact");
}

#[test]
fn heading_with_marks() {
    assert_eq!(
        block("## **Bold** heading").children,
        vec![TextSpan::marked("Bold", Mark::Bold), TextSpan::plain(" heading")]
    );
}

#[test]
fn bullet_items() {
    let item = block("- item one");
    assert_eq!(item.list_item, Some(ListItem::Bullet));
    assert_eq!(item.level, Some(1));
    assert_eq!(item.style, BlockStyle::Normaltekst);
    assert_eq!(item.children, vec![TextSpan::plain("item one")]);
    assert_eq!(item.mark_defs, None);

    let star = block("* star item");
    assert!(star.is_list_item());
    assert_eq!(star.plain_text(), "star item");

    assert!(block("-").children.is_empty());
}

#[test]
fn leading_bold_is_a_bullet() {
    // The first `*` is taken as the list marker.
    let item = block("**bold** start");
    assert!(item.is_list_item());
    assert_eq!(
        item.children,
        vec![TextSpan::plain("bold"), TextSpan::marked(" start", Mark::Bold)]
    );
}

#[test]
fn paragraphs_always_carry_definitions() {
    let para = block("Plain line");
    assert_eq!(para.style, BlockStyle::Normaltekst);
    assert_eq!(para.children, vec![TextSpan::plain("Plain line")]);
    assert_eq!(para.mark_defs, Some(vec![]));
    assert_eq!(para.level, None);
}

#[test]
fn nested_definitions_depend_on_compatibility() {
    let corrected = block("# See [docs](u)");
    assert_eq!(corrected.mark_defs().len(), 1);
    assert_eq!(corrected.mark_defs()[0].key, "url_docs");

    let legacy = classify("- See [docs](u)", Compatibility::Legacy)
        .unwrap()
        .unwrap();
    assert_eq!(legacy.mark_defs, None);
    assert_eq!(legacy.children[1].marks, vec![Mark::link("docs")]);
}

#[test]
fn error_spans_are_line_relative() {
    let err = classify("# bad [link", Compatibility::Corrected).unwrap_err();
    assert_eq!(err.kind, LinkErrorKind::UnclosedText);
    assert_eq!(err.span.start, 6);

    let err = classify("- bad [link", Compatibility::Corrected).unwrap_err();
    assert_eq!(err.span.start, 6);
}

#[test]
fn split_line_offsets() {
    let heading = split_line("##   Spaced");
    assert_eq!(heading.kind, LineKind::Heading(2));
    assert_eq!(heading.body, "Spaced");
    assert_eq!(heading.offset, 5);

    let item = split_line("- x");
    assert_eq!(item.kind, LineKind::Bullet);
    assert_eq!((item.body, item.offset), ("x", 2));
}
