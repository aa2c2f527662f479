//! Snapshot tests for rendered line parts.
//!
//! Each snapshot lists one part per line:
//! `start..end flags w=<visual width> |<display text>| <class>`
//! where flags are `w` (whitespace) and `d` (decorated), `-` when unset.

use std::fmt::Write;

use lineparts::{
    InlineDecoration, LineTokens, PartFlags, RenderLineInput, RenderOptions, RenderWhitespace,
    RenderedLine, StyleRange, StyleToken, render_line,
};

fn tokens(list: &[(usize, &str)]) -> LineTokens {
    LineTokens::new(
        list.iter()
            .map(|&(start, class_name)| StyleToken::new(start, class_name))
            .collect(),
    )
}

fn dump(rendered: &RenderedLine) -> String {
    let mut out = String::new();
    for part in rendered.rendered_parts() {
        let whitespace = if part.flags.contains(PartFlags::WHITESPACE) { 'w' } else { '-' };
        let decorated = if part.flags.contains(PartFlags::DECORATED) { 'd' } else { '-' };
        writeln!(
            out,
            "{}..{} {whitespace}{decorated} w={} |{}| {}",
            part.char_range.start, part.char_range.end, part.visual_width, part.text, part.class_name
        )
        .unwrap();
    }
    out
}

#[test]
fn snapshot_boundary_whitespace_with_selection() {
    let base = tokens(&[(0, "mtk1"), (4, "kw"), (7, "mtk1"), (12, "num"), (13, "mtk1")]);
    let options = RenderOptions::new(4)
        .unwrap()
        .with_render_whitespace(RenderWhitespace::Boundary);
    let decorations = [InlineDecoration::single_line(1, 5, 10, "sel")];
    let input = RenderLineInput::new("    let x\t= 1;  ", &base, &options)
        .with_decorations(&decorations);
    let rendered = render_line(&input).unwrap();

    insta::assert_snapshot!(dump(&rendered), @r"
    0..4 w- w=4 |····| mtk1 whitespace
    4..7 -d w=3 |let| kw sel
    7..9 -d w=2 | x| mtk1 sel
    9..12 -- w=5 |   = | mtk1
    12..13 -- w=1 |1| num
    13..14 -- w=1 |;| mtk1
    14..16 w- w=2 |··| mtk1 whitespace
    ");
}

#[test]
fn snapshot_all_whitespace_with_tabs() {
    let base = LineTokens::plain("mtk1");
    let options = RenderOptions::new(4)
        .unwrap()
        .with_render_whitespace(RenderWhitespace::All);
    let rendered = render_line(&RenderLineInput::new("\ta \tb", &base, &options)).unwrap();

    insta::assert_snapshot!(dump(&rendered), @r"
    0..1 w- w=4 |→   | mtk1 whitespace
    1..2 -- w=1 |a| mtk1
    2..4 w- w=3 |·→ | mtk1 whitespace
    4..5 -- w=1 |b| mtk1
    ");
}

#[test]
fn snapshot_overlapping_multi_line_decorations() {
    let base = LineTokens::plain("t");
    let options = RenderOptions::default();
    let decorations = [
        InlineDecoration::new(StyleRange::new(3, 6, 5, 1), "c3"),
        InlineDecoration::new(StyleRange::new(2, 5, 3, 4), "a1"),
        InlineDecoration::new(StyleRange::new(3, 3, 3, 7), "b2"),
    ];
    let input = RenderLineInput::new("abcdefgh", &base, &options)
        .with_position(3, 1)
        .with_decorations(&decorations);
    let rendered = render_line(&input).unwrap();

    insta::assert_snapshot!(dump(&rendered), @r"
    0..2 -d w=2 |ab| t a1
    2..3 -d w=1 |c| t a1 b2
    3..5 -d w=2 |de| t b2
    5..6 -d w=1 |f| t b2 c3
    6..8 -d w=2 |gh| t c3
    ");
}
