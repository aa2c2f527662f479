//! Fuzz target for the line render pipeline.
//!
//! Arbitrary lines, tokens and decorations must never panic, and the
//! resulting parts must cover the line exactly.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lineparts::{
    InlineDecoration, LineTokens, RenderLineInput, RenderOptions, RenderWhitespace, StyleRange,
    StyleToken, render_line,
};

#[derive(Debug, Arbitrary)]
struct Input {
    line: String,
    token_starts: Vec<u8>,
    decorations: Vec<(u8, u8, u8, u8)>,
    faux_indent: u8,
    tab_size: u8,
    policy: u8,
}

fuzz_target!(|input: Input| {
    // Zero tab size is rejected by the config layer.
    let Ok(options) = RenderOptions::new(u32::from(input.tab_size)) else {
        return;
    };
    let policy = match input.policy % 3 {
        0 => RenderWhitespace::None,
        1 => RenderWhitespace::Boundary,
        _ => RenderWhitespace::All,
    };
    let options = options.with_render_whitespace(policy);

    let mut starts: Vec<usize> = input.token_starts.iter().map(|&s| usize::from(s)).collect();
    starts.push(0);
    starts.sort_unstable();
    starts.dedup();
    let tokens = LineTokens::new(
        starts
            .into_iter()
            .map(|start| StyleToken::new(start, format!("t{start}")))
            .collect(),
    )
    .with_faux_indent(usize::from(input.faux_indent));

    let decorations: Vec<InlineDecoration> = input
        .decorations
        .iter()
        .enumerate()
        .map(|(i, &(start_line, start_column, end_line, end_column))| {
            InlineDecoration::new(
                StyleRange::new(
                    usize::from(start_line % 3),
                    usize::from(start_column),
                    usize::from(end_line % 3),
                    usize::from(end_column),
                ),
                format!("d{i}"),
            )
        })
        .collect();

    let render_input = RenderLineInput::new(&input.line, &tokens, &options)
        .with_decorations(&decorations);
    let Ok(rendered) = render_line(&render_input) else {
        return;
    };

    let mut covered = 0usize;
    for (range, _) in rendered.parts.iter_ranges() {
        assert_eq!(range.start, covered);
        covered = range.end;
    }
    assert_eq!(covered, input.line.chars().count());

    for part in 0..rendered.mapping.part_count() {
        let len = rendered.mapping.part_rendered_length(part);
        for offset in 0..=len.min(64) {
            let _ = rendered.mapping.part_data_to_char_offset(part, len, offset);
        }
    }
    let _ = rendered.rendered_parts();
});
