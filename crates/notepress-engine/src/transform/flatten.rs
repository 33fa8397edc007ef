use crate::limits::{INDENT_UNIT, MAX_NATIVE_HEADING_LEVEL};
use crate::model::{Block, BlockKind, Span};

/// Rewrites headings deeper than the destination supports.
///
/// Levels 1–3 pass through. Levels 4–6 become bullet items with every
/// span forced bold and `level - 4` indent units of leading whitespace,
/// preserving relative nesting visually in a format with no native
/// bullet indentation.
pub fn flatten_headings(blocks: Vec<Block>) -> Vec<Block> {
    blocks.into_iter().map(flatten_block).collect()
}

fn flatten_block(block: Block) -> Block {
    let BlockKind::Heading { level } = block.kind else {
        return block;
    };
    if level <= MAX_NATIVE_HEADING_LEVEL {
        return block;
    }

    let indent = INDENT_UNIT.repeat(level.saturating_sub(4) as usize);
    let mut spans = block.spans;
    for span in &mut spans {
        span.annotations.bold = true;
    }
    match spans.first_mut() {
        Some(first) => first.text.insert_str(0, &indent),
        // Assembler never emits content-free headings, but a synthetic
        // caller might.
        None => spans.push(Span::bold(indent)),
    }
    Block::new(BlockKind::BulletItem, spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn heading(level: u8, text: &str) -> Block {
        Block::new(BlockKind::Heading { level }, vec![Span::plain(text)])
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn native_levels_pass_through(#[case] level: u8) {
        let block = heading(level, "kept");
        assert_eq!(flatten_block(block.clone()), block);
    }

    #[test]
    fn level_four_becomes_unindented_bold_bullet() {
        let out = flatten_block(heading(4, "X"));
        assert_eq!(out.kind, BlockKind::BulletItem);
        assert_eq!(out.spans, vec![Span::bold("X")]);
    }

    #[test]
    fn level_five_gets_exactly_one_indent_unit() {
        let out = flatten_block(heading(5, "X"));
        assert_eq!(out.kind, BlockKind::BulletItem);
        assert_eq!(out.spans, vec![Span::bold(format!("{INDENT_UNIT}X"))]);
    }

    #[test]
    fn level_six_gets_two_indent_units() {
        let out = flatten_block(heading(6, "X"));
        let expected = format!("{INDENT_UNIT}{INDENT_UNIT}X");
        assert_eq!(out.spans[0].text, expected);
    }

    #[test]
    fn all_spans_forced_bold_but_only_first_indented() {
        let block = Block::new(
            BlockKind::Heading { level: 5 },
            vec![Span::plain("a "), Span::plain("b")],
        );
        let out = flatten_block(block);
        assert!(out.spans.iter().all(|s| s.annotations.bold));
        assert_eq!(out.spans[0].text, format!("{INDENT_UNIT}a "));
        assert_eq!(out.spans[1].text, "b");
    }

    #[test]
    fn non_headings_untouched() {
        let block = Block::new(BlockKind::Paragraph, vec![Span::plain("p")]);
        assert_eq!(flatten_block(block.clone()), block);
    }
}
