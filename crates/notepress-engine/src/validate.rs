use crate::limits::MAX_SPAN_CHARS;
use crate::model::{Block, BlockKind};

/// Outcome of structural validation: the surviving blocks plus how
/// many were discarded. A non-zero count is the fallback selector's
/// signal that a strategy lost content.
#[derive(Debug)]
pub struct Validated {
    pub blocks: Vec<Block>,
    pub dropped: usize,
}

/// Drops structurally invalid blocks and repairs span lists.
///
/// Rejected outright:
/// - non-divider blocks whose spans are all empty after trimming
/// - headings whose joined text is empty or nothing but leftover `#`
///   characters (stray hash runs from malformed markdown)
/// - blocks still carrying a span over [`MAX_SPAN_CHARS`] — that is a
///   splitter failure and must surface as a drop, never a silent
///   truncation
///
/// Within surviving blocks, whitespace-only spans are removed so every
/// retained span has non-empty trimmed text.
pub fn validate(blocks: Vec<Block>) -> Validated {
    let mut out = Vec::with_capacity(blocks.len());
    let mut dropped = 0usize;

    for mut block in blocks {
        if block.kind == BlockKind::Divider {
            out.push(block);
            continue;
        }

        if block
            .spans
            .iter()
            .any(|s| s.char_len() > MAX_SPAN_CHARS)
        {
            tracing::debug!(kind = ?block.kind, len = block.char_len(), "dropping oversized block");
            dropped += 1;
            continue;
        }

        block.spans.retain(|s| !s.text.trim().is_empty());
        if block.spans.is_empty() {
            dropped += 1;
            continue;
        }

        if let BlockKind::Heading { .. } = block.kind {
            let joined = block.joined_text();
            let residue = joined.trim();
            if residue.is_empty() || residue.chars().all(|c| c == '#') {
                dropped += 1;
                continue;
            }
        }

        out.push(block);
    }

    Validated {
        blocks: out,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;
    use pretty_assertions::assert_eq;

    fn paragraph(text: &str) -> Block {
        Block::new(BlockKind::Paragraph, vec![Span::plain(text)])
    }

    #[test]
    fn keeps_ordinary_blocks() {
        let v = validate(vec![paragraph("hello"), Block::divider()]);
        assert_eq!(v.blocks.len(), 2);
        assert_eq!(v.dropped, 0);
    }

    #[test]
    fn drops_whitespace_only_blocks() {
        let v = validate(vec![paragraph("   "), paragraph("kept")]);
        assert_eq!(v.blocks.len(), 1);
        assert_eq!(v.dropped, 1);
    }

    #[test]
    fn drops_hash_residue_headings() {
        let heading = Block::new(BlockKind::Heading { level: 2 }, vec![Span::plain("###")]);
        let v = validate(vec![heading]);
        assert_eq!(v.blocks.len(), 0);
        assert_eq!(v.dropped, 1);
    }

    #[test]
    fn keeps_headings_with_real_text() {
        let heading = Block::new(BlockKind::Heading { level: 2 }, vec![Span::plain("# count")]);
        let v = validate(vec![heading]);
        assert_eq!(v.dropped, 0);
    }

    #[test]
    fn drops_blocks_with_oversized_spans() {
        let v = validate(vec![paragraph(&"x".repeat(MAX_SPAN_CHARS + 1))]);
        assert_eq!(v.blocks.len(), 0);
        assert_eq!(v.dropped, 1);
    }

    #[test]
    fn span_at_exact_limit_passes() {
        let v = validate(vec![paragraph(&"x".repeat(MAX_SPAN_CHARS))]);
        assert_eq!(v.dropped, 0);
    }

    #[test]
    fn divider_always_passes() {
        let v = validate(vec![Block::divider()]);
        assert_eq!(v.blocks.len(), 1);
    }

    #[test]
    fn interior_whitespace_spans_are_pruned() {
        let block = Block::new(
            BlockKind::Paragraph,
            vec![Span::plain("a"), Span::plain("   "), Span::plain("b")],
        );
        let v = validate(vec![block]);
        assert_eq!(v.blocks[0].spans.len(), 2);
        assert_eq!(v.dropped, 0);
    }
}
