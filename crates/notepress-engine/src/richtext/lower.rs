use crate::limits::{DEFAULT_CODE_LANGUAGE, INDENT_UNIT};
use crate::model::{Annotations, Block, BlockKind, Span};
use crate::parsing::links::clean_url;

use super::{InlineRun, RichNode, RichTextDocument};

/// Lowers the rich-text tree into the flat block sequence.
///
/// The destination has no recursive nesting, so nested list items
/// become sibling blocks with `depth` indent units prepended to their
/// first span. Link targets are sanitized here; a run whose target is
/// rejected keeps its text as an unlinked span.
pub fn lower_document(doc: &RichTextDocument) -> Vec<Block> {
    let mut blocks = Vec::new();
    for node in &doc.nodes {
        lower_node(node, 0, &mut blocks);
    }
    blocks
}

fn lower_node(node: &RichNode, depth: usize, out: &mut Vec<Block>) {
    match node {
        RichNode::Heading { level, content } => {
            out.push(Block::new(
                BlockKind::Heading { level: *level },
                spans_of(content),
            ));
        }
        RichNode::Paragraph { content } => {
            out.push(Block::new(BlockKind::Paragraph, spans_of(content)));
        }
        RichNode::BulletItem { content, children } => {
            out.push(item_block(BlockKind::BulletItem, content, depth));
            for child in children {
                lower_node(child, depth + 1, out);
            }
        }
        RichNode::NumberItem { content, children } => {
            out.push(item_block(BlockKind::NumberItem, content, depth));
            for child in children {
                lower_node(child, depth + 1, out);
            }
        }
        RichNode::Quote { content } => {
            out.push(Block::new(BlockKind::Quote, spans_of(content)));
        }
        RichNode::Code { language, text } => {
            out.push(Block::code(
                text.clone(),
                language.as_deref().unwrap_or(DEFAULT_CODE_LANGUAGE),
            ));
        }
        RichNode::Divider => out.push(Block::divider()),
    }
}

fn item_block(kind: BlockKind, content: &[InlineRun], depth: usize) -> Block {
    let mut spans = spans_of(content);
    if depth > 0 {
        let indent = INDENT_UNIT.repeat(depth);
        match spans.first_mut() {
            Some(first) => first.text.insert_str(0, &indent),
            None => spans.push(Span::plain(indent)),
        }
    }
    Block::new(kind, spans)
}

fn spans_of(runs: &[InlineRun]) -> Vec<Span> {
    runs.iter().map(span_of).collect()
}

fn span_of(run: &InlineRun) -> Span {
    // Code runs never carry a link; the wire layer relies on that.
    let link = if run.code {
        None
    } else {
        run.link.as_deref().and_then(clean_url)
    };
    Span {
        text: run.text.clone(),
        annotations: Annotations {
            bold: run.bold,
            italic: run.italic,
            strikethrough: run.strikethrough,
            code: run.code,
        },
        link,
    }
}
