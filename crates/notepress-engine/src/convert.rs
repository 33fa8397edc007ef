use crate::error::ConvertError;
use crate::model::Document;
use crate::parsing::assemble;
use crate::richtext::{RichTextDocument, document_from_markdown, lower_document, to_markdown};
use crate::transform::{SplitMode, flatten_headings, split_blocks};
use crate::validate::{Validated, validate};

/// Converts markdown to a deliverable document.
///
/// The full strategy runs first: rich-text tree, lowering, flattening,
/// boundary-only splitting. If validation discards anything — oversized
/// spans it could not split, structure it mangled — the whole result is
/// rejected and the conservative line strategy reruns on the original
/// input with strict splitting. The fallback runs at most once; if both
/// strategies produce nothing, the request fails with
/// [`ConvertError::NoContent`].
pub fn convert_markdown(markdown: &str) -> Result<Document, ConvertError> {
    let full = full_strategy(markdown);
    if full.dropped == 0 && !full.blocks.is_empty() {
        return Ok(Document::new(full.blocks));
    }
    tracing::warn!(
        dropped = full.dropped,
        kept = full.blocks.len(),
        "full conversion lost content, retrying with line strategy"
    );
    finish_conservative(markdown)
}

/// Converts a structured rich-text document, same fallback policy.
///
/// The fallback needs markdown lines to chew on, so the tree is
/// rendered back to markdown before the conservative rerun.
pub fn convert_rich_text(doc: &RichTextDocument) -> Result<Document, ConvertError> {
    let lowered = finish_full(lower_document(doc));
    if lowered.dropped == 0 && !lowered.blocks.is_empty() {
        return Ok(Document::new(lowered.blocks));
    }
    tracing::warn!(
        dropped = lowered.dropped,
        kept = lowered.blocks.len(),
        "rich-text conversion lost content, retrying via rendered markdown"
    );
    finish_conservative(&to_markdown(doc))
}

/// Conversion that never takes the full path, for callers that want the
/// predictable line semantics directly.
pub fn convert_markdown_conservative(markdown: &str) -> Result<Document, ConvertError> {
    finish_conservative(markdown)
}

fn full_strategy(markdown: &str) -> Validated {
    finish_full(lower_document(&document_from_markdown(markdown)))
}

fn finish_full(blocks: Vec<crate::model::Block>) -> Validated {
    validate(split_blocks(
        flatten_headings(blocks),
        SplitMode::BoundaryOnly,
    ))
}

fn finish_conservative(markdown: &str) -> Result<Document, ConvertError> {
    let validated = validate(split_blocks(
        flatten_headings(assemble(markdown)),
        SplitMode::Strict,
    ));
    if validated.dropped > 0 {
        tracing::debug!(dropped = validated.dropped, "line strategy dropped blocks");
    }
    if validated.blocks.is_empty() {
        return Err(ConvertError::NoContent);
    }
    Ok(Document::new(validated.blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::MAX_SPAN_CHARS;
    use crate::model::BlockKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn well_formed_markdown_uses_full_strategy() {
        let doc = convert_markdown("# Title\n\n- parent\n  - child").unwrap();
        // The full strategy keeps nesting as indentation; the line
        // strategy would also classify "  - child" as a bullet, but
        // without the indent prefix.
        assert_eq!(doc.blocks()[2].joined_text(), "  child");
    }

    #[test]
    fn boundary_free_paragraph_triggers_fallback() {
        let long = "x".repeat(5000);
        let doc = convert_markdown(&format!("# T\n\n{long}")).unwrap();
        // The fallback's strict splitter hard-cuts, so nothing exceeds
        // the ceiling and nothing is lost.
        let body_len: usize = doc
            .blocks()
            .iter()
            .filter(|b| b.kind == BlockKind::Paragraph)
            .map(|b| b.char_len())
            .sum();
        assert_eq!(body_len, 5000);
        assert!(doc.blocks().iter().all(|b| b.char_len() <= MAX_SPAN_CHARS));
    }

    #[test]
    fn empty_input_is_no_content() {
        assert!(matches!(convert_markdown(""), Err(ConvertError::NoContent)));
        assert!(matches!(
            convert_markdown("   \n\n  "),
            Err(ConvertError::NoContent)
        ));
    }

    #[test]
    fn splittable_long_text_stays_on_full_path() {
        // Sentences give the boundary-only splitter room to work.
        let sentence = "This sentence is long enough to matter. ";
        let text: String = std::iter::repeat(sentence).take(120).collect();
        let doc = convert_markdown(&text).unwrap();
        assert!(doc.len() > 1);
        // Boundary slices may land between the safe threshold and the
        // hard ceiling; only the ceiling is binding.
        assert!(doc.blocks().iter().all(|b| b.char_len() <= MAX_SPAN_CHARS));
    }

    #[test]
    fn rich_text_input_converts_directly() {
        use crate::richtext::{InlineRun, RichNode};
        let doc = RichTextDocument {
            nodes: vec![RichNode::Heading {
                level: 1,
                content: vec![InlineRun::plain("Report")],
            }],
        };
        let out = convert_rich_text(&doc).unwrap();
        assert_eq!(out.first_heading(), Some("Report".to_string()));
    }

    #[test]
    fn rich_text_with_unsplittable_run_falls_back() {
        use crate::richtext::{InlineRun, RichNode};
        let doc = RichTextDocument {
            nodes: vec![RichNode::Paragraph {
                content: vec![InlineRun::plain("y".repeat(4500))],
            }],
        };
        let out = convert_rich_text(&doc).unwrap();
        let total: usize = out.blocks().iter().map(|b| b.char_len()).sum();
        assert_eq!(total, 4500);
    }

    #[test]
    fn conservative_entry_skips_full_strategy() {
        let doc = convert_markdown_conservative("- parent\n  - child").unwrap();
        assert_eq!(doc.blocks()[1].joined_text(), "child");
    }

    #[test]
    fn deep_headings_arrive_flattened() {
        let doc = convert_markdown("#### Section").unwrap();
        assert_eq!(doc.blocks()[0].kind, BlockKind::BulletItem);
        assert!(doc.blocks()[0].spans[0].annotations.bold);
    }
}
