//! Block model → service JSON.
//!
//! The shape is fixed by the service: `{"type": <kind>, <kind>:
//! {"rich_text": [...]}}` for text-bearing kinds, an empty object for
//! dividers, and a `language` field on code blocks. Rich-text entries
//! carry the full annotation record; fields this pipeline never sets
//! (underline, color) are emitted at their defaults.

use notepress_engine::limits::DEFAULT_CODE_LANGUAGE;
use notepress_engine::{Block, BlockKind, Span};
use serde_json::{Value, json};

/// Service-side name of a block kind. Heading levels arrive already
/// flattened to 1–3; anything deeper here is a pipeline bug, clamped
/// rather than propagated.
fn kind_name(kind: &BlockKind) -> &'static str {
    match kind {
        BlockKind::Heading { level: 1 } => "heading_1",
        BlockKind::Heading { level: 2 } => "heading_2",
        BlockKind::Heading { .. } => "heading_3",
        BlockKind::Paragraph => "paragraph",
        BlockKind::BulletItem => "bulleted_list_item",
        BlockKind::NumberItem => "numbered_list_item",
        BlockKind::Quote => "quote",
        BlockKind::Divider => "divider",
        BlockKind::Code => "code",
    }
}

/// One block in wire form.
pub fn block_to_json(block: &Block) -> Value {
    let name = kind_name(&block.kind);
    let payload = match block.kind {
        BlockKind::Divider => json!({}),
        BlockKind::Code => json!({
            "rich_text": rich_text(&block.spans),
            "language": block.language.as_deref().unwrap_or(DEFAULT_CODE_LANGUAGE),
        }),
        _ => json!({ "rich_text": rich_text(&block.spans) }),
    };
    json!({ "object": "block", "type": name, name: payload })
}

/// A whole chunk of blocks, ready for a create or append call.
pub fn blocks_to_json(blocks: &[Block]) -> Vec<Value> {
    blocks.iter().map(block_to_json).collect()
}

fn rich_text(spans: &[Span]) -> Vec<Value> {
    spans.iter().map(span_to_json).collect()
}

fn span_to_json(span: &Span) -> Value {
    let link = match &span.link {
        Some(url) => json!({ "url": url.as_str() }),
        None => Value::Null,
    };
    json!({
        "type": "text",
        "text": { "content": span.text, "link": link },
        "annotations": {
            "bold": span.annotations.bold,
            "italic": span.annotations.italic,
            "strikethrough": span.annotations.strikethrough,
            "underline": false,
            "code": span.annotations.code,
            "color": "default",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notepress_engine::Annotations;
    use pretty_assertions::assert_eq;

    #[test]
    fn paragraph_wire_shape() {
        let block = Block::new(BlockKind::Paragraph, vec![Span::plain("hi")]);
        assert_eq!(
            block_to_json(&block),
            json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [{
                        "type": "text",
                        "text": { "content": "hi", "link": null },
                        "annotations": {
                            "bold": false,
                            "italic": false,
                            "strikethrough": false,
                            "underline": false,
                            "code": false,
                            "color": "default",
                        },
                    }],
                },
            })
        );
    }

    #[test]
    fn divider_payload_is_empty_object() {
        let v = block_to_json(&Block::divider());
        assert_eq!(v["type"], "divider");
        assert_eq!(v["divider"], json!({}));
    }

    #[test]
    fn heading_levels_map_to_distinct_kinds() {
        for (level, name) in [(1, "heading_1"), (2, "heading_2"), (3, "heading_3")] {
            let block = Block::new(BlockKind::Heading { level }, vec![Span::plain("t")]);
            assert_eq!(block_to_json(&block)["type"], name);
        }
    }

    #[test]
    fn code_block_carries_language() {
        let v = block_to_json(&Block::code("x = 1", "python"));
        assert_eq!(v["type"], "code");
        assert_eq!(v["code"]["language"], "python");
        assert_eq!(v["code"]["rich_text"][0]["text"]["content"], "x = 1");
    }

    #[test]
    fn annotations_and_link_serialize() {
        let span = Span {
            text: "see".to_string(),
            annotations: Annotations {
                bold: true,
                italic: true,
                ..Annotations::default()
            },
            link: Some(url::Url::parse("https://example.com/a").unwrap()),
        };
        let v = span_to_json(&span);
        assert_eq!(v["annotations"]["bold"], true);
        assert_eq!(v["annotations"]["italic"], true);
        assert_eq!(v["text"]["link"]["url"], "https://example.com/a");
    }
}
