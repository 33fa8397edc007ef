//! End-to-end conversion tests over the public API.

use notepress_engine::limits::MAX_SPAN_CHARS;
use notepress_engine::{BlockKind, ConvertError, RichTextDocument, convert_markdown,
    convert_rich_text};
use pretty_assertions::assert_eq;

const REPORT: &str = "\
# Quarterly Report

Revenue grew in **all** regions.

- EMEA up 4%
- APAC up 9%

---

## Notes

See [the dashboard](https://dash.example.com/q3) for details.

```sql
SELECT region, SUM(revenue) FROM sales GROUP BY region;
```
";

#[test]
fn report_converts_in_reading_order() {
    let doc = convert_markdown(REPORT).unwrap();
    let kinds: Vec<&BlockKind> = doc.blocks().iter().map(|b| &b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &BlockKind::Heading { level: 1 },
            &BlockKind::Paragraph,
            &BlockKind::BulletItem,
            &BlockKind::BulletItem,
            &BlockKind::Divider,
            &BlockKind::Heading { level: 2 },
            &BlockKind::Paragraph,
            &BlockKind::Code,
        ]
    );
}

#[test]
fn title_comes_from_first_heading() {
    let doc = convert_markdown(REPORT).unwrap();
    assert_eq!(doc.first_heading(), Some("Quarterly Report".to_string()));
}

#[test]
fn formatting_and_links_survive() {
    let doc = convert_markdown(REPORT).unwrap();
    let para = &doc.blocks()[1];
    assert!(para.spans.iter().any(|s| s.annotations.bold));
    let notes = &doc.blocks()[6];
    let linked = notes
        .spans
        .iter()
        .find(|s| s.link.is_some())
        .expect("link span");
    assert_eq!(linked.text, "the dashboard");
    assert_eq!(
        linked.link.as_ref().unwrap().as_str(),
        "https://dash.example.com/q3"
    );
}

#[test]
fn code_fences_keep_language_and_content() {
    let doc = convert_markdown(REPORT).unwrap();
    let code = doc.blocks().last().unwrap();
    assert_eq!(code.language.as_deref(), Some("sql"));
    assert!(code.joined_text().contains("GROUP BY region"));
}

#[test]
fn no_block_ever_exceeds_the_span_ceiling() {
    // Boundary-free runs force the fallback; sentence-heavy prose does
    // not. Both must land under the ceiling.
    let mut input = String::from("# Mixed\n\n");
    input.push_str(&"z".repeat(6000));
    input.push_str("\n\n");
    for _ in 0..100 {
        input.push_str("A normal sentence with several words in it. ");
    }
    let doc = convert_markdown(&input).unwrap();
    assert!(doc.blocks().iter().all(|b| b.char_len() <= MAX_SPAN_CHARS));
    let total: usize = doc
        .blocks()
        .iter()
        .filter(|b| b.kind == BlockKind::Paragraph)
        .map(|b| b.char_len())
        .sum();
    assert!(total >= 6000);
}

#[test]
fn deep_headings_flatten_to_bold_bullets() {
    let doc = convert_markdown("#### Alpha\n\n##### Beta").unwrap();
    assert_eq!(doc.len(), 2);
    for block in doc.blocks() {
        assert_eq!(block.kind, BlockKind::BulletItem);
        assert!(block.spans.iter().all(|s| s.annotations.bold));
    }
    assert_eq!(doc.blocks()[0].joined_text(), "Alpha");
    assert_eq!(doc.blocks()[1].joined_text(), "  Beta");
}

#[test]
fn malformed_markers_degrade_not_fail() {
    let doc = convert_markdown("**unclosed bold and [a bad](url_to_info) link").unwrap();
    assert_eq!(doc.len(), 1);
    assert!(doc.blocks()[0].spans.iter().all(|s| s.link.is_none()));
}

#[test]
fn whitespace_only_input_is_rejected() {
    assert!(matches!(
        convert_markdown("  \n\t\n"),
        Err(ConvertError::NoContent)
    ));
}

#[test]
fn rich_text_json_is_a_first_class_input() {
    let doc: RichTextDocument = serde_json::from_str(
        r#"{
            "nodes": [
                {"type": "heading", "level": 1, "content": [{"text": "From JSON"}]},
                {"type": "bullet_item",
                 "content": [{"text": "top"}],
                 "children": [{"type": "bullet_item", "content": [{"text": "nested"}]}]},
                {"type": "code", "language": "python", "text": "print(1)"}
            ]
        }"#,
    )
    .unwrap();
    let out = convert_rich_text(&doc).unwrap();
    assert_eq!(out.first_heading(), Some("From JSON".to_string()));
    assert_eq!(out.blocks()[2].joined_text(), "  nested");
    assert_eq!(out.blocks()[3].language.as_deref(), Some("python"));
}
