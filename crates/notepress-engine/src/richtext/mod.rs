//! The structured rich-text document: the alternate input format and
//! the full parsing strategy's intermediate representation.
//!
//! An ordered tree of block nodes carrying inline runs. Unlike the
//! flat output [`Block`](crate::model::Block) model, list items here
//! keep their children, which is what lets the full strategy lower
//! nested lists with visual indentation.

mod lower;
mod markdown;
mod render;

pub use lower::lower_document;
pub use markdown::document_from_markdown;
pub use render::to_markdown;

use serde::{Deserialize, Serialize};

/// One inline run: text plus the formatting that applies to it.
///
/// The link target is carried raw here; sanitization happens during
/// lowering so that a document supplied as JSON gets the same URL
/// hygiene as parsed markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineRun {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default)]
    pub link: Option<String>,
}

impl InlineRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            strikethrough: false,
            code: false,
            link: None,
        }
    }

    /// Formatting flags only, for merge comparisons.
    fn same_style(&self, other: &Self) -> bool {
        self.bold == other.bold
            && self.italic == other.italic
            && self.strikethrough == other.strikethrough
            && self.code == other.code
            && self.link == other.link
    }
}

/// One node of the rich-text tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichNode {
    Heading {
        level: u8,
        content: Vec<InlineRun>,
    },
    Paragraph {
        content: Vec<InlineRun>,
    },
    BulletItem {
        content: Vec<InlineRun>,
        #[serde(default)]
        children: Vec<RichNode>,
    },
    NumberItem {
        content: Vec<InlineRun>,
        #[serde(default)]
        children: Vec<RichNode>,
    },
    Quote {
        content: Vec<InlineRun>,
    },
    Code {
        #[serde(default)]
        language: Option<String>,
        text: String,
    },
    Divider,
}

/// An ordered tree of block nodes, the unit the full strategy works on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RichTextDocument {
    pub nodes: Vec<RichNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_tagged_json() {
        let doc: RichTextDocument = serde_json::from_str(
            r#"{
                "nodes": [
                    {"type": "heading", "level": 1, "content": [{"text": "Title"}]},
                    {"type": "bullet_item", "content": [{"text": "item", "bold": true}]},
                    {"type": "divider"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.nodes.len(), 3);
        assert_eq!(
            doc.nodes[0],
            RichNode::Heading {
                level: 1,
                content: vec![InlineRun::plain("Title")],
            }
        );
        assert!(matches!(
            &doc.nodes[1],
            RichNode::BulletItem { content, children }
                if content[0].bold && children.is_empty()
        ));
    }

    #[test]
    fn serializes_back_to_same_shape() {
        let doc = RichTextDocument {
            nodes: vec![RichNode::Divider],
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["nodes"][0]["type"], "divider");
    }
}
