use url::Url;

/// Formatting state shared by one run of text.
///
/// Mirrors the destination's annotation record minus the fields this
/// pipeline never sets (underline, color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl Annotations {
    /// True when no formatting is applied.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A run of text sharing one annotation state, optionally linked.
///
/// Invariants (enforced by the validator, relied on by the wire layer):
/// - `text` is non-empty after trimming for any span that survives
///   validation.
/// - spans with `annotations.code` set never carry a `link`.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub annotations: Annotations,
    pub link: Option<Url>,
}

impl Span {
    /// A span with no formatting and no link.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: Annotations::default(),
            link: None,
        }
    }

    /// A bold span with no link.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: Annotations {
                bold: true,
                ..Annotations::default()
            },
            link: None,
        }
    }

    /// Length in Unicode scalar values. The platform limit counts
    /// characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The kind of one destination block.
///
/// The destination format is intentionally flat: a linear sequence of
/// these, no recursive nesting. Consecutive list items of the same kind
/// are independent blocks in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A heading. Levels 1–3 are native; 4–6 only exist between the
    /// assembler and the flattener, which rewrites them into bullets.
    Heading { level: u8 },
    Paragraph,
    BulletItem,
    NumberItem,
    Quote,
    /// Horizontal rule. Carries no spans.
    Divider,
    /// Fenced code. Content is preserved verbatim, newlines included.
    Code,
}

/// One structural unit of the destination document.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Empty for `Divider`, non-empty for everything else once validated.
    pub spans: Vec<Span>,
    /// Language tag, `Code` blocks only.
    pub language: Option<String>,
}

impl Block {
    pub fn new(kind: BlockKind, spans: Vec<Span>) -> Self {
        Self {
            kind,
            spans,
            language: None,
        }
    }

    pub fn divider() -> Self {
        Self {
            kind: BlockKind::Divider,
            spans: vec![],
            language: None,
        }
    }

    pub fn code(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Code,
            spans: vec![Span::plain(text)],
            language: Some(language.into()),
        }
    }

    /// Total text length across all spans, in chars.
    pub fn char_len(&self) -> usize {
        self.spans.iter().map(Span::char_len).sum()
    }

    /// All span text concatenated, markers long gone.
    pub fn joined_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// An ordered, validated sequence of blocks. Reading order is
/// significant and preserved end-to-end; there is no block identity
/// beyond position.
///
/// A `Document` is built fresh per conversion request and consumed
/// exactly once by delivery. Nothing persists locally.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub(crate) fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Text of the first level-1 heading, used as a default page title.
    pub fn first_heading(&self) -> Option<String> {
        self.blocks
            .iter()
            .find(|b| b.kind == BlockKind::Heading { level: 1 })
            .map(Block::joined_text)
    }
}

impl IntoIterator for Document {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}
