use pulldown_cmark::{
    CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};

use super::{InlineRun, RichNode, RichTextDocument};

/// Parses markdown into a rich-text tree, the full strategy's front
/// half. Nested lists keep their structure (children live on their
/// parent item); everything else lands flat at the root in reading
/// order.
pub fn document_from_markdown(markdown: &str) -> RichTextDocument {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);

    let mut builder = TreeBuilder::new();
    for event in parser {
        builder.process(event);
    }
    builder.finish()
}

/// Inline formatting currently in effect, driven by Start/End events.
#[derive(Debug, Default, Clone)]
struct InlineState {
    bold: bool,
    italic: bool,
    strikethrough: bool,
    link: Option<String>,
}

/// A list item under construction: its own content plus any nested
/// nodes that arrive before its `End(Item)`.
#[derive(Debug, Default)]
struct ItemFrame {
    ordered: bool,
    content: Vec<InlineRun>,
    children: Vec<RichNode>,
}

/// An open code block accumulating raw text.
#[derive(Debug)]
struct CodeFrame {
    language: Option<String>,
    text: String,
}

struct TreeBuilder {
    nodes: Vec<RichNode>,
    /// Open list items, innermost last. Completed nodes attach to the
    /// innermost open item, or to the root when none is open.
    items: Vec<ItemFrame>,
    /// Open lists: `true` for ordered. An item belongs to the list
    /// that was open when it started.
    lists: Vec<bool>,
    /// Open blockquote count. Paragraphs inside become Quote nodes;
    /// deeper nesting collapses (quotes-in-lists are a non-goal).
    quote_depth: usize,
    inline: InlineState,
    runs: Vec<InlineRun>,
    code: Option<CodeFrame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            items: Vec::new(),
            lists: Vec::new(),
            quote_depth: 0,
            inline: InlineState::default(),
            runs: Vec::new(),
            code: None,
        }
    }

    fn process(&mut self, event: Event<'_>) {
        match event {
            // A new leaf starting while runs are pending means a tight
            // list item's own text: flush it into the item first.
            Event::Start(Tag::Paragraph) | Event::Start(Tag::Heading { .. }) => {
                self.end_paragraph();
            }
            Event::End(TagEnd::Paragraph) => self.end_paragraph(),
            Event::End(TagEnd::Heading(level)) => {
                let content = std::mem::take(&mut self.runs);
                if !content.is_empty() {
                    self.attach(RichNode::Heading {
                        level: heading_level(level),
                        content,
                    });
                }
            }

            Event::Start(Tag::List(first)) => {
                self.end_paragraph();
                self.lists.push(first.is_some());
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
            }
            Event::Start(Tag::Item) => {
                self.end_paragraph();
                self.items.push(ItemFrame {
                    ordered: self.lists.last().copied().unwrap_or(false),
                    ..ItemFrame::default()
                });
            }
            Event::End(TagEnd::Item) => self.end_item(),

            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                        Some(lang.to_ascii_lowercase())
                    }
                    _ => None,
                };
                self.code = Some(CodeFrame {
                    language,
                    text: String::new(),
                });
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(frame) = self.code.take() {
                    self.attach(RichNode::Code {
                        language: frame.language,
                        text: frame.text.trim_end_matches('\n').to_string(),
                    });
                }
            }

            Event::Start(Tag::BlockQuote(_)) => self.quote_depth += 1,
            Event::End(TagEnd::BlockQuote(_)) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }

            Event::Rule => self.attach(RichNode::Divider),

            Event::Text(text) => {
                if let Some(code) = self.code.as_mut() {
                    code.text.push_str(&text);
                } else {
                    self.push_text(&text);
                }
            }
            Event::Code(code) => {
                let run = InlineRun {
                    code: true,
                    ..self.run_for(&code)
                };
                self.push_run(run);
            }
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),

            Event::Start(Tag::Strong) => self.inline.bold = true,
            Event::End(TagEnd::Strong) => self.inline.bold = false,
            Event::Start(Tag::Emphasis) => self.inline.italic = true,
            Event::End(TagEnd::Emphasis) => self.inline.italic = false,
            Event::Start(Tag::Strikethrough) => self.inline.strikethrough = true,
            Event::End(TagEnd::Strikethrough) => self.inline.strikethrough = false,
            Event::Start(Tag::Link { dest_url, .. }) => {
                self.inline.link = Some(dest_url.to_string());
            }
            Event::End(TagEnd::Link) => self.inline.link = None,

            // Tables, HTML, footnotes, images: outside the target
            // format, skipped.
            _ => {}
        }
    }

    fn finish(mut self) -> RichTextDocument {
        // Tolerate truncated input: flush whatever is still open.
        self.end_paragraph();
        while !self.items.is_empty() {
            self.end_item();
        }
        if let Some(frame) = self.code.take() {
            self.attach(RichNode::Code {
                language: frame.language,
                text: frame.text.trim_end_matches('\n').to_string(),
            });
        }
        RichTextDocument { nodes: self.nodes }
    }

    /// Attaches a completed node to the innermost open item, or the
    /// root.
    fn attach(&mut self, node: RichNode) {
        match self.items.last_mut() {
            Some(item) => item.children.push(node),
            None => self.nodes.push(node),
        }
    }

    fn end_paragraph(&mut self) {
        let runs = std::mem::take(&mut self.runs);
        if runs.is_empty() {
            return;
        }
        // The first paragraph of a list item is the item's own text.
        if let Some(item) = self.items.last_mut()
            && item.content.is_empty()
        {
            item.content = runs;
            return;
        }
        let node = if self.quote_depth > 0 {
            RichNode::Quote { content: runs }
        } else {
            RichNode::Paragraph { content: runs }
        };
        self.attach(node);
    }

    fn end_item(&mut self) {
        // Tight list items carry their text without a paragraph wrapper.
        self.end_paragraph();
        let Some(frame) = self.items.pop() else {
            return;
        };
        let node = if frame.ordered {
            RichNode::NumberItem {
                content: frame.content,
                children: frame.children,
            }
        } else {
            RichNode::BulletItem {
                content: frame.content,
                children: frame.children,
            }
        };
        self.attach(node);
    }

    fn run_for(&self, text: &str) -> InlineRun {
        InlineRun {
            text: text.to_string(),
            bold: self.inline.bold,
            italic: self.inline.italic,
            strikethrough: self.inline.strikethrough,
            code: false,
            link: self.inline.link.clone(),
        }
    }

    fn push_text(&mut self, text: &str) {
        let run = self.run_for(text);
        self.push_run(run);
    }

    fn push_run(&mut self, run: InlineRun) {
        if run.text.is_empty() {
            return;
        }
        if let Some(last) = self.runs.last_mut()
            && last.same_style(&run)
        {
            last.text.push_str(&run.text);
            return;
        }
        self.runs.push(run);
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
