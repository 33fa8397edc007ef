use super::inline::spans_for_line;
use super::lines::{Fence, LineClass};
use crate::limits::DEFAULT_CODE_LANGUAGE;
use crate::model::{Block, BlockKind};

/// Which list kind the assembler is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
}

/// Assembler state, one variant per accumulation mode.
///
/// There is deliberately no paragraph state: one plain line is one
/// paragraph block. Only fences accumulate across lines; the list
/// state tracks context (a blank line ends the list) without grouping,
/// since consecutive items stay independent blocks.
#[derive(Debug)]
enum LineState {
    Default,
    InCodeFence {
        language: Option<String>,
        lines: Vec<String>,
    },
    InList(ListKind),
}

/// Line-by-line block assembler, the conservative parsing strategy's
/// core. Feed lines with [`push_line`](Self::push_line), then call
/// [`finish`](Self::finish) to flush an unterminated fence.
pub struct LineAssembler {
    state: LineState,
    out: Vec<Block>,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self {
            state: LineState::Default,
            out: Vec::new(),
        }
    }

    pub fn push_line(&mut self, raw: &str) {
        if let LineState::InCodeFence { .. } = self.state {
            self.consume_fence_line(raw);
            return;
        }

        match LineClass::of(raw) {
            LineClass::Blank | LineClass::EmptyHeading => {
                self.state = LineState::Default;
            }
            LineClass::Heading { level, content } => {
                self.state = LineState::Default;
                self.out.push(Block::new(
                    BlockKind::Heading { level },
                    spans_for_line(&content),
                ));
            }
            LineClass::Bullet { content } => {
                self.state = LineState::InList(ListKind::Bullet);
                self.out
                    .push(Block::new(BlockKind::BulletItem, spans_for_line(&content)));
            }
            LineClass::Number { content } => {
                self.state = LineState::InList(ListKind::Number);
                self.out
                    .push(Block::new(BlockKind::NumberItem, spans_for_line(&content)));
            }
            LineClass::Quote { content } => {
                self.state = LineState::Default;
                self.out
                    .push(Block::new(BlockKind::Quote, spans_for_line(&content)));
            }
            LineClass::Divider => {
                self.state = LineState::Default;
                self.out.push(Block::divider());
            }
            LineClass::Fence { language } => {
                self.state = LineState::InCodeFence {
                    language,
                    lines: Vec::new(),
                };
            }
            LineClass::Text { content } => {
                self.state = LineState::Default;
                self.out
                    .push(Block::new(BlockKind::Paragraph, spans_for_line(&content)));
            }
        }
    }

    /// Flushes any open fence and returns the assembled blocks.
    pub fn finish(mut self) -> Vec<Block> {
        // Unterminated fence at EOF: emit what accumulated.
        if let LineState::InCodeFence { language, lines } =
            std::mem::replace(&mut self.state, LineState::Default)
        {
            self.out.push(code_block(language, lines));
        }
        self.out
    }

    fn consume_fence_line(&mut self, raw: &str) {
        let line = raw.trim_end_matches(['\r', '\n']);
        let LineState::InCodeFence { language, lines } =
            std::mem::replace(&mut self.state, LineState::Default)
        else {
            return;
        };
        if Fence::is_fence(line) {
            self.out.push(code_block(language, lines));
            return; // state already back to Default
        }
        let mut lines = lines;
        lines.push(line.to_string());
        self.state = LineState::InCodeFence { language, lines };
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn code_block(language: Option<String>, lines: Vec<String>) -> Block {
    Block::code(
        lines.join("\n"),
        language.unwrap_or_else(|| DEFAULT_CODE_LANGUAGE.to_string()),
    )
}

/// Assembles a whole markdown string into blocks, one pass.
pub fn assemble(markdown: &str) -> Vec<Block> {
    let mut assembler = LineAssembler::new();
    for line in markdown.lines() {
        assembler.push_line(line);
    }
    assembler.finish()
}
