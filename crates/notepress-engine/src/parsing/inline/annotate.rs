use url::Url;

use super::tokenizer::{MarkKind, Token, tokenize};
use crate::model::{Annotations, Span};
use crate::parsing::links::clean_url;

/// What opened a scope: a formatting mark or a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Mark(MarkKind),
    Link,
}

/// Snapshot of the annotation state at the moment a scope opened.
#[derive(Debug, Clone)]
struct Frame {
    scope: Scope,
    annotations: Annotations,
    link: Option<Url>,
}

/// Builds annotated spans from inline tokens.
///
/// Keeps the current annotation record plus a stack of snapshots, one
/// per open scope. Closing a scope restores the snapshot taken when it
/// opened, so out-of-order closes degrade instead of corrupting state.
/// A close with no matching open is ignored outright.
struct AnnotationStack {
    current: Annotations,
    link: Option<Url>,
    frames: Vec<Frame>,
    out: Vec<Span>,
}

impl AnnotationStack {
    fn new() -> Self {
        Self {
            current: Annotations::default(),
            link: None,
            frames: Vec::new(),
            out: Vec::new(),
        }
    }

    fn push(&mut self, token: Token) {
        match token {
            Token::Text(text) => self.emit(text),
            Token::MarkOpen(kind) => {
                self.open(Scope::Mark(kind));
                self.apply(kind, true);
            }
            Token::MarkClose(kind) => self.close(Scope::Mark(kind)),
            Token::LinkOpen(raw) => {
                self.open(Scope::Link);
                // A target the sanitizer rejects degrades the label to
                // plain text.
                self.link = clean_url(&raw);
            }
            Token::LinkClose => self.close(Scope::Link),
        }
    }

    fn finish(self) -> Vec<Span> {
        self.out
    }

    fn open(&mut self, scope: Scope) {
        self.frames.push(Frame {
            scope,
            annotations: self.current,
            link: self.link.clone(),
        });
    }

    fn close(&mut self, scope: Scope) {
        // Restore the snapshot of the most recent matching open; inner
        // scopes opened after it are abandoned with it.
        let Some(idx) = self.frames.iter().rposition(|f| f.scope == scope) else {
            return; // unmatched close, ignore
        };
        let frame = self.frames[idx].clone();
        self.frames.truncate(idx);
        self.current = frame.annotations;
        self.link = frame.link;
        if let Scope::Mark(kind) = scope {
            // The mark itself still ends here even if the snapshot
            // predates other marks.
            self.apply(kind, false);
        }
    }

    fn apply(&mut self, kind: MarkKind, on: bool) {
        match kind {
            MarkKind::Bold => self.current.bold = on,
            MarkKind::Italic => self.current.italic = on,
            MarkKind::Strikethrough => self.current.strikethrough = on,
            MarkKind::Code => self.current.code = on,
        }
    }

    fn emit(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        // Code spans never carry a link.
        let link = if self.current.code {
            None
        } else {
            self.link.clone()
        };

        // Merge with the previous span when nothing changed; downstream
        // tolerates fragments but fewer spans cost less everywhere.
        if let Some(last) = self.out.last_mut()
            && last.annotations == self.current
            && last.link == link
        {
            last.text.push_str(&text);
            return;
        }
        self.out.push(Span {
            text,
            annotations: self.current,
            link,
        });
    }
}

/// Runs the tokenizer and annotation stack over one line of inline
/// content, yielding its spans.
pub fn spans_for_line(line: &str) -> Vec<Span> {
    let mut stack = AnnotationStack::new();
    for token in tokenize(line) {
        stack.push(token);
    }
    stack.finish()
}
