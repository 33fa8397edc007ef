use super::cursor::Cursor;

/// An inline formatting mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Bold,
    Italic,
    Strikethrough,
    Code,
}

impl MarkKind {
    pub const BOLD: &'static str = "**";
    pub const ITALIC: &'static str = "*";
    pub const STRIKETHROUGH: &'static str = "~~";
    pub const CODE: &'static str = "`";
}

/// One token of a scanned line.
///
/// Marker characters never appear in `Text` tokens; the concatenation
/// of all `Text` payloads is the line stripped of marker syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    MarkOpen(MarkKind),
    MarkClose(MarkKind),
    /// Opens a link scope. Carries the raw, unsanitized target; the
    /// annotation builder decides whether it survives.
    LinkOpen(String),
    LinkClose,
}

/// Which marks are currently open, for toggle resolution.
#[derive(Debug, Default, Clone, Copy)]
struct OpenMarks {
    bold: bool,
    italic: bool,
    strikethrough: bool,
    code: bool,
}

/// Splits one line into literal runs and inline markers.
///
/// Marks toggle: a delimiter closes its kind if that kind is open,
/// otherwise opens it. Inline code is a raw zone; only its closing
/// backtick is recognized inside. A backtick or `[text](url)` with no
/// closing counterpart on the line stays literal text. Malformed
/// markup degrades, it never errors.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut cur = Cursor::new(line);
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut open = OpenMarks::default();
    // Byte positions where an open link's `]` lands, plus how many
    // bytes of `](url)` to skip there. Stack: links may nest.
    let mut link_closes: Vec<(usize, usize)> = Vec::new();

    while !cur.eof() {
        if open.code {
            // Raw zone: only the closing tick matters.
            if cur.peek() == Some(b'`') {
                flush_text(&mut tokens, &mut text);
                tokens.push(Token::MarkClose(MarkKind::Code));
                open.code = false;
                cur.bump_n(1);
            } else if let Some(c) = cur.bump_char() {
                text.push(c);
            }
            continue;
        }

        if let Some(&(close_at, skip)) = link_closes.last()
            && cur.pos() == close_at
        {
            flush_text(&mut tokens, &mut text);
            tokens.push(Token::LinkClose);
            link_closes.pop();
            cur.bump_n(skip);
            continue;
        }

        if cur.peek() == Some(b'`') {
            let mut probe = cur.clone();
            probe.bump_n(1);
            if probe.find(MarkKind::CODE).is_some() {
                flush_text(&mut tokens, &mut text);
                tokens.push(Token::MarkOpen(MarkKind::Code));
                open.code = true;
                cur.bump_n(1);
            } else {
                // Unclosed tick stays literal.
                text.push('`');
                cur.bump_n(1);
            }
            continue;
        }

        if cur.starts_with(MarkKind::BOLD) {
            flush_text(&mut tokens, &mut text);
            tokens.push(toggle(&mut open.bold, MarkKind::Bold));
            cur.bump_n(MarkKind::BOLD.len());
            continue;
        }

        if cur.starts_with(MarkKind::STRIKETHROUGH) {
            flush_text(&mut tokens, &mut text);
            tokens.push(toggle(&mut open.strikethrough, MarkKind::Strikethrough));
            cur.bump_n(MarkKind::STRIKETHROUGH.len());
            continue;
        }

        if cur.peek() == Some(b'*') {
            // Opening italic needs a closing `*` on the line; a lone
            // asterisk in prose stays literal. A close always applies.
            if !open.italic {
                let mut probe = cur.clone();
                probe.bump_n(1);
                if probe.find(MarkKind::ITALIC).is_none() {
                    text.push('*');
                    cur.bump_n(1);
                    continue;
                }
            }
            flush_text(&mut tokens, &mut text);
            tokens.push(toggle(&mut open.italic, MarkKind::Italic));
            cur.bump_n(1);
            continue;
        }

        if cur.peek() == Some(b'[')
            && let Some(link) = scan_link(cur.rest())
        {
            flush_text(&mut tokens, &mut text);
            tokens.push(Token::LinkOpen(link.url));
            link_closes.push((cur.pos() + 1 + link.label_len, link.tail_len));
            cur.bump_n(1); // label is tokenized like any other content
            continue;
        }

        if let Some(c) = cur.bump_char() {
            text.push(c);
        }
    }

    flush_text(&mut tokens, &mut text);
    tokens
}

fn flush_text(tokens: &mut Vec<Token>, text: &mut String) {
    if !text.is_empty() {
        tokens.push(Token::Text(std::mem::take(text)));
    }
}

fn toggle(flag: &mut bool, kind: MarkKind) -> Token {
    if *flag {
        *flag = false;
        Token::MarkClose(kind)
    } else {
        *flag = true;
        Token::MarkOpen(kind)
    }
}

struct LinkScan {
    url: String,
    /// Byte length of the label between `[` and `]`.
    label_len: usize,
    /// Byte length of `](url)`, skipped when the close fires.
    tail_len: usize,
}

/// Attempts to read `[label](url)` starting at `rest[0] == '['`.
///
/// Returns `None` when either delimiter is missing on this line, in
/// which case the bracket stays literal text.
fn scan_link(rest: &str) -> Option<LinkScan> {
    debug_assert!(rest.starts_with('['));
    let mid = rest.find("](")?;
    let close = rest[mid + 2..].find(')')? + mid + 2;
    Some(LinkScan {
        url: rest[mid + 2..close].to_string(),
        label_len: mid - 1,
        tail_len: close - mid + 1,
    })
}
