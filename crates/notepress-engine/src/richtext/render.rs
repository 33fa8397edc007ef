use super::{InlineRun, RichNode, RichTextDocument};

/// Renders the tree back to markdown.
///
/// This is the bridge that lets a structured document reuse the
/// line-oriented fallback: when full conversion of a rich-text input
/// drops content, the document is rendered to markdown and fed through
/// the conservative path instead.
pub fn to_markdown(doc: &RichTextDocument) -> String {
    let mut out = String::new();
    for node in &doc.nodes {
        render_node(node, 0, &mut out);
    }
    // One trailing newline, not a blank line.
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

fn render_node(node: &RichNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        RichNode::Heading { level, content } => {
            let hashes = "#".repeat((*level).clamp(1, 6) as usize);
            out.push_str(&format!("{hashes} {}\n\n", render_runs(content)));
        }
        RichNode::Paragraph { content } => {
            out.push_str(&format!("{indent}{}\n\n", render_runs(content)));
        }
        RichNode::BulletItem { content, children } => {
            out.push_str(&format!("{indent}- {}\n", render_runs(content)));
            for child in children {
                render_node(child, depth + 1, out);
            }
            if depth == 0 && !out.ends_with("\n\n") {
                out.push('\n');
            }
        }
        RichNode::NumberItem { content, children } => {
            out.push_str(&format!("{indent}1. {}\n", render_runs(content)));
            for child in children {
                render_node(child, depth + 1, out);
            }
            if depth == 0 && !out.ends_with("\n\n") {
                out.push('\n');
            }
        }
        RichNode::Quote { content } => {
            out.push_str(&format!("> {}\n\n", render_runs(content)));
        }
        RichNode::Code { language, text } => {
            let lang = language.as_deref().unwrap_or("");
            out.push_str(&format!("{indent}```{lang}\n"));
            for line in text.lines() {
                out.push_str(&format!("{indent}{line}\n"));
            }
            out.push_str(&format!("{indent}```\n\n"));
        }
        RichNode::Divider => out.push_str("---\n\n"),
    }
}

fn render_runs(runs: &[InlineRun]) -> String {
    runs.iter().map(render_run).collect()
}

fn render_run(run: &InlineRun) -> String {
    if run.code {
        return format!("`{}`", run.text);
    }
    let mut text = run.text.clone();
    if run.bold {
        text = format!("**{text}**");
    }
    if run.italic {
        text = format!("*{text}*");
    }
    if run.strikethrough {
        text = format!("~~{text}~~");
    }
    if let Some(link) = &run.link {
        text = format!("[{text}]({link})");
    }
    text
}
