use std::sync::LazyLock;

use regex::Regex;

/// Matches a numbered list marker: digits, a dot, then whitespace.
static NUMBER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+").expect("numbered list marker regex"));

/// Code fence syntax knowledge, owned here so the assembler never
/// inspects raw delimiters itself.
pub struct Fence;

impl Fence {
    pub const MARKER: &'static str = "```";

    /// Whether a line opens or closes a fence.
    pub fn is_fence(line: &str) -> bool {
        line.trim_start().starts_with(Self::MARKER)
    }

    /// The language tag declared on an opening fence line, lowercased.
    pub fn language(line: &str) -> Option<String> {
        let tag = line.trim_start().strip_prefix(Self::MARKER)?.trim();
        if tag.is_empty() {
            None
        } else {
            Some(tag.to_ascii_lowercase())
        }
    }
}

/// Classification of one line, local facts only.
///
/// Owned content strings have their structural marker already stripped;
/// inline parsing runs on them downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    Blank,
    /// `#`–`######` with non-empty content. Levels above 3 get
    /// flattened later; levels above 6 are not headings at all.
    Heading { level: u8, content: String },
    /// A heading marker with nothing after it. Dropped outright, never
    /// a block.
    EmptyHeading,
    Bullet { content: String },
    Number { content: String },
    Quote { content: String },
    Divider,
    /// An opening/closing fence line with its declared language.
    Fence { language: Option<String> },
    /// Anything else: one paragraph line.
    Text { content: String },
}

impl LineClass {
    /// Classifies a line outside of any code fence.
    pub fn of(line: &str) -> Self {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() {
            return Self::Blank;
        }

        if Fence::is_fence(trimmed) {
            return Self::Fence {
                language: Fence::language(trimmed),
            };
        }

        if let Some(class) = try_heading(trimmed) {
            return class;
        }

        match trimmed.trim() {
            "---" | "***" | "___" => return Self::Divider,
            _ => {}
        }

        let stripped = trimmed.trim_start();
        if let Some(content) = stripped
            .strip_prefix("- ")
            .or_else(|| stripped.strip_prefix("* "))
        {
            return Self::Bullet {
                content: content.to_string(),
            };
        }

        if let Some(m) = NUMBER_MARKER.find(stripped) {
            return Self::Number {
                content: stripped[m.end()..].to_string(),
            };
        }

        if let Some(rest) = stripped.strip_prefix('>') {
            return Self::Quote {
                content: rest.strip_prefix(' ').unwrap_or(rest).to_string(),
            };
        }

        Self::Text {
            content: trimmed.to_string(),
        }
    }
}

/// Reads a `#`-run heading marker. More than six hashes is not a
/// heading; a marker with no content is an [`LineClass::EmptyHeading`].
fn try_heading(line: &str) -> Option<LineClass> {
    let stripped = line.trim_start();
    if !stripped.starts_with('#') {
        return None;
    }
    let level = stripped.bytes().take_while(|&b| b == b'#').count();
    if level > 6 {
        return None;
    }
    let content = stripped[level..].trim();
    if content.is_empty() {
        return Some(LineClass::EmptyHeading);
    }
    Some(LineClass::Heading {
        level: level as u8,
        content: content.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn blank_lines() {
        assert_eq!(LineClass::of(""), LineClass::Blank);
        assert_eq!(LineClass::of("   \n"), LineClass::Blank);
    }

    #[rstest]
    #[case("# Title", 1, "Title")]
    #[case("### Deep", 3, "Deep")]
    #[case("###### Deepest", 6, "Deepest")]
    #[case("##Tight", 2, "Tight")]
    fn heading_levels(#[case] line: &str, #[case] level: u8, #[case] content: &str) {
        assert_eq!(
            LineClass::of(line),
            LineClass::Heading {
                level,
                content: content.to_string()
            }
        );
    }

    #[test]
    fn content_free_heading_is_dropped() {
        assert_eq!(LineClass::of("##"), LineClass::EmptyHeading);
        assert_eq!(LineClass::of("#   "), LineClass::EmptyHeading);
    }

    #[test]
    fn seven_hashes_is_not_a_heading() {
        assert!(matches!(
            LineClass::of("####### too deep"),
            LineClass::Text { .. }
        ));
    }

    #[rstest]
    #[case("---")]
    #[case("***")]
    #[case("___")]
    fn divider_lines(#[case] line: &str) {
        assert_eq!(LineClass::of(line), LineClass::Divider);
    }

    #[test]
    fn bullet_items_both_markers() {
        assert_eq!(
            LineClass::of("- item"),
            LineClass::Bullet {
                content: "item".to_string()
            }
        );
        assert_eq!(
            LineClass::of("* item"),
            LineClass::Bullet {
                content: "item".to_string()
            }
        );
    }

    #[test]
    fn numbered_items() {
        assert_eq!(
            LineClass::of("12. twelfth"),
            LineClass::Number {
                content: "twelfth".to_string()
            }
        );
        // No dot, no list.
        assert!(matches!(LineClass::of("12 things"), LineClass::Text { .. }));
    }

    #[test]
    fn quote_with_and_without_space() {
        assert_eq!(
            LineClass::of("> quoted"),
            LineClass::Quote {
                content: "quoted".to_string()
            }
        );
        assert_eq!(
            LineClass::of(">tight"),
            LineClass::Quote {
                content: "tight".to_string()
            }
        );
    }

    #[test]
    fn fence_with_language() {
        assert_eq!(
            LineClass::of("```Rust"),
            LineClass::Fence {
                language: Some("rust".to_string())
            }
        );
        assert_eq!(LineClass::of("```"), LineClass::Fence { language: None });
    }

    #[test]
    fn plain_text_falls_through() {
        assert_eq!(
            LineClass::of("just a sentence."),
            LineClass::Text {
                content: "just a sentence.".to_string()
            }
        );
    }
}
