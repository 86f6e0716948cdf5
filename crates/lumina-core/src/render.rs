//! Line-oriented document renderer.
//!
//! This is deliberately not a Markdown parser. Each physical line is
//! classified independently by its literal prefix, with no lookbehind and
//! no nested structure. Code fences are not parsed at all: every fence
//! line becomes its own placeholder block, so a fenced region yields two
//! placeholders with paragraphs in between.

/// A classified structural unit of a post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Quote(String),
    CodePlaceholder,
    LineBreak,
    Paragraph(String),
}

/// Map raw body text to an ordered block sequence, one block per line.
#[must_use]
pub fn render(content: &str) -> Vec<Block> {
    content.lines().map(classify_line).collect()
}

/// Prefix checks run longest-first so `### ` is never misread as `# `.
fn classify_line(line: &str) -> Block {
    if let Some(text) = line.strip_prefix("### ") {
        return Block::Heading {
            level: 3,
            text: text.to_string(),
        };
    }
    if let Some(text) = line.strip_prefix("## ") {
        return Block::Heading {
            level: 2,
            text: text.to_string(),
        };
    }
    if let Some(text) = line.strip_prefix("# ") {
        return Block::Heading {
            level: 1,
            text: text.to_string(),
        };
    }
    if let Some(text) = line.strip_prefix("> ") {
        return Block::Quote(text.to_string());
    }
    if line.starts_with("```") {
        return Block::CodePlaceholder;
    }
    if line.trim().is_empty() {
        return Block::LineBreak;
    }
    Block::Paragraph(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Block, render};

    #[test]
    fn classifies_heading_break_paragraph() {
        let blocks = render("# Title\n\nBody text");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                Block::LineBreak,
                Block::Paragraph("Body text".to_string()),
            ]
        );
    }

    #[test]
    fn heading_levels_resolve_longest_prefix_first() {
        let blocks = render("# One\n## Two\n### Three");
        let levels: Vec<u8> = blocks
            .iter()
            .map(|b| match b {
                Block::Heading { level, .. } => *level,
                other => panic!("expected heading, got {other:?}"),
            })
            .collect();
        assert_eq!(levels, [1, 2, 3]);
    }

    #[test]
    fn quote_strips_marker_only() {
        assert_eq!(
            render("> wise words"),
            vec![Block::Quote("wise words".to_string())]
        );
    }

    #[test]
    fn fenced_region_yields_two_placeholders() {
        let blocks = render("```rust\nlet x = 1;\n```");
        assert_eq!(
            blocks,
            vec![
                Block::CodePlaceholder,
                Block::Paragraph("let x = 1;".to_string()),
                Block::CodePlaceholder,
            ]
        );
    }

    #[test]
    fn whitespace_only_line_is_a_break() {
        assert_eq!(render("   \t"), vec![Block::LineBreak]);
        assert_eq!(render(""), Vec::<Block>::new());
    }

    #[test]
    fn prefix_without_trailing_space_is_a_paragraph() {
        // `#Title` and `>quote` have no literal marker-plus-space prefix.
        assert_eq!(
            render("#Title"),
            vec![Block::Paragraph("#Title".to_string())]
        );
        assert_eq!(
            render(">quote"),
            vec![Block::Paragraph(">quote".to_string())]
        );
    }

    #[test]
    fn paragraph_keeps_raw_line_text() {
        let raw = "1. **Clarity**: The interface should be self-explanatory.";
        assert_eq!(render(raw), vec![Block::Paragraph(raw.to_string())]);
    }
}
