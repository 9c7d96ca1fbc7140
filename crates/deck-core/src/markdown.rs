//! Minimal markdown formatting for the file viewer.
//!
//! A line-based, best-effort transform covering fenced code blocks,
//! headings, bold, italic, unordered list items, and paragraphs. It is
//! deliberately not a conformant markdown engine; the [`Formatter`] trait
//! keeps it swappable for one.

/// An inline text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
    Italic(String),
}

/// A block-level element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`/`##`/`###` heading, level 1-3.
    Heading { level: u8, text: String },
    /// Fenced code block, verbatim lines.
    Code(Vec<String>),
    /// `- ` or `* ` list item.
    ListItem(Vec<Span>),
    /// Any other non-blank line.
    Paragraph(Vec<Span>),
}

/// Markdown-to-blocks transform.
pub trait Formatter {
    fn render(&self, markdown: &str) -> Vec<Block>;
}

/// The built-in line-based formatter.
#[derive(Debug, Default)]
pub struct LineFormatter;

/// Split inline `**bold**` and `*italic*` runs out of a line.
fn parse_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '*' {
            let double = i + 1 < chars.len() && chars[i + 1] == '*';
            let marker_len = if double { 2 } else { 1 };
            let needle: String = chars[i + marker_len..].iter().collect();
            let close = if double {
                needle.find("**")
            } else {
                needle.find('*')
            };
            if let Some(end) = close {
                let inner: String = needle[..end].to_string();
                if !inner.is_empty() {
                    if !plain.is_empty() {
                        spans.push(Span::Plain(std::mem::take(&mut plain)));
                    }
                    if double {
                        spans.push(Span::Bold(inner.clone()));
                    } else {
                        spans.push(Span::Italic(inner.clone()));
                    }
                    i += marker_len * 2 + inner.chars().count();
                    continue;
                }
            }
        }
        plain.push(chars[i]);
        i += 1;
    }
    if !plain.is_empty() {
        spans.push(Span::Plain(plain));
    }
    spans
}

impl Formatter for LineFormatter {
    fn render(&self, markdown: &str) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut code: Option<Vec<String>> = None;
        for line in markdown.lines() {
            if line.trim_start().starts_with("```") {
                match code.take() {
                    Some(lines) => blocks.push(Block::Code(lines)),
                    None => code = Some(Vec::new()),
                }
                continue;
            }
            if let Some(lines) = code.as_mut() {
                lines.push(line.to_string());
                continue;
            }
            if let Some(rest) = line.strip_prefix("### ") {
                blocks.push(Block::Heading {
                    level: 3,
                    text: rest.to_string(),
                });
            } else if let Some(rest) = line.strip_prefix("## ") {
                blocks.push(Block::Heading {
                    level: 2,
                    text: rest.to_string(),
                });
            } else if let Some(rest) = line.strip_prefix("# ") {
                blocks.push(Block::Heading {
                    level: 1,
                    text: rest.to_string(),
                });
            } else if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
                blocks.push(Block::ListItem(parse_spans(rest)));
            } else if !line.trim().is_empty() {
                blocks.push(Block::Paragraph(parse_spans(line)));
            }
        }
        // An unterminated fence still renders its collected lines.
        if let Some(lines) = code {
            blocks.push(Block::Code(lines));
        }
        blocks
    }
}

/// Flatten a block to display lines (the viewer draws one line per entry).
pub fn block_lines(block: &Block) -> Vec<String> {
    fn flatten(spans: &[Span]) -> String {
        spans
            .iter()
            .map(|s| match s {
                Span::Plain(t) | Span::Bold(t) | Span::Italic(t) => t.as_str(),
            })
            .collect()
    }
    match block {
        Block::Heading { text, .. } => vec![text.clone()],
        Block::Code(lines) => lines.clone(),
        Block::ListItem(spans) => vec![format!("- {}", flatten(spans))],
        Block::Paragraph(spans) => vec![flatten(spans)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str) -> Vec<Block> {
        LineFormatter.render(md)
    }

    #[test]
    fn headings() {
        let blocks = render("# Title\n## Sub\n### Deep");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, text: "Title".into() },
                Block::Heading { level: 2, text: "Sub".into() },
                Block::Heading { level: 3, text: "Deep".into() },
            ]
        );
    }

    #[test]
    fn fenced_code_verbatim() {
        let blocks = render("```\nlet x = 1;\n# not a heading\n```\nafter");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            Block::Code(vec!["let x = 1;".into(), "# not a heading".into()])
        );
        assert_eq!(blocks[1], Block::Paragraph(vec![Span::Plain("after".into())]));
    }

    #[test]
    fn unterminated_fence_still_renders() {
        let blocks = render("```\ndangling");
        assert_eq!(blocks, vec![Block::Code(vec!["dangling".into()])]);
    }

    #[test]
    fn list_items_both_markers() {
        let blocks = render("- one\n* two");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::ListItem(_)));
        assert!(matches!(blocks[1], Block::ListItem(_)));
    }

    #[test]
    fn bold_and_italic_spans() {
        let blocks = render("a **bold** and *lean* word");
        let Block::Paragraph(spans) = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            spans,
            &vec![
                Span::Plain("a ".into()),
                Span::Bold("bold".into()),
                Span::Plain(" and ".into()),
                Span::Italic("lean".into()),
                Span::Plain(" word".into()),
            ]
        );
    }

    #[test]
    fn lone_asterisk_stays_plain() {
        let blocks = render("2 * 3 = 6");
        assert_eq!(
            blocks[0],
            Block::Paragraph(vec![Span::Plain("2 * 3 = 6".into())])
        );
    }

    #[test]
    fn blank_lines_skipped() {
        let blocks = render("one\n\n\ntwo");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn block_lines_flatten() {
        let blocks = render("# H\n- **x** y");
        assert_eq!(block_lines(&blocks[0]), vec!["H"]);
        assert_eq!(block_lines(&blocks[1]), vec!["- x y"]);
    }
}
