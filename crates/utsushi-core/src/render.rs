use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use utsushi_types::DisplayStyle;

/// Display-ready text plus the style it is drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub body: String,
    pub style: DisplayStyle,
}

impl RichText {
    pub fn render(markdown: &str, style: &DisplayStyle) -> Self {
        Self {
            body: markdown_to_text(markdown),
            style: style.clone(),
        }
    }
}

/// Flatten markdown into readable plain text. Tables keep their cells
/// separated by ` | `, lists get bullets or numbers.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    // One entry per open list: next number for ordered lists
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut cell_index = 0usize;

    for event in Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::List(start)) => {
                end_line(&mut out);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                end_line(&mut out);
                out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        out.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => out.push_str("• "),
                }
            }
            Event::End(TagEnd::Item) => end_line(&mut out),
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Heading(_)) => {
                if lists.is_empty() {
                    out.push_str("\n\n");
                } else {
                    end_line(&mut out);
                }
            }
            Event::End(TagEnd::CodeBlock) => out.push('\n'),
            Event::Start(Tag::TableRow) | Event::Start(Tag::TableHead) => cell_index = 0,
            Event::Start(Tag::TableCell) => {
                if cell_index > 0 {
                    out.push_str(" | ");
                }
                cell_index += 1;
            }
            Event::End(TagEnd::TableRow) | Event::End(TagEnd::TableHead) => out.push('\n'),
            Event::End(TagEnd::Table) => out.push('\n'),
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            // Stray angle brackets in a translation are text, not markup
            Event::Html(html) | Event::InlineHtml(html) => out.push_str(&html),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Rule => {
                end_line(&mut out);
                out.push_str("――――\n\n");
            }
            _ => {}
        }
    }

    out.trim_end().to_string()
}

fn end_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(markdown_to_text("Bonjour"), "Bonjour");
    }

    #[test]
    fn test_emphasis_and_headings_are_flattened() {
        let text = markdown_to_text("# Title\n\nSome **bold** and *italic* `code`.");
        assert_eq!(text, "Title\n\nSome bold and italic code.");
    }

    #[test]
    fn test_lists() {
        let text = markdown_to_text("- one\n- two\n\n1. first\n2. second");
        assert!(text.contains("• one\n• two"), "{text}");
        assert!(text.contains("1. first\n2. second"), "{text}");
    }

    #[test]
    fn test_tables_keep_cells_apart() {
        let text = markdown_to_text("| ja | en |\n|----|----|\n| 猫 | cat |");
        assert_eq!(text, "ja | en\n猫 | cat");
    }

    #[test]
    fn test_line_breaks_survive() {
        assert_eq!(markdown_to_text("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn test_angle_brackets_are_kept() {
        assert_eq!(markdown_to_text("Press `<ctrl>+x` or <alt>"), "Press <ctrl>+x or <alt>");
    }

    #[test]
    fn test_rich_text_carries_style() {
        let style = DisplayStyle {
            font_size: 20,
            ..DisplayStyle::default()
        };
        let rich = RichText::render("**hi**", &style);
        assert_eq!(rich.body, "hi");
        assert_eq!(rich.style.font_size, 20);
    }
}
