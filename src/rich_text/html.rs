//! Pseudo-HTML to rich text.
//!
//! The markup is parsed as XML inside a `<body>` wrapper. Besides the usual
//! inline and block tags, the attributes `color`, `face` and `size` are
//! honoured on any element.

use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::excel::{Font, Rgb, Script, Underline};
use crate::rich_text::{RichText, TextRun};
use crate::utils::collapse_whitespace;

/// Converter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Html2RichText {
    /// Font used for `<code>`.
    pub monospace_font: String,
    pub h1_size: f64,
    pub h2_size: f64,
    pub h3_size: f64,
}

impl Default for Html2RichText {
    fn default() -> Self {
        Self {
            monospace_font: "Courier New".to_string(),
            h1_size: 16.0,
            h2_size: 14.0,
            h3_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StartHook {
    Bold,
    Monospace,
    Strikethrough,
    Italic,
    Heading1,
    Heading2,
    Heading3,
    Underline,
    Bullet,
    Subscript,
    Superscript,
    OpenList,
}

impl StartHook {
    fn for_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "b" | "strong" | "h4" => StartHook::Bold,
            "code" => StartHook::Monospace,
            "del" => StartHook::Strikethrough,
            "em" | "i" => StartHook::Italic,
            "h1" => StartHook::Heading1,
            "h2" => StartHook::Heading2,
            "h3" => StartHook::Heading3,
            "ins" | "u" => StartHook::Underline,
            "li" => StartHook::Bullet,
            "sub" => StartHook::Subscript,
            "sup" => StartHook::Superscript,
            "ul" => StartHook::OpenList,
            _ => return None,
        })
    }

    fn modifies_font(self) -> bool {
        !matches!(self, StartHook::Bullet | StartHook::OpenList)
    }
}

#[derive(Debug, Clone, Copy)]
enum EndHook {
    LineBreak,
    Paragraph,
    EndItem,
    CloseList,
}

impl EndHook {
    fn for_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "br" => EndHook::LineBreak,
            "h1" | "h2" | "h3" | "h4" | "p" => EndHook::Paragraph,
            "li" => EndHook::EndItem,
            "ul" => EndHook::CloseList,
            _ => return None,
        })
    }
}

/// Elements after which a list does not need its own line break.
const BLOCK_BEFORE_LIST: [&str; 5] = ["br", "h1", "h2", "h3", "p"];
/// Elements which already end a list item with a line break.
const BLOCK_ENDING_ITEM: [&str; 6] = ["br", "h1", "h2", "h3", "p", "ul"];

impl Html2RichText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create rich text from markup.
    pub fn create(&self, html: &str) -> Result<RichText> {
        self.append(RichText::new(), html)
    }

    /// Append rich text created from markup to existing rich text.
    pub fn append(&self, rich_text: RichText, html: &str) -> Result<RichText> {
        let source = format!("<body>{html}</body>");
        let document = Document::parse(&source)?;

        let mut builder = Builder {
            options: self,
            rich_text,
            font: Font::default(),
            font_stack: Vec::new(),
            list_level: 0,
            pending: String::new(),
        };

        builder.parse_children(document.root_element());
        builder.add_run();

        let rich_text = builder.finish();
        log::debug!("converted markup into {} text runs", rich_text.runs().len());

        Ok(rich_text)
    }
}

struct Builder<'a> {
    options: &'a Html2RichText,
    rich_text: RichText,
    font: Font,
    font_stack: Vec<Font>,
    list_level: usize,
    pending: String,
}

impl Builder<'_> {
    fn parse_children(&mut self, parent: Node<'_, '_>) {
        let children = significant_children(parent);

        for (i, node) in children.iter().enumerate() {
            if node.is_text() {
                self.pending
                    .push_str(&collapse_whitespace(node.text().unwrap_or_default()));
                continue;
            }

            let tag = node.tag_name().name().to_lowercase();
            let start_hook = StartHook::for_tag(&tag);
            let modifies_font = start_hook.is_some_and(StartHook::modifies_font)
                || node.attributes().next().is_some();

            if modifies_font {
                self.add_run();
                self.font_stack.push(self.font.clone());
            }

            if let Some(hook) = start_hook {
                let previous = i.checked_sub(1).map(|j| children[j]);
                self.start(hook, previous);
            }

            self.apply_attributes(*node);
            self.parse_children(*node);

            if let Some(hook) = EndHook::for_tag(&tag) {
                self.end(hook, *node);
            }

            if modifies_font {
                self.add_run();
                if let Some(font) = self.font_stack.pop() {
                    self.font = font;
                }
            }
        }
    }

    fn start(&mut self, hook: StartHook, previous: Option<Node<'_, '_>>) {
        match hook {
            StartHook::Bold => self.font.bold = Some(true),
            StartHook::Monospace => self.font.name = Some(self.options.monospace_font.clone()),
            StartHook::Strikethrough => self.font.strikethrough = Some(true),
            StartHook::Italic => self.font.italic = Some(true),
            StartHook::Heading1 => self.start_heading(self.options.h1_size),
            StartHook::Heading2 => self.start_heading(self.options.h2_size),
            StartHook::Heading3 => self.start_heading(self.options.h3_size),
            StartHook::Underline => self.font.underline = Some(Underline::Single),
            StartHook::Subscript => self.font.script = Some(Script::Subscript),
            StartHook::Superscript => self.font.script = Some(Script::Superscript),
            StartHook::Bullet => {
                let indent = 3 * self.list_level.saturating_sub(1);
                self.pending.push_str(&" ".repeat(indent));
                self.pending.push_str(" • ");
            }
            StartHook::OpenList => {
                if !previous.is_some_and(|node| is_element_in(node, &BLOCK_BEFORE_LIST)) {
                    self.pending.push('\n');
                }
                self.list_level += 1;
            }
        }
    }

    fn start_heading(&mut self, size: f64) {
        self.font.bold = Some(true);
        self.font.size = Some(size);
    }

    fn end(&mut self, hook: EndHook, node: Node<'_, '_>) {
        match hook {
            EndHook::LineBreak => self.pending.push('\n'),
            EndHook::Paragraph => self.pending.push_str("\n\n"),
            EndHook::EndItem => {
                let last = significant_children(node).last().copied();
                if !last.is_some_and(|child| is_element_in(child, &BLOCK_ENDING_ITEM)) {
                    self.pending.push('\n');
                }
            }
            EndHook::CloseList => self.list_level = self.list_level.saturating_sub(1),
        }
    }

    fn apply_attributes(&mut self, node: Node<'_, '_>) {
        if let Some(color) = node.attribute("color").filter(|c| c.starts_with('#')) {
            match Rgb::parse(color) {
                Some(rgb) => self.font.color = Some(rgb),
                None => log::warn!("ignoring malformed color {color:?}"),
            }
        }

        if let Some(face) = node.attribute("face") {
            self.font.name = Some(face.to_string());
        }

        if let Some(size) = node.attribute("size") {
            match size.trim().parse::<f64>() {
                Ok(size) => self.font.size = Some(size),
                Err(_) => log::warn!("ignoring malformed font size {size:?}"),
            }
        }
    }

    fn add_run(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.rich_text
                .push(TextRun::new(text).with_font(self.font.clone()));
        }
    }

    /// Drop trailing whitespace from the end of the text.
    fn finish(mut self) -> RichText {
        let runs = self.rich_text.runs_mut();

        while let Some(last) = runs.last_mut() {
            let trimmed_len = last.text.trim_end_matches(is_php_space).len();
            last.text.truncate(trimmed_len);

            if !last.text.is_empty() {
                break;
            }
            runs.pop();
        }

        self.rich_text
    }
}

fn is_php_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B')
}

fn is_element_in(node: Node<'_, '_>, tags: &[&str]) -> bool {
    node.is_element()
        && tags
            .iter()
            .any(|tag| node.tag_name().name().eq_ignore_ascii_case(tag))
}

/// Element and text children, without whitespace-only text that merely
/// separates elements.
///
/// Whitespace-only text is kept when it is the whole content of its parent,
/// or when text has already been seen as the first or the latest kept child.
fn significant_children<'a, 'input>(parent: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    let mut kept: Vec<Node<'a, 'input>> = Vec::new();

    for child in parent.children() {
        if child.is_element() {
            kept.push(child);
            continue;
        }

        if !child.is_text() {
            continue;
        }

        let text = child.text().unwrap_or_default();
        let is_blank = text.bytes().all(|b| b.is_ascii_whitespace());

        let keep = !is_blank
            || match (kept.first(), kept.last()) {
                (None, _) => child.next_sibling().is_none(),
                (Some(first), Some(last)) => first.is_text() || last.is_text(),
                (Some(_), None) => false,
            };

        if keep {
            kept.push(child);
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn run(text: &str, font: Font) -> TextRun {
        TextRun::new(text).with_font(font)
    }

    fn bold() -> Font {
        Font {
            bold: Some(true),
            ..Default::default()
        }
    }

    fn create(html: &str) -> Vec<TextRun> {
        Html2RichText::new().create(html).unwrap().runs().to_vec()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(create("Lorem ipsum."), vec![TextRun::new("Lorem ipsum.")]);
    }

    #[test]
    fn test_attributes_on_any_element() {
        assert_eq!(
            create(r##"<b color="#ff0000" face="Times" size="18">Lorem <font>ip</font>sum.</b>"##),
            vec![run(
                "Lorem ipsum.",
                Font {
                    bold: Some(true),
                    color: Some(Rgb(0xFF0000)),
                    name: Some("Times".to_string()),
                    size: Some(18.0),
                    ..Default::default()
                }
            )]
        );
    }

    #[test]
    fn test_nested_fonts_and_case_insensitive_tags() {
        assert_eq!(
            create(" <B>Lorem <i>ipsum</i> dolor</B>  "),
            vec![
                run("Lorem ", bold()),
                run(
                    "ipsum",
                    Font {
                        italic: Some(true),
                        ..bold()
                    }
                ),
                run(" dolor", bold()),
            ]
        );
    }

    #[test]
    fn test_whitespace_and_scripts() {
        let bold_italic = Font {
            italic: Some(true),
            ..bold()
        };

        assert_eq!(
            create("\n <B><u>L</u>orem\t<i>ip<sUb>sum</sUb><suP>.</suP></i></B> dolor \n "),
            vec![
                run(
                    "L",
                    Font {
                        underline: Some(Underline::Single),
                        ..bold()
                    }
                ),
                run("orem ", bold()),
                run("ip", bold_italic.clone()),
                run(
                    "sum",
                    Font {
                        script: Some(Script::Subscript),
                        ..bold_italic.clone()
                    }
                ),
                run(
                    ".",
                    Font {
                        script: Some(Script::Superscript),
                        ..bold_italic
                    }
                ),
                TextRun::new(" dolor"),
            ]
        );
    }

    #[test]
    fn test_inline_tags_and_paragraphs() {
        assert_eq!(
            create(
                "<p><code>Lorem </code><del>ipsum <br/></del><em>dolor</em></p>\
                 <ins>sit </ins><strong>amet,</strong>"
            ),
            vec![
                run(
                    "Lorem ",
                    Font {
                        name: Some("Courier New".to_string()),
                        ..Default::default()
                    }
                ),
                run(
                    "ipsum \n",
                    Font {
                        strikethrough: Some(true),
                        ..Default::default()
                    }
                ),
                run(
                    "dolor",
                    Font {
                        italic: Some(true),
                        ..Default::default()
                    }
                ),
                TextRun::new("\n\n"),
                run(
                    "sit ",
                    Font {
                        underline: Some(Underline::Single),
                        ..Default::default()
                    }
                ),
                run("amet,", bold()),
            ]
        );
    }

    #[test]
    fn test_headings() {
        let heading = |size: f64| Font {
            size: Some(size),
            ..bold()
        };

        assert_eq!(
            create(
                r##"<h1><span color="#00ff00">H</span>eading 1</h1><h2>Heading 2</h2><h3>Heading 3</h3><h4>Heading 4</h4>"##
            ),
            vec![
                run(
                    "H",
                    Font {
                        color: Some(Rgb(0x00FF00)),
                        ..heading(16.0)
                    }
                ),
                run("eading 1\n\n", heading(16.0)),
                run("Heading 2\n\n", heading(14.0)),
                run("Heading 3\n\n", heading(12.0)),
                run("Heading 4", bold()),
            ]
        );
    }

    #[test]
    fn test_list() {
        assert_eq!(
            create("Lorem<ul><li>ip</li><li><u>sum</u></li></ul>dolor"),
            vec![
                TextRun::new("Lorem\n • ip\n • "),
                run(
                    "sum",
                    Font {
                        underline: Some(Underline::Single),
                        ..Default::default()
                    }
                ),
                TextRun::new("\ndolor"),
            ]
        );
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            create(
                "<p>Heading</p><ul><li>1</li><li>2<ul><li>2.1</li><li>2.2</li></ul></li><li>2</li></ul>"
            ),
            vec![TextRun::new(
                "Heading\n\n • 1\n • 2\n    • 2.1\n    • 2.2\n • 2"
            )]
        );
    }

    #[test]
    fn test_append_keeps_existing_runs() {
        let converter = Html2RichText::new();
        let existing = converter.create("<b>Title</b>").unwrap();

        let rich_text = converter.append(existing, "<br/>body").unwrap();

        assert_eq!(
            rich_text.runs(),
            &[run("Title", bold()), TextRun::new("\nbody")]
        );
    }

    #[test]
    fn test_whitespace_only_element_content_is_kept() {
        assert_eq!(create("<b> </b>x"), vec![run(" ", bold()), TextRun::new("x")]);
        assert_eq!(
            create("<b>a</b> <i> </i>b"),
            vec![
                run("a", bold()),
                run(
                    " ",
                    Font {
                        italic: Some(true),
                        ..Default::default()
                    }
                ),
                TextRun::new("b"),
            ]
        );
    }

    #[test]
    fn test_trailing_whitespace_only_runs_are_dropped() {
        assert_eq!(create("<b>x </b><br/>"), vec![run("x", bold())]);
        assert!(create("").is_empty());
    }

    #[test]
    fn test_custom_options() {
        let converter = Html2RichText {
            monospace_font: "Consolas".to_string(),
            h1_size: 20.0,
            ..Default::default()
        };

        let runs = converter.create("<h1><code>x</code></h1>").unwrap();

        assert_eq!(
            runs.runs(),
            &[run(
                "x",
                Font {
                    name: Some("Consolas".to_string()),
                    size: Some(20.0),
                    ..bold()
                }
            )]
        );
    }

    #[test]
    fn test_malformed_markup() {
        assert!(matches!(
            Html2RichText::new().create("<b>unclosed"),
            Err(Error::Html(_))
        ));
    }
}
