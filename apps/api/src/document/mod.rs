//! In-memory document accumulator.
//!
//! Template renderers and the section composer append blocks to a [`Document`];
//! [`docx::to_docx_bytes`] serializes the finished document. Keeping the model
//! separate from `docx-rs` lets layouts be inspected without unpacking a zip.

pub mod docx;

use reqwest::Url;
use tracing::warn;

/// Inches to twentieths of a point (DOCX "dxa" units).
pub const fn inches_to_twips(hundredths_of_inch: u32) -> u32 {
    hundredths_of_inch * 1440 / 100
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Character formatting for a run of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub size_pt: Option<usize>,
    /// Hex RGB without the leading `#`.
    pub color: Option<&'static str>,
    pub font: Option<&'static str>,
}

impl TextStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn size(mut self, pt: usize) -> Self {
        self.size_pt = Some(pt);
        self
    }

    pub fn color(mut self, hex: &'static str) -> Self {
        self.color = Some(hex);
        self
    }

    pub fn font(mut self, name: &'static str) -> Self {
        self.font = Some(name);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text { text: String, style: TextStyle },
    Link { label: String, url: String },
    Break,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub align: Align,
    /// `Some(n)` renders the paragraph with the "Heading n" style.
    pub heading_level: Option<u8>,
    pub space_before_pt: Option<u32>,
    pub space_after_pt: Option<u32>,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(level: u8) -> Self {
        Self {
            heading_level: Some(level),
            ..Self::default()
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn space_before(mut self, pt: u32) -> Self {
        self.space_before_pt = Some(pt);
        self
    }

    pub fn space_after(mut self, pt: u32) -> Self {
        self.space_after_pt = Some(pt);
        self
    }

    pub fn text(mut self, text: impl Into<String>, style: TextStyle) -> Self {
        self.push_text(text, style);
        self
    }

    pub fn push_text(&mut self, text: impl Into<String>, style: TextStyle) {
        self.inlines.push(Inline::Text {
            text: text.into(),
            style,
        });
    }

    pub fn push_break(&mut self) {
        self.inlines.push(Inline::Break);
    }

    /// Appends a hyperlink. If the target cannot be turned into a URL the label
    /// is appended as plain text instead.
    pub fn push_link(&mut self, label: &str, target: &str) {
        match normalize_link(target) {
            Ok(url) => self.inlines.push(Inline::Link {
                label: label.to_string(),
                url,
            }),
            Err(reason) => {
                warn!("Could not create hyperlink for {label} ({target}): {reason}");
                self.push_text(label, TextStyle::plain());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }
}

#[cfg(test)]
impl Paragraph {
    /// Concatenated text with breaks rendered as `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Text { text, .. } => out.push_str(text),
                Inline::Link { label, .. } => out.push_str(label),
                Inline::Break => out.push('\n'),
            }
        }
        out
    }

    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inlines.iter().filter_map(|i| match i {
            Inline::Link { label, url } => Some((label.as_str(), url.as_str())),
            _ => None,
        })
    }
}

/// Resolves a user-supplied profile link to an absolute URL.
/// Scheme-less values such as `github.com/jane` are assumed to be `https`.
fn normalize_link(target: &str) -> Result<String, String> {
    let target = target.trim();
    if target.is_empty() {
        return Err("empty link target".to_string());
    }
    if target.chars().any(char::is_whitespace) {
        return Err("link target contains whitespace".to_string());
    }

    let candidate = if target.contains("://") || target.starts_with("mailto:") {
        target.to_string()
    } else {
        format!("https://{target}")
    };

    let url = Url::parse(&candidate).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() && url.scheme() != "mailto" {
        return Err(format!("unsupported link target '{target}'"));
    }
    Ok(url.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Background fill, hex RGB.
    pub shading: Option<&'static str>,
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shaded(hex: &'static str) -> Self {
        Self {
            shading: Some(hex),
            paragraphs: Vec::new(),
        }
    }

    pub fn add(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column widths in twips.
    pub column_widths: Vec<u32>,
    pub borderless: bool,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn borderless(column_widths: Vec<u32>) -> Self {
        Self {
            column_widths,
            borderless: true,
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }
}

#[cfg(test)]
impl Table {
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// Page margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

/// A document built by successive appends, serialized once at the end.
#[derive(Debug, Clone, Default)]
pub struct Document {
    blocks: Vec<Block>,
    margins: Option<Margins>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = Some(margins);
    }

    pub fn margins(&self) -> Option<Margins> {
        self.margins
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

#[cfg(test)]
impl Document {
    /// Top-level paragraphs, skipping tables.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Every paragraph in document order, including those inside table cells.
    pub fn all_paragraphs(&self) -> Vec<&Paragraph> {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => out.push(p),
                Block::Table(t) => {
                    for row in &t.rows {
                        for cell in row {
                            out.extend(cell.paragraphs.iter());
                        }
                    }
                }
            }
        }
        out
    }
}
