use std::borrow::Cow;
use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, Hyperlink, HyperlinkType, LineSpacing, PageMargin,
    Paragraph as DocxParagraph, Run, RunFonts, Shading, Style, StyleType, Table as DocxTable,
    TableCell, TableRow, WidthType,
};
use thiserror::Error;

use super::{Align, Block, Cell, Document, Inline, Paragraph, Table, TextStyle};

const HYPERLINK_COLOR: &str = "0563C1";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("DOCX generation failed: {0}")]
    Docx(String),
}

/// Serializes a [`Document`] into DOCX bytes.
pub fn to_docx_bytes(doc: &Document) -> Result<Vec<u8>, ExportError> {
    let mut buf = Cursor::new(Vec::new());
    assemble(doc)
        .build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn assemble(doc: &Document) -> Docx {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", 16))
        .add_style(heading_style("Heading2", "heading 2", 13))
        .add_style(heading_style("Heading3", "heading 3", 12));

    if let Some(m) = doc.margins() {
        docx = docx.page_margin(
            PageMargin::new()
                .top(m.top as i32)
                .bottom(m.bottom as i32)
                .left(m.left as i32)
                .right(m.right as i32),
        );
    }

    for block in doc.blocks() {
        docx = match block {
            Block::Paragraph(p) => docx.add_paragraph(paragraph(p)),
            Block::Table(t) => docx.add_table(table(t)),
        };
    }
    docx
}

/// Drops characters XML 1.0 cannot represent. docx-rs escapes markup but
/// writes control characters through, which leaves `document.xml` unreadable.
fn xml_safe(text: &str) -> Cow<'_, str> {
    fn allowed(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\r')
            || (c >= ' ' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
    }

    if text.chars().all(allowed) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| allowed(c)).collect())
    }
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
        .bold()
}

fn paragraph(p: &Paragraph) -> DocxParagraph {
    let mut para = DocxParagraph::new().align(alignment(p.align));

    if let Some(level) = p.heading_level {
        para = para.style(&format!("Heading{level}"));
    }

    if p.space_before_pt.is_some() || p.space_after_pt.is_some() {
        let mut spacing = LineSpacing::new();
        if let Some(pt) = p.space_before_pt {
            spacing = spacing.before(pt * 20);
        }
        if let Some(pt) = p.space_after_pt {
            spacing = spacing.after(pt * 20);
        }
        para = para.line_spacing(spacing);
    }

    for inline in &p.inlines {
        para = match inline {
            Inline::Text { text, style } => para.add_run(run(text, style)),
            Inline::Break => para.add_run(Run::new().add_break(BreakType::TextWrapping)),
            Inline::Link { label, url } => para.add_hyperlink(
                Hyperlink::new(url, HyperlinkType::External).add_run(
                    Run::new()
                        .add_text(xml_safe(label))
                        .color(HYPERLINK_COLOR)
                        .underline("single"),
                ),
            ),
        };
    }

    para
}

/// Builds a run, turning embedded newlines into line breaks.
fn run(text: &str, style: &TextStyle) -> Run {
    let text = xml_safe(text);
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            run = run.add_text(line);
        }
    }

    if style.bold {
        run = run.bold();
    }
    if style.italic {
        run = run.italic();
    }
    if style.underline {
        run = run.underline("single");
    }
    if let Some(pt) = style.size_pt {
        run = run.size(pt * 2);
    }
    if let Some(color) = style.color {
        run = run.color(color);
    }
    if let Some(font) = style.font {
        run = run.fonts(RunFonts::new().ascii(font).hi_ansi(font).cs(font));
    }
    run
}

fn table(t: &Table) -> DocxTable {
    let rows = t
        .rows
        .iter()
        .map(|cells| {
            TableRow::new(
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| table_cell(cell, t.column_widths.get(col).copied()))
                    .collect(),
            )
        })
        .collect();

    let mut table = DocxTable::new(rows).set_grid(
        t.column_widths
            .iter()
            .map(|w| *w as usize)
            .collect(),
    );
    if t.borderless {
        table = table.clear_all_border();
    }
    table
}

fn table_cell(cell: &Cell, width: Option<u32>) -> TableCell {
    let mut tc = TableCell::new();
    if let Some(w) = width {
        tc = tc.width(w as usize, WidthType::Dxa);
    }
    if let Some(fill) = cell.shading {
        tc = tc.shading(Shading::new().fill(fill));
    }
    if cell.paragraphs.is_empty() {
        // A table cell must contain at least one paragraph.
        return tc.add_paragraph(DocxParagraph::new());
    }
    for p in &cell.paragraphs {
        tc = tc.add_paragraph(paragraph(p));
    }
    tc
}

fn alignment(align: Align) -> AlignmentType {
    match align {
        Align::Left => AlignmentType::Left,
        Align::Center => AlignmentType::Center,
        Align::Right => AlignmentType::Right,
    }
}
