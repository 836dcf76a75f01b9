use crate::document::{inches_to_twips, Align, Cell, Document, Paragraph, Table, TextStyle};
use crate::models::{CandidateRecord, SocialKind};

use super::{push_social_links, ResumeTemplate, TemplateId, ACCENT};

/// Two-row borderless grid: name | title, contact | social links, then a rule.
pub struct ModernTemplate;

const COLUMN_WIDTH: u32 = inches_to_twips(355);

impl ResumeTemplate for ModernTemplate {
    fn id(&self) -> TemplateId {
        TemplateId::Modern
    }

    fn render_header(&self, doc: &mut Document, record: &CandidateRecord) {
        let name = Paragraph::new().text(
            record.display_name(),
            TextStyle::plain().size(20).bold().color(ACCENT),
        );
        let title = Paragraph::new()
            .align(Align::Right)
            .text(record.display_title(), TextStyle::plain().size(14).italic());

        let mut contact = Paragraph::new();
        let contact_items = record.contact_items();
        if !contact_items.is_empty() {
            contact.push_text(contact_items.join(" | "), TextStyle::plain());
        }

        let mut social = Paragraph::new().align(Align::Right);
        push_social_links(&mut social, record, SocialKind::label, " | ");

        doc.add_table(
            Table::borderless(vec![COLUMN_WIDTH, COLUMN_WIDTH])
                .row(vec![Cell::new().add(name), Cell::new().add(title)])
                .row(vec![Cell::new().add(contact), Cell::new().add(social)]),
        );

        doc.add_paragraph(Paragraph::new().text("_".repeat(80), TextStyle::plain()));
    }

    fn section_heading(&self, doc: &mut Document, title: &str) {
        doc.add_paragraph(
            Paragraph::heading(2).text(title, TextStyle::plain().color(ACCENT).size(14)),
        );
    }
}
