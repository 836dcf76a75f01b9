use crate::document::{inches_to_twips, Cell, Document, Paragraph, Table, TextStyle};
use crate::models::CandidateRecord;

use super::{ResumeTemplate, TemplateId, ACCENT, WHITE};

const SIDEBAR_WIDTH: u32 = inches_to_twips(200);
const MAIN_WIDTH: u32 = inches_to_twips(450);

/// Colored sidebar with name, contact and link labels; job title in the main column.
///
/// Sidebar link labels are underlined text without targets.
pub struct CreativeTemplate;

impl ResumeTemplate for CreativeTemplate {
    fn id(&self) -> TemplateId {
        TemplateId::Creative
    }

    fn render_header(&self, doc: &mut Document, record: &CandidateRecord) {
        let white = || TextStyle::plain().color(WHITE);

        let mut sidebar = Cell::shaded(ACCENT);
        sidebar.push(Paragraph::new().text(record.display_name(), white().size(16).bold()));
        sidebar.push(Paragraph::new().text("CONTACT", white().bold()));

        for item in [&record.email, &record.phone].into_iter().flatten() {
            sidebar.push(Paragraph::new().text(item.as_str(), white().size(9)));
        }

        let links = record.social_links();
        if !links.is_empty() {
            sidebar.push(
                Paragraph::new()
                    .space_before(12)
                    .text("LINKS", white().bold()),
            );
            for (kind, _) in links {
                sidebar.push(Paragraph::new().text(kind.label(), white().size(9).underline()));
            }
        }

        let main = Cell::new().add(Paragraph::new().text(
            record.display_title(),
            TextStyle::plain().size(14).bold().color(ACCENT),
        ));

        doc.add_table(Table::borderless(vec![SIDEBAR_WIDTH, MAIN_WIDTH]).row(vec![sidebar, main]));
    }

    fn section_heading(&self, doc: &mut Document, title: &str) {
        doc.add_paragraph(Paragraph::new().text(
            title.to_uppercase(),
            TextStyle::plain().bold().size(11).color(ACCENT),
        ));
    }
}
