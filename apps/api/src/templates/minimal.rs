use crate::document::{Document, Paragraph, TextStyle};
use crate::models::{CandidateRecord, SocialKind};

use super::{push_social_links, ResumeTemplate, TemplateId};

const SANS: &str = "Calibri";
const GREY: &str = "606060";
const LIGHT_GREY: &str = "C0C0C0";

/// Stacked paragraphs: name, grey title, contact line, links, light rule.
pub struct MinimalTemplate;

impl ResumeTemplate for MinimalTemplate {
    fn id(&self) -> TemplateId {
        TemplateId::Minimal
    }

    fn render_header(&self, doc: &mut Document, record: &CandidateRecord) {
        doc.add_paragraph(Paragraph::new().text(
            record.display_name(),
            TextStyle::plain().size(24).bold().font(SANS),
        ));
        doc.add_paragraph(
            Paragraph::new()
                .space_after(12)
                .text(record.display_title(), TextStyle::plain().size(12).color(GREY)),
        );

        let contact_items = record.contact_items();
        if !contact_items.is_empty() {
            doc.add_paragraph(
                Paragraph::new().text(contact_items.join(" • "), TextStyle::plain()),
            );
        }

        let mut social = Paragraph::new();
        push_social_links(&mut social, record, SocialKind::label, " • ");
        if !social.is_empty() {
            doc.add_paragraph(social);
        }

        doc.add_paragraph(
            Paragraph::new()
                .space_after(12)
                .text("―".repeat(50), TextStyle::plain().color(LIGHT_GREY)),
        );
    }

    fn section_heading(&self, doc: &mut Document, title: &str) {
        doc.add_paragraph(
            Paragraph::new()
                .space_before(12)
                .space_after(6)
                .text(title, TextStyle::plain().bold().size(12).font(SANS)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_stacks_present_fields() {
        let record = CandidateRecord {
            name: Some("Kai".to_string()),
            job_title: Some("Data Scientist".to_string()),
            phone: Some("555-0111".to_string()),
            linkedin: Some("https://linkedin.com/in/kai".to_string()),
            github: Some("https://github.com/kai".to_string()),
            ..Default::default()
        };

        let mut doc = Document::new();
        MinimalTemplate.render_header(&mut doc, &record);

        let texts: Vec<_> = doc.paragraphs().map(|p| p.plain_text()).collect();
        assert_eq!(
            texts,
            vec![
                "Kai".to_string(),
                "Data Scientist".to_string(),
                "555-0111".to_string(),
                "LinkedIn • GitHub".to_string(),
                "―".repeat(50),
            ]
        );
    }

    #[test]
    fn test_minimal_title_has_trailing_space() {
        let mut doc = Document::new();
        MinimalTemplate.render_header(&mut doc, &CandidateRecord::default());

        let title = doc.paragraphs().nth(1).unwrap();
        assert_eq!(title.space_after_pt, Some(12));
    }

    #[test]
    fn test_minimal_omits_empty_contact_and_links() {
        let mut doc = Document::new();
        MinimalTemplate.render_header(&mut doc, &CandidateRecord::default());

        assert_eq!(doc.paragraphs().count(), 3);
    }

    #[test]
    fn test_minimal_section_heading_is_spaced_bold_paragraph() {
        let mut doc = Document::new();
        MinimalTemplate.section_heading(&mut doc, "Languages");

        let p = doc.paragraphs().next().unwrap();
        assert_eq!(p.heading_level, None);
        assert_eq!(p.space_before_pt, Some(12));
        assert_eq!(p.space_after_pt, Some(6));
        assert_eq!(p.plain_text(), "Languages");
    }
}
