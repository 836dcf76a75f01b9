use crate::document::{Align, Document, Paragraph, TextStyle};
use crate::models::{CandidateRecord, SocialKind};

use super::{push_social_links, ResumeTemplate, TemplateId};

const SERIF: &str = "Times New Roman";

/// Centered serif header: name, contact line, optional profile links, double rule.
pub struct ClassicTemplate;

fn profile_label(kind: SocialKind) -> &'static str {
    match kind {
        SocialKind::LinkedIn => "LinkedIn Profile",
        SocialKind::GitHub => "GitHub Profile",
        SocialKind::Portfolio => "Portfolio",
    }
}

impl ResumeTemplate for ClassicTemplate {
    fn id(&self) -> TemplateId {
        TemplateId::Classic
    }

    fn render_header(&self, doc: &mut Document, record: &CandidateRecord) {
        let mut header = Paragraph::new().align(Align::Center).text(
            record.display_name(),
            TextStyle::plain().size(18).bold().font(SERIF),
        );

        let contact_items = record.contact_items();
        if !contact_items.is_empty() {
            header.push_break();
            header.push_text(contact_items.join(" • "), TextStyle::plain().size(11));
        }

        if !record.social_links().is_empty() {
            header.push_break();
            push_social_links(&mut header, record, profile_label, " • ");
        }

        doc.add_paragraph(header);
        doc.add_paragraph(
            Paragraph::new()
                .align(Align::Center)
                .text("═".repeat(60), TextStyle::plain()),
        );
    }

    fn section_heading(&self, doc: &mut Document, title: &str) {
        doc.add_paragraph(
            Paragraph::heading(2).text(title, TextStyle::plain().font(SERIF).size(12).bold()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_header_is_single_centered_paragraph() {
        let record = CandidateRecord {
            name: Some("John Smith".to_string()),
            email: Some("john@example.com".to_string()),
            location: Some("Boston".to_string()),
            linkedin: Some("https://linkedin.com/in/john".to_string()),
            portfolio: Some("https://john.dev".to_string()),
            ..Default::default()
        };

        let mut doc = Document::new();
        ClassicTemplate.render_header(&mut doc, &record);

        let paragraphs: Vec<_> = doc.paragraphs().collect();
        assert_eq!(paragraphs.len(), 2);

        let header = paragraphs[0];
        assert_eq!(header.align, Align::Center);
        assert_eq!(
            header.plain_text(),
            "John Smith\njohn@example.com • Boston\nLinkedIn Profile • Portfolio"
        );
        assert_eq!(header.links().count(), 2);

        assert_eq!(paragraphs[1].plain_text(), "═".repeat(60));
        assert_eq!(paragraphs[1].align, Align::Center);
    }

    #[test]
    fn test_classic_header_with_name_only_has_no_breaks() {
        let record = CandidateRecord {
            name: Some("John Smith".to_string()),
            ..Default::default()
        };

        let mut doc = Document::new();
        ClassicTemplate.render_header(&mut doc, &record);

        let header = doc.paragraphs().next().unwrap();
        assert_eq!(header.plain_text(), "John Smith");
    }

    #[test]
    fn test_classic_links_without_contact() {
        let record = CandidateRecord {
            name: Some("John Smith".to_string()),
            github: Some("github.com/john".to_string()),
            ..Default::default()
        };

        let mut doc = Document::new();
        ClassicTemplate.render_header(&mut doc, &record);

        let header = doc.paragraphs().next().unwrap();
        assert_eq!(header.plain_text(), "John Smith\nGitHub Profile");
        let links: Vec<_> = header.links().collect();
        assert_eq!(links, vec![("GitHub Profile", "https://github.com/john")]);
    }

    #[test]
    fn test_classic_section_heading_uses_serif() {
        let mut doc = Document::new();
        ClassicTemplate.section_heading(&mut doc, "Education");

        let p = doc.paragraphs().next().unwrap();
        assert_eq!(p.heading_level, Some(2));
        assert_eq!(p.plain_text(), "Education");
    }
}
