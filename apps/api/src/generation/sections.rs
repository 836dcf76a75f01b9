//! Section composer: turns free-form model output into headings and body paragraphs.
//!
//! The text is split on blank lines. A chunk whose opening characters mention a
//! known section keyword is treated as `heading line + body`; everything else is
//! appended as a plain paragraph. Output without blank-line separators therefore
//! lands in a single paragraph.

use tracing::debug;

use crate::document::{Document, Paragraph, TextStyle};
use crate::templates::ResumeTemplate;

/// Keywords that mark a chunk as the start of a resume section.
pub const SECTION_KEYWORDS: [&str; 6] = [
    "SUMMARY",
    "EXPERIENCE",
    "SKILLS",
    "EDUCATION",
    "CERTIFICATIONS",
    "LANGUAGES",
];

/// How many leading characters of a chunk are inspected for a keyword.
pub const HEADING_WINDOW_CHARS: usize = 30;

/// Decides whether a chunk of generated text opens a new section.
pub trait HeadingClassifier: Send + Sync {
    fn is_heading(&self, chunk: &str) -> bool;
}

/// Case-insensitive keyword match over the first [`HEADING_WINDOW_CHARS`] characters.
pub struct KeywordHeadingClassifier;

impl HeadingClassifier for KeywordHeadingClassifier {
    fn is_heading(&self, chunk: &str) -> bool {
        let window: String = chunk
            .to_uppercase()
            .chars()
            .take(HEADING_WINDOW_CHARS)
            .collect();
        SECTION_KEYWORDS.iter().any(|k| window.contains(k))
    }
}

/// Appends `raw_text` to `doc` using the default keyword classifier.
pub fn append_generated_content(doc: &mut Document, raw_text: &str, template: &dyn ResumeTemplate) {
    append_with_classifier(doc, raw_text, template, &KeywordHeadingClassifier);
}

pub fn append_with_classifier(
    doc: &mut Document,
    raw_text: &str,
    template: &dyn ResumeTemplate,
    classifier: &dyn HeadingClassifier,
) {
    let normalized = raw_text.replace("\r\n", "\n");
    let mut headings = 0usize;

    for chunk in normalized.split("\n\n").map(str::trim) {
        if chunk.is_empty() {
            continue;
        }

        if !classifier.is_heading(chunk) {
            doc.add_paragraph(Paragraph::new().text(chunk, TextStyle::plain()));
            continue;
        }

        let (heading, body) = chunk.split_once('\n').unwrap_or((chunk, ""));
        template.section_heading(doc, heading.trim());
        headings += 1;

        if !body.trim().is_empty() {
            doc.add_paragraph(Paragraph::new().text(body, TextStyle::plain()));
        }
    }

    debug!(template = %template.id(), headings, "Composed generated content");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateId;

    fn compose(text: &str, template: TemplateId) -> Document {
        let mut doc = Document::new();
        append_generated_content(&mut doc, text, template.renderer());
        doc
    }

    #[test]
    fn test_two_sections_become_headings_with_bodies() {
        let doc = compose(
            "PROFESSIONAL SUMMARY\nBuilt things.\n\nSKILLS\nGo, Rust.",
            TemplateId::Modern,
        );

        let paragraphs: Vec<_> = doc.paragraphs().collect();
        assert_eq!(paragraphs.len(), 4);

        assert_eq!(paragraphs[0].heading_level, Some(2));
        assert_eq!(paragraphs[0].plain_text(), "PROFESSIONAL SUMMARY");
        assert_eq!(paragraphs[1].heading_level, None);
        assert_eq!(paragraphs[1].plain_text(), "Built things.");

        assert_eq!(paragraphs[2].heading_level, Some(2));
        assert_eq!(paragraphs[2].plain_text(), "SKILLS");
        assert_eq!(paragraphs[3].plain_text(), "Go, Rust.");
    }

    #[test]
    fn test_unstructured_text_is_one_paragraph() {
        let text = "I am a developer.\nI write code every day.\nI like coffee.";
        let doc = compose(text, TemplateId::Classic);

        let paragraphs: Vec<_> = doc.paragraphs().collect();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].plain_text(), text);
        assert_eq!(paragraphs[0].heading_level, None);
    }

    #[test]
    fn test_keyword_outside_window_is_not_a_heading() {
        let chunk = "Over ten years of hands-on work, plus deep EXPERIENCE in Rust";
        assert!(!KeywordHeadingClassifier.is_heading(chunk));
        assert!(KeywordHeadingClassifier.is_heading("Work experience"));
        assert!(KeywordHeadingClassifier.is_heading("## Core Skills ##"));
    }

    #[test]
    fn test_heading_without_body_emits_only_heading() {
        let doc = compose("EDUCATION\n\nBSc Computer Science, 2015", TemplateId::Minimal);

        let texts: Vec<_> = doc.paragraphs().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["EDUCATION", "BSc Computer Science, 2015"]);
    }

    #[test]
    fn test_crlf_and_extra_blank_lines_are_tolerated() {
        let doc = compose(
            "\r\n\r\nSKILLS\r\nRust\r\n\r\n\r\n\r\nLANGUAGES\r\nPortuguese",
            TemplateId::Creative,
        );

        let texts: Vec<_> = doc.paragraphs().map(|p| p.plain_text()).collect();
        assert_eq!(texts, vec!["SKILLS", "Rust", "LANGUAGES", "Portuguese"]);
    }

    #[test]
    fn test_multiline_body_is_kept_together() {
        let doc = compose(
            "Experience\nAcme Corp, 2019-2024\n- Shipped the thing",
            TemplateId::Modern,
        );

        let texts: Vec<_> = doc.paragraphs().map(|p| p.plain_text()).collect();
        assert_eq!(
            texts,
            vec!["Experience", "Acme Corp, 2019-2024\n- Shipped the thing"]
        );
    }

    struct NeverHeading;

    impl HeadingClassifier for NeverHeading {
        fn is_heading(&self, _chunk: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_custom_classifier_replaces_keyword_matching() {
        let mut doc = Document::new();
        append_with_classifier(
            &mut doc,
            "SKILLS\nRust\n\nEDUCATION\nMIT",
            TemplateId::Modern.renderer(),
            &NeverHeading,
        );

        assert!(doc.paragraphs().all(|p| p.heading_level.is_none()));
        assert_eq!(doc.paragraphs().count(), 2);
    }
}
