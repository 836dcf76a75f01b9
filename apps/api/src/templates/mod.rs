//! Resume templates: one renderer per visual style, behind a common trait.
//!
//! Each renderer lays out the header block (name, title, contact, social links)
//! and knows how to style a section heading for the composer. Renderers must
//! tolerate any subset of optional fields being absent.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::document::{Document, Paragraph, TextStyle};
use crate::models::{CandidateRecord, SocialKind};

pub mod classic;
pub mod creative;
pub mod minimal;
pub mod modern;

pub use classic::ClassicTemplate;
pub use creative::CreativeTemplate;
pub use minimal::MinimalTemplate;
pub use modern::ModernTemplate;

pub const ACCENT: &str = "2E86AB";
pub const WHITE: &str = "FFFFFF";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
    Creative,
    Minimal,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Modern,
        TemplateId::Classic,
        TemplateId::Creative,
        TemplateId::Minimal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Creative => "creative",
            TemplateId::Minimal => "minimal",
        }
    }

    /// The renderer for this style.
    pub fn renderer(self) -> &'static dyn ResumeTemplate {
        match self {
            TemplateId::Modern => &ModernTemplate,
            TemplateId::Classic => &ClassicTemplate,
            TemplateId::Creative => &CreativeTemplate,
            TemplateId::Minimal => &MinimalTemplate,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown template '{0}'. Expected one of: modern, classic, creative, minimal")]
pub struct UnknownTemplate(pub String);

impl FromStr for TemplateId {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

/// A visual resume style.
pub trait ResumeTemplate: Send + Sync {
    fn id(&self) -> TemplateId;

    /// Appends the header block for `record`.
    fn render_header(&self, doc: &mut Document, record: &CandidateRecord);

    /// Appends a section heading styled for this template.
    fn section_heading(&self, doc: &mut Document, title: &str);
}

/// Appends hyperlinked social labels to `para`, with `separator` only between
/// two present links.
pub(crate) fn push_social_links(
    para: &mut Paragraph,
    record: &CandidateRecord,
    label: fn(SocialKind) -> &'static str,
    separator: &str,
) {
    for (i, (kind, url)) in record.social_links().into_iter().enumerate() {
        if i > 0 {
            para.push_text(separator, TextStyle::plain());
        }
        para.push_link(label(kind), url);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::document::{Document, Paragraph};

    /// Paragraphs (including table cells) whose text contains `needle`.
    pub fn paragraphs_containing<'a>(doc: &'a Document, needle: &str) -> Vec<&'a Paragraph> {
        doc.all_paragraphs()
            .into_iter()
            .filter(|p| p.plain_text().contains(needle))
            .collect()
    }

    pub fn has_separator(p: &Paragraph) -> bool {
        let text = p.plain_text();
        text.contains('|') || text.contains('•')
    }
}
