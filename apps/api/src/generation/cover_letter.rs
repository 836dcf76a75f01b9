//! Cover letter generation: fixed business-letter layout around the model's body text.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::document::{Document, Paragraph, TextStyle};
use crate::generation::prompts::{build_cover_letter_prompt, LetterTarget};
use crate::generation::{download_url, generate_content, DocumentKind, GenerationError};
use crate::llm_client::TextGenerator;
use crate::models::candidate::{non_blank, CandidateRecord};
use crate::models::SocialKind;
use crate::storage::{persist, safe_filename};
use crate::templates::push_social_links;

const MAX_TOKENS: u32 = 1200;
/// Template tag used in cover letter filenames.
pub const LETTER_TEMPLATE: &str = "standard";

/// Request body for `POST /generate-cover-letter`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    #[serde(default, deserialize_with = "non_blank")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub job_description: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub interest: Option<String>,
}

impl CoverLetterRequest {
    fn target(&self) -> LetterTarget<'_> {
        LetterTarget {
            company: self.company.as_deref(),
            position: self.position.as_deref(),
            job_description: self.job_description.as_deref(),
            interest: self.interest.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverLetterResponse {
    pub success: bool,
    pub content: String,
    pub download_url: String,
    pub filename: String,
}

pub async fn generate_cover_letter(
    generator: &dyn TextGenerator,
    config: &Config,
    request: CoverLetterRequest,
) -> Result<CoverLetterResponse, GenerationError> {
    info!(
        "Generating cover letter: company={:?}, model={}",
        request.company,
        generator.model()
    );

    let prompt = build_cover_letter_prompt(&request.candidate, request.target());
    let content = generate_content(
        generator,
        &prompt,
        MAX_TOKENS,
        config.embed_generation_errors,
    )
    .await?;

    let doc = build_cover_letter_document(
        &request.candidate,
        request.target(),
        &content,
        Local::now().date_naive(),
    );

    let filename = safe_filename(
        request.candidate.display_name(),
        DocumentKind::CoverLetter.file_tag(),
        LETTER_TEMPLATE,
    );
    persist(&doc, &config.output_dir, &filename).await?;

    Ok(CoverLetterResponse {
        success: true,
        content,
        download_url: download_url(&filename),
        filename,
    })
}

/// Sender block, links, date, recipient, subject, salutation, body, closing.
pub fn build_cover_letter_document(
    record: &CandidateRecord,
    target: LetterTarget<'_>,
    body: &str,
    date: NaiveDate,
) -> Document {
    let mut doc = Document::new();

    let mut sender = Paragraph::new().text(record.display_name(), TextStyle::plain().bold().size(14));
    let contact = [record.email.as_deref(), record.phone.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    if !contact.is_empty() {
        sender.push_break();
        sender.push_text(contact.join(" • "), TextStyle::plain());
    }
    doc.add_paragraph(sender);

    let mut links = Paragraph::new();
    push_social_links(&mut links, record, SocialKind::label, " | ");
    if !links.is_empty() {
        doc.add_paragraph(links);
    }

    doc.add_paragraph(
        Paragraph::new()
            .space_before(12)
            .space_after(12)
            .text(date.format("%B %d, %Y").to_string(), TextStyle::plain()),
    );

    let mut recipient = Paragraph::new().space_after(12).text("Hiring Manager", TextStyle::plain());
    if let Some(company) = target.company {
        recipient.push_break();
        recipient.push_text(company, TextStyle::plain());
    }
    doc.add_paragraph(recipient);

    let subject = match target.position {
        Some(position) => format!("Re: {position} Position"),
        None => "Re: Open Position".to_string(),
    };
    doc.add_paragraph(Paragraph::new().text(subject, TextStyle::plain().bold()));
    doc.add_paragraph(
        Paragraph::new()
            .space_before(12)
            .text("Dear Hiring Manager,", TextStyle::plain()),
    );

    doc.add_paragraph(Paragraph::new().text(body, TextStyle::plain()));

    let mut closing = Paragraph::new()
        .space_before(24)
        .text("Best regards,", TextStyle::plain());
    closing.push_break();
    closing.push_text(record.display_name(), TextStyle::plain());
    doc.add_paragraph(closing);

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::test_support::StubGenerator;
    use serde_json::json;
    use tempfile::TempDir;

    fn record() -> CandidateRecord {
        CandidateRecord {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: Some("555-0100".to_string()),
            linkedin: Some("https://linkedin.com/in/jane".to_string()),
            github: Some("https://github.com/jane".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_cover_letter_layout_order() {
        let target = LetterTarget {
            company: Some("Acme"),
            position: Some("Platform Engineer"),
            ..Default::default()
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let doc = build_cover_letter_document(&record(), target, "I build platforms.", date);

        let texts: Vec<_> = doc.paragraphs().map(|p| p.plain_text()).collect();
        assert_eq!(
            texts,
            vec![
                "Jane Doe\njane@example.com • 555-0100",
                "LinkedIn | GitHub",
                "March 09, 2024",
                "Hiring Manager\nAcme",
                "Re: Platform Engineer Position",
                "Dear Hiring Manager,",
                "I build platforms.",
                "Best regards,\nJane Doe",
            ]
        );

        let links = doc.paragraphs().nth(1).unwrap();
        assert_eq!(links.links().count(), 2);
    }

    #[test]
    fn test_cover_letter_without_links_or_company() {
        let record = CandidateRecord {
            name: Some("Sam".to_string()),
            ..Default::default()
        };
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let doc = build_cover_letter_document(&record, LetterTarget::default(), "Body", date);

        let texts: Vec<_> = doc.paragraphs().map(|p| p.plain_text()).collect();
        assert_eq!(texts[0], "Sam");
        assert_eq!(texts[1], "December 01, 2025");
        assert_eq!(texts[2], "Hiring Manager");
        assert_eq!(texts[3], "Re: Open Position");
    }

    #[tokio::test]
    async fn test_generate_cover_letter_persists_standard_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::for_output_dir(tmp.path());
        let stub = StubGenerator::replying("Dear team, hire me.");
        let request: CoverLetterRequest = serde_json::from_value(json!({
            "name": "Jane O'Brien!!",
            "company": "Acme",
            "position": "SRE",
            "job_description": "Keep things up",
            "interest": ""
        }))
        .unwrap();
        assert!(request.interest.is_none());

        let response = generate_cover_letter(&stub, &config, request).await.unwrap();

        assert!(response.success);
        assert_eq!(response.content, "Dear team, hire me.");
        assert!(response
            .filename
            .starts_with("cover_letter_Jane_OBrien_standard_"));
        assert!(tmp.path().join(&response.filename).exists());

        let (prompt, max_tokens) = stub.last_call();
        assert_eq!(max_tokens, 1200);
        assert!(prompt.contains("Target Company: Acme"));
        assert!(prompt.contains("Job Requirements: Keep things up"));
    }
}
