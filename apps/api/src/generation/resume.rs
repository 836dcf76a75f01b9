//! Resume generation: prompt → model text → templated document → saved file.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::document::{inches_to_twips, Document, Margins};
use crate::generation::prompts::build_resume_prompt;
use crate::generation::sections::append_generated_content;
use crate::generation::{download_url, generate_content, DocumentKind, GenerationError};
use crate::llm_client::TextGenerator;
use crate::models::candidate::{non_blank, CandidateRecord};
use crate::storage::{persist, safe_filename};
use crate::templates::TemplateId;

const SINGLE_PAGE_MAX_TOKENS: u32 = 1500;
const MULTI_PAGE_MAX_TOKENS: u32 = 2500;

/// Request body for `POST /generate-resume`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeRequest {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    /// Template id; defaults to `modern`.
    #[serde(default, deserialize_with = "non_blank")]
    pub template: Option<String>,
    /// Page-limit hint; a number or numeric string, defaults to 1.
    #[serde(default, deserialize_with = "lenient_page_limit")]
    pub page_limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeResponse {
    pub success: bool,
    pub content: String,
    pub download_url: String,
    pub filename: String,
    pub template: TemplateId,
    pub pages: u32,
}

/// Runs the resume pipeline and writes the document to the output directory.
pub async fn generate_resume(
    generator: &dyn TextGenerator,
    config: &Config,
    request: ResumeRequest,
) -> Result<ResumeResponse, GenerationError> {
    let template = match request.template.as_deref() {
        Some(id) => id.parse::<TemplateId>()?,
        None => TemplateId::default(),
    };
    let pages = request.page_limit.unwrap_or(1).max(1);
    let max_tokens = if pages == 1 {
        SINGLE_PAGE_MAX_TOKENS
    } else {
        MULTI_PAGE_MAX_TOKENS
    };

    info!(
        "Generating resume: template={}, pages={}, model={}",
        template,
        pages,
        generator.model()
    );

    let prompt = build_resume_prompt(&request.candidate, pages);
    let content = generate_content(
        generator,
        &prompt,
        max_tokens,
        config.embed_generation_errors,
    )
    .await?;

    let doc = build_resume_document(&request.candidate, template, &content);

    let filename = safe_filename(
        request.candidate.display_name(),
        DocumentKind::Resume.file_tag(),
        template.as_str(),
    );
    persist(&doc, &config.output_dir, &filename).await?;

    Ok(ResumeResponse {
        success: true,
        content,
        download_url: download_url(&filename),
        filename,
        template,
        pages,
    })
}

/// Header for `template`, then the generated sections, on narrow-margin pages.
pub fn build_resume_document(
    record: &CandidateRecord,
    template: TemplateId,
    content: &str,
) -> Document {
    let renderer = template.renderer();

    let mut doc = Document::new();
    renderer.render_header(&mut doc, record);
    append_generated_content(&mut doc, content, renderer);

    doc.set_margins(Margins {
        top: inches_to_twips(50),
        bottom: inches_to_twips(50),
        left: inches_to_twips(70),
        right: inches_to_twips(70),
    });
    doc
}

fn lenient_page_limit<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|v| Some(v.min(u32::MAX as u64) as u32))
            .ok_or_else(|| D::Error::custom(format!("page_limit must be a whole number, got {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("page_limit must be a whole number, got '{s}'"))),
        Some(other) => Err(D::Error::custom(format!(
            "page_limit must be a whole number, got {other}"
        ))),
    }
}
