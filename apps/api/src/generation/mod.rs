// Document generation: prompt building, model call, layout, persistence.
// All model calls go through llm_client::TextGenerator; nothing here talks HTTP.

pub mod cover_letter;
pub mod handlers;
pub mod prompts;
pub mod resume;
pub mod sections;

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;
use tracing::warn;

use crate::llm_client::{LlmError, TextGenerator};
use crate::storage::StorageError;
use crate::templates::UnknownTemplate;

/// The two document kinds this service produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    /// Prefix used in output filenames.
    pub fn file_tag(self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover_letter",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Resume => f.write_str("resume"),
            DocumentKind::CoverLetter => f.write_str("cover letter"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    UnknownTemplate(#[from] UnknownTemplate),

    #[error("Text generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Characters left unescaped in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// URL path under which a saved file can be fetched. Non-ASCII names are
/// percent-encoded.
pub fn download_url(filename: &str) -> String {
    format!("/download/{}", utf8_percent_encode(filename, PATH_SEGMENT))
}

/// Calls the model. With `embed_errors` set, a failure is returned as the
/// content itself so the document still gets produced.
pub async fn generate_content(
    generator: &dyn TextGenerator,
    prompt: &str,
    max_tokens: u32,
    embed_errors: bool,
) -> Result<String, GenerationError> {
    match generator.generate(prompt, max_tokens).await {
        Ok(text) => Ok(text),
        Err(e) if embed_errors => {
            warn!("Generation failed, embedding error text as content: {e}");
            Ok(e.to_string())
        }
        Err(e) => Err(GenerationError::Llm(e)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{LlmError, TextGenerator};

    /// Canned generator that records the prompts it receives.
    pub struct StubGenerator {
        reply: Result<String, fn() -> LlmError>,
        pub calls: Mutex<Vec<(String, u32)>>,
    }

    impl StubGenerator {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(make: fn() -> LlmError) -> Self {
            Self {
                reply: Err(make),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn last_call(&self) -> (String, u32) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), max_tokens));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }

        async fn list_models(&self) -> Result<Vec<String>, LlmError> {
            match &self.reply {
                Ok(_) => Ok(vec!["stub:latest".to_string()]),
                Err(make) => Err(make()),
            }
        }

        fn model(&self) -> &str {
            "stub:latest"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::StubGenerator;
    use super::*;

    #[tokio::test]
    async fn test_generate_content_passes_text_through() {
        let stub = StubGenerator::replying("SKILLS\nRust");
        let text = generate_content(&stub, "prompt", 1500, true).await.unwrap();
        assert_eq!(text, "SKILLS\nRust");
        assert_eq!(stub.last_call(), ("prompt".to_string(), 1500));
    }

    #[tokio::test]
    async fn test_generate_content_embeds_error_text() {
        let stub = StubGenerator::failing(|| LlmError::Api {
            status: 500,
            body: "boom".to_string(),
        });
        let text = generate_content(&stub, "prompt", 10, true).await.unwrap();
        assert_eq!(text, "HTTP 500: boom");
    }

    #[tokio::test]
    async fn test_generate_content_surfaces_error_when_not_embedding() {
        let stub = StubGenerator::failing(|| LlmError::EmptyResponse);
        let err = generate_content(&stub, "prompt", 10, false)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Llm(LlmError::EmptyResponse)));
    }

    #[test]
    fn test_download_url() {
        assert_eq!(download_url("a.docx"), "/download/a.docx");
        assert_eq!(
            download_url("resume_José_modern.docx"),
            "/download/resume_Jos%C3%A9_modern.docx"
        );
    }
}
