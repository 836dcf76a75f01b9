use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_url: String,
    pub ollama_model: String,
    pub output_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// When set, a failed generation is written into the document as its content
    /// instead of failing the request.
    pub embed_generation_errors: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ollama_url: env_or("OLLAMA_URL", DEFAULT_BASE_URL),
            ollama_model: env_or("OLLAMA_MODEL", DEFAULT_MODEL),
            output_dir: PathBuf::from(env_or("OUTPUT_DIR", "generated_documents")),
            host: env_or("HOST", "127.0.0.1"),
            port: env_or("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            embed_generation_errors: parse_flag(&env_or("EMBED_GENERATION_ERRORS", "true"))
                .context("EMBED_GENERATION_ERRORS must be a boolean")?,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Defaults suitable for tests, writing into `output_dir`.
    pub fn for_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Config {
            ollama_url: DEFAULT_BASE_URL.to_string(),
            ollama_model: DEFAULT_MODEL.to_string(),
            output_dir: output_dir.into(),
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            embed_generation_errors: true,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected true/false, got '{other}'"),
    }
}
