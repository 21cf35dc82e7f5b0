use anyhow::{Context, Result};

const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_LLM_MODEL: &str = "openai/gpt-4o-mini";
const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if no LLM API key is available.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    /// Optional: without it, video lookups return nothing and learning resources come from the LLM.
    pub youtube_api_key: Option<String>,
    pub youtube_api_base: String,
    /// Sent as HTTP-Referer to OpenRouter.
    pub app_url: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_api_key = optional_env("OPENROUTER_API_KEY")
            .or_else(|| optional_env("OPENAI_API_KEY"))
            .context("Required environment variable 'OPENROUTER_API_KEY' or 'OPENAI_API_KEY' is not set")?;

        Ok(Config {
            llm_api_key,
            llm_base_url: optional_env("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            llm_model: optional_env("OPENROUTER_MODEL")
                .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            youtube_api_key: optional_env("YOUTUBE_API_KEY"),
            youtube_api_base: optional_env("YOUTUBE_API_BASE")
                .unwrap_or_else(|| DEFAULT_YOUTUBE_API_BASE.to_string()),
            app_url: optional_env("APP_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

/// Reads an env var, treating empty or whitespace-only values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Config pointing both upstreams at a local fake server.
    pub fn for_tests(base_url: &str) -> Self {
        Config {
            llm_api_key: "test-key".to_string(),
            llm_base_url: base_url.to_string(),
            llm_model: "test/model".to_string(),
            youtube_api_key: None,
            youtube_api_base: base_url.to_string(),
            app_url: "http://localhost:3000".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
