use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Mistral API key. When empty, moderation runs without the classifier
    /// (dictionary and name redaction still apply).
    pub mistral_api_key: String,
    /// Mistral API base URL (defaults to https://api.mistral.ai). Mostly
    /// useful for pointing tests at a stub server.
    pub mistral_api_url: String,
    /// Path of the forbidden-word list file.
    pub words_path: PathBuf,
    /// Path of the flag configuration file.
    pub flags_path: PathBuf,
}

pub const DEFAULT_MISTRAL_API_URL: &str = "https://api.mistral.ai";

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// default except the API key, which stays optional by design.
    pub fn load() -> Result<Self> {
        Ok(Self {
            mistral_api_key: env::var("MISTRAL_API_KEY").unwrap_or_default(),
            mistral_api_url: env::var("MISTRAL_API_URL")
                .unwrap_or_else(|_| DEFAULT_MISTRAL_API_URL.to_string()),
            words_path: env::var("PALISADE_WORDS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./mots_interdits.txt")),
            flags_path: env::var("PALISADE_FLAGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./flag_config.json")),
        })
    }

    /// Check that the Mistral API key is configured.
    /// Call this before any operation that must not run unclassified.
    pub fn require_mistral(&self) -> Result<()> {
        if self.mistral_api_key.is_empty() {
            anyhow::bail!(
                "MISTRAL_API_KEY not set. Add it to your .env file to enable\n\
                 classifier-backed moderation, or run without it to use only\n\
                 the forbidden-word dictionary and name redaction."
            );
        }
        Ok(())
    }
}
