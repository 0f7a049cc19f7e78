// ABOUTME: Process settings for the revealkit application
// ABOUTME: Provides defaults and environment variable handling for serve and export

use crate::slides::EmbedMode;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Process-wide settings. Command line flags take precedence over these.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub debounce_ms: u64,
    pub embed_markdown: bool,
    /// Export target; `None` means `build` inside the data directory.
    pub output: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 8080,
            debounce_ms: 200,
            embed_markdown: false,
            output: None,
        }
    }
}

impl Settings {
    /// Create a new settings instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = env::var("REVEALKIT_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let debounce_ms = env::var("REVEALKIT_DEBOUNCE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);
        let embed_markdown = env::var("REVEALKIT_EMBED_MARKDOWN")
            .ok()
            .map(|s| s.to_lowercase() == "true" || s == "1")
            .unwrap_or(defaults.embed_markdown);
        let output = env::var("REVEALKIT_OUTPUT").ok().map(PathBuf::from);

        Self {
            port,
            debounce_ms,
            embed_markdown,
            output,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Embed mode for the live preview
    pub fn preview_embed_mode(&self) -> EmbedMode {
        EmbedMode {
            html: true,
            markdown: self.embed_markdown,
        }
    }
}
