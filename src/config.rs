//! Server configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file,
//! then `STORYD_`-prefixed environment variables. Upstream API credentials
//! are not part of this struct; the provider clients read them from their
//! own environment variables.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Result;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Model identifier sent to the text provider
    pub model: String,
    /// Maximum output tokens per generated story
    pub max_tokens: u32,
    /// Sampling temperature for story generation
    pub temperature: f32,
    /// Maximum accepted prompt length in characters
    pub max_prompt_chars: usize,
    /// Model identifier sent to the image provider
    pub image_model: String,
    /// Requested illustration resolution
    pub image_size: String,
    /// Include raw upstream error detail in failure responses.
    /// Leave off in production.
    pub expose_upstream_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".parse().unwrap(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
            max_prompt_chars: 5000,
            image_model: "dall-e-2".to_string(),
            image_size: "1024x1024".to_string(),
            expose_upstream_errors: false,
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional TOML file, and the
    /// environment (`STORYD_*`), in increasing priority.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        } else {
            figment = figment.merge(Toml::file("storyd.toml"));
        }

        let config = figment.merge(Env::prefixed("STORYD_")).extract()?;
        Ok(config)
    }
}
