//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the chat service, the Twitter accounts, conversations and the tweeter transport.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Environment variable that overrides `twitter.accounts`.
pub const ACCOUNTS_ENV: &str = "HUBOT_TWEETER_ACCOUNTS";
/// Environment variable that overrides `twitter.monitoring_enabled`.
pub const MONITORING_ENV: &str = "HUBOT_TWITTER_MONITORING_ENABLED";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
    #[serde(default)]
    pub tweeter: TweeterConfig,
}

impl AppConfig {
    /// Reads and parses the YAML file, then applies environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(accounts) = lookup(ACCOUNTS_ENV) {
            self.twitter.accounts = Some(accounts);
        }
        if let Some(enabled) = lookup(MONITORING_ENV) {
            self.twitter.monitoring_enabled = Some(enabled);
        }
    }
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    /// Name the bot answers to; used in help text and to strip mentions.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_bot_name() -> String {
    "hubot".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

/// Twitter account and monitoring settings.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct TwitterConfig {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    /// JSON object of account name -> `{access_token, access_token_secret}`.
    pub accounts: Option<String>,
    /// Explicit monitoring override: `"true"` or `"false"`. Wins over the brain.
    pub monitoring_enabled: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConversationConfig {
    #[serde(default = "default_conversation_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_conversation_timeout(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_conversation_timeout() -> u64 {
    120
}

fn default_sweep_interval() -> u64 {
    15
}

/// Where post-requests are delivered. Without an endpoint they are only logged.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct TweeterConfig {
    pub endpoint: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Configuration for the connected chat service.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub rooms: Vec<String>,
}

#[cfg(test)]
impl AppConfig {
    pub fn for_tests(accounts: &str) -> Self {
        Self {
            services: ServicesConfig {
                matrix: MatrixConfig {
                    username: "hubot".to_string(),
                    password: "secret".to_string(),
                    homeserver: "http://localhost:8008".to_string(),
                    rooms: Vec::new(),
                },
            },
            system: SystemConfig::default(),
            twitter: TwitterConfig {
                accounts: Some(accounts.to_string()),
                ..TwitterConfig::default()
            },
            conversation: ConversationConfig::default(),
            tweeter: TweeterConfig::default(),
        }
    }
}
