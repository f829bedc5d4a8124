//! Bot configuration with TOML file support.

use campaign_commands::replies::{
    DEFAULT_BOT_NAME, DEFAULT_SUBSCRIBE_TEMPLATE, DEFAULT_TASK_TEMPLATE,
};
use campaign_social::DEFAULT_API_BASE_URL;
use campaign_store_json::DEFAULT_FILE_NAME;
use campaign_types::params::{
    DEFAULT_PROBE_INTERVAL_SECS, DEFAULT_PROBE_MAX_POSTS, DEFAULT_TASK_COOLDOWN_SECS,
    DEFAULT_TASK_REWARD,
};
use campaign_types::{CampaignParams, Timestamp};
use campaign_utils::LogFormat;
use chrono::DateTime;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid campaign_start {value:?}: {reason}")]
    CampaignStart { value: String, reason: String },
}

/// Configuration for the campaign bot.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File name of the subscription document inside `data_dir`.
    #[serde(default = "default_store_file")]
    pub store_file: String,

    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Origins allowed by the HTTP API's CORS policy.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// RFC 3339 instant from which commands are accepted.
    #[serde(default = "default_campaign_start")]
    pub campaign_start: String,

    #[serde(default = "default_task_cooldown_secs")]
    pub task_cooldown_secs: u64,

    #[serde(default = "default_task_reward")]
    pub task_reward: u64,

    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,

    #[serde(default = "default_probe_max_posts")]
    pub probe_max_posts: u32,

    #[serde(default = "default_x_api_base_url")]
    pub x_api_base_url: String,

    /// App bearer token for the social platform API.
    #[serde(default)]
    pub x_bearer_token: String,

    #[serde(default = "default_x_timeout_secs")]
    pub x_timeout_secs: u64,

    /// Guild channel where the bot answers; other channels are ignored.
    #[serde(default)]
    pub allowed_channel: Option<String>,

    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    /// Post text for the initial proof, with a `{code}` placeholder.
    #[serde(default = "default_subscribe_template")]
    pub subscribe_template: String,

    /// Post text for daily tasks, with a `{code}` placeholder.
    #[serde(default = "default_task_template")]
    pub task_template: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_store_file() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_rpc_port() -> u16 {
    3000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

fn default_campaign_start() -> String {
    "2024-12-07T00:00:00Z".to_string()
}

fn default_task_cooldown_secs() -> u64 {
    DEFAULT_TASK_COOLDOWN_SECS
}

fn default_task_reward() -> u64 {
    DEFAULT_TASK_REWARD
}

fn default_probe_interval_secs() -> u64 {
    DEFAULT_PROBE_INTERVAL_SECS
}

fn default_probe_max_posts() -> u32 {
    DEFAULT_PROBE_MAX_POSTS
}

fn default_x_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_x_timeout_secs() -> u64 {
    10
}

fn default_bot_name() -> String {
    DEFAULT_BOT_NAME.to_string()
}

fn default_subscribe_template() -> String {
    DEFAULT_SUBSCRIBE_TEMPLATE.to_string()
}

fn default_task_template() -> String {
    DEFAULT_TASK_TEMPLATE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store_file: default_store_file(),
            rpc_port: default_rpc_port(),
            cors_origins: default_cors_origins(),
            campaign_start: default_campaign_start(),
            task_cooldown_secs: default_task_cooldown_secs(),
            task_reward: default_task_reward(),
            probe_interval_secs: default_probe_interval_secs(),
            probe_max_posts: default_probe_max_posts(),
            x_api_base_url: default_x_api_base_url(),
            x_bearer_token: String::new(),
            x_timeout_secs: default_x_timeout_secs(),
            allowed_channel: None,
            bot_name: default_bot_name(),
            subscribe_template: default_subscribe_template(),
            task_template: default_task_template(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl BotConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    /// The campaign start as a Unix timestamp.
    pub fn campaign_start(&self) -> Result<Timestamp, ConfigError> {
        let invalid = |reason: String| ConfigError::CampaignStart {
            value: self.campaign_start.clone(),
            reason,
        };
        let parsed =
            DateTime::parse_from_rfc3339(&self.campaign_start).map_err(|e| invalid(e.to_string()))?;
        let secs = u64::try_from(parsed.timestamp())
            .map_err(|_| invalid("before the Unix epoch".to_string()))?;
        Ok(Timestamp::new(secs))
    }

    /// The workflow parameters derived from this config.
    pub fn campaign_params(&self) -> Result<CampaignParams, ConfigError> {
        Ok(CampaignParams {
            campaign_start: self.campaign_start()?,
            task_cooldown_secs: self.task_cooldown_secs,
            task_reward: self.task_reward,
            probe_interval_secs: self.probe_interval_secs,
            probe_max_posts: self.probe_max_posts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = BotConfig::from_toml_str("").unwrap();
        assert_eq!(config.rpc_port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.store_path(), PathBuf::from("./data/subscriptionCodes.json"));
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.campaign_params().unwrap(), CampaignParams::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let config = BotConfig::from_toml_str(
            r#"
            data_dir = "/var/lib/campaign"
            rpc_port = 8080
            cors_origins = ["https://app.example", "https://staging.example"]
            campaign_start = "2025-01-01T12:00:00+02:00"
            task_cooldown_secs = 3600
            task_reward = 1
            allowed_channel = "1234"
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.rpc_port, 8080);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.allowed_channel.as_deref(), Some("1234"));
        assert_eq!(config.log_format, LogFormat::Json);

        let params = config.campaign_params().unwrap();
        assert_eq!(params.campaign_start, Timestamp::new(1_735_725_600));
        assert_eq!(params.task_cooldown_secs, 3600);
        assert_eq!(params.task_reward, 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            BotConfig::from_toml_str("rpc_prot = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn bad_campaign_start() {
        let config = BotConfig {
            campaign_start: "next tuesday".into(),
            ..BotConfig::default()
        };
        assert!(matches!(
            config.campaign_params(),
            Err(ConfigError::CampaignStart { .. })
        ));

        let config = BotConfig {
            campaign_start: "1960-01-01T00:00:00Z".into(),
            ..BotConfig::default()
        };
        assert!(config.campaign_start().is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.toml");
        std::fs::write(&path, "bot_name = \"TestBot\"\n").unwrap();
        assert_eq!(BotConfig::from_toml_file(&path).unwrap().bot_name, "TestBot");
        assert!(matches!(
            BotConfig::from_toml_file(&dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
