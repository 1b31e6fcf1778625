use crate::logging::LogFormat;
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use stackslurp::builder::SlurperBuilder;
use stackslurp::engine::MAX_BATCH_SIZE;
use stackslurp::types::{SlurpError, TagFilter, Watermark, MAX_MESSAGE_TTL, MIN_MESSAGE_TTL};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sites: Vec<String>,
    #[serde(default)]
    pub tags: Option<TagFilter>,
    #[serde(default)]
    pub stackexchange_key: Option<String>,
    /// Search endpoint override (mirrors, testing)
    #[serde(default)]
    pub search_url: Option<String>,

    #[serde(default)]
    pub rackspace: RackspaceConfig,
    #[serde(default)]
    pub queue: String,

    /// Seconds to sleep between iterations
    #[serde(default = "default_wait_time")]
    pub wait_time: u64,
    /// Epoch seconds of the first window; a day before startup when unset
    #[serde(default)]
    pub starting_since: Option<i64>,
    #[serde(default = "default_message_ttl")]
    pub message_ttl: u32,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RackspaceConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub queue_endpoint: String,
    #[serde(default)]
    pub identity_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `json` or `pretty`; anything else fails the load
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_wait_time() -> u64 {
    600
}

fn default_message_ttl() -> u32 {
    86_400
}

fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.{toml,yml,...}
    /// 2. config/{ENV}.{toml,yml,...} (ENV defaults to "dev")
    /// 3. `path`, when given (must exist)
    /// 4. Environment variables: STACKSLURP__QUEUE, STACKSLURP__RACKSPACE__USERNAME, ...
    /// 5. Secrets: STACKEXCHANGE_KEY, RACKSPACE_API_KEY
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let mut builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let builder = builder.add_source(
            Environment::with_prefix("STACKSLURP")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("sites")
                .with_list_parse_key("tags")
                .try_parsing(true),
        );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        // Secrets (from ENV, override files)
        if let Ok(key) = std::env::var("STACKEXCHANGE_KEY") {
            cfg.stackexchange_key = Some(key);
        }
        if let Ok(key) = std::env::var("RACKSPACE_API_KEY") {
            cfg.rackspace.api_key = key;
        }

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Check every required field is present and in range
    pub fn validate(&self) -> Result<(), SlurpError> {
        let invalid = |msg: String| Err(SlurpError::ConfigInvalid(msg));

        if self.tags.as_ref().map_or(true, TagFilter::is_empty) {
            return invalid("tags must list at least one tag".to_string());
        }
        if self.sites.iter().any(|s| s.trim().is_empty()) {
            return invalid("sites must not contain empty names".to_string());
        }

        let required = [
            ("queue", &self.queue),
            ("rackspace.username", &self.rackspace.username),
            ("rackspace.api_key", &self.rackspace.api_key),
            ("rackspace.queue_endpoint", &self.rackspace.queue_endpoint),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return invalid(format!("{} is required", name));
            }
        }

        if self.wait_time == 0 {
            return invalid("wait_time must be at least 1 second".to_string());
        }
        if !(MIN_MESSAGE_TTL..=MAX_MESSAGE_TTL).contains(&self.message_ttl) {
            return invalid(format!(
                "message_ttl must be between {} and {}, got {}",
                MIN_MESSAGE_TTL, MAX_MESSAGE_TTL, self.message_ttl
            ));
        }
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return invalid(format!(
                "batch_size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, self.batch_size
            ));
        }
        Ok(())
    }

    /// Translate into a builder wired with the real HTTP clients
    pub fn into_builder(self) -> SlurperBuilder {
        let mut builder = SlurperBuilder::new()
            .sites(self.sites)
            .rackspace(self.rackspace.username, self.rackspace.api_key)
            .queue(self.queue, self.rackspace.queue_endpoint)
            .poll_interval(Duration::from_secs(self.wait_time))
            .message_ttl(self.message_ttl)
            .batch_size(self.batch_size);

        if let Some(tags) = self.tags {
            builder = builder.tags(tags);
        }
        if let Some(key) = self.stackexchange_key.filter(|k| !k.is_empty()) {
            builder = builder.stackexchange_key(key);
        }
        if let Some(url) = self.search_url {
            builder = builder.search_url(url);
        }
        if let Some(endpoint) = self.rackspace.identity_endpoint {
            builder = builder.identity_endpoint(endpoint);
        }
        if let Some(since) = self.starting_since {
            builder = builder.starting_since(Watermark::new(since));
        }
        builder
    }
}
