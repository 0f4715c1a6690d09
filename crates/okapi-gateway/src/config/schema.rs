use std::collections::HashSet;
use std::net::SocketAddr;

use serde::Deserialize;
use okapi_core::error::{OkapiError, Result};
use okapi_core::request::TokenType;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub stats: StatsSection,

    #[serde(default)]
    pub consumers: Vec<ConsumerConfig>,

    #[serde(default)]
    pub tokens: Vec<TokenConfig>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OkapiError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.gateway.validate()?;
        self.stats.validate()?;

        let mut keys = HashSet::new();
        for c in &self.consumers {
            if c.key.is_empty() {
                return Err(OkapiError::BadRequest("consumers[].key must not be empty".into()));
            }
            if !keys.insert(c.key.as_str()) {
                return Err(OkapiError::BadRequest(format!("duplicate consumer key: {}", c.key)));
            }
        }

        for t in &self.tokens {
            if !keys.contains(t.consumer_key.as_str()) {
                return Err(OkapiError::BadRequest(format!(
                    "token {} refers to unknown consumer: {}",
                    t.key, t.consumer_key
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Public site root, always ending with `/`.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Root of the per-method `docs.xml` tree.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            site_url: default_site_url(),
            docs_dir: default_docs_dir(),
            default_language: default_language(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<SocketAddr>().is_err() {
            return Err(OkapiError::BadRequest(
                "gateway.listen must be a valid socket address".into(),
            ));
        }
        if !self.site_url.ends_with('/') {
            return Err(OkapiError::BadRequest(
                "gateway.site_url must end with '/'".into(),
            ));
        }
        if self.default_language.is_empty() {
            return Err(OkapiError::BadRequest(
                "gateway.default_language must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn okapi_base_url(&self) -> String {
        format!("{}okapi/", self.site_url)
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_site_url() -> String {
    "http://localhost:8080/".into()
}
fn default_docs_dir() -> String {
    "docs".into()
}
fn default_language() -> String {
    "en".into()
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatsBackend {
    #[default]
    Memory,
    Jsonl,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StatsSection {
    #[serde(default)]
    pub backend: StatsBackend,

    /// Output file of the `jsonl` backend.
    #[serde(default)]
    pub path: Option<String>,

    /// Persist every resolved user id as `0` (oc.de deployments).
    #[serde(default)]
    pub anonymize_user_ids: bool,
}

impl StatsSection {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StatsBackend::Jsonl && self.path.as_deref().unwrap_or("").is_empty() {
            return Err(OkapiError::BadRequest(
                "stats.path is required for the jsonl backend".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsumerConfig {
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenConfig {
    pub key: String,
    pub consumer_key: String,
    pub user_id: i64,
    #[serde(default = "default_token_type")]
    pub token_type: TokenType,
}

fn default_token_type() -> TokenType {
    TokenType::Access
}
