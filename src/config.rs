// src/config.rs
use anyhow::{Context, Result};
use std::path::Path;

const ENV_BASE: &str = "LEET_UPSTREAM_BASE";
const ENV_PAGE_LIMIT: &str = "LEET_PAGE_LIMIT";
const DEFAULT_BASE: &str = "https://leetcode.com";
const DEFAULT_PAGE_LIMIT: u32 = 500;
const DEFAULT_CONFIG_PATH: &str = "config/upstream.toml";

/// Where the adapters (and the forwarding proxy) find the upstream.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct UpstreamConfig {
    /// Base URL; adapters derive `/graphql` and `/api/submissions/...`
    /// from it.
    #[serde(default = "default_base")]
    pub base_url: String,
    /// Bound on the single page of recent submissions requested.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

fn default_base() -> String {
    DEFAULT_BASE.to_string()
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base(),
            page_limit: default_page_limit(),
        }
    }
}

impl UpstreamConfig {
    /// Load with the usual cascade: env vars win, then the optional
    /// `config/upstream.toml`, then defaults.
    pub fn load() -> Result<Self> {
        let mut cfg = if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
        } else {
            Self::default()
        };

        if let Ok(base) = std::env::var(ENV_BASE) {
            cfg.base_url = base;
        }
        if let Ok(limit) = std::env::var(ENV_PAGE_LIMIT) {
            cfg.page_limit = limit
                .parse()
                .with_context(|| format!("{ENV_PAGE_LIMIT} must be an integer, got '{limit}'"))?;
        }
        cfg.base_url = normalize_base(&cfg.base_url);
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading upstream config from {}", path.display()))?;
        Self::parse(&content)
    }

    fn parse(s: &str) -> Result<Self> {
        let mut cfg: UpstreamConfig = toml::from_str(s).context("parsing upstream config toml")?;
        cfg.base_url = normalize_base(&cfg.base_url);
        Ok(cfg)
    }
}

/// Trailing slashes would produce `//graphql` when joining paths.
fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
