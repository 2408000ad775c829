//! Configuration loading and layering.
//!
//! Settings come from an optional TOML file overlaid with environment
//! variables; environment wins. Invalid values are logged and ignored
//! rather than aborting startup; a missing affiliate id or a bad batch
//! width never takes the service down.
//!
//! Environment variables:
//! - `SCOUT_LOOKUP_API_KEY` / `SCOUT_LOOKUP_API_URL` - registry lookup;
//!   absence of the key disables the cascade's first stage
//! - `SCOUT_PROBE` - enable/disable the DNS/HTTP presence probe
//! - `SCOUT_BATCH_WIDTH` - concurrent resolutions per batch (1-10)
//! - `SCOUT_TARGET_COUNT` - default generation result budget
//! - `SCOUT_BIND_ADDR` - server listen address
//! - `GODADDY_AFFILIATE_ID`, `GODADDY_PLID`, `NAMECHEAP_AFFILIATE_ID`,
//!   `HOVER_AFFILIATE_ID`, `PORKBUN_AFFILIATE_ID`,
//!   `SQUARESPACE_AFFILIATE_ID` - per-registrar tracking identifiers

use crate::error::ScoutError;
use crate::registrars::AffiliateIds;
use crate::resolver::ResolverConfig;
use crate::selector::SelectionConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Structure of the optional `domain-scout.toml` configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<ResolverFileConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliates: Option<AffiliatesFileConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionFileConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerFileConfig>,
}

/// `[resolver]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResolverFileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_api_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_width: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_delay_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heuristic_seed: Option<u64>,
}

/// `[affiliates]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AffiliatesFileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub godaddy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub godaddy_plid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namecheap: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub porkbun: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub squarespace: Option<String>,
}

/// `[selection]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SelectionFileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_only_target_count: Option<usize>,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerFileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind_addr: Option<String>,
}

/// Load and validate a configuration file.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<FileConfig, ScoutError> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        ScoutError::config(format!(
            "failed to read configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: FileConfig = toml::from_str(&content)
        .map_err(|e| ScoutError::config(format!("failed to parse TOML configuration: {}", e)))?;

    validate_file_config(&config)?;

    Ok(config)
}

fn validate_file_config(config: &FileConfig) -> Result<(), ScoutError> {
    if let Some(resolver) = &config.resolver {
        if let Some(width) = resolver.batch_width {
            if width == 0 || width > 10 {
                return Err(ScoutError::config("batch_width must be between 1 and 10"));
            }
        }
    }

    if let Some(selection) = &config.selection {
        if selection.target_count == Some(0) || selection.available_only_target_count == Some(0) {
            return Err(ScoutError::config("target counts must be positive"));
        }
    }

    Ok(())
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    pub resolver: ResolverConfig,
    pub affiliates: AffiliateIds,
    pub selection: SelectionConfig,
    pub bind_addr: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            affiliates: AffiliateIds::default(),
            selection: SelectionConfig::default(),
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl ScoutConfig {
    /// Build the effective configuration: defaults, overlaid with the file
    /// (when given), overlaid with environment variables.
    pub fn from_sources(file: Option<FileConfig>) -> Self {
        let mut config = Self::default();

        if let Some(file) = file {
            config.apply_file(file);
        }
        config.apply_env();

        config
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(resolver) = file.resolver {
            if let Some(key) = resolver.lookup_api_key {
                self.resolver.lookup_api_key = Some(key);
            }
            if let Some(url) = resolver.lookup_api_url {
                self.resolver.lookup_api_url = url;
            }
            if let Some(probe) = resolver.probe {
                self.resolver.probe_enabled = probe;
            }
            if let Some(width) = resolver.batch_width {
                self.resolver.batch_width = width.clamp(1, 10);
            }
            if let Some(delay) = resolver.batch_delay_ms {
                self.resolver.batch_delay = Duration::from_millis(delay);
            }
            if let Some(seed) = resolver.heuristic_seed {
                self.resolver.heuristic_seed = seed;
            }
        }

        if let Some(affiliates) = file.affiliates {
            for (value, slot) in [
                (affiliates.godaddy, &mut self.affiliates.godaddy),
                (affiliates.godaddy_plid, &mut self.affiliates.godaddy_plid),
                (affiliates.namecheap, &mut self.affiliates.namecheap),
                (affiliates.hover, &mut self.affiliates.hover),
                (affiliates.porkbun, &mut self.affiliates.porkbun),
                (affiliates.squarespace, &mut self.affiliates.squarespace),
            ] {
                if value.is_some() {
                    *slot = value;
                }
            }
        }

        if let Some(selection) = file.selection {
            if let Some(target) = selection.target_count {
                self.selection.default_target = target;
            }
            if let Some(target) = selection.available_only_target_count {
                self.selection.available_only_target = target;
            }
        }

        if let Some(server) = file.server {
            if let Some(addr) = server.bind_addr {
                self.bind_addr = addr;
            }
        }
    }

    fn apply_env(&mut self) {
        if let Some(key) = env_string("SCOUT_LOOKUP_API_KEY") {
            self.resolver.lookup_api_key = Some(key);
        }
        if let Some(url) = env_string("SCOUT_LOOKUP_API_URL") {
            self.resolver.lookup_api_url = url;
        }
        if let Some(probe) = env_bool("SCOUT_PROBE") {
            self.resolver.probe_enabled = probe;
        }
        if let Ok(val) = env::var("SCOUT_BATCH_WIDTH") {
            match val.parse::<usize>() {
                Ok(width) if (1..=10).contains(&width) => self.resolver.batch_width = width,
                _ => warn!("invalid SCOUT_BATCH_WIDTH='{}', must be 1-10", val),
            }
        }
        if let Ok(val) = env::var("SCOUT_TARGET_COUNT") {
            match val.parse::<usize>() {
                Ok(target) if target > 0 => self.selection.default_target = target,
                _ => warn!("invalid SCOUT_TARGET_COUNT='{}', must be positive", val),
            }
        }
        if let Some(addr) = env_string("SCOUT_BIND_ADDR") {
            self.bind_addr = addr;
        }

        for (var, slot) in [
            ("GODADDY_AFFILIATE_ID", &mut self.affiliates.godaddy),
            ("GODADDY_PLID", &mut self.affiliates.godaddy_plid),
            ("NAMECHEAP_AFFILIATE_ID", &mut self.affiliates.namecheap),
            ("HOVER_AFFILIATE_ID", &mut self.affiliates.hover),
            ("PORKBUN_AFFILIATE_ID", &mut self.affiliates.porkbun),
            ("SQUARESPACE_AFFILIATE_ID", &mut self.affiliates.squarespace),
        ] {
            if let Some(id) = env_string(var) {
                *slot = Some(id);
            }
        }
    }
}

fn env_string(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn env_bool(var: &str) -> Option<bool> {
    let val = env::var(var).ok()?;
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            warn!("invalid {}='{}', use true/false", var, val);
            None
        }
    }
}
