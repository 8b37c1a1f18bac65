// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reelshelf_app::{BatchPolicy, DEFAULT_INCREMENT_BATCH, DEFAULT_INITIAL_BATCH};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const APP_NAME: &str = "reelshelf";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            server: Server::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Server {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
    pub rescan_on_startup: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub initial_batch: Option<usize>,
    pub increment_batch: Option<usize>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            initial_batch: Some(DEFAULT_INITIAL_BATCH),
            increment_batch: Some(DEFAULT_INCREMENT_BATCH),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub path: Option<String>,
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("REELSHELF_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set REELSHELF_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [server], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(base_url) = &self.server.base_url {
            validate_base_url(base_url)
                .with_context(|| format!("server.base_url in {}", path.display()))?;
        }

        if let Some(timeout) = &self.server.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "server.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        for (name, value) in [
            ("ui.initial_batch", self.ui.initial_batch),
            ("ui.increment_batch", self.ui.increment_batch),
        ] {
            if value == Some(0) {
                bail!("{name} in {} must be at least 1", path.display());
            }
        }

        if let Some(level) = &self.log.level {
            crate::logging::parse_filter(level)
                .with_context(|| format!("log.level in {}", path.display()))?;
        }

        Ok(())
    }

    /// `[server].base_url`, then `REELSHELF_BASE_URL`, then the local default.
    pub fn base_url(&self) -> Result<String> {
        if let Some(base_url) = &self.server.base_url {
            return Ok(base_url.trim_end_matches('/').to_owned());
        }
        if let Some(value) = env::var_os("REELSHELF_BASE_URL") {
            let value = value
                .into_string()
                .map_err(|_| anyhow!("REELSHELF_BASE_URL is not valid UTF-8"))?;
            validate_base_url(&value).context("REELSHELF_BASE_URL")?;
            return Ok(value.trim_end_matches('/').to_owned());
        }
        Ok(DEFAULT_BASE_URL.to_owned())
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.server.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn rescan_on_startup(&self) -> bool {
        self.server.rescan_on_startup.unwrap_or(false)
    }

    pub fn batch_policy(&self) -> BatchPolicy {
        BatchPolicy {
            initial: self.ui.initial_batch.unwrap_or(DEFAULT_INITIAL_BATCH),
            increment: self.ui.increment_batch.unwrap_or(DEFAULT_INCREMENT_BATCH),
        }
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].path in the config file")
        })?;
        Ok(data_root.join(APP_NAME).join(format!("{APP_NAME}.log")))
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# reelshelf config\n# Place this file at: {}\n\nversion = 1\n\n[server]\nbase_url = \"{}\"\ntimeout = \"{}\"\n# Ask the server to re-index its library before loading.\nrescan_on_startup = false\n\n[ui]\ninitial_batch = {}\nincrement_batch = {}\n\n[log]\n# Optional. Default is platform data dir (for example ~/.local/share/reelshelf/reelshelf.log)\n# path = \"/absolute/path/to/reelshelf.log\"\n# RUST_LOG overrides this when set.\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_BASE_URL,
            DEFAULT_TIMEOUT,
            DEFAULT_INITIAL_BATCH,
            DEFAULT_INCREMENT_BATCH,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn validate_base_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw).with_context(|| format!("invalid url {raw:?}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("url {raw:?} must use http or https");
    }
    if url.query().is_some() {
        bail!("url {raw:?} must not carry a query string");
    }
    Ok(())
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}
