// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter {directives:?}"))
}

/// `RUST_LOG` wins over the configured level when it is set and non-empty.
fn resolve_filter(rust_log: Option<&str>, level: &str) -> Result<EnvFilter> {
    match rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        Some(directives) => parse_filter(directives).context("RUST_LOG"),
        None => parse_filter(level),
    }
}

/// Sends `tracing` output to `path`. The terminal belongs to the table view,
/// so nothing is written to stdout or stderr.
pub fn init(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let rust_log = env::var("RUST_LOG").ok();
    let filter = resolve_filter(rust_log.as_deref(), level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_filter, resolve_filter};
    use anyhow::Result;

    #[test]
    fn configured_level_applies_without_rust_log() -> Result<()> {
        let filter = resolve_filter(None, "debug")?;
        assert!(filter.to_string().contains("debug"));
        Ok(())
    }

    #[test]
    fn rust_log_overrides_configured_level() -> Result<()> {
        let filter = resolve_filter(Some("reelshelf_client=trace"), "warn")?;
        assert!(filter.to_string().contains("reelshelf_client=trace"));

        let blank = resolve_filter(Some("  "), "warn")?;
        assert!(blank.to_string().contains("warn"));
        Ok(())
    }

    #[test]
    fn bad_directives_are_rejected() {
        let error = parse_filter("very=loud=please").expect_err("invalid filter should fail");
        assert!(error.to_string().contains("invalid log filter"));
    }
}
