//! Centralized path resolution for ash
//!
//! # Environment Variables
//!
//! - `ASH_CACHE_DIR` - Override the cache directory holding the pool
//! - `ASH_ASSETS_DIR` - Override the directory holding `scenario.yaml` and `agent.iso`
//! - `ASH_LIBVIRT_URI` - Override the libvirt connection URI
//!
//! # Path Resolution Priority
//!
//! For cache_dir():
//! 1. `ASH_CACHE_DIR` environment variable
//! 2. Platform user cache directory + `ash` (e.g. `~/.cache/ash`)
//!
//! For assets_dir():
//! 1. `ASH_ASSETS_DIR` environment variable
//! 2. `<current directory>/cluster`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for cache directory override
pub const ENV_CACHE_DIR: &str = "ASH_CACHE_DIR";

/// Environment variable for assets directory override
pub const ENV_ASSETS_DIR: &str = "ASH_ASSETS_DIR";

/// Environment variable for libvirt URI override
pub const ENV_LIBVIRT_URI: &str = "ASH_LIBVIRT_URI";

/// Boot ISO file name inside the assets directory
pub const AGENT_ISO: &str = "agent.iso";

/// Get the ash cache directory path
pub fn cache_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CACHE_DIR) {
        let path = expand(&dir);
        log::debug!("Using cache dir from {}: {}", ENV_CACHE_DIR, path.display());
        return Ok(path);
    }

    let path = dirs::cache_dir()
        .context("Could not determine user cache directory")?
        .join("ash");
    log::debug!("Using default cache dir: {}", path.display());
    Ok(path)
}

/// Get the assets directory path
pub fn assets_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_ASSETS_DIR) {
        let path = expand(&dir);
        log::debug!("Using assets dir from {}: {}", ENV_ASSETS_DIR, path.display());
        return Ok(path);
    }

    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    Ok(cwd.join("cluster"))
}

/// Get the libvirt connection URI
pub fn libvirt_uri() -> String {
    std::env::var(ENV_LIBVIRT_URI).unwrap_or_else(|_| virtkit::DEFAULT_URI.to_string())
}

/// Scenario document location
pub fn scenario_file() -> Result<PathBuf> {
    Ok(assets_dir()?.join(scenario::SCENARIO_FILENAME))
}

/// Boot ISO location
pub fn agent_iso() -> Result<PathBuf> {
    Ok(assets_dir()?.join(AGENT_ISO))
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================
