//! `load_config` module: loads the static YAML run configuration and injects environment overrides.
//!
//! # Responsibilities
//! - Parse the user-supplied YAML file into typed sections
//! - Map the `format` section onto core [`ProcessConfig`] values
//! - Let `RELEASE_NOTES_ENDPOINT` override the configured endpoint, so the
//!   stage/prod URL can live in `.env` instead of the file
//!
//! # Errors
//! All errors use `anyhow::Error` and are surfaced at the CLI boundary.
//!
//! Accepted schema:
//!
//! ```yaml
//! source_dir: ./src
//! endpoint: http://localhost:8080/api/v1/admin/release_notes
//! dry_run: false
//! format:
//!   profile: classic        # classic | extended
//!   main_tag: major         # optional: major | minor
//!   on_date_error: skip_note  # skip_note | abort_file
//! collect:
//!   docs_root: ../docs-v2
//! ```

use anyhow::{Context, Result};
use releasenotes_core::format::{FormatOptions, FormatProfile, MainTag};
use releasenotes_core::process::{DateErrorPolicy, ProcessConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Overrides `endpoint` from the file when set.
pub const ENDPOINT_ENV: &str = "RELEASE_NOTES_ENDPOINT";

#[derive(Debug, Deserialize)]
struct RawConfig {
    source_dir: PathBuf,
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    dry_run: bool,
    #[serde(default)]
    format: FormatSection,
    #[serde(default)]
    collect: Option<CollectSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormatSection {
    #[serde(default)]
    pub profile: FormatProfile,
    #[serde(default)]
    pub main_tag: Option<MainTag>,
    #[serde(default)]
    pub on_date_error: DateErrorPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectSection {
    pub docs_root: PathBuf,
}

/// Fully merged run configuration.
#[derive(Debug)]
pub struct MigrateConfig {
    pub source_dir: PathBuf,
    pub endpoint: Option<String>,
    pub dry_run: bool,
    pub process: ProcessConfig,
    pub collect: Option<CollectSection>,
}

impl MigrateConfig {
    /// Endpoint for live submissions.
    pub fn require_endpoint(&self) -> Result<&str> {
        self.endpoint.as_deref().with_context(|| {
            format!("no endpoint configured: set `endpoint` in the config file or {ENDPOINT_ENV}")
        })
    }
}

/// Loads a static YAML config file and applies environment overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MigrateConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let endpoint = match std::env::var(ENDPOINT_ENV) {
        Ok(url) if !url.trim().is_empty() => {
            info!(endpoint = %url, "RELEASE_NOTES_ENDPOINT found in env, overriding config");
            Some(url)
        }
        _ => raw.endpoint,
    };

    let mut format = FormatOptions::for_profile(raw.format.profile);
    if let Some(main_tag) = raw.format.main_tag {
        format = format.with_main_tag(main_tag);
    }

    info!(
        source_dir = %raw.source_dir.display(),
        profile = ?raw.format.profile,
        main_tag = ?format.main_tag,
        on_date_error = ?raw.format.on_date_error,
        dry_run = raw.dry_run,
        "Config loaded and merged successfully"
    );

    Ok(MigrateConfig {
        source_dir: raw.source_dir,
        endpoint,
        dry_run: raw.dry_run,
        process: ProcessConfig {
            format,
            on_date_error: raw.format.on_date_error,
        },
        collect: raw.collect,
    })
}
