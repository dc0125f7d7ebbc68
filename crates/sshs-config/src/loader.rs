// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file lifecycle
//!
//! 1. Locate the XML file (explicit path, `SSHS_CONFIG_PATH`, default name)
//! 2. Import it into the store root
//! 3. Apply `<node> <key> <type> <value>` overrides (CLI, then `SSHS_OVERRIDES`)
//! 4. Write the tree back on shutdown

use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use sshs_store::{ExportFilter, Sshs};
use tracing::{debug, info, warn};

use crate::types::{parse_overrides, ConfigOverride, FailedOverride, LoadSummary};
use crate::validation::validate_config_path;
use crate::{ConfigError, ConfigResult};

/// File used when neither an explicit path nor `SSHS_CONFIG_PATH` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sshs_configuration.xml";

pub const CONFIG_PATH_ENV_VAR: &str = "SSHS_CONFIG_PATH";
pub const OVERRIDES_ENV_VAR: &str = "SSHS_OVERRIDES";

/// Runtime status attributes that are never written back.
pub const WRITE_BACK_SKIP_KEYS: &[&str] = &["running", "connectedClients"];
/// Runtime-only nodes that are never written back.
pub const WRITE_BACK_SKIP_NODES: &[&str] = &["sourceInfo"];

/// Resolve the configuration file path.
///
/// Order: `explicit`, then `SSHS_CONFIG_PATH`, then `./sshs_configuration.xml`.
/// The result is absolute and passes [`validate_config_path`]; the file
/// itself need not exist yet.
pub fn find_config_file(explicit: Option<&Path>) -> ConfigResult<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => env::var(CONFIG_PATH_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE)),
    };

    let path = if path.is_absolute() {
        path
    } else {
        env::current_dir()?.join(path)
    };

    validate_config_path(&path)?;
    Ok(path)
}

/// Overrides from `SSHS_OVERRIDES`: `;`-separated entries of four
/// whitespace-separated tokens. Empty entries are ignored.
pub fn overrides_from_env() -> ConfigResult<Vec<ConfigOverride>> {
    match env::var(OVERRIDES_ENV_VAR) {
        Ok(value) => parse_override_list(&value),
        Err(_) => Ok(Vec::new()),
    }
}

/// Parse the `SSHS_OVERRIDES` format.
pub fn parse_override_list(value: &str) -> ConfigResult<Vec<ConfigOverride>> {
    let mut overrides = Vec::new();
    for entry in value.split(';').map(str::trim).filter(|entry| !entry.is_empty()) {
        let tokens: Vec<&str> = entry.split_whitespace().collect();
        if tokens.len() != 4 {
            return Err(ConfigError::InvalidOverride(entry.to_string()));
        }
        overrides.extend(parse_overrides(&tokens)?);
    }
    Ok(overrides)
}

/// A store bound to its configuration file.
#[derive(Debug, Clone)]
pub struct ConfigSession {
    store: Sshs,
    config_file: PathBuf,
}

impl ConfigSession {
    /// Import `config_file` (subtree, strict) into the store root if it exists
    /// and is non-empty, then apply `overrides` in order.
    ///
    /// A missing file is created empty, so write-back can rely on it.
    /// Overrides that fail are logged and reported in the summary.
    pub fn load(
        store: Sshs,
        config_file: &Path,
        overrides: &[ConfigOverride],
    ) -> ConfigResult<(Self, LoadSummary)> {
        validate_config_path(config_file)?;

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(config_file)
            .map_err(|e| ConfigError::Access(config_file.to_path_buf(), e))?;
        let config_file = fs::canonicalize(config_file)?;

        let mut summary = LoadSummary {
            config_file: config_file.clone(),
            ..Default::default()
        };

        if fs::metadata(&config_file)?.len() > 0 {
            store.root().import_sub_tree_from_file(&config_file, true)?;
            summary.imported = true;
            info!(target: "sshs-config", "Loaded configuration from {}", config_file.display());
        } else {
            debug!(target: "sshs-config", "Configuration file {} is empty", config_file.display());
        }

        let session = Self { store, config_file };

        for config_override in overrides {
            match session.apply_override(config_override) {
                Ok(()) => summary.applied_overrides += 1,
                Err(e) => {
                    warn!(target: "sshs-config", "Failed to apply override '{}': {}", config_override, e);
                    summary.failed_overrides.push(FailedOverride {
                        config_override: config_override.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok((session, summary))
    }

    /// Resolve (creating) the node and run the string converter on it.
    pub fn apply_override(&self, config_override: &ConfigOverride) -> ConfigResult<()> {
        let node = self.store.get_node(&config_override.node_path)?;
        node.string_to_attribute(
            &config_override.key,
            &config_override.type_name,
            &config_override.value,
        )?;
        debug!(target: "sshs-config", "Applied override '{}'", config_override);
        Ok(())
    }

    /// Export the whole tree to the configuration file, replacing it.
    /// Runtime status keys and nodes are left out.
    pub fn write_back(&self) -> ConfigResult<()> {
        let filter = ExportFilter::new(
            WRITE_BACK_SKIP_KEYS.iter().copied(),
            WRITE_BACK_SKIP_NODES.iter().copied(),
        );
        self.store
            .root()
            .export_sub_tree_to_file_filtered(&self.config_file, &filter)?;
        info!(target: "sshs-config", "Wrote configuration to {}", self.config_file.display());
        Ok(())
    }

    pub fn store(&self) -> &Sshs {
        &self.store
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }
}
