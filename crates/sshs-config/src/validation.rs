// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file path checks

use std::path::Path;

use crate::{ConfigError, ConfigResult};

/// A usable configuration file path:
/// - has an `.xml` extension
/// - if it exists, is a regular file
/// - if it does not exist, its parent is an existing directory
pub fn validate_config_path(path: &Path) -> ConfigResult<()> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("xml") {
        return Err(ConfigError::NotXml(path.to_path_buf()));
    }

    if path.exists() {
        if !path.is_file() {
            return Err(ConfigError::NotAFile(path.to_path_buf()));
        }
        return Ok(());
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(ConfigError::MissingDirectory(parent.to_path_buf()));
    }

    Ok(())
}
