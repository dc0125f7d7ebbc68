// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Override and load-result types

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// One `<node> <key> <type> <value>` override, e.g.
/// `/caer/logger/ logLevel byte 7`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOverride {
    pub node_path: String,
    pub key: String,
    pub type_name: String,
    pub value: String,
}

impl ConfigOverride {
    pub fn new(node_path: &str, key: &str, type_name: &str, value: &str) -> Self {
        Self {
            node_path: node_path.to_string(),
            key: key.to_string(),
            type_name: type_name.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ConfigOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.node_path, self.key, self.type_name, self.value)
    }
}

/// Group a flat argument list into overrides, four tokens each.
pub fn parse_overrides<S: AsRef<str>>(tokens: &[S]) -> ConfigResult<Vec<ConfigOverride>> {
    if tokens.len() % 4 != 0 {
        return Err(ConfigError::OverrideArity(tokens.len()));
    }

    Ok(tokens
        .chunks_exact(4)
        .map(|chunk| {
            ConfigOverride::new(
                chunk[0].as_ref(),
                chunk[1].as_ref(),
                chunk[2].as_ref(),
                chunk[3].as_ref(),
            )
        })
        .collect())
}

/// An override that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedOverride {
    pub config_override: ConfigOverride,
    pub reason: String,
}

/// What [`crate::ConfigSession::load`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub config_file: PathBuf,
    /// False when the file was missing or empty.
    pub imported: bool,
    pub applied_overrides: usize,
    pub failed_overrides: Vec<FailedOverride>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let tokens = [
            "/caer/logger/", "logLevel", "byte", "7",
            "/caer/", "name", "string", "dvs",
        ];
        let overrides = parse_overrides(&tokens).unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides[0], ConfigOverride::new("/caer/logger/", "logLevel", "byte", "7"));
        assert_eq!(overrides[1].to_string(), "/caer/ name string dvs");
    }

    #[test]
    fn test_parse_overrides_needs_quadruples() {
        let tokens = vec!["/caer/".to_string(), "logLevel".to_string(), "byte".to_string()];
        assert!(matches!(parse_overrides(&tokens), Err(ConfigError::OverrideArity(3))));
        assert!(parse_overrides::<&str>(&[]).unwrap().is_empty());
    }
}
