// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SSHS Configuration Files
//!
//! Binds an [`sshs_store::Sshs`] tree to an XML configuration file:
//! - file discovery (explicit path, `SSHS_CONFIG_PATH`, default name)
//! - import at startup, write-back at shutdown
//! - `<node> <key> <type> <value>` overrides from the CLI and environment
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sshs_config::{find_config_file, overrides_from_env, ConfigSession};
//! use sshs_store::Sshs;
//!
//! let path = find_config_file(None)?;
//! let overrides = overrides_from_env()?;
//! let (session, summary) = ConfigSession::load(Sshs::new(), &path, &overrides)?;
//! println!("{} override(s) applied", summary.applied_overrides);
//!
//! // ... run ...
//!
//! session.write_back()?;
//! # Ok::<(), sshs_config::ConfigError>(())
//! ```

use std::path::PathBuf;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    find_config_file, overrides_from_env, parse_override_list, ConfigSession, CONFIG_PATH_ENV_VAR,
    DEFAULT_CONFIG_FILE, OVERRIDES_ENV_VAR,
};
pub use types::*;
pub use validation::validate_config_path;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file {0} has no .xml extension")]
    NotXml(PathBuf),

    #[error("Configuration file {0} is not a regular file")]
    NotAFile(PathBuf),

    #[error("Configuration directory {0} does not exist")]
    MissingDirectory(PathBuf),

    #[error("Cannot create or read configuration file {0}: {1}")]
    Access(PathBuf, #[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration overrides need four components each, got {0} token(s)")]
    OverrideArity(usize),

    #[error("Invalid override entry '{0}', expected '<node> <key> <type> <value>'")]
    InvalidOverride(String),

    #[error(transparent)]
    Xml(#[from] sshs_store::XmlError),

    #[error(transparent)]
    Path(#[from] sshs_store::PathError),

    #[error(transparent)]
    Convert(#[from] sshs_store::ConvertError),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
