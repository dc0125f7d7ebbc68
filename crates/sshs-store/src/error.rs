// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error tiers of the store.
//!
//! [`ConfigurationError`] marks caller bugs (bad attribute definitions) and is
//! meant to be fatal; see [`OrExit`]. Everything else is a runtime condition
//! the caller is expected to handle.

use std::sync::Arc;

use crate::value::ValueType;

/// Fatal tier: an attribute definition that can never be valid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("attribute '{key}': string length {bound} bound {value} outside [0, 2147483647]")]
    StringLengthLimit {
        key: String,
        bound: &'static str,
        value: i64,
    },

    #[error("attribute '{key}' ({value_type}): invalid range, {reason}")]
    InvalidRange {
        key: String,
        value_type: ValueType,
        reason: String,
    },

    #[error("attribute '{key}' ({value_type}): default value '{value}' is out of range")]
    DefaultOutOfRange {
        key: String,
        value_type: ValueType,
        value: String,
    },

    #[error("attribute '{key}': NOTIFY_ONLY flag requires type bool, got {value_type}")]
    NotifyOnlyNotBool { key: String, value_type: ValueType },

    #[error("attribute '{key}' already exists with type {existing}, cannot re-create as {requested}")]
    TypeChanged {
        key: String,
        existing: ValueType,
        requested: ValueType,
    },
}

/// Recoverable tier for attribute access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttributeError {
    #[error("attribute '{key}' of type {value_type} not found")]
    NotFound { key: String, value_type: ValueType },

    #[error("attribute '{key}' has type {actual}, requested {requested}")]
    TypeMismatch {
        key: String,
        requested: ValueType,
        actual: ValueType,
    },

    #[error("attribute '{key}' is read-only")]
    ReadOnly { key: String },

    #[error("attribute '{key}' is not read-only, use a regular put")]
    NotReadOnly { key: String },

    #[error("value '{value}' is out of range for attribute '{key}'")]
    OutOfRange { key: String, value: String },
}

/// Recoverable tier for XML import/export.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("XML I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid XML: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("root element is not 'sshs'")]
    NotSshs,

    #[error("unsupported document version {found:?}, expected \"1.0\"")]
    VersionMismatch { found: Option<String> },

    #[error("expected exactly one root node element, found {0}")]
    RootNodeCount(usize),

    #[error("root node name '{found}' does not match target node '{expected}'")]
    NameMismatch { expected: String, found: String },
}

/// Recoverable tier for path resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("invalid absolute node path '{0}'")]
    InvalidAbsolute(String),

    #[error("invalid relative node path '{0}'")]
    InvalidRelative(String),
}

/// Recoverable tier for text to value conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("unknown attribute type '{0}'")]
    UnknownType(String),

    #[error("cannot parse '{text}' as {value_type}: {reason}")]
    InvalidValue {
        value_type: ValueType,
        text: String,
        reason: String,
    },

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Result type for attribute operations.
pub type AttributeResult<T> = Result<T, AttributeError>;

/// Receives fatal-tier diagnostics before they are returned to the caller.
pub trait ErrorLog: Send + Sync {
    fn log_error(&self, message: &str);
}

impl<F> ErrorLog for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log_error(&self, message: &str) {
        self(message)
    }
}

/// Default sink: `tracing::error!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorLog;

impl ErrorLog for TracingErrorLog {
    fn log_error(&self, message: &str) {
        tracing::error!(target: "sshs-store", "{}", message);
    }
}

pub(crate) fn default_error_log() -> Arc<dyn ErrorLog> {
    Arc::new(TracingErrorLog)
}

/// Applies the default policy for fatal errors: terminate the process.
pub trait OrExit<T> {
    fn or_exit(self) -> T;
}

impl<T> OrExit<T> for Result<T, ConfigurationError> {
    fn or_exit(self) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                eprintln!("sshs: fatal configuration error: {e}");
                std::process::exit(1);
            }
        }
    }
}
