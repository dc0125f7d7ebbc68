// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SSHS - Hierarchical Configuration Store
//!
//! A thread-safe tree of nodes holding typed, range-checked attributes,
//! with change listeners, multi-node transactions and XML persistence.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! sshs = "0.1"  # Default: store + config files + logging
//! ```
//!
//! ## Feature Flags
//!
//! - **`config`** (default): XML configuration file lifecycle
//! - **`observability`** (default): logging setup and `--debug-*` flags
//!
//! The store itself is always available.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sshs::prelude::*;
//!
//! let store = Sshs::new();
//! let aps = store.get_node("/sensor/aps/")?;
//! aps.create_int("Exposure", 4000, 0, 1_048_575, AttributeFlags::NORMAL, "Exposure time (us).")
//!     .or_exit();
//!
//! aps.add_attribute_listener(std::sync::Arc::new(
//!     |node: &Node, event: AttributeEvent, key: &str, value: &Value| {
//!         println!("{}{} {:?} -> {}", node.path(), key, event, value);
//!     },
//! ));
//! aps.put_int("Exposure", 5000)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  sshs-store                                             │
//! │  (nodes, attributes, listeners, transactions, XML)      │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  sshs-config                                            │
//! │  (config file discovery, overrides, write-back)         │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  sshs-tool  (+ sshs-observability for logging)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub use sshs_store as store;

#[cfg(feature = "config")]
pub use sshs_config as config;

#[cfg(feature = "observability")]
pub use sshs_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::store::{
        AttributeError, AttributeEvent, AttributeFlags, AttributeListener, ConfigurationError,
        Node, NodeEvent, NodeListener, OrExit, Sshs, Value, ValueType,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{find_config_file, ConfigSession};
}
