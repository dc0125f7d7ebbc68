// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # SSHS Store
//!
//! Thread-safe, hierarchical configuration tree. Every node owns typed
//! attributes with range and flag metadata, child nodes, and two kinds of
//! change listeners.
//!
//! ## Architecture
//!
//! ```text
//! Sshs ── root "/" ── Node "sensor/" ── Node "aps/"
//!                         │                 ├─ attributes (node lock, re-entrant)
//!                         │                 ├─ attribute / node listeners
//!                         │                 └─ children (traversal lock, RwLock)
//!                         └─ ...
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sshs_store::{AttributeFlags, Sshs};
//!
//! let store = Sshs::new();
//! let aps = store.get_node("/sensor/aps/")?;
//!
//! aps.create_int("Exposure", 4000, 0, 1_048_575, AttributeFlags::NORMAL, "Exposure time (us).")?;
//! aps.put_int("Exposure", 5000)?;
//! assert_eq!(aps.get_int("Exposure")?, 5000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error tiers
//!
//! Definition mistakes (`create_*` with an impossible range or default)
//! return [`ConfigurationError`]; applications normally apply
//! [`OrExit::or_exit`] to them. Runtime conditions (missing key, wrong type,
//! read-only, out of range, bad XML) use the recoverable error types.

pub mod attribute;
pub mod error;
pub mod events;
pub mod node;
pub mod tree;
pub mod value;
pub mod xml;

pub use attribute::{in_range, Attribute, AttributeFlags, AttributeRanges, RangeBound, STRING_LENGTH_LIMIT};
pub use error::{
    AttributeError, AttributeResult, ConfigurationError, ConvertError, ErrorLog, OrExit, PathError,
    TracingErrorLog, XmlError,
};
pub use events::{AttributeEvent, AttributeListener, NodeEvent, NodeListener};
pub use node::{Node, NodeLock, IMPORTED_DESCRIPTION};
pub use tree::{is_valid_node_name, Sshs, Transaction, TransactionGuard};
pub use value::{AttributeKind, ExternalValue, Value, ValueType};
pub use xml::{ExportFilter, XML_VERSION};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
