// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # sshs-observability
//!
//! Logging setup shared by the SSHS crates and tools, with per-crate debug
//! flag support.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Log targets understood by the debug flags
pub const KNOWN_CRATES: &[&str] = &["sshs-store", "sshs-config", "sshs-tool"];
