// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
SSHS Configuration Tool

Loads an SSHS XML configuration file, applies overrides, and queries or
modifies the tree.

Usage:
  sshs-tool [--config <file.xml>] [--override <node> <key> <type> <value>]... <command>

Examples:
  sshs-tool --config caer.xml dump --node /caer/
  sshs-tool get /caer/logger/ logLevel byte
  sshs-tool set /caer/logger/ logLevel byte 7
  sshs-tool --debug-sshs-store keys /caer/logger/

Debug logging: --debug-all, --debug-<crate>, or SSHS_DEBUG=<crate>[,<crate>].
*/

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use sshs::config::{find_config_file, overrides_from_env, parse_overrides, ConfigSession};
use sshs::observability::{debug_flags_help, init_logging, parse_debug_flags, LoggingConfig};
use sshs::store::{Sshs, ValueType};

/// Inspect and edit SSHS configuration files
#[derive(Parser, Debug)]
#[command(name = "sshs-tool", version, author, long_about = None, after_help = debug_flags_help())]
struct Args {
    /// Configuration file (default: $SSHS_CONFIG_PATH or ./sshs_configuration.xml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override applied after loading; repeatable
    #[arg(
        long = "override",
        num_args = 4,
        value_names = ["NODE", "KEY", "TYPE", "VALUE"],
        action = clap::ArgAction::Append,
        global = true
    )]
    overrides: Vec<String>,

    /// Also write logs to this file (JSON lines)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a subtree as XML to stdout
    Dump {
        #[arg(long, default_value = "/")]
        node: String,
    },
    /// Print an attribute value
    Get {
        node: String,
        key: String,
        #[arg(value_name = "TYPE")]
        value_type: ValueType,
    },
    /// Set an attribute from text, then write the configuration back
    Set {
        node: String,
        key: String,
        #[arg(value_name = "TYPE")]
        type_name: String,
        value: String,
    },
    /// List attribute keys with their types
    Keys { node: String },
    /// List child node names
    Children { node: String },
}

/// Arguments for clap; `--debug-*` flags belong to the logging setup.
fn clap_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .filter(|arg| !arg.starts_with("--debug-"))
        .collect()
}

fn main() -> Result<()> {
    let debug_flags = parse_debug_flags();
    let args = Args::parse_from(clap_args(std::env::args()));

    let mut logging = LoggingConfig::default();
    if let Some(path) = &args.log_file {
        logging = logging.with_file(path);
    }
    let logging_guard = init_logging(&debug_flags, &logging)?;
    if let Some(path) = logging_guard.log_file() {
        info!(target: "sshs-tool", "Logging to {}", path.display());
    }

    let config_file = find_config_file(args.config.as_deref())?;
    let mut overrides = parse_overrides(&args.overrides)?;
    overrides.extend(overrides_from_env()?);

    let (session, summary) = ConfigSession::load(Sshs::new(), &config_file, &overrides)
        .with_context(|| format!("loading {}", config_file.display()))?;
    info!(
        target: "sshs-tool",
        "Configuration {} ({} override(s) applied, {} failed)",
        summary.config_file.display(),
        summary.applied_overrides,
        summary.failed_overrides.len()
    );

    run(&session, args.command)
}

fn run(session: &ConfigSession, command: Command) -> Result<()> {
    let store = session.store();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Dump { node } => {
            if !store.exists_node(&node)? {
                bail!("node {} does not exist", node);
            }
            store.get_node(&node)?.export_sub_tree(&mut out)?;
        }
        Command::Get { node, key, value_type } => {
            let value = existing_node(store, &node)?.get_attribute(&key, value_type)?;
            writeln!(out, "{}", value)?;
        }
        Command::Set { node, key, type_name, value } => {
            store
                .get_node(&node)?
                .string_to_attribute(&key, &type_name, &value)
                .with_context(|| format!("setting {}{}", node, key))?;
            session.write_back()?;
        }
        Command::Keys { node } => {
            let node = existing_node(store, &node)?;
            for key in node.get_attribute_keys() {
                let value_type = node
                    .get_attribute_type(&key)
                    .map(ValueType::as_str)
                    .unwrap_or("?");
                writeln!(out, "{} ({})", key, value_type)?;
            }
        }
        Command::Children { node } => {
            for name in existing_node(store, &node)?.get_child_names() {
                writeln!(out, "{}", name)?;
            }
        }
    }

    Ok(())
}

fn existing_node(store: &Sshs, path: &str) -> Result<sshs::store::Node> {
    if !store.exists_node(path)? {
        bail!("node {} does not exist", path);
    }
    Ok(store.get_node(path)?)
}
