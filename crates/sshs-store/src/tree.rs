// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Store root, path resolution and multi-node transactions

use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{default_error_log, ErrorLog, PathError};
use crate::node::{Node, NodeLock};

static GLOBAL: Lazy<Sshs> = Lazy::new(Sshs::new);

/// A configuration store: owns the root node (`/`).
#[derive(Clone, Debug)]
pub struct Sshs {
    root: Node,
}

impl Default for Sshs {
    fn default() -> Self {
        Self::new()
    }
}

impl Sshs {
    /// Fatal diagnostics go to `tracing::error!`.
    pub fn new() -> Self {
        Self::with_error_log(default_error_log())
    }

    /// Every node of this store reports fatal diagnostics to `error_log`.
    pub fn with_error_log(error_log: Arc<dyn ErrorLog>) -> Self {
        Self {
            root: Node::new_root(error_log),
        }
    }

    /// Process-wide store, created on first use.
    pub fn global() -> &'static Sshs {
        &GLOBAL
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Resolve an absolute path such as `/sensor/aps/`, creating missing nodes.
    pub fn get_node(&self, path: &str) -> Result<Node, PathError> {
        validate_absolute_path(path)?;
        Ok(absolute_components(path).fold(self.root.clone(), |node, name| node.add_child(name)))
    }

    /// Whether every node along an absolute path already exists.
    pub fn exists_node(&self, path: &str) -> Result<bool, PathError> {
        validate_absolute_path(path)?;
        let mut node = self.root.clone();
        for name in absolute_components(path) {
            match node.get_child(name) {
                Some(child) => node = child,
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Prepare a transaction over several nodes.
    ///
    /// All paths are validated before any node is created. Nodes are
    /// deduplicated and ordered by path, so concurrent transactions over
    /// overlapping sets always lock in the same order.
    pub fn begin_transaction(&self, paths: &[&str]) -> Result<Transaction, PathError> {
        for path in paths {
            validate_absolute_path(path)?;
        }

        let mut nodes = paths
            .iter()
            .map(|path| self.get_node(path))
            .collect::<Result<Vec<_>, _>>()?;
        nodes.sort_by(|a, b| a.path().cmp(b.path()));
        nodes.dedup();

        debug!(target: "sshs-store", "Transaction over {} node(s)", nodes.len());
        Ok(Transaction { nodes })
    }
}

/// Ordered set of nodes that can be locked together.
#[derive(Debug, Clone)]
pub struct Transaction {
    nodes: Vec<Node>,
}

/// Every node lock of a [`Transaction`]; released on drop.
pub struct TransactionGuard<'a> {
    _locks: Vec<NodeLock<'a>>,
}

impl Transaction {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Lock all nodes in path order.
    pub fn lock(&self) -> TransactionGuard<'_> {
        TransactionGuard {
            _locks: self.nodes.iter().map(Node::lock).collect(),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-_.:()[]{}".contains(c)
}

/// `segment/segment/.../`, at least one segment, every one non-empty.
fn is_segment_list(s: &str) -> bool {
    let Some(body) = s.strip_suffix('/') else {
        return false;
    };
    body.split('/')
        .all(|name| !name.is_empty() && name.chars().all(is_name_char))
}

/// Whether `name` is usable as a single path component.
pub fn is_valid_node_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}

pub(crate) fn validate_absolute_path(path: &str) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    match path.strip_prefix('/') {
        Some("") => Ok(()),
        Some(rest) if is_segment_list(rest) => Ok(()),
        _ => Err(PathError::InvalidAbsolute(path.to_string())),
    }
}

pub(crate) fn validate_relative_path(path: &str) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if is_segment_list(path) {
        Ok(())
    } else {
        Err(PathError::InvalidRelative(path.to_string()))
    }
}

fn absolute_components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|name| !name.is_empty())
}

pub(crate) fn relative_components(path: &str) -> impl Iterator<Item = &str> {
    absolute_components(path)
}
