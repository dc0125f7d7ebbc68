// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Change notifications
//!
//! Listeners are registered as `Arc`s and identified by pointer: the same
//! `Arc` registered twice is stored once, and removing an `Arc` that was
//! never registered does nothing. Any captured state plays the role of the
//! user-data pointer.

use std::sync::Arc;

use crate::node::Node;
use crate::value::Value;

/// Structural change on a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeEvent {
    ChildNodeAdded,
    ChildNodeRemoved,
}

/// Attribute lifecycle change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeEvent {
    Added,
    Modified,
    Removed,
}

/// Receives [`NodeEvent`]s. Called synchronously on the mutating thread.
pub trait NodeListener: Send + Sync {
    fn on_node_event(&self, node: &Node, event: NodeEvent, child_name: &str);
}

impl<F> NodeListener for F
where
    F: Fn(&Node, NodeEvent, &str) + Send + Sync,
{
    fn on_node_event(&self, node: &Node, event: NodeEvent, child_name: &str) {
        self(node, event, child_name)
    }
}

/// Receives [`AttributeEvent`]s while the node lock is held.
///
/// The value is the new value for `Added`/`Modified` and the last stored
/// value for `Removed`; its type is `value.value_type()`.
pub trait AttributeListener: Send + Sync {
    fn on_attribute_event(&self, node: &Node, event: AttributeEvent, key: &str, value: &Value);
}

impl<F> AttributeListener for F
where
    F: Fn(&Node, AttributeEvent, &str, &Value) + Send + Sync,
{
    fn on_attribute_event(&self, node: &Node, event: AttributeEvent, key: &str, value: &Value) {
        self(node, event, key, value)
    }
}

/// Ordered, duplicate-free set of listeners.
pub(crate) struct ListenerList<L: ?Sized> {
    entries: Vec<Arc<L>>,
}

impl<L: ?Sized> Default for ListenerList<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

fn same_listener<L: ?Sized>(a: &Arc<L>, b: &Arc<L>) -> bool {
    // Thin pointers only: vtable addresses are not stable across codegen units.
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

impl<L: ?Sized> ListenerList<L> {
    /// Returns false if the listener was already registered.
    pub fn add(&mut self, listener: Arc<L>) -> bool {
        if self.entries.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        self.entries.push(listener);
        true
    }

    /// Returns false if the listener was not registered.
    pub fn remove(&mut self, listener: &Arc<L>) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| !same_listener(l, listener));
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Copy taken before dispatch, so listeners may (de)register re-entrantly.
    pub fn snapshot(&self) -> Vec<Arc<L>> {
        self.entries.clone()
    }
}
