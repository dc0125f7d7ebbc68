// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration tree nodes
//!
//! Each node carries two locks:
//!
//! - the **node lock** (re-entrant) guards the attribute map and both
//!   listener lists. Attribute listeners run while it is held, so all
//!   notifications of one node are delivered in mutation order.
//! - the **traversal lock** (reader/writer) guards only the children map.
//!
//! Attribute work never touches the traversal lock, so different nodes can
//! be modified fully in parallel.

use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, Weak};

use ahash::AHashMap;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock, RwLockUpgradableReadGuard};
use tracing::debug;

use crate::attribute::{in_range, validate_definition, Attribute, AttributeFlags, AttributeRanges};
use crate::error::{AttributeError, AttributeResult, ConfigurationError, ConvertError, ErrorLog, PathError};
use crate::events::{AttributeEvent, AttributeListener, ListenerList, NodeEvent, NodeListener};
use crate::tree::{is_valid_node_name, relative_components, validate_relative_path};
use crate::value::{AttributeKind, Value, ValueType};

/// Description given to attributes created from untyped external input.
pub const IMPORTED_DESCRIPTION: &str = "XML loaded value.";

#[derive(Default)]
struct NodeState {
    attributes: AHashMap<String, Attribute>,
    attribute_listeners: ListenerList<dyn AttributeListener>,
    node_listeners: ListenerList<dyn NodeListener>,
}

struct NodeInner {
    name: String,
    path: String,
    parent: Option<Weak<NodeInner>>,
    error_log: Arc<dyn ErrorLog>,
    children: RwLock<AHashMap<String, Node>>,
    state: ReentrantMutex<RefCell<NodeState>>,
}

/// Shared handle to a node of the configuration tree.
///
/// Cloning is cheap; clones refer to the same node. A node owns its
/// children, children only keep a weak back-reference to their parent.
#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeInner>,
}

/// Holds a node lock; other threads block on every attribute operation of
/// that node until it is dropped. Calls on the same thread proceed.
pub struct NodeLock<'a> {
    _guard: ReentrantMutexGuard<'a, RefCell<NodeState>>,
}

type AttributeListeners = Vec<Arc<dyn AttributeListener>>;

impl Node {
    pub(crate) fn new_root(error_log: Arc<dyn ErrorLog>) -> Self {
        Self::with_parent("", "/".to_string(), None, error_log)
    }

    fn new_child(parent: &Node, name: &str) -> Self {
        Self::with_parent(
            name,
            format!("{}{}/", parent.path(), name),
            Some(Arc::downgrade(&parent.inner)),
            parent.inner.error_log.clone(),
        )
    }

    fn with_parent(
        name: &str,
        path: String,
        parent: Option<Weak<NodeInner>>,
        error_log: Arc<dyn ErrorLog>,
    ) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                name: name.to_string(),
                path,
                parent,
                error_log,
                children: RwLock::new(AHashMap::new()),
                state: ReentrantMutex::new(RefCell::new(NodeState::default())),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Absolute, slash-terminated path. `/` for the root.
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// `None` for the root, or once the parent has been dropped.
    pub fn parent(&self) -> Option<Node> {
        self.inner
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Node { inner })
    }

    pub fn is_root(&self) -> bool {
        self.inner.parent.is_none()
    }

    /// Take the node lock for a caller-composed transaction.
    ///
    /// Attribute calls on this node from the same thread keep working while
    /// the lock is held; other threads wait until it is dropped.
    pub fn lock(&self) -> NodeLock<'_> {
        NodeLock {
            _guard: self.inner.state.lock(),
        }
    }

    fn fatal(&self, err: ConfigurationError) -> ConfigurationError {
        self.inner
            .error_log
            .log_error(&format!("{}: {}", self.path(), err));
        err
    }

    fn notify_attribute(
        &self,
        listeners: &[Arc<dyn AttributeListener>],
        event: AttributeEvent,
        key: &str,
        value: &Value,
    ) {
        for listener in listeners {
            listener.on_attribute_event(self, event, key, value);
        }
    }

    fn notify_node(&self, event: NodeEvent, child_name: &str) {
        let guard = self.inner.state.lock();
        let listeners = guard.borrow().node_listeners.snapshot();
        for listener in &listeners {
            listener.on_node_event(self, event, child_name);
        }
    }

    // ===== Children =====

    /// Get or create the child `name`.
    ///
    /// `name` must be a single valid path component (see
    /// [`is_valid_node_name`]); path-based lookups validate before calling.
    ///
    /// Check and insert happen under one upgradable lock, so concurrent
    /// callers always get the same child and `ChildNodeAdded` fires once.
    pub fn add_child(&self, name: &str) -> Node {
        debug_assert!(is_valid_node_name(name), "invalid node name '{name}'");

        let children = self.inner.children.upgradable_read();
        if let Some(child) = children.get(name) {
            return child.clone();
        }

        let mut children = RwLockUpgradableReadGuard::upgrade(children);
        let child = Node::new_child(self, name);
        children.insert(name.to_string(), child.clone());
        drop(children);

        debug!(target: "sshs-store", "Created node {}", child.path());
        self.notify_node(NodeEvent::ChildNodeAdded, name);

        child
    }

    pub fn get_child(&self, name: &str) -> Option<Node> {
        self.inner.children.read().get(name).cloned()
    }

    /// Snapshot of the children, sorted by name.
    pub fn get_children(&self) -> Vec<Node> {
        let mut children: Vec<Node> = self.inner.children.read().values().cloned().collect();
        children.sort_by(|a, b| a.name().cmp(b.name()));
        children
    }

    pub fn get_child_names(&self) -> Vec<String> {
        self.get_children()
            .iter()
            .map(|child| child.name().to_string())
            .collect()
    }

    pub fn has_children(&self) -> bool {
        !self.inner.children.read().is_empty()
    }

    /// Resolve a relative path such as `aps/bias/`, creating missing nodes.
    pub fn get_relative_node(&self, path: &str) -> Result<Node, PathError> {
        validate_relative_path(path)?;
        Ok(relative_components(path).fold(self.clone(), |node, name| node.add_child(name)))
    }

    /// Whether every node along a relative path already exists.
    pub fn exists_relative_node(&self, path: &str) -> Result<bool, PathError> {
        validate_relative_path(path)?;
        let mut node = self.clone();
        for name in relative_components(path) {
            match node.get_child(name) {
                Some(child) => node = child,
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Destroy this node with its whole subtree.
    ///
    /// Attributes are removed first (with `Removed` notifications), then the
    /// structure bottom-up, then the node is unlinked from its parent. The
    /// root is emptied but never unlinked.
    ///
    /// The caller must make sure no other thread is working inside the
    /// subtree; the store does not guard against that race.
    pub fn remove_node(&self) {
        self.clear_sub_tree(true);
        self.remove_sub_tree();

        if let Some(parent) = self.parent() {
            parent.remove_child(self.name());
        }
    }

    /// Remove every attribute and attribute listener below this node,
    /// keeping the node structure. The start node itself is only cleared
    /// when `clear_start_node` is set.
    pub fn clear_sub_tree(&self, clear_start_node: bool) {
        if clear_start_node {
            self.remove_all_attributes();
            self.remove_all_attribute_listeners();
        }

        for child in self.get_children() {
            child.clear_sub_tree(true);
        }
    }

    fn remove_sub_tree(&self) {
        for child in self.get_children() {
            child.remove_sub_tree();
        }

        self.remove_all_children();
        self.remove_all_node_listeners();
    }

    fn remove_child(&self, name: &str) {
        let removed = self.inner.children.write().remove(name);
        if removed.is_some() {
            debug!(target: "sshs-store", "Removed node {}{}/", self.path(), name);
            self.notify_node(NodeEvent::ChildNodeRemoved, name);
        }
    }

    fn remove_all_children(&self) {
        let mut drained: Vec<String> = self.inner.children.write().drain().map(|(name, _)| name).collect();
        drained.sort();

        for name in drained {
            self.notify_node(NodeEvent::ChildNodeRemoved, &name);
        }
    }

    // ===== Listeners =====

    /// Registering the same `Arc` again is a no-op.
    pub fn add_node_listener(&self, listener: Arc<dyn NodeListener>) {
        let guard = self.inner.state.lock();
        guard.borrow_mut().node_listeners.add(listener);
    }

    /// No-op if the listener is not registered.
    pub fn remove_node_listener(&self, listener: &Arc<dyn NodeListener>) {
        let guard = self.inner.state.lock();
        guard.borrow_mut().node_listeners.remove(listener);
    }

    pub fn remove_all_node_listeners(&self) {
        let guard = self.inner.state.lock();
        guard.borrow_mut().node_listeners.clear();
    }

    /// Registering the same `Arc` again is a no-op.
    pub fn add_attribute_listener(&self, listener: Arc<dyn AttributeListener>) {
        let guard = self.inner.state.lock();
        guard.borrow_mut().attribute_listeners.add(listener);
    }

    /// No-op if the listener is not registered.
    pub fn remove_attribute_listener(&self, listener: &Arc<dyn AttributeListener>) {
        let guard = self.inner.state.lock();
        guard.borrow_mut().attribute_listeners.remove(listener);
    }

    pub fn remove_all_attribute_listeners(&self) {
        let guard = self.inner.state.lock();
        guard.borrow_mut().attribute_listeners.clear();
    }

    // ===== Attributes =====

    /// Declare an attribute. Safe to call again on every (re)initialisation.
    ///
    /// - new key: stored, `Added` fires.
    /// - same key and type: range, flags and description are replaced; the
    ///   current value is kept if the new range still admits it, otherwise it
    ///   is reset to `default_value` and `Modified` fires.
    /// - same key, other type: [`ConfigurationError::TypeChanged`].
    ///
    /// Every error is a definition bug; it is reported to the store's
    /// [`ErrorLog`] before being returned.
    pub fn create_attribute(
        &self,
        key: &str,
        default_value: Value,
        ranges: AttributeRanges,
        flags: AttributeFlags,
        description: &str,
    ) -> Result<(), ConfigurationError> {
        if let Err(err) = validate_definition(key, &default_value, &ranges, flags) {
            return Err(self.fatal(err));
        }

        let value_type = default_value.value_type();
        let guard = self.inner.state.lock();

        let (event, listeners) = {
            let mut state = guard.borrow_mut();
            let existing = state.attributes.get(key).map(Attribute::value_type);

            match existing {
                None => {
                    state.attributes.insert(
                        key.to_string(),
                        Attribute::new(default_value.clone(), ranges, flags, description),
                    );
                    debug!(target: "sshs-store", "Created attribute {}{} ({})", self.path(), key, value_type);
                    (AttributeEvent::Added, state.attribute_listeners.snapshot())
                }
                Some(existing) if existing != value_type => {
                    drop(state);
                    drop(guard);
                    return Err(self.fatal(ConfigurationError::TypeChanged {
                        key: key.to_string(),
                        existing,
                        requested: value_type,
                    }));
                }
                Some(_) => {
                    let Some(attribute) = state.attributes.get_mut(key) else {
                        return Ok(());
                    };
                    attribute.redefine(ranges, flags, description);
                    if in_range(attribute.value(), &ranges) {
                        return Ok(());
                    }
                    attribute.set_value(default_value.clone());
                    (AttributeEvent::Modified, state.attribute_listeners.snapshot())
                }
            }
        };

        self.notify_attribute(&listeners, event, key, &default_value);
        drop(guard);

        Ok(())
    }

    pub fn create_bool(
        &self,
        key: &str,
        default_value: bool,
        flags: AttributeFlags,
        description: &str,
    ) -> Result<(), ConfigurationError> {
        self.create_attribute(key, Value::Bool(default_value), AttributeRanges::none(), flags, description)
    }

    pub fn create_byte(
        &self,
        key: &str,
        default_value: i8,
        min: i8,
        max: i8,
        flags: AttributeFlags,
        description: &str,
    ) -> Result<(), ConfigurationError> {
        let ranges = AttributeRanges::integer(min.into(), max.into());
        self.create_attribute(key, Value::Byte(default_value), ranges, flags, description)
    }

    pub fn create_short(
        &self,
        key: &str,
        default_value: i16,
        min: i16,
        max: i16,
        flags: AttributeFlags,
        description: &str,
    ) -> Result<(), ConfigurationError> {
        let ranges = AttributeRanges::integer(min.into(), max.into());
        self.create_attribute(key, Value::Short(default_value), ranges, flags, description)
    }

    pub fn create_int(
        &self,
        key: &str,
        default_value: i32,
        min: i32,
        max: i32,
        flags: AttributeFlags,
        description: &str,
    ) -> Result<(), ConfigurationError> {
        let ranges = AttributeRanges::integer(min.into(), max.into());
        self.create_attribute(key, Value::Int(default_value), ranges, flags, description)
    }

    pub fn create_long(
        &self,
        key: &str,
        default_value: i64,
        min: i64,
        max: i64,
        flags: AttributeFlags,
        description: &str,
    ) -> Result<(), ConfigurationError> {
        let ranges = AttributeRanges::integer(min, max);
        self.create_attribute(key, Value::Long(default_value), ranges, flags, description)
    }

    pub fn create_float(
        &self,
        key: &str,
        default_value: f32,
        min: f32,
        max: f32,
        flags: AttributeFlags,
        description: &str,
    ) -> Result<(), ConfigurationError> {
        let ranges = AttributeRanges::floating(min.into(), max.into());
        self.create_attribute(key, Value::Float(default_value), ranges, flags, description)
    }

    pub fn create_double(
        &self,
        key: &str,
        default_value: f64,
        min: f64,
        max: f64,
        flags: AttributeFlags,
        description: &str,
    ) -> Result<(), ConfigurationError> {
        let ranges = AttributeRanges::floating(min, max);
        self.create_attribute(key, Value::Double(default_value), ranges, flags, description)
    }

    /// `min_length`/`max_length` are UTF-8 byte lengths.
    pub fn create_string(
        &self,
        key: &str,
        default_value: &str,
        min_length: usize,
        max_length: usize,
        flags: AttributeFlags,
        description: &str,
    ) -> Result<(), ConfigurationError> {
        let ranges = AttributeRanges::length(min_length, max_length);
        self.create_attribute(key, Value::from(default_value), ranges, flags, description)
    }

    /// Remove `key` if it exists with `value_type`; otherwise do nothing.
    pub fn remove_attribute(&self, key: &str, value_type: ValueType) {
        let guard = self.inner.state.lock();

        let (removed, listeners) = {
            let mut state = guard.borrow_mut();
            match state.attributes.get(key) {
                Some(attribute) if attribute.value_type() == value_type => {}
                _ => return,
            }
            let removed = state.attributes.remove(key);
            (removed, state.attribute_listeners.snapshot())
        };

        if let Some(attribute) = removed {
            debug!(target: "sshs-store", "Removed attribute {}{}", self.path(), key);
            self.notify_attribute(&listeners, AttributeEvent::Removed, key, attribute.value());
        }
    }

    /// Remove every attribute, one `Removed` notification each.
    pub fn remove_all_attributes(&self) {
        let guard = self.inner.state.lock();

        let (mut removed, listeners): (Vec<(String, Attribute)>, AttributeListeners) = {
            let mut state = guard.borrow_mut();
            let removed = state.attributes.drain().collect();
            (removed, state.attribute_listeners.snapshot())
        };
        removed.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, attribute) in &removed {
            self.notify_attribute(&listeners, AttributeEvent::Removed, key, attribute.value());
        }
    }

    /// Whether `key` exists with exactly `value_type`.
    pub fn exists(&self, key: &str, value_type: ValueType) -> bool {
        self.get_attribute_type(key) == Some(value_type)
    }

    fn read_attribute<R>(
        &self,
        key: &str,
        value_type: ValueType,
        read: impl FnOnce(&Attribute) -> R,
    ) -> AttributeResult<R> {
        let guard = self.inner.state.lock();
        let state = guard.borrow();

        let attribute = state.attributes.get(key).ok_or_else(|| AttributeError::NotFound {
            key: key.to_string(),
            value_type,
        })?;

        if attribute.value_type() != value_type {
            return Err(AttributeError::TypeMismatch {
                key: key.to_string(),
                requested: value_type,
                actual: attribute.value_type(),
            });
        }

        Ok(read(attribute))
    }

    /// Copy of the current value.
    pub fn get_attribute(&self, key: &str, value_type: ValueType) -> AttributeResult<Value> {
        self.read_attribute(key, value_type, |attribute| attribute.value().clone())
    }

    /// User-facing put. Fails on read-only attributes; use
    /// [`Node::update_read_only_attribute`] for those.
    pub fn put_attribute(&self, key: &str, value: Value) -> AttributeResult<()> {
        self.write_attribute(key, value, false)
    }

    /// Internal put for read-only status attributes. Fails on attributes that
    /// are not read-only.
    pub fn update_read_only_attribute(&self, key: &str, value: Value) -> AttributeResult<()> {
        self.write_attribute(key, value, true)
    }

    fn write_attribute(&self, key: &str, value: Value, force_read_only: bool) -> AttributeResult<()> {
        let guard = self.inner.state.lock();

        let listeners = {
            let mut state = guard.borrow_mut();

            let attribute = state.attributes.get_mut(key).ok_or_else(|| AttributeError::NotFound {
                key: key.to_string(),
                value_type: value.value_type(),
            })?;

            if attribute.value_type() != value.value_type() {
                return Err(AttributeError::TypeMismatch {
                    key: key.to_string(),
                    requested: value.value_type(),
                    actual: attribute.value_type(),
                });
            }

            let read_only = attribute.flags().contains(AttributeFlags::READ_ONLY);
            if read_only && !force_read_only {
                return Err(AttributeError::ReadOnly { key: key.to_string() });
            }
            if !read_only && force_read_only {
                return Err(AttributeError::NotReadOnly { key: key.to_string() });
            }

            if !in_range(&value, &attribute.ranges()) {
                return Err(AttributeError::OutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }

            let changed = *attribute.value() != value;

            // Notify-only attributes signal the put but keep their stored value.
            if force_read_only || !attribute.flags().contains(AttributeFlags::NOTIFY_ONLY) {
                attribute.set_value(value.clone());
            }

            if !changed {
                return Ok(());
            }

            state.attribute_listeners.snapshot()
        };

        self.notify_attribute(&listeners, AttributeEvent::Modified, key, &value);
        drop(guard);

        Ok(())
    }

    /// Typed get: `node.get::<i32>("Exposure")`.
    pub fn get<T: AttributeKind>(&self, key: &str) -> AttributeResult<T> {
        let value = self.get_attribute(key, T::VALUE_TYPE)?;
        T::from_value(value).ok_or_else(|| AttributeError::TypeMismatch {
            key: key.to_string(),
            requested: T::VALUE_TYPE,
            actual: T::VALUE_TYPE,
        })
    }

    /// Typed put: `node.put("Exposure", 5000_i32)`.
    pub fn put<T: AttributeKind>(&self, key: &str, value: T) -> AttributeResult<()> {
        self.put_attribute(key, value.into_value())
    }

    pub fn update_read_only<T: AttributeKind>(&self, key: &str, value: T) -> AttributeResult<()> {
        self.update_read_only_attribute(key, value.into_value())
    }

    pub fn get_bool(&self, key: &str) -> AttributeResult<bool> {
        self.get(key)
    }

    pub fn get_byte(&self, key: &str) -> AttributeResult<i8> {
        self.get(key)
    }

    pub fn get_short(&self, key: &str) -> AttributeResult<i16> {
        self.get(key)
    }

    pub fn get_int(&self, key: &str) -> AttributeResult<i32> {
        self.get(key)
    }

    pub fn get_long(&self, key: &str) -> AttributeResult<i64> {
        self.get(key)
    }

    pub fn get_float(&self, key: &str) -> AttributeResult<f32> {
        self.get(key)
    }

    pub fn get_double(&self, key: &str) -> AttributeResult<f64> {
        self.get(key)
    }

    pub fn get_string(&self, key: &str) -> AttributeResult<String> {
        self.get(key)
    }

    pub fn put_bool(&self, key: &str, value: bool) -> AttributeResult<()> {
        self.put(key, value)
    }

    pub fn put_byte(&self, key: &str, value: i8) -> AttributeResult<()> {
        self.put(key, value)
    }

    pub fn put_short(&self, key: &str, value: i16) -> AttributeResult<()> {
        self.put(key, value)
    }

    pub fn put_int(&self, key: &str, value: i32) -> AttributeResult<()> {
        self.put(key, value)
    }

    pub fn put_long(&self, key: &str, value: i64) -> AttributeResult<()> {
        self.put(key, value)
    }

    pub fn put_float(&self, key: &str, value: f32) -> AttributeResult<()> {
        self.put(key, value)
    }

    pub fn put_double(&self, key: &str, value: f64) -> AttributeResult<()> {
        self.put(key, value)
    }

    pub fn put_string(&self, key: &str, value: &str) -> AttributeResult<()> {
        self.put_attribute(key, Value::from(value))
    }

    // ===== Introspection =====

    /// Snapshot of the attribute keys. Keys ending in `ListOptions` come
    /// first, the rest follow in lexical order.
    pub fn get_attribute_keys(&self) -> Vec<String> {
        let guard = self.inner.state.lock();
        let mut keys: Vec<String> = guard.borrow().attributes.keys().cloned().collect();
        drop(guard);

        sort_attribute_keys(&mut keys);
        keys
    }

    pub fn get_attribute_type(&self, key: &str) -> Option<ValueType> {
        let guard = self.inner.state.lock();
        let state = guard.borrow();
        state.attributes.get(key).map(Attribute::value_type)
    }

    pub fn get_attribute_ranges(&self, key: &str, value_type: ValueType) -> AttributeResult<AttributeRanges> {
        self.read_attribute(key, value_type, Attribute::ranges)
    }

    pub fn get_attribute_flags(&self, key: &str, value_type: ValueType) -> AttributeResult<AttributeFlags> {
        self.read_attribute(key, value_type, Attribute::flags)
    }

    pub fn get_attribute_description(&self, key: &str, value_type: ValueType) -> AttributeResult<String> {
        self.read_attribute(key, value_type, |attribute| attribute.description().to_string())
    }

    /// Copies of every attribute, in key order.
    pub fn attributes(&self) -> Vec<(String, Attribute)> {
        let guard = self.inner.state.lock();
        let mut attributes: Vec<(String, Attribute)> = guard
            .borrow()
            .attributes
            .iter()
            .map(|(key, attribute)| (key.clone(), attribute.clone()))
            .collect();
        drop(guard);

        attributes.sort_by(|a, b| attribute_key_order(&a.0, &b.0));
        attributes
    }

    // ===== String conversion =====

    /// Put or create an attribute from its textual type and value.
    ///
    /// An existing attribute of the same type receives a regular put. A
    /// missing one is created with the widest range of its type, flags
    /// `NORMAL | NO_EXPORT` and [`IMPORTED_DESCRIPTION`].
    pub fn string_to_attribute(&self, key: &str, type_name: &str, text: &str) -> Result<(), ConvertError> {
        let value_type: ValueType = type_name.parse()?;
        let value = Value::parse(value_type, text)?;

        let _lock = self.lock();

        match self.get_attribute_type(key) {
            Some(actual) if actual == value_type => self.put_attribute(key, value)?,
            Some(actual) => {
                return Err(AttributeError::TypeMismatch {
                    key: key.to_string(),
                    requested: value_type,
                    actual,
                }
                .into())
            }
            None => {
                let ranges = AttributeRanges::widest(value_type);
                if !in_range(&value, &ranges) {
                    return Err(AttributeError::OutOfRange {
                        key: key.to_string(),
                        value: text.to_string(),
                    }
                    .into());
                }
                self.create_attribute(
                    key,
                    value,
                    ranges,
                    AttributeFlags::NORMAL | AttributeFlags::NO_EXPORT,
                    IMPORTED_DESCRIPTION,
                )?;
            }
        }

        Ok(())
    }
}

fn attribute_key_order(a: &str, b: &str) -> std::cmp::Ordering {
    let a_options = a.ends_with("ListOptions");
    let b_options = b.ends_with("ListOptions");
    b_options.cmp(&a_options).then_with(|| a.cmp(b))
}

fn sort_attribute_keys(keys: &mut [String]) {
    keys.sort_by(|a, b| attribute_key_order(a, b));
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("path", &self.path()).finish()
    }
}
