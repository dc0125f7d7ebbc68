// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bulk removal notifications and listener deregistration

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use sshs_store::{
    AttributeEvent, AttributeFlags, AttributeListener, Node, NodeEvent, NodeListener, Sshs, Value,
    ValueType,
};

/// Records `(node path, event, key)` for every attribute event.
#[derive(Default)]
struct PathRecorder {
    events: Mutex<Vec<(String, AttributeEvent, String)>>,
}

impl PathRecorder {
    fn take(&self) -> Vec<(String, AttributeEvent, String)> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl AttributeListener for PathRecorder {
    fn on_attribute_event(&self, node: &Node, event: AttributeEvent, key: &str, _value: &Value) {
        self.events
            .lock()
            .push((node.path().to_string(), event, key.to_string()));
    }
}

fn removed(path: &str, key: &str) -> (String, AttributeEvent, String) {
    (path.to_string(), AttributeEvent::Removed, key.to_string())
}

fn store() -> Sshs {
    Sshs::with_error_log(Arc::new(|_: &str| {}))
}

/// `/a/` holding `x`, `y` and child `/a/b/` holding `z`, one recorder on both nodes.
fn watched_tree(store: &Sshs) -> (Node, Node, Arc<PathRecorder>) {
    let a = store.get_node("/a/").unwrap();
    let b = store.get_node("/a/b/").unwrap();
    a.create_int("y", 2, 0, 10, AttributeFlags::NORMAL, "").unwrap();
    a.create_int("x", 1, 0, 10, AttributeFlags::NORMAL, "").unwrap();
    b.create_int("z", 3, 0, 10, AttributeFlags::NORMAL, "").unwrap();

    let recorder = Arc::new(PathRecorder::default());
    a.add_attribute_listener(recorder.clone());
    b.add_attribute_listener(recorder.clone());
    (a, b, recorder)
}

fn counting_node_listener(counter: &Arc<AtomicUsize>) -> Arc<dyn NodeListener> {
    let counter = counter.clone();
    Arc::new(move |_: &Node, _: NodeEvent, _: &str| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_remove_node_fires_removed_per_attribute() {
    let store = store();
    let (a, _b, recorder) = watched_tree(&store);

    a.remove_node();

    assert_eq!(
        recorder.take(),
        [removed("/a/", "x"), removed("/a/", "y"), removed("/a/b/", "z")]
    );
    assert!(!store.exists_node("/a/").unwrap());
}

#[test]
fn test_clear_sub_tree_without_start_node() {
    let store = store();
    let (a, b, recorder) = watched_tree(&store);

    a.clear_sub_tree(false);
    assert_eq!(recorder.take(), [removed("/a/b/", "z")]);
    assert_eq!(a.get_attribute_keys(), ["x", "y"]);
    assert!(b.get_attribute_keys().is_empty());

    // The child lost its listener, the start node kept its own.
    b.create_int("z", 3, 0, 10, AttributeFlags::NORMAL, "").unwrap();
    a.put_int("x", 5).unwrap();
    assert_eq!(
        recorder.take(),
        [("/a/".to_string(), AttributeEvent::Modified, "x".to_string())]
    );
}

#[test]
fn test_clear_sub_tree_with_start_node_drops_listeners() {
    let store = store();
    let (a, b, recorder) = watched_tree(&store);

    a.clear_sub_tree(true);
    assert_eq!(
        recorder.take(),
        [removed("/a/", "x"), removed("/a/", "y"), removed("/a/b/", "z")]
    );
    assert_eq!(store.get_node("/a/b/").unwrap(), b);

    a.create_int("x", 1, 0, 10, AttributeFlags::NORMAL, "").unwrap();
    b.create_int("z", 3, 0, 10, AttributeFlags::NORMAL, "").unwrap();
    assert!(recorder.take().is_empty());
}

#[test]
fn test_remove_all_attributes_is_sorted_and_keeps_listeners() {
    let store = store();
    let node = store.get_node("/dev/").unwrap();
    for key in ["gamma", "alpha", "beta"] {
        node.create_bool(key, false, AttributeFlags::NORMAL, "").unwrap();
    }
    let recorder = Arc::new(PathRecorder::default());
    node.add_attribute_listener(recorder.clone());

    node.remove_all_attributes();
    assert_eq!(
        recorder.take(),
        [removed("/dev/", "alpha"), removed("/dev/", "beta"), removed("/dev/", "gamma")]
    );
    assert!(node.get_attribute_keys().is_empty());

    node.remove_all_attributes();
    assert!(recorder.take().is_empty());

    node.create_bool("alpha", false, AttributeFlags::NORMAL, "").unwrap();
    assert_eq!(
        recorder.take(),
        [("/dev/".to_string(), AttributeEvent::Added, "alpha".to_string())]
    );
}

#[test]
fn test_removed_attribute_listener_is_silent() {
    let store = store();
    let node = store.get_node("/dev/").unwrap();
    node.create_int("n", 0, 0, 10, AttributeFlags::NORMAL, "").unwrap();

    let recorder = Arc::new(PathRecorder::default());
    let listener: Arc<dyn AttributeListener> = recorder.clone();
    node.add_attribute_listener(listener.clone());
    node.remove_attribute_listener(&listener);
    node.remove_attribute_listener(&listener);

    node.put_int("n", 4).unwrap();
    node.remove_attribute("n", ValueType::Int);
    assert!(recorder.take().is_empty());
}

#[test]
fn test_removed_node_listener_is_silent() {
    let store = store();
    let node = store.get_node("/dev/").unwrap();
    let fired = Arc::new(AtomicUsize::new(0));
    let listener = counting_node_listener(&fired);

    node.add_node_listener(listener.clone());
    node.remove_node_listener(&listener);
    node.remove_node_listener(&listener);

    node.add_child("imu");
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn test_remove_all_listeners() {
    let store = store();
    let node = store.get_node("/dev/").unwrap();
    node.create_int("n", 0, 0, 10, AttributeFlags::NORMAL, "").unwrap();

    let recorders: Vec<Arc<PathRecorder>> = (0..2).map(|_| Arc::new(PathRecorder::default())).collect();
    for recorder in &recorders {
        node.add_attribute_listener(recorder.clone());
    }
    let fired = Arc::new(AtomicUsize::new(0));
    node.add_node_listener(counting_node_listener(&fired));
    node.add_node_listener(counting_node_listener(&fired));

    node.remove_all_attribute_listeners();
    node.remove_all_node_listeners();
    node.remove_all_node_listeners();

    node.put_int("n", 7).unwrap();
    node.add_child("imu");
    assert!(recorders.iter().all(|r| r.take().is_empty()));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn test_duplicate_registration_delivers_once() {
    let store = store();
    let node = store.get_node("/dev/").unwrap();
    let recorder = Arc::new(PathRecorder::default());
    node.add_attribute_listener(recorder.clone());
    node.add_attribute_listener(recorder.clone());

    node.create_int("n", 0, 0, 10, AttributeFlags::NORMAL, "").unwrap();
    assert_eq!(recorder.take().len(), 1);

    // One removal undoes both registrations.
    let listener: Arc<dyn AttributeListener> = recorder.clone();
    node.remove_attribute_listener(&listener);
    node.put_int("n", 1).unwrap();
    assert!(recorder.take().is_empty());
}
