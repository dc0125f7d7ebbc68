// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Tree structure under concurrent access

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use parking_lot::Mutex;
use sshs_store::{AttributeFlags, Node, NodeEvent, NodeListener, Sshs};

const THREADS: usize = 16;

#[derive(Default)]
struct NodeRecorder {
    events: Mutex<Vec<(String, NodeEvent, String)>>,
}

impl NodeListener for NodeRecorder {
    fn on_node_event(&self, node: &Node, event: NodeEvent, child_name: &str) {
        self.events
            .lock()
            .push((node.path().to_string(), event, child_name.to_string()));
    }
}

#[test]
fn test_concurrent_add_child_creates_one_node() {
    let store = Sshs::new();
    let parent = store.get_node("/devices/").unwrap();
    let added = Arc::new(AtomicUsize::new(0));
    let counter = added.clone();
    parent.add_node_listener(Arc::new(move |_: &Node, event: NodeEvent, _: &str| {
        if event == NodeEvent::ChildNodeAdded {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }));

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let parent = parent.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                parent.add_child("camera")
            })
        })
        .collect();

    let children: Vec<Node> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(added.load(Ordering::SeqCst), 1);
    assert_eq!(parent.get_child_names(), ["camera"]);
    let expected = parent.get_child("camera").unwrap();
    assert!(children.iter().all(|child| *child == expected));
}

#[test]
fn test_parallel_puts_on_different_nodes() {
    let store = Sshs::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let store = store.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                let node = store.get_node(&format!("/workers/w{i}/")).unwrap();
                node.create_int("ticks", 0, 0, 1000, AttributeFlags::NORMAL, "").unwrap();
                barrier.wait();
                for tick in 1..=100 {
                    node.put_int("ticks", tick).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let workers = store.get_node("/workers/").unwrap();
    assert_eq!(workers.get_children().len(), THREADS);
    for worker in workers.get_children() {
        assert_eq!(worker.get_int("ticks").unwrap(), 100);
    }
}

#[test]
fn test_node_lock_makes_increment_atomic() {
    let store = Sshs::new();
    let node = store.get_node("/stats/").unwrap();
    node.create_long("events", 0, 0, i64::MAX, AttributeFlags::NORMAL, "").unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let node = node.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..50 {
                    let _lock = node.lock();
                    let current = node.get_long("events").unwrap();
                    node.put_long("events", current + 1).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(node.get_long("events").unwrap(), (THREADS * 50) as i64);
}

#[test]
fn test_transaction_moves_value_between_nodes() {
    let store = Sshs::new();
    let left = store.get_node("/bank/left/").unwrap();
    let right = store.get_node("/bank/right/").unwrap();
    left.create_int("amount", 1000, 0, 100_000, AttributeFlags::NORMAL, "").unwrap();
    right.create_int("amount", 1000, 0, 100_000, AttributeFlags::NORMAL, "").unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let store = store.clone();
            let barrier = barrier.clone();
            // Opposite path orders must not deadlock.
            let paths = if i % 2 == 0 {
                ["/bank/left/", "/bank/right/"]
            } else {
                ["/bank/right/", "/bank/left/"]
            };
            thread::spawn(move || {
                let transaction = store.begin_transaction(&paths).unwrap();
                barrier.wait();
                for _ in 0..20 {
                    let _guard = transaction.lock();
                    let [from, to] = transaction.nodes() else {
                        panic!("expected two nodes");
                    };
                    let a = from.get_int("amount").unwrap();
                    let b = to.get_int("amount").unwrap();
                    from.put_int("amount", a - 1).unwrap();
                    to.put_int("amount", b + 1).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let total = left.get_int("amount").unwrap() + right.get_int("amount").unwrap();
    assert_eq!(total, 2000);
}

#[test]
fn test_transaction_rejects_bad_path_before_creating_nodes() {
    let store = Sshs::new();
    assert!(store.begin_transaction(&["/good/", "bad/"]).is_err());
    assert!(!store.exists_node("/good/").unwrap());

    let transaction = store.begin_transaction(&["/b/", "/a/", "/b/"]).unwrap();
    let paths: Vec<&str> = transaction.nodes().iter().map(Node::path).collect();
    assert_eq!(paths, ["/a/", "/b/"]);
}

#[test]
fn test_remove_node_notifies_and_unlinks() {
    let store = Sshs::new();
    let sensor = store.get_node("/sensor/").unwrap();
    let aps = store.get_node("/sensor/aps/").unwrap();
    store.get_node("/sensor/aps/roi/").unwrap();
    aps.create_int("Exposure", 4000, 0, 1_048_575, AttributeFlags::NORMAL, "").unwrap();

    let recorder = Arc::new(NodeRecorder::default());
    sensor.add_node_listener(recorder.clone());
    aps.add_node_listener(recorder.clone());

    aps.remove_node();

    assert!(!store.exists_node("/sensor/aps/").unwrap());
    assert!(sensor.get_children().is_empty());
    // The detached handle is emptied.
    assert!(aps.get_attribute_keys().is_empty());
    assert!(!aps.has_children());

    assert_eq!(
        *recorder.events.lock(),
        [
            ("/sensor/aps/".to_string(), NodeEvent::ChildNodeRemoved, "roi".to_string()),
            ("/sensor/".to_string(), NodeEvent::ChildNodeRemoved, "aps".to_string()),
        ]
    );
}

#[test]
fn test_root_remove_keeps_root() {
    let store = Sshs::new();
    store.get_node("/a/b/").unwrap();
    store.root().create_bool("flag", true, AttributeFlags::NORMAL, "").unwrap();

    store.root().remove_node();

    assert!(store.root().get_children().is_empty());
    assert!(store.root().get_attribute_keys().is_empty());
    assert_eq!(store.root().path(), "/");
    store.get_node("/a/").unwrap();
}

#[test]
fn test_clear_sub_tree_keeps_structure() {
    let store = Sshs::new();
    let top = store.get_node("/top/").unwrap();
    let leaf = store.get_node("/top/leaf/").unwrap();
    top.create_int("x", 1, 0, 10, AttributeFlags::NORMAL, "").unwrap();
    leaf.create_int("y", 2, 0, 10, AttributeFlags::NORMAL, "").unwrap();

    top.clear_sub_tree(false);
    assert_eq!(top.get_attribute_keys(), ["x"]);
    assert!(leaf.get_attribute_keys().is_empty());
    assert!(store.exists_node("/top/leaf/").unwrap());

    top.clear_sub_tree(true);
    assert!(top.get_attribute_keys().is_empty());
}

#[test]
fn test_relative_navigation() {
    let store = Sshs::new();
    let caer = store.get_node("/caer/").unwrap();

    let bias = caer.get_relative_node("dvs/bias/").unwrap();
    assert_eq!(bias.path(), "/caer/dvs/bias/");
    assert_eq!(bias.parent().unwrap().name(), "dvs");
    assert!(caer.exists_relative_node("dvs/").unwrap());
    assert!(!caer.exists_relative_node("aps/").unwrap());

    assert!(caer.get_relative_node("/abs/").is_err());
    assert!(store.get_node("/bad name/").is_err());
    assert!(store.get_node("").is_err());
}
