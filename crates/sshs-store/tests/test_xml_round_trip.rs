// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Export/import through files

use std::fs;

use sshs_store::{
    AttributeFlags, Sshs, Value, ValueType, XmlError, IMPORTED_DESCRIPTION,
};
use tempfile::tempdir;

/// Same declarations a module would run at every start.
fn declare(store: &Sshs) {
    let caer = store.get_node("/caer/").unwrap();
    caer.create_string("name", "dvs128", 1, 64, AttributeFlags::NORMAL, "Device name.")
        .unwrap();
    caer.create_bool("running", true, AttributeFlags::NO_EXPORT, "Status.")
        .unwrap();

    let bias = store.get_node("/caer/dvs/bias/").unwrap();
    bias.create_byte("coarse", 3, 0, 7, AttributeFlags::NORMAL, "").unwrap();
    bias.create_short("fine", 100, 0, 255, AttributeFlags::NORMAL, "").unwrap();
    bias.create_int("refractory", 1000, 0, 1_000_000, AttributeFlags::NORMAL, "").unwrap();
    bias.create_long("timestamp", 0, 0, i64::MAX, AttributeFlags::NORMAL, "").unwrap();
    bias.create_float("gain", 0.5, 0.0, 1.0, AttributeFlags::NORMAL, "").unwrap();
    bias.create_double("offset", -0.25, -1.0, 1.0, AttributeFlags::NORMAL, "").unwrap();
    bias.create_long("packets", 0, 0, i64::MAX, AttributeFlags::READ_ONLY | AttributeFlags::NO_EXPORT, "")
        .unwrap();
}

#[test]
fn test_sub_tree_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("caer.xml");

    let source = Sshs::new();
    declare(&source);
    let caer = source.get_node("/caer/").unwrap();
    let bias = source.get_node("/caer/dvs/bias/").unwrap();
    caer.put_string("name", "davis240 <test> & co").unwrap();
    caer.put_bool("running", false).unwrap();
    bias.put_byte("coarse", 6).unwrap();
    bias.put_short("fine", 42).unwrap();
    bias.put_int("refractory", 123_456).unwrap();
    bias.put_long("timestamp", 9_007_199_254_740_993).unwrap();
    bias.put_float("gain", 0.1).unwrap();
    bias.put_double("offset", 1.0 / 3.0).unwrap();
    bias.update_read_only("packets", 77_i64).unwrap();

    source.root().export_sub_tree_to_file(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("version=\"1.0\""));
    assert!(!written.contains("running"));
    assert!(!written.contains("packets"));

    let target = Sshs::new();
    declare(&target);
    target.root().import_sub_tree_from_file(&path, true).unwrap();

    let caer = target.get_node("/caer/").unwrap();
    let bias = target.get_node("/caer/dvs/bias/").unwrap();
    assert_eq!(caer.get_string("name").unwrap(), "davis240 <test> & co");
    assert!(caer.get_bool("running").unwrap());
    assert_eq!(bias.get_byte("coarse").unwrap(), 6);
    assert_eq!(bias.get_short("fine").unwrap(), 42);
    assert_eq!(bias.get_int("refractory").unwrap(), 123_456);
    assert_eq!(bias.get_long("timestamp").unwrap(), 9_007_199_254_740_993);
    assert_eq!(bias.get_float("gain").unwrap(), 0.1);
    assert_eq!(bias.get_double("offset").unwrap(), 1.0 / 3.0);
    assert_eq!(bias.get_long("packets").unwrap(), 0);
}

#[test]
fn test_import_without_declarations_creates_permissive_attributes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("caer.xml");

    let source = Sshs::new();
    declare(&source);
    source.root().export_sub_tree_to_file(&path).unwrap();

    let target = Sshs::new();
    target.root().import_sub_tree_from_file(&path, true).unwrap();

    let bias = target.get_node("/caer/dvs/bias/").unwrap();
    assert_eq!(bias.get_byte("coarse").unwrap(), 3);
    let flags = bias.get_attribute_flags("coarse", ValueType::Byte).unwrap();
    assert!(flags.contains(AttributeFlags::NO_EXPORT));
    assert_eq!(
        bias.get_attribute_description("coarse", ValueType::Byte).unwrap(),
        IMPORTED_DESCRIPTION
    );

    // Widest range: anything a byte can hold is accepted now.
    bias.put_byte("coarse", i8::MIN).unwrap();

    // Nothing imported this way is exported again.
    let again = target.root().to_xml_string(true).unwrap();
    assert!(!again.contains("coarse"));
}

#[test]
fn test_import_skips_out_of_range_and_read_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("node.xml");
    fs::write(
        &path,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sshs version="1.0">
    <node name="bias" path="/caer/dvs/bias/">
        <attr key="coarse" type="byte">42</attr>
        <attr key="fine" type="short">7</attr>
        <attr key="packets" type="long">5</attr>
        <attr key="gain" type="int">1</attr>
    </node>
</sshs>
"#,
    )
    .unwrap();

    let store = Sshs::new();
    declare(&store);
    let bias = store.get_node("/caer/dvs/bias/").unwrap();
    bias.import_node_from_file(&path, true).unwrap();

    assert_eq!(bias.get_byte("coarse").unwrap(), 3);
    assert_eq!(bias.get_short("fine").unwrap(), 7);
    assert_eq!(bias.get_long("packets").unwrap(), 0);
    assert_eq!(bias.get_attribute("gain", ValueType::Float).unwrap(), Value::Float(0.5));
}

#[test]
fn test_strict_import_checks_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bias.xml");

    let store = Sshs::new();
    declare(&store);
    store.get_node("/caer/dvs/bias/").unwrap().export_node_to_file(&path).unwrap();

    let other = store.get_node("/other/").unwrap();
    assert!(matches!(
        other.import_node_from_file(&path, true),
        Err(XmlError::NameMismatch { .. })
    ));
    other.import_node_from_file(&path, false).unwrap();
    assert_eq!(other.get_short("fine").unwrap(), 100);
}

#[test]
fn test_missing_file_is_recoverable() {
    let dir = tempdir().unwrap();
    let store = Sshs::new();
    assert!(matches!(
        store.root().import_sub_tree_from_file(&dir.path().join("absent.xml"), false),
        Err(XmlError::Io(_))
    ));
}
