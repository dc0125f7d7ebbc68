// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! XML import/export
//!
//! Document layout:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <sshs version="1.0">
//!     <node name="" path="/">
//!         <attr key="logLevel" type="byte">5</attr>
//!         <node name="caer" path="/caer/">
//!             ...
//!         </node>
//!     </node>
//! </sshs>
//! ```
//!
//! Export walks the children through snapshots, so it is safe against
//! concurrent structural changes, but values are read node by node and the
//! result is not a consistent snapshot of the whole tree.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::{debug, warn};

use crate::attribute::AttributeFlags;
use crate::error::{AttributeError, ConvertError, XmlError};
use crate::node::Node;
use crate::tree::is_valid_node_name;

/// Only documents carrying exactly this version are imported.
pub const XML_VERSION: &str = "1.0";

const ROOT_ELEMENT: &str = "sshs";
const NODE_ELEMENT: &str = "node";
const ATTR_ELEMENT: &str = "attr";

/// Minimal element tree, enough for the store's document layout.
#[derive(Debug, Default, Clone, PartialEq)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut element = XmlElement::new(&String::from_utf8_lossy(start.name().as_ref()));
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }
}

fn parse_document(input: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(XmlElement::from_start(&start)?),
            Event::Empty(start) => {
                let element = XmlElement::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::Malformed(format!("{} unclosed element(s)", stack.len())));
    }

    root.ok_or_else(|| XmlError::Malformed("no root element".to_string()))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(XmlError::Malformed("more than one root element".to_string()))
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;

    Ok(())
}

/// Keys and child node names left out of an export, on top of `NO_EXPORT`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportFilter {
    pub skip_keys: Vec<String>,
    pub skip_nodes: Vec<String>,
}

impl ExportFilter {
    pub fn new<K, N>(skip_keys: K, skip_nodes: N) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            skip_keys: skip_keys.into_iter().map(Into::into).collect(),
            skip_nodes: skip_nodes.into_iter().map(Into::into).collect(),
        }
    }

    fn skips_key(&self, key: &str) -> bool {
        self.skip_keys.iter().any(|k| k == key)
    }

    fn skips_node(&self, name: &str) -> bool {
        self.skip_nodes.iter().any(|n| n == name)
    }
}

/// Element for `node`. Children without any exportable content are left out.
fn generate_node_element(node: &Node, recursive: bool, filter: &ExportFilter) -> XmlElement {
    let mut element = XmlElement::new(NODE_ELEMENT)
        .with_attribute("name", node.name())
        .with_attribute("path", node.path());

    for (key, attribute) in node.attributes() {
        if attribute.flags().contains(AttributeFlags::NO_EXPORT) || filter.skips_key(&key) {
            continue;
        }

        let mut attr = XmlElement::new(ATTR_ELEMENT)
            .with_attribute("key", &key)
            .with_attribute("type", attribute.value_type().as_str());
        attr.text = attribute.value().to_string();
        element.children.push(attr);
    }

    if recursive {
        for child in node.get_children() {
            if filter.skips_node(child.name()) {
                continue;
            }
            let child_element = generate_node_element(&child, true, filter);
            if !child_element.children.is_empty() {
                element.children.push(child_element);
            }
        }
    }

    element
}

fn export<W: Write>(
    node: &Node,
    out: W,
    recursive: bool,
    filter: &ExportFilter,
) -> Result<(), XmlError> {
    let mut document = XmlElement::new(ROOT_ELEMENT).with_attribute("version", XML_VERSION);
    document.children.push(generate_node_element(node, recursive, filter));

    let mut writer = Writer::new_with_indent(out, b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, &document)?;
    writer.get_mut().write_all(b"\n")?;
    writer.get_mut().flush()?;

    debug!(
        target: "sshs-store",
        "Exported {} ({})",
        node.path(),
        if recursive { "subtree" } else { "node" }
    );
    Ok(())
}

fn import(node: &Node, input: &str, recursive: bool, strict: bool) -> Result<(), XmlError> {
    let document = parse_document(input)?;

    if document.name != ROOT_ELEMENT {
        return Err(XmlError::NotSshs);
    }

    match document.attribute("version") {
        Some(XML_VERSION) => {}
        found => {
            return Err(XmlError::VersionMismatch {
                found: found.map(str::to_string),
            })
        }
    }

    let roots: Vec<&XmlElement> = document.children_named(NODE_ELEMENT).collect();
    let [top] = roots.as_slice() else {
        return Err(XmlError::RootNodeCount(roots.len()));
    };

    if strict {
        let found = top.attribute("name").unwrap_or_default();
        if found != node.name() {
            return Err(XmlError::NameMismatch {
                expected: node.name().to_string(),
                found: found.to_string(),
            });
        }
    }

    consume_node_element(node, top, recursive);

    debug!(
        target: "sshs-store",
        "Imported {} ({})",
        node.path(),
        if recursive { "subtree" } else { "node" }
    );
    Ok(())
}

fn consume_node_element(node: &Node, element: &XmlElement, recursive: bool) {
    for attr in element.children_named(ATTR_ELEMENT) {
        let (Some(key), Some(type_name)) = (attr.attribute("key"), attr.attribute("type")) else {
            warn!(target: "sshs-store", "Skipping attr element without key/type under {}", node.path());
            continue;
        };

        match node.string_to_attribute(key, type_name, &attr.text) {
            Ok(()) => {}
            // Expected when the file was written under other constraints.
            Err(ConvertError::Attribute(
                AttributeError::ReadOnly { .. } | AttributeError::OutOfRange { .. },
            )) => {}
            Err(e) => {
                warn!(target: "sshs-store", "Skipping attribute {}{}: {}", node.path(), key, e);
            }
        }
    }

    if !recursive {
        return;
    }

    for child in element.children_named(NODE_ELEMENT) {
        let name = child.attribute("name").unwrap_or_default();
        if !is_valid_node_name(name) {
            warn!(target: "sshs-store", "Skipping node element with invalid name '{}' under {}", name, node.path());
            continue;
        }
        consume_node_element(&node.add_child(name), child, true);
    }
}

fn read_input<R: Read>(mut input: R) -> Result<String, XmlError> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    Ok(text)
}

impl Node {
    /// Write this node's exportable attributes as an XML document.
    pub fn export_node<W: Write>(&self, out: W) -> Result<(), XmlError> {
        export(self, out, false, &ExportFilter::default())
    }

    /// Write this node and all descendants as an XML document.
    pub fn export_sub_tree<W: Write>(&self, out: W) -> Result<(), XmlError> {
        export(self, out, true, &ExportFilter::default())
    }

    /// Subtree export that also drops the keys and child nodes named in `filter`.
    pub fn export_sub_tree_filtered<W: Write>(&self, out: W, filter: &ExportFilter) -> Result<(), XmlError> {
        export(self, out, true, filter)
    }

    pub fn export_node_to_file(&self, path: &Path) -> Result<(), XmlError> {
        self.export_node(BufWriter::new(File::create(path)?))
    }

    /// Creates or truncates `path`.
    pub fn export_sub_tree_to_file(&self, path: &Path) -> Result<(), XmlError> {
        self.export_sub_tree(BufWriter::new(File::create(path)?))
    }

    pub fn export_sub_tree_to_file_filtered(&self, path: &Path, filter: &ExportFilter) -> Result<(), XmlError> {
        self.export_sub_tree_filtered(BufWriter::new(File::create(path)?), filter)
    }

    /// Subtree export into a string.
    pub fn to_xml_string(&self, recursive: bool) -> Result<String, XmlError> {
        let mut buffer = Vec::new();
        export(self, &mut buffer, recursive, &ExportFilter::default())?;
        String::from_utf8(buffer).map_err(|e| XmlError::Malformed(e.to_string()))
    }

    /// Load attributes of the document's top node into this node.
    ///
    /// Existing attributes receive a regular put (read-only and out-of-range
    /// values are skipped silently); unknown ones are created permissive and
    /// `NO_EXPORT`. With `strict`, the top node's name must match this one.
    pub fn import_node<R: Read>(&self, input: R, strict: bool) -> Result<(), XmlError> {
        import(self, &read_input(input)?, false, strict)
    }

    /// Like [`Node::import_node`], descending into child node elements and
    /// creating missing children.
    pub fn import_sub_tree<R: Read>(&self, input: R, strict: bool) -> Result<(), XmlError> {
        import(self, &read_input(input)?, true, strict)
    }

    pub fn import_node_from_file(&self, path: &Path, strict: bool) -> Result<(), XmlError> {
        self.import_node(File::open(path)?, strict)
    }

    pub fn import_sub_tree_from_file(&self, path: &Path, strict: bool) -> Result<(), XmlError> {
        self.import_sub_tree(File::open(path)?, strict)
    }
}
