// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! A small mutable XML tree on top of `quick-xml`.
//!
//! Text is kept exactly as read (escaped), together with comments and the
//! prolog, so that regions a transform does not touch are written back
//! unchanged. Attributes keep the text they were read with until they are
//! set, and empty elements keep the form they were written in.

use crate::errors::Error;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::mem;

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Character data, escaped as it appears in the document.
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    Declaration(String),
    DocType(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    fn is_whitespace(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

/// One step of a path created on demand by [`Element::insert_at_path`]:
/// the element name and the order its siblings follow in the schema.
#[derive(Debug, Clone, Copy)]
pub struct PathStep<'a> {
    pub name: &'a str,
    pub order: &'a [&'a str],
}

#[derive(Debug, Clone, PartialEq)]
struct Attribute {
    key: String,
    value: String,
    /// Escaped text as read from the document. Cleared when the value is set.
    raw: Option<String>,
}

impl Attribute {
    fn escaped(&self) -> String {
        match &self.raw {
            // the writer always uses double quotes
            Some(raw) => raw.replace('"', "&quot;"),
            None => escape(self.value.as_str())
                .replace('\n', "&#10;")
                .replace('\r', "&#13;")
                .replace('\t', "&#9;"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
    /// Written as `<a></a>` rather than `<a/>` when it has no children.
    end_tag: bool,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            end_tag: false,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Sets the attribute only when a value is given.
    pub fn with_optional_attribute(self, key: impl Into<String>, value: Option<String>) -> Self {
        match value {
            Some(value) => self.with_attribute(key, value),
            None => self,
        }
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|a| (a.key.as_str(), a.value.as_str()))
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.key == key) {
            Some(existing) => {
                existing.value = value;
                existing.raw = None;
            }
            None => self.attributes.push(Attribute {
                key,
                value,
                raw: None,
            }),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().find(|e| e.local_name() == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.find_child_mut(|e| e.local_name() == name)
    }

    pub fn find_child_mut(
        &mut self,
        mut pred: impl FnMut(&Element) -> bool,
    ) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|e| pred(&**e))
    }

    pub fn descendant(&self, path: &[&str]) -> Option<&Element> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.child(first)?.descendant(rest),
        }
    }

    pub fn descendant_mut(&mut self, path: &[&str]) -> Option<&mut Element> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.child_mut(first)?.descendant_mut(rest),
        }
    }

    /// Node index of the first child element matching `pred`.
    pub fn position(&self, mut pred: impl FnMut(&Element) -> bool) -> Option<usize> {
        self.children
            .iter()
            .position(|node| node.as_element().is_some_and(&mut pred))
    }

    /// Replaces the node at `index` with `element`. `depth` is the nesting
    /// depth of `self`, used to indent the new element's content.
    pub fn replace_node(&mut self, index: usize, mut element: Element, depth: usize) -> bool {
        element.reindent(depth + 1);
        match self.children.get_mut(index) {
            Some(node) => {
                *node = Node::Element(element);
                true
            }
            None => false,
        }
    }

    /// Inserts `child` on its own line, before the first sibling that comes
    /// later in `order`, or at the end. `depth` is the nesting depth of
    /// `self`.
    pub fn insert_ordered(&mut self, mut child: Element, order: &[&str], depth: usize) {
        child.reindent(depth + 1);
        let rank = |name: &str| order.iter().position(|o| *o == name);
        let before = rank(child.local_name()).and_then(|own| {
            self.children.iter().position(|node| {
                node.as_element()
                    .and_then(|e| rank(e.local_name()))
                    .is_some_and(|other| other > own)
            })
        });
        self.insert_formatted(before, child, depth);
    }

    /// Inserts `leaf` at the end of the element chain named by `path`,
    /// creating the missing part of the chain.
    pub fn insert_at_path(&mut self, path: &[PathStep<'_>], leaf: Element, depth: usize) {
        let Some((step, rest)) = path.split_first() else {
            self.insert_ordered(leaf, &[], depth);
            return;
        };
        if let Some(child) = self.child_mut(step.name) {
            child.insert_at_path(rest, leaf, depth + 1);
            return;
        }
        let inner = rest
            .iter()
            .rev()
            .fold(leaf, |inner, s| Element::new(s.name).with_child(inner));
        self.insert_ordered(Element::new(step.name).with_child(inner), step.order, depth);
    }

    fn insert_formatted(&mut self, before: Option<usize>, child: Element, depth: usize) {
        let indent = line_indent(depth + 1);
        if self.children.iter().all(Node::is_whitespace) {
            self.children = vec![
                Node::Text(indent),
                Node::Element(child),
                Node::Text(line_indent(depth)),
            ];
            return;
        }

        match before {
            Some(at) => {
                self.children.insert(at, Node::Text(indent));
                self.children.insert(at, Node::Element(child));
            }
            None => {
                let len = self.children.len();
                let at = if self.children.last().is_some_and(Node::is_whitespace) {
                    len - 1
                } else {
                    len
                };
                self.children.insert(at, Node::Element(child));
                self.children.insert(at, Node::Text(indent));
            }
        }
    }

    /// Rewrites the whitespace of element-only content so that every child
    /// sits on its own line. Mixed content is left alone.
    pub fn reindent(&mut self, depth: usize) {
        let has_elements = self.children.iter().any(|n| matches!(n, Node::Element(_)));
        let has_content = self.children.iter().any(|n| match n {
            Node::Text(text) => !text.trim().is_empty(),
            Node::CData(_) => true,
            _ => false,
        });
        if !has_elements || has_content {
            return;
        }

        let nodes = mem::take(&mut self.children);
        for node in nodes.into_iter().filter(|n| !n.is_whitespace()) {
            self.children.push(Node::Text(line_indent(depth + 1)));
            self.children.push(match node {
                Node::Element(mut element) => {
                    element.reindent(depth + 1);
                    Node::Element(element)
                }
                other => other,
            });
        }
        self.children.push(Node::Text(line_indent(depth)));
    }
}

fn line_indent(depth: usize) -> String {
    format!("\n{}", INDENT.repeat(depth))
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

#[derive(Default)]
struct TreeBuilder {
    prolog: Vec<Node>,
    stack: Vec<Element>,
    root: Option<Element>,
    epilog: Vec<Node>,
}

impl TreeBuilder {
    fn push(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
            return;
        }
        match node {
            Node::Element(element) if self.root.is_none() => self.root = Some(element),
            other if self.root.is_none() => self.prolog.push(other),
            other => self.epilog.push(other),
        }
    }

    /// Entity references arrive as their own events; glue them back onto the
    /// surrounding text.
    fn push_text(&mut self, raw: &str) {
        let nodes = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None if self.root.is_none() => &mut self.prolog,
            None => &mut self.epilog,
        };
        match nodes.last_mut() {
            Some(Node::Text(text)) => text.push_str(raw),
            _ => nodes.push(Node::Text(raw.to_string())),
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(bytes).map_err(|e| Error::XmlParse(e.to_string()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, Error> {
    let mut element = Element::new(utf8(start.name().as_ref())?);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| Error::XmlParse(e.to_string()))?;
        let key = utf8(attribute.key.as_ref())?;
        let raw = utf8(&attribute.value)?;
        let value =
            unescape(raw).map_err(|e| Error::XmlParse(format!("attribute {key}: {e}")))?;
        element.attributes.push(Attribute {
            key: key.to_string(),
            value: value.into_owned(),
            raw: Some(raw.to_string()),
        });
    }
    Ok(element)
}

impl Document {
    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut reader = Reader::from_str(input);
        let mut builder = TreeBuilder::default();

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::XmlParse(format!("at position {}: {e}", reader.buffer_position()))
            })?;
            match event {
                Event::Start(start) => {
                    let mut element = element_from_start(&start)?;
                    element.end_tag = true;
                    builder.stack.push(element);
                }
                Event::Empty(start) => builder.push(Node::Element(element_from_start(&start)?)),
                Event::End(_) => {
                    let element = builder
                        .stack
                        .pop()
                        .ok_or_else(|| Error::XmlParse("unexpected closing tag".to_string()))?;
                    builder.push(Node::Element(element));
                }
                Event::Text(text) => builder.push_text(utf8(&text)?),
                Event::GeneralRef(reference) => {
                    builder.push_text(&format!("&{};", utf8(&reference)?));
                }
                Event::CData(data) => builder.push(Node::CData(utf8(&data)?.to_string())),
                Event::Comment(comment) => {
                    builder.push(Node::Comment(utf8(&comment)?.to_string()));
                }
                Event::Decl(decl) => builder.push(Node::Declaration(utf8(&decl)?.to_string())),
                Event::PI(pi) => {
                    builder.push(Node::ProcessingInstruction(utf8(&pi)?.to_string()));
                }
                Event::DocType(doctype) => {
                    builder.push(Node::DocType(utf8(&doctype)?.to_string()));
                }
                Event::Eof => break,
            }
        }

        if let Some(open) = builder.stack.last() {
            return Err(Error::XmlParse(format!(
                "element {} is not closed",
                open.name()
            )));
        }
        let root = builder
            .root
            .ok_or_else(|| Error::XmlParse("document has no root element".to_string()))?;
        Ok(Self {
            prolog: builder.prolog,
            root,
            epilog: builder.epilog,
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn to_xml(&self) -> Result<String, Error> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.prolog {
            write_node(&mut writer, node)?;
        }
        write_element(&mut writer, &self.root)?;
        for node in &self.epilog {
            write_node(&mut writer, node)?;
        }
        String::from_utf8(writer.into_inner()).map_err(|e| Error::XmlWrite(e.to_string()))
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), Error> {
    writer
        .write_event(event)
        .map_err(|e| Error::XmlWrite(e.to_string()))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), Error> {
    let event = match node {
        Node::Element(element) => return write_element(writer, element),
        Node::Text(raw) => Event::Text(BytesText::from_escaped(raw.as_str())),
        Node::CData(data) => Event::CData(BytesCData::new(data.as_str())),
        Node::Comment(raw) => Event::Comment(BytesText::from_escaped(raw.as_str())),
        Node::ProcessingInstruction(raw) => Event::PI(BytesPI::new(raw.as_str())),
        Node::Declaration(raw) => Event::Decl(BytesDecl::from_start(BytesStart::from_content(
            raw.as_str(),
            3,
        ))),
        Node::DocType(raw) => Event::DocType(BytesText::from_escaped(raw.as_str())),
    };
    write_event(writer, event)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for attribute in &element.attributes {
        let value = attribute.escaped();
        start.push_attribute(quick_xml::events::attributes::Attribute {
            key: QName(attribute.key.as_bytes()),
            value: Cow::Borrowed(value.as_bytes()),
        });
    }
    if element.children.is_empty() && !element.end_tag {
        return write_event(writer, Event::Empty(start));
    }
    write_event(writer, Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    write_event(writer, Event::End(BytesEnd::new(element.name.as_str())))
}
