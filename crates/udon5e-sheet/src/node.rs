//! A small immutable XML tree and its serializer.
//!
//! Documents are built bottom-up with the builder methods on [`XmlNode`] and
//! written out once with [`XmlNode::to_xml_string`].

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Error, Result};

/// An element with attributes, text content, and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Tag name of the element.
    pub tag: String,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
    /// Text content, written before any children.
    pub text: String,
    /// Child elements.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Set the text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child element.
    pub fn child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add several children.
    pub fn children(mut self, children: impl IntoIterator<Item = XmlNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Value of an attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first search for the first descendant (or self) matching `f`.
    pub fn find(&self, f: &impl Fn(&XmlNode) -> bool) -> Option<&XmlNode> {
        if f(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(f))
    }

    /// Serialize as a pretty-printed document with an XML declaration.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output)?;
        Ok(String::from_utf8(output).map_err(udon5e_common::Error::from)?)
    }

    /// Write the document to a writer.
    pub fn write_xml<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

        xml_writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
            .map_err(|e| Error::Xml(e.to_string()))?;

        write_element(&mut xml_writer, self)
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, node: &XmlNode) -> Result<()> {
    let mut elem = BytesStart::new(node.tag.as_str());
    for (key, value) in &node.attributes {
        elem.push_attribute((key.as_str(), value.as_str()));
    }

    if node.text.is_empty() && node.children.is_empty() {
        return writer
            .write_event(Event::Empty(elem))
            .map_err(|e| Error::Xml(e.to_string()));
    }

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::Xml(e.to_string()))?;

    if !node.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&node.text)))
            .map_err(|e| Error::Xml(e.to_string()))?;
    }

    for child in &node.children {
        write_element(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(node.tag.as_str())))
        .map_err(|e| Error::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_element() {
        let xml = XmlNode::new("root").attr("a", "1").to_xml_string().unwrap();
        assert_eq!(xml, "<?xml version=\"1.0\"?>\n<root a=\"1\"/>");
    }

    #[test]
    fn test_nested_pretty_print() {
        let root = XmlNode::new("character")
            .child(XmlNode::new("data").attr("name", "name").text("Hero"))
            .child(XmlNode::new("data").attr("name", "empty"));

        let xml = root.to_xml_string().unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\"?>\n\
             <character>\n  \
             <data name=\"name\">Hero</data>\n  \
             <data name=\"empty\"/>\n\
             </character>"
        );
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let xml = XmlNode::new("data")
            .attr("name", "a\"b")
            .text("<&>")
            .to_xml_string()
            .unwrap();
        assert!(xml.contains("name=\"a&quot;b\""));
        assert!(xml.contains("&lt;&amp;&gt;"));
    }

    #[test]
    fn test_find() {
        let root = XmlNode::new("a").child(XmlNode::new("b").child(XmlNode::new("c").text("x")));
        let found = root.find(&|n| n.tag == "c").unwrap();
        assert_eq!(found.text, "x");
        assert!(root.find(&|n| n.tag == "z").is_none());
    }
}
