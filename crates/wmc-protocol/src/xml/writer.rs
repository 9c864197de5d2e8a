//! Tag descriptor trees and their serialization to indented XML.
//!
//! Descriptors hold their attributes and children as `Option`s so that
//! builders can drop optional parts inline; [`remove_empty_nodes`]
//! compacts a tree before it is written.

/// A namespace binding, with no prefix for the default namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNamespace {
    pub uri: String,
    pub prefix: Option<String>,
}

impl XmlNamespace {
    pub fn default_ns(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            prefix: None,
        }
    }

    pub fn prefixed(uri: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            prefix: Some(prefix.into()),
        }
    }

    fn declaration(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("xmlns:{}=\"{}\"", prefix, escape_attribute_value(&self.uri)),
            None => format!("xmlns=\"{}\"", escape_attribute_value(&self.uri)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub value: String,
    pub xmlns: Option<XmlNamespace>,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            xmlns: None,
        }
    }

    pub fn with_ns(mut self, xmlns: XmlNamespace) -> Self {
        self.xmlns = Some(xmlns);
        self
    }
}

/// An element to be written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagDescriptor {
    pub name: String,
    pub xmlns: Option<XmlNamespace>,
    pub text_content: Option<String>,
    pub attributes: Vec<Option<AttributeDescriptor>>,
    pub children: Vec<Option<TagDescriptor>>,
}

impl TagDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_ns(mut self, xmlns: XmlNamespace) -> Self {
        self.xmlns = Some(xmlns);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(Some(attribute));
        self
    }

    pub fn with_attributes(
        mut self,
        attributes: impl IntoIterator<Item = Option<AttributeDescriptor>>,
    ) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn with_child(mut self, child: TagDescriptor) -> Self {
        self.children.push(Some(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Option<TagDescriptor>>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Attributes from `(name, value)` pairs, with `None` for absent values.
pub fn attributes_from_pairs<'a, I>(pairs: I) -> Vec<Option<AttributeDescriptor>>
where
    I: IntoIterator<Item = (&'a str, Option<String>)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| value.map(|value| AttributeDescriptor::new(name, value)))
        .collect()
}

/// Drop every `None` attribute and child, recursively.
pub fn remove_empty_nodes(tree: TagDescriptor) -> TagDescriptor {
    TagDescriptor {
        attributes: tree.attributes.into_iter().flatten().map(Some).collect(),
        children: tree
            .children
            .into_iter()
            .flatten()
            .map(|child| Some(remove_empty_nodes(child)))
            .collect(),
        ..tree
    }
}

/// Line layout of the written document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    pub tab_size: usize,
    pub newline: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            tab_size: 2,
            newline: "\n".to_string(),
        }
    }
}

/// Escape `&` and then each of `"`, `'`, `>`, `<` that is not skipped.
pub fn escape_value(skip_quot: bool, skip_apos: bool, skip_gt: bool, skip_lt: bool, value: &str) -> String {
    let mut escaped = value.replace('&', "&amp;");
    if !skip_quot {
        escaped = escaped.replace('"', "&quot;");
    }
    if !skip_apos {
        escaped = escaped.replace('\'', "&apos;");
    }
    if !skip_gt {
        escaped = escaped.replace('>', "&gt;");
    }
    if !skip_lt {
        escaped = escaped.replace('<', "&lt;");
    }
    escaped
}

/// Escaping for character content: only `&` and `<`.
pub fn escape_text(value: &str) -> String {
    escape_value(true, true, true, false, value)
}

/// Escaping for attribute values: everything but `>`.
pub fn escape_attribute_value(value: &str) -> String {
    escape_value(false, false, true, false, value)
}

/// Write a descriptor tree as an XML document.
///
/// With a non-empty `xmlns_list` every namespace is declared once on the
/// root and prefixes come from that list. With an empty list each element
/// declares the namespaces it and its attributes use.
pub fn write_xml(tree: &TagDescriptor, xmlns_list: &[XmlNamespace], options: &WriteOptions) -> String {
    write_node(tree, xmlns_list, options, 0)
}

fn write_node(
    node: &TagDescriptor,
    xmlns_list: &[XmlNamespace],
    options: &WriteOptions,
    nesting_level: usize,
) -> String {
    let indent = " ".repeat(nesting_level * options.tab_size);

    let local_mode = xmlns_list.is_empty();
    let local_namespaces = if local_mode {
        namespaces_used_by(node)
    } else {
        Vec::new()
    };
    let scope: &[XmlNamespace] = if local_mode {
        &local_namespaces
    } else {
        xmlns_list
    };
    let declared: &[XmlNamespace] = if local_mode || nesting_level == 0 {
        scope
    } else {
        &[]
    };

    let tag_name = qualified_name(&node.name, node.xmlns.as_ref(), scope);

    let mut open_tag = format!("<{}", tag_name);
    for namespace in declared {
        open_tag.push(' ');
        open_tag.push_str(&namespace.declaration());
    }
    for attribute in node.attributes.iter().flatten() {
        open_tag.push_str(&format!(
            " {}=\"{}\"",
            qualified_name(&attribute.name, attribute.xmlns.as_ref(), scope),
            escape_attribute_value(&attribute.value)
        ));
    }

    let text = node.text_content.as_deref().filter(|t| !t.is_empty());
    let children: Vec<&TagDescriptor> = node.children.iter().flatten().collect();

    let mut out = String::new();
    if nesting_level == 0 {
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push_str(&options.newline);
    }
    out.push_str(&indent);
    out.push_str(&open_tag);

    if text.is_none() && children.is_empty() {
        out.push_str("/>");
        return out;
    }

    out.push('>');
    if let Some(text) = text {
        out.push_str(&escape_text(text));
    }
    for child in &children {
        out.push_str(&options.newline);
        out.push_str(&write_node(child, xmlns_list, options, nesting_level + 1));
    }
    if !children.is_empty() {
        out.push_str(&options.newline);
        out.push_str(&indent);
    }
    out.push_str(&format!("</{}>", tag_name));
    out
}

/// The node's own namespace plus its attributes' namespaces, one per URI.
fn namespaces_used_by(node: &TagDescriptor) -> Vec<XmlNamespace> {
    let mut namespaces: Vec<XmlNamespace> = Vec::new();
    let used = node
        .xmlns
        .iter()
        .chain(node.attributes.iter().flatten().filter_map(|a| a.xmlns.as_ref()));
    for namespace in used {
        if !namespaces.iter().any(|n| n.uri == namespace.uri) {
            namespaces.push(namespace.clone());
        }
    }
    namespaces
}

/// `prefix:name`, taking the prefix the scope binds to the namespace URI.
fn qualified_name(name: &str, xmlns: Option<&XmlNamespace>, scope: &[XmlNamespace]) -> String {
    let prefix = xmlns.and_then(|namespace| {
        scope
            .iter()
            .find(|n| n.uri == namespace.uri)
            .unwrap_or(namespace)
            .prefix
            .as_deref()
    });
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, name),
        None => name.to_string(),
    }
}
