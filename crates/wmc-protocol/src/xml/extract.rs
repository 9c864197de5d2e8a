//! Namespace-aware lookups over an [`XmlElement`] tree.
//!
//! All lookups are total: a missing node, tag or attribute yields an empty
//! result, which lets callers chain them over optional document parts.

use std::collections::BTreeMap;

use super::{XmlAttribute, XmlElement};

/// All immediate children of `node` with the given namespace and local name,
/// in document order.
pub fn extract_tags<'a>(
    namespace: &str,
    node: Option<&'a XmlElement>,
    local_name: &str,
) -> Vec<&'a XmlElement> {
    node.map(|node| {
        node.children
            .iter()
            .filter(|child| child.is(namespace, local_name))
            .collect()
    })
    .unwrap_or_default()
}

/// First immediate child of `node` with the given namespace and local name.
pub fn extract_tag<'a>(
    namespace: &str,
    node: Option<&'a XmlElement>,
    local_name: &str,
) -> Option<&'a XmlElement> {
    node?
        .children
        .iter()
        .find(|child| child.is(namespace, local_name))
}

/// Character content of a tag.
pub fn char_content(tag: Option<&XmlElement>) -> Option<&str> {
    tag?.text()
}

/// Value of the attribute with this namespace (None for unqualified) and local name.
pub fn extract_attribute_value<'a>(
    namespace: Option<&str>,
    tag: Option<&'a XmlElement>,
    name: &str,
) -> Option<&'a str> {
    tag?.attributes
        .iter()
        .find(|attr| attr.local_name == name && attr.namespace_uri() == namespace)
        .map(|attr| attr.value.as_str())
}

/// Which attribute to pick and under what key to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrSpec<'s> {
    /// Unqualified attribute, reported under its own name
    Plain(&'s str),
    /// Namespaced attribute, reported under `param_name`
    Qualified {
        local: &'s str,
        uri: &'s str,
        param_name: &'s str,
    },
}

impl<'s> AttrSpec<'s> {
    fn matches(&self, attr: &XmlAttribute) -> Option<&'s str> {
        let (local, uri, param_name) = match *self {
            AttrSpec::Plain(name) => (name, None, name),
            AttrSpec::Qualified {
                local,
                uri,
                param_name,
            } => (local, Some(uri), param_name),
        };
        (attr.local_name == local && attr.namespace_uri() == uri).then_some(param_name)
    }
}

impl<'s> From<&'s str> for AttrSpec<'s> {
    fn from(name: &'s str) -> Self {
        AttrSpec::Plain(name)
    }
}

/// Collect the attributes of `tag` that match one of `specs`.
///
/// Each attribute is reported under the key of the first spec it matches;
/// attributes matching no spec, and specs absent from the tag, are left out.
pub fn pick_attribute_values(tag: Option<&XmlElement>, specs: &[AttrSpec]) -> BTreeMap<String, String> {
    let Some(tag) = tag else {
        return BTreeMap::new();
    };

    tag.attributes
        .iter()
        .filter_map(|attr| {
            specs
                .iter()
                .find_map(|spec| spec.matches(attr))
                .map(|key| (key.to_string(), attr.value.clone()))
        })
        .collect()
}
