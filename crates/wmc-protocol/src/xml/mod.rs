//! XML plumbing for the WMC codec: a namespace-resolved element tree, lookups
//! over it, and a writer for descriptor trees.

pub mod dom;
pub mod extract;
pub mod writer;

pub use dom::{parse_document, XmlAttribute, XmlElement};
pub use extract::{
    char_content, extract_attribute_value, extract_tag, extract_tags, pick_attribute_values,
    AttrSpec,
};
pub use writer::{
    attributes_from_pairs, escape_attribute_value, escape_text, escape_value, remove_empty_nodes,
    write_xml, AttributeDescriptor, TagDescriptor, WriteOptions, XmlNamespace,
};
