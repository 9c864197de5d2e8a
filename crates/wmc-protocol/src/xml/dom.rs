//! Namespace-resolved XML element tree.
//!
//! Built with quick-xml's `NsReader`, so every element and attribute knows
//! the namespace URI it was bound to in the source document, whatever
//! prefix the author chose. Children stay in document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};
use quick_xml::reader::NsReader;

use wmc_common::{WmcError, WmcResult};

/// One XML element with its resolved namespace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub namespace: Option<String>,
    /// Local name, or the full qualified name when the prefix was not bound
    pub local_name: String,
    pub attributes: Vec<XmlAttribute>,
    /// Character content, None when the element has no text
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Element has this namespace URI and local name.
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace_uri() == Some(namespace) && self.local_name == local_name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// One attribute with its resolved namespace.
///
/// Unprefixed attributes have no namespace, as XML namespaces prescribe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlAttribute {
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

impl XmlAttribute {
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

/// Deepest element nesting accepted. The tree is recursive, so deeper
/// documents are rejected instead of exhausting the stack.
pub const MAX_DEPTH: usize = 1024;

/// Parse an XML document into its root element.
///
/// Fails with [`WmcError::XmlParse`] on anything that is not well-formed,
/// or nested deeper than [`MAX_DEPTH`].
///
/// Text is kept as written. Whitespace-only runs between tags are layout
/// and are dropped, unless they are the whole content of a leaf element.
pub fn parse_document(xml: &str) -> WmcResult<XmlElement> {
    let mut reader = NsReader::from_str(xml);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut blank: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(WmcError::XmlParse(format!(
                        "document nested deeper than {} elements",
                        MAX_DEPTH
                    )));
                }
                blank = None;
                let element = open_element(&reader, &start)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                blank = None;
                let element = open_element(&reader, &start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| WmcError::XmlParse("unexpected closing tag".to_string()))?;
                if let Some(text) = blank.take() {
                    if element.children.is_empty() && element.text.is_none() {
                        element.text = Some(text);
                    }
                }
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if let Some(current) = stack.last_mut() {
                    if text.trim().is_empty() {
                        blank = Some(text.into_owned());
                    } else {
                        append_text(current, &text);
                    }
                }
            }
            Event::CData(cdata) => {
                if let Some(current) = stack.last_mut() {
                    append_text(current, &String::from_utf8_lossy(&cdata));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(WmcError::XmlParse(format!(
            "unclosed element <{}>",
            open.local_name
        )));
    }

    root.ok_or_else(|| WmcError::XmlParse("document has no root element".to_string()))
}

fn open_element(reader: &NsReader<&[u8]>, start: &BytesStart) -> WmcResult<XmlElement> {
    let (namespace, local_name) = resolve(reader.resolve_element(start.name()), start.name());

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        if is_namespace_declaration(attr.key) {
            continue;
        }
        let (namespace, local_name) = resolve(reader.resolve_attribute(attr.key), attr.key);
        attributes.push(XmlAttribute {
            namespace,
            local_name,
            value: attr.unescape_value()?.into_owned(),
        });
    }

    Ok(XmlElement {
        namespace,
        local_name,
        attributes,
        text: None,
        children: Vec::new(),
    })
}

fn close_element(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> WmcResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(WmcError::XmlParse(
                "document has more than one root element".to_string(),
            ))
        }
    }
    Ok(())
}

fn append_text(element: &mut XmlElement, text: &str) {
    if text.is_empty() {
        return;
    }
    match element.text.as_mut() {
        Some(existing) => existing.push_str(text),
        None => element.text = Some(text.to_string()),
    }
}

fn resolve(
    (result, local): (ResolveResult, quick_xml::name::LocalName),
    qname: QName,
) -> (Option<String>, String) {
    match result {
        ResolveResult::Bound(ns) => (
            Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
            String::from_utf8_lossy(local.as_ref()).into_owned(),
        ),
        ResolveResult::Unbound => (None, String::from_utf8_lossy(local.as_ref()).into_owned()),
        // Unknown prefix: keep the qualified name so lookups by local name miss it
        ResolveResult::Unknown(_) => (None, String::from_utf8_lossy(qname.as_ref()).into_owned()),
    }
}

fn is_namespace_declaration(key: QName) -> bool {
    let key = key.as_ref();
    key == b"xmlns" || key.starts_with(b"xmlns:")
}
