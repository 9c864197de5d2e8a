//! Namespaces used by WMC documents and their vendor extensions.

use crate::xml::XmlNamespace;

/// WMC default namespace.
pub const ROOT: &str = "http://www.opengis.net/context";
/// XML Schema instance namespace.
pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Standard namespace for hyperlinks.
pub const XLINK: &str = "http://www.w3.org/1999/xlink";
/// OpenLayers context extension namespace.
pub const OL: &str = "http://openlayers.org/context";
/// MapStore context extension namespace.
pub const MS: &str = "http://geo-solutions.it/mapstore/context";

/// Location of the WMC 1.1.0 schema, written into `xsi:schemaLocation`.
pub const SCHEMA_LOCATION: &str =
    "http://www.opengis.net/context http://schemas.opengis.net/context/1.1.0/context.xsd";

pub fn root() -> XmlNamespace {
    XmlNamespace::default_ns(ROOT)
}

pub fn xsi() -> XmlNamespace {
    XmlNamespace::prefixed(XSI, "xsi")
}

pub fn xlink() -> XmlNamespace {
    XmlNamespace::prefixed(XLINK, "xlink")
}

pub fn ol() -> XmlNamespace {
    XmlNamespace::prefixed(OL, "ol")
}

pub fn ms() -> XmlNamespace {
    XmlNamespace::prefixed(MS, "ms")
}

/// The full namespace table, declared once on the document root.
pub fn all() -> Vec<XmlNamespace> {
    vec![root(), xsi(), xlink(), ol(), ms()]
}
