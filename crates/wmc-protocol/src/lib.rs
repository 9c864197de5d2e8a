//! OGC Web Map Context (WMC 1.1.0) codec for MapStore map configurations.
//!
//! Reads WMC documents, including the OpenLayers and MapStore vendor
//! extensions, into a [`MapConfig`](wmc_common::MapConfig), and writes a
//! configuration back out as a WMC document.
//!
//! ```ignore
//! use wmc_protocol::{to_map_config, to_wmc, ContextMetadata, ParseOptions, WriteOptions};
//!
//! let config = to_map_config(&xml, &ParseOptions::default())?;
//! let wmc = to_wmc(&config, &ContextMetadata::new("My map"), &WriteOptions::default());
//! ```

pub mod export;
pub mod namespaces;
pub mod parse;
pub mod xml;

pub use export::{to_wmc, to_wmc_with, ContextMetadata, WMC_VERSION};
pub use parse::{parse_boolean, parse_float, to_map_config, ParseOptions};
pub use xml::WriteOptions;
