//! WMC command line tool library.
//!
//! Converts OGC Web Map Context documents to MapStore map configuration
//! JSON and back.

pub mod commands;
pub mod config;

pub use commands::{export_command, json_to_wmc, parse_command, wmc_to_json};
pub use config::{FileConfig, LogFormat, Newline, Overrides, ToolConfig};
