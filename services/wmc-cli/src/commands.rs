//! The `parse` and `export` commands.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

use wmc_common::MapConfig;
use wmc_protocol::{to_map_config, to_wmc, ContextMetadata, ParseOptions, WriteOptions};

/// WMC document text to map configuration JSON.
pub fn wmc_to_json(xml: &str, options: &ParseOptions) -> Result<String> {
    let config = to_map_config(xml, options)?;
    info!(
        layers = config.map.layers.len(),
        groups = config.map.groups.len(),
        "Converted WMC document"
    );
    Ok(config.to_json_pretty()?)
}

/// Map configuration JSON to WMC document text.
pub fn json_to_wmc(json: &str, context: &ContextMetadata, options: &WriteOptions) -> Result<String> {
    let config = MapConfig::from_json(json)?;
    info!(
        layers = config.map.layers.len(),
        title = %context.title,
        "Writing WMC document"
    );
    Ok(to_wmc(&config, context, options))
}

/// Read a WMC file and write its map configuration.
pub fn parse_command(input: &Path, output: Option<&Path>, options: &ParseOptions) -> Result<()> {
    let xml = read_input(input)?;
    let json = wmc_to_json(&xml, options)
        .with_context(|| format!("Failed to convert {:?}", input))?;
    write_output(output, &json)
}

/// Read a map configuration and write it as a WMC file.
pub fn export_command(
    input: &Path,
    output: Option<&Path>,
    context: &ContextMetadata,
    options: &WriteOptions,
) -> Result<()> {
    let json = read_input(input)?;
    let xml = json_to_wmc(&json, context, options)
        .with_context(|| format!("Failed to export {:?}", input))?;
    write_output(output, &xml)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

/// Write to the output file, or to stdout when there is none.
fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
            info!(path = ?path, bytes = content.len(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", content).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
