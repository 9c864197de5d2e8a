//! Layer definitions of a map configuration.

use serde::{Deserialize, Serialize};

use crate::LayerBbox;

/// Group id reserved for background layers.
pub const BACKGROUND_GROUP: &str = "background";

/// Group id of the implicit group holding ungrouped layers.
pub const DEFAULT_GROUP: &str = "Default";

/// Id of the placeholder background inserted when no background is visible.
pub const EMPTY_BACKGROUND_ID: &str = "empty_background";

/// Layer source type.
///
/// Only `wms` layers take part in WMC documents; every other type is
/// carried through the JSON configuration untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerType {
    #[default]
    Wms,
    Empty,
    Other(String),
}

impl LayerType {
    pub fn as_str(&self) -> &str {
        match self {
            LayerType::Wms => "wms",
            LayerType::Empty => "empty",
            LayerType::Other(other) => other,
        }
    }
}

impl From<String> for LayerType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "wms" => LayerType::Wms,
            "empty" => LayerType::Empty,
            _ => LayerType::Other(s),
        }
    }
}

impl From<LayerType> for String {
    fn from(t: LayerType) -> Self {
        match t {
            LayerType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A map layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Unique within one configuration, regenerated on every parse
    pub id: String,

    #[serde(default = "default_visibility")]
    pub visibility: bool,

    #[serde(rename = "type", default)]
    pub layer_type: LayerType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Image format (e.g., "image/png")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_tile: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queryable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<LayerBbox>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<TileSize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchService>,

    /// Arbitrary filter object attached by the map application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_filter: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Capabilities attached by whoever built the layer from a GetCapabilities response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<LayerCapabilities>,
}

fn default_visibility() -> bool {
    true
}

impl Layer {
    /// The placeholder background used when a map has no visible background.
    pub fn empty_background() -> Self {
        Self {
            id: EMPTY_BACKGROUND_ID.to_string(),
            visibility: true,
            layer_type: LayerType::Empty,
            title: Some("Empty Background".to_string()),
            group: Some(BACKGROUND_GROUP.to_string()),
            source: Some("ol".to_string()),
            ..Default::default()
        }
    }

    pub fn is_background(&self) -> bool {
        self.group.as_deref() == Some(BACKGROUND_GROUP)
    }

    /// Ungrouped layers belong to the implicit `Default` group.
    pub fn is_in_default_group(&self) -> bool {
        matches!(self.group.as_deref(), None | Some(DEFAULT_GROUP))
    }
}

/// OpenLayers tile size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

/// Search service bound to a layer (usually a WFS endpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

/// A layer dimension.
///
/// Dimensions resolved by an external service carry only a `source`;
/// everything else lists its values inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Sourced(SourcedDimension),
    Values(DimensionValues),
}

impl Dimension {
    pub fn name(&self) -> &str {
        match self {
            Dimension::Sourced(d) => &d.name,
            Dimension::Values(d) => &d.name,
        }
    }

    pub fn is_sourced(&self) -> bool {
        matches!(self, Dimension::Sourced(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedDimension {
    pub name: String,
    pub source: DimensionSource,
}

/// Where an externally resolved dimension gets its values from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSource {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionValues {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_symbol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default)]
    pub values: Vec<String>,
}

/// The slice of a WMS GetCapabilities layer record the WMC writer needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerCapabilities {
    /// GetMap endpoint advertised by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_resource: Option<String>,

    #[serde(default)]
    pub formats: Vec<String>,

    #[serde(default)]
    pub styles: Vec<CapabilityStyle>,

    #[serde(default)]
    pub dimensions: Vec<DimensionValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStyle {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_url: Option<LegendUrl>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendUrl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    pub online_resource: String,
}
