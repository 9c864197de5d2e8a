//! The map configuration exchanged with the map application.

use serde::{Deserialize, Serialize};

use crate::{CatalogServices, Layer, LayerBbox, WmcResult};

/// Format marker of the configuration layout.
pub const MAP_CONFIG_VERSION: u32 = 2;

/// Extent used when a context declares none.
pub const DEFAULT_MAX_EXTENT: [f64; 4] = [0.0, 0.0, 10000.0, 10000.0];

/// Top-level map configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub version: u32,

    pub map: MapSettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_services: Option<CatalogServices>,
}

impl MapConfig {
    pub fn new(map: MapSettings) -> Self {
        Self {
            version: MAP_CONFIG_VERSION,
            map,
            catalog_services: None,
        }
    }

    pub fn from_json(json: &str) -> WmcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> WmcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The `map` section: view state, groups and layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    pub max_extent: [f64; 4],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<LayerBbox>,

    pub projection: String,

    #[serde(default)]
    pub backgrounds: Vec<serde_json::Value>,

    #[serde(default)]
    pub groups: Vec<Group>,

    #[serde(default)]
    pub layers: Vec<Layer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Center>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            max_extent: DEFAULT_MAX_EXTENT,
            bbox: None,
            projection: crate::crs::DEFAULT_PROJECTION.to_string(),
            backgrounds: Vec::new(),
            groups: Vec::new(),
            layers: Vec::new(),
            center: None,
            zoom: None,
        }
    }
}

/// A layer tree group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub expanded: bool,
}

impl Group {
    pub fn new(id: impl Into<String>, title: impl Into<String>, expanded: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            expanded,
        }
    }
}

/// Map center in the given CRS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub x: f64,
    pub y: f64,
    pub crs: String,
}
