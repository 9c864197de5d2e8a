//! Common types shared by the WMC codec, the reprojector and the CLI.

pub mod bbox;
pub mod catalog;
pub mod crs;
pub mod error;
pub mod layer;
pub mod map;

pub use bbox::{BoundingBox, LayerBbox};
pub use catalog::{AttrValue, CatalogServices, ServiceAttributes};
pub use crs::{same_crs, CrsCode, DEFAULT_PROJECTION};
pub use error::{WmcError, WmcResult};
pub use layer::{
    CapabilityStyle, Dimension, DimensionSource, DimensionValues, Layer, LayerCapabilities,
    LayerType, LegendUrl, SearchService, SourcedDimension, TileSize, BACKGROUND_GROUP,
    DEFAULT_GROUP, EMPTY_BACKGROUND_ID,
};
pub use map::{Center, Group, MapConfig, MapSettings, DEFAULT_MAX_EXTENT, MAP_CONFIG_VERSION};
