//! Builders for map configurations used across the test suite.
//!
//! Everything here produces plain values with predictable contents, so
//! tests can state expectations without re-deriving them.

use wmc_common::{
    BoundingBox, CapabilityStyle, Dimension, DimensionSource, DimensionValues, Group, Layer,
    LayerBbox, LayerCapabilities, LayerType, LegendUrl, MapConfig, MapSettings, SourcedDimension,
    BACKGROUND_GROUP,
};

use crate::fixtures::urls;

/// A visible WMS layer served from the demo GeoServer.
///
/// # Example
///
/// ```
/// use test_utils::wms_layer;
///
/// let layer = wms_layer("rivers");
/// assert_eq!(layer.id, "rivers");
/// assert_eq!(layer.name.as_deref(), Some("rivers"));
/// ```
pub fn wms_layer(name: &str) -> Layer {
    Layer {
        id: name.to_string(),
        visibility: true,
        layer_type: LayerType::Wms,
        url: Some(urls::GEOSERVER_WMS.to_string()),
        name: Some(name.to_string()),
        title: Some(format!("{} title", name)),
        format: Some("image/png".to_string()),
        single_tile: Some(false),
        queryable: Some(true),
        opacity: Some(1.0),
        ..Default::default()
    }
}

/// A visible WMS layer in the background group.
pub fn background_layer(name: &str) -> Layer {
    Layer {
        group: Some(BACKGROUND_GROUP.to_string()),
        queryable: Some(false),
        format: Some("image/jpeg".to_string()),
        ..wms_layer(name)
    }
}

/// A WMS layer without its own URL whose capabilities advertise two
/// formats, two styles (one with a legend) and a time dimension.
pub fn capabilities_layer(name: &str) -> Layer {
    Layer {
        url: None,
        style: Some("highlight".to_string()),
        capabilities: Some(LayerCapabilities {
            online_resource: Some(urls::GEOSERVER_WMS.to_string()),
            formats: vec!["image/png".to_string(), "image/jpeg".to_string()],
            styles: vec![
                CapabilityStyle {
                    name: "default".to_string(),
                    title: Some("Default style".to_string()),
                    ..Default::default()
                },
                CapabilityStyle {
                    name: "highlight".to_string(),
                    title: None,
                    abstract_text: Some("Emphasised features".to_string()),
                    legend_url: Some(LegendUrl {
                        width: Some(20),
                        height: Some(20),
                        format: Some("image/png".to_string()),
                        online_resource: format!(
                            "{}?request=GetLegendGraphic&layer={}",
                            urls::GEOSERVER_WMS,
                            name
                        ),
                    }),
                },
            ],
            dimensions: vec![time_dimension(), elevation_values()],
        }),
        ..wms_layer(name)
    }
}

/// A time dimension with two instants.
pub fn time_dimension() -> DimensionValues {
    DimensionValues {
        name: "time".to_string(),
        units: Some("ISO8601".to_string()),
        unit_symbol: None,
        default: Some("2024-01-01T00:00:00Z".to_string()),
        values: vec![
            "2024-01-01T00:00:00Z".to_string(),
            "2024-02-01T00:00:00Z".to_string(),
        ],
    }
}

/// Elevation values as advertised by WMS capabilities.
pub fn elevation_values() -> DimensionValues {
    DimensionValues {
        name: "elevation".to_string(),
        units: Some("EPSG:5030".to_string()),
        unit_symbol: Some("m".to_string()),
        default: None,
        values: vec!["0".to_string(), "100".to_string()],
    }
}

/// An elevation dimension resolved by the multidimensional extension.
pub fn sourced_elevation() -> Dimension {
    Dimension::Sourced(SourcedDimension {
        name: "elevation".to_string(),
        source: DimensionSource {
            source_type: Some("multidim-extension".to_string()),
            url: Some(urls::MULTIDIM.to_string()),
        },
    })
}

/// A mercator map holding the given layers in a `Default` group.
pub fn map_config(layers: Vec<Layer>) -> MapConfig {
    MapConfig::new(MapSettings {
        max_extent: [-20037508.34, -20037508.34, 20037508.34, 20037508.34],
        projection: "EPSG:3857".to_string(),
        groups: vec![Group::new("Default", "Default", true)],
        layers,
        ..Default::default()
    })
}

/// [`map_config`] with an initial view given as a geographic bbox.
pub fn map_config_with_bbox(layers: Vec<Layer>, bounds: BoundingBox, crs: &str) -> MapConfig {
    let mut config = map_config(layers);
    config.map.bbox = Some(LayerBbox::new(bounds, crs));
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_layer_is_background() {
        assert!(background_layer("osm").is_background());
        assert!(!wms_layer("rivers").is_background());
    }

    #[test]
    fn test_capabilities_layer_has_no_url() {
        let layer = capabilities_layer("rivers");
        assert!(layer.url.is_none());
        let caps = layer.capabilities.unwrap();
        assert_eq!(caps.formats.len(), 2);
        assert!(caps.styles[1].legend_url.is_some());
    }

    #[test]
    fn test_map_config_defaults() {
        let config = map_config(vec![wms_layer("a")]);
        assert_eq!(config.map.layers.len(), 1);
        assert!(config.map.bbox.is_none());
        assert!(config.catalog_services.is_none());
    }
}
