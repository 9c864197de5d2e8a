//! Tests for reading MapStore map configuration JSON.

use wmc_common::{AttrValue, Dimension, LayerType, MapConfig, WmcError, DEFAULT_MAX_EXTENT};

const MAPSTORE_CONFIG: &str = r#"{
    "version": 2,
    "catalogServices": {
        "selectedService": "wms",
        "services": {
            "wms": {
                "url": "https://example.com/wms",
                "autoload": false,
                "pageSize": 20,
                "filter": {"staticFilter": ""}
            }
        }
    },
    "map": {
        "projection": "EPSG:900913",
        "maxExtent": [-20037508.34, -20037508.34, 20037508.34, 20037508.34],
        "center": {"x": 11.2, "y": 43.7, "crs": "EPSG:4326"},
        "zoom": 5,
        "groups": [{"id": "Default", "title": "Default", "expanded": true}],
        "layers": [
            {
                "id": "osm__1",
                "type": "osm",
                "group": "background",
                "source": "osm",
                "title": "Open Street Map",
                "visibility": true
            },
            {
                "id": "rivers__2",
                "type": "wms",
                "url": "https://example.com/wms",
                "name": "hydro:rivers",
                "format": "image/png",
                "opacity": 0.8,
                "tileSize": {"width": 512, "height": 512},
                "dimensions": [
                    {"name": "elevation", "source": {"type": "multidim-extension", "url": "https://example.com/wmts"}},
                    {"name": "time", "units": "ISO8601", "values": ["2024-01-01T00:00:00Z"]}
                ],
                "capabilities": {
                    "onlineResource": "https://example.com/wms",
                    "formats": ["image/png"],
                    "styles": [{"name": "blue", "legendUrl": {"onlineResource": "https://example.com/legend.png"}}]
                }
            }
        ]
    }
}"#;

// ============================================================================
// Reading
// ============================================================================

#[test]
fn test_read_mapstore_config() {
    let config = MapConfig::from_json(MAPSTORE_CONFIG).unwrap();
    assert_eq!(config.version, 2);
    assert_eq!(config.map.zoom, Some(5.0));
    assert_eq!(config.map.layers.len(), 2);
    assert!(config.map.bbox.is_none());
}

#[test]
fn test_unknown_layer_types_are_kept() {
    let config = MapConfig::from_json(MAPSTORE_CONFIG).unwrap();
    let osm = &config.map.layers[0];
    assert_eq!(osm.layer_type, LayerType::Other("osm".to_string()));
    assert!(osm.is_background());
    assert_eq!(config.map.layers[1].layer_type, LayerType::Wms);
}

#[test]
fn test_dimensions_are_told_apart_by_shape() {
    let config = MapConfig::from_json(MAPSTORE_CONFIG).unwrap();
    let dimensions = &config.map.layers[1].dimensions;
    assert!(matches!(&dimensions[0], Dimension::Sourced(d) if d.name == "elevation"));
    assert!(matches!(&dimensions[1], Dimension::Values(d) if d.units.as_deref() == Some("ISO8601")));
}

#[test]
fn test_catalog_values_keep_their_types() {
    let config = MapConfig::from_json(MAPSTORE_CONFIG).unwrap();
    let service = &config.catalog_services.unwrap().services["wms"];
    assert_eq!(service["autoload"], AttrValue::Bool(false));
    assert_eq!(service["pageSize"], AttrValue::Num(20.0));
    assert_eq!(service["url"].type_name(), "string");
    assert_eq!(service["filter"].type_name(), "object");
}

#[test]
fn test_capabilities_are_read() {
    let config = MapConfig::from_json(MAPSTORE_CONFIG).unwrap();
    let caps = config.map.layers[1].capabilities.as_ref().unwrap();
    assert_eq!(caps.online_resource.as_deref(), Some("https://example.com/wms"));
    assert_eq!(
        caps.styles[0].legend_url.as_ref().unwrap().online_resource,
        "https://example.com/legend.png"
    );
}

#[test]
fn test_missing_optional_sections_use_defaults() {
    let config = MapConfig::from_json(
        r#"{"version": 2, "map": {"projection": "EPSG:4326", "maxExtent": [0, 0, 10000, 10000]}}"#,
    )
    .unwrap();
    assert_eq!(config.map.max_extent, DEFAULT_MAX_EXTENT);
    assert!(config.map.layers.is_empty());
    assert!(config.map.groups.is_empty());
    assert!(config.catalog_services.is_none());
}

#[test]
fn test_invalid_json_is_a_json_error() {
    let err = MapConfig::from_json(r#"{"version": "two"}"#).unwrap_err();
    assert!(matches!(err, WmcError::Json(_)));
    assert_eq!(err.code(), "JsonError");
}

// ============================================================================
// Writing
// ============================================================================

#[test]
fn test_written_json_omits_absent_fields() {
    let config = MapConfig::from_json(MAPSTORE_CONFIG).unwrap();
    let json = config.to_json_pretty().unwrap();
    assert!(!json.contains("null"));
    assert!(!json.contains("\"bbox\""));
    assert!(json.contains("\"tileSize\""));
    assert_eq!(MapConfig::from_json(&json).unwrap(), config);
}
