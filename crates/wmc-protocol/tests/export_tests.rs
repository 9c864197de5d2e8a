//! Tests for writing map configurations as WMC documents.

use std::collections::BTreeMap;

use projection::Reprojector;
use test_utils::fixtures::{crs, urls};
use test_utils::{
    assert_approx_eq, background_layer, capabilities_layer, map_config, map_config_with_bbox,
    sourced_elevation, time_dimension, wms_layer,
};
use wmc_common::{
    AttrValue, BoundingBox, CatalogServices, Center, Dimension, Layer, LayerType, WmcError,
    WmcResult,
};
use wmc_protocol::{to_map_config, to_wmc, to_wmc_with, ContextMetadata, ParseOptions, WriteOptions};

fn export(config: &wmc_common::MapConfig) -> String {
    to_wmc(config, &ContextMetadata::new("Exported map"), &WriteOptions::default())
}

// ============================================================================
// Document shell
// ============================================================================

#[test]
fn test_root_declares_every_namespace_once() {
    let xml = export(&map_config(vec![wms_layer("rivers")]));
    let mut lines = xml.lines();
    assert_eq!(lines.next(), Some(r#"<?xml version="1.0" encoding="UTF-8"?>"#));

    let root = lines.next().unwrap();
    assert!(root.starts_with(r#"<ViewContext xmlns="http://www.opengis.net/context""#));
    assert!(root.contains(r#"version="1.1.0""#));
    assert!(root.contains(
        r#"xsi:schemaLocation="http://www.opengis.net/context http://schemas.opengis.net/context/1.1.0/context.xsd""#
    ));

    for prefix in ["xmlns=", "xmlns:xsi=", "xmlns:xlink=", "xmlns:ol=", "xmlns:ms="] {
        assert_eq!(xml.matches(prefix).count(), 1, "{} declared once", prefix);
        assert!(root.contains(prefix));
    }
}

#[test]
fn test_title_and_abstract_are_escaped() {
    let context = ContextMetadata {
        title: "Rivers & <lakes>".to_string(),
        abstract_text: Some("Water".to_string()),
    };
    let xml = to_wmc(&map_config(vec![]), &context, &WriteOptions::default());
    assert!(xml.contains("<Title>Rivers &amp; &lt;lakes></Title>"));
    assert!(xml.contains("<Abstract>Water</Abstract>"));
}

#[test]
fn test_abstract_omitted_when_absent() {
    let xml = export(&map_config(vec![]));
    assert!(!xml.contains("<Abstract"));
}

#[test]
fn test_write_options_control_layout() {
    let options = WriteOptions {
        tab_size: 4,
        newline: "\r\n".to_string(),
    };
    let xml = to_wmc(&map_config(vec![]), &ContextMetadata::new("Layout"), &options);
    assert!(xml.contains("\r\n    <General>\r\n        <BoundingBox"));
    assert_eq!(xml.matches('\n').count(), xml.matches("\r\n").count());
}

// ============================================================================
// General section
// ============================================================================

#[test]
fn test_bounding_box_falls_back_to_max_extent() {
    let xml = export(&map_config(vec![]));
    assert!(xml.contains(
        r#"<BoundingBox SRS="EPSG:3857" minx="-20037508.34" miny="-20037508.34" maxx="20037508.34" maxy="20037508.34"/>"#
    ));
    assert!(xml.contains(
        r#"<ol:maxExtent minx="-20037508.34" miny="-20037508.34" maxx="20037508.34" maxy="20037508.34"/>"#
    ));
}

#[test]
fn test_bbox_is_reprojected_to_map_projection() {
    let config = map_config_with_bbox(
        vec![],
        BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        crs::EPSG_4326,
    );
    let xml = export(&config);
    assert!(xml.contains(r#"<BoundingBox SRS="EPSG:3857""#));

    let parsed = to_map_config(&xml, &ParseOptions::default()).unwrap();
    let bbox = parsed.map.bbox.expect("bbox");
    assert_eq!(bbox.crs, crs::EPSG_3857);
    assert_approx_eq!(bbox.bounds.minx, 0.0, 1e-6);
    assert_approx_eq!(bbox.bounds.maxx, 1113194.9079327357, 1e-3);
    assert_approx_eq!(bbox.bounds.maxy, 1118889.9748579594, 1e-3);
}

#[test]
fn test_unreprojectable_bbox_falls_back_to_max_extent() {
    let config = map_config_with_bbox(vec![], BoundingBox::new(1.0, 2.0, 3.0, 4.0), "EPSG:2154");
    let xml = export(&config);
    assert!(xml.contains(r#"<BoundingBox SRS="EPSG:3857" minx="-20037508.34""#));
}

struct FailingReprojector;

impl Reprojector for FailingReprojector {
    fn reproject_bbox(&self, _bbox: &BoundingBox, from: &str, to: &str) -> WmcResult<BoundingBox> {
        Err(WmcError::Reprojection {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

#[test]
fn test_custom_reprojector_is_used() {
    let config = map_config_with_bbox(vec![], BoundingBox::new(0.0, 0.0, 1.0, 1.0), crs::EPSG_4326);
    let xml = to_wmc_with(
        &config,
        &ContextMetadata::new("Custom"),
        &WriteOptions::default(),
        &FailingReprojector,
    );
    assert!(xml.contains(r#"minx="-20037508.34""#));
}

#[test]
fn test_groups_center_and_zoom() {
    let mut config = map_config(vec![]);
    config.map.center = Some(Center {
        x: 11.5,
        y: 43.0,
        crs: crs::EPSG_4326.to_string(),
    });
    config.map.zoom = Some(5.0);
    let xml = export(&config);

    assert!(xml.contains(r#"<ms:Group id="Default" title="Default" expanded="true"/>"#));
    assert!(xml.contains(r#"<ms:center x="11.5" y="43" crs="EPSG:4326"/>"#));
    assert!(xml.contains("<ms:zoom>5</ms:zoom>"));
}

#[test]
fn test_empty_groups_and_zero_zoom_are_omitted() {
    let mut config = map_config(vec![]);
    config.map.groups.clear();
    config.map.zoom = Some(0.0);
    let xml = export(&config);
    assert!(!xml.contains("GroupList"));
    assert!(!xml.contains("ms:zoom"));
    assert!(!xml.contains("ms:center"));
    assert!(!xml.contains("CatalogServices"));
}

#[test]
fn test_catalog_services_are_typed_and_skip_nulls() {
    let mut attributes = BTreeMap::new();
    attributes.insert("url".to_string(), AttrValue::from(urls::CSW));
    attributes.insert("autoload".to_string(), AttrValue::Bool(false));
    attributes.insert("pageSize".to_string(), AttrValue::Num(10.0));
    attributes.insert(
        "filter".to_string(),
        AttrValue::Json(serde_json::json!({"a": 1})),
    );
    attributes.insert("unset".to_string(), AttrValue::Json(serde_json::Value::Null));

    let mut services = BTreeMap::new();
    services.insert("csw".to_string(), attributes);

    let mut config = map_config(vec![]);
    config.catalog_services = Some(CatalogServices {
        selected_service: "csw".to_string(),
        services,
    });
    let xml = export(&config);

    assert!(xml.contains(r#"<ms:CatalogServices selectedService="csw">"#));
    assert!(xml.contains(r#"<ms:Service serviceName="csw">"#));
    assert!(xml.contains(&format!(
        r#"<ms:Attribute name="url" type="string">{}</ms:Attribute>"#,
        urls::CSW
    )));
    assert!(xml.contains(r#"<ms:Attribute name="autoload" type="boolean">false</ms:Attribute>"#));
    assert!(xml.contains(r#"<ms:Attribute name="pageSize" type="number">10</ms:Attribute>"#));
    assert!(xml.contains(r#"<ms:Attribute name="filter" type="object">{"a":1}</ms:Attribute>"#));
    assert!(!xml.contains("unset"));
}

// ============================================================================
// Layers
// ============================================================================

#[test]
fn test_only_wms_layers_are_written() {
    let other = Layer {
        layer_type: LayerType::Other("osm".to_string()),
        ..wms_layer("tiles")
    };
    let config = map_config(vec![Layer::empty_background(), other, wms_layer("rivers")]);
    let xml = export(&config);
    assert_eq!(xml.matches("<Layer ").count(), 1);
    assert!(xml.contains("<Name>rivers</Name>"));
    assert!(!xml.contains("tiles"));
    assert!(!xml.contains("Empty Background"));
}

#[test]
fn test_layer_without_server_url_is_skipped() {
    let orphan = Layer {
        url: None,
        ..wms_layer("orphan")
    };
    let xml = export(&map_config(vec![orphan, wms_layer("rivers")]));
    assert_eq!(xml.matches("<Layer ").count(), 1);
    assert!(!xml.contains("orphan"));
}

#[test]
fn test_layer_flags_and_server() {
    let hidden = Layer {
        visibility: false,
        queryable: Some(false),
        ..wms_layer("rivers")
    };
    let xml = export(&map_config(vec![hidden]));
    assert!(xml.contains(r#"<Layer queryable="0" hidden="1">"#));
    assert!(xml.contains(r#"<Server service="OGC:WMS" version="1.3.0">"#));
    assert!(xml.contains(&format!(
        r#"<OnlineResource xlink:type="simple" xlink:href="{}"/>"#,
        urls::GEOSERVER_WMS
    )));
}

#[test]
fn test_layer_extension_defaults() {
    let layer = Layer {
        transparent: None,
        opacity: None,
        single_tile: None,
        ..wms_layer("rivers")
    };
    let xml = export(&map_config(vec![layer]));
    assert!(xml.contains("<ol:singleTile>false</ol:singleTile>"));
    assert!(xml.contains("<ol:transparent>true</ol:transparent>"));
    assert!(xml.contains("<ol:isBaseLayer>false</ol:isBaseLayer>"));
    assert!(xml.contains("<ol:opacity>1</ol:opacity>"));
    assert!(xml.contains("<ms:group>Default</ms:group>"));
    assert!(!xml.contains("ol:maxExtent minx=\"0\""));
}

#[test]
fn test_background_layer_is_base_layer() {
    let xml = export(&map_config(vec![background_layer("osm")]));
    assert!(xml.contains("<ol:isBaseLayer>true</ol:isBaseLayer>"));
    assert!(xml.contains("<ms:group>background</ms:group>"));
}

#[test]
fn test_format_list_without_capabilities() {
    let xml = export(&map_config(vec![wms_layer("rivers")]));
    assert!(xml.contains(r#"<Format current="1">image/png</Format>"#));
    assert!(!xml.contains("<StyleList"));
}

#[test]
fn test_capabilities_drive_formats_styles_and_url() {
    let xml = export(&map_config(vec![capabilities_layer("rivers")]));

    assert!(xml.contains(&format!(r#"xlink:href="{}""#, urls::GEOSERVER_WMS)));
    assert!(xml.contains(r#"<Format current="1">image/png</Format>"#));
    assert!(xml.contains("<Format>image/jpeg</Format>"));

    assert!(xml.contains("<Style>"));
    assert!(xml.contains("<Title>Default style</Title>"));
    assert!(xml.contains(r#"<Style current="1">"#));
    // Style title falls back to its name
    assert!(xml.contains("<Title>highlight</Title>"));
    assert!(xml.contains("<Abstract>Emphasised features</Abstract>"));
    assert!(xml.contains(r#"<LegendURL width="20" height="20" format="image/png">"#));
    assert!(xml.contains("request=GetLegendGraphic&amp;layer=rivers"));
}

#[test]
fn test_dimensions_are_split_by_source() {
    let mut layer = capabilities_layer("rivers");
    layer.dimensions = vec![sourced_elevation(), Dimension::Values(time_dimension())];
    let xml = export(&map_config(vec![layer]));

    assert!(xml.contains(
        r#"<Dimension name="time" units="ISO8601" default="2024-01-01T00:00:00Z" multipleValues="1">2024-01-01T00:00:00Z,2024-02-01T00:00:00Z</Dimension>"#
    ));
    // Capabilities values back the sourced elevation
    assert!(xml.contains(
        r#"<Dimension name="elevation" units="EPSG:5030" unitSymbol="m" multipleValues="1">0,100</Dimension>"#
    ));
    assert_eq!(xml.matches(r#"<Dimension name="time""#).count(), 1);
    assert!(xml.contains(&format!(
        r#"<ms:Dimension name="elevation" type="multidim-extension" xlink:href="{}"/>"#,
        urls::MULTIDIM
    )));
}

#[test]
fn test_capabilities_dimensions_without_source_are_not_written() {
    let xml = export(&map_config(vec![capabilities_layer("rivers")]));
    assert!(!xml.contains("DimensionList"));
}

#[test]
fn test_config_is_not_modified() {
    let config = map_config(vec![capabilities_layer("rivers"), Layer::empty_background()]);
    let before = config.clone();
    let _ = export(&config);
    assert_eq!(config, before);
}
