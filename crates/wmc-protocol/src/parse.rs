//! WMC document to map configuration.
//!
//! Only two conditions are fatal: XML that is not well-formed, and a
//! document that is not a `ViewContext` with a `version`. Everything below
//! that degrades to defaults or is left out, so partial and hand-edited
//! contexts still load.

use std::collections::BTreeMap;

use tracing::{debug, warn};
use uuid::Uuid;

use wmc_common::{
    AttrValue, BoundingBox, CatalogServices, Center, Dimension, DimensionSource, DimensionValues,
    Group, Layer, LayerBbox, LayerType, MapConfig, MapSettings, SearchService, SourcedDimension,
    TileSize, WmcError, WmcResult, BACKGROUND_GROUP, DEFAULT_GROUP, DEFAULT_MAX_EXTENT,
    DEFAULT_PROJECTION, MAP_CONFIG_VERSION,
};

use crate::namespaces::{MS, OL, ROOT, XLINK};
use crate::xml::{
    char_content, extract_attribute_value, extract_tag, extract_tags, parse_document,
    pick_attribute_values, AttrSpec, XmlElement,
};

const EXTENT_ATTRS: [AttrSpec<'static>; 4] = [
    AttrSpec::Plain("minx"),
    AttrSpec::Plain("miny"),
    AttrSpec::Plain("maxx"),
    AttrSpec::Plain("maxy"),
];

/// Options for [`to_map_config`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Put every layer without a group of its own into one generated group
    /// titled after the context.
    pub generate_layers_group: bool,
}

/// Parse a WMC document into a fresh map configuration.
///
/// Layer ids are generated on every call and never read from the document.
pub fn to_map_config(wmc: &str, options: &ParseOptions) -> WmcResult<MapConfig> {
    let document = parse_document(wmc)?;

    if !document.is(ROOT, "ViewContext") {
        return Err(WmcError::NotAWmcDocument(
            "missing ViewContext root element".to_string(),
        ));
    }
    let view_context = Some(&document);
    if extract_attribute_value(None, view_context, "version").is_none() {
        return Err(WmcError::NotAWmcDocument(
            "ViewContext has no version attribute".to_string(),
        ));
    }

    let general = extract_tag(ROOT, view_context, "General");
    let layer_list = extract_tag(ROOT, view_context, "LayerList");
    let context_title = char_content(extract_tag(ROOT, general, "Title"));
    let extension = extract_tag(ROOT, general, "Extension");

    let bounding_box = extract_tag(ROOT, general, "BoundingBox");
    let bbox_bounds = extent_from(&pick_attribute_values(bounding_box, &EXTENT_ATTRS));
    let srs = extract_attribute_value(None, bounding_box, "SRS");

    // The OpenLayers extension wins over the plain bounding box
    let max_extent = extent_from(&pick_attribute_values(
        extract_tag(OL, extension, "maxExtent"),
        &EXTENT_ATTRS,
    ))
    .or(bbox_bounds)
    .map(|bounds| bounds.to_extent())
    .unwrap_or(DEFAULT_MAX_EXTENT);
    let projection = srs.unwrap_or(DEFAULT_PROJECTION).to_string();
    let bbox = bbox_bounds
        .zip(srs)
        .map(|(bounds, crs)| LayerBbox::new(bounds, crs));

    let layer_group = options.generate_layers_group.then(generate_id);
    let layers = order_layers(
        extract_tags(ROOT, layer_list, "Layer")
            .into_iter()
            .map(|layer| parse_layer(layer, &projection, layer_group.as_deref()))
            .collect(),
    );

    let groups = match extract_tag(MS, extension, "GroupList") {
        Some(group_list) => parse_group_list(group_list),
        None => synthesize_groups(&layers, layer_group.as_deref(), context_title),
    };

    let center = parse_center(extract_tag(MS, extension, "center"));
    let zoom = parse_float(char_content(extract_tag(MS, extension, "zoom")));
    let catalog_services =
        extract_tag(MS, extension, "CatalogServices").map(parse_catalog_services);

    debug!(
        layers = layers.len(),
        groups = groups.len(),
        projection = %projection,
        "Parsed WMC document"
    );

    Ok(MapConfig {
        version: MAP_CONFIG_VERSION,
        map: MapSettings {
            max_extent,
            // A zoom level supersedes the bounding box as the initial view
            bbox: if zoom.is_none() { bbox } else { None },
            projection,
            backgrounds: Vec::new(),
            groups,
            layers,
            center,
            zoom,
        },
        catalog_services,
    })
}

fn parse_layer(layer: &XmlElement, projection: &str, layer_group: Option<&str>) -> Layer {
    let layer = Some(layer);
    let extension = extract_tag(ROOT, layer, "Extension");
    let server = extract_tag(ROOT, layer, "Server");

    let current_format = extract_tags(ROOT, extract_tag(ROOT, layer, "FormatList"), "Format")
        .into_iter()
        .find(|format| is_current(format));
    let current_style = extract_tags(ROOT, extract_tag(ROOT, layer, "StyleList"), "Style")
        .into_iter()
        .find(|style| is_current(style));

    // OpenLayers extension
    let ol_extent = extent_from(&pick_attribute_values(
        extract_tag(OL, extension, "maxExtent"),
        &EXTENT_ATTRS,
    ));
    let tile_size = parse_tile_size(extract_tag(OL, extension, "tileSize"));
    let transparent = char_content(extract_tag(OL, extension, "transparent"))
        .map(|value| parse_boolean(Some(value)));
    let is_base_layer = parse_boolean(char_content(extract_tag(OL, extension, "isBaseLayer")));
    let single_tile = parse_boolean(char_content(extract_tag(OL, extension, "singleTile")));
    let opacity = parse_float(char_content(extract_tag(OL, extension, "opacity")));

    // MapStore extension
    let ms_group = char_content(extract_tag(MS, extension, "group"));
    let search = extract_tag(MS, extension, "search").map(|search| SearchService {
        url: extract_attribute_value(Some(XLINK), Some(search), "href").map(String::from),
        service_type: extract_attribute_value(None, Some(search), "type").map(String::from),
    });
    let layer_filter = char_content(extract_tag(MS, extension, "filter")).and_then(parse_filter);

    let sourced_dimensions = extract_tags(MS, extract_tag(MS, extension, "DimensionList"), "Dimension")
        .into_iter()
        .filter_map(parse_sourced_dimension);
    let root_dimensions = extract_tags(ROOT, extract_tag(ROOT, layer, "DimensionList"), "Dimension")
        .into_iter()
        .filter_map(parse_dimension);

    let group = ms_group
        .map(String::from)
        .or_else(|| is_base_layer.then(|| BACKGROUND_GROUP.to_string()))
        .or_else(|| layer_group.map(String::from));

    Layer {
        id: generate_id(),
        visibility: !parse_boolean(extract_attribute_value(None, layer, "hidden")),
        layer_type: service_to_layer_type(extract_attribute_value(None, server, "service")),
        url: extract_attribute_value(Some(XLINK), extract_tag(ROOT, server, "OnlineResource"), "href")
            .map(String::from),
        name: char_content(extract_tag(ROOT, layer, "Name")).map(String::from),
        title: char_content(extract_tag(ROOT, layer, "Title")).map(String::from),
        format: char_content(current_format).map(String::from),
        style: char_content(extract_tag(ROOT, current_style, "Name")).map(String::from),
        single_tile: Some(single_tile),
        queryable: Some(parse_boolean(extract_attribute_value(None, layer, "queryable"))),
        bbox: ol_extent.map(|bounds| LayerBbox::new(bounds, projection)),
        group,
        opacity,
        transparent,
        tile_size,
        search,
        layer_filter,
        dimensions: merge_dimensions(sourced_dimensions.chain(root_dimensions)),
        source: None,
        capabilities: None,
    }
}

/// Keep the first dimension of each name; sourced ones come first.
fn merge_dimensions(dimensions: impl Iterator<Item = Dimension>) -> Vec<Dimension> {
    let mut merged: Vec<Dimension> = Vec::new();
    for dimension in dimensions {
        if !merged.iter().any(|known| known.name() == dimension.name()) {
            merged.push(dimension);
        }
    }
    merged
}

fn parse_sourced_dimension(tag: &XmlElement) -> Option<Dimension> {
    let tag = Some(tag);
    Some(Dimension::Sourced(SourcedDimension {
        name: extract_attribute_value(None, tag, "name")?.to_string(),
        source: DimensionSource {
            source_type: extract_attribute_value(None, tag, "type").map(String::from),
            url: extract_attribute_value(Some(XLINK), tag, "href").map(String::from),
        },
    }))
}

fn parse_dimension(tag: &XmlElement) -> Option<Dimension> {
    let attribute = |name: &str| extract_attribute_value(None, Some(tag), name).map(String::from);
    Some(Dimension::Values(DimensionValues {
        name: attribute("name")?,
        units: attribute("units"),
        unit_symbol: attribute("unitSymbol"),
        default: attribute("default"),
        values: tag
            .text()
            .map(|text| text.split(',').map(String::from).collect())
            .unwrap_or_default(),
    }))
}

/// Backgrounds first, then everything else, each in document order.
///
/// Without a visible background the empty placeholder goes in front.
fn order_layers(layers: Vec<Layer>) -> Vec<Layer> {
    let (backgrounds, others): (Vec<Layer>, Vec<Layer>) =
        layers.into_iter().partition(Layer::is_background);
    let placeholder = (!backgrounds.iter().any(|layer| layer.visibility)).then(Layer::empty_background);

    placeholder
        .into_iter()
        .chain(backgrounds)
        .chain(others)
        .collect()
}

fn parse_group_list(group_list: &XmlElement) -> Vec<Group> {
    extract_tags(MS, Some(group_list), "Group")
        .into_iter()
        .map(|group| {
            let group = Some(group);
            Group::new(
                extract_attribute_value(None, group, "id").unwrap_or_default(),
                extract_attribute_value(None, group, "title").unwrap_or_default(),
                parse_boolean(extract_attribute_value(None, group, "expanded")),
            )
        })
        .collect()
}

fn synthesize_groups(layers: &[Layer], layer_group: Option<&str>, context_title: Option<&str>) -> Vec<Group> {
    let mut groups = Vec::new();
    if layers.iter().any(Layer::is_in_default_group) {
        groups.push(Group::new(DEFAULT_GROUP, DEFAULT_GROUP, true));
    }
    if let Some(id) = layer_group {
        groups.push(Group::new(id, context_title.unwrap_or(id), true));
    }
    groups
}

fn parse_center(tag: Option<&XmlElement>) -> Option<Center> {
    let attributes = pick_attribute_values(tag, &["x".into(), "y".into(), "crs".into()]);
    Some(Center {
        x: parse_float(attributes.get("x").map(String::as_str))?,
        y: parse_float(attributes.get("y").map(String::as_str))?,
        crs: attributes.get("crs")?.clone(),
    })
}

fn parse_catalog_services(tag: &XmlElement) -> CatalogServices {
    let services = extract_tags(MS, Some(tag), "Service")
        .into_iter()
        .filter_map(|service| {
            let name = extract_attribute_value(None, Some(service), "serviceName")?;
            let attributes: BTreeMap<String, AttrValue> = extract_tags(MS, Some(service), "Attribute")
                .into_iter()
                .filter_map(|attribute| {
                    let key = extract_attribute_value(None, Some(attribute), "name")?;
                    let kind = extract_attribute_value(None, Some(attribute), "type");
                    let value = AttrValue::parse_typed(kind, attribute.text().unwrap_or_default());
                    if value.is_none() {
                        warn!(service = %name, attribute = %key, "Dropping catalog attribute with malformed JSON");
                    }
                    Some((key.to_string(), value?))
                })
                .collect();
            Some((name.to_string(), attributes))
        })
        .collect();

    CatalogServices {
        selected_service: extract_attribute_value(None, Some(tag), "selectedService")
            .unwrap_or_default()
            .to_string(),
        services,
    }
}

fn parse_tile_size(tag: Option<&XmlElement>) -> Option<TileSize> {
    let attributes = pick_attribute_values(tag, &["width".into(), "height".into()]);
    Some(TileSize {
        width: attributes.get("width")?.trim().parse().ok()?,
        height: attributes.get("height")?.trim().parse().ok()?,
    })
}

fn parse_filter(text: &str) -> Option<serde_json::Value> {
    match serde_json::from_str(text) {
        Ok(filter) => Some(filter),
        Err(e) => {
            warn!(error = %e, "Ignoring layer filter that is not valid JSON");
            None
        }
    }
}

fn is_current(tag: &XmlElement) -> bool {
    parse_boolean(extract_attribute_value(None, Some(tag), "current"))
}

/// All four bounds present and numeric.
fn extent_from(attributes: &BTreeMap<String, String>) -> Option<BoundingBox> {
    let bound = |name: &str| parse_float(attributes.get(name).map(String::as_str));
    Some(BoundingBox::new(
        bound("minx")?,
        bound("miny")?,
        bound("maxx")?,
        bound("maxy")?,
    ))
}

fn service_to_layer_type(service: Option<&str>) -> LayerType {
    // WMC only describes WMS layers
    if let Some(other) = service.filter(|s| *s != "OGC:WMS") {
        debug!(service = %other, "Reading unknown WMC service as WMS");
    }
    LayerType::Wms
}

/// `true` and `1` in any case are true; anything else, or nothing, is false.
pub fn parse_boolean(value: Option<&str>) -> bool {
    value
        .map(|v| {
            let v = v.trim();
            v.eq_ignore_ascii_case("true") || v == "1"
        })
        .unwrap_or(false)
}

/// A finite number, or None.
pub fn parse_float(value: Option<&str>) -> Option<f64> {
    value?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
