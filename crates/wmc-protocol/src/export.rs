//! Map configuration to WMC 1.1.0 document.
//!
//! Builds a tag descriptor tree that mirrors what [`crate::parse`] reads,
//! then writes it with every namespace declared once on `ViewContext`.

use tracing::{debug, warn};

use projection::{MercatorReprojector, Reprojector};
use wmc_common::{
    BoundingBox, CapabilityStyle, CatalogServices, Center, Dimension, DimensionValues, Group,
    Layer, LayerType, MapConfig, MapSettings, SearchService, DEFAULT_GROUP,
};

use crate::namespaces::{self, SCHEMA_LOCATION};
use crate::xml::{
    attributes_from_pairs, remove_empty_nodes, write_xml, AttributeDescriptor, TagDescriptor,
    WriteOptions,
};

/// WMC version written on `ViewContext`.
pub const WMC_VERSION: &str = "1.1.0";

/// WMS version written on every `Server`.
const WMS_VERSION: &str = "1.3.0";

/// Free-form context metadata that is not part of the map configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMetadata {
    pub title: String,
    pub abstract_text: Option<String>,
}

impl ContextMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            abstract_text: None,
        }
    }
}

/// Write a map configuration as a WMC document.
///
/// Only `wms` layers are written. The configuration is not modified.
pub fn to_wmc(config: &MapConfig, context: &ContextMetadata, options: &WriteOptions) -> String {
    to_wmc_with(config, context, options, &MercatorReprojector)
}

/// [`to_wmc`] with a caller-supplied reprojector for the view bounding box.
pub fn to_wmc_with(
    config: &MapConfig,
    context: &ContextMetadata,
    options: &WriteOptions,
    reprojector: &dyn Reprojector,
) -> String {
    let tree = view_context(config, context, reprojector);
    write_xml(&remove_empty_nodes(tree), &namespaces::all(), options)
}

fn view_context(
    config: &MapConfig,
    context: &ContextMetadata,
    reprojector: &dyn Reprojector,
) -> TagDescriptor {
    TagDescriptor::new("ViewContext")
        .with_ns(namespaces::root())
        .with_attribute(AttributeDescriptor::new("version", WMC_VERSION))
        .with_attribute(
            AttributeDescriptor::new("schemaLocation", SCHEMA_LOCATION).with_ns(namespaces::xsi()),
        )
        .with_child(general(&config.map, config.catalog_services.as_ref(), context, reprojector))
        .with_child(layer_list(&config.map.layers))
}

fn general(
    map: &MapSettings,
    catalog: Option<&CatalogServices>,
    context: &ContextMetadata,
    reprojector: &dyn Reprojector,
) -> TagDescriptor {
    let bounds = view_bounds(map, reprojector);

    let extension = TagDescriptor::new("Extension").with_children([
        Some(
            TagDescriptor::new("maxExtent")
                .with_ns(namespaces::ol())
                .with_attributes(extent_attributes(&BoundingBox::from_extent(map.max_extent))),
        ),
        (!map.groups.is_empty()).then(|| group_list(&map.groups)),
        catalog.map(catalog_services),
        map.center.as_ref().map(center),
        map.zoom
            .filter(|zoom| *zoom != 0.0 && zoom.is_finite())
            .map(|zoom| ms_text("zoom", number_text(zoom))),
    ]);

    TagDescriptor::new("General").with_children([
        Some(
            TagDescriptor::new("BoundingBox")
                .with_attribute(AttributeDescriptor::new("SRS", map.projection.as_str()))
                .with_attributes(extent_attributes(&bounds)),
        ),
        Some(TagDescriptor::new("Title").with_text(context.title.as_str())),
        context
            .abstract_text
            .as_ref()
            .map(|text| TagDescriptor::new("Abstract").with_text(text.as_str())),
        Some(extension),
    ])
}

/// The view bbox in the map projection, or the max extent when there is none.
fn view_bounds(map: &MapSettings, reprojector: &dyn Reprojector) -> BoundingBox {
    if let Some(bbox) = map.bbox.as_ref().filter(|bbox| bbox.is_valid()) {
        match reprojector.reproject_bbox(&bbox.bounds, &bbox.crs, &map.projection) {
            Ok(bounds) => return bounds,
            Err(e) => warn!(error = %e, "Using max extent as context bounding box"),
        }
    }
    BoundingBox::from_extent(map.max_extent)
}

fn group_list(groups: &[Group]) -> TagDescriptor {
    TagDescriptor::new("GroupList")
        .with_ns(namespaces::ms())
        .with_children(groups.iter().map(|group| {
            Some(
                TagDescriptor::new("Group")
                    .with_ns(namespaces::ms())
                    .with_attributes(attributes_from_pairs([
                        ("id", Some(group.id.clone())),
                        ("title", Some(group.title.clone())),
                        ("expanded", Some(group.expanded.to_string())),
                    ])),
            )
        }))
}

fn catalog_services(catalog: &CatalogServices) -> TagDescriptor {
    let services = catalog.services.iter().map(|(name, attributes)| {
        Some(
            TagDescriptor::new("Service")
                .with_ns(namespaces::ms())
                .with_attribute(AttributeDescriptor::new("serviceName", name.as_str()))
                .with_children(attributes.iter().map(|(key, value)| {
                    // Nulls carry no type and are left out
                    value.to_text().map(|text| {
                        TagDescriptor::new("Attribute")
                            .with_ns(namespaces::ms())
                            .with_attributes(attributes_from_pairs([
                                ("name", Some(key.clone())),
                                ("type", Some(value.type_name().to_string())),
                            ]))
                            .with_text(text)
                    })
                })),
        )
    });

    TagDescriptor::new("CatalogServices")
        .with_ns(namespaces::ms())
        .with_attributes(attributes_from_pairs([(
            "selectedService",
            Some(catalog.selected_service.clone()).filter(|s| !s.is_empty()),
        )]))
        .with_children(services)
}

fn center(center: &Center) -> TagDescriptor {
    TagDescriptor::new("center")
        .with_ns(namespaces::ms())
        .with_attributes(attributes_from_pairs([
            ("x", Some(number_text(center.x))),
            ("y", Some(number_text(center.y))),
            ("crs", Some(center.crs.clone())),
        ]))
}

fn layer_list(layers: &[Layer]) -> TagDescriptor {
    let wms_layers: Vec<&Layer> = layers
        .iter()
        .filter(|layer| layer.layer_type == LayerType::Wms)
        .collect();
    debug!(
        total = layers.len(),
        written = wms_layers.len(),
        "Writing WMC layer list"
    );

    TagDescriptor::new("LayerList").with_children(wms_layers.into_iter().map(layer))
}

fn layer(layer: &Layer) -> Option<TagDescriptor> {
    let capabilities = layer.capabilities.as_ref();
    let Some(url) = layer
        .url
        .clone()
        .or_else(|| capabilities.and_then(|c| c.online_resource.clone()))
    else {
        warn!(layer = ?layer.name, "Skipping WMS layer without a server URL");
        return None;
    };

    let (sourced, inline): (Vec<&Dimension>, Vec<&Dimension>) =
        layer.dimensions.iter().partition(|dimension| dimension.is_sourced());

    let mut root_dimensions: Vec<&DimensionValues> = inline
        .iter()
        .filter_map(|dimension| match dimension {
            Dimension::Values(values) => Some(values),
            Dimension::Sourced(_) => None,
        })
        .collect();
    // Capabilities values back the dimensions an external source resolves
    let declared_dimensions = capabilities
        .map(|c| c.dimensions.as_slice())
        .unwrap_or_default();
    for declared in declared_dimensions {
        let backs_source = sourced.iter().any(|d| d.name() == declared.name);
        if backs_source && !root_dimensions.iter().any(|d| d.name == declared.name) {
            root_dimensions.push(declared);
        }
    }

    Some(
        TagDescriptor::new("Layer")
            .with_attributes(attributes_from_pairs([
                ("queryable", Some(flag_text(layer.queryable.unwrap_or(false)))),
                ("hidden", Some(flag_text(!layer.visibility))),
            ]))
            .with_children([
                Some(server(&layer.layer_type, &url)),
                layer.name.as_deref().map(|name| TagDescriptor::new("Name").with_text(name)),
                layer.title.as_deref().map(|title| TagDescriptor::new("Title").with_text(title)),
                (!root_dimensions.is_empty()).then(|| dimension_list(&root_dimensions)),
                format_list(layer),
                style_list(layer),
                Some(layer_extension(layer, &sourced)),
            ]),
    )
}

fn server(layer_type: &LayerType, url: &str) -> TagDescriptor {
    TagDescriptor::new("Server")
        .with_attributes(attributes_from_pairs([
            ("service", layer_type_to_service(layer_type).map(String::from)),
            ("version", Some(WMS_VERSION.to_string())),
        ]))
        .with_child(online_resource(url))
}

fn online_resource(url: &str) -> TagDescriptor {
    TagDescriptor::new("OnlineResource")
        .with_attribute(AttributeDescriptor::new("type", "simple").with_ns(namespaces::xlink()))
        .with_attribute(AttributeDescriptor::new("href", url).with_ns(namespaces::xlink()))
}

fn layer_type_to_service(layer_type: &LayerType) -> Option<&'static str> {
    match layer_type {
        LayerType::Wms => Some("OGC:WMS"),
        _ => None,
    }
}

fn dimension_list(dimensions: &[&DimensionValues]) -> TagDescriptor {
    TagDescriptor::new("DimensionList").with_children(dimensions.iter().map(|dimension| {
        Some(
            TagDescriptor::new("Dimension")
                .with_attributes(attributes_from_pairs([
                    ("name", Some(dimension.name.clone())),
                    ("units", dimension.units.clone()),
                    ("unitSymbol", dimension.unit_symbol.clone()),
                    ("default", dimension.default.clone()),
                    ("multipleValues", (dimension.values.len() > 1).then(|| "1".to_string())),
                ]))
                .with_text(dimension.values.join(",")),
        )
    }))
}

/// Formats advertised by the capabilities, or just the layer's own format.
fn format_list(layer: &Layer) -> Option<TagDescriptor> {
    let mut formats: Vec<&str> = layer
        .capabilities
        .iter()
        .flat_map(|c| c.formats.iter().map(String::as_str))
        .collect();
    if let Some(current) = layer.format.as_deref() {
        if !formats.contains(&current) {
            formats.push(current);
        }
    }
    if formats.is_empty() {
        return None;
    }

    Some(TagDescriptor::new("FormatList").with_children(formats.into_iter().map(|format| {
        Some(
            TagDescriptor::new("Format")
                .with_attributes(attributes_from_pairs([(
                    "current",
                    (layer.format.as_deref() == Some(format)).then(|| "1".to_string()),
                )]))
                .with_text(format),
        )
    })))
}

/// Styles advertised by the capabilities, or just the layer's own style.
fn style_list(layer: &Layer) -> Option<TagDescriptor> {
    let mut styles: Vec<CapabilityStyle> = layer
        .capabilities
        .iter()
        .flat_map(|c| c.styles.iter().cloned())
        .collect();
    if let Some(current) = layer.style.as_deref() {
        if !styles.iter().any(|style| style.name == current) {
            styles.push(CapabilityStyle {
                name: current.to_string(),
                ..Default::default()
            });
        }
    }
    if styles.is_empty() {
        return None;
    }

    Some(TagDescriptor::new("StyleList").with_children(styles.iter().map(|style| {
        let legend = style.legend_url.as_ref().map(|legend| {
            TagDescriptor::new("LegendURL")
                .with_attributes(attributes_from_pairs([
                    ("width", legend.width.map(|w| w.to_string())),
                    ("height", legend.height.map(|h| h.to_string())),
                    ("format", legend.format.clone()),
                ]))
                .with_child(online_resource(&legend.online_resource))
        });
        Some(
            TagDescriptor::new("Style")
                .with_attributes(attributes_from_pairs([(
                    "current",
                    (layer.style.as_deref() == Some(style.name.as_str())).then(|| "1".to_string()),
                )]))
                .with_children([
                    Some(TagDescriptor::new("Name").with_text(style.name.as_str())),
                    Some(
                        TagDescriptor::new("Title")
                            .with_text(style.title.as_deref().unwrap_or(&style.name)),
                    ),
                    style
                        .abstract_text
                        .as_deref()
                        .map(|text| TagDescriptor::new("Abstract").with_text(text)),
                    legend,
                ]),
        )
    })))
}

fn layer_extension(layer: &Layer, sourced: &[&Dimension]) -> TagDescriptor {
    TagDescriptor::new("Extension").with_children([
        // OpenLayers
        layer
            .bbox
            .as_ref()
            .filter(|bbox| bbox.bounds.is_finite())
            .map(|bbox| {
                TagDescriptor::new("maxExtent")
                    .with_ns(namespaces::ol())
                    .with_attributes(extent_attributes(&bbox.bounds))
            }),
        layer.tile_size.map(|size| {
            TagDescriptor::new("tileSize")
                .with_ns(namespaces::ol())
                .with_attributes(attributes_from_pairs([
                    ("width", Some(size.width.to_string())),
                    ("height", Some(size.height.to_string())),
                ]))
        }),
        Some(ol_text("singleTile", layer.single_tile.unwrap_or(false).to_string())),
        Some(ol_text("transparent", layer.transparent.unwrap_or(true).to_string())),
        Some(ol_text("isBaseLayer", layer.is_background().to_string())),
        Some(ol_text("opacity", number_text(layer.opacity.unwrap_or(1.0)))),
        // MapStore
        Some(ms_text("group", layer.group.as_deref().unwrap_or(DEFAULT_GROUP))),
        layer.search.as_ref().map(search),
        layer
            .layer_filter
            .as_ref()
            .map(|filter| ms_text("filter", filter.to_string())),
        (!sourced.is_empty()).then(|| sourced_dimension_list(sourced)),
    ])
}

fn search(search: &SearchService) -> TagDescriptor {
    TagDescriptor::new("search")
        .with_ns(namespaces::ms())
        .with_attributes([
            search.url.as_ref().map(|url| {
                AttributeDescriptor::new("href", url.as_str()).with_ns(namespaces::xlink())
            }),
            search
                .service_type
                .as_ref()
                .map(|kind| AttributeDescriptor::new("type", kind.as_str())),
        ])
}

fn sourced_dimension_list(dimensions: &[&Dimension]) -> TagDescriptor {
    TagDescriptor::new("DimensionList")
        .with_ns(namespaces::ms())
        .with_children(dimensions.iter().map(|dimension| {
            let Dimension::Sourced(dimension) = dimension else {
                return None;
            };
            Some(
                TagDescriptor::new("Dimension")
                    .with_ns(namespaces::ms())
                    .with_attributes([
                        Some(AttributeDescriptor::new("name", dimension.name.as_str())),
                        dimension
                            .source
                            .source_type
                            .as_ref()
                            .map(|kind| AttributeDescriptor::new("type", kind.as_str())),
                        dimension.source.url.as_ref().map(|url| {
                            AttributeDescriptor::new("href", url.as_str())
                                .with_ns(namespaces::xlink())
                        }),
                    ]),
            )
        }))
}

fn extent_attributes(bounds: &BoundingBox) -> Vec<Option<AttributeDescriptor>> {
    attributes_from_pairs([
        ("minx", Some(number_text(bounds.minx))),
        ("miny", Some(number_text(bounds.miny))),
        ("maxx", Some(number_text(bounds.maxx))),
        ("maxy", Some(number_text(bounds.maxy))),
    ])
}

fn ol_text(name: &str, text: impl Into<String>) -> TagDescriptor {
    TagDescriptor::new(name).with_ns(namespaces::ol()).with_text(text)
}

fn ms_text(name: &str, text: impl Into<String>) -> TagDescriptor {
    TagDescriptor::new(name).with_ns(namespaces::ms()).with_text(text)
}

/// `1`/`0` flag used by core WMC attributes.
fn flag_text(value: bool) -> String {
    let flag = if value { "1" } else { "0" };
    flag.to_string()
}

/// Shortest text that reads back as the same number.
fn number_text(value: f64) -> String {
    value.to_string()
}
