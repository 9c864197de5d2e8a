//! Common test fixtures for WMC tests.
//!
//! This module provides sample documents that cover the common shapes of
//! contexts written by MapStore, by other WMC clients, and by hand.

/// Common CRS identifiers.
pub mod crs {
    /// WGS84 geographic
    pub const EPSG_4326: &str = "EPSG:4326";

    /// Web Mercator
    pub const EPSG_3857: &str = "EPSG:3857";

    /// Legacy Google Mercator code, the default map projection
    pub const EPSG_900913: &str = "EPSG:900913";
}

/// Common server endpoints.
pub mod urls {
    pub const GEOSERVER_WMS: &str = "https://demo.geo-solutions.it/geoserver/wms";
    pub const CSW: &str = "https://demo.geo-solutions.it/geoserver/csw";
    pub const MULTIDIM: &str = "https://demo.geo-solutions.it/geoserver/gwc/service/wmts";
}

/// Sample WMC documents.
pub mod wmc {
    /// A MapStore context using every supported extension.
    ///
    /// One visible background, one grouped overlay with dimensions, a
    /// filter, a search service and explicit opacity, and a hidden
    /// overlay in the `Default` group.
    pub const MAPSTORE_CONTEXT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ViewContext xmlns="http://www.opengis.net/context" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:ol="http://openlayers.org/context" xmlns:ms="http://geo-solutions.it/mapstore/context" version="1.1.0" xsi:schemaLocation="http://www.opengis.net/context http://schemas.opengis.net/context/1.1.0/context.xsd">
  <General>
    <BoundingBox SRS="EPSG:3857" minx="-1000" miny="-2000" maxx="1000" maxy="2000"/>
    <Title>Regional overview</Title>
    <Abstract>Shared map</Abstract>
    <Extension>
      <ol:maxExtent minx="-20037508.34" miny="-20037508.34" maxx="20037508.34" maxy="20037508.34"/>
      <ms:GroupList>
        <ms:Group id="Default" title="Default" expanded="true"/>
        <ms:Group id="hydro" title="Hydrography" expanded="false"/>
      </ms:GroupList>
      <ms:CatalogServices selectedService="gs_csw">
        <ms:Service serviceName="gs_csw">
          <ms:Attribute name="url" type="string">https://demo.geo-solutions.it/geoserver/csw</ms:Attribute>
          <ms:Attribute name="type" type="string">csw</ms:Attribute>
          <ms:Attribute name="autoload" type="boolean">true</ms:Attribute>
          <ms:Attribute name="pageSize" type="number">12</ms:Attribute>
          <ms:Attribute name="filter" type="object">{"staticFilter":"type = dataset"}</ms:Attribute>
        </ms:Service>
      </ms:CatalogServices>
      <ms:center x="11.25" y="43.5" crs="EPSG:4326"/>
      <ms:zoom>6</ms:zoom>
    </Extension>
  </General>
  <LayerList>
    <Layer queryable="0" hidden="0">
      <Server service="OGC:WMS" version="1.3.0">
        <OnlineResource xlink:type="simple" xlink:href="https://demo.geo-solutions.it/geoserver/wms"/>
      </Server>
      <Name>ne:NE1_HR_LC_SR_W_DR</Name>
      <Title>Natural Earth</Title>
      <FormatList>
        <Format current="1">image/jpeg</Format>
      </FormatList>
      <Extension>
        <ol:singleTile>false</ol:singleTile>
        <ol:transparent>false</ol:transparent>
        <ol:isBaseLayer>true</ol:isBaseLayer>
        <ol:opacity>1</ol:opacity>
      </Extension>
    </Layer>
    <Layer queryable="1" hidden="0">
      <Server service="OGC:WMS" version="1.3.0">
        <OnlineResource xlink:type="simple" xlink:href="https://demo.geo-solutions.it/geoserver/wms"/>
      </Server>
      <Name>hydro:rivers</Name>
      <Title>Rivers</Title>
      <DimensionList>
        <Dimension name="time" units="ISO8601" default="2024-01-01T00:00:00Z" multipleValues="1">2024-01-01T00:00:00Z,2024-02-01T00:00:00Z</Dimension>
        <Dimension name="elevation" units="EPSG:5030" unitSymbol="m">0,100,200</Dimension>
      </DimensionList>
      <FormatList>
        <Format>image/jpeg</Format>
        <Format current="1">image/png</Format>
      </FormatList>
      <StyleList>
        <Style>
          <Name>plain</Name>
          <Title>Plain</Title>
        </Style>
        <Style current="1">
          <Name>rivers_blue</Name>
          <Title>Blue rivers</Title>
        </Style>
      </StyleList>
      <Extension>
        <ol:maxExtent minx="0" miny="0" maxx="500000" maxy="600000"/>
        <ol:tileSize width="512" height="512"/>
        <ol:singleTile>true</ol:singleTile>
        <ol:transparent>true</ol:transparent>
        <ol:isBaseLayer>false</ol:isBaseLayer>
        <ol:opacity>0.75</ol:opacity>
        <ms:group>hydro</ms:group>
        <ms:search xlink:href="https://demo.geo-solutions.it/geoserver/wfs" type="wfs"/>
        <ms:filter>{"groupFields":[{"id":1,"logic":"OR"}],"filterFields":[]}</ms:filter>
        <ms:DimensionList>
          <ms:Dimension name="elevation" type="multidim-extension" xlink:href="https://demo.geo-solutions.it/geoserver/gwc/service/wmts"/>
        </ms:DimensionList>
      </Extension>
    </Layer>
    <Layer queryable="true" hidden="1">
      <Server service="OGC:WMS" version="1.3.0">
        <OnlineResource xlink:type="simple" xlink:href="https://demo.geo-solutions.it/geoserver/wms"/>
      </Server>
      <Name>roads</Name>
      <Title>Roads</Title>
      <Extension>
        <ol:transparent>true</ol:transparent>
        <ol:opacity>0.5</ol:opacity>
        <ms:group>Default</ms:group>
      </Extension>
    </Layer>
  </LayerList>
</ViewContext>"#;

    /// A plain WMC 1.1.0 context as written by a non-MapStore client.
    ///
    /// No extensions at all, no background layer, SRS in geographic degrees.
    pub const PLAIN_CONTEXT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ViewContext xmlns="http://www.opengis.net/context" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.1.0" id="plain">
  <General>
    <Window width="800" height="600"/>
    <BoundingBox SRS="EPSG:4326" minx="-10" miny="35" maxx="30" maxy="60"/>
    <Title>Plain context</Title>
  </General>
  <LayerList>
    <Layer queryable="1" hidden="0">
      <Server service="OGC:WMS" version="1.1.1">
        <OnlineResource xlink:type="simple" xlink:href="http://example.com/wms?"/>
      </Server>
      <Name>countries</Name>
      <Title>Countries</Title>
      <FormatList>
        <Format current="1">image/png</Format>
      </FormatList>
    </Layer>
    <Layer queryable="0">
      <Server service="OGC:WMS" version="1.1.1">
        <OnlineResource xlink:type="simple" xlink:href="http://example.com/wms?"/>
      </Server>
      <Name>cities</Name>
      <Title>Cities</Title>
    </Layer>
  </LayerList>
</ViewContext>"#;

    /// A context with neither a bounding box nor an OpenLayers max extent.
    pub const NO_EXTENT_CONTEXT: &str = r#"<ViewContext xmlns="http://www.opengis.net/context" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.1.0">
  <General>
    <Title>No extent</Title>
  </General>
  <LayerList>
    <Layer>
      <Server service="OGC:WMS">
        <OnlineResource xlink:href="http://example.com/wms"/>
      </Server>
      <Name>first</Name>
    </Layer>
  </LayerList>
</ViewContext>"#;

    /// Upper-case boolean markers, and a background that is hidden.
    pub const UPPERCASE_FLAGS_CONTEXT: &str = r#"<ViewContext xmlns="http://www.opengis.net/context" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:ol="http://openlayers.org/context" version="1.1.0">
  <General>
    <Title>Flags</Title>
  </General>
  <LayerList>
    <Layer hidden="TRUE" queryable="TRUE">
      <Server service="OGC:WMS">
        <OnlineResource xlink:href="http://example.com/wms"/>
      </Server>
      <Name>base</Name>
      <Extension>
        <ol:isBaseLayer>TRUE</ol:isBaseLayer>
      </Extension>
    </Layer>
    <Layer>
      <Server service="OGC:WMS">
        <OnlineResource xlink:href="http://example.com/wms"/>
      </Server>
      <Name>overlay</Name>
    </Layer>
  </LayerList>
</ViewContext>"#;

    /// Namespace prefixes other than the usual ones.
    pub const RENAMED_PREFIXES_CONTEXT: &str = r#"<wmc:ViewContext xmlns:wmc="http://www.opengis.net/context" xmlns:xl="http://www.w3.org/1999/xlink" xmlns:mapstore="http://geo-solutions.it/mapstore/context" version="1.1.0">
  <wmc:General>
    <wmc:Title>Renamed</wmc:Title>
  </wmc:General>
  <wmc:LayerList>
    <wmc:Layer>
      <wmc:Server service="OGC:WMS">
        <wmc:OnlineResource xl:href="http://example.com/wms"/>
      </wmc:Server>
      <wmc:Name>renamed</wmc:Name>
      <wmc:Extension>
        <mapstore:group>custom</mapstore:group>
      </wmc:Extension>
    </wmc:Layer>
  </wmc:LayerList>
</wmc:ViewContext>"#;

    /// Extensions that are present but unusable, and no context title.
    ///
    /// The center lacks its CRS, the zoom is not a number and the layer
    /// filter is not JSON.
    pub const INCOMPLETE_EXTENSIONS_CONTEXT: &str = r#"<ViewContext xmlns="http://www.opengis.net/context" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:ms="http://geo-solutions.it/mapstore/context" version="1.1.0">
  <General>
    <BoundingBox SRS="EPSG:3857" minx="0" miny="0" maxx="1000" maxy="1000"/>
    <Extension>
      <ms:center x="11.25" y="43.5"/>
      <ms:zoom>far</ms:zoom>
    </Extension>
  </General>
  <LayerList>
    <Layer>
      <Server service="OGC:WMS">
        <OnlineResource xlink:href="http://example.com/wms"/>
      </Server>
      <Name>filtered</Name>
      <Extension>
        <ms:filter>{"groupFields": [</ms:filter>
      </Extension>
    </Layer>
  </LayerList>
</ViewContext>"#;

    /// A well-formed document with the wrong root element.
    pub const NOT_A_CONTEXT: &str = r#"<?xml version="1.0"?>
<WMS_Capabilities xmlns="http://www.opengis.net/wms" version="1.3.0"/>"#;

    /// A `ViewContext` without the mandatory `version` attribute.
    pub const MISSING_VERSION_CONTEXT: &str = r#"<ViewContext xmlns="http://www.opengis.net/context">
  <General><Title>No version</Title></General>
</ViewContext>"#;

    /// A `ViewContext` outside the WMC namespace.
    pub const WRONG_NAMESPACE_CONTEXT: &str =
        r#"<ViewContext xmlns="http://example.com/other" version="1.1.0"/>"#;

    /// Not well-formed XML.
    pub const MALFORMED: &str = r#"<ViewContext xmlns="http://www.opengis.net/context" version="1.1.0">
  <General>
    <Title>Broken</Title>
  </Genral>
</ViewContext>"#;
}
