use super::{
    cache_field::CacheField, cache_hierarchy::CacheHierarchy, extension::ExtensionList, list::List,
    tuple_cache::TupleCache, PivotPart, MAIN_NS, REL_NS,
};
use derive::{XmlDefault, XmlEnum, XmlRead, XmlWrite};

/// Represents the root of a pivot cache definition part.
///
/// This struct corresponds to the `CT_PivotCacheDefinition` complex type in the XML schema. It
/// describes where the cached data comes from, the fields of the cache and, for OLAP sources, the
/// hierarchies and tuples retrieved from the server.
///
/// # XML Schema Mapping
/// The struct maps to the following XML schema definition:
/// ```xml
/// <complexType name="CT_PivotCacheDefinition">
///     <sequence>
///         <element name="cacheSource" type="CT_CacheSource" minOccurs="1" maxOccurs="1"/>
///         <element name="cacheFields" type="CT_CacheFields" minOccurs="1" maxOccurs="1"/>
///         <element name="cacheHierarchies" minOccurs="0" type="CT_CacheHierarchies"/>
///         <element name="kpis" minOccurs="0" type="CT_PCDKPIs"/>
///         <element name="tupleCache" minOccurs="0" type="CT_TupleCache"/>
///         <element name="calculatedItems" minOccurs="0" type="CT_CalculatedItems"/>
///         <element name="calculatedMembers" type="CT_CalculatedMembers" minOccurs="0"/>
///         <element name="dimensions" type="CT_Dimensions" minOccurs="0"/>
///         <element name="measureGroups" type="CT_MeasureGroups" minOccurs="0"/>
///         <element name="maps" type="CT_MeasureDimensionMaps" minOccurs="0"/>
///         <element name="extLst" minOccurs="0" type="CT_ExtensionList"/>
///     </sequence>
///     <attribute ref="r:id" use="optional"/>
///     <attribute name="invalid" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="saveData" type="xsd:boolean" use="optional" default="true"/>
///     <attribute name="refreshOnLoad" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="optimizeMemory" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="enableRefresh" type="xsd:boolean" use="optional" default="true"/>
///     <attribute name="refreshedBy" type="s:ST_Xstring" use="optional"/>
///     <attribute name="refreshedDate" type="xsd:double" use="optional"/>
///     <attribute name="refreshedDateIso" type="xsd:dateTime" use="optional"/>
///     <attribute name="backgroundQuery" type="xsd:boolean" default="false"/>
///     <attribute name="missingItemsLimit" type="xsd:unsignedInt" use="optional"/>
///     <attribute name="createdVersion" type="xsd:unsignedByte" use="optional" default="0"/>
///     <attribute name="refreshedVersion" type="xsd:unsignedByte" use="optional" default="0"/>
///     <attribute name="minRefreshableVersion" type="xsd:unsignedByte" use="optional" default="0"/>
///     <attribute name="recordCount" type="xsd:unsignedInt" use="optional"/>
///     <attribute name="upgradeOnRefresh" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="tupleCache" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="supportSubquery" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="supportAdvancedDrill" type="xsd:boolean" use="optional" default="false"/>
/// </complexType>
/// ```
///
/// # Fields
/// - `records_id`: Relationship id of the records part (`r:id`).
/// - `invalid`: Whether the cache must be refreshed before use (`invalid`).
/// - `save_data`: Whether records are saved with the workbook (`saveData`).
/// - `refreshed_date`: Last refresh as an OLE automation date (`refreshedDate`).
/// - `refreshed_date_iso`: Last refresh as a timestamp (`refreshedDateIso`).
/// - `missing_items_limit`: Number of unused items kept per field (`missingItemsLimit`).
/// - `record_count`: Number of records in the records part (`recordCount`).
/// - `source`: Origin of the cached data (`cacheSource`).
/// - `fields`: One entry per source column (`cacheFields`).
/// - `hierarchies`: OLAP hierarchies (`cacheHierarchies`).
/// - `tuple_cache`: OLAP values (`tupleCache`).
///
/// The `kpis`, calculated item/member and dimension children are skipped when read.
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct PivotCacheDefinition {
    #[xml(name = "xmlns")]
    pub namespace: Option<String>,
    #[xml(name = "xmlns:r")]
    pub relationships_namespace: Option<String>,
    #[xml(name = "r:id")]
    pub records_id: Option<String>,
    #[xml(name = "invalid")]
    pub invalid: bool,
    #[xml(name = "saveData", default = true)]
    pub save_data: bool,
    #[xml(name = "refreshOnLoad")]
    pub refresh_on_load: bool,
    #[xml(name = "optimizeMemory")]
    pub optimize_memory: bool,
    #[xml(name = "enableRefresh", default = true)]
    pub enable_refresh: bool,
    #[xml(name = "refreshedBy")]
    pub refreshed_by: Option<String>,
    #[xml(name = "refreshedDate")]
    pub refreshed_date: Option<f64>,
    #[xml(name = "refreshedDateIso")]
    pub refreshed_date_iso: Option<chrono::NaiveDateTime>,
    #[xml(name = "backgroundQuery")]
    pub background_query: bool,
    #[xml(name = "missingItemsLimit")]
    pub missing_items_limit: Option<u32>,
    #[xml(name = "createdVersion", default = 0)]
    pub created_version: u8,
    #[xml(name = "refreshedVersion", default = 0)]
    pub refreshed_version: u8,
    #[xml(name = "minRefreshableVersion", default = 0)]
    pub min_refreshable_version: u8,
    #[xml(name = "recordCount")]
    pub record_count: Option<u32>,
    #[xml(name = "upgradeOnRefresh")]
    pub upgrade_on_refresh: bool,
    #[xml(name = "tupleCache")]
    pub has_tuple_cache: bool,
    #[xml(name = "supportSubquery")]
    pub support_subquery: bool,
    #[xml(name = "supportAdvancedDrill")]
    pub support_advanced_drill: bool,

    #[xml(element, name = "cacheSource")]
    pub source: CacheSource,
    #[xml(element, name = "cacheFields")]
    pub fields: List<CacheField>,
    #[xml(element, name = "cacheHierarchies")]
    pub hierarchies: Option<List<CacheHierarchy>>,
    #[xml(element, name = "tupleCache")]
    pub tuple_cache: Option<TupleCache>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}
impl PivotPart for PivotCacheDefinition {
    const ROOT: &'static str = "pivotCacheDefinition";
}
impl PivotCacheDefinition {
    /// Creates a cache definition over `source` carrying the part namespaces.
    pub fn new(source: CacheSource) -> Self {
        Self {
            namespace: Some(MAIN_NS.into()),
            relationships_namespace: Some(REL_NS.into()),
            source,
            ..Default::default()
        }
    }

    /// Appends a cache field and returns its index.
    pub fn add_field(&mut self, field: CacheField) -> usize {
        self.fields.push(field);
        self.fields.len() - 1
    }

    /// Position of the cache field called `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

/// Kind of data source behind a cache (`ST_SourceType`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, XmlEnum)]
#[camel]
pub enum SourceType {
    #[default]
    Worksheet,
    External,
    Consolidation,
    Scenario,
}

/// Origin of the cached data (`CT_CacheSource`).
///
/// ```xml
/// <complexType name="CT_CacheSource">
///     <choice minOccurs="0" maxOccurs="1">
///         <element name="worksheetSource" type="CT_WorksheetSource" minOccurs="1" maxOccurs="1"/>
///         <element name="consolidation" type="CT_Consolidation" minOccurs="1" maxOccurs="1"/>
///         <element name="extLst" type="CT_ExtensionList" minOccurs="0" maxOccurs="1"/>
///     </choice>
///     <attribute name="type" type="ST_SourceType" use="required"/>
///     <attribute name="connectionId" type="xsd:unsignedInt" default="0" use="optional"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct CacheSource {
    #[xml(name = "type", required)]
    pub source_type: SourceType,
    #[xml(name = "connectionId", default = 0)]
    pub connection_id: u32,

    #[xml(element, name = "worksheetSource")]
    pub worksheet: Option<WorksheetSource>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}
impl CacheSource {
    /// A worksheet range such as `Sheet1!A1:D20`.
    pub fn worksheet(sheet: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            worksheet: Some(WorksheetSource {
                reference: Some(reference.into()),
                sheet: Some(sheet.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// A defined name or table such as `Table1`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            worksheet: Some(WorksheetSource {
                name: Some(name.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// Worksheet range or defined name a cache reads from (`CT_WorksheetSource`).
#[derive(Debug, Clone, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
pub struct WorksheetSource {
    #[xml(name = "ref")]
    pub reference: Option<String>,
    #[xml(name = "name")]
    pub name: Option<String>,
    #[xml(name = "sheet")]
    pub sheet: Option<String>,
    /// Relationship id of an external workbook (`r:id`)
    #[xml(name = "r:id")]
    pub workbook_id: Option<String>,
}
