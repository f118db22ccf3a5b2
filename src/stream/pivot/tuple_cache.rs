use super::{
    extension::ExtensionList,
    list::List,
    tuple::TupleGroup,
    variant::{EntryItems, VariantList},
};
use derive::{XmlDefault, XmlEnum, XmlRead, XmlWrite};

/// OLAP values retrieved for the cache (`CT_TupleCache`).
///
/// ```xml
/// <complexType name="CT_TupleCache">
///     <sequence>
///         <element name="entries" minOccurs="0" type="CT_PCDSDTCEntries"/>
///         <element name="sets" minOccurs="0" type="CT_Sets"/>
///         <element name="queryCache" minOccurs="0" type="CT_QueryCache"/>
///         <element name="serverFormats" minOccurs="0" type="CT_ServerFormats"/>
///         <element name="extLst" minOccurs="0" type="CT_ExtensionList"/>
///     </sequence>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct TupleCache {
    #[xml(element, name = "entries")]
    pub entries: Option<Entries>,
    #[xml(element, name = "sets")]
    pub sets: Option<List<Set>>,
    #[xml(element, name = "queryCache")]
    pub queries: Option<List<Query>>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}

/// Values referenced by tuples of the cache (`CT_PCDSDTCEntries`), `m n e s` only.
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct Entries {
    #[xml(following_elements, count = "count")]
    pub items: VariantList<EntryItems>,
}

/// Sort order applied to the members of a named set (`ST_SortType`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, XmlEnum)]
#[camel]
pub enum SortType {
    #[default]
    None,
    Ascending,
    Descending,
    AscendingAlpha,
    DescendingAlpha,
    AscendingNatural,
    DescendingNatural,
}

/// An OLAP named set (`CT_Set`).
///
/// ```xml
/// <complexType name="CT_Set">
///     <sequence>
///         <element name="tpls" minOccurs="0" maxOccurs="unbounded" type="CT_Tuples"/>
///         <element name="sortByTuple" minOccurs="0" maxOccurs="1" type="CT_Tuples"/>
///     </sequence>
///     <attribute name="count" type="xsd:unsignedInt" default="0"/>
///     <attribute name="maxRank" type="xsd:int" use="required"/>
///     <attribute name="setDefinition" type="s:ST_Xstring" use="required"/>
///     <attribute name="sortType" type="ST_SortType" default="none"/>
///     <attribute name="queryFailed" type="xsd:boolean" default="false"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "set")]
pub struct Set {
    /// Number of tuple groups in the set
    #[xml(name = "count", default = 0)]
    pub count: u32,
    #[xml(name = "maxRank", required)]
    pub max_rank: i32,
    /// MDX expression defining the set
    #[xml(name = "setDefinition", required)]
    pub definition: String,
    #[xml(name = "sortType")]
    pub sort_type: SortType,
    #[xml(name = "queryFailed")]
    pub query_failed: bool,

    #[xml(element, name = "tpls")]
    pub tuples: Vec<TupleGroup>,
    #[xml(element, name = "sortByTuple")]
    pub sort_by: Option<TupleGroup>,
}
impl Set {
    pub fn new(definition: impl Into<String>, max_rank: i32) -> Self {
        Self {
            definition: definition.into(),
            max_rank,
            ..Default::default()
        }
    }

    /// Appends a tuple group and keeps `count` in step.
    pub fn push(&mut self, tuples: TupleGroup) {
        self.tuples.push(tuples);
        self.count = u32::try_from(self.tuples.len()).unwrap_or(u32::MAX);
    }
}

/// A cached MDX query (`CT_Query`).
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "query")]
pub struct Query {
    #[xml(name = "mdx", required)]
    pub mdx: String,
    #[xml(element, name = "tpls")]
    pub tuples: Option<TupleGroup>,
}
