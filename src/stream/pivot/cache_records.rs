use super::{
    extension::ExtensionList,
    item::Item,
    variant::{RecordItems, VariantList},
    PivotPart, MAIN_NS, REL_NS,
};
use crate::errors::XlsxError;
use derive::{XmlDefault, XmlRead, XmlWrite};

/// Root of the `pivotCacheRecords` part, one record per source row.
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_PivotCacheRecords">
///     <sequence>
///         <element name="r" minOccurs="0" maxOccurs="unbounded" type="CT_Record"/>
///         <element name="extLst" minOccurs="0" type="CT_ExtensionList"/>
///     </sequence>
///     <attribute name="count" type="xsd:unsignedInt" use="optional"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct PivotCacheRecords {
    #[xml(name = "xmlns")]
    pub namespace: Option<String>,
    #[xml(name = "xmlns:r")]
    pub relationships_namespace: Option<String>,

    #[xml(following_elements, count = "count")]
    pub records: Vec<CacheRecord>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}
impl PivotPart for PivotCacheRecords {
    const ROOT: &'static str = "pivotCacheRecords";
}
impl PivotCacheRecords {
    pub fn new() -> Self {
        Self {
            namespace: Some(MAIN_NS.into()),
            relationships_namespace: Some(REL_NS.into()),
            ..Default::default()
        }
    }

    /// Appends a record built from one source row.
    pub fn push_row(&mut self, values: impl IntoIterator<Item = Item>) -> Result<(), XlsxError> {
        self.records.push(CacheRecord {
            items: VariantList::from_items(values)?,
        });
        Ok(())
    }
}

/// One source row (`CT_Record`), values in cache field order.
///
/// A value is either stored inline or as an `x` index into the shared items
/// of the matching cache field.
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "r")]
pub struct CacheRecord {
    #[xml(following_elements)]
    pub items: VariantList<RecordItems>,
}
