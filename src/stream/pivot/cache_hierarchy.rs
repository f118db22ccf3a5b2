use super::{extension::ExtensionList, list::List};
use derive::{XmlDefault, XmlRead, XmlWrite};

/// Represents an OLAP hierarchy of the pivot cache.
///
/// This struct corresponds to the `CT_CacheHierarchy` complex type in the XML schema. Worksheet
/// based caches have no hierarchies, OLAP caches list one per dimension attribute, set or measure.
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_CacheHierarchy">
///     <sequence>
///         <element name="fieldsUsage" minOccurs="0" type="CT_FieldsUsage"/>
///         <element name="groupLevels" minOccurs="0" type="CT_GroupLevels"/>
///         <element name="extLst" minOccurs="0" type="CT_ExtensionList"/>
///     </sequence>
///     <attribute name="uniqueName" type="s:ST_Xstring" use="required"/>
///     <attribute name="caption" type="s:ST_Xstring" use="optional"/>
///     <attribute name="measure" type="xsd:boolean" default="false"/>
///     <attribute name="set" type="xsd:boolean" default="false"/>
///     <attribute name="parentSet" type="xsd:unsignedInt" use="optional"/>
///     <attribute name="iconSet" type="xsd:int" default="0"/>
///     <attribute name="attribute" type="xsd:boolean" default="false"/>
///     <attribute name="time" type="xsd:boolean" default="false"/>
///     <attribute name="keyAttribute" type="xsd:boolean" default="false"/>
///     <attribute name="defaultMemberUniqueName" type="s:ST_Xstring" use="optional"/>
///     <attribute name="allUniqueName" type="s:ST_Xstring" use="optional"/>
///     <attribute name="allCaption" type="s:ST_Xstring" use="optional"/>
///     <attribute name="dimensionUniqueName" type="s:ST_Xstring" use="optional"/>
///     <attribute name="displayFolder" type="s:ST_Xstring" use="optional"/>
///     <attribute name="measureGroup" type="s:ST_Xstring" use="optional"/>
///     <attribute name="measures" type="xsd:boolean" default="false"/>
///     <attribute name="count" type="xsd:unsignedInt" use="required"/>
///     <attribute name="oneField" type="xsd:boolean" default="false"/>
///     <attribute name="memberValueDatatype" type="xsd:unsignedShort" use="optional"/>
///     <attribute name="unbalanced" type="xsd:boolean" use="optional"/>
///     <attribute name="unbalancedGroup" type="xsd:boolean" use="optional"/>
///     <attribute name="hidden" type="xsd:boolean" default="false"/>
/// </complexType>
/// ```
///
/// `groupLevels` is not modelled, it is skipped when read.
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "cacheHierarchy")]
pub struct CacheHierarchy {
    #[xml(name = "uniqueName", required)]
    pub unique_name: String,
    #[xml(name = "caption")]
    pub caption: Option<String>,
    #[xml(name = "measure")]
    pub measure: bool,
    #[xml(name = "set")]
    pub set: bool,
    #[xml(name = "parentSet")]
    pub parent_set: Option<u32>,
    #[xml(name = "iconSet", default = 0)]
    pub icon_set: i32,
    #[xml(name = "attribute")]
    pub attribute: bool,
    #[xml(name = "time")]
    pub time: bool,
    #[xml(name = "keyAttribute")]
    pub key_attribute: bool,
    #[xml(name = "defaultMemberUniqueName")]
    pub default_member_unique_name: Option<String>,
    #[xml(name = "allUniqueName")]
    pub all_unique_name: Option<String>,
    #[xml(name = "allCaption")]
    pub all_caption: Option<String>,
    #[xml(name = "dimensionUniqueName")]
    pub dimension_unique_name: Option<String>,
    #[xml(name = "displayFolder")]
    pub display_folder: Option<String>,
    #[xml(name = "measureGroup")]
    pub measure_group: Option<String>,
    #[xml(name = "measures")]
    pub measures: bool,
    /// Number of levels in the hierarchy
    #[xml(name = "count", required)]
    pub count: u32,
    #[xml(name = "oneField")]
    pub one_field: bool,
    #[xml(name = "memberValueDatatype")]
    pub member_value_datatype: Option<u16>,
    #[xml(name = "unbalanced")]
    pub unbalanced: Option<bool>,
    #[xml(name = "unbalancedGroup")]
    pub unbalanced_group: Option<bool>,
    #[xml(name = "hidden")]
    pub hidden: bool,

    #[xml(element, name = "fieldsUsage")]
    pub fields_usage: Option<List<FieldUsage>>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}
impl CacheHierarchy {
    pub fn new(unique_name: impl Into<String>, count: u32) -> Self {
        Self {
            unique_name: unique_name.into(),
            count,
            ..Default::default()
        }
    }
}

/// Cache field backing one level of a hierarchy, `-1` when the level has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "fieldUsage")]
pub struct FieldUsage {
    #[xml(name = "x", required)]
    pub index: i32,
}

#[cfg(test)]
mod cache_hierarchy {
    use super::{CacheHierarchy, FieldUsage};
    use crate::stream::pivot::{
        list::List,
        test_support::{read, write},
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn required_attributes_are_written_even_at_default() {
        assert_eq!(
            write(&CacheHierarchy::new("[Measures].[Sales]", 0), "cacheHierarchy"),
            r#"<cacheHierarchy uniqueName="[Measures].[Sales]" count="0"/>"#
        );
    }

    #[test]
    fn olap_dimension_round_trip() {
        let xml = r#"<cacheHierarchy uniqueName="[Date].[Calendar]" caption="Calendar" defaultMemberUniqueName="[Date].[Calendar].[All]" allUniqueName="[Date].[Calendar].[All]" dimensionUniqueName="[Date]" displayFolder="" count="4" unbalanced="0"><fieldsUsage count="3"><fieldUsage x="-1"/><fieldUsage x="0"/><fieldUsage x="1"/></fieldsUsage></cacheHierarchy>"#;
        let hierarchy: CacheHierarchy = read(xml);
        assert_eq!(hierarchy.count, 4);
        assert_eq!(hierarchy.unbalanced, Some(false));
        assert_eq!(hierarchy.display_folder.as_deref(), Some(""));
        assert_eq!(
            hierarchy.fields_usage,
            Some(List::from(vec![
                FieldUsage { index: -1 },
                FieldUsage { index: 0 },
                FieldUsage { index: 1 },
            ]))
        );
        assert_eq!(write(&hierarchy, "cacheHierarchy"), xml);
    }

    #[test]
    fn missing_unique_name_is_tolerated() {
        let hierarchy: CacheHierarchy = read(r#"<cacheHierarchy measure="1" count="0"/>"#);
        assert_eq!(hierarchy.unique_name, "");
        assert!(hierarchy.measure);
    }
}
