use super::{
    extension::ExtensionList,
    index::{Index, MemberIndex},
    item::Item,
    list::List,
    variant::{CacheItems, GroupedItems, VariantList},
};
use crate::errors::XlsxError;
use chrono::NaiveDateTime;
use derive::{XmlDefault, XmlEnum, XmlRead, XmlWrite};

/// Represents a single field of the pivot cache.
///
/// This struct corresponds to the `CT_CacheField` complex type in the XML schema. It describes
/// one column of the source data: its name, how its values are typed, and the distinct values
/// seen for it.
///
/// # XML Schema Mapping
/// The struct maps to the following XML schema definition:
/// ```xml
/// <complexType name="CT_CacheField">
///     <sequence>
///         <element name="sharedItems" type="CT_SharedItems" minOccurs="0" maxOccurs="1"/>
///         <element name="fieldGroup" minOccurs="0" type="CT_FieldGroup"/>
///         <element name="mpMap" minOccurs="0" maxOccurs="unbounded" type="CT_X"/>
///         <element name="extLst" minOccurs="0" type="CT_ExtensionList"/>
///     </sequence>
///     <attribute name="name" type="s:ST_Xstring" use="required"/>
///     <attribute name="caption" type="s:ST_Xstring" use="optional"/>
///     <attribute name="propertyName" type="s:ST_Xstring" use="optional"/>
///     <attribute name="serverField" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="uniqueList" type="xsd:boolean" use="optional" default="true"/>
///     <attribute name="numFmtId" type="ST_NumFmtId" use="optional"/>
///     <attribute name="formula" type="s:ST_Xstring" use="optional"/>
///     <attribute name="sqlType" type="xsd:int" use="optional" default="0"/>
///     <attribute name="hierarchy" type="xsd:int" use="optional" default="0"/>
///     <attribute name="level" type="xsd:unsignedInt" use="optional" default="0"/>
///     <attribute name="databaseField" type="xsd:boolean" default="true"/>
///     <attribute name="mappingCount" type="xsd:unsignedInt" use="optional"/>
///     <attribute name="memberPropertyField" type="xsd:boolean" use="optional" default="false"/>
/// </complexType>
/// ```
///
/// # Fields
/// - `name`: Name of the source column (`name`).
/// - `caption`: Display caption (`caption`).
/// - `property_name`: OLAP member property this field maps to (`propertyName`).
/// - `server_field`: Whether the field is a server-based page field (`serverField`).
/// - `unique_list`: Whether `shared_items` holds unique values only (`uniqueList`).
/// - `number_format_id`: Number format applied to the field (`numFmtId`).
/// - `formula`: Formula of a calculated field (`formula`).
/// - `sql_type`: ODBC SQL data type of the source column (`sqlType`).
/// - `hierarchy`: OLAP hierarchy the field belongs to (`hierarchy`).
/// - `level`: Level within that hierarchy (`level`).
/// - `database_field`: Whether the field comes from the source data (`databaseField`).
/// - `mapping_count`: Number of member property map entries (`mappingCount`).
/// - `member_property_field`: Whether the field is a member property (`memberPropertyField`).
/// - `shared_items`: Distinct values of the field (`sharedItems`).
/// - `field_group`: Grouping applied to the field (`fieldGroup`).
/// - `member_property_map`: Member property map indexes (`mpMap`).
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "cacheField")]
pub struct CacheField {
    #[xml(name = "name", required)]
    pub name: String,
    #[xml(name = "caption")]
    pub caption: Option<String>,
    #[xml(name = "propertyName")]
    pub property_name: Option<String>,
    #[xml(name = "serverField")]
    pub server_field: bool,
    #[xml(name = "uniqueList", default = true)]
    pub unique_list: bool,
    #[xml(name = "numFmtId")]
    pub number_format_id: Option<u32>,
    #[xml(name = "formula")]
    pub formula: Option<String>,
    #[xml(name = "sqlType", default = 0)]
    pub sql_type: i32,
    #[xml(name = "hierarchy", default = 0)]
    pub hierarchy: i32,
    #[xml(name = "level", default = 0)]
    pub level: u32,
    #[xml(name = "databaseField", default = true)]
    pub database_field: bool,
    #[xml(name = "mappingCount")]
    pub mapping_count: Option<u32>,
    #[xml(name = "memberPropertyField")]
    pub member_property_field: bool,

    #[xml(element, name = "sharedItems")]
    pub shared_items: Option<SharedItems>,
    #[xml(element, name = "fieldGroup")]
    pub field_group: Option<FieldGroup>,
    #[xml(element, name = "mpMap")]
    pub member_property_map: Vec<MemberIndex>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}
impl CacheField {
    /// Creates a new `CT_CacheField` with xml schema default values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A source field whose distinct values are `items`, with the
    /// `contains*` flags set to describe them.
    pub fn with_items(
        name: impl Into<String>,
        items: impl IntoIterator<Item = Item>,
    ) -> Result<Self, XlsxError> {
        let mut shared_items = SharedItems {
            items: VariantList::from_items(items)?,
            ..Default::default()
        };
        shared_items.summarize();
        Ok(Self {
            shared_items: Some(shared_items),
            ..Self::new(name)
        })
    }
}

/// Represents the distinct values of one cache field.
///
/// This struct corresponds to the `CT_SharedItems` complex type. The `contains*` flags and the
/// min/max bounds summarize the values, the values themselves are an ordered mix of
/// `m n b e s d` children.
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_SharedItems">
///     <choice minOccurs="0" maxOccurs="unbounded">
///         <element name="m" type="CT_Missing" minOccurs="1" maxOccurs="1"/>
///         <element name="n" type="CT_Number" minOccurs="1" maxOccurs="1"/>
///         <element name="b" type="CT_Boolean" minOccurs="1" maxOccurs="1"/>
///         <element name="e" type="CT_Error" minOccurs="1" maxOccurs="1"/>
///         <element name="s" type="CT_String" minOccurs="1" maxOccurs="1"/>
///         <element name="d" type="CT_DateTime" minOccurs="1" maxOccurs="1"/>
///     </choice>
///     <attribute name="containsSemiMixedTypes" type="xsd:boolean" default="true"/>
///     <attribute name="containsNonDate" type="xsd:boolean" default="true"/>
///     <attribute name="containsDate" type="xsd:boolean" default="false"/>
///     <attribute name="containsString" type="xsd:boolean" default="true"/>
///     <attribute name="containsBlank" type="xsd:boolean" default="false"/>
///     <attribute name="containsMixedTypes" type="xsd:boolean" default="false"/>
///     <attribute name="containsNumber" type="xsd:boolean" default="false"/>
///     <attribute name="containsInteger" type="xsd:boolean" default="false"/>
///     <attribute name="minValue" type="xsd:double"/>
///     <attribute name="maxValue" type="xsd:double"/>
///     <attribute name="minDate" type="xsd:dateTime"/>
///     <attribute name="maxDate" type="xsd:dateTime"/>
///     <attribute name="count" type="xsd:unsignedInt"/>
///     <attribute name="longText" type="xsd:boolean" default="false"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct SharedItems {
    #[xml(name = "containsSemiMixedTypes", default = true)]
    pub contains_semi_mixed_types: bool,
    #[xml(name = "containsNonDate", default = true)]
    pub contains_non_date: bool,
    #[xml(name = "containsDate")]
    pub contains_date: bool,
    #[xml(name = "containsString", default = true)]
    pub contains_string: bool,
    #[xml(name = "containsBlank")]
    pub contains_blank: bool,
    #[xml(name = "containsMixedTypes")]
    pub contains_mixed_types: bool,
    #[xml(name = "containsNumber")]
    pub contains_number: bool,
    #[xml(name = "containsInteger")]
    pub contains_integer: bool,
    #[xml(name = "minValue")]
    pub min_value: Option<f64>,
    #[xml(name = "maxValue")]
    pub max_value: Option<f64>,
    #[xml(name = "minDate")]
    pub min_date: Option<NaiveDateTime>,
    #[xml(name = "maxDate")]
    pub max_date: Option<NaiveDateTime>,
    #[xml(name = "longText")]
    pub long_text: bool,

    #[xml(following_elements, count = "count")]
    pub items: VariantList<CacheItems>,
}
impl SharedItems {
    /// Recomputes the `contains*` flags and value bounds from `items`.
    pub fn summarize(&mut self) {
        use super::item::{ItemKind, ItemValue};

        let has = |kind| self.items.count_of(kind) > 0;
        let strings = has(ItemKind::String) || has(ItemKind::Error) || has(ItemKind::Boolean);
        let numbers = has(ItemKind::Number);
        let dates = has(ItemKind::DateTime);
        let blanks = has(ItemKind::Missing);
        let kinds = [strings, numbers, dates].iter().filter(|&&k| k).count();

        self.contains_string = strings;
        self.contains_number = numbers;
        self.contains_date = dates;
        self.contains_blank = blanks;
        self.contains_non_date = !dates || kinds > 1 || blanks;
        self.contains_semi_mixed_types = strings || blanks;
        self.contains_mixed_types = kinds > 1;
        self.contains_integer =
            numbers && self.items.numbers().all(|n| n.fract() == 0.0);
        self.long_text = self.items.strings().any(|s| s.chars().count() > 255);

        let fold = |pick: fn(f64, f64) -> f64| self.items.numbers().reduce(pick);
        self.min_value = fold(f64::min);
        self.max_value = fold(f64::max);
        let dates = || {
            self.items.iter().filter_map(|item| match item.value {
                ItemValue::DateTime(d) => Some(d),
                _ => None,
            })
        };
        self.min_date = dates().min();
        self.max_date = dates().max();
    }
}

/// Grouping applied to a cache field (`CT_FieldGroup`).
///
/// ```xml
/// <complexType name="CT_FieldGroup">
///     <sequence>
///         <element name="rangePr" minOccurs="0" type="CT_RangePr"/>
///         <element name="discretePr" minOccurs="0" type="CT_DiscretePr"/>
///         <element name="groupItems" minOccurs="0" type="CT_GroupItems"/>
///     </sequence>
///     <attribute name="par" type="xsd:unsignedInt"/>
///     <attribute name="base" type="xsd:unsignedInt"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct FieldGroup {
    /// Parent grouping field (`par`)
    #[xml(name = "par")]
    pub parent: Option<u32>,
    /// Field the grouping is based on (`base`)
    #[xml(name = "base")]
    pub base: Option<u32>,
    #[xml(element, name = "rangePr")]
    pub range: Option<RangeProperties>,
    /// For each base item, the group item it falls into (`discretePr`)
    #[xml(element, name = "discretePr")]
    pub discrete: Option<List<Index>>,
    #[xml(element, name = "groupItems")]
    pub items: Option<GroupItems>,
}

/// Unit used to group numeric or date values (`ST_GroupBy`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, XmlEnum)]
#[camel]
pub enum GroupBy {
    #[default]
    Range,
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Quarters,
    Years,
}

/// Range grouping properties (`CT_RangePr`).
///
/// ```xml
/// <complexType name="CT_RangePr">
///     <attribute name="autoStart" type="xsd:boolean" default="true"/>
///     <attribute name="autoEnd" type="xsd:boolean" default="true"/>
///     <attribute name="groupBy" type="ST_GroupBy" default="range"/>
///     <attribute name="startNum" type="xsd:double"/>
///     <attribute name="endNum" type="xsd:double"/>
///     <attribute name="startDate" type="xsd:dateTime"/>
///     <attribute name="endDate" type="xsd:dateTime"/>
///     <attribute name="groupInterval" type="xsd:double" default="1"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct RangeProperties {
    #[xml(name = "autoStart", default = true)]
    pub auto_start: bool,
    #[xml(name = "autoEnd", default = true)]
    pub auto_end: bool,
    #[xml(name = "groupBy")]
    pub group_by: GroupBy,
    #[xml(name = "startNum")]
    pub start_number: Option<f64>,
    #[xml(name = "endNum")]
    pub end_number: Option<f64>,
    #[xml(name = "startDate")]
    pub start_date: Option<NaiveDateTime>,
    #[xml(name = "endDate")]
    pub end_date: Option<NaiveDateTime>,
    #[xml(name = "groupInterval", default = 1.0)]
    pub group_interval: f64,
}

/// The items of a grouped field (`CT_GroupItems`), same kinds as shared items.
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct GroupItems {
    #[xml(following_elements, count = "count")]
    pub items: VariantList<GroupedItems>,
}

#[cfg(test)]
mod cache_field {
    use super::{CacheField, GroupBy, SharedItems};
    use crate::stream::pivot::{
        index::Index,
        item::{Item, ItemKind},
        test_support::{read, write},
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn default_field_only_writes_its_name() {
        assert_eq!(
            write(&CacheField::new("Region"), "cacheField"),
            r#"<cacheField name="Region"/>"#
        );
    }

    #[test]
    fn shared_items_round_trip_in_order() {
        let xml = r#"<cacheField name="Month" numFmtId="0"><sharedItems containsBlank="1" containsMixedTypes="1" containsNumber="1" count="4"><s v="Jan"/><n v="5"/><s v="Feb"/><m/></sharedItems></cacheField>"#;
        let field: CacheField = read(xml);
        let shared = field.shared_items.as_ref().unwrap();
        assert!(shared.contains_string);
        assert!(shared.contains_blank);
        assert_eq!(
            shared.items.kind_order(),
            vec![
                (ItemKind::String, 0),
                (ItemKind::Number, 0),
                (ItemKind::String, 1),
                (ItemKind::Missing, 0),
            ]
        );
        assert_eq!(write(&field, "cacheField"), xml);
    }

    #[test]
    fn empty_shared_items_still_carry_a_count() {
        let field = CacheField {
            shared_items: Some(SharedItems::default()),
            ..CacheField::new("Amount")
        };
        assert_eq!(
            write(&field, "cacheField"),
            r#"<cacheField name="Amount"><sharedItems count="0"/></cacheField>"#
        );
    }

    #[test]
    fn grouped_dates() {
        let xml = r#"<cacheField name="Date" numFmtId="14"><sharedItems containsSemiMixedTypes="0" containsNonDate="0" containsDate="1" containsString="0" minDate="2024-01-03T00:00:00" maxDate="2024-02-10T00:00:00" count="0"/><fieldGroup base="0"><rangePr groupBy="months" startDate="2024-01-03T00:00:00" endDate="2024-02-11T00:00:00"/><groupItems count="3"><s v="&lt;1/3/2024"/><s v="Jan"/><s v="Feb"/></groupItems></fieldGroup></cacheField>"#;
        let field: CacheField = read(xml);
        let group = field.field_group.as_ref().unwrap();
        assert_eq!(group.base, Some(0));
        assert_eq!(group.range.as_ref().map(|r| r.group_by), Some(GroupBy::Months));
        assert_eq!(
            group
                .items
                .as_ref()
                .map(|g| g.items.strings().collect::<Vec<_>>()),
            Some(vec!["<1/3/2024", "Jan", "Feb"])
        );
        assert_eq!(write(&field, "cacheField"), xml);
    }

    #[test]
    fn discrete_grouping_lists_indexes() {
        let xml = r#"<fieldGroup par="2" base="1"><discretePr count="3"><x v="0"/><x v="1"/><x v="0"/></discretePr></fieldGroup>"#;
        let group: super::FieldGroup = read(xml);
        assert_eq!(
            group.discrete.as_ref().map(|d| d.entries.clone()),
            Some(vec![Index::new(0), Index::new(1), Index::new(0)])
        );
        assert_eq!(write(&group, "fieldGroup"), xml);
    }

    #[test]
    fn summarize_describes_items() {
        let field = CacheField::with_items(
            "Mixed",
            [Item::string("a"), Item::number(2.0), Item::number(-1.0), Item::missing()],
        )
        .unwrap();
        let shared = field.shared_items.unwrap();
        assert!(shared.contains_mixed_types);
        assert!(shared.contains_integer);
        assert!(shared.contains_blank);
        assert_eq!(shared.min_value, Some(-1.0));
        assert_eq!(shared.max_value, Some(2.0));
        assert!(CacheField::with_items("Bad", [Item::index(0)]).is_err());
    }

    #[test]
    fn unknown_children_do_not_break_parsing() {
        let field: CacheField = read(
            r#"<cacheField name="A"><somethingNew a="1"><b/></somethingNew><mpMap v="2"/></cacheField>"#,
        );
        assert_eq!(field.member_property_map.len(), 1);
        assert_eq!(
            write(&field, "cacheField"),
            r#"<cacheField name="A"><mpMap v="2"/></cacheField>"#
        );
    }
}
