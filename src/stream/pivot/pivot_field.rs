use super::{extension::ExtensionList, list::List, pivot_area::PivotArea};
use derive::{XmlDefault, XmlEnum, XmlRead, XmlWrite};

/// Axis a pivot field is placed on (`ST_Axis`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, XmlEnum)]
pub enum Axis {
    #[name("axisRow")]
    Row,
    #[name("axisCol")]
    Column,
    #[name("axisPage")]
    Page,
    #[name("axisValues")]
    Values,
}

/// Sort order of the items of a pivot field (`ST_FieldSortType`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, XmlEnum)]
#[camel]
pub enum FieldSortType {
    #[default]
    Manual,
    Ascending,
    Descending,
}

/// Represents a field of a `PivotTable`.
///
/// This struct corresponds to the `CT_PivotField` complex type in the XML schema. Pivot fields are
/// listed in cache field order and say on which axis a field is shown, how its items are sorted,
/// and which subtotals are computed for it. None of the attributes are required, so a field left
/// at its defaults is written as `<pivotField/>`.
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_PivotField">
///     <sequence>
///         <element name="items" minOccurs="0" type="CT_Items"/>
///         <element name="autoSortScope" minOccurs="0" type="CT_AutoSortScope"/>
///         <element name="extLst" minOccurs="0" type="CT_ExtensionList"/>
///     </sequence>
///     <attribute name="name" type="s:ST_Xstring"/>
///     <attribute name="axis" use="optional" type="ST_Axis"/>
///     <attribute name="dataField" type="xsd:boolean" default="false"/>
///     <attribute name="subtotalCaption" type="s:ST_Xstring"/>
///     <attribute name="showDropDowns" type="xsd:boolean" default="true"/>
///     <attribute name="hiddenLevel" type="xsd:boolean" default="false"/>
///     <attribute name="uniqueMemberProperty" type="s:ST_Xstring"/>
///     <attribute name="compact" type="xsd:boolean" default="true"/>
///     <attribute name="allDrilled" type="xsd:boolean" default="false"/>
///     <attribute name="numFmtId" type="ST_NumFmtId" use="optional"/>
///     <attribute name="outline" type="xsd:boolean" default="true"/>
///     <attribute name="subtotalTop" type="xsd:boolean" default="true"/>
///     <attribute name="dragToRow" type="xsd:boolean" default="true"/>
///     <attribute name="dragToCol" type="xsd:boolean" default="true"/>
///     <attribute name="multipleItemSelectionAllowed" type="xsd:boolean" default="false"/>
///     <attribute name="dragToPage" type="xsd:boolean" default="true"/>
///     <attribute name="dragToData" type="xsd:boolean" default="true"/>
///     <attribute name="dragOff" type="xsd:boolean" default="true"/>
///     <attribute name="showAll" type="xsd:boolean" default="true"/>
///     <attribute name="insertBlankRow" type="xsd:boolean" default="false"/>
///     <attribute name="serverField" type="xsd:boolean" default="false"/>
///     <attribute name="insertPageBreak" type="xsd:boolean" default="false"/>
///     <attribute name="autoShow" type="xsd:boolean" default="false"/>
///     <attribute name="topAutoShow" type="xsd:boolean" default="true"/>
///     <attribute name="hideNewItems" type="xsd:boolean" default="false"/>
///     <attribute name="measureFilter" type="xsd:boolean" default="false"/>
///     <attribute name="includeNewItemsInFilter" type="xsd:boolean" default="false"/>
///     <attribute name="itemPageCount" type="xsd:unsignedInt" default="10"/>
///     <attribute name="sortType" type="ST_FieldSortType" default="manual"/>
///     <attribute name="dataSourceSort" type="xsd:boolean" use="optional"/>
///     <attribute name="nonAutoSortDefault" type="xsd:boolean" default="false"/>
///     <attribute name="rankBy" type="xsd:unsignedInt" use="optional"/>
///     <attribute name="defaultSubtotal" type="xsd:boolean" default="true"/>
///     <attribute name="sumSubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="countASubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="avgSubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="maxSubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="minSubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="productSubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="countSubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="stdDevSubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="stdDevPSubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="varSubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="varPSubtotal" type="xsd:boolean" default="false"/>
///     <attribute name="showPropCell" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="showPropTip" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="showPropAsCaption" type="xsd:boolean" use="optional" default="false"/>
///     <attribute name="defaultAttributeDrillState" type="xsd:boolean" use="optional" default="false"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "pivotField")]
pub struct PivotField {
    #[xml(name = "name")]
    pub name: Option<String>,
    #[xml(name = "axis")]
    pub axis: Option<Axis>,
    #[xml(name = "dataField")]
    pub data_field: bool,
    #[xml(name = "subtotalCaption")]
    pub subtotal_caption: Option<String>,
    #[xml(name = "showDropDowns", default = true)]
    pub show_drop_downs: bool,
    #[xml(name = "hiddenLevel")]
    pub hidden_level: bool,
    #[xml(name = "uniqueMemberProperty")]
    pub unique_member_property: Option<String>,
    #[xml(name = "compact", default = true)]
    pub compact: bool,
    #[xml(name = "allDrilled")]
    pub all_drilled: bool,
    #[xml(name = "numFmtId")]
    pub number_format_id: Option<u32>,
    #[xml(name = "outline", default = true)]
    pub outline: bool,
    #[xml(name = "subtotalTop", default = true)]
    pub subtotal_top: bool,
    #[xml(name = "dragToRow", default = true)]
    pub drag_to_row: bool,
    #[xml(name = "dragToCol", default = true)]
    pub drag_to_column: bool,
    #[xml(name = "multipleItemSelectionAllowed")]
    pub multiple_item_selection_allowed: bool,
    #[xml(name = "dragToPage", default = true)]
    pub drag_to_page: bool,
    #[xml(name = "dragToData", default = true)]
    pub drag_to_data: bool,
    #[xml(name = "dragOff", default = true)]
    pub drag_off: bool,
    #[xml(name = "showAll", default = true)]
    pub show_all: bool,
    #[xml(name = "insertBlankRow")]
    pub insert_blank_row: bool,
    #[xml(name = "serverField")]
    pub server_field: bool,
    #[xml(name = "insertPageBreak")]
    pub insert_page_break: bool,
    #[xml(name = "autoShow")]
    pub auto_show: bool,
    #[xml(name = "topAutoShow", default = true)]
    pub top_auto_show: bool,
    #[xml(name = "hideNewItems")]
    pub hide_new_items: bool,
    #[xml(name = "measureFilter")]
    pub measure_filter: bool,
    #[xml(name = "includeNewItemsInFilter")]
    pub include_new_items_in_filter: bool,
    #[xml(name = "itemPageCount", default = 10)]
    pub item_page_count: u32,
    #[xml(name = "sortType")]
    pub sort_type: FieldSortType,
    #[xml(name = "dataSourceSort")]
    pub data_source_sort: Option<bool>,
    #[xml(name = "nonAutoSortDefault")]
    pub non_auto_sort_default: bool,
    #[xml(name = "rankBy")]
    pub rank_by: Option<u32>,
    #[xml(name = "defaultSubtotal", default = true)]
    pub default_subtotal: bool,
    #[xml(name = "sumSubtotal")]
    pub sum_subtotal: bool,
    #[xml(name = "countASubtotal")]
    pub count_a_subtotal: bool,
    #[xml(name = "avgSubtotal")]
    pub average_subtotal: bool,
    #[xml(name = "maxSubtotal")]
    pub max_subtotal: bool,
    #[xml(name = "minSubtotal")]
    pub min_subtotal: bool,
    #[xml(name = "productSubtotal")]
    pub product_subtotal: bool,
    #[xml(name = "countSubtotal")]
    pub count_subtotal: bool,
    #[xml(name = "stdDevSubtotal")]
    pub std_dev_subtotal: bool,
    #[xml(name = "stdDevPSubtotal")]
    pub std_dev_p_subtotal: bool,
    #[xml(name = "varSubtotal")]
    pub var_subtotal: bool,
    #[xml(name = "varPSubtotal")]
    pub var_p_subtotal: bool,
    #[xml(name = "showPropCell")]
    pub show_property_cell: bool,
    #[xml(name = "showPropTip")]
    pub show_property_tip: bool,
    #[xml(name = "showPropAsCaption")]
    pub show_property_as_caption: bool,
    #[xml(name = "defaultAttributeDrillState")]
    pub default_attribute_drill_state: bool,

    #[xml(element, name = "items")]
    pub items: Option<List<FieldItem>>,
    #[xml(element, name = "autoSortScope")]
    pub auto_sort_scope: Option<AutoSortScope>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}
impl PivotField {
    /// Creates a new `CT_PivotField` with xml schema default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists the first `count` shared items of the cache field, followed by
    /// the default subtotal item when that subtotal is on.
    pub fn set_items(&mut self, count: u32) {
        let mut items: List<FieldItem> = (0..count).map(FieldItem::shared).collect();
        if self.default_subtotal {
            items.push(FieldItem {
                item_type: ItemType::Default,
                ..Default::default()
            });
        }
        self.items = Some(items);
    }
}

/// Role of a pivot field item (`ST_ItemType`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, XmlEnum)]
#[camel]
pub enum ItemType {
    #[default]
    Data,
    Default,
    Sum,
    CountA,
    Avg,
    Max,
    Min,
    Product,
    Count,
    StdDev,
    StdDevP,
    Var,
    VarP,
    Grand,
    Blank,
}

/// One item of a pivot field (`CT_Item`).
///
/// ```xml
/// <complexType name="CT_Item">
///     <attribute name="n" type="s:ST_Xstring"/>
///     <attribute name="t" type="ST_ItemType" default="data"/>
///     <attribute name="h" type="xsd:boolean" default="false"/>
///     <attribute name="s" type="xsd:boolean" default="false"/>
///     <attribute name="sd" type="xsd:boolean" default="true"/>
///     <attribute name="f" type="xsd:boolean" default="false"/>
///     <attribute name="m" type="xsd:boolean" default="false"/>
///     <attribute name="c" type="xsd:boolean" default="false"/>
///     <attribute name="x" type="xsd:unsignedInt"/>
///     <attribute name="d" type="xsd:boolean" default="false"/>
///     <attribute name="e" type="xsd:boolean" default="true"/>
/// </complexType>
/// ```
///
/// # Fields
/// - `name`: User caption of the item (`n`).
/// - `item_type`: Item role (`t`).
/// - `hidden`: Item is hidden (`h`).
/// - `has_string`: Item holds a character value (`s`).
/// - `show_details`: Details are expanded (`sd`).
/// - `calculated`: Item is a calculated member (`f`).
/// - `missing`: Item is no longer in the source (`m`).
/// - `child_items`: Item has children (`c`).
/// - `shared_index`: Index into the shared items of the cache field (`x`).
/// - `drill_across`: Attribute hierarchy is expanded (`d`).
/// - `expanded`: Item can be expanded (`e`).
#[derive(Debug, Clone, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "item")]
pub struct FieldItem {
    #[xml(name = "n")]
    pub name: Option<String>,
    #[xml(name = "t")]
    pub item_type: ItemType,
    #[xml(name = "h")]
    pub hidden: bool,
    #[xml(name = "s")]
    pub has_string: bool,
    #[xml(name = "sd", default = true)]
    pub show_details: bool,
    #[xml(name = "f")]
    pub calculated: bool,
    #[xml(name = "m")]
    pub missing: bool,
    #[xml(name = "c")]
    pub child_items: bool,
    #[xml(name = "x")]
    pub shared_index: Option<u32>,
    #[xml(name = "d")]
    pub drill_across: bool,
    #[xml(name = "e", default = true)]
    pub expanded: bool,
}
impl FieldItem {
    /// A data item pointing at shared item `index`.
    pub fn shared(index: u32) -> Self {
        Self {
            shared_index: Some(index),
            ..Default::default()
        }
    }
}

/// Area whose values drive an automatic sort (`CT_AutoSortScope`).
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct AutoSortScope {
    #[xml(element, name = "pivotArea")]
    pub area: PivotArea,
}

#[cfg(test)]
mod pivot_field {
    use super::{Axis, FieldSortType, ItemType, PivotField};
    use crate::stream::pivot::test_support::{read, write};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_field_is_bare() {
        assert_eq!(write(&PivotField::new(), "pivotField"), "<pivotField/>");
        let field: PivotField = read("<pivotField/>");
        assert_eq!(field, PivotField::default());
        assert_eq!(field.item_page_count, 10);
        assert_eq!(field.sort_type, FieldSortType::Manual);
        assert!(field.default_subtotal);
    }

    #[test]
    fn row_field_with_items() {
        let xml = r#"<pivotField axis="axisRow" showAll="0" sortType="descending"><items count="3"><item x="1"/><item h="1" x="0"/><item t="default"/></items></pivotField>"#;
        let field: PivotField = read(xml);
        assert_eq!(field.axis, Some(Axis::Row));
        assert!(!field.show_all);
        let items = field.items.as_ref().unwrap();
        assert_eq!(items[1].shared_index, Some(0));
        assert!(items[1].hidden);
        assert_eq!(items[2].item_type, ItemType::Default);
        assert_eq!(write(&field, "pivotField"), xml);
    }

    #[test]
    fn set_items_appends_the_subtotal_item() {
        let mut field = PivotField::new();
        field.set_items(2);
        assert_eq!(
            write(&field, "pivotField"),
            r#"<pivotField><items count="3"><item x="0"/><item x="1"/><item t="default"/></items></pivotField>"#
        );
        field.default_subtotal = false;
        field.set_items(1);
        assert_eq!(field.items.as_ref().map(|items| items.len()), Some(1));
    }

    #[test]
    fn auto_sort_scope_wraps_a_pivot_area() {
        let xml = r#"<pivotField axis="axisRow" sortType="ascending"><autoSortScope><pivotArea dataOnly="0" outline="0" fieldPosition="0"><references count="1"><reference field="4294967294" count="1" selected="0"><x v="0"/></reference></references></pivotArea></autoSortScope></pivotField>"#;
        let field: PivotField = read(xml);
        let scope = field.auto_sort_scope.as_ref().unwrap();
        assert_eq!(scope.area.field_position, Some(0));
        assert_eq!(write(&field, "pivotField"), xml);
    }

    #[test]
    fn unknown_axis_is_an_error() {
        use crate::stream::utils::XmlReader;
        use quick_xml::{events::Event, Reader};

        let mut reader = Reader::from_reader(r#"<pivotField axis="sideways"/>"#.as_bytes());
        let mut buf = Vec::new();
        let Ok(Event::Empty(e)) = reader.read_event_into(&mut buf) else {
            panic!("expected an empty element");
        };
        let mut field = PivotField::default();
        assert!(field.read_xml(&e, &mut reader, true).is_err());
    }
}
