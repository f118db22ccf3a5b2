use super::{extension::ExtensionList, index::Index, list::List, pivot_field::Axis};
use derive::{XmlDefault, XmlEnum, XmlRead, XmlWrite};

/// Represents a selected field and item within its parent in a `PivotTable`.
///
/// This struct corresponds to the `CT_PivotAreaReference` complex type in the XML schema. It encapsulates
/// attributes and elements that define the selection of a field, its position, and various filters and
/// subtotals.
///
/// # XML Schema Mapping
/// The struct maps to the following XML schema definition:
/// ```xml
/// <complexType name="CT_PivotAreaReference">
///     <sequence>
///         <element name="x" minOccurs="0" maxOccurs="unbounded" type="CT_Index"/>
///         <element name="extLst" minOccurs="0" type="CT_ExtensionList"/>
///     </sequence>
///     <attribute name="field" use="optional" type="xsd:unsignedInt"/>
///     <attribute name="count" type="xsd:unsignedInt"/>
///     <attribute name="selected" type="xsd:boolean" default="true"/>
///     <attribute name="byPosition" type="xsd:boolean" default="false"/>
///     <attribute name="relative" type="xsd:boolean" default="false"/>
///     <attribute name="defaultSubtotal" type="xsd:boolean" default="false"/>
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
/// </complexType>
/// ```
///
/// # Fields
/// - `field`: The field index, `4294967294` for the data field (`field`).
/// - `count`: Number of selected items as stored in the file (`count`).
/// - `selected`: Indicates whether the field is selected (`selected`).
/// - `by_position`: Indicates whether the items are selected by position (`byPosition`).
/// - `relative`: Indicates whether the item positions are relative (`relative`).
/// - `default_subtotal` ... `var_p_subtotal`: Which subtotal rows are part of the selection.
/// - `items`: Indexes of the selected items (`x`).
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "reference")]
pub struct PivotAreaReference {
    #[xml(name = "field")]
    pub field: Option<u32>,
    #[xml(name = "count")]
    pub count: Option<u32>,
    #[xml(name = "selected", default = true)]
    pub selected: bool,
    #[xml(name = "byPosition")]
    pub by_position: bool,
    #[xml(name = "relative")]
    pub relative: bool,
    #[xml(name = "defaultSubtotal")]
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

    #[xml(element, name = "x")]
    pub items: Vec<Index>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}
impl PivotAreaReference {
    /// Selects `items` of the pivot field at `field`.
    pub fn new(field: u32, items: impl IntoIterator<Item = u32>) -> Self {
        let items: Vec<Index> = items.into_iter().map(Index::new).collect();
        Self {
            field: Some(field),
            count: u32::try_from(items.len()).ok(),
            items,
            ..Default::default()
        }
    }
}

/// Kind of region a pivot area covers (`ST_PivotAreaType`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, XmlEnum)]
#[camel]
pub enum PivotAreaType {
    None,
    #[default]
    Normal,
    Data,
    All,
    Origin,
    Button,
    TopEnd,
    TopRight,
}

/// Represents a rule to describe `PivotTable` selection, defining the area and its properties.
///
/// This struct corresponds to the `CT_PivotArea` complex type in the XML schema. It encapsulates
/// attributes and elements that specify the pivot area, including its type, data, labels, and other
/// settings.
///
/// # XML Schema Mapping
/// The struct maps to the following XML schema definition:
/// ```xml
/// <complexType name="CT_PivotArea">
///     <sequence>
///         <element name="references" minOccurs="0" type="CT_PivotAreaReferences"/>
///         <element name="extLst" minOccurs="0" type="CT_ExtensionList"/>
///     </sequence>
///     <attribute name="field" use="optional" type="xsd:int"/>
///     <attribute name="type" type="ST_PivotAreaType" default="normal"/>
///     <attribute name="dataOnly" type="xsd:boolean" default="true"/>
///     <attribute name="labelOnly" type="xsd:boolean" default="false"/>
///     <attribute name="grandRow" type="xsd:boolean" default="false"/>
///     <attribute name="grandCol" type="xsd:boolean" default="false"/>
///     <attribute name="cacheIndex" type="xsd:boolean" default="false"/>
///     <attribute name="outline" type="xsd:boolean" default="true"/>
///     <attribute name="offset" type="ST_Ref"/>
///     <attribute name="collapsedLevelsAreSubtotals" type="xsd:boolean" default="false"/>
///     <attribute name="axis" type="ST_Axis" use="optional"/>
///     <attribute name="fieldPosition" type="xsd:unsignedInt" use="optional"/>
/// </complexType>
/// ```
///
/// # Fields
/// - `field`: The field index (`field`).
/// - `area_type`: The type of pivot area (`type`).
/// - `data_only`: Indicates whether only data is included (`dataOnly`).
/// - `label_only`: Indicates whether only labels are included (`labelOnly`).
/// - `grand_row`: Indicates whether to include the row grand total (`grandRow`).
/// - `grand_column`: Indicates whether to include the column grand total (`grandCol`).
/// - `cache_index`: Indicates whether item indexes point into the cache (`cacheIndex`).
/// - `outline`: Indicates whether the area is in outline form (`outline`).
/// - `offset`: The offset reference (`offset`).
/// - `collapsed_levels_are_subtotals`: Indicates whether collapsed levels are subtotals (`collapsedLevelsAreSubtotals`).
/// - `axis`: The axis of the pivot area (`axis`).
/// - `field_position`: The field position (`fieldPosition`).
/// - `references`: The collection of references (`references`).
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct PivotArea {
    #[xml(name = "field")]
    pub field: Option<i32>,
    #[xml(name = "type")]
    pub area_type: PivotAreaType,
    #[xml(name = "dataOnly", default = true)]
    pub data_only: bool,
    #[xml(name = "labelOnly")]
    pub label_only: bool,
    #[xml(name = "grandRow")]
    pub grand_row: bool,
    #[xml(name = "grandCol")]
    pub grand_column: bool,
    #[xml(name = "cacheIndex")]
    pub cache_index: bool,
    #[xml(name = "outline", default = true)]
    pub outline: bool,
    #[xml(name = "offset")]
    pub offset: Option<String>,
    #[xml(name = "collapsedLevelsAreSubtotals")]
    pub collapsed_levels_are_subtotals: bool,
    #[xml(name = "axis")]
    pub axis: Option<Axis>,
    #[xml(name = "fieldPosition")]
    pub field_position: Option<u32>,

    #[xml(element, name = "references")]
    pub references: Option<List<PivotAreaReference>>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}
impl PivotArea {
    /// Creates a new `CT_PivotArea` instance with xml schema default values.
    pub fn new() -> Self {
        Self::default()
    }
}
