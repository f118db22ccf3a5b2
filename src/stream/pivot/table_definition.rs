use super::{
    extension::ExtensionList,
    index::{FieldRef, MemberIndex},
    list::List,
    pivot_area::PivotArea,
    pivot_field::{Axis, ItemType, PivotField},
    PivotPart, MAIN_NS,
};
use crate::errors::XlsxError;
use derive::{XmlDefault, XmlEnum, XmlRead, XmlWrite};

/// Represents the root of a `PivotTable` part.
///
/// This struct corresponds to the `CT_pivotTableDefinition` complex type in the XML schema. It
/// holds the table layout and display switches as attributes, and the placement of every pivot
/// field as child lists.
///
/// # XML Schema Mapping
/// The struct maps to the following XML schema definition (children only, the attribute set is
/// listed field by field below):
/// ```xml
/// <complexType name="CT_pivotTableDefinition">
///     <sequence>
///         <element name="location" type="CT_Location"/>
///         <element name="pivotFields" type="CT_PivotFields" minOccurs="0"/>
///         <element name="rowFields" type="CT_RowFields" minOccurs="0"/>
///         <element name="rowItems" type="CT_rowItems" minOccurs="0"/>
///         <element name="colFields" type="CT_ColFields" minOccurs="0"/>
///         <element name="colItems" type="CT_colItems" minOccurs="0"/>
///         <element name="pageFields" type="CT_PageFields" minOccurs="0"/>
///         <element name="dataFields" type="CT_DataFields" minOccurs="0"/>
///         <element name="formats" type="CT_Formats" minOccurs="0"/>
///         <element name="conditionalFormats" type="CT_ConditionalFormats" minOccurs="0"/>
///         <element name="chartFormats" type="CT_ChartFormats" minOccurs="0"/>
///         <element name="pivotHierarchies" type="CT_PivotHierarchies" minOccurs="0"/>
///         <element name="pivotTableStyleInfo" minOccurs="0" type="CT_PivotTableStyle"/>
///         <element name="filters" minOccurs="0" type="CT_PivotFilters"/>
///         <element name="rowHierarchiesUsage" type="CT_RowHierarchiesUsage" minOccurs="0"/>
///         <element name="colHierarchiesUsage" type="CT_ColHierarchiesUsage" minOccurs="0"/>
///         <element name="extLst" minOccurs="0" type="CT_ExtensionList"/>
///     </sequence>
/// </complexType>
/// ```
///
/// Conditional formats, chart formats, pivot hierarchies, filters and hierarchy usage are
/// skipped when read.
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
pub struct PivotTableDefinition {
    #[xml(name = "xmlns")]
    pub namespace: Option<String>,
    #[xml(name = "name", required)]
    pub name: String,
    /// Id of the cache in the workbook's `pivotCaches` list
    #[xml(name = "cacheId", required)]
    pub cache_id: u32,
    #[xml(name = "dataOnRows")]
    pub data_on_rows: bool,
    #[xml(name = "dataPosition")]
    pub data_position: Option<u32>,
    #[xml(name = "autoFormatId")]
    pub auto_format_id: Option<u32>,
    #[xml(name = "applyNumberFormats")]
    pub apply_number_formats: Option<bool>,
    #[xml(name = "applyBorderFormats")]
    pub apply_border_formats: Option<bool>,
    #[xml(name = "applyFontFormats")]
    pub apply_font_formats: Option<bool>,
    #[xml(name = "applyPatternFormats")]
    pub apply_pattern_formats: Option<bool>,
    #[xml(name = "applyAlignmentFormats")]
    pub apply_alignment_formats: Option<bool>,
    #[xml(name = "applyWidthHeightFormats")]
    pub apply_width_height_formats: Option<bool>,
    #[xml(name = "dataCaption", required)]
    pub data_caption: String,
    #[xml(name = "grandTotalCaption")]
    pub grand_total_caption: Option<String>,
    #[xml(name = "errorCaption")]
    pub error_caption: Option<String>,
    #[xml(name = "showError")]
    pub show_error: bool,
    #[xml(name = "missingCaption")]
    pub missing_caption: Option<String>,
    #[xml(name = "showMissing", default = true)]
    pub show_missing: bool,
    #[xml(name = "pageStyle")]
    pub page_style: Option<String>,
    #[xml(name = "pivotTableStyle")]
    pub pivot_table_style: Option<String>,
    #[xml(name = "vacatedStyle")]
    pub vacated_style: Option<String>,
    #[xml(name = "tag")]
    pub tag: Option<String>,
    #[xml(name = "updatedVersion", default = 0)]
    pub updated_version: u8,
    #[xml(name = "minRefreshableVersion", default = 0)]
    pub min_refreshable_version: u8,
    #[xml(name = "asteriskTotals")]
    pub asterisk_totals: bool,
    #[xml(name = "showItems", default = true)]
    pub show_items: bool,
    #[xml(name = "editData")]
    pub edit_data: bool,
    #[xml(name = "disableFieldList")]
    pub disable_field_list: bool,
    #[xml(name = "showCalcMbrs", default = true)]
    pub show_calculated_members: bool,
    #[xml(name = "visualTotals", default = true)]
    pub visual_totals: bool,
    #[xml(name = "showMultipleLabel", default = true)]
    pub show_multiple_label: bool,
    #[xml(name = "showDataDropDown", default = true)]
    pub show_data_drop_down: bool,
    #[xml(name = "showDrill", default = true)]
    pub show_drill: bool,
    #[xml(name = "printDrill")]
    pub print_drill: bool,
    #[xml(name = "showMemberPropertyTips", default = true)]
    pub show_member_property_tips: bool,
    #[xml(name = "showDataTips", default = true)]
    pub show_data_tips: bool,
    #[xml(name = "enableWizard", default = true)]
    pub enable_wizard: bool,
    #[xml(name = "enableDrill", default = true)]
    pub enable_drill: bool,
    #[xml(name = "enableFieldProperties", default = true)]
    pub enable_field_properties: bool,
    #[xml(name = "preserveFormatting", default = true)]
    pub preserve_formatting: bool,
    #[xml(name = "useAutoFormatting")]
    pub use_auto_formatting: bool,
    #[xml(name = "pageWrap", default = 0)]
    pub page_wrap: u32,
    #[xml(name = "pageOverThenDown")]
    pub page_over_then_down: bool,
    #[xml(name = "subtotalHiddenItems")]
    pub subtotal_hidden_items: bool,
    #[xml(name = "rowGrandTotals", default = true)]
    pub row_grand_totals: bool,
    #[xml(name = "colGrandTotals", default = true)]
    pub column_grand_totals: bool,
    #[xml(name = "fieldPrintTitles")]
    pub field_print_titles: bool,
    #[xml(name = "itemPrintTitles")]
    pub item_print_titles: bool,
    #[xml(name = "mergeItem")]
    pub merge_item: bool,
    #[xml(name = "showDropZones", default = true)]
    pub show_drop_zones: bool,
    #[xml(name = "createdVersion", default = 0)]
    pub created_version: u8,
    #[xml(name = "indent", default = 1)]
    pub indent: u32,
    #[xml(name = "showEmptyRow")]
    pub show_empty_row: bool,
    #[xml(name = "showEmptyCol")]
    pub show_empty_column: bool,
    #[xml(name = "showHeaders", default = true)]
    pub show_headers: bool,
    #[xml(name = "compact", default = true)]
    pub compact: bool,
    #[xml(name = "outline")]
    pub outline: bool,
    #[xml(name = "outlineData")]
    pub outline_data: bool,
    #[xml(name = "compactData", default = true)]
    pub compact_data: bool,
    #[xml(name = "published")]
    pub published: bool,
    #[xml(name = "gridDropZones")]
    pub grid_drop_zones: bool,
    #[xml(name = "immersive", default = true)]
    pub immersive: bool,
    #[xml(name = "multipleFieldFilters", default = true)]
    pub multiple_field_filters: bool,
    #[xml(name = "chartFormat", default = 0)]
    pub chart_format: u32,
    #[xml(name = "rowHeaderCaption")]
    pub row_header_caption: Option<String>,
    #[xml(name = "colHeaderCaption")]
    pub column_header_caption: Option<String>,
    #[xml(name = "fieldListSortAscending")]
    pub field_list_sort_ascending: bool,
    #[xml(name = "mdxSubqueries")]
    pub mdx_subqueries: bool,
    #[xml(name = "customListSort", default = true)]
    pub custom_list_sort: bool,

    #[xml(element, name = "location")]
    pub location: Location,
    #[xml(element, name = "pivotFields")]
    pub pivot_fields: Option<List<PivotField>>,
    #[xml(element, name = "rowFields")]
    pub row_fields: Option<List<FieldRef>>,
    #[xml(element, name = "rowItems")]
    pub row_items: Option<List<RowItem>>,
    #[xml(element, name = "colFields")]
    pub column_fields: Option<List<FieldRef>>,
    #[xml(element, name = "colItems")]
    pub column_items: Option<List<RowItem>>,
    #[xml(element, name = "pageFields")]
    pub page_fields: Option<List<PageField>>,
    #[xml(element, name = "dataFields")]
    pub data_fields: Option<List<DataField>>,
    #[xml(element, name = "formats")]
    pub formats: Option<List<Format>>,
    #[xml(element, name = "pivotTableStyleInfo")]
    pub style: Option<PivotTableStyleInfo>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}
impl PivotPart for PivotTableDefinition {
    const ROOT: &'static str = "pivotTableDefinition";
}
impl PivotTableDefinition {
    /// A table over cache `cache_id` with one default pivot field per cache field.
    pub fn new(
        name: impl Into<String>,
        cache_id: u32,
        location: Location,
        field_count: usize,
    ) -> Self {
        Self {
            namespace: Some(MAIN_NS.into()),
            name: name.into(),
            cache_id,
            data_caption: "Values".into(),
            location,
            pivot_fields: Some((0..field_count).map(|_| PivotField::default()).collect()),
            ..Default::default()
        }
    }

    /// Checks `index` against the pivot fields and returns the axis reference to it.
    fn field_ref(&self, index: usize) -> Result<FieldRef, XlsxError> {
        let len = self.pivot_fields.as_ref().map_or(0, |fields| fields.len());
        match i32::try_from(index) {
            Ok(x) if index < len => Ok(FieldRef::new(x)),
            _ => Err(XlsxError::FieldOutOfRange { index, len }),
        }
    }

    /// Moves pivot field `index` onto `axis`, taking it off any other axis.
    ///
    /// Returns `None` when the field already sits on `axis`.
    fn place(&mut self, index: usize, axis: Axis) -> Result<Option<FieldRef>, XlsxError> {
        let field = self.field_ref(index)?;
        if let Some(pivot_field) = self
            .pivot_fields
            .as_mut()
            .and_then(|fields| fields.get_mut(index))
        {
            pivot_field.axis = Some(axis);
        }
        let on_axis = match axis {
            Axis::Row => self.row_fields.as_ref().is_some_and(|f| f.contains(&field)),
            Axis::Column => self.column_fields.as_ref().is_some_and(|f| f.contains(&field)),
            Axis::Page => self
                .page_fields
                .as_ref()
                .is_some_and(|pages| pages.iter().any(|page| page.field == field.index)),
            Axis::Values => false,
        };
        if on_axis {
            return Ok(None);
        }

        for fields in [&mut self.row_fields, &mut self.column_fields] {
            if let Some(list) = fields.as_mut() {
                list.retain(|x| *x != field);
            }
            if fields.as_ref().is_some_and(|list| list.is_empty()) {
                *fields = None;
            }
        }
        if let Some(pages) = self.page_fields.as_mut() {
            let before = pages.len();
            pages.retain(|page| page.field != field.index);
            if pages.len() != before {
                if pages.is_empty() {
                    self.page_fields = None;
                }
                self.sync_page_counts();
            }
        }
        Ok(Some(field))
    }

    fn sync_page_counts(&mut self) {
        let pages = self.page_fields.as_ref().map_or(0, |pages| pages.len());
        self.location.row_page_count = pages as u32;
        self.location.column_page_count = u32::from(pages > 0);
    }

    /// Places pivot field `index` on the row axis.
    pub fn add_row_field(&mut self, index: usize) -> Result<(), XlsxError> {
        if let Some(field) = self.place(index, Axis::Row)? {
            self.row_fields.get_or_insert_with(List::default).push(field);
        }
        Ok(())
    }

    /// Places pivot field `index` on the column axis.
    pub fn add_column_field(&mut self, index: usize) -> Result<(), XlsxError> {
        if let Some(field) = self.place(index, Axis::Column)? {
            self.column_fields
                .get_or_insert_with(List::default)
                .push(field);
        }
        Ok(())
    }

    /// Uses pivot field `index` as a report filter.
    pub fn add_page_field(&mut self, index: usize) -> Result<(), XlsxError> {
        if let Some(field) = self.place(index, Axis::Page)? {
            self.page_fields
                .get_or_insert_with(List::default)
                .push(PageField {
                    field: field.index,
                    hierarchy: Some(-1),
                    ..Default::default()
                });
            self.sync_page_counts();
        }
        Ok(())
    }

    /// Summarizes pivot field `index` into the values area.
    ///
    /// A second value field also puts the values pseudo field on the
    /// column axis, or on the row axis when `data_on_rows` is set.
    pub fn add_data_field(
        &mut self,
        index: usize,
        name: impl Into<String>,
        subtotal: DataConsolidateFunction,
    ) -> Result<(), XlsxError> {
        let field = self.field_ref(index)?;
        if let Some(pivot_field) = self
            .pivot_fields
            .as_mut()
            .and_then(|fields| fields.get_mut(index))
        {
            pivot_field.data_field = true;
        }
        let data = self.data_fields.get_or_insert_with(List::default);
        data.push(DataField {
            name: Some(name.into()),
            field: field.index as u32,
            subtotal,
            ..Default::default()
        });
        if data.len() > 1 && !self.has_data_axis() {
            let axis = if self.data_on_rows {
                &mut self.row_fields
            } else {
                &mut self.column_fields
            };
            axis.get_or_insert_with(List::default).push(FieldRef::DATA);
        }
        Ok(())
    }

    fn has_data_axis(&self) -> bool {
        [&self.row_fields, &self.column_fields]
            .into_iter()
            .flatten()
            .any(|fields| fields.contains(&FieldRef::DATA))
    }
}

/// Cell range a `PivotTable` occupies (`CT_Location`).
///
/// ```xml
/// <complexType name="CT_Location">
///     <attribute name="ref" type="ST_Ref" use="required"/>
///     <attribute name="firstHeaderRow" type="xsd:unsignedInt" use="required"/>
///     <attribute name="firstDataRow" type="xsd:unsignedInt" use="required"/>
///     <attribute name="firstDataCol" type="xsd:unsignedInt" use="required"/>
///     <attribute name="rowPageCount" type="xsd:unsignedInt" default="0"/>
///     <attribute name="colPageCount" type="xsd:unsignedInt" default="0"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
pub struct Location {
    #[xml(name = "ref", required)]
    pub reference: String,
    #[xml(name = "firstHeaderRow", required)]
    pub first_header_row: u32,
    #[xml(name = "firstDataRow", required)]
    pub first_data_row: u32,
    #[xml(name = "firstDataCol", required)]
    pub first_data_column: u32,
    #[xml(name = "rowPageCount", default = 0)]
    pub row_page_count: u32,
    #[xml(name = "colPageCount", default = 0)]
    pub column_page_count: u32,
}
impl Location {
    pub fn new(
        reference: impl Into<String>,
        header_row: u32,
        data_row: u32,
        data_column: u32,
    ) -> Self {
        Self {
            reference: reference.into(),
            first_header_row: header_row,
            first_data_row: data_row,
            first_data_column: data_column,
            ..Default::default()
        }
    }
}

/// A row or column of the rendered table (`CT_I`).
///
/// Each `x` child is the item index of one field on the axis; fields whose
/// item repeats the previous line are not listed, `repeat` counts them.
#[derive(Debug, Clone, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "i")]
pub struct RowItem {
    #[xml(name = "t")]
    pub item_type: ItemType,
    /// Number of leading fields repeated from the previous line (`r`)
    #[xml(name = "r", default = 0)]
    pub repeat: u32,
    /// Data field index (`i`)
    #[xml(name = "i", default = 0)]
    pub data_field: u32,
    #[xml(element, name = "x")]
    pub members: Vec<MemberIndex>,
}

/// A report filter field (`CT_PageField`).
#[derive(Debug, Clone, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "pageField")]
pub struct PageField {
    #[xml(name = "fld", required)]
    pub field: i32,
    /// Selected item, all items when absent
    #[xml(name = "item")]
    pub item: Option<u32>,
    #[xml(name = "hier")]
    pub hierarchy: Option<i32>,
    #[xml(name = "name")]
    pub name: Option<String>,
    #[xml(name = "cap")]
    pub caption: Option<String>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}

/// Aggregation applied to a value field (`ST_DataConsolidateFunction`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, XmlEnum)]
#[camel]
pub enum DataConsolidateFunction {
    Average,
    Count,
    CountNums,
    Max,
    Min,
    Product,
    StdDev,
    #[name("stdDevp")]
    StdDevP,
    #[default]
    Sum,
    Var,
    #[name("varp")]
    VarP,
}

/// How a value field is displayed (`ST_ShowDataAs`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, XmlEnum)]
#[camel]
pub enum ShowDataAs {
    #[default]
    Normal,
    Difference,
    Percent,
    PercentDiff,
    RunTotal,
    PercentOfRow,
    PercentOfCol,
    PercentOfTotal,
    Index,
}

/// A field summarized in the values area (`CT_DataField`).
///
/// ```xml
/// <complexType name="CT_DataField">
///     <sequence>
///         <element name="extLst" minOccurs="0" type="CT_ExtensionList"/>
///     </sequence>
///     <attribute name="name" use="optional" type="s:ST_Xstring"/>
///     <attribute name="fld" use="required" type="xsd:unsignedInt"/>
///     <attribute name="subtotal" type="ST_DataConsolidateFunction" default="sum"/>
///     <attribute name="showDataAs" type="ST_ShowDataAs" default="normal"/>
///     <attribute name="baseField" type="xsd:int" default="-1"/>
///     <attribute name="baseItem" type="xsd:unsignedInt" default="1048832"/>
///     <attribute name="numFmtId" type="ST_NumFmtId" use="optional"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "dataField")]
pub struct DataField {
    #[xml(name = "name")]
    pub name: Option<String>,
    #[xml(name = "fld", required)]
    pub field: u32,
    #[xml(name = "subtotal")]
    pub subtotal: DataConsolidateFunction,
    #[xml(name = "showDataAs")]
    pub show_data_as: ShowDataAs,
    #[xml(name = "baseField", default = -1)]
    pub base_field: i32,
    #[xml(name = "baseItem", default = 1048832)]
    pub base_item: u32,
    #[xml(name = "numFmtId")]
    pub number_format_id: Option<u32>,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}

/// What a format rule does to its area (`ST_FormatAction`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, XmlEnum)]
#[camel]
pub enum FormatAction {
    Blank,
    #[default]
    Formatting,
    Drill,
    Formula,
}

/// A differential format applied to a pivot area (`CT_Format`).
#[derive(Debug, Clone, PartialEq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "format")]
pub struct Format {
    #[xml(name = "action")]
    pub action: FormatAction,
    #[xml(name = "dxfId")]
    pub dxf_id: Option<u32>,
    #[xml(element, name = "pivotArea")]
    pub area: PivotArea,
    #[xml(element, name = "extLst")]
    pub extensions: Option<ExtensionList>,
}

/// Table style applied to the `PivotTable` (`CT_PivotTableStyle`).
#[derive(Debug, Clone, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
pub struct PivotTableStyleInfo {
    #[xml(name = "name")]
    pub name: Option<String>,
    #[xml(name = "showRowHeaders")]
    pub show_row_headers: Option<bool>,
    #[xml(name = "showColHeaders")]
    pub show_column_headers: Option<bool>,
    #[xml(name = "showRowStripes")]
    pub show_row_stripes: Option<bool>,
    #[xml(name = "showColStripes")]
    pub show_column_stripes: Option<bool>,
    #[xml(name = "showLastColumn")]
    pub show_last_column: Option<bool>,
}

#[cfg(test)]
mod table_definition {
    use super::{DataConsolidateFunction, Location, PivotTableDefinition, RowItem, ShowDataAs};
    use crate::{
        errors::XlsxError,
        stream::pivot::{
            from_xml_str,
            index::{FieldRef, MemberIndex},
            pivot_field::{Axis, ItemType},
            test_support::{read, write},
            to_xml_string,
        },
    };
    use pretty_assertions::assert_eq;

    const TABLE: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<pivotTableDefinition xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" name="PivotTable1" cacheId="3" applyNumberFormats="0" applyBorderFormats="0" applyFontFormats="0" applyPatternFormats="0" applyAlignmentFormats="0" applyWidthHeightFormats="1" dataCaption="Values" updatedVersion="8" minRefreshableVersion="3" useAutoFormatting="1" itemPrintTitles="1" createdVersion="8" indent="0" outline="1" outlineData="1" multipleFieldFilters="0">"#,
        r#"<location ref="A3:B6" firstHeaderRow="1" firstDataRow="1" firstDataCol="1"/>"#,
        r#"<pivotFields count="2">"#,
        r#"<pivotField axis="axisRow" showAll="0"><items count="3"><item x="0"/><item x="1"/><item t="default"/></items></pivotField>"#,
        r#"<pivotField dataField="1" showAll="0"/>"#,
        r#"</pivotFields>"#,
        r#"<rowFields count="1"><field x="0"/></rowFields>"#,
        r#"<rowItems count="3"><i><x/></i><i><x v="1"/></i><i t="grand"><x/></i></rowItems>"#,
        r#"<colItems count="1"><i/></colItems>"#,
        r#"<dataFields count="1"><dataField name="Sum of Sales" fld="1" baseField="0" baseItem="0"/></dataFields>"#,
        r#"<formats count="1"><format dxfId="0"><pivotArea outline="0" fieldPosition="0"><references count="1"><reference field="4294967294" count="1" selected="0"><x v="0"/></reference></references></pivotArea></format></formats>"#,
        r#"<pivotTableStyleInfo name="PivotStyleLight16" showRowHeaders="1" showColHeaders="1" showRowStripes="0" showColStripes="0" showLastColumn="1"/>"#,
        r#"</pivotTableDefinition>"#,
    );

    #[test]
    fn excel_table_round_trip() {
        let table: PivotTableDefinition = from_xml_str(TABLE).unwrap();
        assert_eq!(table.name, "PivotTable1");
        assert_eq!(table.indent, 0);
        assert_eq!(table.location.reference, "A3:B6");
        let fields = table.pivot_fields.as_ref().unwrap();
        assert_eq!(fields[0].axis, Some(Axis::Row));
        assert!(fields[1].data_field);
        let rows = table.row_items.as_ref().unwrap();
        assert_eq!(rows[1].members, vec![MemberIndex::new(1)]);
        assert_eq!(rows[2].item_type, ItemType::Grand);
        assert_eq!(to_xml_string(&table).unwrap(), TABLE);
    }

    #[test]
    fn builder_places_fields_on_axes() {
        let location = Location::new("D1:F8", 1, 2, 1);
        let mut table = PivotTableDefinition::new("PivotTable2", 1, location, 4);
        table.add_row_field(0).unwrap();
        table.add_column_field(1).unwrap();
        table.add_page_field(2).unwrap();
        table
            .add_data_field(3, "Sum of Amount", DataConsolidateFunction::Sum)
            .unwrap();
        table
            .add_data_field(3, "Max of Amount", DataConsolidateFunction::Max)
            .unwrap();

        let fields = table.pivot_fields.as_ref().unwrap();
        assert_eq!(fields[0].axis, Some(Axis::Row));
        assert_eq!(fields[1].axis, Some(Axis::Column));
        assert_eq!(fields[2].axis, Some(Axis::Page));
        assert!(fields[3].data_field);
        assert_eq!(
            table.column_fields.as_ref().map(|c| c.entries.clone()),
            Some(vec![FieldRef::new(1), FieldRef::DATA])
        );
        assert_eq!(table.location.row_page_count, 1);

        let xml = to_xml_string(&table).unwrap();
        assert!(xml.contains(r#"<pageFields count="1"><pageField fld="2" hier="-1"/></pageFields>"#));
        assert!(xml.contains(r#"<dataField name="Max of Amount" fld="3" subtotal="max"/>"#));
        let reread: PivotTableDefinition = from_xml_str(&xml).unwrap();
        assert_eq!(reread, table);
    }

    #[test]
    fn builder_moves_fields_between_axes() {
        let location = Location::new("A3:C9", 1, 2, 1);
        let mut table = PivotTableDefinition::new("PivotTable4", 2, location, 3);
        table.add_row_field(0).unwrap();
        table.add_column_field(0).unwrap();
        table.add_row_field(1).unwrap();
        table.add_row_field(1).unwrap();

        let fields = table.pivot_fields.as_ref().unwrap();
        assert_eq!(fields[0].axis, Some(Axis::Column));
        assert_eq!(fields[1].axis, Some(Axis::Row));
        assert_eq!(
            table.row_fields.as_ref().map(|r| r.entries.clone()),
            Some(vec![FieldRef::new(1)])
        );
        assert_eq!(
            table.column_fields.as_ref().map(|c| c.entries.clone()),
            Some(vec![FieldRef::new(0)])
        );

        table.add_page_field(2).unwrap();
        table.add_page_field(2).unwrap();
        assert_eq!(table.page_fields.as_ref().map(|p| p.len()), Some(1));
        assert_eq!(table.location.row_page_count, 1);

        table.add_column_field(2).unwrap();
        assert_eq!(table.page_fields, None);
        assert_eq!(table.location.row_page_count, 0);
        assert_eq!(table.location.column_page_count, 0);

        table.add_row_field(0).unwrap();
        assert_eq!(
            table.column_fields.as_ref().map(|c| c.entries.clone()),
            Some(vec![FieldRef::new(2)])
        );
        let xml = to_xml_string(&table).unwrap();
        assert!(xml.contains(r#"<rowFields count="2"><field x="1"/><field x="0"/></rowFields><colFields count="1"><field x="2"/></colFields>"#));
    }

    #[test]
    fn builder_rejects_unknown_fields() {
        let location = Location::new("A1", 0, 1, 1);
        let mut table = PivotTableDefinition::new("PivotTable3", 0, location, 2);
        let err = table.add_row_field(5).unwrap_err();
        assert!(matches!(err, XlsxError::FieldOutOfRange { index: 5, len: 2 }));
        assert_eq!(table.row_fields, None);
    }

    #[test]
    fn data_field_enumerations() {
        let field: super::DataField = read(
            r#"<dataField fld="0" subtotal="stdDevp" showDataAs="percentOfCol" numFmtId="10"/>"#,
        );
        assert_eq!(field.subtotal, DataConsolidateFunction::StdDevP);
        assert_eq!(field.show_data_as, ShowDataAs::PercentOfCol);
        assert_eq!(field.base_field, -1);
        assert_eq!(
            write(&field, "dataField"),
            r#"<dataField fld="0" subtotal="stdDevp" showDataAs="percentOfCol" numFmtId="10"/>"#
        );
    }

    #[test]
    fn default_row_item_is_bare() {
        assert_eq!(write(&RowItem::default(), "i"), "<i/>");
    }
}
