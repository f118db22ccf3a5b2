use pretty_assertions::assert_eq;
use xlpivot::{
    from_xml_str, read_part,
    stream::pivot::{
        cache_definition::{CacheSource, SourceType},
        cache_hierarchy::CacheHierarchy,
        list::List,
        table_definition::{DataConsolidateFunction, Location},
    },
    to_xml_string, write_part, CacheField, Item, ItemKind, PivotCacheDefinition,
    PivotCacheRecords, PivotField, PivotTableDefinition, Tuple, TupleGroup, XlsxError, XmlOptions,
};

const DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

const OLAP_CACHE: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<pivotCacheDefinition xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" saveData="0" refreshedBy="Analyst" refreshedDate="45412.25" backgroundQuery="1" missingItemsLimit="0" createdVersion="3" refreshedVersion="8" minRefreshableVersion="3" recordCount="0" upgradeOnRefresh="1" tupleCache="1" supportSubquery="1" supportAdvancedDrill="1">"#,
    r#"<cacheSource type="external" connectionId="1"/>"#,
    r#"<cacheFields count="1"><cacheField name="[Product].[Category].[Category]" caption="Category" numFmtId="0" hierarchy="1" level="1"><sharedItems count="2"><s v="[Product].[Category].&amp;[1]" c="Bikes" cp="1"><x v="2"/></s><s v="[Product].[Category].&amp;[3]" c="Clothing" cp="1"><x/></s></sharedItems><mpMap v="1"/></cacheField></cacheFields>"#,
    r#"<cacheHierarchies count="2"><cacheHierarchy uniqueName="[Measures].[Sales Amount]" caption="Sales Amount" measure="1" count="0" oneField="1"/><cacheHierarchy uniqueName="[Product].[Category]" caption="Category" defaultMemberUniqueName="[Product].[Category].[All Products]" allUniqueName="[Product].[Category].[All Products]" dimensionUniqueName="[Product]" count="2" unbalanced="0"><fieldsUsage count="2"><fieldUsage x="-1"/><fieldUsage x="0"/></fieldsUsage></cacheHierarchy></cacheHierarchies>"#,
    r#"<tupleCache><entries count="1"><n v="1250.75" in="0"><tpls c="1"><tpl fld="0" hier="1" item="0"/></tpls></n></entries></tupleCache>"#,
    r#"</pivotCacheDefinition>"#,
);

#[test]
fn olap_cache_definition_round_trip() {
    init_tracing();
    let definition: PivotCacheDefinition = from_xml_str(OLAP_CACHE).unwrap();

    assert!(!definition.save_data);
    assert_eq!(definition.missing_items_limit, Some(0));
    assert_eq!(definition.source.source_type, SourceType::External);

    let field = &definition.fields[0];
    let shared = field.shared_items.as_ref().unwrap();
    assert_eq!(shared.items.len(), 2);
    let bikes = shared.items.get(0).unwrap();
    assert_eq!(bikes.caption.as_deref(), Some("Bikes"));
    assert_eq!(bikes.member_property_indexes, vec![2]);
    let clothing = shared.items.get(1).unwrap();
    assert_eq!(clothing.member_property_indexes, vec![0]);

    let hierarchies = definition.hierarchies.as_ref().unwrap();
    assert!(hierarchies[0].measure);
    assert_eq!(hierarchies[1].count, 2);

    let entries = &definition.tuple_cache.as_ref().unwrap().entries;
    let first = entries.as_ref().unwrap().items.get(0).unwrap();
    assert_eq!(
        first.tuples,
        vec![TupleGroup {
            member_name_count: Some(1),
            tuples: vec![Tuple::new(Some(0), Some(1), 0)],
        }]
    );

    assert_eq!(to_xml_string(&definition).unwrap(), OLAP_CACHE);
}

#[test]
fn clone_of_a_parsed_part_is_independent() {
    let original: PivotCacheDefinition = from_xml_str(OLAP_CACHE).unwrap();
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.refreshed_date = None;
    copy.missing_items_limit = None;
    copy.fields[0].name = "renamed".into();
    if let Some(shared) = copy.fields[0].shared_items.as_mut() {
        shared.items.push(Item::missing()).unwrap();
    }

    assert_eq!(original.refreshed_date, Some(45412.25));
    assert_eq!(original.fields[0].name, "[Product].[Category].[Category]");
    assert_eq!(
        original.fields[0].shared_items.as_ref().map(|s| s.items.len()),
        Some(2)
    );
    // A clone of the stripped copy is still total
    assert_eq!(copy.clone(), copy);
}

#[test]
fn unknown_children_are_skipped_and_extensions_kept() {
    init_tracing();
    let xml = concat!(
        r#"<pivotCacheRecords count="1">"#,
        r#"<future:thing xmlns:future="urn:future"><r><n v="1"/></r></future:thing>"#,
        r#"<r><n v="2"/><unexpected/><s v="kept"/></r>"#,
        r#"<extLst><ext uri="{A}" xmlns:x="urn:x"><x:payload a="1">text</x:payload></ext></extLst>"#,
        r#"</pivotCacheRecords>"#,
    );
    let records: PivotCacheRecords = from_xml_str(xml).unwrap();
    assert_eq!(records.records.len(), 1);
    assert_eq!(
        records.records[0].items.kind_order(),
        vec![(ItemKind::Number, 0), (ItemKind::String, 0)]
    );
    assert_eq!(
        to_xml_string(&records).unwrap(),
        format!(
            "{DECL}{}",
            concat!(
                r#"<pivotCacheRecords count="1">"#,
                r#"<r><n v="2"/><s v="kept"/></r>"#,
                r#"<extLst><ext uri="{A}" xmlns:x="urn:x"><x:payload a="1">text</x:payload></ext></extLst>"#,
                r#"</pivotCacheRecords>"#,
            )
        )
    );
}

#[test]
fn malformed_number_fails_the_whole_part() {
    let err = from_xml_str::<PivotCacheRecords>(
        r#"<pivotCacheRecords count="1"><r><n v="abc"/></r></pivotCacheRecords>"#,
    )
    .unwrap_err();
    match err {
        XlsxError::InvalidAttribute {
            element,
            attribute,
            value,
            expected,
        } => {
            assert_eq!(element, "n");
            assert_eq!(attribute, "v");
            assert_eq!(value, "abc");
            assert_eq!(expected, "xsd:double");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn truncated_part_reports_the_open_tag() {
    let err =
        from_xml_str::<PivotCacheRecords>(r#"<pivotCacheRecords count="1"><r><n v="1"/>"#)
            .unwrap_err();
    assert!(matches!(err, XlsxError::XmlEof(tag) if tag == "r"));
}

#[test]
fn unexpected_root_is_reported() {
    let err = from_xml_str::<PivotTableDefinition>(&format!("{DECL}<pivotCacheRecords/>"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected root element <pivotTableDefinition>, found <pivotCacheRecords>"
    );
}

#[test]
fn missing_required_attributes_are_tolerated() {
    init_tracing();
    let table: PivotTableDefinition = from_xml_str(
        r#"<pivotTableDefinition dataCaption="Values"><location ref="A1:B2"/></pivotTableDefinition>"#,
    )
    .unwrap();
    assert_eq!(table.name, "");
    assert_eq!(table.cache_id, 0);
    assert_eq!(table.location.first_header_row, 0);
    // Required attributes come back even at their default value
    assert_eq!(
        to_xml_string(&table).unwrap(),
        format!(
            "{DECL}{}",
            r#"<pivotTableDefinition name="" cacheId="0" dataCaption="Values"><location ref="A1:B2" firstHeaderRow="0" firstDataRow="0" firstDataCol="0"/></pivotTableDefinition>"#
        )
    );
}

#[test]
fn options_control_declaration_and_indent() {
    let options: XmlOptions =
        serde_json::from_str(r#"{ "declaration": false, "indent": 2 }"#).unwrap();
    assert!(options.trim_text);

    let mut records = PivotCacheRecords::default();
    records
        .push_row([Item::index(0), Item::number(3.0)])
        .unwrap();
    let bytes = write_part(&records, Vec::new(), &options).unwrap();
    let xml = String::from_utf8(bytes).unwrap();
    assert_eq!(
        xml,
        "<pivotCacheRecords count=\"1\">\n  <r>\n    <x v=\"0\"/>\n    <n v=\"3\"/>\n  </r>\n</pivotCacheRecords>"
    );

    // Indented output reads back to the same model
    let reread: PivotCacheRecords = read_part(xml.as_bytes(), &options).unwrap();
    assert_eq!(reread, records);
}

#[test]
fn build_cache_and_table_from_scratch() {
    let mut cache = PivotCacheDefinition::new(CacheSource::worksheet("Sales", "A1:C5"));
    cache.refreshed_version = 8;
    cache.record_count = Some(4);
    cache.add_field(
        CacheField::with_items("Region", [Item::string("North"), Item::string("South")]).unwrap(),
    );
    cache.add_field(
        CacheField::with_items("Quarter", [Item::number(1.0), Item::number(2.0)]).unwrap(),
    );
    cache.add_field(CacheField::new("Revenue"));
    cache.hierarchies = Some(List::from(vec![CacheHierarchy::new("[Region]", 1)]));

    let cache_xml = to_xml_string(&cache).unwrap();
    assert!(cache_xml.contains(
        r#"<cacheField name="Quarter"><sharedItems containsSemiMixedTypes="0" containsString="0" containsNumber="1" containsInteger="1" minValue="1" maxValue="2" count="2"><n v="1"/><n v="2"/></sharedItems></cacheField>"#
    ));
    assert_eq!(from_xml_str::<PivotCacheDefinition>(&cache_xml).unwrap(), cache);

    let mut table = PivotTableDefinition::new("Summary", 5, Location::new("E3:G6", 1, 1, 1), 3);
    table.add_row_field(0).unwrap();
    table.add_column_field(1).unwrap();
    table
        .add_data_field(2, "Sum of Revenue", DataConsolidateFunction::Sum)
        .unwrap();
    if let Some(fields) = table.pivot_fields.as_mut() {
        fields[0].set_items(2);
        fields[1].set_items(2);
    }
    assert!(matches!(
        table.add_page_field(3),
        Err(XlsxError::FieldOutOfRange { index: 3, len: 3 })
    ));

    let table_xml = to_xml_string(&table).unwrap();
    assert!(table_xml.contains(
        r#"<pivotFields count="3"><pivotField axis="axisRow"><items count="3"><item x="0"/><item x="1"/><item t="default"/></items></pivotField><pivotField axis="axisCol"><items count="3"><item x="0"/><item x="1"/><item t="default"/></items></pivotField><pivotField dataField="1"/></pivotFields>"#
    ));
    assert!(table_xml.contains(r#"<rowFields count="1"><field x="0"/></rowFields>"#));
    assert!(table_xml.contains(
        r#"<dataFields count="1"><dataField name="Sum of Revenue" fld="2"/></dataFields>"#
    ));
    assert_eq!(from_xml_str::<PivotTableDefinition>(&table_xml).unwrap(), table);
}

#[test]
fn default_pivot_field_is_an_empty_element() {
    let mut table = PivotTableDefinition::new("T", 0, Location::new("A1:A1", 0, 0, 0), 1);
    table.data_caption = "Data".into();
    let xml = to_xml_string(&table).unwrap();
    assert!(xml.contains(r#"<pivotFields count="1"><pivotField/></pivotFields>"#));
    assert_eq!(
        from_xml_str::<PivotTableDefinition>(&xml)
            .unwrap()
            .pivot_fields
            .map(|fields| fields.entries),
        Some(vec![PivotField::default()])
    );
}

#[test]
fn sub_second_dates_survive_a_round_trip() {
    let stamp = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_milli_opt(3, 4, 5, 678))
        .unwrap();
    let mut part = PivotCacheRecords::new();
    part.push_row([Item::date_time(stamp)]).unwrap();

    let xml = to_xml_string(&part).unwrap();
    assert!(xml.contains(r#"<d v="2024-01-02T03:04:05.678"/>"#));
    assert_eq!(from_xml_str::<PivotCacheRecords>(&xml).unwrap(), part);
}
