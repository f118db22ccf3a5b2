use proptest::prelude::*;
use std::collections::HashMap;
use xlpivot::{
    from_xml_str, stream::pivot::cache_records::CacheRecord, to_xml_string, Item, ItemKind,
    PivotCacheRecords,
};

fn item() -> impl Strategy<Value = Item> {
    prop_oneof![
        Just(Item::missing()),
        (-1.0e6..1.0e6f64).prop_map(Item::number),
        any::<bool>().prop_map(Item::boolean),
        prop::sample::select(vec!["#N/A", "#DIV/0!", "#VALUE!", "#REF!"]).prop_map(Item::error),
        "[a-zA-Z0-9 <>&\"']{0,12}".prop_map(Item::string),
        (0i64..4_000_000_000, prop_oneof![Just(0u32), 0u32..1_000_000_000]).prop_map(
            |(secs, nanos)| {
                Item::date_time(
                    chrono::DateTime::from_timestamp(secs, nanos)
                        .unwrap()
                        .naive_utc(),
                )
            }
        ),
        (0u32..500).prop_map(Item::index),
    ]
}

/// Element names of the record children, in document order.
fn child_tags(xml: &str) -> Vec<String> {
    let start = xml.find("<r>").map(|i| i + 3).unwrap_or(xml.len());
    let end = xml.rfind("</r>").unwrap_or(start);
    xml[start..end]
        .split('<')
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            chunk
                .split(|c: char| c == ' ' || c == '/' || c == '>')
                .next()
                .unwrap_or_default()
                .to_owned()
        })
        .collect()
}

proptest! {
    #[test]
    fn record_order_survives_a_round_trip(items in prop::collection::vec(item(), 0..40)) {
        let mut part = PivotCacheRecords::new();
        part.push_row(items.clone()).unwrap();
        let record: &CacheRecord = &part.records[0];

        // One (kind, index within kind) slot per item, numbered per kind
        let order = record.items.kind_order();
        prop_assert_eq!(order.len(), items.len());
        let mut seen: HashMap<ItemKind, usize> = HashMap::new();
        for (item, (kind, index)) in items.iter().zip(&order) {
            prop_assert_eq!(item.kind(), *kind);
            let next = seen.entry(*kind).or_default();
            prop_assert_eq!(*next, *index);
            *next += 1;
        }
        for kind in ItemKind::ALL {
            prop_assert_eq!(record.items.count_of(kind), seen.get(&kind).copied().unwrap_or(0));
        }

        // Serialization reproduces the kind sequence tag by tag
        let xml = to_xml_string(&part).unwrap();
        let expected: Vec<String> = items.iter().map(|item| item.kind().tag().to_owned()).collect();
        if !items.is_empty() {
            prop_assert_eq!(child_tags(&xml), expected);
        }

        let reread: PivotCacheRecords = from_xml_str(&xml).unwrap();
        prop_assert_eq!(reread.records[0].items.kind_order(), order);
        prop_assert_eq!(&reread.records[0].items, &record.items);
    }

    #[test]
    fn per_kind_views_follow_document_order(items in prop::collection::vec(item(), 0..40)) {
        let mut part = PivotCacheRecords::new();
        part.push_row(items.clone()).unwrap();
        let list = &part.records[0].items;

        let strings: Vec<&str> = items.iter().filter_map(Item::as_str).collect();
        prop_assert_eq!(list.strings().collect::<Vec<_>>(), strings);
        for kind in ItemKind::ALL {
            let bucket: Vec<&Item> = items.iter().filter(|item| item.kind() == kind).collect();
            for (index, expected) in bucket.iter().enumerate() {
                prop_assert_eq!(list.by_kind_index(kind, index), Some(*expected));
            }
            prop_assert_eq!(list.by_kind_index(kind, bucket.len()), None);
        }
    }
}
