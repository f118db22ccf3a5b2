use derive::{XmlDefault, XmlRead, XmlWrite};

/// A coordinate selecting one member of a cache hierarchy (`CT_Tuple`).
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_Tuple">
///     <attribute name="fld" type="xsd:unsignedInt"/>
///     <attribute name="hier" type="xsd:unsignedInt"/>
///     <attribute name="item" type="xsd:unsignedInt" use="required"/>
/// </complexType>
/// ```
///
/// # Fields
/// - `field`: Index of the cache field (`fld`).
/// - `hierarchy`: Index of the cache hierarchy (`hier`).
/// - `item`: Index of the member within the field or hierarchy (`item`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "tpl")]
pub struct Tuple {
    #[xml(name = "fld")]
    pub field: Option<u32>,
    #[xml(name = "hier")]
    pub hierarchy: Option<u32>,
    #[xml(name = "item", required)]
    pub item: u32,
}
impl Tuple {
    pub fn new(field: Option<u32>, hierarchy: Option<u32>, item: u32) -> Self {
        Self {
            field,
            hierarchy,
            item,
        }
    }
}

/// An ordered set of [`Tuple`]s (`CT_Tuples`).
///
/// The same shape serves as the `tpls` child of items, sets and queries and
/// as the `sortByTuple` child of a set; the parent picks the tag.
///
/// ```xml
/// <complexType name="CT_Tuples">
///     <sequence>
///         <element name="tpl" type="CT_Tuple" minOccurs="1" maxOccurs="unbounded"/>
///     </sequence>
///     <attribute name="c" type="xsd:unsignedInt"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
pub struct TupleGroup {
    /// Member name count (`c`)
    #[xml(name = "c")]
    pub member_name_count: Option<u32>,
    #[xml(following_elements)]
    pub tuples: Vec<Tuple>,
}
impl TupleGroup {
    pub fn new(tuples: Vec<Tuple>) -> Self {
        Self {
            member_name_count: None,
            tuples,
        }
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}

#[cfg(test)]
mod tuple {
    use super::{Tuple, TupleGroup};
    use crate::stream::pivot::test_support::{read, write};
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_field_is_left_off() {
        let tuple = Tuple::new(None, Some(3), 7);
        let xml = write(&tuple, "tpl");
        assert_eq!(xml, r#"<tpl hier="3" item="7"/>"#);
        let parsed: Tuple = read(&xml);
        assert_eq!(parsed, tuple);
        assert_eq!(parsed.field, None);
    }

    #[test]
    fn item_zero_is_still_written() {
        assert_eq!(write(&Tuple::default(), "tpl"), r#"<tpl item="0"/>"#);
    }

    #[test]
    fn group_keeps_tuple_order_and_role_tag() {
        let xml = r#"<sortByTuple c="2"><tpl fld="1" item="4"/><tpl hier="0" item="2"/></sortByTuple>"#;
        let group: TupleGroup = read(xml);
        assert_eq!(group.member_name_count, Some(2));
        assert_eq!(
            group.tuples,
            vec![Tuple::new(Some(1), None, 4), Tuple::new(None, Some(0), 2)]
        );
        assert_eq!(write(&group, "sortByTuple"), xml);
    }

    #[test]
    fn malformed_item_fails() {
        use crate::stream::utils::XmlReader;
        use quick_xml::{events::Event, Reader};

        let mut reader = Reader::from_reader(r#"<tpl item="x"/>"#.as_bytes());
        let mut buf = Vec::new();
        let Ok(Event::Empty(e)) = reader.read_event_into(&mut buf) else {
            panic!("expected an empty element");
        };
        let mut tuple = Tuple::default();
        let err = tuple.read_xml(&e, &mut reader, true).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"<tpl> attribute `item` expects xsd:unsignedInt, found "x""#
        );
    }
}
