use derive::{XmlDefault, XmlRead, XmlWrite};

/// Represents an index within a `PivotTable` selection or a cache record.
///
/// This struct corresponds to the `CT_Index` complex type in the XML schema. It encapsulates
/// an unsigned integer value that represents an index.
///
/// # XML Schema Mapping
/// The struct maps to the following XML schema definition:
/// ```xml
/// <complexType name="CT_Index">
///     <attribute name="v" use="required" type="xsd:unsignedInt"/>
/// </complexType>
/// ```
///
/// # Fields
/// - `value`: The index value (`v`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "x")]
pub struct Index {
    #[xml(name = "v", required)]
    pub value: u32,
}
impl Index {
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

/// Member property index of an item, or a member index of a row/column item.
///
/// This struct corresponds to the `CT_X` complex type. Unlike [`Index`], `v` is
/// optional and defaults to 0, so `<x/>` reads as 0 and 0 is written as `<x/>`.
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_X">
///     <attribute name="v" type="xsd:int" default="0"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "x")]
pub struct MemberIndex {
    #[xml(name = "v", default = 0)]
    pub value: i32,
}
impl MemberIndex {
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}

/// A pivot field placed on the row or column axis (`CT_Field`).
///
/// `x` is the pivot field index, `-2` stands for the data (values) field.
///
/// ```xml
/// <complexType name="CT_Field">
///     <attribute name="x" type="xsd:int" use="required"/>
/// </complexType>
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
#[xml(entry = "field")]
pub struct FieldRef {
    #[xml(name = "x", required)]
    pub index: i32,
}
impl FieldRef {
    /// Position of the values pseudo field on an axis
    pub const DATA: FieldRef = FieldRef { index: -2 };

    pub fn new(index: i32) -> Self {
        Self { index }
    }
}

#[cfg(test)]
mod index {
    use super::{FieldRef, Index, MemberIndex};
    use crate::stream::pivot::test_support::{read, write};
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_member_index_reads_as_zero() {
        let x: MemberIndex = read("<x/>");
        assert_eq!(x, MemberIndex::new(0));
        let x: MemberIndex = read(r#"<x v="4"/>"#);
        assert_eq!(x, MemberIndex::new(4));
    }

    #[test]
    fn zero_member_index_writes_bare_marker() {
        assert_eq!(write(&MemberIndex::new(0), "x"), "<x/>");
        assert_eq!(write(&MemberIndex::new(3), "x"), r#"<x v="3"/>"#);
    }

    #[test]
    fn required_index_is_always_written() {
        assert_eq!(write(&Index::new(0), "x"), r#"<x v="0"/>"#);
        assert_eq!(write(&FieldRef::DATA, "field"), r#"<field x="-2"/>"#);
    }

    #[test]
    fn missing_required_index_falls_back_to_default() {
        let x: Index = read("<x/>");
        assert_eq!(x, Index::new(0));
    }
}
