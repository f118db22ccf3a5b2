//! Derive macros binding plain structs to SpreadsheetML elements.
//!
//! The generated code targets the traits in `crate::stream` of the crate
//! using them, so the macros are meant for use inside that crate only.
mod default;
mod enum_value;
mod meta;
mod reader;
mod writer;

use proc_macro::TokenStream;

/// Derive macro generating an `XmlReader` implementation.
///
/// # Attributes
///
/// ## `#[xml(name = "attrName")]`
/// - **Purpose**: Names the XML attribute or child element behind a field.
/// - **Notes**: Defaults to the field's Rust name. Attribute names are matched
///   on the full qualified key, so `r:id` and `xmlns:r` work as written.
///
/// ## `#[xml(required)]`
/// - **Purpose**: Marks an attribute the schema declares `use="required"`.
/// - **Notes**: A missing required attribute keeps the field default and is
///   reported through `tracing`.
///
/// ## `#[xml(element)]`
/// - **Purpose**: Reads the field from a child element. `Option<T>` holds an
///   optional child, `Vec<T>` every occurrence, anything else a single child.
///
/// ## `#[xml(following_elements)]`
/// - **Purpose**: Hands every child tag not claimed by another field to an
///   `XmlListReader`, which keeps document order for heterogeneous lists.
///
/// ## `#[xml(skip)]`
/// - **Purpose**: Leaves the field out of the XML mapping.
///
/// ## `#[xml(entry = "tag")]` (struct level)
/// - **Purpose**: Also implements `ListEntry` so the struct can live in a
///   counted list under the given tag.
///
/// Children with an unknown tag are skipped.
#[proc_macro_derive(XmlRead, attributes(xml))]
pub fn derive_xml_reader(input: TokenStream) -> TokenStream {
    reader::impl_xml_reader(input)
}

/// Derive macro generating an `XmlWriter` implementation.
///
/// Accepts the same `#[xml(...)]` options as [`XmlRead`]. An attribute is
/// only written when its value differs from the one in `Self::default()`,
/// unless it is `required`. Child elements are written in field order.
///
/// ## `#[xml(name = "tag")]` (struct level)
/// - **Purpose**: Fixes the element tag instead of using the parent's choice.
///
/// ## `#[xml(following_elements, count = "count")]`
/// - **Purpose**: Writes the number of list entries into the `count` attribute.
///
/// # Examples
///
/// ```ignore
/// #[derive(Default, PartialEq, XmlWrite)]
/// struct Location {
///     #[xml(name = "ref", required)]
///     range: String,
///     #[xml(name = "rowPageCount")]
///     row_page_count: u32,
/// }
/// ```
///
/// A default `Location` is written as `<location ref=""/>`.
#[proc_macro_derive(XmlWrite, attributes(xml))]
pub fn derive_xml_writer(input: TokenStream) -> TokenStream {
    writer::impl_xml_writer(input)
}

/// Derive macro generating a `Default` implementation from the schema
/// defaults given as `#[xml(default = expr)]`.
///
/// Fields without a `default` use their type's own `Default`.
#[proc_macro_derive(XmlDefault, attributes(xml))]
pub fn derive_xml_default(input: TokenStream) -> TokenStream {
    default::impl_xml_default(input)
}

/// Derive macro mapping a fieldless enum onto a schema enumeration.
///
/// Variants are written with their Rust name, in camelCase when the enum or
/// the variant carries `#[camel]`, or with the text given by `#[name("...")]`.
#[proc_macro_derive(XmlEnum, attributes(camel, name))]
pub fn derive_xml_enum(input: TokenStream) -> TokenStream {
    enum_value::impl_xml_enum(input)
}
