use crate::stream::pivot::item::ItemKind;
use thiserror::Error;

/// Hiearchy of the entire crate's error types
#[derive(Error, Debug)]
pub enum XlsxError {
    /// An attribute is present but its text does not fit the schema type
    #[error("<{element}> attribute `{attribute}` expects {expected}, found {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        expected: &'static str,
    },
    /// The part does not start with the element its type maps to
    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
    /// An item kind was pushed into a list that the schema does not allow it in
    #[error("<{container}> can not hold {kind:?} items")]
    UnsupportedItem {
        container: &'static str,
        kind: ItemKind,
    },
    /// An edit addressed a slot past the end of an item list
    #[error("item index {index} is out of range for {len} items")]
    ItemOutOfRange { index: usize, len: usize },
    /// A builder call referenced a pivot field that does not exist
    #[error("field index {index} is out of range for {len} pivot fields")]
    FieldOutOfRange { index: usize, len: usize },
    /// Stream reading has reached the end so more than likely enclosed tags are incorrect or missing
    #[error("malformed stream for tag: {0}")]
    XmlEof(String),

    /// The `std::io` error wrapper
    #[error(transparent)]
    StdErr(#[from] std::io::Error),
    /// Captured extension markup that is not valid UTF-8
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
    /// The `quick_xml` crate error wrapper
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    /// The `quick_xml::events::attributes` crate error wrapper
    #[error(transparent)]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),
}
