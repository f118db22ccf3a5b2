//! Conversion between attribute text and typed field values
use crate::{errors::XlsxError, stream::utils::tag_of};
use chrono::NaiveDateTime;
use quick_xml::events::{attributes::Attribute, BytesStart};
use std::borrow::Cow;

/// A scalar that can be stored in an XML attribute.
pub trait XmlValue: Sized {
    /// Schema type name used in error messages
    const KIND: &'static str;

    /// Parses attribute text, `None` when it does not fit the type
    fn from_xml(value: &str) -> Option<Self>;

    /// Attribute text for the value. `None` leaves the attribute off the element.
    fn to_xml(&self) -> Option<Cow<'_, str>>;
}

/// Reads one attribute of `start` into a typed value.
///
/// Malformed text is never coerced, it fails with [`XlsxError::InvalidAttribute`].
pub(crate) fn parse_attribute<T: XmlValue>(
    start: &BytesStart<'_>,
    attr: &Attribute<'_>,
) -> Result<T, XlsxError> {
    let raw = attr.unescape_value()?;
    T::from_xml(&raw).ok_or_else(|| XlsxError::InvalidAttribute {
        element: tag_of(start),
        attribute: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
        value: raw.into_owned(),
        expected: T::KIND,
    })
}

impl<T: XmlValue> XmlValue for Option<T> {
    const KIND: &'static str = T::KIND;

    fn from_xml(value: &str) -> Option<Self> {
        T::from_xml(value).map(Some)
    }

    fn to_xml(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(T::to_xml)
    }
}

impl XmlValue for bool {
    const KIND: &'static str = "xsd:boolean";

    fn from_xml(value: &str) -> Option<Self> {
        match value {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }

    fn to_xml(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(if *self { "1" } else { "0" }))
    }
}

macro_rules! integer_value {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl XmlValue for $ty {
                const KIND: &'static str = $kind;

                fn from_xml(value: &str) -> Option<Self> {
                    value.trim().parse().ok()
                }

                fn to_xml(&self) -> Option<Cow<'_, str>> {
                    Some(Cow::Owned(self.to_string()))
                }
            }
        )*
    };
}

integer_value! {
    u8 => "xsd:unsignedByte",
    u16 => "xsd:unsignedShort",
    u32 => "xsd:unsignedInt",
    i32 => "xsd:int",
}

impl XmlValue for f64 {
    const KIND: &'static str = "xsd:double";

    fn from_xml(value: &str) -> Option<Self> {
        match value.trim() {
            "INF" => Some(f64::INFINITY),
            "-INF" => Some(f64::NEG_INFINITY),
            "NaN" => Some(f64::NAN),
            // Rust also accepts `inf` and `infinity`, xsd does not
            other if other.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => {
                None
            }
            other => other.parse().ok(),
        }
    }

    fn to_xml(&self) -> Option<Cow<'_, str>> {
        let text = if self.is_nan() {
            Cow::Borrowed("NaN")
        } else if self.is_infinite() {
            Cow::Borrowed(if *self > 0.0 { "INF" } else { "-INF" })
        } else {
            Cow::Owned(self.to_string())
        };
        Some(text)
    }
}

impl XmlValue for String {
    const KIND: &'static str = "xsd:string";

    fn from_xml(value: &str) -> Option<Self> {
        Some(value.to_owned())
    }

    fn to_xml(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

/// `xsd:dateTime` as written by spreadsheet applications, without a zone offset.
impl XmlValue for NaiveDateTime {
    const KIND: &'static str = "xsd:dateTime";

    fn from_xml(value: &str) -> Option<Self> {
        let value = value.trim().trim_end_matches('Z');
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }

    fn to_xml(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
    }
}

/// An ARGB color stored as `ST_UnsignedIntHex` (eight hex digits).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(pub u32);

impl XmlValue for HexColor {
    const KIND: &'static str = "ST_UnsignedIntHex";

    fn from_xml(value: &str) -> Option<Self> {
        if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(value, 16).ok().map(HexColor)
    }

    fn to_xml(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(format!("{:08X}", self.0)))
    }
}
