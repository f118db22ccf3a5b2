use super::tuple::TupleGroup;
use crate::{
    errors::XlsxError,
    stream::{
        utils::{missing_required, read_children, XmlReader, XmlWriter},
        value::{parse_attribute, HexColor, XmlValue},
    },
};
use chrono::NaiveDateTime;
use derive::{XmlDefault, XmlRead, XmlWrite};
use quick_xml::{
    events::{attributes::Attribute, BytesStart},
    Reader, Writer,
};
use std::{
    borrow::Cow,
    io::{BufRead, Write},
};

/// The kind of a cached value, one per element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    /// `m`
    Missing,
    /// `n`
    Number,
    /// `b`
    Boolean,
    /// `e`
    Error,
    /// `s`
    String,
    /// `d`
    DateTime,
    /// `x`, a shared item reference, only found in cache records
    Index,
}

impl ItemKind {
    pub const ALL: [ItemKind; 7] = [
        ItemKind::Missing,
        ItemKind::Number,
        ItemKind::Boolean,
        ItemKind::Error,
        ItemKind::String,
        ItemKind::DateTime,
        ItemKind::Index,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            ItemKind::Missing => "m",
            ItemKind::Number => "n",
            ItemKind::Boolean => "b",
            ItemKind::Error => "e",
            ItemKind::String => "s",
            ItemKind::DateTime => "d",
            ItemKind::Index => "x",
        }
    }

    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag().as_bytes() == tag)
    }
}

/// The typed payload of an [`Item`], carried in its `v` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ItemValue {
    #[default]
    Missing,
    Number(f64),
    Boolean(bool),
    /// Error code such as `#N/A` or `#DIV/0!`
    Error(String),
    String(String),
    DateTime(NaiveDateTime),
    /// Position of a shared item of the same cache field
    Index(u32),
}

impl ItemValue {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemValue::Missing => ItemKind::Missing,
            ItemValue::Number(_) => ItemKind::Number,
            ItemValue::Boolean(_) => ItemKind::Boolean,
            ItemValue::Error(_) => ItemKind::Error,
            ItemValue::String(_) => ItemKind::String,
            ItemValue::DateTime(_) => ItemKind::DateTime,
            ItemValue::Index(_) => ItemKind::Index,
        }
    }

    /// Default payload of a kind, used until `v` is read
    pub fn empty(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Missing => ItemValue::Missing,
            ItemKind::Number => ItemValue::Number(0.0),
            ItemKind::Boolean => ItemValue::Boolean(false),
            ItemKind::Error => ItemValue::Error(String::new()),
            ItemKind::String => ItemValue::String(String::new()),
            ItemKind::DateTime => ItemValue::DateTime(NaiveDateTime::default()),
            ItemKind::Index => ItemValue::Index(0),
        }
    }

    fn parse(kind: ItemKind, start: &BytesStart<'_>, attr: &Attribute<'_>) -> Result<Self, XlsxError> {
        Ok(match kind {
            ItemKind::Missing => ItemValue::Missing,
            ItemKind::Number => ItemValue::Number(parse_attribute(start, attr)?),
            ItemKind::Boolean => ItemValue::Boolean(parse_attribute(start, attr)?),
            ItemKind::Error => ItemValue::Error(parse_attribute(start, attr)?),
            ItemKind::String => ItemValue::String(parse_attribute(start, attr)?),
            ItemKind::DateTime => ItemValue::DateTime(parse_attribute(start, attr)?),
            ItemKind::Index => ItemValue::Index(parse_attribute(start, attr)?),
        })
    }

    fn to_xml(&self) -> Option<Cow<'_, str>> {
        match self {
            ItemValue::Missing => None,
            ItemValue::Number(v) => v.to_xml(),
            ItemValue::Boolean(v) => v.to_xml(),
            ItemValue::Error(v) | ItemValue::String(v) => v.to_xml(),
            ItemValue::DateTime(v) => v.to_xml(),
            ItemValue::Index(v) => v.to_xml(),
        }
    }
}

/// Member property index of an item, `CT_X` as used under items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, XmlDefault, XmlRead, XmlWrite)]
struct PropertyIndex {
    #[xml(name = "v", default = 0)]
    value: u32,
}

/// One cached value: `CT_Missing`, `CT_Number`, `CT_Boolean`, `CT_Error`,
/// `CT_String` or `CT_DateTime`, plus `CT_Index` inside records.
///
/// All kinds share the same attribute set:
/// ```xml
/// <attribute name="v" use="required"/>                  <!-- not on CT_Missing -->
/// <attribute name="u" type="xsd:boolean"/>
/// <attribute name="f" type="xsd:boolean"/>
/// <attribute name="c" type="s:ST_Xstring"/>
/// <attribute name="cp" type="xsd:unsignedInt"/>
/// <attribute name="in" type="xsd:unsignedInt"/>
/// <attribute name="bc" type="ST_UnsignedIntHex"/>
/// <attribute name="fc" type="ST_UnsignedIntHex"/>
/// <attribute name="i" type="xsd:boolean" default="false"/>
/// <attribute name="un" type="xsd:boolean" default="false"/>
/// <attribute name="st" type="xsd:boolean" default="false"/>
/// <attribute name="b" type="xsd:boolean" default="false"/>
/// ```
/// and the children `tpls` (any number) followed by `x` (any number).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub value: ItemValue,
    /// Value is not used by any pivot table (`u`)
    pub unused: Option<bool>,
    /// Value comes from a calculated item (`f`)
    pub calculated: Option<bool>,
    /// Display caption (`c`)
    pub caption: Option<String>,
    /// Number of member properties (`cp`)
    pub property_count: Option<u32>,
    /// Index of the OLAP server format (`in`)
    pub format_index: Option<u32>,
    pub background_color: Option<HexColor>,
    pub foreground_color: Option<HexColor>,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub bold: bool,
    /// OLAP member tuples (`tpls`)
    pub tuples: Vec<TupleGroup>,
    /// Indexes into the field's member property map (`x`)
    pub member_property_indexes: Vec<u32>,
}

impl Item {
    pub fn new(value: ItemValue) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    pub fn missing() -> Self {
        Self::new(ItemValue::Missing)
    }

    pub fn number(value: f64) -> Self {
        Self::new(ItemValue::Number(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ItemValue::Boolean(value))
    }

    pub fn error(code: impl Into<String>) -> Self {
        Self::new(ItemValue::Error(code.into()))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ItemValue::String(value.into()))
    }

    pub fn date_time(value: NaiveDateTime) -> Self {
        Self::new(ItemValue::DateTime(value))
    }

    pub fn index(value: u32) -> Self {
        Self::new(ItemValue::Index(value))
    }

    pub fn kind(&self) -> ItemKind {
        self.value.kind()
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            ItemValue::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            ItemValue::String(v) => Some(v),
            _ => None,
        }
    }

    fn push_attributes<'a>(&'a self, attrs: &mut Vec<(&'static str, Cow<'a, str>)>) {
        if let Some(value) = self.value.to_xml() {
            attrs.push(("v", value));
        }
        if self.kind() == ItemKind::Index {
            return;
        }
        let optional: [(&'static str, Option<Cow<'a, str>>); 7] = [
            ("u", self.unused.to_xml()),
            ("f", self.calculated.to_xml()),
            ("c", self.caption.to_xml()),
            ("cp", self.property_count.to_xml()),
            ("in", self.format_index.to_xml()),
            ("bc", self.background_color.to_xml()),
            ("fc", self.foreground_color.to_xml()),
        ];
        attrs.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.map(|value| (name, value))),
        );
        for (name, flag) in [
            ("i", self.italic),
            ("un", self.underline),
            ("st", self.strikethrough),
            ("b", self.bold),
        ] {
            if flag {
                attrs.push((name, Cow::Borrowed("1")));
            }
        }
    }
}

impl<B: BufRead> XmlReader<B> for Item {
    fn read_xml(
        &mut self,
        start: &BytesStart<'_>,
        xml: &mut Reader<B>,
        empty: bool,
    ) -> Result<(), XlsxError> {
        // The tag decides the kind
        if let Some(kind) = ItemKind::from_tag(start.local_name().as_ref()) {
            if kind != self.kind() {
                self.value = ItemValue::empty(kind);
            }
        }
        let kind = self.kind();

        let mut seen_value = false;
        for attr in start.attributes() {
            let a = attr?;
            match a.key.as_ref() {
                b"v" if kind != ItemKind::Missing => {
                    self.value = ItemValue::parse(kind, start, &a)?;
                    seen_value = true;
                }
                b"u" => self.unused = parse_attribute(start, &a)?,
                b"f" => self.calculated = parse_attribute(start, &a)?,
                b"c" => self.caption = parse_attribute(start, &a)?,
                b"cp" => self.property_count = parse_attribute(start, &a)?,
                b"in" => self.format_index = parse_attribute(start, &a)?,
                b"bc" => self.background_color = parse_attribute(start, &a)?,
                b"fc" => self.foreground_color = parse_attribute(start, &a)?,
                b"i" => self.italic = parse_attribute(start, &a)?,
                b"un" => self.underline = parse_attribute(start, &a)?,
                b"st" => self.strikethrough = parse_attribute(start, &a)?,
                b"b" => self.bold = parse_attribute(start, &a)?,
                _ => (),
            }
        }
        if !seen_value && kind != ItemKind::Missing {
            missing_required(start, "v");
        }

        read_children(start, xml, empty, |e, xml, empty| {
            match e.local_name().as_ref() {
                b"tpls" => {
                    let mut group = TupleGroup::default();
                    group.read_xml(e, xml, empty)?;
                    self.tuples.push(group);
                }
                b"x" => {
                    let mut index = PropertyIndex::default();
                    index.read_xml(e, xml, empty)?;
                    self.member_property_indexes.push(index.value);
                }
                _ => return Ok(false),
            }
            Ok(true)
        })
    }
}

impl<W: Write> XmlWriter<W> for Item {
    fn write_xml<'a>(
        &self,
        writer: &'a mut Writer<W>,
        tag_name: &'a str,
    ) -> Result<&'a mut Writer<W>, XlsxError> {
        let mut attrs = Vec::new();
        self.push_attributes(&mut attrs);

        let element = writer
            .create_element(tag_name)
            .with_attributes(attrs.iter().map(|(key, value)| (*key, value.as_ref())));
        if self.tuples.is_empty() && self.member_property_indexes.is_empty() {
            element.write_empty()?;
        } else {
            element.write_inner_content::<_, XlsxError>(|writer| {
                for group in &self.tuples {
                    group.write_xml(writer, "tpls")?;
                }
                for &value in &self.member_property_indexes {
                    PropertyIndex { value }.write_xml(writer, "x")?;
                }
                Ok(())
            })?;
        }
        Ok(writer)
    }
}
