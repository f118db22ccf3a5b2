//! Pivot table and pivot cache parts of a workbook
pub mod cache_definition;
pub mod cache_field;
pub mod cache_hierarchy;
pub mod cache_records;
pub mod extension;
pub mod index;
pub mod item;
pub mod list;
pub mod pivot_area;
pub mod pivot_field;
pub mod table_definition;
pub mod tuple;
pub mod tuple_cache;
pub mod variant;

use crate::{
    config::XmlOptions,
    errors::XlsxError,
    stream::utils::{tag_of, XmlReader, XmlWriter},
};
use quick_xml::events::{BytesDecl, Event};
use std::io::{BufRead, Write};

/// SpreadsheetML main namespace
pub const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
/// Office document relationships namespace
pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// A type stored as the root element of its own part.
pub trait PivotPart: Default {
    /// Root tag of the part
    const ROOT: &'static str;
}

/// Reads a whole part, the first element must be `T::ROOT`.
pub fn read_part<T, B>(source: B, options: &XmlOptions) -> Result<T, XlsxError>
where
    T: PivotPart + XmlReader<B>,
    B: BufRead,
{
    let mut xml = options.reader(source);
    let mut buf = Vec::with_capacity(1024);
    loop {
        buf.clear();
        let (start, empty) = match xml.read_event_into(&mut buf)? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::Eof => return Err(XlsxError::XmlEof(T::ROOT.into())),
            _ => continue,
        };
        if start.local_name().as_ref() != T::ROOT.as_bytes() {
            return Err(XlsxError::UnexpectedRoot {
                expected: T::ROOT,
                found: tag_of(&start),
            });
        }
        tracing::trace!(part = T::ROOT, "reading part");
        let mut part = T::default();
        part.read_xml(&start, &mut xml, empty)?;
        return Ok(part);
    }
}

/// Writes a whole part and hands the sink back.
pub fn write_part<T, W>(part: &T, sink: W, options: &XmlOptions) -> Result<W, XlsxError>
where
    T: PivotPart + XmlWriter<W>,
    W: Write,
{
    let mut writer = options.writer(sink);
    if options.declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    }
    tracing::trace!(part = T::ROOT, "writing part");
    part.write_xml(&mut writer, T::ROOT)?;
    Ok(writer.into_inner())
}

/// Reads a part from a string with the default [`XmlOptions`].
pub fn from_xml_str<'s, T>(xml: &'s str) -> Result<T, XlsxError>
where
    T: PivotPart + XmlReader<&'s [u8]>,
{
    read_part(xml.as_bytes(), &XmlOptions::default())
}

/// Writes a part to a string with the default [`XmlOptions`].
pub fn to_xml_string<T>(part: &T) -> Result<String, XlsxError>
where
    T: PivotPart + XmlWriter<Vec<u8>>,
{
    let bytes = write_part(part, Vec::new(), &XmlOptions::default())?;
    Ok(String::from_utf8(bytes)?)
}
