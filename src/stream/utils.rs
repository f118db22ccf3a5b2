//! The module includes extra utility tooling to help glue logic together
use crate::errors::XlsxError;
use quick_xml::{
    events::{BytesStart, Event},
    Reader, Writer,
};
use std::io::{BufRead, Write};

/// A trait for writing objects as XML elements.
///
/// This trait defines a method for serializing an object into XML format using a [`Writer<W>`].
///
/// # Arguments
/// - `writer`: A mutable reference to a [`Writer<W>`], which writes XML data.
/// - `tag_name`: The name of the XML element to be written (e.g., `"name"` for `<name>...</name>`).
pub trait XmlWriter<W: Write> {
    /// Allows us to serialize an object into XML format
    fn write_xml<'a>(
        &self,
        writer: &'a mut Writer<W>,
        tag_name: &'a str,
    ) -> Result<&'a mut Writer<W>, XlsxError>;
}

/// A trait for reading XML data into a custom object.
///
/// The parent has already pulled the opening tag off the stream and hands it
/// over, so attributes can be read without re-scanning and nested structures
/// never lose their first event.
///
/// # Arguments
/// - `start`: The opening tag of the element (e.g., `<name a="1">`).
/// - `xml`: A mutable reference to a [`Reader<B>`], positioned right after `start`.
/// - `empty`: Whether `start` was self-closing (`<name/>`). When it was not, the
///   implementation must consume everything up to and including the matching end tag.
pub trait XmlReader<B: BufRead> {
    /// Allows us to deserialize xml into a custom object
    fn read_xml(
        &mut self,
        start: &BytesStart<'_>,
        xml: &mut Reader<B>,
        empty: bool,
    ) -> Result<(), XlsxError>;
}

/// A list of sibling elements sharing one parent with other children.
pub trait XmlListReader<B: BufRead> {
    /// Reads `start` into the list when its tag belongs there, returning `false` otherwise.
    fn read_entry(
        &mut self,
        start: &BytesStart<'_>,
        xml: &mut Reader<B>,
        empty: bool,
    ) -> Result<bool, XlsxError>;
}

/// Writing side of [`XmlListReader`], entries are written in list order.
pub trait XmlListWriter<W: Write> {
    fn write_entries(&self, writer: &mut Writer<W>) -> Result<(), XlsxError>;
}

/// An element that appears as a member of a counted list (`<items count="n"><item/>...`).
pub trait ListEntry {
    /// Tag of each member
    const TAG: &'static str;
}

impl<B, T> XmlListReader<B> for Vec<T>
where
    B: BufRead,
    T: ListEntry + XmlReader<B> + Default,
{
    fn read_entry(
        &mut self,
        start: &BytesStart<'_>,
        xml: &mut Reader<B>,
        empty: bool,
    ) -> Result<bool, XlsxError> {
        if start.local_name().as_ref() != T::TAG.as_bytes() {
            return Ok(false);
        }
        let mut entry = T::default();
        entry.read_xml(start, xml, empty)?;
        self.push(entry);
        Ok(true)
    }
}

impl<W, T> XmlListWriter<W> for Vec<T>
where
    W: Write,
    T: ListEntry + XmlWriter<W>,
{
    fn write_entries(&self, writer: &mut Writer<W>) -> Result<(), XlsxError> {
        for entry in self {
            entry.write_xml(writer, T::TAG)?;
        }
        Ok(())
    }
}

/// Walks the children of `start` in document order.
///
/// Every opening tag is handed to `child`, which returns `false` for tags it
/// does not know. Those are skipped with their whole subtree.
pub(crate) fn read_children<B, F>(
    start: &BytesStart<'_>,
    xml: &mut Reader<B>,
    empty: bool,
    mut child: F,
) -> Result<(), XlsxError>
where
    B: BufRead,
    F: FnMut(&BytesStart<'_>, &mut Reader<B>, bool) -> Result<bool, XlsxError>,
{
    if empty {
        return Ok(());
    }
    // Keep memory usage to a minimum
    let mut buf = Vec::with_capacity(1024);
    loop {
        buf.clear();
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                if !child(e, xml, false)? {
                    skip_unknown(start, e);
                    xml.read_to_end_into(e.name(), &mut Vec::new())?;
                }
            }
            Event::Empty(ref e) => {
                if !child(e, xml, true)? {
                    skip_unknown(start, e);
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(XlsxError::XmlEof(tag_of(start))),
            _ => (),
        }
    }
    Ok(())
}

/// Local tag name of an element, for diagnostics.
pub(crate) fn tag_of(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn skip_unknown(parent: &BytesStart<'_>, child: &BytesStart<'_>) {
    tracing::debug!(
        parent = %tag_of(parent),
        element = %tag_of(child),
        "skipping unknown element"
    );
}

/// Reports a required attribute the document left out. The field keeps its
/// schema default so parsing can go on.
pub(crate) fn missing_required(start: &BytesStart<'_>, attribute: &str) {
    tracing::warn!(
        element = %tag_of(start),
        attribute,
        "required attribute is missing, using the schema default"
    );
}
