use crate::{
    errors::XlsxError,
    stream::utils::{read_children, ListEntry, XmlListReader, XmlListWriter, XmlReader, XmlWriter},
};
use quick_xml::{events::BytesStart, Reader, Writer};
use std::{
    io::{BufRead, Write},
    ops::{Deref, DerefMut},
};

/// A counted wrapper element holding entries of one type, such as
/// `<pivotFields count="2"><pivotField/><pivotField/></pivotFields>`.
///
/// The `count` attribute is never stored, it is the list length when written.
#[derive(Debug, Clone, PartialEq)]
pub struct List<T> {
    pub entries: Vec<T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(entries: Vec<T>) -> Self {
        Self { entries }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T> Deref for List<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<T> DerefMut for List<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.entries
    }
}

impl<B, T> XmlReader<B> for List<T>
where
    B: BufRead,
    T: ListEntry + XmlReader<B> + Default,
{
    fn read_xml(
        &mut self,
        start: &BytesStart<'_>,
        xml: &mut Reader<B>,
        empty: bool,
    ) -> Result<(), XlsxError> {
        // `count` is derived from the entries
        read_children(start, xml, empty, |e, xml, empty| {
            self.entries.read_entry(e, xml, empty)
        })
    }
}

impl<W, T> XmlWriter<W> for List<T>
where
    W: Write,
    T: ListEntry + XmlWriter<W>,
{
    fn write_xml<'a>(
        &self,
        writer: &'a mut Writer<W>,
        tag_name: &'a str,
    ) -> Result<&'a mut Writer<W>, XlsxError> {
        let count = self.entries.len().to_string();
        let element = writer
            .create_element(tag_name)
            .with_attribute(("count", count.as_str()));
        if self.entries.is_empty() {
            element.write_empty()?;
        } else {
            element.write_inner_content::<_, XlsxError>(|writer| {
                self.entries.write_entries(writer)
            })?;
        }
        Ok(writer)
    }
}
