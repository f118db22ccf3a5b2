use crate::{
    errors::XlsxError,
    stream::utils::{tag_of, XmlReader, XmlWriter},
};
use quick_xml::{
    events::{BytesStart, Event},
    Reader, Writer,
};
use std::io::{BufRead, Write};

/// Future feature data storage area (`CT_ExtensionList`).
///
/// Extensions are not interpreted. The markup between `<extLst>` and
/// `</extLst>` is captured as-is, including namespace prefixes declared on
/// the `ext` elements, and written back unchanged.
///
/// # XML Schema Mapping
/// ```xml
/// <complexType name="CT_ExtensionList">
///     <sequence>
///         <group ref="EG_ExtensionList" minOccurs="0" maxOccurs="1"/>
///     </sequence>
/// </complexType>
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtensionList {
    /// Inner markup, the `ext` children
    pub raw: String,
}

impl<B: BufRead> XmlReader<B> for ExtensionList {
    fn read_xml(
        &mut self,
        start: &BytesStart<'_>,
        xml: &mut Reader<B>,
        empty: bool,
    ) -> Result<(), XlsxError> {
        self.raw.clear();
        if empty {
            return Ok(());
        }
        let mut capture = Writer::new(Vec::new());
        let mut depth = 0usize;
        let mut buf = Vec::with_capacity(1024);
        loop {
            buf.clear();
            match xml.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    depth += 1;
                    capture.write_event(Event::Start(e))?;
                }
                Event::End(e) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    capture.write_event(Event::End(e))?;
                }
                Event::Eof => return Err(XlsxError::XmlEof(tag_of(start))),
                event => capture.write_event(event)?,
            }
        }
        self.raw = String::from_utf8(capture.into_inner())?;
        Ok(())
    }
}

impl<W: Write> XmlWriter<W> for ExtensionList {
    fn write_xml<'a>(
        &self,
        writer: &'a mut Writer<W>,
        tag_name: &'a str,
    ) -> Result<&'a mut Writer<W>, XlsxError> {
        let element = writer.create_element(tag_name);
        if self.raw.is_empty() {
            element.write_empty()?;
        } else {
            element.write_inner_content::<_, XlsxError>(|writer| {
                writer.get_mut().write_all(self.raw.as_bytes())?;
                Ok(())
            })?;
        }
        Ok(writer)
    }
}

#[cfg(test)]
mod extension_list {
    use super::ExtensionList;
    use crate::stream::pivot::test_support::{read, write};
    use pretty_assertions::assert_eq;

    #[test]
    fn extensions_pass_through_verbatim() {
        let xml = r#"<extLst><ext uri="{962EF5D1-5CA2-4c93-8EF4-DBF5C05439D2}" xmlns:x14="http://schemas.microsoft.com/office/spreadsheetml/2009/9/main"><x14:pivotTableDefinition hideValuesRow="1"/></ext></extLst>"#;
        let ext: ExtensionList = read(xml);
        assert_eq!(
            ext.raw,
            r#"<ext uri="{962EF5D1-5CA2-4c93-8EF4-DBF5C05439D2}" xmlns:x14="http://schemas.microsoft.com/office/spreadsheetml/2009/9/main"><x14:pivotTableDefinition hideValuesRow="1"/></ext>"#
        );
        assert_eq!(write(&ext, "extLst"), xml);
    }

    #[test]
    fn empty_extension_list() {
        let ext: ExtensionList = read("<extLst/>");
        assert_eq!(ext, ExtensionList::default());
        assert_eq!(write(&ext, "extLst"), "<extLst/>");
    }
}
