//! Reader and writer settings used when a whole part is read or written
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// Settings for [`read_part`](crate::read_part) and [`write_part`](crate::write_part).
///
/// Deserializes from any serde format, absent keys fall back to the defaults:
/// ```
/// let options: xlpivot::XmlOptions = serde_json::from_str(r#"{"indent": 2}"#).unwrap();
/// assert!(options.declaration);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlOptions {
    /// Drop whitespace-only text between tags while reading
    pub trim_text: bool,
    /// Fail on end tags that do not match their start tag
    pub check_end_names: bool,
    /// Write the `<?xml ...?>` declaration in front of a part
    pub declaration: bool,
    /// Pretty print with this many spaces per level, compact when `None`
    pub indent: Option<usize>,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            trim_text: true,
            check_end_names: true,
            declaration: true,
            indent: None,
        }
    }
}

impl XmlOptions {
    pub(crate) fn reader<B: BufRead>(&self, source: B) -> Reader<B> {
        let mut reader = Reader::from_reader(source);
        let config = reader.config_mut();
        config.trim_text(self.trim_text);
        config.check_end_names = self.check_end_names;
        config.expand_empty_elements = false;
        reader
    }

    pub(crate) fn writer<W: Write>(&self, sink: W) -> Writer<W> {
        match self.indent {
            Some(width) => Writer::new_with_indent(sink, b' ', width),
            None => Writer::new(sink),
        }
    }
}
