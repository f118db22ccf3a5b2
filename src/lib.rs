//! Object model for the PivotTable and PivotCache parts of SpreadsheetML.
//!
//! Every type mirrors one complex type of the schema and converts to and from
//! XML through [`XmlReader`](stream::utils::XmlReader) and
//! [`XmlWriter`](stream::utils::XmlWriter). Attributes equal to their schema
//! default are left off when writing, so documents round-trip without picking
//! up noise.
//!
//! ```no_run
//! use xlpivot::{from_xml_str, to_xml_string, PivotTableDefinition};
//!
//! # fn main() -> Result<(), xlpivot::XlsxError> {
//! let xml = std::fs::read_to_string("pivotTable1.xml")?;
//! let mut table: PivotTableDefinition = from_xml_str(&xml)?;
//! table.add_row_field(0)?;
//! let _updated = to_xml_string(&table)?;
//! # Ok(())
//! # }
//! ```
pub mod config;
pub mod errors;
pub mod stream;


pub use config::XmlOptions;
pub use errors::XlsxError;
pub use stream::pivot::{
    cache_definition::PivotCacheDefinition,
    cache_field::CacheField,
    cache_hierarchy::CacheHierarchy,
    cache_records::PivotCacheRecords,
    from_xml_str, read_part,
    item::{Item, ItemKind, ItemValue},
    pivot_field::PivotField,
    table_definition::PivotTableDefinition,
    to_xml_string,
    tuple::{Tuple, TupleGroup},
    variant::VariantList,
    write_part, PivotPart,
};
