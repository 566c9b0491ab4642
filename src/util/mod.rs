//! Shared helpers.
//!
//! - **XML escaping**: entity-escaping for text written into the generated feed

mod xml;

pub use xml::escape_xml;
