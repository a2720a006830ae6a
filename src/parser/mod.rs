pub mod xml;

pub use xml::{Document, Node, QueryError, XmlError};
