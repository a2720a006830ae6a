//! XAML workflow model: element tree, path queries and vocabularies

mod document;
pub mod query;
pub mod selector;
pub mod vocabulary;

pub use document::{local_tag, Attribute, Document, Node, NodeId, QName, XmlError};
pub use query::{Query, QueryError};
